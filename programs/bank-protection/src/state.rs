use anchor_lang::prelude::*;

use crate::{constants::*, errors::BankError};

/// Admin registry holding the single administrative authority
///
/// Security considerations:
/// - Authority stored in state (not instruction args)
/// - Only the current holder can transfer it
/// - 64 bytes padding for future upgrades
#[account]
pub struct AdminState {
    /// Key allowed to run privileged pool operations
    pub authority: Pubkey,          // 32 bytes

    /// Bump seed for admin state PDA
    pub bump: u8,                   // 1 byte

    // Padding for future upgrades
    pub _reserved: [u8; 64],        // 64 bytes
}

impl AdminState {
    pub fn is_initialized(&self) -> bool {
        self.authority != Pubkey::default()
    }

    /// Record the first authority. Fails if the registry already has one.
    ///
    /// `initializer` must be the program's upgrade authority. A program
    /// deployed immutable (`None`) has no designated initializer.
    pub fn initialize(
        &mut self,
        initializer: &Pubkey,
        upgrade_authority: Option<Pubkey>,
        initial_authority: Pubkey,
        bump: u8,
    ) -> Result<()> {
        require!(!self.is_initialized(), BankError::AlreadyInitialized);
        require!(
            upgrade_authority == Some(*initializer),
            BankError::Unauthorized
        );
        require!(
            initial_authority != Pubkey::default(),
            BankError::InvalidParameter
        );

        self.authority = initial_authority;
        self.bump = bump;
        self._reserved = [0; 64];
        Ok(())
    }

    /// Capability check run at the top of every privileged operation
    pub fn require_authority(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.authority, BankError::Unauthorized);
        Ok(())
    }

    pub fn is_admin(&self, candidate: &Pubkey) -> bool {
        self.is_initialized() && self.authority == *candidate
    }

    /// Hand the authority to `new_authority`, returning the previous holder
    pub fn transfer_authority(&mut self, caller: &Pubkey, new_authority: Pubkey) -> Result<Pubkey> {
        self.require_authority(caller)?;
        require!(
            new_authority != Pubkey::default(),
            BankError::InvalidParameter
        );

        let previous = self.authority;
        self.authority = new_authority;
        Ok(previous)
    }
}

/// Pause state of the pool
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolStatus {
    Active,
    Paused,
}

/// Liquidity pool backing the issued token with custodied SOL
///
/// Invariant: while `issued_supply > 0`,
/// `collateral_balance * 10000 / issued_supply >= min_ratio_bps`.
///
/// Security considerations:
/// - Written only through the engine (`crate::engine`)
/// - Both balances change together through `apply`
/// - Bumps stored for efficient PDA signing
#[account]
pub struct PoolState {
    /// Admin registry this pool answers to
    pub admin: Pubkey,              // 32 bytes

    /// Mint of the token issued against collateral
    pub issued_mint: Pubkey,        // 32 bytes

    /// Lamports held in custody on behalf of depositors
    pub collateral_balance: u64,    // 8 bytes

    /// Issued token base units outstanding
    pub issued_supply: u64,         // 8 bytes

    /// Minimum collateral/issued ratio in basis points
    pub min_ratio_bps: u64,         // 8 bytes

    /// Lamports ever deposited
    pub total_deposited: u64,       // 8 bytes

    /// Lamports ever withdrawn
    pub total_withdrawn: u64,       // 8 bytes

    /// Depositor positions opened against this pool
    pub depositor_count: u64,       // 8 bytes

    /// Emergency stop for deposit, withdraw and issue
    pub paused: bool,               // 1 byte

    /// Bump seed for pool state PDA
    pub bump: u8,                   // 1 byte

    /// Bump seed for SOL custody PDA
    pub vault_bump: u8,             // 1 byte

    /// Bump seed for issued mint PDA
    pub mint_bump: u8,              // 1 byte

    /// Bump seed for mint authority PDA
    pub mint_authority_bump: u8,    // 1 byte

    // Padding for future upgrades
    pub _reserved: [u8; 40],        // 40 bytes
}

impl PoolState {
    /// Backing ratio in bps for arbitrary balances
    ///
    /// Rounds down, so a gate comparing against it never admits a state that
    /// is below the minimum. Nothing issued, or a ratio beyond u64, reports
    /// `RATIO_UNBOUNDED`.
    pub fn ratio_for(collateral: u64, issued: u64) -> u64 {
        if issued == 0 {
            return RATIO_UNBOUNDED;
        }

        // u64::MAX * 10000 fits in u128
        let ratio_u128 = (collateral as u128) * (BPS_DENOMINATOR as u128) / (issued as u128);

        u64::try_from(ratio_u128).unwrap_or(RATIO_UNBOUNDED)
    }

    /// Current backing ratio in bps
    pub fn ratio_bps(&self) -> u64 {
        Self::ratio_for(self.collateral_balance, self.issued_supply)
    }

    /// Whether the given balances satisfy this pool's minimum ratio
    pub fn meets_min_ratio(&self, collateral: u64, issued: u64) -> bool {
        issued == 0 || Self::ratio_for(collateral, issued) >= self.min_ratio_bps
    }

    pub fn status(&self) -> PoolStatus {
        if self.paused {
            PoolStatus::Paused
        } else {
            PoolStatus::Active
        }
    }

    pub fn require_active(&self) -> Result<()> {
        require!(self.status() == PoolStatus::Active, BankError::InvalidState);
        Ok(())
    }

    /// Reject a minimum ratio of zero or above `MAX_MIN_RATIO_BPS`
    pub fn validate_min_ratio(min_ratio_bps: u64) -> Result<()> {
        require!(
            min_ratio_bps > 0 && min_ratio_bps <= MAX_MIN_RATIO_BPS,
            BankError::InvalidParameter
        );
        Ok(())
    }

    /// Minimum ratio for a new pool: zero selects `DEFAULT_MIN_RATIO_BPS`
    pub fn resolve_min_ratio(requested_bps: u64) -> Result<u64> {
        let min_ratio_bps = if requested_bps == 0 {
            DEFAULT_MIN_RATIO_BPS
        } else {
            requested_bps
        };
        Self::validate_min_ratio(min_ratio_bps)?;
        Ok(min_ratio_bps)
    }

    /// Balances after applying signed deltas, without writing them
    pub fn project(&self, delta_collateral: i128, delta_issued: i128) -> Result<(u64, u64)> {
        let collateral = shift(self.collateral_balance, delta_collateral)?;
        let issued = shift(self.issued_supply, delta_issued)?;
        Ok((collateral, issued))
    }

    /// Apply signed deltas to both balances in one step
    ///
    /// Both results are computed before either field is written, so a failing
    /// delta leaves the pool untouched.
    pub fn apply(&mut self, delta_collateral: i128, delta_issued: i128) -> Result<()> {
        let (collateral, issued) = self.project(delta_collateral, delta_issued)?;
        self.collateral_balance = collateral;
        self.issued_supply = issued;
        Ok(())
    }
}

fn shift(value: u64, delta: i128) -> Result<u64> {
    let shifted = (value as i128)
        .checked_add(delta)
        .ok_or(error!(BankError::MathOverflow))?;

    u64::try_from(shifted).map_err(|_| error!(BankError::MathOverflow))
}

/// Lamports a single depositor has in the pool
#[account]
pub struct DepositorPosition {
    /// Depositor that may withdraw from this position
    pub owner: Pubkey,              // 32 bytes

    /// Pool the position belongs to
    pub pool: Pubkey,               // 32 bytes

    /// Lamports deposited and not yet withdrawn
    pub deposited: u64,             // 8 bytes

    /// Bump seed for position PDA
    pub bump: u8,                   // 1 byte

    pub _reserved: [u8; 32],        // 32 bytes
}

impl DepositorPosition {
    pub fn is_open(&self) -> bool {
        self.owner != Pubkey::default()
    }

    /// Bind a freshly created position to its owner and pool
    pub fn open(&mut self, pool: Pubkey, owner: Pubkey, bump: u8) {
        self.owner = owner;
        self.pool = pool;
        self.deposited = 0;
        self.bump = bump;
        self._reserved = [0; 32];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_pool(collateral_balance: u64, issued_supply: u64, min_ratio_bps: u64) -> PoolState {
        PoolState {
            admin: Pubkey::default(),
            issued_mint: Pubkey::default(),
            collateral_balance,
            issued_supply,
            min_ratio_bps,
            total_deposited: 0,
            total_withdrawn: 0,
            depositor_count: 0,
            paused: false,
            bump: 0,
            vault_bump: 0,
            mint_bump: 0,
            mint_authority_bump: 0,
            _reserved: [0; 40],
        }
    }

    #[test]
    fn test_ratio_with_nothing_issued_is_unbounded() {
        let pool = mock_pool(0, 0, 15_000);
        assert_eq!(pool.ratio_bps(), RATIO_UNBOUNDED);
        assert!(pool.meets_min_ratio(0, 0));
    }

    #[test]
    fn test_ratio_two_to_one() {
        let pool = mock_pool(1000, 500, 15_000);
        assert_eq!(pool.ratio_bps(), 20_000);
    }

    #[test]
    fn test_ratio_rounds_down() {
        // 900 * 10000 / 700 = 12857.14...
        assert_eq!(PoolState::ratio_for(900, 700), 12_857);
    }

    #[test]
    fn test_ratio_saturates_on_huge_collateral() {
        assert_eq!(PoolState::ratio_for(u64::MAX, 1), RATIO_UNBOUNDED);
    }

    #[test]
    fn test_meets_min_ratio_boundary() {
        let pool = mock_pool(0, 0, 15_000);
        assert!(pool.meets_min_ratio(750, 500));
        assert!(!pool.meets_min_ratio(749, 500));
    }

    #[test]
    fn test_apply_moves_both_balances() {
        let mut pool = mock_pool(1000, 500, 15_000);
        pool.apply(-100, 250).unwrap();
        assert_eq!(pool.collateral_balance, 900);
        assert_eq!(pool.issued_supply, 750);
    }

    #[test]
    fn test_apply_underflow_leaves_pool_untouched() {
        let mut pool = mock_pool(1000, 500, 15_000);
        // collateral delta is fine, issued delta underflows
        assert!(pool.apply(-100, -501).is_err());
        assert_eq!(pool.collateral_balance, 1000);
        assert_eq!(pool.issued_supply, 500);
    }

    #[test]
    fn test_apply_overflow_rejected() {
        let mut pool = mock_pool(u64::MAX, 0, 15_000);
        assert!(pool.apply(1, 0).is_err());
        assert_eq!(pool.collateral_balance, u64::MAX);
    }

    #[test]
    fn test_validate_min_ratio_range() {
        assert!(PoolState::validate_min_ratio(0).is_err());
        assert!(PoolState::validate_min_ratio(1).is_ok());
        assert!(PoolState::validate_min_ratio(MAX_MIN_RATIO_BPS).is_ok());
        assert!(PoolState::validate_min_ratio(MAX_MIN_RATIO_BPS + 1).is_err());
    }

    #[test]
    fn test_status_follows_paused_flag() {
        let mut pool = mock_pool(0, 0, 15_000);
        assert_eq!(pool.status(), PoolStatus::Active);
        assert!(pool.require_active().is_ok());

        pool.paused = true;
        assert_eq!(pool.status(), PoolStatus::Paused);
        assert!(pool.require_active().is_err());
    }

    #[test]
    fn test_admin_initialize_once() {
        let mut admin = AdminState {
            authority: Pubkey::default(),
            bump: 0,
            _reserved: [0; 64],
        };
        let deployer = Pubkey::new_unique();
        let first = Pubkey::new_unique();

        admin.initialize(&deployer, Some(deployer), first, 254).unwrap();
        assert_eq!(admin.authority, first);
        assert_eq!(admin.bump, 254);

        let err = admin
            .initialize(&deployer, Some(deployer), Pubkey::new_unique(), 254)
            .unwrap_err();
        assert_eq!(err, BankError::AlreadyInitialized.into());
        assert_eq!(admin.authority, first);
    }

    #[test]
    fn test_admin_initialize_requires_upgrade_authority() {
        let mut admin = AdminState {
            authority: Pubkey::default(),
            bump: 0,
            _reserved: [0; 64],
        };
        let deployer = Pubkey::new_unique();
        let front_runner = Pubkey::new_unique();

        // Someone other than the upgrade authority cannot claim the registry
        let err = admin
            .initialize(&front_runner, Some(deployer), front_runner, 254)
            .unwrap_err();
        assert_eq!(err, BankError::Unauthorized.into());
        assert!(!admin.is_initialized());

        // Immutable program: nobody is designated
        let err = admin
            .initialize(&deployer, None, deployer, 254)
            .unwrap_err();
        assert_eq!(err, BankError::Unauthorized.into());
        assert!(!admin.is_initialized());

        // The deployer can still initialize afterwards and name someone else
        let master = Pubkey::new_unique();
        admin.initialize(&deployer, Some(deployer), master, 254).unwrap();
        assert!(admin.is_admin(&master));
        assert!(!admin.is_admin(&deployer));
    }

    #[test]
    fn test_admin_initialize_rejects_default_key() {
        let mut admin = AdminState {
            authority: Pubkey::default(),
            bump: 0,
            _reserved: [0; 64],
        };
        let deployer = Pubkey::new_unique();

        let err = admin
            .initialize(&deployer, Some(deployer), Pubkey::default(), 254)
            .unwrap_err();
        assert_eq!(err, BankError::InvalidParameter.into());
    }

    #[test]
    fn test_serialized_layouts_match_account_sizes() {
        let mut bytes = Vec::new();
        mock_pool(1, 2, 3).serialize(&mut bytes).unwrap();
        assert_eq!(8 + bytes.len(), POOL_STATE_SIZE);

        let admin = AdminState {
            authority: Pubkey::new_unique(),
            bump: 1,
            _reserved: [0; 64],
        };
        let mut bytes = Vec::new();
        admin.serialize(&mut bytes).unwrap();
        assert_eq!(8 + bytes.len(), ADMIN_STATE_SIZE);

        let mut position = DepositorPosition {
            owner: Pubkey::default(),
            pool: Pubkey::default(),
            deposited: 0,
            bump: 0,
            _reserved: [0; 32],
        };
        position.open(Pubkey::new_unique(), Pubkey::new_unique(), 255);
        let mut bytes = Vec::new();
        position.serialize(&mut bytes).unwrap();
        assert_eq!(8 + bytes.len(), POSITION_SIZE);
    }

    #[test]
    fn test_resolve_min_ratio_defaults_on_zero() {
        assert_eq!(PoolState::resolve_min_ratio(0).unwrap(), DEFAULT_MIN_RATIO_BPS);
        assert_eq!(PoolState::resolve_min_ratio(20_000).unwrap(), 20_000);
        assert!(PoolState::resolve_min_ratio(MAX_MIN_RATIO_BPS + 1).is_err());
    }

    #[test]
    fn test_admin_transfer_requires_holder() {
        let holder = Pubkey::new_unique();
        let mut admin = AdminState {
            authority: holder,
            bump: 0,
            _reserved: [0; 64],
        };
        let stranger = Pubkey::new_unique();
        let next = Pubkey::new_unique();

        let err = admin.transfer_authority(&stranger, next).unwrap_err();
        assert_eq!(err, BankError::Unauthorized.into());
        assert_eq!(admin.authority, holder);

        assert_eq!(admin.transfer_authority(&holder, next).unwrap(), holder);
        assert!(admin.is_admin(&next));
        assert!(!admin.is_admin(&holder));
    }
}
