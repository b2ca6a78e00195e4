// Constants for the Bank Protection program

/// Seed for the admin registry PDA
pub const ADMIN_SEED: &[u8] = b"admin";

/// Seed for the pool state PDA
pub const POOL_SEED: &[u8] = b"pool";

/// Seed for the system-owned PDA that holds deposited lamports
pub const SOL_VAULT_SEED: &[u8] = b"sol_vault";

/// Seed for the issued token mint PDA
pub const ISSUED_MINT_SEED: &[u8] = b"issued";

/// Seed for the PDA that signs as mint authority of the issued token
pub const MINT_AUTHORITY_SEED: &[u8] = b"mint_authority";

/// Seed for per-depositor position PDAs
pub const POSITION_SEED: &[u8] = b"position";

/// 10000 bps = 100%
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Highest accepted minimum backing ratio (1000%)
pub const MAX_MIN_RATIO_BPS: u64 = 100_000;

/// Minimum backing ratio used when `initialize_pool` is given 0 (150%)
pub const DEFAULT_MIN_RATIO_BPS: u64 = 15_000;

/// Ratio reported while nothing is issued
pub const RATIO_UNBOUNDED: u64 = u64::MAX;

/// Issued token decimals, equal to SOL so one base unit is backed by lamports 1:1
pub const ISSUED_DECIMALS: u8 = 9;

/// Space for AdminState account (8 discriminator + 32 authority + 1 bump + 64 padding)
pub const ADMIN_STATE_SIZE: usize = 8 + 32 + 1 + 64;

/// Space for PoolState account (8 discriminator + 32 admin + 32 issued_mint +
/// 8 collateral_balance + 8 issued_supply + 8 min_ratio_bps + 8 total_deposited +
/// 8 total_withdrawn + 8 depositor_count + 1 paused + 1 bump + 1 vault_bump +
/// 1 mint_bump + 1 mint_authority_bump + 40 padding)
pub const POOL_STATE_SIZE: usize =
    8 + 32 + 32 + 8 + 8 + 8 + 8 + 8 + 8 + 1 + 1 + 1 + 1 + 1 + 40;

/// Space for DepositorPosition account (8 discriminator + 32 owner + 32 pool +
/// 8 deposited + 1 bump + 32 padding)
pub const POSITION_SIZE: usize = 8 + 32 + 32 + 8 + 1 + 32;
