use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Burn, MintTo};

use crate::{constants::*, errors::BankError};

/// Asset movements the engine depends on
///
/// Each call is a single atomic sub-operation: it either fully succeeds or
/// returns the error that fails the enclosing instruction. Errors are passed
/// back unchanged.
pub trait TokenLedger {
    /// Move `amount` lamports from `from` into pool custody
    fn transfer_in(&mut self, from: &Pubkey, amount: u64) -> Result<()>;

    /// Release `amount` lamports from pool custody to `to`
    fn transfer_out(&mut self, to: &Pubkey, amount: u64) -> Result<()>;

    /// Mint `amount` issued tokens to `to`
    fn mint(&mut self, to: &Pubkey, amount: u64) -> Result<()>;

    /// Burn `amount` issued tokens held by `from`
    fn burn(&mut self, from: &Pubkey, amount: u64) -> Result<()>;

    /// Issued token balance held by `account`
    fn balance_of(&self, account: &Pubkey) -> u64;
}

/// System-program side of the ledger: the SOL custody PDA and the user moving lamports
pub struct NativeCustody<'info> {
    pub system_program: AccountInfo<'info>,
    pub sol_vault: AccountInfo<'info>,
    pub vault_bump: u8,
    pub counterparty: AccountInfo<'info>,
}

/// Token-program side of the ledger: the issued mint and one holder's token account
pub struct IssuedToken<'info> {
    pub token_program: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    /// Only needed for minting
    pub mint_authority: Option<AccountInfo<'info>>,
    pub mint_authority_bump: u8,
    pub holder: AccountInfo<'info>,
    pub holder_token_account: AccountInfo<'info>,
    pub holder_balance: u64,
}

/// `TokenLedger` backed by CPIs into the System and SPL Token programs
///
/// Built per instruction from the accounts that instruction carries. An
/// operation whose side was not supplied fails with `LedgerAccountMissing`.
pub struct CpiLedger<'info> {
    pool: Pubkey,
    native: Option<NativeCustody<'info>>,
    token: Option<IssuedToken<'info>>,
}

impl<'info> CpiLedger<'info> {
    pub fn new(pool: Pubkey) -> Self {
        Self {
            pool,
            native: None,
            token: None,
        }
    }

    pub fn with_native(mut self, native: NativeCustody<'info>) -> Self {
        self.native = Some(native);
        self
    }

    pub fn with_token(mut self, token: IssuedToken<'info>) -> Self {
        self.token = Some(token);
        self
    }

    fn native(&self) -> Result<&NativeCustody<'info>> {
        self.native
            .as_ref()
            .ok_or(error!(BankError::LedgerAccountMissing))
    }

    fn token(&mut self) -> Result<&mut IssuedToken<'info>> {
        self.token
            .as_mut()
            .ok_or(error!(BankError::LedgerAccountMissing))
    }
}

impl<'info> TokenLedger for CpiLedger<'info> {
    fn transfer_in(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        let custody = self.native()?;
        require_keys_eq!(*from, *custody.counterparty.key, BankError::InvalidOwner);

        let transfer_ctx = CpiContext::new(
            custody.system_program.clone(),
            system_program::Transfer {
                from: custody.counterparty.clone(),
                to: custody.sol_vault.clone(),
            },
        );
        system_program::transfer(transfer_ctx, amount)
    }

    fn transfer_out(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        let pool = self.pool;
        let custody = self.native()?;
        require_keys_eq!(*to, *custody.counterparty.key, BankError::InvalidOwner);

        let vault_seeds: &[&[u8]] = &[SOL_VAULT_SEED, pool.as_ref(), &[custody.vault_bump]];
        let signer_seeds = &[&vault_seeds[..]];

        let transfer_ctx = CpiContext::new_with_signer(
            custody.system_program.clone(),
            system_program::Transfer {
                from: custody.sol_vault.clone(),
                to: custody.counterparty.clone(),
            },
            signer_seeds,
        );
        system_program::transfer(transfer_ctx, amount)
    }

    fn mint(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        let pool = self.pool;
        let issued = self.token()?;
        require_keys_eq!(*to, *issued.holder.key, BankError::InvalidOwner);
        let mint_authority = issued
            .mint_authority
            .clone()
            .ok_or(error!(BankError::LedgerAccountMissing))?;

        let authority_seeds: &[&[u8]] = &[
            MINT_AUTHORITY_SEED,
            pool.as_ref(),
            &[issued.mint_authority_bump],
        ];
        let signer_seeds = &[&authority_seeds[..]];

        let mint_ctx = CpiContext::new_with_signer(
            issued.token_program.clone(),
            MintTo {
                mint: issued.mint.clone(),
                to: issued.holder_token_account.clone(),
                authority: mint_authority,
            },
            signer_seeds,
        );
        token::mint_to(mint_ctx, amount)?;

        issued.holder_balance = issued
            .holder_balance
            .checked_add(amount)
            .ok_or(BankError::MathOverflow)?;
        Ok(())
    }

    fn burn(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        let issued = self.token()?;
        require_keys_eq!(*from, *issued.holder.key, BankError::InvalidOwner);

        let burn_ctx = CpiContext::new(
            issued.token_program.clone(),
            Burn {
                mint: issued.mint.clone(),
                from: issued.holder_token_account.clone(),
                authority: issued.holder.clone(),
            },
        );
        token::burn(burn_ctx, amount)?;

        issued.holder_balance = issued.holder_balance.saturating_sub(amount);
        Ok(())
    }

    fn balance_of(&self, account: &Pubkey) -> u64 {
        self.token
            .as_ref()
            .filter(|issued| issued.holder.key == account)
            .map(|issued| issued.holder_balance)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Owned backing storage for an `AccountInfo`
    struct TestAccount {
        key: Pubkey,
        owner: Pubkey,
        lamports: u64,
        data: Vec<u8>,
        is_signer: bool,
    }

    impl TestAccount {
        fn new(key: Pubkey, owner: Pubkey, lamports: u64) -> Self {
            Self {
                key,
                owner,
                lamports,
                data: vec![],
                is_signer: false,
            }
        }

        fn signer(mut self) -> Self {
            self.is_signer = true;
            self
        }

        fn to_info(&mut self) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                self.is_signer,
                true,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                false,
                0,
            )
        }
    }

    fn system_account(lamports: u64) -> TestAccount {
        TestAccount::new(Pubkey::new_unique(), system_program::ID, lamports)
    }

    fn program_account(id: Pubkey) -> TestAccount {
        TestAccount::new(id, Pubkey::default(), 1)
    }

    #[test]
    fn test_missing_sides_fail_before_any_transfer() {
        let caller = Pubkey::new_unique();
        let mut ledger = CpiLedger::new(Pubkey::new_unique());

        let err = ledger.transfer_in(&caller, 10).unwrap_err();
        assert_eq!(err, BankError::LedgerAccountMissing.into());

        let err = ledger.transfer_out(&caller, 10).unwrap_err();
        assert_eq!(err, BankError::LedgerAccountMissing.into());

        let err = ledger.mint(&caller, 10).unwrap_err();
        assert_eq!(err, BankError::LedgerAccountMissing.into());

        let err = ledger.burn(&caller, 10).unwrap_err();
        assert_eq!(err, BankError::LedgerAccountMissing.into());

        assert_eq!(ledger.balance_of(&caller), 0);
    }

    #[test]
    fn test_native_side_rejects_other_counterparty() {
        let mut system = program_account(system_program::ID);
        let mut vault = system_account(1_000);
        let mut user = system_account(5_000).signer();
        let user_key = user.key;
        let stranger = Pubkey::new_unique();

        {
            let mut ledger = CpiLedger::new(Pubkey::new_unique()).with_native(NativeCustody {
                system_program: system.to_info(),
                sol_vault: vault.to_info(),
                vault_bump: 255,
                counterparty: user.to_info(),
            });

            let err = ledger.transfer_in(&stranger, 100).unwrap_err();
            assert_eq!(err, BankError::InvalidOwner.into());

            let err = ledger.transfer_out(&stranger, 100).unwrap_err();
            assert_eq!(err, BankError::InvalidOwner.into());

            // Token side was never supplied
            let err = ledger.mint(&user_key, 100).unwrap_err();
            assert_eq!(err, BankError::LedgerAccountMissing.into());
        }

        assert_eq!(user.lamports, 5_000);
        assert_eq!(vault.lamports, 1_000);
    }

    #[test]
    fn test_mint_requires_mint_authority() {
        let mut token_program = program_account(token::ID);
        let mut mint = TestAccount::new(Pubkey::new_unique(), token::ID, 1);
        let mut holder = system_account(1).signer();
        let mut holder_token_account = TestAccount::new(Pubkey::new_unique(), token::ID, 1);
        let holder_key = holder.key;

        let mut ledger = CpiLedger::new(Pubkey::new_unique()).with_token(IssuedToken {
            token_program: token_program.to_info(),
            mint: mint.to_info(),
            mint_authority: None,
            mint_authority_bump: 255,
            holder: holder.to_info(),
            holder_token_account: holder_token_account.to_info(),
            holder_balance: 42,
        });

        let err = ledger.mint(&holder_key, 10).unwrap_err();
        assert_eq!(err, BankError::LedgerAccountMissing.into());
        assert_eq!(ledger.balance_of(&holder_key), 42);

        // Native side was never supplied
        let err = ledger.transfer_in(&holder_key, 10).unwrap_err();
        assert_eq!(err, BankError::LedgerAccountMissing.into());
    }

    #[test]
    fn test_token_side_is_bound_to_one_holder() {
        let mut token_program = program_account(token::ID);
        let mut mint = TestAccount::new(Pubkey::new_unique(), token::ID, 1);
        let mut mint_authority = system_account(0);
        let mut holder = system_account(1).signer();
        let mut holder_token_account = TestAccount::new(Pubkey::new_unique(), token::ID, 1);
        let holder_key = holder.key;
        let stranger = Pubkey::new_unique();

        let mut ledger = CpiLedger::new(Pubkey::new_unique()).with_token(IssuedToken {
            token_program: token_program.to_info(),
            mint: mint.to_info(),
            mint_authority: Some(mint_authority.to_info()),
            mint_authority_bump: 255,
            holder: holder.to_info(),
            holder_token_account: holder_token_account.to_info(),
            holder_balance: 42,
        });

        let err = ledger.mint(&stranger, 10).unwrap_err();
        assert_eq!(err, BankError::InvalidOwner.into());

        let err = ledger.burn(&stranger, 10).unwrap_err();
        assert_eq!(err, BankError::InvalidOwner.into());

        assert_eq!(ledger.balance_of(&holder_key), 42);
        assert_eq!(ledger.balance_of(&stranger), 0);
    }
}
