//! Bank protection engine
//!
//! Every operation follows the same order: validate, project the new balances
//! with checked math, call the ledger, then commit. The pool and position are
//! never written before the ledger call has succeeded, so a rejected or failed
//! operation leaves them exactly as they were.

use anchor_lang::prelude::*;

use crate::{
    errors::BankError,
    ledger::TokenLedger,
    state::{AdminState, DepositorPosition, PoolState, PoolStatus},
};

/// Bind a freshly created position to `owner` and count the new depositor
pub fn open_position(
    pool: &mut PoolState,
    position: &mut DepositorPosition,
    pool_key: Pubkey,
    owner: Pubkey,
    bump: u8,
) -> Result<()> {
    require!(!position.is_open(), BankError::AlreadyInitialized);

    let depositor_count = pool
        .depositor_count
        .checked_add(1)
        .ok_or(BankError::MathOverflow)?;

    position.open(pool_key, owner, bump);
    pool.depositor_count = depositor_count;
    Ok(())
}

/// Credit `amount` lamports from `caller` to the pool. Returns the new ratio.
pub fn deposit<L: TokenLedger>(
    pool: &mut PoolState,
    position: &mut DepositorPosition,
    ledger: &mut L,
    caller: &Pubkey,
    amount: u64,
) -> Result<u64> {
    // CHECKS
    pool.require_active()?;
    require!(amount > 0, BankError::ZeroAmount);
    require_keys_eq!(position.owner, *caller, BankError::InvalidOwner);

    let (collateral, issued) = pool.project(amount as i128, 0)?;
    let next_deposited = position
        .deposited
        .checked_add(amount)
        .ok_or(BankError::MathOverflow)?;
    let total_deposited = pool
        .total_deposited
        .checked_add(amount)
        .ok_or(BankError::MathOverflow)?;

    // Adding collateral can only raise the ratio
    let ratio = PoolState::ratio_for(collateral, issued);
    require!(ratio >= pool.ratio_bps(), BankError::RatioViolation);

    // INTERACTIONS
    ledger.transfer_in(caller, amount)?;

    // EFFECTS
    pool.apply(amount as i128, 0)?;
    pool.total_deposited = total_deposited;
    position.deposited = next_deposited;

    Ok(ratio)
}

/// Release `amount` lamports to `caller` if the pool stays above its minimum
/// ratio. Returns the new ratio.
pub fn withdraw<L: TokenLedger>(
    pool: &mut PoolState,
    position: &mut DepositorPosition,
    ledger: &mut L,
    caller: &Pubkey,
    amount: u64,
) -> Result<u64> {
    // CHECKS
    pool.require_active()?;
    require!(amount > 0, BankError::ZeroAmount);
    require_keys_eq!(position.owner, *caller, BankError::InvalidOwner);
    require!(
        amount <= pool.collateral_balance,
        BankError::InsufficientCollateral
    );
    require!(
        amount <= position.deposited,
        BankError::InsufficientDeposit
    );

    let (collateral, issued) = pool.project(-(amount as i128), 0)?;
    if !pool.meets_min_ratio(collateral, issued) {
        msg!(
            "Withdraw of {} rejected: projected ratio {} bps below minimum {} bps",
            amount,
            PoolState::ratio_for(collateral, issued),
            pool.min_ratio_bps
        );
        return err!(BankError::RatioViolation);
    }

    let next_deposited = position
        .deposited
        .checked_sub(amount)
        .ok_or(BankError::MathOverflow)?;
    let total_withdrawn = pool
        .total_withdrawn
        .checked_add(amount)
        .ok_or(BankError::MathOverflow)?;

    // INTERACTIONS
    ledger.transfer_out(caller, amount)?;

    // EFFECTS
    pool.apply(-(amount as i128), 0)?;
    pool.total_withdrawn = total_withdrawn;
    position.deposited = next_deposited;

    Ok(PoolState::ratio_for(collateral, issued))
}

/// Mint `amount` of the issued token to the authority against pool
/// collateral. Returns the new ratio.
pub fn issue<L: TokenLedger>(
    pool: &mut PoolState,
    admin: &AdminState,
    ledger: &mut L,
    caller: &Pubkey,
    amount: u64,
) -> Result<u64> {
    // CHECKS
    admin.require_authority(caller)?;
    pool.require_active()?;
    require!(amount > 0, BankError::ZeroAmount);

    let (collateral, issued) = pool.project(0, amount as i128)?;
    if !pool.meets_min_ratio(collateral, issued) {
        msg!(
            "Issue of {} rejected: projected ratio {} bps below minimum {} bps",
            amount,
            PoolState::ratio_for(collateral, issued),
            pool.min_ratio_bps
        );
        return err!(BankError::RatioViolation);
    }

    // INTERACTIONS
    ledger.mint(caller, amount)?;

    // EFFECTS
    pool.apply(0, amount as i128)?;

    Ok(PoolState::ratio_for(collateral, issued))
}

/// Burn `amount` of the issued token held by `caller`. Allowed while paused,
/// since it can only raise the ratio. Returns the new ratio.
pub fn redeem<L: TokenLedger>(
    pool: &mut PoolState,
    ledger: &mut L,
    caller: &Pubkey,
    amount: u64,
) -> Result<u64> {
    // CHECKS
    require!(amount > 0, BankError::ZeroAmount);
    require!(
        amount <= pool.issued_supply,
        BankError::InsufficientSupply
    );
    require!(
        ledger.balance_of(caller) >= amount,
        BankError::InsufficientTokenBalance
    );

    let (collateral, issued) = pool.project(0, -(amount as i128))?;

    // INTERACTIONS
    ledger.burn(caller, amount)?;

    // EFFECTS
    pool.apply(0, -(amount as i128))?;

    Ok(PoolState::ratio_for(collateral, issued))
}

/// Active -> Paused
pub fn pause(pool: &mut PoolState, admin: &AdminState, caller: &Pubkey) -> Result<()> {
    admin.require_authority(caller)?;
    require!(pool.status() == PoolStatus::Active, BankError::InvalidState);

    pool.paused = true;
    Ok(())
}

/// Paused -> Active
pub fn resume(pool: &mut PoolState, admin: &AdminState, caller: &Pubkey) -> Result<()> {
    admin.require_authority(caller)?;
    require!(pool.status() == PoolStatus::Paused, BankError::InvalidState);

    pool.paused = false;
    Ok(())
}

/// Replace the minimum ratio, returning the previous one. Existing balances
/// are not re-checked; the new minimum applies to later withdrawals and issues.
pub fn set_min_ratio(
    pool: &mut PoolState,
    admin: &AdminState,
    caller: &Pubkey,
    new_min_ratio_bps: u64,
) -> Result<u64> {
    admin.require_authority(caller)?;
    PoolState::validate_min_ratio(new_min_ratio_bps)?;

    let previous = pool.min_ratio_bps;
    pool.min_ratio_bps = new_min_ratio_bps;
    Ok(previous)
}
