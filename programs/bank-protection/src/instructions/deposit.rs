use anchor_lang::prelude::*;

use crate::{
    constants::*,
    engine,
    events::*,
    ledger::{CpiLedger, NativeCustody},
    state::*,
};

/// Deposit lamports into pool custody
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: User must be signer
/// ✅ 2. ACCOUNT OWNERSHIP: Pool, position and custody PDAs validated with seeds
/// ✅ 6. MATH SAFETY: Checked balance projection before any write
/// ✅ 8. BUSINESS LOGIC: Validate, transfer, then commit
/// ✅ 10. EVENTS: Emits Deposited event
#[derive(Accounts)]
pub struct Deposit<'info> {
    /// User depositing lamports
    /// Security: Must be signer
    #[account(mut)]
    pub user: Signer<'info>,

    /// Pool state PDA
    #[account(
        mut,
        seeds = [POOL_SEED],
        bump = pool.bump,
    )]
    pub pool: Account<'info, PoolState>,

    /// Depositor position PDA, opened on first deposit
    #[account(
        init_if_needed,
        payer = user,
        space = POSITION_SIZE,
        seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub position: Account<'info, DepositorPosition>,

    /// SOL custody PDA
    #[account(
        mut,
        seeds = [SOL_VAULT_SEED, pool.key().as_ref()],
        bump = pool.vault_bump,
    )]
    pub sol_vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Deposit>, amount: u64) -> Result<u64> {
    let pool_key = ctx.accounts.pool.key();
    let user_key = ctx.accounts.user.key();

    let mut ledger = CpiLedger::new(pool_key).with_native(NativeCustody {
        system_program: ctx.accounts.system_program.to_account_info(),
        sol_vault: ctx.accounts.sol_vault.to_account_info(),
        vault_bump: ctx.accounts.pool.vault_bump,
        counterparty: ctx.accounts.user.to_account_info(),
    });

    let position = &mut ctx.accounts.position;
    let pool = &mut ctx.accounts.pool;
    if !position.is_open() {
        engine::open_position(pool, position, pool_key, user_key, ctx.bumps.position)?;
    }

    let ratio_bps = engine::deposit(pool, position, &mut ledger, &user_key, amount)?;

    emit!(Deposited {
        pool: pool_key,
        user: user_key,
        amount,
        position_deposited: position.deposited,
        collateral_balance: pool.collateral_balance,
        total_deposited: pool.total_deposited,
        depositor_count: pool.depositor_count,
        ratio_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(ratio_bps)
}
