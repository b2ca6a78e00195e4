use anchor_lang::prelude::*;

use crate::{
    constants::*,
    engine,
    errors::*,
    events::*,
    ledger::{CpiLedger, NativeCustody},
    state::*,
};

/// Withdraw lamports from pool custody, guarded by the minimum backing ratio
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// Depositor withdrawing lamports
    #[account(mut)]
    pub user: Signer<'info>,

    /// Pool state PDA
    #[account(
        mut,
        seeds = [POOL_SEED],
        bump = pool.bump,
    )]
    pub pool: Account<'info, PoolState>,

    /// Depositor position PDA
    /// Security: Only the position owner may withdraw from it
    #[account(
        mut,
        seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == user.key() @ BankError::InvalidOwner,
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

pub fn handler(ctx: Context<Withdraw>, amount: u64) -> Result<u64> {
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
    let ratio_bps = engine::withdraw(pool, position, &mut ledger, &user_key, amount)?;

    emit!(Withdrawn {
        pool: pool_key,
        user: user_key,
        amount,
        position_deposited: position.deposited,
        collateral_balance: pool.collateral_balance,
        total_withdrawn: pool.total_withdrawn,
        ratio_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(ratio_bps)
}
