use anchor_lang::prelude::*;

use crate::{constants::*, state::*};

/// Read-only check of a candidate against the admin registry
#[derive(Accounts)]
pub struct VerifyAdmin<'info> {
    #[account(
        seeds = [ADMIN_SEED],
        bump = admin_state.bump,
    )]
    pub admin_state: Account<'info, AdminState>,
}

/// Read-only view of the pool
#[derive(Accounts)]
pub struct PoolView<'info> {
    #[account(
        seeds = [POOL_SEED],
        bump = pool.bump,
    )]
    pub pool: Account<'info, PoolState>,
}

pub fn is_admin_handler(ctx: Context<VerifyAdmin>, candidate: Pubkey) -> Result<bool> {
    Ok(ctx.accounts.admin_state.is_admin(&candidate))
}

pub fn pool_ratio_handler(ctx: Context<PoolView>) -> Result<u64> {
    Ok(ctx.accounts.pool.ratio_bps())
}
