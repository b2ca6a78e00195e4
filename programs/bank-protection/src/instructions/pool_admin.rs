use anchor_lang::prelude::*;

use crate::{constants::*, engine, errors::*, events::*, state::*};

/// Authority-only pool controls: pause, resume, set_min_ratio
#[derive(Accounts)]
pub struct PoolAdmin<'info> {
    /// Admin authority
    /// Security: Must be signer, checked against admin_state by the engine
    pub authority: Signer<'info>,

    /// Admin registry PDA
    #[account(
        seeds = [ADMIN_SEED],
        bump = admin_state.bump,
    )]
    pub admin_state: Account<'info, AdminState>,

    /// Pool state PDA
    #[account(
        mut,
        seeds = [POOL_SEED],
        bump = pool.bump,
        constraint = pool.admin == admin_state.key() @ BankError::Unauthorized,
    )]
    pub pool: Account<'info, PoolState>,
}

pub fn pause_handler(ctx: Context<PoolAdmin>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let admin_state = &ctx.accounts.admin_state;
    let pool = &mut ctx.accounts.pool;

    engine::pause(pool, admin_state, &authority)?;
    msg!("Pool paused by {}", authority);

    emit!(PauseToggled {
        pool: pool.key(),
        authority,
        paused: true,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn resume_handler(ctx: Context<PoolAdmin>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let admin_state = &ctx.accounts.admin_state;
    let pool = &mut ctx.accounts.pool;

    engine::resume(pool, admin_state, &authority)?;
    msg!("Pool resumed by {}", authority);

    emit!(PauseToggled {
        pool: pool.key(),
        authority,
        paused: false,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn set_min_ratio_handler(ctx: Context<PoolAdmin>, new_min_ratio_bps: u64) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let admin_state = &ctx.accounts.admin_state;
    let pool = &mut ctx.accounts.pool;

    let previous_min_ratio_bps =
        engine::set_min_ratio(pool, admin_state, &authority, new_min_ratio_bps)?;
    msg!(
        "Minimum ratio changed from {}bps to {}bps",
        previous_min_ratio_bps,
        new_min_ratio_bps
    );

    emit!(MinRatioUpdated {
        pool: pool.key(),
        authority,
        previous_min_ratio_bps,
        min_ratio_bps: new_min_ratio_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
