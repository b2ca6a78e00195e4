use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{Mint, Token};

use crate::{constants::*, events::*, state::*};

/// Create the pool, its issued token mint and its SOL custody account
#[derive(Accounts)]
pub struct InitializePool<'info> {
    /// Admin authority - pays for the pool accounts
    /// Security: Must be signer, checked against admin_state in the handler
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Admin registry PDA
    #[account(
        seeds = [ADMIN_SEED],
        bump = admin_state.bump,
    )]
    pub admin_state: Account<'info, AdminState>,

    /// Pool state PDA
    /// Security: Initialized with proper space and padding for upgrades
    #[account(
        init,
        payer = authority,
        space = POOL_STATE_SIZE,
        seeds = [POOL_SEED],
        bump
    )]
    pub pool: Account<'info, PoolState>,

    /// Issued token mint PDA
    /// Security: Mint authority is the mint_authority PDA
    #[account(
        init,
        payer = authority,
        seeds = [ISSUED_MINT_SEED, pool.key().as_ref()],
        bump,
        mint::decimals = ISSUED_DECIMALS,
        mint::authority = mint_authority,
    )]
    pub issued_mint: Account<'info, Mint>,

    /// CHECK: PDA used as mint authority, validated by seeds
    #[account(
        seeds = [MINT_AUTHORITY_SEED, pool.key().as_ref()],
        bump
    )]
    pub mint_authority: UncheckedAccount<'info>,

    /// System-owned PDA holding deposited lamports
    #[account(
        mut,
        seeds = [SOL_VAULT_SEED, pool.key().as_ref()],
        bump
    )]
    pub sol_vault: SystemAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializePool>, min_ratio_bps: u64) -> Result<()> {
    // CHECKS: Caller must hold the authority, ratio must be in range
    let authority = ctx.accounts.authority.key();
    ctx.accounts.admin_state.require_authority(&authority)?;
    let min_ratio_bps = PoolState::resolve_min_ratio(min_ratio_bps)?;

    // INTERACTIONS: Fund custody to its rent-exempt floor so withdrawals
    // never leave it below rent
    let rent_floor = Rent::get()?.minimum_balance(0);
    let vault_lamports = ctx.accounts.sol_vault.to_account_info().lamports();
    if vault_lamports < rent_floor {
        let transfer_ctx = CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.authority.to_account_info(),
                to: ctx.accounts.sol_vault.to_account_info(),
            },
        );
        system_program::transfer(transfer_ctx, rent_floor - vault_lamports)?;
    }

    // EFFECTS: Initialize pool state
    let admin_key = ctx.accounts.admin_state.key();
    let pool = &mut ctx.accounts.pool;
    pool.admin = admin_key;
    pool.issued_mint = ctx.accounts.issued_mint.key();
    pool.collateral_balance = 0;
    pool.issued_supply = 0;
    pool.min_ratio_bps = min_ratio_bps;
    pool.total_deposited = 0;
    pool.total_withdrawn = 0;
    pool.depositor_count = 0;
    pool.paused = false;
    pool.bump = ctx.bumps.pool;
    pool.vault_bump = ctx.bumps.sol_vault;
    pool.mint_bump = ctx.bumps.issued_mint;
    pool.mint_authority_bump = ctx.bumps.mint_authority;
    pool._reserved = [0; 40];

    emit!(PoolInitialized {
        pool: pool.key(),
        authority,
        issued_mint: pool.issued_mint,
        sol_vault: ctx.accounts.sol_vault.key(),
        min_ratio_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
