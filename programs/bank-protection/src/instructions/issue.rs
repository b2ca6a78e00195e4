use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{
    constants::*,
    engine,
    errors::*,
    events::*,
    ledger::{CpiLedger, IssuedToken},
    state::*,
};

/// Mint issued tokens to the authority against pool collateral
#[derive(Accounts)]
pub struct Issue<'info> {
    /// Admin authority receiving the minted tokens
    /// Security: Must be signer, checked against admin_state by the engine
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Admin registry PDA
    #[account(
        seeds = [ADMIN_SEED],
        bump = admin_state.bump,
    )]
    pub admin_state: Account<'info, AdminState>,

    /// Pool state PDA
    /// Security: Must be bound to this admin registry
    #[account(
        mut,
        seeds = [POOL_SEED],
        bump = pool.bump,
        constraint = pool.admin == admin_state.key() @ BankError::Unauthorized,
    )]
    pub pool: Account<'info, PoolState>,

    /// Issued token mint
    #[account(
        mut,
        address = pool.issued_mint @ BankError::InvalidMint,
    )]
    pub issued_mint: Account<'info, Mint>,

    /// CHECK: PDA used as mint authority, validated by seeds
    #[account(
        seeds = [MINT_AUTHORITY_SEED, pool.key().as_ref()],
        bump = pool.mint_authority_bump,
    )]
    pub mint_authority: UncheckedAccount<'info>,

    /// Authority's token account for the issued mint
    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = issued_mint,
        associated_token::authority = authority,
    )]
    pub authority_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Issue>, amount: u64) -> Result<u64> {
    let pool_key = ctx.accounts.pool.key();
    let authority_key = ctx.accounts.authority.key();

    let mut ledger = CpiLedger::new(pool_key).with_token(IssuedToken {
        token_program: ctx.accounts.token_program.to_account_info(),
        mint: ctx.accounts.issued_mint.to_account_info(),
        mint_authority: Some(ctx.accounts.mint_authority.to_account_info()),
        mint_authority_bump: ctx.accounts.pool.mint_authority_bump,
        holder: ctx.accounts.authority.to_account_info(),
        holder_token_account: ctx.accounts.authority_token_account.to_account_info(),
        holder_balance: ctx.accounts.authority_token_account.amount,
    });

    let admin_state = &ctx.accounts.admin_state;
    let pool = &mut ctx.accounts.pool;
    let ratio_bps = engine::issue(pool, admin_state, &mut ledger, &authority_key, amount)?;

    emit!(Issued {
        pool: pool_key,
        authority: authority_key,
        amount,
        issued_supply: pool.issued_supply,
        ratio_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(ratio_bps)
}
