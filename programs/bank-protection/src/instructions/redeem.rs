use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::*,
    engine,
    errors::*,
    events::*,
    ledger::{CpiLedger, IssuedToken},
    state::*,
};

/// Burn issued tokens, reducing the pool's outstanding supply
#[derive(Accounts)]
pub struct Redeem<'info> {
    /// Token holder burning their tokens
    pub holder: Signer<'info>,

    /// Pool state PDA
    #[account(
        mut,
        seeds = [POOL_SEED],
        bump = pool.bump,
    )]
    pub pool: Account<'info, PoolState>,

    /// Issued token mint
    #[account(
        mut,
        address = pool.issued_mint @ BankError::InvalidMint,
    )]
    pub issued_mint: Account<'info, Mint>,

    /// Holder's token account (source of the burn)
    /// Security: Must be owned by holder and correct mint
    #[account(
        mut,
        constraint = holder_token_account.mint == pool.issued_mint @ BankError::InvalidMint,
        constraint = holder_token_account.owner == holder.key() @ BankError::InvalidOwner,
    )]
    pub holder_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Redeem>, amount: u64) -> Result<u64> {
    let pool_key = ctx.accounts.pool.key();
    let holder_key = ctx.accounts.holder.key();

    let mut ledger = CpiLedger::new(pool_key).with_token(IssuedToken {
        token_program: ctx.accounts.token_program.to_account_info(),
        mint: ctx.accounts.issued_mint.to_account_info(),
        mint_authority: None,
        mint_authority_bump: ctx.accounts.pool.mint_authority_bump,
        holder: ctx.accounts.holder.to_account_info(),
        holder_token_account: ctx.accounts.holder_token_account.to_account_info(),
        holder_balance: ctx.accounts.holder_token_account.amount,
    });

    let pool = &mut ctx.accounts.pool;
    let ratio_bps = engine::redeem(pool, &mut ledger, &holder_key, amount)?;

    emit!(Redeemed {
        pool: pool_key,
        holder: holder_key,
        amount,
        issued_supply: pool.issued_supply,
        ratio_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(ratio_bps)
}
