use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, program::BankProtection, state::*};

/// Create the admin registry and record its first authority
#[derive(Accounts)]
pub struct InitializeAdmin<'info> {
    /// Designated initializer - pays for the registry account
    /// Security: Must be the program's upgrade authority, checked in the handler
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Admin registry PDA
    /// Security: init_if_needed so a second call reaches the AlreadyInitialized check
    #[account(
        init_if_needed,
        payer = payer,
        space = ADMIN_STATE_SIZE,
        seeds = [ADMIN_SEED],
        bump
    )]
    pub admin_state: Account<'info, AdminState>,

    /// This program
    /// Security: program_data must be its own ProgramData account
    #[account(
        constraint = program.programdata_address()? == Some(program_data.key()) @ BankError::Unauthorized,
    )]
    pub program: Program<'info, BankProtection>,

    /// Upgradeable loader data holding the upgrade authority
    pub program_data: Account<'info, ProgramData>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeAdmin>, initial_authority: Pubkey) -> Result<()> {
    let payer = ctx.accounts.payer.key();
    let upgrade_authority = ctx.accounts.program_data.upgrade_authority_address;
    let admin_state = &mut ctx.accounts.admin_state;

    // CHECKS + EFFECTS
    admin_state.initialize(&payer, upgrade_authority, initial_authority, ctx.bumps.admin_state)?;

    msg!("Admin registry initialized with authority {}", initial_authority);

    emit!(AdminInitialized {
        admin_state: admin_state.key(),
        authority: initial_authority,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
