use anchor_lang::prelude::*;

use crate::{constants::*, events::*, state::*};

/// Hand the admin authority to a new key
#[derive(Accounts)]
pub struct TransferAuthority<'info> {
    /// Current authority
    /// Security: Must be signer, checked against admin_state.authority in the handler
    pub authority: Signer<'info>,

    /// Admin registry PDA
    #[account(
        mut,
        seeds = [ADMIN_SEED],
        bump = admin_state.bump,
    )]
    pub admin_state: Account<'info, AdminState>,
}

pub fn handler(ctx: Context<TransferAuthority>, new_authority: Pubkey) -> Result<()> {
    let caller = ctx.accounts.authority.key();
    let admin_state = &mut ctx.accounts.admin_state;

    let previous_authority = admin_state.transfer_authority(&caller, new_authority)?;

    msg!(
        "Admin authority transferred from {} to {}",
        previous_authority,
        new_authority
    );

    emit!(AuthorityTransferred {
        admin_state: admin_state.key(),
        previous_authority,
        new_authority,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
