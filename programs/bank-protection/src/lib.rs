// Bank Protection - SOL custody pool backing an issued token on Solana
// Security: Every mutation keeps collateral/issued at or above the pool's minimum ratio
// Architecture: Admin registry + pool state, with the ratio engine behind a ledger trait

use anchor_lang::prelude::*;

pub mod constants;
pub mod engine;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod state;

use instructions::*;

declare_id!("BANKpRtcT8sWvGZ3yqZz4KqD6f1mQm7Jg8nLh2xC9uVw");

#[program]
pub mod bank_protection {
    use super::*;

    /// Create the admin registry and set its first authority
    ///
    /// Security considerations:
    /// - Payer must be the program's upgrade authority
    /// - Fails with AlreadyInitialized on a second call
    /// - Rejects the default key as authority
    pub fn initialize_admin(ctx: Context<InitializeAdmin>, initial_authority: Pubkey) -> Result<()> {
        instructions::initialize_admin::handler(ctx, initial_authority)
    }

    /// Transfer the admin authority to a new key
    ///
    /// Security considerations:
    /// - Only the current authority can transfer
    /// - Emits AuthorityTransferred
    pub fn transfer_authority(ctx: Context<TransferAuthority>, new_authority: Pubkey) -> Result<()> {
        instructions::transfer_authority::handler(ctx, new_authority)
    }

    /// Whether `candidate` is the current admin authority (return data)
    pub fn is_admin(ctx: Context<VerifyAdmin>, candidate: Pubkey) -> Result<bool> {
        instructions::query::is_admin_handler(ctx, candidate)
    }

    /// Create the pool, issued mint and SOL custody account
    ///
    /// Security considerations:
    /// - Authority-only
    /// - Minimum ratio validated against the accepted range (0 selects the default)
    /// - Custody funded to its rent-exempt floor
    pub fn initialize_pool(ctx: Context<InitializePool>, min_ratio_bps: u64) -> Result<()> {
        instructions::initialize_pool::handler(ctx, min_ratio_bps)
    }

    /// Deposit lamports as collateral; returns the new ratio in bps
    ///
    /// Security considerations:
    /// - Rejected while paused
    /// - Lamports move before the pool is updated
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<u64> {
        instructions::deposit::handler(ctx, amount)
    }

    /// Withdraw lamports from the caller's position; returns the new ratio in bps
    ///
    /// Security considerations:
    /// - Rejected while paused
    /// - Projected ratio must stay at or above the minimum
    /// - Limited to the caller's own deposits
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<u64> {
        instructions::withdraw::handler(ctx, amount)
    }

    /// Mint issued tokens to the authority; returns the new ratio in bps
    ///
    /// Security considerations:
    /// - Authority-only, rejected while paused
    /// - Projected ratio must stay at or above the minimum
    pub fn issue(ctx: Context<Issue>, amount: u64) -> Result<u64> {
        instructions::issue::handler(ctx, amount)
    }

    /// Burn issued tokens; returns the new ratio in bps
    pub fn redeem(ctx: Context<Redeem>, amount: u64) -> Result<u64> {
        instructions::redeem::handler(ctx, amount)
    }

    /// Emergency stop for deposit, withdraw and issue
    pub fn pause(ctx: Context<PoolAdmin>) -> Result<()> {
        instructions::pool_admin::pause_handler(ctx)
    }

    /// Lift the emergency stop
    pub fn resume(ctx: Context<PoolAdmin>) -> Result<()> {
        instructions::pool_admin::resume_handler(ctx)
    }

    /// Change the minimum backing ratio (not applied retroactively)
    pub fn set_min_ratio(ctx: Context<PoolAdmin>, new_min_ratio_bps: u64) -> Result<()> {
        instructions::pool_admin::set_min_ratio_handler(ctx, new_min_ratio_bps)
    }

    /// Current backing ratio in bps (return data)
    pub fn pool_ratio(ctx: Context<PoolView>) -> Result<u64> {
        instructions::query::pool_ratio_handler(ctx)
    }
}
