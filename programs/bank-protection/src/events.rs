use anchor_lang::prelude::*;

/// Event emitted when the admin registry is initialized
#[event]
pub struct AdminInitialized {
    pub admin_state: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when the admin authority changes hands
#[event]
pub struct AuthorityTransferred {
    pub admin_state: Pubkey,
    pub previous_authority: Pubkey,
    pub new_authority: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when the pool is created
#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub issued_mint: Pubkey,
    pub sol_vault: Pubkey,
    pub min_ratio_bps: u64,
    pub timestamp: i64,
}

/// Event emitted when lamports are deposited as collateral
#[event]
pub struct Deposited {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub position_deposited: u64,
    pub collateral_balance: u64,
    pub total_deposited: u64,
    pub depositor_count: u64,
    pub ratio_bps: u64,
    pub timestamp: i64,
}

/// Event emitted when collateral is withdrawn
#[event]
pub struct Withdrawn {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub position_deposited: u64,
    pub collateral_balance: u64,
    pub total_withdrawn: u64,
    pub ratio_bps: u64,
    pub timestamp: i64,
}

/// Event emitted when tokens are issued against collateral
#[event]
pub struct Issued {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub amount: u64,
    pub issued_supply: u64,
    pub ratio_bps: u64,
    pub timestamp: i64,
}

/// Event emitted when issued tokens are burned
#[event]
pub struct Redeemed {
    pub pool: Pubkey,
    pub holder: Pubkey,
    pub amount: u64,
    pub issued_supply: u64,
    pub ratio_bps: u64,
    pub timestamp: i64,
}

/// Event emitted when the pool is paused or resumed
#[event]
pub struct PauseToggled {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub paused: bool,
    pub timestamp: i64,
}

/// Event emitted when the minimum backing ratio changes
#[event]
pub struct MinRatioUpdated {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub previous_min_ratio_bps: u64,
    pub min_ratio_bps: u64,
    pub timestamp: i64,
}
