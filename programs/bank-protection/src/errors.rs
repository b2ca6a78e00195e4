use anchor_lang::prelude::*;

/// Custom error codes for the Bank Protection program
///
/// Every variant aborts the instruction with no state change.
#[error_code]
pub enum BankError {
    #[msg("Admin registry has already been initialized")]
    AlreadyInitialized,

    #[msg("Unauthorized - only the admin authority can perform this action")]
    Unauthorized,

    #[msg("Operation would push the backing ratio below the pool minimum")]
    RatioViolation,

    #[msg("Operation is not valid while the pool is in its current pause state")]
    InvalidState,

    #[msg("Parameter is out of the accepted range")]
    InvalidParameter,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Amount exceeds the pool collateral balance")]
    InsufficientCollateral,

    #[msg("Amount exceeds the caller's deposited balance")]
    InsufficientDeposit,

    #[msg("Amount exceeds the outstanding issued supply")]
    InsufficientSupply,

    #[msg("Caller does not hold enough of the issued token")]
    InsufficientTokenBalance,

    #[msg("Math overflow occurred during calculation")]
    MathOverflow,

    #[msg("Invalid token mint - does not match the pool's issued mint")]
    InvalidMint,

    #[msg("Invalid account owner")]
    InvalidOwner,

    #[msg("Ledger operation requires accounts that were not supplied")]
    LedgerAccountMissing,
}
