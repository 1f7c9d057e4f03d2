use anchor_lang::prelude::*;

/// Custom error codes for the streampay program.
#[error_code]
pub enum StreamError {
    #[msg("Invalid schedule: deltas must be positive and the balance must fund at least one release")]
    InvalidSchedule,

    #[msg("Label exceeds the maximum length")]
    LabelTooLong,

    #[msg("Memo exceeds the maximum length")]
    MemoTooLong,

    #[msg("Unauthorized: only the stream's sender may approve additional balance")]
    Unauthorized,

    #[msg("Too early: the current release interval has not elapsed")]
    NotReady,

    #[msg("Stream exhausted: remaining balance is below one release amount")]
    Exhausted,

    #[msg("Fee reserve cannot cover the distribution fees")]
    FeeReserveDepleted,

    #[msg("Insufficient funds to cover the required transfer")]
    InsufficientFunds,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Math overflow")]
    MathOverflow,
}
