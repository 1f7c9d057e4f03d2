//! Program-wide constants.

/// Flat bounty paid to the caller of a successful distribution, in lamports.
pub const DISTRIBUTOR_FEE: u64 = 1_000;

/// Flat protocol fee routed to the treasury per distribution, in lamports.
pub const TREASURY_FEE: u64 = 1_000;

/// Total execution fee consumed from a stream's reserve per distribution.
pub const PERIOD_FEE: u64 = DISTRIBUTOR_FEE + TREASURY_FEE;

/// Max length of a stream label, in bytes.
pub const MAX_LABEL_LEN: usize = 64;

/// Max length of a stream memo, in bytes.
pub const MAX_MEMO_LEN: usize = 256;
