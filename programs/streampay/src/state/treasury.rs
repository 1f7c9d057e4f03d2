use anchor_lang::prelude::*;

/// Global fee sink PDA. Its lamport balance only grows, by the treasury half
/// of each distribution fee.
#[account]
pub struct Treasury {
    pub bump: u8,
}

impl Treasury {
    pub const SIZE: usize = 1; // bump
}
