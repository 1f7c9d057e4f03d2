use anchor_lang::prelude::*;

/// Signing delegate PDA. Holds no state beyond its derivation; it exists so
/// distributions can move delegated sender tokens without the sender present.
#[account]
pub struct ProgramAuthority {
    pub bump: u8,
}

impl ProgramAuthority {
    pub const SIZE: usize = 1; // bump
}
