use anchor_lang::prelude::*;

use crate::state::{ProgramAuthority, Treasury};

/// One-time creation of the program authority and treasury singletons.
/// A second call fails on the `init` constraints: both PDAs already exist.
pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
    let authority = &mut ctx.accounts.program_authority;
    authority.bump = ctx.bumps.program_authority;

    let treasury = &mut ctx.accounts.treasury;
    treasury.bump = ctx.bumps.treasury;

    emit!(ProgramInitialized {
        program_authority: authority.key(),
        treasury: treasury.key(),
        signer: ctx.accounts.signer.key(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = signer,
        space = 8 + ProgramAuthority::SIZE,
        seeds = [b"authority"],
        bump
    )]
    pub program_authority: Account<'info, ProgramAuthority>,

    #[account(
        init,
        payer = signer,
        space = 8 + Treasury::SIZE,
        seeds = [b"treasury"],
        bump
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(mut)]
    pub signer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct ProgramInitialized {
    pub program_authority: Pubkey,
    pub treasury: Pubkey,
    pub signer: Pubkey,
}
