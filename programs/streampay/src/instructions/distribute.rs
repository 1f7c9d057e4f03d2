use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::StreamError;
use crate::state::{PaymentStream, ProgramAuthority, Treasury};

/// Permissionless release of one due period. Any signer may call this and
/// collects the distributor bounty for doing so.
pub fn distribute(ctx: Context<Distribute>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let distribution = ctx.accounts.stream.distribute(now)?;

    require!(
        ctx.accounts.sender_tokens.amount >= distribution.amount,
        StreamError::InsufficientFunds
    );

    // Move one release from sender to receiver, signed by the program
    // authority acting as the sender's delegate.
    let authority_bump = ctx.accounts.program_authority.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[b"authority", &[authority_bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.sender_tokens.to_account_info(),
                to: ctx.accounts.receiver_tokens.to_account_info(),
                authority: ctx.accounts.program_authority.to_account_info(),
            },
            signer_seeds,
        ),
        distribution.amount,
    )?;

    // Pay the execution fees out of the stream's lamport reserve.
    let total_fee = distribution
        .distributor_fee
        .checked_add(distribution.treasury_fee)
        .ok_or(StreamError::MathOverflow)?;
    ctx.accounts.stream.sub_lamports(total_fee)?;
    ctx.accounts.distributor.add_lamports(distribution.distributor_fee)?;
    ctx.accounts.treasury.add_lamports(distribution.treasury_fee)?;

    let stream = &ctx.accounts.stream;
    emit!(StreamDistributed {
        stream: stream.key(),
        sender: stream.sender,
        receiver: stream.receiver,
        distributor: ctx.accounts.distributor.key(),
        amount: distribution.amount,
        distributor_fee: distribution.distributor_fee,
        treasury_fee: distribution.treasury_fee,
        new_balance: stream.balance,
        next_transfer_at: stream.next_transfer_at,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Distribute<'info> {
    #[account(
        mut,
        seeds = [b"stream", stream.sender.as_ref(), stream.receiver.as_ref()],
        bump = stream.bump,
        constraint = sender_tokens.key() == stream.sender_tokens @ StreamError::InvalidTokenAccount,
        constraint = receiver_tokens.key() == stream.receiver_tokens @ StreamError::InvalidTokenAccount,
    )]
    pub stream: Account<'info, PaymentStream>,

    #[account(mut)]
    pub sender_tokens: Account<'info, TokenAccount>,

    #[account(mut)]
    pub receiver_tokens: Account<'info, TokenAccount>,

    #[account(mut)]
    pub distributor: Signer<'info>,

    #[account(mut, seeds = [b"treasury"], bump = treasury.bump)]
    pub treasury: Account<'info, Treasury>,

    #[account(seeds = [b"authority"], bump = program_authority.bump)]
    pub program_authority: Account<'info, ProgramAuthority>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct StreamDistributed {
    pub stream: Pubkey,
    pub sender: Pubkey,
    pub receiver: Pubkey,
    pub distributor: Pubkey,
    pub amount: u64,
    pub distributor_fee: u64,
    pub treasury_fee: u64,
    pub new_balance: u64,
    pub next_transfer_at: i64,
}
