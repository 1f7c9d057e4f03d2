use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Approve, Token, TokenAccount};

use crate::error::StreamError;
use crate::state::{PaymentStream, ProgramAuthority};

pub fn approve_stream(ctx: Context<ApproveStream>, additional_balance: u64) -> Result<()> {
    let (new_balance, additional_fee) = {
        let stream = &mut ctx.accounts.stream;
        require_keys_eq!(
            ctx.accounts.sender.key(),
            stream.sender,
            StreamError::Unauthorized
        );
        let additional_fee = stream.approve(additional_balance)?;
        (stream.balance, additional_fee)
    };

    // Fund the fee reserve for the newly approved whole periods.
    if additional_fee > 0 {
        require!(
            ctx.accounts.sender.lamports() >= additional_fee,
            StreamError::InsufficientFunds
        );
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.sender.to_account_info(),
                    to: ctx.accounts.stream.to_account_info(),
                },
            ),
            additional_fee,
        )?;
    }

    // Raise the delegation to cover the new remaining balance.
    token::approve(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Approve {
                to: ctx.accounts.sender_tokens.to_account_info(),
                delegate: ctx.accounts.program_authority.to_account_info(),
                authority: ctx.accounts.sender.to_account_info(),
            },
        ),
        new_balance,
    )?;

    emit!(StreamApproved {
        stream: ctx.accounts.stream.key(),
        sender: ctx.accounts.sender.key(),
        additional_balance,
        additional_fee,
        new_balance,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ApproveStream<'info> {
    #[account(
        mut,
        seeds = [b"stream", sender.key().as_ref(), receiver.key().as_ref()],
        bump = stream.bump,
        constraint = sender_tokens.key() == stream.sender_tokens @ StreamError::InvalidTokenAccount,
    )]
    pub stream: Account<'info, PaymentStream>,

    #[account(mut)]
    pub sender: Signer<'info>,

    #[account(mut)]
    pub sender_tokens: Account<'info, TokenAccount>,

    /// CHECK: keys the stream address only.
    pub receiver: UncheckedAccount<'info>,

    #[account(seeds = [b"authority"], bump = program_authority.bump)]
    pub program_authority: Account<'info, ProgramAuthority>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct StreamApproved {
    pub stream: Pubkey,
    pub sender: Pubkey,
    pub additional_balance: u64,
    pub additional_fee: u64,
    pub new_balance: u64,
}
