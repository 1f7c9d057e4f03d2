use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Approve, Mint, Token, TokenAccount};

use crate::constants::{MAX_LABEL_LEN, MAX_MEMO_LEN};
use crate::error::StreamError;
use crate::state::{PaymentStream, ProgramAuthority};

pub fn create_stream(
    ctx: Context<CreateStream>,
    label: String,
    memo: String,
    balance: u64,
    delta_balance: u64,
    delta_time: i64,
    is_factorable: bool,
) -> Result<()> {
    require!(label.len() <= MAX_LABEL_LEN, StreamError::LabelTooLong);
    require!(memo.len() <= MAX_MEMO_LEN, StreamError::MemoTooLong);
    require!(delta_balance > 0, StreamError::InvalidSchedule);
    require!(delta_time > 0, StreamError::InvalidSchedule);
    require!(balance >= delta_balance, StreamError::InvalidSchedule);

    // Escrow the execution fees for every funded period in the stream
    // account itself, on top of the rent the sender paid at init.
    let fee_reserve = PaymentStream::required_fee(balance, delta_balance)?;
    require!(
        ctx.accounts.sender.lamports() >= fee_reserve,
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
        fee_reserve,
    )?;

    // Delegate the scheduled balance to the program authority so future
    // distributions need no sender signature.
    token::approve(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Approve {
                to: ctx.accounts.sender_tokens.to_account_info(),
                delegate: ctx.accounts.program_authority.to_account_info(),
                authority: ctx.accounts.sender.to_account_info(),
            },
        ),
        balance,
    )?;

    let now = Clock::get()?.unix_timestamp;
    let next_transfer_at = now
        .checked_add(delta_time)
        .ok_or(StreamError::MathOverflow)?;

    let stream = &mut ctx.accounts.stream;
    stream.sender = ctx.accounts.sender.key();
    stream.receiver = ctx.accounts.receiver.key();
    stream.sender_tokens = ctx.accounts.sender_tokens.key();
    stream.receiver_tokens = ctx.accounts.receiver_tokens.key();
    stream.mint = ctx.accounts.mint.key();
    stream.label = label;
    stream.memo = memo;
    stream.balance = balance;
    stream.delta_balance = delta_balance;
    stream.delta_time = delta_time;
    stream.is_factorable = is_factorable;
    stream.created_at = now;
    stream.next_transfer_at = next_transfer_at;
    stream.fee_reserve = fee_reserve;
    stream.bump = ctx.bumps.stream;

    emit!(StreamCreated {
        stream: stream.key(),
        sender: stream.sender,
        receiver: stream.receiver,
        mint: stream.mint,
        balance,
        delta_balance,
        delta_time,
        is_factorable,
        fee_reserve,
        next_transfer_at,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CreateStream<'info> {
    #[account(
        init,
        payer = sender,
        space = 8 + PaymentStream::SIZE,
        seeds = [b"stream", sender.key().as_ref(), receiver.key().as_ref()],
        bump
    )]
    pub stream: Account<'info, PaymentStream>,

    #[account(mut)]
    pub sender: Signer<'info>,

    #[account(
        mut,
        constraint = sender_tokens.owner == sender.key() @ StreamError::InvalidTokenAccount,
        constraint = sender_tokens.mint == mint.key() @ StreamError::InvalidTokenMint,
    )]
    pub sender_tokens: Account<'info, TokenAccount>,

    /// CHECK: keys the stream address and receives nothing here.
    pub receiver: UncheckedAccount<'info>,

    #[account(
        constraint = receiver_tokens.owner == receiver.key() @ StreamError::InvalidTokenAccount,
        constraint = receiver_tokens.mint == mint.key() @ StreamError::InvalidTokenMint,
    )]
    pub receiver_tokens: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(seeds = [b"authority"], bump = program_authority.bump)]
    pub program_authority: Account<'info, ProgramAuthority>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct StreamCreated {
    pub stream: Pubkey,
    pub sender: Pubkey,
    pub receiver: Pubkey,
    pub mint: Pubkey,
    pub balance: u64,
    pub delta_balance: u64,
    pub delta_time: i64,
    pub is_factorable: bool,
    pub fee_reserve: u64,
    pub next_transfer_at: i64,
}
