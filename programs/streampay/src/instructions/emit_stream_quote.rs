use anchor_lang::prelude::*;

use crate::state::PaymentStream;

/// Read-only view: emits the stream's current standing so off-chain callers
/// (receivers, distributor bots) can decide whether a release is worth
/// attempting without replicating the schedule math.
pub fn emit_stream_quote(ctx: Context<EmitStreamQuote>) -> Result<()> {
    let stream = &ctx.accounts.stream;
    let now = Clock::get()?.unix_timestamp;

    emit!(StreamQuote {
        stream: stream.key(),
        sender: stream.sender,
        receiver: stream.receiver,
        balance: stream.balance,
        fee_reserve: stream.fee_reserve,
        periods_remaining: stream.periods_remaining(),
        next_transfer_at: stream.next_transfer_at,
        due: now >= stream.next_transfer_at,
        exhausted: stream.is_exhausted(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct EmitStreamQuote<'info> {
    #[account(
        seeds = [b"stream", stream.sender.as_ref(), stream.receiver.as_ref()],
        bump = stream.bump
    )]
    pub stream: Account<'info, PaymentStream>,
}

#[event]
pub struct StreamQuote {
    pub stream: Pubkey,
    pub sender: Pubkey,
    pub receiver: Pubkey,
    pub balance: u64,
    pub fee_reserve: u64,
    pub periods_remaining: u64,
    pub next_transfer_at: i64,
    pub due: bool,
    pub exhausted: bool,
}
