use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("61EiRiRNSU4ZEhnn8KqD7M8VRHz6oKvD9YzSP6bNZNWp");

#[program]
pub mod streampay {
    use super::*;

    /// One-time setup of the program authority and treasury.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize(ctx)
    }

    /// Sender opens a recurring payment stream to a receiver.
    pub fn create_stream(
        ctx: Context<CreateStream>,
        label: String,
        memo: String,
        balance: u64,
        delta_balance: u64,
        delta_time: i64,
        is_factorable: bool,
    ) -> Result<()> {
        instructions::create_stream(
            ctx,
            label,
            memo,
            balance,
            delta_balance,
            delta_time,
            is_factorable,
        )
    }

    /// Sender approves additional balance on an existing stream.
    pub fn approve_stream(ctx: Context<ApproveStream>, additional_balance: u64) -> Result<()> {
        instructions::approve_stream(ctx, additional_balance)
    }

    /// Any signer releases one due period in exchange for the bounty.
    pub fn distribute(ctx: Context<Distribute>) -> Result<()> {
        instructions::distribute(ctx)
    }

    /// Emits the stream's current standing without mutating it.
    pub fn emit_stream_quote(ctx: Context<EmitStreamQuote>) -> Result<()> {
        instructions::emit_stream_quote(ctx)
    }
}
