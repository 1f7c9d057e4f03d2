use anchor_lang::prelude::*;

use crate::constants::{DISTRIBUTOR_FEE, MAX_LABEL_LEN, MAX_MEMO_LEN, PERIOD_FEE, TREASURY_FEE};
use crate::error::StreamError;

/// One recurring payment stream between a sender and a receiver.
///
/// PDA seeds: `[b"stream", sender, receiver]`, so at most one stream exists
/// per pair. The account's lamports hold its rent deposit plus `fee_reserve`.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct PaymentStream {
    /// Party whose tokens are released.
    pub sender: Pubkey,
    /// Party the tokens are released to.
    pub receiver: Pubkey,
    /// Token account debited on each distribution.
    pub sender_tokens: Pubkey,
    /// Token account credited on each distribution.
    pub receiver_tokens: Pubkey,
    /// Mint of the scheduled asset.
    pub mint: Pubkey,
    /// Informational only.
    pub label: String,
    /// Informational only.
    pub memo: String,
    /// Total value still scheduled and not yet released.
    pub balance: u64,
    /// Amount released per successful distribution.
    pub delta_balance: u64,
    /// Minimum interval between distributions, in seconds.
    pub delta_time: i64,
    /// Whether the receivable may be reassigned to a third party.
    pub is_factorable: bool,
    /// Creation timestamp (Unix seconds, UTC).
    pub created_at: i64,
    /// Earliest time the next distribution may occur.
    pub next_transfer_at: i64,
    /// Lamports escrowed in this account to pay future distribution fees.
    pub fee_reserve: u64,
    /// PDA bump.
    pub bump: u8,
}

/// Transfers owed by one successful distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Distribution {
    /// Token units moving sender -> receiver.
    pub amount: u64,
    /// Lamports moving stream -> distributor.
    pub distributor_fee: u64,
    /// Lamports moving stream -> treasury.
    pub treasury_fee: u64,
}

impl PaymentStream {
    pub const SIZE: usize =
        32 + // sender
        32 + // receiver
        32 + // sender_tokens
        32 + // receiver_tokens
        32 + // mint
        4 + MAX_LABEL_LEN + // label
        4 + MAX_MEMO_LEN + // memo
        8 +  // balance
        8 +  // delta_balance
        8 +  // delta_time
        1 +  // is_factorable
        8 +  // created_at
        8 +  // next_transfer_at
        8 +  // fee_reserve
        1;   // bump

    /// Lamports needed to cover the execution fees of every whole release
    /// obtainable from `amount`.
    pub fn required_fee(amount: u64, delta_balance: u64) -> Result<u64> {
        require!(delta_balance > 0, StreamError::InvalidSchedule);
        let fee = (amount / delta_balance)
            .checked_mul(PERIOD_FEE)
            .ok_or(StreamError::MathOverflow)?;
        Ok(fee)
    }

    /// Terminal once the remaining balance cannot fund one more release.
    pub fn is_exhausted(&self) -> bool {
        self.balance < self.delta_balance
    }

    /// Whole releases still obtainable from the remaining balance.
    pub fn periods_remaining(&self) -> u64 {
        self.balance / self.delta_balance
    }

    /// Registers an approved top-up of `additional_balance`. Returns the
    /// additional fee the sender must escrow for the newly funded whole
    /// periods. The release cadence (`next_transfer_at`) is untouched.
    pub fn approve(&mut self, additional_balance: u64) -> Result<u64> {
        require!(additional_balance > 0, StreamError::InvalidSchedule);
        let additional_fee = Self::required_fee(additional_balance, self.delta_balance)?;
        let balance = self
            .balance
            .checked_add(additional_balance)
            .ok_or(StreamError::MathOverflow)?;
        let fee_reserve = self
            .fee_reserve
            .checked_add(additional_fee)
            .ok_or(StreamError::MathOverflow)?;
        self.balance = balance;
        self.fee_reserve = fee_reserve;
        Ok(additional_fee)
    }

    /// Checks the release preconditions in order and, if all pass, advances
    /// the schedule by one period. On any error the stream is unchanged.
    pub fn distribute(&mut self, now: i64) -> Result<Distribution> {
        require!(now >= self.next_transfer_at, StreamError::NotReady);
        require!(self.balance >= self.delta_balance, StreamError::Exhausted);
        require!(self.fee_reserve >= PERIOD_FEE, StreamError::FeeReserveDepleted);

        let next_transfer_at = self
            .next_transfer_at
            .checked_add(self.delta_time)
            .ok_or(StreamError::MathOverflow)?;
        let balance = self
            .balance
            .checked_sub(self.delta_balance)
            .ok_or(StreamError::MathOverflow)?;
        let fee_reserve = self
            .fee_reserve
            .checked_sub(PERIOD_FEE)
            .ok_or(StreamError::MathOverflow)?;

        self.balance = balance;
        self.fee_reserve = fee_reserve;
        self.next_transfer_at = next_transfer_at;

        Ok(Distribution {
            amount: self.delta_balance,
            distributor_fee: DISTRIBUTOR_FEE,
            treasury_fee: TREASURY_FEE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(balance: u64, delta_balance: u64, delta_time: i64, created_at: i64) -> PaymentStream {
        PaymentStream {
            sender: Pubkey::new_unique(),
            receiver: Pubkey::new_unique(),
            sender_tokens: Pubkey::new_unique(),
            receiver_tokens: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            label: "Abc".to_string(),
            memo: "123".to_string(),
            balance,
            delta_balance,
            delta_time,
            is_factorable: true,
            created_at,
            next_transfer_at: created_at + delta_time,
            fee_reserve: PaymentStream::required_fee(balance, delta_balance).unwrap(),
            bump: 255,
        }
    }

    #[test]
    fn required_fee_funds_every_whole_period() {
        assert_eq!(PaymentStream::required_fee(1000, 100).unwrap(), 10 * PERIOD_FEE);
        // Partial periods are not fee-funded.
        assert_eq!(PaymentStream::required_fee(1050, 100).unwrap(), 10 * PERIOD_FEE);
        assert_eq!(PaymentStream::required_fee(99, 100).unwrap(), 0);
        assert_eq!(
            PaymentStream::required_fee(1, 0),
            Err(StreamError::InvalidSchedule.into())
        );
        assert_eq!(
            PaymentStream::required_fee(u64::MAX, 1),
            Err(StreamError::MathOverflow.into())
        );
    }

    #[test]
    fn distribute_advances_one_period() {
        let mut s = stream(1000, 100, 50, 7_000);
        let due = s.next_transfer_at;

        let d = s.distribute(due).unwrap();
        assert_eq!(d.amount, 100);
        assert_eq!(d.distributor_fee, DISTRIBUTOR_FEE);
        assert_eq!(d.treasury_fee, TREASURY_FEE);
        assert_eq!(s.balance, 900);
        assert_eq!(s.fee_reserve, 9 * PERIOD_FEE);
        assert_eq!(s.next_transfer_at, due + 50);
    }

    #[test]
    fn distribute_before_due_is_untouched() {
        let mut s = stream(1000, 100, 50, 7_000);
        let before = s.clone();

        assert_eq!(
            s.distribute(before.next_transfer_at - 1),
            Err(StreamError::NotReady.into())
        );
        assert_eq!(s, before);
    }

    #[test]
    fn next_transfer_at_is_monotonic() {
        let mut s = stream(1000, 100, 50, 7_000);
        for n in 1..=10u64 {
            let now = s.next_transfer_at;
            s.distribute(now).unwrap();
            assert_eq!(s.next_transfer_at, s.created_at + 50 + (n as i64) * 50);
        }
        assert!(s.is_exhausted());
        assert_eq!(s.balance, 0);
        assert_eq!(s.fee_reserve, 0);
    }

    #[test]
    fn late_distribution_does_not_drift_the_schedule() {
        let mut s = stream(1000, 100, 50, 7_000);
        // Called well past the due time: the next slot is still one
        // delta_time after the previous slot, not after `now`.
        let due = s.next_transfer_at;
        s.distribute(due + 1_000).unwrap();
        assert_eq!(s.next_transfer_at, due + 50);
    }

    #[test]
    fn last_period_then_exhausted() {
        let mut s = stream(100, 100, 50, 0);
        let before = s.clone();

        let now = s.next_transfer_at;
        s.distribute(now).unwrap();
        assert!(s.is_exhausted());
        assert_eq!(s.periods_remaining(), 0);

        // A racing second call observes post-commit state and changes nothing.
        let after_first = s.clone();
        assert_eq!(s.distribute(now), Err(StreamError::Exhausted.into()));
        assert_eq!(s, after_first);
        assert_ne!(s, before);
    }

    #[test]
    fn depleted_fee_reserve_blocks_distribution() {
        let mut s = stream(1000, 100, 50, 0);
        s.fee_reserve = PERIOD_FEE - 1;
        let before = s.clone();

        let now = s.next_transfer_at;
        assert_eq!(s.distribute(now), Err(StreamError::FeeReserveDepleted.into()));
        assert_eq!(s, before);
    }

    #[test]
    fn approve_adds_balance_and_fee_without_resetting_cadence() {
        let mut s = stream(1000, 100, 50, 7_000);
        let next = s.next_transfer_at;

        let fee = s.approve(500).unwrap();
        assert_eq!(fee, 5 * PERIOD_FEE);
        assert_eq!(s.balance, 1500);
        assert_eq!(s.fee_reserve, 15 * PERIOD_FEE);
        assert_eq!(s.next_transfer_at, next);
    }

    #[test]
    fn approve_floors_partial_periods() {
        let mut s = stream(1000, 100, 50, 7_000);
        let fee = s.approve(50).unwrap();
        assert_eq!(fee, 0);
        assert_eq!(s.balance, 1050);
        assert_eq!(s.fee_reserve, 10 * PERIOD_FEE);
    }

    #[test]
    fn approve_rejects_zero() {
        let mut s = stream(1000, 100, 50, 7_000);
        let before = s.clone();
        assert_eq!(s.approve(0), Err(StreamError::InvalidSchedule.into()));
        assert_eq!(s, before);
    }

    #[test]
    fn observed_create_approve_distribute_scenario() {
        let created_at = 1_650_000_000;
        let mut s = stream(1000, 100, 50, created_at);
        assert_eq!(s.fee_reserve, 20_000);

        assert_eq!(s.approve(500).unwrap(), 10_000);
        assert_eq!(s.balance, 1500);

        let d = s.distribute(s.next_transfer_at).unwrap();
        assert_eq!(d.amount, 100);
        assert_eq!(d.distributor_fee, 1_000);
        assert_eq!(d.treasury_fee, 1_000);
        assert_eq!(s.balance, 1400);
        assert_eq!(s.fee_reserve, 28_000);
        assert_eq!(s.next_transfer_at, created_at + 100);
    }
}
