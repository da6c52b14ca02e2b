use anchor_lang::prelude::*;

/**
 * Claim record for one (recipient, medium) pair
 *
 * Derivation: ["claim", pool, recipient, mint]
 *
 * Lifecycle:
 * 1. Created on the first claim attempt (using init_if_needed)
 * 2. `claimed` set once the claim succeeds; never reset
 *
 * A failed claim reverts the whole transaction, including the creation of
 * this account, so the flag can only be observed set after a payout.
 */
#[account]
#[derive(Default, Debug)]
pub struct ClaimRecord {
    pub claimed: bool,

    /// Gross amount paid (net + fee)
    pub gross_amount: u64,

    /// Fee portion of gross_amount
    pub fee_amount: u64,

    pub claimed_at: i64,
}

impl ClaimRecord {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + std::mem::size_of::<ClaimRecord>();

    pub fn record(&mut self, gross_amount: u64, fee_amount: u64, now: i64) {
        self.claimed = true;
        self.gross_amount = gross_amount;
        self.fee_amount = fee_amount;
        self.claimed_at = now;
    }
}
