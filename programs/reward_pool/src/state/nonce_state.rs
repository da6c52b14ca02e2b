use anchor_lang::prelude::*;
use crate::error::*;

/**
 * Per-recipient nonce counter
 *
 * Derivation: ["user_nonce", pool, recipient]
 *
 * Nonces need not be sequential. `counter` is the highest nonce consumed so
 * far and only moves forward; the individual consumed values live in
 * NonceRecord accounts.
 */
#[account]
#[derive(Default, Debug)]
pub struct UserNonce {
    /// Highest nonce consumed so far
    pub counter: u64,

    /// Number of nonces consumed
    pub used_count: u64,
}

impl UserNonce {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + std::mem::size_of::<UserNonce>();

    /// Suggested nonce for the next authorization
    pub fn next_nonce(&self) -> u64 {
        self.counter.saturating_add(1)
    }

    /// Marks `nonce` used and advances the high-water mark
    pub fn consume(&mut self, record: &mut NonceRecord, nonce: u64) -> Result<()> {
        require!(!record.used, RewardPoolError::NonceAlreadyUsed);
        record.used = true;
        self.counter = self.counter.max(nonce);
        self.used_count = self
            .used_count
            .checked_add(1)
            .ok_or(RewardPoolError::ArithmeticOverflow)?;
        Ok(())
    }
}

/**
 * Consumed nonce marker
 *
 * Derivation: ["nonce", pool, recipient, nonce]
 *
 * Scoped to one recipient, so two recipients may use the same numeric nonce.
 */
#[account]
#[derive(Default, Debug)]
pub struct NonceRecord {
    pub used: bool,
}

impl NonceRecord {
    pub const LEN: usize = 8 + std::mem::size_of::<NonceRecord>();
}
