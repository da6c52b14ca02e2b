use anchor_lang::prelude::*;
use crate::error::*;
use crate::utils::FeeSplit;

/// Payment medium discriminator
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TokenKind {
    /// Lamports; always paired with the null mint
    #[default]
    Native,
    /// SPL Token or Token-2022 mint; never the null mint
    Token,
}

impl TokenKind {
    pub fn as_byte(&self) -> u8 {
        match self {
            TokenKind::Native => 0,
            TokenKind::Token => 1,
        }
    }
}

/// A medium is valid only as (null mint, Native) or (real mint, Token).
/// Any other pairing is rejected, never coerced.
pub fn is_valid_medium(mint: &Pubkey, kind: TokenKind) -> bool {
    match kind {
        TokenKind::Native => *mint == Pubkey::default(),
        TokenKind::Token => *mint != Pubkey::default(),
    }
}

/**
 * Per-medium accounting for one pool
 *
 * Derivation: ["medium", pool, mint]
 *
 * The snapshot amount is the only basis for claim computation; funds arriving
 * after it are ignored until the snapshot is retaken. Retaking overwrites the
 * amount and starts a new payout window: what was paid before it already left
 * the balance the new snapshot captured.
 */
#[account]
#[derive(Default, Debug)]
pub struct MediumState {
    pub bump: u8,
    pub pool: Pubkey,
    pub mint: Pubkey,
    pub kind: TokenKind,

    /// Balance captured at the last snapshot
    pub snapshot_amount: u64,
    pub snapshot_taken: bool,
    pub snapshot_at: i64,

    /// Sum of present allocations for this medium (creator pools only)
    pub total_allocated: u64,

    /// Gross amount paid out by claims (net + fee), over the pool lifetime
    pub total_claimed: u64,

    /// Gross amount paid out against the current snapshot
    pub claimed_since_snapshot: u64,

    /// Portion of total_claimed routed to the fee recipient
    pub protocol_fees_claimed: u64,
}

impl MediumState {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + std::mem::size_of::<MediumState>();

    pub fn record_snapshot(&mut self, amount: u64, now: i64) {
        self.snapshot_amount = amount;
        self.snapshot_taken = true;
        self.snapshot_at = now;
        self.claimed_since_snapshot = 0;
    }

    /// Current snapshot not yet paid out
    pub fn remaining_snapshot(&self) -> u64 {
        self.snapshot_amount.saturating_sub(self.claimed_since_snapshot)
    }

    /// Counts one paid claim against the snapshot and the lifetime totals
    pub fn record_claim(&mut self, split: &FeeSplit) -> Result<()> {
        self.total_claimed = self
            .total_claimed
            .checked_add(split.gross)
            .ok_or(RewardPoolError::ArithmeticOverflow)?;
        self.claimed_since_snapshot = self
            .claimed_since_snapshot
            .checked_add(split.gross)
            .ok_or(RewardPoolError::ArithmeticOverflow)?;
        self.protocol_fees_claimed = self
            .protocol_fees_claimed
            .checked_add(split.fee)
            .ok_or(RewardPoolError::ArithmeticOverflow)?;
        Ok(())
    }
}
