use anchor_lang::prelude::*;

/**
 * Allocation entry
 *
 * One recipient's weight (XP pool) or absolute amount (creator pool) for one
 * medium. XP pools key every entry under the null mint.
 *
 * Derivation: ["allocation", pool, recipient, mint]
 *
 * Removal is a tombstone: amount is zeroed and `present` cleared, while
 * `indexed` stays set so the enumeration entry is reused on re-add instead
 * of appended again.
 */
#[account]
#[derive(Default, Debug, PartialEq)]
pub struct Allocation {
    pub bump: u8,
    pub pool: Pubkey,
    pub recipient: Pubkey,
    pub mint: Pubkey,

    /// Weight or absolute amount
    pub amount: u64,

    /// Currently an active claimant
    pub present: bool,

    /// Has a RecipientIndex entry
    pub indexed: bool,
}

impl Allocation {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + std::mem::size_of::<Allocation>();

    /// Blank entry for an allocation PDA that has not been created yet
    pub fn vacant(pool: Pubkey, recipient: Pubkey, mint: Pubkey, bump: u8) -> Self {
        Self {
            bump,
            pool,
            recipient,
            mint,
            ..Default::default()
        }
    }
}

/**
 * Enumeration entry
 *
 * Append-only: entry `i` is written once when the i-th allocation is first
 * added and never moved, so iteration order is stable across removals.
 *
 * Derivation: ["recipient_index", pool, index]
 */
#[account]
#[derive(Default, Debug)]
pub struct RecipientIndex {
    pub bump: u8,
    pub pool: Pubkey,
    pub index: u64,
    pub recipient: Pubkey,
    pub mint: Pubkey,
}

impl RecipientIndex {
    pub const LEN: usize = 8 + std::mem::size_of::<RecipientIndex>();
}
