use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;

/// Which allocation model a pool follows
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum PoolKind {
    /// Allocation is a weight; a recipient receives snapshot * weight / total_weight
    #[default]
    Xp,
    /// Allocation is an absolute amount per (recipient, medium)
    Creator,
}

/**
 * Reward pool state account
 *
 * Holds the lifecycle flag, fee configuration and aggregate counters of one
 * pool. Native currency rewards are held as lamports on this account above
 * its rent-exempt minimum; token rewards sit in per-mint vaults owned by it.
 *
 * Derivation:
 * - XP pool: ["xp_pool", factory, pool_id]
 * - Creator pool: ["creator_pool", factory, creator]
 *
 * Lifecycle:
 * 1. Created inactive by the factory
 * 2. Populated with allocations, funded, snapshotted
 * 3. Activated; claims are accepted
 * 4. Optionally deactivated for maintenance and activated again
 */
#[account]
#[derive(Default, Debug)]
pub struct RewardPool {
    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Allocation model
    pub kind: PoolKind,

    /// Factory whose admins control this pool
    pub factory: Pubkey,

    /// Sequential id (XP pools only)
    pub pool_id: u64,

    /// Creator identity (creator pools only)
    pub creator: Pubkey,

    pub name: String,
    pub description: String,

    /// Claims are accepted only while active; the ledger is editable only while inactive
    pub active: bool,

    /// Protocol fee in basis points, at most MAX_PROTOCOL_FEE_BPS
    pub protocol_fee_bps: u16,

    /// Receives the protocol fee of every claim
    pub protocol_fee_recipient: Pubkey,

    /// Sum of all present XP weights (XP pools only)
    pub total_weight: u64,

    /// Number of enumeration entries ever appended
    pub total_users: u64,

    pub created_at: i64,
}

impl RewardPool {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator and both strings at their maximum length
    pub const LEN: usize = 8
        + 1
        + 1
        + 32
        + 8
        + 32
        + (4 + MAX_NAME_LEN)
        + (4 + MAX_DESCRIPTION_LEN)
        + 1
        + 2
        + 32
        + 8
        + 8
        + 8;

    pub fn ensure_inactive(&self) -> Result<()> {
        require!(!self.active, RewardPoolError::PoolActive);
        Ok(())
    }

    /// Mint under which allocations are keyed.
    /// XP weights are medium independent and always live under the null mint.
    pub fn allocation_mint(&self, mint: &Pubkey) -> Pubkey {
        match self.kind {
            PoolKind::Xp => Pubkey::default(),
            PoolKind::Creator => *mint,
        }
    }

    /// Runs `f` with the PDA signer seeds of this pool
    pub fn with_signer_seeds<R>(&self, f: impl FnOnce(&[&[&[u8]]]) -> R) -> R {
        let bump = [self.bump];
        match self.kind {
            PoolKind::Xp => {
                let id = self.pool_id.to_le_bytes();
                let seeds: &[&[u8]] = &[XP_POOL_SEED.as_bytes(), self.factory.as_ref(), &id, &bump];
                f(&[seeds])
            }
            PoolKind::Creator => {
                let seeds: &[&[u8]] =
                    &[CREATOR_POOL_SEED.as_bytes(), self.factory.as_ref(), self.creator.as_ref(), &bump];
                f(&[seeds])
            }
        }
    }
}

/// Validates pool metadata against the account size limits
pub fn validate_metadata(name: &str, description: &str) -> Result<()> {
    require!(
        name.len() <= MAX_NAME_LEN && description.len() <= MAX_DESCRIPTION_LEN,
        RewardPoolError::MetadataTooLong
    );
    Ok(())
}

/// Validates a protocol fee rate against the cap
pub fn validate_fee_bps(fee_bps: u16) -> Result<()> {
    require!(fee_bps <= MAX_PROTOCOL_FEE_BPS, RewardPoolError::InvalidFeeRate);
    Ok(())
}
