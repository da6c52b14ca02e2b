use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;

/**
 * Factory state account
 *
 * The single administrative root of the program. Every pool records the
 * factory that created it and accepts admin instructions only from accounts
 * this factory resolves as admins.
 *
 * Derivation: ["factory"]
 *
 * Roles:
 * - authority: grants and revokes the admin role, is always an admin itself
 * - admins: may create pools and run every pool admin instruction
 */
#[account]
#[derive(Default, Debug)]
pub struct Factory {
    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Account that manages the admin set
    pub authority: Pubkey,

    /// Additional admin-role holders (at most MAX_ADMINS)
    pub admins: Vec<Pubkey>,

    /// Fee recipient copied into newly created pools
    pub protocol_fee_recipient: Pubkey,

    /// Fee rate applied to XP pools at creation
    pub default_fee_bps: u16,

    /// Number of XP pools created, also the next XP pool id
    pub xp_pool_count: u64,

    /// Number of creator pools created
    pub creator_pool_count: u64,

    /// Number of pool registry entries, one per pool of either kind
    pub total_pools: u64,
}

impl Factory {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator, Vec length prefix and a full admin set
    pub const LEN: usize = 8 + 1 + 32 + (4 + 32 * MAX_ADMINS) + 32 + 2 + 8 + 8 + 8;

    /// Resolves the admin role: the authority or any listed admin
    pub fn is_admin(&self, key: &Pubkey) -> bool {
        *key == self.authority || self.admins.contains(key)
    }

    pub fn grant_admin(&mut self, admin: Pubkey) -> Result<()> {
        require!(admin != Pubkey::default(), RewardPoolError::InvalidRecipient);
        require!(!self.is_admin(&admin), RewardPoolError::AdminAlreadyGranted);
        require!(self.admins.len() < MAX_ADMINS, RewardPoolError::TooManyAdmins);
        self.admins.push(admin);
        Ok(())
    }

    /// Claims the next registry slot for a new pool
    pub fn register_pool(&mut self) -> Result<u64> {
        let index = self.total_pools;
        self.total_pools = index
            .checked_add(1)
            .ok_or(RewardPoolError::ArithmeticOverflow)?;
        Ok(index)
    }

    /// Validates a registry range `[start, end)` and returns its length
    pub fn pool_range(&self, start: u64, end: u64) -> Result<usize> {
        require!(start < end && end <= self.total_pools, RewardPoolError::InvalidPoolRange);
        usize::try_from(end - start).map_err(|_| error!(RewardPoolError::InvalidPoolRange))
    }

    pub fn revoke_admin(&mut self, admin: &Pubkey) -> Result<()> {
        let position = self
            .admins
            .iter()
            .position(|existing| existing == admin)
            .ok_or(RewardPoolError::AdminNotFound)?;
        self.admins.remove(position);
        Ok(())
    }
}
