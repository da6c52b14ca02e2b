use anchor_lang::prelude::*;

/**
 * Pool registry entry
 *
 * Derivation: ["pool_registry", factory, index]
 *
 * Written once when the pool is created. Entries `0..factory.total_pools`
 * cover every pool of either kind, which is how factory-wide updates reach
 * all of them.
 */
#[account]
#[derive(Default, Debug)]
pub struct PoolRegistryEntry {
    pub bump: u8,
    pub factory: Pubkey,
    pub index: u64,
    pub pool: Pubkey,
}

impl PoolRegistryEntry {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + std::mem::size_of::<PoolRegistryEntry>();
}
