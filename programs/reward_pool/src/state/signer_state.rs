use anchor_lang::prelude::*;

/**
 * Signer role for one pool
 *
 * Derivation: ["signer", pool, signer]
 *
 * Holders produce the Ed25519 claim authorizations the pool accepts.
 * Revocation clears `active` and keeps the account so a later grant reuses it.
 */
#[account]
#[derive(Default, Debug)]
pub struct SignerRole {
    pub bump: u8,
    pub pool: Pubkey,
    pub signer: Pubkey,
    pub active: bool,
}

impl SignerRole {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + std::mem::size_of::<SignerRole>();
}
