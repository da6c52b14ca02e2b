use anchor_lang::prelude::*;
use crate::state::{PoolKind, TokenKind};

/// Event emitted when the factory is initialized
#[event]
pub struct FactoryInitialized {
    pub factory: Pubkey,
    pub authority: Pubkey,
    pub protocol_fee_recipient: Pubkey,
    pub default_fee_bps: u16,
}

/// Event emitted when the admin role is granted or revoked
#[event]
pub struct AdminRoleChanged {
    pub factory: Pubkey,
    pub admin: Pubkey,
    pub granted: bool,
}

/// Event emitted when a pool is created
#[event]
pub struct PoolCreated {
    /// The pool account public key
    pub pool: Pubkey,
    pub kind: PoolKind,
    /// Sequential id (XP pools) or 0
    pub pool_id: u64,
    /// Slot in the factory pool registry
    pub registry_index: u64,
    /// Creator identity (creator pools) or the null key
    pub creator: Pubkey,
    pub name: String,
    pub protocol_fee_bps: u16,
    pub protocol_fee_recipient: Pubkey,
}

/// Event emitted when a token vault is opened for a pool
#[event]
pub struct TokenVaultOpened {
    pub pool: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
}

/// Event emitted when an allocation is added, changed or removed
#[event]
pub struct AllocationChanged {
    pub pool: Pubkey,
    pub recipient: Pubkey,
    /// Null key for XP weights
    pub mint: Pubkey,
    pub old_amount: u64,
    pub new_amount: u64,
    /// Pool total_weight (XP) or medium total_allocated (creator) after the change
    pub total: u64,
}

/// Event emitted once per batch instruction
#[event]
pub struct BatchProcessed {
    pub pool: Pubkey,
    pub mint: Pubkey,
    /// 0 = add, 1 = update, 2 = penalize
    pub operation: u8,
    pub count: u32,
    pub total: u64,
}

/// Event emitted when a pool is activated or deactivated
#[event]
pub struct PoolStatusChanged {
    pub pool: Pubkey,
    pub active: bool,
}

/// Event emitted for every medium captured by a snapshot
#[event]
pub struct SnapshotTaken {
    pub pool: Pubkey,
    pub mint: Pubkey,
    pub kind: TokenKind,
    pub amount: u64,
}

/// Event emitted when a signer role is granted or revoked
#[event]
pub struct SignerRoleChanged {
    pub pool: Pubkey,
    pub signer: Pubkey,
    pub active: bool,
}

/// Event emitted when a reward is claimed
#[event]
pub struct RewardClaimed {
    pub pool: Pubkey,
    pub recipient: Pubkey,
    pub mint: Pubkey,
    pub kind: TokenKind,
    pub nonce: u64,
    /// Signer whose authorization was redeemed
    pub signer: Pubkey,
    pub gross_amount: u64,
    pub net_amount: u64,
    pub fee_amount: u64,
    /// True when submitted by an admin on the recipient's behalf
    pub relayed: bool,
}

/// Event emitted when an admin withdraws pool funds
#[event]
pub struct EmergencyWithdrawal {
    pub pool: Pubkey,
    pub mint: Pubkey,
    pub kind: TokenKind,
    pub destination: Pubkey,
    pub amount: u64,
}

/// Event emitted when a pool's fee recipient changes
#[event]
pub struct ProtocolFeeRecipientUpdated {
    /// Pool updated, or the factory itself for the default
    pub target: Pubkey,
    pub old_recipient: Pubkey,
    pub new_recipient: Pubkey,
}
