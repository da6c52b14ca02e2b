use anchor_lang::prelude::*;

/**
 * Program Constants
 *
 * Values shared by every instruction of the reward pool program: PDA seeds,
 * fee bounds, size limits for variable-length fields and the domain tag used
 * when hashing claim authorizations.
 */

#[constant]
/// ===== FEE CONSTANTS =====

/// Basis-point denominator (100% = 10,000 bps)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Highest protocol fee a pool may charge (10%)
pub const MAX_PROTOCOL_FEE_BPS: u16 = 1_000;

/// Fee applied by the plain pool creation variants (1%)
pub const DEFAULT_PROTOCOL_FEE_BPS: u16 = 100;

/// ===== SIZE LIMITS =====

/// Maximum number of admin-role holders on the factory
pub const MAX_ADMINS: usize = 10;

/// Maximum pool name length in bytes
pub const MAX_NAME_LEN: usize = 64;

/// Maximum pool description length in bytes
pub const MAX_DESCRIPTION_LEN: usize = 256;

/// Entries per batch that fit one transaction with room to spare.
/// - Adds carry two accounts per entry, updates and penalties one
/// - Not enforced on-chain: callers split larger lists into several transactions
pub const SAFE_BATCH_ADD_SIZE: usize = 8;
pub const SAFE_BATCH_UPDATE_SIZE: usize = 12;

/// ===== CLAIM AUTHORIZATION =====

/// Domain tag prefixed to every claim authorization hash
/// - Keeps signatures for this program from being replayed as any other message
pub const CLAIM_DOMAIN_TAG: &[u8] = b"reward_pool:claim:v1";

/// ===== PDA SEED CONSTANTS =====

/// Seed for the factory PDA
/// - Used in: ["factory"]
pub const FACTORY_SEED: &str = "factory";

/// Seed for XP pool PDAs
/// - Used in: ["xp_pool", factory, pool_id]
pub const XP_POOL_SEED: &str = "xp_pool";

/// Seed for creator pool PDAs
/// - Used in: ["creator_pool", factory, creator]
/// - One pool per creator: a second init on the same address fails
pub const CREATOR_POOL_SEED: &str = "creator_pool";

/// Seed for pool registry entries
/// - Used in: ["pool_registry", factory, index]
pub const POOL_REGISTRY_SEED: &str = "pool_registry";

/// Seed for per-medium accounting PDAs
/// - Used in: ["medium", pool, mint]
/// - The native medium uses the null mint
pub const MEDIUM_SEED: &str = "medium";

/// Seed for token vault PDAs
/// - Used in: ["vault", pool, mint]
pub const VAULT_SEED: &str = "vault";

/// Seed for allocation PDAs
/// - Used in: ["allocation", pool, recipient, mint]
pub const ALLOCATION_SEED: &str = "allocation";

/// Seed for enumeration entries
/// - Used in: ["recipient_index", pool, index]
pub const RECIPIENT_INDEX_SEED: &str = "recipient_index";

/// Seed for claim records
/// - Used in: ["claim", pool, recipient, mint]
pub const CLAIM_SEED: &str = "claim";

/// Seed for per-recipient nonce counters
/// - Used in: ["user_nonce", pool, recipient]
pub const USER_NONCE_SEED: &str = "user_nonce";

/// Seed for consumed nonce records
/// - Used in: ["nonce", pool, recipient, nonce]
pub const NONCE_SEED: &str = "nonce";

/// Seed for signer role PDAs
/// - Used in: ["signer", pool, signer]
pub const SIGNER_SEED: &str = "signer";
