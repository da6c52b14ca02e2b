use anchor_lang::prelude::*;

declare_id!("FoPXC3xsM5CdcxfjiBN4ctRbs9DM8Gw1V3v9E6ZT6xk6");

pub mod constants;
pub mod error;
pub mod event;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test;

use instructions::*;
use state::TokenKind;
use utils::{ClaimEligibility, ClaimMessage};

/**
 * Reward Pool Program
 *
 * Snapshot-based reward distribution. A factory creates pools, admins record
 * who is owed what, the pool balance is frozen by a snapshot, and recipients
 * redeem signed one-time authorizations to collect their share.
 *
 * Key Features:
 * - XP pools: proportional payout, snapshot * weight / total_weight
 * - Creator pools: absolute allocation per (recipient, medium)
 * - Native lamports and SPL Token / Token 2022 media, one snapshot each
 * - Ed25519 claim authorizations with per-recipient nonces
 * - Basis-point protocol fee on every claim, rounded down
 * - All-or-nothing batch ledger edits
 * - Cross-program call event emission for indexers
 *
 * Architecture:
 * - Factory PDA: authority, admin set, fee defaults, pool counters
 * - Pool PDAs: lifecycle flag and aggregates; hold native rewards
 * - Medium PDAs: snapshot and claimed totals per (pool, mint)
 * - Allocation and RecipientIndex PDAs: the ledger and its enumeration
 * - ClaimRecord, UserNonce and NonceRecord PDAs: exactly-once claims
 * - SignerRole PDAs: keys allowed to authorize claims
 *
 * Workflow:
 * 1. Admin creates a pool and records allocations while it is inactive
 * 2. Funders send lamports or tokens to the pool
 * 3. Admin takes a snapshot, grants a signer role and activates the pool
 * 4. Recipients claim with authorizations issued by the signer
 * 5. Admin may deactivate the pool to edit, resnapshot or withdraw
 */
#[program]
pub mod reward_pool {
    use super::*;

    // ===== FACTORY =====

    /**
     * Creates the factory
     *
     * @param protocol_fee_recipient - Fee recipient copied into new pools
     * @param default_fee_bps - Fee rate for XP pools
     *
     * Access Control: Anyone, once; the signer becomes the authority
     */
    pub fn initialize_factory(
        ctx: Context<InitializeFactory>,
        protocol_fee_recipient: Pubkey,
        default_fee_bps: u16,
    ) -> Result<()> {
        handle_initialize_factory(ctx, protocol_fee_recipient, default_fee_bps)
    }

    /// Access Control: Factory authority only
    pub fn grant_admin(ctx: Context<ManageAdmin>, admin: Pubkey) -> Result<()> {
        handle_grant_admin(ctx, admin)
    }

    /// Access Control: Factory authority only
    pub fn revoke_admin(ctx: Context<ManageAdmin>, admin: Pubkey) -> Result<()> {
        handle_revoke_admin(ctx, admin)
    }

    /**
     * Creates an XP pool with the factory default fee
     *
     * @returns the sequential pool id
     *
     * Access Control: Factory admins only
     */
    pub fn create_xp_pool(ctx: Context<CreateXpPool>, name: String, description: String) -> Result<u64> {
        handle_create_xp_pool(ctx, name, description)
    }

    /**
     * Creates the creator pool of `creator` charging DEFAULT_PROTOCOL_FEE_BPS
     *
     * Fails if the creator already has a pool.
     *
     * @returns the pool address
     *
     * Access Control: Factory admins only
     */
    pub fn create_creator_pool(
        ctx: Context<CreateCreatorPool>,
        creator: Pubkey,
        name: String,
        description: String,
    ) -> Result<Pubkey> {
        handle_create_creator_pool(ctx, creator, name, description, CreatorPoolFee::Default)
    }

    /// Zero-fee variant; does not require a fee recipient on the factory
    pub fn create_creator_pool_zero_fee(
        ctx: Context<CreateCreatorPool>,
        creator: Pubkey,
        name: String,
        description: String,
    ) -> Result<Pubkey> {
        handle_create_creator_pool(ctx, creator, name, description, CreatorPoolFee::Zero)
    }

    /// Custom-fee variant, 0..=MAX_PROTOCOL_FEE_BPS
    pub fn create_creator_pool_with_fee(
        ctx: Context<CreateCreatorPool>,
        creator: Pubkey,
        name: String,
        description: String,
        fee_bps: u16,
    ) -> Result<Pubkey> {
        handle_create_creator_pool(ctx, creator, name, description, CreatorPoolFee::Custom(fee_bps))
    }

    /**
     * Pushes a new protocol fee recipient to the factory and to the pools in
     * registry range [start, end)
     *
     * remaining_accounts: one [registry entry, pool] pair per index. Covering
     * 0..get_total_pools across calls reaches every pool.
     *
     * Access Control: Factory admins only
     */
    pub fn update_protocol_fee_recipient_for_all_pools<'info>(
        ctx: Context<'_, '_, '_, 'info, UpdateProtocolFeeRecipient<'info>>,
        new_recipient: Pubkey,
        start: u64,
        end: u64,
    ) -> Result<()> {
        handle_update_protocol_fee_recipient_for_all_pools(ctx, new_recipient, start, end)
    }

    // ===== POOL ADMINISTRATION =====

    /// Creates the vault a token medium is funded into
    pub fn open_token_vault(ctx: Context<OpenTokenVault>) -> Result<()> {
        handle_open_token_vault(ctx)
    }

    pub fn activate_pool(ctx: Context<SetPoolStatus>) -> Result<()> {
        handle_activate_pool(ctx)
    }

    pub fn deactivate_pool(ctx: Context<SetPoolStatus>) -> Result<()> {
        handle_deactivate_pool(ctx)
    }

    /// Captures the native balance only
    pub fn take_native_snapshot(ctx: Context<TakeSnapshot>) -> Result<()> {
        handle_take_native_snapshot(ctx)
    }

    /**
     * Captures the native balance and the vault balance of every mint listed
     *
     * @param mints - Token media; remaining_accounts holds [medium, vault] per mint
     *
     * Access Control: Factory admins only, any lifecycle state
     */
    pub fn take_snapshot<'info>(
        ctx: Context<'_, '_, '_, 'info, TakeSnapshot<'info>>,
        mints: Vec<Pubkey>,
    ) -> Result<()> {
        handle_take_snapshot(ctx, mints)
    }

    pub fn grant_signer_role(ctx: Context<GrantSignerRole>, signer: Pubkey) -> Result<()> {
        handle_grant_signer_role(ctx, signer)
    }

    pub fn revoke_signer_role(ctx: Context<RevokeSignerRole>) -> Result<()> {
        handle_revoke_signer_role(ctx)
    }

    /**
     * Withdraws funds of one medium from an inactive pool
     *
     * Access Control: Factory admins only
     */
    pub fn emergency_withdraw(
        ctx: Context<EmergencyWithdraw>,
        mint: Pubkey,
        kind: TokenKind,
        amount: u64,
    ) -> Result<()> {
        handle_emergency_withdraw(ctx, mint, kind, amount)
    }

    // ===== XP LEDGER =====

    pub fn add_user(ctx: Context<ManageUser>, user: Pubkey, xp: u64) -> Result<()> {
        handle_add_user(ctx, user, xp)
    }

    pub fn update_user_xp(ctx: Context<ManageUser>, user: Pubkey, xp: u64) -> Result<()> {
        handle_update_user_xp(ctx, user, xp)
    }

    pub fn penalize_user(ctx: Context<ManageUser>, user: Pubkey, penalty: u64) -> Result<()> {
        handle_penalize_user(ctx, user, penalty)
    }

    pub fn remove_user(ctx: Context<ManageUser>, user: Pubkey) -> Result<()> {
        handle_remove_user(ctx, user)
    }

    /**
     * Adds many users at once, all or nothing
     *
     * @param users - Recipients, no duplicates or null keys
     * @param xps - Non-zero weights, same length as users
     *
     * remaining_accounts: [allocation, recipient_index] per user
     */
    pub fn batch_add_users<'info>(
        ctx: Context<'_, '_, '_, 'info, BatchUsers<'info>>,
        users: Vec<Pubkey>,
        xps: Vec<u64>,
    ) -> Result<()> {
        handle_batch_add_users(ctx, users, xps)
    }

    /// remaining_accounts: [allocation] per user
    pub fn batch_update_user_xp<'info>(
        ctx: Context<'_, '_, '_, 'info, BatchUsers<'info>>,
        users: Vec<Pubkey>,
        xps: Vec<u64>,
    ) -> Result<()> {
        handle_batch_update_user_xp(ctx, users, xps)
    }

    /// remaining_accounts: [allocation] per user
    pub fn batch_penalize_users<'info>(
        ctx: Context<'_, '_, '_, 'info, BatchUsers<'info>>,
        users: Vec<Pubkey>,
        penalties: Vec<u64>,
    ) -> Result<()> {
        handle_batch_penalize_users(ctx, users, penalties)
    }

    // ===== CREATOR LEDGER =====

    pub fn add_recipient(
        ctx: Context<ManageRecipient>,
        recipient: Pubkey,
        mint: Pubkey,
        kind: TokenKind,
        amount: u64,
    ) -> Result<()> {
        handle_add_recipient(ctx, recipient, mint, kind, amount)
    }

    pub fn update_recipient_allocation(
        ctx: Context<ManageRecipient>,
        recipient: Pubkey,
        mint: Pubkey,
        kind: TokenKind,
        amount: u64,
    ) -> Result<()> {
        handle_update_recipient_allocation(ctx, recipient, mint, kind, amount)
    }

    pub fn remove_recipient(
        ctx: Context<ManageRecipient>,
        recipient: Pubkey,
        mint: Pubkey,
        kind: TokenKind,
    ) -> Result<()> {
        handle_remove_recipient(ctx, recipient, mint, kind)
    }

    /// remaining_accounts: [allocation, recipient_index] per recipient
    pub fn batch_add_recipients<'info>(
        ctx: Context<'_, '_, '_, 'info, BatchRecipients<'info>>,
        mint: Pubkey,
        kind: TokenKind,
        recipients: Vec<Pubkey>,
        amounts: Vec<u64>,
    ) -> Result<()> {
        handle_batch_add_recipients(ctx, mint, kind, recipients, amounts)
    }

    // ===== CLAIMS =====

    /**
     * Claims a reward with a signed authorization
     *
     * The preceding instruction must be an Ed25519 verification of
     * claim_message_hash(program_id, pool, message) by an active signer.
     *
     * Access Control: The recipient named in the message
     */
    pub fn claim_reward(ctx: Context<ClaimReward>, message: ClaimMessage) -> Result<()> {
        process_claim(ctx, message, false)
    }

    /**
     * Claims on behalf of the recipient named in the message
     *
     * Funds still go to the recipient; the admin only submits and pays rent.
     * A native payout to a wallet that holds no lamports must reach the
     * rent-exempt minimum on its own, else it fails with BelowRentMinimum.
     *
     * Access Control: Factory admins only
     */
    pub fn claim_reward_for(ctx: Context<ClaimReward>, message: ClaimMessage) -> Result<()> {
        process_claim(ctx, message, true)
    }

    // ===== VIEWS =====

    pub fn check_claim_eligibility(
        ctx: Context<EligibilityView>,
        recipient: Pubkey,
        mint: Pubkey,
        kind: TokenKind,
    ) -> Result<ClaimEligibility> {
        handle_check_claim_eligibility(ctx, recipient, mint, kind)
    }

    pub fn get_snapshot_amount(ctx: Context<MediumView>, mint: Pubkey) -> Result<u64> {
        handle_get_snapshot_amount(ctx, mint)
    }

    pub fn get_available_rewards(ctx: Context<MediumView>, mint: Pubkey, kind: TokenKind) -> Result<u64> {
        handle_get_available_rewards(ctx, mint, kind)
    }

    pub fn get_total_rewards(ctx: Context<MediumView>, mint: Pubkey, kind: TokenKind) -> Result<u64> {
        handle_get_total_rewards(ctx, mint, kind)
    }

    pub fn get_total_claimed(ctx: Context<MediumView>, mint: Pubkey) -> Result<u64> {
        handle_get_total_claimed(ctx, mint)
    }

    pub fn get_protocol_fees_claimed(ctx: Context<MediumView>, mint: Pubkey) -> Result<u64> {
        handle_get_protocol_fees_claimed(ctx, mint)
    }

    pub fn has_claimed(ctx: Context<ClaimRecordView>, recipient: Pubkey, mint: Pubkey) -> Result<bool> {
        handle_has_claimed(ctx, recipient, mint)
    }

    pub fn get_user_nonce_counter(ctx: Context<UserNonceView>, recipient: Pubkey) -> Result<u64> {
        handle_get_user_nonce_counter(ctx, recipient)
    }

    pub fn get_next_nonce(ctx: Context<UserNonceView>, recipient: Pubkey) -> Result<u64> {
        handle_get_next_nonce(ctx, recipient)
    }

    pub fn is_nonce_used(ctx: Context<NonceRecordView>, recipient: Pubkey, nonce: u64) -> Result<bool> {
        handle_is_nonce_used(ctx, recipient, nonce)
    }

    pub fn get_total_users(ctx: Context<PoolView>) -> Result<u64> {
        handle_get_total_users(ctx)
    }

    pub fn get_user_at_index(ctx: Context<RecipientAtIndex>, index: u64) -> Result<Pubkey> {
        handle_get_user_at_index(ctx, index)
    }

    pub fn get_total_pools(ctx: Context<FactoryView>) -> Result<u64> {
        handle_get_total_pools(ctx)
    }

    /// Pool registered at `index` by the factory
    pub fn get_pool_at_index(ctx: Context<PoolAtIndex>, index: u64) -> Result<Pubkey> {
        handle_get_pool_at_index(ctx, index)
    }
}
