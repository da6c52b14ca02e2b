use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;
use crate::constants::*;
use crate::error::*;
use crate::state::*;
use crate::utils::*;

/**
 * Read-only queries
 *
 * Every view returns its value as Anchor return data and may be simulated
 * by anyone. Accounts that were never created read as their defaults, so a
 * query about an unknown recipient or medium answers zero / false instead
 * of failing.
 */

/// Per-medium accounting of a pool
#[derive(Accounts)]
#[instruction(mint: Pubkey)]
pub struct MediumView<'info> {
    pub pool: Box<Account<'info, RewardPool>>,

    /// CHECK: address is constrained by seeds; may be empty
    #[account(
        seeds = [MEDIUM_SEED.as_bytes(), pool.key().as_ref(), mint.as_ref()],
        bump
    )]
    pub medium: UncheckedAccount<'info>,

    /// Only read for token media
    #[account(
        seeds = [VAULT_SEED.as_bytes(), pool.key().as_ref(), mint.as_ref()],
        bump
    )]
    pub token_vault: Option<InterfaceAccount<'info, TokenAccount>>,
}

impl<'info> MediumView<'info> {
    fn medium(&self) -> Result<MediumState> {
        Ok(load_optional::<MediumState>(&self.medium.to_account_info())?.unwrap_or_default())
    }

    fn live_balance(&self, mint: &Pubkey, kind: TokenKind) -> Result<u64> {
        require!(is_valid_medium(mint, kind), RewardPoolError::InvalidTokenType);
        match kind {
            TokenKind::Native => native_balance(&self.pool.to_account_info()),
            TokenKind::Token => Ok(self.token_vault.as_ref().map_or(0, |vault| vault.amount)),
        }
    }
}

pub fn handle_get_snapshot_amount(ctx: Context<MediumView>, _mint: Pubkey) -> Result<u64> {
    Ok(ctx.accounts.medium()?.snapshot_amount)
}

/// Gross amount paid out for the medium
pub fn handle_get_total_claimed(ctx: Context<MediumView>, _mint: Pubkey) -> Result<u64> {
    Ok(ctx.accounts.medium()?.total_claimed)
}

pub fn handle_get_protocol_fees_claimed(ctx: Context<MediumView>, _mint: Pubkey) -> Result<u64> {
    Ok(ctx.accounts.medium()?.protocol_fees_claimed)
}

/// Live balance of the medium, snapshotted or not
pub fn handle_get_available_rewards(
    ctx: Context<MediumView>,
    mint: Pubkey,
    kind: TokenKind,
) -> Result<u64> {
    ctx.accounts.live_balance(&mint, kind)
}

/// Live balance plus everything already paid out
pub fn handle_get_total_rewards(
    ctx: Context<MediumView>,
    mint: Pubkey,
    kind: TokenKind,
) -> Result<u64> {
    let available = ctx.accounts.live_balance(&mint, kind)?;
    let claimed = ctx.accounts.medium()?.total_claimed;
    Ok(available
        .checked_add(claimed)
        .ok_or(RewardPoolError::ArithmeticOverflow)?)
}

/// Everything the eligibility check reads for one (recipient, medium)
#[derive(Accounts)]
#[instruction(recipient: Pubkey, mint: Pubkey)]
pub struct EligibilityView<'info> {
    pub pool: Box<Account<'info, RewardPool>>,

    /// CHECK: address is constrained by seeds; may be empty
    #[account(
        seeds = [MEDIUM_SEED.as_bytes(), pool.key().as_ref(), mint.as_ref()],
        bump
    )]
    pub medium: UncheckedAccount<'info>,

    /// CHECK: address is verified in the handler against the pool kind; may be empty
    pub allocation: UncheckedAccount<'info>,

    /// CHECK: address is constrained by seeds; may be empty
    #[account(
        seeds = [CLAIM_SEED.as_bytes(), pool.key().as_ref(), recipient.as_ref(), mint.as_ref()],
        bump
    )]
    pub claim_record: UncheckedAccount<'info>,
}

/// Returns (eligible, gross, fee); any ineligibility reads as (false, 0, 0)
pub fn handle_check_claim_eligibility(
    ctx: Context<EligibilityView>,
    recipient: Pubkey,
    mint: Pubkey,
    kind: TokenKind,
) -> Result<ClaimEligibility> {
    let pool = &ctx.accounts.pool;
    let allocation_info = ctx.accounts.allocation.to_account_info();
    let allocation_mint = pool.allocation_mint(&mint);
    expect_pda(
        &allocation_info,
        &[
            ALLOCATION_SEED.as_bytes(),
            pool.key().as_ref(),
            recipient.as_ref(),
            allocation_mint.as_ref(),
        ],
    )?;

    let medium = load_optional::<MediumState>(&ctx.accounts.medium.to_account_info())?;
    let allocation = load_optional::<Allocation>(&allocation_info)?;
    let claim_record = load_optional::<ClaimRecord>(&ctx.accounts.claim_record.to_account_info())?;

    Ok(check_eligibility(&ClaimContext {
        pool,
        medium: medium.as_ref(),
        allocation: allocation.as_ref(),
        already_claimed: claim_record.map_or(false, |record| record.claimed),
        mint,
        kind,
    }))
}

#[derive(Accounts)]
#[instruction(recipient: Pubkey, mint: Pubkey)]
pub struct ClaimRecordView<'info> {
    pub pool: Box<Account<'info, RewardPool>>,

    /// CHECK: address is constrained by seeds; may be empty
    #[account(
        seeds = [CLAIM_SEED.as_bytes(), pool.key().as_ref(), recipient.as_ref(), mint.as_ref()],
        bump
    )]
    pub claim_record: UncheckedAccount<'info>,
}

pub fn handle_has_claimed(ctx: Context<ClaimRecordView>, _recipient: Pubkey, _mint: Pubkey) -> Result<bool> {
    let record = load_optional::<ClaimRecord>(&ctx.accounts.claim_record.to_account_info())?;
    Ok(record.map_or(false, |record| record.claimed))
}

#[derive(Accounts)]
#[instruction(recipient: Pubkey)]
pub struct UserNonceView<'info> {
    pub pool: Box<Account<'info, RewardPool>>,

    /// CHECK: address is constrained by seeds; may be empty
    #[account(
        seeds = [USER_NONCE_SEED.as_bytes(), pool.key().as_ref(), recipient.as_ref()],
        bump
    )]
    pub user_nonce: UncheckedAccount<'info>,
}

impl<'info> UserNonceView<'info> {
    fn user_nonce(&self) -> Result<UserNonce> {
        Ok(load_optional::<UserNonce>(&self.user_nonce.to_account_info())?.unwrap_or_default())
    }
}

/// Highest nonce consumed by the recipient so far
pub fn handle_get_user_nonce_counter(ctx: Context<UserNonceView>, _recipient: Pubkey) -> Result<u64> {
    Ok(ctx.accounts.user_nonce()?.counter)
}

pub fn handle_get_next_nonce(ctx: Context<UserNonceView>, _recipient: Pubkey) -> Result<u64> {
    Ok(ctx.accounts.user_nonce()?.next_nonce())
}

#[derive(Accounts)]
#[instruction(recipient: Pubkey, nonce: u64)]
pub struct NonceRecordView<'info> {
    pub pool: Box<Account<'info, RewardPool>>,

    /// CHECK: address is constrained by seeds; may be empty
    #[account(
        seeds = [
            NONCE_SEED.as_bytes(),
            pool.key().as_ref(),
            recipient.as_ref(),
            nonce.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub nonce_record: UncheckedAccount<'info>,
}

pub fn handle_is_nonce_used(ctx: Context<NonceRecordView>, _recipient: Pubkey, _nonce: u64) -> Result<bool> {
    let record = load_optional::<NonceRecord>(&ctx.accounts.nonce_record.to_account_info())?;
    Ok(record.map_or(false, |record| record.used))
}

#[derive(Accounts)]
pub struct PoolView<'info> {
    pub pool: Box<Account<'info, RewardPool>>,
}

/// Number of enumeration entries, tombstones included
pub fn handle_get_total_users(ctx: Context<PoolView>) -> Result<u64> {
    Ok(ctx.accounts.pool.total_users)
}

#[derive(Accounts)]
#[instruction(index: u64)]
pub struct RecipientAtIndex<'info> {
    pub pool: Box<Account<'info, RewardPool>>,

    #[account(
        seeds = [RECIPIENT_INDEX_SEED.as_bytes(), pool.key().as_ref(), index.to_le_bytes().as_ref()],
        bump = recipient_index.bump
    )]
    pub recipient_index: Account<'info, RecipientIndex>,
}

/// Recipient enumerated at `index`; a removed recipient keeps its slot
pub fn handle_get_user_at_index(ctx: Context<RecipientAtIndex>, index: u64) -> Result<Pubkey> {
    require!(index < ctx.accounts.pool.total_users, RewardPoolError::NotPresent);
    Ok(ctx.accounts.recipient_index.recipient)
}

#[derive(Accounts)]
pub struct FactoryView<'info> {
    #[account(
        seeds = [FACTORY_SEED.as_bytes()],
        bump = factory.bump
    )]
    pub factory: Box<Account<'info, Factory>>,
}

/// Registry length; every pool sits at an index below it
pub fn handle_get_total_pools(ctx: Context<FactoryView>) -> Result<u64> {
    Ok(ctx.accounts.factory.total_pools)
}

#[derive(Accounts)]
#[instruction(index: u64)]
pub struct PoolAtIndex<'info> {
    #[account(
        seeds = [FACTORY_SEED.as_bytes()],
        bump = factory.bump
    )]
    pub factory: Box<Account<'info, Factory>>,

    #[account(
        seeds = [POOL_REGISTRY_SEED.as_bytes(), factory.key().as_ref(), index.to_le_bytes().as_ref()],
        bump = registry_entry.bump
    )]
    pub registry_entry: Account<'info, PoolRegistryEntry>,
}

pub fn handle_get_pool_at_index(ctx: Context<PoolAtIndex>, index: u64) -> Result<Pubkey> {
    require!(index < ctx.accounts.factory.total_pools, RewardPoolError::InvalidPoolRange);
    Ok(ctx.accounts.registry_entry.pool)
}
