use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;

/**
 * Account context for creating an XP pool
 *
 * Pool ids are assigned sequentially from the factory counter.
 *
 * Access Control: Factory admins only
 */
#[event_cpi]
#[derive(Accounts)]
pub struct CreateXpPool<'info> {
    #[account(
        mut,
        seeds = [FACTORY_SEED.as_bytes()],
        bump = factory.bump
    )]
    pub factory: Box<Account<'info, Factory>>,

    /// The new pool (PDA)
    /// - Derived from: ["xp_pool", factory, xp_pool_count]
    #[account(
        init,
        payer = admin,
        space = RewardPool::LEN,
        seeds = [
            XP_POOL_SEED.as_bytes(),
            factory.key().as_ref(),
            factory.xp_pool_count.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub pool: Box<Account<'info, RewardPool>>,

    /// Registry slot of the new pool
    /// - Derived from: ["pool_registry", factory, total_pools]
    #[account(
        init,
        payer = admin,
        space = PoolRegistryEntry::LEN,
        seeds = [
            POOL_REGISTRY_SEED.as_bytes(),
            factory.key().as_ref(),
            factory.total_pools.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub registry_entry: Box<Account<'info, PoolRegistryEntry>>,

    #[account(
        mut,
        constraint = factory.is_admin(&admin.key()) @ RewardPoolError::NotAdmin
    )]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/**
 * Creates an XP pool charging the factory default fee
 *
 * @returns the new pool id
 */
pub fn handle_create_xp_pool(
    ctx: Context<CreateXpPool>,
    name: String,
    description: String,
) -> Result<u64> {
    validate_metadata(&name, &description)?;

    let factory = &mut ctx.accounts.factory;
    require!(
        factory.protocol_fee_recipient != Pubkey::default(),
        RewardPoolError::InvalidFeeRecipient
    );

    let pool_id = factory.xp_pool_count;
    factory.xp_pool_count = pool_id
        .checked_add(1)
        .ok_or(RewardPoolError::ArithmeticOverflow)?;
    let registry_index = factory.register_pool()?;

    let pool = &mut ctx.accounts.pool;
    pool.bump = ctx.bumps.pool;
    pool.kind = PoolKind::Xp;
    pool.factory = factory.key();
    pool.pool_id = pool_id;
    pool.name = name;
    pool.description = description;
    pool.protocol_fee_bps = factory.default_fee_bps;
    pool.protocol_fee_recipient = factory.protocol_fee_recipient;
    pool.created_at = Clock::get()?.unix_timestamp;
    // Note: active, total_weight and total_users start at their defaults

    let entry = &mut ctx.accounts.registry_entry;
    entry.bump = ctx.bumps.registry_entry;
    entry.factory = factory.key();
    entry.index = registry_index;
    entry.pool = pool.key();

    emit_cpi!(PoolCreated {
        pool: pool.key(),
        kind: PoolKind::Xp,
        pool_id,
        registry_index,
        creator: Pubkey::default(),
        name: pool.name.clone(),
        protocol_fee_bps: pool.protocol_fee_bps,
        protocol_fee_recipient: pool.protocol_fee_recipient,
    });

    Ok(pool_id)
}

/**
 * Account context for creating a creator pool
 *
 * The PDA is keyed by the creator, so a second pool for the same creator
 * fails at account initialization.
 *
 * Access Control: Factory admins only
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(creator: Pubkey)]
pub struct CreateCreatorPool<'info> {
    #[account(
        mut,
        seeds = [FACTORY_SEED.as_bytes()],
        bump = factory.bump
    )]
    pub factory: Box<Account<'info, Factory>>,

    /// The new pool (PDA)
    /// - Derived from: ["creator_pool", factory, creator]
    #[account(
        init,
        payer = admin,
        space = RewardPool::LEN,
        seeds = [
            CREATOR_POOL_SEED.as_bytes(),
            factory.key().as_ref(),
            creator.as_ref()
        ],
        bump
    )]
    pub pool: Box<Account<'info, RewardPool>>,

    /// Registry slot of the new pool
    /// - Derived from: ["pool_registry", factory, total_pools]
    #[account(
        init,
        payer = admin,
        space = PoolRegistryEntry::LEN,
        seeds = [
            POOL_REGISTRY_SEED.as_bytes(),
            factory.key().as_ref(),
            factory.total_pools.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub registry_entry: Box<Account<'info, PoolRegistryEntry>>,

    #[account(
        mut,
        constraint = factory.is_admin(&admin.key()) @ RewardPoolError::NotAdmin
    )]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// How the fee of a new creator pool is chosen
pub enum CreatorPoolFee {
    /// DEFAULT_PROTOCOL_FEE_BPS
    Default,
    /// No fee; the fee recipient may be unset
    Zero,
    /// Caller supplied, 0..=MAX_PROTOCOL_FEE_BPS
    Custom(u16),
}

/**
 * Creates a creator pool
 *
 * @param creator - Identity the pool belongs to (one pool per creator)
 * @param fee - Fee variant; every variant but Zero requires the factory fee recipient to be set
 *
 * @returns the new pool address
 */
pub fn handle_create_creator_pool(
    ctx: Context<CreateCreatorPool>,
    creator: Pubkey,
    name: String,
    description: String,
    fee: CreatorPoolFee,
) -> Result<Pubkey> {
    require!(creator != Pubkey::default(), RewardPoolError::InvalidRecipient);
    validate_metadata(&name, &description)?;

    let factory = &mut ctx.accounts.factory;
    let protocol_fee_bps = match fee {
        CreatorPoolFee::Default => DEFAULT_PROTOCOL_FEE_BPS,
        CreatorPoolFee::Zero => 0,
        CreatorPoolFee::Custom(fee_bps) => {
            validate_fee_bps(fee_bps)?;
            fee_bps
        }
    };
    if !matches!(fee, CreatorPoolFee::Zero) {
        require!(
            factory.protocol_fee_recipient != Pubkey::default(),
            RewardPoolError::InvalidFeeRecipient
        );
    }

    factory.creator_pool_count = factory
        .creator_pool_count
        .checked_add(1)
        .ok_or(RewardPoolError::ArithmeticOverflow)?;
    let registry_index = factory.register_pool()?;

    let pool = &mut ctx.accounts.pool;
    pool.bump = ctx.bumps.pool;
    pool.kind = PoolKind::Creator;
    pool.factory = factory.key();
    pool.creator = creator;
    pool.name = name;
    pool.description = description;
    pool.protocol_fee_bps = protocol_fee_bps;
    pool.protocol_fee_recipient = factory.protocol_fee_recipient;
    pool.created_at = Clock::get()?.unix_timestamp;

    let pool_key = pool.key();
    let entry = &mut ctx.accounts.registry_entry;
    entry.bump = ctx.bumps.registry_entry;
    entry.factory = factory.key();
    entry.index = registry_index;
    entry.pool = pool_key;

    emit_cpi!(PoolCreated {
        pool: pool_key,
        kind: PoolKind::Creator,
        pool_id: 0,
        registry_index,
        creator,
        name: pool.name.clone(),
        protocol_fee_bps,
        protocol_fee_recipient: pool.protocol_fee_recipient,
    });

    Ok(pool_key)
}
