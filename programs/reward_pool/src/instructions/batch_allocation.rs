use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::*;

/**
 * Batch ledger administration
 *
 * Recipients and amounts arrive as parallel arrays; the per-entry accounts
 * arrive in `remaining_accounts`:
 * - adds: [allocation_0, index_0, allocation_1, index_1, ...]
 *   index_i must be the next unused ["recipient_index", pool, n] PDA for
 *   entries that were never indexed, and is ignored otherwise
 * - updates and penalties: [allocation_0, allocation_1, ...]
 *
 * Every entry is loaded and mutated in memory first; accounts are created
 * and written only after the whole batch validated. There is no length cap:
 * see SAFE_BATCH_ADD_SIZE / SAFE_BATCH_UPDATE_SIZE and split larger lists.
 *
 * Access Control: Factory admins only, pool must be inactive
 */
#[event_cpi]
#[derive(Accounts)]
pub struct BatchUsers<'info> {
    #[account(
        seeds = [FACTORY_SEED.as_bytes()],
        bump = factory.bump
    )]
    pub factory: Box<Account<'info, Factory>>,

    #[account(
        mut,
        has_one = factory @ RewardPoolError::FactoryMismatch,
        constraint = pool.kind == PoolKind::Xp @ RewardPoolError::WrongPoolKind
    )]
    pub pool: Box<Account<'info, RewardPool>>,

    #[account(
        mut,
        constraint = factory.is_admin(&admin.key()) @ RewardPoolError::NotAdmin
    )]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event_cpi]
#[derive(Accounts)]
#[instruction(mint: Pubkey)]
pub struct BatchRecipients<'info> {
    #[account(
        seeds = [FACTORY_SEED.as_bytes()],
        bump = factory.bump
    )]
    pub factory: Box<Account<'info, Factory>>,

    #[account(
        mut,
        has_one = factory @ RewardPoolError::FactoryMismatch,
        constraint = pool.kind == PoolKind::Creator @ RewardPoolError::WrongPoolKind
    )]
    pub pool: Box<Account<'info, RewardPool>>,

    /// - Derived from: ["medium", pool, mint]
    #[account(
        init_if_needed,
        payer = admin,
        space = MediumState::LEN,
        seeds = [MEDIUM_SEED.as_bytes(), pool.key().as_ref(), mint.as_ref()],
        bump
    )]
    pub medium: Box<Account<'info, MediumState>>,

    #[account(
        mut,
        constraint = factory.is_admin(&admin.key()) @ RewardPoolError::NotAdmin
    )]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Accounts a batch run needs besides the entries themselves
struct BatchAccounts<'a, 'info> {
    pool: &'a mut RewardPool,
    pool_key: Pubkey,
    payer: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
}

/// Loads, applies and writes one batch. `total` is the aggregate the
/// entries feed (pool.total_weight or medium.total_allocated).
fn run_batch<'info>(
    accounts: BatchAccounts<'_, 'info>,
    remaining: &[AccountInfo<'info>],
    op: BatchOp,
    mint: Pubkey,
    recipients: &[Pubkey],
    amounts: &[u64],
    total: &mut u64,
) -> Result<()> {
    let BatchAccounts { pool, pool_key, payer, system_program } = accounts;
    pool.ensure_inactive()?;

    let stride = if op == BatchOp::Add { 2 } else { 1 };
    require!(
        remaining.len() == recipients.len() * stride,
        RewardPoolError::InvalidRemainingAccounts
    );

    // ===== LOAD =====
    let mut entries = Vec::with_capacity(recipients.len());
    let mut bumps = Vec::with_capacity(recipients.len());
    for (i, recipient) in recipients.iter().enumerate() {
        let info = &remaining[i * stride];
        let bump = expect_pda(
            info,
            &[ALLOCATION_SEED.as_bytes(), pool_key.as_ref(), recipient.as_ref(), mint.as_ref()],
        )?;
        let entry = load_optional::<Allocation>(info)?
            .unwrap_or_else(|| Allocation::vacant(pool_key, *recipient, mint, bump));
        entries.push(entry);
        bumps.push(bump);
    }

    // ===== APPLY (all or nothing) =====
    let needs_index = apply_batch(op, &mut entries, amounts, total)?;

    let mut next_index = pool.total_users;
    for (i, _) in needs_index.iter().enumerate().filter(|(_, needed)| **needed) {
        expect_pda(
            &remaining[i * stride + 1],
            &[RECIPIENT_INDEX_SEED.as_bytes(), pool_key.as_ref(), &next_index.to_le_bytes()],
        )?;
        next_index = next_index
            .checked_add(1)
            .ok_or(RewardPoolError::ArithmeticOverflow)?;
    }

    // ===== WRITE =====
    for (i, entry) in entries.iter().enumerate() {
        let info = &remaining[i * stride];
        if info.data_is_empty() {
            create_pda_account(
                &payer,
                info,
                &system_program,
                &[
                    ALLOCATION_SEED.as_bytes(),
                    pool_key.as_ref(),
                    entry.recipient.as_ref(),
                    mint.as_ref(),
                    &[bumps[i]],
                ],
                Allocation::LEN,
            )?;
        }
        if needs_index[i] {
            append_recipient_index(
                pool,
                &pool_key,
                &remaining[i * stride + 1],
                &payer,
                &system_program,
                entry.recipient,
                mint,
            )?;
        }
        store(info, entry)?;
    }

    msg!(
        "Batch {:?}: {} entries, total now {}",
        op,
        entries.len(),
        *total
    );
    Ok(())
}

fn batch_op_code(op: BatchOp) -> u8 {
    match op {
        BatchOp::Add => 0,
        BatchOp::Update => 1,
        BatchOp::Penalize => 2,
    }
}

fn run_user_batch<'info>(
    ctx: Context<'_, '_, '_, 'info, BatchUsers<'info>>,
    op: BatchOp,
    users: Vec<Pubkey>,
    amounts: Vec<u64>,
) -> Result<()> {
    // XP batches never carry zero values
    validate_batch(&users, &amounts, true)?;

    let pool_key = ctx.accounts.pool.key();
    let payer = ctx.accounts.admin.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    let pool: &mut RewardPool = &mut ctx.accounts.pool;
    let mut total = pool.total_weight;

    run_batch(
        BatchAccounts { pool: &mut *pool, pool_key, payer, system_program },
        ctx.remaining_accounts,
        op,
        Pubkey::default(),
        &users,
        &amounts,
        &mut total,
    )?;
    pool.total_weight = total;

    emit_cpi!(BatchProcessed {
        pool: pool_key,
        mint: Pubkey::default(),
        operation: batch_op_code(op),
        count: users.len() as u32,
        total,
    });

    Ok(())
}

/// Adds many users with non-zero XP
pub fn handle_batch_add_users<'info>(
    ctx: Context<'_, '_, '_, 'info, BatchUsers<'info>>,
    users: Vec<Pubkey>,
    xps: Vec<u64>,
) -> Result<()> {
    run_user_batch(ctx, BatchOp::Add, users, xps)
}

/// Replaces the XP of many existing users; any non-member fails the batch with UserNotInPool
pub fn handle_batch_update_user_xp<'info>(
    ctx: Context<'_, '_, '_, 'info, BatchUsers<'info>>,
    users: Vec<Pubkey>,
    xps: Vec<u64>,
) -> Result<()> {
    run_user_batch(ctx, BatchOp::Update, users, xps)
}

/// Subtracts XP from many existing users, saturating at zero
pub fn handle_batch_penalize_users<'info>(
    ctx: Context<'_, '_, '_, 'info, BatchUsers<'info>>,
    users: Vec<Pubkey>,
    penalties: Vec<u64>,
) -> Result<()> {
    run_user_batch(ctx, BatchOp::Penalize, users, penalties)
}

/// Adds many absolute allocations for one medium of a creator pool.
/// Zero amounts are allowed, as for add_recipient.
pub fn handle_batch_add_recipients<'info>(
    ctx: Context<'_, '_, '_, 'info, BatchRecipients<'info>>,
    mint: Pubkey,
    kind: TokenKind,
    recipients: Vec<Pubkey>,
    amounts: Vec<u64>,
) -> Result<()> {
    require!(is_valid_medium(&mint, kind), RewardPoolError::InvalidTokenType);
    validate_batch(&recipients, &amounts, false)?;

    let pool_key = ctx.accounts.pool.key();
    let medium = &mut ctx.accounts.medium;
    if medium.pool == Pubkey::default() {
        medium.bump = ctx.bumps.medium;
        medium.pool = pool_key;
        medium.mint = mint;
        medium.kind = kind;
    }
    require!(medium.kind == kind, RewardPoolError::InvalidTokenType);

    let payer = ctx.accounts.admin.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    let mut total = medium.total_allocated;

    run_batch(
        BatchAccounts { pool: &mut ctx.accounts.pool, pool_key, payer, system_program },
        ctx.remaining_accounts,
        BatchOp::Add,
        mint,
        &recipients,
        &amounts,
        &mut total,
    )?;
    medium.total_allocated = total;

    emit_cpi!(BatchProcessed {
        pool: pool_key,
        mint,
        operation: batch_op_code(BatchOp::Add),
        count: recipients.len() as u32,
        total,
    });

    Ok(())
}
