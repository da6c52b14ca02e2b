use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::*;

/**
 * Account context for single-user XP ledger edits
 *
 * Shared by add_user, update_user_xp, penalize_user and remove_user. XP
 * weights are medium independent and keyed under the null mint.
 *
 * Access Control: Factory admins only, pool must be inactive
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct ManageUser<'info> {
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

    /// The user's XP entry
    /// - Derived from: ["allocation", pool, user, null mint]
    /// - Created on first add; edits on a missing entry fail and revert the creation
    #[account(
        init_if_needed,
        payer = admin,
        space = Allocation::LEN,
        seeds = [
            ALLOCATION_SEED.as_bytes(),
            pool.key().as_ref(),
            user.as_ref(),
            Pubkey::default().as_ref()
        ],
        bump
    )]
    pub allocation: Box<Account<'info, Allocation>>,

    /// Next enumeration entry, ["recipient_index", pool, pool.total_users]
    /// CHECK: only written by add_user when the user was never indexed; address checked then
    #[account(mut)]
    pub recipient_index: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = factory.is_admin(&admin.key()) @ RewardPoolError::NotAdmin
    )]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> ManageUser<'info> {
    fn bind_allocation(&mut self, user: Pubkey, bump: u8) {
        if self.allocation.pool == Pubkey::default() {
            **self.allocation = Allocation::vacant(self.pool.key(), user, Pubkey::default(), bump);
        }
    }
}

/// Adds a user with `xp` weight. Zero is allowed and still counts as present.
pub fn handle_add_user(ctx: Context<ManageUser>, user: Pubkey, xp: u64) -> Result<()> {
    require!(user != Pubkey::default(), RewardPoolError::InvalidRecipient);
    ctx.accounts.pool.ensure_inactive()?;
    ctx.accounts.bind_allocation(user, ctx.bumps.allocation);

    let pool_key = ctx.accounts.pool.key();
    let pool = &mut ctx.accounts.pool;
    let allocation = &mut ctx.accounts.allocation;

    let needs_index = add_entry(allocation, &mut pool.total_weight, xp)?;
    if needs_index {
        append_recipient_index(
            pool,
            &pool_key,
            &ctx.accounts.recipient_index.to_account_info(),
            &ctx.accounts.admin.to_account_info(),
            &ctx.accounts.system_program.to_account_info(),
            user,
            Pubkey::default(),
        )?;
    }

    emit_cpi!(AllocationChanged {
        pool: pool_key,
        recipient: user,
        mint: Pubkey::default(),
        old_amount: 0,
        new_amount: xp,
        total: pool.total_weight,
    });

    Ok(())
}

/// Replaces a user's XP. Zero clears presence but keeps the enumeration entry.
pub fn handle_update_user_xp(ctx: Context<ManageUser>, user: Pubkey, xp: u64) -> Result<()> {
    ctx.accounts.pool.ensure_inactive()?;
    ctx.accounts.bind_allocation(user, ctx.bumps.allocation);

    let pool = &mut ctx.accounts.pool;
    let allocation = &mut ctx.accounts.allocation;
    let old_amount = update_entry(allocation, &mut pool.total_weight, xp)?;

    emit_cpi!(AllocationChanged {
        pool: pool.key(),
        recipient: user,
        mint: Pubkey::default(),
        old_amount,
        new_amount: xp,
        total: pool.total_weight,
    });

    Ok(())
}

/// Subtracts `penalty` XP, saturating at zero
pub fn handle_penalize_user(ctx: Context<ManageUser>, user: Pubkey, penalty: u64) -> Result<()> {
    require!(penalty > 0, RewardPoolError::InvalidAmount);
    ctx.accounts.pool.ensure_inactive()?;
    ctx.accounts.bind_allocation(user, ctx.bumps.allocation);

    let pool = &mut ctx.accounts.pool;
    let allocation = &mut ctx.accounts.allocation;
    let old_amount = allocation.amount;
    let new_amount = penalize_entry(allocation, &mut pool.total_weight, penalty)?;

    emit_cpi!(AllocationChanged {
        pool: pool.key(),
        recipient: user,
        mint: Pubkey::default(),
        old_amount,
        new_amount,
        total: pool.total_weight,
    });

    Ok(())
}

/// Zeroes a user's XP and clears presence
pub fn handle_remove_user(ctx: Context<ManageUser>, user: Pubkey) -> Result<()> {
    ctx.accounts.pool.ensure_inactive()?;
    ctx.accounts.bind_allocation(user, ctx.bumps.allocation);

    let pool = &mut ctx.accounts.pool;
    let allocation = &mut ctx.accounts.allocation;
    let old_amount = remove_entry(allocation, &mut pool.total_weight)?;

    emit_cpi!(AllocationChanged {
        pool: pool.key(),
        recipient: user,
        mint: Pubkey::default(),
        old_amount,
        new_amount: 0,
        total: pool.total_weight,
    });

    Ok(())
}
