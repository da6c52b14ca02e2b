use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::*;

/**
 * Account context for single-recipient creator pool ledger edits
 *
 * Shared by add_recipient, update_recipient_allocation and remove_recipient.
 * Creator allocations are absolute amounts per (recipient, medium); the
 * medium's total_allocated tracks their sum.
 *
 * Access Control: Factory admins only, pool must be inactive
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(recipient: Pubkey, mint: Pubkey)]
pub struct ManageRecipient<'info> {
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

    /// Medium accounting, created with the first allocation for this mint
    /// - Derived from: ["medium", pool, mint]
    #[account(
        init_if_needed,
        payer = admin,
        space = MediumState::LEN,
        seeds = [MEDIUM_SEED.as_bytes(), pool.key().as_ref(), mint.as_ref()],
        bump
    )]
    pub medium: Box<Account<'info, MediumState>>,

    /// - Derived from: ["allocation", pool, recipient, mint]
    #[account(
        init_if_needed,
        payer = admin,
        space = Allocation::LEN,
        seeds = [
            ALLOCATION_SEED.as_bytes(),
            pool.key().as_ref(),
            recipient.as_ref(),
            mint.as_ref()
        ],
        bump
    )]
    pub allocation: Box<Account<'info, Allocation>>,

    /// Next enumeration entry, ["recipient_index", pool, pool.total_users]
    /// CHECK: only written by add_recipient for a never-indexed entry; address checked then
    #[account(mut)]
    pub recipient_index: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = factory.is_admin(&admin.key()) @ RewardPoolError::NotAdmin
    )]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> ManageRecipient<'info> {
    /// Validates the medium pairing and fills in freshly created accounts
    fn bind(&mut self, recipient: Pubkey, mint: Pubkey, kind: TokenKind, bumps: &ManageRecipientBumps) -> Result<()> {
        require!(is_valid_medium(&mint, kind), RewardPoolError::InvalidTokenType);
        self.pool.ensure_inactive()?;

        let pool_key = self.pool.key();
        if self.medium.pool == Pubkey::default() {
            self.medium.bump = bumps.medium;
            self.medium.pool = pool_key;
            self.medium.mint = mint;
            self.medium.kind = kind;
        }
        require!(self.medium.kind == kind, RewardPoolError::InvalidTokenType);

        if self.allocation.pool == Pubkey::default() {
            **self.allocation = Allocation::vacant(pool_key, recipient, mint, bumps.allocation);
        }
        Ok(())
    }
}

/// Adds an absolute allocation for (recipient, medium)
pub fn handle_add_recipient(
    ctx: Context<ManageRecipient>,
    recipient: Pubkey,
    mint: Pubkey,
    kind: TokenKind,
    amount: u64,
) -> Result<()> {
    require!(recipient != Pubkey::default(), RewardPoolError::InvalidRecipient);
    ctx.accounts.bind(recipient, mint, kind, &ctx.bumps)?;

    let pool_key = ctx.accounts.pool.key();
    let medium = &mut ctx.accounts.medium;
    let allocation = &mut ctx.accounts.allocation;

    let needs_index = add_entry(allocation, &mut medium.total_allocated, amount)?;
    if needs_index {
        append_recipient_index(
            &mut ctx.accounts.pool,
            &pool_key,
            &ctx.accounts.recipient_index.to_account_info(),
            &ctx.accounts.admin.to_account_info(),
            &ctx.accounts.system_program.to_account_info(),
            recipient,
            mint,
        )?;
    }

    emit_cpi!(AllocationChanged {
        pool: pool_key,
        recipient,
        mint,
        old_amount: 0,
        new_amount: amount,
        total: medium.total_allocated,
    });

    Ok(())
}

/// Replaces an allocation. Zero clears presence but keeps the enumeration entry.
pub fn handle_update_recipient_allocation(
    ctx: Context<ManageRecipient>,
    recipient: Pubkey,
    mint: Pubkey,
    kind: TokenKind,
    amount: u64,
) -> Result<()> {
    ctx.accounts.bind(recipient, mint, kind, &ctx.bumps)?;

    let medium = &mut ctx.accounts.medium;
    let allocation = &mut ctx.accounts.allocation;
    let old_amount = update_entry(allocation, &mut medium.total_allocated, amount)?;

    emit_cpi!(AllocationChanged {
        pool: ctx.accounts.pool.key(),
        recipient,
        mint,
        old_amount,
        new_amount: amount,
        total: medium.total_allocated,
    });

    Ok(())
}

/// Zeroes an allocation and clears presence
pub fn handle_remove_recipient(
    ctx: Context<ManageRecipient>,
    recipient: Pubkey,
    mint: Pubkey,
    kind: TokenKind,
) -> Result<()> {
    ctx.accounts.bind(recipient, mint, kind, &ctx.bumps)?;

    let medium = &mut ctx.accounts.medium;
    let allocation = &mut ctx.accounts.allocation;
    let old_amount = remove_entry(allocation, &mut medium.total_allocated)?;

    emit_cpi!(AllocationChanged {
        pool: ctx.accounts.pool.key(),
        recipient,
        mint,
        old_amount,
        new_amount: 0,
        total: medium.total_allocated,
    });

    Ok(())
}
