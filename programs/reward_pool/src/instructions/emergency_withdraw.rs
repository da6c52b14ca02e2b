use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::{transfer_native, transfer_token};

/**
 * Account context for an emergency withdrawal
 *
 * Moves funds of one medium out of an inactive pool. Snapshots are left
 * untouched; retake them before reactivating if the pool keeps paying out.
 *
 * The token accounts are only required for token media and are omitted for
 * native withdrawals.
 *
 * Access Control: Factory admins only, pool must be inactive
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(mint: Pubkey)]
pub struct EmergencyWithdraw<'info> {
    #[account(
        seeds = [FACTORY_SEED.as_bytes()],
        bump = factory.bump
    )]
    pub factory: Box<Account<'info, Factory>>,

    #[account(
        mut,
        has_one = factory @ RewardPoolError::FactoryMismatch
    )]
    pub pool: Box<Account<'info, RewardPool>>,

    /// Receives lamports directly, or owns `destination_token_account`
    /// CHECK: any account may receive a withdrawal chosen by an admin
    #[account(mut)]
    pub destination: UncheckedAccount<'info>,

    /// - Derived from: ["vault", pool, mint]
    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), pool.key().as_ref(), mint.as_ref()],
        bump
    )]
    pub token_vault: Option<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = destination_token_account.mint == mint @ RewardPoolError::TokenAccountMismatch,
        constraint = destination_token_account.owner == destination.key() @ RewardPoolError::TokenAccountMismatch
    )]
    pub destination_token_account: Option<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = mint @ RewardPoolError::TokenAccountMismatch)]
    pub token_mint: Option<InterfaceAccount<'info, Mint>>,

    #[account(
        constraint = factory.is_admin(&admin.key()) @ RewardPoolError::NotAdmin
    )]
    pub admin: Signer<'info>,

    pub token_program: Option<Interface<'info, TokenInterface>>,
}

pub fn handle_emergency_withdraw(
    ctx: Context<EmergencyWithdraw>,
    mint: Pubkey,
    kind: TokenKind,
    amount: u64,
) -> Result<()> {
    // ===== VALIDATION PHASE =====
    require!(amount > 0, RewardPoolError::InvalidAmount);
    require!(is_valid_medium(&mint, kind), RewardPoolError::InvalidTokenType);
    ctx.accounts.pool.ensure_inactive()?;

    // ===== INTERACTIONS PHASE =====
    match kind {
        TokenKind::Native => {
            transfer_native(
                &ctx.accounts.pool.to_account_info(),
                &ctx.accounts.destination.to_account_info(),
                amount,
            )?;
        }
        TokenKind::Token => {
            let (Some(vault), Some(destination_token_account), Some(token_mint), Some(token_program)) = (
                ctx.accounts.token_vault.as_ref(),
                ctx.accounts.destination_token_account.as_ref(),
                ctx.accounts.token_mint.as_ref(),
                ctx.accounts.token_program.as_ref(),
            ) else {
                return err!(RewardPoolError::TokenAccountMismatch);
            };
            require!(vault.amount >= amount, RewardPoolError::InsufficientRewards);

            let pool = &ctx.accounts.pool;
            pool.with_signer_seeds(|signer| {
                transfer_token(
                    pool.to_account_info(),
                    vault.to_account_info(),
                    destination_token_account.to_account_info(),
                    token_mint.to_account_info(),
                    token_program.to_account_info(),
                    amount,
                    token_mint.decimals,
                    signer,
                )
            })?;
        }
    }

    msg!("Emergency withdrawal of {} from pool {}", amount, ctx.accounts.pool.key());

    emit_cpi!(EmergencyWithdrawal {
        pool: ctx.accounts.pool.key(),
        mint,
        kind,
        destination: ctx.accounts.destination.key(),
        amount,
    });

    Ok(())
}
