use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;

/**
 * Account context for opening a token vault
 *
 * Creates the token account a pool holds one token medium in. Funders then
 * transfer tokens into it directly; the balance only becomes claimable once
 * a snapshot captures it.
 *
 * Access Control: Factory admins only
 */
#[event_cpi]
#[derive(Accounts)]
pub struct OpenTokenVault<'info> {
    #[account(
        seeds = [FACTORY_SEED.as_bytes()],
        bump = factory.bump
    )]
    pub factory: Box<Account<'info, Factory>>,

    #[account(has_one = factory @ RewardPoolError::FactoryMismatch)]
    pub pool: Box<Account<'info, RewardPool>>,

    /// Token vault owned by the pool PDA
    /// - Derived from: ["vault", pool, mint]
    #[account(
        init,
        token::mint = token_mint,
        token::authority = pool,
        token::token_program = token_program,
        seeds = [VAULT_SEED.as_bytes(), pool.key().as_ref(), token_mint.key().as_ref()],
        bump,
        payer = admin,
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// Supports both SPL Token and Token 2022 mints
    #[account(mint::token_program = token_program)]
    pub token_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = factory.is_admin(&admin.key()) @ RewardPoolError::NotAdmin
    )]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handle_open_token_vault(ctx: Context<OpenTokenVault>) -> Result<()> {
    emit_cpi!(TokenVaultOpened {
        pool: ctx.accounts.pool.key(),
        mint: ctx.accounts.token_mint.key(),
        vault: ctx.accounts.token_vault.key(),
    });

    Ok(())
}
