use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;

/**
 * Account context for granting a signer role
 *
 * Re-granting a revoked signer reactivates the existing account.
 *
 * Access Control: Factory admins only
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(signer: Pubkey)]
pub struct GrantSignerRole<'info> {
    #[account(
        seeds = [FACTORY_SEED.as_bytes()],
        bump = factory.bump
    )]
    pub factory: Box<Account<'info, Factory>>,

    #[account(has_one = factory @ RewardPoolError::FactoryMismatch)]
    pub pool: Box<Account<'info, RewardPool>>,

    /// - Derived from: ["signer", pool, signer]
    #[account(
        init_if_needed,
        payer = admin,
        space = SignerRole::LEN,
        seeds = [SIGNER_SEED.as_bytes(), pool.key().as_ref(), signer.as_ref()],
        bump
    )]
    pub signer_role: Account<'info, SignerRole>,

    #[account(
        mut,
        constraint = factory.is_admin(&admin.key()) @ RewardPoolError::NotAdmin
    )]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_grant_signer_role(ctx: Context<GrantSignerRole>, signer: Pubkey) -> Result<()> {
    require!(signer != Pubkey::default(), RewardPoolError::InvalidRecipient);

    let pool_key = ctx.accounts.pool.key();
    let signer_role = &mut ctx.accounts.signer_role;
    signer_role.bump = ctx.bumps.signer_role;
    signer_role.pool = pool_key;
    signer_role.signer = signer;
    signer_role.active = true;

    emit_cpi!(SignerRoleChanged {
        pool: pool_key,
        signer,
        active: true,
    });

    Ok(())
}

/**
 * Account context for revoking a signer role
 *
 * Authorizations already signed by the revoked key stop verifying at once.
 *
 * Access Control: Factory admins only
 */
#[event_cpi]
#[derive(Accounts)]
pub struct RevokeSignerRole<'info> {
    #[account(
        seeds = [FACTORY_SEED.as_bytes()],
        bump = factory.bump
    )]
    pub factory: Box<Account<'info, Factory>>,

    #[account(has_one = factory @ RewardPoolError::FactoryMismatch)]
    pub pool: Box<Account<'info, RewardPool>>,

    #[account(
        mut,
        seeds = [SIGNER_SEED.as_bytes(), pool.key().as_ref(), signer_role.signer.as_ref()],
        bump = signer_role.bump
    )]
    pub signer_role: Account<'info, SignerRole>,

    #[account(
        constraint = factory.is_admin(&admin.key()) @ RewardPoolError::NotAdmin
    )]
    pub admin: Signer<'info>,
}

pub fn handle_revoke_signer_role(ctx: Context<RevokeSignerRole>) -> Result<()> {
    let signer_role = &mut ctx.accounts.signer_role;
    signer_role.active = false;

    emit_cpi!(SignerRoleChanged {
        pool: ctx.accounts.pool.key(),
        signer: signer_role.signer,
        active: false,
    });

    Ok(())
}
