use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;

/**
 * Account context for initializing the factory
 *
 * Creates the singleton Factory PDA. The signer becomes the authority that
 * manages the admin set.
 */
#[event_cpi]
#[derive(Accounts)]
pub struct InitializeFactory<'info> {
    /// Factory account (PDA)
    /// - Derived from: ["factory"]
    #[account(
        init,
        payer = authority,
        space = Factory::LEN,
        seeds = [FACTORY_SEED.as_bytes()],
        bump
    )]
    pub factory: Account<'info, Factory>,

    /// Authority of the factory, pays for the account
    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/**
 * Initializes the factory
 *
 * @param protocol_fee_recipient - Fee recipient copied into new pools (may be
 *   the null key if only zero-fee pools will be created)
 * @param default_fee_bps - Fee rate for XP pools, at most MAX_PROTOCOL_FEE_BPS
 */
pub fn handle_initialize_factory(
    ctx: Context<InitializeFactory>,
    protocol_fee_recipient: Pubkey,
    default_fee_bps: u16,
) -> Result<()> {
    validate_fee_bps(default_fee_bps)?;

    let factory = &mut ctx.accounts.factory;
    factory.bump = ctx.bumps.factory;
    factory.authority = ctx.accounts.authority.key();
    factory.admins = Vec::new();
    factory.protocol_fee_recipient = protocol_fee_recipient;
    factory.default_fee_bps = default_fee_bps;

    emit_cpi!(FactoryInitialized {
        factory: factory.key(),
        authority: factory.authority,
        protocol_fee_recipient,
        default_fee_bps,
    });

    Ok(())
}

/**
 * Account context for granting or revoking the admin role
 *
 * Access Control: Only the factory authority
 */
#[event_cpi]
#[derive(Accounts)]
pub struct ManageAdmin<'info> {
    #[account(
        mut,
        seeds = [FACTORY_SEED.as_bytes()],
        bump = factory.bump,
        has_one = authority @ RewardPoolError::OnlyAuthority
    )]
    pub factory: Account<'info, Factory>,

    pub authority: Signer<'info>,
}

pub fn handle_grant_admin(ctx: Context<ManageAdmin>, admin: Pubkey) -> Result<()> {
    let factory = &mut ctx.accounts.factory;
    factory.grant_admin(admin)?;

    emit_cpi!(AdminRoleChanged {
        factory: factory.key(),
        admin,
        granted: true,
    });

    Ok(())
}

pub fn handle_revoke_admin(ctx: Context<ManageAdmin>, admin: Pubkey) -> Result<()> {
    let factory = &mut ctx.accounts.factory;
    factory.revoke_admin(&admin)?;

    emit_cpi!(AdminRoleChanged {
        factory: factory.key(),
        admin,
        granted: false,
    });

    Ok(())
}
