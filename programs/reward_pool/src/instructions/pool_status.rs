use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;

/**
 * Account context for pool lifecycle transitions
 *
 * activate_pool and deactivate_pool are the only transitions. While
 * inactive the ledger is editable and funds may be withdrawn; while active
 * claims are accepted.
 *
 * Access Control: Factory admins only
 */
#[event_cpi]
#[derive(Accounts)]
pub struct SetPoolStatus<'info> {
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

    #[account(
        constraint = factory.is_admin(&admin.key()) @ RewardPoolError::NotAdmin
    )]
    pub admin: Signer<'info>,
}

pub fn handle_activate_pool(ctx: Context<SetPoolStatus>) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.ensure_inactive()?;
    pool.active = true;

    emit_cpi!(PoolStatusChanged {
        pool: pool.key(),
        active: true,
    });

    Ok(())
}

pub fn handle_deactivate_pool(ctx: Context<SetPoolStatus>) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    require!(pool.active, RewardPoolError::PoolNotActive);
    pool.active = false;

    emit_cpi!(PoolStatusChanged {
        pool: pool.key(),
        active: false,
    });

    Ok(())
}
