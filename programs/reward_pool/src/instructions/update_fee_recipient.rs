use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::{expect_pda, load_optional, store};

/**
 * Account context for pushing a new protocol fee recipient
 *
 * Updates the factory default used by pools created later, and every pool
 * in the registry range `[start, end)`. Remaining accounts carry one
 * `[registry entry, pool]` pair per index, in order. Callers with more pools
 * than fit one transaction page through `0..total_pools`; repeating a range
 * is harmless.
 *
 * Access Control: Factory admins only
 */
#[event_cpi]
#[derive(Accounts)]
pub struct UpdateProtocolFeeRecipient<'info> {
    #[account(
        mut,
        seeds = [FACTORY_SEED.as_bytes()],
        bump = factory.bump
    )]
    pub factory: Box<Account<'info, Factory>>,

    #[account(
        constraint = factory.is_admin(&admin.key()) @ RewardPoolError::NotAdmin
    )]
    pub admin: Signer<'info>,
}

pub fn handle_update_protocol_fee_recipient_for_all_pools<'info>(
    ctx: Context<'_, '_, '_, 'info, UpdateProtocolFeeRecipient<'info>>,
    new_recipient: Pubkey,
    start: u64,
    end: u64,
) -> Result<()> {
    require!(new_recipient != Pubkey::default(), RewardPoolError::InvalidFeeRecipient);

    let count = ctx.accounts.factory.pool_range(start, end)?;
    require!(
        ctx.remaining_accounts.len() == count * 2,
        RewardPoolError::InvalidRemainingAccounts
    );

    let factory_key = ctx.accounts.factory.key();
    let old_recipient = ctx.accounts.factory.protocol_fee_recipient;
    ctx.accounts.factory.protocol_fee_recipient = new_recipient;

    emit_cpi!(ProtocolFeeRecipientUpdated {
        target: factory_key,
        old_recipient,
        new_recipient,
    });

    for (index, pair) in (start..end).zip(ctx.remaining_accounts.chunks(2)) {
        let (entry_info, pool_info) = (&pair[0], &pair[1]);

        expect_pda(
            entry_info,
            &[
                POOL_REGISTRY_SEED.as_bytes(),
                factory_key.as_ref(),
                &index.to_le_bytes(),
            ],
        )?;
        let entry = load_optional::<PoolRegistryEntry>(entry_info)?
            .ok_or(RewardPoolError::InvalidRemainingAccounts)?;
        require_keys_eq!(entry.pool, pool_info.key(), RewardPoolError::InvalidRemainingAccounts);

        require!(pool_info.is_writable, RewardPoolError::InvalidRemainingAccounts);
        let mut pool = load_optional::<RewardPool>(pool_info)?
            .ok_or(RewardPoolError::InvalidRemainingAccounts)?;
        require_keys_eq!(pool.factory, factory_key, RewardPoolError::FactoryMismatch);

        let old_recipient = pool.protocol_fee_recipient;
        pool.protocol_fee_recipient = new_recipient;
        store(pool_info, &pool)?;

        emit_cpi!(ProtocolFeeRecipientUpdated {
            target: pool_info.key(),
            old_recipient,
            new_recipient,
        });
    }

    msg!(
        "Protocol fee recipient set to {} on pools {}..{} of {}",
        new_recipient,
        start,
        end,
        ctx.accounts.factory.total_pools
    );

    Ok(())
}
