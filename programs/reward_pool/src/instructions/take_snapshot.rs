use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::*;

/**
 * Account context for taking a snapshot
 *
 * Captures the pool's current balance per medium. Claims compute against
 * the captured amount, never the live balance, until the snapshot is
 * retaken. Retaking overwrites without versioning. Legal in any lifecycle
 * state.
 *
 * Token media are passed in `remaining_accounts` as
 * [medium_0, vault_0, medium_1, vault_1, ...] in the order of `mints`.
 *
 * Access Control: Factory admins only
 */
#[event_cpi]
#[derive(Accounts)]
pub struct TakeSnapshot<'info> {
    #[account(
        seeds = [FACTORY_SEED.as_bytes()],
        bump = factory.bump
    )]
    pub factory: Box<Account<'info, Factory>>,

    #[account(has_one = factory @ RewardPoolError::FactoryMismatch)]
    pub pool: Box<Account<'info, RewardPool>>,

    /// Native medium accounting
    /// - Derived from: ["medium", pool, null mint]
    #[account(
        init_if_needed,
        payer = admin,
        space = MediumState::LEN,
        seeds = [MEDIUM_SEED.as_bytes(), pool.key().as_ref(), Pubkey::default().as_ref()],
        bump
    )]
    pub native_medium: Box<Account<'info, MediumState>>,

    #[account(
        mut,
        constraint = factory.is_admin(&admin.key()) @ RewardPoolError::NotAdmin
    )]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Records the lamports the pool holds above its rent-exempt minimum
fn snapshot_native(ctx: &mut Context<TakeSnapshot>, now: i64) -> Result<u64> {
    let pool_key = ctx.accounts.pool.key();
    let amount = native_balance(&ctx.accounts.pool.to_account_info())?;

    let medium = &mut ctx.accounts.native_medium;
    if medium.pool == Pubkey::default() {
        medium.bump = ctx.bumps.native_medium;
        medium.pool = pool_key;
        medium.mint = Pubkey::default();
        medium.kind = TokenKind::Native;
    }
    medium.record_snapshot(amount, now);
    Ok(amount)
}

/// Records the balance of the vault for `mint`, creating its MediumState if needed
fn snapshot_token<'info>(
    pool_key: &Pubkey,
    mint: &Pubkey,
    medium_info: &AccountInfo<'info>,
    vault_info: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    now: i64,
) -> Result<u64> {
    require!(is_valid_medium(mint, TokenKind::Token), RewardPoolError::InvalidTokenType);

    expect_pda(vault_info, &[VAULT_SEED.as_bytes(), pool_key.as_ref(), mint.as_ref()])?;
    require!(!vault_info.data_is_empty(), RewardPoolError::TokenAccountMismatch);
    let amount = {
        let data = vault_info.try_borrow_data()?;
        let vault = TokenAccount::try_deserialize(&mut &data[..])?;
        require_keys_eq!(vault.mint, *mint, RewardPoolError::TokenAccountMismatch);
        vault.amount
    };

    let seeds: &[&[u8]] = &[MEDIUM_SEED.as_bytes(), pool_key.as_ref(), mint.as_ref()];
    let bump = expect_pda(medium_info, seeds)?;
    let mut medium = match load_optional::<MediumState>(medium_info)? {
        Some(medium) => medium,
        None => {
            create_pda_account(
                payer,
                medium_info,
                system_program,
                &[MEDIUM_SEED.as_bytes(), pool_key.as_ref(), mint.as_ref(), &[bump]],
                MediumState::LEN,
            )?;
            MediumState {
                bump,
                pool: *pool_key,
                mint: *mint,
                kind: TokenKind::Token,
                ..Default::default()
            }
        }
    };
    require!(medium.kind == TokenKind::Token, RewardPoolError::InvalidTokenType);

    medium.record_snapshot(amount, now);
    store(medium_info, &medium)?;
    Ok(amount)
}

/// Snapshots the native medium only
pub fn handle_take_native_snapshot(mut ctx: Context<TakeSnapshot>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let amount = snapshot_native(&mut ctx, now)?;

    emit_cpi!(SnapshotTaken {
        pool: ctx.accounts.pool.key(),
        mint: Pubkey::default(),
        kind: TokenKind::Native,
        amount,
    });

    Ok(())
}

/// Snapshots the native medium and every token medium in `mints`
pub fn handle_take_snapshot<'info>(
    mut ctx: Context<'_, '_, '_, 'info, TakeSnapshot<'info>>,
    mints: Vec<Pubkey>,
) -> Result<()> {
    require!(
        ctx.remaining_accounts.len() == mints.len() * 2,
        RewardPoolError::InvalidRemainingAccounts
    );

    let now = Clock::get()?.unix_timestamp;
    let native_amount = snapshot_native(&mut ctx, now)?;

    let pool_key = ctx.accounts.pool.key();
    emit_cpi!(SnapshotTaken {
        pool: pool_key,
        mint: Pubkey::default(),
        kind: TokenKind::Native,
        amount: native_amount,
    });

    let payer = ctx.accounts.admin.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    for (i, mint) in mints.iter().enumerate() {
        let amount = snapshot_token(
            &pool_key,
            mint,
            &ctx.remaining_accounts[i * 2],
            &ctx.remaining_accounts[i * 2 + 1],
            &payer,
            &system_program,
            now,
        )?;

        emit_cpi!(SnapshotTaken {
            pool: pool_key,
            mint: *mint,
            kind: TokenKind::Token,
            amount,
        });
    }

    Ok(())
}
