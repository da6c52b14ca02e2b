use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::*;

/**
 * Account context for claiming a reward
 *
 * The transaction must carry an Ed25519 precompile instruction immediately
 * before this one, signing `claim_message_hash(program_id, pool, message)`
 * with the key of `signer_role`.
 *
 * Used by both claim_reward (the recipient submits and pays) and
 * claim_reward_for (an admin relays and pays; funds still go to the
 * recipient).
 *
 * The token accounts are only required when `message.kind` is Token. The
 * fee accounts are only required when the claim carries a fee, so zero-fee
 * pools claim without a fee recipient.
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(message: ClaimMessage)]
pub struct ClaimReward<'info> {
    #[account(
        seeds = [FACTORY_SEED.as_bytes()],
        bump = factory.bump
    )]
    pub factory: Box<Account<'info, Factory>>,

    /// Holds native rewards as lamports and signs for its token vaults
    #[account(
        mut,
        has_one = factory @ RewardPoolError::FactoryMismatch
    )]
    pub pool: Box<Account<'info, RewardPool>>,

    /// Medium accounting, loaded manually since it may not exist yet
    /// - Derived from: ["medium", pool, mint]
    /// CHECK: address is constrained by seeds; contents are deserialized in the handler
    #[account(
        mut,
        seeds = [MEDIUM_SEED.as_bytes(), pool.key().as_ref(), message.mint.as_ref()],
        bump
    )]
    pub medium: UncheckedAccount<'info>,

    /// Recipient's allocation, loaded manually since it may not exist
    /// - Derived from: ["allocation", pool, recipient, allocation mint]
    /// CHECK: address is verified in the handler against the pool kind
    pub allocation: UncheckedAccount<'info>,

    /// - Derived from: ["claim", pool, recipient, mint]
    #[account(
        init_if_needed,
        payer = payer,
        space = ClaimRecord::LEN,
        seeds = [CLAIM_SEED.as_bytes(), pool.key().as_ref(), message.recipient.as_ref(), message.mint.as_ref()],
        bump
    )]
    pub claim_record: Box<Account<'info, ClaimRecord>>,

    /// - Derived from: ["user_nonce", pool, recipient]
    #[account(
        init_if_needed,
        payer = payer,
        space = UserNonce::LEN,
        seeds = [USER_NONCE_SEED.as_bytes(), pool.key().as_ref(), message.recipient.as_ref()],
        bump
    )]
    pub user_nonce: Box<Account<'info, UserNonce>>,

    /// - Derived from: ["nonce", pool, recipient, nonce]
    #[account(
        init_if_needed,
        payer = payer,
        space = NonceRecord::LEN,
        seeds = [
            NONCE_SEED.as_bytes(),
            pool.key().as_ref(),
            message.recipient.as_ref(),
            message.nonce.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub nonce_record: Box<Account<'info, NonceRecord>>,

    /// Role of the key that signed the authorization
    #[account(
        seeds = [SIGNER_SEED.as_bytes(), pool.key().as_ref(), signer_role.signer.as_ref()],
        bump = signer_role.bump,
        constraint = signer_role.pool == pool.key() @ RewardPoolError::InvalidSignature
    )]
    pub signer_role: Box<Account<'info, SignerRole>>,

    /// CHECK: must be the recipient named in the message; receives lamports for native claims
    #[account(
        mut,
        address = message.recipient @ RewardPoolError::RecipientMismatch
    )]
    pub recipient: UncheckedAccount<'info>,

    /// CHECK: must be the pool's fee recipient; receives the fee of native claims
    #[account(
        mut,
        address = pool.protocol_fee_recipient @ RewardPoolError::InvalidFeeRecipient
    )]
    pub fee_recipient: Option<UncheckedAccount<'info>>,

    /// - Derived from: ["vault", pool, mint]
    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), pool.key().as_ref(), message.mint.as_ref()],
        bump
    )]
    pub token_vault: Option<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = recipient_token_account.mint == message.mint @ RewardPoolError::TokenAccountMismatch,
        constraint = recipient_token_account.owner == message.recipient @ RewardPoolError::TokenAccountMismatch
    )]
    pub recipient_token_account: Option<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = fee_recipient_token_account.mint == message.mint @ RewardPoolError::TokenAccountMismatch,
        constraint = fee_recipient_token_account.owner == pool.protocol_fee_recipient @ RewardPoolError::TokenAccountMismatch
    )]
    pub fee_recipient_token_account: Option<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = message.mint @ RewardPoolError::TokenAccountMismatch)]
    pub token_mint: Option<InterfaceAccount<'info, Mint>>,

    /// Recipient for direct claims, an admin for relayed claims
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: address is the instructions sysvar
    #[account(address = sysvar::instructions::ID)]
    pub instructions_sysvar: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Option<Interface<'info, TokenInterface>>,
}

/**
 * Redeems one signed authorization
 *
 * Order of checks:
 * 1. Submitter (recipient, or an admin when relayed)
 * 2. Ed25519 authorization by an active signer of this pool
 * 3. Nonce unused for this recipient
 * 4. Eligibility against the snapshot
 * 5. Solvency against the live balance
 *
 * Any failure reverts the whole transaction, nonce consumption included.
 */
pub fn process_claim(ctx: Context<ClaimReward>, message: ClaimMessage, relayed: bool) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();

    // ===== AUTHORIZATION =====
    let payer = ctx.accounts.payer.key();
    if relayed {
        require!(ctx.accounts.factory.is_admin(&payer), RewardPoolError::NotAdmin);
    } else {
        require_keys_eq!(payer, message.recipient, RewardPoolError::RecipientMismatch);
    }

    require!(ctx.accounts.signer_role.active, RewardPoolError::InvalidSignature);
    let signature_ix = load_signature_instruction(&ctx.accounts.instructions_sysvar.to_account_info())?;
    let expected_hash = claim_message_hash(&crate::ID, &pool_key, &message);
    let signer = verify_claim_signature(
        &signature_ix,
        &expected_hash,
        &[ctx.accounts.signer_role.signer],
    )
    .ok_or(RewardPoolError::InvalidSignature)?;

    // ===== REPLAY PROTECTION =====
    let user_nonce = &mut ctx.accounts.user_nonce;
    user_nonce.consume(&mut ctx.accounts.nonce_record, message.nonce)?;

    // ===== ELIGIBILITY =====
    require!(
        is_valid_medium(&message.mint, message.kind),
        RewardPoolError::InvalidTokenType
    );

    let medium_info = ctx.accounts.medium.to_account_info();
    let medium = load_optional::<MediumState>(&medium_info)?;

    let allocation_info = ctx.accounts.allocation.to_account_info();
    let allocation_mint = ctx.accounts.pool.allocation_mint(&message.mint);
    expect_pda(
        &allocation_info,
        &[
            ALLOCATION_SEED.as_bytes(),
            pool_key.as_ref(),
            message.recipient.as_ref(),
            allocation_mint.as_ref(),
        ],
    )?;
    let allocation = load_optional::<Allocation>(&allocation_info)?;

    // ===== EFFECTS PHASE (State Updates) =====
    let now = Clock::get()?.unix_timestamp;
    let (split, medium) = settle_claim(
        &ClaimContext {
            pool: &ctx.accounts.pool,
            medium: medium.as_ref(),
            allocation: allocation.as_ref(),
            already_claimed: ctx.accounts.claim_record.claimed,
            mint: message.mint,
            kind: message.kind,
        },
        &mut ctx.accounts.claim_record,
        now,
    )?;
    store(&medium_info, &medium)?;

    // ===== INTERACTIONS PHASE (Transfers) =====
    let fee_recipient = ctx.accounts.pool.protocol_fee_recipient;
    match message.kind {
        TokenKind::Native => {
            let fee_route = resolve_fee_route(
                &split,
                &fee_recipient,
                ctx.accounts.fee_recipient.as_ref().map(|account| account.key()),
            )?;

            let pool_info = ctx.accounts.pool.to_account_info();
            require!(
                native_balance(&pool_info)? >= split.gross,
                RewardPoolError::InsufficientRewards
            );
            transfer_native(&pool_info, &ctx.accounts.recipient.to_account_info(), split.net)?;
            if let (FeeRoute::Pay { amount, .. }, Some(fee_account)) =
                (fee_route, ctx.accounts.fee_recipient.as_ref())
            {
                transfer_native(&pool_info, &fee_account.to_account_info(), amount)?;
            }
        }
        TokenKind::Token => {
            let (
                Some(vault),
                Some(recipient_token_account),
                Some(token_mint),
                Some(token_program),
            ) = (
                ctx.accounts.token_vault.as_ref(),
                ctx.accounts.recipient_token_account.as_ref(),
                ctx.accounts.token_mint.as_ref(),
                ctx.accounts.token_program.as_ref(),
            ) else {
                return err!(RewardPoolError::TokenAccountMismatch);
            };
            let fee_token_account = ctx.accounts.fee_recipient_token_account.as_ref();
            let fee_route = resolve_fee_route(
                &split,
                &fee_recipient,
                fee_token_account.map(|account| account.owner),
            )?;
            require!(vault.amount >= split.gross, RewardPoolError::InsufficientRewards);

            let pool = &ctx.accounts.pool;
            pool.with_signer_seeds(|signer_seeds| -> Result<()> {
                transfer_token(
                    pool.to_account_info(),
                    vault.to_account_info(),
                    recipient_token_account.to_account_info(),
                    token_mint.to_account_info(),
                    token_program.to_account_info(),
                    split.net,
                    token_mint.decimals,
                    signer_seeds,
                )?;
                if let (FeeRoute::Pay { amount, .. }, Some(fee_token_account)) =
                    (fee_route, fee_token_account)
                {
                    transfer_token(
                        pool.to_account_info(),
                        vault.to_account_info(),
                        fee_token_account.to_account_info(),
                        token_mint.to_account_info(),
                        token_program.to_account_info(),
                        amount,
                        token_mint.decimals,
                        signer_seeds,
                    )?;
                }
                Ok(())
            })?;
        }
    }

    msg!(
        "Claimed {} (fee {}) for {} with nonce {}",
        split.gross,
        split.fee,
        message.recipient,
        message.nonce
    );

    emit_cpi!(RewardClaimed {
        pool: pool_key,
        recipient: message.recipient,
        mint: message.mint,
        kind: message.kind,
        nonce: message.nonce,
        signer,
        gross_amount: split.gross,
        net_amount: split.net,
        fee_amount: split.fee,
        relayed,
    });

    Ok(())
}
