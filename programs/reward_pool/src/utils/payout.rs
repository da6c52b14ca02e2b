use anchor_lang::prelude::*;
use crate::error::*;
use crate::state::*;
use crate::utils::eligibility::{quote_claim, ClaimContext};
use crate::utils::fee::FeeSplit;

/// Where the protocol fee of one claim goes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeeRoute {
    /// Zero fee: no fee account is read or credited
    Skip,
    Pay { recipient: Pubkey, amount: u64 },
}

/**
 * Resolves the fee leg of a claim payout
 *
 * @param split - Quoted claim
 * @param configured - The pool's fee recipient; the null key on pools created without one
 * @param supplied - Owner of the fee account passed with the claim: the account
 *   itself for native claims, the token account owner for token claims
 *
 * A zero fee never touches the fee recipient, so zero-fee pools claim without
 * any fee account. A positive fee needs the configured recipient.
 */
pub fn resolve_fee_route(
    split: &FeeSplit,
    configured: &Pubkey,
    supplied: Option<Pubkey>,
) -> Result<FeeRoute> {
    if split.fee == 0 {
        return Ok(FeeRoute::Skip);
    }
    require!(*configured != Pubkey::default(), RewardPoolError::InvalidFeeRecipient);
    let supplied = supplied.ok_or(RewardPoolError::InvalidFeeRecipient)?;
    require_keys_eq!(supplied, *configured, RewardPoolError::InvalidFeeRecipient);

    Ok(FeeRoute::Pay {
        recipient: supplied,
        amount: split.fee,
    })
}

/**
 * Quotes a claim and applies its bookkeeping
 *
 * Marks the claim record and returns the medium with the payout counted.
 * The caller persists the medium and moves the funds.
 */
pub fn settle_claim(
    claim: &ClaimContext,
    claim_record: &mut ClaimRecord,
    now: i64,
) -> Result<(FeeSplit, MediumState)> {
    let split = quote_claim(claim).map_err(RewardPoolError::from)?;
    let mut medium = claim
        .medium
        .cloned()
        .ok_or(RewardPoolError::SnapshotNotTaken)?;

    claim_record.record(split.gross, split.fee, now);
    medium.record_claim(&split)?;

    Ok((split, medium))
}
