use anchor_lang::prelude::*;
use crate::error::*;
use crate::state::*;
use crate::utils::fee::{split_fee, FeeSplit};

/// Result of `check_claim_eligibility`, returned to callers as return data
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClaimEligibility {
    pub eligible: bool,
    pub gross_amount: u64,
    pub fee: u64,
}

/// Why a claim cannot be paid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ineligible {
    PoolInactive,
    InvalidMedium,
    SnapshotNotTaken,
    AlreadyClaimed,
    NothingToClaim,
}

impl From<Ineligible> for RewardPoolError {
    fn from(reason: Ineligible) -> Self {
        match reason {
            Ineligible::PoolInactive => RewardPoolError::PoolNotActive,
            Ineligible::InvalidMedium => RewardPoolError::InvalidTokenType,
            Ineligible::SnapshotNotTaken => RewardPoolError::SnapshotNotTaken,
            Ineligible::AlreadyClaimed => RewardPoolError::AlreadyClaimed,
            Ineligible::NothingToClaim => RewardPoolError::NotEligible,
        }
    }
}

/// Everything `quote_claim` reads, borrowed from loaded accounts.
/// Missing accounts are `None`.
pub struct ClaimContext<'a> {
    pub pool: &'a RewardPool,
    pub medium: Option<&'a MediumState>,
    pub allocation: Option<&'a Allocation>,
    pub already_claimed: bool,
    pub mint: Pubkey,
    pub kind: TokenKind,
}

/**
 * Computes the gross amount and fee a recipient may claim for one medium.
 *
 * Checks, in order: pool active, medium pairing, snapshot taken, not yet
 * claimed, non-zero entitlement.
 *
 * - XP pool: snapshot * weight / total_weight
 * - Creator pool: allocation
 *
 * Both are bounded by the part of the current snapshot not yet paid out, so
 * gross claims against one snapshot never sum past it even if the ledger is
 * edited between claims. Retaking the snapshot resets that bound. Only the
 * snapshot is read here; solvency against the live balance is checked at
 * payout.
 */
pub fn quote_claim(ctx: &ClaimContext) -> std::result::Result<FeeSplit, Ineligible> {
    if !ctx.pool.active {
        return Err(Ineligible::PoolInactive);
    }
    if !is_valid_medium(&ctx.mint, ctx.kind) {
        return Err(Ineligible::InvalidMedium);
    }
    let medium = match ctx.medium {
        Some(medium) if medium.snapshot_taken && medium.kind == ctx.kind => medium,
        _ => return Err(Ineligible::SnapshotNotTaken),
    };
    if ctx.already_claimed {
        return Err(Ineligible::AlreadyClaimed);
    }
    let allocation = match ctx.allocation {
        Some(allocation) if allocation.present => allocation,
        _ => return Err(Ineligible::NothingToClaim),
    };

    let entitled = match ctx.pool.kind {
        PoolKind::Xp => {
            if ctx.pool.total_weight == 0 {
                return Err(Ineligible::NothingToClaim);
            }
            // weight <= total_weight, so the quotient fits in u64
            ((medium.snapshot_amount as u128) * (allocation.amount as u128)
                / (ctx.pool.total_weight as u128)) as u64
        }
        PoolKind::Creator => allocation.amount,
    };
    let gross = entitled.min(medium.remaining_snapshot());
    if gross == 0 {
        return Err(Ineligible::NothingToClaim);
    }

    split_fee(gross, ctx.pool.protocol_fee_bps).map_err(|_| Ineligible::NothingToClaim)
}

/// Read-only form: any ineligibility collapses to (false, 0, 0)
pub fn check_eligibility(ctx: &ClaimContext) -> ClaimEligibility {
    match quote_claim(ctx) {
        Ok(split) => ClaimEligibility {
            eligible: true,
            gross_amount: split.gross,
            fee: split.fee,
        },
        Err(_) => ClaimEligibility::default(),
    }
}
