use anchor_lang::prelude::Pubkey;
use std::str::FromStr;
use crate::state::*;
use crate::utils::*;

fn recipient(name: &str) -> Pubkey {
    let key = match name {
        "a" => "8G9xE8awr9vA2PZWFTJSHNhS16KLnXYdV6XEaJP1a2Yx",
        "b" => "A4mDtfFCkdt9CqGzEkfiSHhJD8d3bUMasVzwajudGtb2",
        _ => "4SX6nqv5VRLMoNfYM5phvHgcBNcBEwUEES4qPPjf1EqS",
    };
    Pubkey::from_str(key).unwrap()
}

fn usdc() -> Pubkey {
    Pubkey::from_str("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v").unwrap()
}

fn xp_pool(fee_bps: u16) -> RewardPool {
    RewardPool {
        kind: PoolKind::Xp,
        active: true,
        protocol_fee_bps: fee_bps,
        total_weight: 1_000,
        ..Default::default()
    }
}

fn native_medium(snapshot: u64) -> MediumState {
    let mut medium = MediumState {
        kind: TokenKind::Native,
        ..Default::default()
    };
    medium.record_snapshot(snapshot, 1_700_000_000);
    medium
}

fn present(owner: Pubkey, mint: Pubkey, amount: u64) -> Allocation {
    Allocation {
        recipient: owner,
        mint,
        amount,
        present: true,
        indexed: true,
        ..Default::default()
    }
}

fn native_claim<'a>(
    pool: &'a RewardPool,
    medium: Option<&'a MediumState>,
    allocation: Option<&'a Allocation>,
    already_claimed: bool,
) -> ClaimContext<'a> {
    ClaimContext {
        pool,
        medium,
        allocation,
        already_claimed,
        mint: Pubkey::default(),
        kind: TokenKind::Native,
    }
}

#[test]
fn test_xp_pool_proportional_claims() {
    println!("=== Testing XP pool 500/300/200 scenario ===");

    let pool = xp_pool(100);
    let mut medium = native_medium(1_000);
    let a = present(recipient("a"), Pubkey::default(), 500);
    let b = present(recipient("b"), Pubkey::default(), 300);
    let c = present(recipient("c"), Pubkey::default(), 200);

    let result = check_eligibility(&native_claim(&pool, Some(&medium), Some(&a), false));
    println!("A before claim: {:?}", result);
    assert_eq!(
        result,
        ClaimEligibility { eligible: true, gross_amount: 500, fee: 5 }
    );

    // A claims: the record is set and the gross is counted against the snapshot
    let split = quote_claim(&native_claim(&pool, Some(&medium), Some(&a), false)).unwrap();
    medium.record_claim(&split).unwrap();

    let repeat = native_claim(&pool, Some(&medium), Some(&a), true);
    assert_eq!(quote_claim(&repeat), Err(Ineligible::AlreadyClaimed));
    assert_eq!(check_eligibility(&repeat), ClaimEligibility::default());

    let b_result = check_eligibility(&native_claim(&pool, Some(&medium), Some(&b), false));
    let c_result = check_eligibility(&native_claim(&pool, Some(&medium), Some(&c), false));
    println!("B after A: {:?}", b_result);
    println!("C after A: {:?}", c_result);
    assert_eq!(b_result, ClaimEligibility { eligible: true, gross_amount: 300, fee: 3 });
    assert_eq!(c_result, ClaimEligibility { eligible: true, gross_amount: 200, fee: 2 });

    println!("✅ XP pool scenario passed!");
}

#[test]
fn test_creator_pool_zero_fee() {
    println!("=== Testing creator pool zero-fee scenario ===");

    let pool = RewardPool {
        kind: PoolKind::Creator,
        active: true,
        protocol_fee_bps: 0,
        ..Default::default()
    };
    let medium = native_medium(10);
    let allocation = present(recipient("a"), Pubkey::default(), 10);

    let ctx = native_claim(&pool, Some(&medium), Some(&allocation), false);
    assert_eq!(
        check_eligibility(&ctx),
        ClaimEligibility { eligible: true, gross_amount: 10, fee: 0 }
    );
    let split = quote_claim(&ctx).unwrap();
    assert_eq!(split.net, 10);

    println!("✅ Zero-fee creator claim passed!");
}

#[test]
fn test_creator_allocation_capped_by_snapshot() {
    println!("=== Testing creator allocation above snapshot ===");

    let pool = RewardPool {
        kind: PoolKind::Creator,
        active: true,
        protocol_fee_bps: 100,
        ..Default::default()
    };
    let mut medium = MediumState {
        mint: usdc(),
        kind: TokenKind::Token,
        ..Default::default()
    };
    medium.record_snapshot(30, 1_700_000_000);
    let allocation = present(recipient("a"), usdc(), 50);

    let token_claim = |medium: &MediumState| {
        quote_claim(&ClaimContext {
            pool: &pool,
            medium: Some(medium),
            allocation: Some(&allocation),
            already_claimed: false,
            mint: usdc(),
            kind: TokenKind::Token,
        })
    };
    let split = token_claim(&medium).unwrap();
    println!("Allocation 50, snapshot 30 -> gross {}", split.gross);
    assert_eq!(split.gross, 30);

    // Once the snapshot is paid out nothing is left to quote
    medium.claimed_since_snapshot = 30;
    assert_eq!(token_claim(&medium), Err(Ineligible::NothingToClaim));

    println!("✅ Snapshot cap passed!");
}

#[test]
fn test_ineligible_reasons() {
    println!("=== Testing ineligibility reasons ===");

    let pool = xp_pool(100);
    let medium = native_medium(1_000);
    let allocation = present(recipient("a"), Pubkey::default(), 500);

    let inactive = RewardPool { active: false, ..xp_pool(100) };
    assert_eq!(
        quote_claim(&native_claim(&inactive, Some(&medium), Some(&allocation), false)),
        Err(Ineligible::PoolInactive)
    );

    assert_eq!(
        quote_claim(&native_claim(&pool, None, Some(&allocation), false)),
        Err(Ineligible::SnapshotNotTaken)
    );
    let not_taken = MediumState { kind: TokenKind::Native, ..Default::default() };
    assert_eq!(
        quote_claim(&native_claim(&pool, Some(&not_taken), Some(&allocation), false)),
        Err(Ineligible::SnapshotNotTaken)
    );

    // Pairings are rejected, never coerced
    let native_with_mint = ClaimContext {
        mint: usdc(),
        ..native_claim(&pool, Some(&medium), Some(&allocation), false)
    };
    assert_eq!(quote_claim(&native_with_mint), Err(Ineligible::InvalidMedium));
    let token_with_null = ClaimContext {
        kind: TokenKind::Token,
        ..native_claim(&pool, Some(&medium), Some(&allocation), false)
    };
    assert_eq!(quote_claim(&token_with_null), Err(Ineligible::InvalidMedium));
    assert_eq!(check_eligibility(&token_with_null), ClaimEligibility::default());

    assert_eq!(
        quote_claim(&native_claim(&pool, Some(&medium), None, false)),
        Err(Ineligible::NothingToClaim)
    );
    let removed = Allocation { present: false, amount: 0, ..allocation.clone() };
    assert_eq!(
        quote_claim(&native_claim(&pool, Some(&medium), Some(&removed), false)),
        Err(Ineligible::NothingToClaim)
    );

    let empty_pool = RewardPool { total_weight: 0, ..xp_pool(100) };
    assert_eq!(
        quote_claim(&native_claim(&empty_pool, Some(&medium), Some(&allocation), false)),
        Err(Ineligible::NothingToClaim)
    );

    println!("✅ Ineligibility reasons passed!");
}

#[test]
fn test_late_funding_ignored_until_resnapshot() {
    println!("=== Testing snapshot immutability under late funding ===");

    let pool = xp_pool(100);
    let mut medium = native_medium(1_000);
    let allocation = present(recipient("a"), Pubkey::default(), 500);

    // Funds arriving after the snapshot do not touch the medium state
    let before = quote_claim(&native_claim(&pool, Some(&medium), Some(&allocation), false)).unwrap();
    assert_eq!(medium.snapshot_amount, 1_000);
    assert_eq!(before.gross, 500);

    medium.record_snapshot(3_000, 1_700_000_100);
    let after = quote_claim(&native_claim(&pool, Some(&medium), Some(&allocation), false)).unwrap();
    println!("Gross before resnapshot {}, after {}", before.gross, after.gross);
    assert_eq!(after.gross, 1_500);
    assert_eq!(after.fee, 15);

    println!("✅ Late funding test passed!");
}

#[test]
fn test_ineligible_maps_to_program_errors() {
    println!("=== Testing ineligibility error mapping ===");

    let cases = [
        (Ineligible::PoolInactive, crate::error::RewardPoolError::PoolNotActive),
        (Ineligible::InvalidMedium, crate::error::RewardPoolError::InvalidTokenType),
        (Ineligible::SnapshotNotTaken, crate::error::RewardPoolError::SnapshotNotTaken),
        (Ineligible::AlreadyClaimed, crate::error::RewardPoolError::AlreadyClaimed),
        (Ineligible::NothingToClaim, crate::error::RewardPoolError::NotEligible),
    ];
    for (reason, expected) in cases {
        let mapped = crate::error::RewardPoolError::from(reason);
        assert_eq!(format!("{:?}", mapped), format!("{:?}", expected));
    }

    println!("✅ Error mapping passed!");
}

#[test]
fn test_resnapshot_after_claim() {
    println!("=== Testing resnapshot after a claim ===");

    let pool = xp_pool(100);
    let mut medium = native_medium(1_000);
    let a = present(recipient("a"), Pubkey::default(), 500);
    let b = present(recipient("b"), Pubkey::default(), 300);

    let mut a_record = ClaimRecord::default();
    let (split, settled) = settle_claim(
        &native_claim(&pool, Some(&medium), Some(&a), false),
        &mut a_record,
        1_700_000_010,
    )
    .unwrap();
    medium = settled;
    assert_eq!(split.gross, 500);

    // The pool now holds the 500 left after A; the admin re-anchors to it
    medium.record_snapshot(500, 1_700_000_020);
    assert_eq!(medium.claimed_since_snapshot, 0);
    assert_eq!(medium.total_claimed, 500, "lifetime total survives the resnapshot");

    let result = check_eligibility(&native_claim(&pool, Some(&medium), Some(&b), false));
    println!("B after resnapshot: {:?}", result);
    assert_eq!(result, ClaimEligibility { eligible: true, gross_amount: 150, fee: 1 });

    println!("✅ Resnapshot after claim passed!");
}

#[test]
fn test_claims_conserve_value() {
    println!("=== Testing conservation over a sequence of claims ===");

    // 2.5% fee and an odd snapshot so every quote rounds
    let pool = xp_pool(250);
    let snapshot = 9_973;
    let mut medium = native_medium(snapshot);
    let weights = [("a", 437u64), ("b", 331), ("c", 232)];

    let mut sum_gross = 0u64;
    let mut sum_net = 0u64;
    let mut sum_fee = 0u64;
    for (name, weight) in weights {
        let allocation = present(recipient(name), Pubkey::default(), weight);
        let mut record = ClaimRecord::default();
        let (split, settled) = settle_claim(
            &native_claim(&pool, Some(&medium), Some(&allocation), false),
            &mut record,
            1_700_000_000,
        )
        .unwrap();
        medium = settled;
        println!("{}: gross={} net={} fee={}", name, split.gross, split.net, split.fee);

        assert_eq!(split.net + split.fee, split.gross);
        assert!(record.claimed);
        assert_eq!(record.gross_amount, split.gross);
        sum_gross += split.gross;
        sum_net += split.net;
        sum_fee += split.fee;
    }

    assert_eq!(sum_net + sum_fee, sum_gross);
    assert!(sum_gross <= snapshot);
    assert!(sum_fee > 0);
    assert_eq!(medium.total_claimed, sum_gross);
    assert_eq!(medium.claimed_since_snapshot, sum_gross);
    assert_eq!(medium.protocol_fees_claimed, sum_fee);

    println!("✅ Conservation passed!");
}

#[test]
fn test_edited_ledger_stays_within_snapshot() {
    println!("=== Testing snapshot bound across ledger edits ===");

    let pool = RewardPool {
        kind: PoolKind::Creator,
        active: true,
        protocol_fee_bps: 100,
        ..Default::default()
    };
    let mut medium = native_medium(100);

    // Allocations raised between claims past what the snapshot holds
    let first = present(recipient("a"), Pubkey::default(), 70);
    let second = present(recipient("b"), Pubkey::default(), 70);

    let (one, settled) = settle_claim(
        &native_claim(&pool, Some(&medium), Some(&first), false),
        &mut ClaimRecord::default(),
        1_700_000_000,
    )
    .unwrap();
    medium = settled;
    let (two, settled) = settle_claim(
        &native_claim(&pool, Some(&medium), Some(&second), false),
        &mut ClaimRecord::default(),
        1_700_000_000,
    )
    .unwrap();
    medium = settled;

    println!("First gross {}, second gross {}", one.gross, two.gross);
    assert_eq!(one.gross, 70);
    assert_eq!(two.gross, 30);
    assert_eq!(medium.remaining_snapshot(), 0);

    println!("✅ Snapshot bound passed!");
}
