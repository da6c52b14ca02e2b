use anchor_lang::prelude::Pubkey;
use std::str::FromStr;
use crate::error::RewardPoolError;
use crate::state::*;
use crate::test::expect_error;
use crate::utils::*;

fn fee_wallet() -> Pubkey {
    Pubkey::from_str("A4mDtfFCkdt9CqGzEkfiSHhJD8d3bUMasVzwajudGtb2").unwrap()
}

fn recipient() -> Pubkey {
    Pubkey::from_str("8G9xE8awr9vA2PZWFTJSHNhS16KLnXYdV6XEaJP1a2Yx").unwrap()
}

fn creator_pool(fee_bps: u16, fee_recipient: Pubkey) -> RewardPool {
    RewardPool {
        kind: PoolKind::Creator,
        active: true,
        protocol_fee_bps: fee_bps,
        protocol_fee_recipient: fee_recipient,
        ..Default::default()
    }
}

fn snapshotted(amount: u64) -> MediumState {
    let mut medium = MediumState {
        kind: TokenKind::Native,
        ..Default::default()
    };
    medium.record_snapshot(amount, 1_700_000_000);
    medium
}

fn allocation(amount: u64) -> Allocation {
    Allocation {
        recipient: recipient(),
        amount,
        present: true,
        indexed: true,
        ..Default::default()
    }
}

#[test]
fn test_zero_fee_skips_fee_recipient() {
    println!("=== Testing zero-fee routing without a fee recipient ===");

    // Zero-fee creator pool created while the factory had no fee recipient
    let pool = creator_pool(0, Pubkey::default());
    let medium = snapshotted(10);
    let allocation = allocation(10);

    let (split, settled) = settle_claim(
        &ClaimContext {
            pool: &pool,
            medium: Some(&medium),
            allocation: Some(&allocation),
            already_claimed: false,
            mint: Pubkey::default(),
            kind: TokenKind::Native,
        },
        &mut ClaimRecord::default(),
        1_700_000_000,
    )
    .unwrap();
    println!("Split: {:?}", split);
    assert_eq!(split, FeeSplit { gross: 10, fee: 0, net: 10 });
    assert_eq!(settled.protocol_fees_claimed, 0);

    let route = resolve_fee_route(&split, &pool.protocol_fee_recipient, None).unwrap();
    assert_eq!(route, FeeRoute::Skip);

    // Whatever fee account a client passes along is ignored
    let route = resolve_fee_route(&split, &pool.protocol_fee_recipient, Some(fee_wallet())).unwrap();
    assert_eq!(route, FeeRoute::Skip);

    println!("✅ Zero-fee routing passed!");
}

#[test]
fn test_positive_fee_requires_configured_recipient() {
    println!("=== Testing fee routing with a nonzero fee ===");

    let split = split_fee(1_000, 100).unwrap();
    assert_eq!(split.fee, 10);

    let route = resolve_fee_route(&split, &fee_wallet(), Some(fee_wallet())).unwrap();
    assert_eq!(route, FeeRoute::Pay { recipient: fee_wallet(), amount: 10 });

    expect_error(
        resolve_fee_route(&split, &fee_wallet(), None),
        RewardPoolError::InvalidFeeRecipient,
    );
    expect_error(
        resolve_fee_route(&split, &fee_wallet(), Some(recipient())),
        RewardPoolError::InvalidFeeRecipient,
    );
    expect_error(
        resolve_fee_route(&split, &Pubkey::default(), Some(Pubkey::default())),
        RewardPoolError::InvalidFeeRecipient,
    );

    println!("✅ Nonzero fee routing passed!");
}

#[test]
fn test_second_claim_with_fresh_nonce_rejected() {
    println!("=== Testing claim replay with a fresh nonce ===");

    let pool = creator_pool(100, fee_wallet());
    let mut medium = snapshotted(1_000);
    let allocation = allocation(400);

    let mut user_nonce = UserNonce::default();
    let mut claim_record = ClaimRecord::default();

    // First claim: nonce 1 consumed, then settled
    user_nonce.consume(&mut NonceRecord::default(), 1).unwrap();
    let claim = ClaimContext {
        pool: &pool,
        medium: Some(&medium),
        allocation: Some(&allocation),
        already_claimed: claim_record.claimed,
        mint: Pubkey::default(),
        kind: TokenKind::Native,
    };
    let (split, settled) = settle_claim(&claim, &mut claim_record, 1_700_000_000).unwrap();
    medium = settled;
    println!("First claim: {:?}", split);
    assert_eq!(split, FeeSplit { gross: 400, fee: 4, net: 396 });
    assert!(claim_record.claimed);

    // Second claim: a fresh nonce passes replay protection, the claim record does not
    let mut fresh = NonceRecord::default();
    user_nonce.consume(&mut fresh, 2).unwrap();
    assert!(fresh.used);
    let claim = ClaimContext {
        pool: &pool,
        medium: Some(&medium),
        allocation: Some(&allocation),
        already_claimed: claim_record.claimed,
        mint: Pubkey::default(),
        kind: TokenKind::Native,
    };
    expect_error(
        settle_claim(&claim, &mut claim_record, 1_700_000_100),
        RewardPoolError::AlreadyClaimed,
    );

    // Nothing moved on the rejected attempt
    assert_eq!(medium.total_claimed, 400);
    assert_eq!(claim_record.gross_amount, 400);
    assert_eq!(claim_record.claimed_at, 1_700_000_000);
    assert_eq!(user_nonce.counter, 2);

    println!("✅ Fresh-nonce replay rejected!");
}

#[test]
fn test_native_credit_rent_rule() {
    println!("=== Testing native credit against the rent minimum ===");

    let rent_minimum = 890_880;

    // Empty wallet: one credit must make it rent-exempt
    expect_error(
        credited_balance(0, 10, rent_minimum),
        RewardPoolError::BelowRentMinimum,
    );
    assert_eq!(credited_balance(0, rent_minimum, rent_minimum).unwrap(), rent_minimum);

    // Funded wallet: any credit keeps it exempt
    assert_eq!(credited_balance(1_000_000, 10, rent_minimum).unwrap(), 1_000_010);

    expect_error(
        credited_balance(u64::MAX, 1, rent_minimum),
        RewardPoolError::ArithmeticOverflow,
    );

    println!("✅ Rent rule passed!");
}
