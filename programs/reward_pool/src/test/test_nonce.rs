use anchor_lang::prelude::Pubkey;
use std::str::FromStr;
use crate::constants::NONCE_SEED;
use crate::error::RewardPoolError;
use crate::state::{NonceRecord, UserNonce};
use crate::test::expect_error;

fn nonce_record_address(pool: &Pubkey, recipient: &Pubkey, nonce: u64) -> Pubkey {
    Pubkey::find_program_address(
        &[
            NONCE_SEED.as_bytes(),
            pool.as_ref(),
            recipient.as_ref(),
            &nonce.to_le_bytes(),
        ],
        &crate::ID,
    )
    .0
}

#[test]
fn test_nonce_replay_rejected() {
    println!("=== Testing nonce replay ===");

    let mut counter = UserNonce::default();
    let mut record = NonceRecord::default();

    counter.consume(&mut record, 5).unwrap();
    println!("After nonce 5: counter={} used_count={}", counter.counter, counter.used_count);
    assert!(record.used);
    assert_eq!(counter.counter, 5);
    assert_eq!(counter.used_count, 1);

    expect_error(counter.consume(&mut record, 5), RewardPoolError::NonceAlreadyUsed);
    assert_eq!(counter.counter, 5);
    assert_eq!(counter.used_count, 1);

    println!("✅ Replay rejected!");
}

#[test]
fn test_high_water_mark() {
    println!("=== Testing nonce high-water mark ===");

    let mut counter = UserNonce::default();
    assert_eq!(counter.next_nonce(), 1);

    counter.consume(&mut NonceRecord::default(), 10).unwrap();
    counter.consume(&mut NonceRecord::default(), 3).unwrap();
    println!("After 10 then 3: counter={} next={}", counter.counter, counter.next_nonce());
    assert_eq!(counter.counter, 10, "a lower nonce never moves the mark back");
    assert_eq!(counter.next_nonce(), 11);
    assert_eq!(counter.used_count, 2);

    let mut saturated = UserNonce { counter: u64::MAX, used_count: 0 };
    assert_eq!(saturated.next_nonce(), u64::MAX);
    saturated.consume(&mut NonceRecord::default(), 1).unwrap();
    assert_eq!(saturated.counter, u64::MAX);

    println!("✅ High-water mark passed!");
}

#[test]
fn test_nonce_isolation_between_recipients() {
    println!("=== Testing nonce isolation ===");

    let pool = Pubkey::from_str("3gmBN8LBomg3sZEjTgp2YsECMYgJpjcT7xUfpnDB4gSs").unwrap();
    let alice = Pubkey::from_str("8G9xE8awr9vA2PZWFTJSHNhS16KLnXYdV6XEaJP1a2Yx").unwrap();
    let bob = Pubkey::from_str("A4mDtfFCkdt9CqGzEkfiSHhJD8d3bUMasVzwajudGtb2").unwrap();

    // Each recipient's nonce 7 lives at its own address
    let alice_record = nonce_record_address(&pool, &alice, 7);
    let bob_record = nonce_record_address(&pool, &bob, 7);
    println!("alice nonce 7: {}", alice_record);
    println!("bob nonce 7:   {}", bob_record);
    assert_ne!(alice_record, bob_record);
    assert_ne!(alice_record, nonce_record_address(&pool, &alice, 8));

    let mut alice_counter = UserNonce::default();
    let mut bob_counter = UserNonce::default();
    let mut alice_nonce = NonceRecord::default();
    let mut bob_nonce = NonceRecord::default();

    alice_counter.consume(&mut alice_nonce, 7).unwrap();
    bob_counter.consume(&mut bob_nonce, 7).unwrap();
    assert_eq!(alice_counter.counter, 7);
    assert_eq!(bob_counter.counter, 7);

    println!("✅ Nonce isolation passed!");
}
