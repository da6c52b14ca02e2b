use anchor_lang::prelude::Pubkey;
use crate::constants::{FACTORY_SEED, POOL_REGISTRY_SEED};
use crate::error::RewardPoolError;
use crate::state::Factory;
use crate::test::expect_error;

fn registry_address(factory: &Pubkey, index: u64) -> Pubkey {
    Pubkey::find_program_address(
        &[POOL_REGISTRY_SEED.as_bytes(), factory.as_ref(), &index.to_le_bytes()],
        &crate::ID,
    )
    .0
}

#[test]
fn test_every_pool_gets_a_registry_slot() {
    println!("=== Testing pool registry slots ===");

    let mut factory = Factory::default();

    // Two XP pools and a creator pool, in creation order
    for expected in 0..3u64 {
        let index = factory.register_pool().unwrap();
        println!("Registered pool at index {}", index);
        assert_eq!(index, expected);
    }
    assert_eq!(factory.total_pools, 3);

    let (factory_key, _) = Pubkey::find_program_address(&[FACTORY_SEED.as_bytes()], &crate::ID);
    let first = registry_address(&factory_key, 0);
    assert_ne!(first, registry_address(&factory_key, 1));
    assert_ne!(first, registry_address(&factory_key, 2));

    let mut full = Factory { total_pools: u64::MAX, ..Default::default() };
    expect_error(full.register_pool(), RewardPoolError::ArithmeticOverflow);

    println!("✅ Registry slots passed!");
}

#[test]
fn test_pool_range_bounds() {
    println!("=== Testing fee update range bounds ===");

    let factory = Factory { total_pools: 5, ..Default::default() };

    assert_eq!(factory.pool_range(0, 5).unwrap(), 5);
    assert_eq!(factory.pool_range(3, 5).unwrap(), 2);
    assert_eq!(factory.pool_range(4, 5).unwrap(), 1);

    expect_error(factory.pool_range(0, 6), RewardPoolError::InvalidPoolRange);
    expect_error(factory.pool_range(2, 2), RewardPoolError::InvalidPoolRange);
    expect_error(factory.pool_range(4, 3), RewardPoolError::InvalidPoolRange);

    let empty = Factory::default();
    expect_error(empty.pool_range(0, 1), RewardPoolError::InvalidPoolRange);

    println!("✅ Range bounds passed!");
}
