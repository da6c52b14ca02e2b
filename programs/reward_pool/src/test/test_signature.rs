use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::ed25519_program;
use anchor_lang::solana_program::instruction::Instruction;
use std::str::FromStr;
use crate::state::TokenKind;
use crate::utils::*;

const SELF_INDEX: u16 = u16::MAX;

fn signer() -> Pubkey {
    Pubkey::from_str("3gmBN8LBomg3sZEjTgp2YsECMYgJpjcT7xUfpnDB4gSs").unwrap()
}

fn pool() -> Pubkey {
    Pubkey::from_str("4SX6nqv5VRLMoNfYM5phvHgcBNcBEwUEES4qPPjf1EqS").unwrap()
}

fn message() -> ClaimMessage {
    ClaimMessage {
        recipient: Pubkey::from_str("8G9xE8awr9vA2PZWFTJSHNhS16KLnXYdV6XEaJP1a2Yx").unwrap(),
        nonce: 1,
        mint: Pubkey::default(),
        kind: TokenKind::Native,
    }
}

/// Single-signature precompile data laid out the way clients build it:
/// offsets at 2, public key at 16, signature at 48, message at 112
fn ed25519_data(pubkey: &Pubkey, signed: &[u8], ix_indexes: [u16; 3]) -> Vec<u8> {
    let pubkey_offset: u16 = 16;
    let signature_offset: u16 = 48;
    let message_offset: u16 = 112;

    let mut data = vec![1u8, 0];
    for value in [
        signature_offset,
        ix_indexes[0],
        pubkey_offset,
        ix_indexes[1],
        message_offset,
        signed.len() as u16,
        ix_indexes[2],
    ] {
        data.extend_from_slice(&value.to_le_bytes());
    }
    data.extend_from_slice(pubkey.as_ref());
    // The runtime verifies the signature itself; its bytes are opaque here
    data.extend_from_slice(&[7u8; 64]);
    data.extend_from_slice(signed);
    data
}

fn ed25519_ix(pubkey: &Pubkey, signed: &[u8]) -> Instruction {
    Instruction {
        program_id: ed25519_program::ID,
        accounts: vec![],
        data: ed25519_data(pubkey, signed, [SELF_INDEX; 3]),
    }
}

#[test]
fn test_valid_authorization() {
    println!("=== Testing valid claim authorization ===");

    let hash = claim_message_hash(&crate::ID, &pool(), &message());
    let ix = ed25519_ix(&signer(), &hash);

    let (parsed_key, parsed_message) = parse_ed25519_instruction(&ix).expect("well-formed instruction");
    assert_eq!(parsed_key, signer());
    assert_eq!(parsed_message, hash.as_slice());

    let discovered = verify_claim_signature(&ix, &hash, &[signer()]);
    println!("Discovered signer: {:?}", discovered);
    assert_eq!(discovered, Some(signer()));

    println!("✅ Valid authorization accepted!");
}

#[test]
fn test_rejected_authorizations() {
    println!("=== Testing rejected claim authorizations ===");

    let hash = claim_message_hash(&crate::ID, &pool(), &message());

    // Signed a different nonce
    let other = ClaimMessage { nonce: 2, ..message() };
    let other_hash = claim_message_hash(&crate::ID, &pool(), &other);
    let ix = ed25519_ix(&signer(), &other_hash);
    assert_eq!(verify_claim_signature(&ix, &hash, &[signer()]), None);

    // Signer without the role
    let ix = ed25519_ix(&signer(), &hash);
    let outsider = Pubkey::from_str("A4mDtfFCkdt9CqGzEkfiSHhJD8d3bUMasVzwajudGtb2").unwrap();
    assert_eq!(verify_claim_signature(&ix, &hash, &[outsider]), None);
    assert_eq!(verify_claim_signature(&ix, &hash, &[]), None);

    // Not the precompile
    let wrong_program = Instruction { program_id: crate::ID, ..ed25519_ix(&signer(), &hash) };
    assert_eq!(verify_claim_signature(&wrong_program, &hash, &[signer()]), None);

    // Message borrowed from another instruction
    let borrowed = Instruction {
        program_id: ed25519_program::ID,
        accounts: vec![],
        data: ed25519_data(&signer(), &hash, [SELF_INDEX, SELF_INDEX, 0]),
    };
    assert_eq!(verify_claim_signature(&borrowed, &hash, &[signer()]), None);

    // Two signatures declared
    let mut multi = ed25519_ix(&signer(), &hash);
    multi.data[0] = 2;
    assert_eq!(parse_ed25519_instruction(&multi), None);

    // Truncated before the message ends
    let mut truncated = ed25519_ix(&signer(), &hash);
    truncated.data.truncate(120);
    assert_eq!(parse_ed25519_instruction(&truncated), None);

    println!("✅ Invalid authorizations rejected!");
}

#[test]
fn test_message_hash_domain_separation() {
    println!("=== Testing claim hash domain separation ===");

    let base = claim_message_hash(&crate::ID, &pool(), &message());
    assert_eq!(base, claim_message_hash(&crate::ID, &pool(), &message()));

    let other_pool = Pubkey::from_str("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v").unwrap();
    let variants = [
        claim_message_hash(&other_pool, &pool(), &message()),
        claim_message_hash(&crate::ID, &other_pool, &message()),
        claim_message_hash(&crate::ID, &pool(), &ClaimMessage { nonce: 99, ..message() }),
        claim_message_hash(&crate::ID, &pool(), &ClaimMessage { recipient: signer(), ..message() }),
        claim_message_hash(
            &crate::ID,
            &pool(),
            &ClaimMessage { mint: other_pool, kind: TokenKind::Token, ..message() },
        ),
        claim_message_hash(&crate::ID, &pool(), &ClaimMessage { kind: TokenKind::Token, ..message() }),
    ];
    for (i, variant) in variants.iter().enumerate() {
        println!("Variant {}: {:?}", i, &variant[..8]);
        assert_ne!(*variant, base, "variant {} must hash differently", i);
    }

    println!("✅ Domain separation passed!");
}
