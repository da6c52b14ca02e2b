use anchor_lang::prelude::*;
use anchor_lang::solana_program::ed25519_program;
use anchor_lang::solana_program::hash::hashv;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::solana_program::sysvar::instructions::{
    load_current_index_checked, load_instruction_at_checked,
};
use crate::constants::*;
use crate::error::*;
use crate::state::TokenKind;

/**
 * Claim authorization message
 *
 * Produced off-chain by a signer-role holder and carried to `claim_reward`
 * by the recipient or a relayer. Never stored.
 */
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimMessage {
    pub recipient: Pubkey,
    pub nonce: u64,
    pub mint: Pubkey,
    pub kind: TokenKind,
}

/// Domain-separated hash of a claim message; these 32 bytes are what the
/// signer signs with Ed25519.
///
/// hash("reward_pool:claim:v1" | program_id | pool | recipient | nonce_le | mint | kind)
pub fn claim_message_hash(program_id: &Pubkey, pool: &Pubkey, message: &ClaimMessage) -> [u8; 32] {
    hashv(&[
        CLAIM_DOMAIN_TAG,
        program_id.as_ref(),
        pool.as_ref(),
        message.recipient.as_ref(),
        &message.nonce.to_le_bytes(),
        message.mint.as_ref(),
        &[message.kind.as_byte()],
    ])
    .to_bytes()
}

/// ===== ED25519 PRECOMPILE LAYOUT =====
/// [num_signatures u8][padding u8] followed by one 14-byte offsets record per
/// signature: signature_offset, signature_ix_index, public_key_offset,
/// public_key_ix_index, message_offset, message_size, message_ix_index (u16 LE).
const ED25519_HEADER_LEN: usize = 2;
const ED25519_OFFSETS_LEN: usize = 14;
const ED25519_PUBKEY_LEN: usize = 32;
const ED25519_SIGNATURE_LEN: usize = 64;
/// Instruction index meaning "data lives in this same instruction"
const CURRENT_INSTRUCTION: u16 = u16::MAX;

fn read_u16(data: &[u8], at: usize) -> Option<u16> {
    let bytes = data.get(at..at + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Extracts (public key, signed message) from a single-signature Ed25519
/// precompile instruction whose data is fully self-contained.
///
/// The runtime has already verified the signature if the transaction got
/// this far; this only reads what was verified.
pub fn parse_ed25519_instruction(ix: &Instruction) -> Option<(Pubkey, &[u8])> {
    if ix.program_id != ed25519_program::ID || !ix.accounts.is_empty() {
        return None;
    }
    let data = ix.data.as_slice();
    if data.len() < ED25519_HEADER_LEN + ED25519_OFFSETS_LEN || data[0] != 1 {
        return None;
    }

    let at = ED25519_HEADER_LEN;
    let signature_offset = read_u16(data, at)? as usize;
    let signature_ix = read_u16(data, at + 2)?;
    let pubkey_offset = read_u16(data, at + 4)? as usize;
    let pubkey_ix = read_u16(data, at + 6)?;
    let message_offset = read_u16(data, at + 8)? as usize;
    let message_size = read_u16(data, at + 10)? as usize;
    let message_ix = read_u16(data, at + 12)?;

    // Signature, key and message must all come from this instruction
    if signature_ix != CURRENT_INSTRUCTION
        || pubkey_ix != CURRENT_INSTRUCTION
        || message_ix != CURRENT_INSTRUCTION
    {
        return None;
    }

    data.get(signature_offset..signature_offset + ED25519_SIGNATURE_LEN)?;
    let pubkey_bytes = data.get(pubkey_offset..pubkey_offset + ED25519_PUBKEY_LEN)?;
    let message = data.get(message_offset..message_offset + message_size)?;
    let pubkey = Pubkey::try_from(pubkey_bytes).ok()?;
    Some((pubkey, message))
}

/// Pure check of a claim authorization: the precompile instruction signs
/// exactly `expected_hash` and its key belongs to `signers`.
/// Returns the discovered signer on success.
pub fn verify_claim_signature(
    ix: &Instruction,
    expected_hash: &[u8; 32],
    signers: &[Pubkey],
) -> Option<Pubkey> {
    let (signer, message) = parse_ed25519_instruction(ix)?;
    if message != expected_hash.as_slice() || !signers.contains(&signer) {
        return None;
    }
    Some(signer)
}

/// Loads the instruction immediately preceding the current one, where the
/// Ed25519 verification for a claim must sit.
pub fn load_signature_instruction(instructions_sysvar: &AccountInfo) -> Result<Instruction> {
    let current = load_current_index_checked(instructions_sysvar)?;
    require!(current > 0, RewardPoolError::MissingSignatureInstruction);
    let ix = load_instruction_at_checked((current - 1) as usize, instructions_sysvar)?;
    Ok(ix)
}
