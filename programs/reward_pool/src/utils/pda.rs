use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::invoke_signed;
use anchor_lang::solana_program::system_instruction;
use crate::constants::*;
use crate::error::*;
use crate::state::*;

/// Checks that `info` sits at the PDA derived from `seeds` and returns its bump
pub fn expect_pda(info: &AccountInfo, seeds: &[&[u8]]) -> Result<u8> {
    let (expected, bump) = Pubkey::find_program_address(seeds, &crate::ID);
    require_keys_eq!(info.key(), expected, RewardPoolError::InvalidPda);
    Ok(bump)
}

/// Deserializes a program account that may not exist yet.
/// Returns None for an empty (never created) address.
pub fn load_optional<T: AccountDeserialize>(info: &AccountInfo) -> Result<Option<T>> {
    if info.data_is_empty() {
        return Ok(None);
    }
    require_keys_eq!(*info.owner, crate::ID, RewardPoolError::AccountNotOwnedByProgram);
    let data = info.try_borrow_data()?;
    Ok(Some(T::try_deserialize(&mut &data[..])?))
}

/// Serializes `value` (discriminator included) into an existing program account
pub fn store<T: AccountSerialize>(info: &AccountInfo, value: &T) -> Result<()> {
    require_keys_eq!(*info.owner, crate::ID, RewardPoolError::AccountNotOwnedByProgram);
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    value.try_serialize(&mut writer)?;
    Ok(())
}

/// Creates a rent-exempt PDA owned by this program.
/// `seeds` must include the bump.
pub fn create_pda_account<'info>(
    payer: &AccountInfo<'info>,
    new_account: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    seeds: &[&[u8]],
    space: usize,
) -> Result<()> {
    let lamports = Rent::get()?.minimum_balance(space);
    let ix = system_instruction::create_account(
        payer.key,
        new_account.key,
        lamports,
        space as u64,
        &crate::ID,
    );

    invoke_signed(
        &ix,
        &[payer.clone(), new_account.clone(), system_program.clone()],
        &[seeds],
    )?;

    Ok(())
}

/// Writes enumeration entry number `pool.total_users` into `index_account`
/// and bumps the counter. The account must be the PDA for that index.
pub fn append_recipient_index<'info>(
    pool: &mut RewardPool,
    pool_key: &Pubkey,
    index_account: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    recipient: Pubkey,
    mint: Pubkey,
) -> Result<u64> {
    let index = pool.total_users;
    let index_bytes = index.to_le_bytes();
    let bump = expect_pda(
        index_account,
        &[RECIPIENT_INDEX_SEED.as_bytes(), pool_key.as_ref(), &index_bytes],
    )?;

    create_pda_account(
        payer,
        index_account,
        system_program,
        &[RECIPIENT_INDEX_SEED.as_bytes(), pool_key.as_ref(), &index_bytes, &[bump]],
        RecipientIndex::LEN,
    )?;
    store(
        index_account,
        &RecipientIndex {
            bump,
            pool: *pool_key,
            index,
            recipient,
            mint,
        },
    )?;

    pool.total_users = index
        .checked_add(1)
        .ok_or(RewardPoolError::ArithmeticOverflow)?;
    Ok(index)
}
