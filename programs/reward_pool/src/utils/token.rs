use anchor_lang::prelude::*;
use anchor_spl::token_interface::{transfer_checked, TransferChecked};
use crate::error::*;

/// Token transfer that works for both SPL Token and Token 2022
pub fn transfer_token<'a>(
    authority: AccountInfo<'a>,
    from: AccountInfo<'a>,
    to: AccountInfo<'a>,
    mint: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    amount: u64,
    decimals: u8,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let cpi_accounts = TransferChecked {
        from,
        mint,
        to,
        authority,
    };

    transfer_checked(
        CpiContext::new_with_signer(token_program, cpi_accounts, signer_seeds),
        amount,
        decimals,
    )
}

/// Lamports held by a program account above its rent-exempt minimum
pub fn native_balance(account: &AccountInfo) -> Result<u64> {
    let rent = Rent::get()?.minimum_balance(account.data_len());
    Ok(account.lamports().saturating_sub(rent))
}

/// Balance of a destination after a native credit.
/// The runtime rejects a credit that leaves a non-program account rent-paying,
/// so an empty wallet needs at least the rent-exempt minimum in one payout.
pub fn credited_balance(current: u64, amount: u64, rent_minimum: u64) -> Result<u64> {
    let credited = current
        .checked_add(amount)
        .ok_or(RewardPoolError::ArithmeticOverflow)?;
    require!(credited >= rent_minimum, RewardPoolError::BelowRentMinimum);
    Ok(credited)
}

/// Moves lamports out of a program-owned account.
/// Fails with InsufficientRewards if it would dip into the rent reserve, and
/// with BelowRentMinimum if the destination would end up rent-paying.
pub fn transfer_native(from: &AccountInfo, to: &AccountInfo, amount: u64) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    require!(
        native_balance(from)? >= amount,
        RewardPoolError::InsufficientRewards
    );

    let rent_minimum = Rent::get()?.minimum_balance(to.data_len());
    let credited = credited_balance(to.lamports(), amount, rent_minimum)?;

    **from.try_borrow_mut_lamports()? -= amount;
    **to.try_borrow_mut_lamports()? = credited;
    Ok(())
}
