use anchor_lang::prelude::*;
use crate::error::*;
use crate::state::Allocation;

/**
 * Allocation ledger mutations
 *
 * Pure functions over in-memory Allocation entries and the aggregate they
 * feed (RewardPool::total_weight for XP pools, MediumState::total_allocated
 * for creator pools). Instructions load the accounts, call into here and
 * write the results back only when every entry succeeded.
 */

/// Inserts an allocation. Returns true when the entry needs a new
/// enumeration slot (first time this recipient is ever added).
pub fn add_entry(entry: &mut Allocation, total: &mut u64, amount: u64) -> Result<bool> {
    require!(!entry.present, RewardPoolError::AlreadyPresent);

    *total = total
        .checked_add(amount)
        .ok_or(RewardPoolError::ArithmeticOverflow)?;
    entry.amount = amount;
    entry.present = true;

    let needs_index = !entry.indexed;
    entry.indexed = true;
    Ok(needs_index)
}

/// Replaces an allocation. Setting zero clears presence (tombstone);
/// the enumeration slot is kept.
pub fn update_entry(entry: &mut Allocation, total: &mut u64, new_amount: u64) -> Result<u64> {
    require!(entry.present, RewardPoolError::NotPresent);

    let old_amount = entry.amount;
    *total = total
        .checked_sub(old_amount)
        .and_then(|t| t.checked_add(new_amount))
        .ok_or(RewardPoolError::ArithmeticOverflow)?;
    entry.amount = new_amount;
    if new_amount == 0 {
        entry.present = false;
    }
    Ok(old_amount)
}

/// Zeroes an allocation and clears presence. Returns the removed amount.
pub fn remove_entry(entry: &mut Allocation, total: &mut u64) -> Result<u64> {
    require!(entry.present, RewardPoolError::NotPresent);

    let removed = entry.amount;
    *total = total
        .checked_sub(removed)
        .ok_or(RewardPoolError::ArithmeticOverflow)?;
    entry.amount = 0;
    entry.present = false;
    Ok(removed)
}

/// Subtracts `penalty` from an XP weight, saturating at zero.
/// Returns the new weight.
pub fn penalize_entry(entry: &mut Allocation, total: &mut u64, penalty: u64) -> Result<u64> {
    require!(entry.present, RewardPoolError::UserNotInPool);

    let new_amount = entry.amount.saturating_sub(penalty);
    update_entry(entry, total, new_amount)?;
    Ok(new_amount)
}

/// Kind of batch applied by `apply_batch`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchOp {
    Add,
    Update,
    Penalize,
}

/// Shape checks shared by every batch: non-empty, parallel arrays of equal
/// length, no null or repeated recipient and, for XP batches, no zero value.
pub fn validate_batch(recipients: &[Pubkey], amounts: &[u64], reject_zero: bool) -> Result<()> {
    require!(!recipients.is_empty(), RewardPoolError::EmptyBatch);
    require!(
        recipients.len() == amounts.len(),
        RewardPoolError::ArrayLengthMismatch
    );
    require!(
        recipients.iter().all(|r| *r != Pubkey::default()),
        RewardPoolError::InvalidRecipient
    );
    if reject_zero {
        require!(amounts.iter().all(|a| *a > 0), RewardPoolError::InvalidAmount);
    }

    let mut sorted = recipients.to_vec();
    sorted.sort_unstable();
    require!(
        sorted.windows(2).all(|pair| pair[0] != pair[1]),
        RewardPoolError::DuplicateRecipient
    );
    Ok(())
}

/// Applies `op` to every entry or to none.
///
/// Works on a staged copy and commits entries and total together only after
/// the last entry succeeded. Update and penalize batches fail with
/// UserNotInPool if any entry is not a current member. For adds, the returned
/// flags tell which entries need a new enumeration slot.
pub fn apply_batch(
    op: BatchOp,
    entries: &mut [Allocation],
    amounts: &[u64],
    total: &mut u64,
) -> Result<Vec<bool>> {
    require!(
        entries.len() == amounts.len(),
        RewardPoolError::ArrayLengthMismatch
    );

    let mut staged = entries.to_vec();
    let mut staged_total = *total;
    let mut needs_index = vec![false; staged.len()];

    for (i, (entry, amount)) in staged.iter_mut().zip(amounts).enumerate() {
        match op {
            BatchOp::Add => {
                needs_index[i] = add_entry(entry, &mut staged_total, *amount)?;
            }
            BatchOp::Update => {
                require!(entry.present, RewardPoolError::UserNotInPool);
                update_entry(entry, &mut staged_total, *amount)?;
            }
            BatchOp::Penalize => {
                penalize_entry(entry, &mut staged_total, *amount)?;
            }
        }
    }

    entries.clone_from_slice(&staged);
    *total = staged_total;
    Ok(needs_index)
}
