use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;

/// Gross claim amount broken into what the recipient and the fee recipient receive
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSplit {
    pub gross: u64,
    pub fee: u64,
    pub net: u64,
}

/// fee = floor(gross * fee_bps / 10_000)
///
/// The division truncates. With fee_bps capped at MAX_PROTOCOL_FEE_BPS the
/// fee never exceeds gross, so `gross - fee` cannot underflow.
pub fn compute_fee(gross: u64, fee_bps: u16) -> Result<u64> {
    let fee = (gross as u128)
        .checked_mul(fee_bps as u128)
        .ok_or(RewardPoolError::ArithmeticOverflow)?
        / BPS_DENOMINATOR as u128;
    u64::try_from(fee).map_err(|_| error!(RewardPoolError::ArithmeticOverflow))
}

pub fn split_fee(gross: u64, fee_bps: u16) -> Result<FeeSplit> {
    let fee = compute_fee(gross, fee_bps)?;
    let net = gross
        .checked_sub(fee)
        .ok_or(RewardPoolError::ArithmeticOverflow)?;
    Ok(FeeSplit { gross, fee, net })
}
