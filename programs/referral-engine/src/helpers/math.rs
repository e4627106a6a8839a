use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ErrorCode;

/// Outcome of running one raw fee amount through the fee hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeBreakdown {
    /// Slice owed to the protocol treasury
    pub protocol_cut: u64,

    /// Slice owed to the referring provider
    pub referral_cut: u64,

    /// Remainder owed to the position owner
    pub owner_amount: u64,
}

/// Split a raw fee into protocol cut, referral cut, and owner remainder.
///
/// The protocol cut comes off the top (`raw_fee / denominator`, disabled at
/// denominator 0); the referral cut is taken from what remains; the owner
/// receives the rest. Both divisions truncate toward zero, so rounding dust
/// always stays with the owner instead of accumulating to the protocol or
/// the referrer across many small events.
///
/// Conservation holds exactly for every input:
/// `protocol_cut + referral_cut + owner_amount == raw_fee`.
pub fn split_fee(
    raw_fee: u64,
    protocol_fee_denominator: u8,
    referral_rate_bps: u16,
) -> Result<FeeBreakdown> {
    require!(
        referral_rate_bps <= MAX_REFERRAL_RATE_BPS,
        ErrorCode::InvalidFeeRate
    );

    let protocol_cut = if protocol_fee_denominator == 0 {
        0
    } else {
        raw_fee / protocol_fee_denominator as u64
    };

    let remaining = raw_fee
        .checked_sub(protocol_cut)
        .ok_or(ErrorCode::MathOverflow)?;

    // u64 * u16 cannot overflow u128
    let referral_cut = u64::try_from(
        (remaining as u128)
            .checked_mul(referral_rate_bps as u128)
            .ok_or(ErrorCode::MathOverflow)?
            / BPS_DENOMINATOR as u128,
    )
    .map_err(|_| ErrorCode::MathOverflow)?;

    let owner_amount = remaining
        .checked_sub(referral_cut)
        .ok_or(ErrorCode::MathOverflow)?;

    #[cfg(feature = "verbose")]
    msg!(
        "split_fee: raw={}, protocol={}, referral={}, owner={}",
        raw_fee,
        protocol_cut,
        referral_cut,
        owner_amount
    );

    Ok(FeeBreakdown {
        protocol_cut,
        referral_cut,
        owner_amount,
    })
}
