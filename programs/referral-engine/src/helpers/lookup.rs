use anchor_lang::prelude::*;
use anchor_lang::Discriminator;

use crate::constants::*;
use crate::state::ReferralConfig;

/// Provider configuration as read from an untrusted config account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Wallet allowed to collect this provider's accrued fees
    pub authority: Pubkey,

    /// Current fee recipient
    pub beneficiary: Pubkey,

    /// Referral cut in basis points
    pub fee_rate_bps: u16,
}

/// Parse a provider config from raw account bytes (fixed offsets, see the
/// layout in `constants`).
///
/// Total over arbitrary input: every malformed shape — short data, oversized
/// data, wrong discriminator — maps to `None`. A fee rate above 10000 bps is
/// also `None` rather than clamped; a provider must never be able to claim
/// more than the whole fee pool it is attached to.
pub fn parse_provider_config(data: &[u8]) -> Option<ProviderConfig> {
    if data.len() < MIN_CONFIG_ACCOUNT_LEN || data.len() > MAX_CONFIG_ACCOUNT_LEN {
        return None;
    }

    if &data[..8] != ReferralConfig::DISCRIMINATOR {
        return None;
    }

    let authority = Pubkey::new_from_array(
        data[CONFIG_AUTHORITY_OFFSET..CONFIG_BENEFICIARY_OFFSET]
            .try_into()
            .ok()?,
    );
    let beneficiary = Pubkey::new_from_array(
        data[CONFIG_BENEFICIARY_OFFSET..CONFIG_FEE_RATE_OFFSET]
            .try_into()
            .ok()?,
    );
    let fee_rate_bps = u16::from_le_bytes(
        data[CONFIG_FEE_RATE_OFFSET..MIN_CONFIG_ACCOUNT_LEN]
            .try_into()
            .ok()?,
    );

    if fee_rate_bps > MAX_REFERRAL_RATE_BPS {
        return None;
    }

    Some(ProviderConfig {
        authority,
        beneficiary,
        fee_rate_bps,
    })
}

/// Read a provider config account defensively.
///
/// The account may live at any address; the engine only ever acts on what
/// its bytes say right now. The size ceiling is checked before the data is
/// borrowed, and a borrow failure (the account is mutably held elsewhere in
/// the transaction) is treated the same as malformed data. Callers decide
/// what `None` means: zero referral cut during accrual, a hard failure at
/// binding capture and collection.
pub fn read_provider_config(info: &AccountInfo) -> Option<ProviderConfig> {
    if info.data_len() > MAX_CONFIG_ACCOUNT_LEN {
        return None;
    }
    let data = info.try_borrow_data().ok()?;
    parse_provider_config(&data)
}
