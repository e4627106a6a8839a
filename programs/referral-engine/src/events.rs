use anchor_lang::prelude::*;

// ══════════════════════════════════════════════════════════════════════════════
// INITIALIZATION EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted when the engine state is initialized
#[event]
pub struct EngineInitialized {
    pub admin: Pubkey,
    pub fee_authority: Pubkey,
    pub engine_authority: Pubkey,
    pub protocol_fee_denominator: u8,
    pub timestamp: i64,
}

/// Emitted when a provider registers a config in the engine-owned registry
#[event]
pub struct ProviderRegistered {
    pub provider: Pubkey,
    pub authority: Pubkey,
    pub beneficiary: Pubkey,
    pub fee_rate_bps: u16,
    pub timestamp: i64,
}

// ══════════════════════════════════════════════════════════════════════════════
// CONFIG EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted when a provider changes its beneficiary
#[event]
pub struct BeneficiaryUpdated {
    pub provider: Pubkey,
    pub old_beneficiary: Pubkey,
    pub new_beneficiary: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a provider changes its fee rate
#[event]
pub struct FeeRateUpdated {
    pub provider: Pubkey,
    pub old_rate_bps: u16,
    pub new_rate_bps: u16,
    pub timestamp: i64,
}

/// Emitted when the protocol fee denominator changes
#[event]
pub struct ProtocolFeeUpdated {
    pub old_denominator: u8,
    pub new_denominator: u8,
    pub timestamp: i64,
}

// ══════════════════════════════════════════════════════════════════════════════
// ATTRIBUTION EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted when a position is bound to its referring provider
#[event]
pub struct BindingCaptured {
    pub position: Pubkey,
    pub provider: Pubkey,
    pub timestamp: i64,
}

/// Emitted once per fee-bearing event routed through the engine
#[event]
pub struct FeesAccrued {
    /// Position identity, or the default address for swap-level accrual
    pub position: Pubkey,
    pub provider: Pubkey,
    pub mint: Pubkey,
    pub raw_fee: u64,
    pub protocol_cut: u64,
    pub referral_cut: u64,
    pub owner_amount: u64,
    pub timestamp: i64,
}

/// Emitted when a provider config could not be read during accrual.
/// The fee event itself still succeeds with a zero referral cut.
#[event]
pub struct ConfigLookupFailed {
    pub provider: Pubkey,
    pub mint: Pubkey,
    pub timestamp: i64,
}

// ══════════════════════════════════════════════════════════════════════════════
// SETTLEMENT EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted when a provider collects its accrued referral fees
#[event]
pub struct FeesCollected {
    pub provider: Pubkey,
    pub beneficiary: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

/// Emitted when the admin collects accrued protocol fees
#[event]
pub struct ProtocolFeesCollected {
    pub treasury: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

// ══════════════════════════════════════════════════════════════════════════════
// ADMIN EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted when the engine pause state changes
#[event]
pub struct StatusChanged {
    pub paused: bool,
    pub admin: Pubkey,
    pub timestamp: i64,
}

/// Emitted when the admin authority is transferred
#[event]
pub struct AdminTransferred {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
    pub timestamp: i64,
}
