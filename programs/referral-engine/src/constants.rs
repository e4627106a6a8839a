use anchor_lang::prelude::*;

// ══════════════════════════════════════════════════════════════════════════════
// PDA SEEDS
// ══════════════════════════════════════════════════════════════════════════════

/// Engine state PDA seed
pub const ENGINE_STATE_SEED: &[u8] = b"engine_v1";

/// Engine authority PDA seed (signs vault transfers)
pub const ENGINE_AUTHORITY_SEED: &[u8] = b"auth_v1";

/// Referral config PDA seed (engine-owned registry, per provider authority)
pub const REFERRAL_CONFIG_SEED: &[u8] = b"referral_v1";

/// Position binding PDA seed (per position identity)
pub const BINDING_SEED: &[u8] = b"binding_v1";

/// Fee ledger PDA seed (per provider, per mint)
pub const LEDGER_SEED: &[u8] = b"ledger_v1";

// ══════════════════════════════════════════════════════════════════════════════
// FEE PARAMETERS
// ══════════════════════════════════════════════════════════════════════════════

/// Basis point denominator: 10000 = 100%
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Maximum referral rate a provider config may carry (100%)
pub const MAX_REFERRAL_RATE_BPS: u16 = 10_000;

/// Minimum protocol fee denominator when the protocol fee is enabled.
/// A denominator of 0 disables the protocol cut entirely; 1 would route
/// the whole fee to the protocol, so the smallest enabled value is 2 (50%).
pub const MIN_PROTOCOL_FEE_DENOMINATOR: u8 = 2;

// ══════════════════════════════════════════════════════════════════════════════
// PROVIDER CONFIG LAYOUT
// ══════════════════════════════════════════════════════════════════════════════
// A provider config account is parsed from raw bytes at fixed offsets:
//   [0..8)   discriminator
//   [8..40)  authority
//   [40..72) beneficiary
//   [72..74) fee_rate_bps (little endian)
// Bytes past offset 74 belong to the provider and are never read.

/// Byte offset of the authority field
pub const CONFIG_AUTHORITY_OFFSET: usize = 8;

/// Byte offset of the beneficiary field
pub const CONFIG_BENEFICIARY_OFFSET: usize = 40;

/// Byte offset of the fee rate field
pub const CONFIG_FEE_RATE_OFFSET: usize = 72;

/// Minimum config account data length (through the fee rate field)
pub const MIN_CONFIG_ACCOUNT_LEN: usize = 74;

/// Work ceiling for the config read. Accounts larger than this are treated
/// as unavailable before their data is touched, so a provider cannot make a
/// fee-accrual event more expensive by growing its config account.
pub const MAX_CONFIG_ACCOUNT_LEN: usize = 512;
