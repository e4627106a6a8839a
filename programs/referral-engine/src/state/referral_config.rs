use anchor_lang::prelude::*;

/// Engine-owned provider registry entry
///
/// The engine never trusts this account when reading: accrual and collection
/// go through the bounded byte-level lookup exactly as they would for a
/// config account maintained by an external registry program. Field order is
/// load-bearing — the first three fields must serialize to the layout the
/// lookup expects (authority at offset 8, beneficiary at 40, fee rate at 72).
///
/// PDA Seeds: ["referral_v1", authority]
#[account]
pub struct ReferralConfig {
    /// Wallet allowed to update this config and collect its fees
    pub authority: Pubkey,

    /// Current recipient of collected fees
    pub beneficiary: Pubkey,

    /// Referral cut in basis points, 10000 = 100%
    pub fee_rate_bps: u16,

    /// PDA bump seed
    pub bump: u8,

    /// Timestamp of registration
    pub created_at: i64,

    /// Reserved for future use
    pub _reserved: [u8; 16],
}

impl ReferralConfig {
    /// Account size calculation:
    /// - 2 Pubkeys: 32 * 2 = 64 bytes (authority, beneficiary)
    /// - fee_rate_bps: 2 bytes
    /// - bump: 1 byte
    /// - created_at: 8 bytes
    /// - reserved: 16 bytes
    /// Total: 64 + 2 + 1 + 8 + 16 = 91 bytes
    pub const LEN: usize = 32 * 2 + 2 + 1 + 8 + 16;
}
