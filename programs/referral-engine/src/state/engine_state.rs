use anchor_lang::prelude::*;

use crate::errors::ErrorCode;

/// Global engine configuration and statistics
///
/// Stores the admin and pool authorities, the protocol fee setting, the
/// settlement lock, and cumulative metrics. Only one EngineState account
/// exists per program instance.
#[account]
pub struct EngineState {
    /// Current admin authority
    pub admin: Pubkey,

    /// Pool swap engine identity allowed to feed fee events
    pub fee_authority: Pubkey,

    /// Wallet entitled to collected protocol fees
    pub treasury: Pubkey,

    /// Protocol cut = raw_fee / protocol_fee_denominator; 0 disables the cut
    pub protocol_fee_denominator: u8,

    /// PDA bump for the engine authority
    pub authority_bump: u8,

    /// PDA bump for this account
    pub bump: u8,

    /// Whether accrual and registration are paused
    pub paused: bool,

    /// Settlement lock; held across the outbound transfer in collect
    pub locked: bool,

    /// Providers registered through the engine-owned registry
    pub total_providers: u64,

    /// Referral fees accrued across all providers and mints
    pub total_referral_fees: u64,

    /// Protocol fees accrued across all mints
    pub total_protocol_fees: u64,

    /// Referral fees paid out across all providers and mints
    pub total_collected: u64,

    /// Timestamp when the engine was initialized
    pub initialized_at: i64,

    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl EngineState {
    /// Account size calculation:
    /// - 3 Pubkeys: 32 * 3 = 96 bytes (admin, fee_authority, treasury)
    /// - 5 u64/i64: 8 * 5 = 40 bytes (total_providers, total_referral_fees,
    ///   total_protocol_fees, total_collected, initialized_at)
    /// - 5 u8/bool: 5 bytes (protocol_fee_denominator, authority_bump, bump,
    ///   paused, locked)
    /// - reserved: 32 bytes
    /// Total: 96 + 40 + 5 + 32 = 173 bytes
    pub const LEN: usize = 32 * 3 + 8 * 5 + 5 + 32;

    /// Acquire the settlement lock. Rejects nested entry: an outbound token
    /// transfer can hand control to a transfer hook, and that hook must not
    /// be able to re-enter ledger-mutating instructions mid-settlement.
    pub fn begin_settlement(&mut self) -> Result<()> {
        require!(!self.locked, ErrorCode::SettlementInProgress);
        self.locked = true;
        Ok(())
    }

    /// Release the settlement lock.
    pub fn end_settlement(&mut self) {
        self.locked = false;
    }

    /// Entry check for every instruction that mutates the ledger or binding
    /// stores without performing a transfer itself.
    pub fn assert_unlocked(&self) -> Result<()> {
        require!(!self.locked, ErrorCode::SettlementInProgress);
        Ok(())
    }
}
