use anchor_lang::prelude::*;

use crate::errors::ErrorCode;

/// Accrued fee balance for one (provider, mint) pair
///
/// Created implicitly on first accrual and never closed; a drained ledger
/// simply holds zero. `amount` only ever decreases through `drain`, which is
/// the settlement path.
///
/// PDA Seeds: ["ledger_v1", provider, mint]
#[account]
pub struct FeeLedger {
    /// Configuration provider this balance is attributable to
    pub provider: Pubkey,

    /// Token mint the balance is denominated in
    pub mint: Pubkey,

    /// Currently collectible balance
    pub amount: u64,

    /// Total ever credited (lifetime)
    pub lifetime_accrued: u64,

    /// Total ever paid out (lifetime)
    pub lifetime_collected: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Reserved for future use
    pub _reserved: [u8; 16],
}

impl FeeLedger {
    /// Account size calculation:
    /// - 2 Pubkeys: 32 * 2 = 64 bytes (provider, mint)
    /// - 3 u64: 8 * 3 = 24 bytes (amount, lifetime_accrued, lifetime_collected)
    /// - bump: 1 byte
    /// - reserved: 16 bytes
    /// Total: 64 + 24 + 1 + 16 = 105 bytes
    pub const LEN: usize = 32 * 2 + 8 * 3 + 1 + 16;

    /// Add to the collectible balance. Overflow means token quantities that
    /// cannot exist for any real mint, so it aborts the instruction instead
    /// of wrapping.
    pub fn credit(&mut self, amount: u64) -> Result<()> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        self.lifetime_accrued = self
            .lifetime_accrued
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    /// Ledger accounts are created lazily on first accrual; fill in the
    /// identity fields the first time one is touched.
    pub fn ensure_initialized(&mut self, provider: Pubkey, mint: Pubkey, bump: u8) {
        if self.provider == Pubkey::default() {
            self.provider = provider;
            self.mint = mint;
            self.bump = bump;
        }
    }

    /// Atomically read and zero the collectible balance, returning the prior
    /// value. The only path by which `amount` decreases.
    pub fn drain(&mut self) -> u64 {
        let amount = self.amount;
        self.amount = 0;
        self.lifetime_collected = self.lifetime_collected.saturating_add(amount);
        amount
    }
}
