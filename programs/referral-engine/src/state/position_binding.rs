use anchor_lang::prelude::*;

/// Immutable association between a position and its referring provider
///
/// Written exactly once when the position is created and read on every fee
/// accrual for the position's lifetime. There is no update path: a second
/// capture attempt for the same position is a no-op, so no provider can
/// retroactively claim fees accrued under another provider's positions.
///
/// PDA Seeds: ["binding_v1", position]
#[account]
pub struct PositionBinding {
    /// Identity of the fee-accruing position (e.g. its NFT mint)
    pub position: Pubkey,

    /// Configuration provider bound at creation time
    pub provider: Pubkey,

    /// Timestamp of capture
    pub created_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl PositionBinding {
    /// Account size calculation:
    /// - 2 Pubkeys: 32 * 2 = 64 bytes (position, provider)
    /// - created_at: 8 bytes
    /// - bump: 1 byte
    /// Total: 64 + 8 + 1 = 73 bytes
    pub const LEN: usize = 32 * 2 + 8 + 1;

    /// Whether a provider has been captured for this position.
    pub fn is_captured(&self) -> bool {
        self.provider != Pubkey::default()
    }
}
