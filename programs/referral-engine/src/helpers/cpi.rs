use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::constants::ENGINE_AUTHORITY_SEED;

/// Transfer tokens out of the engine vault, signed by the engine authority
/// PDA. No-op for a zero amount so settlement stays idempotent.
#[inline(never)]
pub fn transfer_from_vault<'info>(
    token_program: &Interface<'info, TokenInterface>,
    vault: &InterfaceAccount<'info, TokenAccount>,
    mint: &InterfaceAccount<'info, Mint>,
    destination: &InterfaceAccount<'info, TokenAccount>,
    engine_authority: &AccountInfo<'info>,
    authority_bump: u8,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let bump = [authority_bump];
    let seeds: &[&[u8]] = &[ENGINE_AUTHORITY_SEED, &bump];

    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            TransferChecked {
                from: vault.to_account_info(),
                mint: mint.to_account_info(),
                to: destination.to_account_info(),
                authority: engine_authority.to_account_info(),
            },
            &[seeds],
        ),
        amount,
        mint.decimals,
    )
}
