use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::state::*;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + EngineState::LEN,
        seeds = [ENGINE_STATE_SEED],
        bump
    )]
    pub engine_state: Account<'info, EngineState>,

    /// CHECK: PDA that signs vault transfers
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump)]
    pub engine_authority: AccountInfo<'info>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct RegisterProvider<'info> {
    #[account(mut, seeds = [ENGINE_STATE_SEED], bump = engine_state.bump)]
    pub engine_state: Account<'info, EngineState>,

    #[account(
        init,
        payer = authority,
        space = 8 + ReferralConfig::LEN,
        seeds = [REFERRAL_CONFIG_SEED, authority.key().as_ref()],
        bump
    )]
    pub referral_config: Account<'info, ReferralConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct UpdateProviderConfig<'info> {
    #[account(
        mut,
        seeds = [REFERRAL_CONFIG_SEED, authority.key().as_ref()],
        bump = referral_config.bump
    )]
    pub referral_config: Account<'info, ReferralConfig>,

    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct RegisterBinding<'info> {
    #[account(seeds = [ENGINE_STATE_SEED], bump = engine_state.bump)]
    pub engine_state: Account<'info, EngineState>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + PositionBinding::LEN,
        seeds = [BINDING_SEED, position.key().as_ref()],
        bump
    )]
    pub position_binding: Account<'info, PositionBinding>,

    /// CHECK: position identity issued by the external position manager
    pub position: AccountInfo<'info>,

    /// CHECK: provider config, parsed defensively at capture time
    pub provider_config: AccountInfo<'info>,

    /// The provider authority requesting the binding
    pub provider_authority: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct AccruePositionFee<'info> {
    #[account(mut, seeds = [ENGINE_STATE_SEED], bump = engine_state.bump)]
    pub engine_state: Account<'info, EngineState>,

    #[account(
        mut,
        constraint = fee_authority.key() == engine_state.fee_authority @ ErrorCode::UnauthorizedAccess
    )]
    pub fee_authority: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        seeds = [BINDING_SEED, position_binding.position.as_ref()],
        bump = position_binding.bump
    )]
    pub position_binding: Account<'info, PositionBinding>,

    /// CHECK: provider config, parsed defensively; must match the bound provider
    pub provider_config: AccountInfo<'info>,

    #[account(
        init_if_needed,
        payer = fee_authority,
        space = 8 + FeeLedger::LEN,
        seeds = [LEDGER_SEED, provider_config.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub referral_ledger: Account<'info, FeeLedger>,

    #[account(
        init_if_needed,
        payer = fee_authority,
        space = 8 + FeeLedger::LEN,
        seeds = [LEDGER_SEED, engine_state.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub protocol_ledger: Account<'info, FeeLedger>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct AccrueSwapFee<'info> {
    #[account(mut, seeds = [ENGINE_STATE_SEED], bump = engine_state.bump)]
    pub engine_state: Account<'info, EngineState>,

    #[account(
        mut,
        constraint = fee_authority.key() == engine_state.fee_authority @ ErrorCode::UnauthorizedAccess
    )]
    pub fee_authority: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    /// CHECK: provider config passed along with the swap; parsed defensively
    pub provider_config: AccountInfo<'info>,

    #[account(
        init_if_needed,
        payer = fee_authority,
        space = 8 + FeeLedger::LEN,
        seeds = [LEDGER_SEED, provider_config.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub referral_ledger: Account<'info, FeeLedger>,

    #[account(
        init_if_needed,
        payer = fee_authority,
        space = 8 + FeeLedger::LEN,
        seeds = [LEDGER_SEED, engine_state.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub protocol_ledger: Account<'info, FeeLedger>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Collect<'info> {
    #[account(mut, seeds = [ENGINE_STATE_SEED], bump = engine_state.bump)]
    pub engine_state: Account<'info, EngineState>,

    /// CHECK: provider config; the current beneficiary is re-read from it
    pub provider_config: AccountInfo<'info>,

    pub authority: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, provider_config.key().as_ref(), mint.key().as_ref()],
        bump = fee_ledger.bump
    )]
    pub fee_ledger: Account<'info, FeeLedger>,

    /// CHECK: PDA that signs vault transfers
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump = engine_state.authority_bump)]
    pub engine_authority: AccountInfo<'info>,

    #[account(mut, token::mint = mint, token::authority = engine_authority)]
    pub fee_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(mut, token::mint = mint)]
    pub beneficiary_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[derive(Accounts)]
pub struct CollectProtocolFees<'info> {
    #[account(
        mut,
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bump,
        constraint = admin.key() == engine_state.admin @ ErrorCode::UnauthorizedAccess
    )]
    pub engine_state: Account<'info, EngineState>,

    pub admin: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, engine_state.key().as_ref(), mint.key().as_ref()],
        bump = protocol_ledger.bump
    )]
    pub protocol_ledger: Account<'info, FeeLedger>,

    /// CHECK: PDA that signs vault transfers
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump = engine_state.authority_bump)]
    pub engine_authority: AccountInfo<'info>,

    #[account(mut, token::mint = mint, token::authority = engine_authority)]
    pub fee_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(mut, token::mint = mint)]
    pub treasury_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[derive(Accounts)]
pub struct AdminControl<'info> {
    #[account(
        mut,
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bump,
        constraint = admin.key() == engine_state.admin @ ErrorCode::UnauthorizedAccess
    )]
    pub engine_state: Account<'info, EngineState>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    #[account(
        mut,
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bump,
        constraint = admin.key() == engine_state.admin @ ErrorCode::UnauthorizedAccess
    )]
    pub engine_state: Account<'info, EngineState>,

    pub admin: Signer<'info>,

    /// CHECK: New admin
    pub new_admin: AccountInfo<'info>,
}
