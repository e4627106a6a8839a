use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod helpers;
pub mod state;

mod formal_verification;
mod tests;

use constants::*;
use contexts::*;
use errors::ErrorCode;
use events::*;
use helpers::cpi::transfer_from_vault;
use helpers::lookup::read_provider_config;
use helpers::math::split_fee;
use state::{EngineState, FeeLedger};

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod referral_engine {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        fee_authority: Pubkey,
        treasury: Pubkey,
        protocol_fee_denominator: u8,
    ) -> Result<()> {
        require!(fee_authority != Pubkey::default(), ErrorCode::InvalidParameter);
        require!(treasury != Pubkey::default(), ErrorCode::InvalidParameter);
        require!(
            protocol_fee_denominator == 0
                || protocol_fee_denominator >= MIN_PROTOCOL_FEE_DENOMINATOR,
            ErrorCode::InvalidProtocolFee
        );

        let state = &mut ctx.accounts.engine_state;
        let clock = Clock::get()?;

        state.admin = ctx.accounts.admin.key();
        state.fee_authority = fee_authority;
        state.treasury = treasury;
        state.protocol_fee_denominator = protocol_fee_denominator;
        state.authority_bump = ctx.bumps.engine_authority;
        state.bump = ctx.bumps.engine_state;
        state.paused = false;
        state.locked = false;
        state.total_providers = 0;
        state.total_referral_fees = 0;
        state.total_protocol_fees = 0;
        state.total_collected = 0;
        state.initialized_at = clock.unix_timestamp;

        emit!(EngineInitialized {
            admin: state.admin,
            fee_authority,
            engine_authority: ctx.accounts.engine_authority.key(),
            protocol_fee_denominator,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }

    /// Create a registry entry for a referring provider. The resulting
    /// config account address is the provider identity everywhere else in
    /// the engine: ledgers and bindings key on it, never on the wallet
    /// behind it.
    pub fn register_provider(
        ctx: Context<RegisterProvider>,
        beneficiary: Pubkey,
        fee_rate_bps: u16,
    ) -> Result<()> {
        let state = &mut ctx.accounts.engine_state;
        require!(!state.paused, ErrorCode::EnginePaused);
        require!(
            fee_rate_bps <= MAX_REFERRAL_RATE_BPS,
            ErrorCode::InvalidFeeRate
        );
        require!(beneficiary != Pubkey::default(), ErrorCode::InvalidBeneficiary);

        let clock = Clock::get()?;
        let config = &mut ctx.accounts.referral_config;
        config.authority = ctx.accounts.authority.key();
        config.beneficiary = beneficiary;
        config.fee_rate_bps = fee_rate_bps;
        config.bump = ctx.bumps.referral_config;
        config.created_at = clock.unix_timestamp;

        state.total_providers = state.total_providers.saturating_add(1);

        emit!(ProviderRegistered {
            provider: config.key(),
            authority: config.authority,
            beneficiary,
            fee_rate_bps,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }

    pub fn set_beneficiary(
        ctx: Context<UpdateProviderConfig>,
        new_beneficiary: Pubkey,
    ) -> Result<()> {
        require!(
            new_beneficiary != Pubkey::default(),
            ErrorCode::InvalidBeneficiary
        );

        let config = &mut ctx.accounts.referral_config;
        let old_beneficiary = config.beneficiary;
        config.beneficiary = new_beneficiary;

        emit!(BeneficiaryUpdated {
            provider: config.key(),
            old_beneficiary,
            new_beneficiary,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }

    pub fn set_fee_rate(ctx: Context<UpdateProviderConfig>, new_rate_bps: u16) -> Result<()> {
        require!(
            new_rate_bps <= MAX_REFERRAL_RATE_BPS,
            ErrorCode::InvalidFeeRate
        );

        let config = &mut ctx.accounts.referral_config;
        let old_rate_bps = config.fee_rate_bps;
        config.fee_rate_bps = new_rate_bps;

        emit!(FeeRateUpdated {
            provider: config.key(),
            old_rate_bps,
            new_rate_bps,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }

    /// Bind a freshly created position to the provider requesting it. The
    /// binding is write-once: if one already exists for this position the
    /// call is a silent no-op, so replays and duplicate creation flows never
    /// reassign accrued attribution.
    pub fn register_binding(ctx: Context<RegisterBinding>) -> Result<()> {
        let state = &ctx.accounts.engine_state;
        require!(!state.paused, ErrorCode::EnginePaused);
        state.assert_unlocked()?;

        let binding = &mut ctx.accounts.position_binding;
        if binding.is_captured() {
            #[cfg(feature = "verbose")]
            msg!("binding already captured for {}", binding.position);
            return Ok(());
        }

        // Capture requires a readable config whose declared authority signed
        // this instruction, so a binding can only name a provider that asked
        // for it.
        let config = read_provider_config(&ctx.accounts.provider_config)
            .ok_or(ErrorCode::InvalidProviderConfig)?;
        require_keys_eq!(
            config.authority,
            ctx.accounts.provider_authority.key(),
            ErrorCode::UnauthorizedAccess
        );

        let clock = Clock::get()?;
        binding.position = ctx.accounts.position.key();
        binding.provider = ctx.accounts.provider_config.key();
        binding.created_at = clock.unix_timestamp;
        binding.bump = ctx.bumps.position_binding;

        emit!(BindingCaptured {
            position: binding.position,
            provider: binding.provider,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }

    /// Run one position fee event through the fee hierarchy: protocol cut
    /// first, then the referral cut for the bound provider, remainder to the
    /// position owner. Returns the owner remainder so the pool applies it
    /// wherever it previously applied the full fee.
    ///
    /// The provider's rate is read live on every event; a config that cannot
    /// be read, or carries an out-of-range rate, yields a zero referral cut
    /// and the event still succeeds.
    pub fn accrue_position_fee(ctx: Context<AccruePositionFee>, raw_fee: u64) -> Result<u64> {
        require!(!ctx.accounts.engine_state.paused, ErrorCode::EnginePaused);
        ctx.accounts.engine_state.assert_unlocked()?;

        require_keys_eq!(
            ctx.accounts.position_binding.provider,
            ctx.accounts.provider_config.key(),
            ErrorCode::ProviderMismatch
        );

        let position = ctx.accounts.position_binding.position;
        let mint_key = ctx.accounts.mint.key();
        accrue_fee_event(
            &mut ctx.accounts.engine_state,
            &ctx.accounts.provider_config,
            &mut ctx.accounts.referral_ledger,
            &mut ctx.accounts.protocol_ledger,
            mint_key,
            ctx.bumps.referral_ledger,
            ctx.bumps.protocol_ledger,
            position,
            raw_fee,
        )
    }

    /// Swap-level variant: swaps are instantaneous, so the config account
    /// passed along with the swap is the transient binding and nothing is
    /// persisted beyond the ledger credit.
    pub fn accrue_swap_fee(ctx: Context<AccrueSwapFee>, raw_fee: u64) -> Result<u64> {
        require!(!ctx.accounts.engine_state.paused, ErrorCode::EnginePaused);
        ctx.accounts.engine_state.assert_unlocked()?;

        let mint_key = ctx.accounts.mint.key();
        accrue_fee_event(
            &mut ctx.accounts.engine_state,
            &ctx.accounts.provider_config,
            &mut ctx.accounts.referral_ledger,
            &mut ctx.accounts.protocol_ledger,
            mint_key,
            ctx.bumps.referral_ledger,
            ctx.bumps.protocol_ledger,
            Pubkey::default(),
            raw_fee,
        )
    }

    /// Pay out everything accrued for (provider, mint) to the provider's
    /// current beneficiary. Self-service: only the authority declared in the
    /// provider's config right now may trigger it, and there is no recipient
    /// parameter — the destination must belong to the current beneficiary.
    ///
    /// The ledger is zeroed and written back before the outbound transfer,
    /// so code reached through the transfer (Token-2022 hooks) can never
    /// observe a stale balance and double-collect.
    pub fn collect(ctx: Context<Collect>) -> Result<u64> {
        ctx.accounts.engine_state.begin_settlement()?;

        let config = read_provider_config(&ctx.accounts.provider_config)
            .ok_or(ErrorCode::NoActiveBeneficiary)?;
        require_keys_eq!(
            config.authority,
            ctx.accounts.authority.key(),
            ErrorCode::UnauthorizedAccess
        );
        require!(
            config.beneficiary != Pubkey::default(),
            ErrorCode::NoActiveBeneficiary
        );
        require_keys_eq!(
            ctx.accounts.beneficiary_token_account.owner,
            config.beneficiary,
            ErrorCode::BeneficiaryAccountMismatch
        );

        let amount = ctx.accounts.fee_ledger.drain();
        ctx.accounts.engine_state.total_collected = ctx
            .accounts
            .engine_state
            .total_collected
            .saturating_add(amount);

        // Persist the zeroed ledger and the held lock before handing control
        // to the token program.
        ctx.accounts.fee_ledger.exit(ctx.program_id)?;
        ctx.accounts.engine_state.exit(ctx.program_id)?;

        transfer_from_vault(
            &ctx.accounts.token_program,
            &ctx.accounts.fee_vault,
            &ctx.accounts.mint,
            &ctx.accounts.beneficiary_token_account,
            &ctx.accounts.engine_authority,
            ctx.accounts.engine_state.authority_bump,
            amount,
        )?;

        ctx.accounts.engine_state.end_settlement();

        emit!(FeesCollected {
            provider: ctx.accounts.provider_config.key(),
            beneficiary: config.beneficiary,
            mint: ctx.accounts.mint.key(),
            amount,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(amount)
    }

    /// Drain the protocol ledger for one mint to the configured treasury.
    /// Same discipline as `collect`: zero first, transfer second.
    pub fn collect_protocol_fees(ctx: Context<CollectProtocolFees>) -> Result<u64> {
        ctx.accounts.engine_state.begin_settlement()?;

        require_keys_eq!(
            ctx.accounts.treasury_token_account.owner,
            ctx.accounts.engine_state.treasury,
            ErrorCode::InvalidTreasuryAccount
        );

        let amount = ctx.accounts.protocol_ledger.drain();

        ctx.accounts.protocol_ledger.exit(ctx.program_id)?;
        ctx.accounts.engine_state.exit(ctx.program_id)?;

        transfer_from_vault(
            &ctx.accounts.token_program,
            &ctx.accounts.fee_vault,
            &ctx.accounts.mint,
            &ctx.accounts.treasury_token_account,
            &ctx.accounts.engine_authority,
            ctx.accounts.engine_state.authority_bump,
            amount,
        )?;

        ctx.accounts.engine_state.end_settlement();

        emit!(ProtocolFeesCollected {
            treasury: ctx.accounts.engine_state.treasury,
            mint: ctx.accounts.mint.key(),
            amount,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(amount)
    }

    pub fn set_protocol_fee(ctx: Context<AdminControl>, new_denominator: u8) -> Result<()> {
        require!(
            new_denominator == 0 || new_denominator >= MIN_PROTOCOL_FEE_DENOMINATOR,
            ErrorCode::InvalidProtocolFee
        );

        let state = &mut ctx.accounts.engine_state;
        let old_denominator = state.protocol_fee_denominator;
        state.protocol_fee_denominator = new_denominator;

        emit!(ProtocolFeeUpdated {
            old_denominator,
            new_denominator,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }

    /// Stop accrual and registration. Collection of already accrued fees
    /// stays available so a pause never strands provider funds.
    pub fn pause(ctx: Context<AdminControl>) -> Result<()> {
        let state = &mut ctx.accounts.engine_state;
        state.paused = true;
        emit!(StatusChanged {
            paused: true,
            admin: ctx.accounts.admin.key(),
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    pub fn resume(ctx: Context<AdminControl>) -> Result<()> {
        let state = &mut ctx.accounts.engine_state;
        state.paused = false;
        emit!(StatusChanged {
            paused: false,
            admin: ctx.accounts.admin.key(),
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    pub fn transfer_admin(ctx: Context<TransferAdmin>) -> Result<()> {
        require!(
            ctx.accounts.new_admin.key() != Pubkey::default(),
            ErrorCode::InvalidParameter
        );

        let state = &mut ctx.accounts.engine_state;
        state.admin = ctx.accounts.new_admin.key();

        emit!(AdminTransferred {
            old_admin: ctx.accounts.admin.key(),
            new_admin: state.admin,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}

// HELPERS

/// Shared accrual path for position- and swap-level fee events. Splits the
/// raw fee, credits both ledgers, updates the global counters, and returns
/// the owner remainder.
#[inline(never)]
#[allow(clippy::too_many_arguments)]
fn accrue_fee_event<'info>(
    engine_state: &mut Account<'info, EngineState>,
    provider_config: &AccountInfo<'info>,
    referral_ledger: &mut Account<'info, FeeLedger>,
    protocol_ledger: &mut Account<'info, FeeLedger>,
    mint_key: Pubkey,
    referral_ledger_bump: u8,
    protocol_ledger_bump: u8,
    position: Pubkey,
    raw_fee: u64,
) -> Result<u64> {
    let clock = Clock::get()?;
    let provider = provider_config.key();
    let state_key = engine_state.key();

    referral_ledger.ensure_initialized(provider, mint_key, referral_ledger_bump);
    protocol_ledger.ensure_initialized(state_key, mint_key, protocol_ledger_bump);

    // A config that cannot be read right now costs the provider this event's
    // cut, nothing more; the fee event itself must go through regardless.
    let rate_bps = match read_provider_config(provider_config) {
        Some(config) => config.fee_rate_bps,
        None => {
            emit!(ConfigLookupFailed {
                provider,
                mint: mint_key,
                timestamp: clock.unix_timestamp,
            });
            0
        }
    };

    let breakdown = split_fee(raw_fee, engine_state.protocol_fee_denominator, rate_bps)?;

    if breakdown.protocol_cut > 0 {
        protocol_ledger.credit(breakdown.protocol_cut)?;
        engine_state.total_protocol_fees = engine_state
            .total_protocol_fees
            .checked_add(breakdown.protocol_cut)
            .ok_or(ErrorCode::MathOverflow)?;
    }

    if breakdown.referral_cut > 0 {
        referral_ledger.credit(breakdown.referral_cut)?;
        engine_state.total_referral_fees = engine_state
            .total_referral_fees
            .checked_add(breakdown.referral_cut)
            .ok_or(ErrorCode::MathOverflow)?;
    }

    #[cfg(feature = "verbose")]
    msg!(
        "accrued: provider={}, mint={}, referral={}, protocol={}",
        provider,
        mint_key,
        breakdown.referral_cut,
        breakdown.protocol_cut
    );

    emit!(FeesAccrued {
        position,
        provider,
        mint: mint_key,
        raw_fee,
        protocol_cut: breakdown.protocol_cut,
        referral_cut: breakdown.referral_cut,
        owner_amount: breakdown.owner_amount,
        timestamp: clock.unix_timestamp,
    });

    Ok(breakdown.owner_amount)
}
