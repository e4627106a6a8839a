// ============================================================================
// UNIT TESTS FOR REFERRAL ENGINE PROGRAM
// ============================================================================
//
// This module contains unit tests for the core logic of the engine.
// Run with: cargo test --lib
//
// Test Categories:
// 1. Fee Split - protocol/referral/owner hierarchy
// 2. Config Parsing - provider config byte layout
// 3. Fee Ledger - credit/drain semantics
// 4. Binding & State - capture flag, settlement lock, account sizes
// ============================================================================

#[cfg(test)]
mod tests {
    use anchor_lang::prelude::*;
    use anchor_lang::Discriminator;

    use crate::constants::*;
    use crate::helpers::lookup::parse_provider_config;
    use crate::helpers::math::split_fee;
    use crate::state::{EngineState, FeeLedger, PositionBinding, ReferralConfig};

    fn config_bytes(authority: &Pubkey, beneficiary: &Pubkey, fee_rate_bps: u16) -> Vec<u8> {
        let mut data = Vec::with_capacity(MIN_CONFIG_ACCOUNT_LEN);
        data.extend_from_slice(ReferralConfig::DISCRIMINATOR);
        data.extend_from_slice(authority.as_ref());
        data.extend_from_slice(beneficiary.as_ref());
        data.extend_from_slice(&fee_rate_bps.to_le_bytes());
        data
    }

    fn fresh_ledger(provider: Pubkey, mint: Pubkey) -> FeeLedger {
        FeeLedger {
            provider,
            mint,
            amount: 0,
            lifetime_accrued: 0,
            lifetime_collected: 0,
            bump: 255,
            _reserved: [0; 16],
        }
    }

    // ========================================================================
    // 1. FEE SPLIT TESTS
    // ========================================================================

    mod fee_split_tests {
        use super::*;

        #[test]
        fn test_split_standard_event() {
            // 1,000,000 raw, 10% protocol cut, 25% referral rate
            let breakdown = split_fee(1_000_000, 10, 2_500).unwrap();

            assert_eq!(breakdown.protocol_cut, 100_000);
            assert_eq!(breakdown.referral_cut, 225_000);
            assert_eq!(breakdown.owner_amount, 675_000);
        }

        #[test]
        fn test_split_zero_fee() {
            let breakdown = split_fee(0, 10, 2_500).unwrap();
            assert_eq!(breakdown.protocol_cut, 0);
            assert_eq!(breakdown.referral_cut, 0);
            assert_eq!(breakdown.owner_amount, 0);
        }

        #[test]
        fn test_split_one_unit() {
            // Truncation leaves the single unit with the owner
            let breakdown = split_fee(1, 10, 2_500).unwrap();
            assert_eq!(breakdown.protocol_cut, 0);
            assert_eq!(breakdown.referral_cut, 0);
            assert_eq!(breakdown.owner_amount, 1);
        }

        #[test]
        fn test_split_max_fee() {
            let breakdown = split_fee(u64::MAX, 10, 2_500).unwrap();
            let total = breakdown
                .protocol_cut
                .checked_add(breakdown.referral_cut)
                .and_then(|v| v.checked_add(breakdown.owner_amount))
                .unwrap();
            assert_eq!(total, u64::MAX);
        }

        #[test]
        fn test_split_full_referral_rate() {
            // 100% referral rate is legal: owner gets nothing for this event
            let breakdown = split_fee(1_000_000, 0, 10_000).unwrap();
            assert_eq!(breakdown.protocol_cut, 0);
            assert_eq!(breakdown.referral_cut, 1_000_000);
            assert_eq!(breakdown.owner_amount, 0);
        }

        #[test]
        fn test_split_zero_referral_rate() {
            let breakdown = split_fee(1_000_000, 10, 0).unwrap();
            assert_eq!(breakdown.protocol_cut, 100_000);
            assert_eq!(breakdown.referral_cut, 0);
            assert_eq!(breakdown.owner_amount, 900_000);
        }

        #[test]
        fn test_split_protocol_disabled() {
            let breakdown = split_fee(1_000_000, 0, 2_500).unwrap();
            assert_eq!(breakdown.protocol_cut, 0);
            assert_eq!(breakdown.referral_cut, 250_000);
            assert_eq!(breakdown.owner_amount, 750_000);
        }

        #[test]
        fn test_split_rejects_rate_above_limit() {
            let result = split_fee(1_000_000, 10, 10_001);
            assert!(result.is_err(), "rates above 10000 bps must be rejected");
        }

        #[test]
        fn test_split_truncation_favors_owner() {
            // 999 * 2500 / 10000 = 249.75, truncated to 249
            let breakdown = split_fee(999, 0, 2_500).unwrap();
            assert_eq!(breakdown.referral_cut, 249);
            assert_eq!(breakdown.owner_amount, 750);
        }
    }

    // ========================================================================
    // 2. CONFIG PARSING TESTS
    // ========================================================================

    mod config_parsing_tests {
        use super::*;

        #[test]
        fn test_parse_valid_config() {
            let authority = Pubkey::new_unique();
            let beneficiary = Pubkey::new_unique();
            let data = config_bytes(&authority, &beneficiary, 2_500);

            let config = parse_provider_config(&data).unwrap();
            assert_eq!(config.authority, authority);
            assert_eq!(config.beneficiary, beneficiary);
            assert_eq!(config.fee_rate_bps, 2_500);
        }

        #[test]
        fn test_parse_trailing_bytes_ignored() {
            // Providers may keep private state past the known layout
            let mut data = config_bytes(&Pubkey::new_unique(), &Pubkey::new_unique(), 100);
            data.extend_from_slice(&[7u8; 64]);

            assert!(parse_provider_config(&data).is_some());
        }

        #[test]
        fn test_parse_short_data() {
            let data = vec![0u8; MIN_CONFIG_ACCOUNT_LEN - 1];
            assert!(parse_provider_config(&data).is_none());
        }

        #[test]
        fn test_parse_empty_data() {
            assert!(parse_provider_config(&[]).is_none());
        }

        #[test]
        fn test_parse_oversized_data() {
            let mut data = config_bytes(&Pubkey::new_unique(), &Pubkey::new_unique(), 100);
            data.resize(MAX_CONFIG_ACCOUNT_LEN + 1, 0);
            assert!(parse_provider_config(&data).is_none());
        }

        #[test]
        fn test_parse_wrong_discriminator() {
            let mut data = config_bytes(&Pubkey::new_unique(), &Pubkey::new_unique(), 100);
            data[0] ^= 0xFF;
            assert!(parse_provider_config(&data).is_none());
        }

        #[test]
        fn test_parse_rate_above_limit_unavailable() {
            // 150% must read as unavailable, not as 100% and not as 150%
            let data = config_bytes(&Pubkey::new_unique(), &Pubkey::new_unique(), 15_000);
            assert!(parse_provider_config(&data).is_none());
        }

        #[test]
        fn test_parse_full_rate_available() {
            let data = config_bytes(&Pubkey::new_unique(), &Pubkey::new_unique(), 10_000);
            let config = parse_provider_config(&data).unwrap();
            assert_eq!(config.fee_rate_bps, 10_000);
        }

        #[test]
        fn test_broken_config_costs_only_the_cut() {
            // A fee event against an unreadable config still splits cleanly
            // with a zero referral cut
            let rate_bps = match parse_provider_config(&[0u8; 16]) {
                Some(config) => config.fee_rate_bps,
                None => 0,
            };
            let breakdown = split_fee(1_000_000, 10, rate_bps).unwrap();
            assert_eq!(breakdown.referral_cut, 0);
            assert_eq!(breakdown.owner_amount, 900_000);
        }
    }

    // ========================================================================
    // 3. FEE LEDGER TESTS
    // ========================================================================

    mod fee_ledger_tests {
        use super::*;

        #[test]
        fn test_credit_accumulates() {
            let mut ledger = fresh_ledger(Pubkey::new_unique(), Pubkey::new_unique());

            ledger.credit(225_000).unwrap();
            ledger.credit(225_000).unwrap();

            assert_eq!(ledger.amount, 450_000);
            assert_eq!(ledger.lifetime_accrued, 450_000);
        }

        #[test]
        fn test_credit_overflow_fails() {
            let mut ledger = fresh_ledger(Pubkey::new_unique(), Pubkey::new_unique());
            ledger.credit(u64::MAX).unwrap();

            assert!(ledger.credit(1).is_err(), "overflow must abort, not wrap");
            // Balance untouched by the failed credit
            assert_eq!(ledger.amount, u64::MAX);
        }

        #[test]
        fn test_drain_returns_and_zeroes() {
            let mut ledger = fresh_ledger(Pubkey::new_unique(), Pubkey::new_unique());
            ledger.credit(450_000).unwrap();

            assert_eq!(ledger.drain(), 450_000);
            assert_eq!(ledger.amount, 0);
            assert_eq!(ledger.lifetime_collected, 450_000);
        }

        #[test]
        fn test_drain_idempotent() {
            let mut ledger = fresh_ledger(Pubkey::new_unique(), Pubkey::new_unique());
            ledger.credit(450_000).unwrap();

            assert_eq!(ledger.drain(), 450_000);
            assert_eq!(ledger.drain(), 0, "second drain without accrual pays nothing");
            assert_eq!(ledger.drain(), 0);
        }

        #[test]
        fn test_drain_on_empty_ledger() {
            let mut ledger = fresh_ledger(Pubkey::new_unique(), Pubkey::new_unique());
            assert_eq!(ledger.drain(), 0);
        }

        #[test]
        fn test_lifetime_invariant() {
            let mut ledger = fresh_ledger(Pubkey::new_unique(), Pubkey::new_unique());
            ledger.credit(100).unwrap();
            ledger.drain();
            ledger.credit(250).unwrap();

            assert_eq!(
                ledger.lifetime_accrued,
                ledger.amount + ledger.lifetime_collected
            );
        }

        #[test]
        fn test_ledgers_are_independent() {
            let mint = Pubkey::new_unique();
            let mut ledger_a = fresh_ledger(Pubkey::new_unique(), mint);
            let mut ledger_b = fresh_ledger(Pubkey::new_unique(), mint);

            ledger_a.credit(100_000).unwrap();
            ledger_b.credit(70_000).unwrap();

            assert_eq!(ledger_a.drain(), 100_000);
            assert_eq!(ledger_b.amount, 70_000, "draining A must not touch B");
        }

        #[test]
        fn test_two_standard_events_accumulate() {
            // Two identical fee events for the same provider/mint
            let mut ledger = fresh_ledger(Pubkey::new_unique(), Pubkey::new_unique());
            for _ in 0..2 {
                let breakdown = split_fee(1_000_000, 10, 2_500).unwrap();
                ledger.credit(breakdown.referral_cut).unwrap();
            }
            assert_eq!(ledger.amount, 450_000);
        }

        #[test]
        fn test_ensure_initialized_write_once() {
            let provider = Pubkey::new_unique();
            let mint = Pubkey::new_unique();
            let mut ledger = fresh_ledger(Pubkey::default(), Pubkey::default());

            ledger.ensure_initialized(provider, mint, 254);
            assert_eq!(ledger.provider, provider);

            // A later call with a different identity is ignored
            ledger.ensure_initialized(Pubkey::new_unique(), Pubkey::new_unique(), 1);
            assert_eq!(ledger.provider, provider);
            assert_eq!(ledger.mint, mint);
            assert_eq!(ledger.bump, 254);
        }
    }

    // ========================================================================
    // 4. BINDING & STATE TESTS
    // ========================================================================

    mod binding_and_state_tests {
        use super::*;

        fn fresh_state() -> EngineState {
            EngineState {
                admin: Pubkey::new_unique(),
                fee_authority: Pubkey::new_unique(),
                treasury: Pubkey::new_unique(),
                protocol_fee_denominator: 10,
                authority_bump: 255,
                bump: 255,
                paused: false,
                locked: false,
                total_providers: 0,
                total_referral_fees: 0,
                total_protocol_fees: 0,
                total_collected: 0,
                initialized_at: 0,
                _reserved: [0; 32],
            }
        }

        #[test]
        fn test_binding_capture_flag() {
            let mut binding = PositionBinding {
                position: Pubkey::new_unique(),
                provider: Pubkey::default(),
                created_at: 0,
                bump: 255,
            };
            assert!(!binding.is_captured());

            binding.provider = Pubkey::new_unique();
            assert!(binding.is_captured());
        }

        #[test]
        fn test_settlement_lock_rejects_nested_entry() {
            let mut state = fresh_state();

            state.begin_settlement().unwrap();
            assert!(state.begin_settlement().is_err());
            assert!(state.assert_unlocked().is_err());

            state.end_settlement();
            assert!(state.assert_unlocked().is_ok());
            assert!(state.begin_settlement().is_ok());
        }

        #[test]
        fn test_account_sizes() {
            assert_eq!(EngineState::LEN, 173);
            assert_eq!(ReferralConfig::LEN, 91);
            assert_eq!(PositionBinding::LEN, 73);
            assert_eq!(FeeLedger::LEN, 105);
        }
    }
}
