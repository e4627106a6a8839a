pub mod engine_state;
pub mod fee_ledger;
pub mod position_binding;
pub mod referral_config;

pub use engine_state::*;
pub use fee_ledger::*;
pub use position_binding::*;
pub use referral_config::*;
