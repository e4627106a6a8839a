use anchor_lang::prelude::*;

/// Referral engine error codes
///
/// Lookup failures against provider configs are deliberately absent: a broken
/// or malicious config is coerced to "no referral" during accrual and must
/// never abort the pool operation that produced the fee.
#[error_code]
pub enum ErrorCode {
    #[msg("Engine paused")]
    EnginePaused,

    #[msg("Unauthorized")]
    UnauthorizedAccess,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Fee rate exceeds 10000 basis points")]
    InvalidFeeRate,

    #[msg("Beneficiary cannot be the default address")]
    InvalidBeneficiary,

    #[msg("Invalid protocol fee denominator")]
    InvalidProtocolFee,

    #[msg("Provider config unreadable")]
    InvalidProviderConfig,

    #[msg("Config account does not match the bound provider")]
    ProviderMismatch,

    #[msg("No active beneficiary for this provider")]
    NoActiveBeneficiary,

    #[msg("Destination account is not owned by the current beneficiary")]
    BeneficiaryAccountMismatch,

    #[msg("Destination account is not owned by the treasury")]
    InvalidTreasuryAccount,

    #[msg("Settlement already in progress")]
    SettlementInProgress,

    #[msg("Invalid parameter")]
    InvalidParameter,
}
