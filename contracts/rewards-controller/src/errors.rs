use soroban_sdk::{contracterror, Env};

use crate::events::Failure;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ControllerError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    MarketNotListed = 5,
    MarketAlreadyListed = 6,
    MarketAlreadyRewarded = 7,
    MarketNotRewarded = 8,
    ActionPaused = 9,
    SupplyCapReached = 10,
    BorrowCapReached = 11,
    InsufficientLiquidity = 12,
    ExitWithBorrowBalance = 13,
    PriceError = 14,
    OracleNotSet = 15,
    InvalidCollateralFactor = 16,
    InvalidCloseFactor = 17,
    InvalidLiquidationIncentive = 18,
    MathOverflow = 19,
    RewardTokenNotSet = 20,
    RewardMarketNotSet = 21,
    AccountBlacklisted = 22,
    /// Account has a shortfall; use `claim_as_collateral`.
    BankruptUseCollateralClaim = 23,
    TooManyMarkets = 24,
    AccessControlNotSet = 25,
}

/// Non-aborting failure codes returned by the liquidation hooks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum FailureCode {
    NoError = 0,
    MarketNotListed = 1,
    MarketNotFresh = 2,
    InsufficientShortfall = 3,
    TooMuchRepay = 4,
    PriceError = 5,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum FailureInfo {
    LiquidateComptrollerRejection = 0,
    LiquidateFreshnessCheck = 1,
    LiquidateShortfallCheck = 2,
    LiquidateCloseAmountTooMuch = 3,
    LiquidatePriceCheck = 4,
}

/// Publishes the (error, info, detail) triple and hands back the code.
pub(crate) fn fail(env: &Env, code: FailureCode, info: FailureInfo, detail: u128) -> u32 {
    Failure {
        error: code as u32,
        info: info as u32,
        detail,
    }
    .publish(env);
    code as u32
}
