use soroban_sdk::{contractevent, Address, Symbol};

use crate::storage::{Action, RewardSide};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminUpdated {
    #[topic]
    pub admin: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessControlUpdated {
    #[topic]
    pub access_control: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleUpdated {
    #[topic]
    pub oracle: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DenyListUpdated {
    #[topic]
    pub deny_list: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketListed {
    #[topic]
    pub market: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketEntered {
    #[topic]
    pub account: Address,
    #[topic]
    pub market: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketExited {
    #[topic]
    pub account: Address,
    #[topic]
    pub market: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateralFactorUpdated {
    #[topic]
    pub market: Address,
    pub old_mantissa: u128,
    pub new_mantissa: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CloseFactorUpdated {
    pub close_factor_mantissa: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiquidationIncentiveUpdated {
    pub incentive_mantissa: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SupplyCapUpdated {
    #[topic]
    pub market: Address,
    pub cap: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BorrowCapUpdated {
    #[topic]
    pub market: Address,
    pub cap: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActionPausedUpdated {
    #[topic]
    pub market: Address,
    pub action: Action,
    pub paused: bool,
}

/// Compound-style structured failure: (error, info, detail).
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Failure {
    pub error: u32,
    pub info: u32,
    pub detail: u128,
}

// Rewards

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardTokenSet {
    #[topic]
    pub token: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardMarketSet {
    #[topic]
    pub market: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimThresholdUpdated {
    pub old_threshold: u128,
    pub new_threshold: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateUpdated {
    pub old_rate: u128,
    pub new_rate: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MaterialityThresholdUpdated {
    pub old_threshold: u128,
    pub new_threshold: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardEligibilityUpdated {
    #[topic]
    pub market: Address,
    pub eligible: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardIndexUpdated {
    #[topic]
    pub market: Address,
    pub side: RewardSide,
    pub index: u128,
    pub block: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardSpeedUpdated {
    #[topic]
    pub market: Address,
    pub old_speed: u128,
    pub new_speed: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributedSupplierReward {
    #[topic]
    pub market: Address,
    #[topic]
    pub supplier: Address,
    pub delta: u128,
    pub supply_index: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributedBorrowerReward {
    #[topic]
    pub market: Address,
    #[topic]
    pub borrower: Address,
    pub delta: u128,
    pub borrow_index: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardDebtUpdated {
    #[topic]
    pub account: Address,
    pub old_debt: u128,
    pub new_debt: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardGranted {
    #[topic]
    pub account: Address,
    pub amount: u128,
    pub as_collateral: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExternalCallFailed {
    #[topic]
    pub contract: Address,
    pub function: Symbol,
}
