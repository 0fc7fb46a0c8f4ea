use soroban_sdk::{contractevent, Address, Symbol};

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
pub struct RewardStoreUpdated {
    #[topic]
    pub reward_store: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GovernancePoolUpdated {
    #[topic]
    pub reward_token: Address,
    pub pid: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAdded {
    #[topic]
    pub reward_token: Address,
    #[topic]
    pub pid: u32,
    pub staked_token: Address,
    pub alloc_point: u128,
    pub reward_per_block: u128,
    pub lock_period: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdated {
    #[topic]
    pub reward_token: Address,
    #[topic]
    pub pid: u32,
    pub old_alloc_point: u128,
    pub new_alloc_point: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardAmountUpdated {
    #[topic]
    pub reward_token: Address,
    pub old_amount: u128,
    pub new_amount: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockPeriodUpdated {
    #[topic]
    pub reward_token: Address,
    #[topic]
    pub pid: u32,
    pub old_period: u64,
    pub new_period: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultPaused {
    #[topic]
    pub caller: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultResumed {
    #[topic]
    pub caller: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    #[topic]
    pub user: Address,
    #[topic]
    pub reward_token: Address,
    pub pid: u32,
    pub amount: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalRequested {
    #[topic]
    pub user: Address,
    #[topic]
    pub reward_token: Address,
    pub pid: u32,
    pub amount: u128,
    pub locked_until: u64,
    pub legacy: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalExecuted {
    #[topic]
    pub user: Address,
    #[topic]
    pub reward_token: Address,
    pub pid: u32,
    pub amount: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Claim {
    #[topic]
    pub user: Address,
    #[topic]
    pub reward_token: Address,
    pub pid: u32,
    pub amount: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultDebtUpdated {
    #[topic]
    pub reward_token: Address,
    #[topic]
    pub account: Address,
    pub old_debt: u128,
    pub new_debt: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegateChanged {
    #[topic]
    pub delegator: Address,
    #[topic]
    pub to_delegate: Address,
    pub from_delegate: Option<Address>,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegateVotesChanged {
    #[topic]
    pub delegate: Address,
    pub previous_votes: u128,
    pub new_votes: u128,
}

/// Outbound voting-weight update picked up by relayers.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteMessageQueued {
    #[topic]
    pub origin: u32,
    #[topic]
    pub seq: u64,
    pub account: Address,
    pub weight: u128,
    pub block: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExternalCallFailed {
    #[topic]
    pub contract: Address,
    pub function: Symbol,
}
