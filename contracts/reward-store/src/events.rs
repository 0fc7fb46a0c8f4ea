use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardTokenUpdated {
    #[topic]
    pub token: Address,
    pub active: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardTransferred {
    #[topic]
    pub token: Address,
    #[topic]
    pub to: Address,
    pub requested: u128,
    pub paid: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawal {
    #[topic]
    pub token: Address,
    pub to: Address,
    pub amount: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingOwnerSet {
    #[topic]
    pub pending_owner: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerUpdated {
    #[topic]
    pub old_owner: Address,
    #[topic]
    pub new_owner: Address,
}
