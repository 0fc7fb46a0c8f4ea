use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RelayerUpdated {
    #[topic]
    pub relayer: Address,
    pub active: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OriginUpdated {
    #[topic]
    pub origin: u32,
    pub trusted: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryPaused {
    #[topic]
    pub caller: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryResumed {
    #[topic]
    pub caller: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteMessageApplied {
    #[topic]
    pub origin: u32,
    #[topic]
    pub seq: u64,
    pub account: Address,
    pub weight: u128,
    pub block: u32,
}

/// Delivered after a newer checkpoint for the same account; recorded but
/// not written.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StaleVoteMessage {
    #[topic]
    pub origin: u32,
    #[topic]
    pub seq: u64,
    pub account: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteMessageDeadLettered {
    #[topic]
    pub origin: u32,
    #[topic]
    pub seq: u64,
}
