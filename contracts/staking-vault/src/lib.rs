#![no_std]

mod constants;
mod contract;
mod errors;
mod events;
mod helpers;
mod payout;
mod pool;
mod storage;
mod votes;

pub use contract::{StakingVault, StakingVaultClient};
pub use errors::VaultError;
pub use storage::{
    GovernancePool, PendingWithdrawal, PoolInfo, UserInfo, VoteCheckpoint, VoteMessage,
    WithdrawalRequest,
};

mod test;
