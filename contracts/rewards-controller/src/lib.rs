#![no_std]

mod allocator;
mod constants;
mod contract;
mod errors;
mod events;
mod flywheel;
mod helpers;
mod risk;
mod storage;

pub use contract::{RewardsController, RewardsControllerClient};
pub use errors::{ControllerError, FailureCode};
pub use storage::{Action, Market, MarketSnapshot, RewardSide, RewardState};

mod test;
