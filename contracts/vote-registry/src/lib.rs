#![no_std]
//! Remote side of the vault's voting-weight mirror. Relayers deliver
//! `(seq, account, weight, block)` messages per origin chain; the registry
//! keeps a checkpoint history per account and origin and answers
//! prior-votes queries summed over all origins.

mod checkpoints;
mod contract;
mod errors;
mod events;
mod storage;

pub use contract::{VoteRegistry, VoteRegistryClient};
pub use errors::RegistryError;
pub use storage::{ApplyOutcome, Checkpoint, DeadLetter, VoteMessage};
