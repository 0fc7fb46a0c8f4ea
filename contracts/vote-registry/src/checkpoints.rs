use soroban_sdk::{Address, Env};

use crate::errors::RegistryError;
use crate::storage::{self, Checkpoint};

const MAX_ORIGINS_PER_ACCOUNT: u32 = 16;

pub fn latest(env: &Env, account: &Address, origin: u32) -> Option<Checkpoint> {
    let count = storage::num_checkpoints(env, account, origin);
    if count == 0 {
        return None;
    }
    storage::checkpoint(env, account, origin, count - 1)
}

/// Records `votes` for `account` on `origin` from the current ledger
/// onwards. A second write in the same ledger replaces the first.
pub fn write(
    env: &Env,
    account: &Address,
    origin: u32,
    origin_block: u32,
    votes: u128,
) -> Result<(), RegistryError> {
    let block = env.ledger().sequence();
    let count = storage::num_checkpoints(env, account, origin);
    let value = Checkpoint {
        from_block: block,
        origin_block,
        votes,
    };
    if count == 0 {
        let mut origins = storage::account_origins(env, account);
        if !origins.contains(origin) {
            if origins.len() >= MAX_ORIGINS_PER_ACCOUNT {
                return Err(RegistryError::TooManyOrigins);
            }
            origins.push_back(origin);
            storage::set_account_origins(env, account, &origins);
        }
    }
    match latest(env, account, origin) {
        Some(last) if last.from_block == block => {
            storage::set_checkpoint(env, account, origin, count - 1, &value);
        }
        _ => {
            storage::set_checkpoint(env, account, origin, count, &value);
            storage::set_num_checkpoints(env, account, origin, count + 1);
        }
    }
    Ok(())
}

/// Votes in force for `account` on `origin` at the end of registry ledger
/// `block`.
pub fn at(env: &Env, account: &Address, origin: u32, block: u32) -> u128 {
    let count = storage::num_checkpoints(env, account, origin);
    if count == 0 {
        return 0;
    }
    let mut lower = 0u32;
    let mut upper = count;
    // First checkpoint strictly after `block`.
    while lower < upper {
        let mid = lower + (upper - lower) / 2;
        match storage::checkpoint(env, account, origin, mid) {
            Some(cp) if cp.from_block <= block => lower = mid + 1,
            _ => upper = mid,
        }
    }
    if lower == 0 {
        return 0;
    }
    storage::checkpoint(env, account, origin, lower - 1)
        .map(|cp| cp.votes)
        .unwrap_or(0)
}
