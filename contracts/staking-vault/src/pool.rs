use protocol_math::Exp18;
use soroban_sdk::{Address, Env};

use crate::errors::VaultError;
use crate::storage::{self, PoolInfo, UserInfo};

/// Reward per share of `pool` as it would stand at `block`, without writing.
pub fn acc_reward_per_share_at(
    env: &Env,
    reward_token: &Address,
    pool: &PoolInfo,
    block: u32,
) -> Result<Exp18, VaultError> {
    let acc = Exp18::from_raw(pool.acc_reward_per_share);
    if block <= pool.last_reward_block || pool.total_staked == 0 {
        return Ok(acc);
    }
    let total_alloc = storage::total_alloc_points(env, reward_token);
    if total_alloc == 0 {
        return Ok(acc);
    }
    let delta = (block - pool.last_reward_block) as u128;
    let emitted = delta
        .checked_mul(storage::reward_per_block(env, reward_token))
        .and_then(|gross| protocol_math::mul_div_floor(env, gross, pool.alloc_point, total_alloc))
        .ok_or(VaultError::MathOverflow)?;
    let growth = Exp18::ratio(env, emitted, pool.total_staked).ok_or(VaultError::MathOverflow)?;
    acc.checked_add(growth).ok_or(VaultError::MathOverflow)
}

/// Brings the pool up to the current ledger and persists it. An empty pool
/// only moves `last_reward_block`.
pub fn update_pool(env: &Env, reward_token: &Address, pid: u32) -> Result<PoolInfo, VaultError> {
    let mut pool = storage::get_pool(env, reward_token, pid)?;
    let block = env.ledger().sequence();
    if block <= pool.last_reward_block {
        return Ok(pool);
    }
    pool.acc_reward_per_share = acc_reward_per_share_at(env, reward_token, &pool, block)?.raw();
    pool.last_reward_block = block;
    storage::set_pool(env, reward_token, pid, &pool);
    Ok(pool)
}

pub fn mass_update_pools(env: &Env, reward_token: &Address) -> Result<(), VaultError> {
    for pid in 0..storage::pool_length(env, reward_token) {
        update_pool(env, reward_token, pid)?;
    }
    Ok(())
}

/// Reward the user has earned at `acc` and not yet been paid.
pub fn pending_at(env: &Env, user: &UserInfo, acc: Exp18) -> Result<u128, VaultError> {
    let cumulative = acc
        .mul_units(env, user.amount)
        .ok_or(VaultError::MathOverflow)?;
    Ok(cumulative.saturating_sub(user.reward_debt))
}

pub fn reward_debt_at(env: &Env, amount: u128, acc: u128) -> Result<u128, VaultError> {
    Exp18::from_raw(acc)
        .mul_units(env, amount)
        .ok_or(VaultError::MathOverflow)
}
