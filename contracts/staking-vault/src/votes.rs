use soroban_sdk::{Address, Env};

use crate::errors::VaultError;
use crate::events::{DelegateVotesChanged, VoteMessageQueued};
use crate::storage::{self, PendingWithdrawal, VoteCheckpoint, VoteMessage};

pub fn is_governance_pool(env: &Env, reward_token: &Address, pid: u32) -> bool {
    match storage::governance_pool(env) {
        Some(pool) => pool.reward_token == *reward_token && pool.pid == pid,
        None => false,
    }
}

/// Voting weight an account brings to its delegate: staked principal in the
/// governance pool minus legacy requests still sitting in it.
pub fn governance_weight(env: &Env, account: &Address) -> u128 {
    let Some(pool) = storage::governance_pool(env) else {
        return 0;
    };
    let user = storage::user_info(env, &pool.reward_token, pool.pid, account);
    let legacy = match storage::pending_withdrawal(env, &pool.reward_token, pool.pid, account) {
        PendingWithdrawal::Legacy(requests) => requests.iter().map(|r| r.amount).sum(),
        _ => 0u128,
    };
    user.amount.saturating_sub(legacy)
}

pub fn current_votes(env: &Env, account: &Address) -> u128 {
    let count = storage::num_checkpoints(env, account);
    if count == 0 {
        return 0;
    }
    storage::checkpoint(env, account, count - 1)
        .map(|c| c.votes)
        .unwrap_or(0)
}

/// Votes held by `account` at the end of `block`. Only finalized ledgers
/// can be queried.
pub fn prior_votes(env: &Env, account: &Address, block: u32) -> Result<u128, VaultError> {
    if block >= env.ledger().sequence() {
        return Err(VaultError::BlockNotFinalized);
    }
    let count = storage::num_checkpoints(env, account);
    if count == 0 {
        return Ok(0);
    }
    if let Some(latest) = storage::checkpoint(env, account, count - 1) {
        if latest.from_block <= block {
            return Ok(latest.votes);
        }
    }
    match storage::checkpoint(env, account, 0) {
        Some(first) if first.from_block > block => return Ok(0),
        None => return Ok(0),
        _ => {}
    }

    let mut lower = 0u32;
    let mut upper = count - 1;
    while upper > lower {
        let center = upper - (upper - lower) / 2;
        let Some(cp) = storage::checkpoint(env, account, center) else {
            return Ok(0);
        };
        if cp.from_block == block {
            return Ok(cp.votes);
        } else if cp.from_block < block {
            lower = center;
        } else {
            upper = center - 1;
        }
    }
    Ok(storage::checkpoint(env, account, lower)
        .map(|c| c.votes)
        .unwrap_or(0))
}

pub fn move_delegates(
    env: &Env,
    src: Option<&Address>,
    dst: Option<&Address>,
    amount: u128,
) -> Result<(), VaultError> {
    if amount == 0 || src == dst {
        return Ok(());
    }
    if let Some(src) = src {
        let old = current_votes(env, src);
        write_checkpoint(env, src, old, old.saturating_sub(amount));
    }
    if let Some(dst) = dst {
        let old = current_votes(env, dst);
        let new = old.checked_add(amount).ok_or(VaultError::MathOverflow)?;
        write_checkpoint(env, dst, old, new);
    }
    Ok(())
}

fn write_checkpoint(env: &Env, delegatee: &Address, old_votes: u128, new_votes: u128) {
    let block = env.ledger().sequence();
    let count = storage::num_checkpoints(env, delegatee);
    let same_block = count > 0
        && storage::checkpoint(env, delegatee, count - 1)
            .map(|c| c.from_block == block)
            .unwrap_or(false);
    let checkpoint = VoteCheckpoint {
        from_block: block,
        votes: new_votes,
    };
    if same_block {
        storage::set_checkpoint(env, delegatee, count - 1, &checkpoint);
    } else {
        storage::set_checkpoint(env, delegatee, count, &checkpoint);
        storage::set_num_checkpoints(env, delegatee, count + 1);
    }
    DelegateVotesChanged {
        delegate: delegatee.clone(),
        previous_votes: old_votes,
        new_votes,
    }
    .publish(env);
    queue_vote_message(env, delegatee, new_votes, block);
}

fn queue_vote_message(env: &Env, account: &Address, weight: u128, block: u32) {
    let message = VoteMessage {
        seq: storage::next_vote_seq(env),
        account: account.clone(),
        weight,
        block,
    };
    storage::set_vote_message(env, &message);
    publish_vote_message(env, &message);
}

pub fn publish_vote_message(env: &Env, message: &VoteMessage) {
    VoteMessageQueued {
        origin: storage::origin_chain_id(env),
        seq: message.seq,
        account: message.account.clone(),
        weight: message.weight,
        block: message.block,
    }
    .publish(env);
}
