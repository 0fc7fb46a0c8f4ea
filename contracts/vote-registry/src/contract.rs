use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

use crate::checkpoints;
use crate::errors::RegistryError;
use crate::events::*;
use crate::storage::{self, ApplyOutcome, DataKey, DeadLetter, VoteMessage};

#[contract]
pub struct VoteRegistry;

fn require_admin(env: &Env, caller: &Address) -> Result<(), RegistryError> {
    caller.require_auth();
    if *caller != storage::get_admin(env)? {
        return Err(RegistryError::Unauthorized);
    }
    storage::bump_core_ttl(env);
    Ok(())
}

fn require_relayer(env: &Env, relayer: &Address) -> Result<(), RegistryError> {
    relayer.require_auth();
    if !storage::is_relayer(env, relayer) {
        return Err(RegistryError::Unauthorized);
    }
    storage::bump_core_ttl(env);
    Ok(())
}

/// Writes a message into the per-origin history unless it was already
/// handled or is older than what the history holds.
fn apply(env: &Env, origin: u32, message: &VoteMessage) -> Result<ApplyOutcome, RegistryError> {
    if storage::is_processed(env, origin, message.seq) {
        return Ok(ApplyOutcome::Duplicate);
    }
    storage::mark_processed(env, origin, message.seq);

    let behind_seq = storage::last_seq(env, &message.account, origin)
        .map(|last| message.seq < last)
        .unwrap_or(false);
    let behind_block = checkpoints::latest(env, &message.account, origin)
        .map(|cp| message.block < cp.origin_block)
        .unwrap_or(false);
    if behind_seq || behind_block {
        StaleVoteMessage {
            origin,
            seq: message.seq,
            account: message.account.clone(),
        }
        .publish(env);
        return Ok(ApplyOutcome::Stale);
    }

    checkpoints::write(env, &message.account, origin, message.block, message.weight)?;
    storage::set_last_seq(env, &message.account, origin, message.seq);
    VoteMessageApplied {
        origin,
        seq: message.seq,
        account: message.account.clone(),
        weight: message.weight,
        block: message.block,
    }
    .publish(env);
    Ok(ApplyOutcome::Applied)
}

#[contractimpl]
impl VoteRegistry {
    pub fn initialize(env: Env, admin: Address) -> Result<(), RegistryError> {
        if storage::is_initialized(&env) {
            return Err(RegistryError::AlreadyInitialized);
        }
        admin.require_auth();
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Initialized, &true);
        storage::bump_core_ttl(&env);
        Ok(())
    }

    pub fn set_relayer(
        env: Env,
        caller: Address,
        relayer: Address,
        active: bool,
    ) -> Result<(), RegistryError> {
        require_admin(&env, &caller)?;
        storage::set_relayer(&env, &relayer, active);
        RelayerUpdated { relayer, active }.publish(&env);
        Ok(())
    }

    pub fn set_trusted_origin(
        env: Env,
        caller: Address,
        origin: u32,
        trusted: bool,
    ) -> Result<(), RegistryError> {
        require_admin(&env, &caller)?;
        storage::set_trusted_origin(&env, origin, trusted);
        OriginUpdated { origin, trusted }.publish(&env);
        Ok(())
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), RegistryError> {
        require_admin(&env, &caller)?;
        env.storage().instance().set(&DataKey::Paused, &true);
        RegistryPaused { caller }.publish(&env);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), RegistryError> {
        require_admin(&env, &caller)?;
        env.storage().instance().set(&DataKey::Paused, &false);
        RegistryResumed { caller }.publish(&env);
        Ok(())
    }

    /// Applies a relayed weight update. Redelivery of a handled `(origin,
    /// seq)` is a no-op; while paused the message is parked in the
    /// dead-letter queue.
    pub fn apply_message(
        env: Env,
        relayer: Address,
        origin: u32,
        message: VoteMessage,
    ) -> Result<ApplyOutcome, RegistryError> {
        require_relayer(&env, &relayer)?;
        if !storage::is_trusted_origin(&env, origin) {
            return Err(RegistryError::UntrustedOrigin);
        }
        if storage::is_processed(&env, origin, message.seq) {
            return Ok(ApplyOutcome::Duplicate);
        }
        if storage::is_paused(&env) {
            if storage::dead_letter(&env, origin, message.seq).is_none() {
                storage::push_dead_letter(&env, origin, &message);
                VoteMessageDeadLettered {
                    origin,
                    seq: message.seq,
                }
                .publish(&env);
            }
            return Ok(ApplyOutcome::DeadLettered);
        }
        apply(&env, origin, &message)
    }

    pub fn retry_dead_letter(
        env: Env,
        relayer: Address,
        origin: u32,
        seq: u64,
    ) -> Result<ApplyOutcome, RegistryError> {
        require_relayer(&env, &relayer)?;
        if storage::is_paused(&env) {
            return Err(RegistryError::RegistryPaused);
        }
        let message =
            storage::dead_letter(&env, origin, seq).ok_or(RegistryError::DeadLetterNotFound)?;
        storage::remove_dead_letter(&env, origin, seq);
        apply(&env, origin, &message)
    }

    // Views

    pub fn get_admin(env: Env) -> Result<Address, RegistryError> {
        storage::get_admin(&env)
    }

    pub fn is_relayer(env: Env, relayer: Address) -> bool {
        storage::is_relayer(&env, &relayer)
    }

    pub fn is_trusted_origin(env: Env, origin: u32) -> bool {
        storage::is_trusted_origin(&env, origin)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    pub fn is_processed(env: Env, origin: u32, seq: u64) -> bool {
        storage::is_processed(&env, origin, seq)
    }

    pub fn get_dead_letters(env: Env) -> Vec<DeadLetter> {
        storage::dead_letters(&env)
    }

    pub fn get_origin_votes(env: Env, account: Address, origin: u32) -> u128 {
        checkpoints::latest(&env, &account, origin)
            .map(|cp| cp.votes)
            .unwrap_or(0)
    }

    /// Sum over origins of the latest weight of `account`.
    pub fn get_current_votes(env: Env, account: Address) -> u128 {
        let mut total = 0u128;
        for origin in storage::account_origins(&env, &account).iter() {
            let votes = checkpoints::latest(&env, &account, origin)
                .map(|cp| cp.votes)
                .unwrap_or(0);
            total = total.saturating_add(votes);
        }
        total
    }

    /// Sum over origins of the weight in force at the end of registry ledger
    /// `block`, which must be finalized.
    pub fn get_prior_votes(env: Env, account: Address, block: u32) -> Result<u128, RegistryError> {
        if block >= env.ledger().sequence() {
            return Err(RegistryError::BlockNotFinalized);
        }
        let mut total = 0u128;
        for origin in storage::account_origins(&env, &account).iter() {
            total = total.saturating_add(checkpoints::at(&env, &account, origin, block));
        }
        Ok(total)
    }
}
