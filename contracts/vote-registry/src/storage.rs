use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::errors::RegistryError;

const TTL_THRESHOLD: u32 = 100_000;
const TTL_EXTEND_TO: u32 = 200_000;

#[contracttype]
pub enum DataKey {
    Admin,
    Initialized,
    Paused,
    Relayer(Address),
    TrustedOrigin(u32),
    Processed(u32, u64),
    DeadLetter(u32, u64),
    DeadLetterQueue,
    AccountOrigins(Address),
    LastSeq(Address, u32),
    NumCheckpoints(Address, u32),
    Checkpoint(Address, u32, u32),
}

/// Voting weight update relayed from an origin chain's vault.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteMessage {
    pub seq: u64,
    pub account: Address,
    pub weight: u128,
    pub block: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeadLetter {
    pub origin: u32,
    pub seq: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Checkpoint {
    /// Registry ledger the weight took effect in.
    pub from_block: u32,
    /// Origin chain block the weight was read at.
    pub origin_block: u32,
    pub votes: u128,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ApplyOutcome {
    Applied,
    Duplicate,
    Stale,
    DeadLettered,
}

pub fn bump_core_ttl(env: &Env) {
    if env.storage().instance().has(&DataKey::Initialized) {
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

fn get_persistent<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let found = env.storage().persistent().get::<_, V>(key);
    if found.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    found
}

fn set_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

pub fn get_admin(env: &Env) -> Result<Address, RegistryError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(RegistryError::NotInitialized)
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn is_relayer(env: &Env, relayer: &Address) -> bool {
    get_persistent(env, &DataKey::Relayer(relayer.clone())).unwrap_or(false)
}

pub fn set_relayer(env: &Env, relayer: &Address, active: bool) {
    set_persistent(env, &DataKey::Relayer(relayer.clone()), &active);
}

pub fn is_trusted_origin(env: &Env, origin: u32) -> bool {
    get_persistent(env, &DataKey::TrustedOrigin(origin)).unwrap_or(false)
}

pub fn set_trusted_origin(env: &Env, origin: u32, trusted: bool) {
    set_persistent(env, &DataKey::TrustedOrigin(origin), &trusted);
}

pub fn is_processed(env: &Env, origin: u32, seq: u64) -> bool {
    get_persistent(env, &DataKey::Processed(origin, seq)).unwrap_or(false)
}

pub fn mark_processed(env: &Env, origin: u32, seq: u64) {
    set_persistent(env, &DataKey::Processed(origin, seq), &true);
}

// Dead letters

pub fn dead_letter(env: &Env, origin: u32, seq: u64) -> Option<VoteMessage> {
    get_persistent(env, &DataKey::DeadLetter(origin, seq))
}

pub fn dead_letters(env: &Env) -> Vec<DeadLetter> {
    get_persistent(env, &DataKey::DeadLetterQueue).unwrap_or(Vec::new(env))
}

pub fn push_dead_letter(env: &Env, origin: u32, message: &VoteMessage) {
    set_persistent(env, &DataKey::DeadLetter(origin, message.seq), message);
    let mut queue = dead_letters(env);
    queue.push_back(DeadLetter {
        origin,
        seq: message.seq,
    });
    set_persistent(env, &DataKey::DeadLetterQueue, &queue);
}

pub fn remove_dead_letter(env: &Env, origin: u32, seq: u64) {
    env.storage()
        .persistent()
        .remove(&DataKey::DeadLetter(origin, seq));
    let queue = dead_letters(env);
    let mut kept = Vec::new(env);
    for entry in queue.iter() {
        if entry.origin != origin || entry.seq != seq {
            kept.push_back(entry);
        }
    }
    set_persistent(env, &DataKey::DeadLetterQueue, &kept);
}

// Checkpoints

pub fn account_origins(env: &Env, account: &Address) -> Vec<u32> {
    get_persistent(env, &DataKey::AccountOrigins(account.clone())).unwrap_or(Vec::new(env))
}

pub fn set_account_origins(env: &Env, account: &Address, origins: &Vec<u32>) {
    set_persistent(env, &DataKey::AccountOrigins(account.clone()), origins);
}

pub fn last_seq(env: &Env, account: &Address, origin: u32) -> Option<u64> {
    get_persistent(env, &DataKey::LastSeq(account.clone(), origin))
}

pub fn set_last_seq(env: &Env, account: &Address, origin: u32, seq: u64) {
    set_persistent(env, &DataKey::LastSeq(account.clone(), origin), &seq);
}

pub fn num_checkpoints(env: &Env, account: &Address, origin: u32) -> u32 {
    get_persistent(env, &DataKey::NumCheckpoints(account.clone(), origin)).unwrap_or(0u32)
}

pub fn set_num_checkpoints(env: &Env, account: &Address, origin: u32, count: u32) {
    set_persistent(env, &DataKey::NumCheckpoints(account.clone(), origin), &count);
}

pub fn checkpoint(env: &Env, account: &Address, origin: u32, index: u32) -> Option<Checkpoint> {
    get_persistent(env, &DataKey::Checkpoint(account.clone(), origin, index))
}

pub fn set_checkpoint(env: &Env, account: &Address, origin: u32, index: u32, value: &Checkpoint) {
    set_persistent(env, &DataKey::Checkpoint(account.clone(), origin, index), value);
}
