use soroban_sdk::{contracttype, Address, Env, Symbol, Vec};

use crate::constants::{TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::errors::VaultError;

#[soroban_sdk::contractclient(name = "RewardStoreClient")]
pub trait RewardStoreContract {
    fn safe_reward_transfer(env: Env, token: Address, to: Address, amount: u128) -> u128;
}

#[soroban_sdk::contractclient(name = "AccessControlClient")]
pub trait AccessControlContract {
    fn is_allowed_to_call(env: Env, caller: Address, function: Symbol) -> bool;
}

#[contracttype]
pub enum DataKey {
    Admin,
    Initialized,
    AccessControl,
    RewardStore,
    GovernancePool,
    OriginChainId,
    Paused,
    VoteSeq,
    RewardPerBlock(Address),
    TotalAllocPoints(Address),
    PoolLength(Address),
    Pool(Address, u32),
    PoolByStakedToken(Address, Address),
    User(Address, u32, Address),
    Withdrawal(Address, u32, Address),
    Debt(Address, Address),
    Delegate(Address),
    NumCheckpoints(Address),
    Checkpoint(Address, u32),
    VoteMessage(u64),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInfo {
    pub staked_token: Address,
    pub alloc_point: u128,
    pub last_reward_block: u32,
    /// Lifetime reward per staked unit, 1e18 scale.
    pub acc_reward_per_share: u128,
    /// Seconds between a withdrawal request and its release.
    pub lock_period: u64,
    pub total_staked: u128,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserInfo {
    pub amount: u128,
    pub reward_debt: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalRequest {
    pub amount: u128,
    pub locked_until: u64,
}

/// Outstanding withdrawal of one (pool, account). Legacy requests keep
/// earning on their principal until executed; a modern request has already
/// left the reward base.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PendingWithdrawal {
    Idle,
    Legacy(Vec<WithdrawalRequest>),
    Modern(WithdrawalRequest),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GovernancePool {
    pub reward_token: Address,
    pub pid: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCheckpoint {
    pub from_block: u32,
    pub votes: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteMessage {
    pub seq: u64,
    pub account: Address,
    pub weight: u128,
    pub block: u32,
}

pub fn bump_core_ttl(env: &Env) {
    if env.storage().instance().has(&DataKey::Initialized) {
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn get_persistent<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let found = env.storage().persistent().get::<_, V>(key);
    if found.is_some() {
        bump_persistent(env, key);
    }
    found
}

fn set_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    bump_persistent(env, key);
}

// Instance configuration

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

pub fn get_admin(env: &Env) -> Result<Address, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(VaultError::NotInitialized)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn get_address(env: &Env, key: &DataKey) -> Option<Address> {
    env.storage().instance().get(key)
}

pub fn set_address(env: &Env, key: &DataKey, value: &Address) {
    env.storage().instance().set(key, value);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn origin_chain_id(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::OriginChainId)
        .unwrap_or(0u32)
}

pub fn governance_pool(env: &Env) -> Option<GovernancePool> {
    env.storage().instance().get(&DataKey::GovernancePool)
}

pub fn set_governance_pool(env: &Env, pool: &GovernancePool) {
    env.storage().instance().set(&DataKey::GovernancePool, pool);
}

/// Hands out the next outbox sequence number.
pub fn next_vote_seq(env: &Env) -> u64 {
    let seq: u64 = env
        .storage()
        .instance()
        .get(&DataKey::VoteSeq)
        .unwrap_or(0u64)
        + 1;
    env.storage().instance().set(&DataKey::VoteSeq, &seq);
    seq
}

pub fn last_vote_seq(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::VoteSeq)
        .unwrap_or(0u64)
}

// Pools

pub fn reward_per_block(env: &Env, reward_token: &Address) -> u128 {
    get_persistent(env, &DataKey::RewardPerBlock(reward_token.clone())).unwrap_or(0u128)
}

pub fn set_reward_per_block(env: &Env, reward_token: &Address, amount: u128) {
    set_persistent(env, &DataKey::RewardPerBlock(reward_token.clone()), &amount);
}

pub fn total_alloc_points(env: &Env, reward_token: &Address) -> u128 {
    get_persistent(env, &DataKey::TotalAllocPoints(reward_token.clone())).unwrap_or(0u128)
}

pub fn set_total_alloc_points(env: &Env, reward_token: &Address, points: u128) {
    set_persistent(env, &DataKey::TotalAllocPoints(reward_token.clone()), &points);
}

pub fn pool_length(env: &Env, reward_token: &Address) -> u32 {
    get_persistent(env, &DataKey::PoolLength(reward_token.clone())).unwrap_or(0u32)
}

pub fn set_pool_length(env: &Env, reward_token: &Address, length: u32) {
    set_persistent(env, &DataKey::PoolLength(reward_token.clone()), &length);
}

pub fn get_pool(env: &Env, reward_token: &Address, pid: u32) -> Result<PoolInfo, VaultError> {
    get_persistent(env, &DataKey::Pool(reward_token.clone(), pid)).ok_or(VaultError::PoolNotFound)
}

pub fn set_pool(env: &Env, reward_token: &Address, pid: u32, pool: &PoolInfo) {
    set_persistent(env, &DataKey::Pool(reward_token.clone(), pid), pool);
}

pub fn pool_by_staked_token(env: &Env, reward_token: &Address, staked_token: &Address) -> Option<u32> {
    get_persistent(
        env,
        &DataKey::PoolByStakedToken(reward_token.clone(), staked_token.clone()),
    )
}

pub fn set_pool_by_staked_token(env: &Env, reward_token: &Address, staked_token: &Address, pid: u32) {
    set_persistent(
        env,
        &DataKey::PoolByStakedToken(reward_token.clone(), staked_token.clone()),
        &pid,
    );
}

// Accounts

pub fn user_info(env: &Env, reward_token: &Address, pid: u32, account: &Address) -> UserInfo {
    get_persistent(env, &DataKey::User(reward_token.clone(), pid, account.clone()))
        .unwrap_or_default()
}

pub fn set_user_info(env: &Env, reward_token: &Address, pid: u32, account: &Address, info: &UserInfo) {
    set_persistent(
        env,
        &DataKey::User(reward_token.clone(), pid, account.clone()),
        info,
    );
}

pub fn pending_withdrawal(
    env: &Env,
    reward_token: &Address,
    pid: u32,
    account: &Address,
) -> PendingWithdrawal {
    get_persistent(
        env,
        &DataKey::Withdrawal(reward_token.clone(), pid, account.clone()),
    )
    .unwrap_or(PendingWithdrawal::Idle)
}

pub fn set_pending_withdrawal(
    env: &Env,
    reward_token: &Address,
    pid: u32,
    account: &Address,
    pending: &PendingWithdrawal,
) {
    let key = DataKey::Withdrawal(reward_token.clone(), pid, account.clone());
    match pending {
        PendingWithdrawal::Idle => env.storage().persistent().remove(&key),
        _ => set_persistent(env, &key, pending),
    }
}

pub fn vault_debt(env: &Env, reward_token: &Address, account: &Address) -> u128 {
    get_persistent(env, &DataKey::Debt(reward_token.clone(), account.clone())).unwrap_or(0u128)
}

pub fn set_vault_debt(env: &Env, reward_token: &Address, account: &Address, debt: u128) {
    set_persistent(env, &DataKey::Debt(reward_token.clone(), account.clone()), &debt);
}

// Votes

pub fn delegate_of(env: &Env, account: &Address) -> Option<Address> {
    get_persistent(env, &DataKey::Delegate(account.clone()))
}

pub fn set_delegate(env: &Env, account: &Address, delegatee: &Address) {
    set_persistent(env, &DataKey::Delegate(account.clone()), delegatee);
}

pub fn num_checkpoints(env: &Env, account: &Address) -> u32 {
    get_persistent(env, &DataKey::NumCheckpoints(account.clone())).unwrap_or(0u32)
}

pub fn set_num_checkpoints(env: &Env, account: &Address, count: u32) {
    set_persistent(env, &DataKey::NumCheckpoints(account.clone()), &count);
}

pub fn checkpoint(env: &Env, account: &Address, index: u32) -> Option<VoteCheckpoint> {
    get_persistent(env, &DataKey::Checkpoint(account.clone(), index))
}

pub fn set_checkpoint(env: &Env, account: &Address, index: u32, checkpoint: &VoteCheckpoint) {
    set_persistent(env, &DataKey::Checkpoint(account.clone(), index), checkpoint);
}

pub fn vote_message(env: &Env, seq: u64) -> Option<VoteMessage> {
    get_persistent(env, &DataKey::VoteMessage(seq))
}

pub fn set_vote_message(env: &Env, message: &VoteMessage) {
    set_persistent(env, &DataKey::VoteMessage(message.seq), message);
}
