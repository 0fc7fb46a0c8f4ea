use soroban_sdk::{contracttype, Address, Env, Symbol, Vec};

use crate::constants::{TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::errors::ControllerError;

/// Interface every listed market exposes to the controller.
#[soroban_sdk::contractclient(name = "MarketClient")]
pub trait MarketContract {
    fn get_snapshot(env: Env, account: Address) -> MarketSnapshot;
    fn underlying(env: Env) -> Address;
    fn mint_behalf(env: Env, payer: Address, minter: Address, amount: u128);
}

/// Underlying price of a market, 1e18 mantissa.
#[soroban_sdk::contractclient(name = "PriceOracleClient")]
pub trait PriceOracleContract {
    fn get_underlying_price(env: Env, market: Address) -> u128;
}

#[soroban_sdk::contractclient(name = "AccessControlClient")]
pub trait AccessControlContract {
    fn is_allowed_to_call(env: Env, caller: Address, function: Symbol) -> bool;
}

#[soroban_sdk::contractclient(name = "DenyListClient")]
pub trait DenyListContract {
    fn is_blacklisted(env: Env, account: Address) -> bool;
}

#[contracttype]
pub enum DataKey {
    Admin,
    Initialized,
    AccessControl,
    Oracle,
    DenyList,
    CloseFactor,          // u128 1e18
    LiquidationIncentive, // u128 1e18
    AllMarkets,           // Vec<Address>
    Market(Address),
    AccountAssets(Address), // Vec<Address>
    SupplyCap(Address),
    BorrowCap(Address),
    ActionPaused(Address, Action),
    // Rewards
    RewardToken,
    RewardMarket,
    ClaimThreshold,
    RewardRate,
    MaterialityThreshold,
    RewardMarkets, // Vec<Address>
    IndexedMarkets, // Vec<Address>, every market that ever carried an index
    RewardSpeed(Address),
    SupplyState(Address),
    BorrowState(Address),
    SupplierIndex(Address, Address),
    BorrowerIndex(Address, Address),
    RewardAccrued(Address),
    RewardDebt(Address),
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    Mint,
    Redeem,
    Borrow,
    Transfer,
    Seize,
    Liquidate,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RewardSide {
    Supply,
    Borrow,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Market {
    pub listed: bool,
    pub collateral_factor: u128,
    pub reward_eligible: bool,
}

/// Flywheel index of one side of a market.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardState {
    pub index: u128,
    pub block: u32,
}

/// Balances of a market as seen before the calling action mutates them.
/// Account fields are zero when the snapshot is taken for the market totals.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketSnapshot {
    pub total_supply: u128,
    pub total_borrows: u128,
    pub borrow_index: u128,
    pub exchange_rate: u128,
    pub accrual_block: u32,
    pub account_supply: u128,
    pub account_borrows: u128,
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

fn get_persistent_or<V>(env: &Env, key: &DataKey, default: V) -> V
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    match env.storage().persistent().get::<_, V>(key) {
        Some(value) => {
            bump_persistent(env, key);
            value
        }
        None => default,
    }
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

pub fn get_admin(env: &Env) -> Result<Address, ControllerError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ControllerError::NotInitialized)
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

pub fn get_u128(env: &Env, key: &DataKey) -> u128 {
    env.storage().instance().get(key).unwrap_or(0u128)
}

pub fn set_u128(env: &Env, key: &DataKey, value: u128) {
    env.storage().instance().set(key, &value);
}

// Markets

pub fn get_market(env: &Env, market: &Address) -> Option<Market> {
    let key = DataKey::Market(market.clone());
    let found = env.storage().persistent().get::<_, Market>(&key);
    if found.is_some() {
        bump_persistent(env, &key);
    }
    found
}

pub fn listed_market(env: &Env, market: &Address) -> Result<Market, ControllerError> {
    match get_market(env, market) {
        Some(m) if m.listed => Ok(m),
        _ => Err(ControllerError::MarketNotListed),
    }
}

pub fn set_market(env: &Env, market: &Address, config: &Market) {
    set_persistent(env, &DataKey::Market(market.clone()), config);
}

pub fn all_markets(env: &Env) -> Vec<Address> {
    get_persistent_or(env, &DataKey::AllMarkets, Vec::new(env))
}

pub fn set_all_markets(env: &Env, markets: &Vec<Address>) {
    set_persistent(env, &DataKey::AllMarkets, markets);
}

pub fn account_assets(env: &Env, account: &Address) -> Vec<Address> {
    get_persistent_or(
        env,
        &DataKey::AccountAssets(account.clone()),
        Vec::new(env),
    )
}

pub fn set_account_assets(env: &Env, account: &Address, assets: &Vec<Address>) {
    set_persistent(env, &DataKey::AccountAssets(account.clone()), assets);
}

pub fn supply_cap(env: &Env, market: &Address) -> u128 {
    get_persistent_or(env, &DataKey::SupplyCap(market.clone()), 0u128)
}

pub fn set_supply_cap(env: &Env, market: &Address, cap: u128) {
    set_persistent(env, &DataKey::SupplyCap(market.clone()), &cap);
}

pub fn borrow_cap(env: &Env, market: &Address) -> u128 {
    get_persistent_or(env, &DataKey::BorrowCap(market.clone()), 0u128)
}

pub fn set_borrow_cap(env: &Env, market: &Address, cap: u128) {
    set_persistent(env, &DataKey::BorrowCap(market.clone()), &cap);
}

pub fn is_paused(env: &Env, market: &Address, action: Action) -> bool {
    get_persistent_or(env, &DataKey::ActionPaused(market.clone(), action), false)
}

pub fn set_paused(env: &Env, market: &Address, action: Action, paused: bool) {
    set_persistent(env, &DataKey::ActionPaused(market.clone(), action), &paused);
}

// Flywheel

pub fn reward_markets(env: &Env) -> Vec<Address> {
    get_persistent_or(env, &DataKey::RewardMarkets, Vec::new(env))
}

pub fn set_reward_markets(env: &Env, markets: &Vec<Address>) {
    set_persistent(env, &DataKey::RewardMarkets, markets);
}

pub fn indexed_markets(env: &Env) -> Vec<Address> {
    get_persistent_or(env, &DataKey::IndexedMarkets, Vec::new(env))
}

pub fn set_indexed_markets(env: &Env, markets: &Vec<Address>) {
    set_persistent(env, &DataKey::IndexedMarkets, markets);
}

pub fn reward_speed(env: &Env, market: &Address) -> u128 {
    get_persistent_or(env, &DataKey::RewardSpeed(market.clone()), 0u128)
}

pub fn set_reward_speed(env: &Env, market: &Address, speed: u128) {
    set_persistent(env, &DataKey::RewardSpeed(market.clone()), &speed);
}

fn state_key(market: &Address, side: RewardSide) -> DataKey {
    match side {
        RewardSide::Supply => DataKey::SupplyState(market.clone()),
        RewardSide::Borrow => DataKey::BorrowState(market.clone()),
    }
}

pub fn reward_state(env: &Env, market: &Address, side: RewardSide) -> Option<RewardState> {
    let key = state_key(market, side);
    let found = env.storage().persistent().get::<_, RewardState>(&key);
    if found.is_some() {
        bump_persistent(env, &key);
    }
    found
}

pub fn set_reward_state(env: &Env, market: &Address, side: RewardSide, state: &RewardState) {
    set_persistent(env, &state_key(market, side), state);
}

fn checkpoint_key(market: &Address, account: &Address, side: RewardSide) -> DataKey {
    match side {
        RewardSide::Supply => DataKey::SupplierIndex(market.clone(), account.clone()),
        RewardSide::Borrow => DataKey::BorrowerIndex(market.clone(), account.clone()),
    }
}

pub fn account_index(env: &Env, market: &Address, account: &Address, side: RewardSide) -> u128 {
    get_persistent_or(env, &checkpoint_key(market, account, side), 0u128)
}

pub fn set_account_index(
    env: &Env,
    market: &Address,
    account: &Address,
    side: RewardSide,
    index: u128,
) {
    set_persistent(env, &checkpoint_key(market, account, side), &index);
}

pub fn reward_accrued(env: &Env, account: &Address) -> u128 {
    get_persistent_or(env, &DataKey::RewardAccrued(account.clone()), 0u128)
}

pub fn set_reward_accrued(env: &Env, account: &Address, amount: u128) {
    set_persistent(env, &DataKey::RewardAccrued(account.clone()), &amount);
}

pub fn reward_debt(env: &Env, account: &Address) -> u128 {
    get_persistent_or(env, &DataKey::RewardDebt(account.clone()), 0u128)
}

pub fn set_reward_debt(env: &Env, account: &Address, amount: u128) {
    set_persistent(env, &DataKey::RewardDebt(account.clone()), &amount);
}
