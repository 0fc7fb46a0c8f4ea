#![no_std]
//! Custody of the reward tokens the staking vault pays out. Only the owner
//! (the vault) can move funds out through `safe_reward_transfer`, which never
//! pays more than the store holds and reports what it actually paid.

mod events;

use soroban_sdk::{contract, contracterror, contractimpl, contracttype, token, Address, Env};

use events::{
    EmergencyWithdrawal, OwnerUpdated, PendingOwnerSet, RewardTokenUpdated, RewardTransferred,
};

const TTL_THRESHOLD: u32 = 100_000;
const TTL_EXTEND_TO: u32 = 200_000;

#[contracttype]
enum DataKey {
    Initialized,
    Admin,
    Owner,
    PendingOwner,
    RewardToken(Address),
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum StoreError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    TokenNotActive = 4,
    InvalidAmount = 5,
    NoPendingOwner = 6,
    InsufficientBalance = 7,
}

#[contract]
pub struct RewardStore;

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn read_address(env: &Env, key: &DataKey) -> Result<Address, StoreError> {
    env.storage()
        .instance()
        .get(key)
        .ok_or(StoreError::NotInitialized)
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), StoreError> {
    caller.require_auth();
    if *caller != read_address(env, &DataKey::Admin)? {
        return Err(StoreError::Unauthorized);
    }
    bump_instance(env);
    Ok(())
}

fn to_i128(amount: u128) -> Result<i128, StoreError> {
    i128::try_from(amount).map_err(|_| StoreError::InvalidAmount)
}

fn balance_of(env: &Env, token: &Address) -> u128 {
    let balance = token::Client::new(env, token).balance(&env.current_contract_address());
    if balance > 0 {
        balance as u128
    } else {
        0
    }
}

#[contractimpl]
impl RewardStore {
    pub fn initialize(env: Env, admin: Address, owner: Address) -> Result<(), StoreError> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(StoreError::AlreadyInitialized);
        }
        admin.require_auth();
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::Initialized, &true);
        bump_instance(&env);
        Ok(())
    }

    pub fn set_reward_token(
        env: Env,
        caller: Address,
        token: Address,
        active: bool,
    ) -> Result<(), StoreError> {
        require_admin(&env, &caller)?;
        let key = DataKey::RewardToken(token.clone());
        env.storage().persistent().set(&key, &active);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
        RewardTokenUpdated { token, active }.publish(&env);
        Ok(())
    }

    pub fn is_reward_token(env: Env, token: Address) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::RewardToken(token))
            .unwrap_or(false)
    }

    /// Pays up to `amount` of `token` to `to` and returns the amount paid.
    pub fn safe_reward_transfer(
        env: Env,
        token: Address,
        to: Address,
        amount: u128,
    ) -> Result<u128, StoreError> {
        let owner = read_address(&env, &DataKey::Owner)?;
        owner.require_auth();
        if !Self::is_reward_token(env.clone(), token.clone()) {
            return Err(StoreError::TokenNotActive);
        }
        let available = balance_of(&env, &token);
        let paid = if amount > available { available } else { amount };
        if paid > 0 {
            token::Client::new(&env, &token).transfer(
                &env.current_contract_address(),
                &to,
                &to_i128(paid)?,
            );
        }
        RewardTransferred {
            token,
            to,
            requested: amount,
            paid,
        }
        .publish(&env);
        Ok(paid)
    }

    pub fn emergency_reward_withdraw(
        env: Env,
        caller: Address,
        token: Address,
        amount: u128,
    ) -> Result<(), StoreError> {
        require_admin(&env, &caller)?;
        if amount == 0 {
            return Err(StoreError::InvalidAmount);
        }
        if amount > balance_of(&env, &token) {
            return Err(StoreError::InsufficientBalance);
        }
        token::Client::new(&env, &token).transfer(
            &env.current_contract_address(),
            &caller,
            &to_i128(amount)?,
        );
        EmergencyWithdrawal {
            token,
            to: caller,
            amount,
        }
        .publish(&env);
        Ok(())
    }

    pub fn set_pending_owner(env: Env, caller: Address, new_owner: Address) -> Result<(), StoreError> {
        require_admin(&env, &caller)?;
        env.storage()
            .instance()
            .set(&DataKey::PendingOwner, &new_owner);
        PendingOwnerSet {
            pending_owner: new_owner,
        }
        .publish(&env);
        Ok(())
    }

    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), StoreError> {
        new_owner.require_auth();
        let pending: Address = env
            .storage()
            .instance()
            .get(&DataKey::PendingOwner)
            .ok_or(StoreError::NoPendingOwner)?;
        if pending != new_owner {
            return Err(StoreError::Unauthorized);
        }
        let old_owner = read_address(&env, &DataKey::Owner)?;
        env.storage().instance().set(&DataKey::Owner, &new_owner);
        env.storage().instance().remove(&DataKey::PendingOwner);
        OwnerUpdated {
            old_owner,
            new_owner,
        }
        .publish(&env);
        Ok(())
    }

    pub fn get_admin(env: Env) -> Result<Address, StoreError> {
        read_address(&env, &DataKey::Admin)
    }

    pub fn get_owner(env: Env) -> Result<Address, StoreError> {
        read_address(&env, &DataKey::Owner)
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::PendingOwner)
    }
}

mod test;
