#![cfg(test)]
use super::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{token, Address, Env};

fn setup<'a>(env: &Env) -> (RewardStoreClient<'a>, Address, Address, Address) {
    env.mock_all_auths();
    let admin = Address::generate(env);
    let owner = Address::generate(env);
    let token = env
        .register_stellar_asset_contract_v2(Address::generate(env))
        .address();
    let id = env.register(RewardStore, ());
    let store = RewardStoreClient::new(env, &id);
    store.initialize(&admin, &owner);
    store.set_reward_token(&admin, &token, &true);
    (store, admin, owner, token)
}

#[test]
fn test_safe_transfer_pays_at_most_balance() {
    let env = Env::default();
    let (store, _admin, _owner, token) = setup(&env);
    let user = Address::generate(&env);
    token::StellarAssetClient::new(&env, &token).mint(&store.address, &300);

    assert_eq!(store.safe_reward_transfer(&token, &user, &200), 200);
    assert_eq!(store.safe_reward_transfer(&token, &user, &200), 100);
    assert_eq!(store.safe_reward_transfer(&token, &user, &200), 0);
    assert_eq!(token::Client::new(&env, &token).balance(&user), 300);
}

#[test]
fn test_inactive_token_rejected() {
    let env = Env::default();
    let (store, admin, _owner, token) = setup(&env);
    let user = Address::generate(&env);
    store.set_reward_token(&admin, &token, &false);
    assert_eq!(
        store.try_safe_reward_transfer(&token, &user, &1),
        Err(Ok(StoreError::TokenNotActive))
    );
}

#[test]
fn test_only_admin_manages_tokens() {
    let env = Env::default();
    let (store, _admin, _owner, token) = setup(&env);
    let outsider = Address::generate(&env);
    assert_eq!(
        store.try_set_reward_token(&outsider, &token, &false),
        Err(Ok(StoreError::Unauthorized))
    );
    assert_eq!(
        store.try_emergency_reward_withdraw(&outsider, &token, &1),
        Err(Ok(StoreError::Unauthorized))
    );
}

#[test]
fn test_emergency_withdraw() {
    let env = Env::default();
    let (store, admin, _owner, token) = setup(&env);
    token::StellarAssetClient::new(&env, &token).mint(&store.address, &50);
    assert_eq!(
        store.try_emergency_reward_withdraw(&admin, &token, &51),
        Err(Ok(StoreError::InsufficientBalance))
    );
    store.emergency_reward_withdraw(&admin, &token, &50);
    assert_eq!(token::Client::new(&env, &token).balance(&admin), 50);
}

#[test]
fn test_two_step_owner_handover() {
    let env = Env::default();
    let (store, admin, owner, _token) = setup(&env);
    let next = Address::generate(&env);
    let stranger = Address::generate(&env);

    assert_eq!(
        store.try_accept_owner(&next),
        Err(Ok(StoreError::NoPendingOwner))
    );
    store.set_pending_owner(&admin, &next);
    assert_eq!(
        store.try_accept_owner(&stranger),
        Err(Ok(StoreError::Unauthorized))
    );
    assert_eq!(store.get_owner(), owner);
    store.accept_owner(&next);
    assert_eq!(store.get_owner(), next);
    assert_eq!(store.get_pending_owner(), None);
}

#[test]
fn test_initialize_twice_fails() {
    let env = Env::default();
    let (store, admin, owner, _token) = setup(&env);
    assert_eq!(
        store.try_initialize(&admin, &owner),
        Err(Ok(StoreError::AlreadyInitialized))
    );
}
