#![cfg(test)]
use super::*;
use reward_store::{RewardStore, RewardStoreClient};
use soroban_sdk::testutils::{Events, Ledger};
use soroban_sdk::{contract, contractimpl, contracttype, token, Symbol, TryFromVal};
use soroban_sdk::{testutils::Address as _, Address, Env};

const LOCK: u64 = 3_600;

#[contract]
struct MockAccessControl;

#[contracttype]
enum AcmKey {
    Denied(Address),
}

#[contractimpl]
impl MockAccessControl {
    pub fn deny(env: Env, caller: Address) {
        env.storage().persistent().set(&AcmKey::Denied(caller), &true);
    }

    pub fn is_allowed_to_call(env: Env, caller: Address, function: Symbol) -> bool {
        let _ = function;
        !env.storage()
            .persistent()
            .get::<_, bool>(&AcmKey::Denied(caller))
            .unwrap_or(false)
    }
}

struct Fixture<'a> {
    env: Env,
    admin: Address,
    vault: StakingVaultClient<'a>,
    store: RewardStoreClient<'a>,
    acm: MockAccessControlClient<'a>,
    reward_token: Address,
    staked_token: Address,
}

/// Vault with one pool (pid 0) paying 1 reward per ledger over `staked_token`.
fn setup<'a>() -> Fixture<'a> {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(100);
    env.ledger().set_timestamp(1_000_000);

    let admin = Address::generate(&env);
    let vault_id = env.register(StakingVault, ());
    let vault = StakingVaultClient::new(&env, &vault_id);
    vault.initialize(&admin, &7u32);

    let acm_id = env.register(MockAccessControl, ());
    vault.set_access_control(&acm_id);

    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let staked_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let store_id = env.register(RewardStore, ());
    let store = RewardStoreClient::new(&env, &store_id);
    store.initialize(&admin, &vault_id);
    store.set_reward_token(&admin, &reward_token, &true);
    vault.set_reward_store(&store_id);

    let pid = vault.add_pool(&admin, &reward_token, &100, &staked_token, &1, &LOCK);
    assert_eq!(pid, 0);

    Fixture {
        admin,
        vault,
        store,
        acm: MockAccessControlClient::new(&env, &acm_id),
        reward_token,
        staked_token,
        env,
    }
}

impl<'a> Fixture<'a> {
    fn staker(&self, amount: i128) -> Address {
        let user = Address::generate(&self.env);
        token::StellarAssetClient::new(&self.env, &self.staked_token).mint(&user, &amount);
        user
    }

    fn fund_store(&self, amount: i128) {
        token::StellarAssetClient::new(&self.env, &self.reward_token)
            .mint(&self.store.address, &amount);
    }

    fn reward_balance(&self, user: &Address) -> i128 {
        token::Client::new(&self.env, &self.reward_token).balance(user)
    }

    fn staked_balance(&self, user: &Address) -> i128 {
        token::Client::new(&self.env, &self.staked_token).balance(user)
    }

    fn roll_to(&self, sequence: u32) {
        self.env.ledger().set_sequence_number(sequence);
    }

    fn warp(&self, seconds: u64) {
        let now = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(now + seconds);
    }

    /// Events named `name` published by the last call.
    fn published(&self, name: &str) -> u32 {
        let name = Symbol::new(&self.env, name);
        self.env
            .events()
            .all()
            .iter()
            .filter(|(_, topics, _)| {
                topics
                    .get(0)
                    .and_then(|t| Symbol::try_from_val(&self.env, &t).ok())
                    == Some(name.clone())
            })
            .count() as u32
    }
}

#[test]
fn test_pending_reward_counts_deposit_ledger() {
    let f = setup();
    f.fund_store(1_000_000);
    let alice = f.staker(100);

    f.vault.deposit(&alice, &f.reward_token, &0, &100);
    f.roll_to(1_100);
    assert_eq!(f.vault.pending_reward(&f.reward_token, &0, &alice), 1_001);

    // A claim inside the current ledger settles through it.
    assert_eq!(f.vault.claim(&alice, &f.reward_token, &0), 1_000);
    assert_eq!(f.reward_balance(&alice), 1_000);
    assert_eq!(f.vault.pending_reward(&f.reward_token, &0, &alice), 1);
}

#[test]
fn test_empty_pool_emits_to_nobody() {
    let f = setup();
    f.fund_store(1_000_000);
    let alice = f.staker(100);

    f.roll_to(500);
    f.vault.deposit(&alice, &f.reward_token, &0, &100);
    assert_eq!(f.vault.get_pool_info(&f.reward_token, &0).last_reward_block, 500);

    f.roll_to(600);
    assert_eq!(f.vault.claim(&alice, &f.reward_token, &0), 100);
}

#[test]
fn test_legacy_request_blocks_deposit_until_executed() {
    let f = setup();
    f.fund_store(1_000_000);
    let alice = f.staker(150);

    f.vault.deposit(&alice, &f.reward_token, &0, &100);
    f.vault.request_old_withdrawal(&alice, &f.reward_token, &0, &50);
    assert_eq!(
        f.vault.try_deposit(&alice, &f.reward_token, &0, &50),
        Err(Ok(VaultError::ExecuteLegacyWithdrawalFirst))
    );
    assert_eq!(
        f.vault.try_claim(&alice, &f.reward_token, &0),
        Err(Ok(VaultError::ExecuteLegacyWithdrawalFirst))
    );
    assert_eq!(
        f.vault.try_request_withdrawal(&alice, &f.reward_token, &0, &10),
        Err(Ok(VaultError::ExecuteLegacyWithdrawalFirst))
    );

    assert_eq!(
        f.vault.try_execute_withdrawal(&alice, &f.reward_token, &0),
        Err(Ok(VaultError::NothingToWithdraw))
    );
    f.warp(LOCK);
    assert_eq!(f.vault.execute_withdrawal(&alice, &f.reward_token, &0), 50);
    assert_eq!(
        f.vault.get_pending_withdrawal(&f.reward_token, &0, &alice),
        PendingWithdrawal::Idle
    );

    f.vault.deposit(&alice, &f.reward_token, &0, &50);
    assert_eq!(f.vault.get_user_info(&f.reward_token, &0, &alice).amount, 100);
    assert_eq!(f.staked_balance(&alice), 50);
}

#[test]
fn test_legacy_principal_earns_until_execution() {
    let f = setup();
    f.fund_store(1_000_000);
    let alice = f.staker(100);

    f.vault.deposit(&alice, &f.reward_token, &0, &100);
    f.vault.request_old_withdrawal(&alice, &f.reward_token, &0, &50);
    assert_eq!(f.vault.get_user_info(&f.reward_token, &0, &alice).amount, 100);

    f.roll_to(200);
    f.warp(LOCK);
    assert_eq!(f.vault.execute_withdrawal(&alice, &f.reward_token, &0), 50);
    // Full 100 units earned for 100 ledgers and were paid at execution.
    assert_eq!(f.reward_balance(&alice), 100);
    assert_eq!(f.vault.get_user_info(&f.reward_token, &0, &alice).amount, 50);
    assert_eq!(f.vault.get_pool_info(&f.reward_token, &0).total_staked, 50);
}

#[test]
fn test_legacy_requests_release_only_matured() {
    let f = setup();
    f.fund_store(1_000_000);
    let alice = f.staker(100);

    f.vault.deposit(&alice, &f.reward_token, &0, &100);
    f.vault.request_old_withdrawal(&alice, &f.reward_token, &0, &20);
    f.warp(LOCK / 2);
    f.vault.request_old_withdrawal(&alice, &f.reward_token, &0, &30);
    assert_eq!(
        f.vault.try_request_old_withdrawal(&alice, &f.reward_token, &0, &51),
        Err(Ok(VaultError::InsufficientStake))
    );

    f.warp(LOCK / 2);
    assert_eq!(
        f.vault.get_withdrawable_amount(&f.reward_token, &0, &alice),
        (20, 50)
    );
    assert_eq!(f.vault.execute_withdrawal(&alice, &f.reward_token, &0), 20);
    match f.vault.get_pending_withdrawal(&f.reward_token, &0, &alice) {
        PendingWithdrawal::Legacy(left) => {
            assert_eq!(left.len(), 1);
            assert_eq!(left.get(0).unwrap().amount, 30);
        }
        other => panic!("unexpected pending state {:?}", other),
    }

    f.warp(LOCK / 2);
    assert_eq!(f.vault.execute_withdrawal(&alice, &f.reward_token, &0), 30);
    assert_eq!(f.staked_balance(&alice), 50);
}

#[test]
fn test_modern_request_leaves_reward_base_immediately() {
    let f = setup();
    f.fund_store(1_000_000);
    let alice = f.staker(150);

    f.vault.deposit(&alice, &f.reward_token, &0, &100);
    f.roll_to(200);
    f.vault.request_withdrawal(&alice, &f.reward_token, &0, &50);
    assert_eq!(f.reward_balance(&alice), 100);
    assert_eq!(f.vault.get_user_info(&f.reward_token, &0, &alice).amount, 50);
    assert_eq!(f.vault.get_pool_info(&f.reward_token, &0).total_staked, 50);

    // Modern requests do not block further activity.
    f.vault.deposit(&alice, &f.reward_token, &0, &50);
    assert_eq!(
        f.vault.try_request_old_withdrawal(&alice, &f.reward_token, &0, &10),
        Err(Ok(VaultError::ModernWithdrawalPending))
    );

    assert_eq!(
        f.vault.try_execute_withdrawal(&alice, &f.reward_token, &0),
        Err(Ok(VaultError::NothingToWithdraw))
    );
    f.roll_to(300);
    f.warp(LOCK);
    // Execution releases principal without touching reward.
    assert_eq!(f.vault.execute_withdrawal(&alice, &f.reward_token, &0), 50);
    assert_eq!(f.reward_balance(&alice), 100);
    assert_eq!(f.staked_balance(&alice), 50);
    assert_eq!(f.vault.claim(&alice, &f.reward_token, &0), 100);
}

#[test]
fn test_second_modern_request_merges_and_restarts_lock() {
    let f = setup();
    f.fund_store(1_000_000);
    let alice = f.staker(100);

    f.vault.deposit(&alice, &f.reward_token, &0, &100);
    f.vault.request_withdrawal(&alice, &f.reward_token, &0, &30);
    f.warp(LOCK - 10);
    f.vault.request_withdrawal(&alice, &f.reward_token, &0, &20);
    f.warp(10);
    assert_eq!(
        f.vault.get_withdrawable_amount(&f.reward_token, &0, &alice),
        (0, 50)
    );
    assert_eq!(
        f.vault.try_request_withdrawal(&alice, &f.reward_token, &0, &51),
        Err(Ok(VaultError::InsufficientStake))
    );
    f.warp(LOCK);
    assert_eq!(f.vault.execute_withdrawal(&alice, &f.reward_token, &0), 50);
}

#[test]
fn test_old_balance_prices_interval() {
    let f = setup();
    f.fund_store(1_000_000);
    let alice = f.staker(200);
    let bob = f.staker(100);

    f.vault.deposit(&alice, &f.reward_token, &0, &100);
    f.vault.deposit(&bob, &f.reward_token, &0, &100);

    f.roll_to(200);
    f.vault.deposit(&alice, &f.reward_token, &0, &100);
    assert_eq!(f.reward_balance(&alice), 50);
    f.vault.request_withdrawal(&alice, &f.reward_token, &0, &100);
    assert_eq!(f.reward_balance(&alice), 50);

    f.roll_to(300);
    assert_eq!(f.vault.claim(&alice, &f.reward_token, &0), 50);
    assert_eq!(f.vault.claim(&bob, &f.reward_token, &0), 100);
}

#[test]
fn test_shortfall_carried_as_debt_then_cleared() {
    let f = setup();
    let alice = f.staker(100);

    f.vault.deposit(&alice, &f.reward_token, &0, &100);
    f.roll_to(200);
    assert_eq!(f.vault.claim(&alice, &f.reward_token, &0), 0);
    assert_eq!(f.published("vault_debt_updated"), 1);
    assert_eq!(f.vault.pending_debt(&f.reward_token, &alice), 100);

    // Nothing new and nothing available leaves the ledger alone.
    assert_eq!(f.vault.claim(&alice, &f.reward_token, &0), 0);
    assert_eq!(f.published("vault_debt_updated"), 0);
    assert_eq!(f.published("claim"), 0);
    assert_eq!(f.vault.pending_debt(&f.reward_token, &alice), 100);

    f.fund_store(150);
    f.roll_to(250);
    assert_eq!(f.vault.claim(&alice, &f.reward_token, &0), 150);
    assert_eq!(f.vault.pending_debt(&f.reward_token, &alice), 0);
    assert_eq!(f.reward_balance(&alice), 150);
}

#[test]
fn test_partial_store_balance() {
    let f = setup();
    f.fund_store(40);
    let alice = f.staker(100);

    f.vault.deposit(&alice, &f.reward_token, &0, &100);
    f.roll_to(200);
    assert_eq!(f.vault.claim(&alice, &f.reward_token, &0), 40);
    assert_eq!(f.vault.pending_debt(&f.reward_token, &alice), 60);
}

#[test]
fn test_pause_halts_user_flows_but_not_views() {
    let f = setup();
    f.fund_store(1_000_000);
    let alice = f.staker(200);
    f.vault.deposit(&alice, &f.reward_token, &0, &100);

    f.vault.pause(&f.admin);
    assert!(f.vault.is_paused());
    assert_eq!(
        f.vault.try_deposit(&alice, &f.reward_token, &0, &100),
        Err(Ok(VaultError::VaultPaused))
    );
    assert_eq!(
        f.vault.try_claim(&alice, &f.reward_token, &0),
        Err(Ok(VaultError::VaultPaused))
    );
    assert_eq!(
        f.vault.try_request_withdrawal(&alice, &f.reward_token, &0, &10),
        Err(Ok(VaultError::VaultPaused))
    );
    assert_eq!(
        f.vault.try_execute_withdrawal(&alice, &f.reward_token, &0),
        Err(Ok(VaultError::VaultPaused))
    );
    f.roll_to(110);
    assert_eq!(f.vault.pending_reward(&f.reward_token, &0, &alice), 11);

    f.vault.resume(&f.admin);
    f.vault.deposit(&alice, &f.reward_token, &0, &100);
}

#[test]
fn test_pool_admin_validation() {
    let f = setup();
    let other_token = f
        .env
        .register_stellar_asset_contract_v2(Address::generate(&f.env))
        .address();

    assert_eq!(
        f.vault
            .try_add_pool(&f.admin, &f.reward_token, &100, &f.staked_token, &1, &LOCK),
        Err(Ok(VaultError::PoolAlreadyExists))
    );
    assert_eq!(
        f.vault
            .try_add_pool(&f.admin, &f.reward_token, &100, &other_token, &1, &0),
        Err(Ok(VaultError::InvalidLockPeriod))
    );
    assert_eq!(
        f.vault.try_set_lock_period(&f.admin, &f.reward_token, &0, &(constants::MAX_LOCK_PERIOD + 1)),
        Err(Ok(VaultError::InvalidLockPeriod))
    );
    assert_eq!(
        f.vault.try_set_alloc_point(&f.admin, &f.reward_token, &0, &0),
        Err(Ok(VaultError::SoleAllocPointZero))
    );
    assert_eq!(
        f.vault.try_set_alloc_point(&f.admin, &f.reward_token, &5, &10),
        Err(Ok(VaultError::PoolNotFound))
    );
    // First pool of a new reward token must carry weight.
    assert_eq!(
        f.vault
            .try_add_pool(&f.admin, &other_token, &0, &f.staked_token, &1, &LOCK),
        Err(Ok(VaultError::SoleAllocPointZero))
    );

    f.vault
        .add_pool(&f.admin, &f.reward_token, &100, &other_token, &1, &LOCK);
    f.vault.set_alloc_point(&f.admin, &f.reward_token, &0, &0);
    assert_eq!(f.vault.get_total_alloc_points(&f.reward_token), 100);
    assert_eq!(f.vault.pool_length(&f.reward_token), 2);

    f.vault.set_lock_period(&f.admin, &f.reward_token, &1, &(LOCK * 2));
    assert_eq!(f.vault.get_pool_info(&f.reward_token, &1).lock_period, LOCK * 2);
}

#[test]
fn test_admin_operations_consult_access_control() {
    let f = setup();
    let mallory = Address::generate(&f.env);
    f.acm.deny(&mallory);

    assert_eq!(
        f.vault.try_pause(&mallory),
        Err(Ok(VaultError::Unauthorized))
    );
    assert_eq!(
        f.vault
            .try_set_reward_amount_per_block(&mallory, &f.reward_token, &10),
        Err(Ok(VaultError::Unauthorized))
    );
    assert_eq!(
        f.vault.try_set_alloc_point(&mallory, &f.reward_token, &0, &10),
        Err(Ok(VaultError::Unauthorized))
    );
}

#[test]
fn test_alloc_points_split_emission() {
    let f = setup();
    f.fund_store(1_000_000);
    let other_token = f
        .env
        .register_stellar_asset_contract_v2(Address::generate(&f.env))
        .address();
    let pid = f
        .vault
        .add_pool(&f.admin, &f.reward_token, &300, &other_token, &4, &LOCK);
    assert_eq!(pid, 1);
    assert_eq!(f.vault.get_reward_per_block(&f.reward_token), 4);

    let alice = f.staker(100);
    let bob = Address::generate(&f.env);
    token::StellarAssetClient::new(&f.env, &other_token).mint(&bob, &100);

    f.vault.deposit(&alice, &f.reward_token, &0, &100);
    f.vault.deposit(&bob, &f.reward_token, &1, &100);
    f.roll_to(200);
    assert_eq!(f.vault.claim(&alice, &f.reward_token, &0), 100);
    assert_eq!(f.vault.claim(&bob, &f.reward_token, &1), 300);

    // Rate change settles the elapsed interval at the old rate first.
    f.roll_to(300);
    f.vault
        .set_reward_amount_per_block(&f.admin, &f.reward_token, &8);
    f.roll_to(400);
    assert_eq!(f.vault.claim(&alice, &f.reward_token, &0), 300);
}

#[test]
fn test_votes_follow_governance_stake() {
    let f = setup();
    f.fund_store(1_000_000);
    f.vault.set_governance_pool(&f.reward_token, &0);
    assert_eq!(
        f.vault.try_set_governance_pool(&f.reward_token, &0),
        Err(Ok(VaultError::GovernancePoolAlreadySet))
    );

    let alice = f.staker(100);
    let bob = Address::generate(&f.env);

    f.vault.delegate(&alice, &alice);
    assert_eq!(f.vault.last_vote_seq(), 0);

    f.vault.deposit(&alice, &f.reward_token, &0, &100);
    assert_eq!(f.vault.get_current_votes(&alice), 100);

    f.roll_to(110);
    f.vault.request_old_withdrawal(&alice, &f.reward_token, &0, &30);
    assert_eq!(f.vault.get_current_votes(&alice), 70);

    f.roll_to(120);
    f.vault.delegate(&alice, &bob);
    assert_eq!(f.vault.get_current_votes(&alice), 0);
    assert_eq!(f.vault.get_current_votes(&bob), 70);
    assert_eq!(f.vault.get_delegate(&alice), Some(bob.clone()));

    f.roll_to(130);
    assert_eq!(f.vault.get_prior_votes(&alice, &105), 100);
    assert_eq!(f.vault.get_prior_votes(&alice, &115), 70);
    assert_eq!(f.vault.get_prior_votes(&alice, &125), 0);
    assert_eq!(f.vault.get_prior_votes(&bob, &119), 0);
    assert_eq!(f.vault.get_prior_votes(&bob, &120), 70);
    assert_eq!(
        f.vault.try_get_prior_votes(&alice, &130),
        Err(Ok(VaultError::BlockNotFinalized))
    );

    // Execution of a legacy request does not move weight again.
    f.warp(LOCK);
    f.vault.execute_withdrawal(&alice, &f.reward_token, &0);
    assert_eq!(f.vault.get_current_votes(&bob), 70);
}

#[test]
fn test_vote_outbox_sequence_and_resend() {
    let f = setup();
    f.vault.set_governance_pool(&f.reward_token, &0);
    let alice = f.staker(100);
    let bob = Address::generate(&f.env);

    f.vault.delegate(&alice, &alice);
    f.vault.deposit(&alice, &f.reward_token, &0, &100);
    f.roll_to(101);
    f.vault.delegate(&alice, &bob);

    assert_eq!(f.vault.last_vote_seq(), 3);
    let first = f.vault.get_vote_message(&1);
    assert_eq!(first.account, alice);
    assert_eq!(first.weight, 100);
    assert_eq!(first.block, 100);
    let moved = f.vault.get_vote_message(&3);
    assert_eq!(moved.account, bob);
    assert_eq!(moved.weight, 100);
    assert_eq!(moved.block, 101);

    f.vault.resend_vote_message(&2);
    assert_eq!(f.vault.last_vote_seq(), 3);
    assert_eq!(
        f.vault.try_resend_vote_message(&9),
        Err(Ok(VaultError::MessageNotFound))
    );
}

#[test]
fn test_delegate_requires_governance_pool() {
    let f = setup();
    let alice = Address::generate(&f.env);
    assert_eq!(
        f.vault.try_delegate(&alice, &alice),
        Err(Ok(VaultError::GovernancePoolNotSet))
    );
}
