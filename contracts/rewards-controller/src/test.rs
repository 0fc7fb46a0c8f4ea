#![cfg(test)]
use super::*;
use mock_market::{MockMarket, MockMarketClient};
use soroban_sdk::testutils::{Events, Ledger};
use soroban_sdk::token;
use soroban_sdk::{contract, contractimpl, contracttype, vec, Symbol, TryFromVal};
use soroban_sdk::{testutils::Address as _, Address, Env};

const E18: u128 = 1_000_000_000_000_000_000u128;
const E36: u128 = E18 * E18;

// Mock collaborators

#[contract]
struct MockOracle;

#[contracttype]
enum OracleKey {
    Price(Address),
}

#[contractimpl]
impl MockOracle {
    pub fn set_price(env: Env, market: Address, price: u128) {
        env.storage()
            .persistent()
            .set(&OracleKey::Price(market), &price);
    }

    pub fn get_underlying_price(env: Env, market: Address) -> u128 {
        env.storage()
            .persistent()
            .get(&OracleKey::Price(market))
            .unwrap_or(0u128)
    }
}

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

#[contract]
struct MockDenyList;

#[contracttype]
enum DenyKey {
    Blacklisted(Address),
}

#[contractimpl]
impl MockDenyList {
    pub fn set_blacklisted(env: Env, account: Address, value: bool) {
        env.storage()
            .persistent()
            .set(&DenyKey::Blacklisted(account), &value);
    }

    pub fn is_blacklisted(env: Env, account: Address) -> bool {
        env.storage()
            .persistent()
            .get(&DenyKey::Blacklisted(account))
            .unwrap_or(false)
    }
}

struct Fixture<'a> {
    env: Env,
    admin: Address,
    controller: RewardsControllerClient<'a>,
    oracle: MockOracleClient<'a>,
    acm: MockAccessControlClient<'a>,
    deny_list: MockDenyListClient<'a>,
    reward_token: Address,
}

fn setup<'a>() -> Fixture<'a> {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(100);

    let admin = Address::generate(&env);
    let controller_id = env.register(RewardsController, ());
    let controller = RewardsControllerClient::new(&env, &controller_id);
    controller.initialize(&admin);

    let acm_id = env.register(MockAccessControl, ());
    controller.set_access_control(&acm_id);
    let oracle_id = env.register(MockOracle, ());
    controller.set_oracle(&admin, &oracle_id);
    let deny_id = env.register(MockDenyList, ());
    controller.set_deny_list(&admin, &deny_id);

    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    controller.set_reward_token(&admin, &reward_token);

    Fixture {
        admin,
        controller,
        oracle: MockOracleClient::new(&env, &oracle_id),
        acm: MockAccessControlClient::new(&env, &acm_id),
        deny_list: MockDenyListClient::new(&env, &deny_id),
        reward_token,
        env,
    }
}

impl<'a> Fixture<'a> {
    /// Lists a fresh market over a new asset (or `underlying` if given) at
    /// price 1 with a 50% collateral factor.
    fn market(&self, underlying: Option<Address>) -> (MockMarketClient<'a>, Address) {
        let underlying = underlying.unwrap_or_else(|| {
            self.env
                .register_stellar_asset_contract_v2(Address::generate(&self.env))
                .address()
        });
        let id = self.env.register(MockMarket, ());
        let market = MockMarketClient::new(&self.env, &id);
        market.initialize(&self.admin, &underlying, &self.controller.address);
        self.controller.support_market(&self.admin, &id);
        self.oracle.set_price(&id, &E18);
        self.controller
            .set_collateral_factor(&self.admin, &id, &(E18 / 2));
        (market, underlying)
    }

    fn mint_underlying(&self, asset: &Address, to: &Address, amount: i128) {
        token::StellarAssetClient::new(&self.env, asset).mint(to, &amount);
    }

    fn fund_rewards(&self, amount: i128) {
        self.mint_underlying(&self.reward_token, &self.controller.address, amount);
    }

    fn reward_balance(&self, who: &Address) -> i128 {
        token::Client::new(&self.env, &self.reward_token).balance(who)
    }

    fn advance(&self, blocks: u32) {
        self.env.ledger().with_mut(|li| li.sequence_number += blocks);
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

/// Alice and Bob supply 1_000 and 3_000 to market A, Carol borrows 1_000
/// from A against collateral in B. A is then rewarded at 10 per block.
struct Lending<'a> {
    a: MockMarketClient<'a>,
    b: MockMarketClient<'a>,
    alice: Address,
    bob: Address,
    carol: Address,
}

fn lending<'a>(f: &Fixture<'a>) -> Lending<'a> {
    let (a, asset_a) = f.market(None);
    let (b, asset_b) = f.market(None);
    let alice = Address::generate(&f.env);
    let bob = Address::generate(&f.env);
    let carol = Address::generate(&f.env);

    f.mint_underlying(&asset_a, &alice, 1_000);
    f.mint_underlying(&asset_a, &bob, 3_000);
    f.mint_underlying(&asset_b, &carol, 10_000);
    a.mint(&alice, &1_000);
    a.mint(&bob, &3_000);
    b.mint(&carol, &10_000);
    f.controller.enter_markets(&carol, &vec![&f.env, b.address.clone()]);
    a.borrow(&carol, &1_000);

    f.controller.set_reward_rate(&f.admin, &10);
    f.controller
        .add_reward_markets(&f.admin, &vec![&f.env, a.address.clone()]);
    Lending {
        a,
        b,
        alice,
        bob,
        carol,
    }
}

#[test]
fn test_initialize_twice_fails() {
    let f = setup();
    assert_eq!(
        f.controller.try_initialize(&f.admin),
        Err(Ok(ControllerError::AlreadyInitialized))
    );
}

#[test]
fn test_admin_operations_consult_access_control() {
    let f = setup();
    let outsider = Address::generate(&f.env);
    f.acm.deny(&outsider);
    assert_eq!(
        f.controller.try_set_reward_rate(&outsider, &5),
        Err(Ok(ControllerError::Unauthorized))
    );
    assert_eq!(
        f.controller.try_set_claim_threshold(&outsider, &5),
        Err(Ok(ControllerError::Unauthorized))
    );
    f.controller.set_claim_threshold(&f.admin, &5);
    assert_eq!(f.controller.get_claim_threshold(), 5);
}

#[test]
fn test_market_admission_and_exit() {
    let f = setup();
    let (a, asset_a) = f.market(None);
    let user = Address::generate(&f.env);
    assert_eq!(
        f.controller.try_support_market(&f.admin, &a.address),
        Err(Ok(ControllerError::MarketAlreadyListed))
    );
    assert_eq!(
        f.controller
            .try_set_collateral_factor(&f.admin, &a.address, &(E18 * 95 / 100)),
        Err(Ok(ControllerError::InvalidCollateralFactor))
    );

    f.mint_underlying(&asset_a, &user, 1_000);
    a.mint(&user, &1_000);
    f.controller.enter_markets(&user, &vec![&f.env, a.address.clone()]);
    assert!(f.controller.check_membership(&user, &a.address));
    // 1_000 supplied at 50% collateral factor and price 1.
    assert_eq!(f.controller.get_account_liquidity(&user), (500, 0));

    a.borrow(&user, &100);
    assert_eq!(
        f.controller.try_exit_market(&user, &a.address),
        Err(Ok(ControllerError::ExitWithBorrowBalance))
    );
    a.repay_borrow(&user, &user, &100);
    f.controller.exit_market(&user, &a.address);
    assert_eq!(f.controller.get_assets_in(&user).len(), 0);
}

#[test]
fn test_borrow_beyond_liquidity_rejected() {
    let f = setup();
    let l = lending(&f);
    // Carol has 5_000 of borrowing power and already owes 1_000; A holds 3_000 cash.
    assert!(l.a.try_borrow(&l.carol, &2_500).is_ok());
    assert!(l.a.try_borrow(&l.carol, &1_600).is_err());
}

#[test]
fn test_hypothetical_liquidity_after_redeem() {
    let f = setup();
    let l = lending(&f);
    assert_eq!(f.controller.get_account_liquidity(&l.carol), (4_000, 0));
    assert_eq!(
        f.controller
            .get_hypothetical_liquidity(&l.carol, &l.b.address, &8_000, &0),
        (0, 0)
    );
    assert_eq!(
        f.controller
            .get_hypothetical_liquidity(&l.carol, &l.b.address, &10_000, &0),
        (0, 1_000)
    );
}

#[test]
fn test_paused_action_and_supply_cap() {
    let f = setup();
    let (a, asset_a) = f.market(None);
    let user = Address::generate(&f.env);
    f.mint_underlying(&asset_a, &user, 10_000);

    f.controller
        .set_action_paused(&f.admin, &a.address, &Action::Mint, &true);
    assert!(f.controller.is_action_paused(&a.address, &Action::Mint));
    assert!(a.try_mint(&user, &100).is_err());
    f.controller
        .set_action_paused(&f.admin, &a.address, &Action::Mint, &false);

    f.controller.set_market_supply_caps(
        &f.admin,
        &vec![&f.env, a.address.clone()],
        &vec![&f.env, 1_000u128],
    );
    a.mint(&user, &600);
    assert!(a.try_mint(&user, &500).is_err());
    a.mint(&user, &400);
    assert_eq!(a.balance(&user), 1_000);
}

#[test]
fn test_zero_units_advance_block_without_index() {
    let f = setup();
    let (a, asset_a) = f.market(None);
    let (b, asset_b) = f.market(None);
    let borrower = Address::generate(&f.env);
    let supplier = Address::generate(&f.env);

    // Cash donated straight to A: borrows exist while no supply tokens do.
    f.mint_underlying(&asset_a, &a.address, 5_000);
    f.mint_underlying(&asset_b, &borrower, 10_000);
    b.mint(&borrower, &10_000);
    f.controller
        .enter_markets(&borrower, &vec![&f.env, b.address.clone()]);
    a.borrow(&borrower, &1_000);

    f.controller.set_reward_rate(&f.admin, &10);
    f.controller
        .add_reward_markets(&f.admin, &vec![&f.env, a.address.clone()]);
    assert_eq!(f.controller.get_reward_speed(&a.address), 10);

    f.advance(50);
    f.controller.update_account(&borrower, &a.address);
    let state = f.controller.get_supply_state(&a.address).unwrap();
    assert_eq!(state.index, E36);
    assert_eq!(state.block, 150);

    f.mint_underlying(&asset_a, &supplier, 1_000);
    a.mint(&supplier, &1_000);
    f.advance(100);
    f.controller.update_account(&supplier, &a.address);
    // Only the 100 blocks since units became nonzero are distributed.
    assert_eq!(f.controller.get_reward_accrued(&supplier), 1_000);
    let state = f.controller.get_supply_state(&a.address).unwrap();
    assert_eq!(state.index, 2 * E36);
    assert_eq!(state.block, 250);
}

#[test]
fn test_one_to_three_split_pays_exactly() {
    let f = setup();
    let l = lending(&f);
    f.fund_rewards(1_000_000);

    f.advance(100);
    let paid = f.controller.claim(
        &vec![&f.env, l.alice.clone(), l.bob.clone()],
        &vec![&f.env, l.a.address.clone()],
        &true,
        &false,
    );
    assert_eq!(paid, 1_000);
    assert_eq!(f.reward_balance(&l.alice), 250);
    assert_eq!(f.reward_balance(&l.bob), 750);
    assert_eq!(f.controller.get_reward_accrued(&l.alice), 0);
    assert_eq!(f.controller.get_reward_debt(&l.alice), 0);
}

#[test]
fn test_index_never_decreases() {
    let f = setup();
    let l = lending(&f);
    let mut last = f.controller.get_supply_state(&l.a.address).unwrap();
    for _ in 0..5 {
        f.advance(7);
        f.controller.update_account(&l.alice, &l.a.address);
        let state = f.controller.get_supply_state(&l.a.address).unwrap();
        assert!(state.index >= last.index);
        assert!(state.block >= last.block);
        last = state;
    }
    // Same block refresh is a no-op.
    f.controller.update_account(&l.bob, &l.a.address);
    assert_eq!(f.controller.get_supply_state(&l.a.address).unwrap(), last);
}

#[test]
fn test_old_balance_priced_on_redeem() {
    let f = setup();
    let l = lending(&f);
    let dave = Address::generate(&f.env);
    let asset_a = l.a.underlying();
    f.mint_underlying(&asset_a, &dave, 500);

    f.advance(10);
    l.a.mint(&dave, &500);
    l.a.redeem(&dave, &500);
    f.advance(100);
    f.controller.update_account(&dave, &l.a.address);
    assert_eq!(f.controller.get_reward_accrued(&dave), 0);
}

#[test]
fn test_borrow_units_normalised_by_borrow_index() {
    let f = setup();
    let l = lending(&f);
    l.a.set_borrow_index(&(2 * E18));
    assert_eq!(l.a.borrow_balance(&l.carol), 2_000);

    f.advance(100);
    f.controller.update_account(&l.carol, &l.a.address);
    // Sole borrower: the whole borrow-side emission.
    assert_eq!(f.controller.get_reward_accrued(&l.carol), 1_000);
}

#[test]
fn test_claim_threshold_retains_small_balances() {
    let f = setup();
    let l = lending(&f);
    f.fund_rewards(1_000_000);
    f.controller.set_claim_threshold(&f.admin, &500);
    let holders = vec![&f.env, l.alice.clone()];
    let markets = vec![&f.env, l.a.address.clone()];

    f.advance(100);
    f.controller.claim(&holders, &markets, &true, &false);
    f.controller.claim(&holders, &markets, &true, &false);
    assert_eq!(f.reward_balance(&l.alice), 0);
    assert_eq!(f.controller.get_reward_accrued(&l.alice), 250);

    f.advance(100);
    f.controller.claim(&holders, &markets, &true, &false);
    assert_eq!(f.reward_balance(&l.alice), 500);
    assert_eq!(f.controller.get_reward_accrued(&l.alice), 0);
}

#[test]
fn test_debt_carried_and_settled_in_one_transfer() {
    let f = setup();
    let l = lending(&f);
    f.fund_rewards(100);
    let holders = vec![&f.env, l.alice.clone()];
    let markets = vec![&f.env, l.a.address.clone()];

    f.advance(100);
    f.controller.claim(&holders, &markets, &true, &false);
    assert_eq!(f.published("reward_debt_updated"), 1);
    assert_eq!(f.reward_balance(&l.alice), 100);
    assert_eq!(f.controller.get_reward_debt(&l.alice), 150);
    assert_eq!(f.controller.get_reward_accrued(&l.alice), 0);

    // Nothing new available: the ledger stays put.
    f.controller.claim(&holders, &markets, &true, &false);
    assert_eq!(f.published("reward_debt_updated"), 0);
    assert_eq!(f.published("reward_granted"), 0);
    assert_eq!(f.controller.get_reward_debt(&l.alice), 150);
    assert_eq!(f.reward_balance(&l.alice), 100);

    // Top up the debt plus the next 250 of accrual.
    f.advance(100);
    f.fund_rewards(400);
    f.controller.claim(&holders, &markets, &true, &false);
    assert_eq!(f.reward_balance(&l.alice), 500);
    assert_eq!(f.controller.get_reward_debt(&l.alice), 0);
    assert_eq!(f.reward_balance(&f.controller.address), 0);
}

#[test]
fn test_emission_conserved_across_sides_and_debt() {
    let f = setup();
    let l = lending(&f);
    let holders = vec![&f.env, l.alice.clone(), l.bob.clone(), l.carol.clone()];
    let markets = vec![&f.env, l.a.address.clone()];
    let owed = || -> i128 {
        [&l.alice, &l.bob, &l.carol]
            .iter()
            .map(|who| {
                f.reward_balance(who)
                    + (f.controller.get_reward_debt(who) + f.controller.get_reward_accrued(who))
                        as i128
            })
            .sum()
    };

    // 10 per block on each side for 100 blocks, 1_200 on hand.
    f.fund_rewards(1_200);
    f.advance(100);
    assert_eq!(f.controller.claim(&holders, &markets, &true, &true), 1_200);
    assert_eq!(f.reward_balance(&l.alice), 250);
    assert_eq!(f.reward_balance(&l.bob), 750);
    assert_eq!(f.reward_balance(&l.carol), 200);
    assert_eq!(f.controller.get_reward_debt(&l.carol), 800);
    assert_eq!(owed(), 2_000);

    f.fund_rewards(2_000);
    f.advance(50);
    assert_eq!(f.controller.claim(&holders, &markets, &true, &true), 1_800);
    assert_eq!(f.reward_balance(&l.carol), 1_500);
    assert_eq!(f.controller.get_reward_debt(&l.carol), 0);
    assert_eq!(owed(), 3_000);
    assert_eq!(f.reward_balance(&f.controller.address), 200);
}

#[test]
fn test_single_holder_claims_skip_markets_without_index() {
    let f = setup();
    let l = lending(&f);
    let (reward_market, _) = f.market(Some(f.reward_token.clone()));
    f.controller
        .set_reward_market(&f.admin, &reward_market.address);
    for _ in 0..constants::MAX_CLAIM_PAIRS {
        f.controller
            .support_market(&f.admin, &Address::generate(&f.env));
    }
    assert!(f.controller.get_all_markets().len() > constants::MAX_CLAIM_PAIRS);
    f.fund_rewards(1_000_000);

    f.advance(100);
    assert_eq!(f.controller.claim_reward(&l.alice), 250);

    // A dropped market keeps its index and is still claimed.
    f.advance(100);
    f.controller.drop_reward_market(&f.admin, &l.a.address);
    assert_eq!(f.controller.claim_reward(&l.bob), 1_500);
    assert_eq!(f.controller.claim_as_collateral(&l.carol), 2_000);
    assert_eq!(reward_market.balance(&l.carol), 2_000);
}

#[test]
fn test_blacklisted_holder_rejected() {
    let f = setup();
    let l = lending(&f);
    f.fund_rewards(1_000_000);
    f.deny_list.set_blacklisted(&l.alice, &true);
    f.advance(10);
    assert_eq!(
        f.controller.try_claim_reward(&l.alice),
        Err(Ok(ControllerError::AccountBlacklisted))
    );
    // One bad holder aborts the batch.
    assert_eq!(
        f.controller.try_claim(
            &vec![&f.env, l.bob.clone(), l.alice.clone()],
            &vec![&f.env, l.a.address.clone()],
            &true,
            &true,
        ),
        Err(Ok(ControllerError::AccountBlacklisted))
    );
    assert_eq!(f.reward_balance(&l.bob), 0);
}

#[test]
fn test_claim_with_unlisted_market_aborts() {
    let f = setup();
    let l = lending(&f);
    let stray = Address::generate(&f.env);
    assert_eq!(
        f.controller.try_claim(
            &vec![&f.env, l.alice.clone()],
            &vec![&f.env, l.a.address.clone(), stray],
            &true,
            &true,
        ),
        Err(Ok(ControllerError::MarketNotListed))
    );
}

#[test]
fn test_bankrupt_account_claims_as_collateral() {
    let f = setup();
    let l = lending(&f);
    let (reward_market, _) = f.market(Some(f.reward_token.clone()));
    f.controller
        .set_reward_market(&f.admin, &reward_market.address);
    f.fund_rewards(1_000_000);

    f.advance(100);
    // Price jump puts Carol underwater.
    f.oracle.set_price(&l.a.address, &(10 * E18));
    let (_, shortfall) = f.controller.get_account_liquidity(&l.carol);
    assert!(shortfall > 0);

    assert_eq!(
        f.controller.try_claim_reward(&l.carol),
        Err(Ok(ControllerError::BankruptUseCollateralClaim))
    );

    let paid = f.controller.claim_as_collateral(&l.carol);
    assert_eq!(paid, 1_000);
    assert_eq!(reward_market.balance(&l.carol), 1_000);
    assert_eq!(f.reward_balance(&l.carol), 0);
    assert!(f
        .controller
        .check_membership(&l.carol, &reward_market.address));
    assert_eq!(f.controller.get_reward_accrued(&l.carol), 0);
}

#[test]
fn test_drop_and_readd_preserves_index() {
    let f = setup();
    let l = lending(&f);

    f.advance(100);
    f.controller.drop_reward_market(&f.admin, &l.a.address);
    assert_eq!(f.controller.get_reward_speed(&l.a.address), 0);
    let dropped = f.controller.get_supply_state(&l.a.address).unwrap();
    assert_eq!(dropped.index, E36 + E36 / 4);
    assert_eq!(dropped.block, 200);
    assert_eq!(
        f.controller.try_drop_reward_market(&f.admin, &l.a.address),
        Err(Ok(ControllerError::MarketNotRewarded))
    );

    f.advance(50);
    f.controller
        .add_reward_markets(&f.admin, &vec![&f.env, l.a.address.clone()]);
    let readded = f.controller.get_supply_state(&l.a.address).unwrap();
    assert_eq!(readded.index, dropped.index);
    assert_eq!(readded.block, 250);
    assert_eq!(f.controller.get_reward_speed(&l.a.address), 10);

    f.advance(50);
    f.controller.update_account(&l.alice, &l.a.address);
    // 250 before the drop, nothing while dropped, 125 after.
    assert_eq!(f.controller.get_reward_accrued(&l.alice), 375);
}

#[test]
fn test_speeds_follow_borrow_value() {
    let f = setup();
    let l = lending(&f);
    let dave = Address::generate(&f.env);
    let asset_b = l.b.underlying();
    f.mint_underlying(&asset_b, &dave, 10_000);
    l.b.mint(&dave, &10_000);

    // Carol borrows 3_000 of B; A carries 1_000 of borrows.
    l.b.borrow(&l.carol, &3_000);
    f.controller
        .add_reward_markets(&f.admin, &vec![&f.env, l.b.address.clone()]);
    assert_eq!(f.controller.get_reward_speed(&l.a.address), 2);
    assert_eq!(f.controller.get_reward_speed(&l.b.address), 7);

    // Below materiality, A loses its share but stays rewarded.
    f.controller.set_materiality_threshold(&f.admin, &2_000);
    f.controller.refresh_speeds(&f.admin);
    assert_eq!(f.controller.get_reward_speed(&l.a.address), 0);
    assert_eq!(f.controller.get_reward_speed(&l.b.address), 10);
    assert_eq!(f.controller.get_reward_markets().len(), 2);
}

#[test]
fn test_liquidation_seizes_with_incentive() {
    let f = setup();
    let (a, asset_a) = f.market(None);
    let dave = Address::generate(&f.env);
    let liquidator = Address::generate(&f.env);
    f.mint_underlying(&asset_a, &dave, 1_000);
    f.mint_underlying(&asset_a, &liquidator, 1_000);
    a.mint(&dave, &1_000);
    f.controller.enter_markets(&dave, &vec![&f.env, a.address.clone()]);
    a.borrow(&dave, &400);

    f.controller
        .set_collateral_factor(&f.admin, &a.address, &(E18 * 3 / 10));
    assert_eq!(f.controller.get_account_liquidity(&dave), (0, 100));

    // Over the 50% close factor.
    let snapshot = MarketSnapshot {
        total_supply: 1_000,
        total_borrows: 400,
        borrow_index: E18,
        exchange_rate: E18,
        accrual_block: 100,
        account_supply: 1_000,
        account_borrows: 400,
    };
    assert_eq!(
        f.controller.liquidate_borrow_allowed(
            &a.address,
            &a.address,
            &liquidator,
            &dave,
            &201,
            &snapshot
        ),
        FailureCode::TooMuchRepay as u32
    );

    a.liquidate_borrow(&liquidator, &dave, &200);
    assert_eq!(a.borrow_balance(&dave), 200);
    assert_eq!(a.balance(&liquidator), 216);
    assert_eq!(a.balance(&dave), 784);
}

#[test]
fn test_stale_market_reported_as_failure_code() {
    let f = setup();
    let (a, _) = f.market(None);
    let borrower = Address::generate(&f.env);
    let liquidator = Address::generate(&f.env);
    f.advance(5);
    let stale = MarketSnapshot {
        total_supply: 0,
        total_borrows: 0,
        borrow_index: E18,
        exchange_rate: E18,
        accrual_block: 100,
        account_supply: 0,
        account_borrows: 0,
    };
    let code = f.controller.liquidate_borrow_allowed(
        &a.address,
        &a.address,
        &liquidator,
        &borrower,
        &10,
        &stale,
    );
    assert_eq!(code, FailureCode::MarketNotFresh as u32);

    let unlisted = Address::generate(&f.env);
    let code = f.controller.liquidate_borrow_allowed(
        &unlisted,
        &a.address,
        &liquidator,
        &borrower,
        &10,
        &stale,
    );
    assert_eq!(code, FailureCode::MarketNotListed as u32);
}

#[test]
fn test_seize_calculation() {
    let f = setup();
    let (a, _) = f.market(None);
    let (b, _) = f.market(None);
    f.oracle.set_price(&a.address, &(2 * E18));
    // 100 of A (price 2) at 1.08 into B (price 1, rate 1) = 216 tokens.
    assert_eq!(
        f.controller
            .liquidate_calculate_seize_tokens(&a.address, &b.address, &100, &E18),
        216
    );
    // Exchange rate 2: half as many tokens.
    assert_eq!(
        f.controller
            .liquidate_calculate_seize_tokens(&a.address, &b.address, &100, &(2 * E18)),
        108
    );
}
