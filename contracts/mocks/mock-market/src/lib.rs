#![no_std]
//! Minimal interest-bearing market used to drive the rewards controller in
//! tests. Supply tokens are issued 1:1 against the underlying at a fixed
//! exchange rate; interest is simulated by moving the borrow index.

use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env, String};
use stellar_tokens::fungible::Base as TokenBase;

const EXP_SCALE: u128 = 1_000_000_000_000_000_000u128;

#[contracttype]
enum DataKey {
    Initialized,
    Admin,
    Underlying,
    Controller,
    ExchangeRate,
    BorrowIndex,
    TotalBorrows,
    AccrualBlock,
    Borrow(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BorrowSnapshot {
    pub principal: u128,
    pub interest_index: u128,
}

/// Same layout as the controller's `MarketSnapshot`.
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

#[soroban_sdk::contractclient(name = "ControllerClient")]
pub trait ControllerContract {
    fn mint_allowed(env: Env, market: Address, minter: Address, mint_amount: u128, snapshot: MarketSnapshot);
    fn redeem_allowed(env: Env, market: Address, redeemer: Address, redeem_tokens: u128, snapshot: MarketSnapshot);
    fn borrow_allowed(env: Env, market: Address, borrower: Address, borrow_amount: u128, snapshot: MarketSnapshot);
    fn repay_borrow_allowed(
        env: Env,
        market: Address,
        payer: Address,
        borrower: Address,
        repay_amount: u128,
        snapshot: MarketSnapshot,
    );
    fn transfer_allowed(
        env: Env,
        market: Address,
        src: Address,
        dst: Address,
        transfer_tokens: u128,
        src_snapshot: MarketSnapshot,
        dst_snapshot: MarketSnapshot,
    );
    fn liquidate_borrow_allowed(
        env: Env,
        market_borrowed: Address,
        market_collateral: Address,
        liquidator: Address,
        borrower: Address,
        repay_amount: u128,
        snapshot: MarketSnapshot,
    ) -> u32;
    fn seize_allowed(
        env: Env,
        market_collateral: Address,
        market_borrowed: Address,
        liquidator: Address,
        borrower: Address,
        seize_tokens: u128,
        borrower_snapshot: MarketSnapshot,
        liquidator_snapshot: MarketSnapshot,
    );
    fn liquidate_calculate_seize_tokens(
        env: Env,
        market_borrowed: Address,
        market_collateral: Address,
        repay_amount: u128,
        collateral_exchange_rate: u128,
    ) -> u128;
}

#[contract]
pub struct MockMarket;

#[contractimpl]
impl MockMarket {
    pub fn initialize(env: Env, admin: Address, underlying: Address, controller: Address) {
        if env.storage().instance().has(&DataKey::Initialized) {
            panic!("already initialized");
        }
        let storage = env.storage().instance();
        storage.set(&DataKey::Admin, &admin);
        storage.set(&DataKey::Underlying, &underlying);
        storage.set(&DataKey::Controller, &controller);
        storage.set(&DataKey::ExchangeRate, &EXP_SCALE);
        storage.set(&DataKey::BorrowIndex, &EXP_SCALE);
        storage.set(&DataKey::TotalBorrows, &0u128);
        storage.set(&DataKey::AccrualBlock, &env.ledger().sequence());
        storage.set(&DataKey::Initialized, &true);
        TokenBase::set_metadata(
            &env,
            7,
            String::from_str(&env, "Mock Supply"),
            String::from_str(&env, "mSUP"),
        );
    }

    pub fn mint(env: Env, minter: Address, amount: u128) {
        minter.require_auth();
        if amount == 0 {
            panic!("bad amount");
        }
        accrue(&env);
        let market = env.current_contract_address();
        controller(&env).mint_allowed(&market, &minter, &amount, &snapshot(&env, &minter));
        underlying(&env).transfer(&minter, &market, &to_i128(amount));
        TokenBase::mint(&env, &minter, to_i128(underlying_to_tokens(&env, amount)));
    }

    /// Supplies `amount` paid by `payer` on behalf of `minter`. A mint paid by
    /// the controller skips the hook because the controller is already on
    /// the call stack and has checkpointed `minter` itself.
    pub fn mint_behalf(env: Env, payer: Address, minter: Address, amount: u128) {
        payer.require_auth();
        if amount == 0 {
            panic!("bad amount");
        }
        accrue(&env);
        let market = env.current_contract_address();
        let ctrl = controller_address(&env);
        if payer != ctrl {
            controller(&env).mint_allowed(&market, &minter, &amount, &snapshot(&env, &minter));
        }
        underlying(&env).transfer(&payer, &market, &to_i128(amount));
        TokenBase::mint(&env, &minter, to_i128(underlying_to_tokens(&env, amount)));
    }

    pub fn redeem(env: Env, redeemer: Address, tokens: u128) {
        redeemer.require_auth();
        if tokens == 0 || supply_balance(&env, &redeemer) < tokens {
            panic!("insufficient balance");
        }
        accrue(&env);
        let market = env.current_contract_address();
        controller(&env).redeem_allowed(&market, &redeemer, &tokens, &snapshot(&env, &redeemer));
        TokenBase::update(&env, Some(&redeemer), None, to_i128(tokens));
        underlying(&env).transfer(&market, &redeemer, &to_i128(tokens_to_underlying(&env, tokens)));
    }

    pub fn borrow(env: Env, borrower: Address, amount: u128) {
        borrower.require_auth();
        if amount == 0 {
            panic!("bad amount");
        }
        accrue(&env);
        let market = env.current_contract_address();
        controller(&env).borrow_allowed(&market, &borrower, &amount, &snapshot(&env, &borrower));
        let balance = borrow_balance(&env, &borrower);
        set_borrow(&env, &borrower, balance + amount);
        set_total_borrows(&env, total_borrows(&env) + amount);
        underlying(&env).transfer(&market, &borrower, &to_i128(amount));
    }

    pub fn repay_borrow(env: Env, payer: Address, borrower: Address, amount: u128) {
        payer.require_auth();
        accrue(&env);
        repay_fresh(&env, &payer, &borrower, amount);
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: u128) {
        from.require_auth();
        if amount == 0 || supply_balance(&env, &from) < amount {
            panic!("insufficient balance");
        }
        accrue(&env);
        let market = env.current_contract_address();
        controller(&env).transfer_allowed(
            &market,
            &from,
            &to,
            &amount,
            &snapshot(&env, &from),
            &snapshot(&env, &to),
        );
        TokenBase::update(&env, Some(&from), Some(&to), to_i128(amount));
    }

    /// Repays part of `borrower`'s debt and seizes supply tokens of this
    /// same market.
    pub fn liquidate_borrow(env: Env, liquidator: Address, borrower: Address, repay_amount: u128) {
        liquidator.require_auth();
        accrue(&env);
        let market = env.current_contract_address();
        let ctrl = controller(&env);
        let code = ctrl.liquidate_borrow_allowed(
            &market,
            &market,
            &liquidator,
            &borrower,
            &repay_amount,
            &snapshot(&env, &borrower),
        );
        if code != 0 {
            panic!("liquidation rejected");
        }
        repay_fresh(&env, &liquidator, &borrower, repay_amount);
        let seize = ctrl.liquidate_calculate_seize_tokens(&market, &market, &repay_amount, &exchange_rate(&env));
        if seize > supply_balance(&env, &borrower) {
            panic!("seize too much");
        }
        ctrl.seize_allowed(
            &market,
            &market,
            &liquidator,
            &borrower,
            &seize,
            &snapshot(&env, &borrower),
            &snapshot(&env, &liquidator),
        );
        TokenBase::update(&env, Some(&borrower), Some(&liquidator), to_i128(seize));
    }

    /// Simulates interest accrual by moving the borrow index.
    pub fn set_borrow_index(env: Env, new_index: u128) {
        admin(&env).require_auth();
        let old_index = borrow_index(&env);
        if new_index < old_index {
            panic!("index decrease");
        }
        let total = total_borrows(&env) * new_index / old_index;
        env.storage().instance().set(&DataKey::BorrowIndex, &new_index);
        set_total_borrows(&env, total);
        accrue(&env);
    }

    pub fn get_snapshot(env: Env, account: Address) -> MarketSnapshot {
        snapshot(&env, &account)
    }

    pub fn underlying(env: Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::Underlying)
            .expect("not initialized")
    }

    pub fn balance(env: Env, account: Address) -> i128 {
        TokenBase::balance(&env, &account)
    }

    pub fn total_supply(env: Env) -> i128 {
        TokenBase::total_supply(&env)
    }

    pub fn borrow_balance(env: Env, account: Address) -> u128 {
        borrow_balance(&env, &account)
    }

    pub fn total_borrows(env: Env) -> u128 {
        total_borrows(&env)
    }

    pub fn exchange_rate(env: Env) -> u128 {
        exchange_rate(&env)
    }
}

fn repay_fresh(env: &Env, payer: &Address, borrower: &Address, amount: u128) {
    let market = env.current_contract_address();
    let balance = borrow_balance(env, borrower);
    let repay = if amount > balance { balance } else { amount };
    if repay == 0 {
        panic!("nothing to repay");
    }
    controller(env).repay_borrow_allowed(&market, payer, borrower, &repay, &snapshot(env, borrower));
    underlying(env).transfer(payer, &market, &to_i128(repay));
    set_borrow(env, borrower, balance - repay);
    set_total_borrows(env, total_borrows(env).saturating_sub(repay));
}

fn to_i128(amount: u128) -> i128 {
    i128::try_from(amount).expect("amount overflow")
}

fn admin(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("not initialized")
}

fn controller_address(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Controller)
        .expect("not initialized")
}

fn controller(env: &Env) -> ControllerClient<'_> {
    ControllerClient::new(env, &controller_address(env))
}

fn underlying(env: &Env) -> token::Client<'_> {
    let address: Address = env
        .storage()
        .instance()
        .get(&DataKey::Underlying)
        .expect("not initialized");
    token::Client::new(env, &address)
}

fn accrue(env: &Env) {
    env.storage()
        .instance()
        .set(&DataKey::AccrualBlock, &env.ledger().sequence());
}

fn exchange_rate(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::ExchangeRate)
        .unwrap_or(EXP_SCALE)
}

fn borrow_index(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::BorrowIndex)
        .unwrap_or(EXP_SCALE)
}

fn total_borrows(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalBorrows)
        .unwrap_or(0u128)
}

fn set_total_borrows(env: &Env, total: u128) {
    env.storage().instance().set(&DataKey::TotalBorrows, &total);
}

fn supply_balance(env: &Env, account: &Address) -> u128 {
    let balance = TokenBase::balance(env, account);
    if balance > 0 {
        balance as u128
    } else {
        0
    }
}

fn borrow_balance(env: &Env, account: &Address) -> u128 {
    let snap: Option<BorrowSnapshot> = env
        .storage()
        .persistent()
        .get(&DataKey::Borrow(account.clone()));
    match snap {
        Some(s) if s.principal > 0 && s.interest_index > 0 => {
            s.principal * borrow_index(env) / s.interest_index
        }
        _ => 0,
    }
}

fn set_borrow(env: &Env, account: &Address, principal: u128) {
    let snap = BorrowSnapshot {
        principal,
        interest_index: borrow_index(env),
    };
    env.storage()
        .persistent()
        .set(&DataKey::Borrow(account.clone()), &snap);
}

fn underlying_to_tokens(env: &Env, amount: u128) -> u128 {
    amount * EXP_SCALE / exchange_rate(env)
}

fn tokens_to_underlying(env: &Env, tokens: u128) -> u128 {
    tokens * exchange_rate(env) / EXP_SCALE
}

fn snapshot(env: &Env, account: &Address) -> MarketSnapshot {
    let total_supply = TokenBase::total_supply(env);
    MarketSnapshot {
        total_supply: if total_supply > 0 { total_supply as u128 } else { 0 },
        total_borrows: total_borrows(env),
        borrow_index: borrow_index(env),
        exchange_rate: exchange_rate(env),
        accrual_block: env
            .storage()
            .instance()
            .get(&DataKey::AccrualBlock)
            .unwrap_or(0u32),
        account_supply: supply_balance(env, account),
        account_borrows: borrow_balance(env, account),
    }
}
