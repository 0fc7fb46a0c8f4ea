use protocol_math::mul_exp;
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, Vec};

use crate::allocator;
use crate::constants::*;
use crate::errors::{fail, ControllerError, FailureCode, FailureInfo};
use crate::events::*;
use crate::flywheel;
use crate::helpers::{ensure_allowed, require_admin};
use crate::risk;
use crate::storage::{
    self, Action, DataKey, Market, MarketClient, MarketSnapshot, RewardSide, RewardState,
};

#[contract]
pub struct RewardsController;

fn ensure_not_paused(env: &Env, market: &Address, action: Action) -> Result<(), ControllerError> {
    if storage::is_paused(env, market, action) {
        return Err(ControllerError::ActionPaused);
    }
    Ok(())
}

#[contractimpl]
impl RewardsController {
    pub fn initialize(env: Env, admin: Address) -> Result<(), ControllerError> {
        if storage::is_initialized(&env) {
            return Err(ControllerError::AlreadyInitialized);
        }
        admin.require_auth();
        storage::set_admin(&env, &admin);
        storage::set_u128(&env, &DataKey::CloseFactor, DEFAULT_CLOSE_FACTOR);
        storage::set_u128(
            &env,
            &DataKey::LiquidationIncentive,
            DEFAULT_LIQUIDATION_INCENTIVE,
        );
        env.storage().instance().set(&DataKey::Initialized, &true);
        storage::bump_core_ttl(&env);
        Ok(())
    }

    // Admin

    pub fn set_admin(env: Env, new_admin: Address) -> Result<(), ControllerError> {
        require_admin(&env)?;
        storage::set_admin(&env, &new_admin);
        AdminUpdated { admin: new_admin }.publish(&env);
        Ok(())
    }

    pub fn get_admin(env: Env) -> Result<Address, ControllerError> {
        storage::get_admin(&env)
    }

    pub fn set_access_control(env: Env, access_control: Address) -> Result<(), ControllerError> {
        require_admin(&env)?;
        storage::set_address(&env, &DataKey::AccessControl, &access_control);
        AccessControlUpdated { access_control }.publish(&env);
        Ok(())
    }

    pub fn upgrade_wasm(env: Env, new_wasm_hash: BytesN<32>) -> Result<(), ControllerError> {
        require_admin(&env)?;
        env.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }

    pub fn set_oracle(env: Env, caller: Address, oracle: Address) -> Result<(), ControllerError> {
        ensure_allowed(&env, &caller, "set_oracle")?;
        storage::set_address(&env, &DataKey::Oracle, &oracle);
        OracleUpdated { oracle }.publish(&env);
        Ok(())
    }

    pub fn set_deny_list(env: Env, caller: Address, deny_list: Address) -> Result<(), ControllerError> {
        ensure_allowed(&env, &caller, "set_deny_list")?;
        storage::set_address(&env, &DataKey::DenyList, &deny_list);
        DenyListUpdated { deny_list }.publish(&env);
        Ok(())
    }

    pub fn set_close_factor(env: Env, caller: Address, close_factor: u128) -> Result<(), ControllerError> {
        ensure_allowed(&env, &caller, "set_close_factor")?;
        if !(MIN_CLOSE_FACTOR..=MAX_CLOSE_FACTOR).contains(&close_factor) {
            return Err(ControllerError::InvalidCloseFactor);
        }
        storage::set_u128(&env, &DataKey::CloseFactor, close_factor);
        CloseFactorUpdated {
            close_factor_mantissa: close_factor,
        }
        .publish(&env);
        Ok(())
    }

    pub fn set_liquidation_incentive(
        env: Env,
        caller: Address,
        incentive: u128,
    ) -> Result<(), ControllerError> {
        ensure_allowed(&env, &caller, "set_liquidation_incentive")?;
        if !(EXP_SCALE..=MAX_LIQUIDATION_INCENTIVE).contains(&incentive) {
            return Err(ControllerError::InvalidLiquidationIncentive);
        }
        storage::set_u128(&env, &DataKey::LiquidationIncentive, incentive);
        LiquidationIncentiveUpdated {
            incentive_mantissa: incentive,
        }
        .publish(&env);
        Ok(())
    }

    // Markets

    pub fn support_market(env: Env, caller: Address, market: Address) -> Result<(), ControllerError> {
        ensure_allowed(&env, &caller, "support_market")?;
        if storage::get_market(&env, &market).is_some() {
            return Err(ControllerError::MarketAlreadyListed);
        }
        storage::set_market(
            &env,
            &market,
            &Market {
                listed: true,
                collateral_factor: 0,
                reward_eligible: false,
            },
        );
        let mut markets = storage::all_markets(&env);
        markets.push_back(market.clone());
        storage::set_all_markets(&env, &markets);
        MarketListed { market }.publish(&env);
        Ok(())
    }

    pub fn set_collateral_factor(
        env: Env,
        caller: Address,
        market: Address,
        collateral_factor: u128,
    ) -> Result<(), ControllerError> {
        ensure_allowed(&env, &caller, "set_collateral_factor")?;
        let mut config = storage::listed_market(&env, &market)?;
        if collateral_factor > MAX_COLLATERAL_FACTOR {
            return Err(ControllerError::InvalidCollateralFactor);
        }
        if collateral_factor > 0 {
            risk::underlying_price(&env, &market)?;
        }
        let old_mantissa = config.collateral_factor;
        config.collateral_factor = collateral_factor;
        storage::set_market(&env, &market, &config);
        CollateralFactorUpdated {
            market,
            old_mantissa,
            new_mantissa: collateral_factor,
        }
        .publish(&env);
        Ok(())
    }

    pub fn set_market_supply_caps(
        env: Env,
        caller: Address,
        markets: Vec<Address>,
        caps: Vec<u128>,
    ) -> Result<(), ControllerError> {
        ensure_allowed(&env, &caller, "set_market_supply_caps")?;
        if markets.len() != caps.len() || markets.is_empty() {
            return Err(ControllerError::InvalidInput);
        }
        for (market, cap) in markets.iter().zip(caps.iter()) {
            storage::listed_market(&env, &market)?;
            storage::set_supply_cap(&env, &market, cap);
            SupplyCapUpdated { market, cap }.publish(&env);
        }
        Ok(())
    }

    pub fn set_market_borrow_caps(
        env: Env,
        caller: Address,
        markets: Vec<Address>,
        caps: Vec<u128>,
    ) -> Result<(), ControllerError> {
        ensure_allowed(&env, &caller, "set_market_borrow_caps")?;
        if markets.len() != caps.len() || markets.is_empty() {
            return Err(ControllerError::InvalidInput);
        }
        for (market, cap) in markets.iter().zip(caps.iter()) {
            storage::listed_market(&env, &market)?;
            storage::set_borrow_cap(&env, &market, cap);
            BorrowCapUpdated { market, cap }.publish(&env);
        }
        Ok(())
    }

    pub fn set_action_paused(
        env: Env,
        caller: Address,
        market: Address,
        action: Action,
        paused: bool,
    ) -> Result<(), ControllerError> {
        ensure_allowed(&env, &caller, "set_action_paused")?;
        storage::listed_market(&env, &market)?;
        storage::set_paused(&env, &market, action, paused);
        ActionPausedUpdated {
            market,
            action,
            paused,
        }
        .publish(&env);
        Ok(())
    }

    pub fn enter_markets(env: Env, account: Address, markets: Vec<Address>) -> Result<(), ControllerError> {
        account.require_auth();
        for market in markets.iter() {
            risk::add_membership(&env, &market, &account)?;
        }
        Ok(())
    }

    pub fn exit_market(env: Env, account: Address, market: Address) -> Result<(), ControllerError> {
        account.require_auth();
        storage::listed_market(&env, &market)?;
        if !risk::has_membership(&env, &market, &account) {
            return Ok(());
        }
        let snapshot = MarketClient::new(&env, &market).get_snapshot(&account);
        if snapshot.account_borrows > 0 {
            return Err(ControllerError::ExitWithBorrowBalance);
        }
        let (_, shortfall) = risk::account_liquidity(
            &env,
            &account,
            Some((&market, &snapshot)),
            snapshot.account_supply,
            0,
        )?;
        if shortfall > 0 {
            return Err(ControllerError::InsufficientLiquidity);
        }
        risk::remove_membership(&env, &market, &account);
        Ok(())
    }

    // Market hooks. Each is invoked by the market itself before it applies
    // the action, with its balances as they stand.

    pub fn mint_allowed(
        env: Env,
        market: Address,
        minter: Address,
        mint_amount: u128,
        snapshot: MarketSnapshot,
    ) -> Result<(), ControllerError> {
        market.require_auth();
        storage::listed_market(&env, &market)?;
        ensure_not_paused(&env, &market, Action::Mint)?;
        let cap = storage::supply_cap(&env, &market);
        if cap > 0 {
            let supplied = mul_exp(&env, snapshot.total_supply, snapshot.exchange_rate)
                .ok_or(ControllerError::MathOverflow)?;
            if supplied.saturating_add(mint_amount) > cap {
                return Err(ControllerError::SupplyCapReached);
            }
        }
        flywheel::refresh_supply_index(&env, &market, &snapshot)?;
        flywheel::distribute_supplier(&env, &market, &minter, snapshot.account_supply)
    }

    pub fn redeem_allowed(
        env: Env,
        market: Address,
        redeemer: Address,
        redeem_tokens: u128,
        snapshot: MarketSnapshot,
    ) -> Result<(), ControllerError> {
        market.require_auth();
        storage::listed_market(&env, &market)?;
        ensure_not_paused(&env, &market, Action::Redeem)?;
        if risk::has_membership(&env, &market, &redeemer) {
            let (_, shortfall) = risk::account_liquidity(
                &env,
                &redeemer,
                Some((&market, &snapshot)),
                redeem_tokens,
                0,
            )?;
            if shortfall > 0 {
                return Err(ControllerError::InsufficientLiquidity);
            }
        }
        flywheel::refresh_supply_index(&env, &market, &snapshot)?;
        flywheel::distribute_supplier(&env, &market, &redeemer, snapshot.account_supply)
    }

    pub fn borrow_allowed(
        env: Env,
        market: Address,
        borrower: Address,
        borrow_amount: u128,
        snapshot: MarketSnapshot,
    ) -> Result<(), ControllerError> {
        market.require_auth();
        storage::listed_market(&env, &market)?;
        ensure_not_paused(&env, &market, Action::Borrow)?;
        // Borrowing enters the market.
        risk::add_membership(&env, &market, &borrower)?;
        risk::underlying_price(&env, &market)?;
        let cap = storage::borrow_cap(&env, &market);
        if cap > 0 && snapshot.total_borrows.saturating_add(borrow_amount) > cap {
            return Err(ControllerError::BorrowCapReached);
        }
        let (_, shortfall) = risk::account_liquidity(
            &env,
            &borrower,
            Some((&market, &snapshot)),
            0,
            borrow_amount,
        )?;
        if shortfall > 0 {
            return Err(ControllerError::InsufficientLiquidity);
        }
        flywheel::refresh_borrow_index(&env, &market, &snapshot)?;
        flywheel::distribute_borrower(
            &env,
            &market,
            &borrower,
            snapshot.account_borrows,
            snapshot.borrow_index,
        )
    }

    pub fn repay_borrow_allowed(
        env: Env,
        market: Address,
        _payer: Address,
        borrower: Address,
        _repay_amount: u128,
        snapshot: MarketSnapshot,
    ) -> Result<(), ControllerError> {
        market.require_auth();
        storage::listed_market(&env, &market)?;
        flywheel::refresh_borrow_index(&env, &market, &snapshot)?;
        flywheel::distribute_borrower(
            &env,
            &market,
            &borrower,
            snapshot.account_borrows,
            snapshot.borrow_index,
        )
    }

    pub fn transfer_allowed(
        env: Env,
        market: Address,
        src: Address,
        dst: Address,
        transfer_tokens: u128,
        src_snapshot: MarketSnapshot,
        dst_snapshot: MarketSnapshot,
    ) -> Result<(), ControllerError> {
        market.require_auth();
        storage::listed_market(&env, &market)?;
        ensure_not_paused(&env, &market, Action::Transfer)?;
        if risk::has_membership(&env, &market, &src) {
            let (_, shortfall) = risk::account_liquidity(
                &env,
                &src,
                Some((&market, &src_snapshot)),
                transfer_tokens,
                0,
            )?;
            if shortfall > 0 {
                return Err(ControllerError::InsufficientLiquidity);
            }
        }
        flywheel::refresh_supply_index(&env, &market, &src_snapshot)?;
        flywheel::distribute_supplier(&env, &market, &src, src_snapshot.account_supply)?;
        flywheel::distribute_supplier(&env, &market, &dst, dst_snapshot.account_supply)
    }

    /// Returns 0 when the liquidation may proceed, otherwise a failure code
    /// that is also published as a `Failure` event.
    pub fn liquidate_borrow_allowed(
        env: Env,
        market_borrowed: Address,
        market_collateral: Address,
        _liquidator: Address,
        borrower: Address,
        repay_amount: u128,
        snapshot: MarketSnapshot,
    ) -> Result<u32, ControllerError> {
        market_borrowed.require_auth();
        let listed = storage::listed_market(&env, &market_borrowed).is_ok()
            && storage::listed_market(&env, &market_collateral).is_ok();
        if !listed {
            return Ok(fail(
                &env,
                FailureCode::MarketNotListed,
                FailureInfo::LiquidateComptrollerRejection,
                0,
            ));
        }
        ensure_not_paused(&env, &market_borrowed, Action::Liquidate)?;

        let current = env.ledger().sequence();
        if snapshot.accrual_block != current {
            return Ok(fail(
                &env,
                FailureCode::MarketNotFresh,
                FailureInfo::LiquidateFreshnessCheck,
                snapshot.accrual_block as u128,
            ));
        }
        if market_collateral != market_borrowed {
            let collateral = MarketClient::new(&env, &market_collateral).get_snapshot(&borrower);
            if collateral.accrual_block != current {
                return Ok(fail(
                    &env,
                    FailureCode::MarketNotFresh,
                    FailureInfo::LiquidateFreshnessCheck,
                    collateral.accrual_block as u128,
                ));
            }
        }

        let shortfall = match risk::account_liquidity(
            &env,
            &borrower,
            Some((&market_borrowed, &snapshot)),
            0,
            0,
        ) {
            Ok((_, shortfall)) => shortfall,
            Err(ControllerError::PriceError) | Err(ControllerError::OracleNotSet) => {
                return Ok(fail(
                    &env,
                    FailureCode::PriceError,
                    FailureInfo::LiquidatePriceCheck,
                    0,
                ));
            }
            Err(err) => return Err(err),
        };
        if shortfall == 0 {
            return Ok(fail(
                &env,
                FailureCode::InsufficientShortfall,
                FailureInfo::LiquidateShortfallCheck,
                0,
            ));
        }

        let close_factor = storage::get_u128(&env, &DataKey::CloseFactor);
        let max_close = mul_exp(&env, close_factor, snapshot.account_borrows)
            .ok_or(ControllerError::MathOverflow)?;
        if repay_amount > max_close {
            return Ok(fail(
                &env,
                FailureCode::TooMuchRepay,
                FailureInfo::LiquidateCloseAmountTooMuch,
                max_close,
            ));
        }
        Ok(FailureCode::NoError as u32)
    }

    pub fn seize_allowed(
        env: Env,
        market_collateral: Address,
        market_borrowed: Address,
        liquidator: Address,
        borrower: Address,
        _seize_tokens: u128,
        borrower_snapshot: MarketSnapshot,
        liquidator_snapshot: MarketSnapshot,
    ) -> Result<(), ControllerError> {
        market_collateral.require_auth();
        storage::listed_market(&env, &market_collateral)?;
        storage::listed_market(&env, &market_borrowed)?;
        ensure_not_paused(&env, &market_collateral, Action::Seize)?;
        flywheel::refresh_supply_index(&env, &market_collateral, &borrower_snapshot)?;
        flywheel::distribute_supplier(
            &env,
            &market_collateral,
            &borrower,
            borrower_snapshot.account_supply,
        )?;
        flywheel::distribute_supplier(
            &env,
            &market_collateral,
            &liquidator,
            liquidator_snapshot.account_supply,
        )
    }

    pub fn liquidate_calculate_seize_tokens(
        env: Env,
        market_borrowed: Address,
        market_collateral: Address,
        repay_amount: u128,
        collateral_exchange_rate: u128,
    ) -> Result<u128, ControllerError> {
        risk::seize_tokens(
            &env,
            &market_borrowed,
            &market_collateral,
            repay_amount,
            collateral_exchange_rate,
        )
    }

    // Rewards

    pub fn set_reward_token(env: Env, caller: Address, token: Address) -> Result<(), ControllerError> {
        ensure_allowed(&env, &caller, "set_reward_token")?;
        storage::set_address(&env, &DataKey::RewardToken, &token);
        RewardTokenSet { token }.publish(&env);
        Ok(())
    }

    pub fn set_reward_market(env: Env, caller: Address, market: Address) -> Result<(), ControllerError> {
        ensure_allowed(&env, &caller, "set_reward_market")?;
        storage::listed_market(&env, &market)?;
        storage::set_address(&env, &DataKey::RewardMarket, &market);
        RewardMarketSet { market }.publish(&env);
        Ok(())
    }

    pub fn set_claim_threshold(env: Env, caller: Address, threshold: u128) -> Result<(), ControllerError> {
        ensure_allowed(&env, &caller, "set_claim_threshold")?;
        let old_threshold = storage::get_u128(&env, &DataKey::ClaimThreshold);
        storage::set_u128(&env, &DataKey::ClaimThreshold, threshold);
        ClaimThresholdUpdated {
            old_threshold,
            new_threshold: threshold,
        }
        .publish(&env);
        Ok(())
    }

    pub fn set_materiality_threshold(
        env: Env,
        caller: Address,
        threshold: u128,
    ) -> Result<(), ControllerError> {
        ensure_allowed(&env, &caller, "set_materiality_threshold")?;
        let old_threshold = storage::get_u128(&env, &DataKey::MaterialityThreshold);
        storage::set_u128(&env, &DataKey::MaterialityThreshold, threshold);
        MaterialityThresholdUpdated {
            old_threshold,
            new_threshold: threshold,
        }
        .publish(&env);
        Ok(())
    }

    /// Sets the per-block rate split across reward markets. Each market's
    /// share drives its supply and its borrow index alike, so a market
    /// emits its speed on each side.
    pub fn set_reward_rate(env: Env, caller: Address, rate: u128) -> Result<(), ControllerError> {
        ensure_allowed(&env, &caller, "set_reward_rate")?;
        let old_rate = storage::get_u128(&env, &DataKey::RewardRate);
        storage::set_u128(&env, &DataKey::RewardRate, rate);
        RewardRateUpdated {
            old_rate,
            new_rate: rate,
        }
        .publish(&env);
        allocator::refresh_speeds(&env)
    }

    pub fn add_reward_markets(env: Env, caller: Address, markets: Vec<Address>) -> Result<(), ControllerError> {
        ensure_allowed(&env, &caller, "add_reward_markets")?;
        for market in markets.iter() {
            allocator::add_reward_market(&env, &market)?;
        }
        allocator::refresh_speeds(&env)
    }

    pub fn drop_reward_market(env: Env, caller: Address, market: Address) -> Result<(), ControllerError> {
        ensure_allowed(&env, &caller, "drop_reward_market")?;
        allocator::drop_reward_market(&env, &market)?;
        allocator::refresh_speeds(&env)
    }

    pub fn refresh_speeds(env: Env, caller: Address) -> Result<(), ControllerError> {
        ensure_allowed(&env, &caller, "refresh_speeds")?;
        allocator::refresh_speeds(&env)
    }

    /// Claims on both sides of every market that carries a reward index,
    /// including dropped ones.
    pub fn claim_reward(env: Env, holder: Address) -> Result<u128, ControllerError> {
        let mut holders = Vec::new(&env);
        holders.push_back(holder);
        let markets = storage::indexed_markets(&env);
        flywheel::claim_internal(&env, &holders, &markets, true, true, false)
    }

    /// Batch claim, all-or-nothing: any unlisted market, blacklisted holder or
    /// holder with a shortfall rejects the whole call.
    pub fn claim(
        env: Env,
        holders: Vec<Address>,
        markets: Vec<Address>,
        suppliers: bool,
        borrowers: bool,
    ) -> Result<u128, ControllerError> {
        flywheel::claim_internal(&env, &holders, &markets, suppliers, borrowers, false)
    }

    /// Claims into the reward market as collateral instead of a transfer.
    pub fn claim_as_collateral(env: Env, holder: Address) -> Result<u128, ControllerError> {
        holder.require_auth();
        let mut holders = Vec::new(&env);
        holders.push_back(holder);
        let markets = storage::indexed_markets(&env);
        flywheel::claim_internal(&env, &holders, &markets, true, true, true)
    }

    /// Accrues `holder` in `market` without paying anything out.
    pub fn update_account(env: Env, holder: Address, market: Address) -> Result<(), ControllerError> {
        storage::listed_market(&env, &market)?;
        flywheel::ensure_not_blacklisted(&env, &holder)?;
        let snapshot = MarketClient::new(&env, &market).get_snapshot(&holder);
        flywheel::accrue_account(&env, &market, &holder, &snapshot, true, true)
    }

    // Views

    pub fn get_market(env: Env, market: Address) -> Option<Market> {
        storage::get_market(&env, &market)
    }

    pub fn get_all_markets(env: Env) -> Vec<Address> {
        storage::all_markets(&env)
    }

    pub fn get_assets_in(env: Env, account: Address) -> Vec<Address> {
        storage::account_assets(&env, &account)
    }

    pub fn check_membership(env: Env, account: Address, market: Address) -> bool {
        risk::has_membership(&env, &market, &account)
    }

    pub fn get_account_liquidity(env: Env, account: Address) -> Result<(u128, u128), ControllerError> {
        risk::account_liquidity(&env, &account, None, 0, 0)
    }

    pub fn get_hypothetical_liquidity(
        env: Env,
        account: Address,
        market: Address,
        redeem_tokens: u128,
        borrow_amount: u128,
    ) -> Result<(u128, u128), ControllerError> {
        let snapshot = MarketClient::new(&env, &market).get_snapshot(&account);
        risk::account_liquidity(
            &env,
            &account,
            Some((&market, &snapshot)),
            redeem_tokens,
            borrow_amount,
        )
    }

    pub fn get_close_factor(env: Env) -> u128 {
        storage::get_u128(&env, &DataKey::CloseFactor)
    }

    pub fn get_liquidation_incentive(env: Env) -> u128 {
        storage::get_u128(&env, &DataKey::LiquidationIncentive)
    }

    pub fn get_supply_cap(env: Env, market: Address) -> u128 {
        storage::supply_cap(&env, &market)
    }

    pub fn get_borrow_cap(env: Env, market: Address) -> u128 {
        storage::borrow_cap(&env, &market)
    }

    pub fn is_action_paused(env: Env, market: Address, action: Action) -> bool {
        storage::is_paused(&env, &market, action)
    }

    pub fn get_reward_token(env: Env) -> Option<Address> {
        storage::get_address(&env, &DataKey::RewardToken)
    }

    pub fn get_reward_market(env: Env) -> Option<Address> {
        storage::get_address(&env, &DataKey::RewardMarket)
    }

    pub fn get_reward_markets(env: Env) -> Vec<Address> {
        storage::reward_markets(&env)
    }

    pub fn get_reward_rate(env: Env) -> u128 {
        storage::get_u128(&env, &DataKey::RewardRate)
    }

    pub fn get_claim_threshold(env: Env) -> u128 {
        storage::get_u128(&env, &DataKey::ClaimThreshold)
    }

    pub fn get_materiality_threshold(env: Env) -> u128 {
        storage::get_u128(&env, &DataKey::MaterialityThreshold)
    }

    pub fn get_reward_speed(env: Env, market: Address) -> u128 {
        storage::reward_speed(&env, &market)
    }

    pub fn get_supply_state(env: Env, market: Address) -> Option<RewardState> {
        storage::reward_state(&env, &market, RewardSide::Supply)
    }

    pub fn get_borrow_state(env: Env, market: Address) -> Option<RewardState> {
        storage::reward_state(&env, &market, RewardSide::Borrow)
    }

    pub fn get_supplier_index(env: Env, market: Address, account: Address) -> u128 {
        storage::account_index(&env, &market, &account, RewardSide::Supply)
    }

    pub fn get_borrower_index(env: Env, market: Address, account: Address) -> u128 {
        storage::account_index(&env, &market, &account, RewardSide::Borrow)
    }

    pub fn get_reward_accrued(env: Env, account: Address) -> u128 {
        storage::reward_accrued(&env, &account)
    }

    pub fn get_reward_debt(env: Env, account: Address) -> u128 {
        storage::reward_debt(&env, &account)
    }
}
