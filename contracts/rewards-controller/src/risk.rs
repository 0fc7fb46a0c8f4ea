use protocol_math::{mul_div_floor, mul_exp, EXP_SCALE};
use soroban_sdk::{Address, Env, Vec};

use crate::constants::MAX_ASSETS_PER_ACCOUNT;
use crate::errors::ControllerError;
use crate::events::{MarketEntered, MarketExited};
use crate::storage::{self, DataKey, MarketClient, MarketSnapshot, PriceOracleClient};

pub(crate) fn underlying_price(env: &Env, market: &Address) -> Result<u128, ControllerError> {
    let oracle =
        storage::get_address(env, &DataKey::Oracle).ok_or(ControllerError::OracleNotSet)?;
    let price = PriceOracleClient::new(env, &oracle).get_underlying_price(market);
    if price == 0 {
        return Err(ControllerError::PriceError);
    }
    Ok(price)
}

/// Liquidity and shortfall of `account` across its entered markets, valued in
/// the oracle unit, as if it also redeemed `redeem_tokens` and borrowed
/// `borrow_amount` in the market of `modify`.
///
/// The calling market cannot be re-entered, so its balances come from the
/// snapshot it handed over instead of a fresh query.
pub(crate) fn account_liquidity(
    env: &Env,
    account: &Address,
    modify: Option<(&Address, &MarketSnapshot)>,
    redeem_tokens: u128,
    borrow_amount: u128,
) -> Result<(u128, u128), ControllerError> {
    let assets = storage::account_assets(env, account);
    let mut sum_collateral: u128 = 0;
    let mut sum_borrow: u128 = 0;

    for market in assets.iter() {
        let config = storage::listed_market(env, &market)?;
        let snapshot = match modify {
            Some((modified, hint)) if *modified == market => hint.clone(),
            _ => MarketClient::new(env, &market).get_snapshot(account),
        };
        let price = underlying_price(env, &market)?;

        // collateral_factor * exchange_rate * price, per supply token
        let per_token = mul_exp(env, config.collateral_factor, snapshot.exchange_rate)
            .and_then(|v| mul_exp(env, v, price))
            .ok_or(ControllerError::MathOverflow)?;

        let collateral =
            mul_exp(env, per_token, snapshot.account_supply).ok_or(ControllerError::MathOverflow)?;
        let borrowed =
            mul_exp(env, price, snapshot.account_borrows).ok_or(ControllerError::MathOverflow)?;
        sum_collateral = sum_collateral
            .checked_add(collateral)
            .ok_or(ControllerError::MathOverflow)?;
        sum_borrow = sum_borrow
            .checked_add(borrowed)
            .ok_or(ControllerError::MathOverflow)?;

        if let Some((modified, _)) = modify {
            if *modified == market {
                let redeem_effect =
                    mul_exp(env, per_token, redeem_tokens).ok_or(ControllerError::MathOverflow)?;
                let borrow_effect =
                    mul_exp(env, price, borrow_amount).ok_or(ControllerError::MathOverflow)?;
                sum_borrow = sum_borrow
                    .checked_add(redeem_effect)
                    .and_then(|v| v.checked_add(borrow_effect))
                    .ok_or(ControllerError::MathOverflow)?;
            }
        }
    }

    if sum_collateral > sum_borrow {
        Ok((sum_collateral - sum_borrow, 0))
    } else {
        Ok((0, sum_borrow - sum_collateral))
    }
}

pub(crate) fn has_membership(env: &Env, market: &Address, account: &Address) -> bool {
    storage::account_assets(env, account).contains(market)
}

/// Adds `market` to the account's assets. Returns whether it was newly added.
pub(crate) fn add_membership(
    env: &Env,
    market: &Address,
    account: &Address,
) -> Result<bool, ControllerError> {
    storage::listed_market(env, market)?;
    let mut assets = storage::account_assets(env, account);
    if assets.contains(market) {
        return Ok(false);
    }
    if assets.len() >= MAX_ASSETS_PER_ACCOUNT {
        return Err(ControllerError::TooManyMarkets);
    }
    assets.push_back(market.clone());
    storage::set_account_assets(env, account, &assets);
    MarketEntered {
        account: account.clone(),
        market: market.clone(),
    }
    .publish(env);
    Ok(true)
}

pub(crate) fn remove_membership(env: &Env, market: &Address, account: &Address) {
    let assets = storage::account_assets(env, account);
    let mut kept = Vec::new(env);
    for asset in assets.iter() {
        if asset != *market {
            kept.push_back(asset);
        }
    }
    storage::set_account_assets(env, account, &kept);
    MarketExited {
        account: account.clone(),
        market: market.clone(),
    }
    .publish(env);
}

/// Supply tokens of `market_collateral` to seize for `repay_amount` of
/// `market_borrowed` underlying.
pub(crate) fn seize_tokens(
    env: &Env,
    market_borrowed: &Address,
    market_collateral: &Address,
    repay_amount: u128,
    collateral_exchange_rate: u128,
) -> Result<u128, ControllerError> {
    if collateral_exchange_rate == 0 {
        return Err(ControllerError::InvalidInput);
    }
    let price_borrowed = underlying_price(env, market_borrowed)?;
    let price_collateral = underlying_price(env, market_collateral)?;
    let incentive = storage::get_u128(env, &DataKey::LiquidationIncentive);

    // seize = repay * incentive * price_borrowed / (price_collateral * exchange_rate)
    let numerator = mul_exp(env, incentive, price_borrowed).ok_or(ControllerError::MathOverflow)?;
    let denominator = mul_exp(env, price_collateral, collateral_exchange_rate)
        .ok_or(ControllerError::MathOverflow)?;
    if denominator == 0 {
        return Err(ControllerError::PriceError);
    }
    let ratio =
        mul_div_floor(env, numerator, EXP_SCALE, denominator).ok_or(ControllerError::MathOverflow)?;
    mul_exp(env, repay_amount, ratio).ok_or(ControllerError::MathOverflow)
}
