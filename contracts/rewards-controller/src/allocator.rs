use protocol_math::{mul_div_floor, mul_exp};
use soroban_sdk::{Address, Env, Vec};

use crate::constants::MAX_CLAIM_PAIRS;
use crate::errors::ControllerError;
use crate::events::{RewardEligibilityUpdated, RewardSpeedUpdated};
use crate::flywheel;
use crate::risk::underlying_price;
use crate::storage::{self, DataKey, MarketClient, RewardSide};

fn set_speed(env: &Env, market: &Address, new_speed: u128) {
    let old_speed = storage::reward_speed(env, market);
    if old_speed == new_speed {
        return;
    }
    storage::set_reward_speed(env, market, new_speed);
    RewardSpeedUpdated {
        market: market.clone(),
        old_speed,
        new_speed,
    }
    .publish(env);
}

/// Brings both indices of `market` up to date at its current speed.
fn accrue_market(env: &Env, market: &Address) -> Result<u128, ControllerError> {
    let totals = MarketClient::new(env, market).get_snapshot(&env.current_contract_address());
    flywheel::refresh_supply_index(env, market, &totals)?;
    flywheel::refresh_borrow_index(env, market, &totals)?;
    Ok(totals.total_borrows)
}

/// Accrues every reward market at its old speed, then splits the reward rate
/// by borrow value. Markets below the materiality threshold get zero weight
/// but stay eligible.
pub(crate) fn refresh_speeds(env: &Env) -> Result<(), ControllerError> {
    let markets = storage::reward_markets(env);
    let materiality = storage::get_u128(env, &DataKey::MaterialityThreshold);
    let rate = storage::get_u128(env, &DataKey::RewardRate);

    let mut utilities: Vec<u128> = Vec::new(env);
    let mut total_utility: u128 = 0;
    for market in markets.iter() {
        let total_borrows = accrue_market(env, &market)?;
        let utility = if total_borrows == 0 {
            0
        } else {
            let price = underlying_price(env, &market)?;
            let value = mul_exp(env, total_borrows, price).ok_or(ControllerError::MathOverflow)?;
            if value < materiality {
                0
            } else {
                value
            }
        };
        total_utility = total_utility
            .checked_add(utility)
            .ok_or(ControllerError::MathOverflow)?;
        utilities.push_back(utility);
    }

    for (i, market) in markets.iter().enumerate() {
        let utility = utilities.get(i as u32).unwrap_or(0);
        let speed = if total_utility == 0 || utility == 0 {
            0
        } else {
            mul_div_floor(env, rate, utility, total_utility).ok_or(ControllerError::MathOverflow)?
        };
        set_speed(env, &market, speed);
    }
    Ok(())
}

pub(crate) fn add_reward_market(env: &Env, market: &Address) -> Result<(), ControllerError> {
    let mut config = storage::listed_market(env, market)?;
    if config.reward_eligible {
        return Err(ControllerError::MarketAlreadyRewarded);
    }
    // Single-holder claims walk this list, so it stays within one batch.
    let mut indexed = storage::indexed_markets(env);
    if !indexed.contains(market) {
        if indexed.len() >= MAX_CLAIM_PAIRS {
            return Err(ControllerError::TooManyMarkets);
        }
        indexed.push_back(market.clone());
        storage::set_indexed_markets(env, &indexed);
    }
    config.reward_eligible = true;
    storage::set_market(env, market, &config);

    let mut markets = storage::reward_markets(env);
    if !markets.contains(market) {
        markets.push_back(market.clone());
        storage::set_reward_markets(env, &markets);
    }

    // An existing index survives a drop and re-add untouched.
    flywheel::start_index(env, market, RewardSide::Supply);
    flywheel::start_index(env, market, RewardSide::Borrow);

    RewardEligibilityUpdated {
        market: market.clone(),
        eligible: true,
    }
    .publish(env);
    Ok(())
}

pub(crate) fn drop_reward_market(env: &Env, market: &Address) -> Result<(), ControllerError> {
    let mut config = storage::listed_market(env, market)?;
    if !config.reward_eligible {
        return Err(ControllerError::MarketNotRewarded);
    }
    // Settle the elapsed interval before the speed goes away.
    accrue_market(env, market)?;
    set_speed(env, market, 0);

    config.reward_eligible = false;
    storage::set_market(env, market, &config);

    let markets = storage::reward_markets(env);
    let mut kept = Vec::new(env);
    for m in markets.iter() {
        if m != *market {
            kept.push_back(m);
        }
    }
    storage::set_reward_markets(env, &kept);

    RewardEligibilityUpdated {
        market: market.clone(),
        eligible: false,
    }
    .publish(env);
    Ok(())
}
