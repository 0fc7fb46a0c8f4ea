//! Reward indices, account checkpoints and the debt-aware payout.
//!
//! Every hook distributes against the balances a market reports *before* it
//! applies the action, so reward for the elapsed interval is priced at the
//! old balance.

use protocol_math::{index_delta, mul_div_floor, settle_payout, Exp36, EXP_SCALE};
use soroban_sdk::{token, Address, Env, Vec};

use crate::errors::ControllerError;
use crate::events::{
    DistributedBorrowerReward, DistributedSupplierReward, RewardDebtUpdated, RewardGranted,
    RewardIndexUpdated,
};
use crate::helpers::{authorize_transfer_from_self, to_i128, try_call_contract};
use crate::storage::{
    self, DataKey, DenyListClient, MarketClient, MarketSnapshot, RewardSide, RewardState,
};

/// Borrow principal normalised by the market borrow index.
pub(crate) fn borrow_units(env: &Env, borrows: u128, borrow_index: u128) -> Result<u128, ControllerError> {
    if borrows == 0 || borrow_index == 0 {
        return Ok(0);
    }
    mul_div_floor(env, borrows, EXP_SCALE, borrow_index).ok_or(ControllerError::MathOverflow)
}

/// Brings one side of a market index up to the current ledger.
///
/// Ineligible markets are left untouched. The block always advances, even
/// when nothing is outstanding, so a later resumption does not pay out the
/// idle interval.
pub(crate) fn refresh_index(
    env: &Env,
    market: &Address,
    side: RewardSide,
    total_units: u128,
) -> Result<(), ControllerError> {
    let eligible = storage::get_market(env, market)
        .map(|m| m.reward_eligible)
        .unwrap_or(false);
    if !eligible {
        return Ok(());
    }
    let Some(mut state) = storage::reward_state(env, market, side) else {
        return Ok(());
    };
    let current = env.ledger().sequence();
    if state.block >= current {
        return Ok(());
    }
    let delta_blocks = current - state.block;
    let speed = storage::reward_speed(env, market);
    if speed > 0 && total_units > 0 {
        let delta = index_delta(env, speed, delta_blocks, total_units)
            .ok_or(ControllerError::MathOverflow)?;
        state.index = Exp36::from_raw(state.index)
            .checked_add(delta)
            .ok_or(ControllerError::MathOverflow)?
            .raw();
    }
    state.block = current;
    storage::set_reward_state(env, market, side, &state);
    RewardIndexUpdated {
        market: market.clone(),
        side,
        index: state.index,
        block: state.block,
    }
    .publish(env);
    Ok(())
}

pub(crate) fn refresh_supply_index(
    env: &Env,
    market: &Address,
    snapshot: &MarketSnapshot,
) -> Result<(), ControllerError> {
    refresh_index(env, market, RewardSide::Supply, snapshot.total_supply)
}

pub(crate) fn refresh_borrow_index(
    env: &Env,
    market: &Address,
    snapshot: &MarketSnapshot,
) -> Result<(), ControllerError> {
    let units = borrow_units(env, snapshot.total_borrows, snapshot.borrow_index)?;
    refresh_index(env, market, RewardSide::Borrow, units)
}

/// Moves the account checkpoint to the market index and returns the reward
/// earned by `units` over the gap.
fn checkpoint(
    env: &Env,
    market: &Address,
    account: &Address,
    side: RewardSide,
    units: u128,
) -> Result<Option<(u128, u128)>, ControllerError> {
    let Some(state) = storage::reward_state(env, market, side) else {
        return Ok(None);
    };
    let market_index = Exp36::from_raw(state.index);
    let mut stored = Exp36::from_raw(storage::account_index(env, market, account, side));
    // Balances predating eligibility earn from the start of the flywheel.
    if stored.is_zero() && market_index >= Exp36::ONE {
        stored = Exp36::ONE;
    }
    storage::set_account_index(env, market, account, side, market_index.raw());
    let delta_index = market_index.saturating_sub(stored);
    let delta = delta_index
        .mul_units(env, units)
        .ok_or(ControllerError::MathOverflow)?;
    if delta > 0 {
        let accrued = storage::reward_accrued(env, account)
            .checked_add(delta)
            .ok_or(ControllerError::MathOverflow)?;
        storage::set_reward_accrued(env, account, accrued);
    }
    Ok(Some((delta, market_index.raw())))
}

pub(crate) fn distribute_supplier(
    env: &Env,
    market: &Address,
    supplier: &Address,
    account_supply: u128,
) -> Result<(), ControllerError> {
    if let Some((delta, supply_index)) =
        checkpoint(env, market, supplier, RewardSide::Supply, account_supply)?
    {
        DistributedSupplierReward {
            market: market.clone(),
            supplier: supplier.clone(),
            delta,
            supply_index,
        }
        .publish(env);
    }
    Ok(())
}

pub(crate) fn distribute_borrower(
    env: &Env,
    market: &Address,
    borrower: &Address,
    account_borrows: u128,
    borrow_index: u128,
) -> Result<(), ControllerError> {
    let units = borrow_units(env, account_borrows, borrow_index)?;
    if let Some((delta, index)) = checkpoint(env, market, borrower, RewardSide::Borrow, units)? {
        DistributedBorrowerReward {
            market: market.clone(),
            borrower: borrower.clone(),
            delta,
            borrow_index: index,
        }
        .publish(env);
    }
    Ok(())
}

/// Refreshes both sides of `market` and credits `account` from a snapshot.
pub(crate) fn accrue_account(
    env: &Env,
    market: &Address,
    account: &Address,
    snapshot: &MarketSnapshot,
    suppliers: bool,
    borrowers: bool,
) -> Result<(), ControllerError> {
    if borrowers {
        refresh_borrow_index(env, market, snapshot)?;
        distribute_borrower(
            env,
            market,
            account,
            snapshot.account_borrows,
            snapshot.borrow_index,
        )?;
    }
    if suppliers {
        refresh_supply_index(env, market, snapshot)?;
        distribute_supplier(env, market, account, snapshot.account_supply)?;
    }
    Ok(())
}

/// Creates the index state of a newly eligible market, or moves the block of
/// an existing one forward without touching its index.
pub(crate) fn start_index(env: &Env, market: &Address, side: RewardSide) {
    let current = env.ledger().sequence();
    let state = match storage::reward_state(env, market, side) {
        Some(mut existing) => {
            if existing.block < current {
                existing.block = current;
            }
            existing
        }
        None => RewardState {
            index: Exp36::ONE.raw(),
            block: current,
        },
    };
    storage::set_reward_state(env, market, side, &state);
}

pub(crate) fn ensure_not_blacklisted(env: &Env, account: &Address) -> Result<(), ControllerError> {
    if let Some(deny_list) = storage::get_address(env, &DataKey::DenyList) {
        if DenyListClient::new(env, &deny_list).is_blacklisted(account) {
            return Err(ControllerError::AccountBlacklisted);
        }
    }
    Ok(())
}

fn update_debt(env: &Env, account: &Address, old_debt: u128, new_debt: u128) {
    if old_debt == new_debt {
        return;
    }
    storage::set_reward_debt(env, account, new_debt);
    RewardDebtUpdated {
        account: account.clone(),
        old_debt,
        new_debt,
    }
    .publish(env);
}

fn reward_balance(env: &Env, token: &Address) -> u128 {
    let balance = token::Client::new(env, token).balance(&env.current_contract_address());
    if balance > 0 {
        balance as u128
    } else {
        0
    }
}

/// Pays `accrued + carried debt` to `account` as far as the controller's
/// reward balance allows, carrying the remainder as debt. Amounts below the
/// claim threshold stay on the ledger untouched.
pub(crate) fn payout_accrued(env: &Env, account: &Address) -> Result<u128, ControllerError> {
    let accrued = storage::reward_accrued(env, account);
    let old_debt = storage::reward_debt(env, account);
    let owed = accrued.saturating_add(old_debt);
    let threshold = storage::get_u128(env, &DataKey::ClaimThreshold);
    if owed < threshold || (accrued == 0 && old_debt == 0) {
        return Ok(0);
    }
    let token = storage::get_address(env, &DataKey::RewardToken)
        .ok_or(ControllerError::RewardTokenNotSet)?;

    let mut settlement = settle_payout(accrued, old_debt, reward_balance(env, &token));
    if settlement.pay > 0 {
        let sent = try_call_contract::<(), _>(
            env,
            &token,
            "transfer",
            (
                env.current_contract_address(),
                account.clone(),
                to_i128(settlement.pay)?,
            ),
        );
        if sent.is_none() {
            settlement = settle_payout(accrued, old_debt, 0);
        }
    }

    if accrued > 0 {
        storage::set_reward_accrued(env, account, 0);
    }
    update_debt(env, account, old_debt, settlement.debt);
    if settlement.pay > 0 {
        RewardGranted {
            account: account.clone(),
            amount: settlement.pay,
            as_collateral: false,
        }
        .publish(env);
    }
    Ok(settlement.pay)
}

/// Supplies the owed reward into the reward market on behalf of `account`
/// and enters that market as collateral.
pub(crate) fn grant_as_collateral(env: &Env, account: &Address) -> Result<u128, ControllerError> {
    let reward_market = storage::get_address(env, &DataKey::RewardMarket)
        .ok_or(ControllerError::RewardMarketNotSet)?;
    storage::listed_market(env, &reward_market)?;
    let token = storage::get_address(env, &DataKey::RewardToken)
        .ok_or(ControllerError::RewardTokenNotSet)?;
    let market_client = MarketClient::new(env, &reward_market);
    if market_client.underlying() != token {
        return Err(ControllerError::InvalidInput);
    }

    // The mint below skips the market hook, so checkpoint the old balance here.
    let snapshot = market_client.get_snapshot(account);
    accrue_account(env, &reward_market, account, &snapshot, true, false)?;

    let accrued = storage::reward_accrued(env, account);
    let old_debt = storage::reward_debt(env, account);
    if accrued == 0 && old_debt == 0 {
        return Ok(0);
    }

    let mut settlement = settle_payout(accrued, old_debt, reward_balance(env, &token));
    if settlement.pay > 0 {
        let amount = to_i128(settlement.pay)?;
        authorize_transfer_from_self(env, &token, &reward_market, amount);
        let minted = try_call_contract::<(), _>(
            env,
            &reward_market,
            "mint_behalf",
            (
                env.current_contract_address(),
                account.clone(),
                settlement.pay,
            ),
        );
        if minted.is_none() {
            settlement = settle_payout(accrued, old_debt, 0);
        } else {
            crate::risk::add_membership(env, &reward_market, account)?;
        }
    }

    if accrued > 0 {
        storage::set_reward_accrued(env, account, 0);
    }
    update_debt(env, account, old_debt, settlement.debt);
    if settlement.pay > 0 {
        RewardGranted {
            account: account.clone(),
            amount: settlement.pay,
            as_collateral: true,
        }
        .publish(env);
    }
    Ok(settlement.pay)
}

/// Accrues every (holder, market) pair, then pays each holder. Any invalid
/// market or blacklisted holder aborts the whole batch.
pub(crate) fn claim_internal(
    env: &Env,
    holders: &Vec<Address>,
    markets: &Vec<Address>,
    suppliers: bool,
    borrowers: bool,
    as_collateral: bool,
) -> Result<u128, ControllerError> {
    if holders
        .len()
        .checked_mul(markets.len())
        .map(|pairs| pairs > crate::constants::MAX_CLAIM_PAIRS)
        .unwrap_or(true)
    {
        return Err(ControllerError::InvalidInput);
    }
    for market in markets.iter() {
        storage::listed_market(env, &market)?;
    }
    for holder in holders.iter() {
        ensure_not_blacklisted(env, &holder)?;
    }

    for market in markets.iter() {
        let client = MarketClient::new(env, &market);
        for holder in holders.iter() {
            let snapshot = client.get_snapshot(&holder);
            accrue_account(env, &market, &holder, &snapshot, suppliers, borrowers)?;
        }
    }

    let mut total_paid: u128 = 0;
    for holder in holders.iter() {
        let paid = if as_collateral {
            grant_as_collateral(env, &holder)?
        } else {
            let (_, shortfall) = crate::risk::account_liquidity(env, &holder, None, 0, 0)?;
            if shortfall > 0 {
                return Err(ControllerError::BankruptUseCollateralClaim);
            }
            payout_accrued(env, &holder)?
        };
        total_paid = total_paid.saturating_add(paid);
    }
    Ok(total_paid)
}
