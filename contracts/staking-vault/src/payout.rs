use protocol_math::settle_payout;
use soroban_sdk::{Address, Env};

use crate::errors::VaultError;
use crate::events::{Claim, VaultDebtUpdated};
use crate::helpers::try_call_contract;
use crate::storage::{self, DataKey};

/// Pays `amount` of freshly earned reward plus any carried debt through the
/// reward store. Whatever the store could not cover is carried as debt.
pub fn pay_reward(
    env: &Env,
    reward_token: &Address,
    pid: u32,
    account: &Address,
    amount: u128,
) -> Result<u128, VaultError> {
    let old_debt = storage::vault_debt(env, reward_token, account);
    if amount == 0 && old_debt == 0 {
        return Ok(0);
    }
    let store = storage::get_address(env, &DataKey::RewardStore)
        .ok_or(VaultError::RewardStoreNotSet)?;
    let requested = amount.checked_add(old_debt).ok_or(VaultError::MathOverflow)?;

    // A failing store is treated like an empty one.
    let paid: u128 = try_call_contract(
        env,
        &store,
        "safe_reward_transfer",
        (reward_token.clone(), account.clone(), requested),
    )
    .unwrap_or(0);

    let settlement = settle_payout(amount, old_debt, paid);
    if settlement.debt != old_debt {
        storage::set_vault_debt(env, reward_token, account, settlement.debt);
        VaultDebtUpdated {
            reward_token: reward_token.clone(),
            account: account.clone(),
            old_debt,
            new_debt: settlement.debt,
        }
        .publish(env);
    }
    if settlement.pay > 0 {
        Claim {
            user: account.clone(),
            reward_token: reward_token.clone(),
            pid,
            amount: settlement.pay,
        }
        .publish(env);
    }
    Ok(settlement.pay)
}
