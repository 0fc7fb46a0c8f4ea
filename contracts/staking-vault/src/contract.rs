use protocol_math::Exp18;
use soroban_sdk::{contract, contractimpl, token, Address, BytesN, Env, Vec};

use crate::constants::{MAX_LEGACY_REQUESTS, MAX_LOCK_PERIOD};
use crate::errors::VaultError;
use crate::events::*;
use crate::helpers::{ensure_allowed, ensure_not_paused, require_admin, to_i128};
use crate::payout::pay_reward;
use crate::pool::{self, acc_reward_per_share_at, pending_at, reward_debt_at, update_pool};
use crate::storage::{
    self, DataKey, GovernancePool, PendingWithdrawal, PoolInfo, UserInfo, VoteMessage,
    WithdrawalRequest,
};
use crate::votes;

#[contract]
pub struct StakingVault;

fn validate_lock_period(period: u64) -> Result<(), VaultError> {
    if period == 0 || period > MAX_LOCK_PERIOD {
        return Err(VaultError::InvalidLockPeriod);
    }
    Ok(())
}

fn ensure_no_legacy(pending: &PendingWithdrawal) -> Result<(), VaultError> {
    if let PendingWithdrawal::Legacy(_) = pending {
        return Err(VaultError::ExecuteLegacyWithdrawalFirst);
    }
    Ok(())
}

fn legacy_total(requests: &Vec<WithdrawalRequest>) -> u128 {
    requests.iter().map(|r| r.amount).sum()
}

/// Moves governance weight away from the account's delegate after its
/// voting stake shrank by `amount`.
fn release_votes(
    env: &Env,
    reward_token: &Address,
    pid: u32,
    account: &Address,
    amount: u128,
) -> Result<(), VaultError> {
    if !votes::is_governance_pool(env, reward_token, pid) {
        return Ok(());
    }
    let delegatee = storage::delegate_of(env, account);
    votes::move_delegates(env, delegatee.as_ref(), None, amount)
}

#[contractimpl]
impl StakingVault {
    pub fn initialize(env: Env, admin: Address, origin_chain_id: u32) -> Result<(), VaultError> {
        if storage::is_initialized(&env) {
            return Err(VaultError::AlreadyInitialized);
        }
        admin.require_auth();
        storage::set_admin(&env, &admin);
        env.storage()
            .instance()
            .set(&DataKey::OriginChainId, &origin_chain_id);
        env.storage().instance().set(&DataKey::Initialized, &true);
        storage::bump_core_ttl(&env);
        Ok(())
    }

    // Admin

    pub fn set_admin(env: Env, new_admin: Address) -> Result<(), VaultError> {
        require_admin(&env)?;
        storage::set_admin(&env, &new_admin);
        AdminUpdated { admin: new_admin }.publish(&env);
        Ok(())
    }

    pub fn get_admin(env: Env) -> Result<Address, VaultError> {
        storage::get_admin(&env)
    }

    pub fn set_access_control(env: Env, access_control: Address) -> Result<(), VaultError> {
        require_admin(&env)?;
        storage::set_address(&env, &DataKey::AccessControl, &access_control);
        AccessControlUpdated { access_control }.publish(&env);
        Ok(())
    }

    pub fn upgrade_wasm(env: Env, new_wasm_hash: BytesN<32>) -> Result<(), VaultError> {
        require_admin(&env)?;
        env.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }

    pub fn set_reward_store(env: Env, reward_store: Address) -> Result<(), VaultError> {
        require_admin(&env)?;
        storage::set_address(&env, &DataKey::RewardStore, &reward_store);
        RewardStoreUpdated { reward_store }.publish(&env);
        Ok(())
    }

    /// Picks the pool whose stake carries voting weight. Can be set once.
    pub fn set_governance_pool(env: Env, reward_token: Address, pid: u32) -> Result<(), VaultError> {
        require_admin(&env)?;
        if storage::governance_pool(&env).is_some() {
            return Err(VaultError::GovernancePoolAlreadySet);
        }
        storage::get_pool(&env, &reward_token, pid)?;
        storage::set_governance_pool(
            &env,
            &GovernancePool {
                reward_token: reward_token.clone(),
                pid,
            },
        );
        GovernancePoolUpdated { reward_token, pid }.publish(&env);
        Ok(())
    }

    // Pool administration

    pub fn add_pool(
        env: Env,
        caller: Address,
        reward_token: Address,
        alloc_point: u128,
        staked_token: Address,
        reward_per_block: u128,
        lock_period: u64,
    ) -> Result<u32, VaultError> {
        ensure_allowed(&env, &caller, "add_pool")?;
        validate_lock_period(lock_period)?;
        if storage::pool_by_staked_token(&env, &reward_token, &staked_token).is_some() {
            return Err(VaultError::PoolAlreadyExists);
        }
        let pid = storage::pool_length(&env, &reward_token);
        if pid == 0 && alloc_point == 0 {
            return Err(VaultError::SoleAllocPointZero);
        }
        pool::mass_update_pools(&env, &reward_token)?;

        let total = storage::total_alloc_points(&env, &reward_token)
            .checked_add(alloc_point)
            .ok_or(VaultError::MathOverflow)?;
        storage::set_total_alloc_points(&env, &reward_token, total);
        storage::set_pool(
            &env,
            &reward_token,
            pid,
            &PoolInfo {
                staked_token: staked_token.clone(),
                alloc_point,
                last_reward_block: env.ledger().sequence(),
                acc_reward_per_share: 0,
                lock_period,
                total_staked: 0,
            },
        );
        storage::set_pool_by_staked_token(&env, &reward_token, &staked_token, pid);
        storage::set_pool_length(&env, &reward_token, pid + 1);

        let old_amount = storage::reward_per_block(&env, &reward_token);
        if old_amount != reward_per_block {
            storage::set_reward_per_block(&env, &reward_token, reward_per_block);
            RewardAmountUpdated {
                reward_token: reward_token.clone(),
                old_amount,
                new_amount: reward_per_block,
            }
            .publish(&env);
        }

        PoolAdded {
            reward_token,
            pid,
            staked_token,
            alloc_point,
            reward_per_block,
            lock_period,
        }
        .publish(&env);
        Ok(pid)
    }

    pub fn set_alloc_point(
        env: Env,
        caller: Address,
        reward_token: Address,
        pid: u32,
        alloc_point: u128,
    ) -> Result<(), VaultError> {
        ensure_allowed(&env, &caller, "set_alloc_point")?;
        let existing = storage::get_pool(&env, &reward_token, pid)?;
        if alloc_point == 0 && storage::pool_length(&env, &reward_token) == 1 {
            return Err(VaultError::SoleAllocPointZero);
        }
        pool::mass_update_pools(&env, &reward_token)?;

        let mut updated = storage::get_pool(&env, &reward_token, pid)?;
        let total = storage::total_alloc_points(&env, &reward_token)
            .saturating_sub(existing.alloc_point)
            .checked_add(alloc_point)
            .ok_or(VaultError::MathOverflow)?;
        storage::set_total_alloc_points(&env, &reward_token, total);
        updated.alloc_point = alloc_point;
        storage::set_pool(&env, &reward_token, pid, &updated);

        PoolUpdated {
            reward_token,
            pid,
            old_alloc_point: existing.alloc_point,
            new_alloc_point: alloc_point,
        }
        .publish(&env);
        Ok(())
    }

    pub fn set_reward_amount_per_block(
        env: Env,
        caller: Address,
        reward_token: Address,
        amount: u128,
    ) -> Result<(), VaultError> {
        ensure_allowed(&env, &caller, "set_reward_amount_per_block")?;
        pool::mass_update_pools(&env, &reward_token)?;
        let old_amount = storage::reward_per_block(&env, &reward_token);
        storage::set_reward_per_block(&env, &reward_token, amount);
        RewardAmountUpdated {
            reward_token,
            old_amount,
            new_amount: amount,
        }
        .publish(&env);
        Ok(())
    }

    /// Applies to requests made after the change.
    pub fn set_lock_period(
        env: Env,
        caller: Address,
        reward_token: Address,
        pid: u32,
        lock_period: u64,
    ) -> Result<(), VaultError> {
        ensure_allowed(&env, &caller, "set_lock_period")?;
        validate_lock_period(lock_period)?;
        let mut info = storage::get_pool(&env, &reward_token, pid)?;
        let old_period = info.lock_period;
        info.lock_period = lock_period;
        storage::set_pool(&env, &reward_token, pid, &info);
        LockPeriodUpdated {
            reward_token,
            pid,
            old_period,
            new_period: lock_period,
        }
        .publish(&env);
        Ok(())
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), VaultError> {
        ensure_allowed(&env, &caller, "pause")?;
        storage::set_paused(&env, true);
        VaultPaused { caller }.publish(&env);
        Ok(())
    }

    pub fn resume(env: Env, caller: Address) -> Result<(), VaultError> {
        ensure_allowed(&env, &caller, "resume")?;
        storage::set_paused(&env, false);
        VaultResumed { caller }.publish(&env);
        Ok(())
    }

    // Staking

    pub fn deposit(
        env: Env,
        user: Address,
        reward_token: Address,
        pid: u32,
        amount: u128,
    ) -> Result<(), VaultError> {
        user.require_auth();
        ensure_not_paused(&env)?;
        if amount == 0 {
            return Err(VaultError::InvalidAmount);
        }
        let mut info = update_pool(&env, &reward_token, pid)?;
        ensure_no_legacy(&storage::pending_withdrawal(&env, &reward_token, pid, &user))?;

        // Settle what the old balance earned before it grows.
        let mut account = storage::user_info(&env, &reward_token, pid, &user);
        let owed = pending_at(&env, &account, Exp18::from_raw(info.acc_reward_per_share))?;
        pay_reward(&env, &reward_token, pid, &user, owed)?;

        token::Client::new(&env, &info.staked_token).transfer(
            &user,
            &env.current_contract_address(),
            &to_i128(amount)?,
        );

        account.amount = account
            .amount
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        account.reward_debt = reward_debt_at(&env, account.amount, info.acc_reward_per_share)?;
        info.total_staked = info
            .total_staked
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        storage::set_pool(&env, &reward_token, pid, &info);
        storage::set_user_info(&env, &reward_token, pid, &user, &account);

        if votes::is_governance_pool(&env, &reward_token, pid) {
            let delegatee = storage::delegate_of(&env, &user);
            votes::move_delegates(&env, None, delegatee.as_ref(), amount)?;
        }

        Deposit {
            user,
            reward_token,
            pid,
            amount,
        }
        .publish(&env);
        Ok(())
    }

    pub fn claim(env: Env, user: Address, reward_token: Address, pid: u32) -> Result<u128, VaultError> {
        user.require_auth();
        ensure_not_paused(&env)?;
        let info = update_pool(&env, &reward_token, pid)?;
        ensure_no_legacy(&storage::pending_withdrawal(&env, &reward_token, pid, &user))?;

        let mut account = storage::user_info(&env, &reward_token, pid, &user);
        let owed = pending_at(&env, &account, Exp18::from_raw(info.acc_reward_per_share))?;
        let paid = pay_reward(&env, &reward_token, pid, &user, owed)?;
        account.reward_debt = reward_debt_at(&env, account.amount, info.acc_reward_per_share)?;
        storage::set_user_info(&env, &reward_token, pid, &user, &account);
        Ok(paid)
    }

    /// Takes `amount` out of the reward base now and releases it after the
    /// pool's lock period. A second request merges into the pending one and
    /// restarts its lock.
    pub fn request_withdrawal(
        env: Env,
        user: Address,
        reward_token: Address,
        pid: u32,
        amount: u128,
    ) -> Result<(), VaultError> {
        user.require_auth();
        ensure_not_paused(&env)?;
        if amount == 0 {
            return Err(VaultError::InvalidAmount);
        }
        let mut info = update_pool(&env, &reward_token, pid)?;
        let pending = storage::pending_withdrawal(&env, &reward_token, pid, &user);
        ensure_no_legacy(&pending)?;

        let mut account = storage::user_info(&env, &reward_token, pid, &user);
        if account.amount < amount {
            return Err(VaultError::InsufficientStake);
        }
        let owed = pending_at(&env, &account, Exp18::from_raw(info.acc_reward_per_share))?;
        pay_reward(&env, &reward_token, pid, &user, owed)?;

        account.amount -= amount;
        account.reward_debt = reward_debt_at(&env, account.amount, info.acc_reward_per_share)?;
        info.total_staked = info.total_staked.saturating_sub(amount);
        storage::set_pool(&env, &reward_token, pid, &info);
        storage::set_user_info(&env, &reward_token, pid, &user, &account);

        let queued = match pending {
            PendingWithdrawal::Modern(existing) => existing
                .amount
                .checked_add(amount)
                .ok_or(VaultError::MathOverflow)?,
            _ => amount,
        };
        let locked_until = env.ledger().timestamp().saturating_add(info.lock_period);
        storage::set_pending_withdrawal(
            &env,
            &reward_token,
            pid,
            &user,
            &PendingWithdrawal::Modern(WithdrawalRequest {
                amount: queued,
                locked_until,
            }),
        );
        release_votes(&env, &reward_token, pid, &user, amount)?;

        WithdrawalRequested {
            user,
            reward_token,
            pid,
            amount,
            locked_until,
            legacy: false,
        }
        .publish(&env);
        Ok(())
    }

    /// Queues a legacy request. The principal keeps earning until
    /// `execute_withdrawal`, which also claims its reward.
    pub fn request_old_withdrawal(
        env: Env,
        user: Address,
        reward_token: Address,
        pid: u32,
        amount: u128,
    ) -> Result<(), VaultError> {
        user.require_auth();
        ensure_not_paused(&env)?;
        if amount == 0 {
            return Err(VaultError::InvalidAmount);
        }
        let info = update_pool(&env, &reward_token, pid)?;
        let mut requests = match storage::pending_withdrawal(&env, &reward_token, pid, &user) {
            PendingWithdrawal::Modern(_) => return Err(VaultError::ModernWithdrawalPending),
            PendingWithdrawal::Legacy(requests) => requests,
            PendingWithdrawal::Idle => Vec::new(&env),
        };
        if requests.len() >= MAX_LEGACY_REQUESTS {
            return Err(VaultError::TooManyRequests);
        }
        let account = storage::user_info(&env, &reward_token, pid, &user);
        let requested = legacy_total(&requests)
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        if requested > account.amount {
            return Err(VaultError::InsufficientStake);
        }

        let locked_until = env.ledger().timestamp().saturating_add(info.lock_period);
        requests.push_back(WithdrawalRequest {
            amount,
            locked_until,
        });
        storage::set_pending_withdrawal(
            &env,
            &reward_token,
            pid,
            &user,
            &PendingWithdrawal::Legacy(requests),
        );
        release_votes(&env, &reward_token, pid, &user, amount)?;

        WithdrawalRequested {
            user,
            reward_token,
            pid,
            amount,
            locked_until,
            legacy: true,
        }
        .publish(&env);
        Ok(())
    }

    /// Releases every matured request and returns the amount sent.
    pub fn execute_withdrawal(
        env: Env,
        user: Address,
        reward_token: Address,
        pid: u32,
    ) -> Result<u128, VaultError> {
        user.require_auth();
        ensure_not_paused(&env)?;
        let mut info = update_pool(&env, &reward_token, pid)?;
        let now = env.ledger().timestamp();

        let released = match storage::pending_withdrawal(&env, &reward_token, pid, &user) {
            PendingWithdrawal::Idle => return Err(VaultError::NothingToWithdraw),
            PendingWithdrawal::Modern(request) => {
                if request.locked_until > now {
                    return Err(VaultError::NothingToWithdraw);
                }
                storage::set_pending_withdrawal(&env, &reward_token, pid, &user, &PendingWithdrawal::Idle);
                request.amount
            }
            PendingWithdrawal::Legacy(requests) => {
                let mut matured = 0u128;
                let mut remaining = Vec::new(&env);
                for request in requests.iter() {
                    if request.locked_until <= now {
                        matured = matured
                            .checked_add(request.amount)
                            .ok_or(VaultError::MathOverflow)?;
                    } else {
                        remaining.push_back(request);
                    }
                }
                if matured == 0 {
                    return Err(VaultError::NothingToWithdraw);
                }

                // Legacy principal earned up to now; pay it out with the release.
                let mut account = storage::user_info(&env, &reward_token, pid, &user);
                let owed = pending_at(&env, &account, Exp18::from_raw(info.acc_reward_per_share))?;
                pay_reward(&env, &reward_token, pid, &user, owed)?;
                account.amount = account.amount.saturating_sub(matured);
                account.reward_debt =
                    reward_debt_at(&env, account.amount, info.acc_reward_per_share)?;
                info.total_staked = info.total_staked.saturating_sub(matured);
                storage::set_pool(&env, &reward_token, pid, &info);
                storage::set_user_info(&env, &reward_token, pid, &user, &account);

                let next = if remaining.is_empty() {
                    PendingWithdrawal::Idle
                } else {
                    PendingWithdrawal::Legacy(remaining)
                };
                storage::set_pending_withdrawal(&env, &reward_token, pid, &user, &next);
                matured
            }
        };

        token::Client::new(&env, &info.staked_token).transfer(
            &env.current_contract_address(),
            &user,
            &to_i128(released)?,
        );
        WithdrawalExecuted {
            user,
            reward_token,
            pid,
            amount: released,
        }
        .publish(&env);
        Ok(released)
    }

    // Voting

    pub fn delegate(env: Env, delegator: Address, delegatee: Address) -> Result<(), VaultError> {
        delegator.require_auth();
        if storage::governance_pool(&env).is_none() {
            return Err(VaultError::GovernancePoolNotSet);
        }
        let current = storage::delegate_of(&env, &delegator);
        if current.as_ref() == Some(&delegatee) {
            return Ok(());
        }
        storage::set_delegate(&env, &delegator, &delegatee);
        DelegateChanged {
            delegator: delegator.clone(),
            to_delegate: delegatee.clone(),
            from_delegate: current.clone(),
        }
        .publish(&env);
        let weight = votes::governance_weight(&env, &delegator);
        votes::move_delegates(&env, current.as_ref(), Some(&delegatee), weight)
    }

    /// Re-publishes an outbox message so a relayer can retry delivery.
    pub fn resend_vote_message(env: Env, seq: u64) -> Result<(), VaultError> {
        let message = storage::vote_message(&env, seq).ok_or(VaultError::MessageNotFound)?;
        votes::publish_vote_message(&env, &message);
        Ok(())
    }

    // Views

    /// Reward claimable by `user`, projected through the next ledger.
    ///
    /// `claim` settles through the current ledger, so this view runs one
    /// ledger of emission ahead of a claim made in the same ledger. Right
    /// after such a claim it still reports that one ledger's share.
    pub fn pending_reward(
        env: Env,
        reward_token: Address,
        pid: u32,
        user: Address,
    ) -> Result<u128, VaultError> {
        let info = storage::get_pool(&env, &reward_token, pid)?;
        let block = env.ledger().sequence().saturating_add(1);
        let acc = acc_reward_per_share_at(&env, &reward_token, &info, block)?;
        let account = storage::user_info(&env, &reward_token, pid, &user);
        pending_at(&env, &account, acc)
    }

    pub fn get_user_info(env: Env, reward_token: Address, pid: u32, user: Address) -> UserInfo {
        storage::user_info(&env, &reward_token, pid, &user)
    }

    pub fn get_pool_info(env: Env, reward_token: Address, pid: u32) -> Result<PoolInfo, VaultError> {
        storage::get_pool(&env, &reward_token, pid)
    }

    pub fn pool_length(env: Env, reward_token: Address) -> u32 {
        storage::pool_length(&env, &reward_token)
    }

    pub fn get_reward_per_block(env: Env, reward_token: Address) -> u128 {
        storage::reward_per_block(&env, &reward_token)
    }

    pub fn get_total_alloc_points(env: Env, reward_token: Address) -> u128 {
        storage::total_alloc_points(&env, &reward_token)
    }

    pub fn get_pending_withdrawal(
        env: Env,
        reward_token: Address,
        pid: u32,
        user: Address,
    ) -> PendingWithdrawal {
        storage::pending_withdrawal(&env, &reward_token, pid, &user)
    }

    /// (releasable now, total still pending).
    pub fn get_withdrawable_amount(
        env: Env,
        reward_token: Address,
        pid: u32,
        user: Address,
    ) -> (u128, u128) {
        let now = env.ledger().timestamp();
        match storage::pending_withdrawal(&env, &reward_token, pid, &user) {
            PendingWithdrawal::Idle => (0, 0),
            PendingWithdrawal::Modern(request) => {
                let ready = if request.locked_until <= now { request.amount } else { 0 };
                (ready, request.amount)
            }
            PendingWithdrawal::Legacy(requests) => {
                let ready: u128 = requests
                    .iter()
                    .filter(|r| r.locked_until <= now)
                    .map(|r| r.amount)
                    .sum();
                (ready, legacy_total(&requests))
            }
        }
    }

    pub fn pending_debt(env: Env, reward_token: Address, user: Address) -> u128 {
        storage::vault_debt(&env, &reward_token, &user)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    pub fn get_delegate(env: Env, account: Address) -> Option<Address> {
        storage::delegate_of(&env, &account)
    }

    pub fn get_current_votes(env: Env, account: Address) -> u128 {
        votes::current_votes(&env, &account)
    }

    pub fn get_prior_votes(env: Env, account: Address, block: u32) -> Result<u128, VaultError> {
        votes::prior_votes(&env, &account, block)
    }

    pub fn get_vote_message(env: Env, seq: u64) -> Result<VoteMessage, VaultError> {
        storage::vote_message(&env, seq).ok_or(VaultError::MessageNotFound)
    }

    pub fn last_vote_seq(env: Env) -> u64 {
        storage::last_vote_seq(&env)
    }
}
