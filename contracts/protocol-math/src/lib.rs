#![no_std]
//! Fixed-point helpers shared by the controller flywheel and the staking vault.
//!
//! The flywheel keeps its reward indices at a 1e36 scale while the vault
//! keeps `acc_reward_per_share` at 1e18. The two scales are separate newtypes
//! with no conversion between them.

use soroban_sdk::{Env, U256};

pub const EXP_SCALE: u128 = 1_000_000_000_000_000_000u128; // 1e18
pub const DOUBLE_SCALE: u128 = EXP_SCALE * EXP_SCALE; // 1e36

/// `a * b / c`, rounded down, with a 256-bit intermediate product.
/// Returns `None` when `c` is zero or the quotient does not fit in `u128`.
pub fn mul_div_floor(env: &Env, a: u128, b: u128, c: u128) -> Option<u128> {
    if c == 0 {
        return None;
    }
    if a == 0 || b == 0 {
        return Some(0);
    }
    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    product.div(&U256::from_u128(env, c)).to_u128()
}

/// `amount * mantissa / 1e18`
pub fn mul_exp(env: &Env, amount: u128, mantissa: u128) -> Option<u128> {
    mul_div_floor(env, amount, mantissa, EXP_SCALE)
}

/// `amount * 1e18 / mantissa`
pub fn div_exp(env: &Env, amount: u128, mantissa: u128) -> Option<u128> {
    mul_div_floor(env, amount, EXP_SCALE, mantissa)
}

/// Reward index of the lending flywheel (scaled 1e36).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Exp36(u128);

impl Exp36 {
    pub const ZERO: Exp36 = Exp36(0);
    /// Value every market index starts from.
    pub const ONE: Exp36 = Exp36(DOUBLE_SCALE);

    pub const fn from_raw(raw: u128) -> Self {
        Exp36(raw)
    }

    pub const fn raw(self) -> u128 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `accrued * 1e36 / units`; zero units yield a zero ratio.
    pub fn ratio(env: &Env, accrued: u128, units: u128) -> Option<Self> {
        if units == 0 {
            return Some(Exp36::ZERO);
        }
        mul_div_floor(env, accrued, DOUBLE_SCALE, units).map(Exp36)
    }

    pub fn checked_add(self, other: Exp36) -> Option<Self> {
        self.0.checked_add(other.0).map(Exp36)
    }

    pub fn saturating_sub(self, other: Exp36) -> Self {
        Exp36(self.0.saturating_sub(other.0))
    }

    /// `units * self / 1e36`, rounded down.
    pub fn mul_units(self, env: &Env, units: u128) -> Option<u128> {
        mul_div_floor(env, units, self.0, DOUBLE_SCALE)
    }
}

/// Accumulated reward per staked share in the vault (scaled 1e18).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Exp18(u128);

impl Exp18 {
    pub const ZERO: Exp18 = Exp18(0);

    pub const fn from_raw(raw: u128) -> Self {
        Exp18(raw)
    }

    pub const fn raw(self) -> u128 {
        self.0
    }

    /// `reward * 1e18 / shares`; zero shares yield a zero ratio.
    pub fn ratio(env: &Env, reward: u128, shares: u128) -> Option<Self> {
        if shares == 0 {
            return Some(Exp18::ZERO);
        }
        mul_div_floor(env, reward, EXP_SCALE, shares).map(Exp18)
    }

    pub fn checked_add(self, other: Exp18) -> Option<Self> {
        self.0.checked_add(other.0).map(Exp18)
    }

    /// `shares * self / 1e18`, rounded down.
    pub fn mul_units(self, env: &Env, shares: u128) -> Option<u128> {
        mul_div_floor(env, shares, self.0, EXP_SCALE)
    }
}

/// Growth of a flywheel index over `delta_blocks` at `speed` per block,
/// spread over `total_units`.
pub fn index_delta(env: &Env, speed: u128, delta_blocks: u32, total_units: u128) -> Option<Exp36> {
    let accrued = speed.checked_mul(delta_blocks as u128)?;
    Exp36::ratio(env, accrued, total_units)
}

/// Outcome of a debt-aware reward payout.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Settlement {
    /// Amount to transfer now.
    pub pay: u128,
    /// Debt carried after the transfer.
    pub debt: u128,
}

/// Pays `amount` plus any carried debt out of `available`, carrying whatever
/// does not fit.
pub fn settle_payout(amount: u128, old_debt: u128, available: u128) -> Settlement {
    let full = amount.saturating_add(old_debt);
    if full <= available {
        Settlement { pay: full, debt: 0 }
    } else {
        Settlement {
            pay: available,
            debt: full - available,
        }
    }
}
