pub use protocol_math::EXP_SCALE;

/// Upper bound on a market collateral factor (90%).
pub const MAX_COLLATERAL_FACTOR: u128 = 900_000_000_000_000_000u128;
pub const MIN_CLOSE_FACTOR: u128 = 50_000_000_000_000_000u128; // 5%
pub const MAX_CLOSE_FACTOR: u128 = 900_000_000_000_000_000u128; // 90%
pub const DEFAULT_CLOSE_FACTOR: u128 = 500_000_000_000_000_000u128; // 50%
pub const DEFAULT_LIQUIDATION_INCENTIVE: u128 = 1_080_000_000_000_000_000u128; // 1.08x
pub const MAX_LIQUIDATION_INCENTIVE: u128 = 1_500_000_000_000_000_000u128; // 1.5x

/// Cap on (holder, market) pairs handled by one claim.
pub const MAX_CLAIM_PAIRS: u32 = 128;
pub const MAX_ASSETS_PER_ACCOUNT: u32 = 32;

pub const TTL_THRESHOLD: u32 = 100_000;
pub const TTL_EXTEND_TO: u32 = 200_000;
