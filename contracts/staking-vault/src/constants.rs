/// Longest withdrawal lock a pool may be configured with (365 days).
pub const MAX_LOCK_PERIOD: u64 = 365 * 24 * 60 * 60;

/// Cap on outstanding legacy requests per (pool, account).
pub const MAX_LEGACY_REQUESTS: u32 = 64;

pub const TTL_THRESHOLD: u32 = 100_000;
pub const TTL_EXTEND_TO: u32 = 200_000;
