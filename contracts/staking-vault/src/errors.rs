use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    AccessControlNotSet = 4,
    InvalidAmount = 5,
    PoolNotFound = 6,
    PoolAlreadyExists = 7,
    /// The only pool of a reward token cannot carry a zero allocation.
    SoleAllocPointZero = 8,
    InvalidLockPeriod = 9,
    VaultPaused = 10,
    /// A legacy withdrawal is outstanding; call `execute_withdrawal` first.
    ExecuteLegacyWithdrawalFirst = 11,
    ModernWithdrawalPending = 12,
    NothingToWithdraw = 13,
    InsufficientStake = 14,
    RewardStoreNotSet = 15,
    MathOverflow = 16,
    BlockNotFinalized = 17,
    MessageNotFound = 18,
    GovernancePoolNotSet = 19,
    TooManyRequests = 20,
    GovernancePoolAlreadySet = 21,
}
