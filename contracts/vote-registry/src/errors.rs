use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RegistryError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    UntrustedOrigin = 4,
    BlockNotFinalized = 5,
    DeadLetterNotFound = 6,
    RegistryPaused = 7,
    TooManyOrigins = 8,
}
