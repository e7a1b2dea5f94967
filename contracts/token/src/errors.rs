use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    AlreadyInitialized = 300,
    NotInitialized = 301,
    InsufficientBalance = 302,
    InsufficientAllowance = 303,
    InvalidAmount = 304,
    InvalidExpiration = 305,
    UnsupportedUnit = 306,
    CallbackRejected = 307,
    RepaymentInsufficient = 308,
    InvariantViolation = 309,
    FlashPayloadTooLarge = 310,
    Overflow = 311,
}
