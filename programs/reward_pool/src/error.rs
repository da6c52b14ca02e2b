use anchor_lang::prelude::*;

#[error_code]
pub enum RewardPoolError {
    // Access control errors
    #[msg("Only the factory authority can perform this action")]
    OnlyAuthority,
    #[msg("Caller does not hold the admin role")]
    NotAdmin,
    #[msg("Claim authorization was not signed by an active signer")]
    InvalidSignature,
    #[msg("Claim message recipient does not match the caller")]
    RecipientMismatch,
    #[msg("Pool does not belong to this factory")]
    FactoryMismatch,

    // Pool state errors
    #[msg("Pool is active; deactivate it first")]
    PoolActive,
    #[msg("Pool is not active")]
    PoolNotActive,
    #[msg("Operation does not apply to this pool kind")]
    WrongPoolKind,
    #[msg("No snapshot has been taken for this medium")]
    SnapshotNotTaken,

    // Ledger errors
    #[msg("Recipient is already present in the pool")]
    AlreadyPresent,
    #[msg("Recipient is not present in the pool")]
    NotPresent,
    #[msg("User is not in the pool")]
    UserNotInPool,
    #[msg("Recipient appears more than once in the batch")]
    DuplicateRecipient,

    // Validation errors
    #[msg("Array lengths do not match")]
    ArrayLengthMismatch,
    #[msg("Batch must not be empty")]
    EmptyBatch,
    #[msg("Amount must be greater than zero")]
    InvalidAmount,
    #[msg("Medium address and token kind do not form a valid pair")]
    InvalidTokenType,
    #[msg("Protocol fee rate exceeds the maximum")]
    InvalidFeeRate,
    #[msg("Protocol fee recipient must be set")]
    InvalidFeeRecipient,
    #[msg("Invalid recipient address")]
    InvalidRecipient,
    #[msg("Name or description is too long")]
    MetadataTooLong,
    #[msg("Admin set is full")]
    TooManyAdmins,
    #[msg("Account already holds the admin role")]
    AdminAlreadyGranted,
    #[msg("Account does not hold the admin role")]
    AdminNotFound,
    #[msg("Remaining accounts do not match the batch")]
    InvalidRemainingAccounts,
    #[msg("Account address does not match its expected PDA")]
    InvalidPda,
    #[msg("Token account does not match the medium")]
    TokenAccountMismatch,
    #[msg("Ed25519 verification instruction is missing or malformed")]
    MissingSignatureInstruction,
    #[msg("Pool range is empty or past the registry end")]
    InvalidPoolRange,

    // Replay errors
    #[msg("Nonce already used for this recipient")]
    NonceAlreadyUsed,
    #[msg("Reward already claimed for this medium")]
    AlreadyClaimed,
    #[msg("Recipient is not eligible to claim")]
    NotEligible,

    // Solvency errors
    #[msg("Insufficient rewards held by the pool")]
    InsufficientRewards,
    #[msg("Native payout would leave the destination below the rent-exempt minimum")]
    BelowRentMinimum,

    // System level errors
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Account must be owned by this program")]
    AccountNotOwnedByProgram,
}
