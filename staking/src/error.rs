//! Staking-specific errors.

use bido_types::Address;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StakingError {
    #[error("staking pool is not initialized")]
    NotInitialized,

    #[error("staking pool is already initialized")]
    AlreadyInitialized,

    #[error("deposit must be non-zero")]
    ZeroDeposit,

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("staking is paused")]
    StakingPaused,

    #[error("deposit {deposit} is not smaller than pool value {pool_value}")]
    InvalidValue { deposit: u128, pool_value: u128 },

    #[error("unstake amount must be non-zero")]
    UnstakeZero,

    #[error("unstake resolves to zero shares")]
    BurnZero,

    #[error("division by zero: pool has no shares or no value")]
    DivisionByZero,

    #[error("arithmetic overflow in share accounting")]
    Overflow,

    #[error("insufficient shares: need {needed}, have {available}")]
    InsufficientShares { needed: u128, available: u128 },

    #[error("the null address cannot hold shares")]
    ZeroAddressTarget,

    #[error("pool has zero value")]
    ZeroPoolBalance,

    #[error("insufficient pool balance: need {needed}, have {available}")]
    InsufficientPoolBalance { needed: u128, available: u128 },

    #[error("payout to {recipient} rejected: {reason}")]
    TransferRejected { recipient: Address, reason: String },

    #[error("value transfers must not carry call data")]
    NonEmptyData,

    #[error("the initial holder's shares cannot be unstaked")]
    InitialHolderLocked,
}
