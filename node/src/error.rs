use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NodeError {
    #[error("staking error: {0}")]
    Staking(#[from] bido_staking::StakingError),

    #[error("permit error: {0}")]
    Permit(#[from] bido_permit::PermitError),

    #[error("config error: {0}")]
    Config(String),
}
