use courier_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("point store is empty")]
    NoPoints,

    #[error("every point has already been delivered")]
    AllVisited,

    #[error("point store error: {0}")]
    Store(#[from] StoreError),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
