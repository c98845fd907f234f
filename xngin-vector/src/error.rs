use thiserror::Error;
use xngin_common::error::Error as CommonError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("value at index {0} is null")]
    NullValueRead(usize),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("capacity exhausted: requested {requested} bytes, limit {limit} bytes")]
    CapacityExhausted { requested: usize, limit: usize },
    #[error("index out of bound: {0}")]
    IndexOutOfBound(String),
}

impl From<CommonError> for Error {
    #[inline]
    fn from(src: CommonError) -> Self {
        match src {
            CommonError::CapacityExhausted { requested, limit } => {
                Error::CapacityExhausted { requested, limit }
            }
        }
    }
}
