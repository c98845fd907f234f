use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("capacity exhausted: requested {requested} bytes, limit {limit} bytes")]
    CapacityExhausted { requested: usize, limit: usize },
}
