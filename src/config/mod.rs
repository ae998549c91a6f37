//! Declarative pool configuration.

mod stable_pool;

pub use stable_pool::StablePoolConfig;
