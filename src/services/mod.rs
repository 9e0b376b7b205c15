pub mod aggregate;
pub mod export;
pub mod snapshot;
pub mod version;
