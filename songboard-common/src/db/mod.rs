//! Persistence store for song records

pub mod init;
pub mod songs;

pub use init::*;
pub use songs::*;
