//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod outcome;
mod repository;

pub use outcome::OutcomeSource;
pub use repository::{BaseRepository, PostRepository, StatusWrite};
