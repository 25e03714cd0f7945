//! Entity generators for test data.
//!
//! Generators are pure: they turn an RNG into insert inputs and never touch a
//! store.
//! - [`UserGenerator`]: Generate users with a full name and matching email
//! - [`CategoryGenerator`]: Generate single-word categories
//! - [`PostGenerator`]: Generate posts for existing authors and categories

pub mod category;
pub mod post;
pub mod user;

pub use category::CategoryGenerator;
pub use post::PostGenerator;
pub use user::{UserGenConfig, UserGenerator};
