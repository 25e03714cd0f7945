//! On-demand factories that persist one synthetic record per call.
//!
//! A factory borrows the store it writes to, generates its input with a
//! fresh thread-local RNG, and returns the record exactly as the store
//! confirmed it. Store failures propagate unchanged; nothing is retried.

mod category;
mod post;
mod user;

pub use category::CategoryFactory;
pub use post::PostFactory;
pub use user::UserFactory;
