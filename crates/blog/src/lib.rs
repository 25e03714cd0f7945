//! Data-access client for the blog schema.
//!
//! [`store::Store`] is the typed CRUD interface; [`database::Database`]
//! implements it over PostgreSQL and [`memory::MemoryStore`] in process.
//! Callers receive a store explicitly rather than reaching for a global client.

pub mod database;
pub mod errors;
pub mod memory;
pub mod models;
pub mod store;

pub use database::Database;
pub use errors::StoreError;
pub use memory::MemoryStore;
pub use models::{Category, EntityKind, NewCategory, NewPost, NewUser, Post, User};
pub use store::{Entity, Store};
