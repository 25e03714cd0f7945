//! Test data generation for the blog schema.
//!
//! This crate provides generators for synthetic users, categories and posts,
//! factories that persist one record per call, and a [`Seeder`](db::Seeder)
//! for populating a store in bulk. Everything writes through a
//! [`blog::Store`], so the same code seeds PostgreSQL or an in-memory store.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let store = MemoryStore::new();
//! let mut rng = rand::thread_rng();
//!
//! let report = Seeder::new(&store).run(&mut rng).await;
//! assert_eq!(report.users.len(), 10);
//!
//! let category = CategoryFactory::new(&store).create().await?;
//! ```

pub mod config;
pub mod db;
pub mod factories;
pub mod generators;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::SeedConfig;
    pub use crate::db::{SeedError, SeedReport, Seeder};
    pub use crate::factories::{CategoryFactory, PostFactory, UserFactory};
    pub use crate::generators::{CategoryGenerator, PostGenerator, UserGenerator};
    pub use blog::{Category, Database, MemoryStore, Post, Store, StoreError, User};
}
