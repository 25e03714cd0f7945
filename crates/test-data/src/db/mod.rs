//! Seeding generated test data through a store.
//!
//! The [`Seeder`] inserts generated records one at a time and reports what it
//! managed to insert before any failure.

mod seeder;

pub use seeder::{SeedError, SeedReport, Seeder};
