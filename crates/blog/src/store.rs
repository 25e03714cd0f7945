//! Typed data-access interface shared by every backend.
//!
//! One [`Store`] implementation per entity kind replaces dynamically shaped
//! client calls: the input type of `insert` and the record type it returns
//! are fixed by the [`Entity`] being stored.

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use crate::errors::StoreError;
use crate::models::{Category, EntityKind, NewCategory, NewPost, NewUser, Post, User};

/// A persisted record type and the input used to create it.
pub trait Entity: Clone + Send + Sync + 'static {
    type New: Validate + Send + Sync + 'static;

    const KIND: EntityKind;

    fn id(&self) -> Uuid;
}

impl Entity for User {
    type New = NewUser;

    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Entity for Category {
    type New = NewCategory;

    const KIND: EntityKind = EntityKind::Category;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Entity for Post {
    type New = NewPost;

    const KIND: EntityKind = EntityKind::Post;

    fn id(&self) -> Uuid {
        self.id
    }
}

/// CRUD operations for one entity kind.
#[async_trait]
pub trait Store<E: Entity>: Send + Sync {
    /// Persists `new` and returns the record as stored, including the
    /// identifier the store assigned.
    async fn insert(&self, new: E::New) -> Result<E, StoreError>;

    /// Looks a record up by identifier. Absence is `Ok(None)`.
    async fn find_one(&self, id: Uuid) -> Result<Option<E>, StoreError>;

    /// Returns every record of this kind in no particular order.
    async fn find_all(&self) -> Result<Vec<E>, StoreError>;

    /// Overwrites the editable fields of an existing record.
    async fn update(&self, record: E) -> Result<E, StoreError>;

    /// Removes a record, failing with [`StoreError::NotFound`] if it is absent.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}
