//! In-process store mirroring the PostgreSQL schema constraints.
//!
//! Useful wherever a disposable backend is wanted: unit tests, demos, and the
//! CRUD suite when no database is available. Clones share the same tables.

use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::errors::StoreError;
use crate::models::{Category, EntityKind, NewCategory, NewPost, NewUser, Post, User};
use crate::store::{Entity, Store};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    posts: Vec<Post>,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .iter()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn check_post_references(&self, author_id: Uuid, category_id: Uuid) -> Result<(), StoreError> {
        if !self.users.iter().any(|u| u.id == author_id) {
            return Err(StoreError::Constraint {
                kind: EntityKind::Post,
                message: format!("author {author_id} does not exist"),
            });
        }
        if !self.categories.iter().any(|c| c.id == category_id) {
            return Err(StoreError::Constraint {
                kind: EntityKind::Post,
                message: format!("category {category_id} does not exist"),
            });
        }
        Ok(())
    }
}

fn position<E: Entity>(rows: &[E], id: Uuid) -> Result<usize, StoreError> {
    rows.iter()
        .position(|row| row.id() == id)
        .ok_or(StoreError::NotFound { kind: E::KIND, id })
}

fn find<E: Entity>(rows: &[E], id: Uuid) -> Option<E> {
    rows.iter().find(|row| row.id() == id).cloned()
}

fn duplicate_email(email: &str) -> StoreError {
    StoreError::Constraint {
        kind: EntityKind::User,
        message: format!("email {email} is already registered"),
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store<User> for MemoryStore {
    async fn insert(&self, new: NewUser) -> Result<User, StoreError> {
        new.validate()
            .map_err(|e| StoreError::invalid(EntityKind::User, e))?;

        let mut tables = self.tables.write().await;
        if tables.email_taken(&new.email, None) {
            return Err(duplicate_email(&new.email));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            created_at: OffsetDateTime::now_utc(),
        };
        tables.users.push(user.clone());

        debug!("Inserted user {}", user.id);
        Ok(user)
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(find(&self.tables.read().await.users, id))
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn update(&self, record: User) -> Result<User, StoreError> {
        NewUser::new(record.name.clone(), record.email.clone())
            .validate()
            .map_err(|e| StoreError::invalid(EntityKind::User, e))?;

        let mut tables = self.tables.write().await;
        let index = position(&tables.users, record.id)?;
        if tables.email_taken(&record.email, Some(record.id)) {
            return Err(duplicate_email(&record.email));
        }

        let stored = &mut tables.users[index];
        stored.name = record.name;
        stored.email = record.email;
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let index = position(&tables.users, id)?;
        if tables.posts.iter().any(|p| p.author_id == id) {
            return Err(StoreError::Constraint {
                kind: EntityKind::User,
                message: format!("user {id} still authors posts"),
            });
        }

        tables.users.remove(index);
        debug!("Deleted user {id}");
        Ok(())
    }
}

#[async_trait]
impl Store<Category> for MemoryStore {
    async fn insert(&self, new: NewCategory) -> Result<Category, StoreError> {
        new.validate()
            .map_err(|e| StoreError::invalid(EntityKind::Category, e))?;

        let category = Category {
            id: Uuid::new_v4(),
            name: new.name,
            created_at: OffsetDateTime::now_utc(),
        };
        self.tables.write().await.categories.push(category.clone());

        debug!("Inserted category {}", category.id);
        Ok(category)
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        Ok(find(&self.tables.read().await.categories, id))
    }

    async fn find_all(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.tables.read().await.categories.clone())
    }

    async fn update(&self, record: Category) -> Result<Category, StoreError> {
        NewCategory::new(record.name.clone())
            .validate()
            .map_err(|e| StoreError::invalid(EntityKind::Category, e))?;

        let mut tables = self.tables.write().await;
        let index = position(&tables.categories, record.id)?;

        let stored = &mut tables.categories[index];
        stored.name = record.name;
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let index = position(&tables.categories, id)?;
        if tables.posts.iter().any(|p| p.category_id == id) {
            return Err(StoreError::Constraint {
                kind: EntityKind::Category,
                message: format!("category {id} still has posts"),
            });
        }

        tables.categories.remove(index);
        debug!("Deleted category {id}");
        Ok(())
    }
}

#[async_trait]
impl Store<Post> for MemoryStore {
    async fn insert(&self, new: NewPost) -> Result<Post, StoreError> {
        new.validate()
            .map_err(|e| StoreError::invalid(EntityKind::Post, e))?;

        let mut tables = self.tables.write().await;
        tables.check_post_references(new.author_id, new.category_id)?;

        let post = Post {
            id: Uuid::new_v4(),
            title: new.title,
            content: new.content,
            author_id: new.author_id,
            category_id: new.category_id,
            created_at: OffsetDateTime::now_utc(),
        };
        tables.posts.push(post.clone());

        debug!("Inserted post {}", post.id);
        Ok(post)
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(find(&self.tables.read().await.posts, id))
    }

    async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.tables.read().await.posts.clone())
    }

    async fn update(&self, record: Post) -> Result<Post, StoreError> {
        NewPost::from(&record)
            .validate()
            .map_err(|e| StoreError::invalid(EntityKind::Post, e))?;

        let mut tables = self.tables.write().await;
        let index = position(&tables.posts, record.id)?;
        tables.check_post_references(record.author_id, record.category_id)?;

        let stored = &mut tables.posts[index];
        stored.title = record.title;
        stored.content = record.content;
        stored.author_id = record.author_id;
        stored.category_id = record.category_id;
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let index = position(&tables.posts, id)?;

        tables.posts.remove(index);
        debug!("Deleted post {id}");
        Ok(())
    }
}
