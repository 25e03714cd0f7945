use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::errors::StoreError;
use crate::models::{Category, EntityKind, NewCategory, NewPost, NewUser, Post, User};
use crate::store::Store;

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Applies the embedded migrations in `crates/blog/migrations`.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Releases every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Store<User> for Database {
    async fn insert(&self, new: NewUser) -> Result<User, StoreError> {
        new.validate()
            .map_err(|e| StoreError::invalid(EntityKind::User, e))?;

        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx(EntityKind::User, e))?;

        debug!("Inserted user {}", user.id);
        Ok(user)
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as(
            r#"
            SELECT id, name, email, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as(
            r#"
            SELECT id, name, email, created_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn update(&self, record: User) -> Result<User, StoreError> {
        NewUser::new(record.name.clone(), record.email.clone())
            .validate()
            .map_err(|e| StoreError::invalid(EntityKind::User, e))?;

        let updated: Option<User> = sqlx::query_as(
            r#"
            UPDATE users SET name = $2, email = $3
            WHERE id = $1
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx(EntityKind::User, e))?;

        updated.ok_or(StoreError::NotFound {
            kind: EntityKind::User,
            id: record.id,
        })
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx(EntityKind::User, e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                kind: EntityKind::User,
                id,
            });
        }

        debug!("Deleted user {id}");
        Ok(())
    }
}

#[async_trait]
impl Store<Category> for Database {
    async fn insert(&self, new: NewCategory) -> Result<Category, StoreError> {
        new.validate()
            .map_err(|e| StoreError::invalid(EntityKind::Category, e))?;

        let category: Category = sqlx::query_as(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(&new.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx(EntityKind::Category, e))?;

        debug!("Inserted category {}", category.id);
        Ok(category)
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        let category = sqlx::query_as(
            r#"
            SELECT id, name, created_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn find_all(&self) -> Result<Vec<Category>, StoreError> {
        let categories = sqlx::query_as(
            r#"
            SELECT id, name, created_at
            FROM categories
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn update(&self, record: Category) -> Result<Category, StoreError> {
        NewCategory::new(record.name.clone())
            .validate()
            .map_err(|e| StoreError::invalid(EntityKind::Category, e))?;

        let updated: Option<Category> = sqlx::query_as(
            r#"
            UPDATE categories SET name = $2
            WHERE id = $1
            RETURNING id, name, created_at
            "#,
        )
        .bind(record.id)
        .bind(&record.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx(EntityKind::Category, e))?;

        updated.ok_or(StoreError::NotFound {
            kind: EntityKind::Category,
            id: record.id,
        })
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx(EntityKind::Category, e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                kind: EntityKind::Category,
                id,
            });
        }

        debug!("Deleted category {id}");
        Ok(())
    }
}

#[async_trait]
impl Store<Post> for Database {
    async fn insert(&self, new: NewPost) -> Result<Post, StoreError> {
        new.validate()
            .map_err(|e| StoreError::invalid(EntityKind::Post, e))?;

        let post: Post = sqlx::query_as(
            r#"
            INSERT INTO posts (title, content, author_id, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, author_id, category_id, created_at
            "#,
        )
        .bind(&new.title)
        .bind(&new.content)
        .bind(new.author_id)
        .bind(new.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx(EntityKind::Post, e))?;

        debug!("Inserted post {}", post.id);
        Ok(post)
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let post = sqlx::query_as(
            r#"
            SELECT id, title, content, author_id, category_id, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        let posts = sqlx::query_as(
            r#"
            SELECT id, title, content, author_id, category_id, created_at
            FROM posts
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn update(&self, record: Post) -> Result<Post, StoreError> {
        NewPost::from(&record)
            .validate()
            .map_err(|e| StoreError::invalid(EntityKind::Post, e))?;

        let updated: Option<Post> = sqlx::query_as(
            r#"
            UPDATE posts SET title = $2, content = $3, author_id = $4, category_id = $5
            WHERE id = $1
            RETURNING id, title, content, author_id, category_id, created_at
            "#,
        )
        .bind(record.id)
        .bind(&record.title)
        .bind(&record.content)
        .bind(record.author_id)
        .bind(record.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx(EntityKind::Post, e))?;

        updated.ok_or(StoreError::NotFound {
            kind: EntityKind::Post,
            id: record.id,
        })
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx(EntityKind::Post, e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                kind: EntityKind::Post,
                id,
            });
        }

        debug!("Deleted post {id}");
        Ok(())
    }
}
