use blog::{Category, Post, Store, StoreError, User};
use uuid::Uuid;

use super::{CategoryFactory, UserFactory};
use crate::generators::PostGenerator;

/// Creates disposable posts, along with an author and category when none are given.
pub struct PostFactory<'a, S> {
    store: &'a S,
    generator: PostGenerator,
}

impl<'a, S> PostFactory<'a, S>
where
    S: Store<Post> + Store<User> + Store<Category>,
{
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            generator: PostGenerator::new(),
        }
    }

    /// Inserts one post attached to existing rows.
    pub async fn create_for(&self, author_id: Uuid, category_id: Uuid) -> Result<Post, StoreError> {
        let new = self
            .generator
            .generate(author_id, category_id, &mut rand::thread_rng());
        Store::<Post>::insert(self.store, new).await
    }

    /// Inserts a fresh author, a fresh category, and one post linking them.
    pub async fn create(&self) -> Result<Post, StoreError> {
        let author = UserFactory::new(self.store).create().await?;
        let category = CategoryFactory::new(self.store).create().await?;
        self.create_for(author.id, category.id).await
    }
}
