use blog::{Category, Store, StoreError};

use crate::generators::CategoryGenerator;

/// Creates disposable categories.
pub struct CategoryFactory<'a, S> {
    store: &'a S,
    generator: CategoryGenerator,
}

impl<'a, S: Store<Category>> CategoryFactory<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            generator: CategoryGenerator::new(),
        }
    }

    /// Inserts one category with a random single-word name.
    pub async fn create(&self) -> Result<Category, StoreError> {
        let new = self.generator.generate(&mut rand::thread_rng());
        self.store.insert(new).await
    }

    /// Inserts `count` categories one after another.
    pub async fn create_many(&self, count: usize) -> Result<Vec<Category>, StoreError> {
        let mut categories = Vec::with_capacity(count);
        for _ in 0..count {
            categories.push(self.create().await?);
        }
        Ok(categories)
    }
}
