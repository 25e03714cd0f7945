use blog::{Store, StoreError, User};

use crate::generators::UserGenerator;

/// Creates disposable users.
pub struct UserFactory<'a, S> {
    store: &'a S,
    generator: UserGenerator,
}

impl<'a, S: Store<User>> UserFactory<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            generator: UserGenerator::new(),
        }
    }

    /// Inserts one user with a random name and email.
    pub async fn create(&self) -> Result<User, StoreError> {
        let new = self.generator.generate(&mut rand::thread_rng());
        self.store.insert(new).await
    }

    /// Inserts `count` users one after another.
    pub async fn create_many(&self, count: usize) -> Result<Vec<User>, StoreError> {
        let mut users = Vec::with_capacity(count);
        for _ in 0..count {
            users.push(self.create().await?);
        }
        Ok(users)
    }
}
