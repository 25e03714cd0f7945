//! Database seeding utilities.

use blog::{Category, Entity, EntityKind, Post, Store, StoreError, User};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::{DEFAULT_USER_COUNT, SeedConfig};
use crate::generators::{CategoryGenerator, PostGenerator, UserGenerator};

#[derive(Debug, Error)]
pub enum SeedError {
    /// Insert number `index` (1-based) of `kind` was rejected by the store.
    #[error("Failed to insert {kind} #{index}: {source}")]
    Insert {
        kind: EntityKind,
        index: usize,
        #[source]
        source: StoreError,
    },
}

/// Everything a seeding run inserted, plus the failure that stopped it early.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub users: Vec<User>,
    pub categories: Vec<Category>,
    pub posts: Vec<Post>,
    pub aborted: Option<SeedError>,
}

impl SeedReport {
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none()
    }
}

/// Seeds synthetic records through any [`Store`].
///
/// Inserts are issued one at a time: each is awaited before the next record
/// is generated, and the first failure ends the phase.
pub struct Seeder<'a, S> {
    store: &'a S,
    user_count: usize,
    category_count: usize,
    posts_per_user: f64,
    user_gen: UserGenerator,
    category_gen: CategoryGenerator,
    post_gen: PostGenerator,
}

impl<'a, S> Seeder<'a, S> {
    /// Creates a seeder that inserts ten users and nothing else.
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            user_count: DEFAULT_USER_COUNT,
            category_count: 0,
            posts_per_user: 0.0,
            user_gen: UserGenerator::new(),
            category_gen: CategoryGenerator::new(),
            post_gen: PostGenerator::new(),
        }
    }

    pub fn from_config(store: &'a S, config: &SeedConfig) -> Self {
        Self::new(store)
            .with_user_count(config.user_count)
            .with_categories(config.category_count)
            .with_posts_per_user(config.posts_per_user)
    }

    /// Sets the number of users to insert.
    pub fn with_user_count(mut self, count: usize) -> Self {
        self.user_count = count;
        self
    }

    /// Sets the number of categories to insert after the users.
    pub fn with_categories(mut self, count: usize) -> Self {
        self.category_count = count;
        self
    }

    /// Sets the mean number of posts per seeded user.
    pub fn with_posts_per_user(mut self, mean: f64) -> Self {
        self.posts_per_user = mean;
        self
    }

    /// Sets the user generator.
    pub fn with_user_generator(mut self, user_gen: UserGenerator) -> Self {
        self.user_gen = user_gen;
        self
    }

    /// Seeds users, returning them all or the first insert failure.
    pub async fn seed_users(&self, rng: &mut impl Rng) -> Result<Vec<User>, SeedError>
    where
        S: Store<User>,
    {
        let mut users = Vec::with_capacity(self.user_count);
        self.seed_users_into(&mut users, rng).await?;
        Ok(users)
    }

    /// Seeds categories, returning them all or the first insert failure.
    pub async fn seed_categories(&self, rng: &mut impl Rng) -> Result<Vec<Category>, SeedError>
    where
        S: Store<Category>,
    {
        let mut categories = Vec::with_capacity(self.category_count);
        self.seed_categories_into(&mut categories, rng).await?;
        Ok(categories)
    }

    /// Runs every configured phase, catching and logging the first failure.
    ///
    /// Users are seeded first, then categories, then posts for the seeded
    /// users. Once an insert fails the remaining phases are skipped; rows
    /// inserted before the failure stay in the store and in the report.
    pub async fn run(&self, rng: &mut impl Rng) -> SeedReport
    where
        S: Store<User> + Store<Category> + Store<Post>,
    {
        let mut report = SeedReport::default();

        if let Err(e) = self.run_phases(&mut report, rng).await {
            error!(
                "Seeding stopped after {} users, {} categories, {} posts: {e}",
                report.users.len(),
                report.categories.len(),
                report.posts.len()
            );
            report.aborted = Some(e);
        }

        report
    }

    async fn run_phases(&self, report: &mut SeedReport, rng: &mut impl Rng) -> Result<(), SeedError>
    where
        S: Store<User> + Store<Category> + Store<Post>,
    {
        self.seed_users_into(&mut report.users, rng).await?;
        self.seed_categories_into(&mut report.categories, rng).await?;
        self.seed_posts_into(&report.users, &report.categories, &mut report.posts, rng)
            .await
    }

    async fn seed_users_into(
        &self,
        out: &mut Vec<User>,
        rng: &mut impl Rng,
    ) -> Result<(), SeedError>
    where
        S: Store<User>,
    {
        info!("Seeding {} users...", self.user_count);

        for index in 1..=self.user_count {
            let new = self.user_gen.generate(rng);
            out.push(insert_one::<S, User>(self.store, new, index).await?);
        }

        info!("Seeded {} users", out.len());
        Ok(())
    }

    async fn seed_categories_into(
        &self,
        out: &mut Vec<Category>,
        rng: &mut impl Rng,
    ) -> Result<(), SeedError>
    where
        S: Store<Category>,
    {
        if self.category_count == 0 {
            return Ok(());
        }
        info!("Seeding {} categories...", self.category_count);

        for index in 1..=self.category_count {
            let new = self.category_gen.generate(rng);
            out.push(insert_one::<S, Category>(self.store, new, index).await?);
        }

        info!("Seeded {} categories", out.len());
        Ok(())
    }

    async fn seed_posts_into(
        &self,
        authors: &[User],
        categories: &[Category],
        out: &mut Vec<Post>,
        rng: &mut impl Rng,
    ) -> Result<(), SeedError>
    where
        S: Store<Post>,
    {
        let posts = self
            .post_gen
            .generate_for_authors(authors, categories, self.posts_per_user, rng);
        if posts.is_empty() {
            return Ok(());
        }
        info!("Seeding {} posts...", posts.len());

        for (i, new) in posts.into_iter().enumerate() {
            out.push(insert_one::<S, Post>(self.store, new, i + 1).await?);
        }

        info!("Seeded {} posts", out.len());
        Ok(())
    }
}

async fn insert_one<S, E>(store: &S, new: E::New, index: usize) -> Result<E, SeedError>
where
    S: Store<E>,
    E: Entity,
{
    let record = store.insert(new).await.map_err(|source| SeedError::Insert {
        kind: E::KIND,
        index,
        source,
    })?;

    debug!("Inserted {} #{index}: {}", E::KIND, record.id());
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::generators::UserGenConfig;
    use blog::{MemoryStore, NewCategory, NewPost, NewUser};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    /// Delegates to a memory store but rejects the `fail_on`-th user insert.
    struct FailingStore {
        inner: MemoryStore,
        fail_on: usize,
        attempts: AtomicUsize,
    }

    impl FailingStore {
        fn new(fail_on: usize) -> Self {
            Self {
                inner: MemoryStore::new(),
                fail_on,
                attempts: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Store<User> for FailingStore {
        async fn insert(&self, new: NewUser) -> Result<User, StoreError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt == self.fail_on {
                return Err(StoreError::Constraint {
                    kind: EntityKind::User,
                    message: "injected failure".to_string(),
                });
            }
            Store::<User>::insert(&self.inner, new).await
        }

        async fn find_one(&self, id: Uuid) -> Result<Option<User>, StoreError> {
            Store::<User>::find_one(&self.inner, id).await
        }

        async fn find_all(&self) -> Result<Vec<User>, StoreError> {
            Store::<User>::find_all(&self.inner).await
        }

        async fn update(&self, record: User) -> Result<User, StoreError> {
            Store::<User>::update(&self.inner, record).await
        }

        async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
            Store::<User>::delete(&self.inner, id).await
        }
    }

    #[async_trait]
    impl Store<Category> for FailingStore {
        async fn insert(&self, new: NewCategory) -> Result<Category, StoreError> {
            Store::<Category>::insert(&self.inner, new).await
        }

        async fn find_one(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
            Store::<Category>::find_one(&self.inner, id).await
        }

        async fn find_all(&self) -> Result<Vec<Category>, StoreError> {
            Store::<Category>::find_all(&self.inner).await
        }

        async fn update(&self, record: Category) -> Result<Category, StoreError> {
            Store::<Category>::update(&self.inner, record).await
        }

        async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
            Store::<Category>::delete(&self.inner, id).await
        }
    }

    #[async_trait]
    impl Store<Post> for FailingStore {
        async fn insert(&self, new: NewPost) -> Result<Post, StoreError> {
            Store::<Post>::insert(&self.inner, new).await
        }

        async fn find_one(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
            Store::<Post>::find_one(&self.inner, id).await
        }

        async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
            Store::<Post>::find_all(&self.inner).await
        }

        async fn update(&self, record: Post) -> Result<Post, StoreError> {
            Store::<Post>::update(&self.inner, record).await
        }

        async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
            Store::<Post>::delete(&self.inner, id).await
        }
    }

    #[tokio::test]
    async fn test_default_run_seeds_ten_users() {
        let store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(12345);

        let report = Seeder::new(&store).run(&mut rng).await;

        assert!(report.is_complete());
        assert_eq!(report.users.len(), 10);
        assert!(report.categories.is_empty());
        assert!(report.posts.is_empty());

        let stored = Store::<User>::find_all(&store).await.unwrap();
        assert_eq!(stored.len(), 10);
    }

    #[tokio::test]
    async fn test_failure_stops_further_inserts() {
        let store = FailingStore::new(4);
        let mut rng = StdRng::seed_from_u64(12345);

        let err = Seeder::new(&store).seed_users(&mut rng).await.unwrap_err();

        let SeedError::Insert { kind, index, source } = err;
        assert_eq!(kind, EntityKind::User);
        assert_eq!(index, 4);
        assert!(source.is_constraint());

        // Three succeeded, the fourth failed, nothing after it was attempted
        assert_eq!(store.attempts.load(Ordering::SeqCst), 4);
        assert_eq!(Store::<User>::find_all(&store).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_run_catches_failure_and_keeps_partial_report() {
        let store = FailingStore::new(2);
        let mut rng = StdRng::seed_from_u64(12345);

        let report = Seeder::new(&store)
            .with_categories(3)
            .with_posts_per_user(2.0)
            .run(&mut rng)
            .await;

        assert!(!report.is_complete());
        assert_eq!(report.users.len(), 1);
        assert!(report.categories.is_empty());
        assert!(report.posts.is_empty());
        assert!(matches!(
            report.aborted,
            Some(SeedError::Insert {
                kind: EntityKind::User,
                index: 2,
                ..
            })
        ));

        assert_eq!(store.attempts.load(Ordering::SeqCst), 2);
        assert!(Store::<Category>::find_all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_full_run_links_posts_to_seeded_rows() {
        let store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(54321);

        let report = Seeder::new(&store)
            .with_user_count(15)
            .with_categories(4)
            .with_posts_per_user(2.0)
            .run(&mut rng)
            .await;

        assert!(report.is_complete());
        assert_eq!(report.users.len(), 15);
        assert_eq!(report.categories.len(), 4);
        assert!(!report.posts.is_empty());

        for post in &report.posts {
            assert!(report.users.iter().any(|u| u.id == post.author_id));
            assert!(report.categories.iter().any(|c| c.id == post.category_id));
        }

        let stored = Store::<Post>::find_all(&store).await.unwrap();
        assert_eq!(stored.len(), report.posts.len());
    }

    #[tokio::test]
    async fn test_config_and_custom_generator() {
        let store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(12345);
        let config = SeedConfig {
            user_count: 3,
            category_count: 2,
            ..SeedConfig::default()
        };
        let user_gen = UserGenerator::with_config(UserGenConfig {
            email_domains: vec!["blog.test".to_string()],
            ..UserGenConfig::default()
        });

        let seeder = Seeder::from_config(&store, &config).with_user_generator(user_gen);
        let users = seeder.seed_users(&mut rng).await.unwrap();
        let categories = seeder.seed_categories(&mut rng).await.unwrap();

        assert_eq!(users.len(), 3);
        assert!(users.iter().all(|u| u.email.ends_with("@blog.test")));
        assert_eq!(categories.len(), 2);
    }
}
