//! Post generation.

use blog::{Category, NewPost, User};
use fake::{
    Fake,
    faker::lorem::en::{Paragraph, Sentence},
};
use rand::Rng;
use rand_distr::{Distribution, Poisson};
use uuid::Uuid;

/// Generates lorem-ipsum posts attached to existing authors and categories.
#[derive(Debug, Clone, Default)]
pub struct PostGenerator;

impl PostGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates a single post for the given author and category.
    pub fn generate(&self, author_id: Uuid, category_id: Uuid, rng: &mut impl Rng) -> NewPost {
        let title: String = Sentence(3..8).fake_with_rng(rng);
        let content: String = Paragraph(2..5).fake_with_rng(rng);

        NewPost {
            title: title.trim_end_matches('.').to_string(),
            content,
            author_id,
            category_id,
        }
    }

    /// Generates posts for every author.
    ///
    /// Each author writes a Poisson-distributed number of posts with mean
    /// `mean_per_author`, each filed under a uniformly chosen category.
    /// Returns nothing when there are no categories or the mean is not positive.
    pub fn generate_for_authors(
        &self,
        authors: &[User],
        categories: &[Category],
        mean_per_author: f64,
        rng: &mut impl Rng,
    ) -> Vec<NewPost> {
        if categories.is_empty() || mean_per_author <= 0.0 {
            return Vec::new();
        }
        let Ok(poisson) = Poisson::new(mean_per_author) else {
            return Vec::new();
        };

        let mut posts = Vec::new();
        for author in authors {
            let count = poisson.sample(rng) as usize;
            for _ in 0..count {
                let category = &categories[rng.gen_range(0..categories.len())];
                posts.push(self.generate(author.id, category.id, rng));
            }
        }

        posts
    }
}
