//! Category generation.

use blog::NewCategory;
use fake::{Fake, faker::lorem::en::Word};
use rand::Rng;

/// Generates single-word category names.
#[derive(Debug, Clone, Default)]
pub struct CategoryGenerator;

impl CategoryGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates one category with a capitalised lorem word as its name.
    pub fn generate(&self, rng: &mut impl Rng) -> NewCategory {
        let word: String = Word().fake_with_rng(rng);
        NewCategory {
            name: capitalize(&word),
        }
    }

    pub fn generate_batch(&self, count: usize, rng: &mut impl Rng) -> Vec<NewCategory> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
