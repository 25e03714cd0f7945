//! User generation.

use blog::NewUser;
use fake::{Fake, faker::name::en::Name};
use rand::Rng;

/// Configuration for user generation.
#[derive(Debug, Clone)]
pub struct UserGenConfig {
    /// Domains used for generated email addresses.
    pub email_domains: Vec<String>,
    /// Upper bound (exclusive) of the numeric suffix appended to the local part.
    pub max_email_suffix: u32,
}

impl Default for UserGenConfig {
    fn default() -> Self {
        Self {
            // Reserved example domains never route real mail
            email_domains: vec![
                "example.com".to_string(),
                "example.org".to_string(),
                "example.net".to_string(),
            ],
            max_email_suffix: 100_000,
        }
    }
}

/// Generates synthetic user input for insertion.
pub struct UserGenerator {
    config: UserGenConfig,
}

impl UserGenerator {
    /// Creates a new user generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: UserGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: UserGenConfig) -> Self {
        Self { config }
    }

    /// Generates a single user with a random full name and matching email.
    pub fn generate(&self, rng: &mut impl Rng) -> NewUser {
        let name: String = Name().fake_with_rng(rng);
        let email = self.generate_email(&name, rng);

        NewUser { name, email }
    }

    /// Generates multiple users.
    pub fn generate_batch(&self, count: usize, rng: &mut impl Rng) -> Vec<NewUser> {
        (0..count).map(|_| self.generate(rng)).collect()
    }

    /// Generates an email from a name.
    fn generate_email(&self, name: &str, rng: &mut impl Rng) -> String {
        let normalized: String = name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(".");
        let local = if normalized.is_empty() {
            "user".to_string()
        } else {
            normalized
        };

        let suffix: u32 = rng.gen_range(1..self.config.max_email_suffix.max(2));
        let domain = match self.config.email_domains.len() {
            0 => "example.com",
            n => self.config.email_domains[rng.gen_range(0..n)].as_str(),
        };

        format!("{local}{suffix}@{domain}")
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generate_user() {
        let user_gen = UserGenerator::new();
        let mut rng = rand::thread_rng();
        let user = user_gen.generate(&mut rng);

        assert!(!user.name.is_empty());
        assert!(user.email.contains('@'));
        assert!(
            user.email.ends_with(".com")
                || user.email.ends_with(".org")
                || user.email.ends_with(".net")
        );
    }

    #[test]
    fn test_generate_batch() {
        let user_gen = UserGenerator::new();
        let mut rng = rand::thread_rng();
        let users = user_gen.generate_batch(10, &mut rng);

        assert_eq!(users.len(), 10);

        // Every email must pass the same validation the stores apply
        for user in &users {
            assert!(validator::Validate::validate(user).is_ok(), "{}", user.email);
        }
    }

    #[test]
    fn test_same_seed_same_users() {
        let user_gen = UserGenerator::new();
        let a = user_gen.generate_batch(5, &mut StdRng::seed_from_u64(12345));
        let b = user_gen.generate_batch(5, &mut StdRng::seed_from_u64(12345));

        assert_eq!(a, b);
    }

    #[test]
    fn test_email_falls_back_without_domains() {
        let user_gen = UserGenerator::with_config(UserGenConfig {
            email_domains: Vec::new(),
            max_email_suffix: 10,
        });
        let mut rng = StdRng::seed_from_u64(7);

        let user = user_gen.generate(&mut rng);
        assert!(user.email.ends_with("@example.com"));
    }
}
