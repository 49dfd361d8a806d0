//! CampusConnect - matching and quiz service for the CampusConnect dating app
//!
//! This library provides the compatibility-scoring and quiz engines used by
//! the CampusConnect app, along with the storage, profile-directory and
//! remote-API services the HTTP layer is built on.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{
    compatibility_score, default_question_pool, shared_interests, CompatibilityParams, QuizEngine,
    QuizError,
};
pub use self::models::{Match, MatchStatus, Profile, QuizQuestion, QuizResult, User};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let user: Vec<String> = vec!["Coffee".to_string()];
        let profile: Vec<String> = vec!["Coffee".to_string(), "Travel".to_string()];
        let score =
            compatibility_score(&user, &profile, false, &CompatibilityParams::default());
        assert_eq!(score, 100);
    }
}
