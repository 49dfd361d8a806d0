// Core algorithm exports
pub mod compatibility;
pub mod questions;
pub mod quiz;

pub use compatibility::{
    compatibility_score, shared_interests, simulate_mutual_interest, CompatibilityParams,
};
pub use questions::default_question_pool;
pub use quiz::{QuizEngine, QuizError};
