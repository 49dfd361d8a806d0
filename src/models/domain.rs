use serde::{Deserialize, Serialize};

/// Candidate profile from the seeded directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: u32,
    pub name: String,
    pub age: u8,
    pub college: String,
    pub bio: String,
    #[serde(default)]
    pub interests: Vec<String>,
    pub image: String,
    pub location: String,
}

/// Registered user account
///
/// Credentials are stored as-is; real credential handling lives in the
/// remote backend once it exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub gender: String,
    #[serde(rename = "profileImage", default)]
    pub profile_image: Option<String>,
    #[serde(rename = "additionalPhotos", default)]
    pub additional_photos: Vec<String>,
    #[serde(rename = "coverImage", default)]
    pub cover_image: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub verified: bool,
}

impl User {
    /// All photo URLs, primary first
    pub fn photos(&self) -> Vec<String> {
        let mut photos = Vec::with_capacity(self.additional_photos.len() + 1);
        if let Some(primary) = &self.profile_image {
            photos.push(primary.clone());
        }
        photos.extend(self.additional_photos.iter().cloned());
        photos
    }
}

/// Lifecycle of a match relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Rejected,
}

/// Denormalized preview of the latest message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastMessage {
    pub content: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "senderId")]
    pub sender_id: String,
}

/// Match created when a user likes a profile
///
/// At most one exists per (user, profile) pair. `compatibility` is
/// deterministic given the interest sets and college equality; `is_mutual`
/// is a randomized stand-in for the other side's decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "profileId")]
    pub profile_id: u32,
    #[serde(rename = "matchedAt")]
    pub matched_at: chrono::DateTime<chrono::Utc>,
    pub compatibility: u8,
    pub status: MatchStatus,
    #[serde(rename = "isMutual")]
    pub is_mutual: bool,
    #[serde(rename = "lastMessage", default)]
    pub last_message: Option<LastMessage>,
}

/// Question from the fixed compatibility-quiz pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
}

/// A single selected answer, keyed by question id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub answer: String,
}

/// Immutable record of a completed quiz attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "partnerId")]
    pub partner_id: String,
    #[serde(rename = "userAnswers")]
    pub user_answers: Vec<QuizAnswer>,
    #[serde(rename = "partnerAnswers")]
    pub partner_answers: Vec<QuizAnswer>,
    #[serde(rename = "matchPercentage")]
    pub match_percentage: u8,
    #[serde(rename = "completedAt")]
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

/// In-progress quiz attempt; exists only between start and
/// completion/cancellation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveQuiz {
    pub id: String,
    #[serde(rename = "partnerId")]
    pub partner_id: String,
    pub questions: Vec<QuizQuestion>,
    #[serde(default)]
    pub answers: Vec<QuizAnswer>,
    #[serde(rename = "startedAt")]
    pub started_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "timeLimitSecs")]
    pub time_limit_secs: u64,
}

impl ActiveQuiz {
    pub fn deadline(&self) -> chrono::DateTime<chrono::Utc> {
        self.started_at + chrono::Duration::seconds(self.time_limit_secs as i64)
    }

    /// Whole seconds left before the attempt auto-completes, floored at zero
    pub fn remaining_secs(&self, now: chrono::DateTime<chrono::Utc>) -> u64 {
        (self.deadline() - now).num_seconds().max(0) as u64
    }

    /// Upsert an answer; answering the same question again replaces the
    /// previous selection
    pub fn record_answer(&mut self, question_id: &str, answer: &str) {
        match self
            .answers
            .iter_mut()
            .find(|a| a.question_id == question_id)
        {
            Some(existing) => existing.answer = answer.to_string(),
            None => self.answers.push(QuizAnswer {
                question_id: question_id.to_string(),
                answer: answer.to_string(),
            }),
        }
    }
}

/// Chat message within a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "conversationId")]
    pub conversation_id: String,
    #[serde(rename = "senderId")]
    pub sender_id: String,
    pub content: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub read: bool,
}

/// Conversation between the user and one matched partner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub participants: Vec<String>,
    #[serde(rename = "lastMessage", default)]
    pub last_message: Option<LastMessage>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Conversation {
    pub fn involves(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_quiz() -> ActiveQuiz {
        ActiveQuiz {
            id: "q1".to_string(),
            partner_id: "3".to_string(),
            questions: vec![],
            answers: vec![],
            started_at: Utc::now(),
            time_limit_secs: 180,
        }
    }

    #[test]
    fn test_record_answer_upserts() {
        let mut quiz = sample_quiz();

        quiz.record_answer("1", "Coffee shop conversation");
        quiz.record_answer("2", "Phone calls");
        assert_eq!(quiz.answers.len(), 2);

        // Re-answering replaces, never duplicates
        quiz.record_answer("1", "Outdoor adventure");
        assert_eq!(quiz.answers.len(), 2);
        assert_eq!(quiz.answers[0].answer, "Outdoor adventure");
    }

    #[test]
    fn test_remaining_secs_floors_at_zero() {
        let mut quiz = sample_quiz();
        quiz.time_limit_secs = 10;

        let now = quiz.started_at;
        assert_eq!(quiz.remaining_secs(now), 10);

        let past_deadline = quiz.started_at + chrono::Duration::seconds(60);
        assert_eq!(quiz.remaining_secs(past_deadline), 0);
    }

    #[test]
    fn test_match_status_serializes_lowercase() {
        let json = serde_json::to_string(&MatchStatus::Accepted).unwrap();
        assert_eq!(json, "\"accepted\"");
    }

    #[test]
    fn test_user_photos_order() {
        let user = User {
            id: "u1".to_string(),
            name: "Test".to_string(),
            email: "t@iiti.ac.in".to_string(),
            password: "secret".to_string(),
            age: Some(21),
            college: None,
            bio: String::new(),
            interests: vec![],
            location: String::new(),
            gender: String::new(),
            profile_image: Some("a.jpg".to_string()),
            additional_photos: vec!["b.jpg".to_string(), "c.jpg".to_string()],
            cover_image: None,
            created_at: Utc::now(),
            verified: false,
        };

        assert_eq!(user.photos(), vec!["a.jpg", "b.jpg", "c.jpg"]);
    }
}
