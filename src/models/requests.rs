use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create an account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    pub age: u8,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[validate(length(min = 3))]
    #[serde(default)]
    pub interests: Vec<String>,
    #[validate(length(min = 3))]
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

/// Request to log in
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Partial profile update; only the provided fields change
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "profileImage", default)]
    pub profile_image: Option<String>,
    #[serde(rename = "additionalPhotos", default)]
    pub additional_photos: Option<Vec<String>>,
    #[serde(rename = "coverImage", default)]
    pub cover_image: Option<String>,
}

/// Request to like a profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LikeProfileRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(alias = "profile_id", rename = "profileId")]
    pub profile_id: u32,
}

/// Request to accept or reject a pending match
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DecideMatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "match_id", rename = "matchId")]
    pub match_id: String,
    /// "accepted" or "rejected"
    pub decision: String,
}

/// Request to start a compatibility quiz against a partner profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StartQuizRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "partner_id", rename = "partnerId")]
    pub partner_id: String,
}

/// Request to answer one question of the active quiz
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnswerQuestionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "question_id", rename = "questionId")]
    pub question_id: String,
    pub answer: String,
}

/// Request that targets the caller's active quiz (complete, cancel)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuizActionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}

/// Request to open (or fetch) the conversation with a participant
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OpenConversationRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "participant_id", rename = "participantId")]
    pub participant_id: String,
}

/// Request to send a chat message
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "conversation_id", rename = "conversationId")]
    pub conversation_id: String,
    pub content: String,
}

/// Request to mark a conversation's incoming messages as read
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MarkReadRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "conversation_id", rename = "conversationId")]
    pub conversation_id: String,
}

/// Query parameters for the discover listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoverQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(rename = "minAge", default)]
    pub min_age: Option<u8>,
    #[serde(rename = "maxAge", default)]
    pub max_age: Option<u8>,
    /// Comma-separated interest tags; a profile matches if it has any of them
    #[serde(default)]
    pub interests: Option<String>,
    /// When present and resolvable, results are ordered by compatibility
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

impl DiscoverQuery {
    pub fn interest_list(&self) -> Vec<String> {
        self.interests
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_requires_three_interests() {
        let req = SignupRequest {
            name: "Test".to_string(),
            email: "test@iiti.ac.in".to_string(),
            password: "secret1".to_string(),
            age: 21,
            college: None,
            bio: None,
            interests: vec!["Music".to_string()],
            photos: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            location: None,
            gender: None,
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_signup_rejects_short_password() {
        let req = SignupRequest {
            name: "Test".to_string(),
            email: "test@iiti.ac.in".to_string(),
            password: "abc".to_string(),
            age: 21,
            college: None,
            bio: None,
            interests: vec!["Music".to_string(), "Art".to_string(), "Coffee".to_string()],
            photos: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            location: None,
            gender: None,
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_interest_list_parsing() {
        let query = DiscoverQuery {
            interests: Some("Music, Art,,Coffee ".to_string()),
            ..Default::default()
        };

        assert_eq!(query.interest_list(), vec!["Music", "Art", "Coffee"]);
    }
}
