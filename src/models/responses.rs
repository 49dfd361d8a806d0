use serde::{Deserialize, Serialize};

use crate::models::domain::{ActiveQuiz, Conversation, Match, Message, QuizResult, User};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response for signup/login/profile updates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user: Option<User>,
}

/// Candidate profile enriched with compatibility data for the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProfile {
    pub id: u32,
    pub name: String,
    pub age: u8,
    pub college: String,
    pub bio: String,
    pub interests: Vec<String>,
    pub image: String,
    pub location: String,
    #[serde(default)]
    pub compatibility: Option<u8>,
    #[serde(rename = "sharedInterests", default)]
    pub shared_interests: Vec<String>,
}

/// Response for the discover listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverResponse {
    pub profiles: Vec<ScoredProfile>,
    pub total: usize,
}

/// Filter options derived from the profile directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOptionsResponse {
    pub colleges: Vec<String>,
    pub interests: Vec<String>,
}

/// Response for liking a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub success: bool,
    #[serde(rename = "match")]
    pub created: Match,
    #[serde(rename = "alreadyLiked")]
    pub already_liked: bool,
    /// Set when the like produced a mutual or high-compatibility match
    #[serde(default)]
    pub notification: Option<String>,
}

/// Response listing a user's matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    pub matches: Vec<Match>,
    pub total: usize,
}

/// Snapshot of the caller's quiz state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizStatusResponse {
    pub active: Option<ActiveQuiz>,
    #[serde(rename = "timeRemaining")]
    pub time_remaining: u64,
}

/// Response for completing a quiz
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizCompleteResponse {
    pub success: bool,
    pub result: QuizResult,
}

/// Response listing completed quiz attempts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResultsResponse {
    pub results: Vec<QuizResult>,
    pub total: usize,
}

/// Response listing conversations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationsResponse {
    pub conversations: Vec<Conversation>,
    pub total: usize,
}

/// Response listing messages of one conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<Message>,
    pub total: usize,
}

/// Response for sending a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub sent: Message,
}

/// Unread-message counts, total or per conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    #[serde(rename = "conversationId", default)]
    pub conversation_id: Option<String>,
    pub unread: usize,
}
