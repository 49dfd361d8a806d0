// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ActiveQuiz, Conversation, LastMessage, Match, MatchStatus, Message, Profile, QuizAnswer,
    QuizQuestion, QuizResult, User,
};
pub use requests::{
    AnswerQuestionRequest, DecideMatchRequest, DiscoverQuery, LikeProfileRequest, LoginRequest,
    MarkReadRequest, OpenConversationRequest, QuizActionRequest, SendMessageRequest,
    SignupRequest, StartQuizRequest, UpdateProfileRequest,
};
pub use responses::{
    AuthResponse, ConversationsResponse, DiscoverResponse, ErrorResponse, FilterOptionsResponse,
    HealthResponse, LikeResponse, MatchesResponse, MessagesResponse, QuizCompleteResponse,
    QuizResultsResponse, QuizStatusResponse, ScoredProfile, SendMessageResponse,
    UnreadCountResponse,
};
