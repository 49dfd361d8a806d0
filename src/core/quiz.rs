use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{ActiveQuiz, QuizAnswer, QuizQuestion, QuizResult};

/// Errors that can occur while running a quiz
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("question pool has {available} questions, need {needed}")]
    PoolTooSmall { needed: usize, available: usize },

    #[error("no active quiz for user {0}")]
    NotActive(String),
}

/// Compatibility-quiz engine
///
/// Tracks at most one in-progress attempt per user. Each attempt moves
/// through start -> answer* -> complete, or is discarded by cancel. The
/// countdown ticker and a manual submit may race to complete the same
/// attempt; the transition is a single guarded take, so whichever fires
/// second observes no active attempt and becomes a no-op.
pub struct QuizEngine {
    pool: Vec<QuizQuestion>,
    question_count: usize,
    time_limit_secs: u64,
    active: Mutex<HashMap<String, ActiveQuiz>>,
}

impl QuizEngine {
    pub fn new(pool: Vec<QuizQuestion>, question_count: usize, time_limit_secs: u64) -> Self {
        Self {
            pool,
            question_count,
            time_limit_secs,
            active: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_default_pool(question_count: usize, time_limit_secs: u64) -> Self {
        Self::new(super::questions::default_question_pool(), question_count, time_limit_secs)
    }

    /// The full question pool the engine draws from
    pub fn pool(&self) -> &[QuizQuestion] {
        &self.pool
    }

    /// Start an attempt against a partner
    ///
    /// Draws `question_count` distinct questions via uniform shuffle and
    /// arms the countdown. Any attempt already in progress for the user is
    /// discarded and replaced.
    pub async fn start(&self, user_id: &str, partner_id: &str) -> Result<ActiveQuiz, QuizError> {
        if self.pool.len() < self.question_count {
            return Err(QuizError::PoolTooSmall {
                needed: self.question_count,
                available: self.pool.len(),
            });
        }

        let mut questions = self.pool.clone();
        questions.shuffle(&mut rand::thread_rng());
        questions.truncate(self.question_count);

        let quiz = ActiveQuiz {
            id: Uuid::new_v4().to_string(),
            partner_id: partner_id.to_string(),
            questions,
            answers: Vec::new(),
            started_at: Utc::now(),
            time_limit_secs: self.time_limit_secs,
        };

        let mut active = self.active.lock().await;
        if active.insert(user_id.to_string(), quiz.clone()).is_some() {
            tracing::debug!("Discarded in-progress quiz for user {}", user_id);
        }

        Ok(quiz)
    }

    /// Upsert an answer into the user's active attempt
    ///
    /// Idempotent per question id. The question id is not checked against
    /// the selected set; an answer to a question outside it is stored and
    /// simply never agrees at scoring time.
    pub async fn answer(
        &self,
        user_id: &str,
        question_id: &str,
        answer: &str,
    ) -> Result<ActiveQuiz, QuizError> {
        let mut active = self.active.lock().await;
        let quiz = active
            .get_mut(user_id)
            .ok_or_else(|| QuizError::NotActive(user_id.to_string()))?;

        quiz.record_answer(question_id, answer);
        Ok(quiz.clone())
    }

    /// Snapshot of the user's active attempt, if any
    pub async fn snapshot(&self, user_id: &str) -> Option<ActiveQuiz> {
        self.active.lock().await.get(user_id).cloned()
    }

    /// Seconds left on the user's active attempt
    pub async fn remaining(&self, user_id: &str, now: DateTime<Utc>) -> Option<u64> {
        self.active
            .lock()
            .await
            .get(user_id)
            .map(|quiz| quiz.remaining_secs(now))
    }

    /// Complete the user's attempt and produce its result
    ///
    /// Synthesizes one uniform-random partner answer per selected question
    /// and scores the agreement percentage. Unanswered questions never
    /// agree. The attempt is removed under the lock, so a concurrent
    /// expiry sees `NotActive`.
    pub async fn complete(&self, user_id: &str) -> Result<QuizResult, QuizError> {
        let quiz = self
            .active
            .lock()
            .await
            .remove(user_id)
            .ok_or_else(|| QuizError::NotActive(user_id.to_string()))?;

        Ok(Self::score_attempt(user_id, quiz))
    }

    /// Discard the user's attempt without producing a result
    pub async fn cancel(&self, user_id: &str) -> bool {
        self.active.lock().await.remove(user_id).is_some()
    }

    /// Complete every attempt whose deadline has passed
    ///
    /// Driven once per second by the countdown ticker; expired attempts
    /// are scored with the answers accumulated so far, exactly as if the
    /// user had submitted.
    pub async fn expire_due(&self, now: DateTime<Utc>) -> Vec<QuizResult> {
        let mut active = self.active.lock().await;

        let due: Vec<String> = active
            .iter()
            .filter(|(_, quiz)| quiz.remaining_secs(now) == 0)
            .map(|(user_id, _)| user_id.clone())
            .collect();

        let mut results = Vec::with_capacity(due.len());
        for user_id in due {
            if let Some(quiz) = active.remove(&user_id) {
                tracing::info!("Quiz deadline reached for user {}, auto-completing", user_id);
                results.push(Self::score_attempt(&user_id, quiz));
            }
        }

        results
    }

    fn score_attempt(user_id: &str, quiz: ActiveQuiz) -> QuizResult {
        let mut rng = rand::thread_rng();

        let partner_answers: Vec<QuizAnswer> = quiz
            .questions
            .iter()
            .map(|question| QuizAnswer {
                question_id: question.id.clone(),
                answer: question
                    .options
                    .choose(&mut rng)
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect();

        let agreements = quiz
            .answers
            .iter()
            .filter(|user_answer| {
                partner_answers.iter().any(|partner_answer| {
                    partner_answer.question_id == user_answer.question_id
                        && partner_answer.answer == user_answer.answer
                })
            })
            .count();

        let total = quiz.questions.len().max(1);
        let match_percentage = ((agreements as f64 / total as f64) * 100.0).round() as u8;

        QuizResult {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            partner_id: quiz.partner_id,
            user_answers: quiz.answers,
            partner_answers,
            match_percentage,
            completed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::questions::default_question_pool;
    use std::collections::HashSet;

    /// Questions with a single option make the synthesized partner answer
    /// deterministic.
    fn single_option_pool(count: usize) -> Vec<QuizQuestion> {
        (0..count)
            .map(|i| QuizQuestion {
                id: format!("q{}", i),
                question: format!("Question {}", i),
                options: vec![format!("only-{}", i)],
            })
            .collect()
    }

    #[tokio::test]
    async fn test_start_draws_distinct_questions() {
        let engine = QuizEngine::with_default_pool(5, 180);

        let quiz = engine.start("user", "3").await.unwrap();

        assert_eq!(quiz.questions.len(), 5);
        let ids: HashSet<_> = quiz.questions.iter().map(|q| q.id.clone()).collect();
        assert_eq!(ids.len(), 5);
        assert_eq!(quiz.time_limit_secs, 180);
        assert_eq!(quiz.partner_id, "3");
    }

    #[tokio::test]
    async fn test_start_rejects_small_pool() {
        let engine = QuizEngine::new(single_option_pool(3), 5, 180);

        let err = engine.start("user", "3").await.unwrap_err();
        assert!(matches!(err, QuizError::PoolTooSmall { needed: 5, available: 3 }));
    }

    #[tokio::test]
    async fn test_start_replaces_in_progress_attempt() {
        let engine = QuizEngine::with_default_pool(5, 180);

        let first = engine.start("user", "3").await.unwrap();
        engine.answer("user", &first.questions[0].id, "whatever").await.unwrap();

        let second = engine.start("user", "7").await.unwrap();
        assert_ne!(first.id, second.id);

        let snapshot = engine.snapshot("user").await.unwrap();
        assert_eq!(snapshot.partner_id, "7");
        assert!(snapshot.answers.is_empty());
    }

    #[tokio::test]
    async fn test_all_agreements_score_hundred() {
        let engine = QuizEngine::new(single_option_pool(5), 5, 180);

        let quiz = engine.start("user", "3").await.unwrap();
        for question in &quiz.questions {
            engine.answer("user", &question.id, &question.options[0]).await.unwrap();
        }

        let result = engine.complete("user").await.unwrap();
        assert_eq!(result.match_percentage, 100);
        assert_eq!(result.user_answers.len(), 5);
        assert_eq!(result.partner_answers.len(), 5);
    }

    #[tokio::test]
    async fn test_no_agreements_score_zero() {
        let engine = QuizEngine::new(single_option_pool(5), 5, 180);

        let quiz = engine.start("user", "3").await.unwrap();
        for question in &quiz.questions {
            // Not an option, so the synthesized answer can never agree
            engine.answer("user", &question.id, "off the menu").await.unwrap();
        }

        let result = engine.complete("user").await.unwrap();
        assert_eq!(result.match_percentage, 0);
    }

    #[tokio::test]
    async fn test_partial_answers_are_allowed() {
        let engine = QuizEngine::new(single_option_pool(5), 5, 180);

        let quiz = engine.start("user", "3").await.unwrap();
        engine.answer("user", &quiz.questions[0].id, &quiz.questions[0].options[0]).await.unwrap();

        let result = engine.complete("user").await.unwrap();
        // One agreement out of five questions
        assert_eq!(result.match_percentage, 20);
        assert_eq!(result.user_answers.len(), 1);
        assert_eq!(result.partner_answers.len(), 5);
    }

    #[tokio::test]
    async fn test_complete_twice_is_not_active() {
        let engine = QuizEngine::with_default_pool(5, 180);

        engine.start("user", "3").await.unwrap();
        engine.complete("user").await.unwrap();

        let err = engine.complete("user").await.unwrap_err();
        assert!(matches!(err, QuizError::NotActive(_)));
    }

    #[tokio::test]
    async fn test_cancel_discards_without_result() {
        let engine = QuizEngine::with_default_pool(5, 180);

        let quiz = engine.start("user", "3").await.unwrap();
        engine.answer("user", &quiz.questions[0].id, &quiz.questions[0].options[0]).await.unwrap();

        assert!(engine.cancel("user").await);
        assert!(engine.snapshot("user").await.is_none());
        assert!(!engine.cancel("user").await);
        assert!(engine.complete("user").await.is_err());
    }

    #[tokio::test]
    async fn test_expire_due_completes_at_deadline() {
        let engine = QuizEngine::new(default_question_pool(), 5, 0);

        let quiz = engine.start("user", "3").await.unwrap();
        engine.answer("user", &quiz.questions[0].id, &quiz.questions[0].options[0]).await.unwrap();

        let results = engine.expire_due(Utc::now()).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].user_answers.len(), 1);
        assert!(engine.snapshot("user").await.is_none());

        // Idempotent once expired
        assert!(engine.expire_due(Utc::now()).await.is_empty());
    }

    #[tokio::test]
    async fn test_expire_due_leaves_running_attempts() {
        let engine = QuizEngine::with_default_pool(5, 180);

        engine.start("user", "3").await.unwrap();
        assert!(engine.expire_due(Utc::now()).await.is_empty());
        assert!(engine.snapshot("user").await.is_some());
    }

    #[tokio::test]
    async fn test_answer_to_unknown_question_never_agrees() {
        let engine = QuizEngine::new(single_option_pool(5), 5, 180);

        let quiz = engine.start("user", "3").await.unwrap();
        for question in &quiz.questions {
            engine.answer("user", &question.id, &question.options[0]).await.unwrap();
        }
        engine.answer("user", "not-a-question", "anything").await.unwrap();

        let result = engine.complete("user").await.unwrap();
        // The stray answer neither agrees nor inflates the denominator
        assert_eq!(result.match_percentage, 100);
        assert_eq!(result.user_answers.len(), 6);
    }
}
