use crate::models::QuizQuestion;

/// The fixed question pool the quiz draws from
pub fn default_question_pool() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion {
            id: "1".to_string(),
            question: "What is your ideal first date?".to_string(),
            options: vec![
                "Coffee shop conversation".to_string(),
                "Movie and dinner".to_string(),
                "Outdoor adventure".to_string(),
                "Museum or art gallery".to_string(),
            ],
        },
        QuizQuestion {
            id: "2".to_string(),
            question: "How do you prefer to communicate in a relationship?".to_string(),
            options: vec![
                "Frequent texting throughout the day".to_string(),
                "Phone calls".to_string(),
                "Face-to-face conversations".to_string(),
                "A mix of all communication methods".to_string(),
            ],
        },
        QuizQuestion {
            id: "3".to_string(),
            question: "What quality do you value most in a partner?".to_string(),
            options: vec![
                "Sense of humor".to_string(),
                "Intelligence".to_string(),
                "Kindness".to_string(),
                "Ambition".to_string(),
            ],
        },
        QuizQuestion {
            id: "4".to_string(),
            question: "How do you handle conflicts in a relationship?".to_string(),
            options: vec![
                "Address issues immediately".to_string(),
                "Take time to cool off, then discuss".to_string(),
                "Compromise and find middle ground".to_string(),
                "Seek outside advice or counseling".to_string(),
            ],
        },
        QuizQuestion {
            id: "5".to_string(),
            question: "What is your love language?".to_string(),
            options: vec![
                "Words of affirmation".to_string(),
                "Acts of service".to_string(),
                "Receiving gifts".to_string(),
                "Quality time".to_string(),
                "Physical touch".to_string(),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pool_has_unique_ids_and_options() {
        let pool = default_question_pool();
        assert!(pool.len() >= 5);

        let ids: HashSet<_> = pool.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), pool.len());

        for question in &pool {
            assert!(question.options.len() >= 2, "question {} needs options", question.id);
        }
    }
}
