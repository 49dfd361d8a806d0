use rand::Rng;

/// Tunables for the compatibility engine
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityParams {
    /// Bonus added when both sides attend the same college
    pub college_bonus: u8,
    /// Score reported for users who haven't picked any interests yet.
    /// Long-standing behavior the rest of the app expects; do not replace
    /// with a computed value.
    pub empty_interests_default: u8,
    /// Probability that the simulated other side also likes the user
    pub mutual_probability: f64,
    /// Scores at or above this count as a high-compatibility match
    pub high_threshold: u8,
}

impl Default for CompatibilityParams {
    fn default() -> Self {
        Self {
            college_bonus: 10,
            empty_interests_default: 50,
            mutual_probability: 0.7,
            high_threshold: 80,
        }
    }
}

/// Interests the profile shares with the user, in profile order
pub fn shared_interests(user_interests: &[String], profile_interests: &[String]) -> Vec<String> {
    profile_interests
        .iter()
        .filter(|interest| user_interests.contains(interest))
        .cloned()
        .collect()
}

/// Calculate a compatibility score (0-100) between a user and a profile
///
/// Scoring formula:
/// base = round(100 * |shared interests| / max(|user interests|, 1)), capped at 100;
/// same college adds `college_bonus`, capped at 100.
pub fn compatibility_score(
    user_interests: &[String],
    profile_interests: &[String],
    same_college: bool,
    params: &CompatibilityParams,
) -> u8 {
    if user_interests.is_empty() {
        return params.empty_interests_default;
    }

    let shared = shared_interests(user_interests, profile_interests).len();
    let base = ((shared as f64 / user_interests.len().max(1) as f64) * 100.0).round() as u32;

    let mut score = base.min(100);
    if same_college {
        score = (score + params.college_bonus as u32).min(100);
    }

    score as u8
}

/// Simulate the other side's decision with a Bernoulli draw
///
/// Not persisted and not derived from stored state, so two calls for the
/// same pair can disagree.
pub fn simulate_mutual_interest<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.gen_bool(probability.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interests(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_score_from_shared_interests() {
        let params = CompatibilityParams::default();

        let user = interests(&["Music", "Art", "Coffee", "Travel"]);
        let profile = interests(&["Art", "Coffee"]);

        // 2 of 4 shared
        assert_eq!(compatibility_score(&user, &profile, false, &params), 50);
    }

    #[test]
    fn test_worked_example() {
        // {Music, Art, Coffee} vs {Art, Coffee, Travel}, same college:
        // round(200/3) = 67, +10 = 77
        let params = CompatibilityParams::default();

        let user = interests(&["Music", "Art", "Coffee"]);
        let profile = interests(&["Art", "Coffee", "Travel"]);

        assert_eq!(compatibility_score(&user, &profile, false, &params), 67);
        assert_eq!(compatibility_score(&user, &profile, true, &params), 77);
    }

    #[test]
    fn test_empty_user_interests_default() {
        let params = CompatibilityParams::default();
        let profile = interests(&["Art", "Coffee", "Travel"]);

        assert_eq!(compatibility_score(&[], &profile, false, &params), 50);
        assert_eq!(compatibility_score(&[], &profile, true, &params), 50);
        assert_eq!(compatibility_score(&[], &[], true, &params), 50);
    }

    #[test]
    fn test_college_bonus_is_capped() {
        let params = CompatibilityParams::default();

        let user = interests(&["Music", "Art"]);
        let profile = interests(&["Music", "Art"]);

        assert_eq!(compatibility_score(&user, &profile, false, &params), 100);
        assert_eq!(compatibility_score(&user, &profile, true, &params), 100);
    }

    #[test]
    fn test_bonus_adds_ten_below_cap() {
        let params = CompatibilityParams::default();

        for (user, profile) in [
            (interests(&["A", "B", "C", "D"]), interests(&["A"])),
            (interests(&["A", "B", "C"]), interests(&["A", "B"])),
            (interests(&["A", "B"]), interests(&["A"])),
        ] {
            let without = compatibility_score(&user, &profile, false, &params);
            let with = compatibility_score(&user, &profile, true, &params);
            assert_eq!(with, (without + 10).min(100));
        }
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let params = CompatibilityParams::default();

        let user = interests(&["Chess", "Hiking"]);
        let profile = interests(&["Dance", "Food"]);

        assert_eq!(compatibility_score(&user, &profile, false, &params), 0);
        assert_eq!(compatibility_score(&user, &profile, true, &params), 10);
    }

    #[test]
    fn test_shared_interests_keeps_profile_order() {
        let user = interests(&["Coffee", "Art", "Music"]);
        let profile = interests(&["Art", "Travel", "Coffee"]);

        assert_eq!(shared_interests(&user, &profile), interests(&["Art", "Coffee"]));
    }

    #[test]
    fn test_mutual_interest_follows_probability_extremes() {
        let mut rng = rand::thread_rng();

        assert!((0..100).all(|_| simulate_mutual_interest(&mut rng, 1.0)));
        assert!((0..100).all(|_| !simulate_mutual_interest(&mut rng, 0.0)));
    }
}
