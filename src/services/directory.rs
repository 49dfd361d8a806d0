use crate::core::compatibility::{compatibility_score, CompatibilityParams};
use crate::models::Profile;

/// Filters for the discover listing
#[derive(Debug, Clone, Default)]
pub struct DiscoverFilter {
    /// Case-insensitive free text matched against name, college and interests
    pub search: Option<String>,
    pub college: Option<String>,
    pub min_age: Option<u8>,
    pub max_age: Option<u8>,
    /// A profile matches if it has any of these interests
    pub interests: Vec<String>,
}

/// Read-only directory of candidate profiles
///
/// Candidates are a fixed seeded set until the remote backend serves real
/// ones; the directory layers lookup and discover filtering on top.
pub struct ProfileDirectory {
    profiles: Vec<Profile>,
}

impl ProfileDirectory {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    /// Directory seeded with the built-in candidate set
    pub fn seeded() -> Self {
        Self::new(seed_profiles())
    }

    pub fn all(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Unique colleges, sorted, for the filter dropdown
    pub fn colleges(&self) -> Vec<String> {
        let mut colleges: Vec<String> = self.profiles.iter().map(|p| p.college.clone()).collect();
        colleges.sort();
        colleges.dedup();
        colleges
    }

    /// Unique interest tags, sorted, for the filter chips
    pub fn interest_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .profiles
            .iter()
            .flat_map(|p| p.interests.iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// Apply discover filters; all provided criteria must hold
    pub fn discover(&self, filter: &DiscoverFilter) -> Vec<Profile> {
        let needle = filter.search.as_deref().map(str::to_lowercase);

        self.profiles
            .iter()
            .filter(|profile| {
                let matches_search = match &needle {
                    None => true,
                    Some(q) if q.is_empty() => true,
                    Some(q) => {
                        profile.name.to_lowercase().contains(q)
                            || profile.college.to_lowercase().contains(q)
                            || profile
                                .interests
                                .iter()
                                .any(|i| i.to_lowercase().contains(q))
                    }
                };

                let matches_college = filter
                    .college
                    .as_deref()
                    .map_or(true, |c| c.is_empty() || profile.college == c);

                let matches_min_age = filter.min_age.map_or(true, |min| profile.age >= min);
                let matches_max_age = filter.max_age.map_or(true, |max| profile.age <= max);

                let matches_interests = filter.interests.is_empty()
                    || filter
                        .interests
                        .iter()
                        .any(|i| profile.interests.contains(i));

                matches_search
                    && matches_college
                    && matches_min_age
                    && matches_max_age
                    && matches_interests
            })
            .cloned()
            .collect()
    }

    /// Order profiles by compatibility with the given user, descending
    pub fn rank_by_compatibility(
        &self,
        mut profiles: Vec<Profile>,
        user_interests: &[String],
        user_college: Option<&str>,
        params: &CompatibilityParams,
    ) -> Vec<Profile> {
        profiles.sort_by_key(|profile| {
            let same_college = user_college.is_some_and(|c| !c.is_empty() && c == profile.college);
            std::cmp::Reverse(compatibility_score(
                user_interests,
                &profile.interests,
                same_college,
                params,
            ))
        });
        profiles
    }
}

fn profile(
    id: u32,
    name: &str,
    age: u8,
    college: &str,
    bio: &str,
    interests: &[&str],
    image: &str,
    location: &str,
) -> Profile {
    Profile {
        id,
        name: name.to_string(),
        age,
        college: college.to_string(),
        bio: bio.to_string(),
        interests: interests.iter().map(|s| s.to_string()).collect(),
        image: image.to_string(),
        location: location.to_string(),
    }
}

/// The built-in candidate set
fn seed_profiles() -> Vec<Profile> {
    vec![
        profile(
            1,
            "Aanya Sharma",
            21,
            "IIT Indore",
            "Engineering student with a passion for AI and machine learning. Love hiking and exploring new cafes in the city.",
            &["Technology", "Hiking", "Coffee", "Photography"],
            "https://images.unsplash.com/photo-1494790108377-be9c29b29330?ixlib=rb-1.2.1&auto=format&fit=crop&w=634&q=80",
            "Vijay Nagar, Indore",
        ),
        profile(
            2,
            "Arjun Patel",
            22,
            "DAVV Indore",
            "Business student who loves playing guitar and basketball. Looking for someone to explore the city's music scene with.",
            &["Music", "Basketball", "Entrepreneurship", "Travel"],
            "https://images.unsplash.com/photo-1539571696357-5a69c17a67c6?ixlib=rb-1.2.1&auto=format&fit=crop&w=634&q=80",
            "New Palasia, Indore",
        ),
        profile(
            3,
            "Neha Gupta",
            20,
            "Medicaps University",
            "Computer Science student who loves coding and creating digital art. Always up for a good debate over coffee.",
            &["Coding", "Digital Art", "Debates", "Coffee"],
            "https://images.unsplash.com/photo-1529626455594-4ff0802cfb7e?ixlib=rb-1.2.1&auto=format&fit=crop&w=634&q=80",
            "Rau, Indore",
        ),
        profile(
            4,
            "Vikram Singh",
            23,
            "SGSITS Indore",
            "Mechanical engineering student with a love for classic literature and football. Looking for someone to share thoughts and adventures with.",
            &["Engineering", "Literature", "Football", "Cooking"],
            "https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?ixlib=rb-1.2.1&auto=format&fit=crop&w=634&q=80",
            "Scheme 54, Indore",
        ),
        profile(
            5,
            "Priya Malhotra",
            21,
            "IPS Academy",
            "Psychology student fascinated by human behavior. Love dancing, painting, and exploring street food.",
            &["Psychology", "Dance", "Art", "Food"],
            "https://images.unsplash.com/photo-1534751516642-a1af1ef26a56?ixlib=rb-1.2.1&auto=format&fit=crop&w=634&q=80",
            "Sapna Sangeeta, Indore",
        ),
        profile(
            6,
            "Rahul Verma",
            22,
            "Acropolis Institute",
            "Architecture student with a passion for sustainable design. Love photography and exploring hidden gems in the city.",
            &["Architecture", "Photography", "Sustainability", "Cycling"],
            "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?ixlib=rb-1.2.1&auto=format&fit=crop&w=634&q=80",
            "Bhawarkuan, Indore",
        ),
        profile(
            7,
            "Ananya Desai",
            20,
            "Symbiosis University",
            "Law student with a passion for social justice. Love reading, debating, and exploring new cuisines.",
            &["Law", "Reading", "Debates", "Cooking", "Travel"],
            "https://images.unsplash.com/photo-1531123897727-8f129e1688ce?ixlib=rb-1.2.1&auto=format&fit=crop&w=634&q=80",
            "Vijay Nagar, Indore",
        ),
        profile(
            8,
            "Rohan Kapoor",
            23,
            "IIT Indore",
            "PhD student researching renewable energy. Love hiking, playing chess, and discussing philosophy over coffee.",
            &["Science", "Hiking", "Chess", "Philosophy", "Coffee"],
            "https://images.unsplash.com/photo-1488161628813-04466f872be2?ixlib=rb-1.2.1&auto=format&fit=crop&w=634&q=80",
            "Simrol, Indore",
        ),
        profile(
            9,
            "Kavya Sharma",
            21,
            "DAVV Indore",
            "Literature student with a love for poetry and classical music. Looking for someone to share thoughts and experiences with.",
            &["Literature", "Poetry", "Music", "Art", "Philosophy"],
            "https://images.unsplash.com/photo-1524250502761-1ac6f2e30d43?ixlib=rb-1.2.1&auto=format&fit=crop&w=634&q=80",
            "Old Palasia, Indore",
        ),
        profile(
            10,
            "Aditya Joshi",
            22,
            "Medicaps University",
            "Computer Science student specializing in AI. Love coding, gaming, and exploring new technologies.",
            &["Technology", "Coding", "Gaming", "AI", "Robotics"],
            "https://images.unsplash.com/photo-1492562080023-ab3db95bfbce?ixlib=rb-1.2.1&auto=format&fit=crop&w=634&q=80",
            "Rau, Indore",
        ),
        profile(
            11,
            "Ishita Patel",
            20,
            "IPS Academy",
            "Fashion design student with a passion for sustainable fashion. Love sketching, photography, and exploring art galleries.",
            &["Fashion", "Design", "Art", "Photography", "Sustainability"],
            "https://images.unsplash.com/photo-1488426862026-3ee34a7d66df?ixlib=rb-1.2.1&auto=format&fit=crop&w=634&q=80",
            "Sapna Sangeeta, Indore",
        ),
        profile(
            12,
            "Varun Mehta",
            23,
            "SGSITS Indore",
            "Mechanical engineering student and fitness enthusiast. Love sports, cooking, and exploring new places.",
            &["Engineering", "Fitness", "Sports", "Cooking", "Travel"],
            "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?ixlib=rb-1.2.1&auto=format&fit=crop&w=634&q=80",
            "Scheme 54, Indore",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_directory_size() {
        let directory = ProfileDirectory::seeded();
        assert_eq!(directory.len(), 12);
        assert!(directory.get(1).is_some());
        assert!(directory.get(99).is_none());
    }

    #[test]
    fn test_discover_by_college() {
        let directory = ProfileDirectory::seeded();

        let filter = DiscoverFilter {
            college: Some("IIT Indore".to_string()),
            ..Default::default()
        };
        let results = directory.discover(&filter);

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|p| p.college == "IIT Indore"));
    }

    #[test]
    fn test_discover_search_matches_interests() {
        let directory = ProfileDirectory::seeded();

        let filter = DiscoverFilter {
            search: Some("coffee".to_string()),
            ..Default::default()
        };
        let results = directory.discover(&filter);

        assert!(!results.is_empty());
        assert!(results
            .iter()
            .all(|p| p.interests.iter().any(|i| i.to_lowercase().contains("coffee"))));
    }

    #[test]
    fn test_discover_age_range() {
        let directory = ProfileDirectory::seeded();

        let filter = DiscoverFilter {
            min_age: Some(22),
            max_age: Some(23),
            ..Default::default()
        };
        let results = directory.discover(&filter);

        assert!(!results.is_empty());
        assert!(results.iter().all(|p| p.age >= 22 && p.age <= 23));
    }

    #[test]
    fn test_discover_any_of_interests() {
        let directory = ProfileDirectory::seeded();

        let filter = DiscoverFilter {
            interests: vec!["Chess".to_string(), "Poetry".to_string()],
            ..Default::default()
        };
        let results = directory.discover(&filter);

        // Rohan (Chess) and Kavya (Poetry)
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_filter_options_are_unique_and_sorted() {
        let directory = ProfileDirectory::seeded();

        let colleges = directory.colleges();
        assert_eq!(colleges.len(), 7);
        assert!(colleges.windows(2).all(|w| w[0] < w[1]));

        let tags = directory.interest_tags();
        assert!(tags.contains(&"Coffee".to_string()));
        assert!(tags.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_rank_by_compatibility() {
        let directory = ProfileDirectory::seeded();
        let params = CompatibilityParams::default();

        let user_interests: Vec<String> =
            ["Technology", "Hiking", "Coffee"].iter().map(|s| s.to_string()).collect();

        let ranked = directory.rank_by_compatibility(
            directory.all().to_vec(),
            &user_interests,
            Some("IIT Indore"),
            &params,
        );

        // Aanya shares all three interests and the college
        assert_eq!(ranked[0].id, 1);

        let scores: Vec<u8> = ranked
            .iter()
            .map(|p| {
                compatibility_score(
                    &user_interests,
                    &p.interests,
                    p.college == "IIT Indore",
                    &params,
                )
            })
            .collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }
}
