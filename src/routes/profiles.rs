use actix_web::{web, HttpResponse, Responder};

use crate::core::compatibility::{compatibility_score, shared_interests};
use crate::models::{
    DiscoverQuery, DiscoverResponse, ErrorResponse, FilterOptionsResponse, Profile, ScoredProfile,
    User,
};
use crate::routes::AppState;
use crate::services::{DiscoverFilter, StorageKey};

/// Configure all profile-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profiles")
            .route("", web::get().to(discover))
            .route("/filters", web::get().to(filter_options))
            .route("/{id}", web::get().to(profile_by_id)),
    );
}

fn score_for(profile: &Profile, user: &User, state: &AppState) -> (u8, Vec<String>) {
    let same_college = user
        .college
        .as_deref()
        .is_some_and(|c| !c.is_empty() && c == profile.college);
    let score = compatibility_score(
        &user.interests,
        &profile.interests,
        same_college,
        &state.compatibility,
    );
    (score, shared_interests(&user.interests, &profile.interests))
}

/// Discover endpoint
///
/// GET /api/v1/profiles?search=&college=&minAge=&maxAge=&interests=&userId=
///
/// With a resolvable userId the listing is ordered by compatibility,
/// highest first, and each entry carries the caller's score.
async fn discover(
    state: web::Data<AppState>,
    query: web::Query<DiscoverQuery>,
) -> impl Responder {
    let filter = DiscoverFilter {
        search: query.search.clone(),
        college: query.college.clone(),
        min_age: query.min_age,
        max_age: query.max_age,
        interests: query.interest_list(),
    };

    let mut results = state.directory.discover(&filter);

    // Resolve the caller for compatibility ordering, if requested
    let user = match &query.user_id {
        Some(user_id) => {
            let users: Vec<User> = state
                .storage
                .get_or_default(&StorageKey::users())
                .await
                .unwrap_or_default();
            users.into_iter().find(|u| &u.id == user_id)
        }
        None => None,
    };

    if let Some(user) = &user {
        results = state.directory.rank_by_compatibility(
            results,
            &user.interests,
            user.college.as_deref(),
            &state.compatibility,
        );
    }

    let total = results.len();
    let profiles = results
        .into_iter()
        .map(|profile| {
            let (compatibility, shared) = match &user {
                Some(user) => {
                    let (score, shared) = score_for(&profile, user, &state);
                    (Some(score), shared)
                }
                None => (None, Vec::new()),
            };
            ScoredProfile {
                id: profile.id,
                name: profile.name,
                age: profile.age,
                college: profile.college,
                bio: profile.bio,
                interests: profile.interests,
                image: profile.image,
                location: profile.location,
                compatibility,
                shared_interests: shared,
            }
        })
        .collect();

    tracing::debug!("Discover returned {} profiles", total);

    HttpResponse::Ok().json(DiscoverResponse { profiles, total })
}

/// Filter options endpoint
///
/// GET /api/v1/profiles/filters
async fn filter_options(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(FilterOptionsResponse {
        colleges: state.directory.colleges(),
        interests: state.directory.interest_tags(),
    })
}

/// Single profile endpoint
///
/// GET /api/v1/profiles/{id}
async fn profile_by_id(state: web::Data<AppState>, path: web::Path<u32>) -> impl Responder {
    let id = path.into_inner();

    match state.directory.get(id) {
        Some(profile) => HttpResponse::Ok().json(profile),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "Profile not found".to_string(),
            message: format!("No profile with id {}", id),
            status_code: 404,
        }),
    }
}
