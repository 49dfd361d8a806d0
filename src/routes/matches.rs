use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::core::compatibility::{compatibility_score, simulate_mutual_interest};
use crate::models::{
    DecideMatchRequest, ErrorResponse, LikeProfileRequest, LikeResponse, Match, MatchStatus,
    MatchesResponse, User,
};
use crate::routes::AppState;
use crate::services::StorageKey;

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/matches")
            .route("", web::get().to(list_matches))
            .route("/like", web::post().to(like_profile))
            .route("/decide", web::post().to(decide_match)),
    );
}

async fn load_user(state: &AppState, user_id: &str) -> Option<User> {
    let users: Vec<User> = state
        .storage
        .get_or_default(&StorageKey::users())
        .await
        .unwrap_or_default();
    users.into_iter().find(|u| u.id == user_id)
}

/// Like endpoint
///
/// POST /api/v1/matches/like
///
/// Creates the match for this (user, profile) pair, computing the
/// compatibility score and simulating the other side's decision. Liking
/// the same profile again returns the existing match untouched.
async fn like_profile(
    state: web::Data<AppState>,
    req: web::Json<LikeProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user = match load_user(&state, &req.user_id).await {
        Some(user) => user,
        None => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "User not found".to_string(),
                message: format!("No user with id {}", req.user_id),
                status_code: 404,
            });
        }
    };

    let profile = match state.directory.get(req.profile_id) {
        Some(profile) => profile.clone(),
        None => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Profile not found".to_string(),
                message: format!("No profile with id {}", req.profile_id),
                status_code: 404,
            });
        }
    };

    let key = StorageKey::matches(&req.user_id);
    let mut matches: Vec<Match> = match state.storage.get_or_default(&key).await {
        Ok(matches) => matches,
        Err(e) => {
            tracing::error!("Failed to load matches for {}: {}", req.user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Storage failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // At most one match per (user, profile) pair
    if let Some(existing) = matches.iter().find(|m| m.profile_id == req.profile_id) {
        return HttpResponse::Ok().json(LikeResponse {
            success: true,
            created: existing.clone(),
            already_liked: true,
            notification: None,
        });
    }

    let same_college = user
        .college
        .as_deref()
        .is_some_and(|c| !c.is_empty() && c == profile.college);
    let compatibility = compatibility_score(
        &user.interests,
        &profile.interests,
        same_college,
        &state.compatibility,
    );

    // The other side doesn't exist yet, so its interest is a coin flip
    let is_mutual = simulate_mutual_interest(
        &mut rand::thread_rng(),
        state.compatibility.mutual_probability,
    );

    let created = Match {
        id: Uuid::new_v4().to_string(),
        user_id: req.user_id.clone(),
        profile_id: req.profile_id,
        matched_at: chrono::Utc::now(),
        compatibility,
        status: MatchStatus::Pending,
        is_mutual,
        last_message: None,
    };

    matches.push(created.clone());
    if let Err(e) = state.storage.set(&key, &matches).await {
        tracing::error!("Failed to save matches for {}: {}", req.user_id, e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Storage failure".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }

    let notification = if is_mutual {
        Some(format!(
            "It's a match! You and {} liked each other. Start chatting now!",
            profile.name
        ))
    } else if compatibility >= state.compatibility.high_threshold {
        Some(format!(
            "High compatibility match! Start chatting with {}!",
            profile.name
        ))
    } else {
        None
    };

    tracing::info!(
        "User {} liked profile {} (compatibility: {}, mutual: {})",
        req.user_id,
        req.profile_id,
        compatibility,
        is_mutual
    );

    HttpResponse::Ok().json(LikeResponse {
        success: true,
        created,
        already_liked: false,
        notification,
    })
}

/// Decision endpoint
///
/// POST /api/v1/matches/decide
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "matchId": "string",
///   "decision": "accepted|rejected"
/// }
/// ```
async fn decide_match(
    state: web::Data<AppState>,
    req: web::Json<DecideMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let status = match req.decision.to_lowercase().as_str() {
        "accepted" => MatchStatus::Accepted,
        "rejected" => MatchStatus::Rejected,
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid decision".to_string(),
                message: "Decision must be one of: accepted, rejected".to_string(),
                status_code: 400,
            });
        }
    };

    let key = StorageKey::matches(&req.user_id);
    let mut matches: Vec<Match> = match state.storage.get_or_default(&key).await {
        Ok(matches) => matches,
        Err(e) => {
            tracing::error!("Failed to load matches for {}: {}", req.user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Storage failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let updated = match matches.iter_mut().find(|m| m.id == req.match_id) {
        Some(entry) => {
            entry.status = status;
            entry.clone()
        }
        None => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Match not found".to_string(),
                message: format!("No match with id {}", req.match_id),
                status_code: 404,
            });
        }
    };

    if let Err(e) = state.storage.set(&key, &matches).await {
        tracing::error!("Failed to save matches for {}: {}", req.user_id, e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Storage failure".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }

    tracing::info!("Match {} for user {} is now {:?}", req.match_id, req.user_id, status);

    HttpResponse::Ok().json(updated)
}

/// Match listing endpoint
///
/// GET /api/v1/matches?userId={userId}&status={pending|accepted|rejected}
async fn list_matches(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let user_id = match query.get("userId") {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing userId parameter".to_string(),
                message: "userId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    let status_filter = match query.get("status").map(|s| s.to_lowercase()) {
        Some(s) if s == "pending" => Some(MatchStatus::Pending),
        Some(s) if s == "accepted" => Some(MatchStatus::Accepted),
        Some(s) if s == "rejected" => Some(MatchStatus::Rejected),
        Some(other) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid status".to_string(),
                message: format!("Unknown match status: {}", other),
                status_code: 400,
            });
        }
        None => None,
    };

    let matches: Vec<Match> = match state
        .storage
        .get_or_default(&StorageKey::matches(user_id))
        .await
    {
        Ok(matches) => matches,
        Err(e) => {
            tracing::error!("Failed to load matches for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Storage failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let filtered: Vec<Match> = match status_filter {
        Some(status) => matches.into_iter().filter(|m| m.status == status).collect(),
        None => matches,
    };

    let total = filtered.len();
    HttpResponse::Ok().json(MatchesResponse {
        matches: filtered,
        total,
    })
}
