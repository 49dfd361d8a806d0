use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    AuthResponse, ErrorResponse, LoginRequest, SignupRequest, UpdateProfileRequest, User,
};
use crate::routes::AppState;
use crate::services::StorageKey;

/// Configure all auth-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/session", web::get().to(current_session))
            .route("/profile", web::put().to(update_profile)),
    );
}

/// E-mail domains that mark an account as college-verified
fn is_college_email(email: &str) -> bool {
    match email.split('@').nth(1) {
        Some(domain) => {
            domain.contains("edu")
                || domain.contains("ac.in")
                || domain.contains("college")
                || domain.contains("university")
        }
        None => false,
    }
}

/// Signup endpoint
///
/// POST /api/v1/auth/signup
async fn signup(state: web::Data<AppState>, req: web::Json<SignupRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for signup request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Blank photo slots don't count towards the minimum
    let photos: Vec<String> = req
        .photos
        .iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    if photos.len() < 3 {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: "Please add at least three photos.".to_string(),
            status_code: 400,
        });
    }

    let mut users: Vec<User> = match state.storage.get_or_default(&StorageKey::users()).await {
        Ok(users) => users,
        Err(e) => {
            tracing::error!("Failed to load registered users: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Storage failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    if users.iter().any(|u| u.email == req.email) {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Email already registered".to_string(),
            message: "Email already registered. Please login.".to_string(),
            status_code: 400,
        });
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        name: req.name.clone(),
        email: req.email.clone(),
        password: req.password.clone(),
        age: Some(req.age),
        college: req.college.clone(),
        bio: req.bio.clone().unwrap_or_default(),
        interests: req.interests.clone(),
        location: req.location.clone().unwrap_or_else(|| "Indore".to_string()),
        gender: req
            .gender
            .clone()
            .unwrap_or_else(|| "Prefer not to say".to_string()),
        profile_image: photos.first().cloned(),
        additional_photos: photos.iter().skip(1).cloned().collect(),
        cover_image: None,
        created_at: chrono::Utc::now(),
        verified: is_college_email(&req.email),
    };

    users.push(user.clone());
    if let Err(e) = state.storage.set(&StorageKey::users(), &users).await {
        tracing::error!("Failed to save registered users: {}", e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Storage failure".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }
    if let Err(e) = state.storage.set(&StorageKey::current_user(), &user).await {
        tracing::warn!("Failed to persist session for {}: {}", user.id, e);
    }

    // Best-effort notification of the future backend
    if let Err(e) = state.api.register(&user).await {
        tracing::warn!("Backend register call failed: {}", e);
    }

    tracing::info!("Created account {} (verified: {})", user.id, user.verified);

    HttpResponse::Ok().json(AuthResponse {
        success: true,
        message: "Account created successfully!".to_string(),
        user: Some(user),
    })
}

/// Login endpoint
///
/// POST /api/v1/auth/login
async fn login(state: web::Data<AppState>, req: web::Json<LoginRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let users: Vec<User> = match state.storage.get_or_default(&StorageKey::users()).await {
        Ok(users) => users,
        Err(e) => {
            tracing::error!("Failed to load registered users: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Storage failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let user = match users.iter().find(|u| u.email == req.email) {
        Some(user) => user.clone(),
        None => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "User not found".to_string(),
                message: "User not found. Please sign up.".to_string(),
                status_code: 404,
            });
        }
    };

    // Plaintext comparison; real credential handling is the backend's job
    if user.password != req.password {
        return HttpResponse::Unauthorized().json(ErrorResponse {
            error: "Incorrect password".to_string(),
            message: "Incorrect password.".to_string(),
            status_code: 401,
        });
    }

    if let Err(e) = state.storage.set(&StorageKey::current_user(), &user).await {
        tracing::warn!("Failed to persist session for {}: {}", user.id, e);
    }

    if let Err(e) = state.api.login(&user.email).await {
        tracing::warn!("Backend login call failed: {}", e);
    }

    tracing::info!("User {} logged in", user.id);

    HttpResponse::Ok().json(AuthResponse {
        success: true,
        message: "Login successful!".to_string(),
        user: Some(user),
    })
}

/// Logout endpoint
///
/// POST /api/v1/auth/logout
async fn logout(state: web::Data<AppState>) -> impl Responder {
    let had_session = state.storage.remove(&StorageKey::current_user()).await;

    if let Err(e) = state.api.logout().await {
        tracing::warn!("Backend logout call failed: {}", e);
    }

    HttpResponse::Ok().json(AuthResponse {
        success: had_session,
        message: "Logged out successfully".to_string(),
        user: None,
    })
}

/// Current session endpoint
///
/// GET /api/v1/auth/session
async fn current_session(state: web::Data<AppState>) -> impl Responder {
    match state.storage.get::<User>(&StorageKey::current_user()).await {
        Ok(user) => HttpResponse::Ok().json(AuthResponse {
            success: true,
            message: "Session active".to_string(),
            user: Some(user),
        }),
        Err(e) => HttpResponse::NotFound().json(ErrorResponse {
            error: "No active session".to_string(),
            message: e.to_string(),
            status_code: 404,
        }),
    }
}

/// Profile update endpoint
///
/// PUT /api/v1/auth/profile
async fn update_profile(
    state: web::Data<AppState>,
    req: web::Json<UpdateProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let mut users: Vec<User> = match state.storage.get_or_default(&StorageKey::users()).await {
        Ok(users) => users,
        Err(e) => {
            tracing::error!("Failed to load registered users: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Storage failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let user = match users.iter_mut().find(|u| u.id == req.user_id) {
        Some(user) => user,
        None => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "User not found".to_string(),
                message: format!("No user with id {}", req.user_id),
                status_code: 404,
            });
        }
    };

    if let Some(name) = &req.name {
        user.name = name.clone();
    }
    if let Some(age) = req.age {
        user.age = Some(age);
    }
    if let Some(college) = &req.college {
        user.college = Some(college.clone());
    }
    if let Some(bio) = &req.bio {
        user.bio = bio.clone();
    }
    if let Some(interests) = &req.interests {
        user.interests = interests.clone();
    }
    if let Some(location) = &req.location {
        user.location = location.clone();
    }
    if let Some(gender) = &req.gender {
        user.gender = gender.clone();
    }
    if let Some(profile_image) = &req.profile_image {
        user.profile_image = Some(profile_image.clone());
    }
    if let Some(additional_photos) = &req.additional_photos {
        user.additional_photos = additional_photos.clone();
    }
    if let Some(cover_image) = &req.cover_image {
        user.cover_image = Some(cover_image.clone());
    }

    let updated = user.clone();

    if let Err(e) = state.storage.set(&StorageKey::users(), &users).await {
        tracing::error!("Failed to save registered users: {}", e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Storage failure".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }

    // Keep the session copy in sync when the signed-in user edits themselves
    if let Ok(current) = state.storage.get::<User>(&StorageKey::current_user()).await {
        if current.id == updated.id {
            if let Err(e) = state.storage.set(&StorageKey::current_user(), &updated).await {
                tracing::warn!("Failed to refresh session for {}: {}", updated.id, e);
            }
        }
    }

    HttpResponse::Ok().json(AuthResponse {
        success: true,
        message: "Profile updated successfully!".to_string(),
        user: Some(updated),
    })
}
