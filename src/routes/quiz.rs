use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;
use validator::Validate;

use crate::core::quiz::QuizError;
use crate::models::{
    AnswerQuestionRequest, ErrorResponse, QuizActionRequest, QuizCompleteResponse, QuizResult,
    QuizResultsResponse, QuizStatusResponse, StartQuizRequest,
};
use crate::routes::AppState;
use crate::services::{Storage, StorageError, StorageKey};

/// Configure all quiz-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/quiz")
            .route("/questions", web::get().to(question_pool))
            .route("/start", web::post().to(start_quiz))
            .route("/answer", web::post().to(answer_question))
            .route("/active", web::get().to(quiz_status))
            .route("/complete", web::post().to(complete_quiz))
            .route("/cancel", web::post().to(cancel_quiz))
            .route("/results", web::get().to(list_results))
            .route("/results/{id}", web::get().to(result_by_id)),
    );
}

/// Append a completed result to the user's append-only log
///
/// Shared with the countdown ticker, which persists auto-completed
/// attempts through the same path.
pub(crate) async fn append_result(
    storage: &Storage,
    result: &QuizResult,
) -> Result<(), StorageError> {
    let key = StorageKey::quiz_results(&result.user_id);
    let mut results: Vec<QuizResult> = storage.get_or_default(&key).await?;
    results.push(result.clone());
    storage.set(&key, &results).await
}

fn not_active_response(user_id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "No active quiz".to_string(),
        message: format!("No active quiz for user {}", user_id),
        status_code: 404,
    })
}

/// Quiz pool endpoint
///
/// GET /api/v1/quiz/questions
async fn question_pool(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.quiz.pool())
}

/// Start endpoint
///
/// POST /api/v1/quiz/start
async fn start_quiz(
    state: web::Data<AppState>,
    req: web::Json<StartQuizRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.quiz.start(&req.user_id, &req.partner_id).await {
        Ok(quiz) => {
            tracing::info!(
                "User {} started quiz {} against partner {}",
                req.user_id,
                quiz.id,
                req.partner_id
            );
            let time_remaining = quiz.remaining_secs(chrono::Utc::now());
            HttpResponse::Ok().json(QuizStatusResponse {
                active: Some(quiz),
                time_remaining,
            })
        }
        Err(e) => {
            tracing::error!("Quiz start failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Quiz unavailable".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Answer endpoint
///
/// POST /api/v1/quiz/answer
async fn answer_question(
    state: web::Data<AppState>,
    req: web::Json<AnswerQuestionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state
        .quiz
        .answer(&req.user_id, &req.question_id, &req.answer)
        .await
    {
        Ok(quiz) => {
            let time_remaining = quiz.remaining_secs(chrono::Utc::now());
            HttpResponse::Ok().json(QuizStatusResponse {
                active: Some(quiz),
                time_remaining,
            })
        }
        Err(QuizError::NotActive(_)) => not_active_response(&req.user_id),
        Err(e) => HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Quiz answer failed".to_string(),
            message: e.to_string(),
            status_code: 500,
        }),
    }
}

/// Status endpoint
///
/// GET /api/v1/quiz/active?userId={userId}
async fn quiz_status(
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

    let active = state.quiz.snapshot(user_id).await;
    let time_remaining = active
        .as_ref()
        .map(|q| q.remaining_secs(chrono::Utc::now()))
        .unwrap_or(0);

    HttpResponse::Ok().json(QuizStatusResponse {
        active,
        time_remaining,
    })
}

/// Completion endpoint
///
/// POST /api/v1/quiz/complete
///
/// Permissive about unanswered questions; they simply never agree with
/// the synthesized partner answers. If the countdown already completed
/// the attempt this returns 404, the result having been recorded by the
/// ticker.
async fn complete_quiz(
    state: web::Data<AppState>,
    req: web::Json<QuizActionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let result = match state.quiz.complete(&req.user_id).await {
        Ok(result) => result,
        Err(QuizError::NotActive(_)) => return not_active_response(&req.user_id),
        Err(e) => {
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Quiz completion failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    if let Err(e) = append_result(&state.storage, &result).await {
        tracing::error!("Failed to persist quiz result for {}: {}", req.user_id, e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Storage failure".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }

    tracing::info!(
        "User {} completed quiz against {} with {}% match",
        req.user_id,
        result.partner_id,
        result.match_percentage
    );

    HttpResponse::Ok().json(QuizCompleteResponse {
        success: true,
        result,
    })
}

/// Cancellation endpoint
///
/// POST /api/v1/quiz/cancel
async fn cancel_quiz(
    state: web::Data<AppState>,
    req: web::Json<QuizActionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let cancelled = state.quiz.cancel(&req.user_id).await;
    if cancelled {
        tracing::info!("User {} cancelled their quiz", req.user_id);
    }

    HttpResponse::Ok().json(serde_json::json!({
        "success": cancelled,
    }))
}

/// Results listing endpoint
///
/// GET /api/v1/quiz/results?userId={userId}
async fn list_results(
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

    match state
        .storage
        .get_or_default::<Vec<QuizResult>>(&StorageKey::quiz_results(user_id))
        .await
    {
        Ok(results) => {
            let total = results.len();
            HttpResponse::Ok().json(QuizResultsResponse { results, total })
        }
        Err(e) => {
            tracing::error!("Failed to load quiz results for {}: {}", user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Storage failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Single result endpoint
///
/// GET /api/v1/quiz/results/{id}?userId={userId}
async fn result_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let result_id = path.into_inner();
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

    let results: Vec<QuizResult> = match state
        .storage
        .get_or_default(&StorageKey::quiz_results(user_id))
        .await
    {
        Ok(results) => results,
        Err(e) => {
            tracing::error!("Failed to load quiz results for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Storage failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    match results.into_iter().find(|r| r.id == result_id) {
        Some(result) => HttpResponse::Ok().json(result),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "Quiz result not found".to_string(),
            message: format!("No quiz result with id {}", result_id),
            status_code: 404,
        }),
    }
}
