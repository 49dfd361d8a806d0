use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    Conversation, ConversationsResponse, ErrorResponse, LastMessage, MarkReadRequest, Message,
    MessagesResponse, OpenConversationRequest, SendMessageRequest, SendMessageResponse,
    UnreadCountResponse,
};
use crate::routes::AppState;
use crate::services::StorageKey;

type MessageLog = HashMap<String, Vec<Message>>;

/// Unread messages for a reader: incoming and not yet read
fn unread_in(messages: &[Message], reader_id: &str) -> usize {
    messages
        .iter()
        .filter(|m| m.sender_id != reader_id && !m.read)
        .count()
}

/// Configure all messaging-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/messages")
            .route("/open", web::post().to(open_conversation))
            .route("/send", web::post().to(send_message))
            .route("/read", web::post().to(mark_read))
            .route("/unread", web::get().to(unread_count))
            .route("/{conversationId}", web::get().to(list_messages)),
    )
    .route("/conversations", web::get().to(list_conversations));
}

/// Open-conversation endpoint
///
/// POST /api/v1/messages/open
///
/// Returns the existing conversation with the participant, creating it
/// on first contact.
async fn open_conversation(
    state: web::Data<AppState>,
    req: web::Json<OpenConversationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let key = StorageKey::conversations(&req.user_id);
    let mut conversations: Vec<Conversation> = match state.storage.get_or_default(&key).await {
        Ok(conversations) => conversations,
        Err(e) => {
            tracing::error!("Failed to load conversations for {}: {}", req.user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Storage failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    if let Some(existing) = conversations
        .iter()
        .find(|c| c.involves(&req.user_id) && c.involves(&req.participant_id))
    {
        return HttpResponse::Ok().json(existing.clone());
    }

    let conversation = Conversation {
        id: Uuid::new_v4().to_string(),
        participants: vec![req.user_id.clone(), req.participant_id.clone()],
        last_message: None,
        created_at: chrono::Utc::now(),
    };

    conversations.push(conversation.clone());
    if let Err(e) = state.storage.set(&key, &conversations).await {
        tracing::error!("Failed to save conversations for {}: {}", req.user_id, e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Storage failure".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }

    tracing::info!(
        "Opened conversation {} between {} and {}",
        conversation.id,
        req.user_id,
        req.participant_id
    );

    HttpResponse::Ok().json(conversation)
}

/// Send endpoint
///
/// POST /api/v1/messages/send
async fn send_message(
    state: web::Data<AppState>,
    req: web::Json<SendMessageRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let content = req.content.trim();
    if content.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Empty message".to_string(),
            message: "Message content must not be empty".to_string(),
            status_code: 400,
        });
    }

    let conv_key = StorageKey::conversations(&req.user_id);
    let mut conversations: Vec<Conversation> =
        match state.storage.get_or_default(&conv_key).await {
            Ok(conversations) => conversations,
            Err(e) => {
                tracing::error!("Failed to load conversations for {}: {}", req.user_id, e);
                return HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Storage failure".to_string(),
                    message: e.to_string(),
                    status_code: 500,
                });
            }
        };

    let conversation = match conversations
        .iter_mut()
        .find(|c| c.id == req.conversation_id)
    {
        Some(conversation) => conversation,
        None => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Conversation not found".to_string(),
                message: format!("No conversation with id {}", req.conversation_id),
                status_code: 404,
            });
        }
    };

    let message = Message {
        id: Uuid::new_v4().to_string(),
        conversation_id: req.conversation_id.clone(),
        sender_id: req.user_id.clone(),
        content: content.to_string(),
        timestamp: chrono::Utc::now(),
        read: false,
    };

    conversation.last_message = Some(LastMessage {
        content: message.content.clone(),
        timestamp: message.timestamp,
        sender_id: message.sender_id.clone(),
    });

    let msg_key = StorageKey::messages(&req.user_id);
    let mut log: MessageLog = match state.storage.get_or_default(&msg_key).await {
        Ok(log) => log,
        Err(e) => {
            tracing::error!("Failed to load messages for {}: {}", req.user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Storage failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };
    log.entry(req.conversation_id.clone())
        .or_default()
        .push(message.clone());

    // Local writes are authoritative; failing either one fails the request
    if let Err(e) = state.storage.set(&msg_key, &log).await {
        tracing::error!("Failed to save messages for {}: {}", req.user_id, e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Storage failure".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }
    if let Err(e) = state.storage.set(&conv_key, &conversations).await {
        tracing::error!("Failed to save conversations for {}: {}", req.user_id, e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Storage failure".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }

    // Best-effort notification of the future backend
    if let Err(e) = state.api.send_message(&message).await {
        tracing::warn!("Backend send_message call failed: {}", e);
    }

    HttpResponse::Ok().json(SendMessageResponse {
        success: true,
        sent: message,
    })
}

/// Mark-read endpoint
///
/// POST /api/v1/messages/read
///
/// Marks every incoming message in the conversation as read; the
/// caller's own messages are untouched.
async fn mark_read(state: web::Data<AppState>, req: web::Json<MarkReadRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let msg_key = StorageKey::messages(&req.user_id);
    let mut log: MessageLog = match state.storage.get_or_default(&msg_key).await {
        Ok(log) => log,
        Err(e) => {
            tracing::error!("Failed to load messages for {}: {}", req.user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Storage failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let mut marked = 0usize;
    if let Some(messages) = log.get_mut(&req.conversation_id) {
        for message in messages.iter_mut() {
            if message.sender_id != req.user_id && !message.read {
                message.read = true;
                marked += 1;
            }
        }
    }

    if marked > 0 {
        if let Err(e) = state.storage.set(&msg_key, &log).await {
            tracing::error!("Failed to save messages for {}: {}", req.user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Storage failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    }

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "marked": marked,
    }))
}

/// Unread-count endpoint
///
/// GET /api/v1/messages/unread?userId={userId}[&conversationId={id}]
async fn unread_count(
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
    let conversation_id = query.get("conversationId");

    let log: MessageLog = match state
        .storage
        .get_or_default(&StorageKey::messages(user_id))
        .await
    {
        Ok(log) => log,
        Err(e) => {
            tracing::error!("Failed to load messages for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Storage failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let unread = match conversation_id {
        Some(id) => log.get(id).map(|m| unread_in(m, user_id)).unwrap_or(0),
        None => log.values().map(|m| unread_in(m, user_id)).sum(),
    };

    HttpResponse::Ok().json(UnreadCountResponse {
        conversation_id: conversation_id.cloned(),
        unread,
    })
}

/// Message listing endpoint
///
/// GET /api/v1/messages/{conversationId}?userId={userId}
async fn list_messages(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let conversation_id = path.into_inner();
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

    let log: MessageLog = match state
        .storage
        .get_or_default(&StorageKey::messages(user_id))
        .await
    {
        Ok(log) => log,
        Err(e) => {
            tracing::error!("Failed to load messages for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Storage failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let messages = log.get(&conversation_id).cloned().unwrap_or_default();
    let total = messages.len();

    HttpResponse::Ok().json(MessagesResponse { messages, total })
}

/// Conversation listing endpoint
///
/// GET /api/v1/conversations?userId={userId}
async fn list_conversations(
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
        .get_or_default::<Vec<Conversation>>(&StorageKey::conversations(user_id))
        .await
    {
        Ok(conversations) => {
            let total = conversations.len();
            HttpResponse::Ok().json(ConversationsResponse {
                conversations,
                total,
            })
        }
        Err(e) => {
            tracing::error!("Failed to load conversations for {}: {}", user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Storage failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn message(sender: &str, read: bool) -> Message {
        Message {
            id: uuid::Uuid::new_v4().to_string(),
            conversation_id: "c1".to_string(),
            sender_id: sender.to_string(),
            content: "hello".to_string(),
            timestamp: Utc::now(),
            read,
        }
    }

    #[test]
    fn test_unread_ignores_own_messages() {
        let messages = vec![
            message("me", false),
            message("them", false),
            message("them", false),
            message("them", true),
        ];

        assert_eq!(unread_in(&messages, "me"), 2);
        assert_eq!(unread_in(&messages, "them"), 1);
    }

    #[test]
    fn test_unread_empty_conversation() {
        assert_eq!(unread_in(&[], "me"), 0);
    }
}
