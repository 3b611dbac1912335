//! Messaging route handlers.
//!
//! Backs the messaging panel: conversation lists, message history, and
//! posting. Rendering is owned by the frontend; these handlers only serve
//! JSON scoped to the requesting user.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use hondumarket_core::{Conversation, ConversationId, Message, UserId};

use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Start conversation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartConversationRequest {
    /// The other participant, usually the product's seller.
    pub participant_id: UserId,
    /// Subject line, usually the product title.
    pub subject: String,
}

/// Post message request body.
#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub body: String,
}

/// List the current user's conversations, newest first.
#[instrument(skip(state))]
pub async fn list_conversations(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Conversation>>> {
    let conversations = state.store().conversations_for(&user)?;
    Ok(Json(conversations))
}

/// Start a conversation between the current user and another participant.
#[instrument(skip(state, request), fields(participant = %request.participant_id))]
pub async fn start_conversation(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<StartConversationRequest>,
) -> Result<Json<Conversation>> {
    if request.participant_id == user {
        return Err(AppError::BadRequest(
            "No puedes iniciar una conversación contigo mismo".to_string(),
        ));
    }

    let conversation = state
        .store()
        .start_conversation(vec![user, request.participant_id], request.subject)?;
    Ok(Json(conversation))
}

/// List the messages in a conversation the current user participates in.
#[instrument(skip(state))]
pub async fn list_messages(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(conversation_id): Path<ConversationId>,
) -> Result<Json<Vec<Message>>> {
    let conversation = state
        .store()
        .conversation(&conversation_id)?
        .ok_or_else(|| AppError::NotFound("Conversación no encontrada".to_string()))?;

    if !conversation.has_participant(&user) {
        return Err(AppError::Forbidden(
            "No participas en esta conversación".to_string(),
        ));
    }

    let messages = state.store().messages_in(&conversation_id)?;
    Ok(Json(messages))
}

/// Post a message to a conversation the current user participates in.
#[instrument(skip(state, request))]
pub async fn post_message(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(conversation_id): Path<ConversationId>,
    Json(request): Json<PostMessageRequest>,
) -> Result<Json<Message>> {
    let body = request.body.trim();
    if body.is_empty() {
        return Err(AppError::BadRequest(
            "El mensaje no puede estar vacío".to_string(),
        ));
    }

    let message = state
        .store()
        .append_message(&conversation_id, &user, body.to_string())?;
    Ok(Json(message))
}
