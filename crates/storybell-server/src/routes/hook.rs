//! Webhook Route
//!
//! The single inbound endpoint: Clubhouse POSTs an event here, the relay
//! answers with the formatted chat message. The webhook contract is that
//! the caller always receives a well-formed message object; only a bad
//! signature is rejected outright.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::IntoParams;

use storybell::domain::entities::{OutgoingMessage, WebhookEvent};
use storybell::ports::ChatIntegration;

use crate::signature;
use crate::AppState;

const SIGNATURE_HEADER: &str = "clubhouse-signature";

#[derive(Debug, Deserialize, IntoParams)]
pub struct HookQuery {
    /// Chat channel to post into, without the leading `#`
    pub channel: Option<String>,
}

/// Receive a Clubhouse webhook and answer with the chat message
#[utoipa::path(
    post,
    path = "/hooks/clubhouse",
    params(HookQuery),
    request_body = WebhookEvent,
    responses(
        (status = 200, description = "Formatted chat message", body = OutgoingMessage),
        (status = 401, description = "Invalid webhook signature")
    ),
    tag = "Hook"
)]
pub async fn receive_hook(
    State(state): State<AppState>,
    Query(query): Query<HookQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<OutgoingMessage>, (StatusCode, String)> {
    if let Some(secret) = &state.signing_secret {
        let provided = headers
            .get(SIGNATURE_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if !signature::verify(secret, &body, provided) {
            warn!("rejecting webhook with a bad signature");
            return Err((
                StatusCode::UNAUTHORIZED,
                "Invalid webhook signature".to_string(),
            ));
        }
    }

    let message = match serde_json::from_slice::<WebhookEvent>(&body) {
        Ok(event) => {
            info!(
                actions = event.actions.len(),
                channel = query.channel.as_deref().unwrap_or("<none>"),
                "received webhook event"
            );
            state.formatter.process(&event, query.channel.as_deref())
        }
        Err(e) => {
            warn!(error = %e, "webhook payload did not parse");
            OutgoingMessage::parse_failure(&e)
        }
    };

    // Direct delivery is best effort; the webhook caller still gets the
    // message body even when Rocket.Chat is unreachable.
    if let Some(integration) = &state.integration {
        if let Err(e) = integration.post_message(&message).await {
            error!(error = %e, "failed to forward message to Rocket.Chat");
        }
    }

    Ok(Json(message))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/hooks/clubhouse", post(receive_hook))
}
