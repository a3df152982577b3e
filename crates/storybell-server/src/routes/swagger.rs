//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use storybell::domain::entities::{
    Attachment, EventAction, MessageContent, OutgoingMessage, WebhookEvent,
};

#[derive(OpenApi)]
#[openapi(
    paths(super::hook::receive_hook),
    components(schemas(
        WebhookEvent,
        EventAction,
        OutgoingMessage,
        MessageContent,
        Attachment,
    )),
    tags(
        (name = "Hook", description = "Clubhouse webhook intake")
    ),
    info(
        title = "Storybell Relay API",
        description = "Receives Clubhouse webhook events and answers with formatted chat messages"
    )
)]
pub struct ApiDoc;
