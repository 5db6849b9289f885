// src/delivery/router.rs
use crate::delivery::api_server::AppState;
use crate::domain::entities::interaction::InteractionPayload;
use crate::domain::services::action_router::RouteOutcome;
use crate::error::ServiceError;
use actix_web::{web, HttpResponse, Responder};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Transport frame around the interaction payload: the external transport
/// identifies the initiating recipient out-of-band from the card payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEnvelope {
    /// Identity of the initiating recipient.
    pub from: String,
    /// The interaction payload as delivered by the recipient's client.
    pub value: InteractionPayload,
}

async fn post_interaction(
    state: web::Data<AppState>,
    body: web::Json<InteractionEnvelope>,
) -> Result<HttpResponse, ServiceError> {
    match state.router.route(&body.value, &body.from).await? {
        RouteOutcome::Handled(response) => Ok(HttpResponse::Ok().json(response)),
        RouteOutcome::Rejected(reason) => {
            debug!("interaction rejected: {}", reason);
            Ok(HttpResponse::NoContent().finish())
        }
    }
}

async fn health(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "abandoned_aggregate_updates": state.tracker.abandoned_updates(),
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/interactions").route(web::post().to(post_interaction)))
        .service(web::resource("/health").route(web::get().to(health)));
}
