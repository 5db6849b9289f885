// src/delivery/api_server.rs
use crate::application::ports::output::transport_port::CardTransportPort;
use crate::config::Settings;
use crate::domain::services::action_router::ActionRouter;
use crate::domain::services::card_renderer::CardRenderer;
use crate::domain::services::card_update_publisher::CardUpdatePublisher;
use crate::domain::services::click_tracker::ClickTracker;
use crate::infrastructure::adapters::output::http_transport::{
    HttpCardTransport, SilentCardTransport,
};
use crate::infrastructure::repositories::memory_store::{
    MemoryDeliveryStore, MemoryNotificationStore, SeedData,
};
use actix_web::{web, App, HttpServer};
use log::info;
use std::sync::Arc;

pub struct AppState {
    pub router: Arc<ActionRouter>,
    pub tracker: Arc<ClickTracker>,
}

impl AppState {
    /// Wire the service graph over the given stores.
    pub fn build(
        settings: &Settings,
        notifications: Arc<MemoryNotificationStore>,
        deliveries: Arc<MemoryDeliveryStore>,
    ) -> Self {
        let tracker = Arc::new(ClickTracker::new(
            notifications.clone(),
            deliveries,
            settings.tracking.max_retries,
        ));
        let transport: Arc<dyn CardTransportPort> =
            match settings.transport.replace_url.clone() {
                Some(url) => Arc::new(HttpCardTransport::new(url)),
                None => Arc::new(SilentCardTransport),
            };
        let publisher = Arc::new(CardUpdatePublisher::new(CardRenderer::new(), transport));
        let router = Arc::new(ActionRouter::new(
            notifications,
            tracker.clone(),
            publisher,
        ));
        Self { router, tracker }
    }
}

pub async fn run_server(settings: Settings) -> std::io::Result<()> {
    let notifications = Arc::new(MemoryNotificationStore::new());
    let deliveries = Arc::new(MemoryDeliveryStore::new());

    if let Some(path) = settings.seed.path.as_deref() {
        match SeedData::load_from_file(path) {
            Ok(seed) => {
                info!(
                    "seeding {} notifications and {} deliveries from {}",
                    seed.notifications.len(),
                    seed.deliveries.len(),
                    path
                );
                seed.apply(&notifications, &deliveries);
            }
            Err(e) => {
                eprintln!("Failed to load seed file {}: {}", path, e);
                std::process::exit(1);
            }
        }
    }

    let state = web::Data::new(AppState::build(&settings, notifications, deliveries));
    let server_settings = settings.server.clone();

    info!(
        "listening on {}:{}",
        server_settings.host, server_settings.port
    );
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(crate::delivery::router::configure)
    })
    .bind(format!("{}:{}", server_settings.host, server_settings.port))?
    .run()
    .await
}
