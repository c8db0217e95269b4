use std::sync::Arc;

use crate::{config::Config, domain_events::LiveUpdateSink, events::EventBus};
use birthdays_core::birthdays::{BirthdayService, BirthdayServiceTrait};
use birthdays_storage_sqlite::{birthdays::BirthdayRepository, db};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub birthday_service: Arc<dyn BirthdayServiceTrait + Send + Sync>,
    pub event_bus: EventBus,
}

/// Installs the global subscriber. `log_format` is `json` or anything else for text.
pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::write_actor::spawn_writer(pool.as_ref().clone())?;

    let event_bus = EventBus::new(config.event_capacity);
    let event_sink = Arc::new(LiveUpdateSink::new(event_bus.clone()));

    let birthday_repository = Arc::new(BirthdayRepository::new(pool.clone(), writer));
    let birthday_service: Arc<dyn BirthdayServiceTrait + Send + Sync> =
        Arc::new(BirthdayService::new(birthday_repository, event_sink));

    Ok(Arc::new(AppState {
        birthday_service,
        event_bus,
    }))
}
