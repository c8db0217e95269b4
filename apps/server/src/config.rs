use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub request_timeout: Duration,
    pub event_capacity: usize,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: "./main.db".to_string(),
            request_timeout: Duration::from_millis(30_000),
            event_capacity: 256,
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Reads `BDAY_*` variables, after loading a `.env` file when one exists.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("BDAY_LISTEN_ADDR") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid BDAY_LISTEN_ADDR '{}'", raw))?,
            Err(_) => defaults.listen_addr,
        };
        let db_path = std::env::var("BDAY_DB_PATH").unwrap_or(defaults.db_path);
        let request_timeout = match std::env::var("BDAY_REQUEST_TIMEOUT_MS") {
            Ok(raw) => Duration::from_millis(
                raw.parse()
                    .with_context(|| format!("Invalid BDAY_REQUEST_TIMEOUT_MS '{}'", raw))?,
            ),
            Err(_) => defaults.request_timeout,
        };
        let event_capacity = match std::env::var("BDAY_EVENT_CAPACITY") {
            Ok(raw) => raw
                .parse()
                .ok()
                .filter(|capacity: &usize| *capacity > 0)
                .with_context(|| format!("Invalid BDAY_EVENT_CAPACITY '{}'", raw))?,
            Err(_) => defaults.event_capacity,
        };
        let log_format = std::env::var("BDAY_LOG_FORMAT").unwrap_or(defaults.log_format);

        Ok(Self {
            listen_addr,
            db_path,
            request_timeout,
            event_capacity,
            log_format,
        })
    }
}
