// src/main.rs

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::{error, info};
use tokio::time::MissedTickBehavior;

use tao_stats_widget::api::{get_snapshot, get_widget, health, refresh_once, AppState};
use tao_stats_widget::config::AppConfig;
use tao_stats_widget::utils::{HttpApi, TaoStatsApi};

fn invalid_config(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
}

#[actix_web::main]
async fn main() -> Result<(), std::io::Error> {
    // Initialize environment variables
    dotenv::dotenv().ok();

    // Initialize the logger
    env_logger::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(invalid_config(e));
        }
    };

    let api: Arc<dyn TaoStatsApi> = match HttpApi::new(&config.base_url, config.request_timeout) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return Err(invalid_config(e));
        }
    };

    let app_state = web::Data::new(AppState::new(
        api,
        config.params.clone(),
        config.size,
        config.refresh_interval,
    ));

    // Refresh loop: one cycle per interval, first one immediately
    let refresh_state = app_state.clone();
    let refresh_interval = config.refresh_interval;
    actix_web::rt::spawn(async move {
        info!(
            "Refresh loop started for {} every {}s",
            refresh_state.defaults,
            refresh_interval.as_secs()
        );
        let mut ticker = tokio::time::interval(refresh_interval);
        // A slow cycle pushes the next one back instead of bursting
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            refresh_once(&refresh_state).await;
        }
    });

    info!(
        "Serving widget on http://{}:{} (upstream {})",
        config.bind, config.port, config.base_url
    );

    HttpServer::new(move || {
        // Widget hosts fetch from another origin
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .app_data(app_state.clone())
            .route("/snapshot", web::get().to(get_snapshot))
            .route("/widget", web::get().to(get_widget))
            .route("/health", web::get().to(health))
    })
    .bind((config.bind.as_str(), config.port))?
    .run()
    .await
}
