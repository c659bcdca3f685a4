// src/api/handlers.rs

use actix_web::{web, HttpResponse};
use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::api::AppState;
use crate::error::ApiError;
use crate::models::{Snapshot, WidgetParams};
use crate::widget::{build_view, render_svg, WidgetSize};

#[derive(Debug, Deserialize)]
pub struct WidgetQuery {
    /// `"<netuid> | <uid>, ..."`; runs a fresh cycle instead of serving
    /// the cached snapshot.
    pub params: Option<String>,
    pub size: Option<String>,
}

async fn snapshot_for(state: &AppState, params: Option<&str>) -> Result<Option<Snapshot>, ApiError> {
    match params {
        Some(raw) => {
            let params = WidgetParams::parse(raw)?;
            debug!("Running on-demand cycle for {}", params);
            Ok(Some(state.cycle(&params).await))
        }
        None => Ok(state.latest()),
    }
}

pub async fn get_snapshot(
    data: web::Data<AppState>,
    query: web::Query<WidgetQuery>,
) -> Result<HttpResponse, ApiError> {
    let snapshot = snapshot_for(&data, query.params.as_deref())
        .await?
        .ok_or(ApiError::NotReady)?;
    Ok(HttpResponse::Ok().json(snapshot))
}

pub async fn get_widget(
    data: web::Data<AppState>,
    query: web::Query<WidgetQuery>,
) -> Result<HttpResponse, ApiError> {
    let size = match query.size.as_deref() {
        Some(raw) => raw.parse::<WidgetSize>()?,
        None => data.default_size,
    };
    let snapshot = snapshot_for(&data, query.params.as_deref()).await?;

    let view = build_view(snapshot.as_ref(), size);
    let svg = render_svg(&view)?;
    Ok(HttpResponse::Ok().content_type("image/svg+xml").body(svg))
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
