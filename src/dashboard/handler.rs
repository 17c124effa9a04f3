//! HTTP handlers for dashboard routes

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::DashboardError;
use crate::api::AppState;
use crate::drilldown::DetailState;
use crate::page::{ids, PageSnapshot};
use crate::render::html_escape;
use crate::status::DbTopology;
use crate::view::ViewState;

/// Embedded dashboard assets from dashboard/ directory
#[derive(RustEmbed)]
#[folder = "dashboard/"]
struct DashboardAssets;

const INITIAL_DATA_EMPTY: &str = r#"<script id="initial-data" type="application/json">{}</script>"#;

/// Body of `GET /details/{ip}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailsResponse {
    pub state: DetailState,
    /// Current overlay body markup
    pub html: String,
}

fn open_marker(id: &str) -> String {
    format!("<!--fragment:{}-->", id)
}

fn close_marker(id: &str) -> String {
    format!("<!--/fragment:{}-->", id)
}

/// Replace the default content between `<!--fragment:ID-->` and
/// `<!--/fragment:ID-->` with `content`. Markers stay so the result can be
/// injected again.
fn replace_fragment(template: &mut String, id: &str, content: &str) {
    let open = open_marker(id);
    let close = close_marker(id);
    let Some(start) = template.find(&open) else {
        return;
    };
    let body_start = start + open.len();
    let Some(len) = template[body_start..].find(&close) else {
        return;
    };
    template.replace_range(body_start..body_start + len, content);
}

/// Fill the template with the current page state.
///
/// Every container that has been rendered replaces its default content, and
/// the full snapshot is embedded as JSON for the page script to pick up
/// classes, panel visibility and overlay state.
pub fn render_page(template: &str, snapshot: &PageSnapshot) -> String {
    let mut html = template.to_string();

    for (id, markup) in &snapshot.html {
        replace_fragment(&mut html, id, markup);
    }
    for (id, text) in &snapshot.text {
        replace_fragment(&mut html, id, &html_escape(text));
    }

    // A literal `</script>` inside the JSON would end the script element early.
    let initial_data = serde_json::to_string(snapshot)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/");

    html.replace(
        INITIAL_DATA_EMPTY,
        &format!(
            r#"<script id="initial-data" type="application/json">{}</script>"#,
            initial_data
        ),
    )
}

fn template() -> Result<String, DashboardError> {
    let content = DashboardAssets::get("index.html")
        .ok_or_else(|| DashboardError::Template("index.html not embedded".to_string()))?;
    String::from_utf8(content.data.into_owned())
        .map_err(|_| DashboardError::Template("invalid HTML encoding".to_string()))
}

/// Serves the main dashboard HTML page with injected fragments
pub async fn dashboard_handler(State(state): State<Arc<AppState>>) -> Response {
    match template() {
        Ok(template) => Html(render_page(&template, &state.page.snapshot())).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /fragments - full page state for reconnecting browsers
pub async fn fragments_handler(State(state): State<Arc<AppState>>) -> Json<PageSnapshot> {
    Json(state.page.snapshot())
}

/// POST /view/{name} - unknown names keep the panels and set the fallback title
pub async fn view_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Json<ViewState> {
    Json(state.page.switch_view(&name))
}

/// POST /actions/check-db
pub async fn check_db_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DbTopology>, DashboardError> {
    Ok(Json(state.dbcheck.run().await?))
}

/// GET /details/{ip} - errors are rendered into the overlay, so this always answers 200
pub async fn details_handler(
    State(state): State<Arc<AppState>>,
    Path(ip): Path<String>,
) -> Json<DetailsResponse> {
    let detail_state = state.drilldown.show(&ip).await;
    Json(DetailsResponse {
        state: detail_state,
        html: state.page.html(ids::DETAIL_BODY).unwrap_or_default(),
    })
}

/// POST /details/close
pub async fn close_details_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    state.drilldown.close();
    StatusCode::NO_CONTENT
}

/// Serves static assets (CSS, JS, etc.)
pub async fn assets_handler(Path(path): Path<String>) -> Response {
    match DashboardAssets::get(&path) {
        Some(content) => {
            let body = content.data;
            let mime_type = mime_guess::from_path(&path).first_or_octet_stream();

            ([(header::CONTENT_TYPE, mime_type.as_ref())], body).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Asset not found").into_response(),
    }
}
