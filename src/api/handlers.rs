//! API request handlers
//!
//! The feed endpoints return their payloads bare (front-ends read
//! `success`/`data` straight off the body); the info endpoints use the
//! [`ApiResponse`] wrapper.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::server::{AppState, MenuLink};
use crate::error::FeedError;
use crate::types::{CatalogInfo, SnapshotFailure, SnapshotResponse, StatusStats};
use crate::view::ViewBody;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn get(path: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: "GET".to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Sheetfeed API Server".to_string(),
        version: state.version.clone(),
        description: "Live JSON feed of spreadsheet units".to_string(),
        endpoints: vec![
            EndpointInfo::get("/health", "Health check endpoint"),
            EndpointInfo::get("/version", "Get server version"),
            EndpointInfo::get(
                "/api/v1/snapshot",
                "Rows of a sheet as JSON (?location= or ?sheet=)",
            ),
            EndpointInfo::get("/api/v1/stats", "Unit counts per status (?location=)"),
            EndpointInfo::get("/api/v1/catalog", "Known locations and the default one"),
            EndpointInfo::get("/api/v1/menu", "Menu entries and their view links"),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec![
            "snapshot".to_string(),
            "stats".to_string(),
            "catalog".to_string(),
            "menu".to_string(),
        ],
    }))
}

/// Location selector; `sheet` is the legacy name and wins when both are given
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub location: Option<String>,
    pub sheet: Option<String>,
}

impl FeedQuery {
    pub fn selector(&self) -> Option<String> {
        self.sheet
            .iter()
            .chain(self.location.iter())
            .find(|s| !s.is_empty())
            .cloned()
    }
}

/// GET /api/v1/snapshot - Sheet rows as a snapshot envelope
///
/// Always 200; failures are reported in the body with `success: false`.
pub async fn snapshot(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeedQuery>,
) -> Json<SnapshotResponse> {
    let selector = query.selector();
    let exporter = Arc::clone(&state.exporter);

    let response = tokio::task::spawn_blocking(move || exporter.snapshot(selector.as_deref()))
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "snapshot task failed");
            SnapshotResponse::Failed(SnapshotFailure::new(e.to_string()))
        });
    Json(response)
}

/// GET /api/v1/stats - Unit counts per status
pub async fn stats(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeedQuery>,
) -> Json<StatusStats> {
    let selector = query.selector();
    let exporter = Arc::clone(&state.exporter);

    let stats = tokio::task::spawn_blocking(move || exporter.stats(selector.as_deref()))
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "stats task failed");
            StatusStats::default()
        });
    Json(stats)
}

/// GET /api/v1/catalog - Location list
pub async fn catalog(State(state): State<Arc<AppState>>) -> Json<CatalogInfo> {
    Json(state.exporter.catalog_info())
}

/// Menu response
#[derive(Serialize)]
pub struct MenuResponse {
    pub title: String,
    pub items: Vec<MenuLink>,
}

/// GET /api/v1/menu - Registered menu entries
pub async fn menu(State(state): State<Arc<AppState>>) -> Json<MenuResponse> {
    Json(MenuResponse {
        title: state.menu.title.clone(),
        items: state.menu_links.clone(),
    })
}

/// GET /ui/:slug - Open the view behind a menu entry
pub async fn open_view(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    let view_state = Arc::clone(&state);
    let view_slug = slug.clone();
    let rendered = tokio::task::spawn_blocking(move || {
        view_state
            .menu
            .invoke(&view_slug, view_state.views.as_ref())
    })
    .await
    .unwrap_or_else(|e| Err(FeedError::View(format!("view task failed: {}", e))));

    match rendered {
        Ok(view) => match view.body {
            ViewBody::Html(html) => Html(html).into_response(),
            ViewBody::Redirect(url) => Redirect::to(&url).into_response(),
        },
        Err(e) => {
            let status = match e {
                FeedError::ViewNotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            warn!(slug = %slug, error = %e, "view unavailable");
            (status, Json(ApiResponse::<()>::err(e.to_string()))).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== ApiResponse Tests ====================

    #[test]
    fn test_api_response_ok_creates_success_response() {
        let response: ApiResponse<String> = ApiResponse::ok("test data".to_string());

        assert!(response.success);
        assert_eq!(response.data, Some("test data".to_string()));
        assert!(response.error.is_none());
        // Verify UUID format (8-4-4-4-12)
        assert_eq!(response.request_id.len(), 36);
    }

    #[test]
    fn test_api_response_err_serializes_without_data() {
        let response: ApiResponse<String> = ApiResponse::err("error message");
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("\"data\""));
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"error\":\"error message\""));
    }

    #[test]
    fn test_api_response_request_id_is_unique() {
        let response1: ApiResponse<i32> = ApiResponse::ok(1);
        let response2: ApiResponse<i32> = ApiResponse::ok(2);

        assert_ne!(response1.request_id, response2.request_id);
    }

    // ==================== FeedQuery Tests ====================

    #[test]
    fn test_query_sheet_wins_over_location() {
        let query = FeedQuery {
            location: Some("Buford".to_string()),
            sheet: Some("Concord".to_string()),
        };
        assert_eq!(query.selector().as_deref(), Some("Concord"));
    }

    #[test]
    fn test_query_empty_values_are_absent() {
        let query = FeedQuery {
            location: Some("Buford".to_string()),
            sheet: Some(String::new()),
        };
        assert_eq!(query.selector().as_deref(), Some("Buford"));
        assert_eq!(FeedQuery::default().selector(), None);
    }

    // ==================== View Tests ====================

    fn view_state(dir: &std::path::Path) -> Arc<AppState> {
        use crate::catalog::LocationCatalog;
        use crate::core::SnapshotExporter;
        use crate::source::MemorySource;
        use crate::view::{FileViewHost, Menu};

        let exporter =
            SnapshotExporter::new(Arc::new(MemorySource::new()), LocationCatalog::storage_caves());
        Arc::new(AppState::new(
            exporter,
            Arc::new(FileViewHost::new(dir, None)),
            Menu::storage_caves(),
        ))
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_open_view_reads_file_off_the_runtime() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("mapSidebar.html"), "<p>caves</p>").unwrap();
        let state = view_state(dir.path());

        let response = open_view(
            State(Arc::clone(&state)),
            Path("open-large-dialog".to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<p>caves</p>");

        let missing = open_view(State(state), Path("open-nothing".to_string())).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_open_external_view_without_url_is_500() {
        let dir = tempfile::TempDir::new().unwrap();
        let response = open_view(
            State(view_state(dir.path())),
            Path("open-external-map".to_string()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_endpoint_info_serialize() {
        let info = EndpointInfo::get("/api/v1/stats", "Stats");
        let json = serde_json::to_string(&info).unwrap();

        assert!(json.contains("\"path\":\"/api/v1/stats\""));
        assert!(json.contains("\"method\":\"GET\""));
    }
}
