//! Playground API Server
//!
//! HTTP surface standing in for the app's screens: a navigation hub, the
//! map playground (POIs and viewport) and the backend connectivity test.

use crate::application::{ConnectivityProber, PoiService, ProbeError};
use crate::domain::error::PoiError;
use crate::domain::value_objects::{Coordinate, PoiCategory, Viewport};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

type ApiResponse = (StatusCode, Json<serde_json::Value>);

/// Custom POI request from the map view's form.
#[derive(Debug, Clone, Deserialize)]
pub struct AddPoiRequest {
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

fn default_category() -> String {
    PoiCategory::default().as_str().to_string()
}

/// One entry of the navigation hub.
#[derive(Debug, Serialize)]
pub struct ViewLink {
    pub name: String,
    pub path: String,
}

/// Navigation hub response.
#[derive(Debug, Serialize)]
pub struct HubResponse {
    pub title: String,
    pub views: Vec<ViewLink>,
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub total_pois: usize,
}

/// Connectivity view response.
#[derive(Debug, Serialize)]
pub struct ConnectivityResponse {
    pub state: String,
    pub probing: bool,
    pub log: Vec<String>,
}

/// API Server state.
#[derive(Clone)]
pub struct ApiState {
    pub pois: Arc<PoiService>,
    pub prober: Arc<ConnectivityProber>,
}

impl ApiState {
    pub fn new(pois: Arc<PoiService>, prober: Arc<ConnectivityProber>) -> Self {
        Self { pois, prober }
    }
}

/// API Server for the playground views.
pub struct ApiServer {
    listen_addr: String,
    state: ApiState,
}

impl ApiServer {
    pub fn new(listen_addr: String, state: ApiState) -> Self {
        Self { listen_addr, state }
    }

    /// Build the router with every route wired to the shared state.
    pub fn router(state: ApiState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/", get(hub_handler))
            .route(
                "/api/v1/pois",
                get(list_pois_handler)
                    .post(add_custom_handler)
                    .delete(clear_pois_handler),
            )
            .route("/api/v1/pois/seed", post(seed_handler))
            .route("/api/v1/pois/:id", get(get_poi_handler))
            .route("/api/v1/pois/random", post(add_random_handler))
            .route(
                "/api/v1/viewport",
                get(get_viewport_handler).put(set_viewport_handler),
            )
            .route("/api/v1/connectivity", get(connectivity_handler))
            .route("/api/v1/connectivity/probe", post(probe_handler))
            .with_state(state)
    }

    /// Run the API server until `shutdown` resolves.
    pub async fn run<F>(&self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = Self::router(self.state.clone()).layer(TraceLayer::new_for_http());

        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("playground API listening on {}", self.listen_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiResponse {
    (
        status,
        Json(serde_json::json!({ "error": message.into() })),
    )
}

fn poi_error_response(err: PoiError) -> ApiResponse {
    let status = match err {
        PoiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PoiError::DuplicateId(_) => StatusCode::CONFLICT,
    };
    error_response(status, err.to_string())
}

fn json_value<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}

// Handler functions

async fn health_handler(State(state): State<ApiState>) -> ApiResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        total_pois: state.pois.count().await,
    };
    (StatusCode::OK, Json(json_value(&response)))
}

async fn hub_handler() -> ApiResponse {
    let response = HubResponse {
        title: "POI Playground".to_string(),
        views: vec![
            ViewLink {
                name: "Test backend connectivity".to_string(),
                path: "/api/v1/connectivity".to_string(),
            },
            ViewLink {
                name: "Test map annotations".to_string(),
                path: "/api/v1/pois".to_string(),
            },
        ],
    };
    (StatusCode::OK, Json(json_value(&response)))
}

async fn list_pois_handler(State(state): State<ApiState>) -> ApiResponse {
    let pois = state.pois.list().await;
    let total = pois.len();
    (
        StatusCode::OK,
        Json(serde_json::json!({ "pois": pois, "total": total })),
    )
}

async fn get_poi_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse {
    match state.pois.get(&id).await {
        Some(poi) => (StatusCode::OK, Json(json_value(&poi))),
        None => error_response(StatusCode::NOT_FOUND, format!("POI {} not found", id)),
    }
}

async fn seed_handler(State(state): State<ApiState>) -> ApiResponse {
    match state.pois.seed_samples().await {
        Ok(added) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "added": added, "total": state.pois.count().await })),
        ),
        Err(e) => poi_error_response(e),
    }
}

async fn add_random_handler(State(state): State<ApiState>) -> ApiResponse {
    match state.pois.add_random_in_viewport().await {
        Ok(poi) => (StatusCode::CREATED, Json(json_value(&poi))),
        Err(e) => poi_error_response(e),
    }
}

async fn add_custom_handler(
    State(state): State<ApiState>,
    Json(req): Json<AddPoiRequest>,
) -> ApiResponse {
    let location = match (req.latitude, req.longitude) {
        (Some(lat), Some(lon)) => Coordinate::new(lat, lon),
        (None, None) => state.pois.viewport().center,
        _ => {
            return poi_error_response(PoiError::Validation(
                "latitude and longitude must be given together".to_string(),
            ))
        }
    };

    match state
        .pois
        .add_custom(&req.name, PoiCategory::parse(&req.category), location)
        .await
    {
        Ok(poi) => {
            tracing::info!("added POI {} ({})", poi.name, poi.id);
            (StatusCode::CREATED, Json(json_value(&poi)))
        }
        Err(e) => poi_error_response(e),
    }
}

async fn clear_pois_handler(State(state): State<ApiState>) -> ApiResponse {
    let removed = state.pois.clear().await;
    tracing::info!("cleared {} POIs", removed);
    (StatusCode::OK, Json(serde_json::json!({ "removed": removed })))
}

async fn get_viewport_handler(State(state): State<ApiState>) -> ApiResponse {
    (StatusCode::OK, Json(json_value(&state.pois.viewport())))
}

async fn set_viewport_handler(
    State(state): State<ApiState>,
    Json(viewport): Json<Viewport>,
) -> ApiResponse {
    match state.pois.set_viewport(viewport) {
        Ok(()) => (StatusCode::OK, Json(json_value(&viewport))),
        Err(e) => poi_error_response(e),
    }
}

async fn connectivity_handler(State(state): State<ApiState>) -> ApiResponse {
    let response = ConnectivityResponse {
        state: state.prober.state().to_string(),
        probing: state.prober.is_probing(),
        log: state.prober.log(),
    };
    (StatusCode::OK, Json(json_value(&response)))
}

async fn probe_handler(State(state): State<ApiState>) -> ApiResponse {
    // Spawned so a dropped request cannot cancel a probe halfway
    let prober = state.prober.clone();
    match tokio::spawn(async move { prober.probe().await }).await {
        Ok(Ok(report)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "verdict": report.verdict,
                "state": report.state,
                "log": state.prober.log(),
            })),
        ),
        Ok(Err(ProbeError::InFlight)) => {
            error_response(StatusCode::CONFLICT, ProbeError::InFlight.to_string())
        }
        Err(e) => {
            tracing::error!("probe task failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "probe task failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::InMemoryPoiRepository;
    use crate::application::{DEFAULT_JITTER_RADIUS, DEFAULT_PROBE_RESOURCE};
    use crate::domain::error::BackendError;
    use crate::domain::ports::BackendClient;
    use crate::domain::services::ErrorClassifier;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    struct MissingTableClient;

    #[async_trait]
    impl BackendClient for MissingTableClient {
        async fn select_all(&self, resource: &str) -> Result<serde_json::Value, BackendError> {
            Err(BackendError::Api {
                status: 404,
                code: "PGRST205".to_string(),
                message: format!(
                    "Could not find the table 'public.{}' in the schema cache",
                    resource
                ),
                details: None,
                hint: None,
            })
        }
    }

    fn create_test_state() -> ApiState {
        let pois = Arc::new(PoiService::new(
            Arc::new(InMemoryPoiRepository::new()),
            Viewport::default(),
            DEFAULT_JITTER_RADIUS,
        ));
        let prober = Arc::new(ConnectivityProber::new(
            Arc::new(MissingTableClient),
            ErrorClassifier::default(),
            DEFAULT_PROBE_RESOURCE,
        ));
        ApiState::new(pois, prober)
    }

    fn create_test_app() -> Router {
        ApiServer::router(create_test_state())
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = create_test_app()
            .oneshot(empty_request("GET", "/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["total_pois"], 0);
    }

    #[tokio::test]
    async fn test_hub_lists_views() {
        let response = create_test_app()
            .oneshot(empty_request("GET", "/"))
            .await
            .unwrap();
        let body = body_json(response).await;

        assert_eq!(body["views"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_seed_then_list() {
        let state = create_test_state();

        let response = ApiServer::router(state.clone())
            .oneshot(empty_request("POST", "/api/v1/pois/seed"))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::CREATED);

        let response = ApiServer::router(state)
            .oneshot(empty_request("GET", "/api/v1/pois"))
            .await
            .unwrap();
        let body = body_json(response).await;

        assert_eq!(body["total"], 3);
        assert_eq!(body["pois"][0]["name"], "General Hospital");
        assert_eq!(body["pois"][0]["category"], "hospital");
    }

    #[tokio::test]
    async fn test_get_poi_handler() {
        let state = create_test_state();
        let poi = state
            .pois
            .add_custom("Lands End", PoiCategory::Park, Coordinate::new(37.78, -122.51))
            .await
            .unwrap();

        let response = ApiServer::router(state.clone())
            .oneshot(empty_request("GET", &format!("/api/v1/pois/{}", poi.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(body_json(response).await["name"], "Lands End");

        let response = ApiServer::router(state)
            .oneshot(empty_request("GET", "/api/v1/pois/unknown-id"))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_add_random_handler() {
        let state = create_test_state();
        let response = ApiServer::router(state.clone())
            .oneshot(empty_request("POST", "/api/v1/pois/random"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::CREATED);
        let body = body_json(response).await;
        assert!(body["name"].as_str().unwrap().ends_with(" 1"));
        assert_eq!(state.pois.count().await, 1);
    }

    #[tokio::test]
    async fn test_add_custom_handler() {
        let state = create_test_state();
        let request = json_request(
            "POST",
            "/api/v1/pois",
            serde_json::json!({
                "name": "Dolores Park",
                "category": "park",
                "latitude": 37.7596,
                "longitude": -122.4269
            }),
        );

        let response = ApiServer::router(state.clone())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["name"], "Dolores Park");
        assert_eq!(body["category"], "park");
        assert_eq!(body["location"]["latitude"], 37.7596);
    }

    #[tokio::test]
    async fn test_add_custom_defaults_to_viewport_center() {
        let state = create_test_state();
        let request = json_request(
            "POST",
            "/api/v1/pois",
            serde_json::json!({ "name": "Here" }),
        );

        let response = ApiServer::router(state.clone())
            .oneshot(request)
            .await
            .unwrap();
        let body = body_json(response).await;

        assert_eq!(body["category"], "hospital");
        assert_eq!(body["location"]["latitude"], 37.7749);
        assert_eq!(body["location"]["longitude"], -122.4194);
    }

    #[tokio::test]
    async fn test_add_custom_empty_name_rejected() {
        let state = create_test_state();
        let request = json_request(
            "POST",
            "/api/v1/pois",
            serde_json::json!({ "name": "", "category": "park" }),
        );

        let response = ApiServer::router(state.clone())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(state.pois.count().await, 0);
    }

    #[tokio::test]
    async fn test_add_custom_half_coordinate_rejected() {
        let request = json_request(
            "POST",
            "/api/v1/pois",
            serde_json::json!({ "name": "x", "latitude": 1.0 }),
        );

        let response = create_test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_clear_handler() {
        let state = create_test_state();
        state.pois.seed_samples().await.unwrap();

        let response = ApiServer::router(state.clone())
            .oneshot(empty_request("DELETE", "/api/v1/pois"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(body_json(response).await["removed"], 3);
        assert_eq!(state.pois.count().await, 0);
    }

    #[tokio::test]
    async fn test_viewport_roundtrip() {
        let state = create_test_state();
        let request = json_request(
            "PUT",
            "/api/v1/viewport",
            serde_json::json!({
                "center": { "latitude": 51.5074, "longitude": -0.1278 },
                "span": { "latitude_delta": 0.1, "longitude_delta": 0.1 }
            }),
        );

        let response = ApiServer::router(state.clone())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = ApiServer::router(state)
            .oneshot(empty_request("GET", "/api/v1/viewport"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["center"]["latitude"], 51.5074);
    }

    #[tokio::test]
    async fn test_invalid_viewport_rejected() {
        let request = json_request(
            "PUT",
            "/api/v1/viewport",
            serde_json::json!({
                "center": { "latitude": 100.0, "longitude": 0.0 },
                "span": { "latitude_delta": 0.1, "longitude_delta": 0.1 }
            }),
        );

        let response = create_test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_connectivity_initial() {
        let response = create_test_app()
            .oneshot(empty_request("GET", "/api/v1/connectivity"))
            .await
            .unwrap();
        let body = body_json(response).await;

        assert_eq!(body["state"], "unknown");
        assert_eq!(body["probing"], false);
        assert_eq!(body["log"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_probe_handler_connected() {
        let state = create_test_state();
        let response = ApiServer::router(state.clone())
            .oneshot(empty_request("POST", "/api/v1/connectivity/probe"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["verdict"], "server_responded");
        assert_eq!(body["state"], "connected");

        let response = ApiServer::router(state)
            .oneshot(empty_request("GET", "/api/v1/connectivity"))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["state"], "connected");
    }
}
