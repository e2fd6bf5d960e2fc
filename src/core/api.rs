//! HTTP + WebSocket ingestion API
//!
//! Endpoints:
//! - POST /session/new - Create session (optional heart settings)
//! - GET /session/{id} - Get session status
//! - DELETE /session/{id} - End session (closes its WebSocket subscribers)
//! - POST /session/{id}/frame - Ingest one landmark frame
//! - POST /session/{id}/recalibrate - Restart calibration
//! - WS /ws/{id} - Live event records
//! - GET /health - Health check

use axum::{
    extract::{Path, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use crate::config::TrackerConfig;
use crate::core::status::IntervalGate;
use crate::core::tracker::Tracker;
use crate::types::{CalibrationPhase, EventRecord, LandmarkFrame, StatusSnapshot, TouchMode};

/// Session state
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub tracker: Tracker,
    /// Throttles broadcasts to the configured event rate
    pub event_gate: IntervalGate,
    pub update_tx: broadcast::Sender<EventRecord>,
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, Session>>,
    /// Settings new sessions start from
    pub base_config: TrackerConfig,
}

/// Create new session request
#[derive(Debug, Default, Deserialize)]
pub struct NewSessionRequest {
    pub heart_sensitivity: Option<f64>,
    pub heart_touch_either: Option<bool>,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub created_at: String,
    pub frames: u64,
    pub calibration: CalibrationPhase,
    pub dialog: String,
    pub status: StatusSnapshot,
}

/// Recalibration response
#[derive(Debug, Serialize)]
pub struct RecalibrateResponse {
    pub session_id: String,
    pub calibration: CalibrationPhase,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Create the API router
pub fn create_router(base_config: TrackerConfig) -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
        base_config,
    });

    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session).delete(delete_session))
        .route("/session/:id/frame", post(ingest_frame))
        .route("/session/:id/recalibrate", post(recalibrate))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Create new session
async fn create_session(
    State(state): State<Arc<AppState>>,
    body: Option<Json<NewSessionRequest>>,
) -> Result<Json<NewSessionResponse>, StatusCode> {
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let mut config = state.base_config.clone();
    if let Some(s) = req.heart_sensitivity {
        config.heart_sensitivity = s;
    }
    if let Some(either) = req.heart_touch_either {
        config.heart_touch = if either { TouchMode::Either } else { TouchMode::RequireBoth };
    }
    config.validate().map_err(|e| {
        warn!(error = %e, "Rejected session settings");
        StatusCode::BAD_REQUEST
    })?;

    let session_id = generate_session_id();
    let (tx, _) = broadcast::channel(100);
    let session = Session {
        id: session_id.clone(),
        created_at: Utc::now(),
        event_gate: IntervalGate::new(config.event_interval_ms()),
        tracker: Tracker::new(config),
        update_tx: tx,
    };

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), session);
    info!(session = %session_id, active = sessions.len(), "Session created");

    Ok(Json(NewSessionResponse {
        session_id: session_id.clone(),
        websocket_url: format!("/ws/{}", session_id),
    }))
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let tracker = &session.tracker;

    Ok(Json(SessionStatusResponse {
        session_id: id,
        created_at: session.created_at.to_rfc3339(),
        frames: tracker.frame_count(),
        calibration: tracker.calibration_phase(),
        dialog: tracker.dialog_line().text().to_string(),
        status: tracker.status_snapshot(),
    }))
}

/// End a session; dropping its sender closes any WebSocket subscribers
async fn delete_session(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> StatusCode {
    let mut sessions = state.sessions.write().await;
    match sessions.remove(&id) {
        Some(session) => {
            info!(
                session = %id,
                frames = session.tracker.frame_count(),
                active = sessions.len(),
                "Session ended"
            );
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

/// Ingest one frame; returns the event record for it
async fn ingest_frame(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(frame): Json<LandmarkFrame>,
) -> Result<Json<EventRecord>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    let output = session.tracker.update(&frame);
    let event = EventRecord::from(&output);

    // No subscribers is fine
    if session.event_gate.ready(output.timestamp_ms) {
        let _ = session.update_tx.send(event.clone());
    }

    Ok(Json(event))
}

/// Reset calibration for session
async fn recalibrate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RecalibrateResponse>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    session.tracker.recalibrate();

    Ok(Json(RecalibrateResponse {
        session_id: id,
        calibration: session.tracker.calibration_phase(),
    }))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let rx = session.update_tx.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx, id).await;
    }))
}

/// Forward event records until either side goes away
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<EventRecord>, id: String) {
    let (mut sender, mut receiver) = socket.split();
    debug!(session = %id, "WebSocket subscriber connected");

    loop {
        tokio::select! {
            update = rx.recv() => match update {
                Ok(event) => {
                    let json = match serde_json::to_string(&event) {
                        Ok(json) => json,
                        Err(e) => {
                            warn!(error = %e, "Failed to encode event");
                            continue;
                        }
                    };
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(session = %id, skipped, "WebSocket subscriber lagging");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => {}
            },
        }
    }

    debug!(session = %id, "WebSocket subscriber disconnected");
}

/// Generate session ID
fn generate_session_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("session_{:x}_{:x}", nanos as u64, seq)
}

/// Run the API server
pub async fn run_server(addr: &str, base_config: TrackerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(base_config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("FaceMotion API running on {}", addr);
    info!("  POST /session/new             - Create session");
    info!("  GET  /session/:id             - Get status");
    info!("  DELETE /session/:id           - End session");
    info!("  POST /session/:id/frame       - Ingest frame");
    info!("  POST /session/:id/recalibrate - Restart calibration");
    info!("  WS   /ws/:id                  - Live events");
    info!("  GET  /health                  - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
