use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use evalwatch_client::Endpoints;

/// Scripted behaviour of the mock evaluation backend
#[derive(Debug, Clone, Default)]
pub struct MockScript {
    /// Text frames pushed to every live channel client, in order
    pub frames: Vec<String>,
    /// Close the socket with this reason after the frames; `None` keeps it open
    pub close_reason: Option<String>,
    /// Body served by the results endpoint; `None` answers 500
    pub analysis: Option<Value>,
    /// Commands answered with 409 and a refusal body
    pub refused: Vec<String>,
}

#[derive(Debug, Default)]
struct MockState {
    script: MockScript,
    requests: Mutex<Vec<String>>,
    client_closed: Mutex<bool>,
}

impl MockState {
    fn record(&self, request: String) {
        self.requests.lock().unwrap().push(request);
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    state: Arc<MockState>,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn new(script: MockScript) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = Arc::new(MockState {
            script,
            ..MockState::default()
        });
        let app = Router::new()
            .route("/ws", get(ws_handler))
            .route("/api/evaluations/{command}", post(command_handler))
            .route("/api/analysis", get(analysis_handler))
            .with_state(Arc::clone(&state));

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            state,
            _shutdown: handle,
        }
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(
            &format!("http://{}", self.addr),
            &format!("ws://{}/ws", self.addr),
        )
        .unwrap()
    }

    /// Requests received so far, e.g. `"POST reset"` or `"GET analysis"`
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Wait until the live channel client has sent a Close frame.
    pub async fn wait_for_client_close(&self) -> bool {
        for _ in 0..100 {
            if *self.state.client_closed.lock().unwrap() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }
}

/// Endpoints on a port nothing listens on
pub fn unreachable_endpoints() -> Endpoints {
    Endpoints::new("http://127.0.0.1:9", "ws://127.0.0.1:9/ws").unwrap()
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<MockState>>) -> Response {
    ws.on_upgrade(move |socket| serve_socket(socket, state))
}

async fn serve_socket(mut socket: WebSocket, state: Arc<MockState>) {
    for frame in &state.script.frames {
        if socket.send(Message::Text(frame.clone().into())).await.is_err() {
            return;
        }
    }

    if let Some(reason) = &state.script.close_reason {
        let _ = socket
            .send(Message::Close(Some(CloseFrame {
                code: 1001,
                reason: reason.clone().into(),
            })))
            .await;
        return;
    }

    while let Some(Ok(msg)) = socket.recv().await {
        if let Message::Close(_) = msg {
            *state.client_closed.lock().unwrap() = true;
            return;
        }
    }
}

async fn command_handler(
    Path(command): Path<String>,
    State(state): State<Arc<MockState>>,
) -> Response {
    state.record(format!("POST {command}"));
    if state.script.refused.contains(&command) {
        let body = json!({ "status": format!("Cannot {command}: evaluation already running") });
        return (StatusCode::CONFLICT, Json(body)).into_response();
    }
    Json(json!({ "status": format!("Evaluation {command} accepted") })).into_response()
}

async fn analysis_handler(State(state): State<Arc<MockState>>) -> Response {
    state.record("GET analysis".to_string());
    match &state.script.analysis {
        Some(body) => Json(body.clone()).into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "analysis unavailable").into_response(),
    }
}
