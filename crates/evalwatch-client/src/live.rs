//! Live channel client for the job-status event stream.
//!
//! [`LiveChannel::connect`] returns immediately with a handle and a receiver
//! of [`LiveEvent`]s. A background Tokio task owns the WebSocket, forwards
//! every text frame in arrival order, and reports transport lifecycle changes.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       LiveChannel                         │
//! │                                                           │
//! │  ┌────────────┐          ┌─────────────────────────────┐  │
//! │  │ Public API │          │ Background Task             │  │
//! │  │            │          │                             │  │
//! │  │  close() ──┼──cmd────▶│ WebSocket read loop         │  │
//! │  │            │   chan   │                             │  │
//! │  │  events  ◀─┼──evt────◀│ Text frame → LiveEvent      │  │
//! │  └────────────┘   chan   └─────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no automatic reconnection. A dropped connection is reported once
//! as [`LiveEvent::Closed`] and the task exits; a new session needs a fresh
//! [`LiveChannel::connect`].
//!
//! A close requested through [`LiveChannel::close`] emits no event. Whether a
//! caller-initiated close shows up in the event log is decided by the owner.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use evalwatch_core::ConnectionState;

/// Capacity of the event channel (bounded, frames can be bursty).
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Upper bound on waiting for the background task during [`LiveChannel::close`].
const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Transport-level events delivered to the owner of a [`LiveChannel`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveEvent {
    /// The WebSocket handshake completed
    Opened,
    /// One raw text frame, unparsed
    Frame(String),
    /// The server or the network ended an open connection
    Closed { reason: Option<String> },
    /// The connection could not be established
    Failed { error: String },
}

enum LiveCommand {
    Close,
}

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

// ---------------------------------------------------------------------------
// LiveChannel
// ---------------------------------------------------------------------------

/// Handle to exactly one live event-stream connection.
///
/// Dropping the handle stops the background task as well; [`close`] does the
/// same but waits until the socket has been released.
///
/// [`close`]: LiveChannel::close
pub struct LiveChannel {
    cmd_tx: mpsc::Sender<LiveCommand>,
    state: Arc<RwLock<ConnectionState>>,
    task: JoinHandle<()>,
}

impl std::fmt::Debug for LiveChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveChannel")
            .field("connection_state", &self.connection_state())
            .finish()
    }
}

impl LiveChannel {
    /// Start connecting to `url` without waiting for the handshake.
    ///
    /// Must be called from within a Tokio runtime. Connection failures are
    /// not returned: they surface as [`LiveEvent::Failed`] and the state
    /// moves to [`ConnectionState::Closed`].
    pub fn connect(
        url: impl Into<String>,
        connect_timeout: Duration,
    ) -> (Self, mpsc::Receiver<LiveEvent>) {
        let url = url.into();
        let (cmd_tx, cmd_rx) = mpsc::channel::<LiveCommand>(1);
        let (event_tx, event_rx) = mpsc::channel::<LiveEvent>(EVENT_CHANNEL_CAPACITY);
        let state = Arc::new(RwLock::new(ConnectionState::Connecting));

        info!("Connecting live channel to {}", url);
        let task = tokio::spawn(run_live_task(
            url,
            connect_timeout,
            cmd_rx,
            event_tx,
            Arc::clone(&state),
        ));

        (
            Self {
                cmd_tx,
                state,
                task,
            },
            event_rx,
        )
    }

    /// Return the current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        *self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Close the connection and wait for the socket to be released.
    ///
    /// Once this returns, the background task has exited and no further
    /// frames will be delivered.
    pub async fn close(self) {
        // The task may already be gone after a transport close.
        let _ = self.cmd_tx.send(LiveCommand::Close).await;

        let abort = self.task.abort_handle();
        match tokio::time::timeout(CLOSE_TIMEOUT, self.task).await {
            Ok(Ok(())) => debug!("Live channel task finished"),
            Ok(Err(e)) if e.is_cancelled() => {}
            Ok(Err(e)) => warn!("Live channel task panicked: {}", e),
            Err(_) => {
                warn!("Live channel close timed out, aborting task");
                abort.abort();
            }
        }
        set_state(&self.state, ConnectionState::Closed);
    }
}

// ---------------------------------------------------------------------------
// Background task
// ---------------------------------------------------------------------------

async fn run_live_task(
    url: String,
    connect_timeout: Duration,
    mut cmd_rx: mpsc::Receiver<LiveCommand>,
    event_tx: mpsc::Sender<LiveEvent>,
    state: Arc<RwLock<ConnectionState>>,
) {
    let connect = tokio::select! {
        result = tokio::time::timeout(connect_timeout, connect_async(url.as_str())) => result,
        // Close requested (or handle dropped) before the handshake finished
        _ = cmd_rx.recv() => {
            debug!("Live channel closed while connecting");
            set_state(&state, ConnectionState::Closed);
            return;
        }
    };

    let ws_stream = match connect {
        Ok(Ok((ws_stream, _response))) => ws_stream,
        Ok(Err(err)) => {
            warn!("Live channel: failed to connect to {}: {}", url, err);
            set_state(&state, ConnectionState::Closed);
            let _ = event_tx
                .send(LiveEvent::Failed {
                    error: err.to_string(),
                })
                .await;
            return;
        }
        Err(_) => {
            warn!("Live channel: connection to {} timed out", url);
            set_state(&state, ConnectionState::Closed);
            let _ = event_tx
                .send(LiveEvent::Failed {
                    error: format!("timed out after {}s", connect_timeout.as_secs()),
                })
                .await;
            return;
        }
    };

    info!("Live channel connected to {}", url);
    set_state(&state, ConnectionState::Open);
    if event_tx.send(LiveEvent::Opened).await.is_err() {
        debug!("Live channel: event receiver dropped before open");
    }

    run_io_loop(ws_stream, &mut cmd_rx, &event_tx, &state).await;
    debug!("Live channel background task exiting");
}

/// Forward frames until either side closes.
async fn run_io_loop(
    ws_stream: WsStream,
    cmd_rx: &mut mpsc::Receiver<LiveCommand>,
    event_tx: &mpsc::Sender<LiveEvent>,
    state: &Arc<RwLock<ConnectionState>>,
) {
    let (mut ws_sink, mut ws_stream) = ws_stream.split();

    loop {
        tokio::select! {
            frame = ws_stream.next() => {
                let reason = match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        if event_tx.send(LiveEvent::Frame(text.as_str().to_string())).await.is_err() {
                            debug!("Live channel: event receiver dropped, closing");
                            send_close(&mut ws_sink).await;
                            set_state(state, ConnectionState::Closed);
                            return;
                        }
                        continue;
                    }
                    Some(Ok(WsMessage::Close(frame))) => {
                        debug!("Live channel: received Close frame");
                        frame
                            .map(|f| f.reason.as_str().to_string())
                            .filter(|r| !r.is_empty())
                    }
                    Some(Ok(_)) => {
                        // Ping/Pong/Binary are not status frames
                        continue;
                    }
                    Some(Err(err)) => {
                        warn!("Live channel: read error: {}", err);
                        Some(err.to_string())
                    }
                    None => {
                        debug!("Live channel: stream ended");
                        None
                    }
                };

                set_state(state, ConnectionState::Closed);
                let _ = event_tx.send(LiveEvent::Closed { reason }).await;
                return;
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(LiveCommand::Close) => debug!("Live channel: close requested"),
                    None => debug!("Live channel: handle dropped, shutting down"),
                }
                send_close(&mut ws_sink).await;
                set_state(state, ConnectionState::Closed);
                return;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn set_state(state: &RwLock<ConnectionState>, next: ConnectionState) {
    let mut guard = state.write().unwrap_or_else(|e| e.into_inner());
    *guard = next;
}

/// Send a WebSocket Close frame and flush the sink.
async fn send_close(ws_sink: &mut SplitSink<WsStream, WsMessage>) {
    let _ = ws_sink.send(WsMessage::Close(None)).await;
    let _ = ws_sink.close().await;
}
