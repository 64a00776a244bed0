//! Engine - dashboard session orchestration shared by TUI and headless runners
//!
//! The Engine is the composition root of one dashboard session. It owns the
//! TEA state, the message channel, the live channel handle, the shutdown
//! signal and the event broadcaster.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use evalwatch_client::{Dispatcher, Endpoints, EvaluationBackend, HttpBackend, LiveChannel};
use evalwatch_core::prelude::*;
use evalwatch_core::ConnectionState;

use crate::actions::handle_action;
use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::handler;
use crate::message::Message;
use crate::signals;
use crate::state::DashboardState;

/// Capacity of the message channel and the event broadcaster
const CHANNEL_CAPACITY: usize = 256;

/// Upper bound on waiting for each background task during shutdown
const TASK_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// Lightweight capture of state for change detection.
///
/// Taken before message processing and compared afterwards to decide which
/// EngineEvents to emit.
#[derive(Debug, Clone)]
struct StateCapture {
    connection: ConnectionState,
    last_seq: Option<u64>,
    clears: u64,
    status_updates: u64,
    snapshot_applied: u64,
}

impl StateCapture {
    fn capture(state: &DashboardState) -> Self {
        Self {
            connection: state.connection,
            last_seq: state.log.last().map(|l| l.seq),
            clears: state.log.clear_count(),
            status_updates: state.status_updates,
            snapshot_applied: state.snapshot_applied,
        }
    }
}

/// Orchestration engine for one dashboard session.
///
/// Generic over the backend so tests can drive it without a network.
pub struct Engine<B = HttpBackend> {
    /// TEA state (the Model)
    pub state: DashboardState,

    /// Sender half of the message channel.
    /// Clone this to give to input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the message channel.
    /// The frontend event loop drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Send `true` to stop background tasks
    pub shutdown_tx: watch::Sender<bool>,

    pub shutdown_rx: watch::Receiver<bool>,

    endpoints: Endpoints,

    dispatcher: Dispatcher<B>,

    /// Live channel of the current session, `None` before start and after shutdown
    live: Option<LiveChannel>,

    /// Live event forwarder and refresh timer
    background_tasks: Vec<JoinHandle<()>>,

    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine<HttpBackend> {
    /// Create an engine talking to the configured REST and live endpoints.
    ///
    /// Fails if an endpoint URL is invalid.
    pub fn new(settings: Settings) -> Result<Self> {
        let endpoints = Endpoints::new(&settings.endpoints.api_base, &settings.endpoints.live_url)?;
        let backend = HttpBackend::new(endpoints.clone(), settings.refresh.request_timeout())?;
        Ok(Self::with_backend(settings, endpoints, backend))
    }
}

impl<B> Engine<B>
where
    B: EvaluationBackend + Clone + Sync + 'static,
{
    pub fn with_backend(settings: Settings, endpoints: Endpoints, backend: B) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (event_tx, _) = broadcast::channel(CHANNEL_CAPACITY);

        Self {
            state: DashboardState::with_settings(settings),
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            endpoints,
            dispatcher: Dispatcher::new(backend),
            live: None,
            background_tasks: Vec::new(),
            event_tx,
        }
    }

    /// Start the session: fetch the initial snapshot and open the live channel.
    ///
    /// Also installs the signal handler and, when configured, the periodic
    /// results refresh. Must be called from within a Tokio runtime.
    pub fn start(&mut self) {
        info!(
            "Starting session (api: {}, live: {})",
            self.endpoints.api_base(),
            self.endpoints.live_url()
        );

        signals::spawn_signal_handler(self.msg_tx.clone());

        self.process_message(Message::RefreshSnapshot);
        self.connect_live();

        if let Some(interval) = self.state.settings.refresh.interval() {
            self.spawn_refresh_timer(interval);
        }
    }

    /// Subscribe to engine events.
    ///
    /// A subscriber that falls behind gets `RecvError::Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle.
    ///
    /// Follow-up messages are processed immediately; actions are spawned on
    /// the runtime. EngineEvents are emitted from the before/after diff.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateCapture::capture(&self.state);

        let mut msg = Some(msg);
        while let Some(m) = msg {
            let result = handler::update(&mut self.state, m);
            if let Some(action) = result.action {
                handle_action(action, self.msg_tx.clone(), self.dispatcher.clone());
            }
            msg = result.message;
        }

        let post = StateCapture::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Tear the session down.
    ///
    /// Once this returns the live channel is released and no further frames
    /// are applied. Commands still in flight may complete; their results are
    /// discarded.
    pub async fn shutdown(&mut self) {
        self.process_message(Message::SessionClosed);

        let _ = self.shutdown_tx.send(true);

        if let Some(live) = self.live.take() {
            live.close().await;
        }

        for handle in self.background_tasks.drain(..) {
            match tokio::time::timeout(TASK_SHUTDOWN_TIMEOUT, handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("Background task panicked: {}", e),
                Err(_) => warn!("Background task shutdown timed out"),
            }
        }

        self.emit(EngineEvent::Shutdown);
        info!("Session shut down");
    }

    /// Open the live channel and forward its events into the message channel
    fn connect_live(&mut self) {
        let timeout = self.state.settings.refresh.request_timeout();
        let (channel, mut events) = LiveChannel::connect(self.endpoints.live_url(), timeout);
        self.live = Some(channel);

        let msg_tx = self.msg_tx.clone();
        let mut shutdown_rx = self.shutdown_rx.clone();
        self.background_tasks.push(tokio::spawn(async move {
            loop {
                tokio::select! {
                    event = events.recv() => {
                        let Some(event) = event else {
                            debug!("Live event stream ended");
                            break;
                        };
                        if msg_tx.send(Message::Live(event)).await.is_err() {
                            break;
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        }));
    }

    fn spawn_refresh_timer(&mut self, interval: Duration) {
        info!("Refreshing results every {}s", interval.as_secs());

        let msg_tx = self.msg_tx.clone();
        let mut shutdown_rx = self.shutdown_rx.clone();
        self.background_tasks.push(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; the initial fetch is done by start().
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if msg_tx.send(Message::RefreshSnapshot).await.is_err() {
                            break;
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        }));
    }

    fn emit_events(&self, pre: &StateCapture, post: &StateCapture) {
        if pre.connection != post.connection {
            self.emit(EngineEvent::ConnectionChanged {
                old: pre.connection,
                new: post.connection,
            });
        }

        let cleared = post.clears > pre.clears;
        if cleared {
            self.emit(EngineEvent::LogCleared);
        }

        if post.last_seq != pre.last_seq {
            let lines: Vec<_> = self
                .state
                .log
                .lines()
                .iter()
                .filter(|l| cleared || pre.last_seq.map_or(true, |seq| l.seq > seq))
                .cloned()
                .collect();
            if !lines.is_empty() {
                self.emit(EngineEvent::LogAppended { lines });
            }
        }

        if post.snapshot_applied != pre.snapshot_applied {
            self.emit(EngineEvent::SnapshotUpdated {
                kpis: self.state.store.kpis().clone(),
                domains: self.state.store.snapshot().entries().len(),
            });
        }

        if post.status_updates != pre.status_updates {
            if let (Some(command), Some(status_text)) =
                (self.state.last_command, self.state.status_text.clone())
            {
                self.emit(EngineEvent::CommandStatus {
                    command,
                    status_text,
                });
            }
        }
    }

    /// send() fails only when nobody is subscribed.
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}
