use tokio::sync::broadcast;

/// SSE event name Turbo's stream source listens for.
pub const TURBO_STREAM_EVENT: &str = "message";

/// Envelope that carries an SSE event name and its rendered payload.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerEvent {
    pub name: &'static str,
    pub payload: String,
}

impl ServerEvent {
    pub fn turbo_stream(fragment: String) -> Self {
        Self {
            name: TURBO_STREAM_EVENT,
            payload: fragment,
        }
    }
}

/// Lightweight broadcast bus that fans out events to any connected clients.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    /// Number of clients currently listening.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn publish(&self, event: ServerEvent) {
        // No subscribers or lagging listeners are not the producer's problem.
        let _ = self.sender.send(event);
    }
}
