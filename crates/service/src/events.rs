//! Observability events emitted by the user service.
//!
//! Sinks are fire-and-forget: they cannot fail and never change what the
//! service returns.

use std::sync::{Mutex, PoisonError};

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    /// A record was persisted.
    Created { id: Uuid },
    /// A record was read back.
    Accessed { id: Uuid },
}

impl UserEvent {
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        match self {
            Self::Created { id } | Self::Accessed { id } => *id,
        }
    }
}

pub trait UserEventSink: Send + Sync {
    fn emit(&self, event: UserEvent);
}

/// Production sink: one structured log line per event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl UserEventSink for TracingEventSink {
    fn emit(&self, event: UserEvent) {
        match event {
            UserEvent::Created { id } => tracing::info!(user_id = %id, "user created"),
            UserEvent::Accessed { id } => tracing::info!(user_id = %id, "user accessed"),
        }
    }
}

/// Keeps every event in memory so tests can assert on them.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<UserEvent>>,
}

impl RecordingEventSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events emitted so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<UserEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl UserEventSink for RecordingEventSink {
    fn emit(&self, event: UserEvent) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event);
    }
}
