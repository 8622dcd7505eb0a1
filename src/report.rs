use crate::RecordKind;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use tracing::{error, info, warn};

/// Progress and warning events emitted while a pipeline runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    DocumentLoaded { path: PathBuf, bytes: usize },
    ContainerNotFound { kind: RecordKind },
    NoItems { kind: RecordKind },
    Extracted { kind: RecordKind, count: usize },
    Written { kind: RecordKind, path: PathBuf, rows: usize },
    NoData { kind: RecordKind, path: PathBuf },
    SinkFailed { kind: RecordKind, path: PathBuf, error: String },
    SpecMissing { kind: RecordKind },
}

pub trait Reporter {
    fn report(&self, event: Event);
}

/// Forwards every event to `tracing`.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: Event) {
        match event {
            Event::DocumentLoaded { path, bytes } => {
                info!(path = %path.display(), bytes, "Read document")
            }
            Event::ContainerNotFound { kind } => warn!(%kind, "Container not found"),
            Event::NoItems { kind } => warn!(%kind, "No items found in container"),
            Event::Extracted { kind, count } => info!(%kind, count, "Extracted records"),
            Event::Written { kind, path, rows } => {
                info!(%kind, path = %path.display(), rows, "Wrote CSV")
            }
            Event::NoData { kind, path } => {
                warn!(%kind, path = %path.display(), "No data to write")
            }
            Event::SinkFailed { kind, path, error } => {
                error!(%kind, path = %path.display(), %error, "Failed writing CSV")
            }
            Event::SpecMissing { kind } => warn!(%kind, "Layout has no spec for record kind"),
        }
    }
}

/// Keeps events in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: Event) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
