//! Shared fixtures for handler and middleware tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use clap::Parser;
use grip::error::{ErrorKind, HttpErrorKind};
use grip::format::Item;
use grip::Publisher;
use service::config::Config;

use crate::AppState;

pub(crate) fn test_config(args: &[&str]) -> Config {
    let mut argv = vec!["grip_relay"];
    argv.extend_from_slice(args);
    Config::try_parse_from(argv).unwrap()
}

/// Records every item it is asked to publish. Optionally fails the Nth
/// attempt (0-based), still recording it.
#[derive(Default)]
pub(crate) struct RecordingPublisher {
    items: Mutex<Vec<Item>>,
    fail_on: Option<usize>,
}

impl RecordingPublisher {
    pub(crate) fn failing_on(attempt: usize) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            fail_on: Some(attempt),
        }
    }

    pub(crate) fn items(&self) -> Vec<Item> {
        self.items.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, item: Item) -> Result<(), grip::Error> {
        let mut items = self.items.lock().unwrap();
        let attempt = items.len();
        items.push(item);

        if self.fail_on == Some(attempt) {
            return Err(grip::Error {
                source: Some("proxy unavailable".into()),
                error_kind: ErrorKind::Http(HttpErrorKind::Status(503)),
            });
        }
        Ok(())
    }
}

pub(crate) fn state_with(args: &[&str], publisher: Arc<RecordingPublisher>) -> AppState {
    let publisher: Arc<dyn Publisher> = publisher;
    AppState::new(test_config(args), &publisher)
}

pub(crate) fn recording_state(args: &[&str]) -> (AppState, Arc<RecordingPublisher>) {
    let publisher = Arc::new(RecordingPublisher::default());
    (state_with(args, publisher.clone()), publisher)
}
