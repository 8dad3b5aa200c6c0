//! HTTP feed source polling the USGS summary endpoints.
//!
//! Spawns a background task that fetches the active timeframe's endpoint on
//! a fixed interval and on demand, delivering tagged outcomes through a
//! channel so the TUI thread can consume them without blocking.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use super::{FeedDocument, FeedError, FeedPayload, FeedSource, FetchOutcome};
use crate::data::Timeframe;

/// Fixed refresh interval between polls of the feed.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Per-request timeout for feed reads.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
enum Command {
    Select(Timeframe),
    Refresh,
}

/// A feed source backed by the live USGS endpoints.
///
/// The background task owns the HTTP client and the active timeframe. Each
/// fetch is tagged with the timeframe at dispatch time; timeframe changes and
/// manual refreshes reset the interval so the next scheduled poll is a full
/// period away.
#[derive(Debug)]
pub struct HttpSource {
    outcomes: mpsc::Receiver<FetchOutcome>,
    commands: mpsc::UnboundedSender<Command>,
    description: String,
}

impl HttpSource {
    /// Spawn the polling task. Must be called within a tokio runtime.
    ///
    /// The first fetch is dispatched immediately for the given timeframe.
    pub fn spawn(timeframe: Timeframe) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let (outcome_tx, outcome_rx) = mpsc::channel(16);
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        tokio::spawn(poll_loop(client, timeframe, command_rx, outcome_tx));

        Ok(Self {
            outcomes: outcome_rx,
            commands: command_tx,
            description: "feed: earthquake.usgs.gov".to_string(),
        })
    }
}

impl FeedSource for HttpSource {
    fn poll(&mut self) -> Option<FetchOutcome> {
        self.outcomes.try_recv().ok()
    }

    fn select(&mut self, timeframe: Timeframe) {
        let _ = self.commands.send(Command::Select(timeframe));
    }

    fn refresh(&mut self) {
        let _ = self.commands.send(Command::Refresh);
    }

    fn description(&self) -> &str {
        &self.description
    }
}

async fn poll_loop(
    client: reqwest::Client,
    mut timeframe: Timeframe,
    mut commands: mpsc::UnboundedReceiver<Command>,
    outcomes: mpsc::Sender<FetchOutcome>,
) {
    let mut interval = tokio::time::interval(REFRESH_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // The first tick fires immediately, giving the startup fetch.
        tokio::select! {
            _ = interval.tick() => {}
            cmd = commands.recv() => match cmd {
                Some(Command::Select(tf)) => {
                    timeframe = tf;
                    interval.reset();
                }
                Some(Command::Refresh) => {
                    interval.reset();
                }
                None => break,
            }
        }

        let dispatched_for = timeframe;
        debug!(timeframe = dispatched_for.label(), "fetching feed");
        let result = fetch_document(&client, dispatched_for).await;
        if let Err(ref e) = result {
            warn!(timeframe = dispatched_for.label(), error = %e, "feed fetch failed");
        }

        let outcome = FetchOutcome {
            timeframe: dispatched_for,
            result: result.map(FeedPayload::from),
        };
        if outcomes.send(outcome).await.is_err() {
            // Receiver dropped; the app is shutting down.
            break;
        }
    }
}

/// Perform a single read of the endpoint for the given timeframe.
pub async fn fetch_document(
    client: &reqwest::Client,
    timeframe: Timeframe,
) -> Result<FeedDocument, FeedError> {
    let response = client
        .get(timeframe.endpoint())
        .send()
        .await
        .map_err(|e| FeedError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status(status.as_u16()));
    }

    response.json::<FeedDocument>().await.map_err(|e| {
        if e.is_decode() {
            FeedError::Malformed(e.to_string())
        } else {
            FeedError::Network(e.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_errors_on_unreachable_host() {
        // 0.0.0.0 is never routable as a destination.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let result = client
            .get("http://0.0.0.0:1/feed.geojson")
            .send()
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_http_source_select_after_shutdown_is_silent() {
        let mut source = HttpSource::spawn(Timeframe::Hour).unwrap();
        // Commands never panic even if the task has exited.
        source.select(Timeframe::Week);
        source.refresh();
        assert_eq!(source.description(), "feed: earthquake.usgs.gov");
    }
}
