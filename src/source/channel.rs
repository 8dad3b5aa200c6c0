//! Channel-based feed source.
//!
//! Receives fetch outcomes via a tokio watch channel. Useful for embedding
//! the dashboard behind another fetch pipeline, and for tests.

use tokio::sync::watch;

use super::{FeedSource, FetchOutcome};
use crate::data::Timeframe;

/// A feed source fed by an external producer through a watch channel.
///
/// Select and refresh are no-ops; the producer decides when and what to
/// fetch. Outcomes still carry their timeframe tag, so the application's
/// stale-result discard applies unchanged.
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Option<FetchOutcome>>,
    description: String,
}

impl ChannelSource {
    pub fn new(receiver: watch::Receiver<Option<FetchOutcome>>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
        }
    }

    /// Create a channel pair for pushing outcomes into the dashboard.
    pub fn create(source_description: &str) -> (watch::Sender<Option<FetchOutcome>>, Self) {
        let (tx, rx) = watch::channel(None);
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl FeedSource for ChannelSource {
    fn poll(&mut self) -> Option<FetchOutcome> {
        if self.receiver.has_changed().unwrap_or(false) {
            self.receiver.borrow_and_update().clone()
        } else {
            None
        }
    }

    fn select(&mut self, _timeframe: Timeframe) {}

    fn refresh(&mut self) {}

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FeedPayload;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");

        // Nothing sent yet.
        assert!(source.poll().is_none());

        tx.send(Some(FetchOutcome {
            timeframe: Timeframe::Hour,
            result: Ok(FeedPayload::default()),
        }))
        .unwrap();

        let outcome = source.poll().unwrap();
        assert_eq!(outcome.timeframe, Timeframe::Hour);
        assert!(outcome.result.is_ok());

        // No change, so poll returns None.
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_channel_source_description() {
        let (_tx, source) = ChannelSource::create("embedded");
        assert_eq!(source.description(), "channel: embedded");
    }
}
