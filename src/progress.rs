//! Utilities to report the progression and the failures of fetches

use std::fmt::{Display, Error, Formatter};
use std::sync::atomic::{AtomicU32, Ordering};

/// An event that happens while data is fetched from a [`HolidaySource`](crate::traits::HolidaySource)
#[derive(Clone, Debug, PartialEq)]
pub enum LoadEvent {
    /// Nothing has been fetched yet
    NotStarted,
    /// A fetch has started
    Fetching{ what: String },
    /// A fetch has successfully finished
    Loaded{ what: String, count: usize },
    /// A fetch has failed. The data is left unchanged and may be fetched again later
    Failed{ what: String, error: String },
}

impl Display for LoadEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            LoadEvent::NotStarted => write!(f, "Not started"),
            LoadEvent::Fetching{what} => write!(f, "Fetching {}...", what),
            LoadEvent::Loaded{what, count} => write!(f, "Fetched {} ({} entries)", what, count),
            LoadEvent::Failed{what, error} => write!(f, "Unable to fetch {}: {}", what, error),
        }
    }
}

impl Default for LoadEvent {
    fn default() -> Self {
        Self::NotStarted
    }
}



/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<LoadEvent>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<LoadEvent>;

/// Create a feeback channel, that can be used to follow the fetches that happen in the background of a UI
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(LoadEvent::default())
}




/// A structure that logs what happens to fetches, counts their failures, and forwards them to a feedback channel (if any)
///
/// Failures are never fatal: they are reported here, and the caller carries on with its data unchanged.
#[derive(Debug, Default)]
pub struct LoadProgress {
    n_errors: AtomicU32,
    feedback_channel: Option<FeedbackSender>,
}

impl LoadProgress {
    pub fn new() -> Self {
        Self { n_errors: AtomicU32::new(0), feedback_channel: None }
    }
    pub fn new_with_feedback_channel(channel: FeedbackSender) -> Self {
        Self { n_errors: AtomicU32::new(0), feedback_channel: Some(channel) }
    }

    /// How many fetches have failed so far
    pub fn n_errors(&self) -> u32 {
        self.n_errors.load(Ordering::Relaxed)
    }

    pub fn is_success(&self) -> bool {
        self.n_errors() == 0
    }

    /// Log an error
    pub fn error(&self, text: &str) {
        log::error!("{}", text);
        self.n_errors.fetch_add(1, Ordering::Relaxed);
    }
    /// Log a warning
    pub fn warn(&self, text: &str) {
        log::warn!("{}", text);
        self.n_errors.fetch_add(1, Ordering::Relaxed);
    }
    /// Log an info
    pub fn info(&self, text: &str) {
        log::info!("{}", text);
    }
    /// Log a debug message
    pub fn debug(&self, text: &str) {
        log::debug!("{}", text);
    }

    /// Send an event as a feedback to the listener (if any).
    pub fn feedback(&self, event: LoadEvent) {
        if let Some(sender) = &self.feedback_channel {
            // Nobody may be listening anymore, this is fine
            let _ = sender.send(event);
        }
    }

    /// Report a failed fetch: it is logged as a warning, and forwarded to the feedback channel
    pub fn failed(&self, what: &str, error: &str) {
        self.warn(&format!("Unable to fetch {}: {}", what, error));
        self.feedback(LoadEvent::Failed{ what: what.to_string(), error: error.to_string() });
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_are_counted_and_forwarded() {
        let (sender, receiver) = feedback_channel();
        let progress = LoadProgress::new_with_feedback_channel(sender);
        assert!(progress.is_success());
        assert_eq!(*receiver.borrow(), LoadEvent::NotStarted);

        progress.feedback(LoadEvent::Fetching{ what: "holidays for UA in 2024".to_string() });
        assert_eq!(receiver.borrow().to_string(), "Fetching holidays for UA in 2024...");

        progress.failed("holidays for UA in 2024", "timeout");
        assert_eq!(progress.n_errors(), 1);
        assert_eq!(*receiver.borrow(), LoadEvent::Failed{ what: "holidays for UA in 2024".to_string(), error: "timeout".to_string() });
    }

    #[test]
    fn no_listener() {
        let progress = LoadProgress::new();
        progress.failed("available countries", "HTTP 500");
        progress.feedback(LoadEvent::Loaded{ what: "available countries".to_string(), count: 0 });
        assert!(progress.is_success() == false);
    }
}
