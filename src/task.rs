//! Free-text tasks attached to a day

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task, attached to a single day
///
/// The text of a task is always trimmed and non-empty. \
/// Tasks are usually designated by their `(date, text)` pair, which means two tasks with the same text on the same day
/// cannot be told apart by [`TaskStore`](crate::task_store::TaskStore) operations that take a text.
/// Every task also has a random `id`, that drag and drop operations use to find the right one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Tasks serialized without an ID (e.g. by an older UI) get a fresh one
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    date: NaiveDate,
    text: String,
}

impl Task {
    /// Create a brand new task. This will pick a new (random) task ID.
    ///
    /// Returns `None` in case `text` is empty (or only made of whitespace)
    pub fn new(date: NaiveDate, text: &str) -> Option<Self> {
        let text = normalize_text(text)?;
        Some(Self::new_with_parameters(Uuid::new_v4(), date, text))
    }

    /// Create a task with an existing ID, e.g. when restoring a snapshot.
    /// `text` is expected to be already trimmed.
    pub fn new_with_parameters(id: Uuid, date: NaiveDate, text: String) -> Self {
        Self { id, date, text }
    }

    pub fn id(&self) -> &Uuid        { &self.id   }
    pub fn date(&self) -> NaiveDate  { self.date  }
    pub fn text(&self) -> &str       { &self.text }

    /// Whether this task should be shown for a (lowercase) search string
    pub fn matches(&self, lowercase_needle: &str) -> bool {
        lowercase_needle.is_empty() || self.text.to_lowercase().contains(lowercase_needle)
    }

    pub(crate) fn set_text(&mut self, new_text: String) {
        self.text = new_text;
    }

    pub(crate) fn set_date(&mut self, new_date: NaiveDate) {
        self.date = new_date;
    }
}

/// Returns the trimmed form of a task text, or `None` if nothing is left
pub(crate) fn normalize_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
