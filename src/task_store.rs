//! This module provides the store that owns every task
//!
//! Tasks are kept in a single flat list. The relative order of the tasks of a given day is significant
//! (it is the order they are displayed in, and it can be changed by drag and drop), the order between different days is not.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::{normalize_text, Task};

/// The message a dragged task carries from its source day to the day it is dropped onto
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropPayload {
    /// The task that is being dragged
    pub task: Task,
    /// The day the task is dragged from
    #[serde(rename = "from")]
    pub source_date: NaiveDate,
    /// The position of the task among the tasks of its source day
    #[serde(rename = "fromIndex")]
    pub source_index: usize,
}

impl DropPayload {
    pub fn new(task: Task, source_date: NaiveDate, source_index: usize) -> Self {
        Self { task, source_date, source_index }
    }

    /// Parse the JSON form of a payload, as it may be transferred by a UI toolkit.
    ///
    /// Returns `None` if there is no payload, or if it is malformed
    pub fn from_json(data: &str) -> Option<Self> {
        if data.trim().is_empty() {
            return None;
        }
        match serde_json::from_str(data) {
            Ok(payload) => Some(payload),
            Err(err) => {
                log::debug!("Ignoring a malformed drop payload: {}", err);
                None
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}


/// The owner of all tasks
///
/// Every mutation is copy-on-write: a [`snapshot`](TaskStore::snapshot) taken before a mutation is never altered,
/// and a mutation is never partially observable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskStore {
    tasks: Arc<Vec<Task>>,
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from existing tasks (e.g. from a snapshot)
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks: Arc::new(tasks) }
    }

    /// Every task, in storage order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// A shared, immutable view of the current task list
    pub fn snapshot(&self) -> Arc<Vec<Task>> {
        Arc::clone(&self.tasks)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Add a task at the end of the tasks of a day.
    ///
    /// The text is trimmed. Nothing happens (and `false` is returned) if nothing is left after trimming.
    pub fn add(&mut self, date: NaiveDate, text: &str) -> bool {
        match Task::new(date, text) {
            None => {
                log::debug!("Not adding an empty task on {}", date);
                false
            },
            Some(task) => {
                Arc::make_mut(&mut self.tasks).push(task);
                true
            },
        }
    }

    /// Remove the first task of a day that has this exact text.
    ///
    /// Returns whether a task has been removed
    pub fn remove(&mut self, date: NaiveDate, text: &str) -> bool {
        match self.position_by_text(date, text) {
            None => {
                log::debug!("No task {:?} on {}, nothing to remove", text, date);
                false
            },
            Some(pos) => {
                Arc::make_mut(&mut self.tasks).remove(pos);
                true
            },
        }
    }

    /// Change the text of the first task of a day that has the text `old_text`.
    ///
    /// The task keeps its position among the tasks of its day. \
    /// In case `new_text` is empty after trimming, the edit is discarded and the task is left unchanged.
    /// Returns whether a task has been modified
    pub fn edit(&mut self, date: NaiveDate, old_text: &str, new_text: &str) -> bool {
        let new_text = match normalize_text(new_text) {
            None => {
                log::debug!("Discarding an empty edit of {:?} on {}", old_text, date);
                return false;
            },
            Some(t) => t,
        };

        match self.position_by_text(date, old_text) {
            None => {
                log::debug!("No task {:?} on {}, nothing to edit", old_text, date);
                false
            },
            Some(pos) => {
                Arc::make_mut(&mut self.tasks)[pos].set_text(new_text);
                true
            },
        }
    }

    /// Handle a task that has been dragged and dropped.
    ///
    /// * When `from_date == to_date` and `to_index` is given, the task at `from_index` (among the tasks of this day)
    ///   is moved to `to_index`. `to_index` is understood after the task has been taken out of the list, and is clamped to its length.
    /// * When the dates differ, the task is removed from `from_date` and appended to the tasks of `to_date`.
    ///   The task is looked up by its ID first, then by its text (in which case a duplicate with the same text may be moved instead).
    /// * In any other case, or if the task cannot be found, nothing happens.
    ///
    /// Returns whether the store has changed
    pub fn move_or_reorder(&mut self, task: &Task, from_date: NaiveDate, from_index: usize, to_date: NaiveDate, to_index: Option<usize>) -> bool {
        if from_date == to_date {
            match to_index {
                Some(to_index) => self.reorder(from_date, from_index, to_index),
                None => false,
            }
        } else {
            self.move_to_date(task, from_date, to_date)
        }
    }

    /// Same as [`Self::move_or_reorder`], using a drag payload.
    ///
    /// A missing payload is ignored
    pub fn apply_drop(&mut self, payload: Option<&DropPayload>, to_date: NaiveDate, to_index: Option<usize>) -> bool {
        match payload {
            None => false,
            Some(p) => self.move_or_reorder(&p.task, p.source_date, p.source_index, to_date, to_index),
        }
    }

    /// Returns the tasks of every day, in display order.
    ///
    /// If `search` is non-empty, only the tasks that contain it (case-insensitively) are returned, and days without any
    /// matching task are left out.
    pub fn tasks_by_date(&self, search: Option<&str>) -> HashMap<NaiveDate, Vec<&Task>> {
        let needle = search.unwrap_or("").to_lowercase();

        let mut map: HashMap<NaiveDate, Vec<&Task>> = HashMap::new();
        for task in self.tasks.iter() {
            if task.matches(&needle) {
                map.entry(task.date()).or_default().push(task);
            }
        }
        map
    }

    /// Returns the tasks of a single day, in display order
    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks.iter()
            .filter(|t| t.date() == date)
            .collect()
    }


    fn position_by_text(&self, date: NaiveDate, text: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.date() == date && t.text() == text)
    }

    fn reorder(&mut self, date: NaiveDate, from_index: usize, to_index: usize) -> bool {
        let slots: Vec<usize> = self.tasks.iter()
            .enumerate()
            .filter(|(_, t)| t.date() == date)
            .map(|(pos, _)| pos)
            .collect();

        if from_index >= slots.len() {
            log::debug!("No task #{} on {}, nothing to reorder", from_index, date);
            return false;
        }

        let mut day_tasks: Vec<Task> = slots.iter().map(|&pos| self.tasks[pos].clone()).collect();
        let moved = day_tasks.remove(from_index);
        let to_index = to_index.min(day_tasks.len());
        day_tasks.insert(to_index, moved);

        // Tasks of other days keep their slots
        let tasks = Arc::make_mut(&mut self.tasks);
        for (pos, task) in slots.into_iter().zip(day_tasks) {
            tasks[pos] = task;
        }
        true
    }

    fn move_to_date(&mut self, task: &Task, from_date: NaiveDate, to_date: NaiveDate) -> bool {
        let pos = self.tasks.iter()
            .position(|t| t.date() == from_date && t.id() == task.id())
            .or_else(|| self.position_by_text(from_date, task.text()));

        match pos {
            None => {
                log::debug!("No task {:?} on {}, nothing to move", task.text(), from_date);
                false
            },
            Some(pos) => {
                let tasks = Arc::make_mut(&mut self.tasks);
                let mut moved = tasks.remove(pos);
                moved.set_date(to_date);
                tasks.push(moved);
                true
            },
        }
    }
}
