//! Save and restore the state of a planner
//!
//! Everything else in this crate only lives in memory. A [`Snapshot`] is the explicit boundary to use when this state should survive the process.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cache::HolidayCache;
use crate::holiday::CountryHolidayMap;
use crate::task::Task;
use crate::task_store::TaskStore;
use crate::traits::HolidaySource;

/// The tasks and cached holidays of a planner, at a given time
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    tasks: Vec<Task>,
    holidays: CountryHolidayMap,
}

impl Snapshot {
    /// Capture the current content of a task store and of a holiday cache
    pub fn capture<S: HolidaySource>(tasks: &TaskStore, cache: &HolidayCache<S>) -> Self {
        Self {
            tasks: tasks.tasks().to_vec(),
            holidays: (*cache.snapshot()).clone(),
        }
    }

    pub fn tasks(&self) -> &[Task]                  { &self.tasks    }
    pub fn holidays(&self) -> &CountryHolidayMap    { &self.holidays }

    /// Build a task store and a holiday cache from this snapshot
    pub fn restore<S: HolidaySource>(self, source: Arc<S>) -> (TaskStore, HolidayCache<S>) {
        (TaskStore::from_tasks(self.tasks), HolidayCache::from_map(source, self.holidays))
    }

    /// Load a snapshot from the content of a valid file.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let file = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => file,
        };
        let snapshot: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        log::debug!("Loaded {} tasks from {:?}", snapshot.tasks.len(), path);
        Ok(snapshot)
    }

    /// Store this snapshot into a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let file = match std::fs::File::create(path) {
            Err(err) => {
                return Err(format!("Unable to save file {:?}: {}", path, err).into());
            },
            Ok(f) => f,
        };
        serde_json::to_writer(file, self)?;
        log::debug!("Saved {} tasks into {:?}", self.tasks.len(), path);
        Ok(())
    }
}
