//! Drag and drop scenarios, and the tools to check them against a task store

use chrono::NaiveDate;

use month_planner::{DropPayload, TaskStore};

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

/// Where a task is dragged from, and where it is dropped
pub struct Drag {
    pub from: NaiveDate,
    pub from_index: usize,
    pub to: NaiveDate,
    /// `None` when dropped onto the day itself rather than onto one of its tasks
    pub to_index: Option<usize>,
}

pub struct DragScenario {
    pub name: &'static str,
    /// Tasks of each day before the drag
    pub before: Vec<(NaiveDate, Vec<&'static str>)>,
    pub drag: Drag,
    /// Tasks of each day after the drop
    pub after: Vec<(NaiveDate, Vec<&'static str>)>,
}

fn drag(from: NaiveDate, from_index: usize, to: NaiveDate, to_index: Option<usize>) -> Drag {
    Drag { from, from_index, to, to_index }
}

/// Populate sources with the following:
/// * March 10th: A, B, C, D
/// * March 11th: X, Y
/// * March 12th: nothing
pub fn base() -> Vec<(NaiveDate, Vec<&'static str>)> {
    vec![
        (day(10), vec!["A", "B", "C", "D"]),
        (day(11), vec!["X", "Y"]),
        (day(12), vec![]),
    ]
}

pub fn drag_scenarii() -> Vec<DragScenario> {
    vec![
        DragScenario {
            name: "move the last task to the top",
            before: base(),
            drag: drag(day(10), 3, day(10), Some(0)),
            after: vec![(day(10), vec!["D", "A", "B", "C"]), (day(11), vec!["X", "Y"]), (day(12), vec![])],
        },
        DragScenario {
            name: "move the first task down",
            before: base(),
            drag: drag(day(10), 0, day(10), Some(2)),
            after: vec![(day(10), vec!["B", "C", "A", "D"]), (day(11), vec!["X", "Y"]), (day(12), vec![])],
        },
        DragScenario {
            name: "drop a task onto itself",
            before: base(),
            drag: drag(day(10), 1, day(10), Some(1)),
            after: base(),
        },
        DragScenario {
            name: "drop past the end",
            before: base(),
            drag: drag(day(11), 0, day(11), Some(10)),
            after: vec![(day(10), vec!["A", "B", "C", "D"]), (day(11), vec!["Y", "X"]), (day(12), vec![])],
        },
        DragScenario {
            name: "drop onto the same day",
            before: base(),
            drag: drag(day(10), 2, day(10), None),
            after: base(),
        },
        DragScenario {
            name: "move to an empty day",
            before: base(),
            drag: drag(day(10), 1, day(12), None),
            after: vec![(day(10), vec!["A", "C", "D"]), (day(11), vec!["X", "Y"]), (day(12), vec!["B"])],
        },
        DragScenario {
            name: "move onto a task of another day (appended anyway)",
            before: base(),
            drag: drag(day(11), 0, day(10), Some(0)),
            after: vec![(day(10), vec!["A", "B", "C", "D", "X"]), (day(11), vec!["Y"]), (day(12), vec![])],
        },
        DragScenario {
            name: "move a duplicated text",
            before: vec![(day(10), vec!["same", "other", "same"]), (day(11), vec![])],
            drag: drag(day(10), 2, day(11), None),
            after: vec![(day(10), vec!["same", "other"]), (day(11), vec!["same"])],
        },
    ]
}

/// Interleave the tasks of every day, so that the store order differs from the display order of each day
pub fn populate(days: &[(NaiveDate, Vec<&'static str>)]) -> TaskStore {
    let mut store = TaskStore::new();
    let longest = days.iter().map(|(_, tasks)| tasks.len()).max().unwrap_or(0);
    for i in 0..longest {
        for (date, tasks) in days {
            if let Some(text) = tasks.get(i) {
                assert!(store.add(*date, text));
            }
        }
    }
    store
}

pub fn texts_on(store: &TaskStore, date: NaiveDate) -> Vec<String> {
    store.tasks_on(date).iter().map(|t| t.text().to_string()).collect()
}

/// Build the payload a UI would send when it starts dragging a task
pub fn payload_for(store: &TaskStore, date: NaiveDate, index: usize) -> DropPayload {
    let task = store.tasks_on(date)[index].clone();
    DropPayload::new(task, date, index)
}
