//! Persisted task list.
//!
//! Tasks are addressed by their position in storage order. The priority
//! sort used by the task panel is a view ([`TaskStore::display_order`]) and
//! is never written back.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::DashboardError;
use crate::models::{Priority, Task};

/// Outcome of loading the task file.
pub enum Loaded {
    /// The file was read (or was absent and the seed list was used).
    Ok(TaskStore),
    /// The file was unusable; the store starts empty.
    Recovered(TaskStore, DashboardError),
}

#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    /// `None` keeps the store in memory only.
    path: Option<PathBuf>,
}

impl TaskStore {
    /// A store that never touches disk.
    #[cfg(test)]
    pub fn in_memory(tasks: Vec<Task>) -> Self {
        Self { tasks, path: None }
    }

    /// Load from `path`. Missing file → seed tasks; malformed file → empty list.
    pub fn load(path: &Path) -> Loaded {
        let store = |tasks| Self {
            tasks,
            path: Some(path.to_path_buf()),
        };
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Loaded::Ok(store(Task::seed())),
            Err(e) => {
                return Loaded::Recovered(store(Vec::new()), DashboardError::io("reading", path, e))
            }
        };
        match serde_json::from_str::<Vec<Task>>(&content) {
            Ok(tasks) => Loaded::Ok(store(tasks)),
            Err(source) => Loaded::Recovered(
                store(Vec::new()),
                DashboardError::Parse {
                    what: "todos",
                    source,
                },
            ),
        }
    }

    /// Overwrite the task file with the full list (temp file + rename).
    pub fn save(&self) -> Result<(), DashboardError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let data = serde_json::to_string_pretty(&self.tasks).map_err(|source| {
            DashboardError::Parse {
                what: "todos",
                source,
            }
        })?;
        write_atomic(path, data.as_bytes()).map_err(|e| DashboardError::io("saving", path, e))
    }

    #[cfg(test)]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a medium-priority task. Blank text is ignored (`None`).
    pub fn add(&mut self, text: &str) -> Option<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.tasks.push(Task::new(text));
        self.tasks.last()
    }

    /// Flip `done` of the task at storage `index`.
    pub fn toggle(&mut self, index: usize) -> Result<&Task, DashboardError> {
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(DashboardError::index(index))?;
        task.done = !task.done;
        Ok(task)
    }

    /// Remove and return the task at storage `index`.
    pub fn delete(&mut self, index: usize) -> Result<Task, DashboardError> {
        if index >= self.tasks.len() {
            return Err(DashboardError::index(index));
        }
        Ok(self.tasks.remove(index))
    }

    /// Advance the priority of the task at storage `index`; returns the new one.
    pub fn cycle_priority(&mut self, index: usize) -> Result<Priority, DashboardError> {
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(DashboardError::index(index))?;
        task.priority = task.priority.next();
        Ok(task.priority)
    }

    pub fn first_pending(&self) -> Option<usize> {
        self.tasks.iter().position(|t| !t.done)
    }

    pub fn first_done(&self) -> Option<usize> {
        self.tasks.iter().position(|t| t.done)
    }

    /// `(storage index, task)` pairs sorted by priority rank; ties keep
    /// storage order.
    pub fn display_order(&self) -> Vec<(usize, &Task)> {
        let mut view: Vec<(usize, &Task)> = self.tasks.iter().enumerate().collect();
        view.sort_by_key(|(_, t)| t.priority.rank());
        view
    }
}

/// Write `data` next to `path` and rename it into place.
pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    let mut f = fs::File::create(&tmp)?;
    f.write_all(data)?;
    f.flush()?;
    fs::rename(tmp, path)
}
