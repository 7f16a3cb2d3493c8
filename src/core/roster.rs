use crate::domain::model::Entry;
use crate::utils::error::{GradeError, Result};

/// Ordered, unique-by-name collection of entries.
///
/// Insertion order is display order. Names are compared exactly
/// (case-sensitive, no trimming).
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<Entry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entry`, or fails with `DuplicateName` leaving the roster untouched.
    pub fn add(&mut self, entry: Entry) -> Result<()> {
        if self.contains(&entry.name) {
            return Err(GradeError::DuplicateName { name: entry.name });
        }

        tracing::debug!("Roster add #{}: {} = {}", self.entries.len() + 1, entry.name, entry.grade);
        self.entries.push(entry);
        Ok(())
    }

    pub fn all(&self) -> &[Entry] {
        &self.entries
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }
}
