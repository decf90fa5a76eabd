use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Durable record of every designation seen in any prior cycle.
///
/// The set only grows; [`KnownSet::merged_with`] returns a new value so that callers
/// decide when the union is committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownSet {
    #[serde(rename = "known", default)]
    designations: BTreeSet<String>,
    #[serde(default)]
    last_check: Option<DateTime<Utc>>,
}

impl KnownSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_designations<I, S>(designations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            designations: designations.into_iter().map(Into::into).collect(),
            last_check: None,
        }
    }

    pub fn contains(&self, designation: &str) -> bool {
        self.designations.contains(designation)
    }

    pub fn len(&self) -> usize {
        self.designations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.designations.is_empty()
    }

    /// No designation has ever been recorded.
    pub fn is_first_run(&self) -> bool {
        self.is_empty()
    }

    pub fn designations(&self) -> impl Iterator<Item = &str> {
        self.designations.iter().map(String::as_str)
    }

    pub fn last_check(&self) -> Option<DateTime<Utc>> {
        self.last_check
    }

    /// Union of this set with `seen`, stamped with `checked_at`.
    pub fn merged_with<'a, I>(&self, seen: I, checked_at: DateTime<Utc>) -> KnownSet
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut designations = self.designations.clone();
        designations.extend(seen.into_iter().map(str::to_string));
        KnownSet {
            designations,
            last_check: Some(checked_at),
        }
    }
}
