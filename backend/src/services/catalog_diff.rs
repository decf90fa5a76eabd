//! New-object detection against the persisted known set.

use std::collections::HashSet;

use crate::models::{CelestialObject, KnownSet};

/// Objects of `current` whose designation is not in `known`.
///
/// Catalog order is preserved and a designation repeated within the catalog is reported
/// once, at its first occurrence. `known` is never modified; committing the union is the
/// caller's job once the whole cycle has succeeded.
pub fn new_objects<'a>(
    current: &'a [CelestialObject],
    known: &KnownSet,
) -> Vec<&'a CelestialObject> {
    let mut seen = HashSet::new();
    current
        .iter()
        .filter(|object| !known.contains(&object.designation))
        .filter(|object| seen.insert(object.designation.as_str()))
        .collect()
}

/// Designations of `current`, in catalog order, without duplicates.
pub fn current_designations(current: &[CelestialObject]) -> Vec<&str> {
    let mut seen = HashSet::new();
    current
        .iter()
        .map(|object| object.designation.as_str())
        .filter(|designation| seen.insert(*designation))
        .collect()
}
