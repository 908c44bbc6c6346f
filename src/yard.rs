//! The yard: a grid of `(row, bay)` columns, each a stack of containers.
//!
//! A [`Yard`] is cheap to clone: cloning copies the column index (a small
//! `HashMap`) but every column's backing `Vec<BoxId>` is `Arc`-shared, so a
//! beam branch that mutates one column does not pay for copying the rest of
//! the grid. This mirrors the `Arc`-sharing used for pipeline state
//! elsewhere in this crate; a bespoke delta-arena was not worth it at the
//! yard sizes this planner targets.

use crate::errors::PlannerError;
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub type BoxId = u32;
pub type ColumnKey = (i32, i32);

#[derive(Clone, Debug, Default)]
pub struct Yard {
    columns: HashMap<ColumnKey, Arc<Vec<BoxId>>>,
    pub max_row: i32,
    pub max_bay: i32,
    pub max_level: i32,
}

impl Yard {
    pub fn new(max_row: i32, max_bay: i32, max_level: i32) -> Self {
        Yard { columns: HashMap::new(), max_row, max_bay, max_level }
    }

    /// Build a yard from `(container_id, row, bay, level)` rows. Levels
    /// within a column must form a contiguous `0..n` run with no gaps or
    /// duplicates, and no container id may repeat.
    pub fn from_boxes(max_row: i32, max_bay: i32, max_level: i32, boxes: &[(BoxId, i32, i32, i32)]) -> Result<Self> {
        let mut by_column: HashMap<ColumnKey, Vec<(i32, BoxId)>> = HashMap::new();
        let mut seen: HashSet<BoxId> = HashSet::new();
        for &(id, row, bay, level) in boxes {
            if !seen.insert(id) {
                return Err(PlannerError::DataInconsistent(format!("duplicate container id {id}")).into());
            }
            by_column.entry((row, bay)).or_default().push((level, id));
        }
        let mut columns = HashMap::new();
        for (col, mut entries) in by_column {
            entries.sort_by_key(|&(level, _)| level);
            for (idx, &(level, _)) in entries.iter().enumerate() {
                if level as usize != idx {
                    return Err(PlannerError::DataInconsistent(format!(
                        "column {col:?} has a gap or duplicate at level {level}"
                    ))
                    .into());
                }
            }
            let stack: Vec<BoxId> = entries.into_iter().map(|(_, id)| id).collect();
            if stack.len() as i32 > max_level {
                return Err(PlannerError::DataInconsistent(format!(
                    "column {col:?} exceeds max_level {max_level}"
                ))
                .into());
            }
            columns.insert(col, Arc::new(stack));
        }
        Ok(Yard { columns, max_row, max_bay, max_level })
    }

    pub fn height_of(&self, col: ColumnKey) -> usize {
        self.columns.get(&col).map(|v| v.len()).unwrap_or(0)
    }

    pub fn top_of(&self, col: ColumnKey) -> Option<BoxId> {
        self.columns.get(&col).and_then(|v| v.last().copied())
    }

    /// Column and 0-based level of a container, if it is in the yard.
    pub fn locate(&self, box_id: BoxId) -> Option<(ColumnKey, usize)> {
        for (&col, stack) in &self.columns {
            if let Some(level) = stack.iter().position(|&id| id == box_id) {
                return Some((col, level));
            }
        }
        None
    }

    /// How many containers currently sit above this one in its column.
    pub fn blockers_above(&self, box_id: BoxId) -> Result<usize> {
        let (col, level) = self
            .locate(box_id)
            .ok_or_else(|| PlannerError::DataInconsistent(format!("container {box_id} not in yard")))?;
        let height = self.height_of(col);
        Ok(height - level - 1)
    }

    /// True if any container in `set` sits anywhere in this column.
    pub fn column_contains_any(&self, col: ColumnKey, set: &HashSet<BoxId>) -> bool {
        self.columns.get(&col).is_some_and(|v| v.iter().any(|id| set.contains(id)))
    }

    /// Pop the top container off `col`, returning the new yard and the
    /// container that was removed.
    pub fn remove_top(&self, col: ColumnKey) -> Result<(Yard, BoxId)> {
        let stack = self
            .columns
            .get(&col)
            .ok_or_else(|| PlannerError::DataInconsistent(format!("column {col:?} is empty")))?;
        let top = *stack
            .last()
            .ok_or_else(|| PlannerError::DataInconsistent(format!("column {col:?} is empty")))?;
        let mut new_stack = (**stack).clone();
        new_stack.pop();
        let mut next = self.clone();
        next.columns.insert(col, Arc::new(new_stack));
        Ok((next, top))
    }

    /// Push a container on top of `col`. Fails if the column is already at
    /// `max_level`.
    pub fn push_on(&self, col: ColumnKey, box_id: BoxId) -> Result<Yard> {
        let height = self.height_of(col);
        if height as i32 >= self.max_level {
            return Err(PlannerError::NoFeasibleRelocation(format!("column {col:?} is full")).into());
        }
        let mut new_stack = self.columns.get(&col).map(|v| (**v).clone()).unwrap_or_default();
        new_stack.push(box_id);
        let mut next = self.clone();
        next.columns.insert(col, Arc::new(new_stack));
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Yard {
        Yard::from_boxes(3, 3, 3, &[(1, 0, 0, 0), (2, 0, 0, 1), (3, 1, 1, 0)]).unwrap()
    }

    #[test]
    fn blockers_above_counts_only_above() {
        let y = sample();
        assert_eq!(y.blockers_above(1).unwrap(), 1);
        assert_eq!(y.blockers_above(2).unwrap(), 0);
        assert_eq!(y.blockers_above(3).unwrap(), 0);
    }

    #[test]
    fn remove_and_push_preserve_siblings() {
        let y = sample();
        let (y2, top) = y.remove_top((0, 0)).unwrap();
        assert_eq!(top, 2);
        assert_eq!(y2.height_of((0, 0)), 1);
        // untouched column is identical, same Arc contents
        assert_eq!(y2.top_of((1, 1)), Some(3));
        let y3 = y2.push_on((0, 1), top).unwrap();
        assert_eq!(y3.top_of((0, 1)), Some(2));
        assert_eq!(y3.height_of((0, 0)), 1);
    }

    #[test]
    fn rejects_gaps_in_a_column() {
        let err = Yard::from_boxes(3, 3, 3, &[(1, 0, 0, 0), (2, 0, 0, 2)]);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_duplicate_container_ids() {
        let err = Yard::from_boxes(3, 3, 3, &[(1, 0, 0, 0), (1, 0, 1, 0)]);
        assert!(err.is_err());
    }

    #[test]
    fn push_on_full_column_fails() {
        let y = Yard::from_boxes(3, 3, 1, &[(1, 0, 0, 0)]).unwrap();
        assert!(y.push_on((0, 0), 2).is_err());
    }
}
