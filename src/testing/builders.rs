//! Fluent builders for assembling yard contents in tests.

use crate::yard::BoxId;

/// Accumulates `(container_id, row, bay, level)` tuples for
/// [`crate::yard::Yard::from_boxes`].
#[derive(Default, Clone)]
pub struct YardBuilder {
    boxes: Vec<(BoxId, i32, i32, i32)>,
}

impl YardBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack `boxes` bottom-to-top in column `(row, bay)`.
    #[must_use]
    pub fn column(mut self, row: i32, bay: i32, boxes: &[BoxId]) -> Self {
        for (level, &id) in boxes.iter().enumerate() {
            self.boxes.push((id, row, bay, level as i32));
        }
        self
    }

    #[must_use]
    pub fn build(self) -> Vec<(BoxId, i32, i32, i32)> {
        self.boxes
    }
}
