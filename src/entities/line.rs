//! Line entity

use super::EntityCommon;
use crate::types::Vector2;

/// A line entity defined by two endpoints (`CDataSen`).
#[derive(Debug, Clone, Default)]
pub struct Line {
    /// Common entity data
    pub common: EntityCommon,
    /// Start point of the line
    pub start: Vector2,
    /// End point of the line
    pub end: Vector2,
}

impl Line {
    /// Create a new line between two points
    pub fn from_points(start: Vector2, end: Vector2) -> Self {
        Line {
            common: EntityCommon::default(),
            start,
            end,
        }
    }

    /// Get the length of the line
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Get the midpoint of the line
    pub fn midpoint(&self) -> Vector2 {
        self.start.midpoint(&self.end)
    }
}
