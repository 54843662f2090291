//! Point entity

use super::EntityCommon;
use crate::types::Vector2;

/// Extended marker data carried by a point whose pen style is 100.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointMarker {
    /// Marker code (arrow, tick, etc.)
    pub code: u32,
    /// Marker rotation in radians
    pub angle: f64,
    /// Marker scale factor
    pub scale: f64,
}

/// A point entity (`CDataTen`).
#[derive(Debug, Clone, Default)]
pub struct Point {
    /// Common entity data
    pub common: EntityCommon,
    /// Position
    pub position: Vector2,
    /// Temporary construction point; the emitter drops these.
    pub is_temporary: bool,
    /// Marker data; present on disk only when pen style == 100.
    pub marker: Option<PointMarker>,
}
