//! Block insert entity

use super::EntityCommon;
use crate::types::Vector2;

/// A block insert (`CDataBlock`): one placement of a block definition.
#[derive(Debug, Clone, Default)]
pub struct BlockInsert {
    /// Common entity data
    pub common: EntityCommon,
    /// Reference (insertion) point
    pub position: Vector2,
    /// X scale factor
    pub scale_x: f64,
    /// Y scale factor
    pub scale_y: f64,
    /// Rotation in radians
    pub rotation: f64,
    /// Numeric id of the referenced block definition
    pub def_id: u32,
}
