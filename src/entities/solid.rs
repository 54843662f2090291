//! Solid fill entity

use super::EntityCommon;
use crate::types::Vector2;

/// A filled quadrilateral (`CDataSolid`).
///
/// `corners` holds the logical corner order p1..p4. On disk the corners are
/// stored as p1, p4, p2, p3; the decoder restores the logical order.
#[derive(Debug, Clone, Default)]
pub struct Solid {
    /// Common entity data
    pub common: EntityCommon,
    /// Corner points in logical order
    pub corners: [Vector2; 4],
    /// Direct RGB fill color; present on disk only when pen color == 10.
    pub rgb: Option<u32>,
}
