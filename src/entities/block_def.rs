//! Block definition

use super::{EntityCommon, EntityType};

/// A block definition (`CDataList`): a named, reusable entity collection
/// referenced by [`BlockInsert`](super::BlockInsert) via `def_id`.
#[derive(Debug, Clone, Default)]
pub struct BlockDef {
    /// Common entity data; present on disk but unused for rendering.
    pub common: EntityCommon,
    /// Numeric id inserts refer to.
    pub id: u32,
    /// Whether any insert in the file references this definition.
    pub is_referenced: bool,
    /// Block name; may be empty.
    pub name: String,
    /// The definition's entities, in file order.
    pub entities: Vec<EntityType>,
}
