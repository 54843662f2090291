//! JWW document structure

use crate::entities::{BlockDef, EntityType};
use crate::notification::NotificationCollection;

/// Number of layer groups in every JWW document.
pub const LAYER_GROUP_COUNT: usize = 16;

/// Number of layers in every layer group.
pub const LAYERS_PER_GROUP: usize = 16;

/// Display/edit state of a layer or layer group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerState {
    /// Not drawn at all.
    Hidden,
    /// Drawn but not selectable.
    DisplayOnly,
    /// Drawn and editable.
    Editable,
    /// The current write target.
    WriteTarget,
    /// A state value outside the documented 0..=3 range, kept as-is.
    Other(u32),
}

impl LayerState {
    /// Map the on-disk state dword to a `LayerState`.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => LayerState::Hidden,
            1 => LayerState::DisplayOnly,
            2 => LayerState::Editable,
            3 => LayerState::WriteTarget,
            other => LayerState::Other(other),
        }
    }

    /// Whether the layer is hidden (maps to the DXF frozen flag).
    pub fn is_hidden(&self) -> bool {
        matches!(self, LayerState::Hidden)
    }
}

/// A layer within a layer group.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    /// Display/edit state.
    pub state: u32,
    /// Protection flag (non-zero locks the layer).
    pub protect: u32,
    /// Layer name; may be empty.
    pub name: String,
}

impl Layer {
    /// Display/edit state as an enum.
    pub fn layer_state(&self) -> LayerState {
        LayerState::from_raw(self.state)
    }

    /// Whether the layer is locked against editing.
    pub fn is_locked(&self) -> bool {
        self.protect != 0
    }
}

/// A layer group. Every document carries exactly 16 of these, each holding
/// exactly 16 layers; both are addressed by position.
#[derive(Debug, Clone, Default)]
pub struct LayerGroup {
    /// Display/edit state.
    pub state: u32,
    /// Index of the group's current write layer.
    pub write_layer: u32,
    /// Scale denominator (e.g. 100.0 for 1/100).
    pub scale: f64,
    /// Protection flag.
    pub protect: u32,
    /// The group's 16 layers.
    pub layers: [Layer; LAYERS_PER_GROUP],
    /// Group name; may be empty.
    pub name: String,
}

impl LayerGroup {
    /// Display/edit state as an enum.
    pub fn layer_state(&self) -> LayerState {
        LayerState::from_raw(self.state)
    }
}

/// A parsed JWW document.
///
/// Constructed by [`JwwReader`](crate::io::jww::JwwReader); immutable
/// thereafter.
#[derive(Debug, Clone, Default)]
pub struct JwwDocument {
    /// Format version (observed values include 251, 300, 351, 420, 600, 700).
    pub version: u32,
    /// Free-form document memo.
    pub memo: String,
    /// Paper-size code; see [`JwwDocument::paper_size_name`].
    pub paper_size: u32,
    /// Index of the currently writeable layer group.
    pub write_layer_group: u32,
    /// The 16 layer groups.
    pub layer_groups: [LayerGroup; LAYER_GROUP_COUNT],
    /// Document-level entities, in file order.
    pub entities: Vec<EntityType>,
    /// Block definitions, in file order.
    pub block_defs: Vec<BlockDef>,
    /// Non-fatal issues collected during the parse.
    pub notifications: NotificationCollection,
}

impl JwwDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a layer by `(group, layer)` position.
    ///
    /// Returns `None` when either index is outside `0..16`. Entity headers
    /// are not validated on read, so out-of-range references can occur.
    pub fn layer(&self, group: u16, layer: u16) -> Option<&Layer> {
        self.layer_groups
            .get(group as usize)
            .and_then(|g| g.layers.get(layer as usize))
    }

    /// Human-readable paper size for the documented codes.
    pub fn paper_size_name(&self) -> Option<&'static str> {
        match self.paper_size {
            0 => Some("A0"),
            1 => Some("A1"),
            2 => Some("A2"),
            3 => Some("A3"),
            4 => Some("A4"),
            8 => Some("2A"),
            9 => Some("3A"),
            _ => None,
        }
    }

    /// Resolve a block definition by its numeric id.
    pub fn block_def(&self, id: u32) -> Option<&BlockDef> {
        self.block_defs.iter().find(|bd| bd.id == id)
    }
}
