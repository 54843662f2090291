//! Dimension entity

use super::{EntityCommon, Line, Text};

/// A dimension entity (`CDataSunpou`).
///
/// On disk a dimension is a composite: its own header, an embedded line
/// (the dimension line) and an embedded text (the measurement label).
/// Files of version >= 420 append SXF helper geometry, which the decoder
/// consumes without retaining.
///
/// The line is the dimension's geometric representative; the label text is
/// kept for consumers even though the DXF emitter currently renders only
/// the line.
#[derive(Debug, Clone, Default)]
pub struct Dimension {
    /// Common entity data
    pub common: EntityCommon,
    /// The dimension line
    pub line: Line,
    /// The measurement label
    pub text: Text,
}
