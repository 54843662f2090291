//! Arc / circle / ellipse entity

use super::EntityCommon;
use crate::types::Vector2;

/// Geometric classification of an [`Arc`], as the DXF emitter sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcKind {
    /// Full circle (flatness == 1.0 and the full-circle flag set).
    Circle,
    /// Elliptical geometry (flatness != 1.0), full or partial.
    Ellipse,
    /// Circular arc.
    Arc,
}

/// An arc entity (`CDataEnko`).
///
/// One JWW class covers circles, circular arcs, ellipses and elliptical
/// arcs; `flatness` and `is_full_circle` discriminate between them.
/// All angles are in radians.
#[derive(Debug, Clone, Default)]
pub struct Arc {
    /// Common entity data
    pub common: EntityCommon,
    /// Center point
    pub center: Vector2,
    /// Radius (major radius for elliptical geometry)
    pub radius: f64,
    /// Start angle in radians
    pub start_angle: f64,
    /// Swept angle in radians
    pub arc_angle: f64,
    /// Major-axis tilt in radians
    pub tilt_angle: f64,
    /// Minor/major axis ratio; 1.0 means circular geometry
    pub flatness: f64,
    /// Whether this is a closed figure
    pub is_full_circle: bool,
}

impl Arc {
    /// End angle in radians (start plus sweep).
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.arc_angle
    }

    /// Classify the geometry.
    ///
    /// A full circle with non-unit flatness classifies as an ellipse; the
    /// emitter renders it spanning `[0, 2*PI]`.
    pub fn kind(&self) -> ArcKind {
        if self.is_full_circle && self.flatness == 1.0 {
            ArcKind::Circle
        } else if self.flatness != 1.0 {
            ArcKind::Ellipse
        } else {
            ArcKind::Arc
        }
    }
}
