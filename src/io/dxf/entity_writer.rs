//! Per-entity DXF record emission.
//!
//! Maps decoded JWW entities onto the `(group code, value)` sequences DXF
//! expects for LINE, CIRCLE, ARC, ELLIPSE, POINT, TEXT, SOLID and INSERT.

use indexmap::IndexMap;
use tracing::debug;

use crate::document::JwwDocument;
use crate::entities::{
    Arc, ArcKind, BlockInsert, EntityCommon, EntityType, Line, Point, Solid, Text,
};
use crate::error::Result;
use crate::types::Vector2;

use super::stream_writer::{DxfStreamWriter, DxfStreamWriterExt};

/// Map a JWW pen color to a DXF ACI color index.
///
/// 0 stays 0 (by-layer), the basic palette 1..=9 maps straight through, and
/// the SXF extended palette starting at 100 is shifted down by 90 onto the
/// ACI range starting at 10. Everything else passes through unchanged.
pub(crate) fn map_pen_color(pen_color: u16) -> i32 {
    match pen_color {
        0 => 0,
        c if c <= 9 => c as i32,
        c if c >= 100 => c as i32 - 90,
        c => c as i32,
    }
}

/// Writes entity records into an open BLOCKS or ENTITIES section.
pub(crate) struct EntityWriter<'a, W: DxfStreamWriter> {
    writer: &'a mut W,
    doc: &'a JwwDocument,
    block_names: &'a IndexMap<u32, String>,
}

impl<'a, W: DxfStreamWriter> EntityWriter<'a, W> {
    pub(crate) fn new(
        writer: &'a mut W,
        doc: &'a JwwDocument,
        block_names: &'a IndexMap<u32, String>,
    ) -> Self {
        Self {
            writer,
            doc,
            block_names,
        }
    }

    /// Emit one entity record; temporary points are suppressed.
    pub(crate) fn write_entity(&mut self, entity: &EntityType) -> Result<()> {
        match entity {
            EntityType::Line(line) => self.write_line(line),
            EntityType::Arc(arc) => self.write_arc(arc),
            EntityType::Point(point) => self.write_point_entity(point),
            EntityType::Text(text) => self.write_text(text),
            EntityType::Solid(solid) => self.write_solid(solid),
            EntityType::Insert(insert) => self.write_insert(insert),
            // The embedded line stands in for the whole dimension
            EntityType::Dimension(dim) => self.write_line(&dim.line),
        }
    }

    /// The `0`/`8`/`62` triple every record starts with.
    fn write_record_start(&mut self, record: &str, common: &EntityCommon) -> Result<()> {
        let layer = self.layer_name(common);
        self.writer.write_string(0, record)?;
        self.writer.write_string(8, &layer)?;
        self.writer.write_i32(62, map_pen_color(common.pen_color))
    }

    fn layer_name(&self, common: &EntityCommon) -> String {
        if let Some(layer) = self.doc.layer(common.layer_group, common.layer) {
            if !layer.name.is_empty() {
                return layer.name.clone();
            }
        }
        format!("{:X}-{:X}", common.layer_group, common.layer)
    }

    fn write_line(&mut self, line: &Line) -> Result<()> {
        self.write_record_start("LINE", &line.common)?;
        self.writer.write_point(10, line.start)?;
        self.writer.write_point(11, line.end)
    }

    fn write_arc(&mut self, arc: &Arc) -> Result<()> {
        match arc.kind() {
            ArcKind::Circle => {
                self.write_record_start("CIRCLE", &arc.common)?;
                self.writer.write_point(10, arc.center)?;
                self.writer.write_double(40, arc.radius)
            }
            ArcKind::Ellipse => {
                // Major-axis endpoint relative to the center, tilted
                let major = Vector2::new(
                    arc.radius * arc.tilt_angle.cos(),
                    arc.radius * arc.tilt_angle.sin(),
                );
                let (start_param, end_param) = if arc.is_full_circle {
                    (0.0, 2.0 * std::f64::consts::PI)
                } else {
                    (arc.start_angle, arc.end_angle())
                };

                self.write_record_start("ELLIPSE", &arc.common)?;
                self.writer.write_point(10, arc.center)?;
                self.writer.write_point(11, major)?;
                self.writer.write_double(40, arc.flatness)?;
                self.writer.write_double(41, start_param)?;
                self.writer.write_double(42, end_param)
            }
            ArcKind::Arc => {
                self.write_record_start("ARC", &arc.common)?;
                self.writer.write_point(10, arc.center)?;
                self.writer.write_double(40, arc.radius)?;
                self.writer
                    .write_double(50, arc.start_angle.to_degrees())?;
                self.writer.write_double(51, arc.end_angle().to_degrees())
            }
        }
    }

    fn write_point_entity(&mut self, point: &Point) -> Result<()> {
        if point.is_temporary {
            return Ok(());
        }
        self.write_record_start("POINT", &point.common)?;
        self.writer.write_point(10, point.position)
    }

    fn write_text(&mut self, text: &Text) -> Result<()> {
        self.write_record_start("TEXT", &text.common)?;
        self.writer.write_point(10, text.start)?;
        self.writer.write_double(40, text.size_y)?;
        self.writer.write_string(1, &text.content)?;
        if text.angle != 0.0 {
            self.writer.write_double(50, text.angle)?;
        }
        self.writer.write_string(7, "STANDARD")
    }

    fn write_solid(&mut self, solid: &Solid) -> Result<()> {
        self.write_record_start("SOLID", &solid.common)?;
        for (i, corner) in solid.corners.iter().enumerate() {
            self.writer.write_point(10 + i as i32, *corner)?;
        }
        Ok(())
    }

    fn write_insert(&mut self, insert: &BlockInsert) -> Result<()> {
        let block_name = resolve_block_name(self.block_names, insert.def_id);
        self.write_record_start("INSERT", &insert.common)?;
        self.writer.write_string(2, &block_name)?;
        self.writer.write_point(10, insert.position)?;
        self.writer.write_double(41, insert.scale_x)?;
        self.writer.write_double(42, insert.scale_y)?;
        self.writer.write_double(43, 1.0)?;
        self.writer.write_double(50, insert.rotation.to_degrees())
    }
}

/// Resolve a block-definition id to the name emitted in DXF.
///
/// Missing or empty definition names get the synthetic `BLOCK_<id>` form so
/// every INSERT always names a block.
pub(crate) fn resolve_block_name(block_names: &IndexMap<u32, String>, id: u32) -> String {
    match block_names.get(&id) {
        Some(name) if !name.is_empty() => name.clone(),
        _ => {
            debug!(id, "synthesizing block name");
            format!("BLOCK_{}", id)
        }
    }
}
