//! Object-stream decoder.
//!
//! The entity list and every block definition's nested list share one
//! serialization convention: a count-prefixed sequence of records, each
//! tagged with either an inline class declaration or a back-reference to a
//! class already declared in the same stream. Class ids are 1-based and
//! private to their stream.

use std::io::Read;

use tracing::debug;

use crate::entities::{
    Arc, BlockDef, BlockInsert, Dimension, EntityCommon, EntityType, Line, Point, PointMarker,
    Solid, Text,
};
use crate::error::{ErrorContext, JwwError, Result};
use crate::types::Vector2;

use super::stream_reader::JwwStreamReader;

/// Null object: consumes no body, contributes nothing.
const TAG_NULL: u16 = 0x8000;
/// Inline class declaration follows.
const TAG_NEW_CLASS: u16 = 0xFFFF;

/// Pen style that marks a point as carrying extended marker data.
const MARKER_PEN_STYLE: u8 = 100;
/// Pen color that marks a solid as carrying a direct RGB dword.
const RGB_PEN_COLOR: u16 = 10;

const CLASS_LINE: &str = "CDataSen";
const CLASS_ARC: &str = "CDataEnko";
const CLASS_POINT: &str = "CDataTen";
const CLASS_TEXT: &str = "CDataMoji";
const CLASS_SOLID: &str = "CDataSolid";
const CLASS_INSERT: &str = "CDataBlock";
const CLASS_DIMENSION: &str = "CDataSunpou";
const CLASS_BLOCK_DEF: &str = "CDataList";

/// Every class name this decoder recognizes.
pub const RECOGNIZED_CLASSES: &[&str] = &[
    CLASS_LINE,
    CLASS_ARC,
    CLASS_POINT,
    CLASS_TEXT,
    CLASS_SOLID,
    CLASS_INSERT,
    CLASS_DIMENSION,
    CLASS_BLOCK_DEF,
];

/// Insertion-ordered class-name dictionary, ids 1-based.
#[derive(Default)]
struct ClassDirectory {
    names: Vec<String>,
}

impl ClassDirectory {
    fn declare(&mut self, name: String) {
        self.names.push(name);
    }

    fn resolve(&self, id: u16) -> Result<&str> {
        id.checked_sub(1)
            .and_then(|i| self.names.get(i as usize))
            .map(String::as_str)
            .ok_or(JwwError::InvalidClassRef(id))
    }
}

/// Decodes object streams and the entity bodies within them.
pub(crate) struct ObjectReader<'a, R: Read> {
    stream: &'a mut JwwStreamReader<R>,
    version: u32,
}

impl<'a, R: Read> ObjectReader<'a, R> {
    pub(crate) fn new(stream: &'a mut JwwStreamReader<R>, version: u32) -> Self {
        Self { stream, version }
    }

    /// Read a full entity stream (count + records).
    pub(crate) fn read_entity_list(&mut self) -> Result<Vec<EntityType>> {
        let count = self.stream.read_u32().context("reading entity count")?;
        debug!(count, "reading entity stream");

        let mut entities = Vec::with_capacity(count.min(4096) as usize);
        let mut classes = ClassDirectory::default();

        for i in 0..count {
            let record = self
                .read_entity_record(&mut classes)
                .with_context(|| format!("parsing entity {}", i))?;
            if let Some(entity) = record {
                entities.push(entity);
            }
        }

        Ok(entities)
    }

    /// Read the block-definition stream that follows the entity stream.
    pub(crate) fn read_block_defs(&mut self) -> Result<Vec<BlockDef>> {
        let count = self.stream.read_u32().context("reading block def count")?;
        debug!(count, "reading block definition stream");

        let mut defs = Vec::with_capacity(count.min(4096) as usize);
        let mut classes = ClassDirectory::default();

        for i in 0..count {
            let record = self
                .read_block_def_record(&mut classes)
                .with_context(|| format!("parsing block def {}", i))?;
            if let Some(def) = record {
                defs.push(def);
            }
        }

        Ok(defs)
    }

    /// Consume one record tag; `None` means a null object.
    fn read_class_name(&mut self, classes: &mut ClassDirectory) -> Result<Option<String>> {
        let tag = self.stream.read_u16()?;
        match tag {
            TAG_NULL => Ok(None),
            TAG_NEW_CLASS => self.read_class_declaration(classes).map(Some),
            id => classes.resolve(id & 0x7FFF).map(|s| Some(s.to_string())),
        }
    }

    /// Inline class declaration: schema word, name length word, raw name
    /// bytes. The new class gets the next 1-based id in this stream.
    fn read_class_declaration(&mut self, classes: &mut ClassDirectory) -> Result<String> {
        let _schema = self.stream.read_u16().context("reading class schema")?;
        let name_len = self
            .stream
            .read_u16()
            .context("reading class name length")?;
        let name_bytes = self
            .stream
            .read_bytes(name_len as usize)
            .context("reading class name")?;
        let name = String::from_utf8_lossy(&name_bytes).into_owned();
        classes.declare(name.clone());
        Ok(name)
    }

    fn read_entity_record(&mut self, classes: &mut ClassDirectory) -> Result<Option<EntityType>> {
        match self.read_class_name(classes)? {
            None => Ok(None),
            Some(name) => self.read_entity_body(&name).map(Some),
        }
    }

    fn read_entity_body(&mut self, class_name: &str) -> Result<EntityType> {
        match class_name {
            CLASS_LINE => self.read_line().map(EntityType::Line),
            CLASS_ARC => self.read_arc().map(EntityType::Arc),
            CLASS_POINT => self.read_point_entity().map(EntityType::Point),
            CLASS_TEXT => self.read_text().map(EntityType::Text),
            CLASS_SOLID => self.read_solid().map(EntityType::Solid),
            CLASS_INSERT => self.read_insert().map(EntityType::Insert),
            CLASS_DIMENSION => self.read_dimension().map(EntityType::Dimension),
            other => Err(JwwError::UnknownClass(other.to_string())),
        }
    }

    fn read_block_def_record(&mut self, classes: &mut ClassDirectory) -> Result<Option<BlockDef>> {
        match self.read_class_name(classes)? {
            None => Ok(None),
            Some(name) if name == CLASS_BLOCK_DEF => self.read_block_def_body().map(Some),
            Some(other) => Err(JwwError::UnknownClass(other)),
        }
    }

    /// The shared entity header every body starts with.
    fn read_common(&mut self) -> Result<EntityCommon> {
        let group = self.stream.read_u32()?;
        let pen_style = self.stream.read_u8()?;
        let pen_color = self.stream.read_u16()?;
        let pen_width = if self.version >= 351 {
            self.stream.read_u16()?
        } else {
            0
        };
        let layer = self.stream.read_u16()?;
        let layer_group = self.stream.read_u16()?;
        let flags = self.stream.read_u16()?;

        Ok(EntityCommon {
            group,
            pen_style,
            pen_color,
            pen_width,
            layer,
            layer_group,
            flags,
        })
    }

    fn read_point(&mut self) -> Result<Vector2> {
        let x = self.stream.read_f64()?;
        let y = self.stream.read_f64()?;
        Ok(Vector2::new(x, y))
    }

    fn read_line(&mut self) -> Result<Line> {
        let common = self.read_common()?;
        let start = self.read_point()?;
        let end = self.read_point()?;
        Ok(Line { common, start, end })
    }

    fn read_arc(&mut self) -> Result<Arc> {
        let common = self.read_common()?;
        let center = self.read_point()?;
        let radius = self.stream.read_f64()?;
        let start_angle = self.stream.read_f64()?;
        let arc_angle = self.stream.read_f64()?;
        let tilt_angle = self.stream.read_f64()?;
        let flatness = self.stream.read_f64()?;
        let is_full_circle = self.stream.read_u32()? != 0;

        Ok(Arc {
            common,
            center,
            radius,
            start_angle,
            arc_angle,
            tilt_angle,
            flatness,
            is_full_circle,
        })
    }

    fn read_point_entity(&mut self) -> Result<Point> {
        let common = self.read_common()?;
        let position = self.read_point()?;
        let is_temporary = self.stream.read_u32()? != 0;

        // Points drawn with pen style 100 carry marker data
        let marker = if common.pen_style == MARKER_PEN_STYLE {
            Some(PointMarker {
                code: self.stream.read_u32()?,
                angle: self.stream.read_f64()?,
                scale: self.stream.read_f64()?,
            })
        } else {
            None
        };

        Ok(Point {
            common,
            position,
            is_temporary,
            marker,
        })
    }

    fn read_text(&mut self) -> Result<Text> {
        let common = self.read_common()?;
        let start = self.read_point()?;
        let end = self.read_point()?;
        let style = self.stream.read_u32()?;
        let size_x = self.stream.read_f64()?;
        let size_y = self.stream.read_f64()?;
        let spacing = self.stream.read_f64()?;
        let angle = self.stream.read_f64()?;
        let font = self.stream.read_string()?;
        let content = self.stream.read_string()?;

        Ok(Text {
            common,
            start,
            end,
            style,
            size_x,
            size_y,
            spacing,
            angle,
            font,
            content,
        })
    }

    fn read_solid(&mut self) -> Result<Solid> {
        let common = self.read_common()?;

        // Disk order is p1, p4, p2, p3
        let p1 = self.read_point()?;
        let p4 = self.read_point()?;
        let p2 = self.read_point()?;
        let p3 = self.read_point()?;

        let rgb = if common.pen_color == RGB_PEN_COLOR {
            Some(self.stream.read_u32()?)
        } else {
            None
        };

        Ok(Solid {
            common,
            corners: [p1, p2, p3, p4],
            rgb,
        })
    }

    fn read_insert(&mut self) -> Result<BlockInsert> {
        let common = self.read_common()?;
        let position = self.read_point()?;
        let scale_x = self.stream.read_f64()?;
        let scale_y = self.stream.read_f64()?;
        let rotation = self.stream.read_f64()?;
        let def_id = self.stream.read_u32()?;

        Ok(BlockInsert {
            common,
            position,
            scale_x,
            scale_y,
            rotation,
            def_id,
        })
    }

    /// Dimension: own header, embedded line body, embedded text body, and
    /// for version >= 420 an SXF trailer (mode word, two helper lines, four
    /// points) that is consumed without being retained.
    fn read_dimension(&mut self) -> Result<Dimension> {
        let common = self.read_common()?;
        let line = self.read_line().context("reading dimension line")?;
        let text = self.read_text().context("reading dimension text")?;

        if self.version >= 420 {
            let _mode = self.stream.read_u16().context("reading dimension mode")?;
            for i in 0..2 {
                self.read_line()
                    .with_context(|| format!("reading dimension helper line {}", i))?;
            }
            for i in 0..4 {
                self.read_point_entity()
                    .with_context(|| format!("reading dimension point {}", i))?;
            }
        }

        Ok(Dimension { common, line, text })
    }

    fn read_block_def_body(&mut self) -> Result<BlockDef> {
        let common = self.read_common()?;
        let id = self.stream.read_u32().context("reading block def id")?;
        let is_referenced = self
            .stream
            .read_u32()
            .context("reading block def referenced flag")?
            != 0;
        self.stream.skip(4).context("skipping block def timestamp")?;
        let name = self.stream.read_string().context("reading block def name")?;
        let entities = self
            .read_entity_list()
            .context("reading block def entities")?;

        Ok(BlockDef {
            common,
            id,
            is_referenced,
            name,
            entities,
        })
    }
}
