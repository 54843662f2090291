//! DXF section writers
//!
//! Emits the four sections a converted document consists of: HEADER,
//! TABLES (LTYPE, LAYER, STYLE), BLOCKS and ENTITIES.

use bitflags::bitflags;
use indexmap::IndexMap;

use crate::document::{JwwDocument, LAYERS_PER_GROUP, LAYER_GROUP_COUNT};
use crate::error::Result;

use super::entity_writer::{resolve_block_name, EntityWriter};
use super::stream_writer::{DxfStreamWriter, DxfStreamWriterExt};

bitflags! {
    /// Standard flags of a LAYER table entry (group code 70).
    struct LayerFlags: i32 {
        const FROZEN = 1;
        const LOCKED = 4;
    }
}

/// Writes all DXF sections for one document.
pub(crate) struct SectionWriter<'a, W: DxfStreamWriter> {
    writer: &'a mut W,
    doc: &'a JwwDocument,
    /// Block-definition id -> name, in definition order.
    block_names: IndexMap<u32, String>,
}

impl<'a, W: DxfStreamWriter> SectionWriter<'a, W> {
    pub(crate) fn new(writer: &'a mut W, doc: &'a JwwDocument) -> Self {
        let mut block_names = IndexMap::new();
        for def in &doc.block_defs {
            // First definition of an id wins
            block_names.entry(def.id).or_insert_with(|| def.name.clone());
        }
        Self {
            writer,
            doc,
            block_names,
        }
    }

    /// Write the HEADER section.
    pub(crate) fn write_header(&mut self) -> Result<()> {
        self.writer.write_section_start("HEADER")?;

        // AutoCAD 2000 target
        self.writer.write_string(9, "$ACADVER")?;
        self.writer.write_string(1, "AC1015")?;

        // Metric measurement
        self.writer.write_string(9, "$MEASUREMENT")?;
        self.writer.write_i32(70, 1)?;

        self.writer.write_section_end()
    }

    /// Write the TABLES section (LTYPE, LAYER, STYLE).
    pub(crate) fn write_tables(&mut self) -> Result<()> {
        self.writer.write_section_start("TABLES")?;
        self.write_ltype_table()?;
        self.write_layer_table()?;
        self.write_style_table()?;
        self.writer.write_section_end()
    }

    fn write_ltype_table(&mut self) -> Result<()> {
        self.writer.write_string(0, "TABLE")?;
        self.writer.write_string(2, "LTYPE")?;
        self.writer.write_i32(70, 1)?;

        self.writer.write_string(0, "LTYPE")?;
        self.writer.write_string(2, "CONTINUOUS")?;
        self.writer.write_i32(70, 0)?;
        self.writer.write_string(3, "Solid line")?;
        self.writer.write_i32(72, 65)?;
        self.writer.write_i32(73, 0)?;
        self.writer.write_double(40, 0.0)?;

        self.writer.write_string(0, "ENDTAB")
    }

    /// Every `(group, layer)` cell becomes a DXF layer, named cells and
    /// unnamed cells alike, so entity layer references always resolve.
    fn write_layer_table(&mut self) -> Result<()> {
        self.writer.write_string(0, "TABLE")?;
        self.writer.write_string(2, "LAYER")?;
        self.writer
            .write_i32(70, (LAYER_GROUP_COUNT * LAYERS_PER_GROUP) as i32)?;

        for g in 0..LAYER_GROUP_COUNT {
            for l in 0..LAYERS_PER_GROUP {
                let layer = &self.doc.layer_groups[g].layers[l];

                let name = if layer.name.is_empty() {
                    format!("{:X}-{:X}", g, l)
                } else {
                    layer.name.clone()
                };

                let mut flags = LayerFlags::empty();
                if layer.layer_state().is_hidden() {
                    flags |= LayerFlags::FROZEN;
                }
                if layer.is_locked() {
                    flags |= LayerFlags::LOCKED;
                }

                let color = ((g * LAYERS_PER_GROUP + l) % 255 + 1) as i32;

                self.writer.write_string(0, "LAYER")?;
                self.writer.write_string(2, &name)?;
                self.writer.write_i32(70, flags.bits())?;
                self.writer.write_i32(62, color)?;
                self.writer.write_string(6, "CONTINUOUS")?;
            }
        }

        self.writer.write_string(0, "ENDTAB")
    }

    fn write_style_table(&mut self) -> Result<()> {
        self.writer.write_string(0, "TABLE")?;
        self.writer.write_string(2, "STYLE")?;
        self.writer.write_i32(70, 1)?;

        self.writer.write_string(0, "STYLE")?;
        self.writer.write_string(2, "STANDARD")?;
        self.writer.write_i32(70, 0)?;
        self.writer.write_double(40, 0.0)?;
        self.writer.write_double(41, 1.0)?;
        self.writer.write_double(50, 0.0)?;
        self.writer.write_i32(71, 0)?;
        self.writer.write_double(42, 2.5)?;
        self.writer.write_string(3, "txt")?;
        self.writer.write_string(4, "")?;

        self.writer.write_string(0, "ENDTAB")
    }

    /// Write the BLOCKS section: one BLOCK/ENDBLK pair per definition.
    pub(crate) fn write_blocks(&mut self) -> Result<()> {
        self.writer.write_section_start("BLOCKS")?;

        for def in &self.doc.block_defs {
            let name = resolve_block_name(&self.block_names, def.id);

            self.writer.write_string(0, "BLOCK")?;
            self.writer.write_string(8, "0")?;
            self.writer.write_string(2, &name)?;
            self.writer.write_i32(70, 0)?;
            self.writer.write_double(10, 0.0)?;
            self.writer.write_double(20, 0.0)?;
            self.writer.write_double(30, 0.0)?;
            self.writer.write_string(3, &name)?;

            let mut entities = EntityWriter::new(self.writer, self.doc, &self.block_names);
            for entity in &def.entities {
                entities.write_entity(entity)?;
            }

            self.writer.write_string(0, "ENDBLK")?;
            self.writer.write_string(8, "0")?;
        }

        self.writer.write_section_end()
    }

    /// Write the ENTITIES section in source order.
    pub(crate) fn write_entities(&mut self) -> Result<()> {
        self.writer.write_section_start("ENTITIES")?;

        let mut entities = EntityWriter::new(self.writer, self.doc, &self.block_names);
        for entity in &self.doc.entities {
            entities.write_entity(entity)?;
        }

        self.writer.write_section_end()
    }
}
