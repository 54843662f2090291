//! DXF writer module

mod entity_writer;
mod section_writer;
mod stream_writer;

pub use stream_writer::{DxfStreamWriter, DxfStreamWriterExt, DxfTextWriter};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::document::JwwDocument;
use crate::error::Result;

use section_writer::SectionWriter;

/// ASCII DXF writer for a decoded JWW document.
///
/// Borrows the document; the emitted DXF targets AutoCAD 2000 (`AC1015`).
pub struct DxfWriter<'a> {
    document: &'a JwwDocument,
}

impl<'a> DxfWriter<'a> {
    /// Create a new DXF writer for a document.
    pub fn new(document: &'a JwwDocument) -> Self {
        Self { document }
    }

    /// Write to a file.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to_writer(BufWriter::new(file))
    }

    /// Write to any writer.
    pub fn write_to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut stream = DxfTextWriter::new(writer);
        self.write_dxf(&mut stream)?;
        stream.flush()
    }

    /// Write to a string.
    pub fn write_to_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to_writer(&mut buffer)?;
        // The writer only ever produces ASCII codes and UTF-8 strings
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn write_dxf<W: DxfStreamWriter>(&self, writer: &mut W) -> Result<()> {
        let mut sections = SectionWriter::new(writer, self.document);
        sections.write_header()?;
        sections.write_tables()?;
        sections.write_blocks()?;
        sections.write_entities()?;
        writer.write_eof()
    }
}
