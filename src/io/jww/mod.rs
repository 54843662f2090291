//! JWW file reader

mod header_reader;
mod object_reader;
mod stream_reader;

pub use object_reader::RECOGNIZED_CLASSES;
pub use stream_reader::{JwwStreamReader, SIGNATURE};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::document::JwwDocument;
use crate::entities::EntityType;
use crate::error::{ErrorContext, Result};
use crate::notification::NotificationType;

use header_reader::HeaderReader;
use object_reader::ObjectReader;

/// JWW file reader.
///
/// Borrows a byte source for the duration of one parse; a fresh reader is
/// needed per document. Parsing runs to completion or to the first fatal
/// error; the format is positional and offers no resynchronization.
pub struct JwwReader<R: Read> {
    stream: JwwStreamReader<R>,
}

impl JwwReader<BufReader<File>> {
    /// Open a JWW file for reading.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: Read> JwwReader<R> {
    /// Create a reader over any byte source.
    pub fn from_reader(source: R) -> Self {
        Self {
            stream: JwwStreamReader::new(source),
        }
    }

    /// Parse the complete document.
    pub fn read(mut self) -> Result<JwwDocument> {
        self.stream.read_signature()?;

        let version = self.stream.read_u32().context("reading version")?;
        debug!(version, "parsing JWW document");

        let mut doc = JwwDocument {
            version,
            ..JwwDocument::new()
        };

        HeaderReader::new(&mut self.stream, version).read_into(&mut doc)?;

        let mut objects = ObjectReader::new(&mut self.stream, version);
        doc.entities = objects.read_entity_list().context("parsing entity list")?;
        doc.block_defs = objects.read_block_defs().context("parsing block def list")?;

        doc.notifications = self.stream.take_notifications();
        note_block_substitutions(&mut doc);

        debug!(
            entities = doc.entities.len(),
            block_defs = doc.block_defs.len(),
            "parse complete"
        );
        Ok(doc)
    }
}

/// Record where the emitter will have to synthesize `BLOCK_<id>` names:
/// unnamed definitions and inserts pointing at ids with no definition.
fn note_block_substitutions(doc: &mut JwwDocument) {
    let mut notes = Vec::new();

    for def in &doc.block_defs {
        if def.name.is_empty() {
            notes.push(format!(
                "block definition {} has no name; inserts will reference BLOCK_{}",
                def.id, def.id
            ));
        }
    }

    for entity in &doc.entities {
        if let EntityType::Insert(insert) = entity {
            if doc.block_def(insert.def_id).is_none() {
                notes.push(format!(
                    "block insert references undefined definition {}",
                    insert.def_id
                ));
            }
        }
    }

    for note in notes {
        doc.notifications.notify(NotificationType::Substitution, note);
    }
}
