//! # jwwrust
//!
//! A pure Rust library for reading Jw_cad (JWW) files and converting their
//! drawing content to ASCII DXF.
//!
//! ## Features
//!
//! - Decode the JWW binary format (versions 2.51 through 7.x)
//! - Layer groups, layers, lines, arcs/circles/ellipses, points, text,
//!   solids, dimensions, block definitions and block inserts
//! - Shift_JIS text decoding with a raw-byte fallback for damaged strings
//! - Emit AutoCAD 2000 (`AC1015`) ASCII DXF
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jwwrust::{JwwReader, DxfWriter};
//!
//! // Read a JWW file
//! let doc = JwwReader::from_file("drawing.jww")?.read()?;
//!
//! // Access entities
//! for entity in &doc.entities {
//!     println!("{}", entity.entity_type());
//! }
//!
//! // Convert to DXF
//! DxfWriter::new(&doc).write_to_file("drawing.dxf")?;
//! # Ok::<(), jwwrust::JwwError>(())
//! ```
//!
//! ## Architecture
//!
//! Decoding is strictly forward-only: a header walk over the positional
//! prologue, then two class-interning object streams (entities, block
//! definitions). Entities are a tagged enum dispatched on by the emitter;
//! there is no global state, and one reader instance parses one document.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod entities;
pub mod error;
pub mod io;
pub mod notification;
pub mod types;

// Re-export commonly used types
pub use document::{JwwDocument, Layer, LayerGroup, LayerState};
pub use entities::{
    Arc, ArcKind, BlockDef, BlockInsert, Dimension, EntityCommon, EntityType, Line, Point, Solid,
    Text,
};
pub use error::{JwwError, Result};
pub use types::Vector2;

// Re-export I/O types
pub use io::dxf::DxfWriter;
pub use io::jww::JwwReader;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse a JWW document from any byte source.
pub fn parse<R: std::io::Read>(source: R) -> Result<JwwDocument> {
    JwwReader::from_reader(source).read()
}

/// Convert a decoded document to ASCII DXF text.
pub fn convert(document: &JwwDocument) -> Result<String> {
    DxfWriter::new(document).write_to_string()
}
