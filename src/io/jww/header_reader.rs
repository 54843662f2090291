//! JWW header walker.
//!
//! The prologue between the version dword and the entity stream is a long,
//! strictly positional run of setting blocks. Only the memo, paper size,
//! write-group index and the 16x16 layer grid are retained; everything else
//! is skipped by byte count. The skip table is data, not inline arithmetic,
//! so every step can fail with its own label.

use std::io::Read;

use tracing::debug;

use crate::document::{JwwDocument, LAYERS_PER_GROUP, LAYER_GROUP_COUNT};
use crate::error::{ErrorContext, Result};

use super::stream_reader::JwwStreamReader;

/// One run of bytes to skip, gated on the file version.
struct SkipBlock {
    /// Applies when `min_version <= version < max_version`.
    min_version: u32,
    max_version: u32,
    bytes: usize,
    label: &'static str,
}

const fn all(bytes: usize, label: &'static str) -> SkipBlock {
    SkipBlock {
        min_version: 0,
        max_version: u32::MAX,
        bytes,
        label,
    }
}

const fn since(version: u32, bytes: usize, label: &'static str) -> SkipBlock {
    SkipBlock {
        min_version: version,
        max_version: u32::MAX,
        bytes,
        label,
    }
}

const fn before(version: u32, bytes: usize, label: &'static str) -> SkipBlock {
    SkipBlock {
        min_version: 0,
        max_version: version,
        bytes,
        label,
    }
}

/// Setting blocks between the layer-group table and the layer-name table.
const PRE_NAME_SKIPS: &[SkipBlock] = &[
    all(14 * 4, "skipping reserved settings"),
    all(5 * 4, "skipping dimension settings"),
    all(4, "skipping reserved dword"),
    all(4, "skipping max line width"),
    all(16, "skipping printer origin"),
    all(8, "skipping printer scale"),
    all(4, "skipping printer settings"),
    all(4 + 40, "skipping grid settings"),
];

/// Setting blocks between the name tables and the SXF tables.
const MID_SKIPS: &[SkipBlock] = &[
    all(36, "skipping shadow settings"),
    since(300, 16, "skipping sky settings"),
    all(4, "skipping 2.5D unit"),
    all(24, "skipping screen scale and origin"),
    all(24, "skipping range memory"),
    since(300, 8 * 28, "skipping mark jump settings"),
    before(300, 4 * 24, "skipping mark jump settings"),
    since(300, 7 * 8 + 4, "skipping text drawing settings"),
    all(80, "skipping multiple line spacing"),
    all(8, "skipping double-sided line end"),
    all(10 * 8, "skipping pen color table"),
    all(10 * 16, "skipping printer pen table"),
    all(8 * 16, "skipping line types 2-9"),
    all(5 * 20, "skipping random line types 11-15"),
    all(4 * 16, "skipping double-length line types 16-19"),
    all(32, "skipping draw settings"),
    all(12, "skipping print settings"),
    all(12 + 48, "skipping 2.5D view settings"),
    all(32, "skipping dimension values"),
    all(8, "skipping solid color settings"),
];

/// Setting blocks after the SXF tables, ending at the entity stream.
const POST_SXF_SKIPS: &[SkipBlock] = &[
    all(10 * 28, "skipping text style table"),
    all(24 + 8, "skipping current text settings"),
    all(16, "skipping text line spacing"),
    all(4 + 48, "skipping text base point offset"),
];

/// Walks the document prologue, filling the retained fields of `doc`.
///
/// Expects the stream positioned right after the version dword; leaves it
/// at the first byte of the entity stream.
pub(crate) struct HeaderReader<'a, R: Read> {
    stream: &'a mut JwwStreamReader<R>,
    version: u32,
}

impl<'a, R: Read> HeaderReader<'a, R> {
    pub(crate) fn new(stream: &'a mut JwwStreamReader<R>, version: u32) -> Self {
        Self { stream, version }
    }

    pub(crate) fn read_into(&mut self, doc: &mut JwwDocument) -> Result<()> {
        doc.memo = self.stream.read_string().context("reading memo")?;
        doc.paper_size = self.stream.read_u32().context("reading paper size")?;
        doc.write_layer_group = self
            .stream
            .read_u32()
            .context("reading write layer group")?;

        self.read_layer_groups(doc)?;
        self.run_skips(PRE_NAME_SKIPS)?;
        self.read_layer_names(doc)?;
        self.run_skips(MID_SKIPS)?;
        if self.version >= 420 {
            self.skip_sxf_tables()?;
        }
        self.run_skips(POST_SXF_SKIPS)?;

        debug!(
            version = self.version,
            paper_size = doc.paper_size,
            "header walk complete"
        );
        Ok(())
    }

    fn read_layer_groups(&mut self, doc: &mut JwwDocument) -> Result<()> {
        for g in 0..LAYER_GROUP_COUNT {
            let group = &mut doc.layer_groups[g];
            group.state = self
                .stream
                .read_u32()
                .with_context(|| format!("reading layer group {} state", g))?;
            group.write_layer = self
                .stream
                .read_u32()
                .with_context(|| format!("reading layer group {} write layer", g))?;
            group.scale = self
                .stream
                .read_f64()
                .with_context(|| format!("reading layer group {} scale", g))?;
            group.protect = self
                .stream
                .read_u32()
                .with_context(|| format!("reading layer group {} protect", g))?;

            for l in 0..LAYERS_PER_GROUP {
                group.layers[l].state = self
                    .stream
                    .read_u32()
                    .with_context(|| format!("reading layer {}-{} state", g, l))?;
                group.layers[l].protect = self
                    .stream
                    .read_u32()
                    .with_context(|| format!("reading layer {}-{} protect", g, l))?;
            }
        }
        Ok(())
    }

    fn read_layer_names(&mut self, doc: &mut JwwDocument) -> Result<()> {
        for g in 0..LAYER_GROUP_COUNT {
            for l in 0..LAYERS_PER_GROUP {
                doc.layer_groups[g].layers[l].name = self
                    .stream
                    .read_string()
                    .with_context(|| format!("reading layer name {}-{}", g, l))?;
            }
        }
        for g in 0..LAYER_GROUP_COUNT {
            doc.layer_groups[g].name = self
                .stream
                .read_string()
                .with_context(|| format!("reading layer group name {}", g))?;
        }
        Ok(())
    }

    fn run_skips(&mut self, blocks: &[SkipBlock]) -> Result<()> {
        for block in blocks {
            if self.version >= block.min_version && self.version < block.max_version {
                self.stream.skip(block.bytes).context(block.label)?;
            }
        }
        Ok(())
    }

    /// SXF extended color and line-type tables (version >= 420).
    ///
    /// These cannot be skipped as one run: the printer-color and
    /// line-type-parameter tables embed a name string per row, which must
    /// be consumed to keep the stream aligned.
    fn skip_sxf_tables(&mut self) -> Result<()> {
        self.stream
            .skip(257 * 8)
            .context("skipping SXF screen colors")?;

        for n in 0..=256 {
            self.stream
                .read_string()
                .with_context(|| format!("skipping SXF printer color name {}", n))?;
            self.stream
                .skip(16)
                .with_context(|| format!("skipping SXF printer color {}", n))?;
        }

        self.stream
            .skip(33 * 16)
            .context("skipping SXF line types")?;

        for n in 0..=32 {
            self.stream
                .read_string()
                .with_context(|| format!("skipping SXF line type name {}", n))?;
            self.stream
                .skip(4 + 80)
                .with_context(|| format!("skipping SXF line type params {}", n))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JwwError;
    use std::io::Cursor;

    fn applicable_sum(blocks: &[SkipBlock], version: u32) -> usize {
        blocks
            .iter()
            .filter(|b| version >= b.min_version && version < b.max_version)
            .map(|b| b.bytes)
            .sum()
    }

    #[test]
    fn test_skip_table_sums() {
        assert_eq!(applicable_sum(PRE_NAME_SKIPS, 251), 156);
        assert_eq!(applicable_sum(PRE_NAME_SKIPS, 600), 156);

        // Legacy files take the 4-set mark-jump block and no sky/text blocks
        assert_eq!(applicable_sum(MID_SKIPS, 251), 948);
        // Ver.3.00 adds sky (16), the 8-set mark jump (+128) and text
        // drawing settings (60)
        assert_eq!(applicable_sum(MID_SKIPS, 300), 1152);
        assert_eq!(applicable_sum(MID_SKIPS, 600), 1152);

        assert_eq!(applicable_sum(POST_SXF_SKIPS, 251), 380);
        assert_eq!(applicable_sum(POST_SXF_SKIPS, 600), 380);
    }

    /// Hand-built minimal v251 header: every retained field zero/empty,
    /// every skipped region zeroed. The walker must consume it exactly.
    #[test]
    fn test_walk_v251_alignment() {
        let mut data = Vec::new();
        data.push(0); // memo
        data.extend_from_slice(&[0; 8]); // paper size + write group
        for _ in 0..16 {
            data.extend_from_slice(&[0; 20]); // state, write layer, scale, protect
            data.extend_from_slice(&[0; 128]); // 16 layers x (state, protect)
        }
        data.extend_from_slice(&vec![0; 156]); // pre-name skips
        data.extend_from_slice(&vec![0; 256 + 16]); // empty name strings
        data.extend_from_slice(&vec![0; 948]); // mid skips, v < 300
        data.extend_from_slice(&vec![0; 380]); // post-SXF skips

        let mut stream = JwwStreamReader::new(Cursor::new(data));
        let mut doc = JwwDocument::new();
        HeaderReader::new(&mut stream, 251)
            .read_into(&mut doc)
            .unwrap();

        // Stream must sit exactly at the end
        assert!(matches!(stream.read_u8(), Err(JwwError::UnexpectedEnd)));
    }

    #[test]
    fn test_truncated_header_names_the_step() {
        // Enough for memo/paper/write-group, then 3 dwords of group 0
        let mut data = vec![0u8];
        data.extend_from_slice(&[0; 8]);
        data.extend_from_slice(&[0; 12]);

        let mut stream = JwwStreamReader::new(Cursor::new(data));
        let mut doc = JwwDocument::new();
        let err = HeaderReader::new(&mut stream, 600)
            .read_into(&mut doc)
            .unwrap_err();
        assert!(err.to_string().contains("layer group 0"));
    }
}
