//! Byte-level builders for JWW test files.
//!
//! These build files from the format contract directly (field by field,
//! region by region) rather than through any crate code, so a builder bug
//! and a parser bug cannot cancel each other out.

#![allow(dead_code)]

/// Builds a complete JWW file: header, entity stream, block-def stream.
pub struct JwwFileBuilder {
    version: u32,
    memo: String,
    layer_names: Vec<(usize, usize, String)>,
    group_names: Vec<(usize, String)>,
    entity_stream: Option<Vec<u8>>,
    block_stream: Option<Vec<u8>>,
}

impl JwwFileBuilder {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            memo: String::new(),
            layer_names: Vec::new(),
            group_names: Vec::new(),
            entity_stream: None,
            block_stream: None,
        }
    }

    pub fn memo(mut self, memo: &str) -> Self {
        self.memo = memo.to_string();
        self
    }

    pub fn layer_name(mut self, group: usize, layer: usize, name: &str) -> Self {
        self.layer_names.push((group, layer, name.to_string()));
        self
    }

    pub fn group_name(mut self, group: usize, name: &str) -> Self {
        self.group_names.push((group, name.to_string()));
        self
    }

    pub fn entities(mut self, stream: Vec<u8>) -> Self {
        self.entity_stream = Some(stream);
        self
    }

    pub fn block_defs(mut self, stream: Vec<u8>) -> Self {
        self.block_stream = Some(stream);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut data = Vec::new();

        // Signature and version
        data.extend_from_slice(b"JwwData.");
        push_u32(&mut data, self.version);

        // Memo, paper size (A3), write layer group
        push_string(&mut data, &self.memo);
        push_u32(&mut data, 3);
        push_u32(&mut data, 0);

        // 16 layer groups: state, write layer, scale, protect + 16 layers
        for _ in 0..16 {
            push_u32(&mut data, 2);
            push_u32(&mut data, 0);
            push_f64(&mut data, 1.0);
            push_u32(&mut data, 0);
            for _ in 0..16 {
                push_u32(&mut data, 2);
                push_u32(&mut data, 0);
            }
        }

        // Settings between the layer grid and the name tables:
        // 14 reserved + 5 dimension + 1 reserved + 1 max-width dwords,
        // printer origin/scale/settings (16+8+4), grid (4+40)
        push_zeros(&mut data, 156);

        // 16x16 layer names, then 16 group names
        for g in 0..16 {
            for l in 0..16 {
                let name = self
                    .layer_names
                    .iter()
                    .find(|(ng, nl, _)| *ng == g && *nl == l)
                    .map(|(_, _, n)| n.as_str())
                    .unwrap_or("");
                push_string(&mut data, name);
            }
        }
        for g in 0..16 {
            let name = self
                .group_names
                .iter()
                .find(|(ng, _)| *ng == g)
                .map(|(_, n)| n.as_str())
                .unwrap_or("");
            push_string(&mut data, name);
        }

        // Shadow (36), sky (16, Ver.3.00+), 2.5D unit (4), screen (24),
        // range (24), mark jump (224 new / 96 legacy), text drawing (60,
        // Ver.3.00+), line spacing (80), line end (8), pen tables (80+160),
        // line types (128+100+64), draw/print/2.5D view (32+12+60),
        // dimension values (32), solid colors (8)
        if self.version >= 300 {
            push_zeros(&mut data, 1152);
        } else {
            push_zeros(&mut data, 948);
        }

        // SXF color and line-type tables (Ver.4.20+); the two string-bearing
        // tables carry one empty name per row
        if self.version >= 420 {
            push_zeros(&mut data, 257 * 8);
            for _ in 0..=256 {
                push_string(&mut data, "");
                push_zeros(&mut data, 16);
            }
            push_zeros(&mut data, 33 * 16);
            for _ in 0..=32 {
                push_string(&mut data, "");
                push_zeros(&mut data, 4 + 80);
            }
        }

        // Text styles (280), current text (32), line spacing (16),
        // base point offset (52)
        push_zeros(&mut data, 380);

        // Object streams; an absent stream is an empty one
        data.extend(self.entity_stream.unwrap_or_else(empty_stream));
        data.extend(self.block_stream.unwrap_or_else(empty_stream));

        data
    }
}

fn empty_stream() -> Vec<u8> {
    vec![0, 0, 0, 0]
}

/// Builds one object stream (entity list or block-def list), interning
/// class names the way real files do: a declaration on first use, a
/// dictionary back-reference afterwards.
pub struct ObjectStreamBuilder {
    version: u32,
    records: Vec<u8>,
    count: u32,
    classes: Vec<&'static str>,
}

impl ObjectStreamBuilder {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            records: Vec::new(),
            count: 0,
            classes: Vec::new(),
        }
    }

    pub fn finish(self) -> Vec<u8> {
        let mut data = Vec::new();
        push_u32(&mut data, self.count);
        data.extend(self.records);
        data
    }

    /// A null record: counts toward the stream count, contributes nothing.
    pub fn add_null(&mut self) -> &mut Self {
        self.count += 1;
        push_u16(&mut self.records, 0x8000);
        self
    }

    pub fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Self {
        self.count += 1;
        self.class_tag("CDataSen");
        self.push_common(1, 1);
        for v in [x1, y1, x2, y2] {
            push_f64(&mut self.records, v);
        }
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        arc_angle: f64,
        tilt_angle: f64,
        flatness: f64,
        full_circle: bool,
    ) -> &mut Self {
        self.count += 1;
        self.class_tag("CDataEnko");
        self.push_common(1, 1);
        for v in [cx, cy, radius, start_angle, arc_angle, tilt_angle, flatness] {
            push_f64(&mut self.records, v);
        }
        push_u32(&mut self.records, full_circle as u32);
        self
    }

    pub fn add_point(&mut self, x: f64, y: f64, temporary: bool) -> &mut Self {
        self.count += 1;
        self.class_tag("CDataTen");
        self.push_common(1, 1);
        push_f64(&mut self.records, x);
        push_f64(&mut self.records, y);
        push_u32(&mut self.records, temporary as u32);
        self
    }

    /// A point with pen style 100 and the extended 20-byte marker tail.
    pub fn add_marker_point(&mut self, x: f64, y: f64, code: u32, angle: f64, scale: f64) -> &mut Self {
        self.count += 1;
        self.class_tag("CDataTen");
        self.push_common(100, 1);
        push_f64(&mut self.records, x);
        push_f64(&mut self.records, y);
        push_u32(&mut self.records, 0);
        push_u32(&mut self.records, code);
        push_f64(&mut self.records, angle);
        push_f64(&mut self.records, scale);
        self
    }

    pub fn add_text(&mut self, x: f64, y: f64, angle_deg: f64, content: &str) -> &mut Self {
        self.count += 1;
        self.class_tag("CDataMoji");
        self.push_common(1, 2);
        self.push_text_body(x, y, angle_deg, content);
        self
    }

    pub fn add_solid(&mut self, corners: [(f64, f64); 4]) -> &mut Self {
        self.count += 1;
        self.class_tag("CDataSolid");
        self.push_common(1, 1);
        // Disk order: p1, p4, p2, p3
        for idx in [0, 3, 1, 2] {
            push_f64(&mut self.records, corners[idx].0);
            push_f64(&mut self.records, corners[idx].1);
        }
        self
    }

    pub fn add_insert(&mut self, x: f64, y: f64, sx: f64, sy: f64, rotation: f64, def_id: u32) -> &mut Self {
        self.count += 1;
        self.class_tag("CDataBlock");
        self.push_common(1, 1);
        for v in [x, y, sx, sy, rotation] {
            push_f64(&mut self.records, v);
        }
        push_u32(&mut self.records, def_id);
        self
    }

    /// A dimension: embedded line and text bodies, plus the SXF trailer on
    /// files of version 4.20 and later.
    pub fn add_dimension(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, label: &str) -> &mut Self {
        self.count += 1;
        self.class_tag("CDataSunpou");
        self.push_common(1, 1);

        // Embedded line body
        self.push_common(1, 1);
        for v in [x1, y1, x2, y2] {
            push_f64(&mut self.records, v);
        }

        // Embedded text body
        self.push_common(1, 2);
        self.push_text_body(x1, y1, 0.0, label);

        if self.version >= 420 {
            push_u16(&mut self.records, 0); // SXF mode
            for _ in 0..2 {
                self.push_common(1, 1);
                for _ in 0..4 {
                    push_f64(&mut self.records, 0.0);
                }
            }
            for _ in 0..4 {
                self.push_common(1, 1);
                push_f64(&mut self.records, 0.0);
                push_f64(&mut self.records, 0.0);
                push_u32(&mut self.records, 0);
            }
        }
        self
    }

    /// A block definition record (`CDataList`); `entities` is a finished
    /// nested stream from another `ObjectStreamBuilder`.
    pub fn add_block_def(&mut self, id: u32, name: &str, entities: Vec<u8>) -> &mut Self {
        self.count += 1;
        self.class_tag("CDataList");
        self.push_common(1, 1);
        push_u32(&mut self.records, id);
        push_u32(&mut self.records, 1); // referenced
        push_u32(&mut self.records, 0); // timestamp, skipped by the parser
        push_string(&mut self.records, name);
        self.records.extend(entities);
        self
    }

    fn class_tag(&mut self, name: &'static str) {
        if let Some(pos) = self.classes.iter().position(|c| *c == name) {
            push_u16(&mut self.records, (pos + 1) as u16);
        } else {
            self.classes.push(name);
            push_u16(&mut self.records, 0xFFFF);
            push_u16(&mut self.records, self.version as u16); // schema
            push_u16(&mut self.records, name.len() as u16);
            self.records.extend_from_slice(name.as_bytes());
        }
    }

    fn push_common(&mut self, pen_style: u8, pen_color: u16) {
        push_u32(&mut self.records, 0); // group
        self.records.push(pen_style);
        push_u16(&mut self.records, pen_color);
        if self.version >= 351 {
            push_u16(&mut self.records, 1); // pen width
        }
        push_u16(&mut self.records, 0); // layer
        push_u16(&mut self.records, 0); // layer group
        push_u16(&mut self.records, 0); // flags
    }

    fn push_text_body(&mut self, x: f64, y: f64, angle_deg: f64, content: &str) {
        push_f64(&mut self.records, x);
        push_f64(&mut self.records, y);
        push_f64(&mut self.records, x + 1.0);
        push_f64(&mut self.records, y);
        push_u32(&mut self.records, 1); // style
        push_f64(&mut self.records, 3.0); // size x
        push_f64(&mut self.records, 3.0); // size y
        push_f64(&mut self.records, 0.0); // spacing
        push_f64(&mut self.records, angle_deg);
        push_string(&mut self.records, ""); // font
        push_string(&mut self.records, content);
    }
}

pub fn push_u16(data: &mut Vec<u8>, v: u16) {
    data.extend_from_slice(&v.to_le_bytes());
}

pub fn push_u32(data: &mut Vec<u8>, v: u32) {
    data.extend_from_slice(&v.to_le_bytes());
}

pub fn push_f64(data: &mut Vec<u8>, v: f64) {
    data.extend_from_slice(&v.to_le_bytes());
}

/// ASCII-only length-prefixed string (short form; test names stay < 255).
pub fn push_string(data: &mut Vec<u8>, s: &str) {
    assert!(s.len() < 255, "builder strings use the short length form");
    data.push(s.len() as u8);
    data.extend_from_slice(s.as_bytes());
}

fn push_zeros(data: &mut Vec<u8>, n: usize) {
    data.extend(std::iter::repeat(0u8).take(n));
}
