//! File format I/O: JWW reading, DXF writing

pub mod dxf;
pub mod jww;
