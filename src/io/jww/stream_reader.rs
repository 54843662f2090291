//! Binary stream reader for the JWW format.
//!
//! Wraps a byte source with the little-endian primitive reads the format is
//! built from, plus the MFC-style length-prefixed string read. The reader is
//! strictly forward-only; the format offers nothing to seek back to.

use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::SHIFT_JIS;

use crate::error::{JwwError, Result};
use crate::notification::{NotificationCollection, NotificationType};

/// The 8-byte file signature every JWW file starts with.
pub const SIGNATURE: &[u8; 8] = b"JwwData.";

/// Forward-only little-endian reader over a JWW byte source.
pub struct JwwStreamReader<R: Read> {
    source: R,
    notifications: NotificationCollection,
}

impl<R: Read> JwwStreamReader<R> {
    /// Create a new reader wrapping a byte source.
    pub fn new(source: R) -> Self {
        Self {
            source,
            notifications: NotificationCollection::new(),
        }
    }

    /// Take the notifications collected so far (encoding fallbacks).
    pub fn take_notifications(&mut self) -> NotificationCollection {
        std::mem::take(&mut self.notifications)
    }

    /// Read and validate the `JwwData.` signature.
    pub fn read_signature(&mut self) -> Result<()> {
        let mut sig = [0u8; 8];
        self.source.read_exact(&mut sig).map_err(map_eof)?;
        if &sig != SIGNATURE {
            return Err(JwwError::InvalidSignature);
        }
        Ok(())
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.source.read_u8().map_err(map_eof)
    }

    /// Read a 16-bit unsigned integer (little-endian).
    pub fn read_u16(&mut self) -> Result<u16> {
        self.source.read_u16::<LittleEndian>().map_err(map_eof)
    }

    /// Read a 32-bit unsigned integer (little-endian).
    pub fn read_u32(&mut self) -> Result<u32> {
        self.source.read_u32::<LittleEndian>().map_err(map_eof)
    }

    /// Read a 64-bit IEEE-754 float (little-endian, bit-exact).
    pub fn read_f64(&mut self) -> Result<f64> {
        self.source.read_f64::<LittleEndian>().map_err(map_eof)
    }

    /// Read exactly `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.source.read_exact(&mut buf).map_err(map_eof)?;
        Ok(buf)
    }

    /// Skip exactly `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        let copied = io::copy(&mut self.source.by_ref().take(n as u64), &mut io::sink())?;
        if copied != n as u64 {
            return Err(JwwError::UnexpectedEnd);
        }
        Ok(())
    }

    /// Read a length-prefixed string (MFC CString serialization).
    ///
    /// The length prefix is 1 byte; `0xFF` escalates to a 2-byte length and
    /// `0xFFFF` there escalates again to a 4-byte length. The bytes are
    /// Shift_JIS; malformed sequences fall back to the raw bytes mapped as
    /// Unicode code points rather than failing the parse. Trailing NULs are
    /// trimmed.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_string_length()?;
        if len == 0 {
            return Ok(String::new());
        }

        let bytes = self.read_bytes(len)?;
        let (decoded, had_errors) = SHIFT_JIS.decode_without_bom_handling(&bytes);
        let text = if had_errors {
            self.notifications.notify(
                NotificationType::Warning,
                format!("Shift_JIS decode fell back to raw bytes ({} bytes)", bytes.len()),
            );
            bytes.iter().map(|&b| char::from(b)).collect()
        } else {
            decoded.into_owned()
        };

        Ok(text.trim_end_matches('\0').to_string())
    }

    fn read_string_length(&mut self) -> Result<usize> {
        let len8 = self.read_u8()?;
        if len8 < 0xFF {
            return Ok(len8 as usize);
        }
        let len16 = self.read_u16()?;
        if len16 < 0xFFFF {
            return Ok(len16 as usize);
        }
        Ok(self.read_u32()? as usize)
    }
}

/// Translate a short read into `UnexpectedEnd`; pass other IO errors through.
fn map_eof(err: io::Error) -> JwwError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        JwwError::UnexpectedEnd
    } else {
        JwwError::Io(err)
    }
}
