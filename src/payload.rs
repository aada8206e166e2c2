//! Payload framing for text messages and named files.
//!
//! The codec treats payloads as opaque bytes. Files are framed as
//! `name length (u32 BE) || UTF-8 name || file bytes` before encoding, so the
//! receiving side can restore the original file name.

use crate::config::LENGTH_FIELD_SIZE;
use crate::error::{Error, Result};
use std::path::Path;

/// How decoded bytes should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadKind {
    /// UTF-8 text.
    #[default]
    Text,
    /// Named file.
    File,
}

/// A logical payload before framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A text message.
    Text(String),
    /// A file with its original name.
    File { name: String, data: Vec<u8> },
}

impl Payload {
    /// Read a file from disk, keeping only its final path component as name.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::InvalidPayload(format!("no usable file name in {}", path.display()))
            })?
            .to_string();
        Ok(Payload::File { name, data })
    }

    /// Kind of this payload.
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Text(_) => PayloadKind::Text,
            Payload::File { .. } => PayloadKind::File,
        }
    }

    /// Frame the payload into bytes for the codec.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Payload::Text(text) => Ok(text.as_bytes().to_vec()),
            Payload::File { name, data } => {
                let name_len = u32::try_from(name.len())
                    .map_err(|_| Error::InvalidPayload("file name too long".to_string()))?;
                let mut out = Vec::with_capacity(LENGTH_FIELD_SIZE + name.len() + data.len());
                out.extend_from_slice(&name_len.to_be_bytes());
                out.extend_from_slice(name.as_bytes());
                out.extend_from_slice(data);
                Ok(out)
            }
        }
    }

    /// Parse decoded bytes as a payload of the given kind.
    pub fn from_bytes(bytes: &[u8], kind: PayloadKind) -> Result<Self> {
        match kind {
            PayloadKind::Text => String::from_utf8(bytes.to_vec())
                .map(Payload::Text)
                .map_err(|_| Error::UnreadablePayload("text is not valid UTF-8".to_string())),
            PayloadKind::File => {
                if bytes.len() < LENGTH_FIELD_SIZE {
                    return Err(Error::UnreadablePayload("missing file name length".to_string()));
                }
                let (len_bytes, rest) = bytes.split_at(LENGTH_FIELD_SIZE);
                let mut len = [0u8; LENGTH_FIELD_SIZE];
                len.copy_from_slice(len_bytes);
                let name_len = u32::from_be_bytes(len) as usize;

                if name_len > rest.len() {
                    return Err(Error::UnreadablePayload(format!(
                        "file name length {} exceeds {} remaining bytes",
                        name_len,
                        rest.len()
                    )));
                }
                let (name, data) = rest.split_at(name_len);
                let name = std::str::from_utf8(name).map_err(|_| {
                    Error::UnreadablePayload("file name is not valid UTF-8".to_string())
                })?;

                Ok(Payload::File {
                    name: name.to_string(),
                    data: data.to_vec(),
                })
            }
        }
    }
}
