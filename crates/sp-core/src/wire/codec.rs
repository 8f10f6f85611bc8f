//! Pattern message writer and reader

use super::format::*;
use crate::pattern::Pattern;
use crate::types::PatternParts;

/// Error type for message decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("Data too short")]
    DataTooShort,
    #[error("Invalid bool byte: {0}")]
    InvalidBool(u8),
    #[error("String field is not valid UTF-8")]
    InvalidUtf8,
    #[error("Wildcard flag set on a non-empty field")]
    BrokenInvariant,
    #[error("{0} trailing bytes after message")]
    TrailingBytes(usize),
}

/// Sequential reader over message bytes.
pub struct MessageReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> MessageReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not consumed yet.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_bool(&mut self) -> Result<bool, WireError> {
        if self.remaining() < BOOL_SIZE {
            return Err(WireError::DataTooShort);
        }
        let byte = self.data[self.pos];
        self.pos += BOOL_SIZE;
        match byte {
            BOOL_FALSE => Ok(false),
            BOOL_TRUE => Ok(true),
            other => Err(WireError::InvalidBool(other)),
        }
    }

    pub fn read_string(&mut self) -> Result<String, WireError> {
        if self.remaining() < STRING_LEN_SIZE {
            return Err(WireError::DataTooShort);
        }
        let len = read_u32_le(self.data, self.pos) as usize;
        self.pos += STRING_LEN_SIZE;

        if self.remaining() < len {
            return Err(WireError::DataTooShort);
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;

        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| WireError::InvalidUtf8)
    }

    fn read_parts(&mut self) -> Result<PatternParts, WireError> {
        Ok(PatternParts {
            scheme: self.read_string()?,
            is_scheme_wildcard: self.read_bool()?,
            host: self.read_string()?,
            has_domain_wildcard: self.read_bool()?,
            port: self.read_string()?,
            is_port_wildcard: self.read_bool()?,
            path: self.read_string()?,
            is_path_wildcard: self.read_bool()?,
        })
    }
}

fn write_parts(buf: &mut Vec<u8>, parts: &PatternParts) {
    write_string(buf, &parts.scheme);
    write_bool(buf, parts.is_scheme_wildcard);
    write_string(buf, &parts.host);
    write_bool(buf, parts.has_domain_wildcard);
    write_string(buf, &parts.port);
    write_bool(buf, parts.is_port_wildcard);
    write_string(buf, &parts.path);
    write_bool(buf, parts.is_path_wildcard);
}

impl Pattern {
    /// Append this pattern to a message buffer.
    pub fn write_to_message(&self, buf: &mut Vec<u8>) {
        let empty = PatternParts::default();
        let parts = self.parts().unwrap_or(&empty);
        buf.reserve(
            BOOL_SIZE * 5
                + string_size(&parts.scheme)
                + string_size(&parts.host)
                + string_size(&parts.port)
                + string_size(&parts.path),
        );
        write_bool(buf, self.is_valid());
        write_parts(buf, parts);
    }

    /// Read one pattern from the reader.
    ///
    /// Valid patterns are taken as written: the sender already canonicalized
    /// and validated them, possibly under the legacy rules.
    pub fn read_from_message(reader: &mut MessageReader<'_>) -> Result<Pattern, WireError> {
        let is_valid = reader.read_bool()?;
        let parts = reader.read_parts()?;

        if !is_valid {
            return Ok(Pattern::invalid());
        }
        if !parts.wildcards_consistent() {
            return Err(WireError::BrokenInvariant);
        }
        Ok(Pattern::from_canonical(parts))
    }

    /// Encode this pattern as a standalone message.
    pub fn to_message(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_to_message(&mut buf);
        buf
    }

    /// Decode a standalone message holding exactly one pattern.
    pub fn from_message(data: &[u8]) -> Result<Pattern, WireError> {
        let mut reader = MessageReader::new(data);
        let pattern = Self::read_from_message(&mut reader)?;
        match reader.remaining() {
            0 => Ok(pattern),
            n => Err(WireError::TrailingBytes(n)),
        }
    }
}
