//! # Length-Prefixed Field Codec
//!
//! The byte layout shared by the identity envelope and the principal
//! encoding. Every variable-size field is written as a big-endian `u32`
//! length followed by that many bytes. Field order is fixed by the caller,
//! so equal values always encode to equal bytes.
//!
//! Decoding is strict: a length that runs past the end of the input, or
//! bytes left over once the caller has read every field, are errors.

/// Appends length-prefixed fields to a byte buffer.
#[derive(Debug, Default)]
pub(crate) struct FieldWriter {
    buf: Vec<u8>,
}

impl FieldWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Write a length-prefixed byte field.
    ///
    /// Fields longer than `u32::MAX` cannot be represented. Callers only
    /// pass organization identifiers, role names, digests and DER
    /// certificates, all of which are far below that bound.
    pub(crate) fn put_bytes(&mut self, value: &[u8]) {
        let len = u32::try_from(value.len()).unwrap_or(u32::MAX);
        self.buf.extend_from_slice(&len.to_be_bytes());
        self.buf.extend_from_slice(&value[..len as usize]);
    }

    pub(crate) fn put_str(&mut self, value: &str) {
        self.put_bytes(value.as_bytes());
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Reads length-prefixed fields from a borrowed byte slice.
#[derive(Debug)]
pub(crate) struct FieldReader<'a> {
    input: &'a [u8],
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Self { input }
    }

    pub(crate) fn u8(&mut self, field: &str) -> Result<u8, String> {
        let (&first, rest) = self
            .input
            .split_first()
            .ok_or_else(|| format!("missing {field}"))?;
        self.input = rest;
        Ok(first)
    }

    pub(crate) fn bytes(&mut self, field: &str) -> Result<&'a [u8], String> {
        if self.input.len() < 4 {
            return Err(format!("truncated length prefix for {field}"));
        }
        let (prefix, rest) = self.input.split_at(4);
        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(prefix);
        let len = u32::from_be_bytes(len_bytes) as usize;
        if rest.len() < len {
            return Err(format!(
                "{field} declares {len} bytes but only {} remain",
                rest.len()
            ));
        }
        let (value, rest) = rest.split_at(len);
        self.input = rest;
        Ok(value)
    }

    pub(crate) fn str(&mut self, field: &str) -> Result<&'a str, String> {
        let raw = self.bytes(field)?;
        std::str::from_utf8(raw).map_err(|e| format!("{field} is not valid UTF-8: {e}"))
    }

    /// Fail if any input remains unread.
    pub(crate) fn finish(self) -> Result<(), String> {
        if self.input.is_empty() {
            Ok(())
        } else {
            Err(format!("{} trailing bytes", self.input.len()))
        }
    }
}
