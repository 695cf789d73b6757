//! Output formatting policy for encoders.
//!
//! The default policy writes compact JSON and lets non-ASCII text through as
//! literal UTF-8. [`JsonFormat`] can switch on `\uXXXX` escaping and
//! two-space indentation.

use std::io;

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};

use crate::error::CodecError;
use crate::finite::ensure_finite;
use crate::path::JsonPath;

/// How encoders lay out JSON text.
///
/// # Example
///
/// ```rust
/// use jsoncap::JsonFormat;
///
/// let compact = JsonFormat::default().encode(&["café"]).unwrap();
/// assert_eq!(compact, "[\"café\"]".as_bytes());
///
/// let ascii = JsonFormat::default().ensure_ascii(true).encode(&["café"]).unwrap();
/// assert_eq!(ascii, br#"["caf\u00e9"]"#);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonFormat {
    ensure_ascii: bool,
    pretty: bool,
}

impl JsonFormat {
    /// Escape every non-ASCII character as `\uXXXX` (surrogate pairs beyond
    /// the BMP).
    pub fn ensure_ascii(mut self, enabled: bool) -> Self {
        self.ensure_ascii = enabled;
        self
    }

    /// Indent nested values by two spaces.
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.pretty = enabled;
        self
    }

    /// Whether non-ASCII characters are written as `\uXXXX` escapes.
    pub fn is_ensure_ascii(&self) -> bool {
        self.ensure_ascii
    }

    /// Whether output is indented.
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Checks `value` for non-finite floats, then writes it as JSON.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        ensure_finite(value)?;
        match (self.ensure_ascii, self.pretty) {
            (false, false) => write_with(value, CompactFormatter),
            (false, true) => write_with(value, PrettyFormatter::new()),
            (true, false) => write_with(value, AsciiEscape(CompactFormatter)),
            (true, true) => write_with(value, AsciiEscape(PrettyFormatter::new())),
        }
    }
}

fn write_with<T, F>(value: &T, formatter: F) -> Result<Vec<u8>, CodecError>
where
    T: Serialize + ?Sized,
    F: Formatter,
{
    let mut out = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|err| CodecError::encoding(JsonPath::root(), err.to_string()))?;
    Ok(out)
}

/// Wraps a formatter and escapes non-ASCII characters in strings.
struct AsciiEscape<F>(F);

impl<F: Formatter> Formatter for AsciiEscape<F> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if c.is_ascii() {
                continue;
            }
            if start < i {
                writer.write_all(fragment[start..i].as_bytes())?;
            }
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object_key(writer, first)
    }

    fn end_object_key<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object_key(writer)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object_value(writer)
    }
}
