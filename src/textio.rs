//! Line-oriented text persistence for labeled scalars and vectors.
//!
//! Pole expansions and their recursion coefficients are stored in a plain
//! text format: each scalar occupies one line of the form `<label><value>`
//! (the label carries its own `=` suffix, e.g. `#CFWeight=0.5`), and each
//! vector occupies a label line, a count line, and one value per line.
//!
//! Reading is sequential and order-dependent. The reader keeps a cursor and
//! scans forward for the requested label; fields must therefore be read in
//! the order they were written. The format is deliberately not
//! self-describing, which keeps both sides trivial and makes any structural
//! corruption surface as a hard error at the first missing label.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Represents all possible errors that can occur while reading or writing
/// the labeled text format.
#[derive(Error, Debug)]
pub enum TextIoError {
    /// Wraps a standard I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Occurs when the value following a label cannot be parsed.
    #[error("Parse error: Failed to parse '{value}' for label '{label}'")]
    Parse { label: String, value: String },
    /// Occurs when the requested label is not found on any remaining line.
    #[error("Format error: No line labeled '{0}' was found.")]
    MissingLabel(String),
    /// Occurs when the end of the input is reached in the middle of a
    /// labeled vector.
    #[error("Format error: Unexpected end of input while reading vector data.")]
    UnexpectedEof,
}

/// Appends labeled scalars and vectors to an underlying [`Write`] sink.
pub struct TextWriter<W> {
    sink: W,
}

impl<W: Write> TextWriter<W> {
    /// Wraps a sink. Callers that care about buffering should pass a
    /// `BufWriter`.
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Writes one `<label><value>` line.
    pub fn scalar<T: Display>(&mut self, label: &str, value: T) -> Result<(), TextIoError> {
        writeln!(self.sink, "{label}{value}")?;
        Ok(())
    }

    /// Writes a labeled vector: the label line, the element count, then one
    /// element per line. `f64` values print in Rust's shortest round-trip
    /// representation, so a write/read cycle reproduces them exactly.
    pub fn vector(&mut self, label: &str, values: &[f64]) -> Result<(), TextIoError> {
        writeln!(self.sink, "{label}")?;
        writeln!(self.sink, "{}", values.len())?;
        for value in values {
            writeln!(self.sink, "{value}")?;
        }
        Ok(())
    }

    /// Consumes the writer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Reads labeled scalars and vectors sequentially from a [`BufRead`] source.
pub struct TextReader<R> {
    source: R,
}

impl<R: BufRead> TextReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Reads the next line, stripping the trailing newline. Returns `None`
    /// at end of input.
    fn next_line(&mut self) -> Result<Option<String>, TextIoError> {
        let mut line = String::new();
        if self.source.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// Scans forward for the next line starting with `label` and parses the
    /// remainder of that line.
    pub fn scalar<T: std::str::FromStr>(&mut self, label: &str) -> Result<T, TextIoError> {
        loop {
            let line = self
                .next_line()?
                .ok_or_else(|| TextIoError::MissingLabel(label.to_string()))?;
            if let Some(rest) = line.strip_prefix(label) {
                let value = rest.trim();
                return value.parse::<T>().map_err(|_| TextIoError::Parse {
                    label: label.to_string(),
                    value: value.to_string(),
                });
            }
        }
    }

    /// Scans forward for a line equal to `label`, then reads the count line
    /// and that many element lines.
    pub fn vector(&mut self, label: &str) -> Result<Vec<f64>, TextIoError> {
        loop {
            let line = self
                .next_line()?
                .ok_or_else(|| TextIoError::MissingLabel(label.to_string()))?;
            if line.trim() == label {
                break;
            }
        }

        let count_line = self.next_line()?.ok_or(TextIoError::UnexpectedEof)?;
        let count: usize = count_line
            .trim()
            .parse()
            .map_err(|_| TextIoError::Parse {
                label: label.to_string(),
                value: count_line.trim().to_string(),
            })?;

        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            let line = self.next_line()?.ok_or(TextIoError::UnexpectedEof)?;
            let value = line.trim();
            values.push(value.parse::<f64>().map_err(|_| TextIoError::Parse {
                label: label.to_string(),
                value: value.to_string(),
            })?);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writes a mixed record and reads it back field by field.
    #[test]
    fn test_scalar_and_vector_round_trip() {
        let mut writer = TextWriter::new(Vec::new());
        writer.scalar("#Weight=", 0.125_f64).unwrap();
        writer.scalar("#Isign=", -1_i32).unwrap();
        writer.vector("#Eigs", &[1.5, -2.25, 0.0]).unwrap();
        let text = writer.into_inner();

        let mut reader = TextReader::new(text.as_slice());
        let weight: f64 = reader.scalar("#Weight=").unwrap();
        let isign: i32 = reader.scalar("#Isign=").unwrap();
        let eigs = reader.vector("#Eigs").unwrap();

        assert_eq!(weight, 0.125);
        assert_eq!(isign, -1);
        assert_eq!(eigs, vec![1.5, -2.25, 0.0]);
    }

    /// The reader must skip unrelated lines when scanning for a label.
    #[test]
    fn test_scalar_skips_foreign_lines() {
        let text = b"#Other=3\njunk line\n#Energy=-0.5\n";
        let mut reader = TextReader::new(&text[..]);
        let energy: f64 = reader.scalar("#Energy=").unwrap();
        assert_eq!(energy, -0.5);
    }

    /// An empty vector is a label line followed by a zero count.
    #[test]
    fn test_empty_vector_round_trip() {
        let mut writer = TextWriter::new(Vec::new());
        writer.vector("#Bvector", &[]).unwrap();
        let text = writer.into_inner();

        let mut reader = TextReader::new(text.as_slice());
        assert!(reader.vector("#Bvector").unwrap().is_empty());
    }

    #[test]
    fn test_missing_label_is_an_error() {
        let mut reader = TextReader::new(&b"#Present=1\n"[..]);
        let result: Result<f64, _> = reader.scalar("#Absent=");
        assert!(matches!(result, Err(TextIoError::MissingLabel(_))));
    }

    #[test]
    fn test_unparseable_value_is_an_error() {
        let mut reader = TextReader::new(&b"#Weight=not-a-number\n"[..]);
        let result: Result<f64, _> = reader.scalar("#Weight=");
        assert!(matches!(result, Err(TextIoError::Parse { .. })));
    }

    #[test]
    fn test_truncated_vector_is_an_error() {
        let text = b"#Eigs\n3\n1.0\n2.0\n";
        let mut reader = TextReader::new(&text[..]);
        assert!(matches!(
            reader.vector("#Eigs"),
            Err(TextIoError::UnexpectedEof)
        ));
    }

    /// Fields must be consumed in write order; reading a later field first
    /// moves the cursor past the earlier one.
    #[test]
    fn test_reading_is_order_dependent() {
        let mut writer = TextWriter::new(Vec::new());
        writer.scalar("#First=", 1.0_f64).unwrap();
        writer.scalar("#Second=", 2.0_f64).unwrap();
        let text = writer.into_inner();

        let mut reader = TextReader::new(text.as_slice());
        let second: f64 = reader.scalar("#Second=").unwrap();
        assert_eq!(second, 2.0);
        let first: Result<f64, _> = reader.scalar("#First=");
        assert!(matches!(first, Err(TextIoError::MissingLabel(_))));
    }
}
