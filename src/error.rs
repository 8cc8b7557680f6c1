//! Error types for parsing, exporting and persisting inventory records.
//!
//! Every error is a rejected user action: the caller shows the message and
//! the collection stays exactly as it was.

use std::fmt;

use thiserror::Error;

/// Which part of the `<int>x<int> <name> (<DD>/<MM>/<YY>)` grammar a line
/// failed to satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatFault {
    /// Line does not start with the quantity per unit.
    MissingQuantity,
    /// No literal `x` after the first integer.
    MissingSeparator,
    /// No unit count after the `x`.
    MissingUnitCount,
    /// No whitespace between the quantity pair and the name.
    MissingGap,
    /// Nothing between the quantity pair and the date.
    MissingName,
    /// No `(` opening the date.
    MissingDate,
    /// Date is not `DD/MM/YY` closed by `)`.
    MalformedDate,
    /// Something follows the closing `)`.
    TrailingText,
    /// A quantity does not fit in 32 bits.
    QuantityOverflow,
}

impl fmt::Display for FormatFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            FormatFault::MissingQuantity => "expected a quantity at the start of the line",
            FormatFault::MissingSeparator => "expected 'x' between the quantities",
            FormatFault::MissingUnitCount => "expected a unit count after 'x'",
            FormatFault::MissingGap => "expected whitespace before the product name",
            FormatFault::MissingName => "expected a product name",
            FormatFault::MissingDate => "expected a date in parentheses",
            FormatFault::MalformedDate => "expected the date as (DD/MM/YY)",
            FormatFault::TrailingText => "unexpected text after the date",
            FormatFault::QuantityOverflow => "quantity is too large",
        };
        f.write_str(what)
    }
}

/// Failure to turn pasted text into records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Submitted text was blank.
    #[error("Por favor, pega datos en el textarea")]
    EmptyInput,

    /// A line did not match the batch entry format. Nothing from the
    /// submission is kept.
    #[error("Error en línea \"{line}\": Formato inválido: {line}")]
    Format {
        /// 1-based position among the submitted lines, blank lines included.
        line_number: usize,
        /// The offending line, trimmed.
        line: String,
        fault: FormatFault,
    },
}

impl ParseError {
    /// The offending line for format errors.
    pub fn line(&self) -> Option<&str> {
        match self {
            ParseError::EmptyInput => None,
            ParseError::Format { line, .. } => Some(line),
        }
    }
}

/// Failure to produce a CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Visible view holds no records.
    #[error("No hay datos para exportar")]
    Empty,

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Failure to load or save the persisted collection.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored inventory is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    /// Stored records break the collection invariants.
    #[error("stored inventory is inconsistent: {0}")]
    Corrupt(String),

    /// Backend-specific failure (e.g. browser storage quota).
    #[error("storage backend failed: {0}")]
    Backend(String),
}
