//! CSV export of the visible view.
//!
//! The header row is written bare; every data cell is quoted:
//! ```text
//! Producto,Cantidad Total,Vencimiento,Días Restantes,Estado
//! "speed 250","3120","2/6/2026","518","Normal"
//! ```

use chrono::{NaiveDate, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::ExportError;
use crate::view::{VisibleRecord, format_date};

pub const CSV_HEADER: [&str; 5] = [
    "Producto",
    "Cantidad Total",
    "Vencimiento",
    "Días Restantes",
    "Estado",
];

/// Render the visible records as CSV text. Rows are separated by `\n`
/// with no trailing newline.
pub fn export_csv(view: &[VisibleRecord<'_>]) -> Result<String, ExportError> {
    if view.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut buf = CSV_HEADER.join(",").into_bytes();
    buf.push(b'\n');

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buf);

    for v in view {
        writer.write_record([
            v.record.product_name().to_string(),
            v.record.total_quantity().to_string(),
            format_date(v.record.expiry_date()),
            v.record.days_remaining().to_string(),
            v.status.label().to_string(),
        ])?;
    }

    let buf = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    let mut text = String::from_utf8(buf)?;
    if text.ends_with('\n') {
        text.pop();
    }

    tracing::info!(rows = view.len(), "exported CSV");
    Ok(text)
}

/// Download name for an export made on `today`.
pub fn export_file_name(today: NaiveDate) -> String {
    format!("inventario-{}.csv", today.format("%Y-%m-%d"))
}

/// Download name for an export made now, dated in UTC.
pub fn export_file_name_now() -> String {
    export_file_name(Utc::now().date_naive())
}
