//! Line parser for pasted batch entries.
//!
//! Input format, one entry per line:
//! ```text
//! 130x24 speed 250 (02/06/26)
//! 5x12 speed 473 (14/08/26)
//! ```
//!
//! Grammar (each line is trimmed first; blank lines are skipped):
//!
//! | token            | form                          |
//! |------------------|-------------------------------|
//! | quantity per unit| one or more ASCII digits      |
//! | separator        | literal `x`                   |
//! | unit count       | one or more ASCII digits      |
//! | gap              | one or more whitespace chars  |
//! | name             | any text up to the last `(`   |
//! | date             | `(` DD `/` MM `/` YY `)`      |
//!
//! The name is trimmed and must not be empty. Years are `2000 + YY`.
//! Nothing may follow the closing parenthesis.
//!
//! A submission is all-or-nothing: the first line that does not match
//! aborts the whole batch.

use chrono::{Local, NaiveDateTime};

use crate::error::{FormatFault, ParseError};
use crate::record::{BatchEntry, InventoryRecord, calendar_date};

/// Parse pasted text into records stamped against `now`.
pub fn parse(raw: &str, now: NaiveDateTime) -> Result<Vec<InventoryRecord>, ParseError> {
    let entries = parse_entries(raw)?;
    Ok(entries
        .into_iter()
        .map(|entry| InventoryRecord::create(entry, now))
        .collect())
}

/// Parse pasted text into records stamped with the local wall clock.
pub fn parse_now(raw: &str) -> Result<Vec<InventoryRecord>, ParseError> {
    parse(raw, Local::now().naive_local())
}

/// Match every non-blank line against the grammar without stamping ids or
/// times.
pub fn parse_entries(raw: &str) -> Result<Vec<BatchEntry>, ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut entries = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(entry) => entries.push(entry),
            Err(fault) => {
                tracing::debug!(line_number = idx + 1, %fault, "rejected batch line");
                return Err(ParseError::Format {
                    line_number: idx + 1,
                    line: line.to_string(),
                    fault,
                });
            }
        }
    }

    tracing::debug!(count = entries.len(), "parsed batch entries");
    Ok(entries)
}

/// Match a single trimmed line.
pub fn parse_line(line: &str) -> Result<BatchEntry, FormatFault> {
    let (quantity_per_unit, rest) = take_number(line, FormatFault::MissingQuantity)?;
    let rest = rest
        .strip_prefix('x')
        .ok_or(FormatFault::MissingSeparator)?;
    let (unit_count, rest) = take_number(rest, FormatFault::MissingUnitCount)?;

    let name_and_date = rest.trim_start();
    if name_and_date.len() == rest.len() {
        return Err(FormatFault::MissingGap);
    }

    let (open, (day, month, year, trailing)) = locate_date(name_and_date)?;
    let product_name = name_and_date[..open].trim();
    if !trailing.is_empty() {
        return Err(FormatFault::TrailingText);
    }
    if product_name.is_empty() {
        return Err(FormatFault::MissingName);
    }

    let expiry_date = calendar_date(day, month, year).ok_or(FormatFault::MalformedDate)?;

    Ok(BatchEntry {
        quantity_per_unit,
        unit_count,
        product_name: product_name.to_string(),
        expiry_date,
    })
}

/// Leading run of ASCII digits as a number, and what follows it.
fn take_number(s: &str, missing: FormatFault) -> Result<(u32, &str), FormatFault> {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    if end == 0 {
        return Err(missing);
    }
    let value = s[..end]
        .parse::<u32>()
        .map_err(|_| FormatFault::QuantityOverflow)?;
    Ok((value, &s[end..]))
}

/// Exactly two ASCII digits.
fn take_two_digits(s: &str) -> Option<(u32, &str)> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || !bytes[0].is_ascii_digit() || !bytes[1].is_ascii_digit() {
        return None;
    }
    let value = u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0');
    Some((value, &s[2..]))
}

/// The last `(` that opens a `(DD/MM/YY)` group, with the parsed fields and
/// whatever follows the `)`. Earlier parentheses belong to the name.
fn locate_date(s: &str) -> Result<(usize, (u32, u32, u32, &str)), FormatFault> {
    let mut opens = s.rmatch_indices('(').map(|(i, _)| i).peekable();
    if opens.peek().is_none() {
        return Err(FormatFault::MissingDate);
    }
    opens
        .find_map(|i| date_fields(&s[i..]).map(|fields| (i, fields)))
        .ok_or(FormatFault::MalformedDate)
}

fn date_fields(s: &str) -> Option<(u32, u32, u32, &str)> {
    let rest = s.strip_prefix('(')?;
    let (day, rest) = take_two_digits(rest)?;
    let rest = rest.strip_prefix('/')?;
    let (month, rest) = take_two_digits(rest)?;
    let rest = rest.strip_prefix('/')?;
    let (year, rest) = take_two_digits(rest)?;
    let rest = rest.strip_prefix(')')?;
    Some((day, month, year, rest))
}
