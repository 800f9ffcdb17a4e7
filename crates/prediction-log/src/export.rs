//! CSV Export

use crate::event::PredictionEvent;
use std::borrow::Cow;
use std::io::{self, Write};

/// Header row of the exported log
pub const CSV_HEADER: &str = "type,result,time";

/// Quote a field when it contains a delimiter, quote or line break
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Write entries as CSV: header, then one `type,result,time` row per entry
pub fn write_csv<'a, W, I>(writer: &mut W, entries: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a PredictionEvent>,
{
    writeln!(writer, "{}", CSV_HEADER)?;
    for event in entries {
        writeln!(
            writer,
            "{},{},{}",
            escape_field(event.kind().as_str()),
            escape_field(event.result()),
            escape_field(&event.time_iso())
        )?;
    }
    Ok(())
}

/// Render entries as CSV text
pub fn export_csv<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a PredictionEvent>,
{
    let mut out = Vec::new();
    // writing into a Vec cannot fail
    let _ = write_csv(&mut out, entries);
    String::from_utf8_lossy(&out).into_owned()
}
