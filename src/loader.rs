//! Parsing of CSV and Excel payloads into tables

use crate::error::{Result, TabcompareError};
use crate::table::Table;
use calamine::{open_workbook_auto_from_rs, Data, ExcelDateTime, Reader};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::io::Cursor;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Bytes Windows-1252 leaves unassigned
const WINDOWS_1252_UNASSIGNED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Supported input formats, selected by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
    Xls,
}

impl FileFormat {
    /// Detect format from the text after the last `.` of a file name
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            "xls" => Ok(Self::Xls),
            _ => Err(TabcompareError::unsupported_format(filename, extension)),
        }
    }

    pub fn is_spreadsheet(&self) -> bool {
        matches!(self, Self::Xlsx | Self::Xls)
    }
}

/// Text encodings tried, in order, for CSV payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Windows1252,
}

impl TextEncoding {
    pub const FALLBACK_ORDER: [TextEncoding; 3] = [Self::Utf8, Self::Latin1, Self::Windows1252];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Latin1 => "Latin-1",
            Self::Windows1252 => "Windows-1252",
        }
    }

    /// Strictly decode `bytes`, returning `None` if any byte is not valid
    /// in this encoding.
    ///
    /// `Latin1` refuses the C1 range `0x80..=0x9F` so that such payloads
    /// fall through to `Windows1252`. A Latin-1 file carrying C1 controls
    /// together with a byte Windows-1252 leaves unassigned (`0x81`, `0x8D`,
    /// `0x8F`, `0x90`, `0x9D`) is therefore rejected by every encoding.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            Self::Utf8 => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                UTF_8.decode_without_bom_handling_and_without_replacement(bytes)
            }
            // ISO-8859-1 maps every byte to the same code point; the C1
            // control range is treated as a sign of a different code page.
            Self::Latin1 => {
                if bytes.iter().any(|b| (0x80..=0x9F).contains(b)) {
                    return None;
                }
                Some(Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()))
            }
            Self::Windows1252 => {
                if bytes.iter().any(|b| WINDOWS_1252_UNASSIGNED.contains(b)) {
                    return None;
                }
                WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)
            }
        }
    }
}

/// Parse `bytes` into a table, using `filename` to pick the parser.
pub fn load(bytes: &[u8], filename: &str) -> Result<Table> {
    if bytes.is_empty() {
        return Err(TabcompareError::empty_input(filename));
    }

    let format = FileFormat::from_filename(filename)?;
    log::debug!("Loading {} ({} bytes) as {:?}", filename, bytes.len(), format);

    let table = match format {
        FileFormat::Csv => load_csv(bytes, filename)?,
        FileFormat::Xlsx | FileFormat::Xls => load_spreadsheet(bytes, filename)?,
    };

    log::debug!(
        "Loaded {}: {} rows x {} columns",
        filename,
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

/// Decode a CSV payload with the first encoding that accepts it
pub fn decode_text<'a>(bytes: &'a [u8], filename: &str) -> Result<(Cow<'a, str>, TextEncoding)> {
    for encoding in TextEncoding::FALLBACK_ORDER {
        if let Some(text) = encoding.decode(bytes) {
            if encoding != TextEncoding::Utf8 {
                log::warn!("{} is not valid UTF-8, decoded as {}", filename, encoding.name());
            }
            return Ok((text, encoding));
        }
        log::debug!("{} rejected by {} decoder", filename, encoding.name());
    }
    Err(TabcompareError::decode(filename))
}

fn load_csv(bytes: &[u8], filename: &str) -> Result<Table> {
    let (text, _) = decode_text(bytes, filename)?;
    parse_csv(&text, filename)
}

fn parse_csv(text: &str, filename: &str) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| TabcompareError::malformed_table(filename, e.to_string()))?
        .clone();

    if headers.is_empty() {
        return Err(TabcompareError::malformed_table(filename, "no header row"));
    }

    let columns: Vec<String> = headers.iter().map(String::from).collect();
    let mut rows = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| TabcompareError::malformed_table(filename, e.to_string()))?;
        if record.len() > columns.len() {
            return Err(TabcompareError::malformed_table(
                filename,
                format!(
                    "row {} has {} fields, expected at most {}",
                    index + 1,
                    record.len(),
                    columns.len()
                ),
            ));
        }
        rows.push(record.iter().map(String::from).collect());
    }

    Ok(Table::new(columns, rows))
}

fn load_spreadsheet(bytes: &[u8], filename: &str) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| TabcompareError::malformed_table(filename, e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TabcompareError::malformed_table(filename, "workbook has no worksheets"))?
        .map_err(|e| TabcompareError::malformed_table(filename, e.to_string()))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| TabcompareError::malformed_table(filename, "worksheet is empty"))?;

    let columns = header.iter().map(cell_text).collect();
    let data = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Ok(Table::new(columns, data))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::DateTime(dt) => excel_datetime_text(dt),
        Data::DateTimeIso(s) => iso_datetime_text(s),
        Data::DurationIso(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render a serial date the way a CSV export of the sheet would show it,
/// e.g. `2024-01-15 00:00:00` or `0 days 01:30:00` for durations.
fn excel_datetime_text(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        return match dt.as_duration() {
            Some(duration) => duration_text(duration.num_seconds()),
            None => dt.as_f64().to_string(),
        };
    }
    match dt.as_datetime() {
        Some(datetime) => datetime_text(&datetime),
        None => dt.as_f64().to_string(),
    }
}

fn iso_datetime_text(value: &str) -> String {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return datetime_text(&datetime);
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return datetime_text(&midnight);
    }
    if let Ok(time) = NaiveTime::parse_from_str(value, "%H:%M:%S%.f") {
        return time.format("%H:%M:%S").to_string();
    }
    value.to_string()
}

fn datetime_text(datetime: &NaiveDateTime) -> String {
    if datetime.nanosecond() == 0 {
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

fn duration_text(total_seconds: i64) -> String {
    let days = total_seconds.div_euclid(86_400);
    let rest = total_seconds.rem_euclid(86_400);
    format!(
        "{} days {:02}:{:02}:{:02}",
        days,
        rest / 3600,
        (rest % 3600) / 60,
        rest % 60
    )
}
