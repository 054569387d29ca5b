use crate::errors::AppError;
use crate::models::PeriodPoint;
use anyhow::Context;
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::io::Write;
use std::path::{Path, PathBuf};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The weighted-P/E history keeps the column names the file has always
/// shipped with (date, current-year P/E).
const PE_HISTORY_HEADER: &str = "日期,当年市盈率";

/// Write a resampled change series, replacing any previous file.
///
/// Columns are `Date,<SYMBOL>,Rate`; the first row's rate field is empty
/// because the first period has no predecessor.
pub fn write_change_series(
    dir: &Path,
    file_name: &str,
    symbol: &str,
    series: &[PeriodPoint],
) -> Result<PathBuf, AppError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);

    let mut writer = WriterBuilder::new().from_path(&path)?;
    writer.write_record(["Date", symbol, "Rate"])?;

    for point in series {
        writer.write_record([
            point.period_end.format(DATE_FORMAT).to_string(),
            format!("{:.2}", point.value),
            point.rate.map(|r| format!("{:.2}", r)).unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(path)
}

/// Read a change series back, as written by `write_change_series`.
pub fn read_change_series(path: &Path) -> Result<Vec<PeriodPoint>, AppError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut series = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = parse_change_row(&record, i + 2)
            .map_err(|e| AppError::Parse(format!("{:#}", e)))?;
        series.push(row);
    }

    Ok(series)
}

fn parse_change_row(record: &csv::StringRecord, line: usize) -> anyhow::Result<PeriodPoint> {
    let date = record
        .get(0)
        .with_context(|| format!("line {}: missing date", line))?;
    let value = record
        .get(1)
        .with_context(|| format!("line {}: missing value", line))?;
    let rate = record.get(2).unwrap_or_default();

    Ok(PeriodPoint {
        period_end: NaiveDate::parse_from_str(date, DATE_FORMAT)
            .with_context(|| format!("line {}: bad date {:?}", line, date))?,
        value: value
            .parse()
            .with_context(|| format!("line {}: bad value {:?}", line, value))?,
        rate: if rate.is_empty() {
            None
        } else {
            Some(
                rate.parse()
                    .with_context(|| format!("line {}: bad rate {:?}", line, rate))?,
            )
        },
    })
}

/// Append one dated weighted-P/E row to the history file.
///
/// The file is created with a UTF-8 BOM and header on first write (the
/// history has always been `utf-8-sig` for spreadsheet compatibility) and
/// appended without header thereafter.
pub fn append_weighted_pe(
    dir: &Path,
    file_name: &str,
    date: NaiveDate,
    weighted_value: f64,
) -> Result<PathBuf, AppError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);

    let mut file = if path.exists() {
        std::fs::OpenOptions::new().append(true).open(&path)?
    } else {
        let mut file = std::fs::File::create(&path)?;
        file.write_all("\u{feff}".as_bytes())?;
        writeln!(file, "{}", PE_HISTORY_HEADER)?;
        file
    };

    writeln!(file, "{},{:.2}", date.format(DATE_FORMAT), weighted_value)?;
    Ok(path)
}
