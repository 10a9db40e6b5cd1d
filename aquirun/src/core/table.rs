//! Whitespace-delimited result tables with per-column typing.
//!
//! Column types are decided once per column from the full column's contents,
//! never per cell, so a loaded table is internally consistent. When the
//! configured year/month/day columns are all present as integer columns, a
//! derived `Date` column is appended.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AquirunError, Result};

/// Name of the derived calendar-date column.
pub const DATE_COLUMN: &str = "Date";

/// Names of the integer columns a date is reconstructed from.
///
/// Fixed per loader instance; result files from different model components
/// use different casings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DateColumns {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl Default for DateColumns {
    fn default() -> Self {
        Self {
            year: "Year".to_string(),
            month: "Month".to_string(),
            day: "Day".to_string(),
        }
    }
}

/// A fully-typed column. The tag is decided from the whole column at load
/// time: all-integral values parse as `Int`, otherwise all-numeric as
/// `Float`, otherwise `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
    Date(Vec<NaiveDate>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int(values) => values.len(),
            Column::Float(values) => values.len(),
            Column::Text(values) => values.len(),
            Column::Date(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_int(&self) -> Option<&[i64]> {
        match self {
            Column::Int(values) => Some(values),
            _ => None,
        }
    }
}

/// A parsed result file: named columns, one row per time step.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl OutputTable {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        let idx = self.names.iter().position(|n| n == name)?;
        self.columns.get(idx)
    }

    /// Columns in file order, paired with their names.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }

    /// The derived date column, when year/month/day columns were present.
    pub fn dates(&self) -> Option<&[NaiveDate]> {
        match self.column(DATE_COLUMN) {
            Some(Column::Date(values)) => Some(values),
            _ => None,
        }
    }

    /// Column names offered for charting: everything except the date
    /// components and the derived date itself.
    pub fn plottable_columns(&self, date_columns: &DateColumns) -> Vec<&str> {
        self.names
            .iter()
            .filter(|name| {
                **name != date_columns.year
                    && **name != date_columns.month
                    && **name != date_columns.day
                    && *name != DATE_COLUMN
            })
            .map(String::as_str)
            .collect()
    }
}

/// Parse whitespace-delimited text into a typed table.
///
/// One or more consecutive whitespace characters act as a single separator;
/// blank lines are skipped. The first non-blank line is the header unless
/// `column_names` is supplied, in which case the file is headerless and the
/// names apply positionally. A row with the wrong field count or a
/// non-numeric value in a numeric column fails the whole load; partial tables
/// are never returned.
pub fn parse_table(
    contents: &str,
    column_names: Option<&[String]>,
    date_columns: &DateColumns,
) -> Result<OutputTable> {
    let mut names: Option<Vec<String>> = column_names.map(<[String]>::to_vec);
    let mut row_lines: Vec<usize> = Vec::new();
    let mut rows: Vec<Vec<&str>> = Vec::new();

    for (idx, line) in contents.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        match &names {
            None => names = Some(fields.iter().map(|f| (*f).to_string()).collect()),
            Some(expected) => {
                if fields.len() != expected.len() {
                    return Err(AquirunError::MalformedRow {
                        line: idx + 1,
                        reason: format!(
                            "expected {} fields, found {}",
                            expected.len(),
                            fields.len()
                        ),
                    });
                }
                row_lines.push(idx + 1);
                rows.push(fields);
            }
        }
    }

    let names = names.ok_or_else(|| AquirunError::MalformedRow {
        line: 1,
        reason: "file has no header row".to_string(),
    })?;

    let mut columns = Vec::with_capacity(names.len());
    for (col_idx, name) in names.iter().enumerate() {
        let cells: Vec<(usize, &str)> = rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| (row_lines[row_idx], row[col_idx]))
            .collect();
        columns.push(build_column(name, &cells)?);
    }

    let mut table = OutputTable { names, columns };
    if let Some(dates) = derive_dates(&table, &row_lines, date_columns)? {
        table.names.push(DATE_COLUMN.to_string());
        table.columns.push(Column::Date(dates));
    }
    Ok(table)
}

/// Type a column from all of its cells.
fn build_column(name: &str, cells: &[(usize, &str)]) -> Result<Column> {
    if cells.is_empty() {
        return Ok(Column::Text(Vec::new()));
    }

    let ints: std::result::Result<Vec<i64>, _> =
        cells.iter().map(|(_, value)| value.parse::<i64>()).collect();
    if let Ok(values) = ints {
        return Ok(Column::Int(values));
    }

    // The first cell decides whether the column is numeric; a later cell
    // that disagrees is a malformed row, not a silent retype to text.
    if cells[0].1.parse::<f64>().is_ok() {
        let mut values = Vec::with_capacity(cells.len());
        for (line, cell) in cells {
            match cell.parse::<f64>() {
                Ok(value) => values.push(value),
                Err(_) => {
                    return Err(AquirunError::MalformedRow {
                        line: *line,
                        reason: format!("non-numeric value {cell:?} in numeric column {name:?}"),
                    });
                }
            }
        }
        return Ok(Column::Float(values));
    }

    Ok(Column::Text(
        cells.iter().map(|(_, value)| (*value).to_string()).collect(),
    ))
}

/// Compose calendar dates from the year/month/day columns, when all three are
/// present. Returns `Ok(None)` when any component column is absent or the
/// table has no rows.
fn derive_dates(
    table: &OutputTable,
    row_lines: &[usize],
    date_columns: &DateColumns,
) -> Result<Option<Vec<NaiveDate>>> {
    if row_lines.is_empty() {
        return Ok(None);
    }
    let (Some(year_col), Some(month_col), Some(day_col)) = (
        table.column(&date_columns.year),
        table.column(&date_columns.month),
        table.column(&date_columns.day),
    ) else {
        return Ok(None);
    };

    let component = |name: &str, column: &Column| -> Result<Vec<i64>> {
        column
            .as_int()
            .map(<[i64]>::to_vec)
            .ok_or_else(|| AquirunError::MalformedRow {
                line: row_lines[0],
                reason: format!("date column {name:?} is not integer-typed"),
            })
    };
    let years = component(&date_columns.year, year_col)?;
    let months = component(&date_columns.month, month_col)?;
    let days = component(&date_columns.day, day_col)?;

    let mut dates = Vec::with_capacity(years.len());
    for (idx, ((&year, &month), &day)) in years.iter().zip(&months).zip(&days).enumerate() {
        let date = i32::try_from(year)
            .ok()
            .zip(u32::try_from(month).ok())
            .zip(u32::try_from(day).ok())
            .and_then(|((y, m), d)| NaiveDate::from_ymd_opt(y, m, d))
            .ok_or(AquirunError::InvalidDate {
                line: row_lines[idx],
                year,
                month,
                day,
            })?;
        dates.push(date);
    }
    Ok(Some(dates))
}
