use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::raw::RawTable;
use crate::{PriceRecord, PriceTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Date,
    Open,
    High,
    Low,
    Close,
    Volume,
    Last,
    PrevClose,
    AveragePrice,
    Turnover,
    Trades,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::Open => "Open",
            Field::High => "High",
            Field::Low => "Low",
            Field::Close => "Close",
            Field::Volume => "Volume",
            Field::Last => "Last",
            Field::PrevClose => "PrevClose",
            Field::AveragePrice => "AveragePrice",
            Field::Turnover => "Turnover",
            Field::Trades => "Trades",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Date,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRule {
    pub source: &'static str,
    pub field: Field,
    pub coercion: Coercion,
}

impl ColumnRule {
    pub const fn date(source: &'static str) -> Self {
        ColumnRule {
            source,
            field: Field::Date,
            coercion: Coercion::Date,
        }
    }

    pub const fn number(source: &'static str, field: Field) -> Self {
        ColumnRule {
            source,
            field,
            coercion: Coercion::Number,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub date_format: &'static str,
    pub thousands_separator: char,
    pub columns: &'static [ColumnRule],
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("row {row}: invalid date '{value}' (expected {format})")]
    Date {
        row: usize,
        value: String,
        format: &'static str,
    },

    #[error("row {row}: invalid number '{value}' in column {column}")]
    Number {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: volume {value} is not a non-negative whole number")]
    Volume { row: usize, value: f64 },

    #[error("row {row}: no column provides {field}")]
    MissingColumn { row: usize, field: Field },
}

#[derive(Debug, Default)]
struct CoercedRow {
    row: usize,
    date: Option<NaiveDate>,
    values: HashMap<Field, f64>,
}

impl CoercedRow {
    fn require(&self, field: Field) -> Result<f64, ParseError> {
        self.values
            .get(&field)
            .copied()
            .ok_or(ParseError::MissingColumn {
                row: self.row,
                field,
            })
    }

    fn into_record(self) -> Result<PriceRecord, ParseError> {
        let date = self.date.ok_or(ParseError::MissingColumn {
            row: self.row,
            field: Field::Date,
        })?;
        let volume = self.require(Field::Volume)?;
        Ok(PriceRecord {
            date,
            open: self.require(Field::Open)?,
            high: self.require(Field::High)?,
            low: self.require(Field::Low)?,
            close: self.require(Field::Close)?,
            volume: whole_volume(self.row, volume)?,
        })
    }
}

impl Schema {
    /// Coerces listed columns, sorts by date and keeps the canonical fields.
    pub fn normalize(&self, symbol: &str, raw: &RawTable) -> Result<PriceTable, ParseError> {
        let mut rows = raw
            .rows
            .iter()
            .enumerate()
            .map(|(row, cells)| -> Result<CoercedRow, ParseError> {
                let mut coerced = CoercedRow {
                    row,
                    ..Default::default()
                };
                for rule in self.columns {
                    let Some(text) = cells.get(rule.source) else {
                        continue;
                    };
                    match rule.coercion {
                        Coercion::Date => {
                            coerced.date = Some(self.parse_date(row, text)?);
                        }
                        Coercion::Number => {
                            let value = self.parse_number(row, rule.source, text)?;
                            coerced.values.insert(rule.field, value);
                        }
                    }
                }
                Ok(coerced)
            })
            .collect::<Result<Vec<_>, _>>()?;

        // stable: equal dates keep provider order
        rows.sort_by_key(|r| r.date);

        let records = rows
            .into_iter()
            .map(CoercedRow::into_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PriceTable::new(symbol, records))
    }

    fn parse_date(&self, row: usize, text: &str) -> Result<NaiveDate, ParseError> {
        NaiveDate::parse_from_str(text.trim(), self.date_format).map_err(|_| ParseError::Date {
            row,
            value: text.to_string(),
            format: self.date_format,
        })
    }

    fn parse_number(&self, row: usize, column: &'static str, text: &str) -> Result<f64, ParseError> {
        text.replace(self.thousands_separator, "")
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseError::Number {
                row,
                column,
                value: text.to_string(),
            })
    }
}

fn whole_volume(row: usize, value: f64) -> Result<u64, ParseError> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Ok(value as u64)
    } else {
        Err(ParseError::Volume { row, value })
    }
}
