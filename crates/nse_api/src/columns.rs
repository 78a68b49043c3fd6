use history_model::{ColumnRule, Field, Schema};

/// Trade dates in the archive look like `02-Jan-2024`.
pub const DATE_FORMAT: &str = "%d-%b-%Y";

/// Price/volume archive columns, named as they appear once whitespace is
/// removed from the CSV header.
pub const PRICE_VOLUME_COLUMNS: &[ColumnRule] = &[
    ColumnRule::date("Date"),
    ColumnRule::number("PrevClose", Field::PrevClose),
    ColumnRule::number("OpenPrice", Field::Open),
    ColumnRule::number("HighPrice", Field::High),
    ColumnRule::number("LowPrice", Field::Low),
    ColumnRule::number("LastPrice", Field::Last),
    ColumnRule::number("ClosePrice", Field::Close),
    ColumnRule::number("AveragePrice", Field::AveragePrice),
    ColumnRule::number("TotalTradedQuantity", Field::Volume),
    ColumnRule::number("Turnover₹", Field::Turnover),
    ColumnRule::number("No.ofTrades", Field::Trades),
];

pub const PRICE_VOLUME_SCHEMA: Schema = Schema {
    date_format: DATE_FORMAT,
    thousands_separator: ',',
    columns: PRICE_VOLUME_COLUMNS,
};
