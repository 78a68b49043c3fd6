use std::collections::HashMap;

/// Provider column name to its textual cell value.
pub type RawRow = HashMap<String, String>;

/// Loosely typed provider response, rows in the order the provider sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(rows: Vec<RawRow>) -> Self {
        RawTable { rows }
    }

    /// Builds a table from a header and rows of cells, pairing cells with
    /// header names by position. Surplus cells are ignored.
    pub fn from_records<H, R, C>(header: &[H], records: R) -> Self
    where
        H: AsRef<str>,
        R: IntoIterator<Item = Vec<C>>,
        C: Into<String>,
    {
        let rows = records
            .into_iter()
            .map(|cells| {
                header
                    .iter()
                    .zip(cells)
                    .map(|(name, cell)| (name.as_ref().to_string(), cell.into()))
                    .collect::<RawRow>()
            })
            .collect();
        RawTable { rows }
    }

    pub fn extend(&mut self, other: RawTable) {
        self.rows.extend(other.rows);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
