use super::SheetError;

/// One fetched row. Cells past the end of the row read as empty strings,
/// since the values API drops trailing blanks.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    cells: &'a [String],
}

impl<'a> Row<'a> {
    pub fn new(cells: &'a [String]) -> Self {
        Self { cells }
    }

    pub fn cell(&self, index: usize) -> &'a str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    /// Number of cells the API returned for this row
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

/// Positional schema of a record stored in a fixed named range.
pub trait SheetRow: Sized {
    const RANGE: &'static str;
    const WIDTH: usize;

    /// `index` is the zero-based position of the row within the range.
    fn decode(index: usize, row: Row<'_>) -> Result<Self, String>;
}

/// Decode every row of `T::RANGE`. Blank rows are skipped but still count
/// toward the position of the rows after them.
pub fn decode_rows<T: SheetRow>(rows: &[Vec<String>]) -> Result<Vec<T>, SheetError> {
    let mut records = Vec::with_capacity(rows.len());

    for (index, cells) in rows.iter().enumerate() {
        let row = Row::new(cells);
        if row.is_blank() {
            continue;
        }

        if row.width() > T::WIDTH {
            return Err(malformed::<T>(
                index,
                format!("expected at most {} cells, found {}", T::WIDTH, row.width()),
            ));
        }

        let record = T::decode(index, row).map_err(|reason| malformed::<T>(index, reason))?;
        records.push(record);
    }

    Ok(records)
}

fn malformed<T: SheetRow>(index: usize, reason: String) -> SheetError {
    SheetError::MalformedRow {
        range: T::RANGE.to_string(),
        row: index + 1,
        reason,
    }
}
