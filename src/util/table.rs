/// A whitespace-delimited table as printed by zpool: one header line of
/// column names followed by one line per pool.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub header: Vec<String>,
    pub rows:   Vec<Vec<String>>,
}

impl Table {
    /// Split raw command output into header and data rows.
    ///
    /// A data row whose token count differs from the header's is dropped —
    /// malformed output spoils that row only, not the whole listing. Empty
    /// input yields an empty header and no rows; whether that is an error
    /// is the caller's call (missing required columns are detected there).
    pub fn parse(text: &str) -> Table {
        let mut lines = text.lines();
        let header: Vec<String> = match lines.next() {
            Some(line) => split(line),
            None       => return Table::default(),
        };

        let rows = lines
            .filter(|line| !line.trim().is_empty())
            .map(split)
            .filter(|row| row.len() == header.len())
            .collect();

        Table { header, rows }
    }

    /// Index of a named column, if the header carries it.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }
}

fn split(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}
