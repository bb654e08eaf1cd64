#![warn(clippy::all, rust_2018_idioms)]

//! Reader for small header-first CSV tables that mix text and numeric
//! columns, like the census/health survey sheets plotted by streu.
//!
//! The delimiter is sniffed from the header row, column types are detected
//! from the first data row, and rows that do not parse cleanly are dropped
//! with a warning instead of poisoning the table with NaNs.

use std::path::Path;

const DELIMITER_CANDIDATES: [char; 3] = [',', ';', '\t'];

/// A parsed table: header names plus one typed column per header field.
///
/// All columns have the same length; `skipped_lines` holds the 1-based file
/// line numbers of the data rows that were dropped because a cell could not
/// be parsed or the field count did not match the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub columns: Vec<Column>,
    pub skipped_lines: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Text(Vec<String>),
    Number(Vec<f64>),
}

impl Column {
    fn push_parsed(&mut self, cell: &str) -> Result<(), ()> {
        match self {
            Column::Text(values) => {
                values.push(cell.to_owned());
                Ok(())
            }
            Column::Number(values) => match parse_finite(cell) {
                Some(number) => {
                    values.push(number);
                    Ok(())
                }
                None => Err(()),
            },
        }
    }

    fn truncate(&mut self, len: usize) {
        match self {
            Column::Text(values) => values.truncate(len),
            Column::Number(values) => values.truncate(len),
        }
    }

    fn len(&self) -> usize {
        match self {
            Column::Text(values) => values.len(),
            Column::Number(values) => values.len(),
        }
    }
}

impl Table {
    pub fn from_path(path: &Path) -> Result<Table, String> {
        let raw_text = std::fs::read_to_string(path)
            .map_err(|err| format!("unable to read {:?}: {}", path, err))?;
        Table::parse(&raw_text)
    }

    /// Parse raw CSV text. Fails if no header line or no intact data row is
    /// found; bad rows below the header are skipped, not fatal.
    pub fn parse(raw_text: &str) -> Result<Table, String> {
        let mut lines = raw_text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let (_, header_line) = lines.next().ok_or("file contains no header row")?;
        let delimiter = sniff_delimiter(header_line)
            .ok_or("could not detect a column delimiter in the header row")?;
        log::debug!("detected delimiter {:?}", delimiter);

        let header: Vec<String> = split_row(header_line, delimiter)
            .map(str::to_owned)
            .collect();

        // Column types come from the first data row: whatever parses as a
        // finite float is a number column, everything else is text.
        let (_, first_row) = lines
            .clone()
            .next()
            .ok_or("file contains a header but no data rows")?;
        let mut columns: Vec<Column> = split_row(first_row, delimiter)
            .map(|cell| {
                if parse_finite(cell).is_some() {
                    Column::Number(Vec::new())
                } else {
                    Column::Text(Vec::new())
                }
            })
            .collect();
        if columns.len() != header.len() {
            return Err(format!(
                "first data row has {} fields but the header names {}",
                columns.len(),
                header.len()
            ));
        }

        let mut kept = 0usize;
        let mut skipped_lines = Vec::new();
        for (line_no, line) in lines {
            let cells: Vec<&str> = split_row(line, delimiter).collect();
            if cells.len() != header.len() {
                log::warn!(
                    "line {} has {} fields, expected {}, skipping row",
                    line_no,
                    cells.len(),
                    header.len()
                );
                skipped_lines.push(line_no);
                continue;
            }
            let mut row_ok = true;
            for (column, cell) in columns.iter_mut().zip(&cells) {
                if column.push_parsed(cell).is_err() {
                    log::warn!(
                        "unable to parse {:?} on line {} as a number, skipping row",
                        cell,
                        line_no
                    );
                    row_ok = false;
                    break;
                }
            }
            if row_ok {
                kept += 1;
            } else {
                // Roll back the cells already pushed for this row.
                for column in columns.iter_mut() {
                    column.truncate(kept);
                }
                skipped_lines.push(line_no);
            }
        }

        if kept == 0 {
            return Err("no intact data rows found".into());
        }

        Ok(Table {
            header,
            columns,
            skipped_lines,
        })
    }

    /// Number of intact data rows.
    pub fn len(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of a header field, matched case-insensitively.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header
            .iter()
            .position(|field| field.eq_ignore_ascii_case(name))
    }

    pub fn text_column(&self, name: &str) -> Option<&[String]> {
        match self.columns.get(self.column_index(name)?)? {
            Column::Text(values) => Some(values),
            Column::Number(_) => None,
        }
    }

    pub fn number_column(&self, name: &str) -> Option<&[f64]> {
        match self.columns.get(self.column_index(name)?)? {
            Column::Number(values) => Some(values),
            Column::Text(_) => None,
        }
    }
}

/// Pick the candidate delimiter occurring most often in the header row.
fn sniff_delimiter(header_line: &str) -> Option<char> {
    DELIMITER_CANDIDATES
        .iter()
        .map(|&candidate| {
            (
                candidate,
                header_line.chars().filter(|&c| c == candidate).count(),
            )
        })
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(_, count)| *count)
        .map(|(candidate, _)| candidate)
}

/// Parse a cell as a number. `f64::parse` also accepts `NaN`, `inf` and
/// overflowing literals like `1e999`; those count as malformed here.
fn parse_finite(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn split_row(line: &str, delimiter: char) -> impl Iterator<Item = &str> {
    line.split(delimiter).map(|cell| {
        let cell = cell.trim();
        cell.strip_prefix('"')
            .and_then(|cell| cell.strip_suffix('"'))
            .unwrap_or(cell)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn parses_mixed_text_and_number_columns() {
        init();
        let table = Table::parse("abbr,state,poverty\nTX,Texas,14.9\nVT,Vermont,12.2\n").unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.skipped_lines.is_empty());
        assert_eq!(
            table.text_column("state").unwrap(),
            &["Texas".to_owned(), "Vermont".to_owned()]
        );
        assert_eq!(table.number_column("poverty").unwrap(), &[14.9, 12.2]);
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        init();
        let table = Table::parse("Abbr,Poverty\nTX,14.9\n").unwrap();
        assert_eq!(table.column_index("abbr"), Some(0));
        assert_eq!(table.number_column("POVERTY").unwrap(), &[14.9]);
    }

    #[test]
    fn sniffs_semicolon_and_tab_delimiters() {
        init();
        let table = Table::parse("abbr;poverty\nTX;14.9\n").unwrap();
        assert_eq!(table.number_column("poverty").unwrap(), &[14.9]);

        let table = Table::parse("abbr\tpoverty\nTX\t14.9\n").unwrap();
        assert_eq!(table.number_column("poverty").unwrap(), &[14.9]);
    }

    #[test]
    fn skips_rows_with_malformed_numbers() {
        init();
        let table =
            Table::parse("abbr,poverty\nTX,14.9\nXX,not-a-number\nVT,12.2\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.skipped_lines, vec![3]);
        assert_eq!(table.number_column("poverty").unwrap(), &[14.9, 12.2]);
        // The text cells of the dropped row must not linger either.
        assert_eq!(
            table.text_column("abbr").unwrap(),
            &["TX".to_owned(), "VT".to_owned()]
        );
    }

    #[test]
    fn skips_rows_with_wrong_field_count() {
        init();
        let table = Table::parse("abbr,poverty\nTX,14.9\nVT\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.skipped_lines, vec![3]);
    }

    #[test]
    fn non_finite_literals_count_as_malformed_cells() {
        init();
        let table = Table::parse(
            "abbr,poverty\nTX,14.9\nXX,NaN\nYY,inf\nZZ,-inf\nAA,1e999\nVT,12.2\n",
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.skipped_lines, vec![3, 4, 5, 6]);
        assert_eq!(table.number_column("poverty").unwrap(), &[14.9, 12.2]);

        // A non-finite cell in the first data row must not sniff the column
        // as numeric either.
        let table = Table::parse("abbr,poverty\nTX,NaN\nVT,12.2\n").unwrap();
        assert!(table.number_column("poverty").is_none());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn skipped_lines_are_numbered_in_the_raw_file() {
        init();
        let table = Table::parse(
            "# survey export\n\nabbr,poverty\nTX,14.9\n# midway note\nXX,nope\nVT,12.2\n",
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.skipped_lines, vec![6]);
    }

    #[test]
    fn strips_quotes_and_surrounding_whitespace() {
        init();
        let table = Table::parse("abbr, state\n\"NH\" , \"New Hampshire\"\n").unwrap();
        assert_eq!(
            table.text_column("state").unwrap(),
            &["New Hampshire".to_owned()]
        );
    }

    #[test]
    fn ignores_comment_and_blank_lines() {
        init();
        let table =
            Table::parse("# survey export\n\nabbr,poverty\n# midway note\nTX,14.9\n").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn rejects_empty_and_headerless_input() {
        init();
        assert!(Table::parse("").is_err());
        assert!(Table::parse("abbr,poverty\n").is_err());
        assert!(Table::parse("justoneword\n1.0\n").is_err());
    }

    #[test]
    fn rejects_first_row_field_count_mismatch() {
        init();
        assert!(Table::parse("abbr,poverty\nTX\n").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        init();
        let result = Table::from_path(Path::new("/definitely/not/here.csv"));
        assert!(result.is_err());
    }
}
