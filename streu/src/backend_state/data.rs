use std::path::{Path, PathBuf};

use census_csv::Table;

/// One row of the survey: a US state and its six tracked rates.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub abbr: String,
    pub state: String,
    pub poverty: f64,
    pub age: f64,
    pub income: f64,
    pub healthcare: f64,
    pub obesity: f64,
    pub smokes: f64,
}

/// The numeric survey fields that can drive an axis. Each variant carries
/// its column name, axis title, tooltip label and value formatting, so all
/// presentation text comes from this one table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Poverty,
    Age,
    Income,
    Healthcare,
    Obesity,
    Smokes,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Poverty,
        Field::Age,
        Field::Income,
        Field::Healthcare,
        Field::Obesity,
        Field::Smokes,
    ];

    /// Header name of the column in the input file.
    pub fn column_name(&self) -> &'static str {
        match self {
            Field::Poverty => "poverty",
            Field::Age => "age",
            Field::Income => "income",
            Field::Healthcare => "healthcare",
            Field::Obesity => "obesity",
            Field::Smokes => "smokes",
        }
    }

    /// Text of the clickable axis label.
    pub fn axis_title(&self) -> &'static str {
        match self {
            Field::Poverty => "In Poverty (%)",
            Field::Age => "Age (Median)",
            Field::Income => "Household Income (Median)",
            Field::Healthcare => "Lacks Healthcare (%)",
            Field::Obesity => "Obese (%)",
            Field::Smokes => "Smokes (%)",
        }
    }

    /// Label used in the hover tooltip.
    pub fn tooltip_label(&self) -> &'static str {
        match self {
            Field::Poverty => "Poverty",
            Field::Age => "Age",
            Field::Income => "Household Income",
            Field::Healthcare => "Lacks Healthcare",
            Field::Obesity => "Obesity",
            Field::Smokes => "Smokes",
        }
    }

    /// Format a value of this field with its unit.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            Field::Age => format_decimal(value),
            Field::Income => format_currency(value),
            _ => format!("{}%", format_decimal(value)),
        }
    }
}

impl Record {
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Poverty => self.poverty,
            Field::Age => self.age,
            Field::Income => self.income,
            Field::Healthcare => self.healthcare,
            Field::Obesity => self.obesity,
            Field::Smokes => self.smokes,
        }
    }
}

/// A loaded survey: source path, one record per state, and the number of
/// rows the reader dropped as malformed.
#[derive(Clone, Debug, PartialEq)]
pub struct SurveyData {
    pub path: PathBuf,
    pub records: Vec<Record>,
    pub skipped_rows: usize,
}

impl SurveyData {
    pub fn from_path(path: &Path) -> Result<SurveyData, String> {
        let table = Table::from_path(path)?;

        let abbr = required_text_column(&table, "abbr", path)?;
        let state = required_text_column(&table, "state", path)?;
        let poverty = required_number_column(&table, Field::Poverty, path)?;
        let age = required_number_column(&table, Field::Age, path)?;
        let income = required_number_column(&table, Field::Income, path)?;
        let healthcare = required_number_column(&table, Field::Healthcare, path)?;
        let obesity = required_number_column(&table, Field::Obesity, path)?;
        let smokes = required_number_column(&table, Field::Smokes, path)?;

        let records = (0..table.len())
            .map(|row| Record {
                abbr: abbr[row].clone(),
                state: state[row].clone(),
                poverty: poverty[row],
                age: age[row],
                income: income[row],
                healthcare: healthcare[row],
                obesity: obesity[row],
                smokes: smokes[row],
            })
            .collect();

        if !table.skipped_lines.is_empty() {
            log::warn!(
                "{} malformed rows dropped while reading {:?}, lines {:?}",
                table.skipped_lines.len(),
                path,
                table.skipped_lines
            );
        }

        Ok(SurveyData {
            path: path.to_owned(),
            records,
            skipped_rows: table.skipped_lines.len(),
        })
    }

    /// Minimum and maximum of `field` over all records, `None` when there
    /// are no records.
    pub fn extent(&self, field: Field) -> Option<(f64, f64)> {
        self.records.iter().map(|record| record.value(field)).fold(
            None,
            |extent, value| match extent {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            },
        )
    }
}

fn required_text_column<'a>(
    table: &'a Table,
    name: &str,
    path: &Path,
) -> Result<&'a [String], String> {
    table
        .text_column(name)
        .ok_or_else(|| format!("column '{}' missing or not text in {:?}", name, path))
}

fn required_number_column<'a>(
    table: &'a Table,
    field: Field,
    path: &Path,
) -> Result<&'a [f64], String> {
    table.number_column(field.column_name()).ok_or_else(|| {
        format!(
            "column '{}' missing or not numeric in {:?}",
            field.column_name(),
            path
        )
    })
}

// ----------------------------------------------------------------------------
//
//
// Formatting Utilities
//
//
// ----------------------------------------------------------------------------

/// One decimal place, trailing zero trimmed (38.0 renders as "38").
fn format_decimal(value: f64) -> String {
    let formatted = format!("{:.1}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Dollar amount rounded to whole dollars with thousands grouping.
/// Negative amounts keep their sign.
fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let digits = (rounded.abs() as u64).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
