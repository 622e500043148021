// Customer roster: spreadsheet-backed records that get a `profile` filled in.
// Loading is fatal on error; writing back is best-effort (see pipeline).

pub mod loader;
pub mod writer;

use std::collections::HashMap;
use std::fmt;

pub use loader::load_roster;
pub use writer::write_profiles;

pub const FIRST_NAME_COLUMN: &str = "first_name";
pub const LAST_NAME_COLUMN: &str = "last_name";
pub const CITY_COLUMN: &str = "city";
pub const PROFILE_COLUMN: &str = "profile";

/// Columns the pipeline reads or writes. Absence is tolerated until lookup time.
pub const EXPECTED_COLUMNS: [&str; 4] = [
    FIRST_NAME_COLUMN,
    LAST_NAME_COLUMN,
    CITY_COLUMN,
    PROFILE_COLUMN,
];

/// A single scalar spreadsheet cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    /// Empty cells and empty strings count as "not set".
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// One roster row, keyed by header name. Identity is the row position only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerRecord {
    pub fields: HashMap<String, CellValue>,
}

impl CustomerRecord {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields.get(column)
    }

    /// Cell rendered as text; a missing column reads as "".
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(|v| v.to_string()).unwrap_or_default()
    }

    pub fn first_name(&self) -> String {
        self.text(FIRST_NAME_COLUMN)
    }

    pub fn last_name(&self) -> String {
        self.text(LAST_NAME_COLUMN)
    }

    pub fn city(&self) -> String {
        self.text(CITY_COLUMN)
    }

    pub fn has_profile(&self) -> bool {
        self.get(PROFILE_COLUMN).is_some_and(|v| !v.is_blank())
    }

    pub fn set_profile(&mut self, profile: String) {
        self.fields
            .insert(PROFILE_COLUMN.to_string(), CellValue::Text(profile));
    }
}

/// Header row plus every data row, in sheet order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    pub headers: Vec<String>,
    pub records: Vec<CustomerRecord>,
}

impl Roster {
    pub fn missing_columns(&self) -> Vec<&'static str> {
        EXPECTED_COLUMNS
            .into_iter()
            .filter(|c| !self.headers.iter().any(|h| h == c))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
