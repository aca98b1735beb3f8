use std::collections::HashMap;

use calamine::Data;

use crate::error::{ConvertError, Result};
use crate::fmt::cell_text;

/// Number of template columns that carry meaning. Extra template columns are ignored.
pub const TEMPLATE_COLUMNS: usize = 5;

/// What an output column holds. Roles are assigned by position in the template,
/// never by the header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Date,
    Amount,
    Payee,
    Description,
    Reference,
}

pub const COLUMN_ROLES: [ColumnRole; TEMPLATE_COLUMNS] = [
    ColumnRole::Date,
    ColumnRole::Amount,
    ColumnRole::Payee,
    ColumnRole::Description,
    ColumnRole::Reference,
];

/// Output column names read from the template header line, in template order.
///
/// Position fixes meaning: column 0 is always decoded as a date and column 1
/// is always copied through as the amount, whatever the template calls them.
/// Reordering the template therefore changes what each column holds, so the
/// template must keep the `Date, Amount, Payee, Description, Reference` order.
/// Columns past the fifth are kept for the output header and left empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateHeaders(Vec<String>);

impl TemplateHeaders {
    pub fn from_names<I>(names: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() < TEMPLATE_COLUMNS {
            return Err(ConvertError::Template(format!(
                "expected at least {TEMPLATE_COLUMNS} column names, found {}",
                names.len()
            )));
        }
        Ok(Self(names))
    }

    /// Every template name, extras included.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Source column holding the date serial.
    pub fn date_column(&self) -> &str {
        &self.0[0]
    }

    /// Source column holding the amount.
    pub fn amount_column(&self) -> &str {
        &self.0[1]
    }

    /// Each name with its role; names past the fifth have none.
    pub fn with_roles(&self) -> impl Iterator<Item = (&str, Option<ColumnRole>)> {
        self.0
            .iter()
            .map(String::as_str)
            .zip(COLUMN_ROLES.into_iter().map(Some).chain(std::iter::repeat(None)))
    }
}

/// One transaction row from the statement sheet, keyed by the sheet's header row.
/// Empty cells are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRow {
    cells: HashMap<String, Data>,
}

impl SourceRow {
    pub fn new(cells: HashMap<String, Data>) -> Self {
        Self { cells }
    }

    pub fn get(&self, column: &str) -> Option<&Data> {
        self.cells.get(column)
    }

    /// Cell rendered as text; absent cells render empty.
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(cell_text).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// One output row: template header name paired with its rendered value, in template order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedRecord {
    fields: Vec<(String, String)>,
}

impl TransformedRecord {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    #[allow(dead_code)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
