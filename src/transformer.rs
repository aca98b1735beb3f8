use crate::classifier::classify;
use crate::error::Result;
use crate::importer::{excel_serial_to_date, serial_from_cell};
use crate::models::{ColumnRole, SourceRow, TemplateHeaders, TransformedRecord};

/// Map one statement row onto the template's columns.
///
/// Column 0 reads the date serial from the source column of the same name,
/// column 1 copies the source amount through as text, and columns 2-4 come
/// from the row's classification. Any further template columns stay empty.
pub fn transform_row(
    row: &SourceRow,
    headers: &TemplateHeaders,
    institution: &str,
) -> Result<TransformedRecord> {
    let narrative = classify(row, institution)?;
    let date = excel_serial_to_date(serial_from_cell(row.get(headers.date_column()))?)?;
    let amount = row.text(headers.amount_column());

    let fields = headers
        .with_roles()
        .map(|(name, role)| {
            let value = match role {
                Some(ColumnRole::Date) => date.clone(),
                Some(ColumnRole::Amount) => amount.clone(),
                Some(ColumnRole::Payee) => narrative.payee.clone(),
                Some(ColumnRole::Description) => narrative.description.clone(),
                Some(ColumnRole::Reference) => narrative.reference.clone(),
                None => String::new(),
            };
            (name.to_string(), value)
        })
        .collect();
    Ok(TransformedRecord::new(fields))
}

/// Transform every row, stopping at the first failure.
pub fn transform_rows(
    rows: &[SourceRow],
    headers: &TemplateHeaders,
    institution: &str,
) -> Result<Vec<TransformedRecord>> {
    rows.iter()
        .map(|row| transform_row(row, headers, institution))
        .collect()
}
