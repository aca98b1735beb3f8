//! Workbook fixtures shaped like a statement export: a summary sheet first,
//! transactions on the second sheet.

use std::path::Path;

use rust_xlsxwriter::Workbook;

pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Blank,
}

pub fn write_statement(path: &Path, headers: &[&str], rows: &[Vec<Cell>]) {
    let mut workbook = Workbook::new();

    let summary = workbook.add_worksheet();
    summary.set_name("Summary").unwrap();
    summary.write_string(0, 0, "Account summary").unwrap();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Transactions").unwrap();
    for (col, name) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *name).unwrap();
    }
    for (i, cells) in rows.iter().enumerate() {
        let row = i as u32 + 1;
        for (col, cell) in cells.iter().enumerate() {
            match cell {
                Cell::Text(s) => {
                    sheet.write_string(row, col as u16, *s).unwrap();
                }
                Cell::Number(n) => {
                    sheet.write_number(row, col as u16, *n).unwrap();
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save(path).unwrap();
}

/// A standard five-column transaction row.
pub fn transaction<'a>(
    serial: f64,
    amount: f64,
    kind: &'a str,
    description_1: &'a str,
    description_2: &'a str,
) -> Vec<Cell<'a>> {
    vec![
        Cell::Number(serial),
        Cell::Number(amount),
        Cell::Text(kind),
        Cell::Text(description_1),
        Cell::Text(description_2),
    ]
}

pub const STATEMENT_HEADERS: [&str; 5] = ["Date", "Amount", "Type", "Description 1", "Description 2"];

pub const TEMPLATE: &str = "Date,Amount,Payee,Description,Reference\n";
