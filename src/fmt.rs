use calamine::Data;

/// Render a number the way a spreadsheet shows a plain value: `100.5`, `45000`, `-3.25`.
pub fn number(val: f64) -> String {
    if val == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{val}")
}

/// Render a spreadsheet cell as CSV text.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
        Data::Empty => String::new(),
    }
}
