use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::classifier::DEFAULT_INSTITUTION;
use crate::error::{ConvertError, Result};
use crate::importer::{read_statement_rows, read_template, TRANSACTIONS_SHEET};
use crate::models::{TemplateHeaders, TransformedRecord};
use crate::transformer::transform_rows;

pub const DEFAULT_TEMPLATE_PATH: &str = "./StatementImportTemplate.en-US.csv";
pub const OUTPUT_SUFFIX: &str = "_TransformedData.csv";

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub template_path: PathBuf,
    /// Payee written for interest rows.
    pub institution: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            institution: DEFAULT_INSTITUTION.to_string(),
        }
    }
}

/// `<dir>/<file name>_TransformedData.csv`, next to the input. The input keeps its extension.
pub fn output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    input.with_file_name(format!("{name}{OUTPUT_SUFFIX}"))
}

pub fn render_csv(headers: &TemplateHeaders, records: &[TransformedRecord]) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(headers.names())?;
    for record in records {
        debug_assert!(record.keys().eq(headers.names().iter().map(String::as_str)));
        wtr.write_record(record.values())?;
    }
    wtr.into_inner()
        .map_err(|e| ConvertError::Csv(e.into_error().into()))
}

/// Convert one statement. Nothing is written unless every row transforms.
pub fn try_convert_file(input: &Path, options: &ConvertOptions) -> Result<PathBuf> {
    let headers = read_template(&options.template_path)?;
    println!("The CSV template file has been read successfully.");

    let rows = read_statement_rows(input, TRANSACTIONS_SHEET)?;
    println!("The Excel file has been read successfully: {}", input.display());

    let records = transform_rows(&rows, &headers, &options.institution)?;
    let bytes = render_csv(&headers, &records)?;

    let out = output_path(input);
    std::fs::write(&out, bytes).map_err(|source| ConvertError::Write {
        path: out.clone(),
        source,
    })?;
    println!("The CSV file was written successfully: {}", out.display());
    log::debug!("{}: {} records", out.display(), records.len());
    Ok(out)
}

/// Convert one statement, reporting any failure on stderr instead of returning it,
/// so one bad file never stops a batch.
pub fn convert_file(input: &Path, options: &ConvertOptions) -> Option<PathBuf> {
    match try_convert_file(input, options) {
        Ok(out) => Some(out),
        Err(e) => {
            eprintln!("{} {}: {e}", "Error:".red().bold(), input.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{transaction, write_statement, STATEMENT_HEADERS, TEMPLATE};

    fn setup(dir: &Path) -> ConvertOptions {
        let template_path = dir.join("StatementImportTemplate.en-US.csv");
        std::fs::write(&template_path, TEMPLATE).unwrap();
        ConvertOptions {
            template_path,
            ..ConvertOptions::default()
        }
    }

    #[test]
    fn test_output_path_keeps_extension() {
        assert_eq!(
            output_path(Path::new("/tmp/stmts/IcecreamA.xls")),
            PathBuf::from("/tmp/stmts/IcecreamA.xls_TransformedData.csv")
        );
        assert_eq!(
            output_path(Path::new("Optimal 2023.XLS")),
            PathBuf::from("Optimal 2023.XLS_TransformedData.csv")
        );
    }

    #[test]
    fn test_render_csv_quotes_when_needed() {
        let headers =
            TemplateHeaders::from_names(["Date", "Amount", "Payee", "Description", "Reference"]).unwrap();
        let record = TransformedRecord::new(
            headers
                .names()
                .iter()
                .zip(["2023-03-15", "1000", "Doe, Jane", "Bank Transfer from Doe, Jane", "say \"hi\""])
                .map(|(k, v)| (k.clone(), v.to_string()))
                .collect(),
        );
        let out = String::from_utf8(render_csv(&headers, &[record]).unwrap()).unwrap();
        assert_eq!(
            out,
            "Date,Amount,Payee,Description,Reference\n\
             2023-03-15,1000,\"Doe, Jane\",\"Bank Transfer from Doe, Jane\",\"say \"\"hi\"\"\"\n"
        );
    }

    #[test]
    fn test_convert_file_writes_transformed_csv() {
        let dir = tempfile::tempdir().unwrap();
        let options = setup(dir.path());
        let input = dir.path().join("Optimal Savings.xls");
        write_statement(
            &input,
            &STATEMENT_HEADERS,
            &[
                transaction(45000.0, 100.5, "Transfer in", "Jane Doe", "Ref123"),
                transaction(45001.0, -40.0, "Transfer out", "Landlord", "Rent"),
                transaction(45016.0, 0.37, "Interest received", "Interest paid", "INT"),
            ],
        );

        let out = try_convert_file(&input, &options).unwrap();
        assert_eq!(out, dir.path().join("Optimal Savings.xls_TransformedData.csv"));
        let content = std::fs::read_to_string(&out).unwrap();
        assert_eq!(
            content,
            "Date,Amount,Payee,Description,Reference\n\
             2023-03-15,100.5,Jane Doe,Bank Transfer from Jane Doe,Ref123\n\
             2023-03-16,-40,Landlord,Bank Transfer to Landlord,Rent\n\
             2023-03-31,0.37,Bank Zero,Interest paid,INT\n"
        );
    }

    #[test]
    fn test_unknown_type_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let options = setup(dir.path());
        let input = dir.path().join("Icecream.xls");
        write_statement(
            &input,
            &STATEMENT_HEADERS,
            &[
                transaction(45000.0, 10.0, "Transfer in", "Jane Doe", "Ref123"),
                transaction(45001.0, 10.0, "Unknown", "???", ""),
            ],
        );

        let err = try_convert_file(&input, &options).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidState(_)));
        assert!(!output_path(&input).exists());
        assert!(convert_file(&input, &options).is_none());
    }

    #[test]
    fn test_missing_template_fails_before_reading_input() {
        let dir = tempfile::tempdir().unwrap();
        let options = ConvertOptions {
            template_path: dir.path().join("missing.csv"),
            ..ConvertOptions::default()
        };
        let err = try_convert_file(&dir.path().join("Icecream.xls"), &options).unwrap_err();
        assert!(matches!(err, ConvertError::FileRead { .. }));
    }

    #[test]
    fn test_institution_override() {
        let dir = tempfile::tempdir().unwrap();
        let options = ConvertOptions {
            institution: "Acme Bank".to_string(),
            ..setup(dir.path())
        };
        let input = dir.path().join("Cash reserves.xls");
        write_statement(
            &input,
            &STATEMENT_HEADERS,
            &[transaction(45000.0, 1.25, "Interest received", "Interest", "")],
        );
        let out = try_convert_file(&input, &options).unwrap();
        let content = std::fs::read_to_string(out).unwrap();
        assert!(content.contains("2023-03-15,1.25,Acme Bank,Interest,\n"));
    }

    #[test]
    fn test_extra_template_columns_written_empty() {
        let dir = tempfile::tempdir().unwrap();
        let template_path = dir.path().join("template.csv");
        std::fs::write(
            &template_path,
            "Date,Amount,Payee,Description,Reference,Check Number\n",
        )
        .unwrap();
        let options = ConvertOptions {
            template_path,
            ..ConvertOptions::default()
        };
        let input = dir.path().join("Optimal Savings.xls");
        write_statement(
            &input,
            &STATEMENT_HEADERS,
            &[transaction(45000.0, 100.5, "Transfer in", "Jane Doe", "Ref123")],
        );

        let out = try_convert_file(&input, &options).unwrap();
        assert_eq!(
            std::fs::read_to_string(out).unwrap(),
            "Date,Amount,Payee,Description,Reference,Check Number\n\
             2023-03-15,100.5,Jane Doe,Bank Transfer from Jane Doe,Ref123,\n"
        );
    }

    #[test]
    fn test_unwritable_output_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let options = setup(dir.path());
        let input = dir.path().join("Icecream.xls");
        write_statement(
            &input,
            &STATEMENT_HEADERS,
            &[transaction(45000.0, 10.0, "Transfer in", "Jane Doe", "Ref123")],
        );
        // a directory squatting on the output name
        std::fs::create_dir(output_path(&input)).unwrap();

        let err = try_convert_file(&input, &options).unwrap_err();
        match err {
            ConvertError::Write { path, .. } => assert_eq!(path, output_path(&input)),
            other => panic!("unexpected error: {other}"),
        }
        assert!(convert_file(&input, &options).is_none());
        assert!(output_path(&input).is_dir());
    }
}
