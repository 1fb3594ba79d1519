//! CSV format handling for ledger exports and annotated output
//!
//! This module centralizes all CSV format concerns, providing:
//! - The column names of the bookkeeping export
//! - Header validation (required columns present)
//! - CsvRecord structure for deserialization and conversion to `LedgerRow`
//! - The result writer that echoes the source columns plus the derived ones
//!
//! All functions are pure (no I/O beyond the writer handed in) for easy testing.

use crate::types::{CorrectionResult, EngineError, LedgerRecord, LedgerRow, LineNumber};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Ledger account label column (required)
pub const ACCOUNT_COLUMN: &str = "Grootboekrekening";

/// Sub-specification column (optional)
pub const SPECIFICATION_COLUMN: &str = "Specificatie";

/// Amount column (required)
pub const AMOUNT_COLUMN: &str = "Bedrag (EUR)";

/// Columns appended to every output row, in order
pub const DERIVED_COLUMNS: [&str; 4] = ["Categorie", "Fiscaal aftrekbaar", "Correctie", "Toelichting"];

/// Input format options shared by the readers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter of the input file
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// CSV record structure for deserialization
///
/// Unknown columns are ignored here; they are still carried to the output
/// through [`LedgerRecord::fields`].
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "Grootboekrekening")]
    pub account_label: String,
    #[serde(rename = "Specificatie", default)]
    pub specification: Option<String>,
    #[serde(rename = "Bedrag (EUR)")]
    pub amount: String,
}

/// Check that the header row contains every required column
///
/// # Errors
///
/// Returns `EngineError::MissingColumns` naming each absent column.
pub fn validate_headers<'a, I>(headers: I) -> Result<(), EngineError>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = headers.into_iter().map(str::trim).collect();
    let missing: Vec<&str> = [ACCOUNT_COLUMN, AMOUNT_COLUMN]
        .into_iter()
        .filter(|required| !present.contains(required))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EngineError::missing_columns(&missing))
    }
}

/// Parse an amount cell
///
/// Accepts plain decimals (`1234.56`) and a single decimal comma
/// (`1234,56`) as found in Dutch exports.
pub fn parse_amount(text: &str, line: Option<LineNumber>) -> Result<Decimal, EngineError> {
    let trimmed = text.trim();

    if let Ok(amount) = Decimal::from_str(trimmed) {
        return Ok(amount);
    }

    if !trimmed.contains('.') && trimmed.matches(',').count() == 1 {
        if let Ok(amount) = Decimal::from_str(&trimmed.replace(',', ".")) {
            return Ok(amount);
        }
    }

    Err(EngineError::invalid_amount(text, line))
}

/// Convert a CsvRecord to a LedgerRow
///
/// A missing or empty specification becomes the empty string.
pub fn convert_csv_record(
    csv_record: CsvRecord,
    line: Option<LineNumber>,
) -> Result<LedgerRow, EngineError> {
    let amount = parse_amount(&csv_record.amount, line)?;

    Ok(LedgerRow {
        account_label: csv_record.account_label,
        specification: csv_record.specification.unwrap_or_default(),
        amount,
    })
}

/// Assemble a LedgerRecord from raw fields and the deserialized record
pub fn build_record(
    line: LineNumber,
    fields: Vec<String>,
    csv_record: CsvRecord,
) -> Result<LedgerRecord, EngineError> {
    let row = convert_csv_record(csv_record, Some(line))?;
    Ok(LedgerRecord { line, fields, row })
}

/// Render an amount with at least two decimals
///
/// Values carrying more precision are written in full so that
/// `deductible + correction == amount` still holds on the page.
pub fn format_amount(value: Decimal) -> String {
    let value = value.normalize();
    if value.scale() < 2 {
        format!("{:.2}", value)
    } else {
        value.to_string()
    }
}

/// Streaming writer for annotated ledger rows
///
/// Writes the source header followed by [`DERIVED_COLUMNS`], then one row
/// per processed record.
pub struct ResultWriter<W: Write> {
    writer: csv::Writer<W>,
    width: usize,
}

impl<W: Write> ResultWriter<W> {
    /// Create a writer and emit the header row
    pub fn new(output: W, source_headers: &[String]) -> Result<Self, EngineError> {
        let mut writer = csv::Writer::from_writer(output);

        let header = source_headers
            .iter()
            .map(String::as_str)
            .chain(DERIVED_COLUMNS);
        writer.write_record(header)?;

        Ok(Self {
            writer,
            width: source_headers.len(),
        })
    }

    /// Write one record with its correction
    ///
    /// Ragged source rows are padded or cut to the header width.
    pub fn write(
        &mut self,
        record: &LedgerRecord,
        result: &CorrectionResult,
    ) -> Result<(), EngineError> {
        let mut fields: Vec<String> = record.fields.iter().take(self.width).cloned().collect();
        fields.resize(self.width, String::new());

        fields.push(result.category.label().to_string());
        fields.push(format_amount(result.deductible_amount));
        fields.push(format_amount(result.correction_amount));
        fields.push(result.explanation.clone());

        self.writer.write_record(&fields)?;
        Ok(())
    }

    /// Flush buffered output
    pub fn finish(mut self) -> Result<(), EngineError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Write a complete annotated table in one call
pub fn write_results_csv(
    source_headers: &[String],
    rows: &[(LedgerRecord, CorrectionResult)],
    output: &mut dyn Write,
) -> Result<(), EngineError> {
    let mut writer = ResultWriter::new(output, source_headers)?;
    for (record, result) in rows {
        writer.write(record, result)?;
    }
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use rstest::rstest;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case::minimal(&["Grootboekrekening", "Bedrag (EUR)"])]
    #[case::with_specification(&["Grootboekrekening", "Specificatie", "Bedrag (EUR)"])]
    #[case::extra_columns(&["Datum", "Bedrag (EUR)", "Grootboekrekening", "Boekstuk"])]
    #[case::padded_names(&[" Grootboekrekening ", " Bedrag (EUR)"])]
    fn test_validate_headers_ok(#[case] names: &[&str]) {
        assert!(validate_headers(names.iter().copied()).is_ok());
    }

    #[rstest]
    #[case::no_amount(&["Grootboekrekening", "Bedrag"], vec!["Bedrag (EUR)"])]
    #[case::no_account(&["Rekening", "Bedrag (EUR)"], vec!["Grootboekrekening"])]
    #[case::neither(&["a", "b"], vec!["Grootboekrekening", "Bedrag (EUR)"])]
    fn test_validate_headers_missing(#[case] names: &[&str], #[case] missing: Vec<&str>) {
        let result = validate_headers(names.iter().copied());
        assert_eq!(result, Err(EngineError::missing_columns(&missing)));
    }

    #[rstest]
    #[case("100", "100")]
    #[case("  -12.50 ", "-12.50")]
    #[case("1234,56", "1234.56")]
    #[case("0", "0")]
    fn test_parse_amount_valid(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(parse_amount(text, None).unwrap(), dec(expected));
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   ")]
    #[case::text("twaalf")]
    #[case::two_commas("1,234,56")]
    #[case::mixed_separators("1.234,56")]
    fn test_parse_amount_invalid(#[case] text: &str) {
        let result = parse_amount(text, Some(4));
        assert_eq!(result, Err(EngineError::invalid_amount(text, Some(4))));
    }

    #[test]
    fn test_convert_csv_record_defaults_specification() {
        let record = CsvRecord {
            account_label: "Huur".to_string(),
            specification: None,
            amount: "1200".to_string(),
        };
        let row = convert_csv_record(record, Some(2)).unwrap();
        assert_eq!(row, LedgerRow::new("Huur", dec("1200")));
    }

    #[test]
    fn test_convert_csv_record_keeps_specification() {
        let record = CsvRecord {
            account_label: "Autokosten".to_string(),
            specification: Some("Tesla".to_string()),
            amount: "10".to_string(),
        };
        let row = convert_csv_record(record, None).unwrap();
        assert_eq!(row.specification, "Tesla");
    }

    #[test]
    fn test_build_record_reports_line() {
        let record = CsvRecord {
            account_label: "Huur".to_string(),
            specification: None,
            amount: "n/a".to_string(),
        };
        let result = build_record(7, vec![], record);
        assert_eq!(result, Err(EngineError::invalid_amount("n/a", Some(7))));
    }

    #[rstest]
    #[case("800", "800.00")]
    #[case("800.0", "800.00")]
    #[case("-20.5", "-20.50")]
    #[case("0", "0.00")]
    #[case("2100.009", "2100.009")]
    #[case("0.0010", "0.001")]
    #[case::cents_at_rate("80.400", "80.40")]
    #[case::trailing_zeros("800.000", "800.00")]
    #[case::two_significant("800.200", "800.20")]
    #[case::cents_kept("200.05", "200.05")]
    fn test_format_amount(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(format_amount(dec(value)), expected);
    }

    fn sample_result() -> CorrectionResult {
        CorrectionResult {
            category: Category::RepresentationCosts,
            deductible_amount: dec("800.0"),
            correction_amount: dec("200.0"),
            explanation: "80% aftrekbaar (art. 3.14 Wet IB 2001)".to_string(),
        }
    }

    #[rstest]
    #[case::exact_width(
        vec!["Representatie", "1000"],
        "Grootboekrekening,Bedrag (EUR),Categorie,Fiscaal aftrekbaar,Correctie,Toelichting\n\
         Representatie,1000,Representatiekosten,800.00,200.00,80% aftrekbaar (art. 3.14 Wet IB 2001)\n"
    )]
    #[case::short_row_padded(
        vec!["Representatie"],
        "Grootboekrekening,Bedrag (EUR),Categorie,Fiscaal aftrekbaar,Correctie,Toelichting\n\
         Representatie,,Representatiekosten,800.00,200.00,80% aftrekbaar (art. 3.14 Wet IB 2001)\n"
    )]
    #[case::long_row_cut(
        vec!["Representatie", "1000", "overflow"],
        "Grootboekrekening,Bedrag (EUR),Categorie,Fiscaal aftrekbaar,Correctie,Toelichting\n\
         Representatie,1000,Representatiekosten,800.00,200.00,80% aftrekbaar (art. 3.14 Wet IB 2001)\n"
    )]
    fn test_write_results_csv(#[case] fields: Vec<&str>, #[case] expected: &str) {
        let record = LedgerRecord {
            line: 2,
            fields: fields.iter().map(|s| s.to_string()).collect(),
            row: LedgerRow::new("Representatie", dec("1000")),
        };
        let mut output = Vec::new();

        write_results_csv(
            &headers(&["Grootboekrekening", "Bedrag (EUR)"]),
            &[(record, sample_result())],
            &mut output,
        )
        .unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[test]
    fn test_write_results_csv_quotes_delimiters() {
        let record = LedgerRecord {
            line: 2,
            fields: vec!["Auto elektrisch".to_string(), "3000".to_string()],
            row: LedgerRow::new("Auto elektrisch", dec("3000")),
        };
        let result = CorrectionResult {
            category: Category::VehicleCostsElectric,
            deductible_amount: dec("2910.0"),
            correction_amount: dec("90.0"),
            explanation: "100% aftrekbaar tot €2100, rest 90%".to_string(),
        };
        let mut output = Vec::new();

        write_results_csv(
            &headers(&["Grootboekrekening", "Bedrag (EUR)"]),
            &[(record, result)],
            &mut output,
        )
        .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.ends_with(
            "Auto elektrisch,3000,Autokosten elektrisch,2910.00,90.00,\"100% aftrekbaar tot €2100, rest 90%\"\n"
        ));
    }

    #[test]
    fn test_write_results_csv_empty() {
        let mut output = Vec::new();
        write_results_csv(&headers(&["Grootboekrekening", "Bedrag (EUR)"]), &[], &mut output)
            .unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Grootboekrekening,Bedrag (EUR),Categorie,Fiscaal aftrekbaar,Correctie,Toelichting\n"
        );
    }
}
