//! CSV report export: the detailed comparison table and the
//! reason-frequency summary, suitable for spreadsheet import.

use std::path::{Path, PathBuf};

use payval_recon::model::{ComparisonRow, ReconSummary};
use payval_recon::report::summary_rows;

use crate::CliError;

/// Detail table columns. Order and names are part of the output contract.
const DETAIL_HEADER: [&str; 5] = [
    "client_id",
    "amount_ledger",
    "amount_reported",
    "difference",
    "reason",
];

/// Timestamped default report paths, e.g.
/// `validation_20260131_153012_detail.csv`.
pub fn default_report_paths() -> (PathBuf, PathBuf) {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    (
        PathBuf::from(format!("validation_{stamp}_detail.csv")),
        PathBuf::from(format!("validation_{stamp}_summary.csv")),
    )
}

fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

pub fn write_detail_csv(path: &Path, rows: &[ComparisonRow]) -> Result<(), CliError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| CliError::runtime(format!("cannot write {}: {e}", path.display())))?;

    writer
        .write_record(DETAIL_HEADER)
        .map_err(|e| CliError::runtime(e.to_string()))?;

    for row in rows {
        writer
            .write_record([
                row.client_id.to_string(),
                format_amount(row.amount_ledger),
                format_amount(row.amount_reported),
                format_amount(row.difference),
                row.reason.to_string(),
            ])
            .map_err(|e| CliError::runtime(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| CliError::runtime(e.to_string()))
}

pub fn write_summary_csv(path: &Path, summary: &ReconSummary) -> Result<(), CliError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| CliError::runtime(format!("cannot write {}: {e}", path.display())))?;

    writer
        .write_record(["reason", "count"])
        .map_err(|e| CliError::runtime(e.to_string()))?;

    for (reason, count) in summary_rows(summary) {
        writer
            .write_record([reason, count.to_string()])
            .map_err(|e| CliError::runtime(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| CliError::runtime(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use payval_recon::model::Reason;
    use payval_recon::report::compute_summary;

    fn rows() -> Vec<ComparisonRow> {
        vec![
            ComparisonRow {
                client_id: 1002,
                amount_ledger: 1200.0,
                amount_reported: 0.0,
                difference: 1200.0,
                reason: Reason::NoPosPayment,
            },
            ComparisonRow {
                client_id: 1001,
                amount_ledger: 500.0,
                amount_reported: 500.0,
                difference: 0.0,
                reason: Reason::Ok,
            },
        ]
    }

    #[test]
    fn detail_csv_column_contract() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("detail.csv");
        write_detail_csv(&path, &rows()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next().unwrap(),
            "client_id,amount_ledger,amount_reported,difference,reason"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1002,1200.00,0.00,1200.00,no payment applied at point of sale"
        );
        assert_eq!(lines.next().unwrap(), "1001,500.00,500.00,0.00,OK");
    }

    #[test]
    fn summary_csv_column_contract() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        write_summary_csv(&path, &compute_summary(&rows())).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next().unwrap(), "reason,count");
        // 1-count ties sort by reason text: "OK" precedes "no payment...".
        assert_eq!(lines.next().unwrap(), "OK,1");
        assert_eq!(
            lines.next().unwrap(),
            "no payment applied at point of sale,1"
        );
    }

    #[test]
    fn default_paths_are_timestamped() {
        let (detail, summary) = default_report_paths();
        let detail = detail.to_string_lossy().into_owned();
        let summary = summary.to_string_lossy().into_owned();
        assert!(detail.starts_with("validation_"));
        assert!(detail.ends_with("_detail.csv"));
        assert!(summary.ends_with("_summary.csv"));
    }
}
