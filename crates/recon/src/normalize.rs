//! CSV → `PaymentRecord` normalization.
//!
//! Header indexes are resolved once per source; the per-row path never
//! branches on column presence. Rows failing numeric coercion are dropped
//! and counted rather than failing the run.

use crate::config::{LedgerConfig, ReportedConfig};
use crate::error::ReconError;
use crate::model::PaymentRecord;

/// Normalized records plus the count of rows dropped by coercion.
#[derive(Debug)]
pub struct LoadOutcome {
    pub records: Vec<PaymentRecord>,
    pub dropped: usize,
}

/// Parse a financial amount string:
/// - Strip `$`, commas, whitespace
/// - Handle `(123.45)` → `-123.45`
/// - Returns None if non-numeric characters remain after stripping
pub fn clean_amount(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Parenthesized negatives: (123.45) → -123.45
    let (is_negative, inner) = if trimmed.starts_with('(') && trimmed.ends_with(')') {
        (true, &trimmed[1..trimmed.len() - 1])
    } else {
        (false, trimmed)
    };

    let cleaned: String = inner
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    for (i, c) in cleaned.chars().enumerate() {
        match c {
            '0'..='9' | '.' => {}
            '-' | '+' if i == 0 && !is_negative => {}
            _ => return None,
        }
    }

    let value: f64 = cleaned.parse().ok()?;
    Some(if is_negative { -value } else { value })
}

/// Parse a client identifier. Tolerates the integral-float form spreadsheet
/// exports produce ("10023.0").
pub fn parse_client_id(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(id) = trimmed.parse::<i64>() {
        return Some(id);
    }
    let value: f64 = trimmed.parse().ok()?;
    // i64-exact range for f64
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        Some(value as i64)
    } else {
        None
    }
}

fn read_headers(
    reader: &mut csv::Reader<&[u8]>,
) -> Result<Vec<String>, ReconError> {
    Ok(reader
        .headers()
        .map_err(|e| ReconError::Io(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect())
}

/// Load the transfer-ledger feed. Required columns: client id, amount.
/// Client ids under the exclusion prefix (test/internal accounts) are
/// skipped before aggregation and do not count as dropped.
pub fn load_ledger_rows(
    csv_data: &str,
    config: &LedgerConfig,
) -> Result<LoadOutcome, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());
    let headers = read_headers(&mut reader)?;

    let mut missing = Vec::new();
    let mut require = |name: &str| -> usize {
        match headers.iter().position(|h| h == name) {
            Some(i) => i,
            None => {
                missing.push(name.to_string());
                0
            }
        }
    };
    let client_idx = require(&config.columns.client_id);
    let amount_idx = require(&config.columns.amount);
    if !missing.is_empty() {
        return Err(ReconError::MissingColumns {
            source: "ledger".into(),
            missing,
            found: headers,
        });
    }

    let mut records = Vec::new();
    let mut dropped = 0;

    for row in reader.records() {
        let row = row.map_err(|e| ReconError::Io(e.to_string()))?;

        let client_id = match parse_client_id(row.get(client_idx).unwrap_or("")) {
            Some(id) => id,
            None => {
                dropped += 1;
                continue;
            }
        };
        let amount = match clean_amount(row.get(amount_idx).unwrap_or("")) {
            Some(a) => a,
            None => {
                dropped += 1;
                continue;
            }
        };

        if !config.exclude_prefix.is_empty()
            && client_id.to_string().starts_with(&config.exclude_prefix)
        {
            continue;
        }

        records.push(PaymentRecord {
            client_id,
            amount,
            method: None,
        });
    }

    Ok(LoadOutcome { records, dropped })
}

/// Load the point-of-sale income feed. Required columns: client id, amount.
/// Branch and status filters apply only when their column exists in the
/// header; the method value is captured on every surviving record.
pub fn load_reported_rows(
    csv_data: &str,
    config: &ReportedConfig,
) -> Result<LoadOutcome, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());
    let headers = read_headers(&mut reader)?;

    let mut missing = Vec::new();
    let mut require = |name: &str| -> usize {
        match headers.iter().position(|h| h == name) {
            Some(i) => i,
            None => {
                missing.push(name.to_string());
                0
            }
        }
    };
    let client_idx = require(&config.columns.client_id);
    let amount_idx = require(&config.columns.amount);
    if !missing.is_empty() {
        return Err(ReconError::MissingColumns {
            source: "reported".into(),
            missing,
            found: headers,
        });
    }

    // Optional columns, resolved once.
    let method_idx = headers.iter().position(|h| h == &config.columns.method);
    let branch_idx = headers.iter().position(|h| h == &config.columns.branch);
    let status_idx = headers.iter().position(|h| h == &config.columns.status);

    let mut records = Vec::new();
    let mut dropped = 0;

    for row in reader.records() {
        let row = row.map_err(|e| ReconError::Io(e.to_string()))?;

        if let Some(bi) = branch_idx {
            if row.get(bi).unwrap_or("").trim() != config.filters.branch {
                continue;
            }
        }
        if let Some(si) = status_idx {
            if row.get(si).unwrap_or("").trim() != config.filters.status {
                continue;
            }
        }

        let client_id = match parse_client_id(row.get(client_idx).unwrap_or("")) {
            Some(id) => id,
            None => {
                dropped += 1;
                continue;
            }
        };
        let amount = match clean_amount(row.get(amount_idx).unwrap_or("")) {
            Some(a) => a,
            None => {
                dropped += 1;
                continue;
            }
        };

        let method = method_idx.map(|mi| row.get(mi).unwrap_or("").trim().to_string());

        records.push(PaymentRecord {
            client_id,
            amount,
            method,
        });
    }

    Ok(LoadOutcome { records, dropped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LedgerConfig, ReportedConfig};

    fn ledger_config() -> LedgerConfig {
        let toml = r#"
name = "t"
[ledger]
file = "l.csv"
[reported]
file = "r.csv"
"#;
        crate::config::ReconConfig::from_toml(toml).unwrap().ledger
    }

    fn reported_config() -> ReportedConfig {
        let toml = r#"
name = "t"
[ledger]
file = "l.csv"
[reported]
file = "r.csv"
"#;
        crate::config::ReconConfig::from_toml(toml).unwrap().reported
    }

    #[test]
    fn clean_amount_currency_strings() {
        assert_eq!(clean_amount("123.45"), Some(123.45));
        assert_eq!(clean_amount("$685.00"), Some(685.0));
        assert_eq!(clean_amount("$1,234.56"), Some(1234.56));
        assert_eq!(clean_amount("  42  "), Some(42.0));
        assert_eq!(clean_amount("(500.00)"), Some(-500.0));
    }

    #[test]
    fn clean_amount_rejects_junk() {
        assert_eq!(clean_amount(""), None);
        assert_eq!(clean_amount("   "), None);
        assert_eq!(clean_amount("N/A"), None);
        assert_eq!(clean_amount("12abc"), None);
    }

    #[test]
    fn client_id_accepts_integral_float() {
        assert_eq!(parse_client_id("10023"), Some(10023));
        assert_eq!(parse_client_id("10023.0"), Some(10023));
        assert_eq!(parse_client_id(" 7 "), Some(7));
        assert_eq!(parse_client_id("10023.5"), None);
        assert_eq!(parse_client_id("abc"), None);
        assert_eq!(parse_client_id(""), None);
    }

    #[test]
    fn ledger_load_basic() {
        let csv = "\
NumeroClienteSAP,Monto
1001,\"$1,500.00\"
1002,200.50
";
        let out = load_ledger_rows(csv, &ledger_config()).unwrap();
        assert_eq!(out.dropped, 0);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[0].client_id, 1001);
        assert_eq!(out.records[0].amount, 1500.0);
        assert!(out.records[0].method.is_none());
    }

    #[test]
    fn ledger_drops_unparseable_rows() {
        let csv = "\
NumeroClienteSAP,Monto
1001,100.00
,200.00
1003,N/A
1004,300.00
";
        let out = load_ledger_rows(csv, &ledger_config()).unwrap();
        assert_eq!(out.dropped, 2);
        assert_eq!(out.records.len(), 2);
    }

    #[test]
    fn ledger_excludes_internal_prefix() {
        let csv = "\
NumeroClienteSAP,Monto
1001,100.00
99990123,500.00
9999,75.00
";
        let out = load_ledger_rows(csv, &ledger_config()).unwrap();
        assert_eq!(out.dropped, 0);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].client_id, 1001);
    }

    #[test]
    fn ledger_missing_columns_lists_found() {
        let csv = "\
Cliente,Importe
1001,100.00
";
        let err = load_ledger_rows(csv, &ledger_config()).unwrap_err();
        match err {
            ReconError::MissingColumns { source, missing, found } => {
                assert_eq!(source, "ledger");
                assert_eq!(missing, vec!["NumeroClienteSAP", "Monto"]);
                assert_eq!(found, vec!["Cliente", "Importe"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reported_applies_branch_and_status_filters() {
        let csv = "\
NO. CLIENTE,TOTAL,METODO DE PAGO,SUCURSAL,ESTATUS
1001,100.00,STP-03,99,Active
1002,200.00,STP-03,01,Active
1003,300.00,STP-03,99,Cancelled
1004,400.00,CASH,99,Active
";
        let out = load_reported_rows(csv, &reported_config()).unwrap();
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[0].client_id, 1001);
        assert_eq!(out.records[1].client_id, 1004);
        assert_eq!(out.records[1].method.as_deref(), Some("CASH"));
    }

    #[test]
    fn reported_without_optional_columns() {
        let csv = "\
NO. CLIENTE,TOTAL
1001,100.00
1002,200.00
";
        let out = load_reported_rows(csv, &reported_config()).unwrap();
        assert_eq!(out.records.len(), 2);
        assert!(out.records.iter().all(|r| r.method.is_none()));
    }

    #[test]
    fn reported_header_whitespace_trimmed() {
        let csv = "\
 NO. CLIENTE ,TOTAL
1001,100.00
";
        let out = load_reported_rows(csv, &reported_config()).unwrap();
        assert_eq!(out.records.len(), 1);
    }
}
