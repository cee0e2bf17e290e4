use std::collections::HashMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single normalized payment record from either source.
///
/// `method` is only populated for the reported source, and only when the
/// feed carries a payment-method column.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    pub client_id: i64,
    pub amount: f64,
    pub method: Option<String>,
}

/// Pre-normalized records for one reconciliation run.
pub struct ReconInput {
    pub ledger: Vec<PaymentRecord>,
    pub reported: Vec<PaymentRecord>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Net total for one client within one source.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientAggregate {
    pub client_id: i64,
    pub total: f64,
}

// ---------------------------------------------------------------------------
// Outer join
// ---------------------------------------------------------------------------

/// One comparison row per client in the union of both sources, reason not
/// yet assigned. A missing side defaults to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedTotals {
    pub client_id: i64,
    pub amount_ledger: f64,
    pub amount_reported: f64,
    pub difference: f64,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Root-cause label for a client's discrepancy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    NoPosPayment,
    Ok,
    DuplicatePayment(u32),
    AlternateMethod,
    Difference,
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPosPayment => write!(f, "no payment applied at point of sale"),
            Self::Ok => write!(f, "OK"),
            Self::DuplicatePayment(n) => write!(f, "duplicate payment ({n} times)"),
            Self::AlternateMethod => write!(f, "recorded under another payment method"),
            Self::Difference => write!(f, "difference"),
        }
    }
}

// The display string is the report's compatibility surface, so JSON carries
// the same text as the CSV export.
impl Serialize for Reason {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Classified comparison row. `difference = amount_ledger - amount_reported`
/// holds before and after classification.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub client_id: i64,
    pub amount_ledger: f64,
    pub amount_reported: f64,
    pub difference: f64,
    pub reason: Reason,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub total_rows: usize,
    pub ok: usize,
    pub no_pos_payment: usize,
    pub duplicate_payment: usize,
    pub alternate_method: usize,
    pub difference: usize,
    pub reason_counts: HashMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}
