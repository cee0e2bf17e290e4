use std::collections::HashMap;

use crate::model::{ComparisonRow, Reason, ReconSummary};

/// Stable sort by absolute difference, descending. Ties keep join order;
/// the resulting order is part of the report's compatibility surface.
pub fn sort_rows(rows: &mut [ComparisonRow]) {
    rows.sort_by(|a, b| {
        b.difference
            .abs()
            .partial_cmp(&a.difference.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Tally classified rows per reason.
pub fn compute_summary(rows: &[ComparisonRow]) -> ReconSummary {
    let mut reason_counts: HashMap<String, usize> = HashMap::new();
    let mut ok = 0;
    let mut no_pos_payment = 0;
    let mut duplicate_payment = 0;
    let mut alternate_method = 0;
    let mut difference = 0;

    for row in rows {
        *reason_counts.entry(row.reason.to_string()).or_insert(0) += 1;

        match row.reason {
            Reason::Ok => ok += 1,
            Reason::NoPosPayment => no_pos_payment += 1,
            Reason::DuplicatePayment(_) => duplicate_payment += 1,
            Reason::AlternateMethod => alternate_method += 1,
            Reason::Difference => difference += 1,
        }
    }

    ReconSummary {
        total_rows: rows.len(),
        ok,
        no_pos_payment,
        duplicate_payment,
        alternate_method,
        difference,
        reason_counts,
    }
}

/// Summary table rows ordered for export: count descending, then reason
/// text ascending.
pub fn summary_rows(summary: &ReconSummary) -> Vec<(String, usize)> {
    let mut rows: Vec<(String, usize)> = summary
        .reason_counts
        .iter()
        .map(|(reason, count)| (reason.clone(), *count))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}
