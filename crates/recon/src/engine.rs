use crate::aggregate::aggregate_totals;
use crate::classify::classify_rows;
use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::matcher::outer_join;
use crate::model::{PaymentRecord, ReconInput, ReconMeta, ReconResult};
use crate::report::{compute_summary, sort_rows};
use crate::search::AlternatePool;

/// Run one reconciliation over normalized records: aggregate both sources,
/// outer-join per client, classify every row, sort, summarize.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconResult, ReconError> {
    if input.ledger.is_empty() {
        return Err(ReconError::EmptyInput {
            source: "ledger".into(),
        });
    }
    if input.reported.is_empty() {
        return Err(ReconError::EmptyInput {
            source: "reported".into(),
        });
    }

    let primary = &config.reported.primary_method;

    // Primary-method records feed the reported aggregate; everything else
    // feeds the alternate-payment pool. Records without a method value are
    // primary by definition.
    let primary_records: Vec<PaymentRecord> = input
        .reported
        .iter()
        .filter(|r| r.method.as_deref().map_or(true, |m| m == primary.as_str()))
        .cloned()
        .collect();
    let pool = AlternatePool::build(&input.reported, primary);

    let ledger_aggs = aggregate_totals(&input.ledger);
    let reported_aggs = aggregate_totals(&primary_records);

    let matched = outer_join(&ledger_aggs, &reported_aggs);
    let mut rows = classify_rows(&matched, &pool, &config.tolerance);
    sort_rows(&mut rows);
    let summary = compute_summary(&rows);

    Ok(ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        rows,
    })
}
