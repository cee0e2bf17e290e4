use std::collections::BTreeMap;

use crate::model::{ClientAggregate, PaymentRecord};

/// Group records by client id and sum amounts. Pure reduction: empty input
/// yields empty output, and output order is ascending client id.
pub fn aggregate_totals(rows: &[PaymentRecord]) -> Vec<ClientAggregate> {
    let mut groups: BTreeMap<i64, f64> = BTreeMap::new();

    for row in rows {
        *groups.entry(row.client_id).or_insert(0.0) += row.amount;
    }

    groups
        .into_iter()
        .map(|(client_id, total)| ClientAggregate { client_id, total })
        .collect()
}
