use std::collections::BTreeMap;

use crate::model::{ClientAggregate, MatchedTotals};

/// Outer-join two aggregate sets on client id. Every client id in either
/// set appears exactly once; the missing side defaults to 0. Output is
/// ordered by client id; this is the join order downstream tie-breaks
/// preserve.
pub fn outer_join(
    ledger: &[ClientAggregate],
    reported: &[ClientAggregate],
) -> Vec<MatchedTotals> {
    let mut joined: BTreeMap<i64, (f64, f64)> = BTreeMap::new();

    for agg in ledger {
        joined.entry(agg.client_id).or_insert((0.0, 0.0)).0 = agg.total;
    }
    for agg in reported {
        joined.entry(agg.client_id).or_insert((0.0, 0.0)).1 = agg.total;
    }

    joined
        .into_iter()
        .map(|(client_id, (amount_ledger, amount_reported))| MatchedTotals {
            client_id,
            amount_ledger,
            amount_reported,
            difference: amount_ledger - amount_reported,
        })
        .collect()
}
