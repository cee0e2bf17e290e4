use crate::config::ToleranceConfig;
use crate::model::{ComparisonRow, MatchedTotals, Reason};
use crate::search::{explains_shortfall, AlternatePool};

/// Slack for deciding whether an overpayment ratio sits on a whole number.
const RATIO_EPSILON: f64 = 0.01;

/// Epsilon-inclusive comparison: preserve human-decimal boundary semantics
/// under IEEE-754 float representation.
fn within_tolerance(ledger: f64, reported: f64, tolerance: f64) -> bool {
    let delta = (ledger - reported).abs();
    let scale = 1.0_f64
        .max(ledger.abs())
        .max(reported.abs())
        .max(delta)
        .max(tolerance);
    delta <= tolerance + f64::EPSILON * 16.0 * scale
}

/// Assign exactly one reason to every comparison row. First matching rule
/// wins; the rule order is part of the output contract: a reported total
/// of exactly 0 is "no payment applied" even when the ledger total is 0
/// as well.
pub fn classify_rows(
    matched: &[MatchedTotals],
    pool: &AlternatePool,
    tolerance: &ToleranceConfig,
) -> Vec<ComparisonRow> {
    matched
        .iter()
        .map(|m| classify_row(m, pool, tolerance))
        .collect()
}

fn classify_row(
    m: &MatchedTotals,
    pool: &AlternatePool,
    tolerance: &ToleranceConfig,
) -> ComparisonRow {
    let reason = if m.amount_reported == 0.0 {
        Reason::NoPosPayment
    } else if within_tolerance(m.amount_ledger, m.amount_reported, tolerance.amount) {
        Reason::Ok
    } else if m.amount_ledger > 0.0 && m.amount_reported > m.amount_ledger {
        let ratio = m.amount_reported / m.amount_ledger;
        let whole = ratio.round();
        if (ratio - whole).abs() < RATIO_EPSILON && whole >= 2.0 {
            Reason::DuplicatePayment(whole as u32)
        } else {
            Reason::Difference
        }
    } else if m.amount_ledger > m.amount_reported {
        let shortfall = m.amount_ledger - m.amount_reported;
        if explains_shortfall(pool.amounts_for(m.client_id), shortfall, tolerance.alternate) {
            Reason::AlternateMethod
        } else {
            Reason::Difference
        }
    } else {
        Reason::Difference
    };

    ComparisonRow {
        client_id: m.client_id,
        amount_ledger: m.amount_ledger,
        amount_reported: m.amount_reported,
        difference: m.difference,
        reason,
    }
}
