use std::path::PathBuf;

use payval_recon::config::ReconConfig;
use payval_recon::engine::run;
use payval_recon::model::{Reason, ReconInput};
use payval_recon::normalize::{load_ledger_rows, load_reported_rows, LoadOutcome};
use payval_recon::ReconResult;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

fn load_fixtures(config: &ReconConfig) -> (LoadOutcome, LoadOutcome) {
    let ledger = load_ledger_rows(&read_fixture(&config.ledger.file), &config.ledger).unwrap();
    let reported =
        load_reported_rows(&read_fixture(&config.reported.file), &config.reported).unwrap();
    (ledger, reported)
}

fn run_fixtures() -> ReconResult {
    let config = ReconConfig::from_toml(&read_fixture("validation.toml")).unwrap();
    let (ledger, reported) = load_fixtures(&config);
    let input = ReconInput {
        ledger: ledger.records,
        reported: reported.records,
    };
    run(&config, &input).unwrap()
}

#[test]
fn fixture_run_covers_every_category() {
    let result = run_fixtures();

    assert_eq!(result.summary.total_rows, 6);
    assert_eq!(result.summary.ok, 2);
    assert_eq!(result.summary.no_pos_payment, 1);
    assert_eq!(result.summary.duplicate_payment, 1);
    assert_eq!(result.summary.alternate_method, 1);
    assert_eq!(result.summary.difference, 1);

    let reason_of = |id: i64| {
        result
            .rows
            .iter()
            .find(|r| r.client_id == id)
            .unwrap_or_else(|| panic!("client {id} missing from rows"))
            .reason
            .clone()
    };
    assert_eq!(reason_of(1001), Reason::Ok);
    assert_eq!(reason_of(1002), Reason::NoPosPayment);
    assert_eq!(reason_of(1003), Reason::DuplicatePayment(3));
    assert_eq!(reason_of(1004), Reason::AlternateMethod);
    assert_eq!(reason_of(1005), Reason::Difference);
    assert_eq!(reason_of(1006), Reason::Ok);
}

#[test]
fn fixture_rows_sorted_by_absolute_difference() {
    let result = run_fixtures();
    let ids: Vec<i64> = result.rows.iter().map(|r| r.client_id).collect();
    // 1002 leads with |1200|; the 200-diff trio keeps join order; zero
    // diffs close in join order.
    assert_eq!(ids, vec![1002, 1003, 1004, 1005, 1001, 1006]);

    for pair in result.rows.windows(2) {
        assert!(pair[0].difference.abs() >= pair[1].difference.abs());
    }
}

#[test]
fn fixture_difference_invariant() {
    let result = run_fixtures();
    for row in &result.rows {
        assert_eq!(row.difference, row.amount_ledger - row.amount_reported);
    }
}

#[test]
fn fixture_excluded_and_filtered_rows_never_surface() {
    let result = run_fixtures();
    for row in &result.rows {
        assert!(
            !row.client_id.to_string().starts_with("9999"),
            "internal account {} leaked into the comparison",
            row.client_id
        );
        assert!(row.client_id < 2000, "filtered reported row leaked");
    }
}

#[test]
fn fixture_drop_counts() {
    let config = ReconConfig::from_toml(&read_fixture("validation.toml")).unwrap();
    let (ledger, reported) = load_fixtures(&config);
    // transfers.csv: one N/A amount. income.csv: one unparseable total.
    assert_eq!(ledger.dropped, 1);
    assert_eq!(reported.dropped, 1);
}

#[test]
fn fixture_currency_cleanup_reconciles() {
    let result = run_fixtures();
    let row = result.rows.iter().find(|r| r.client_id == 1006).unwrap();
    assert_eq!(row.amount_ledger, 1234.56);
    assert_eq!(row.amount_reported, 1234.56);
}

#[test]
fn fixture_meta_is_stamped() {
    let result = run_fixtures();
    assert_eq!(result.meta.config_name, "Fixture Validation");
    assert!(!result.meta.engine_version.is_empty());
    assert!(result.meta.run_at.contains('T'));
}

#[test]
fn result_serializes_reasons_as_display_strings() {
    let result = run_fixtures();
    let json = serde_json::to_value(&result).unwrap();
    let reasons: Vec<&str> = json["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["reason"].as_str().unwrap())
        .collect();
    assert!(reasons.contains(&"no payment applied at point of sale"));
    assert!(reasons.contains(&"duplicate payment (3 times)"));
    assert!(reasons.contains(&"recorded under another payment method"));
}
