use std::collections::HashMap;

use crate::model::PaymentRecord;

/// Per-client amounts recorded under a non-primary payment method.
#[derive(Debug, Default)]
pub struct AlternatePool {
    by_client: HashMap<i64, Vec<f64>>,
}

impl AlternatePool {
    /// Index reported records whose method differs from the primary code.
    /// Records without a method value are primary by definition and never
    /// enter the pool.
    pub fn build(records: &[PaymentRecord], primary_method: &str) -> Self {
        let mut by_client: HashMap<i64, Vec<f64>> = HashMap::new();

        for record in records {
            if let Some(ref method) = record.method {
                if method.as_str() != primary_method {
                    by_client.entry(record.client_id).or_default().push(record.amount);
                }
            }
        }

        Self { by_client }
    }

    pub fn amounts_for(&self, client_id: i64) -> &[f64] {
        self.by_client
            .get(&client_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

/// True when the shortfall is explained by a single alternate-method
/// payment, or by an unordered pair of two distinct ones, within `epsilon`.
///
/// The pairwise scan is O(n²) in the client's alternate-method record
/// count; per-client counts are expected to stay in the tens. The search
/// is limited to pairs; triples and larger combinations are out of scope.
pub fn explains_shortfall(amounts: &[f64], shortfall: f64, epsilon: f64) -> bool {
    if amounts.is_empty() {
        return false;
    }

    if amounts.iter().any(|a| (a - shortfall).abs() < epsilon) {
        return true;
    }

    for i in 0..amounts.len() {
        for j in (i + 1)..amounts.len() {
            if (amounts[i] + amounts[j] - shortfall).abs() < epsilon {
                return true;
            }
        }
    }

    false
}
