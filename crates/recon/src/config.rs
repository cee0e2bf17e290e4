use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ReconConfig {
    pub name: String,
    pub ledger: LedgerConfig,
    pub reported: ReportedConfig,
    #[serde(default)]
    pub tolerance: ToleranceConfig,
}

// ---------------------------------------------------------------------------
// Ledger source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    pub file: String,
    #[serde(default)]
    pub columns: LedgerColumns,
    /// Client ids whose string form starts with this prefix are test or
    /// internal accounts and never enter aggregation. Empty disables the
    /// exclusion.
    #[serde(default = "default_exclude_prefix")]
    pub exclude_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerColumns {
    #[serde(default = "default_ledger_client_id")]
    pub client_id: String,
    #[serde(default = "default_ledger_amount")]
    pub amount: String,
}

impl Default for LedgerColumns {
    fn default() -> Self {
        Self {
            client_id: default_ledger_client_id(),
            amount: default_ledger_amount(),
        }
    }
}

// ---------------------------------------------------------------------------
// Reported source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ReportedConfig {
    pub file: String,
    #[serde(default)]
    pub columns: ReportedColumns,
    #[serde(default)]
    pub filters: ReportedFilters,
    /// Method code of the expected reconciliation channel. Records under
    /// any other method feed the alternate-payment pool instead of the
    /// reported aggregate.
    #[serde(default = "default_primary_method")]
    pub primary_method: String,
}

/// Column names in the reported feed. `method`, `branch`, and `status` are
/// looked up in the header at normalization time; a feed without them is
/// accepted and the corresponding filter simply does not apply.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportedColumns {
    #[serde(default = "default_reported_client_id")]
    pub client_id: String,
    #[serde(default = "default_reported_amount")]
    pub amount: String,
    #[serde(default = "default_method_column")]
    pub method: String,
    #[serde(default = "default_branch_column")]
    pub branch: String,
    #[serde(default = "default_status_column")]
    pub status: String,
}

impl Default for ReportedColumns {
    fn default() -> Self {
        Self {
            client_id: default_reported_client_id(),
            amount: default_reported_amount(),
            method: default_method_column(),
            branch: default_branch_column(),
            status: default_status_column(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportedFilters {
    #[serde(default = "default_branch_value")]
    pub branch: String,
    #[serde(default = "default_status_value")]
    pub status: String,
}

impl Default for ReportedFilters {
    fn default() -> Self {
        Self {
            branch: default_branch_value(),
            status: default_status_value(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tolerance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ToleranceConfig {
    /// Absolute discrepancy below which a row is "OK". Inclusive.
    #[serde(default = "default_amount_tolerance")]
    pub amount: f64,
    /// Absolute slack for matching alternate-method payments against a
    /// shortfall. Strict.
    #[serde(default = "default_alternate_epsilon")]
    pub alternate: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            amount: default_amount_tolerance(),
            alternate: default_alternate_epsilon(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

// Column defaults reproduce the upstream feeds' headers so a config may
// omit the mapping tables entirely.

fn default_ledger_client_id() -> String {
    "NumeroClienteSAP".into()
}

fn default_ledger_amount() -> String {
    "Monto".into()
}

fn default_reported_client_id() -> String {
    "NO. CLIENTE".into()
}

fn default_reported_amount() -> String {
    "TOTAL".into()
}

fn default_method_column() -> String {
    "METODO DE PAGO".into()
}

fn default_branch_column() -> String {
    "SUCURSAL".into()
}

fn default_status_column() -> String {
    "ESTATUS".into()
}

fn default_exclude_prefix() -> String {
    "9999".into()
}

fn default_primary_method() -> String {
    "STP-03".into()
}

fn default_branch_value() -> String {
    "99".into()
}

fn default_status_value() -> String {
    "Active".into()
}

fn default_amount_tolerance() -> f64 {
    15.0
}

fn default_alternate_epsilon() -> f64 {
    0.01
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.ledger.file.is_empty() {
            return Err(ReconError::ConfigValidation(
                "ledger file must not be empty".into(),
            ));
        }
        if self.reported.file.is_empty() {
            return Err(ReconError::ConfigValidation(
                "reported file must not be empty".into(),
            ));
        }
        if self.reported.primary_method.is_empty() {
            return Err(ReconError::ConfigValidation(
                "primary method code must not be empty".into(),
            ));
        }

        for (label, name) in [
            ("ledger client id", &self.ledger.columns.client_id),
            ("ledger amount", &self.ledger.columns.amount),
            ("reported client id", &self.reported.columns.client_id),
            ("reported amount", &self.reported.columns.amount),
        ] {
            if name.is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "{label} column name must not be empty"
                )));
            }
        }

        if self.tolerance.amount < 0.0 {
            return Err(ReconError::ConfigValidation(format!(
                "amount tolerance must be non-negative, got {}",
                self.tolerance.amount
            )));
        }
        if self.tolerance.alternate <= 0.0 {
            return Err(ReconError::ConfigValidation(format!(
                "alternate-payment epsilon must be positive, got {}",
                self.tolerance.alternate
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
