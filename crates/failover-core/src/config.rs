/// Tunables recognized by the controller, defaults matching `spec.md` §6.
///
/// Mirrors `original_source/options.go`'s `Config` + functional-option
/// pattern; the Rust idiom for the same shape is a plain value type with a
/// small builder, so `Config` is `Default`-constructible and every knob has a
/// `with_*` setter that consumes and returns `Self`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// `N_trip`: minimum live `FailureMark`s to trip PRIMARY → STANDBY.
    pub err_threshold: usize,
    /// `T_err`: sliding window length, in milliseconds.
    pub err_ttl_ms: u64,
    /// `T_lock`: cooldown floor, in milliseconds.
    pub lock_ttl_ms: u64,
    /// Key prefix for `RoutingState` (default `"exchange:connector"`).
    pub key_connector: String,
    /// Key prefix for `CooldownLock` (default `"exchange:lockTime"`).
    pub key_lock_time: String,
    /// Key prefix for `FailureMark`s (default `"exchange:errTime"`), joined
    /// with the connector id and timestamp as `"<prefix>:<connector>:<ms>"`.
    pub key_err_time_at: String,
    /// Key prefix used by the best-effort alert-dedup guard (see
    /// `controller::FailoverController`), joined with the edge name.
    pub key_alerted: String,
    /// TTL of the alert-dedup guard. Short-lived by design: it only needs to
    /// outlive the handful of milliseconds between "decide to alert" and
    /// "alert sent", not the whole cooldown window.
    pub alert_dedup_ttl_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            err_threshold: 5,
            err_ttl_ms: 30_000,
            lock_ttl_ms: 30 * 60_000,
            key_connector: "exchange:connector".to_owned(),
            key_lock_time: "exchange:lockTime".to_owned(),
            key_err_time_at: "exchange:errTime".to_owned(),
            key_alerted: "exchange:alerted".to_owned(),
            alert_dedup_ttl_ms: 5_000,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_err_threshold(mut self, threshold: usize) -> Self {
        self.err_threshold = threshold;
        self
    }

    pub fn with_err_ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.err_ttl_ms = ttl_ms;
        self
    }

    pub fn with_lock_ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.lock_ttl_ms = ttl_ms;
        self
    }

    pub fn with_keys(
        mut self,
        connector: impl Into<String>,
        lock_time: impl Into<String>,
        err_time_at: impl Into<String>,
    ) -> Self {
        self.key_connector = connector.into();
        self.key_lock_time = lock_time.into();
        self.key_err_time_at = err_time_at.into();
        self
    }

    pub(crate) fn err_mark_key(&self, connector: crate::ConnectorId, now_ms: u64) -> String {
        format!("{}:{}:{}", self.key_err_time_at, connector, now_ms)
    }

    pub(crate) fn err_mark_prefix(&self, connector: crate::ConnectorId) -> String {
        format!("{}:{}:", self.key_err_time_at, connector)
    }

    pub(crate) fn alerted_key(&self, edge: &str, connector: crate::ConnectorId) -> String {
        format!("{}:{}:{}", self.key_alerted, edge, connector)
    }
}
