use docuverify::portal::RulesetVersion;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_ruleset(raw: &str) -> Result<RulesetVersion, String> {
    RulesetVersion::parse(raw)
        .ok_or_else(|| format!("unknown ruleset '{raw}' (expected current or legacy)"))
}

pub(crate) fn parse_poll_ms(raw: &str) -> Result<u64, String> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err("poll interval must be at least 1 ms".to_string()),
        Ok(value) => Ok(value),
        Err(err) => Err(format!("failed to parse '{raw}' as milliseconds ({err})")),
    }
}
