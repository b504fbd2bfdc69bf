pub mod action;
pub mod group;
pub mod init;
pub mod serve;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use gtd_core::{config::Config, Services};
use std::future::Future;
use std::path::Path;

/// Load the workspace config and open its stores.
pub fn open_services(root: &Path) -> anyhow::Result<Services> {
    let config = Config::load(root)?;
    let services = Services::open(root, &config)
        .with_context(|| format!("failed to open store at {}", config.store.path.display()))?;
    Ok(services)
}

/// Drive a service future to completion on a fresh runtime.
pub fn block_on<F: Future>(fut: F) -> anyhow::Result<F::Output> {
    let rt = tokio::runtime::Runtime::new()?;
    Ok(rt.block_on(fut))
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid date '{s}': expected YYYY-MM-DD or RFC 3339"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_plain_date_as_midnight_utc() {
        let dt = parse_date("2026-03-14").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2026, 3, 14));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_date("2026-03-14T10:00:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_date("next tuesday").unwrap_err();
        assert!(err.contains("invalid date"));
    }
}
