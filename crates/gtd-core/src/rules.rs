//! Business rules checked before an action is persisted.

use crate::config::RulesConfig;
use crate::error::{GtdError, Result};
use crate::model::Action;

/// Returns every rule `candidate` breaks.
///
/// `stored` is the persisted state before the change, `None` for a new
/// action.
pub fn violations(stored: Option<&Action>, candidate: &Action) -> Vec<String> {
    let mut out = Vec::new();

    if candidate.title.trim().is_empty() {
        out.push("title must not be empty".to_string());
    }

    if let (Some(do_on), Some(due)) = (candidate.do_on, candidate.due_date) {
        if do_on >= due {
            out.push(format!(
                "do-on date {} must be earlier than due date {}",
                do_on.to_rfc3339(),
                due.to_rfc3339()
            ));
        }
    }

    if let Some(stored) = stored.filter(|a| a.is_done()) {
        let label = stored
            .id
            .map(|id| format!("action {id}"))
            .unwrap_or_else(|| "action".to_string());
        out.push(format!("{label} is done and cannot be changed"));
    }

    out
}

/// Gate applied by the services. Inert unless enforcement is switched on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleSet {
    enforce: bool,
}

impl RuleSet {
    pub fn enforced() -> Self {
        Self { enforce: true }
    }

    pub fn disabled() -> Self {
        Self { enforce: false }
    }

    pub fn from_config(config: &RulesConfig) -> Self {
        Self {
            enforce: config.enforce,
        }
    }

    pub fn is_enforced(&self) -> bool {
        self.enforce
    }

    pub fn check(&self, stored: Option<&Action>, candidate: &Action) -> Result<()> {
        if !self.enforce {
            return Ok(());
        }
        let found = violations(stored, candidate);
        if found.is_empty() {
            return Ok(());
        }
        let message = found.join("; ");
        tracing::warn!(id = ?candidate.id, %message, "action rejected");
        Err(GtdError::RuleViolation(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn valid_action_has_no_violations() {
        let mut action = Action::new("Plan trip");
        let now = Utc::now();
        action.do_on = Some(now);
        action.due_date = Some(now + Duration::days(3));
        assert!(violations(None, &action).is_empty());
    }

    #[test]
    fn blank_title_is_rejected() {
        let found = violations(None, &Action::new("   "));
        assert_eq!(found, vec!["title must not be empty".to_string()]);
    }

    #[test]
    fn do_on_must_precede_due_date() {
        let mut action = Action::new("Submit report");
        let now = Utc::now();
        action.do_on = Some(now);
        action.due_date = Some(now);
        let found = violations(None, &action);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("must be earlier than due date"));
    }

    #[test]
    fn done_action_cannot_change() {
        let mut stored = Action::new("Pay rent");
        stored.id = Some(4);
        stored.done_at = Some(Utc::now());
        let mut candidate = stored.clone();
        candidate.title = "Pay rent twice".to_string();

        let found = violations(Some(&stored), &candidate);
        assert_eq!(found, vec!["action 4 is done and cannot be changed".to_string()]);
    }

    #[test]
    fn completing_an_open_action_is_allowed() {
        let stored = Action::new("Read book");
        let mut candidate = stored.clone();
        candidate.done_at = Some(Utc::now());
        assert!(violations(Some(&stored), &candidate).is_empty());
    }

    #[test]
    fn disabled_rule_set_lets_everything_through() {
        assert!(RuleSet::disabled().check(None, &Action::new("")).is_ok());
    }

    #[test]
    fn enforced_rule_set_reports_all_violations() {
        let mut action = Action::new("");
        let now = Utc::now();
        action.do_on = Some(now + Duration::days(1));
        action.due_date = Some(now);
        let err = RuleSet::enforced().check(None, &action).unwrap_err();
        match err {
            GtdError::RuleViolation(msg) => {
                assert!(msg.contains("title must not be empty"));
                assert!(msg.contains("must be earlier than due date"));
            }
            other => panic!("expected RuleViolation, got {other:?}"),
        }
    }
}
