use serde::Serialize;

use crate::error::GtdError;

/// Outcome of a service operation.
///
/// Missing entities are an expected outcome, not an error: callers branch on
/// the variant. Store failures travel separately as `GtdError`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum ServiceResult<T = ()> {
    Ok(T),
    EntityNotFound {
        message: Option<String>,
        /// The caller's input, returned for context.
        payload: Option<T>,
    },
}

impl<T> ServiceResult<T> {
    pub fn not_found() -> Self {
        Self::EntityNotFound {
            message: None,
            payload: None,
        }
    }

    pub fn not_found_with_message(message: impl Into<String>) -> Self {
        Self::EntityNotFound {
            message: Some(message.into()),
            payload: None,
        }
    }

    pub fn not_found_with_payload(payload: T) -> Self {
        Self::EntityNotFound {
            message: None,
            payload: Some(payload),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntityNotFound { .. })
    }

    /// The success payload, if any.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::EntityNotFound { .. } => None,
        }
    }

    /// Message of a not-found outcome.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::EntityNotFound { message, .. } => message.as_deref(),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ServiceResult<U> {
        match self {
            Self::Ok(value) => ServiceResult::Ok(f(value)),
            Self::EntityNotFound { message, payload } => ServiceResult::EntityNotFound {
                message,
                payload: payload.map(f),
            },
        }
    }

    /// Collapse into a plain `Result`, turning not-found into
    /// `GtdError::EntityNotFound`.
    pub fn into_result(self) -> crate::Result<T> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::EntityNotFound { message, .. } => Err(GtdError::EntityNotFound(
                message.unwrap_or_else(|| "Entity not found.".to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_helpers_fill_the_right_slot() {
        let r: ServiceResult<u32> = ServiceResult::not_found_with_message("List not found.");
        assert!(r.is_not_found());
        assert_eq!(r.message(), Some("List not found."));

        let r = ServiceResult::not_found_with_payload(7u32);
        assert_eq!(
            r,
            ServiceResult::EntityNotFound {
                message: None,
                payload: Some(7)
            }
        );
    }

    #[test]
    fn into_result_uses_default_message() {
        let err = ServiceResult::<()>::not_found().into_result().unwrap_err();
        assert_eq!(err.to_string(), "Entity not found.");

        let err = ServiceResult::<()>::not_found_with_message("Action not found.")
            .into_result()
            .unwrap_err();
        assert_eq!(err.to_string(), "Action not found.");
    }

    #[test]
    fn map_applies_to_payload_on_both_sides() {
        let ok: ServiceResult<u32> = ServiceResult::Ok(2);
        assert_eq!(ok.map(|v| v * 10), ServiceResult::Ok(20));

        let nf = ServiceResult::not_found_with_payload(3u32).map(|v| v + 1);
        assert_eq!(nf, ServiceResult::not_found_with_payload(4));
    }

    #[test]
    fn serializes_with_outcome_tag() {
        let json = serde_json::to_value(ServiceResult::<()>::not_found_with_message("gone")).unwrap();
        assert_eq!(json["outcome"], "entity_not_found");
        assert_eq!(json["data"]["message"], "gone");
    }
}
