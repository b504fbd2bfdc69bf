//! Persisted entities: `Action`, `ActionList` and `Project`.
//!
//! Ids are assigned by the store on first persistence, so an entity that
//! has never been saved carries `id: None`.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub type EntityId = u64;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// Anything a `Store` can hold.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name; persistent stores use it as the table name.
    const KIND: &'static str;

    fn id(&self) -> Option<EntityId>;

    fn set_id(&mut self, id: EntityId);
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A GTD action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: Option<EntityId>,
    /// Mandatory; only checked when rules are enforced.
    pub title: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Planned date. Must be earlier than `due_date` when both are set.
    #[serde(default)]
    pub do_on: Option<DateTime<Utc>>,
    /// When the action was done, `None` while it is still open.
    #[serde(default)]
    pub done_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub list_id: Option<EntityId>,
    #[serde(default)]
    pub project_id: Option<EntityId>,
}

impl Action {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            due_date: None,
            do_on: None,
            done_at: None,
            list_id: None,
            project_id: None,
        }
    }

    /// A done action cannot be changed.
    pub fn is_done(&self) -> bool {
        self.done_at.is_some()
    }
}

impl Entity for Action {
    const KIND: &'static str = "actions";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}

// ---------------------------------------------------------------------------
// Groups: ActionList and Project
// ---------------------------------------------------------------------------

/// A named grouping an action can reference.
///
/// Actions hold a foreign key per group kind; `reference_mut` exposes it so
/// services can assign and detach without knowing which kind they handle.
pub trait Group: Entity {
    /// Singular display name, used in "... not found." messages.
    const LABEL: &'static str;

    fn new(name: String) -> Self;

    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);

    fn reference(action: &Action) -> Option<EntityId>;

    fn reference_mut(action: &mut Action) -> &mut Option<EntityId>;
}

/// A named list of actions, e.g. "Today" or "Waiting For".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionList {
    pub id: Option<EntityId>,
    pub name: String,
}

impl Entity for ActionList {
    const KIND: &'static str = "lists";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}

impl Group for ActionList {
    const LABEL: &'static str = "List";

    fn new(name: String) -> Self {
        Self { id: None, name }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn reference(action: &Action) -> Option<EntityId> {
        action.list_id
    }

    fn reference_mut(action: &mut Action) -> &mut Option<EntityId> {
        &mut action.list_id
    }
}

/// A goal that a set of actions works toward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<EntityId>,
    pub name: String,
}

impl Entity for Project {
    const KIND: &'static str = "projects";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}

impl Group for Project {
    const LABEL: &'static str = "Project";

    fn new(name: String) -> Self {
        Self { id: None, name }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn reference(action: &Action) -> Option<EntityId> {
        action.project_id
    }

    fn reference_mut(action: &mut Action) -> &mut Option<EntityId> {
        &mut action.project_id
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_action_is_open_and_unassigned() {
        let action = Action::new("Buy milk");
        assert_eq!(action.id, None);
        assert!(!action.is_done());
        assert_eq!(action.list_id, None);
        assert_eq!(action.project_id, None);
    }

    #[test]
    fn done_at_marks_action_done() {
        let mut action = Action::new("Call mom");
        action.done_at = Some(Utc::now());
        assert!(action.is_done());
    }

    #[test]
    fn group_references_point_at_their_own_key() {
        let mut action = Action::new("Book flights");
        *ActionList::reference_mut(&mut action) = Some(3);
        *Project::reference_mut(&mut action) = Some(7);
        assert_eq!(action.list_id, Some(3));
        assert_eq!(action.project_id, Some(7));
        assert_eq!(ActionList::reference(&action), Some(3));
        assert_eq!(Project::reference(&action), Some(7));
    }

    #[test]
    fn action_deserializes_without_optional_fields() {
        let action: Action = serde_json::from_str(r#"{"id":4,"title":"Water plants"}"#).unwrap();
        assert_eq!(action.id, Some(4));
        assert_eq!(action.due_date, None);
        assert!(!action.is_done());
    }
}
