//! Transport shapes and the entity <-> DTO mapping.
//!
//! Every mapping destructures its source exhaustively, so adding a field to
//! an entity or DTO fails to compile until the mapping handles it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Action, EntityId, Group};

// ---------------------------------------------------------------------------
// ActionDto
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDto {
    /// `None` when the DTO describes an action that does not exist yet.
    #[serde(default)]
    pub id: Option<EntityId>,
    pub title: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub do_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub done_at: Option<DateTime<Utc>>,
    /// Derived from `done_at`; ignored on input.
    #[serde(default)]
    pub is_done: bool,
    #[serde(default)]
    pub list_id: Option<EntityId>,
    #[serde(default)]
    pub project_id: Option<EntityId>,
}

impl ActionDto {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            due_date: None,
            do_on: None,
            done_at: None,
            is_done: false,
            list_id: None,
            project_id: None,
        }
    }

    pub fn represents_new_entity(&self) -> bool {
        self.id.is_none()
    }

    /// Build a fresh entity from this DTO.
    pub fn to_entity(&self) -> Action {
        let mut action = Action::new(String::new());
        action.copy_from(self);
        action.id = self.id;
        action
    }
}

impl From<&Action> for ActionDto {
    fn from(action: &Action) -> Self {
        let Action {
            id,
            title,
            due_date,
            do_on,
            done_at,
            list_id,
            project_id,
        } = action;
        Self {
            id: *id,
            title: title.clone(),
            due_date: *due_date,
            do_on: *do_on,
            done_at: *done_at,
            is_done: action.is_done(),
            list_id: *list_id,
            project_id: *project_id,
        }
    }
}

impl Action {
    /// Overlay the DTO's fields onto this entity. The id is left alone.
    pub fn copy_from(&mut self, dto: &ActionDto) {
        let ActionDto {
            id: _,
            title,
            due_date,
            do_on,
            done_at,
            is_done: _,
            list_id,
            project_id,
        } = dto;
        self.title = title.clone();
        self.due_date = *due_date;
        self.do_on = *do_on;
        self.done_at = *done_at;
        self.list_id = *list_id;
        self.project_id = *project_id;
    }
}

// ---------------------------------------------------------------------------
// GroupDto
// ---------------------------------------------------------------------------

/// Transport shape shared by lists and projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDto {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
}

pub type ActionListDto = GroupDto;
pub type ProjectDto = GroupDto;

impl GroupDto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn represents_new_entity(&self) -> bool {
        self.id.is_none()
    }

    pub fn from_group<G: Group>(group: &G) -> Self {
        Self {
            id: group.id(),
            name: group.name().to_string(),
        }
    }

    pub fn to_group<G: Group>(&self) -> G {
        let GroupDto { id, name } = self;
        let mut group = G::new(name.clone());
        if let Some(id) = id {
            group.set_id(*id);
        }
        group
    }

    pub fn copy_into<G: Group>(&self, group: &mut G) {
        let GroupDto { id: _, name } = self;
        group.set_name(name.clone());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
