//! CRUD and reassignment operations for actions.
//!
//! Every operation answers with a `ServiceResult`: a missing action, list
//! or project is an expected outcome the caller branches on. The outer
//! `Result` carries store failures and rule violations only.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::dto::ActionDto;
use crate::error::Result;
use crate::model::{Action, ActionList, EntityId, Group, Project};
use crate::result::ServiceResult;
use crate::rules::RuleSet;
use crate::store::{Store, Stores};

pub const ACTION_NOT_FOUND: &str = "Action not found.";

fn group_not_found<G: Group>() -> String {
    format!("{} not found.", G::LABEL)
}

#[derive(Clone)]
pub struct ActionService {
    actions: Arc<dyn Store<Action>>,
    lists: Arc<dyn Store<ActionList>>,
    projects: Arc<dyn Store<Project>>,
    rules: RuleSet,
}

impl ActionService {
    pub fn new(
        actions: Arc<dyn Store<Action>>,
        lists: Arc<dyn Store<ActionList>>,
        projects: Arc<dyn Store<Project>>,
    ) -> Self {
        Self {
            actions,
            lists,
            projects,
            rules: RuleSet::disabled(),
        }
    }

    pub fn from_stores(stores: &Stores) -> Self {
        Self::new(
            Arc::clone(&stores.actions),
            Arc::clone(&stores.lists),
            Arc::clone(&stores.projects),
        )
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    pub async fn get_action(&self, id: EntityId) -> Result<ServiceResult<ActionDto>> {
        tracing::debug!(id, "get action");
        let Some(action) = self.actions.get_by_id(id).await? else {
            return Ok(ServiceResult::not_found());
        };
        Ok(ServiceResult::Ok(ActionDto::from(&action)))
    }

    pub async fn get_all(&self) -> Result<ServiceResult<Vec<ActionDto>>> {
        let dtos: Vec<ActionDto> = self
            .actions
            .get_all()
            .await?
            .iter()
            .map(ActionDto::from)
            .collect();
        tracing::debug!(count = dtos.len(), "get all actions");
        Ok(ServiceResult::Ok(dtos))
    }

    /// Create a new action, or overlay the DTO onto an existing one.
    ///
    /// An update whose id is unknown comes back as not-found carrying the
    /// caller's DTO untouched. On success the DTO gets the persisted id.
    pub async fn create_or_update(&self, mut dto: ActionDto) -> Result<ServiceResult<ActionDto>> {
        let (stored, action) = match dto.id {
            None => (None, dto.to_entity()),
            Some(id) => match self.actions.get_by_id(id).await? {
                Some(existing) => {
                    let mut action = existing.clone();
                    action.copy_from(&dto);
                    (Some(existing), action)
                }
                None => {
                    tracing::debug!(id, "update of unknown action");
                    return Ok(ServiceResult::not_found_with_payload(dto));
                }
            },
        };

        self.rules.check(stored.as_ref(), &action)?;

        let created = stored.is_none();
        let saved = self.actions.add_or_update(action).await?;
        dto.id = saved.id;
        dto.is_done = saved.is_done();
        tracing::info!(id = ?saved.id, created, "saved action");
        Ok(ServiceResult::Ok(dto))
    }

    pub async fn delete(&self, id: EntityId) -> Result<ServiceResult> {
        if self.actions.get_by_id(id).await?.is_none() {
            return Ok(ServiceResult::not_found());
        }
        self.actions.delete(id).await?;
        tracing::info!(id, "deleted action");
        Ok(ServiceResult::Ok(()))
    }

    pub async fn move_to_list(&self, id: EntityId, list_id: EntityId) -> Result<ServiceResult> {
        self.assign(self.lists.as_ref(), id, list_id).await
    }

    pub async fn assign_to_project(
        &self,
        id: EntityId,
        project_id: EntityId,
    ) -> Result<ServiceResult> {
        self.assign(self.projects.as_ref(), id, project_id).await
    }

    /// Actions whose list is `list_id`.
    pub async fn get_in_list(&self, list_id: EntityId) -> Result<ServiceResult<Vec<ActionDto>>> {
        self.members(self.lists.as_ref(), list_id).await
    }

    /// Actions assigned to `project_id`.
    pub async fn get_in_project(
        &self,
        project_id: EntityId,
    ) -> Result<ServiceResult<Vec<ActionDto>>> {
        self.members(self.projects.as_ref(), project_id).await
    }

    /// Mark an action done at `at`. Completing a done action changes nothing.
    pub async fn complete(
        &self,
        id: EntityId,
        at: DateTime<Utc>,
    ) -> Result<ServiceResult<ActionDto>> {
        let Some(stored) = self.actions.get_by_id(id).await? else {
            return Ok(ServiceResult::not_found_with_message(ACTION_NOT_FOUND));
        };
        if stored.is_done() {
            return Ok(ServiceResult::Ok(ActionDto::from(&stored)));
        }

        let mut action = stored.clone();
        action.done_at = Some(at);
        self.rules.check(Some(&stored), &action)?;
        let saved = self.actions.add_or_update(action).await?;
        tracing::info!(id, "completed action");
        Ok(ServiceResult::Ok(ActionDto::from(&saved)))
    }

    async fn assign<G: Group>(
        &self,
        groups: &dyn Store<G>,
        id: EntityId,
        group_id: EntityId,
    ) -> Result<ServiceResult> {
        let Some(stored) = self.actions.get_by_id(id).await? else {
            return Ok(ServiceResult::not_found_with_message(ACTION_NOT_FOUND));
        };
        if groups.get_by_id(group_id).await?.is_none() {
            return Ok(ServiceResult::not_found_with_message(group_not_found::<G>()));
        }

        let mut action = stored.clone();
        *G::reference_mut(&mut action) = Some(group_id);
        self.rules.check(Some(&stored), &action)?;
        self.actions.add_or_update(action).await?;
        tracing::info!(id, group = G::LABEL, group_id, "assigned action");
        Ok(ServiceResult::Ok(()))
    }

    async fn members<G: Group>(
        &self,
        groups: &dyn Store<G>,
        group_id: EntityId,
    ) -> Result<ServiceResult<Vec<ActionDto>>> {
        if groups.get_by_id(group_id).await?.is_none() {
            return Ok(ServiceResult::not_found_with_message(group_not_found::<G>()));
        }
        let dtos = self
            .actions
            .get_all()
            .await?
            .iter()
            .filter(|a| G::reference(a) == Some(group_id))
            .map(ActionDto::from)
            .collect();
        Ok(ServiceResult::Ok(dtos))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
