//! Management of the groupings actions point at: lists and projects.

use std::sync::Arc;

use crate::dto::GroupDto;
use crate::error::Result;
use crate::model::{Action, ActionList, EntityId, Group, Project};
use crate::result::ServiceResult;
use crate::store::{Store, Stores};

pub type ListService = GroupService<ActionList>;
pub type ProjectService = GroupService<Project>;

#[derive(Clone)]
pub struct GroupService<G: Group> {
    groups: Arc<dyn Store<G>>,
    actions: Arc<dyn Store<Action>>,
}

impl<G: Group> GroupService<G> {
    pub fn new(groups: Arc<dyn Store<G>>, actions: Arc<dyn Store<Action>>) -> Self {
        Self { groups, actions }
    }

    fn not_found_message() -> String {
        format!("{} not found.", G::LABEL)
    }

    pub async fn get(&self, id: EntityId) -> Result<ServiceResult<GroupDto>> {
        tracing::debug!(kind = G::KIND, id, "get group");
        let Some(group) = self.groups.get_by_id(id).await? else {
            return Ok(ServiceResult::not_found_with_message(Self::not_found_message()));
        };
        Ok(ServiceResult::Ok(GroupDto::from_group(&group)))
    }

    pub async fn get_all(&self) -> Result<ServiceResult<Vec<GroupDto>>> {
        let dtos = self
            .groups
            .get_all()
            .await?
            .iter()
            .map(GroupDto::from_group)
            .collect();
        Ok(ServiceResult::Ok(dtos))
    }

    /// Same new-versus-existing contract as `ActionService::create_or_update`.
    pub async fn create_or_update(&self, mut dto: GroupDto) -> Result<ServiceResult<GroupDto>> {
        let group: G = match dto.id {
            None => dto.to_group(),
            Some(id) => match self.groups.get_by_id(id).await? {
                Some(mut existing) => {
                    dto.copy_into(&mut existing);
                    existing
                }
                None => return Ok(ServiceResult::not_found_with_payload(dto)),
            },
        };

        let saved = self.groups.add_or_update(group).await?;
        dto.id = saved.id();
        tracing::info!(kind = G::KIND, id = ?dto.id, name = %dto.name, "saved group");
        Ok(ServiceResult::Ok(dto))
    }

    /// Delete a group and clear every action's reference to it.
    ///
    /// Actions are never deleted, and the cleanup ignores the done-action
    /// rule. Answers with the number of actions detached.
    pub async fn delete(&self, id: EntityId) -> Result<ServiceResult<usize>> {
        if self.groups.get_by_id(id).await?.is_none() {
            return Ok(ServiceResult::not_found_with_message(Self::not_found_message()));
        }

        let mut detached = 0;
        for mut action in self.actions.get_all().await? {
            if G::reference(&action) == Some(id) {
                *G::reference_mut(&mut action) = None;
                self.actions.add_or_update(action).await?;
                detached += 1;
            }
        }

        self.groups.delete(id).await?;
        tracing::info!(kind = G::KIND, id, detached, "deleted group");
        Ok(ServiceResult::Ok(detached))
    }
}

impl GroupService<ActionList> {
    pub fn lists(stores: &Stores) -> Self {
        Self::new(Arc::clone(&stores.lists), Arc::clone(&stores.actions))
    }
}

impl GroupService<Project> {
    pub fn projects(stores: &Stores) -> Self {
        Self::new(Arc::clone(&stores.projects), Arc::clone(&stores.actions))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
