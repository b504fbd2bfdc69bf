//! `gtd list ...` and `gtd project ...` share one command set.

use crate::output::{id_cell, print_json, Table};
use clap::Subcommand;
use gtd_core::{
    dto::{ActionDto, GroupDto},
    model::{EntityId, Group},
    GroupService, ServiceResult, Services,
};
use std::path::Path;

use super::action::print_actions;
use super::{block_on, open_services};

#[derive(Subcommand)]
pub enum GroupSubcommand {
    /// Create a new one
    Add { name: String },
    /// Show all
    Ls,
    /// Show one with its actions
    Show { id: EntityId },
    /// Rename
    Rename { id: EntityId, name: String },
    /// Delete; member actions are kept and detached
    Rm { id: EntityId },
}

#[derive(Debug, Clone, Copy)]
pub enum GroupKind {
    List,
    Project,
}

impl GroupKind {
    fn noun(self) -> &'static str {
        match self {
            GroupKind::List => "list",
            GroupKind::Project => "project",
        }
    }
}

pub fn run(root: &Path, kind: GroupKind, subcmd: GroupSubcommand, json: bool) -> anyhow::Result<()> {
    let services = open_services(root)?;
    block_on(async move {
        match kind {
            GroupKind::List => dispatch(&services, &services.lists, kind, subcmd, json).await,
            GroupKind::Project => {
                dispatch(&services, &services.projects, kind, subcmd, json).await
            }
        }
    })?
}

async fn dispatch<G: Group>(
    services: &Services,
    groups: &GroupService<G>,
    kind: GroupKind,
    subcmd: GroupSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    let noun = kind.noun();
    match subcmd {
        GroupSubcommand::Add { name } => {
            let saved = groups
                .create_or_update(GroupDto::new(name))
                .await?
                .into_result()?;
            if json {
                print_json(&saved)?;
            } else {
                println!("Created {noun} [{}]: {}", id_cell(saved.id), saved.name);
            }
        }
        GroupSubcommand::Ls => {
            let all = groups.get_all().await?.into_result()?;
            if json {
                return print_json(&all);
            }
            if all.is_empty() {
                println!("No {noun}s.");
                return Ok(());
            }
            let mut table = Table::new(&["ID", "NAME"]);
            for g in &all {
                table.row(vec![id_cell(g.id), g.name.clone()]);
            }
            table.print();
        }
        GroupSubcommand::Show { id } => {
            let group = groups.get(id).await?.into_result()?;
            let actions = members(services, kind, id).await?.into_result()?;
            if json {
                return print_json(&serde_json::json!({
                    "id": group.id,
                    "name": group.name,
                    "actions": actions,
                }));
            }
            println!("{}: {}", noun, group.name);
            if actions.is_empty() {
                println!("  (no actions)");
            } else {
                print_actions(&actions);
            }
        }
        GroupSubcommand::Rename { id, name } => {
            let mut dto = GroupDto::new(name);
            dto.id = Some(id);
            let saved = groups.create_or_update(dto).await?.into_result()?;
            if json {
                print_json(&saved)?;
            } else {
                println!("Renamed {noun} [{id}]: {}", saved.name);
            }
        }
        GroupSubcommand::Rm { id } => {
            let detached = groups.delete(id).await?.into_result()?;
            if json {
                print_json(&serde_json::json!({ "deleted": id, "detached": detached }))?;
            } else {
                println!("Deleted {noun} [{id}], detached {detached} action(s)");
            }
        }
    }
    Ok(())
}

async fn members(
    services: &Services,
    kind: GroupKind,
    id: EntityId,
) -> gtd_core::Result<ServiceResult<Vec<ActionDto>>> {
    match kind {
        GroupKind::List => services.actions.get_in_list(id).await,
        GroupKind::Project => services.actions.get_in_project(id).await,
    }
}
