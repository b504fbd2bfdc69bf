use crate::output::{date_cell, id_cell, print_json, Table};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use gtd_core::{dto::ActionDto, model::EntityId, Services};
use std::path::Path;

use super::{block_on, open_services, parse_date};

#[derive(Subcommand)]
pub enum ActionSubcommand {
    /// Capture a new action
    Add {
        title: String,
        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long, value_parser = parse_date)]
        due: Option<DateTime<Utc>>,
        /// Date to start working on it
        #[arg(long = "do-on", value_parser = parse_date)]
        do_on: Option<DateTime<Utc>>,
        /// File into this list
        #[arg(long)]
        list: Option<EntityId>,
        /// Attach to this project
        #[arg(long)]
        project: Option<EntityId>,
    },
    /// List actions
    List {
        /// Only actions in this list
        #[arg(long, conflicts_with = "project")]
        list: Option<EntityId>,
        /// Only actions in this project
        #[arg(long)]
        project: Option<EntityId>,
        /// Hide done actions
        #[arg(long)]
        open: bool,
    },
    /// Show one action
    Show { id: EntityId },
    /// Change title or dates
    Edit {
        id: EntityId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_parser = parse_date)]
        due: Option<DateTime<Utc>>,
        #[arg(long = "do-on", value_parser = parse_date)]
        do_on: Option<DateTime<Utc>>,
        /// Remove the due date
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,
        /// Remove the do-on date
        #[arg(long, conflicts_with = "do_on")]
        clear_do_on: bool,
    },
    /// Mark an action done
    Done { id: EntityId },
    /// Delete an action
    Rm { id: EntityId },
    /// Move an action into a list
    Move { id: EntityId, list_id: EntityId },
    /// Attach an action to a project
    Assign { id: EntityId, project_id: EntityId },
}

pub fn run(root: &Path, subcmd: ActionSubcommand, json: bool) -> anyhow::Result<()> {
    let services = open_services(root)?;
    block_on(async move {
        match subcmd {
            ActionSubcommand::Add {
                title,
                due,
                do_on,
                list,
                project,
            } => add(&services, title, due, do_on, list, project, json).await,
            ActionSubcommand::List {
                list,
                project,
                open,
            } => list_actions(&services, list, project, open, json).await,
            ActionSubcommand::Show { id } => show(&services, id, json).await,
            ActionSubcommand::Edit {
                id,
                title,
                due,
                do_on,
                clear_due,
                clear_do_on,
            } => {
                let edit = Edit {
                    title,
                    due: if clear_due { Some(None) } else { due.map(Some) },
                    do_on: if clear_do_on {
                        Some(None)
                    } else {
                        do_on.map(Some)
                    },
                };
                edit_action(&services, id, edit, json).await
            }
            ActionSubcommand::Done { id } => done(&services, id, json).await,
            ActionSubcommand::Rm { id } => remove(&services, id, json).await,
            ActionSubcommand::Move { id, list_id } => move_to_list(&services, id, list_id, json).await,
            ActionSubcommand::Assign { id, project_id } => {
                assign(&services, id, project_id, json).await
            }
        }
    })?
}

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

async fn add(
    services: &Services,
    title: String,
    due: Option<DateTime<Utc>>,
    do_on: Option<DateTime<Utc>>,
    list: Option<EntityId>,
    project: Option<EntityId>,
    json: bool,
) -> anyhow::Result<()> {
    // Check the groups up front so a bad id leaves nothing behind.
    if let Some(list_id) = list {
        services.lists.get(list_id).await?.into_result()?;
    }
    if let Some(project_id) = project {
        services.projects.get(project_id).await?.into_result()?;
    }

    let mut dto = ActionDto::new(title);
    dto.due_date = due;
    dto.do_on = do_on;
    dto.list_id = list;
    dto.project_id = project;
    let saved = services.actions.create_or_update(dto).await?.into_result()?;

    if json {
        print_json(&saved)?;
    } else {
        println!("Created action [{}]: {}", id_cell(saved.id), saved.title);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// list / show
// ---------------------------------------------------------------------------

async fn list_actions(
    services: &Services,
    list: Option<EntityId>,
    project: Option<EntityId>,
    open: bool,
    json: bool,
) -> anyhow::Result<()> {
    let result = match (list, project) {
        (Some(list_id), _) => services.actions.get_in_list(list_id).await?,
        (None, Some(project_id)) => services.actions.get_in_project(project_id).await?,
        (None, None) => services.actions.get_all().await?,
    };
    let mut actions = result.into_result()?;
    if open {
        actions.retain(|a| !a.is_done);
    }

    if json {
        return print_json(&actions);
    }
    if actions.is_empty() {
        println!("No actions.");
        return Ok(());
    }
    print_actions(&actions);
    Ok(())
}

pub(crate) fn print_actions(actions: &[ActionDto]) {
    let mut table = Table::new(&["ID", "TITLE", "DO ON", "DUE", "DONE", "LIST", "PROJECT"]);
    for a in actions {
        table.row(vec![
            id_cell(a.id),
            a.title.clone(),
            date_cell(a.do_on),
            date_cell(a.due_date),
            if a.is_done { "yes" } else { "no" }.to_string(),
            id_cell(a.list_id),
            id_cell(a.project_id),
        ]);
    }
    table.print();
}

async fn show(services: &Services, id: EntityId, json: bool) -> anyhow::Result<()> {
    let action = services.actions.get_action(id).await?.into_result()?;
    if json {
        return print_json(&action);
    }
    println!("Action: {}", id_cell(action.id));
    println!("Title:   {}", action.title);
    println!("Do on:   {}", date_cell(action.do_on));
    println!("Due:     {}", date_cell(action.due_date));
    match action.done_at {
        Some(at) => println!("Done:    {}", at.to_rfc3339()),
        None => println!("Done:    no"),
    }
    println!("List:    {}", id_cell(action.list_id));
    println!("Project: {}", id_cell(action.project_id));
    Ok(())
}

// ---------------------------------------------------------------------------
// edit
// ---------------------------------------------------------------------------

/// Requested changes. The outer `Option` on a date means "leave as is",
/// the inner one is the new value.
struct Edit {
    title: Option<String>,
    due: Option<Option<DateTime<Utc>>>,
    do_on: Option<Option<DateTime<Utc>>>,
}

async fn edit_action(
    services: &Services,
    id: EntityId,
    edit: Edit,
    json: bool,
) -> anyhow::Result<()> {
    let mut dto = services.actions.get_action(id).await?.into_result()?;
    if let Some(title) = edit.title {
        dto.title = title;
    }
    if let Some(due) = edit.due {
        dto.due_date = due;
    }
    if let Some(do_on) = edit.do_on {
        dto.do_on = do_on;
    }
    let saved = services.actions.create_or_update(dto).await?.into_result()?;

    if json {
        print_json(&saved)?;
    } else {
        println!("Updated action [{id}]: {}", saved.title);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// done / rm
// ---------------------------------------------------------------------------

async fn done(services: &Services, id: EntityId, json: bool) -> anyhow::Result<()> {
    let action = services
        .actions
        .complete(id, Utc::now())
        .await?
        .into_result()?;
    if json {
        print_json(&action)?;
    } else {
        println!("Done [{id}]: {}", action.title);
    }
    Ok(())
}

async fn remove(services: &Services, id: EntityId, json: bool) -> anyhow::Result<()> {
    services.actions.delete(id).await?.into_result()?;
    if json {
        print_json(&serde_json::json!({ "deleted": id }))?;
    } else {
        println!("Deleted action [{id}]");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// move / assign
// ---------------------------------------------------------------------------

async fn move_to_list(
    services: &Services,
    id: EntityId,
    list_id: EntityId,
    json: bool,
) -> anyhow::Result<()> {
    services
        .actions
        .move_to_list(id, list_id)
        .await?
        .into_result()?;
    if json {
        print_json(&serde_json::json!({ "id": id, "list_id": list_id }))?;
    } else {
        println!("Moved action [{id}] to list [{list_id}]");
    }
    Ok(())
}

async fn assign(
    services: &Services,
    id: EntityId,
    project_id: EntityId,
    json: bool,
) -> anyhow::Result<()> {
    services
        .actions
        .assign_to_project(id, project_id)
        .await?
        .into_result()?;
    if json {
        print_json(&serde_json::json!({ "id": id, "project_id": project_id }))?;
    } else {
        println!("Assigned action [{id}] to project [{project_id}]");
    }
    Ok(())
}
