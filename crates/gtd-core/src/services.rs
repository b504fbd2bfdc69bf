use std::path::Path;

use crate::action_service::ActionService;
use crate::config::Config;
use crate::error::Result;
use crate::group_service::{ListService, ProjectService};
use crate::rules::RuleSet;
use crate::store::Stores;

/// The action, list and project services wired to one set of stores.
#[derive(Clone)]
pub struct Services {
    pub actions: ActionService,
    pub lists: ListService,
    pub projects: ProjectService,
}

impl Services {
    pub fn new(stores: &Stores, rules: RuleSet) -> Self {
        Self {
            actions: ActionService::from_stores(stores).with_rules(rules),
            lists: ListService::lists(stores),
            projects: ProjectService::projects(stores),
        }
    }

    /// Open the stores described by `config` under `root`.
    pub fn open(root: &Path, config: &Config) -> Result<Self> {
        let stores = Stores::open(root, &config.store)?;
        tracing::debug!(
            backend = ?config.store.backend,
            rules = config.rules.enforce,
            "opened services"
        );
        Ok(Self::new(&stores, RuleSet::from_config(&config.rules)))
    }

    pub fn in_memory() -> Self {
        Self::new(&Stores::in_memory(), RuleSet::disabled())
    }
}
