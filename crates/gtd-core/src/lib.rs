pub mod action_service;
pub mod config;
pub mod dto;
pub mod error;
pub mod group_service;
pub mod io;
pub mod model;
pub mod paths;
pub mod result;
pub mod rules;
pub mod services;
pub mod store;

pub use action_service::ActionService;
pub use error::{GtdError, Result};
pub use group_service::{GroupService, ListService, ProjectService};
pub use result::ServiceResult;
pub use services::Services;
