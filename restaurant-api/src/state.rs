use role_gate::RoleGate;

use crate::config::Config;
use crate::db::Database;

/// Shared handler state. The gate reads roles through its own store handle.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
    pub gate: RoleGate,
}
