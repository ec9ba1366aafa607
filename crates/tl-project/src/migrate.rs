//! Schema migration framework.

use crate::ProjectError;
use crate::schema::BenchConfig;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut config: BenchConfig) -> Result<BenchConfig, ProjectError> {
    while config.version < LATEST_VERSION {
        config = migrate_one_version(config)?;
    }
    Ok(config)
}

fn migrate_one_version(config: BenchConfig) -> Result<BenchConfig, ProjectError> {
    match config.version {
        0 => migrate_v0_to_v1(config),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Unversioned files predate the schedule; the layout is otherwise unchanged.
fn migrate_v0_to_v1(mut config: BenchConfig) -> Result<BenchConfig, ProjectError> {
    config.version = 1;
    Ok(config)
}
