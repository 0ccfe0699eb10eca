//! Import stages, run in order against one authenticated backend:
//! clear tables, persons, addresses and households, groups.

use tracing::info;

use crate::api::{Backend, Table};
use crate::error::{ImportError, Result};

pub mod groups;
pub mod households;
pub mod persons;
pub mod rows;

pub use groups::{import_groups, plan_groups, GroupPlan, GroupStats};
pub use households::{import_households, AddressResolver, HouseholdStats};
pub use persons::import_persons;
pub use rows::{parse_rows, read_rows, GroupRow, PersonRow};

/// Drop `table` and confirm the service reports it empty.
pub fn clear_table<B: Backend + ?Sized>(backend: &mut B, table: Table) -> Result<()> {
    backend.drop_table(table)?;
    let remaining = backend.find(table, &[], 0)?;
    if !remaining.is_empty() {
        return Err(ImportError::TableNotEmpty {
            table,
            count: remaining.len(),
        });
    }
    info!("dropped {}", table);
    Ok(())
}
