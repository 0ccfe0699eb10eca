use anyhow::Result;

use crate::api::{Backend, CosiClient, MemoryBackend, Session, Table};
use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::import::{
    clear_table, import_groups, import_households, import_persons, read_rows, GroupRow,
    PersonRow,
};

/// Import results summary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub persons: usize,
    pub addresses_created: usize,
    pub addresses_reused: usize,
    pub households: usize,
    pub groups: usize,
    pub memberships: usize,
}

/// Execute the import command.
///
/// Both exports are parsed before anything on the service is touched.
pub fn run_import(config: &ImportConfig) -> Result<()> {
    println!("Reading Files");
    let people: Vec<PersonRow> = read_rows(&config.people_path, config.encoding)?;
    let groups: Vec<GroupRow> = read_rows(&config.groups_path, config.encoding)?;

    let summary = if config.dry_run {
        println!("Dry run: nothing is sent to {}", config.api_url);
        let mut backend = MemoryBackend::new();
        import_all(&mut backend, config, &people, &groups)?
    } else {
        let mut backend = CosiClient::new(&config.api_url)?;
        import_all(&mut backend, config, &people, &groups)?
    };

    print_summary(&summary, config.dry_run);
    Ok(())
}

/// Log in, clear every table, then run the import stages in order.
///
/// One session spans every stage and is closed however the run ends.
pub fn import_all<B: Backend + ?Sized>(
    backend: &mut B,
    config: &ImportConfig,
    people: &[PersonRow],
    groups: &[GroupRow],
) -> std::result::Result<ImportSummary, ImportError> {
    let mut session = Session::open(backend, &config.credentials)?;

    println!("**Dropping Tables**");
    for table in Table::ALL {
        clear_table(&mut *session, table)?;
        println!("Dropped: {}", table);
    }
    println!();

    println!("Importing Person Data");
    let identities = import_persons(&mut *session, people)?;

    println!("Importing Address Data");
    let households = import_households(&mut *session, people, &identities, &config.country)?;

    println!("Importing Group Data");
    let group_stats = import_groups(&mut *session, groups, &identities)?;

    Ok(ImportSummary {
        persons: identities.len(),
        addresses_created: households.addresses_created,
        addresses_reused: households.addresses_reused,
        households: households.households,
        groups: group_stats.groups,
        memberships: group_stats.memberships,
    })
}

fn print_summary(summary: &ImportSummary, dry_run: bool) {
    let verb = if dry_run { "Would create" } else { "Created" };

    println!(
        "\n{} {} persons, {} addresses, {} households",
        verb, summary.persons, summary.addresses_created, summary.households
    );
    if summary.addresses_reused > 0 {
        println!("  {} addresses already on the service were reused", summary.addresses_reused);
    }
    println!("{} {} groups, {} memberships", verb, summary.groups, summary.memberships);
}
