//! Address deduplication and household formation.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use super::rows::PersonRow;
use crate::api::{Backend, Oid, Table};
use crate::error::{ImportError, Result};
use crate::models::{mode_last_name, AddressRecord, HouseholdRecord, IdentityMap};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HouseholdStats {
    pub addresses_created: usize,
    pub addresses_reused: usize,
    pub households: usize,
}

impl PersonRow {
    /// The row's address. An empty first line means the row has none.
    pub fn to_address(&self, country: &str) -> AddressRecord {
        let line_one = if self.address1.trim().is_empty() {
            String::new()
        } else {
            self.address1.clone()
        };

        let mut address = AddressRecord::new(line_one, country.to_string());
        address.line_two = self.address2.clone().unwrap_or_default();
        address.city = self.city.clone().unwrap_or_default();
        address.region = self.state.clone().unwrap_or_default();
        address.postal_code = self.zip_code.clone().unwrap_or_default();
        address
    }
}

/// Maps address content to a service id, creating addresses on first sight.
///
/// `created` and `reused` count distinct addresses: inserted by this run, or
/// already present on the service.
#[derive(Debug, Default)]
pub struct AddressResolver {
    known: HashMap<AddressRecord, Oid>,
    created: usize,
    reused: usize,
}

impl AddressResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve<B: Backend + ?Sized>(&mut self, backend: &mut B, address: &AddressRecord) -> Result<Oid> {
        if let Some(id) = self.known.get(address) {
            return Ok(id.clone());
        }

        let mut found = backend.find(Table::Address, &address.form(), 0)?;
        let id = match found.len() {
            0 => {
                self.created += 1;
                backend.insert_address(address)?
            }
            1 => {
                self.reused += 1;
                found.remove(0)
            }
            count => {
                return Err(ImportError::AmbiguousAddress {
                    line_one: address.line_one.clone(),
                    count,
                })
            }
        };

        debug!("address {:?} -> {}", address.line_one, id);
        self.known.insert(address.clone(), id.clone());
        Ok(id)
    }
}

/// Members per address, in the order addresses were first seen.
#[derive(Debug, Default)]
struct AddressGroups {
    order: Vec<(Oid, Vec<Oid>)>,
    index: HashMap<Oid, usize>,
}

impl AddressGroups {
    fn push(&mut self, address: Oid, person: Oid) {
        let slot = match self.index.get(&address) {
            Some(&slot) => slot,
            None => {
                self.order.push((address.clone(), Vec::new()));
                self.index.insert(address, self.order.len() - 1);
                self.order.len() - 1
            }
        };
        self.order[slot].1.push(person);
    }
}

fn check_unique_members(address: &Oid, members: &[Oid]) -> Result<()> {
    let mut seen = HashSet::new();
    for person in members {
        if !seen.insert(person) {
            return Err(ImportError::DuplicateHouseholdMember(person.clone(), address.clone()));
        }
    }
    Ok(())
}

/// Resolve each row's address and create one household per address.
pub fn import_households<B: Backend + ?Sized>(
    backend: &mut B,
    rows: &[PersonRow],
    identities: &IdentityMap,
    country: &str,
) -> Result<HouseholdStats> {
    let mut resolver = AddressResolver::new();
    let mut groups = AddressGroups::default();

    for row in rows {
        let address = row.to_address(country);
        if !address.is_importable() {
            continue;
        }

        let address_id = resolver.resolve(backend, &address)?;
        let key = row.identity_key();
        let person = identities
            .id(&key)
            .ok_or_else(|| ImportError::UnknownPerson(key.clone()))?;
        groups.push(address_id, person.clone());
    }

    let mut households = 0;
    for (address, members) in groups.order {
        check_unique_members(&address, &members)?;

        let family = mode_last_name(
            members
                .iter()
                .filter_map(|id| identities.key(id))
                .map(|key| key.last_name()),
        )
        .unwrap_or_default();

        let household = HouseholdRecord::new(family, address, members);
        backend.insert_household(&household)?;
        info!("{} ({} members)", household.house_name, household.persons.len());
        households += 1;
    }

    Ok(HouseholdStats {
        addresses_created: resolver.created,
        addresses_reused: resolver.reused,
        households,
    })
}
