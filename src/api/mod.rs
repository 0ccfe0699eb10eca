//! Record service capability.
//!
//! The importer talks to the service only through [`Backend`]. [`CosiClient`]
//! speaks the HTTP API; [`MemoryBackend`] keeps everything in process for dry
//! runs and tests.

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::models::{AddressRecord, GroupRecord, HouseholdRecord, MembershipRecord, PersonRecord};

pub mod client;
pub mod memory;

pub use client::CosiClient;
pub use memory::MemoryBackend;

/// Identifier assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Oid(String);

impl Oid {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Oid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Oid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wire form of an id: `{"$oid": "..."}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OidRef {
    #[serde(rename = "$oid")]
    pub oid: Oid,
}

/// Tables managed by an import run, in drop order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Person,
    Address,
    Household,
    Group,
    GroupRelation,
    Event,
    EventRegistration,
}

impl Table {
    pub const ALL: [Table; 7] = [
        Table::Person,
        Table::Address,
        Table::Household,
        Table::Group,
        Table::GroupRelation,
        Table::Event,
        Table::EventRegistration,
    ];

    /// Name used in endpoint paths (`drop_<name>`, `find_<name>`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Address => "address",
            Self::Household => "household",
            Self::Group => "group",
            Self::GroupRelation => "grouprelation",
            Self::Event => "event",
            Self::EventRegistration => "eventregistration",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Operations the importer needs from the record service.
///
/// Every call is a blocking request/response. Implementations report any
/// service-side failure as an error; callers treat all errors as fatal.
pub trait Backend {
    fn login(&mut self, credentials: &Credentials) -> Result<()>;

    fn logout(&mut self) -> Result<()>;

    fn drop_table(&mut self, table: Table) -> Result<()>;

    /// Ids of records matching every filter field exactly, in service order.
    fn find(&mut self, table: Table, filter: &[(&str, String)], page: u64) -> Result<Vec<Oid>>;

    /// Create one record and return its new id.
    fn insert(&mut self, table: Table, fields: &[(&'static str, String)]) -> Result<Oid>;

    fn insert_person(&mut self, person: &PersonRecord) -> Result<Oid> {
        self.insert(Table::Person, &person.form())
    }

    fn insert_address(&mut self, address: &AddressRecord) -> Result<Oid> {
        self.insert(Table::Address, &address.form())
    }

    fn insert_household(&mut self, household: &HouseholdRecord) -> Result<Oid> {
        self.insert(Table::Household, &household.form())
    }

    fn insert_group(&mut self, group: &GroupRecord) -> Result<Oid> {
        self.insert(Table::Group, &group.form())
    }

    fn insert_grouprelation(&mut self, membership: &MembershipRecord) -> Result<Oid> {
        self.insert(Table::GroupRelation, &membership.form())
    }
}

/// An authenticated backend. Logs out when dropped, on every exit path.
pub struct Session<'a, B: Backend + ?Sized> {
    backend: &'a mut B,
}

impl<'a, B: Backend + ?Sized> Session<'a, B> {
    pub fn open(backend: &'a mut B, credentials: &Credentials) -> Result<Self> {
        backend.login(credentials)?;
        Ok(Self { backend })
    }
}

impl<B: Backend + ?Sized> Deref for Session<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        &*self.backend
    }
}

impl<B: Backend + ?Sized> DerefMut for Session<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        &mut *self.backend
    }
}

impl<B: Backend + ?Sized> Drop for Session<'_, B> {
    fn drop(&mut self) {
        if let Err(e) = self.backend.logout() {
            warn!("logout failed: {}", e);
        }
    }
}
