//! In-process record store with the same matching rules as the service.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::{Backend, Credentials, Oid, Table};
use crate::error::{ImportError, Result};

/// Page size of the service's `find_*` endpoints.
const PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub id: Oid,
    pub fields: Vec<(String, String)>,
}

impl StoredRecord {
    /// First value stored under `key`.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value stored under `key`, for repeated list fields.
    pub fn values(&self, key: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    fn matches(&self, filter: &[(&str, String)]) -> bool {
        filter
            .iter()
            .all(|(key, value)| self.field(key) == Some(value.as_str()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: HashMap<Table, Vec<StoredRecord>>,
    next_id: u64,
    logged_in: bool,
    rejected: HashMap<Table, String>,
    sticky: HashSet<Table>,
    inserts: usize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn records(&self, table: Table) -> &[StoredRecord] {
        self.tables.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, table: Table) -> usize {
        self.records(table).len()
    }

    /// Total number of successful insert calls.
    pub fn insert_calls(&self) -> usize {
        self.inserts
    }

    /// Store a record directly, bypassing login.
    pub fn seed(&mut self, table: Table, fields: &[(&str, String)]) -> Oid {
        let id = self.assign_id();
        let fields = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        self.tables
            .entry(table)
            .or_default()
            .push(StoredRecord { id: id.clone(), fields });
        id
    }

    /// Make every insert into `table` fail with `message`.
    pub fn reject_inserts(&mut self, table: Table, message: &str) {
        self.rejected.insert(table, message.to_string());
    }

    /// Make `drop_table` leave `table` untouched.
    pub fn ignore_drop(&mut self, table: Table) {
        self.sticky.insert(table);
    }

    fn assign_id(&mut self) -> Oid {
        self.next_id += 1;
        Oid::from(format!("{:024x}", self.next_id))
    }

    fn require_login(&self, endpoint: String) -> Result<()> {
        if self.logged_in {
            Ok(())
        } else {
            Err(ImportError::Backend {
                endpoint,
                message: "not logged in".to_string(),
            })
        }
    }
}

impl Backend for MemoryBackend {
    fn login(&mut self, credentials: &Credentials) -> Result<()> {
        debug!("memory login as {}", credentials.email);
        self.logged_in = true;
        Ok(())
    }

    fn logout(&mut self) -> Result<()> {
        self.logged_in = false;
        Ok(())
    }

    fn drop_table(&mut self, table: Table) -> Result<()> {
        self.require_login(format!("drop_{}", table))?;
        if !self.sticky.contains(&table) {
            self.tables.remove(&table);
        }
        Ok(())
    }

    fn find(&mut self, table: Table, filter: &[(&str, String)], page: u64) -> Result<Vec<Oid>> {
        self.require_login(format!("find_{}", table))?;
        Ok(self
            .records(table)
            .iter()
            .filter(|r| r.matches(filter))
            .skip(page as usize * PAGE_SIZE)
            .take(PAGE_SIZE)
            .map(|r| r.id.clone())
            .collect())
    }

    fn insert(&mut self, table: Table, fields: &[(&'static str, String)]) -> Result<Oid> {
        let endpoint = format!("insert_{}", table);
        self.require_login(endpoint.clone())?;
        if let Some(message) = self.rejected.get(&table) {
            return Err(ImportError::Backend {
                endpoint,
                message: message.clone(),
            });
        }
        self.inserts += 1;
        Ok(self.seed(table, fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AddressRecord, DEFAULT_COUNTRY};

    fn logged_in() -> MemoryBackend {
        let mut backend = MemoryBackend::new();
        backend
            .login(&Credentials {
                email: "admin@projectcosi.org".into(),
                password: "admin".into(),
            })
            .unwrap();
        backend
    }

    #[test]
    fn calls_require_login() {
        let mut backend = MemoryBackend::new();
        let err = backend.drop_table(Table::Person).unwrap_err();
        assert!(err.to_string().contains("not logged in"));
    }

    #[test]
    fn find_matches_every_field() {
        let mut backend = logged_in();
        let main = AddressRecord::new("123 Main St".into(), DEFAULT_COUNTRY.into());
        let mut apt = main.clone();
        apt.line_two = "Apt 2".into();

        let main_id = backend.insert_address(&main).unwrap();
        backend.insert_address(&apt).unwrap();

        assert_eq!(backend.find(Table::Address, &main.form(), 0).unwrap(), vec![main_id]);
        assert_eq!(backend.find(Table::Address, &[], 0).unwrap().len(), 2);
    }

    #[test]
    fn find_pages_by_hundred() {
        let mut backend = logged_in();
        for i in 0..150 {
            backend.seed(Table::Person, &[("first_name", i.to_string())]);
        }

        assert_eq!(backend.find(Table::Person, &[], 0).unwrap().len(), 100);
        assert_eq!(backend.find(Table::Person, &[], 1).unwrap().len(), 50);
        assert!(backend.find(Table::Person, &[], 2).unwrap().is_empty());
    }

    #[test]
    fn drop_clears_table() {
        let mut backend = logged_in();
        backend.seed(Table::Group, &[("group_name", "Choir".into())]);

        backend.drop_table(Table::Group).unwrap();

        assert_eq!(backend.count(Table::Group), 0);
    }

    #[test]
    fn rejected_insert_reports_backend_error() {
        let mut backend = logged_in();
        backend.reject_inserts(Table::Person, "Invalid form");

        let err = backend.insert(Table::Person, &[]).unwrap_err();

        assert!(matches!(err, ImportError::Backend { ref endpoint, .. } if endpoint == "insert_person"));
        assert_eq!(backend.insert_calls(), 0);
    }

    #[test]
    fn ids_are_unique() {
        let mut backend = logged_in();
        let a = backend.insert(Table::Person, &[]).unwrap();
        let b = backend.insert(Table::Person, &[]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 24);
    }
}
