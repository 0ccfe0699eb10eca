use std::collections::HashMap;
use std::fmt;

use crate::api::Oid;

/// Cross-references one person between the people and group exports.
///
/// Built from the raw source cells, not the normalized record, so both
/// exports produce the same key for the same person.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    first_name: String,
    last_name: String,
    address_line_one: String,
}

impl IdentityKey {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address_line_one: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            address_line_one: address_line_one.into(),
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn address_line_one(&self) -> &str {
        &self.address_line_one
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:?}, {:?}, {:?})",
            self.first_name, self.last_name, self.address_line_one
        )
    }
}

/// Identity key to backend id, with the reverse lookup households need.
#[derive(Debug, Default, Clone)]
pub struct IdentityMap {
    by_key: HashMap<IdentityKey, Oid>,
    by_id: HashMap<Oid, IdentityKey>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.by_key.contains_key(key)
    }

    /// Record a person. Returns the key back if it is already taken.
    pub fn insert(&mut self, key: IdentityKey, id: Oid) -> Result<(), IdentityKey> {
        if self.by_key.contains_key(&key) {
            return Err(key);
        }
        self.by_id.insert(id.clone(), key.clone());
        self.by_key.insert(key, id);
        Ok(())
    }

    pub fn id(&self, key: &IdentityKey) -> Option<&Oid> {
        self.by_key.get(key)
    }

    pub fn key(&self, id: &Oid) -> Option<&IdentityKey> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_compare_by_value() {
        let a = IdentityKey::new("John", "Smith", "123 Main St");
        let b = IdentityKey::new(String::from("John"), "Smith", "123 Main St");
        assert_eq!(a, b);
        assert_ne!(a, IdentityKey::new("John", "Smith", "9 Oak Ave"));
    }

    #[test]
    fn insert_rejects_duplicate_key() {
        let mut map = IdentityMap::new();
        let key = IdentityKey::new("John", "Smith", "123 Main St");

        map.insert(key.clone(), Oid::from("a1")).unwrap();
        let rejected = map.insert(key.clone(), Oid::from("b2")).unwrap_err();

        assert_eq!(rejected, key);
        assert_eq!(map.len(), 1);
        assert_eq!(map.id(&key), Some(&Oid::from("a1")));
    }

    #[test]
    fn reverse_lookup_finds_key() {
        let mut map = IdentityMap::new();
        let key = IdentityKey::new("Ann", "Jones", "");
        map.insert(key.clone(), Oid::from("c3")).unwrap();

        assert_eq!(map.key(&Oid::from("c3")), Some(&key));
        assert!(map.key(&Oid::from("zz")).is_none());
    }

    #[test]
    fn display_names_all_parts() {
        let key = IdentityKey::new("John", "Smith", "123 Main St");
        assert_eq!(key.to_string(), r#"("John", "Smith", "123 Main St")"#);
    }
}
