pub const DEFAULT_COUNTRY: &str = "United States";

/// A postal address. Two records with equal fields are the same address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressRecord {
    pub line_one: String,
    pub line_two: String,
    pub line_three: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

impl AddressRecord {
    pub fn new(line_one: String, country: String) -> Self {
        Self {
            line_one,
            line_two: String::new(),
            line_three: String::new(),
            city: String::new(),
            region: String::new(),
            postal_code: String::new(),
            country,
        }
    }

    /// Addresses without a first line are never imported.
    pub fn is_importable(&self) -> bool {
        !self.line_one.is_empty()
    }

    /// Form fields for `insert_address`, also used as the exact-match filter
    /// for `find_address`.
    pub fn form(&self) -> Vec<(&'static str, String)> {
        vec![
            ("line_one", self.line_one.clone()),
            ("line_two", self.line_two.clone()),
            ("line_three", self.line_three.clone()),
            ("city", self.city.clone()),
            ("region", self.region.clone()),
            ("postal_code", self.postal_code.clone()),
            ("country", self.country.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equal_fields_are_one_address() {
        let mut a = AddressRecord::new("123 Main St".into(), DEFAULT_COUNTRY.into());
        a.city = "Springfield".into();
        let mut b = AddressRecord::new("123 Main St".into(), DEFAULT_COUNTRY.into());
        b.city = "Springfield".into();

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn second_line_distinguishes_addresses() {
        let a = AddressRecord::new("123 Main St".into(), DEFAULT_COUNTRY.into());
        let mut b = a.clone();
        b.line_two = "Apt 4".into();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_first_line_is_not_importable() {
        let address = AddressRecord::new(String::new(), DEFAULT_COUNTRY.into());
        assert!(!address.is_importable());
    }

    #[test]
    fn form_lists_every_field() {
        let address = AddressRecord::new("1 Elm".into(), DEFAULT_COUNTRY.into());
        let keys: Vec<&str> = address.form().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            ["line_one", "line_two", "line_three", "city", "region", "postal_code", "country"]
        );
    }
}
