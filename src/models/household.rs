use std::collections::HashMap;

use crate::api::Oid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseholdRecord {
    pub house_name: String,
    pub address: Oid,
    pub persons: Vec<Oid>,
}

impl HouseholdRecord {
    pub fn new(family_name: &str, address: Oid, persons: Vec<Oid>) -> Self {
        Self {
            house_name: format!("{} Household", family_name),
            address,
            persons,
        }
    }

    /// Form fields for `insert_household`. Members repeat the `persons` key.
    pub fn form(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("house_name", self.house_name.clone()),
            ("address", self.address.to_string()),
        ];
        fields.extend(self.persons.iter().map(|p| ("persons", p.to_string())));
        fields
    }
}

/// Most frequent name. Ties go to the name seen first.
pub fn mode_last_name<'a, I>(names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = names.into_iter().collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for &name in &names {
        *counts.entry(name).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for name in names {
        let count = counts[name];
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((name, count));
        }
    }
    best.map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn majority_name_wins() {
        assert_eq!(mode_last_name(["Smith", "Smith", "Jones"]), Some("Smith"));
        assert_eq!(mode_last_name(["Jones", "Smith", "Smith"]), Some("Smith"));
    }

    #[test]
    fn tie_goes_to_first_seen() {
        assert_eq!(mode_last_name(["Jones", "Smith"]), Some("Jones"));
        assert_eq!(
            mode_last_name(["Lee", "Park", "Park", "Lee"]),
            Some("Lee")
        );
    }

    #[test]
    fn no_members_no_name() {
        assert_eq!(mode_last_name(Vec::<&str>::new()), None);
    }

    #[test]
    fn household_name_has_suffix() {
        let household = HouseholdRecord::new("Smith", Oid::from("a1"), vec![Oid::from("p1")]);
        assert_eq!(household.house_name, "Smith Household");
    }

    #[test]
    fn form_repeats_members() {
        let household = HouseholdRecord::new(
            "Smith",
            Oid::from("a1"),
            vec![Oid::from("p1"), Oid::from("p2")],
        );
        assert_eq!(
            household.form(),
            vec![
                ("house_name", "Smith Household".to_string()),
                ("address", "a1".to_string()),
                ("persons", "p1".to_string()),
                ("persons", "p2".to_string()),
            ]
        );
    }
}
