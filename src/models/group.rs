use crate::api::Oid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    pub group_name: String,
    pub group_desc: String,
}

impl GroupRecord {
    pub fn new(group_name: String, group_desc: String) -> Self {
        Self { group_name, group_desc }
    }

    pub fn form(&self) -> Vec<(&'static str, String)> {
        vec![
            ("group_name", self.group_name.clone()),
            ("group_desc", self.group_desc.clone()),
        ]
    }
}

/// A person's role in a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipRecord {
    pub person: Oid,
    pub group: Oid,
    pub role: String,
}

impl MembershipRecord {
    pub fn form(&self) -> Vec<(&'static str, String)> {
        vec![
            ("person", self.person.to_string()),
            ("group", self.group.to_string()),
            ("role", self.role.clone()),
        ]
    }
}
