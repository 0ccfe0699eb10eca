//! Groups and person-to-group memberships.

use std::collections::HashMap;

use tracing::debug;

use super::rows::GroupRow;
use crate::api::Backend;
use crate::error::{ImportError, Result};
use crate::models::{GroupRecord, IdentityKey, IdentityMap, MembershipRecord};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GroupStats {
    pub groups: usize,
    pub memberships: usize,
}

impl GroupRow {
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::new(&self.first_name, &self.last_name, &self.address1)
    }
}

/// One group gathered from the rows, with its members and their roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPlan {
    pub group: GroupRecord,
    pub members: Vec<(IdentityKey, String)>,
}

/// Gather rows by group name, in first-seen order.
///
/// The last description seen for a name wins. Repeated members are kept.
pub fn plan_groups(rows: &[GroupRow]) -> Vec<GroupPlan> {
    let mut plans: Vec<GroupPlan> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.group_name.as_str()).or_insert_with(|| {
            plans.push(GroupPlan {
                group: GroupRecord::new(row.group_name.clone(), String::new()),
                members: Vec::new(),
            });
            plans.len() - 1
        });

        let plan = &mut plans[slot];
        plan.group.group_desc = row.group_description.clone().unwrap_or_default();
        plan.members
            .push((row.identity_key(), row.member_type.clone().unwrap_or_default()));
    }

    plans
}

/// Create each group, then one membership per row.
pub fn import_groups<B: Backend + ?Sized>(
    backend: &mut B,
    rows: &[GroupRow],
    identities: &IdentityMap,
) -> Result<GroupStats> {
    let mut stats = GroupStats::default();

    for plan in plan_groups(rows) {
        let group_id = backend.insert_group(&plan.group)?;
        debug!("group {:?} -> {}", plan.group.group_name, group_id);
        stats.groups += 1;

        for (key, role) in plan.members {
            let person = identities
                .id(&key)
                .ok_or_else(|| ImportError::UnknownPerson(key.clone()))?;
            let membership = MembershipRecord {
                person: person.clone(),
                group: group_id.clone(),
                role,
            };
            backend.insert_grouprelation(&membership)?;
            stats.memberships += 1;
        }
    }

    Ok(stats)
}
