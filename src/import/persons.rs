use tracing::debug;

use super::rows::PersonRow;
use crate::api::Backend;
use crate::error::{ImportError, Result};
use crate::models::{parse_birth_date, IdentityKey, IdentityMap, PersonRecord, Sex};

impl PersonRow {
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::new(&self.first_name, &self.last_name, &self.address1)
    }

    /// Normalize the row into the record sent to the service.
    pub fn to_record(&self) -> PersonRecord {
        let mut person = PersonRecord::new(self.first_name.clone(), self.last_name.clone());
        person.dob = parse_birth_date(self.birth_date.as_deref());
        person.home_phone = self.home_phone.clone();
        person.mobile_phone = self.mobile_phone.clone();
        person.work_phone = self.work_phone.clone();
        person.sex = Sex::from_code(self.gender.as_deref());
        person.notes = self.notes.clone().unwrap_or_default();
        person.emergency_contact = self.emergency_contact.clone().unwrap_or_default();
        person
    }
}

/// Create every person and return the identity mapping.
///
/// A repeated identity key aborts before the repeat is sent.
pub fn import_persons<B: Backend + ?Sized>(backend: &mut B, rows: &[PersonRow]) -> Result<IdentityMap> {
    let mut identities = IdentityMap::new();

    for row in rows {
        let key = row.identity_key();
        if identities.contains(&key) {
            return Err(ImportError::DuplicatePerson(key));
        }

        let id = backend.insert_person(&row.to_record())?;
        debug!("person {} -> {}", key, id);
        identities
            .insert(key, id)
            .map_err(ImportError::DuplicatePerson)?;
    }

    Ok(identities)
}
