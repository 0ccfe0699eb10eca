pub mod address;
pub mod group;
pub mod household;
pub mod identity;
pub mod person;

pub use address::{AddressRecord, DEFAULT_COUNTRY};
pub use group::{GroupRecord, MembershipRecord};
pub use household::{mode_last_name, HouseholdRecord};
pub use identity::{IdentityKey, IdentityMap};
pub use person::{parse_birth_date, PersonRecord, Sex};
