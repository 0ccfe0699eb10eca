use chrono::NaiveDate;

/// Source exports write birth dates as month/day/year.
const SOURCE_DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Undefined,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Undefined => "Undefined",
        }
    }

    /// Map a single-letter gender code. Anything unrecognized is `Undefined`.
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some("M") => Self::Male,
            Some("F") => Self::Female,
            _ => Self::Undefined,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub dob: Option<NaiveDate>,
    pub home_phone: Option<String>,
    pub mobile_phone: Option<String>,
    pub work_phone: Option<String>,
    pub sex: Sex,
    pub notes: String,
    pub emergency_contact: String,
}

impl PersonRecord {
    pub fn new(first_name: String, last_name: String) -> Self {
        Self {
            first_name,
            middle_name: String::new(),
            last_name,
            dob: None,
            home_phone: None,
            mobile_phone: None,
            work_phone: None,
            sex: Sex::default(),
            notes: String::new(),
            emergency_contact: String::new(),
        }
    }

    /// Form fields for `insert_person`. Absent values are left out.
    pub fn form(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("first_name", self.first_name.clone()),
            ("middle_name", self.middle_name.clone()),
            ("last_name", self.last_name.clone()),
        ];
        if let Some(dob) = self.dob {
            fields.push(("dob", dob.format("%Y-%m-%d").to_string()));
        }
        if let Some(ref phone) = self.home_phone {
            fields.push(("home_phone", phone.clone()));
        }
        if let Some(ref phone) = self.mobile_phone {
            fields.push(("mobile_phone", phone.clone()));
        }
        if let Some(ref phone) = self.work_phone {
            fields.push(("work_phone", phone.clone()));
        }
        fields.push(("sex", self.sex.as_str().to_string()));
        fields.push(("notes", self.notes.clone()));
        fields.push(("emergency_contact", self.emergency_contact.clone()));
        fields
    }
}

/// Parse a month/day/year birth date. Blank or malformed input yields `None`.
pub fn parse_birth_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    NaiveDate::parse_from_str(raw, SOURCE_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_codes_map_to_sex() {
        assert_eq!(Sex::from_code(Some("M")), Sex::Male);
        assert_eq!(Sex::from_code(Some("F")), Sex::Female);
        assert_eq!(Sex::from_code(Some("X")), Sex::Undefined);
        assert_eq!(Sex::from_code(Some("m")), Sex::Undefined);
        assert_eq!(Sex::from_code(Some("")), Sex::Undefined);
        assert_eq!(Sex::from_code(None), Sex::Undefined);
    }

    #[test]
    fn birth_date_becomes_iso() {
        let date = parse_birth_date(Some("07/04/1976")).unwrap();
        assert_eq!(date.format("%Y-%m-%d").to_string(), "1976-07-04");

        // Single-digit month and day are accepted and padded
        let date = parse_birth_date(Some("1/2/2003")).unwrap();
        assert_eq!(date.format("%Y-%m-%d").to_string(), "2003-01-02");
    }

    #[test]
    fn bad_birth_dates_are_absent() {
        assert!(parse_birth_date(None).is_none());
        assert!(parse_birth_date(Some("")).is_none());
        assert!(parse_birth_date(Some("   ")).is_none());
        assert!(parse_birth_date(Some("13/40/1990")).is_none());
        assert!(parse_birth_date(Some("1990-01-01")).is_none());
        assert!(parse_birth_date(Some("unknown")).is_none());
    }

    #[test]
    fn form_omits_absent_fields() {
        let mut person = PersonRecord::new("John".into(), "Smith".into());
        person.mobile_phone = Some("555-0100".into());

        let form = person.form();
        let keys: Vec<&str> = form.iter().map(|(k, _)| *k).collect();

        assert!(keys.contains(&"mobile_phone"));
        assert!(!keys.contains(&"home_phone"));
        assert!(!keys.contains(&"work_phone"));
        assert!(!keys.contains(&"dob"));
        assert!(form.contains(&("sex", "Undefined".to_string())));
        assert!(form.contains(&("middle_name", String::new())));
    }

    #[test]
    fn form_writes_iso_dob() {
        let mut person = PersonRecord::new("Jane".into(), "Doe".into());
        person.dob = parse_birth_date(Some("12/25/1980"));

        assert!(person.form().contains(&("dob", "1980-12-25".to_string())));
    }
}
