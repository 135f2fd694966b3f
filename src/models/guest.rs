//! Guest roster entry as served by the listing endpoint.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Guests born before this year are adults. Fixed, not relative to today.
pub const ADULT_BIRTH_YEAR_LIMIT: i32 = 2002;

/// One invitee on the guest list.
///
/// Field names follow the remote service's JSON keys. Every value arrives as a
/// string; the `pagato`/`presente` flags are `"0"`/`"1"` and decode to `bool`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: String,
    #[serde(rename = "id_persona")]
    pub person_id: String,
    #[serde(rename = "nome")]
    pub first_name: String,
    #[serde(rename = "cognome")]
    pub last_name: String,
    #[serde(rename = "anno")]
    pub birth_year: String,
    #[serde(rename = "classe", default)]
    pub class_label: String,
    #[serde(rename = "mail", default)]
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: String,
    #[serde(rename = "pagato", with = "flag")]
    pub paid: bool,
    #[serde(rename = "presente", with = "flag")]
    pub present: bool,
}

impl Guest {
    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Birth year from the leading digits of the field, so `"2001 (rip.)"` reads as 2001.
    pub fn birth_year(&self) -> Option<i32> {
        let text = self.birth_year.trim_start();
        let sign_len = usize::from(text.starts_with(['-', '+']));
        let digits_end = text[sign_len..]
            .find(|c: char| !c.is_ascii_digit())
            .map_or(text.len(), |i| i + sign_len);
        text[..digits_end].parse().ok()
    }

    /// Unparsable years count as minors.
    pub fn is_adult(&self) -> bool {
        self.birth_year().is_some_and(|y| y < ADULT_BIRTH_YEAR_LIMIT)
    }

    pub fn age_label(&self) -> &'static str {
        age_label(self.is_adult())
    }

    /// Case-insensitive match on name, class, email or phone.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [&self.first_name, &self.last_name, &self.class_label, &self.email, &self.phone]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
            || self.full_name().to_lowercase().contains(&query)
    }
}

/// Italian age label used across the UI.
pub fn age_label(adult: bool) -> &'static str {
    if adult { "Maggiorenne" } else { "Minorenne" }
}

/// `"0"`/`"1"` string flags. Bare `0`/`1` numbers and JSON booleans are also
/// accepted; anything else is a schema mismatch.
mod flag {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Text(String),
        Number(i64),
        Bool(bool),
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "1" } else { "0" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match RawFlag::deserialize(deserializer)? {
            RawFlag::Text(s) => match s.trim() {
                "0" => Ok(false),
                "1" => Ok(true),
                other => Err(serde::de::Error::custom(format!("invalid flag value '{other}'"))),
            },
            RawFlag::Number(0) => Ok(false),
            RawFlag::Number(1) => Ok(true),
            RawFlag::Number(n) => Err(serde::de::Error::custom(format!("invalid flag value {n}"))),
            RawFlag::Bool(b) => Ok(b),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample(id: &str, first: &str, last: &str, year: &str, paid: bool, present: bool) -> Guest {
    Guest {
        id: id.to_string(),
        person_id: format!("p{id}"),
        first_name: first.to_string(),
        last_name: last.to_string(),
        birth_year: year.to_string(),
        class_label: "5A".to_string(),
        email: format!("{}@example.org", first.to_lowercase()),
        phone: String::new(),
        paid,
        present,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "anno": "2001",
        "classe": "5B",
        "cognome": "Rossi",
        "id": "42",
        "id_persona": "7",
        "mail": "mario@example.org",
        "nome": "Mario",
        "pagato": "1",
        "presente": "0",
        "telefono": "3331234567"
    }"#;

    #[test]
    fn test_parse_record() {
        let guest: Guest = serde_json::from_str(RECORD).unwrap();
        assert_eq!(guest.id, "42");
        assert_eq!(guest.person_id, "7");
        assert_eq!(guest.full_name(), "Mario Rossi");
        assert!(guest.paid);
        assert!(!guest.present);
    }

    #[test]
    fn test_flag_rejects_unknown_value() {
        let bad = RECORD.replace(r#""presente": "0""#, r#""presente": "2""#);
        assert!(serde_json::from_str::<Guest>(&bad).is_err());
    }

    #[test]
    fn test_flag_accepts_numbers_and_bools() {
        let numeric = RECORD.replace(r#""presente": "0""#, r#""presente": 1"#);
        assert!(serde_json::from_str::<Guest>(&numeric).unwrap().present);

        let boolean = RECORD.replace(r#""pagato": "1""#, r#""pagato": false"#);
        assert!(!serde_json::from_str::<Guest>(&boolean).unwrap().paid);
    }

    #[test]
    fn test_flag_serializes_as_string() {
        let guest: Guest = serde_json::from_str(RECORD).unwrap();
        let value = serde_json::to_value(&guest).unwrap();
        assert_eq!(value["presente"], "0");
        assert_eq!(value["pagato"], "1");
    }

    #[test]
    fn test_adult_threshold_is_fixed() {
        assert!(sample("1", "A", "B", "2001", true, false).is_adult());
        assert!(!sample("1", "A", "B", "2002", true, false).is_adult());
        assert!(!sample("1", "A", "B", "2005", true, false).is_adult());
        assert_eq!(sample("1", "A", "B", "1999", true, false).age_label(), "Maggiorenne");
        assert_eq!(sample("1", "A", "B", "2002", true, false).age_label(), "Minorenne");
    }

    #[test]
    fn test_unparsable_year_is_minor() {
        assert!(!sample("1", "A", "B", "", true, false).is_adult());
        assert!(!sample("1", "A", "B", "n/d", true, false).is_adult());
        assert!(!sample("1", "A", "B", "-", true, false).is_adult());
    }

    #[test]
    fn test_birth_year_reads_leading_digits() {
        assert_eq!(sample("1", "A", "B", "2001abc", true, false).birth_year(), Some(2001));
        assert_eq!(sample("1", "A", "B", " 1999 ", true, false).birth_year(), Some(1999));
        assert_eq!(sample("1", "A", "B", "abc2001", true, false).birth_year(), None);
        assert!(sample("1", "A", "B", "2001abc", true, false).is_adult());
        assert!(!sample("1", "A", "B", "2004/05", true, false).is_adult());
    }

    #[test]
    fn test_search_match() {
        let guest = sample("1", "Giulia", "Bianchi", "2003", false, false);
        assert!(guest.matches(""));
        assert!(guest.matches("giulia b"));
        assert!(guest.matches("5a"));
        assert!(!guest.matches("rossi"));
    }
}
