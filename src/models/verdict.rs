//! Response schemas for the lookup and removal endpoints, and the admission verdict.

use serde::{Deserialize, Serialize};

use super::guest::age_label;
use crate::error::{AppError, Result};

/// Raw `ingressi.php` body. The detail fields are only present on success.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupResponse {
    pub success: bool,
    pub paid: Option<bool>,
    pub adult: Option<bool>,
    pub present: Option<bool>,
    pub name: Option<String>,
}

impl LookupResponse {
    /// Turn the body into a verdict.
    ///
    /// `success: false` is an invalid code; a successful body missing any
    /// detail field is a schema mismatch.
    pub fn into_verdict(self) -> Result<Verdict> {
        if !self.success {
            return Err(AppError::InvalidCode);
        }
        match (self.paid, self.adult, self.present, self.name) {
            (Some(paid), Some(adult), Some(present), Some(name)) => Ok(Verdict {
                paid,
                adult,
                present,
                name,
            }),
            _ => Err(AppError::parse("lookup response missing verdict fields")),
        }
    }
}

/// Raw `comeVoglio.php?remove=1` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RemovalResponse {
    pub success: bool,
    #[serde(default)]
    pub removed: bool,
}

/// Admission data for one looked-up guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub paid: bool,
    pub adult: bool,
    pub present: bool,
    pub name: String,
}

/// Outcome shown on the verdict screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Guest was already let in; wins over payment status.
    AlreadyEntered,
    Allowed,
    Denied,
}

impl Verdict {
    pub fn admission(&self) -> Admission {
        if self.present {
            Admission::AlreadyEntered
        } else if self.paid {
            Admission::Allowed
        } else {
            Admission::Denied
        }
    }

    pub fn age_label(&self) -> &'static str {
        age_label(self.adult)
    }
}

impl Admission {
    pub fn label(&self) -> &'static str {
        match self {
            Admission::AlreadyEntered => "Accesso già effettuato",
            Admission::Allowed => "Accesso consentito",
            Admission::Denied => "Accesso NON consentito",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(json: &str) -> LookupResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_successful_lookup() {
        let verdict = lookup(r#"{"success":true,"paid":true,"adult":false,"present":false,"name":"Mario Rossi"}"#)
            .into_verdict()
            .unwrap();

        assert_eq!(verdict.name, "Mario Rossi");
        assert_eq!(verdict.age_label(), "Minorenne");
        assert_eq!(verdict.admission(), Admission::Allowed);
        assert_eq!(verdict.admission().label(), "Accesso consentito");
    }

    #[test]
    fn test_unsuccessful_lookup_is_invalid_code() {
        let result = lookup(r#"{"success":false}"#).into_verdict();
        assert!(matches!(result, Err(AppError::InvalidCode)));
    }

    #[test]
    fn test_missing_fields_fail_closed() {
        let result = lookup(r#"{"success":true,"paid":true,"name":"Mario Rossi"}"#).into_verdict();
        assert!(matches!(result, Err(AppError::Parse(_))));
    }

    #[test]
    fn test_present_overrides_paid() {
        for paid in [true, false] {
            let verdict = Verdict {
                paid,
                adult: true,
                present: true,
                name: "Anna Verdi".to_string(),
            };
            assert_eq!(verdict.admission(), Admission::AlreadyEntered);
            assert_eq!(verdict.admission().label(), "Accesso già effettuato");
        }
    }

    #[test]
    fn test_unpaid_is_denied() {
        let verdict = Verdict {
            paid: false,
            adult: true,
            present: false,
            name: "Luca Neri".to_string(),
        };
        assert_eq!(verdict.admission(), Admission::Denied);
        assert_eq!(verdict.age_label(), "Maggiorenne");
    }

    #[test]
    fn test_removal_response_defaults_removed() {
        let resp: RemovalResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(resp, RemovalResponse { success: false, removed: false });
    }
}
