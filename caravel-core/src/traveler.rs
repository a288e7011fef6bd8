use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Conventional gender value the chat layer supplies when a gender keyword
/// is present without an explicit value.
pub const DEFAULT_GENDER: &str = "MALE";

/// Traveler fields as extracted from free text; anything the message did not
/// carry stays `None` until validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelerDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
}

impl TravelerDraft {
    /// Names of required fields the draft is still missing, in declaration
    /// order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.first_name.is_none() {
            missing.push("first_name");
        }
        if self.last_name.is_none() {
            missing.push("last_name");
        }
        if self.email.is_none() {
            missing.push("email");
        }
        if self.phone.is_none() {
            missing.push("phone");
        }
        if self.date_of_birth.is_none() {
            missing.push("date_of_birth");
        }
        if self.gender.is_none() {
            missing.push("gender");
        }
        missing
    }

    /// Promote the draft to a validated traveler, or report exactly the
    /// missing fields. The phone number is reduced to digits and common
    /// punctuation; gender is taken verbatim with no normalization check.
    pub fn validate(self) -> Result<Traveler, Vec<&'static str>> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(missing);
        }

        let phone = self
            .phone
            .unwrap_or_default()
            .chars()
            .filter(|c| c.is_ascii_digit() || "+-() ".contains(*c))
            .collect::<String>()
            .trim()
            .to_string();

        Ok(Traveler {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone,
            date_of_birth: self.date_of_birth.unwrap_or_default(),
            gender: self.gender.unwrap_or_default(),
        })
    }
}

/// A fully validated traveler identity, as persisted on a booking record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Traveler {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
}

impl Traveler {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
