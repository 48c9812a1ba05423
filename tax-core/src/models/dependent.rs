use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dependent {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub relationship_to_taxpayer: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub months_lived_with: Option<u8>,
    pub is_student: bool,
    pub is_disabled: bool,
}
