use serde::{Deserialize, Serialize};

use super::{wire, EntityId, RecordStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "wire::optional_id")]
    pub id: Option<EntityId>,
    /// Registration code printed on the student card, e.g. "S-2024-001"
    #[serde(rename = "studentId", default, deserialize_with = "wire::string")]
    pub student_code: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub full_name: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub email: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub major: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub year: String,
    #[serde(rename = "phoneNumber", default, deserialize_with = "wire::string")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "wire::optional_id")]
    pub university_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}
