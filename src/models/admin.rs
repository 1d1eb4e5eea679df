use serde::{Deserialize, Serialize};

use super::{wire, EntityId, RecordStatus};

/// University administrator. The backend links admins to their university by name, not id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "wire::optional_id")]
    pub id: Option<EntityId>,
    #[serde(rename = "adminName", default, deserialize_with = "wire::string")]
    pub name: String,
    #[serde(rename = "uniName", default, deserialize_with = "wire::string")]
    pub university_name: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub role: String,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub status: RecordStatus,
    #[serde(default, deserialize_with = "wire::string")]
    pub email: String,
    #[serde(rename = "phnnum", default, deserialize_with = "wire::string")]
    pub phone: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub department: String,
    #[serde(rename = "students", default, deserialize_with = "wire::or_default")]
    pub managed_students: u32,
}
