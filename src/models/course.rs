use serde::{Deserialize, Serialize};

use super::{wire, EntityId, RecordStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "wire::optional_id")]
    pub id: Option<EntityId>,
    #[serde(rename = "courseName", default, deserialize_with = "wire::string")]
    pub name: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub description: String,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub credits: u32,
    #[serde(default, deserialize_with = "wire::string")]
    pub instructor: String,
    /// Owning university. `None` when the backend sends no usable reference.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "wire::optional_id")]
    pub university_id: Option<EntityId>,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub status: RecordStatus,
    /// Seat limit, when the backend tracks one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}
