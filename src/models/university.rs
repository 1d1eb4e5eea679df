use serde::{Deserialize, Serialize};

use super::{wire, EntityId, RecordStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct University {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "wire::optional_id")]
    pub id: Option<EntityId>,
    #[serde(rename = "uniName", default, deserialize_with = "wire::string")]
    pub name: String,
    #[serde(rename = "estYear", default, deserialize_with = "wire::string")]
    pub established_year: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub address: String,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub status: RecordStatus,
    #[serde(default, deserialize_with = "wire::string")]
    pub admin_name: String,
    #[serde(rename = "students", default, deserialize_with = "wire::or_default")]
    pub student_count: u32,
    #[serde(rename = "courses", default, deserialize_with = "wire::or_default")]
    pub course_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_field_names() {
        let university: University = serde_json::from_value(json!({
            "id": "1",
            "uniName": "State University",
            "estYear": 1965,
            "address": "1 College Ave",
            "status": "ACTIVE",
            "adminName": "Dana Lee",
            "students": 1200,
            "courses": 85
        }))
        .unwrap();

        assert_eq!(university.id, Some(1));
        assert_eq!(university.name, "State University");
        assert_eq!(university.established_year, "1965");
        assert_eq!(university.student_count, 1200);
    }

    #[test]
    fn new_records_omit_id() {
        let university = University {
            id: None,
            name: "Tech Institute".into(),
            established_year: "2001".into(),
            address: String::new(),
            status: RecordStatus::Inactive,
            admin_name: String::new(),
            student_count: 0,
            course_count: 0,
        };
        let value = serde_json::to_value(&university).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["status"], "INACTIVE");
        assert_eq!(value["uniName"], "Tech Institute");
    }
}
