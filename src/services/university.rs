use super::entity::{EntityClient, Resource};
use crate::models::University;
use crate::session::ResourceKind;

impl Resource for University {
    const PATH: &'static str = "universities";
    const KIND: ResourceKind = ResourceKind::University;
}

pub type UniversityService = EntityClient<University>;
