use super::entity::{EntityClient, Resource};
use crate::models::Student;
use crate::session::ResourceKind;

impl Resource for Student {
    const PATH: &'static str = "students";
    const KIND: ResourceKind = ResourceKind::Student;
}

pub type StudentService = EntityClient<Student>;
