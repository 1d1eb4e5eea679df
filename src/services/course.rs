use super::entity::{EntityClient, Resource};
use crate::models::Course;
use crate::session::ResourceKind;

impl Resource for Course {
    const PATH: &'static str = "courses";
    const KIND: ResourceKind = ResourceKind::Course;
}

pub type CourseService = EntityClient<Course>;
