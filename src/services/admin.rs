use super::entity::{EntityClient, Resource};
use crate::models::Admin;
use crate::session::ResourceKind;

impl Resource for Admin {
    const PATH: &'static str = "admins";
    const KIND: ResourceKind = ResourceKind::Admin;
}

pub type AdminService = EntityClient<Admin>;
