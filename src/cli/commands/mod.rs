pub mod auth;
pub mod dashboard;
pub mod database;
pub mod enrollment;
pub mod entity;
pub mod tenant;
