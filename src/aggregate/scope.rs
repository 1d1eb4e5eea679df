use crate::models::{Admin, Identified, University, UniversityOwned};
use crate::session::Identity;

/// Items owned by the identity's university. Empty when the identity has no numeric
/// university reference.
pub fn scoped<'a, T: UniversityOwned>(identity: &Identity, items: &'a [T]) -> Vec<&'a T> {
    let Some(university) = identity.university_ref() else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| item.university_ref() == Some(university))
        .collect()
}

pub fn current_university<'a>(identity: &Identity, universities: &'a [University]) -> Option<&'a University> {
    let id = identity.university_ref()?;
    universities.iter().find(|u| u.id() == Some(id))
}

/// Admins are linked to universities by name, so the identity's university must be
/// loaded to scope them.
pub fn scoped_admins<'a>(
    identity: &Identity,
    universities: &[University],
    admins: &'a [Admin],
) -> Vec<&'a Admin> {
    let Some(university) = current_university(identity, universities) else {
        return Vec::new();
    };
    admins
        .iter()
        .filter(|admin| admin.university_name == university.name)
        .collect()
}
