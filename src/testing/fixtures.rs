use chrono::{TimeZone, Utc};

use crate::models::{Admin, Course, Enrollment, EnrollmentStatus, RecordStatus, Student, University};
use crate::session::{Identity, Role};

pub fn universities() -> Vec<University> {
    vec![
        University {
            id: Some(1),
            name: "State University".into(),
            established_year: "1965".into(),
            address: "1 College Ave".into(),
            status: RecordStatus::Active,
            admin_name: "Dana Lee".into(),
            student_count: 2,
            course_count: 2,
        },
        University {
            id: Some(2),
            name: "Tech Institute".into(),
            established_year: "2001".into(),
            address: "9 Circuit Rd".into(),
            status: RecordStatus::Active,
            admin_name: "Evan Park".into(),
            student_count: 1,
            course_count: 1,
        },
    ]
}

fn course(id: i64, name: &str, credits: u32, university_id: i64) -> Course {
    Course {
        id: Some(id),
        name: name.into(),
        description: format!("{name} lectures"),
        credits,
        instructor: "Dr. Grey".into(),
        university_id: Some(university_id),
        status: RecordStatus::Active,
        capacity: Some(30),
    }
}

pub fn courses() -> Vec<Course> {
    vec![
        course(101, "CS101", 3, 1),
        course(102, "MATH201", 4, 1),
        course(201, "PHYS301", 5, 2),
    ]
}

fn student(id: i64, code: &str, name: &str, email: &str, university_id: i64) -> Student {
    Student {
        id: Some(id),
        student_code: code.into(),
        full_name: name.into(),
        email: email.into(),
        major: "Computer Science".into(),
        year: "2".into(),
        phone: "555-0100".into(),
        university_id: Some(university_id),
        status: Some(RecordStatus::Active),
    }
}

pub fn students() -> Vec<Student> {
    vec![
        student(7, "S-2024-001", "Alice Smith", "alice@uni.edu", 1),
        student(8, "S-2024-002", "Bob Jones", "bob@uni.edu", 1),
        student(9, "T-2024-001", "Carol White", "carol@tech.edu", 2),
    ]
}

fn admin(id: i64, name: &str, university: &str) -> Admin {
    Admin {
        id: Some(id),
        name: name.into(),
        university_name: university.into(),
        role: "ADMIN".into(),
        status: RecordStatus::Active,
        email: format!("{}@lms.com", name.to_lowercase().replace(' ', ".")),
        phone: "555-0199".into(),
        department: "Registrar".into(),
        managed_students: 0,
    }
}

pub fn admins() -> Vec<Admin> {
    vec![
        admin(1, "Dana Lee", "State University"),
        admin(2, "Evan Park", "Tech Institute"),
    ]
}

fn enrollment(student_id: i64, course_id: i64, university_id: i64, status: EnrollmentStatus) -> Enrollment {
    let enrolled_at = Utc
        .with_ymd_and_hms(2024, 9, 1, 9, 0, 0)
        .single()
        .expect("valid fixture date");
    Enrollment {
        status,
        ..Enrollment::pending(student_id, course_id, university_id, enrolled_at)
    }
}

/// Alice: CS101 approved, MATH201 pending. Bob: CS101 pending, MATH201 completed.
/// Carol: PHYS301 rejected.
pub fn enrollments() -> Vec<Enrollment> {
    vec![
        enrollment(7, 101, 1, EnrollmentStatus::Approved),
        enrollment(7, 102, 1, EnrollmentStatus::Pending),
        enrollment(8, 101, 1, EnrollmentStatus::Pending),
        enrollment(8, 102, 1, EnrollmentStatus::Completed),
        enrollment(9, 201, 2, EnrollmentStatus::Rejected),
    ]
}

fn identity(id: &str, email: &str, name: &str, role: Role, university: Option<&str>) -> Identity {
    Identity {
        id: id.into(),
        email: email.into(),
        name: name.into(),
        role,
        university_id: university.map(str::to_string),
        student_id: None,
        created_at: Utc::now(),
    }
}

pub fn student_identity() -> Identity {
    identity("7", "alice@uni.edu", "Alice Smith", Role::Student, Some("1"))
}

pub fn university_admin_identity() -> Identity {
    identity("1", "admin@uni.edu", "Dana Lee", Role::UniversityAdmin, Some("1"))
}

pub fn super_admin_identity() -> Identity {
    identity("1", "superadmin@lms.com", "Super Administrator", Role::SuperAdmin, None)
}
