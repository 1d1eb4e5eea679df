use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Course, Enrollment, EnrollmentStatus, Identified, Student};

/// Courses each student is enrolled in, taken from the front of their university's
/// course list.
pub const COURSES_PER_STUDENT: usize = 2;

const STATUS_POOL: [EnrollmentStatus; 4] = [
    EnrollmentStatus::Approved,
    EnrollmentStatus::Pending,
    EnrollmentStatus::Approved,
    EnrollmentStatus::Completed,
];

const GRADES: [&str; 4] = ["A", "B+", "A-", "B"];

const MAX_AGE_DAYS: i64 = 30;

/// Demo enrollments: every saved student in the first two saved courses of their own
/// university.
///
/// Deterministic for a seeded `rng` and fixed `now`. Students and courses without an id
/// are skipped since nothing can reference them, and so are students with no university.
pub fn generate_enrollments<R: Rng + ?Sized>(
    students: &[Student],
    courses: &[Course],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Enrollment> {
    let mut enrollments = Vec::with_capacity(students.len() * COURSES_PER_STUDENT);
    for student in students {
        let (Some(student_id), Some(university)) = (student.id(), student.university_id) else {
            continue;
        };
        let chosen = courses
            .iter()
            .filter(|course| course.university_id == Some(university))
            .filter_map(Identified::id)
            .take(COURSES_PER_STUDENT);

        for course_id in chosen {
            let age = Duration::seconds(rng.gen_range(0..MAX_AGE_DAYS * 24 * 60 * 60));
            let status = *STATUS_POOL.choose(rng).unwrap_or(&EnrollmentStatus::Pending);
            let grade = if rng.gen_bool(0.5) {
                GRADES.choose(rng).map(|g| g.to_string())
            } else {
                None
            };
            enrollments.push(Enrollment {
                status,
                grade,
                progress: rng.gen_range(0..100),
                ..Enrollment::pending(student_id, course_id, university, now - age)
            });
        }
    }
    enrollments
}
