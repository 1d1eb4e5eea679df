use serde::Serialize;

use super::join::{Lookup, Resolved};
use crate::models::{Course, Enrollment, Identified, Student, University};
use crate::session::Identity;

/// One row of "my courses".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourse<'a> {
    pub enrollment: &'a Enrollment,
    pub course: Resolved<&'a Course>,
    pub university: Resolved<&'a University>,
}

impl EnrolledCourse<'_> {
    pub fn credits(&self) -> u32 {
        self.course.found().map_or(0, |course| course.credits)
    }
}

/// The student record behind an identity.
///
/// The identity's registration code wins when a student carries exactly that code;
/// otherwise the first student with exactly the identity's email.
pub fn resolve_current_student<'a>(identity: &Identity, students: &'a [Student]) -> Option<&'a Student> {
    let by_code = identity
        .student_id
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .and_then(|code| students.iter().find(|s| s.student_code == code));
    by_code.or_else(|| students.iter().find(|s| s.email == identity.email))
}

/// The identity's own enrollments, in source order. Empty when no student record matches.
pub fn student_enrollments<'a>(
    identity: &Identity,
    students: &[Student],
    enrollments: &'a [Enrollment],
) -> Vec<&'a Enrollment> {
    let Some(student_id) = resolve_current_student(identity, students).and_then(|s| s.id()) else {
        return Vec::new();
    };
    enrollments
        .iter()
        .filter(|enrollment| enrollment.student_id == student_id)
        .collect()
}

/// Enrollments of the identity's student joined to course and university, in source order.
pub fn enrolled_courses<'a>(
    identity: &Identity,
    students: &[Student],
    enrollments: &'a [Enrollment],
    courses: &'a [Course],
    universities: &'a [University],
) -> Vec<EnrolledCourse<'a>> {
    let courses = Lookup::new(courses);
    let universities = Lookup::new(universities);

    student_enrollments(identity, students, enrollments)
        .into_iter()
        .map(|enrollment| EnrolledCourse {
            enrollment,
            course: courses.resolve(enrollment.course_id),
            university: universities.resolve(enrollment.university_id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn only_the_students_own_enrollments_in_source_order() {
        let identity = fixtures::student_identity();
        let students = fixtures::students();
        let enrollments = fixtures::enrollments();
        let courses = fixtures::courses();
        let universities = fixtures::universities();

        let rows = enrolled_courses(&identity, &students, &enrollments, &courses, &universities);
        let ids: Vec<&str> = rows.iter().map(|r| r.enrollment.id.as_str()).collect();
        assert_eq!(ids, vec!["7-101", "7-102"]);
        assert!(rows.iter().all(|r| r.enrollment.student_id == 7));
        assert_eq!(rows.iter().map(EnrolledCourse::credits).sum::<u32>(), 7);
    }

    #[test]
    fn no_matching_student_means_no_courses() {
        let mut identity = fixtures::student_identity();
        identity.email = "nobody@uni.edu".into();
        let students = fixtures::students();
        let enrollments = fixtures::enrollments();
        let courses = fixtures::courses();
        let universities = fixtures::universities();

        let rows = enrolled_courses(&identity, &students, &enrollments, &courses, &universities);
        assert!(rows.is_empty());
        assert!(student_enrollments(&identity, &students, &enrollments).is_empty());
    }

    #[test]
    fn email_match_is_case_sensitive() {
        let mut identity = fixtures::student_identity();
        identity.email = "Alice@uni.edu".into();
        assert!(resolve_current_student(&identity, &fixtures::students()).is_none());
    }

    #[test]
    fn registration_code_takes_precedence_over_email() {
        let mut identity = fixtures::student_identity();
        identity.student_id = Some("S-2024-002".into());
        let students = fixtures::students();
        let student = resolve_current_student(&identity, &students).unwrap();
        assert_eq!(student.full_name, "Bob Jones");
    }

    #[test]
    fn numeric_code_is_not_a_record_id() {
        let mut identity = fixtures::student_identity();
        // Bob's record id, but no student carries it as a registration code
        identity.student_id = Some("8".into());
        let students = fixtures::students();
        let student = resolve_current_student(&identity, &students).unwrap();
        assert_eq!(student.full_name, "Alice Smith");

        let enrollments = fixtures::enrollments();
        let own = student_enrollments(&identity, &students, &enrollments);
        assert!(own.iter().all(|e| e.student_id == 7));
    }

    #[test]
    fn numeric_registration_code_matches_by_code() {
        let mut students = fixtures::students();
        students[2].student_code = "8".into();
        let mut identity = fixtures::student_identity();
        identity.student_id = Some("8".into());
        let student = resolve_current_student(&identity, &students).unwrap();
        assert_eq!(student.full_name, "Carol White");
    }

    #[test]
    fn dangling_course_is_reported_not_dropped() {
        let identity = fixtures::student_identity();
        let students = fixtures::students();
        let mut enrollments = fixtures::enrollments();
        enrollments.push(Enrollment::pending(7, 999, 1, chrono::Utc::now()));
        let courses = fixtures::courses();
        let universities = fixtures::universities();

        let rows = enrolled_courses(&identity, &students, &enrollments, &courses, &universities);
        let last = rows.last().unwrap();
        assert_eq!(last.course, Resolved::Unresolved { id: 999 });
        assert_eq!(last.credits(), 0);
        assert!(last.university.is_found());
    }
}
