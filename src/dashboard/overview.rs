use serde::Serialize;

use super::collections::Collections;
use crate::aggregate::{
    course_fill, current_university, enrolled_courses, resolve_current_student, scoped, scoped_admins,
    total_credits, CourseFill, EnrollmentStats, PlatformCounts, Resolved,
};
use crate::models::{Admin, Course, Enrollment, Student, University};
use crate::session::{Identity, Role};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseEntry {
    pub enrollment: Enrollment,
    pub course: Resolved<Course>,
    pub university: Resolved<University>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentOverview {
    pub student: Option<Student>,
    pub courses: Vec<CourseEntry>,
    pub enrolled_count: usize,
    pub total_credits: u32,
    pub current_year: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversityAdminOverview {
    pub university: Option<University>,
    pub students: Vec<Student>,
    pub courses: Vec<Course>,
    pub admins: Vec<Admin>,
    pub enrollments: Vec<Enrollment>,
    pub enrollment_stats: EnrollmentStats,
    pub course_fill: Vec<CourseFill>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperAdminOverview {
    pub counts: PlatformCounts,
    pub enrollment_stats: EnrollmentStats,
}

/// What the dashboard for the current role shows.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Overview {
    Student(StudentOverview),
    UniversityAdmin(UniversityAdminOverview),
    SuperAdmin(SuperAdminOverview),
}

impl Overview {
    pub fn derive(identity: &Identity, data: &Collections, enrollments: &[Enrollment]) -> Self {
        match identity.role {
            Role::Student => Overview::Student(StudentOverview::derive(identity, data, enrollments)),
            Role::UniversityAdmin => {
                Overview::UniversityAdmin(UniversityAdminOverview::derive(identity, data, enrollments))
            }
            Role::SuperAdmin => Overview::SuperAdmin(SuperAdminOverview {
                counts: data.counts(),
                enrollment_stats: EnrollmentStats::from_enrollments(enrollments),
            }),
        }
    }
}

impl StudentOverview {
    pub fn derive(identity: &Identity, data: &Collections, enrollments: &[Enrollment]) -> Self {
        let rows = enrolled_courses(
            identity,
            &data.students,
            enrollments,
            &data.courses,
            &data.universities,
        );
        let student = resolve_current_student(identity, &data.students).cloned();

        Self {
            current_year: student.as_ref().map(|s| s.year.clone()).filter(|y| !y.is_empty()),
            enrolled_count: rows.len(),
            total_credits: total_credits(&rows),
            courses: rows
                .into_iter()
                .map(|row| CourseEntry {
                    enrollment: row.enrollment.clone(),
                    course: row.course.cloned(),
                    university: row.university.cloned(),
                })
                .collect(),
            student,
        }
    }
}

impl UniversityAdminOverview {
    pub fn derive(identity: &Identity, data: &Collections, enrollments: &[Enrollment]) -> Self {
        let courses: Vec<Course> = scoped(identity, &data.courses).into_iter().cloned().collect();
        let enrollments: Vec<Enrollment> = scoped(identity, enrollments).into_iter().cloned().collect();

        Self {
            university: current_university(identity, &data.universities).cloned(),
            students: scoped(identity, &data.students).into_iter().cloned().collect(),
            admins: scoped_admins(identity, &data.universities, &data.admins)
                .into_iter()
                .cloned()
                .collect(),
            enrollment_stats: EnrollmentStats::from_enrollments(&enrollments),
            course_fill: courses.iter().map(|c| course_fill(c, &enrollments)).collect(),
            courses,
            enrollments,
        }
    }
}
