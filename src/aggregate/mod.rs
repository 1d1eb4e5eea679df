//! Role-scoped views derived from independently fetched collections.
//!
//! Everything here is a pure function of its inputs: no network, no hidden state, and
//! no panics on missing or dangling references. A reference that does not resolve comes
//! back as [`Resolved::Unresolved`] so each view picks its own skip-or-placeholder policy.

pub mod book;
pub mod error;
pub mod filter;
pub mod generate;
pub mod join;
pub mod scope;
pub mod stats;
pub mod student_view;

pub use book::EnrollmentBook;
pub use error::EnrollmentError;
pub use filter::{enrollment_rows, CourseFilter, EnrollmentQuery, EnrollmentRow, StatusFilter};
pub use generate::generate_enrollments;
pub use join::{Lookup, Resolved};
pub use scope::{current_university, scoped, scoped_admins};
pub use stats::{course_fill, percent_full, total_credits, CourseFill, EnrollmentStats, PlatformCounts};
pub use student_view::{enrolled_courses, resolve_current_student, student_enrollments, EnrolledCourse};
