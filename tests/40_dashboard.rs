mod common;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use lms_console::aggregate::Resolved;
use lms_console::dashboard::{Dashboard, DashboardError, Overview};
use lms_console::error::ClientError;

#[tokio::test]
async fn student_sees_own_courses_and_credits() -> Result<()> {
    let (server, console) = common::logged_in("alice@uni.edu").await?;

    let snapshot = Dashboard::new(&console.http)
        .load(&mut StdRng::seed_from_u64(7))
        .await?;

    let Overview::Student(overview) = snapshot.overview() else {
        panic!("expected student overview");
    };
    let student = overview.student.expect("own student record");
    assert_eq!(student.full_name, "Alice Smith");
    assert_eq!(overview.current_year.as_deref(), Some("2"));
    assert_eq!(overview.enrolled_count, 2);
    assert_eq!(overview.total_credits, 3 + 4);
    assert!(overview
        .courses
        .iter()
        .all(|entry| matches!(entry.course, Resolved::Found(_))));

    assert_eq!(server.backend.calls("GET /admins"), 0);
    assert_eq!(server.backend.calls("GET /students"), 1);
    Ok(())
}

#[tokio::test]
async fn university_admin_view_is_scoped() -> Result<()> {
    let (_server, console) = common::logged_in("admin@uni.edu").await?;

    let snapshot = Dashboard::new(&console.http)
        .load(&mut StdRng::seed_from_u64(11))
        .await?;
    let Overview::UniversityAdmin(overview) = snapshot.overview() else {
        panic!("expected university admin overview");
    };

    assert_eq!(overview.university.unwrap().name, "State University");
    assert_eq!(overview.students.len(), 2);
    assert_eq!(overview.courses.len(), 2);
    assert_eq!(overview.admins.len(), 1);
    assert_eq!(overview.admins[0].name, "Dana Lee");
    assert_eq!(overview.enrollments.len(), 4);
    assert_eq!(overview.enrollment_stats.total, 4);
    assert_eq!(overview.course_fill.len(), 2);
    Ok(())
}

#[tokio::test]
async fn super_admin_sees_platform_totals() -> Result<()> {
    let (_server, console) = common::logged_in("superadmin@lms.com").await?;

    let snapshot = Dashboard::new(&console.http)
        .load(&mut StdRng::seed_from_u64(3))
        .await?;
    let overview = snapshot.overview();

    let json = serde_json::to_value(&overview)?;
    assert_eq!(json["role"], "super_admin");

    let Overview::SuperAdmin(overview) = overview else {
        panic!("expected super admin overview");
    };
    assert_eq!(overview.counts.universities, 2);
    assert_eq!(overview.counts.students, 3);
    assert_eq!(overview.counts.courses, 3);
    assert_eq!(overview.counts.admins, 2);
    assert_eq!(overview.counts.total_users(), 6);
    assert_eq!(overview.enrollment_stats.total, 5);
    Ok(())
}

#[tokio::test]
async fn one_failing_collection_fails_the_whole_load() -> Result<()> {
    let (server, console) = common::logged_in("superadmin@lms.com").await?;
    server.backend.fail_collection("courses");

    let err = Dashboard::new(&console.http)
        .load(&mut StdRng::seed_from_u64(1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DashboardError::Client(ClientError::Status { status: 500, .. })
    ));
    // Server errors leave the session alone
    assert!(console.store.current().is_some());
    Ok(())
}

#[tokio::test]
async fn anonymous_load_is_refused_without_network() -> Result<()> {
    let server = common::spawn_backend().await?;
    let console = common::Console::connect(&server.base_url)?;

    let err = Dashboard::new(&console.http)
        .load(&mut StdRng::seed_from_u64(1))
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::NotAuthenticated));
    assert_eq!(server.backend.total_calls(), 0);
    Ok(())
}
