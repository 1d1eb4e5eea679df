use anyhow::anyhow;
use chrono::Utc;
use clap::Subcommand;
use serde_json::json;

use crate::aggregate::{
    enrollment_rows, resolve_current_student, scoped, student_enrollments, CourseFilter, EnrollmentBook,
    EnrollmentQuery, EnrollmentStats, Lookup, StatusFilter,
};
use crate::cli::commands::dashboard::load_snapshot;
use crate::cli::context::ConsoleContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::dashboard::Snapshot;
use crate::models::{Enrollment, EntityId, EnrollmentStatus};
use crate::session::{ResourceKind, Role};

#[derive(Subcommand)]
pub enum EnrollmentCommands {
    #[command(about = "List enrollments visible to the current user")]
    List {
        #[arg(long, default_value = "", help = "Match student name, email or course name")]
        search: String,
        #[arg(long, default_value = "all", help = "pending, approved, rejected, completed or all")]
        status: StatusFilter,
        #[arg(long, default_value = "all", help = "Course ID or all")]
        course: CourseFilter,
        #[arg(long, help = "Seed for simulated enrollments")]
        seed: Option<u64>,
    },

    #[command(about = "Counts per enrollment status")]
    Stats {
        #[arg(long, help = "Seed for simulated enrollments")]
        seed: Option<u64>,
    },

    #[command(about = "Approve a pending enrollment")]
    Approve {
        #[arg(help = "Enrollment ID, e.g. 7-101")]
        id: String,
        #[arg(long, help = "Seed for simulated enrollments")]
        seed: Option<u64>,
    },

    #[command(about = "Reject a pending enrollment")]
    Reject {
        #[arg(help = "Enrollment ID, e.g. 7-101")]
        id: String,
        #[arg(long, help = "Seed for simulated enrollments")]
        seed: Option<u64>,
    },

    #[command(about = "Enroll yourself in a course of your university (students only)")]
    Enroll {
        #[arg(help = "Course ID")]
        course: EntityId,
        #[arg(long, help = "Seed for simulated enrollments")]
        seed: Option<u64>,
    },
}

pub async fn handle(cmd: EnrollmentCommands, ctx: &ConsoleContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        EnrollmentCommands::List {
            search,
            status,
            course,
            seed,
        } => {
            ctx.require_view(ResourceKind::Enrollment)?;
            let snapshot = load_snapshot(ctx, seed).await?;
            let visible = visible_enrollments(&snapshot);

            let rows = enrollment_rows(&visible, &snapshot.collections.students, &snapshot.collections.courses);
            let query = EnrollmentQuery { search, status, course };
            let hits = query.apply(&rows);

            if hits.is_empty() {
                return output_empty_collection(output_format, "enrollments", "No enrollments match");
            }
            match output_format {
                OutputFormat::Json => print_json(&json!({ "enrollments": hits })),
                OutputFormat::Text => {
                    let table: Vec<Vec<String>> = hits
                        .iter()
                        .map(|row| {
                            vec![
                                row.enrollment.id.clone(),
                                row.student.label(|s| s.full_name.as_str()),
                                row.student.found().map_or_else(|| "-".to_string(), |s| s.email.clone()),
                                row.course.label(|c| c.name.as_str()),
                                row.enrollment.status.to_string(),
                                row.enrollment.grade.clone().unwrap_or_else(|| "-".into()),
                                format!("{}%", row.enrollment.progress),
                                row.enrollment.enrolled_at.format("%Y-%m-%d").to_string(),
                            ]
                        })
                        .collect();
                    print_table(
                        &["ID", "STUDENT", "EMAIL", "COURSE", "STATUS", "GRADE", "PROGRESS", "ENROLLED"],
                        &table,
                    );
                    Ok(())
                }
            }
        }

        EnrollmentCommands::Stats { seed } => {
            ctx.require_view(ResourceKind::Enrollment)?;
            let snapshot = load_snapshot(ctx, seed).await?;
            let stats = EnrollmentStats::from_enrollments(&visible_enrollments(&snapshot));
            match output_format {
                OutputFormat::Json => print_json(&stats),
                OutputFormat::Text => {
                    println!("Total:     {}", stats.total);
                    println!("Pending:   {}", stats.pending);
                    println!("Approved:  {}", stats.approved);
                    println!("Completed: {}", stats.completed);
                    println!("Rejected:  {}", stats.rejected);
                    Ok(())
                }
            }
        }

        EnrollmentCommands::Approve { id, seed } => {
            decide(ctx, &id, EnrollmentStatus::Approved, seed, output_format).await
        }

        EnrollmentCommands::Reject { id, seed } => {
            decide(ctx, &id, EnrollmentStatus::Rejected, seed, output_format).await
        }

        EnrollmentCommands::Enroll { course, seed } => enroll(ctx, course, seed, output_format).await,
    }
}

async fn enroll(
    ctx: &ConsoleContext,
    course_id: EntityId,
    seed: Option<u64>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let identity = ctx.require_identity()?;
    if !ctx.session.capabilities().can_enroll() {
        return Err(anyhow!("role {} cannot enroll in courses", identity.role));
    }
    let snapshot = load_snapshot(ctx, seed).await?;
    let student = resolve_current_student(&snapshot.identity, &snapshot.collections.students)
        .ok_or_else(|| anyhow!("no student record matches {}", snapshot.identity.email))?;
    let course = Lookup::new(&snapshot.collections.courses)
        .get(course_id)
        .ok_or_else(|| anyhow!("course {} not found", course_id))?;

    let mut book = EnrollmentBook::new(visible_enrollments(&snapshot));
    let created = book.enroll(student, course, Utc::now())?;
    output_success(
        output_format,
        &format!("Enrolled in {} ({}), awaiting approval", course.name, created.id),
        Some(json!({ "enrollment": created })),
    )
}

async fn decide(
    ctx: &ConsoleContext,
    id: &str,
    status: EnrollmentStatus,
    seed: Option<u64>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    ctx.require_manage(ResourceKind::Enrollment)?;
    let snapshot = load_snapshot(ctx, seed).await?;
    let mut book = EnrollmentBook::new(visible_enrollments(&snapshot));
    let updated = book.set_status(id, status)?;
    output_success(
        output_format,
        &format!("Enrollment {} {}", updated.id, updated.status),
        Some(json!({ "enrollment": updated })),
    )
}

/// Super admins see every enrollment, university admins their university's, students their own.
fn visible_enrollments(snapshot: &Snapshot) -> Vec<Enrollment> {
    let identity = &snapshot.identity;
    match identity.role {
        Role::SuperAdmin => snapshot.enrollments.clone(),
        Role::UniversityAdmin => scoped(identity, &snapshot.enrollments).into_iter().cloned().collect(),
        Role::Student => student_enrollments(identity, &snapshot.collections.students, &snapshot.enrollments)
            .into_iter()
            .cloned()
            .collect(),
    }
}
