use crate::cli::commands::entity::user_error;
use crate::cli::context::{rng, ConsoleContext};
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::dashboard::{Dashboard, DashboardError, Overview, Snapshot};

pub(crate) async fn load_snapshot(ctx: &ConsoleContext, seed: Option<u64>) -> anyhow::Result<Snapshot> {
    let dashboard = Dashboard::new(&ctx.http);
    let mut rng = rng(seed);
    dashboard.load(&mut rng).await.map_err(|e| match e {
        DashboardError::Client(e) => user_error(e),
        other => anyhow::Error::new(other),
    })
}

pub async fn handle(seed: Option<u64>, ctx: &ConsoleContext, output_format: OutputFormat) -> anyhow::Result<()> {
    ctx.require_identity()?;
    let snapshot = load_snapshot(ctx, seed).await?;
    let overview = snapshot.overview();

    if let OutputFormat::Json = output_format {
        return print_json(&overview);
    }

    println!("Welcome, {} ({})", snapshot.identity.name, snapshot.identity.role);
    println!();
    match overview {
        Overview::Student(view) => {
            match &view.student {
                Some(student) => println!("Student {} · {} · year {}", student.student_code, student.major, student.year),
                None => println!("No student record matches {}", snapshot.identity.email),
            }
            println!("Enrolled courses: {}", view.enrolled_count);
            println!("Total credits:    {}", view.total_credits);
            if !view.courses.is_empty() {
                println!();
                let rows: Vec<Vec<String>> = view
                    .courses
                    .iter()
                    .map(|entry| {
                        let (course, credits) = match entry.course.found() {
                            Some(course) => (course.name.clone(), course.credits.to_string()),
                            None => (format!("#{} (not loaded)", entry.enrollment.course_id), "-".into()),
                        };
                        let university = entry
                            .university
                            .found()
                            .map(|u| u.name.clone())
                            .unwrap_or_else(|| "-".into());
                        vec![
                            course,
                            credits,
                            university,
                            entry.enrollment.status.to_string(),
                            format!("{}%", entry.enrollment.progress),
                        ]
                    })
                    .collect();
                print_table(&["COURSE", "CREDITS", "UNIVERSITY", "STATUS", "PROGRESS"], &rows);
            }
        }
        Overview::UniversityAdmin(view) => {
            match &view.university {
                Some(university) => println!("{} (est. {})", university.name, university.established_year),
                None => println!("University record not found"),
            }
            println!("Courses:     {}", view.courses.len());
            println!("Students:    {}", view.students.len());
            println!("Admins:      {}", view.admins.len());
            println!(
                "Enrollments: {} ({} pending)",
                view.enrollment_stats.total, view.enrollment_stats.pending
            );
            if !view.course_fill.is_empty() {
                println!();
                let rows: Vec<Vec<String>> = view
                    .course_fill
                    .iter()
                    .map(|fill| {
                        vec![
                            fill.course_name.clone(),
                            fill.enrolled.to_string(),
                            fill.capacity.map(|c| c.to_string()).unwrap_or_else(|| "-".into()),
                            fill.percent_full
                                .map(|p| format!("{}% full", p.round()))
                                .unwrap_or_else(|| "-".into()),
                        ]
                    })
                    .collect();
                print_table(&["COURSE", "ENROLLED", "CAPACITY", "FILL"], &rows);
            }
        }
        Overview::SuperAdmin(view) => {
            println!("Universities: {}", view.counts.universities);
            println!("Admins:       {}", view.counts.admins);
            println!("Courses:      {}", view.counts.courses);
            println!("Students:     {}", view.counts.students);
            println!("Total users:  {}", view.counts.total_users());
            println!(
                "Enrollments:  {} ({} pending)",
                view.enrollment_stats.total, view.enrollment_stats.pending
            );
        }
    }
    Ok(())
}
