use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::cli::context::ConsoleContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::error::ClientError;
use crate::models::{Admin, Course, EntityId, Student, University};
use crate::services::{EntityClient, Resource};

#[derive(Subcommand)]
pub enum EntityCommands {
    #[command(about = "List all records")]
    List,

    #[command(about = "Show one record")]
    Show {
        #[arg(help = "Record ID")]
        id: EntityId,
    },

    #[command(about = "Create a record from JSON")]
    Create {
        #[arg(long, help = "Record as JSON, using the backend's field names")]
        data: String,
    },

    #[command(about = "Replace a record from JSON")]
    Update {
        #[arg(help = "Record ID")]
        id: EntityId,
        #[arg(long, help = "Record as JSON, using the backend's field names")]
        data: String,
    },

    #[command(about = "Delete a record")]
    Delete {
        #[arg(help = "Record ID")]
        id: EntityId,
    },
}

/// Text-mode rendering of a record.
pub trait TableRow {
    const COLLECTION: &'static str;
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

pub async fn handle<T>(cmd: EntityCommands, ctx: &ConsoleContext, output_format: OutputFormat) -> anyhow::Result<()>
where
    T: Resource + TableRow,
{
    let client = EntityClient::<T>::new(ctx.http.clone());

    match cmd {
        EntityCommands::List => {
            ctx.require_view(T::KIND)?;
            let records = client.list().await.map_err(user_error)?;
            if records.is_empty() {
                return output_empty_collection(output_format, T::COLLECTION, &format!("No {} found", T::COLLECTION));
            }
            match output_format {
                OutputFormat::Json => {
                    let collection = T::COLLECTION;
                    print_json(&json!({ collection: records }))
                }
                OutputFormat::Text => {
                    let rows: Vec<Vec<String>> = records.iter().map(T::cells).collect();
                    print_table(T::HEADERS, &rows);
                    Ok(())
                }
            }
        }

        EntityCommands::Show { id } => {
            ctx.require_view(T::KIND)?;
            let record = client.get_by_id(id).await.map_err(user_error)?;
            match output_format {
                OutputFormat::Json => print_json(&record),
                OutputFormat::Text => {
                    for (header, cell) in T::HEADERS.iter().zip(record.cells()) {
                        println!("{:<12} {}", format!("{}:", header), cell);
                    }
                    Ok(())
                }
            }
        }

        EntityCommands::Create { data } => {
            ctx.require_manage(T::KIND)?;
            let record: T = parse_record(&data)?;
            let created = client.create(record).await.map_err(user_error)?;
            output_success(
                output_format,
                &format!("{} created", T::KIND),
                Some(json!({ "record": created })),
            )
        }

        EntityCommands::Update { id, data } => {
            ctx.require_manage(T::KIND)?;
            let record: T = parse_record(&data)?;
            let updated = client.update(id, &record).await.map_err(user_error)?;
            output_success(
                output_format,
                &format!("{} {} updated", T::KIND, id),
                Some(json!({ "record": updated })),
            )
        }

        EntityCommands::Delete { id } => {
            ctx.require_manage(T::KIND)?;
            client.delete(id).await.map_err(user_error)?;
            output_success(output_format, &format!("{} {} deleted", T::KIND, id), None)
        }
    }
}

fn parse_record<T: Resource>(data: &str) -> anyhow::Result<T> {
    serde_json::from_str(data).with_context(|| format!("--data is not a valid {} record", T::KIND))
}

/// Show the user-facing message, keep the transport error in the chain for `CLI_VERBOSE`.
pub(crate) fn user_error(e: ClientError) -> anyhow::Error {
    let message = e.user_message();
    anyhow::Error::new(e).context(message)
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

impl TableRow for University {
    const COLLECTION: &'static str = "universities";
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "EST.", "STATUS", "ADMIN", "STUDENTS", "COURSES"];

    fn cells(&self) -> Vec<String> {
        vec![
            optional(self.id),
            self.name.clone(),
            self.established_year.clone(),
            self.status.as_str().to_string(),
            self.admin_name.clone(),
            self.student_count.to_string(),
            self.course_count.to_string(),
        ]
    }
}

impl TableRow for Course {
    const COLLECTION: &'static str = "courses";
    const HEADERS: &'static [&'static str] =
        &["ID", "NAME", "CREDITS", "INSTRUCTOR", "UNIVERSITY", "STATUS", "CAPACITY"];

    fn cells(&self) -> Vec<String> {
        vec![
            optional(self.id),
            self.name.clone(),
            self.credits.to_string(),
            self.instructor.clone(),
            optional(self.university_id),
            self.status.as_str().to_string(),
            optional(self.capacity),
        ]
    }
}

impl TableRow for Student {
    const COLLECTION: &'static str = "students";
    const HEADERS: &'static [&'static str] = &["ID", "CODE", "NAME", "EMAIL", "MAJOR", "YEAR", "UNIVERSITY"];

    fn cells(&self) -> Vec<String> {
        vec![
            optional(self.id),
            self.student_code.clone(),
            self.full_name.clone(),
            self.email.clone(),
            self.major.clone(),
            self.year.clone(),
            optional(self.university_id),
        ]
    }
}

impl TableRow for Admin {
    const COLLECTION: &'static str = "admins";
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "UNIVERSITY", "ROLE", "STATUS", "EMAIL", "DEPARTMENT"];

    fn cells(&self) -> Vec<String> {
        vec![
            optional(self.id),
            self.name.clone(),
            self.university_name.clone(),
            self.role.clone(),
            self.status.as_str().to_string(),
            self.email.clone(),
            self.department.clone(),
        ]
    }
}
