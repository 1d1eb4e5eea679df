use tracing::debug;

use crate::aggregate::PlatformCounts;
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::models::{Admin, Course, Student, University};
use crate::services::{AdminService, CourseService, StudentService, UniversityService};
use crate::session::{Capabilities, ResourceKind};

/// One client per entity collection, all sharing the same HTTP client and session.
#[derive(Clone)]
pub struct ServiceClients {
    pub universities: UniversityService,
    pub courses: CourseService,
    pub students: StudentService,
    pub admins: AdminService,
}

impl ServiceClients {
    pub fn new(http: &HttpClient) -> Self {
        Self {
            universities: UniversityService::new(http.clone()),
            courses: CourseService::new(http.clone()),
            students: StudentService::new(http.clone()),
            admins: AdminService::new(http.clone()),
        }
    }
}

/// Flat collections loaded for one dashboard render.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub universities: Vec<University>,
    pub courses: Vec<Course>,
    pub students: Vec<Student>,
    pub admins: Vec<Admin>,
}

impl Collections {
    /// Fetch every collection `capabilities` may view, concurrently. If any fetch fails
    /// the whole batch fails and nothing is returned.
    pub async fn fetch(clients: &ServiceClients, capabilities: Capabilities) -> Result<Self, ClientError> {
        let wants = |kind| capabilities.can_view(kind);

        let (universities, courses, students, admins) = futures::try_join!(
            load(wants(ResourceKind::University), clients.universities.list()),
            load(wants(ResourceKind::Course), clients.courses.list()),
            // Students need the student list to find their own record
            load(
                wants(ResourceKind::Student) || capabilities.can_enroll(),
                clients.students.list()
            ),
            load(wants(ResourceKind::Admin), clients.admins.list()),
        )?;

        debug!(
            universities = universities.len(),
            courses = courses.len(),
            students = students.len(),
            admins = admins.len(),
            "collections loaded"
        );

        Ok(Self {
            universities,
            courses,
            students,
            admins,
        })
    }

    pub fn counts(&self) -> PlatformCounts {
        PlatformCounts {
            universities: self.universities.len(),
            students: self.students.len(),
            courses: self.courses.len(),
            admins: self.admins.len(),
        }
    }
}

async fn load<T, F>(wanted: bool, fetch: F) -> Result<Vec<T>, ClientError>
where
    F: std::future::Future<Output = Result<Vec<T>, ClientError>>,
{
    if wanted {
        fetch.await
    } else {
        Ok(Vec::new())
    }
}
