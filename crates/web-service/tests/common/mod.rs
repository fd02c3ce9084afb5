//! 测试用的内存仓库与事件记录器

#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use database::{
    DatabaseError, DatabaseResult, Organization, OrganizationRepositoryTrait, Project, ProjectRepositoryTrait, ProjectUser,
    ProjectUserRepositoryTrait,
};
use shared_lib::{PageRequest, PaginationConfig, SortDirection, SortField};
use std::sync::{Arc, Mutex};
use web_service::events::{DomainEvent, EventSink};
use web_service::services::ProjectService;

/// 按发生顺序记录写入与事件发布
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct InMemoryProjectRepository {
    projects: Mutex<Vec<Project>>,
    journal: Journal,
    /// 模拟并发创建：重名预检查永远查不到，只能依赖唯一约束
    blind_precheck: bool,
    /// 模拟数据库故障
    fail_writes: bool,
}

impl InMemoryProjectRepository {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            ..Default::default()
        }
    }

    pub fn with_blind_precheck(mut self) -> Self {
        self.blind_precheck = true;
        self
    }

    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn insert(&self, project: Project) {
        self.projects.lock().unwrap().push(project);
    }

    pub fn all(&self) -> Vec<Project> {
        self.projects.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ProjectRepositoryTrait for InMemoryProjectRepository {
    async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<Project>> {
        Ok(self.projects.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_name_and_organization(&self, name: &str, organization_id: &str) -> DatabaseResult<Option<Project>> {
        if self.blind_precheck {
            return Ok(None);
        }
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.name == name && p.organization_id == organization_id)
            .cloned())
    }

    async fn save(&self, project: Project) -> DatabaseResult<Project> {
        if self.fail_writes {
            return Err(DatabaseError::connection("connection reset by peer"));
        }

        let mut projects = self.projects.lock().unwrap();
        if projects
            .iter()
            .any(|p| p.name == project.name && p.organization_id == project.organization_id)
        {
            return Err(DatabaseError::UniqueViolation("uq_projects_organization_name".to_string()));
        }

        projects.push(project.clone());
        self.journal.record(format!("save:{}", project.name));
        Ok(project)
    }

    async fn find_page_by_organization(&self, organization_id: &str, page: &PageRequest) -> DatabaseResult<Vec<Project>> {
        let mut matching: Vec<Project> = self
            .projects
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.organization_id == organization_id)
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            let ordering = match page.sort_field {
                SortField::Id => a.id.cmp(&b.id),
                SortField::Name => a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)),
                SortField::CreatedAt => a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)),
            };
            match page.sort_direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        Ok(matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryOrganizationRepository {
    organizations: Vec<Organization>,
}

impl InMemoryOrganizationRepository {
    pub fn new(organizations: Vec<Organization>) -> Self {
        Self { organizations }
    }
}

#[async_trait::async_trait]
impl OrganizationRepositoryTrait for InMemoryOrganizationRepository {
    async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<Organization>> {
        Ok(self.organizations.iter().find(|o| o.id == id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryProjectUserRepository {
    grants: Vec<ProjectUser>,
}

impl InMemoryProjectUserRepository {
    pub fn new(grants: Vec<ProjectUser>) -> Self {
        Self { grants }
    }
}

#[async_trait::async_trait]
impl ProjectUserRepositoryTrait for InMemoryProjectUserRepository {
    async fn find_active_grant(&self, project_id: &str, user_id: &str) -> DatabaseResult<Option<ProjectUser>> {
        Ok(self
            .grants
            .iter()
            .find(|g| g.project_id == project_id && g.user_id == user_id && g.active)
            .cloned())
    }
}

/// 记录所有发布事件的事件发布器
#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<DomainEvent>>,
    journal: Journal,
}

impl RecordingEventSink {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            ..Default::default()
        }
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingEventSink {
    fn publish(&self, event: DomainEvent) {
        let DomainEvent::ProjectCreated(project) = &event;
        self.journal.record(format!("publish:{}", project.name));
        self.events.lock().unwrap().push(event);
    }
}

pub type TestProjectService =
    ProjectService<InMemoryProjectRepository, InMemoryOrganizationRepository, InMemoryProjectUserRepository, RecordingEventSink>;

pub const TEST_PAGINATION: PaginationConfig = PaginationConfig {
    default_page_size: 10,
    max_page_size: 50,
};

/// 测试夹具，持有服务以及各个仓库的引用，方便断言
pub struct Fixture {
    pub service: TestProjectService,
    pub projects: Arc<InMemoryProjectRepository>,
    pub events: Arc<RecordingEventSink>,
    pub journal: Journal,
}

pub fn organization(id: &str, active: bool) -> Organization {
    Organization {
        id: id.to_string(),
        name: format!("Organization {id}"),
        active,
    }
}

pub fn grant(project_id: &str, user_id: &str, active: bool) -> ProjectUser {
    ProjectUser {
        project_id: project_id.to_string(),
        user_id: user_id.to_string(),
        active,
    }
}

/// 创建时间按序号递增，便于验证排序
pub fn stored_project(id: &str, name: &str, organization_id: &str, seq: i64) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        organization_id: organization_id.to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(seq),
    }
}

pub struct FixtureBuilder {
    organizations: Vec<Organization>,
    grants: Vec<ProjectUser>,
    projects: Vec<Project>,
    blind_precheck: bool,
    failing_writes: bool,
}

impl Default for FixtureBuilder {
    fn default() -> Self {
        Self {
            organizations: vec![organization("org1", true), organization("org2", true), organization("dormant", false)],
            grants: Vec::new(),
            projects: Vec::new(),
            blind_precheck: false,
            failing_writes: false,
        }
    }
}

impl FixtureBuilder {
    pub fn grants(mut self, grants: Vec<ProjectUser>) -> Self {
        self.grants = grants;
        self
    }

    pub fn projects(mut self, projects: Vec<Project>) -> Self {
        self.projects = projects;
        self
    }

    pub fn blind_precheck(mut self) -> Self {
        self.blind_precheck = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.failing_writes = true;
        self
    }

    pub fn build(self) -> Fixture {
        let journal = Journal::default();

        let mut repository = InMemoryProjectRepository::new(journal.clone());
        if self.blind_precheck {
            repository = repository.with_blind_precheck();
        }
        if self.failing_writes {
            repository = repository.with_failing_writes();
        }
        for project in self.projects {
            repository.insert(project);
        }

        let projects = Arc::new(repository);
        let events = Arc::new(RecordingEventSink::new(journal.clone()));

        let service = ProjectService::new(
            Arc::clone(&projects),
            Arc::new(InMemoryOrganizationRepository::new(self.organizations)),
            Arc::new(InMemoryProjectUserRepository::new(self.grants)),
            Arc::clone(&events),
            TEST_PAGINATION,
        );

        Fixture {
            service,
            projects,
            events,
            journal,
        }
    }
}

pub fn fixture() -> Fixture {
    FixtureBuilder::default().build()
}
