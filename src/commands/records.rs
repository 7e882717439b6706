use crate::api::ListQuery;
use crate::commands::{CommandContext, CommandResult};
use crate::error::{validation_error, AppResult, Error};
use crate::filter::{KindFilter, RecordFilter};
use crate::models::{
    Assessment, AttendanceRecord, CalendarEvent, ClassGroup, Course, Grade, Guardian, Listing,
    Program, Resource, ScheduleEntry, Searchable, Student, Teacher,
};
use crate::notify::Notice;
use crate::utils::table::{render_listing, render_record};
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

/// Collections reachable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Students,
    Guardians,
    Teachers,
    Programs,
    Courses,
    ClassGroups,
    Schedules,
    Attendance,
    Assessments,
    Grades,
    CalendarEvents,
}

impl ResourceKind {
    /// Collection key, as used by envelopes and the cache
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Students => Student::COLLECTION,
            ResourceKind::Guardians => Guardian::COLLECTION,
            ResourceKind::Teachers => Teacher::COLLECTION,
            ResourceKind::Programs => Program::COLLECTION,
            ResourceKind::Courses => Course::COLLECTION,
            ResourceKind::ClassGroups => ClassGroup::COLLECTION,
            ResourceKind::Schedules => ScheduleEntry::COLLECTION,
            ResourceKind::Attendance => AttendanceRecord::COLLECTION,
            ResourceKind::Assessments => Assessment::COLLECTION,
            ResourceKind::Grades => Grade::COLLECTION,
            ResourceKind::CalendarEvents => CalendarEvent::COLLECTION,
        }
    }
}

/// Run a generic operation for the record type behind a [`ResourceKind`]
macro_rules! for_resource {
    ($kind:expr, $op:ident($($arg:expr),*)) => {
        match $kind {
            ResourceKind::Students => $op::<Student>($($arg),*).await,
            ResourceKind::Guardians => $op::<Guardian>($($arg),*).await,
            ResourceKind::Teachers => $op::<Teacher>($($arg),*).await,
            ResourceKind::Programs => $op::<Program>($($arg),*).await,
            ResourceKind::Courses => $op::<Course>($($arg),*).await,
            ResourceKind::ClassGroups => $op::<ClassGroup>($($arg),*).await,
            ResourceKind::Schedules => $op::<ScheduleEntry>($($arg),*).await,
            ResourceKind::Attendance => $op::<AttendanceRecord>($($arg),*).await,
            ResourceKind::Assessments => $op::<Assessment>($($arg),*).await,
            ResourceKind::Grades => $op::<Grade>($($arg),*).await,
            ResourceKind::CalendarEvents => $op::<CalendarEvent>($($arg),*).await,
        }
    };
}

/// Options of the list command
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub search: Option<String>,
    pub kind: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Raw `key=value` filters
    pub filters: Vec<String>,
}

impl ListArgs {
    /// Server-side query; the search term is sent along and applied again locally
    pub fn to_query(&self) -> Result<ListQuery, Error> {
        let mut query = ListQuery::new();
        if let Some(search) = &self.search {
            query = query.search(search.as_str());
        }
        if let Some(page) = self.page {
            query = query.page(page);
        }
        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        for raw in &self.filters {
            let (field, value) =
                ListQuery::parse_filter(raw).ok_or_else(|| validation_error(["filter"]))?;
            query = query.filter(field, value);
        }
        Ok(query)
    }
}

pub async fn list(ctx: &CommandContext, kind: ResourceKind, args: &ListArgs) -> CommandResult {
    for_resource!(kind, list_records(ctx, args))
}

pub async fn show(ctx: &CommandContext, kind: ResourceKind, id: &str) -> CommandResult {
    for_resource!(kind, show_record(ctx, id))
}

pub async fn create(ctx: &CommandContext, kind: ResourceKind, data: &str) -> CommandResult {
    for_resource!(kind, create_record(ctx, data))
}

pub async fn update(ctx: &CommandContext, kind: ResourceKind, id: &str, data: &str) -> CommandResult {
    for_resource!(kind, update_record(ctx, id, data))
}

pub async fn patch(ctx: &CommandContext, kind: ResourceKind, id: &str, data: &str) -> CommandResult {
    for_resource!(kind, patch_record(ctx, id, data))
}

pub async fn delete(ctx: &CommandContext, kind: ResourceKind, id: &str) -> CommandResult {
    for_resource!(kind, delete_record(ctx, id))
}

/// Drop the offline copy of a collection
pub async fn forget_cached(ctx: &CommandContext, kind: ResourceKind) -> AppResult<()> {
    for_resource!(kind, forget_collection(ctx))
}

async fn forget_collection<T: Resource + Searchable>(ctx: &CommandContext) -> AppResult<()> {
    ctx.cached_repository::<T>().await.forget().await
}

/// Parse the `--data` argument
fn parse_data<T: DeserializeOwned>(data: &str) -> Result<T, Error> {
    serde_json::from_str(data).map_err(|e| {
        warn!("Rejected --data: {}", e);
        validation_error(["data"])
    })
}

async fn list_records<T: Resource + Searchable + Listing>(
    ctx: &CommandContext,
    args: &ListArgs,
) -> CommandResult {
    info!("Listing {}", T::COLLECTION);
    let query = args.to_query()?;
    let mut listed = ctx.cached_repository::<T>().await.list(&query).await?;

    let kind = KindFilter::parse(args.kind.as_deref());
    // The server knows nothing of the type filter, so its totals no longer apply
    let narrowed_locally = kind != KindFilter::All;
    let filter = RecordFilter::new(args.search.as_deref(), kind);
    listed.page.items = filter.retain(listed.page.items);

    ctx.render(&listed, |listed| {
        let mut lines = Vec::new();
        if listed.from_cache() {
            lines.push(Notice::served_from_cache().to_string());
        }
        if listed.page.is_empty() {
            lines.push(Notice::empty().to_string());
            return lines.join("\n");
        }
        lines.push(render_listing(&listed.page.items));
        if let Some(limit) = query.limit.filter(|_| !narrowed_locally) {
            let pages = listed.page.total_pages(limit).to_string();
            let page = listed.page.page.to_string();
            let total = listed.page.total_count.to_string();
            lines.push(String::new());
            lines.push(
                t!(
                    "list.page",
                    page = page.as_str(),
                    pages = pages.as_str(),
                    total = total.as_str()
                )
                .to_string(),
            );
        }
        lines.join("\n")
    })
}

async fn show_record<T: Resource + Listing>(ctx: &CommandContext, id: &str) -> CommandResult {
    let record = ctx.repository::<T>().get(id).await?;
    ctx.render(&record, render_record)
}

async fn create_record<T: Resource + Listing>(ctx: &CommandContext, data: &str) -> CommandResult {
    let record: T = parse_data(data)?;
    let created = ctx.repository::<T>().create(&record).await?;
    ctx.render(&created, |created| {
        format!("{}\n\n{}", Notice::created(), render_record(created))
    })
}

async fn update_record<T: Resource + Listing>(
    ctx: &CommandContext,
    id: &str,
    data: &str,
) -> CommandResult {
    let record: T = parse_data(data)?;
    let updated = ctx.repository::<T>().update(id, &record).await?;
    ctx.render(&updated, |updated| {
        format!("{}\n\n{}", Notice::updated(), render_record(updated))
    })
}

async fn patch_record<T: Resource + Listing>(
    ctx: &CommandContext,
    id: &str,
    data: &str,
) -> CommandResult {
    let changes: Value = parse_data(data)?;
    if !changes.is_object() {
        return Err(validation_error(["data"]));
    }
    let updated = ctx.repository::<T>().patch(id, &changes).await?;
    ctx.render(&updated, |updated| {
        format!("{}\n\n{}", Notice::updated(), render_record(updated))
    })
}

async fn delete_record<T: Resource>(ctx: &CommandContext, id: &str) -> CommandResult {
    ctx.repository::<T>().delete(id).await?;
    let notice = Notice::deleted();
    ctx.render(&notice, Notice::to_string)
}
