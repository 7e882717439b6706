use crate::api::ApiTransport;
use crate::calendar::{today_in, CalendarView};
use crate::config::Config;
use crate::error::AppResult;
use crate::repository::{CacheStore, CachedRepository, FallbackPolicy, Repository};
use crate::models::{Resource, Searchable};
use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

// Export submodules
pub mod calendar;
pub mod records;
pub mod reports;
pub mod util;

pub use records::ResourceKind;

/// Shared context for all commands
pub struct CommandContext {
    pub config: Arc<RwLock<Config>>,
    pub transport: Arc<dyn ApiTransport>,
    pub store: Arc<dyn CacheStore>,
    /// Print JSON instead of text
    pub json: bool,
    today: Option<NaiveDate>,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(
        config: Arc<RwLock<Config>>,
        transport: Arc<dyn ApiTransport>,
        store: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            config,
            transport,
            store,
            json: false,
            today: None,
        }
    }

    /// Switch JSON output on or off
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Pin "today", instead of reading the clock in the configured time zone
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Today's date in the configured time zone
    pub async fn today(&self) -> AppResult<NaiveDate> {
        if let Some(today) = self.today {
            return Ok(today);
        }
        let tz = self.config.read().await.tz()?;
        Ok(today_in(tz))
    }

    /// Plain repository for a record type
    pub fn repository<T: Resource>(&self) -> Repository<T> {
        Repository::new(Arc::clone(&self.transport))
    }

    /// Repository with the fallback cache, when enabled for the collection
    pub async fn cached_repository<T: Resource + Searchable>(&self) -> CachedRepository<T> {
        let policy = if self.config.read().await.is_cached(T::COLLECTION) {
            FallbackPolicy::WhenUnavailable
        } else {
            FallbackPolicy::Never
        };
        CachedRepository::new(self.repository(), Arc::clone(&self.store), policy)
    }

    /// Render a value as pretty JSON, or as text through `text`
    pub fn render<T: Serialize>(&self, value: &T, text: impl FnOnce(&T) -> String) -> CommandResult {
        if self.json {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(text(value))
        }
    }
}

/// Type alias for command result: the output to print
pub type CommandResult = AppResult<String>;

/// On/off switch on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

/// All commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the API answers
    Ping,
    /// Overview of students, teachers, class groups and this week's events
    Dashboard,
    /// List records of a collection
    List {
        resource: ResourceKind,
        /// Free-text search
        #[arg(long)]
        search: Option<String>,
        /// Type or status filter, "all" for everything
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        /// Field filter as key=value, repeatable
        #[arg(long = "filter")]
        filters: Vec<String>,
    },
    /// Show one record
    Show { resource: ResourceKind, id: String },
    /// Create a record from JSON
    Create {
        resource: ResourceKind,
        #[arg(long)]
        data: String,
    },
    /// Replace a record with JSON
    Update {
        resource: ResourceKind,
        id: String,
        #[arg(long)]
        data: String,
    },
    /// Change some fields of a record
    Patch {
        resource: ResourceKind,
        id: String,
        #[arg(long)]
        data: String,
    },
    /// Delete a record
    Delete { resource: ResourceKind, id: String },
    /// Calendar in month, week or day view
    Calendar {
        view: CalendarView,
        /// Reference date, YYYY-MM-DD; today by default
        #[arg(long)]
        date: Option<String>,
        /// Views to step forward (negative steps back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
        /// Event type filter, "all" for everything
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Weekly schedule of a class group
    Schedule { class_group_id: String },
    /// Grades and statistics of an assessment
    Grades { assessment_id: String },
    /// Weighted average of every student over a class group's assessments
    Averages { class_group_id: String },
    /// Attendance of a class group
    Attendance {
        class_group_id: String,
        /// Only this date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// Toggle the offline cache of a collection
    Cache { resource: ResourceKind, toggle: Toggle },
}

/// Run a command
pub async fn run(ctx: &CommandContext, command: Command) -> CommandResult {
    match command {
        Command::Ping => util::ping(ctx).await,
        Command::Dashboard => reports::dashboard(ctx).await,
        Command::List {
            resource,
            search,
            kind,
            page,
            limit,
            filters,
        } => {
            let args = records::ListArgs {
                search,
                kind,
                page,
                limit,
                filters,
            };
            records::list(ctx, resource, &args).await
        }
        Command::Show { resource, id } => records::show(ctx, resource, &id).await,
        Command::Create { resource, data } => records::create(ctx, resource, &data).await,
        Command::Update { resource, id, data } => records::update(ctx, resource, &id, &data).await,
        Command::Patch { resource, id, data } => records::patch(ctx, resource, &id, &data).await,
        Command::Delete { resource, id } => records::delete(ctx, resource, &id).await,
        Command::Calendar {
            view,
            date,
            offset,
            kind,
            search,
        } => {
            let args = calendar::CalendarArgs {
                view,
                date,
                offset,
                kind,
                search,
            };
            calendar::calendar(ctx, &args).await
        }
        Command::Schedule { class_group_id } => reports::schedule(ctx, &class_group_id).await,
        Command::Grades { assessment_id } => reports::grades(ctx, &assessment_id).await,
        Command::Averages { class_group_id } => reports::averages(ctx, &class_group_id).await,
        Command::Attendance {
            class_group_id,
            date,
        } => reports::attendance(ctx, &class_group_id, date.as_deref()).await,
        Command::Cache { resource, toggle } => util::cache(ctx, resource, toggle).await,
    }
}
