use super::{blank_fields, cell, headers, Listing, Resource, Searchable};
use crate::notify::tr;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn active_label(active: bool) -> String {
    tr(if active { "status.active" } else { "status.inactive" })
}

/// A subject or program (vak), independent of any scheduled offering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Resource for Program {
    const PATH: &'static str = "/programs";
    const COLLECTION: &'static str = "programs";

    fn id(&self) -> &str {
        &self.id
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[("name", self.name.as_str())])
    }
}

impl Searchable for Program {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.code.as_deref());
        fields.extend(self.description.as_deref());
        fields
    }

    fn kind(&self) -> Option<&str> {
        self.level.as_deref()
    }
}

impl Listing for Program {
    fn columns() -> Vec<String> {
        headers(&[
            "column.id",
            "column.name",
            "column.code",
            "column.level",
            "column.status",
        ])
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            cell(&self.code),
            cell(&self.level),
            active_label(self.is_active),
        ]
    }
}

/// A scheduled offering of a program for one academic year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub program_id: String,
    #[serde(default)]
    pub program_name: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub academic_year: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Resource for Course {
    const PATH: &'static str = "/courses";
    const COLLECTION: &'static str = "courses";

    fn id(&self) -> &str {
        &self.id
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("name", self.name.as_str()),
            ("programId", self.program_id.as_str()),
            ("academicYear", self.academic_year.as_str()),
        ])
    }
}

impl Searchable for Course {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.program_name.as_deref());
        fields.extend(self.teacher_name.as_deref());
        fields.extend(self.description.as_deref());
        fields
    }

    fn kind(&self) -> Option<&str> {
        Some(self.academic_year.as_str())
    }
}

impl Listing for Course {
    fn columns() -> Vec<String> {
        headers(&[
            "column.id",
            "column.name",
            "column.program",
            "column.teacher",
            "column.academic_year",
        ])
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            cell(&self.program_name),
            cell(&self.teacher_name),
            self.academic_year.clone(),
        ]
    }
}

/// A class group (studentengroep) of students for one academic year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClassGroup {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub academic_year: String,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub max_capacity: Option<u32>,
    #[serde(default)]
    pub student_count: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl ClassGroup {
    /// Occupancy as "count/capacity", or just the count without a capacity
    pub fn occupancy(&self) -> String {
        match self.max_capacity {
            Some(capacity) => format!("{}/{}", self.student_count, capacity),
            None => self.student_count.to_string(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.max_capacity
            .is_some_and(|capacity| self.student_count >= capacity)
    }
}

impl Resource for ClassGroup {
    const PATH: &'static str = "/class-groups";
    const COLLECTION: &'static str = "classGroups";

    fn id(&self) -> &str {
        &self.id
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("name", self.name.as_str()),
            ("academicYear", self.academic_year.as_str()),
        ])
    }
}

impl Searchable for ClassGroup {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.academic_year.as_str()];
        fields.extend(self.course_name.as_deref());
        fields.extend(self.teacher_name.as_deref());
        fields
    }

    fn kind(&self) -> Option<&str> {
        Some(if self.is_active { "active" } else { "inactive" })
    }
}

impl Listing for ClassGroup {
    fn columns() -> Vec<String> {
        headers(&[
            "column.id",
            "column.name",
            "column.academic_year",
            "column.course",
            "column.teacher",
            "column.students",
        ])
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.academic_year.clone(),
            cell(&self.course_name),
            cell(&self.teacher_name),
            self.occupancy(),
        ]
    }
}

/// One recurring weekly lesson slot of a class group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub class_group_id: String,
    #[serde(default)]
    pub class_group_name: Option<String>,
    /// 0 = Monday … 6 = Sunday
    #[serde(default)]
    pub day_of_week: u8,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub teacher_name: Option<String>,
}

impl Resource for ScheduleEntry {
    const PATH: &'static str = "/schedules";
    const COLLECTION: &'static str = "schedules";

    fn id(&self) -> &str {
        &self.id
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("title", self.title.as_str()),
            ("classGroupId", self.class_group_id.as_str()),
            ("startTime", self.start_time.as_str()),
            ("endTime", self.end_time.as_str()),
        ])
    }
}

impl Searchable for ScheduleEntry {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.class_group_name.as_deref());
        fields.extend(self.location.as_deref());
        fields.extend(self.teacher_name.as_deref());
        fields
    }
}

impl Listing for ScheduleEntry {
    fn columns() -> Vec<String> {
        headers(&[
            "column.id",
            "column.title",
            "column.day",
            "column.time",
            "column.location",
            "column.teacher",
        ])
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            tr(&format!("weekday.{}", self.day_of_week % 7)),
            format!("{}-{}", self.start_time, self.end_time),
            cell(&self.location),
            cell(&self.teacher_name),
        ]
    }
}
