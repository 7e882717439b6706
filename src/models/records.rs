use super::{blank_fields, cell, headers, Listing, Resource, Searchable};
use crate::notify::tr;
use serde::{Deserialize, Serialize};

/// Outcome of one attendance registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Excused => "excused",
        }
    }
}

/// Attendance of one student at one class-group session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub class_group_id: String,
    /// ISO calendar date
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: AttendanceStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Resource for AttendanceRecord {
    const PATH: &'static str = "/attendance";
    const COLLECTION: &'static str = "attendance";

    fn id(&self) -> &str {
        &self.id
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("studentId", self.student_id.as_str()),
            ("classGroupId", self.class_group_id.as_str()),
            ("date", self.date.as_str()),
        ])
    }
}

impl Searchable for AttendanceRecord {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.date.as_str()];
        fields.extend(self.student_name.as_deref());
        fields.extend(self.notes.as_deref());
        fields
    }

    fn kind(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

impl Listing for AttendanceRecord {
    fn columns() -> Vec<String> {
        headers(&[
            "column.date",
            "column.student",
            "column.status",
            "column.notes",
        ])
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.student_name
                .clone()
                .unwrap_or_else(|| self.student_id.clone()),
            tr(&format!("attendance.{}", self.status.as_str())),
            cell(&self.notes),
        ]
    }
}

/// Kind of assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentType {
    #[default]
    Test,
    Assignment,
    Exam,
    Presentation,
}

impl AssessmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentType::Test => "test",
            AssessmentType::Assignment => "assignment",
            AssessmentType::Exam => "exam",
            AssessmentType::Presentation => "presentation",
        }
    }
}

fn default_weight() -> f64 {
    1.0
}

/// An assessment (beoordeling) carrying a maximum score and a weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: AssessmentType,
    #[serde(default)]
    pub class_group_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub max_score: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl Resource for Assessment {
    const PATH: &'static str = "/assessments";
    const COLLECTION: &'static str = "assessments";

    fn id(&self) -> &str {
        &self.id
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = blank_fields(&[
            ("title", self.title.as_str()),
            ("classGroupId", self.class_group_id.as_str()),
            ("date", self.date.as_str()),
        ]);
        if self.max_score <= 0.0 {
            missing.push("maxScore");
        }
        missing
    }
}

impl Searchable for Assessment {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }

    fn kind(&self) -> Option<&str> {
        Some(self.kind.as_str())
    }
}

impl Listing for Assessment {
    fn columns() -> Vec<String> {
        headers(&[
            "column.id",
            "column.title",
            "column.type",
            "column.date",
            "column.max_score",
            "column.weight",
        ])
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            tr(&format!("assessment.{}", self.kind.as_str())),
            self.date.clone(),
            format!("{}", self.max_score),
            format!("{}", self.weight),
        ]
    }
}

/// Score of one student on one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub assessment_id: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub student_name: Option<String>,
    /// Raw score; `None` while not yet graded
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
}

impl Resource for Grade {
    const PATH: &'static str = "/grades";
    const COLLECTION: &'static str = "grades";

    fn id(&self) -> &str {
        &self.id
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("assessmentId", self.assessment_id.as_str()),
            ("studentId", self.student_id.as_str()),
        ])
    }
}

impl Searchable for Grade {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::new();
        fields.extend(self.student_name.as_deref());
        fields.extend(self.feedback.as_deref());
        fields
    }
}

impl Listing for Grade {
    fn columns() -> Vec<String> {
        headers(&["column.student", "column.score", "column.feedback"])
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.student_name
                .clone()
                .unwrap_or_else(|| self.student_id.clone()),
            self.score
                .map(|s| format!("{}", s))
                .unwrap_or_else(|| "-".to_string()),
            cell(&self.feedback),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assessment_type_field_is_named_type() {
        let assessment: Assessment = serde_json::from_value(json!({
            "id": "a1",
            "title": "Toets hoofdstuk 3",
            "type": "exam",
            "classGroupId": "g1",
            "date": "2025-03-15",
            "maxScore": 40
        }))
        .unwrap();
        assert_eq!(assessment.kind, AssessmentType::Exam);
        assert_eq!(assessment.weight, 1.0);
    }

    #[test]
    fn assessment_without_max_score_is_incomplete() {
        let assessment = Assessment {
            title: "Opdracht".into(),
            class_group_id: "g1".into(),
            date: "2025-01-10".into(),
            ..Default::default()
        };
        assert_eq!(assessment.missing_fields(), vec!["maxScore"]);
    }

    #[test]
    fn ungraded_grade_has_no_score() {
        let grade: Grade =
            serde_json::from_value(json!({"assessmentId": "a1", "studentId": "s1"})).unwrap();
        assert_eq!(grade.score, None);
    }
}
