use super::{blank_fields, cell, full_name, headers, Listing, Resource, Searchable};
use crate::notify::tr;
use serde::{Deserialize, Serialize};

/// Enrollment status of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    Graduated,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::Inactive => "inactive",
            StudentStatus::Graduated => "graduated",
        }
    }
}

/// A student enrolled at the madrassa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub student_number: Option<String>,
    #[serde(default)]
    pub class_group_id: Option<String>,
    #[serde(default)]
    pub class_group_name: Option<String>,
    #[serde(default)]
    pub guardian_ids: Vec<String>,
    #[serde(default)]
    pub status: StudentStatus,
    #[serde(default)]
    pub enrollment_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Student {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

impl Resource for Student {
    const PATH: &'static str = "/students";
    const COLLECTION: &'static str = "students";

    fn id(&self) -> &str {
        &self.id
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
        ])
    }
}

impl Searchable for Student {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.first_name.as_str(), self.last_name.as_str()];
        fields.extend(self.email.as_deref());
        fields.extend(self.student_number.as_deref());
        fields.extend(self.class_group_name.as_deref());
        fields
    }

    fn kind(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

impl Listing for Student {
    fn columns() -> Vec<String> {
        headers(&[
            "column.id",
            "column.name",
            "column.student_number",
            "column.class_group",
            "column.status",
        ])
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.full_name(),
            cell(&self.student_number),
            cell(&self.class_group_name),
            tr(&format!("status.{}", self.status.as_str())),
        ]
    }
}

/// A guardian (voogd), contact of record for one or more students
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Guardian {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub is_emergency_contact: bool,
    #[serde(default)]
    pub student_ids: Vec<String>,
}

impl Guardian {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

impl Resource for Guardian {
    const PATH: &'static str = "/guardians";
    const COLLECTION: &'static str = "guardians";

    fn id(&self) -> &str {
        &self.id
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
            ("phone", self.phone.as_str()),
        ])
    }
}

impl Searchable for Guardian {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.relationship.as_str(),
            self.phone.as_str(),
        ];
        fields.extend(self.email.as_deref());
        fields
    }

    fn kind(&self) -> Option<&str> {
        Some(self.relationship.as_str())
    }
}

impl Listing for Guardian {
    fn columns() -> Vec<String> {
        headers(&[
            "column.id",
            "column.name",
            "column.relationship",
            "column.phone",
            "column.email",
            "column.students",
        ])
    }

    fn cells(&self) -> Vec<String> {
        let name = if self.is_emergency_contact {
            format!("{} (!)", self.full_name())
        } else {
            self.full_name()
        };
        vec![
            self.id.clone(),
            name,
            self.relationship.clone(),
            self.phone.clone(),
            cell(&self.email),
            self.student_ids.len().to_string(),
        ]
    }
}

/// A teacher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Teacher {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

impl Resource for Teacher {
    const PATH: &'static str = "/teachers";
    const COLLECTION: &'static str = "teachers";

    fn id(&self) -> &str {
        &self.id
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
            ("email", self.email.as_str()),
        ])
    }
}

impl Searchable for Teacher {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
        ];
        fields.extend(self.subjects.iter().map(String::as_str));
        fields
    }

    fn kind(&self) -> Option<&str> {
        Some(if self.is_active { "active" } else { "inactive" })
    }
}

impl Listing for Teacher {
    fn columns() -> Vec<String> {
        headers(&[
            "column.id",
            "column.name",
            "column.email",
            "column.subjects",
            "column.status",
        ])
    }

    fn cells(&self) -> Vec<String> {
        let status = if self.is_active { "status.active" } else { "status.inactive" };
        vec![
            self.id.clone(),
            self.full_name(),
            self.email.clone(),
            self.subjects.join(", "),
            tr(status),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn student_decodes_from_camel_case() {
        let student: Student = serde_json::from_value(json!({
            "id": "s1",
            "firstName": "Yusuf",
            "lastName": "Demir",
            "classGroupName": "Groep 3A",
            "status": "graduated"
        }))
        .unwrap();
        assert_eq!(student.full_name(), "Yusuf Demir");
        assert_eq!(student.status, StudentStatus::Graduated);
        assert!(student.guardian_ids.is_empty());
    }

    #[test]
    fn new_student_serializes_without_id() {
        let student = Student {
            first_name: "Sara".into(),
            last_name: "Ait".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&student).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["firstName"], "Sara");
    }

    #[test]
    fn guardian_requires_phone() {
        let guardian = Guardian {
            first_name: "Fatima".into(),
            last_name: "Bouzid".into(),
            ..Default::default()
        };
        assert_eq!(guardian.missing_fields(), vec!["phone"]);
    }

    #[test]
    fn teacher_defaults_to_active() {
        let teacher: Teacher = serde_json::from_value(json!({
            "id": "t1",
            "firstName": "Ibrahim",
            "lastName": "Kaya",
            "email": "i.kaya@example.org"
        }))
        .unwrap();
        assert!(teacher.is_active);
        assert_eq!(teacher.kind(), Some("active"));
    }

    #[test]
    fn incomplete_student_decodes_and_reports_blanks() {
        let student: Student = serde_json::from_value(json!({ "firstName": "Amina" })).unwrap();
        assert_eq!(student.first_name, "Amina");
        assert_eq!(student.missing_fields(), vec!["lastName"]);
    }
}
