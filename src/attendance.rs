use crate::models::{AttendanceRecord, AttendanceStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts per attendance status over a set of records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
}

impl AttendanceSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a AttendanceRecord>,
    {
        let mut summary = Self::default();
        for record in records {
            summary.add(record.status);
        }
        summary
    }

    pub fn add(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Late => self.late += 1,
            AttendanceStatus::Excused => self.excused += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.present + self.absent + self.late + self.excused
    }

    /// Present or late, as a percentage of all records; `None` without records
    pub fn rate(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some((self.present + self.late) as f64 * 100.0 / total as f64),
        }
    }
}

/// Summaries keyed by student id
pub fn summarize_by_student(records: &[AttendanceRecord]) -> BTreeMap<String, AttendanceSummary> {
    let mut summaries: BTreeMap<String, AttendanceSummary> = BTreeMap::new();
    for record in records {
        summaries
            .entry(record.student_id.clone())
            .or_default()
            .add(record.status);
    }
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(student_id: &str, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            student_id: student_id.into(),
            class_group_id: "g1".into(),
            date: "2025-03-15".into(),
            status,
            ..Default::default()
        }
    }

    #[test]
    fn rate_counts_late_as_attended() {
        let records = vec![
            record("s1", AttendanceStatus::Present),
            record("s2", AttendanceStatus::Late),
            record("s3", AttendanceStatus::Absent),
            record("s4", AttendanceStatus::Excused),
        ];
        let summary = AttendanceSummary::from_records(&records);
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.rate(), Some(50.0));
    }

    #[test]
    fn empty_summary_has_no_rate() {
        assert_eq!(AttendanceSummary::default().rate(), None);
    }

    #[test]
    fn groups_per_student() {
        let records = vec![
            record("s1", AttendanceStatus::Present),
            record("s1", AttendanceStatus::Absent),
            record("s2", AttendanceStatus::Present),
        ];
        let summaries = summarize_by_student(&records);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries["s1"].rate(), Some(50.0));
        assert_eq!(summaries["s2"].rate(), Some(100.0));
    }
}
