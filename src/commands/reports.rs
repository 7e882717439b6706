use crate::api::ListQuery;
use crate::attendance::{summarize_by_student, AttendanceSummary};
use crate::calendar::time::week_dates;
use crate::calendar::{parse_date, schedule_columns, ScheduleColumn};
use crate::commands::{CommandContext, CommandResult};
use crate::error::AppResult;
use crate::grading::{dutch_grade, grade_percentage, is_passing, student_average, AssessmentStats};
use crate::models::{
    Assessment, AttendanceRecord, CalendarEvent, ClassGroup, Grade, ScheduleEntry, Student,
    Teacher,
};
use crate::notify::{tr, Notice};
use crate::utils::table::render_table;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

fn percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}%", v))
        .unwrap_or_else(|| "-".to_string())
}

fn count_or_dash(count: Option<usize>) -> String {
    count
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Totals shown on the dashboard; `None` when that part could not be fetched
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub students: Option<usize>,
    pub teachers: Option<usize>,
    pub class_groups: Option<usize>,
    pub events_this_week: Option<Vec<CalendarEvent>>,
}

fn settle<T>(part: &str, result: AppResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Dashboard part {} unavailable: {:?}", part, e);
            None
        }
    }
}

/// Overview, fetched concurrently
pub async fn dashboard(ctx: &CommandContext) -> CommandResult {
    let today = ctx.today().await?;
    let week = week_dates(today);

    let students = ctx.repository::<Student>();
    let teachers = ctx.cached_repository::<Teacher>().await;
    let class_groups = ctx.repository::<ClassGroup>();
    let events = ctx.cached_repository::<CalendarEvent>().await;

    let unfiltered = ListQuery::new();
    let (students, teachers, class_groups, events) = futures::join!(
        students.list(&unfiltered),
        teachers.list(&unfiltered),
        class_groups.list(&unfiltered),
        events.list(&unfiltered),
    );

    let dashboard = Dashboard {
        students: settle("students", students).map(|page| page.total_count),
        teachers: settle("teachers", teachers).map(|listed| listed.page.total_count),
        class_groups: settle("classGroups", class_groups).map(|page| page.total_count),
        events_this_week: settle("events", events).map(|listed| {
            let mut events: Vec<CalendarEvent> = listed
                .page
                .items
                .into_iter()
                .filter(|event| week.iter().any(|day| event.is_on(*day)))
                .collect();
            events.sort_by(|a, b| (&a.date, &a.start_time).cmp(&(&b.date, &b.start_time)));
            events
        }),
    };

    ctx.render(&dashboard, |d| {
        let mut lines = vec![
            format!("{}: {}", tr("dashboard.students"), count_or_dash(d.students)),
            format!("{}: {}", tr("dashboard.teachers"), count_or_dash(d.teachers)),
            format!("{}: {}", tr("dashboard.class_groups"), count_or_dash(d.class_groups)),
            String::new(),
            tr("dashboard.this_week"),
        ];
        match &d.events_this_week {
            None => lines.push("-".to_string()),
            Some(events) if events.is_empty() => lines.push(Notice::empty().to_string()),
            Some(events) => {
                for event in events {
                    let time = if event.start_time.is_empty() {
                        tr("calendar.all_day")
                    } else {
                        event.start_time.clone()
                    };
                    lines.push(format!(
                        "  {} {}  {}",
                        event.date.get(..10).unwrap_or(&event.date),
                        time,
                        event.title
                    ));
                }
            }
        }
        lines.join("\n")
    })
}

/// Weekly schedule of a class group
pub async fn schedule(ctx: &CommandContext, class_group_id: &str) -> CommandResult {
    info!("Schedule of class group {}", class_group_id);
    let entries = ctx
        .repository::<ScheduleEntry>()
        .list_by("classGroupId", class_group_id)
        .await?;
    let columns = schedule_columns(&entries);

    ctx.render(&columns, |columns: &Vec<ScheduleColumn>| {
        if entries.is_empty() {
            return Notice::empty().to_string();
        }
        let mut lines = Vec::new();
        for column in columns.iter().filter(|c| !c.timed.is_empty() || !c.unplaced.is_empty()) {
            lines.push(tr(&format!("weekday.{}", column.day_of_week)));
            for placed in &column.timed {
                let entry = &placed.item;
                let mut line = format!("  {}-{}  {}", entry.start_time, entry.end_time, entry.title);
                if let Some(location) = &entry.location {
                    line.push_str(&format!(" @ {}", location));
                }
                if let Some(teacher) = &entry.teacher_name {
                    line.push_str(&format!(" ({})", teacher));
                }
                lines.push(line);
            }
            for entry in &column.unplaced {
                lines.push(format!("  ?  {}", entry.title));
            }
        }
        lines.join("\n")
    })
}

/// One student's result on an assessment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRow {
    pub student: String,
    pub score: Option<f64>,
    pub percentage: Option<f64>,
    pub grade: Option<f64>,
    pub passed: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub assessment: Assessment,
    pub rows: Vec<GradeRow>,
    pub stats: AssessmentStats,
}

/// Build the grade report of an assessment
pub fn grade_report(assessment: Assessment, grades: &[Grade]) -> GradeReport {
    let rows = grades
        .iter()
        .filter(|grade| grade.assessment_id == assessment.id)
        .map(|grade| {
            let percentage = grade_percentage(&assessment, grade);
            let dutch = percentage.map(dutch_grade);
            GradeRow {
                student: grade
                    .student_name
                    .clone()
                    .unwrap_or_else(|| grade.student_id.clone()),
                score: grade.score,
                percentage,
                grade: dutch,
                passed: dutch.map(is_passing),
            }
        })
        .collect();
    let stats = AssessmentStats::compute(&assessment, grades);
    GradeReport {
        assessment,
        rows,
        stats,
    }
}

/// Grades and statistics of an assessment
pub async fn grades(ctx: &CommandContext, assessment_id: &str) -> CommandResult {
    let assessment = ctx.repository::<Assessment>().get(assessment_id).await?;
    let grades = ctx
        .repository::<Grade>()
        .list_by("assessmentId", assessment_id)
        .await?;
    let report = grade_report(assessment, &grades);

    ctx.render(&report, |report| {
        let mut lines = vec![format!(
            "{} ({}, max {})",
            report.assessment.title,
            report.assessment.date,
            report.assessment.max_score
        )];
        if report.rows.is_empty() {
            lines.push(Notice::empty().to_string());
            return lines.join("\n");
        }

        let headers = vec![
            tr("column.student"),
            tr("column.score"),
            tr("column.percentage"),
            tr("column.grade"),
            tr("column.result"),
        ];
        let rows: Vec<Vec<String>> = report
            .rows
            .iter()
            .map(|row| {
                vec![
                    row.student.clone(),
                    row.score.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
                    percent(row.percentage),
                    row.grade.map(|g| format!("{:.1}", g)).unwrap_or_else(|| "-".into()),
                    match row.passed {
                        Some(true) => tr("result.pass"),
                        Some(false) => tr("result.fail"),
                        None => "-".to_string(),
                    },
                ]
            })
            .collect();
        lines.push(render_table(&headers, &rows));

        let stats = &report.stats;
        lines.push(String::new());
        lines.push(format!(
            "{}: {}  {}: {}",
            tr("grades.graded"),
            stats.graded,
            tr("grades.ungraded"),
            stats.ungraded
        ));
        lines.push(format!(
            "{}: {}  {}: {}  {}: {}",
            tr("grades.average"),
            percent(stats.average),
            tr("grades.highest"),
            percent(stats.highest),
            tr("grades.lowest"),
            percent(stats.lowest)
        ));
        lines.push(format!("{}: {}", tr("grades.pass_rate"), percent(stats.pass_rate)));
        lines.join("\n")
    })
}

/// Weighted result of one student over several assessments
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAverage {
    pub student_id: String,
    pub student: String,
    pub average: Option<f64>,
    pub grade: Option<f64>,
    pub passed: Option<bool>,
}

/// Averages of every student graded on one of `assessments`, ordered by student id
pub fn student_averages(assessments: &[Assessment], grades: &[Grade]) -> Vec<StudentAverage> {
    let mut names: BTreeMap<&str, &str> = BTreeMap::new();
    for grade in grades
        .iter()
        .filter(|grade| assessments.iter().any(|a| a.id == grade.assessment_id))
    {
        let name = grade.student_name.as_deref().unwrap_or(&grade.student_id);
        names.entry(grade.student_id.as_str()).or_insert(name);
    }

    names
        .into_iter()
        .map(|(student_id, name)| {
            let average = student_average(assessments, grades, student_id);
            let grade = average.map(dutch_grade);
            StudentAverage {
                student_id: student_id.to_string(),
                student: name.to_string(),
                average,
                grade,
                passed: grade.map(is_passing),
            }
        })
        .collect()
}

/// Weighted averages of a class group, one grade fetch per assessment
pub async fn averages(ctx: &CommandContext, class_group_id: &str) -> CommandResult {
    let assessments = ctx
        .repository::<Assessment>()
        .list_by("classGroupId", class_group_id)
        .await?;
    info!(
        "Averaging {} assessments of class group {}",
        assessments.len(),
        class_group_id
    );

    let repo = ctx.repository::<Grade>();
    let fetched = futures::future::try_join_all(
        assessments
            .iter()
            .map(|assessment| repo.list_by("assessmentId", &assessment.id)),
    )
    .await?;
    let grades: Vec<Grade> = fetched.into_iter().flatten().collect();
    let averages = student_averages(&assessments, &grades);

    ctx.render(&averages, |averages: &Vec<StudentAverage>| {
        if averages.is_empty() {
            return Notice::empty().to_string();
        }
        let headers = vec![
            tr("column.student"),
            tr("grades.average"),
            tr("column.grade"),
            tr("column.result"),
        ];
        let rows: Vec<Vec<String>> = averages
            .iter()
            .map(|row| {
                vec![
                    row.student.clone(),
                    percent(row.average),
                    row.grade.map(|g| format!("{:.1}", g)).unwrap_or_else(|| "-".into()),
                    match row.passed {
                        Some(true) => tr("result.pass"),
                        Some(false) => tr("result.fail"),
                        None => "-".to_string(),
                    },
                ]
            })
            .collect();
        render_table(&headers, &rows)
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceReport {
    pub records: Vec<AttendanceRecord>,
    pub summary: AttendanceSummary,
    pub rate: Option<f64>,
    pub per_student: BTreeMap<String, AttendanceSummary>,
}

/// Attendance of a class group, optionally for one date
pub async fn attendance(
    ctx: &CommandContext,
    class_group_id: &str,
    date: Option<&str>,
) -> CommandResult {
    let mut query = ListQuery::new().filter("classGroupId", class_group_id);
    if let Some(date) = date {
        let date = parse_date(date)?;
        query = query.filter("date", date.format("%Y-%m-%d").to_string());
    }
    let records = ctx.repository::<AttendanceRecord>().list(&query).await?.items;

    let summary = AttendanceSummary::from_records(&records);
    let report = AttendanceReport {
        rate: summary.rate(),
        per_student: summarize_by_student(&records),
        summary,
        records,
    };

    ctx.render(&report, |report| {
        if report.records.is_empty() {
            return Notice::empty().to_string();
        }
        let mut lines = Vec::new();
        let names: BTreeMap<&str, &str> = report
            .records
            .iter()
            .filter_map(|r| Some((r.student_id.as_str(), r.student_name.as_deref()?)))
            .collect();

        let headers = vec![
            tr("column.student"),
            tr("attendance.present"),
            tr("attendance.late"),
            tr("attendance.absent"),
            tr("attendance.excused"),
            tr("attendance.rate"),
        ];
        let rows: Vec<Vec<String>> = report
            .per_student
            .iter()
            .map(|(student_id, summary)| {
                vec![
                    names.get(student_id.as_str()).copied().unwrap_or(student_id.as_str()).to_string(),
                    summary.present.to_string(),
                    summary.late.to_string(),
                    summary.absent.to_string(),
                    summary.excused.to_string(),
                    percent(summary.rate()),
                ]
            })
            .collect();
        lines.push(render_table(&headers, &rows));
        lines.push(String::new());
        lines.push(format!("{}: {}", tr("attendance.rate"), percent(report.rate)));
        lines.join("\n")
    })
}
