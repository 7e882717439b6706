//! Grade arithmetic on the Dutch 1–10 scale.

use crate::models::{Assessment, Grade};
use serde::Serialize;

/// Lowest passing grade
pub const PASS_GRADE: f64 = 5.5;

/// One-decimal rounding: `floor(10x + 0.5) / 10`
pub fn round_off_1_decimal(x: f64) -> f64 {
    ((10.0 * x) + 0.5).floor() / 10.0
}

/// Score as a percentage of the maximum; `None` when the maximum is not positive
pub fn percentage(score: f64, max_score: f64) -> Option<f64> {
    if max_score > 0.0 {
        Some(score * 100.0 / max_score)
    } else {
        None
    }
}

/// Linear conversion of a percentage to a grade, clamped to 1.0..=10.0
pub fn dutch_grade(percentage: f64) -> f64 {
    round_off_1_decimal(percentage / 10.0).clamp(1.0, 10.0)
}

pub fn is_passing(grade: f64) -> bool {
    grade >= PASS_GRADE
}

/// Weighted average of `(percentage, weight)` pairs.
///
/// Pairs without a percentage or with a non-positive weight are skipped.
/// `None` when nothing remains.
pub fn weighted_average<I>(items: I) -> Option<f64>
where
    I: IntoIterator<Item = (Option<f64>, f64)>,
{
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for (pct, weight) in items {
        let Some(pct) = pct else { continue };
        if weight <= 0.0 {
            continue;
        }
        weighted_sum += pct * weight;
        weight_total += weight;
    }

    if weight_total > 0.0 {
        Some(weighted_sum / weight_total)
    } else {
        None
    }
}

/// Percentage a grade scored on its assessment
pub fn grade_percentage(assessment: &Assessment, grade: &Grade) -> Option<f64> {
    percentage(grade.score?, assessment.max_score)
}

/// Weighted average percentage of one student over a set of assessments
pub fn student_average(assessments: &[Assessment], grades: &[Grade], student_id: &str) -> Option<f64> {
    weighted_average(
        grades
            .iter()
            .filter(|grade| grade.student_id == student_id)
            .filter_map(|grade| {
                let assessment = assessments.iter().find(|a| a.id == grade.assessment_id)?;
                Some((grade_percentage(assessment, grade), assessment.weight))
            }),
    )
}

/// Summary of the grades given on one assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentStats {
    pub graded: usize,
    pub ungraded: usize,
    pub average: Option<f64>,
    pub highest: Option<f64>,
    pub lowest: Option<f64>,
    /// Share of graded scores that pass, as a percentage
    pub pass_rate: Option<f64>,
}

impl AssessmentStats {
    pub fn compute(assessment: &Assessment, grades: &[Grade]) -> Self {
        let percentages: Vec<f64> = grades
            .iter()
            .filter(|grade| grade.assessment_id == assessment.id)
            .filter_map(|grade| grade_percentage(assessment, grade))
            .collect();
        let ungraded = grades
            .iter()
            .filter(|grade| grade.assessment_id == assessment.id && grade.score.is_none())
            .count();

        let graded = percentages.len();
        if graded == 0 {
            return Self {
                graded,
                ungraded,
                average: None,
                highest: None,
                lowest: None,
                pass_rate: None,
            };
        }

        let passed = percentages
            .iter()
            .filter(|pct| is_passing(dutch_grade(**pct)))
            .count();

        Self {
            graded,
            ungraded,
            average: Some(percentages.iter().sum::<f64>() / graded as f64),
            highest: percentages.iter().copied().reduce(f64::max),
            lowest: percentages.iter().copied().reduce(f64::min),
            pass_rate: Some(passed as f64 / graded as f64 * 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment(id: &str, max_score: f64, weight: f64) -> Assessment {
        Assessment {
            id: id.into(),
            title: id.into(),
            class_group_id: "g1".into(),
            date: "2025-03-15".into(),
            max_score,
            weight,
            ..Default::default()
        }
    }

    fn grade(assessment_id: &str, student_id: &str, score: Option<f64>) -> Grade {
        Grade {
            assessment_id: assessment_id.into(),
            student_id: student_id.into(),
            score,
            ..Default::default()
        }
    }

    #[test]
    fn rounding_matches_floor_half_up() {
        assert_eq!(round_off_1_decimal(5.45), 5.5);
        assert_eq!(round_off_1_decimal(9.375), 9.4);
        assert_eq!(round_off_1_decimal(7.0), 7.0);
    }

    #[test]
    fn percentage_needs_positive_maximum() {
        assert_eq!(percentage(30.0, 40.0), Some(75.0));
        assert_eq!(percentage(5.0, 0.0), None);
        assert_eq!(percentage(5.0, -10.0), None);
    }

    #[test]
    fn grade_curve_is_linear_and_clamped() {
        assert_eq!(dutch_grade(55.0), 5.5);
        assert!(is_passing(dutch_grade(55.0)));
        assert!(!is_passing(dutch_grade(54.0)));
        assert_eq!(dutch_grade(100.0), 10.0);
        assert_eq!(dutch_grade(0.0), 1.0);
        assert_eq!(dutch_grade(120.0), 10.0);
    }

    #[test]
    fn weighted_average_skips_zero_weight_and_missing_scores() {
        let avg = weighted_average([(Some(80.0), 2.0), (Some(50.0), 1.0), (Some(10.0), 0.0), (None, 3.0)]);
        assert_eq!(avg, Some(70.0));
        assert_eq!(weighted_average([(None, 1.0), (Some(60.0), 0.0)]), None);
    }

    #[test]
    fn student_average_over_assessments() {
        let assessments = vec![assessment("a1", 40.0, 1.0), assessment("a2", 10.0, 3.0)];
        let grades = vec![
            grade("a1", "s1", Some(20.0)),
            grade("a2", "s1", Some(9.0)),
            grade("a2", "s2", Some(1.0)),
        ];
        // (50 * 1 + 90 * 3) / 4
        assert_eq!(student_average(&assessments, &grades, "s1"), Some(80.0));
        assert_eq!(student_average(&assessments, &grades, "s3"), None);
    }

    #[test]
    fn assessment_statistics() {
        let toets = assessment("a1", 40.0, 1.0);
        let grades = vec![
            grade("a1", "s1", Some(36.0)),
            grade("a1", "s2", Some(20.0)),
            grade("a1", "s3", Some(22.0)),
            grade("a1", "s4", None),
            grade("other", "s1", Some(1.0)),
        ];
        let stats = AssessmentStats::compute(&toets, &grades);
        assert_eq!(stats.graded, 3);
        assert_eq!(stats.ungraded, 1);
        assert_eq!(stats.highest, Some(90.0));
        assert_eq!(stats.lowest, Some(50.0));
        assert_eq!(stats.average, Some(65.0));
        // 90% and 55% pass, 50% does not
        let pass_rate = stats.pass_rate.unwrap();
        assert!((pass_rate - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn statistics_without_scores() {
        let stats = AssessmentStats::compute(&assessment("a1", 10.0, 1.0), &[grade("a1", "s1", None)]);
        assert_eq!(stats.graded, 0);
        assert_eq!(stats.ungraded, 1);
        assert_eq!(stats.average, None);
        assert_eq!(stats.pass_rate, None);
    }
}
