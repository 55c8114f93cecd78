//! Course-graph query parameters and response body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::application::services::CourseGraph;
use crate::domain::entities::ScoreType;

use super::leaderboard::CourseRefDto;

/// Query parameters for `GET /student/get-course-graph`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct GraphQuery {
    pub course_code: String,

    pub score_type: ScoreType,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub semester: Option<i32>,
}

/// One point of the score history, date ascending.
#[derive(Debug, Serialize)]
pub struct ScorePointDto {
    pub marks_obtained: f64,
    pub total_obtained: f64,
    pub date_of_exam: DateTime<Utc>,
    pub graded_at: DateTime<Utc>,
}

/// Response for `GET /student/get-course-graph`.
#[derive(Debug, Serialize)]
pub struct CourseGraphResponse {
    pub course: CourseRefDto,
    pub score_type: ScoreType,
    pub scores: Vec<ScorePointDto>,
}

impl From<CourseGraph> for CourseGraphResponse {
    fn from(graph: CourseGraph) -> Self {
        CourseGraphResponse {
            course: CourseRefDto {
                code: graph.course.code,
                name: graph.course.name,
            },
            score_type: graph.score_type,
            scores: graph
                .scores
                .into_iter()
                .map(|p| ScorePointDto {
                    marks_obtained: p.marks_obtained,
                    total_obtained: p.total_obtained,
                    date_of_exam: p.date_of_exam,
                    graded_at: p.graded_at,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_query_requires_course_code_and_score_type() {
        assert!(serde_urlencoded::from_str::<GraphQuery>("score_type=MID_SEM").is_err());
        assert!(serde_urlencoded::from_str::<GraphQuery>("course_code=CS201").is_err());

        let q: GraphQuery =
            serde_urlencoded::from_str("course_code=CS201&score_type=END_SEM&semester=2").unwrap();
        assert_eq!(q.course_code, "CS201");
        assert_eq!(q.score_type, ScoreType::EndSem);
        assert_eq!(q.semester, Some(2));
    }
}
