//! Leaderboard rank assignment.
//!
//! Converts unordered per-student totals into a deterministically ordered,
//! ranked leaderboard using standard competition ranking: tied totals share
//! a rank and the next distinct total's rank is its 1-based position, so
//! ranks after a tie group jump forward by the group size.
//! `[90, 90, 80, 70]` ranks as `[1, 1, 3, 4]`.

use std::cmp::Ordering;

/// One student's aggregated total within the leaderboard scope.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub student_id: i64,
    pub name: String,
    pub email: String,
    pub enrollment_number: String,
    pub total_marks: f64,
}

/// A [`ScoreEntry`] annotated with its competition rank.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStudent {
    pub student_id: i64,
    pub name: String,
    pub email: String,
    pub enrollment_number: String,
    pub total_marks: f64,
    pub rank: u32,
}

/// Sorts entries by total descending and assigns competition ranks.
///
/// Ties on `total_marks` are broken by enrollment number ascending so the
/// output order is deterministic; tied entries still share a rank. An empty
/// input yields an empty leaderboard.
pub fn assign_ranks(mut entries: Vec<ScoreEntry>) -> Vec<RankedStudent> {
    entries.sort_by(|a, b| {
        b.total_marks
            .partial_cmp(&a.total_marks)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.enrollment_number.cmp(&b.enrollment_number))
    });

    let mut ranked = Vec::with_capacity(entries.len());
    let mut current_rank = 0u32;
    let mut prev_total: Option<f64> = None;

    for (index, entry) in entries.into_iter().enumerate() {
        if prev_total != Some(entry.total_marks) {
            current_rank = index as u32 + 1;
            prev_total = Some(entry.total_marks);
        }

        ranked.push(RankedStudent {
            student_id: entry.student_id,
            name: entry.name,
            email: entry.email,
            enrollment_number: entry.enrollment_number,
            total_marks: entry.total_marks,
            rank: current_rank,
        });
    }

    ranked
}

/// Extracts one student's `(rank, total_marks)` from a ranked leaderboard.
pub fn self_rank(ranked: &[RankedStudent], student_id: i64) -> Option<(u32, f64)> {
    ranked
        .iter()
        .find(|s| s.student_id == student_id)
        .map(|s| (s.rank, s.total_marks))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, enrollment: &str, total: f64) -> ScoreEntry {
        ScoreEntry {
            student_id: id,
            name: format!("Student {id}"),
            email: format!("s{id}@example.edu"),
            enrollment_number: enrollment.to_string(),
            total_marks: total,
        }
    }

    #[test]
    fn test_competition_ranks_with_gap_after_tie() {
        let ranked = assign_ranks(vec![
            entry(1, "E001", 80.0),
            entry(2, "E002", 90.0),
            entry(3, "E003", 90.0),
            entry(4, "E004", 70.0),
        ]);

        let ranks: Vec<u32> = ranked.iter().map(|s| s.rank).collect();
        let totals: Vec<f64> = ranked.iter().map(|s| s.total_marks).collect();

        assert_eq!(totals, vec![90.0, 90.0, 80.0, 70.0]);
        assert_eq!(ranks, vec![1, 1, 3, 4]);
    }

    #[test]
    fn test_single_entry_gets_rank_one() {
        let ranked = assign_ranks(vec![entry(9, "E009", 55.0)]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].total_marks, 55.0);
    }

    #[test]
    fn test_empty_input_yields_empty_leaderboard() {
        let ranked = assign_ranks(vec![]);
        assert!(ranked.is_empty());
        assert_eq!(self_rank(&ranked, 1), None);
    }

    #[test]
    fn test_equal_totals_iff_equal_ranks() {
        let ranked = assign_ranks(vec![
            entry(1, "E001", 50.0),
            entry(2, "E002", 75.0),
            entry(3, "E003", 50.0),
            entry(4, "E004", 75.0),
            entry(5, "E005", 10.0),
        ]);

        for a in &ranked {
            for b in &ranked {
                assert_eq!(
                    a.total_marks == b.total_marks,
                    a.rank == b.rank,
                    "tie property violated between {} and {}",
                    a.enrollment_number,
                    b.enrollment_number
                );
            }
        }
    }

    #[test]
    fn test_gap_equals_tie_group_size() {
        let ranked = assign_ranks(vec![
            entry(1, "E001", 90.0),
            entry(2, "E002", 90.0),
            entry(3, "E003", 90.0),
            entry(4, "E004", 40.0),
        ]);

        // Three entries share rank 1, so the next distinct total ranks 4.
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].rank, 1);
        assert_eq!(ranked[2].rank, 1);
        assert_eq!(ranked[3].rank, 4);
    }

    #[test]
    fn test_rank_assignment_is_idempotent() {
        let input = vec![
            entry(1, "E001", 33.0),
            entry(2, "E002", 88.0),
            entry(3, "E003", 33.0),
        ];

        let once = assign_ranks(input.clone());
        let again = assign_ranks(input);
        assert_eq!(once, again);
    }

    #[test]
    fn test_sum_of_totals_is_preserved() {
        let input = vec![
            entry(1, "E001", 12.5),
            entry(2, "E002", 40.0),
            entry(3, "E003", 7.25),
        ];
        let input_sum: f64 = input.iter().map(|e| e.total_marks).sum();

        let ranked = assign_ranks(input);
        let ranked_sum: f64 = ranked.iter().map(|s| s.total_marks).sum();

        assert_eq!(input_sum, ranked_sum);
    }

    #[test]
    fn test_ties_break_by_enrollment_for_determinism() {
        let ranked = assign_ranks(vec![entry(2, "E200", 60.0), entry(1, "E100", 60.0)]);

        assert_eq!(ranked[0].enrollment_number, "E100");
        assert_eq!(ranked[1].enrollment_number, "E200");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].rank, 1);
    }

    #[test]
    fn test_self_rank_lookup() {
        let ranked = assign_ranks(vec![
            entry(1, "E001", 90.0),
            entry(2, "E002", 80.0),
            entry(3, "E003", 70.0),
        ]);

        assert_eq!(self_rank(&ranked, 2), Some((2, 80.0)));
        assert_eq!(self_rank(&ranked, 42), None);
    }
}
