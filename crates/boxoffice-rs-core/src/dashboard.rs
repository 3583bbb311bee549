//! Aggregate statistics over the stored history.

use boxoffice_rs_model::{Genre, PredictionRecord, Vocabulary};

/// Number of records listed as recent.
pub const RECENT_LIMIT: usize = 5;
/// Ratings above this count as a success.
pub const SUCCESS_RATING: f64 = 7.0;

/// Title and gross of the best-grossing record.
#[derive(Debug, Clone, PartialEq)]
pub struct TopGrossing {
    pub title: String,
    pub gross_worldwide: f64,
}

/// Summary shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSummary {
    pub total_predictions: usize,
    pub average_rating: f64,
    pub total_awards: u64,
    pub highest_grossing: Option<TopGrossing>,
    pub average_budget: f64,
    /// Share of records rated above [`SUCCESS_RATING`], in `0.0..=1.0`.
    pub success_rate: f64,
    pub most_common_genre: Option<Genre>,
    /// Most recent records first, at most [`RECENT_LIMIT`].
    pub recent: Vec<PredictionRecord>,
}

impl DashboardSummary {
    /// Compute the summary for a history list (most recent first).
    pub fn from_records(records: &[PredictionRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let total = records.len();
        let count = total as f64;

        let mut rating_sum = 0.0;
        let mut budget_sum = 0.0;
        let mut total_awards = 0u64;
        let mut successes = 0usize;
        let mut top: Option<&PredictionRecord> = None;
        for record in records {
            rating_sum += record.predicted.rating;
            budget_sum += record.input.budget as f64;
            total_awards += u64::from(record.predicted.awards);
            if record.predicted.rating > SUCCESS_RATING {
                successes += 1;
            }
            // Ties go to the older record.
            top = match top {
                Some(current)
                    if current.predicted.gross_worldwide > record.predicted.gross_worldwide =>
                {
                    Some(current)
                }
                _ => Some(record),
            };
        }

        Self {
            total_predictions: total,
            average_rating: rating_sum / count,
            total_awards,
            highest_grossing: top.map(|record| TopGrossing {
                title: record.input.title.clone(),
                gross_worldwide: record.predicted.gross_worldwide,
            }),
            average_budget: budget_sum / count,
            success_rate: successes as f64 / count,
            most_common_genre: most_common_genre(records),
            recent: records.iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }
}

/// Format a USD amount with thousands separators and no cents.
pub fn format_usd(amount: f64) -> String {
    let whole = amount.max(0.0).round() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

/// Most frequent genre; ties resolve to vocabulary order.
fn most_common_genre(records: &[PredictionRecord]) -> Option<Genre> {
    let mut best: Option<(Genre, usize)> = None;
    for genre in Genre::ALL {
        let hits = records
            .iter()
            .filter(|record| record.input.genres.contains(genre))
            .count();
        if hits > 0 && best.is_none_or(|(_, best_hits)| hits > best_hits) {
            best = Some((*genre, hits));
        }
    }
    best.map(|(genre, _)| genre)
}

#[cfg(test)]
mod tests {
    use super::{DashboardSummary, TopGrossing, format_usd};
    use boxoffice_rs_model::{Genre, PredictedFields, PredictionRecord};
    use boxoffice_rs_test_utils::sample_input;
    use pretty_assertions::assert_eq;

    fn record(title: &str, genres: Vec<Genre>, gross: f64, rating: f64, awards: u32) -> PredictionRecord {
        let mut input = sample_input();
        input.title = title.to_string();
        input.genres = genres;
        PredictionRecord::new(
            input,
            PredictedFields {
                gross_worldwide: gross,
                rating,
                awards,
                ..PredictedFields::default()
            },
        )
    }

    #[test]
    fn empty_history_is_all_zero() {
        assert_eq!(DashboardSummary::from_records(&[]), DashboardSummary::default());
    }

    #[test]
    fn aggregates_history() {
        let records = vec![
            record("c", vec![Genre::Comedy], 50.0, 8.0, 2),
            record("b", vec![Genre::Drama, Genre::Comedy], 900.0, 6.0, 0),
            record("a", vec![Genre::Drama], 300.0, 7.0, 1),
        ];
        let summary = DashboardSummary::from_records(&records);
        assert_eq!(summary.total_predictions, 3);
        assert_eq!(summary.average_rating, 7.0);
        assert_eq!(summary.total_awards, 3);
        assert_eq!(
            summary.highest_grossing,
            Some(TopGrossing {
                title: "b".to_string(),
                gross_worldwide: 900.0,
            })
        );
        assert_eq!(summary.average_budget, 1_000_000.0);
        assert_eq!(summary.success_rate, 1.0 / 3.0);
        // Drama and Comedy tie; Drama comes first in the vocabulary.
        assert_eq!(summary.most_common_genre, Some(Genre::Drama));
        assert_eq!(summary.recent.len(), 3);
    }

    #[test]
    fn recent_keeps_five_newest() {
        let records: Vec<_> = (0..8)
            .map(|i| record(&format!("m{i}"), Vec::new(), 0.0, 0.0, 0))
            .collect();
        let summary = DashboardSummary::from_records(&records);
        let titles: Vec<_> = summary.recent.iter().map(|r| r.input.title.as_str()).collect();
        assert_eq!(titles, vec!["m0", "m1", "m2", "m3", "m4"]);
        assert_eq!(summary.most_common_genre, None);
    }

    #[test]
    fn usd_amounts_are_grouped() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(999.4), "$999");
        assert_eq!(format_usd(1000.0), "$1,000");
        assert_eq!(format_usd(1_234_567.0), "$1,234,567");
    }
}
