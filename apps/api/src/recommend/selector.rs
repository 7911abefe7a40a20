use serde::Serialize;
use tracing::debug;

use crate::dataset::{Dataset, VehicleRecord};

use super::criteria::FilterCriteria;
use super::filter::filter_records;
use super::scoring::score_record;

/// A record with its suitability score for the requested purpose.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    #[serde(flatten)]
    pub record: VehicleRecord,
    pub score: f64,
}

/// Outcome of a recommendation query. Processing failures never reach here;
/// they are returned as errors before the pipeline runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// At least one record passed the filters; best first, at most `limit` long.
    Ranked(Vec<ScoredResult>),
    /// The filters removed every record.
    NoMatches,
}

impl Recommendation {
    pub fn results(&self) -> &[ScoredResult] {
        match self {
            Recommendation::Ranked(results) => results,
            Recommendation::NoMatches => &[],
        }
    }
}

/// Filter → score → top-N over a loaded dataset.
pub fn recommend(dataset: &Dataset, criteria: &FilterCriteria) -> Recommendation {
    let candidates = filter_records(&dataset.records, criteria);
    debug!(
        "Filtered {} of {} vehicles for purpose {}",
        candidates.len(),
        dataset.len(),
        criteria.purpose
    );
    if candidates.is_empty() {
        return Recommendation::NoMatches;
    }

    let scored = candidates
        .into_iter()
        .map(|record| ScoredResult {
            score: score_record(record, dataset, criteria.purpose),
            record: record.clone(),
        })
        .collect();

    Recommendation::Ranked(top_n(scored, criteria.limit.get()))
}

/// Highest score first, keeping input order among equal scores.
pub fn top_n(mut scored: Vec<ScoredResult>, n: usize) -> Vec<ScoredResult> {
    // sort_by is stable
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(n);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::model::test_support::record;
    use crate::recommend::criteria::{Purpose, Range};

    fn criteria(max_price: f64, max_mileage: f64, purpose: Purpose) -> FilterCriteria {
        FilterCriteria::new(
            Range::new("price", 0.0, max_price).unwrap(),
            Range::new("mileage", 0.0, max_mileage).unwrap(),
            purpose,
        )
    }

    fn three_row_dataset() -> Dataset {
        Dataset::from_records(vec![
            record(0, "A", 10000.0, 10.0),
            record(1, "B", 20000.0, 20.0),
            record(2, "C", 30000.0, 30.0),
        ])
    }

    #[test]
    fn test_three_row_urban_scenario() {
        let dataset = three_row_dataset();
        let outcome = recommend(&dataset, &criteria(25000.0, 50.0, Purpose::Urban));
        let results = outcome.results();
        assert_eq!(results.len(), 2);
        // Urban score is dominated by 0.5*mileage: row 1 (20) beats row 0 (10)
        assert_eq!(results[0].record.id, 1);
        assert_eq!(results[1].record.id, 0);
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn test_zero_matches_is_no_matches() {
        let dataset = three_row_dataset();
        let outcome = recommend(&dataset, &criteria(5000.0, 50.0, Purpose::Urban));
        assert_eq!(outcome, Recommendation::NoMatches);
        assert!(outcome.results().is_empty());
    }

    #[test]
    fn test_empty_dataset_is_no_matches() {
        let outcome = recommend(&Dataset::default(), &criteria(1e9, 1e9, Purpose::Racing));
        assert_eq!(outcome, Recommendation::NoMatches);
    }

    #[test]
    fn test_zero_price_does_not_crash_urban() {
        let mut free = record(0, "Free", 0.0, 15.0);
        free.displacement = 0.0;
        let dataset = Dataset::from_records(vec![free, record(1, "B", 20000.0, 20.0)]);
        let outcome = recommend(&dataset, &criteria(25000.0, 50.0, Purpose::Urban));
        let results = outcome.results();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.score.is_finite()));
        // epsilon substitution makes the free car's reciprocal terms dominate
        assert_eq!(results[0].record.id, 0);
    }

    #[test]
    fn test_limit_caps_output() {
        let dataset = three_row_dataset();
        let c = criteria(1e9, 1e9, Purpose::Touring).with_limit(1).unwrap();
        assert_eq!(recommend(&dataset, &c).results().len(), 1);
    }

    #[test]
    fn test_smallest_limit_still_ranks_a_match() {
        let dataset = three_row_dataset();
        let c = criteria(1e9, 1e9, Purpose::Urban).with_limit(1).unwrap();
        match recommend(&dataset, &c) {
            Recommendation::Ranked(results) => assert_eq!(results.len(), 1),
            Recommendation::NoMatches => panic!("expected a ranked result"),
        }
        assert!(criteria(1e9, 1e9, Purpose::Urban).with_limit(0).is_err());
    }

    #[test]
    fn test_output_never_exceeds_filtered_size() {
        let dataset = three_row_dataset();
        let c = criteria(1e9, 1e9, Purpose::Racing).with_limit(50).unwrap();
        assert_eq!(recommend(&dataset, &c).results().len(), 3);
    }

    #[test]
    fn test_sorted_descending() {
        let dataset = three_row_dataset();
        let outcome = recommend(&dataset, &criteria(1e9, 1e9, Purpose::Racing));
        let scores: Vec<f64> = outcome.results().iter().map(|r| r.score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]), "Scores were {scores:?}");
    }

    #[test]
    fn test_ties_keep_dataset_order() {
        let dataset = Dataset::from_records(vec![
            record(0, "A", 10000.0, 20.0),
            record(1, "B", 10000.0, 20.0),
            record(2, "C", 10000.0, 20.0),
        ]);
        let outcome = recommend(&dataset, &criteria(1e9, 1e9, Purpose::Urban));
        let ids: Vec<usize> = outcome.results().iter().map(|r| r.record.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_scored_result_serializes_flat() {
        let result = ScoredResult {
            record: record(3, "Kia", 9000.0, 18.0),
            score: 1.5,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["brand"], "Kia");
        assert_eq!(json["score"], 1.5);
        assert_eq!(json["id"], 3);
    }
}
