use crate::core::observations::{Observation, Title};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Plain export of every [`NumStat`](crate::stats::NumStat) field.
///
/// `bad` carries the raw observation→weight map of the bad bucket rather than
/// the counter itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumStatFields {
    pub title: Title,
    pub count: f64,
    pub min_v: f64,
    pub min_n: f64,
    pub max_v: f64,
    pub max_n: f64,
    pub sum_v: f64,
    pub sum2: f64,
    pub nan_count: f64,
    pub integer: bool,
    #[serde(serialize_with = "serialize_optional_counts")]
    pub bad: Option<HashMap<Observation, f64>>,
}

/// Entries ordered by descending weight, ties broken by rendered observation.
pub(crate) fn sorted_entries(counts: &HashMap<Observation, f64>) -> Vec<(&Observation, f64)> {
    let mut entries: Vec<_> = counts.iter().map(|(o, &n)| (o, n)).collect();
    entries.sort_by(|a, b| {
        b.1.total_cmp(&a.1)
            .then_with(|| a.0.to_string().cmp(&b.0.to_string()))
    });
    entries
}

// JSON object keys must be strings, so observation-keyed maps go out as
// `[observation, weight]` pairs.
pub(crate) fn serialize_counts<S: Serializer>(
    counts: &HashMap<Observation, f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(sorted_entries(counts))
}

fn serialize_optional_counts<S: Serializer>(
    counts: &Option<HashMap<Observation, f64>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match counts {
        Some(counts) => serialize_counts(counts, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entries_sort_by_weight_then_label() {
        let mut counts = HashMap::new();
        counts.insert(Observation::from("b"), 2.0);
        counts.insert(Observation::from("a"), 2.0);
        counts.insert(Observation::from("c"), 5.0);
        let order: Vec<String> = sorted_entries(&counts)
            .into_iter()
            .map(|(o, _)| o.to_string())
            .collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn absent_bad_bucket_serializes_as_null() {
        let fields = NumStatFields {
            title: Title::from("x"),
            count: 1.0,
            min_v: 2.0,
            min_n: 1.0,
            max_v: 2.0,
            max_n: 1.0,
            sum_v: 2.0,
            sum2: 4.0,
            nan_count: 0.0,
            integer: false,
            bad: None,
        };
        let v = serde_json::to_value(&fields).unwrap();
        assert_eq!(v["bad"], json!(null));
        assert_eq!(v["title"], json!("x"));
        assert_eq!(v["sum2"], json!(4.0));
    }

    #[test]
    fn bad_bucket_serializes_as_pairs() {
        let mut bad = HashMap::new();
        bad.insert(Observation::from("abc"), 3.0);
        bad.insert(Observation::Missing, 1.0);
        let fields = NumStatFields {
            title: Title::from("x"),
            count: 0.0,
            min_v: 0.0,
            min_n: 0.0,
            max_v: 0.0,
            max_n: 0.0,
            sum_v: 0.0,
            sum2: 0.0,
            nan_count: 0.0,
            integer: true,
            bad: Some(bad),
        };
        let v = serde_json::to_value(&fields).unwrap();
        assert_eq!(v["bad"], json!([["abc", 3.0], [null, 1.0]]));
    }
}
