use crate::core::StatError;
use crate::core::observations::{Observation, Title};
use crate::stats::fields::{serialize_counts, sorted_entries};
use crate::stats::run_stat::check_weight;
use crate::stats::{Accumulator, AccumulatorKind, RunStat};
use crate::utils::math::entropy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Frequency table over observations.
///
/// With a tuple title every key is a tuple of the same arity; mismatching
/// observations are rejected before the table is touched. Merging is
/// multiset union, so it is commutative and associative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Counter {
    title: Title,
    #[serde(serialize_with = "serialize_counts")]
    counts: HashMap<Observation, f64>,
}

impl Counter {
    pub fn new<T: Into<Title>>(title: T) -> Self {
        Self {
            title: title.into(),
            counts: HashMap::new(),
        }
    }

    /// Builds a counter from unit-weight observations.
    pub fn with_values<T, I, O>(title: T, values: I) -> Result<Self, StatError>
    where
        T: Into<Title>,
        I: IntoIterator<Item = O>,
        O: Into<Observation>,
    {
        let mut counter = Self::new(title);
        for v in values {
            counter.add_one(v)?;
        }
        Ok(counter)
    }

    /// Builds a counter from `(observation, weight)` pairs.
    pub fn with_weighted_values<T, I, O>(title: T, values: I) -> Result<Self, StatError>
    where
        T: Into<Title>,
        I: IntoIterator<Item = (O, f64)>,
        O: Into<Observation>,
    {
        let mut counter = Self::new(title);
        for (v, w) in values {
            counter.add(v, w)?;
        }
        Ok(counter)
    }

    #[inline]
    pub fn counts(&self) -> &HashMap<Observation, f64> {
        &self.counts
    }

    #[inline]
    pub fn get(&self, observation: &Observation) -> Option<f64> {
        self.counts.get(observation).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Observation, f64)> {
        self.counts.iter().map(|(o, &n)| (o, n))
    }

    /// Number of distinct observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries by descending weight.
    pub fn most_common(&self) -> Vec<(&Observation, f64)> {
        sorted_entries(&self.counts)
    }

    /// Shannon entropy of the empirical distribution; see [`entropy`].
    pub fn entropy(&self, scaled_to_1: bool) -> f64 {
        entropy(self.counts.values().copied(), scaled_to_1)
    }

    /// Folds `other` into `self` entry by entry.
    ///
    /// Nothing is applied unless every combined weight stays finite.
    pub fn merge_counter(&mut self, other: &Counter) -> Result<(), StatError> {
        self.check_title(&other.title)?;
        self.check_absorb(other)?;
        log::trace!("merging {} entries into counter {}", other.len(), self.title);
        for (o, n) in other.iter() {
            self.bump(o.clone(), n);
        }
        Ok(())
    }

    /// Marginal projections of a pair-titled counter.
    ///
    /// Each entry `(o1, o2) -> n` adds `n` to `o1` in the first counter and to
    /// `o2` in the second, so both carry the full weight of `self`.
    pub fn split(&self) -> Result<(Counter, Counter), StatError> {
        let Some((t1, t2)) = self.title.as_pair() else {
            return Err(StatError::NotAPair {
                title: self.title.clone(),
            });
        };
        let mut first = Counter::new(t1);
        let mut second = Counter::new(t2);
        for (o, n) in self.iter() {
            if let Some([o1, o2]) = o.as_tuple() {
                first.bump(o1.clone(), n);
                second.bump(o2.clone(), n);
            }
        }
        Ok((first, second))
    }

    /// `title:num/distinct`
    pub fn short(&self) -> String {
        format!("{}:{}/{}", self.title, self.num(), self.len())
    }

    /// JSON export; see [`NumStat::to_json`](crate::stats::NumStat::to_json)
    /// for how non-finite numbers come out.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Checks that every entry of `other` can be added without the stored
    /// weight leaving the finite range.
    pub(crate) fn check_absorb(&self, other: &Counter) -> Result<(), StatError> {
        other.iter().try_for_each(|(o, n)| self.check_bump(o, n))
    }

    fn check_observation(&self, observation: &Observation) -> Result<(), StatError> {
        match self.title.arity() {
            Some(k) if observation.arity() != Some(k) => {
                log::debug!("counter {} rejected {observation}", self.title);
                Err(StatError::IncompatibleObservation {
                    title: self.title.clone(),
                    observation: observation.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn check_bump(
        &self,
        observation: &Observation,
        weight: f64,
    ) -> Result<(), StatError> {
        let total = self.get(observation).unwrap_or(0.0) + weight;
        if total.is_finite() {
            return Ok(());
        }
        log::debug!("counter {} weight for {observation} overflows", self.title);
        Err(StatError::InvalidWeight { weight: total })
    }

    #[inline]
    fn bump(&mut self, observation: Observation, weight: f64) {
        *self.counts.entry(observation).or_insert(0.0) += weight;
    }
}

impl RunStat for Counter {
    #[inline]
    fn title(&self) -> &Title {
        &self.title
    }

    fn add<O: Into<Observation>>(&mut self, observation: O, weight: f64) -> Result<(), StatError> {
        let observation = observation.into();
        check_weight(weight)?;
        self.check_observation(&observation)?;
        self.check_bump(&observation, weight)?;
        self.bump(observation, weight);
        Ok(())
    }

    fn num(&self) -> f64 {
        self.counts.values().sum()
    }

    fn merge(&mut self, other: &Accumulator) -> Result<(), StatError> {
        self.check_title(other.title())?;
        match other {
            Accumulator::Counter(c) => self.merge_counter(c),
            Accumulator::NumStat(_) => {
                log::debug!("counter {} cannot absorb a num-stat", self.title);
                Err(StatError::BadMergeType {
                    target: AccumulatorKind::Counter,
                    found: other.kind(),
                })
            }
        }
    }
}

impl Display for Counter {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} (", self.title)?;
        for (i, (o, n)) in self.most_common().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{o}:{n}")?;
        }
        write!(f, ")")
    }
}
