use crate::core::StatError;
use crate::core::observations::{Observation, Title};
use crate::stats::{Counter, NumStat, RunStat};
use strum_macros::{Display, EnumDiscriminants, EnumIter, IntoStaticStr};

/// Closed set of accumulator kinds.
///
/// Merging matches on the (target, peer) pair: a counter only absorbs a
/// counter, a numeric summary absorbs either kind.
#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(AccumulatorKind))]
#[strum_discriminants(derive(Display, EnumIter, IntoStaticStr, Hash))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum Accumulator {
    Counter(Counter),
    NumStat(NumStat),
}

impl Accumulator {
    #[inline]
    pub fn kind(&self) -> AccumulatorKind {
        AccumulatorKind::from(self)
    }

    pub fn as_counter(&self) -> Option<&Counter> {
        match self {
            Accumulator::Counter(c) => Some(c),
            Accumulator::NumStat(_) => None,
        }
    }

    pub fn as_num_stat(&self) -> Option<&NumStat> {
        match self {
            Accumulator::NumStat(n) => Some(n),
            Accumulator::Counter(_) => None,
        }
    }
}

impl RunStat for Accumulator {
    fn title(&self) -> &Title {
        match self {
            Accumulator::Counter(c) => c.title(),
            Accumulator::NumStat(n) => n.title(),
        }
    }

    fn add<O: Into<Observation>>(&mut self, observation: O, weight: f64) -> Result<(), StatError> {
        match self {
            Accumulator::Counter(c) => c.add(observation, weight),
            Accumulator::NumStat(n) => n.add(observation, weight),
        }
    }

    fn num(&self) -> f64 {
        match self {
            Accumulator::Counter(c) => c.num(),
            Accumulator::NumStat(n) => n.num(),
        }
    }

    fn merge(&mut self, other: &Accumulator) -> Result<(), StatError> {
        match self {
            Accumulator::Counter(c) => c.merge(other),
            Accumulator::NumStat(n) => n.merge(other),
        }
    }
}

impl From<Counter> for Accumulator {
    fn from(c: Counter) -> Self {
        Accumulator::Counter(c)
    }
}

impl From<NumStat> for Accumulator {
    fn from(n: NumStat) -> Self {
        Accumulator::NumStat(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn sample(kind: AccumulatorKind, title: &str) -> Accumulator {
        match kind {
            AccumulatorKind::Counter => Counter::with_values(title, [1, 2, 2]).unwrap().into(),
            AccumulatorKind::NumStat => NumStat::with_values(title, [1, 2, 2]).unwrap().into(),
        }
    }

    #[test]
    fn kind_names() {
        let names: Vec<&'static str> = AccumulatorKind::iter().map(Into::into).collect();
        assert_eq!(names, vec!["counter", "num-stat"]);
    }

    #[test]
    fn merge_matrix() {
        for target in AccumulatorKind::iter() {
            for peer in AccumulatorKind::iter() {
                let mut acc = sample(target, "t");
                let before = acc.clone();
                let result = acc.merge(&sample(peer, "t"));
                match (target, peer) {
                    (AccumulatorKind::Counter, AccumulatorKind::NumStat) => {
                        assert_eq!(
                            result,
                            Err(StatError::BadMergeType { target, found: peer })
                        );
                        assert_eq!(acc, before);
                    }
                    _ => {
                        assert!(result.is_ok(), "{target} <- {peer}");
                        assert_eq!(acc.num(), 6.0, "{target} <- {peer}");
                    }
                }

                let mut acc = sample(target, "t");
                let err = acc.merge(&sample(peer, "other")).unwrap_err();
                assert!(matches!(err, StatError::TitleMismatch { .. }));
                assert_eq!(acc, before);
            }
        }
    }

    #[test]
    fn add_dispatches_to_inner_accumulator() {
        let mut acc = Accumulator::from(NumStat::new("x"));
        acc.add_one("abc").unwrap();
        acc.add(4.0, 2.0).unwrap();
        assert_eq!(acc.num(), 3.0);
        assert_eq!(acc.as_num_stat().unwrap().count(), 2.0);
        assert!(acc.as_counter().is_none());

        let mut acc = Accumulator::from(Counter::new(("a", "b")));
        assert!(acc.add_one("abc").is_err());
        assert_eq!(acc.kind(), AccumulatorKind::Counter);
        assert_eq!(acc.title(), &Title::from(("a", "b")));
    }
}
