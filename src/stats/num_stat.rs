use crate::core::StatError;
use crate::core::observations::{Observation, Title};
use crate::stats::run_stat::check_weight;
use crate::stats::summary::multiplicity;
use crate::stats::{Accumulator, Counter, NumStatFields, RunStat, SummaryFormat};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Running summary of numeric observations.
///
/// Each `add` lands in exactly one of three places:
/// - values that do not coerce to `f64` go to the lazily created `bad` counter;
/// - NaN only bumps `nan_count`;
/// - everything else updates count, sums and extrema.
///
/// Extrema carry the total weight of observations equal to them
/// (`min_n`/`max_n`) so that merging stays exact.
#[derive(Debug, Clone, PartialEq)]
pub struct NumStat {
    title: Title,
    count: f64,
    min_v: f64,
    min_n: f64,
    max_v: f64,
    max_n: f64,
    sum_v: f64,
    sum2: f64,
    nan_count: f64,
    bad: Option<Counter>,
    integer: bool,
}

impl NumStat {
    pub fn new<T: Into<Title>>(title: T) -> Self {
        Self {
            title: title.into(),
            count: 0.0,
            min_v: f64::INFINITY,
            min_n: 0.0,
            max_v: f64::NEG_INFINITY,
            max_n: 0.0,
            sum_v: 0.0,
            sum2: 0.0,
            nan_count: 0.0,
            bad: None,
            integer: false,
        }
    }

    pub fn with_values<T, I, O>(title: T, values: I) -> Result<Self, StatError>
    where
        T: Into<Title>,
        I: IntoIterator<Item = O>,
        O: Into<Observation>,
    {
        let mut stat = Self::new(title);
        for v in values {
            stat.add_one(v)?;
        }
        Ok(stat)
    }

    pub fn with_weighted_values<T, I, O>(title: T, values: I) -> Result<Self, StatError>
    where
        T: Into<Title>,
        I: IntoIterator<Item = (O, f64)>,
        O: Into<Observation>,
    {
        let mut stat = Self::new(title);
        for (v, w) in values {
            stat.add(v, w)?;
        }
        Ok(stat)
    }

    /// Marks the measured quantity as integral; extrema then render without
    /// decimals.
    pub fn with_integer(mut self, integer: bool) -> Self {
        self.integer = integer;
        self
    }

    #[inline]
    pub fn count(&self) -> f64 {
        self.count
    }
    #[inline]
    pub fn min_v(&self) -> f64 {
        self.min_v
    }
    #[inline]
    pub fn min_n(&self) -> f64 {
        self.min_n
    }
    #[inline]
    pub fn max_v(&self) -> f64 {
        self.max_v
    }
    #[inline]
    pub fn max_n(&self) -> f64 {
        self.max_n
    }
    #[inline]
    pub fn sum_v(&self) -> f64 {
        self.sum_v
    }
    #[inline]
    pub fn sum2(&self) -> f64 {
        self.sum2
    }
    #[inline]
    pub fn nan_count(&self) -> f64 {
        self.nan_count
    }
    #[inline]
    pub fn integer(&self) -> bool {
        self.integer
    }

    /// Observations that failed numeric coercion, if any were seen.
    #[inline]
    pub fn bad(&self) -> Option<&Counter> {
        self.bad.as_ref()
    }

    pub fn mean(&self) -> f64 {
        if self.count > 0.0 {
            self.sum_v / self.count
        } else {
            f64::NAN
        }
    }

    /// Population standard deviation.
    ///
    /// A spread below `EPSILON * sum2` is reported as exactly zero, since the
    /// radicand would otherwise be roundoff noise that can go negative.
    pub fn std_dev(&self) -> f64 {
        if self.count <= 0.0 {
            return f64::NAN;
        }
        if (self.max_v - self.min_v) < f64::EPSILON * self.sum2 {
            return 0.0;
        }
        (self.sum2 / self.count - (self.sum_v * self.sum_v) / (self.count * self.count)).sqrt()
    }

    /// Absorbs another summary of the same quantity.
    ///
    /// The peer's extrema are folded in as single observations weighted by
    /// their multiplicities, and its bad bucket joins ours.
    pub fn merge_num_stat(&mut self, other: &NumStat) -> Result<(), StatError> {
        self.check_title(&other.title)?;
        if let (Some(mine), Some(theirs)) = (&self.bad, &other.bad) {
            mine.check_absorb(theirs)?;
        }
        log::trace!("merging num-stat into {}", self.title);
        self.count += other.count;
        self.sum_v += other.sum_v;
        self.sum2 += other.sum2;
        self.nan_count += other.nan_count;
        self.fold_min(other.min_v, other.min_n);
        self.fold_max(other.max_v, other.max_n);
        if let Some(other_bad) = &other.bad {
            self.bad_bucket().merge_counter(other_bad)?;
        }
        Ok(())
    }

    /// Replays every entry of a frequency table as a weighted `add`.
    ///
    /// All entries are validated first, so a rejected merge leaves `self`
    /// untouched.
    pub fn merge_counter(&mut self, other: &Counter) -> Result<(), StatError> {
        self.check_title(other.title())?;
        for (o, n) in other.iter() {
            check_weight(n)?;
            if let (None, Some(bad)) = (o.to_f64(), &self.bad) {
                bad.check_bump(o, n)?;
            }
        }
        log::trace!("folding counter {} into num-stat", other.title());
        for (o, n) in other.iter() {
            self.add(o.clone(), n)?;
        }
        Ok(())
    }

    pub fn fields(&self) -> NumStatFields {
        NumStatFields {
            title: self.title.clone(),
            count: self.count,
            min_v: self.min_v,
            min_n: self.min_n,
            max_v: self.max_v,
            max_n: self.max_n,
            sum_v: self.sum_v,
            sum2: self.sum2,
            nan_count: self.nan_count,
            integer: self.integer,
            bad: self.bad.as_ref().map(|b| b.counts().clone()),
        }
    }

    /// JSON export of [`fields`](NumStat::fields).
    ///
    /// JSON has no infinities or NaN: an empty summary's `min_v = +inf` and
    /// `max_v = -inf` come out as `null`.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self.fields())
    }

    /// One-line summary:
    /// `title [count mean±std min*minN:max*maxN NaN=n Bad=n]`.
    pub fn summary(&self, format: &SummaryFormat) -> String {
        let mut line = format!(
            "{} [{:.0} {}±{} {}{}:{}{}",
            self.title,
            self.count,
            format.value(self.mean()),
            format.value(self.std_dev()),
            format.extremum(self.min_v, self.integer),
            multiplicity(self.min_n),
            format.extremum(self.max_v, self.integer),
            multiplicity(self.max_n),
        );
        if self.nan_count != 0.0 {
            line.push_str(&format!(" NaN={:.0}", self.nan_count));
        }
        if let Some(bad) = &self.bad {
            line.push_str(&format!(" Bad={:.0}", bad.num()));
        }
        line.push(']');
        line
    }

    fn observe_value(&mut self, v: f64, weight: f64) {
        self.count += weight;
        self.sum_v += v * weight;
        self.sum2 += v * v * weight;
        self.fold_min(v, weight);
        self.fold_max(v, weight);
    }

    // Tie accumulates multiplicity, strictly more extreme replaces it.
    #[inline]
    fn fold_min(&mut self, v: f64, n: f64) {
        if v == self.min_v {
            self.min_n += n;
        } else if v < self.min_v {
            self.min_v = v;
            self.min_n = n;
        }
    }

    #[inline]
    fn fold_max(&mut self, v: f64, n: f64) {
        if v == self.max_v {
            self.max_n += n;
        } else if v > self.max_v {
            self.max_v = v;
            self.max_n = n;
        }
    }

    fn bad_bucket(&mut self) -> &mut Counter {
        let title = &self.title;
        self.bad.get_or_insert_with(|| {
            log::trace!("creating bad bucket for {title}");
            Counter::new(title.bad_bucket())
        })
    }
}

impl RunStat for NumStat {
    #[inline]
    fn title(&self) -> &Title {
        &self.title
    }

    fn add<O: Into<Observation>>(&mut self, observation: O, weight: f64) -> Result<(), StatError> {
        let observation = observation.into();
        check_weight(weight)?;
        match observation.to_f64() {
            None => self.bad_bucket().add(observation, weight),
            Some(v) if v.is_nan() => {
                self.nan_count += weight;
                Ok(())
            }
            Some(v) => {
                self.observe_value(v, weight);
                Ok(())
            }
        }
    }

    fn num(&self) -> f64 {
        self.nan_count + self.count + self.bad.as_ref().map_or(0.0, |b| b.num())
    }

    fn merge(&mut self, other: &Accumulator) -> Result<(), StatError> {
        self.check_title(other.title())?;
        match other {
            Accumulator::NumStat(ns) => self.merge_num_stat(ns),
            Accumulator::Counter(c) => self.merge_counter(c),
        }
    }
}

impl Display for NumStat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.summary(&SummaryFormat::default()))
    }
}
