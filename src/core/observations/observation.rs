use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};
use std::hash::{Hash, Hasher};

/// A single value fed to an accumulator.
///
/// Observations are used as map keys by [`Counter`](crate::stats::Counter), so
/// numbers are compared by a canonical bit pattern: `-0.0` and `0.0` are the
/// same key, and every NaN collapses onto one key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Observation {
    Missing,
    Number(f64),
    Text(String),
    Tuple(Vec<Observation>),
}

#[inline]
fn canonical_bits(x: f64) -> u64 {
    if x.is_nan() {
        f64::NAN.to_bits()
    } else if x == 0.0 {
        0
    } else {
        x.to_bits()
    }
}

impl Observation {
    /// Builds a tuple observation from its components.
    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Observation>,
    {
        Observation::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Number of components for a tuple, `None` for scalars.
    #[inline]
    pub fn arity(&self) -> Option<usize> {
        match self {
            Observation::Tuple(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Numeric coercion used by [`NumStat`](crate::stats::NumStat).
    ///
    /// Text is trimmed and parsed as `f64`, so `"nan"` and `"inf"` coerce
    /// successfully. Missing values and tuples never coerce.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Observation::Number(x) => Some(*x),
            Observation::Text(s) => s.trim().parse::<f64>().ok(),
            Observation::Missing | Observation::Tuple(_) => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Observation]> {
        match self {
            Observation::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

impl PartialEq for Observation {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Observation::Missing, Observation::Missing) => true,
            (Observation::Number(a), Observation::Number(b)) => {
                canonical_bits(*a) == canonical_bits(*b)
            }
            (Observation::Text(a), Observation::Text(b)) => a == b,
            (Observation::Tuple(a), Observation::Tuple(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Observation {}

impl Hash for Observation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Observation::Missing => {}
            Observation::Number(x) => canonical_bits(*x).hash(state),
            Observation::Text(s) => s.hash(state),
            Observation::Tuple(items) => items.hash(state),
        }
    }
}

impl Display for Observation {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Observation::Missing => write!(f, "-"),
            Observation::Number(x) => write!(f, "{x}"),
            Observation::Text(s) => write!(f, "{s}"),
            Observation::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

macro_rules! number_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Observation {
                #[inline]
                fn from(v: $t) -> Self {
                    Observation::Number(v as f64)
                }
            }
        )*
    };
}

number_from!(f64, f32, i32, i64, u32, u64, usize);

impl From<&str> for Observation {
    fn from(s: &str) -> Self {
        Observation::Text(s.to_string())
    }
}

impl From<String> for Observation {
    fn from(s: String) -> Self {
        Observation::Text(s)
    }
}

impl<T: Into<Observation>> From<Option<T>> for Observation {
    fn from(v: Option<T>) -> Self {
        v.map_or(Observation::Missing, Into::into)
    }
}

impl From<Vec<Observation>> for Observation {
    fn from(items: Vec<Observation>) -> Self {
        Observation::Tuple(items)
    }
}

impl<A, B> From<(A, B)> for Observation
where
    A: Into<Observation>,
    B: Into<Observation>,
{
    fn from((a, b): (A, B)) -> Self {
        Observation::Tuple(vec![a.into(), b.into()])
    }
}

impl<A, B, C> From<(A, B, C)> for Observation
where
    A: Into<Observation>,
    B: Into<Observation>,
    C: Into<Observation>,
{
    fn from((a, b, c): (A, B, C)) -> Self {
        Observation::Tuple(vec![a.into(), b.into(), c.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn signed_zero_and_nan_are_single_keys() {
        let mut set = HashSet::new();
        set.insert(Observation::from(0.0));
        set.insert(Observation::from(-0.0));
        set.insert(Observation::from(f64::NAN));
        set.insert(Observation::from(-f64::NAN));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn integers_and_floats_share_keys() {
        assert_eq!(Observation::from(3), Observation::from(3.0));
        assert_ne!(Observation::from(3), Observation::from("3"));
    }

    #[test]
    fn coercion_follows_text_parsing() {
        assert_eq!(Observation::from(" 7 ").to_f64(), Some(7.0));
        assert_eq!(Observation::from("1e3").to_f64(), Some(1000.0));
        assert!(Observation::from("nan").to_f64().unwrap().is_nan());
        assert_eq!(Observation::from("inf").to_f64(), Some(f64::INFINITY));
        assert_eq!(Observation::from("abc").to_f64(), None);
        assert_eq!(Observation::from("1,000").to_f64(), None);
        assert_eq!(Observation::Missing.to_f64(), None);
        assert_eq!(Observation::from((1, 2)).to_f64(), None);
    }

    #[test]
    fn arity_is_only_defined_for_tuples() {
        assert_eq!(Observation::from("a").arity(), None);
        assert_eq!(Observation::from(("a", "b")).arity(), Some(2));
        assert_eq!(Observation::tuple(["x", "y", "z"]).arity(), Some(3));
    }

    #[test]
    fn option_maps_none_to_missing() {
        assert_eq!(Observation::from(None::<&str>), Observation::Missing);
        assert_eq!(Observation::from(Some("a")), Observation::from("a"));
    }

    #[test]
    fn display_renders_nested_tuples() {
        let o = Observation::from(("a", (1, None::<i32>)));
        assert_eq!(o.to_string(), "(a, (1, -))");
    }

    #[test]
    fn json_is_untagged() {
        let o = Observation::from(("a", 2.5));
        assert_eq!(serde_json::to_string(&o).unwrap(), r#"["a",2.5]"#);
        let back: Observation = serde_json::from_str(r#"["a",2.5]"#).unwrap();
        assert_eq!(back, o);
        let missing: Observation = serde_json::from_str("null").unwrap();
        assert_eq!(missing, Observation::Missing);
    }
}
