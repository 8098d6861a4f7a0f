use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

/// Label of the quantity an accumulator measures.
///
/// A tuple title fixes the arity of every observation a
/// [`Counter`](crate::stats::Counter) accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Title {
    Name(String),
    Tuple(Vec<String>),
}

impl Title {
    #[inline]
    pub fn arity(&self) -> Option<usize> {
        match self {
            Title::Name(_) => None,
            Title::Tuple(parts) => Some(parts.len()),
        }
    }

    /// Title of the bucket holding observations that failed numeric coercion.
    pub fn bad_bucket(&self) -> Title {
        Title::Name(format!("{self}(bad)"))
    }

    /// Components of a pair title.
    pub fn as_pair(&self) -> Option<(&str, &str)> {
        match self {
            Title::Tuple(parts) if parts.len() == 2 => Some((&parts[0], &parts[1])),
            _ => None,
        }
    }
}

impl Display for Title {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Title::Name(name) => write!(f, "{name}"),
            Title::Tuple(parts) => write!(f, "({})", parts.join(", ")),
        }
    }
}

impl From<&str> for Title {
    fn from(s: &str) -> Self {
        Title::Name(s.to_string())
    }
}

impl From<String> for Title {
    fn from(s: String) -> Self {
        Title::Name(s)
    }
}

impl From<Vec<String>> for Title {
    fn from(parts: Vec<String>) -> Self {
        Title::Tuple(parts)
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for Title {
    fn from((a, b): (A, B)) -> Self {
        Title::Tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<String>, B: Into<String>, C: Into<String>> From<(A, B, C)> for Title {
    fn from((a, b, c): (A, B, C)) -> Self {
        Title::Tuple(vec![a.into(), b.into(), c.into()])
    }
}
