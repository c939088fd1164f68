//! Veracity label encodings
//!
//! Two encodings exist for the same four labels and they use different
//! orderings:
//!
//! | label        | one-hot position | class index |
//! |--------------|------------------|-------------|
//! | `non-rumor`  | 0                | 2           |
//! | `false`      | 1                | 0           |
//! | `true`       | 2                | 1           |
//! | `unverified` | 3                | 3           |
//!
//! Downstream models depend on both, so neither is derived from the other.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::{PrepError, Result};

/// Number of label classes
pub const NUM_CLASSES: usize = 4;

/// Veracity label of a tree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Label {
    /// Not a rumor
    NonRumor,
    /// False rumor
    False,
    /// True rumor
    True,
    /// Unverified rumor
    Unverified,
}

impl Label {
    /// All labels in one-hot order
    pub const ALL: [Label; NUM_CLASSES] =
        [Label::NonRumor, Label::False, Label::True, Label::Unverified];

    /// Wire string of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::NonRumor => "non-rumor",
            Label::False => "false",
            Label::True => "true",
            Label::Unverified => "unverified",
        }
    }

    /// Position of the 1 in the one-hot encoding
    pub fn one_hot_index(&self) -> usize {
        match self {
            Label::NonRumor => 0,
            Label::False => 1,
            Label::True => 2,
            Label::Unverified => 3,
        }
    }

    /// Scalar class index
    pub fn class_index(&self) -> usize {
        match self {
            Label::False => 0,
            Label::True => 1,
            Label::NonRumor => 2,
            Label::Unverified => 3,
        }
    }

    /// One-hot row vector, shape `[1, NUM_CLASSES]`
    pub fn one_hot(&self) -> Array2<i64> {
        let mut encoded = Array2::zeros((1, NUM_CLASSES));
        encoded[[0, self.one_hot_index()]] = 1;
        encoded
    }

    /// Single-element class index vector
    pub fn index_array(&self) -> Array1<i64> {
        Array1::from_elem(1, self.class_index() as i64)
    }
}

impl FromStr for Label {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "non-rumor" => Ok(Label::NonRumor),
            "false" => Ok(Label::False),
            "true" => Ok(Label::True),
            "unverified" => Ok(Label::Unverified),
            other => Err(PrepError::format(format!("unknown label {:?}", other))),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-hot encode a label string (non-rumor, false, true, unverified order).
pub fn one_hot_label(label: &str) -> Result<Array2<i64>> {
    Ok(label.parse::<Label>()?.one_hot())
}

/// Class-index encode a label string (false, true, non-rumor, unverified order).
pub fn to_label(label: &str) -> Result<Array1<i64>> {
    Ok(label.parse::<Label>()?.index_array())
}
