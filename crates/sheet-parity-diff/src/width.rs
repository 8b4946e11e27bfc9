//! Column width comparison policies
//!
//! Snapshots only hold explicit widths. What an absent width means is decided
//! here, at comparison time, by a [`WidthPolicy`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use sheet_parity_core::ColumnRef;

use crate::display_float;

/// A width as shown in a comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidthValue {
    Explicit(f64),
    /// No explicit width; the application default applies
    Default,
}

impl WidthValue {
    pub fn as_explicit(&self) -> Option<f64> {
        match self {
            WidthValue::Explicit(w) => Some(*w),
            WidthValue::Default => None,
        }
    }
}

impl fmt::Display for WidthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidthValue::Explicit(w) => f.pad(&display_float(*w)),
            WidthValue::Default => f.pad("default"),
        }
    }
}

impl Serialize for WidthValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WidthValue::Explicit(w) => serializer.serialize_f64(*w),
            WidthValue::Default => serializer.serialize_str("default"),
        }
    }
}

/// How absent widths are filled in and when two widths count as equal
pub trait WidthPolicy {
    /// The comparable value for a possibly absent width
    fn resolve(&self, width: Option<f64>) -> WidthValue;

    fn matches(&self, original: &WidthValue, generated: &WidthValue) -> bool;

    fn compare(
        &self,
        column: ColumnRef,
        original: Option<f64>,
        generated: Option<f64>,
    ) -> WidthComparison {
        let original = self.resolve(original);
        let generated = self.resolve(generated);
        WidthComparison {
            column,
            matches: self.matches(&original, &generated),
            original,
            generated,
        }
    }
}

/// Absent widths become the symbol "default"; equality is exact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymbolicDefault;

impl WidthPolicy for SymbolicDefault {
    fn resolve(&self, width: Option<f64>) -> WidthValue {
        width.map_or(WidthValue::Default, WidthValue::Explicit)
    }

    fn matches(&self, original: &WidthValue, generated: &WidthValue) -> bool {
        original == generated
    }
}

/// Absent widths become `standard_width`; widths closer than `tolerance` match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericTolerance {
    pub standard_width: f64,
    pub tolerance: f64,
}

impl Default for NumericTolerance {
    fn default() -> Self {
        Self {
            standard_width: 8.43,
            tolerance: 0.1,
        }
    }
}

impl NumericTolerance {
    fn number(&self, value: &WidthValue) -> f64 {
        value.as_explicit().unwrap_or(self.standard_width)
    }
}

impl WidthPolicy for NumericTolerance {
    fn resolve(&self, width: Option<f64>) -> WidthValue {
        WidthValue::Explicit(width.unwrap_or(self.standard_width))
    }

    fn matches(&self, original: &WidthValue, generated: &WidthValue) -> bool {
        (self.number(original) - self.number(generated)).abs() < self.tolerance
    }
}

/// Width policy chosen by configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthPolicyKind {
    #[default]
    Symbolic,
    Numeric(NumericTolerance),
}

impl WidthPolicy for WidthPolicyKind {
    fn resolve(&self, width: Option<f64>) -> WidthValue {
        match self {
            WidthPolicyKind::Symbolic => SymbolicDefault.resolve(width),
            WidthPolicyKind::Numeric(policy) => policy.resolve(width),
        }
    }

    fn matches(&self, original: &WidthValue, generated: &WidthValue) -> bool {
        match self {
            WidthPolicyKind::Symbolic => SymbolicDefault.matches(original, generated),
            WidthPolicyKind::Numeric(policy) => policy.matches(original, generated),
        }
    }
}

/// One row of a width comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidthComparison {
    pub column: ColumnRef,
    pub original: WidthValue,
    pub generated: WidthValue,
    pub matches: bool,
}

/// Compare the union of columns present in either map
///
/// Columns are ordered by index and only the first `limit` are kept.
pub fn compare_width_maps<P: WidthPolicy + ?Sized>(
    original: &BTreeMap<ColumnRef, f64>,
    generated: &BTreeMap<ColumnRef, f64>,
    limit: usize,
    policy: &P,
) -> Vec<WidthComparison> {
    let columns: BTreeSet<ColumnRef> = original.keys().chain(generated.keys()).copied().collect();
    columns
        .into_iter()
        .take(limit)
        .map(|col| policy.compare(col, original.get(&col).copied(), generated.get(&col).copied()))
        .collect()
}

/// Compare a fixed list of columns, present or not
pub fn compare_width_range<P, I>(
    original: &BTreeMap<ColumnRef, f64>,
    generated: &BTreeMap<ColumnRef, f64>,
    columns: I,
    policy: &P,
) -> Vec<WidthComparison>
where
    P: WidthPolicy + ?Sized,
    I: IntoIterator<Item = ColumnRef>,
{
    columns
        .into_iter()
        .map(|col| policy.compare(col, original.get(&col).copied(), generated.get(&col).copied()))
        .collect()
}
