use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Uma rows keyed by floating-player count.
///
/// On the wire the keys are strings (`"0"`..`"4"`), as stored by the rule
/// editor; they are parsed to integers once at load time so lookups never
/// deal with stringly keys.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(try_from = "BTreeMap<String, Vec<i32>>", into = "BTreeMap<String, Vec<i32>>")]
pub struct UmaMatrix {
    rows: BTreeMap<u8, Vec<i32>>,
}

impl UmaMatrix {
    /// Build a matrix whose keys are the row positions (0, 1, 2, ...).
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Self {
        rows.into_iter()
            .enumerate()
            .map(|(count, row)| (count as u8, row))
            .collect()
    }

    pub fn row(&self, floating_count: u8) -> Option<&[i32]> {
        self.rows.get(&floating_count).map(Vec::as_slice)
    }

    pub fn contains(&self, floating_count: u8) -> bool {
        self.rows.contains_key(&floating_count)
    }

    /// Rows in ascending floating-count order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[i32])> {
        self.rows.iter().map(|(count, row)| (*count, row.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<(u8, Vec<i32>)> for UmaMatrix {
    fn from_iter<I: IntoIterator<Item = (u8, Vec<i32>)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<BTreeMap<String, Vec<i32>>> for UmaMatrix {
    type Error = String;

    fn try_from(raw: BTreeMap<String, Vec<i32>>) -> Result<Self, Self::Error> {
        raw.into_iter()
            .map(|(key, row)| {
                key.trim()
                    .parse::<u8>()
                    .map(|count| (count, row))
                    .map_err(|_| format!("floating count key '{}' is not a small integer", key))
            })
            .collect()
    }
}

impl From<UmaMatrix> for BTreeMap<String, Vec<i32>> {
    fn from(matrix: UmaMatrix) -> Self {
        matrix
            .rows
            .into_iter()
            .map(|(count, row)| (count.to_string(), row))
            .collect()
    }
}
