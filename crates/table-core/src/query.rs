//! Select options, ordering, and the result of listing records.

use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

/// Sort direction for a single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse `field`, `field:asc` or `field:desc`.
    pub fn parse(spec: &str) -> Option<Self> {
        let parsed = match spec.rsplit_once(':') {
            Some((field, dir)) if dir.eq_ignore_ascii_case("desc") => Self::desc(field),
            Some((field, dir)) if dir.eq_ignore_ascii_case("asc") => Self::asc(field),
            _ => Self::asc(spec),
        };
        (!parsed.field.trim().is_empty()).then_some(parsed)
    }
}

/// Options for `select_records`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectOptions {
    /// Restrict the result to exactly these ids
    pub record_ids: Option<Vec<String>>,

    /// Sort keys, first-declared key dominates
    #[serde(default)]
    pub sorts: Vec<SortSpec>,

    /// Fields to request from the backend (remote only)
    pub fields: Option<Vec<String>>,
}

impl SelectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }
}

/// Stable multi-key sort on the string form of each field.
///
/// Keys are applied in reverse declared order with a stable sort, so the
/// first-declared key dominates and later keys break its ties. Comparison is
/// lexical; numeric columns do not sort numerically.
pub fn sort_records<R: Record>(records: &mut [R], sorts: &[SortSpec]) {
    for sort in sorts.iter().rev() {
        let field = sort.field.as_str();
        match sort.direction {
            SortDirection::Asc => records.sort_by_cached_key(|r| r.get_cell_value_as_string(field)),
            SortDirection::Desc => {
                records.sort_by_cached_key(|r| Reverse(r.get_cell_value_as_string(field)))
            }
        }
    }
}

/// Apply id filtering and sorting to records in backend order.
pub fn apply_select_options<R: Record>(mut records: Vec<R>, options: &SelectOptions) -> QueryResult<R> {
    if let Some(ids) = &options.record_ids {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        records.retain(|r| wanted.contains(r.id()));
    }
    sort_records(&mut records, &options.sorts);
    QueryResult::new(records)
}

/// Ordered records plus an identifier lookup built once.
#[derive(Debug, Clone)]
pub struct QueryResult<R> {
    records: Vec<R>,
    by_id: HashMap<String, usize>,
}

impl<R: Record> QueryResult<R> {
    pub fn new(records: Vec<R>) -> Self {
        let by_id = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id().to_string(), i))
            .collect();
        Self { records, by_id }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn get_record(&self, id: &str) -> Option<&R> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    pub fn record_ids(&self) -> Vec<&str> {
        self.records.iter().map(Record::id).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}

impl<'a, R> IntoIterator for &'a QueryResult<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
