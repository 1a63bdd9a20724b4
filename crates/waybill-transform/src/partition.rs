//! Grouping of co-indexed source and mapped datasets by one column's value.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::warn;
use waybill_model::{CellValue, SourceRecord, SourceTable, TargetRecord};

use crate::TransformError;

/// Hashable identity of a non-missing group value.
///
/// Numbers compare by value (`1` and `1.0` are one key, `-0.0` folds into
/// `0.0`); numbers and text are never equal.
#[derive(Debug, PartialEq, Eq, Hash)]
enum GroupKey<'a> {
    Text(&'a str),
    Number(u64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

fn group_key(value: &CellValue) -> Option<GroupKey<'_>> {
    match value {
        CellValue::Missing => None,
        CellValue::Text(text) => Some(GroupKey::Text(text)),
        CellValue::Number(v) if v.is_nan() => None,
        CellValue::Number(v) => Some(GroupKey::Number((*v + 0.0).to_bits())),
        CellValue::Bool(flag) => Some(GroupKey::Bool(*flag)),
        CellValue::DateTime(stamp) => Some(GroupKey::DateTime(*stamp)),
    }
}

/// Records sharing one group value, borrowed from both datasets.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    key: &'a CellValue,
    indices: Vec<usize>,
    source: &'a SourceTable,
    mapped: &'a [TargetRecord],
}

impl<'a> Group<'a> {
    /// The value as first seen in the source.
    pub fn key(&self) -> &'a CellValue {
        self.key
    }

    /// Row positions in both datasets, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn source_records(&self) -> impl Iterator<Item = SourceRecord<'a>> {
        self.indices.iter().filter_map(|&idx| self.source.record(idx))
    }

    pub fn target_records(&self) -> impl Iterator<Item = &'a TargetRecord> {
        self.indices.iter().filter_map(|&idx| self.mapped.get(idx))
    }

    pub fn source_len(&self) -> usize {
        self.source_records().count()
    }

    pub fn target_len(&self) -> usize {
        self.target_records().count()
    }
}

/// Groups in first-seen order, plus the number of records left out because
/// their group value was missing.
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    groups: Vec<Group<'a>>,
    excluded: usize,
}

impl<'a> Partition<'a> {
    pub fn groups(&self) -> &[Group<'a>] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn excluded(&self) -> usize {
        self.excluded
    }

    /// Records that landed in some group.
    pub fn grouped(&self) -> usize {
        self.groups.iter().map(|group| group.indices.len()).sum()
    }
}

/// Split both datasets by the value of `group_column` in the source.
///
/// Missing values belong to no group. An absent column gives zero groups.
pub fn partition<'a>(
    source: &'a SourceTable,
    mapped: &'a [TargetRecord],
    group_column: &str,
) -> Result<Partition<'a>, TransformError> {
    if source.height() != mapped.len() {
        return Err(TransformError::LengthMismatch {
            source_rows: source.height(),
            mapped_rows: mapped.len(),
        });
    }
    if !source.has_column(group_column) {
        warn!(column = group_column, "grouping column not found; no groups produced");
    }

    let mut slots: HashMap<GroupKey<'a>, usize> = HashMap::new();
    let mut groups: Vec<Group<'a>> = Vec::new();
    let mut excluded = 0;
    for (idx, value) in source.column_values(group_column).enumerate() {
        let Some(key) = group_key(value) else {
            excluded += 1;
            continue;
        };
        let slot = *slots.entry(key).or_insert_with(|| {
            groups.push(Group {
                key: value,
                indices: Vec::new(),
                source,
                mapped,
            });
            groups.len() - 1
        });
        groups[slot].indices.push(idx);
    }
    Ok(Partition { groups, excluded })
}
