use crate::record::Record;

use std::collections::BTreeSet;

/// Restricts a text attribute to one exact value, or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    All,
    Only(String),
}

impl Default for Selector {
    fn default() -> Self {
        Self::All
    }
}

impl Selector {
    /// "All" (any case) and the empty string select everything.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageFilter {
    All,
    Yes,
    No,
}

impl Default for DamageFilter {
    fn default() -> Self {
        Self::All
    }
}

impl DamageFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "yes" | "y" => Some(Self::Yes),
            "no" | "n" => Some(Self::No),
            _ => None,
        }
    }

    pub fn matches(self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Yes => record.has_damage(),
            Self::No => !record.has_damage(),
        }
    }
}

/// The active predicates of the record list, combined with AND.
///
/// An empty search term matches everything, otherwise it must be contained (ignoring case)
/// in the ship number, drawing number, reason of revision or block/drawing name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub search: String,
    pub department: Selector,
    pub team: Selector,
    pub damage: DamageFilter,
}

impl FilterCriteria {
    pub fn matches(&self, record: &Record) -> bool {
        self.matches_search(record)
            && self.department.matches(&record.department)
            && self.team.matches(&record.team)
            && self.damage.matches(record)
    }

    fn matches_search(&self, record: &Record) -> bool {
        let term = self.search.to_lowercase();
        [
            &record.ship_number,
            &record.drawing_number,
            &record.reason_of_revision,
            &record.block_name_or_drawing_name,
        ]
        .iter()
        .any(|value| value.to_lowercase().contains(&term))
    }

    /// The matching records, in their original order.
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

/// Distinct, non-empty departments in sorted order (the choices of the department selector).
pub fn unique_departments(records: &[Record]) -> Vec<String> {
    unique_values(records.iter().map(|record| record.department.as_str()))
}

pub fn unique_teams(records: &[Record]) -> Vec<String> {
    unique_values(records.iter().map(|record| record.team.as_str()))
}

fn unique_values<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
