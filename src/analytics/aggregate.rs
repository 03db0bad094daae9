use crate::record::Record;

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const UNKNOWN_DEPARTMENT: &str = "Unknown";
const UNSPECIFIED_CAUSE: &str = "Unspecified";
const UNKNOWN_MONTH: &str = "Unknown";

/// Totals shown on the dashboard cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub revisions: usize,
    pub total_cost: f64,
    pub total_manhours: f64,
    pub average_manhours: f64,
    pub damaged: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DamageRatio {
    pub with_damage: usize,
    pub without_damage: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCost {
    pub month: String,
    pub cost: f64,
    pub count: usize,
}

/// All aggregates of one (filtered) record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub summary: Summary,
    pub cost_by_department: Vec<(String, f64)>,
    pub error_causes: Vec<(String, usize)>,
    pub monthly_manhours: Vec<(String, f64)>,
    pub monthly_cost_trend: Vec<MonthlyCost>,
    pub damage_ratio: DamageRatio,
}

impl Report {
    pub fn compute(records: &[&Record], top: usize) -> Self {
        Self {
            summary: summary(records),
            cost_by_department: cost_by_department(records, top),
            error_causes: error_causes(records, top),
            monthly_manhours: monthly_manhours(records),
            monthly_cost_trend: monthly_cost_trend(records),
            damage_ratio: damage_ratio(records),
        }
    }
}

pub fn summary(records: &[&Record]) -> Summary {
    let revisions = records.len();
    let total_cost = records.iter().map(|r| r.cost_of_damage).sum();
    let total_manhours: f64 = records.iter().map(|r| r.manhour_spent).sum();
    let average_manhours = if revisions > 0 {
        total_manhours / revisions as f64
    } else {
        0.0
    };

    Summary {
        revisions,
        total_cost,
        total_manhours,
        average_manhours,
        damaged: records.iter().filter(|r| r.has_damage()).count(),
    }
}

/// Cost of damage per department, largest first, at most `top` entries.
pub fn cost_by_department(records: &[&Record], top: usize) -> Vec<(String, f64)> {
    let mut totals = group_by(records, |r| or_default(&r.department, UNKNOWN_DEPARTMENT), |r| {
        r.cost_of_damage
    });
    sort_descending(&mut totals);
    totals.truncate(top);
    totals
}

/// Number of records per general cause of error, most frequent first, at most `top` entries.
pub fn error_causes(records: &[&Record], top: usize) -> Vec<(String, usize)> {
    let mut counts = group_by(
        records,
        |r| or_default(&r.general_cause_of_error, UNSPECIFIED_CAUSE),
        |_| 1,
    );
    sort_descending(&mut counts);
    counts.truncate(top);
    counts
}

/// Manhours per billing month in calendar order. Records without month are left out.
pub fn monthly_manhours(records: &[&Record]) -> Vec<(String, f64)> {
    let with_month: Vec<&Record> = records
        .iter()
        .copied()
        .filter(|r| !r.billing_month.trim().is_empty())
        .collect();

    let mut totals = group_by(&with_month, |r| month_name(&r.billing_month), |r| {
        r.manhour_spent
    });
    totals.sort_by(|(a, _), (b, _)| compare_months(a, b));
    totals
}

/// Cost and number of revisions per billing month in calendar order.
pub fn monthly_cost_trend(records: &[&Record]) -> Vec<MonthlyCost> {
    let mut trend: Vec<MonthlyCost> = Vec::new();
    for record in records {
        let month = if record.billing_month.trim().is_empty() {
            UNKNOWN_MONTH.to_string()
        } else {
            month_name(&record.billing_month)
        };

        match trend.iter_mut().find(|entry| entry.month == month) {
            Some(entry) => {
                entry.cost += record.cost_of_damage;
                entry.count += 1;
            }
            None => trend.push(MonthlyCost {
                month,
                cost: record.cost_of_damage,
                count: 1,
            }),
        }
    }

    trend.sort_by(|a, b| compare_months(&a.month, &b.month));
    trend
}

pub fn damage_ratio(records: &[&Record]) -> DamageRatio {
    let with_damage = records.iter().filter(|r| r.has_damage()).count();
    DamageRatio {
        with_damage,
        without_damage: records.len() - with_damage,
    }
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Canonical spelling of a month name ("march " is "March"), other names are kept.
fn month_name(value: &str) -> String {
    let value = value.trim();
    MONTHS
        .iter()
        .find(|month| month.eq_ignore_ascii_case(value))
        .map_or_else(|| value.to_string(), |month| month.to_string())
}

fn month_index(name: &str) -> Option<usize> {
    MONTHS.iter().position(|month| *month == name)
}

/// Calendar months first, anything else afterwards in alphabetical order.
fn compare_months(a: &str, b: &str) -> Ordering {
    match (month_index(a), month_index(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

// Groups keep first-seen order, so the stable sorts below break ties by appearance.
fn group_by<V, K, F>(records: &[&Record], key: K, value: F) -> Vec<(String, V)>
where
    V: std::ops::AddAssign,
    K: Fn(&Record) -> String,
    F: Fn(&Record) -> V,
{
    let mut groups: Vec<(String, V)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for record in records {
        let group = key(record);
        let value = value(record);
        match positions.get(&group) {
            Some(&position) => groups[position].1 += value,
            None => {
                positions.insert(group.clone(), groups.len());
                groups.push((group, value));
            }
        }
    }
    groups
}

fn sort_descending<V: PartialOrd>(groups: &mut [(String, V)]) {
    groups.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(Ordering::Equal));
}
