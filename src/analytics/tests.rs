use super::*;
use crate::record::Record;

fn record(department: &str, team: &str, damage: &str) -> Record {
    Record {
        department: department.to_string(),
        team: team.to_string(),
        damage: damage.to_string(),
        ..Record::default()
    }
}

fn with_cost(mut record: Record, month: &str, cost: f64, manhours: f64) -> Record {
    record.billing_month = month.to_string();
    record.cost_of_damage = cost;
    record.manhour_spent = manhours;
    record
}

fn refs(records: &[Record]) -> Vec<&Record> {
    records.iter().collect()
}

#[test]
fn department_and_damage_filters_compose() {
    let records = vec![
        record("Hull", "A", "Y"),
        record("Hull", "B", "N"),
        record("Machinery", "A", "Y"),
        record("Hull", "A", "Y and N"),
    ];
    let criteria = FilterCriteria {
        department: Selector::Only("Hull".to_string()),
        damage: DamageFilter::Yes,
        ..FilterCriteria::default()
    };

    let filtered = criteria.apply(&records);
    assert_eq!(filtered, vec![&records[0], &records[3]]);

    let criteria = FilterCriteria {
        damage: DamageFilter::No,
        team: Selector::Only("B".to_string()),
        ..FilterCriteria::default()
    };
    assert_eq!(criteria.apply(&records), vec![&records[1]]);
}

#[test]
fn default_criteria_match_everything() {
    let records = vec![record("", "", ""), record("Hull", "A", "Y")];
    assert_eq!(FilterCriteria::default().apply(&records).len(), 2);
}

#[test]
fn search_is_case_insensitive_over_identity_fields() {
    let mut by_ship = record("Hull", "A", "N");
    by_ship.ship_number = "S-1021".to_string();
    let mut by_reason = record("Hull", "A", "N");
    by_reason.reason_of_revision = "Owner requested S-10 change".to_string();
    let mut by_block = record("Hull", "A", "N");
    by_block.block_name_or_drawing_name = "Block s-10".to_string();
    let mut by_remarks = record("Hull", "A", "N");
    by_remarks.remarks = "S-10".to_string();
    let records = vec![by_ship, by_reason, by_block, by_remarks];

    let criteria = FilterCriteria {
        search: "s-10".to_string(),
        ..FilterCriteria::default()
    };
    assert_eq!(criteria.apply(&records).len(), 3);
}

#[test]
fn selector_and_damage_filter_parsing() {
    assert_eq!(Selector::parse("All"), Selector::All);
    assert_eq!(Selector::parse(""), Selector::All);
    assert_eq!(Selector::parse("Hull"), Selector::Only("Hull".to_string()));

    assert_eq!(DamageFilter::parse("YES"), Some(DamageFilter::Yes));
    assert_eq!(DamageFilter::parse("no"), Some(DamageFilter::No));
    assert_eq!(DamageFilter::parse("all"), Some(DamageFilter::All));
    assert_eq!(DamageFilter::parse("maybe"), None);
}

#[test]
fn unique_selector_values() {
    let records = vec![
        record("Outfitting", "B", ""),
        record("", "A", ""),
        record("Hull", "B", ""),
        record("Hull", "", ""),
    ];

    assert_eq!(unique_departments(&records), vec!["Hull", "Outfitting"]);
    assert_eq!(unique_teams(&records), vec!["A", "B"]);
}

#[test]
fn cost_by_department_is_sorted_and_limited() {
    let records = vec![
        with_cost(record("Hull", "", ""), "", 100.0, 0.0),
        with_cost(record("", "", ""), "", 300.0, 0.0),
        with_cost(record("Machinery", "", ""), "", 250.0, 0.0),
        with_cost(record("Hull", "", ""), "", 200.0, 0.0),
        with_cost(record("Piping", "", ""), "", 10.0, 0.0),
    ];

    assert_eq!(
        cost_by_department(&refs(&records), 3),
        vec![
            ("Hull".to_string(), 300.0),
            ("Unknown".to_string(), 300.0),
            ("Machinery".to_string(), 250.0),
        ]
    );
}

#[test]
fn error_causes_count_unspecified() {
    let mut records = vec![record("", "", ""); 4];
    records[0].general_cause_of_error = "Human error".to_string();
    records[2].general_cause_of_error = "Human error".to_string();

    assert_eq!(
        error_causes(&refs(&records), 5),
        vec![("Human error".to_string(), 2), ("Unspecified".to_string(), 2)]
    );
    assert_eq!(error_causes(&refs(&records), 1).len(), 1);
}

#[test]
fn many_groups_keep_first_seen_order_on_ties() {
    let records: Vec<_> = (0..2000)
        .map(|i| {
            let mut record = record("", "", "");
            record.general_cause_of_error = format!("cause-{}", i % 500);
            record
        })
        .collect();

    let causes = error_causes(&refs(&records), 1000);
    assert_eq!(causes.len(), 500);
    assert!(causes.iter().all(|(_, count)| *count == 4));
    assert_eq!(causes[0].0, "cause-0");
    assert_eq!(causes[499].0, "cause-499");
}

#[test]
fn monthly_manhours_follow_the_calendar() {
    let records = vec![
        with_cost(record("", "", ""), "March", 0.0, 5.0),
        with_cost(record("", "", ""), "Q1 close", 0.0, 1.0),
        with_cost(record("", "", ""), "January", 0.0, 2.0),
        with_cost(record("", "", ""), "", 0.0, 40.0),
        with_cost(record("", "", ""), "march", 0.0, 1.5),
        with_cost(record("", "", ""), "Backlog", 0.0, 3.0),
    ];

    assert_eq!(
        monthly_manhours(&refs(&records)),
        vec![
            ("January".to_string(), 2.0),
            ("March".to_string(), 6.5),
            ("Backlog".to_string(), 3.0),
            ("Q1 close".to_string(), 1.0),
        ]
    );
}

#[test]
fn monthly_cost_trend_counts_revisions() {
    let records = vec![
        with_cost(record("", "", ""), "May", 100.0, 0.0),
        with_cost(record("", "", ""), "", 50.0, 0.0),
        with_cost(record("", "", ""), "February", 20.0, 0.0),
        with_cost(record("", "", ""), "May", 30.0, 0.0),
    ];

    let trend = monthly_cost_trend(&refs(&records));
    let months: Vec<_> = trend.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(months, vec!["February", "May", "Unknown"]);
    assert_eq!(trend[1].cost, 130.0);
    assert_eq!(trend[1].count, 2);
    assert_eq!(trend[2].count, 1);
}

#[test]
fn summary_and_damage_ratio() {
    let records = vec![
        with_cost(record("", "", "Y"), "", 1000.0, 4.0),
        with_cost(record("", "", "N"), "", 0.0, 6.0),
        with_cost(record("", "", "Y and N"), "", 500.0, 2.0),
    ];
    let records = refs(&records);

    assert_eq!(
        summary(&records),
        Summary {
            revisions: 3,
            total_cost: 1500.0,
            total_manhours: 12.0,
            average_manhours: 4.0,
            damaged: 2,
        }
    );
    assert_eq!(
        damage_ratio(&records),
        DamageRatio {
            with_damage: 2,
            without_damage: 1,
        }
    );
}

#[test]
fn empty_sets_have_empty_aggregates() {
    let report = Report::compute(&[], 5);

    assert_eq!(report.summary, Summary::default());
    assert!(report.cost_by_department.is_empty());
    assert!(report.error_causes.is_empty());
    assert!(report.monthly_manhours.is_empty());
    assert!(report.monthly_cost_trend.is_empty());
    assert_eq!(report.damage_ratio, DamageRatio::default());
}
