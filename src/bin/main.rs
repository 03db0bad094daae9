use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use pdr_core::analytics::{self, DamageFilter, FilterCriteria, Report, Selector};
use pdr_core::config::{Config, Overrides, Theme};
use pdr_core::form::{RecordForm, STEPS};
use pdr_core::import;
use pdr_core::local_mirror::LocalMirror;
use pdr_core::record::{Record, RecordPatch};
use pdr_core::record_store::SqlRecordStore;
use pdr_core::storage::DirStorage;
use pdr_core::tracker::{Snapshot, Tracker};
use pdr_core::{export, logging};

use std::error::Error;
use std::path::{Path, PathBuf};

type DefaultTracker = Tracker<SqlRecordStore, DirStorage>;
type CliResult = Result<(), Box<dyn Error>>;

fn main() {
    let cli = build_cli().get_matches();
    logging::init(cli.occurrences_of("verbose"));

    if let Err(error) = run(&cli) {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}

fn filter_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name("search")
            .long("search")
            .short("s")
            .help("Only records whose ship number, drawing number, reason or block name contain the term")
            .takes_value(true),
        Arg::with_name("department")
            .long("department")
            .help("Only records of the given department (or 'All')")
            .takes_value(true),
        Arg::with_name("team")
            .long("team")
            .help("Only records of the given team (or 'All')")
            .takes_value(true),
        Arg::with_name("damage")
            .long("damage")
            .help("Filter by damage")
            .possible_values(&["all", "yes", "no"])
            .case_insensitive(true)
            .default_value("all"),
    ]
}

fn id_arg() -> Arg<'static, 'static> {
    Arg::with_name("ID")
        .required(true)
        .index(1)
        .help("Id of the record")
}

fn set_arg() -> Arg<'static, 'static> {
    Arg::with_name("set")
        .long("set")
        .value_name("FIELD=VALUE")
        .help("Sets a field, given by name or column label (repeatable)")
        .takes_value(true)
        .multiple(true)
        .number_of_values(1)
}

fn build_cli() -> App<'static, 'static> {
    let list_cmd = SubCommand::with_name("list")
        .about("lists the (filtered) records, newest first")
        .args(&filter_args());

    let show_cmd = SubCommand::with_name("show")
        .about("shows every field of a single record")
        .arg(id_arg());

    let create_cmd = SubCommand::with_name("create")
        .about("creates a new record")
        .arg(set_arg());

    let update_cmd = SubCommand::with_name("update")
        .about("overwrites fields of an existing record")
        .arg(id_arg())
        .arg(set_arg());

    let delete_cmd = SubCommand::with_name("delete")
        .about("deletes a record")
        .arg(id_arg());

    let import_cmd = SubCommand::with_name("import")
        .about("imports all rows of CSV files or workbooks (all or nothing)")
        .arg(
            Arg::with_name("FILES")
                .required(true)
                .multiple(true)
                .index(1)
                .help("Files or glob patterns (.csv, .xlsx, .xls, .ods)"),
        );

    let export_cmd = SubCommand::with_name("export")
        .about("exports the (filtered) records into an .xlsx workbook")
        .args(&filter_args())
        .arg(
            Arg::with_name("out")
                .long("out")
                .short("o")
                .help("Target directory (defaults to the workspace)")
                .takes_value(true),
        );

    let analytics_cmd = SubCommand::with_name("analytics")
        .about("prints the aggregates of the (filtered) records")
        .args(&filter_args())
        .arg(
            Arg::with_name("top")
                .long("top")
                .help("Number of entries in the ranking charts (defaults to the configured value)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("Prints the aggregates as JSON"),
        );

    let theme_cmd = SubCommand::with_name("theme")
        .about("shows or sets the theme preference")
        .arg(
            Arg::with_name("NAME")
                .index(1)
                .possible_values(&["aurora", "oceanic", "industrial", "frost"])
                .case_insensitive(true)
                .help("The new theme"),
        );

    App::new("PDR Tracker")
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Tracks post-delivery revisions (PDR) with an offline fallback")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("WORKSPACE")
                .required(true)
                .index(1)
                .help("Directory holding the local mirror and settings"),
        )
        .arg(
            Arg::with_name("database")
                .long("database")
                .short("d")
                .env("PDR_DATABASE_URL")
                .help("Record store database (defaults to <WORKSPACE>/pdr_records.sqlite)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("passphrase")
                .long("passphrase")
                .short("p")
                .env("PDR_PASSPHRASE")
                .hide_env_values(true)
                .help("Admin passphrase, required by all record commands")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("More log output (-v info, -vv debug), PDR_LOG overrides it"),
        )
        .subcommand(list_cmd)
        .subcommand(show_cmd)
        .subcommand(create_cmd)
        .subcommand(update_cmd)
        .subcommand(delete_cmd)
        .subcommand(import_cmd)
        .subcommand(export_cmd)
        .subcommand(analytics_cmd)
        .subcommand(theme_cmd)
}

fn run(cli: &ArgMatches) -> CliResult {
    let workspace = PathBuf::from(cli.value_of("WORKSPACE").unwrap_or("."));
    let storage = DirStorage::open(&workspace)?;

    if let Some(theme_cli) = cli.subcommand_matches("theme") {
        return theme(&storage, theme_cli);
    }

    let overrides = Overrides {
        database_url: cli.value_of("database").map(str::to_string),
    };
    let config = Config::load(&workspace, &storage, &overrides)?;
    if !config
        .admin_gate()?
        .verify(cli.value_of("passphrase").unwrap_or(""))
    {
        return Err("access denied, a valid admin passphrase is required (--passphrase)".into());
    }

    let mut tracker = Tracker::new(
        SqlRecordStore::new(&config.database_url),
        LocalMirror::new(storage),
    );
    print_status(&tracker.list()?);

    match cli.subcommand() {
        ("list", Some(cmd_cli)) => list_records(&tracker, cmd_cli),
        ("show", Some(cmd_cli)) => show_record(&tracker, cmd_cli),
        ("create", Some(cmd_cli)) => create_record(&mut tracker, cmd_cli),
        ("update", Some(cmd_cli)) => update_record(&mut tracker, cmd_cli),
        ("delete", Some(cmd_cli)) => delete_record(&mut tracker, cmd_cli),
        ("import", Some(cmd_cli)) => import_files(&mut tracker, cmd_cli),
        ("export", Some(cmd_cli)) => export_records(&tracker, &workspace, cmd_cli),
        ("analytics", Some(cmd_cli)) => print_analytics(&tracker, &config, cmd_cli),
        _ => {
            println!("Please specify the command you want to perform on the records.");
            println!("See --help for more information.");
            Ok(())
        }
    }
}

fn print_status(snapshot: &Snapshot) {
    println!("{}", snapshot.provenance);
    if let Some(archive_key) = &snapshot.archived_local_edits {
        println!(
            "Offline edits were replaced by the record store data, previous local data kept as '{}'.",
            archive_key
        );
    }
}

fn parse_id(cmd_cli: &ArgMatches) -> Result<i64, Box<dyn Error>> {
    let id = cmd_cli.value_of("ID").unwrap_or_default();
    id.parse()
        .map_err(|_| format!("'{}' is not a valid record id", id).into())
}

fn parse_criteria(cmd_cli: &ArgMatches) -> Result<FilterCriteria, Box<dyn Error>> {
    let damage = cmd_cli.value_of("damage").unwrap_or("all");
    Ok(FilterCriteria {
        search: cmd_cli.value_of("search").unwrap_or_default().to_string(),
        department: Selector::parse(cmd_cli.value_of("department").unwrap_or_default()),
        team: Selector::parse(cmd_cli.value_of("team").unwrap_or_default()),
        damage: DamageFilter::parse(damage)
            .ok_or_else(|| format!("unknown damage filter '{}'", damage))?,
    })
}

fn fill_form(form: &mut RecordForm, cmd_cli: &ArgMatches) -> CliResult {
    for assignment in cmd_cli.values_of("set").into_iter().flatten() {
        let mut parts = assignment.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(name), Some(value)) => {
                form.set(name, value)?;
            }
            _ => return Err(format!("expected FIELD=VALUE, got '{}'", assignment).into()),
        }
    }
    Ok(())
}

fn list_records(tracker: &DefaultTracker, cmd_cli: &ArgMatches) -> CliResult {
    let criteria = parse_criteria(cmd_cli)?;
    let records = criteria.apply(tracker.records());

    println!(
        "{:>6}  {:<4}  {:<10}  {:<14}  {:<14}  {:<10}  {:<14}  {:<8}  {:>12}",
        "No", "Year", "Month", "Dept", "Team", "Ship No", "Drawing No", "Damage", "Cost"
    );
    for record in &records {
        println!(
            "{:>6}  {:<4}  {:<10}  {:<14}  {:<14}  {:<10}  {:<14}  {:<8}  {:>12.2}",
            record.id,
            record.year,
            record.billing_month,
            record.department,
            record.team,
            record.ship_number,
            record.drawing_number,
            record.damage,
            record.cost_of_damage
        );
    }
    println!("Total Records: {}", records.len());

    Ok(())
}

fn show_record(tracker: &DefaultTracker, cmd_cli: &ArgMatches) -> CliResult {
    let id = parse_id(cmd_cli)?;
    let record = tracker
        .find(id)
        .ok_or_else(|| format!("no record with id {}", id))?;

    println!("Record {}", record.id);
    for step in STEPS.iter() {
        println!("[{}]", step.title);
        for field in step.fields {
            println!(
                "  {:<32} {}",
                field.spec().label,
                record.get(*field).to_text()
            );
        }
    }
    Ok(())
}

fn create_record(tracker: &mut DefaultTracker, cmd_cli: &ArgMatches) -> CliResult {
    let mut form = RecordForm::new();
    fill_form(&mut form, cmd_cli)?;

    let snapshot = tracker.create(&form.finish())?;
    match snapshot.records.first() {
        Some(record) => println!("Created record {}", record.id),
        None => println!("Created record"),
    }
    Ok(())
}

fn update_record(tracker: &mut DefaultTracker, cmd_cli: &ArgMatches) -> CliResult {
    let id = parse_id(cmd_cli)?;
    let mut form = RecordForm::edit(
        tracker
            .find(id)
            .ok_or_else(|| format!("no record with id {}", id))?,
    );
    fill_form(&mut form, cmd_cli)?;

    let patch: RecordPatch = form.finish();
    tracker.update(id, &patch)?;
    println!("Updated record {}", id);
    Ok(())
}

fn delete_record(tracker: &mut DefaultTracker, cmd_cli: &ArgMatches) -> CliResult {
    let id = parse_id(cmd_cli)?;
    if tracker.delete(id)?.affected == 0 {
        return Err(format!("no record with id {}", id).into());
    }

    println!("Deleted record {}", id);
    Ok(())
}

fn import_files(tracker: &mut DefaultTracker, cmd_cli: &ArgMatches) -> CliResult {
    let mut paths = Vec::new();
    for pattern in cmd_cli.values_of("FILES").into_iter().flatten() {
        let matches = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
        if matches.is_empty() {
            return Err(format!("no file matches '{}'", pattern).into());
        }
        paths.extend(matches);
    }

    // Parse everything before touching any store, one bad file rejects the whole import.
    let mut rows = Vec::new();
    for path in &paths {
        let file_rows = import::read_file(path)?;
        println!("Read {} rows from {}", file_rows.len(), path.display());
        rows.extend(file_rows.iter().map(import::map_row));
    }

    if rows.is_empty() {
        println!("Nothing to import.");
        return Ok(());
    }

    let snapshot = tracker.bulk_import(&rows)?;
    println!("Imported {} records", snapshot.affected);
    Ok(())
}

fn export_records(tracker: &DefaultTracker, workspace: &Path, cmd_cli: &ArgMatches) -> CliResult {
    let criteria = parse_criteria(cmd_cli)?;
    let records: Vec<Record> = criteria
        .apply(tracker.records())
        .into_iter()
        .cloned()
        .collect();
    let out_dir = cmd_cli.value_of("out").map_or(workspace, Path::new);

    let path = export::export_to_dir(&records, out_dir, chrono::Utc::now().date_naive())?;
    println!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}

fn print_analytics(tracker: &DefaultTracker, config: &Config, cmd_cli: &ArgMatches) -> CliResult {
    let criteria = parse_criteria(cmd_cli)?;
    let top = match cmd_cli.value_of("top") {
        Some(top) => top
            .parse()
            .map_err(|_| format!("'{}' is not a valid number", top))?,
        None => config.top_n,
    };

    let records = criteria.apply(tracker.records());
    let report = Report::compute(&records, top);
    if cmd_cli.is_present("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let summary = &report.summary;
    println!("Total Revisions: {}", summary.revisions);
    println!("Total Cost: ¥{:.0}", summary.total_cost);
    println!("Total Manhours: {:.1}", summary.total_manhours);
    println!("Avg Manhours/Revision: {:.1}", summary.average_manhours);
    println!("Critical Errors (Damage): {}", summary.damaged);

    println!("Cost of Damage by Department:");
    for (department, cost) in &report.cost_by_department {
        println!("  {:<24} {:>12.0}", department, cost);
    }
    println!("Top Error Causes:");
    for (cause, count) in &report.error_causes {
        println!("  {:<24} {:>12}", cause, count);
    }
    println!("Monthly Manhour Trends:");
    for (month, hours) in &report.monthly_manhours {
        println!("  {:<24} {:>12.1}", month, hours);
    }
    println!("Cost Trend (by Month):");
    for entry in &report.monthly_cost_trend {
        println!(
            "  {:<24} {:>12.0} ({} revisions)",
            entry.month, entry.cost, entry.count
        );
    }
    println!(
        "Damage Ratio: {} with damage, {} without",
        report.damage_ratio.with_damage, report.damage_ratio.without_damage
    );

    let departments = analytics::unique_departments(tracker.records());
    let teams = analytics::unique_teams(tracker.records());
    println!("Departments: {}", departments.join(", "));
    println!("Teams: {}", teams.join(", "));
    Ok(())
}

fn theme(storage: &DirStorage, cmd_cli: &ArgMatches) -> CliResult {
    match cmd_cli.value_of("NAME") {
        Some(name) => {
            let theme: Theme = name.parse()?;
            theme.save(storage)?;
            println!("Theme set to {} ({})", theme, theme.display_name());
        }
        None => {
            let theme = Theme::load(storage)?;
            println!("Current theme: {} ({})", theme, theme.display_name());
        }
    }
    Ok(())
}
