/// Every attribute of the canonical record shape.
///
/// The record structs themselves stay plain (diesel and serde map them 1:1 to columns and
/// JSON keys), this enum allows import, export and the form to address fields generically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Year,
    BillingMonth,
    Department,
    GroupName,
    Team,
    ResponsibleTeam,
    ShipNumber,
    DrawingNumber,
    BlockNameOrDrawingName,
    IssuanceDate,
    OriginalTDreamsDelivery,
    RevisionNumber,
    RevisionSeriesNumber,
    RevisionFamilyNumber,
    IndustryNumber,
    ManhourSpent,
    Designer,
    Checker,
    RevisedBy,
    ReasonOfRevision,
    DesignUpdateCode,
    FromDNumber,
    TypeOfError,
    GeneralCauseOfError,
    DetailCauseOfError,
    Damage,
    NumberOfPieceWithDamage,
    NumberOfPieceWithoutDamage,
    CostOfDamage,
    Remarks,
    Origin,
    AddInfo,
    UpdateInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Id,
    Text,
    // Text stored as MM/DD/YYYY
    Date,
    Integer,
    Float,
}

/// Describes how a field is named in the different outside representations.
///
/// `label` is the long column header of spreadsheets, `aliases` the short headers some sources
/// use instead (highest priority first), `export_label` the header we write ourselves.
/// The canonical `name` doubles as the lower snake case fallback header.
#[derive(Debug)]
pub struct FieldSpec {
    pub field: Field,
    pub name: &'static str,
    pub kind: FieldKind,
    pub label: &'static str,
    pub aliases: &'static [&'static str],
    pub export_label: &'static str,
}

impl FieldSpec {
    /// Header names accepted on import, in priority order.
    pub fn accepted_headers(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.label)
            .chain(self.aliases.iter().cloned())
            .chain(std::iter::once(self.name))
    }
}

/// The field table, ordered like the exported spreadsheet columns.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        field: Field::Id,
        name: "id",
        kind: FieldKind::Id,
        label: "No",
        aliases: &[],
        export_label: "No",
    },
    FieldSpec {
        field: Field::Year,
        name: "year",
        kind: FieldKind::Integer,
        label: "Year",
        aliases: &[],
        export_label: "Year",
    },
    FieldSpec {
        field: Field::BillingMonth,
        name: "billing_month",
        kind: FieldKind::Text,
        label: "Billing Month",
        aliases: &["Month"],
        export_label: "Month",
    },
    FieldSpec {
        field: Field::Department,
        name: "department",
        kind: FieldKind::Text,
        label: "Department",
        aliases: &["Dept"],
        export_label: "Dept",
    },
    FieldSpec {
        field: Field::GroupName,
        name: "group_name",
        kind: FieldKind::Text,
        label: "Group",
        aliases: &[],
        export_label: "Group",
    },
    FieldSpec {
        field: Field::Team,
        name: "team",
        kind: FieldKind::Text,
        label: "Team",
        aliases: &[],
        export_label: "Team",
    },
    FieldSpec {
        field: Field::ResponsibleTeam,
        name: "responsible_team",
        kind: FieldKind::Text,
        label: "Responsible Team",
        aliases: &["Resp Team"],
        export_label: "Resp Team",
    },
    FieldSpec {
        field: Field::ShipNumber,
        name: "ship_number",
        kind: FieldKind::Text,
        label: "Ship Number",
        aliases: &["Ship No"],
        export_label: "Ship No",
    },
    FieldSpec {
        field: Field::DrawingNumber,
        name: "drawing_number",
        kind: FieldKind::Text,
        label: "Drawing Number",
        aliases: &["Drawing No"],
        export_label: "Drawing No",
    },
    FieldSpec {
        field: Field::BlockNameOrDrawingName,
        name: "block_name_or_drawing_name",
        kind: FieldKind::Text,
        label: "Block Name or Drawing Name",
        aliases: &["Block Name", "Block/Drawing Name"],
        export_label: "Block/Drawing Name",
    },
    FieldSpec {
        field: Field::IssuanceDate,
        name: "issuance_date",
        kind: FieldKind::Date,
        label: "Issuance Date",
        aliases: &[],
        export_label: "Issuance Date",
    },
    FieldSpec {
        field: Field::OriginalTDreamsDelivery,
        name: "original_t_dreams_delivery",
        kind: FieldKind::Date,
        label: "Original T-Dreams Delivery",
        aliases: &["Orig T-Dreams Del", "Orig Delivery"],
        export_label: "Orig Delivery",
    },
    FieldSpec {
        field: Field::RevisionNumber,
        name: "revision_number",
        kind: FieldKind::Text,
        label: "Revision Number",
        aliases: &["Rev"],
        export_label: "Rev",
    },
    FieldSpec {
        field: Field::RevisionSeriesNumber,
        name: "revision_series_number",
        kind: FieldKind::Text,
        label: "Revision Series Number",
        aliases: &["Series"],
        export_label: "Series",
    },
    FieldSpec {
        field: Field::RevisionFamilyNumber,
        name: "revision_family_number",
        kind: FieldKind::Text,
        label: "Revision Family Number",
        aliases: &["Family"],
        export_label: "Family",
    },
    FieldSpec {
        field: Field::IndustryNumber,
        name: "industry_number",
        kind: FieldKind::Text,
        label: "Industry Number",
        aliases: &["Ind No"],
        export_label: "Ind No",
    },
    FieldSpec {
        field: Field::ManhourSpent,
        name: "manhour_spent",
        kind: FieldKind::Float,
        label: "Manhour Spent",
        aliases: &["M/H"],
        export_label: "M/H",
    },
    FieldSpec {
        field: Field::Designer,
        name: "designer",
        kind: FieldKind::Text,
        label: "Designer",
        aliases: &[],
        export_label: "Designer",
    },
    FieldSpec {
        field: Field::Checker,
        name: "checker",
        kind: FieldKind::Text,
        label: "Checker",
        aliases: &[],
        export_label: "Checker",
    },
    FieldSpec {
        field: Field::RevisedBy,
        name: "revised_by",
        kind: FieldKind::Text,
        label: "Revised by",
        aliases: &["Revised By"],
        export_label: "Revised By",
    },
    FieldSpec {
        field: Field::ReasonOfRevision,
        name: "reason_of_revision",
        kind: FieldKind::Text,
        label: "Reason of Revision",
        aliases: &["Reason"],
        export_label: "Reason",
    },
    FieldSpec {
        field: Field::DesignUpdateCode,
        name: "design_update_code",
        kind: FieldKind::Text,
        label: "Design Update Code",
        aliases: &["Code"],
        export_label: "Code",
    },
    FieldSpec {
        field: Field::FromDNumber,
        name: "from_d_number",
        kind: FieldKind::Text,
        label: "From D Number",
        aliases: &["From D#"],
        export_label: "From D#",
    },
    FieldSpec {
        field: Field::TypeOfError,
        name: "type_of_error",
        kind: FieldKind::Text,
        label: "Type of Error",
        aliases: &["Error Type"],
        export_label: "Error Type",
    },
    FieldSpec {
        field: Field::GeneralCauseOfError,
        name: "general_cause_of_error",
        kind: FieldKind::Text,
        label: "General Cause of Error",
        aliases: &["General Cause"],
        export_label: "General Cause",
    },
    FieldSpec {
        field: Field::DetailCauseOfError,
        name: "detail_cause_of_error",
        kind: FieldKind::Text,
        label: "Detail Cause of Error",
        aliases: &["Detail Cause"],
        export_label: "Detail Cause",
    },
    FieldSpec {
        field: Field::Damage,
        name: "damage",
        kind: FieldKind::Text,
        label: "Damage",
        aliases: &[],
        export_label: "Damage",
    },
    FieldSpec {
        field: Field::NumberOfPieceWithDamage,
        name: "number_of_piece_with_damage",
        kind: FieldKind::Integer,
        label: "Number of Piece With Damage",
        aliases: &["Pcs Damage"],
        export_label: "Pcs Damage",
    },
    FieldSpec {
        field: Field::NumberOfPieceWithoutDamage,
        name: "number_of_piece_without_damage",
        kind: FieldKind::Integer,
        label: "Number of Piece Without Damage",
        aliases: &["Pcs No Damage"],
        export_label: "Pcs No Damage",
    },
    FieldSpec {
        field: Field::CostOfDamage,
        name: "cost_of_damage",
        kind: FieldKind::Float,
        label: "Cost of Damage ¥",
        aliases: &["Cost"],
        export_label: "Cost",
    },
    FieldSpec {
        field: Field::Remarks,
        name: "remarks",
        kind: FieldKind::Text,
        label: "Remarks",
        aliases: &[],
        export_label: "Remarks",
    },
    FieldSpec {
        field: Field::Origin,
        name: "origin",
        kind: FieldKind::Text,
        label: "Origin",
        aliases: &[],
        export_label: "Origin",
    },
    FieldSpec {
        field: Field::AddInfo,
        name: "add_info",
        kind: FieldKind::Text,
        label: "Add Info",
        aliases: &[],
        export_label: "Add Info",
    },
    FieldSpec {
        field: Field::UpdateInfo,
        name: "update_info",
        kind: FieldKind::Text,
        label: "Update Info",
        aliases: &[],
        export_label: "Update Info",
    },
];

impl Field {
    pub fn spec(self) -> &'static FieldSpec {
        FIELDS
            .iter()
            .find(|spec| spec.field == self)
            .unwrap_or(&FIELDS[0])
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn kind(self) -> FieldKind {
        self.spec().kind
    }

    /// Looks up a field by its canonical name or any of its labels (case insensitive).
    pub fn lookup(name: &str) -> Option<Field> {
        let name = name.trim();
        FIELDS
            .iter()
            .find(|spec| {
                spec.name.eq_ignore_ascii_case(name)
                    || spec.export_label.eq_ignore_ascii_case(name)
                    || spec
                        .accepted_headers()
                        .any(|header| header.eq_ignore_ascii_case(name))
            })
            .map(|spec| spec.field)
    }
}

/// A single, typed field value detached from any record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl FieldValue {
    /// Renders the value the way a spreadsheet cell would show it (12.0 becomes "12").
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => format_number(*value),
        }
    }

    pub fn as_i64(&self) -> i64 {
        match self {
            Self::Text(text) => parse_integer(text),
            Self::Integer(value) => *value,
            Self::Float(value) => value.trunc() as i64,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Text(text) => parse_float(text),
            Self::Integer(value) => *value as f64,
            Self::Float(value) => *value,
        }
    }
}

/// Integer parsing with the lenient defaults of the import: "12.7" is 12, garbage is 0.
pub fn parse_integer(text: &str) -> i64 {
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return value;
    }
    let value = parse_float(text);
    if value.is_finite() {
        value.trunc() as i64
    } else {
        0
    }
}

/// Float parsing with the lenient defaults of the import: garbage is 0.
pub fn parse_float(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
