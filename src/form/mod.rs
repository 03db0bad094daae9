use crate::import::{normalize_date, Cell};
use crate::record::{Field, FieldKind, FieldValue, Record, RecordPatch};

use std::error::Error;
use std::fmt;

/// One page of the record editor.
#[derive(Debug)]
pub struct FormStep {
    pub title: &'static str,
    pub fields: &'static [Field],
}

pub static STEPS: [FormStep; 4] = [
    FormStep {
        title: "Project Details",
        fields: &[
            Field::Year,
            Field::BillingMonth,
            Field::Department,
            Field::GroupName,
            Field::Team,
            Field::ResponsibleTeam,
            Field::ShipNumber,
            Field::IndustryNumber,
            Field::Origin,
        ],
    },
    FormStep {
        title: "Design Info",
        fields: &[
            Field::RevisionSeriesNumber,
            Field::RevisionNumber,
            Field::BlockNameOrDrawingName,
            Field::DrawingNumber,
            Field::ManhourSpent,
            Field::IssuanceDate,
            Field::OriginalTDreamsDelivery,
            Field::Designer,
            Field::Checker,
            Field::RevisedBy,
        ],
    },
    FormStep {
        title: "Error Analysis",
        fields: &[
            Field::ReasonOfRevision,
            Field::DesignUpdateCode,
            Field::FromDNumber,
            Field::GeneralCauseOfError,
            Field::TypeOfError,
            Field::DetailCauseOfError,
        ],
    },
    FormStep {
        title: "Impact & Tracing",
        fields: &[
            Field::Damage,
            Field::NumberOfPieceWithDamage,
            Field::NumberOfPieceWithoutDamage,
            Field::CostOfDamage,
            Field::RevisionFamilyNumber,
            Field::Remarks,
            Field::AddInfo,
            Field::UpdateInfo,
        ],
    },
];

#[derive(Debug)]
pub enum FormError {
    UnknownField { name: String },
    ReadOnlyField { field: Field },
}
pub type Result<T> = std::result::Result<T, FormError>;

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField { name } => write!(f, "unknown record field '{}'", name),
            Self::ReadOnlyField { field } => {
                write!(f, "field '{}' is assigned by the store", field.name())
            }
        }
    }
}
impl Error for FormError {}

/// Multi-step editor producing the partial record of a create or update.
///
/// A new form starts empty (unset fields take the store defaults), an edit form starts
/// with every value of the edited record. Steps only group the fields, any field can be
/// set at any time.
#[derive(Debug, Clone)]
pub struct RecordForm {
    patch: RecordPatch,
    editing: Option<i64>,
    step: usize,
}

impl RecordForm {
    pub fn new() -> Self {
        Self {
            patch: RecordPatch::default(),
            editing: None,
            step: 0,
        }
    }

    pub fn edit(record: &Record) -> Self {
        Self {
            patch: record.to_patch(),
            editing: Some(record.id),
            step: 0,
        }
    }

    /// Id of the edited record, None when creating.
    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub fn title(&self) -> &'static str {
        match self.editing {
            Some(_) => "Edit Revision",
            None => "New Revision Entry",
        }
    }

    /// Sets a field (addressed by canonical name or any of its labels) from user input.
    ///
    /// Numeric input that does not parse is stored as 0. Date input is accepted as
    /// YYYY-MM-DD and stored as MM/DD/YYYY.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<Field> {
        let field = Field::lookup(name).ok_or_else(|| FormError::UnknownField {
            name: name.to_string(),
        })?;

        let value = match field.kind() {
            FieldKind::Id => return Err(FormError::ReadOnlyField { field }),
            FieldKind::Date if raw.trim().is_empty() => String::new(),
            FieldKind::Date => normalize_date(&Cell::Text(raw.trim().to_string())),
            _ => raw.to_string(),
        };
        self.patch.set(field, FieldValue::Text(value));

        Ok(field)
    }

    /// Current value of a field as shown in the editor (unset fields show their default).
    pub fn value(&self, field: Field) -> String {
        let record = Record::from_patch(self.editing.unwrap_or_default(), &self.patch);
        match field.kind() {
            FieldKind::Date => date_input(&record.get(field).to_text()),
            _ => record.get(field).to_text(),
        }
    }

    pub fn current_step(&self) -> &'static FormStep {
        &STEPS[self.step]
    }

    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn next_step(&mut self) {
        self.step = (self.step + 1).min(STEPS.len() - 1);
    }

    pub fn previous_step(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    pub fn is_first_step(&self) -> bool {
        self.step == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.step == STEPS.len() - 1
    }

    pub fn finish(self) -> RecordPatch {
        self.patch
    }
}

impl Default for RecordForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Stored MM/DD/YYYY as YYYY-MM-DD (zero padded), empty for anything else.
pub fn date_input(stored: &str) -> String {
    let parts: Vec<_> = stored.split('/').collect();
    if parts.len() != 3 {
        return String::new();
    }
    format!("{}-{:0>2}-{:0>2}", parts[2], parts[0], parts[1])
}
