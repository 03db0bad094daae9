// Database schema - must be kept up to date manually
pub mod schema;
use self::schema::pdr_records;

mod field;
pub use self::field::*;

use serde::{Deserialize, Serialize};

/// One Post-Delivery Revision as held by the stores and the working set.
///
/// Field order matches the `pdr_records` table (diesel maps positionally).
/// Missing JSON keys fall back to the defaults ("" and 0), so older mirror snapshots
/// still load.
#[derive(Debug, Clone, PartialEq, Default, Queryable, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub id: i64,

    pub department: String,
    pub group_name: String,
    pub team: String,
    pub year: i32,
    pub billing_month: String,
    pub ship_number: String,
    pub revision_series_number: String,
    pub revision_number: String,
    pub industry_number: String,
    pub block_name_or_drawing_name: String,
    pub drawing_number: String,
    pub issuance_date: String,
    pub original_t_dreams_delivery: String,
    pub manhour_spent: f64,
    pub responsible_team: String,
    pub origin: String,
    pub designer: String,
    pub checker: String,
    pub revised_by: String,
    pub reason_of_revision: String,
    pub design_update_code: String,
    pub from_d_number: String,
    pub type_of_error: String,
    pub detail_cause_of_error: String,
    pub general_cause_of_error: String,
    pub damage: String,
    pub number_of_piece_with_damage: i32,
    pub number_of_piece_without_damage: i32,
    pub cost_of_damage: f64,
    pub remarks: String,
    pub revision_family_number: String,
    pub add_info: String,
    pub update_info: String,
}

/// A partial record, `None` marks a field as unset.
///
/// Used for inserts (unset columns take the table defaults, the id is always left to the
/// store) and for updates (only set fields are overwritten, the id is never part of the
/// change set).
#[derive(Debug, Clone, PartialEq, Default, Insertable, AsChangeset)]
#[table_name = "pdr_records"]
pub struct RecordPatch {
    pub id: Option<i64>,

    pub department: Option<String>,
    pub group_name: Option<String>,
    pub team: Option<String>,
    pub year: Option<i32>,
    pub billing_month: Option<String>,
    pub ship_number: Option<String>,
    pub revision_series_number: Option<String>,
    pub revision_number: Option<String>,
    pub industry_number: Option<String>,
    pub block_name_or_drawing_name: Option<String>,
    pub drawing_number: Option<String>,
    pub issuance_date: Option<String>,
    pub original_t_dreams_delivery: Option<String>,
    pub manhour_spent: Option<f64>,
    pub responsible_team: Option<String>,
    pub origin: Option<String>,
    pub designer: Option<String>,
    pub checker: Option<String>,
    pub revised_by: Option<String>,
    pub reason_of_revision: Option<String>,
    pub design_update_code: Option<String>,
    pub from_d_number: Option<String>,
    pub type_of_error: Option<String>,
    pub detail_cause_of_error: Option<String>,
    pub general_cause_of_error: Option<String>,
    pub damage: Option<String>,
    pub number_of_piece_with_damage: Option<i32>,
    pub number_of_piece_without_damage: Option<i32>,
    pub cost_of_damage: Option<f64>,
    pub remarks: Option<String>,
    pub revision_family_number: Option<String>,
    pub add_info: Option<String>,
    pub update_info: Option<String>,
}

/// A record "has damage" as soon as its damage marker contains a 'Y' ("Y and N" included).
pub fn has_damage(damage: &str) -> bool {
    damage.contains('Y')
}

impl Record {
    pub fn has_damage(&self) -> bool {
        has_damage(&self.damage)
    }

    /// Materializes a partial record, unset fields take their defaults.
    pub fn from_patch(id: i64, patch: &RecordPatch) -> Self {
        let mut record = Self {
            id,
            ..Self::default()
        };
        record.apply(patch);
        record
    }

    /// Shallow merge: every field set in the patch overwrites ours, the id stays untouched.
    pub fn apply(&mut self, patch: &RecordPatch) {
        fn merge<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        merge(&mut self.department, &patch.department);
        merge(&mut self.group_name, &patch.group_name);
        merge(&mut self.team, &patch.team);
        merge(&mut self.year, &patch.year);
        merge(&mut self.billing_month, &patch.billing_month);
        merge(&mut self.ship_number, &patch.ship_number);
        merge(&mut self.revision_series_number, &patch.revision_series_number);
        merge(&mut self.revision_number, &patch.revision_number);
        merge(&mut self.industry_number, &patch.industry_number);
        merge(&mut self.block_name_or_drawing_name, &patch.block_name_or_drawing_name);
        merge(&mut self.drawing_number, &patch.drawing_number);
        merge(&mut self.issuance_date, &patch.issuance_date);
        merge(&mut self.original_t_dreams_delivery, &patch.original_t_dreams_delivery);
        merge(&mut self.manhour_spent, &patch.manhour_spent);
        merge(&mut self.responsible_team, &patch.responsible_team);
        merge(&mut self.origin, &patch.origin);
        merge(&mut self.designer, &patch.designer);
        merge(&mut self.checker, &patch.checker);
        merge(&mut self.revised_by, &patch.revised_by);
        merge(&mut self.reason_of_revision, &patch.reason_of_revision);
        merge(&mut self.design_update_code, &patch.design_update_code);
        merge(&mut self.from_d_number, &patch.from_d_number);
        merge(&mut self.type_of_error, &patch.type_of_error);
        merge(&mut self.detail_cause_of_error, &patch.detail_cause_of_error);
        merge(&mut self.general_cause_of_error, &patch.general_cause_of_error);
        merge(&mut self.damage, &patch.damage);
        merge(&mut self.number_of_piece_with_damage, &patch.number_of_piece_with_damage);
        merge(&mut self.number_of_piece_without_damage, &patch.number_of_piece_without_damage);
        merge(&mut self.cost_of_damage, &patch.cost_of_damage);
        merge(&mut self.remarks, &patch.remarks);
        merge(&mut self.revision_family_number, &patch.revision_family_number);
        merge(&mut self.add_info, &patch.add_info);
        merge(&mut self.update_info, &patch.update_info);
    }

    /// A patch with every field set to our current values (including the id).
    pub fn to_patch(&self) -> RecordPatch {
        let mut patch = RecordPatch::default();
        for spec in FIELDS {
            patch.set(spec.field, self.get(spec.field));
        }
        patch
    }

    pub fn get(&self, field: Field) -> FieldValue {
        use self::FieldValue::*;

        match field {
            Field::Id => Integer(self.id),
            Field::Year => Integer(i64::from(self.year)),
            Field::BillingMonth => Text(self.billing_month.clone()),
            Field::Department => Text(self.department.clone()),
            Field::GroupName => Text(self.group_name.clone()),
            Field::Team => Text(self.team.clone()),
            Field::ResponsibleTeam => Text(self.responsible_team.clone()),
            Field::ShipNumber => Text(self.ship_number.clone()),
            Field::DrawingNumber => Text(self.drawing_number.clone()),
            Field::BlockNameOrDrawingName => Text(self.block_name_or_drawing_name.clone()),
            Field::IssuanceDate => Text(self.issuance_date.clone()),
            Field::OriginalTDreamsDelivery => Text(self.original_t_dreams_delivery.clone()),
            Field::RevisionNumber => Text(self.revision_number.clone()),
            Field::RevisionSeriesNumber => Text(self.revision_series_number.clone()),
            Field::RevisionFamilyNumber => Text(self.revision_family_number.clone()),
            Field::IndustryNumber => Text(self.industry_number.clone()),
            Field::ManhourSpent => Float(self.manhour_spent),
            Field::Designer => Text(self.designer.clone()),
            Field::Checker => Text(self.checker.clone()),
            Field::RevisedBy => Text(self.revised_by.clone()),
            Field::ReasonOfRevision => Text(self.reason_of_revision.clone()),
            Field::DesignUpdateCode => Text(self.design_update_code.clone()),
            Field::FromDNumber => Text(self.from_d_number.clone()),
            Field::TypeOfError => Text(self.type_of_error.clone()),
            Field::GeneralCauseOfError => Text(self.general_cause_of_error.clone()),
            Field::DetailCauseOfError => Text(self.detail_cause_of_error.clone()),
            Field::Damage => Text(self.damage.clone()),
            Field::NumberOfPieceWithDamage => Integer(i64::from(self.number_of_piece_with_damage)),
            Field::NumberOfPieceWithoutDamage => {
                Integer(i64::from(self.number_of_piece_without_damage))
            }
            Field::CostOfDamage => Float(self.cost_of_damage),
            Field::Remarks => Text(self.remarks.clone()),
            Field::Origin => Text(self.origin.clone()),
            Field::AddInfo => Text(self.add_info.clone()),
            Field::UpdateInfo => Text(self.update_info.clone()),
        }
    }
}

impl RecordPatch {
    /// Sets a single field, converting the value to the field's column type.
    pub fn set(&mut self, field: Field, value: FieldValue) {
        let text = || Some(value.to_text());
        let integer = || Some(clamp_i32(value.as_i64()));
        let float = || Some(value.as_f64());

        match field {
            Field::Id => self.id = Some(value.as_i64()),
            Field::Year => self.year = integer(),
            Field::BillingMonth => self.billing_month = text(),
            Field::Department => self.department = text(),
            Field::GroupName => self.group_name = text(),
            Field::Team => self.team = text(),
            Field::ResponsibleTeam => self.responsible_team = text(),
            Field::ShipNumber => self.ship_number = text(),
            Field::DrawingNumber => self.drawing_number = text(),
            Field::BlockNameOrDrawingName => self.block_name_or_drawing_name = text(),
            Field::IssuanceDate => self.issuance_date = text(),
            Field::OriginalTDreamsDelivery => self.original_t_dreams_delivery = text(),
            Field::RevisionNumber => self.revision_number = text(),
            Field::RevisionSeriesNumber => self.revision_series_number = text(),
            Field::RevisionFamilyNumber => self.revision_family_number = text(),
            Field::IndustryNumber => self.industry_number = text(),
            Field::ManhourSpent => self.manhour_spent = float(),
            Field::Designer => self.designer = text(),
            Field::Checker => self.checker = text(),
            Field::RevisedBy => self.revised_by = text(),
            Field::ReasonOfRevision => self.reason_of_revision = text(),
            Field::DesignUpdateCode => self.design_update_code = text(),
            Field::FromDNumber => self.from_d_number = text(),
            Field::TypeOfError => self.type_of_error = text(),
            Field::GeneralCauseOfError => self.general_cause_of_error = text(),
            Field::DetailCauseOfError => self.detail_cause_of_error = text(),
            Field::Damage => self.damage = text(),
            Field::NumberOfPieceWithDamage => self.number_of_piece_with_damage = integer(),
            Field::NumberOfPieceWithoutDamage => self.number_of_piece_without_damage = integer(),
            Field::CostOfDamage => self.cost_of_damage = float(),
            Field::Remarks => self.remarks = text(),
            Field::Origin => self.origin = text(),
            Field::AddInfo => self.add_info = text(),
            Field::UpdateInfo => self.update_info = text(),
        }
    }

    /// The same patch with the client supplied id removed (ids are assigned by the stores).
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }

    /// True if no field besides the id is set.
    pub fn is_empty(&self) -> bool {
        self.without_id() == Self::default()
    }
}

fn clamp_i32(value: i64) -> i32 {
    if value > i64::from(i32::MAX) {
        i32::MAX
    } else if value < i64::from(i32::MIN) {
        i32::MIN
    } else {
        value as i32
    }
}
