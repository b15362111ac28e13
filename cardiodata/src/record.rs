use serde::Deserialize;
use thiserror::Error;

/// A binary-coded column held something other than 0 or 1.
///
/// The source dataset encodes its indicator fields strictly as 0/1, so
/// any other value means the database was loaded from bad data and the
/// whole view fails rather than rendering a partial table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("column '{column}' holds non-binary value {value}")]
pub struct FlagError {
    /// Database column the bad value came from.
    pub column: &'static str,
    /// The offending value.
    pub value: i64,
}

/// One clinical observation row, the fixed 13-column schema.
///
/// This struct is shared between the loader (which deserializes it
/// from CSV) and the web server (which reads it back from SQLite).
/// The CSV header spells the outcome column `DEATH_EVENT`; everywhere
/// else it is normalized to `death_event`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeartRecord {
    /// Age of the patient in years. The dataset contains non-integral
    /// ages (e.g. 60.667), so this is a float.
    pub age: f64,
    /// 0/1 — decrease of red blood cells or hemoglobin.
    pub anaemia: i64,
    /// Level of CPK enzyme in the blood (mcg/L).
    pub creatinine_phosphokinase: i64,
    /// 0/1 — whether the patient has diabetes.
    pub diabetes: i64,
    /// Percentage of blood leaving the heart at each contraction.
    pub ejection_fraction: i64,
    /// 0/1 — whether the patient has hypertension.
    pub high_blood_pressure: i64,
    /// Platelets in the blood (kiloplatelets/mL).
    pub platelets: f64,
    /// Level of serum creatinine in the blood (mg/dL).
    pub serum_creatinine: f64,
    /// Level of serum sodium in the blood (mEq/L).
    pub serum_sodium: i64,
    /// 0 female / 1 male.
    pub sex: i64,
    /// 0/1 — whether the patient smokes.
    pub smoking: i64,
    /// Follow-up period in days.
    pub time: i64,
    /// 0/1 — whether the patient died during the follow-up period.
    #[serde(rename = "DEATH_EVENT")]
    pub death_event: i64,
}

/// Human-readable column headers for the tabular view, in schema order.
pub const COLUMN_LABELS: [&str; 13] = [
    "Age",
    "Anaemia",
    "CPK Level",
    "Diabetes",
    "Ejection Fraction (%)",
    "High Blood Pressure",
    "Platelets",
    "Serum Creatinine",
    "Serum Sodium",
    "Gender",
    "Smoking",
    "Follow-up Period (days)",
    "Death Event",
];

/// Field name / description pairs for the glossary page.
pub const GLOSSARY: [(&str, &str); 13] = [
    ("age", "Age of the patient (years)"),
    ("anaemia", "Decrease of red blood cells or hemoglobin"),
    (
        "creatinine_phosphokinase",
        "Level of CPK enzyme in the blood (mcg/L)",
    ),
    ("diabetes", "If the patient has diabetes"),
    (
        "ejection_fraction",
        "Percentage of blood leaving the heart at each contraction",
    ),
    ("high_blood_pressure", "If the patient has hypertension"),
    ("platelets", "Platelets in the blood (kiloplatelets/mL)"),
    (
        "serum_creatinine",
        "Level of serum creatinine in the blood (mg/dL)",
    ),
    ("serum_sodium", "Level of serum sodium in the blood (mEq/L)"),
    ("sex", "Gender of the patient"),
    ("smoking", "If the patient smokes"),
    ("time", "Follow-up period (days)"),
    ("death_event", "If the patient died during the follow-up period"),
];

/// Map a 0/1 indicator to "No"/"Yes", rejecting anything else.
pub fn yes_no(column: &'static str, value: i64) -> Result<&'static str, FlagError> {
    match value {
        0 => Ok("No"),
        1 => Ok("Yes"),
        _ => Err(FlagError { column, value }),
    }
}

/// Map the sex code to "Female"/"Male", rejecting anything else.
pub fn sex_label(value: i64) -> Result<&'static str, FlagError> {
    match value {
        0 => Ok("Female"),
        1 => Ok("Male"),
        _ => Err(FlagError {
            column: "sex",
            value,
        }),
    }
}

/// Render an age without a trailing `.0` when it is a whole number.
pub fn format_age(age: f64) -> String {
    if age.fract() == 0.0 {
        format!("{}", age as i64)
    } else {
        age.to_string()
    }
}

impl HeartRecord {
    /// Formats the record for display: indicator columns become
    /// Yes/No (Gender becomes Male/Female), platelets are rounded to
    /// the nearest whole number, and serum creatinine to two decimal
    /// places. Cells come back in [`COLUMN_LABELS`] order.
    pub fn display_row(&self) -> Result<Vec<String>, FlagError> {
        Ok(vec![
            format_age(self.age),
            yes_no("anaemia", self.anaemia)?.to_string(),
            self.creatinine_phosphokinase.to_string(),
            yes_no("diabetes", self.diabetes)?.to_string(),
            self.ejection_fraction.to_string(),
            yes_no("high_blood_pressure", self.high_blood_pressure)?.to_string(),
            format!("{}", self.platelets.round() as i64),
            format!("{:.2}", self.serum_creatinine),
            self.serum_sodium.to_string(),
            sex_label(self.sex)?.to_string(),
            yes_no("smoking", self.smoking)?.to_string(),
            self.time.to_string(),
            yes_no("death_event", self.death_event)?.to_string(),
        ])
    }
}
