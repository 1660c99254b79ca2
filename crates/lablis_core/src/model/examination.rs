//! Examination (pemeriksaan) domain model.
//!
//! # Responsibility
//! - Define the read model returned by list/get use-cases.
//! - Define the typed create input and its validation rules.
//!
//! # Invariants
//! - Serialized field names match the join query column names
//!   (`id_pemeriksaan`, `nama_lengkap`, ...), which form the wire schema.
//! - `specimen_type` is never empty: unlinked specimens read as
//!   [`NO_SPECIMEN_PLACEHOLDER`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned examination identifier.
pub type ExaminationId = i64;

/// Rendered in place of a specimen type when no specimen is linked.
pub const NO_SPECIMEN_PLACEHOLDER: &str = "-";

/// Urgency of an examination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Routine request, processed in normal queue order.
    Rutin,
    /// Urgent request.
    Cito,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rutin => "rutin",
            Self::Cito => "cito",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rutin" => Some(Self::Rutin),
            "cito" => Some(Self::Cito),
            _ => None,
        }
    }
}

/// Processing state of an examination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Menunggu,
    Diproses,
    Selesai,
    Dibatalkan,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Menunggu => "menunggu",
            Self::Diproses => "diproses",
            Self::Selesai => "selesai",
            Self::Dibatalkan => "dibatalkan",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "menunggu" => Some(Self::Menunggu),
            "diproses" => Some(Self::Diproses),
            "selesai" => Some(Self::Selesai),
            "dibatalkan" => Some(Self::Dibatalkan),
            _ => None,
        }
    }
}

/// Examination row joined with its patient, doctor, specimen and service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExaminationRecord {
    #[serde(rename = "id_pemeriksaan")]
    pub id: ExaminationId,
    #[serde(rename = "nama_lengkap")]
    pub patient_name: String,
    #[serde(rename = "id_pasien")]
    pub patient_id: i64,
    #[serde(rename = "nama_dokter")]
    pub doctor_name: String,
    #[serde(rename = "id_dokter")]
    pub doctor_id: i64,
    /// Specimen type, or `"-"` when the examination has no specimen yet.
    #[serde(rename = "jenis_spesimen")]
    pub specimen_type: String,
    #[serde(rename = "nama_layanan")]
    pub service_name: String,
    #[serde(rename = "jenis_pemeriksaan")]
    pub examination_type: String,
    #[serde(rename = "tanggal_permintaan")]
    pub requested_at: NaiveDateTime,
    #[serde(rename = "prioritas")]
    pub priority: Priority,
    #[serde(rename = "status_permintaan")]
    pub status: RequestStatus,
    #[serde(rename = "catatan_dokter")]
    pub doctor_notes: Option<String>,
}

impl ExaminationRecord {
    /// Returns whether a specimen is linked to this examination.
    pub fn has_specimen(&self) -> bool {
        self.specimen_type != NO_SPECIMEN_PLACEHOLDER
    }
}

/// Create request for a new examination.
///
/// Carries references only; denormalized names are resolved by the read
/// join, never supplied by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExaminationInput {
    #[serde(rename = "id_pasien")]
    pub patient_id: i64,
    #[serde(rename = "id_dokter")]
    pub doctor_id: i64,
    #[serde(rename = "id_layanan")]
    pub service_id: i64,
    #[serde(rename = "id_spesimen", default, skip_serializing_if = "Option::is_none")]
    pub specimen_id: Option<i64>,
    #[serde(rename = "jenis_pemeriksaan")]
    pub examination_type: String,
    #[serde(rename = "tanggal_permintaan")]
    pub requested_at: NaiveDateTime,
    #[serde(rename = "prioritas")]
    pub priority: Priority,
    #[serde(rename = "status_permintaan")]
    pub status: RequestStatus,
    #[serde(rename = "catatan_dokter", default)]
    pub doctor_notes: Option<String>,
}

impl ExaminationInput {
    /// Checks field-level rules that the schema cannot express.
    ///
    /// Reference existence is left to foreign keys.
    pub fn validate(&self) -> Result<(), ExaminationValidationError> {
        let references = [
            ("id_pasien", Some(self.patient_id)),
            ("id_dokter", Some(self.doctor_id)),
            ("id_layanan", Some(self.service_id)),
            ("id_spesimen", self.specimen_id),
        ];
        for (field, value) in references {
            if let Some(value) = value {
                if value <= 0 {
                    return Err(ExaminationValidationError::NonPositiveReference { field, value });
                }
            }
        }

        if self.examination_type.trim().is_empty() {
            return Err(ExaminationValidationError::EmptyExaminationType);
        }

        Ok(())
    }
}

/// Rejection reason for an [`ExaminationInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExaminationValidationError {
    NonPositiveReference { field: &'static str, value: i64 },
    EmptyExaminationType,
}

impl Display for ExaminationValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveReference { field, value } => {
                write!(f, "{field} must be a positive integer, got {value}")
            }
            Self::EmptyExaminationType => write!(f, "jenis_pemeriksaan cannot be empty"),
        }
    }
}

impl Error for ExaminationValidationError {}

#[cfg(test)]
mod tests {
    use super::{ExaminationInput, ExaminationValidationError, Priority, RequestStatus};
    use chrono::NaiveDate;

    fn sample_input() -> ExaminationInput {
        ExaminationInput {
            patient_id: 1,
            doctor_id: 2,
            service_id: 3,
            specimen_id: None,
            examination_type: "Hematologi lengkap".to_string(),
            requested_at: NaiveDate::from_ymd_opt(2024, 3, 18)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
            priority: Priority::Rutin,
            status: RequestStatus::Menunggu,
            doctor_notes: None,
        }
    }

    #[test]
    fn valid_input_passes() {
        assert_eq!(sample_input().validate(), Ok(()));
    }

    #[test]
    fn non_positive_reference_is_rejected() {
        let mut input = sample_input();
        input.doctor_id = 0;
        assert_eq!(
            input.validate(),
            Err(ExaminationValidationError::NonPositiveReference {
                field: "id_dokter",
                value: 0
            })
        );

        let mut input = sample_input();
        input.specimen_id = Some(-4);
        let err = input.validate().unwrap_err();
        assert_eq!(err.to_string(), "id_spesimen must be a positive integer, got -4");
    }

    #[test]
    fn blank_examination_type_is_rejected() {
        let mut input = sample_input();
        input.examination_type = "   ".to_string();
        assert_eq!(
            input.validate(),
            Err(ExaminationValidationError::EmptyExaminationType)
        );
    }

    #[test]
    fn enum_text_roundtrips_through_storage_form() {
        for priority in [Priority::Rutin, Priority::Cito] {
            assert_eq!(Priority::parse(priority.as_str()), Some(priority));
        }
        for status in [
            RequestStatus::Menunggu,
            RequestStatus::Diproses,
            RequestStatus::Selesai,
            RequestStatus::Dibatalkan,
        ] {
            assert_eq!(RequestStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn input_deserializes_from_wire_names_and_rejects_unknown_priority() {
        let json = r#"{
            "id_pasien": 1,
            "id_dokter": 2,
            "id_layanan": 3,
            "jenis_pemeriksaan": "Gula darah",
            "tanggal_permintaan": "2024-03-18T08:30:00",
            "prioritas": "cito",
            "status_permintaan": "diproses"
        }"#;
        let input: ExaminationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.priority, Priority::Cito);
        assert_eq!(input.status, RequestStatus::Diproses);
        assert_eq!(input.specimen_id, None);
        assert_eq!(input.doctor_notes, None);

        let bad = json.replace("\"cito\"", "\"asap\"");
        assert!(serde_json::from_str::<ExaminationInput>(&bad).is_err());
    }
}
