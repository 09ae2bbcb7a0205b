//! Passenger (pax) data model.
//!
//! Passengers hang off a reservation and carry identity documents validated
//! by the document policy. Pax rows have no monetary component; mutations
//! still touch the parent reservation's audit stamp with a zero delta.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::policies::documents::{self, DocumentInput, DocumentValues};
use crate::domain::policies::coerce;
use crate::domain::DomainError;

/// Passenger row as served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pax {
    /// Stable identifier.
    pub id: Uuid,
    /// Parent reservation.
    pub reservation_id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth, when known.
    pub date_of_birth: Option<NaiveDate>,
    /// DNI number, when supplied.
    pub dni_number: Option<String>,
    /// DNI expiration date, when supplied.
    pub dni_expiration: Option<NaiveDate>,
    /// Passport number, when supplied.
    pub passport_number: Option<String>,
    /// Passport expiration date, when supplied.
    pub passport_expiration: Option<NaiveDate>,
    /// Actor who created the row.
    pub created_by: Uuid,
    /// Actor who last modified the row.
    pub updated_by: Uuid,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

/// Raw passenger fields, as supplied by the transport layer.
///
/// The same shape serves create and update; validation differs per operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaxPayload {
    /// Raw given name.
    pub first_name: Option<String>,
    /// Raw family name.
    pub last_name: Option<String>,
    /// Raw date of birth.
    pub date_of_birth: Option<String>,
    /// Raw DNI number.
    pub dni_number: Option<String>,
    /// Raw DNI expiration date.
    pub dni_expiration: Option<String>,
    /// Raw passport number.
    pub passport_number: Option<String>,
    /// Raw passport expiration date.
    pub passport_expiration: Option<String>,
}

impl PaxPayload {
    fn dni_input(&self) -> DocumentInput<'_> {
        DocumentInput {
            number_field: "dniNumber",
            expiration_field: "dniExpiration",
            number: self.dni_number.as_deref(),
            expiration: self.dni_expiration.as_deref(),
        }
    }

    fn passport_input(&self) -> DocumentInput<'_> {
        DocumentInput {
            number_field: "passportNumber",
            expiration_field: "passportExpiration",
            number: self.passport_number.as_deref(),
            expiration: self.passport_expiration.as_deref(),
        }
    }
}

/// Validated create payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPax {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth, when supplied.
    pub date_of_birth: Option<NaiveDate>,
    /// DNI document fields.
    pub dni: DocumentValues,
    /// Passport document fields.
    pub passport: DocumentValues,
}

impl NewPax {
    /// Validate a raw create payload.
    ///
    /// Requires both names and at least one identity document number.
    pub fn from_payload(payload: &PaxPayload) -> Result<Self, DomainError> {
        let first_name = coerce::required_text("firstName", payload.first_name.as_deref())?;
        let last_name = coerce::required_text("lastName", payload.last_name.as_deref())?;
        let date_of_birth = payload
            .date_of_birth
            .as_deref()
            .map(|raw| coerce::calendar_date("dateOfBirth", raw))
            .transpose()?;

        let (dni, passport) =
            documents::check_create(payload.dni_input(), payload.passport_input())?;

        Ok(Self {
            first_name,
            last_name,
            date_of_birth,
            dni,
            passport,
        })
    }
}

/// Validated update payload, carrying only the fields the payload supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaxChanges {
    /// New given name, when supplied.
    pub first_name: Option<String>,
    /// New family name, when supplied.
    pub last_name: Option<String>,
    /// New date of birth, when supplied.
    pub date_of_birth: Option<NaiveDate>,
    /// Supplied DNI document fields.
    pub dni: DocumentValues,
    /// Supplied passport document fields.
    pub passport: DocumentValues,
}

impl PaxChanges {
    /// Validate a raw update payload.
    ///
    /// Omitted fields stay untouched; supplied document fields still enforce
    /// the number/expiration pairing.
    pub fn from_payload(payload: &PaxPayload) -> Result<Self, DomainError> {
        let first_name = coerce::optional_text("firstName", payload.first_name.as_deref())?;
        let last_name = coerce::optional_text("lastName", payload.last_name.as_deref())?;
        let date_of_birth = payload
            .date_of_birth
            .as_deref()
            .map(|raw| coerce::calendar_date("dateOfBirth", raw))
            .transpose()?;

        let (dni, passport) =
            documents::check_update(payload.dni_input(), payload.passport_input())?;

        Ok(Self {
            first_name,
            last_name,
            date_of_birth,
            dni,
            passport,
        })
    }

    /// Whether the payload carried no changes at all.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.date_of_birth.is_none()
            && self.dni == DocumentValues::default()
            && self.passport == DocumentValues::default()
    }
}
