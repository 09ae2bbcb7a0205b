//! Reservation aggregate root.
//!
//! A reservation owns its bookable service rows and passengers. Its running
//! totals are maintained incrementally by the aggregate adjuster; this module
//! only defines the entity shape, lifecycle statuses, and payload validation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::money::Currency;
use crate::domain::policies::coerce;
use crate::domain::DomainError;

/// Detail code attached when a status string is not a known lifecycle state.
pub const CODE_INVALID_STATUS: &str = "invalid_status";
/// Detail code attached when a lifecycle transition is not permitted.
pub const CODE_FORBIDDEN_TRANSITION: &str = "forbidden_transition";

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Being assembled; the initial state.
    Draft,
    /// Confirmed with the travellers.
    Confirmed,
    /// Cancelled; may not return to draft.
    Cancelled,
    /// Travel completed.
    Completed,
}

impl ReservationStatus {
    /// Storage representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Assert that moving from `self` to `next` is a permitted transition.
    ///
    /// A cancelled reservation must not be reopened as a draft; every other
    /// transition is allowed.
    pub fn check_transition(self, next: Self) -> Result<(), DomainError> {
        if self == Self::Cancelled && next == Self::Draft {
            return Err(DomainError::invalid_request(
                "a cancelled reservation cannot return to draft",
            )
            .with_details(json!({
                "field": "status",
                "code": CODE_FORBIDDEN_TRANSITION,
                "from": self.as_str(),
                "to": next.as_str(),
            })));
        }
        Ok(())
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a raw status string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown reservation status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for ReservationStatus {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "draft" => Ok(Self::Draft),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// Reservation row as served to clients.
///
/// `total_price` and `amount_paid` are raw running sums across all child
/// service rows regardless of currency; [`CurrencyTotal`] rows carry the
/// currency-correct breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Stable identifier.
    pub id: Uuid,
    /// Human-facing unique reference code.
    pub reference_code: String,
    /// Operator who owns this reservation.
    pub owner_id: Uuid,
    /// Lifecycle state.
    pub status: ReservationStatus,
    /// Running sum of child totals, across currencies.
    #[schema(value_type = String, example = "1250.00")]
    pub total_price: Decimal,
    /// Running sum of child payments, across currencies.
    #[schema(value_type = String, example = "400.00")]
    pub amount_paid: Decimal,
    /// Free-form operator notes.
    pub notes: Option<String>,
    /// Actor who created the row.
    pub created_by: Uuid,
    /// Actor who last touched the row or any of its children.
    pub updated_by: Uuid,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last touch instant.
    pub updated_at: DateTime<Utc>,
}

/// One currency's slice of a reservation's aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyTotal {
    /// Currency the amounts are denominated in.
    #[schema(value_type = String, example = "EUR")]
    pub currency: Currency,
    /// Running total across this currency's child rows.
    #[schema(value_type = String, example = "1250.00")]
    pub total_price: Decimal,
    /// Running payments across this currency's child rows.
    #[schema(value_type = String, example = "400.00")]
    pub amount_paid: Decimal,
}

/// A reservation joined with its per-currency aggregate rows.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationWithTotals {
    /// The reservation row.
    #[serde(flatten)]
    pub reservation: Reservation,
    /// Per-currency breakdown, ordered by currency code.
    pub currency_totals: Vec<CurrencyTotal>,
}

/// Raw create payload fields, as supplied by the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationPayload {
    /// Raw reference code.
    pub reference_code: Option<String>,
    /// Raw notes.
    pub notes: Option<String>,
}

/// Validated create payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    /// Unique human-facing reference code.
    pub reference_code: String,
    /// Free-form operator notes.
    pub notes: Option<String>,
}

impl NewReservation {
    /// Validate a raw create payload.
    pub fn from_payload(payload: &ReservationPayload) -> Result<Self, DomainError> {
        let reference_code =
            coerce::required_text("referenceCode", payload.reference_code.as_deref())?;
        let notes = coerce::optional_text("notes", payload.notes.as_deref())?;

        Ok(Self {
            reference_code,
            notes,
        })
    }
}

/// Raw patch payload fields, as supplied by the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationPatch {
    /// Raw status string.
    pub status: Option<String>,
    /// Raw notes.
    pub notes: Option<String>,
}

/// Validated patch, carrying only the fields the payload supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationChanges {
    /// New lifecycle state, when supplied.
    pub status: Option<ReservationStatus>,
    /// New notes, when supplied.
    pub notes: Option<String>,
}

impl ReservationChanges {
    /// Validate a raw patch against the persisted current status.
    pub fn from_patch(
        patch: &ReservationPatch,
        current_status: ReservationStatus,
    ) -> Result<Self, DomainError> {
        let status = patch
            .status
            .as_deref()
            .map(|raw| parse_status(raw))
            .transpose()?;
        if let Some(next) = status {
            current_status.check_transition(next)?;
        }

        let notes = coerce::optional_text("notes", patch.notes.as_deref())?;

        Ok(Self { status, notes })
    }

    /// Whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.notes.is_none()
    }
}

fn parse_status(raw: &str) -> Result<ReservationStatus, DomainError> {
    raw.trim().parse().map_err(|_| {
        coerce::field_error(
            "status",
            CODE_INVALID_STATUS,
            Some(raw),
            "status must be one of draft, confirmed, cancelled, completed",
        )
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ReservationStatus::Draft, "draft")]
    #[case(ReservationStatus::Confirmed, "confirmed")]
    #[case(ReservationStatus::Cancelled, "cancelled")]
    #[case(ReservationStatus::Completed, "completed")]
    fn status_round_trips_through_its_storage_form(
        #[case] status: ReservationStatus,
        #[case] raw: &str,
    ) {
        assert_eq!(status.as_str(), raw);
        assert_eq!(raw.parse::<ReservationStatus>().expect("known status"), status);

        let serialized = serde_json::to_value(status).expect("statuses serialize");
        assert_eq!(serialized, serde_json::json!(raw));
    }

    #[rstest]
    fn unknown_status_strings_are_rejected() {
        let err = "archived"
            .parse::<ReservationStatus>()
            .expect_err("unknown status must fail");
        assert_eq!(err, UnknownStatus("archived".to_owned()));
    }

    #[rstest]
    fn cancelled_cannot_return_to_draft() {
        let err = ReservationStatus::Cancelled
            .check_transition(ReservationStatus::Draft)
            .expect_err("reopening a cancelled reservation must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["code"], CODE_FORBIDDEN_TRANSITION);
        assert_eq!(details["from"], "cancelled");
        assert_eq!(details["to"], "draft");
    }

    #[rstest]
    #[case(ReservationStatus::Draft, ReservationStatus::Cancelled)]
    #[case(ReservationStatus::Cancelled, ReservationStatus::Confirmed)]
    #[case(ReservationStatus::Confirmed, ReservationStatus::Completed)]
    #[case(ReservationStatus::Completed, ReservationStatus::Draft)]
    fn other_transitions_are_permitted(
        #[case] from: ReservationStatus,
        #[case] to: ReservationStatus,
    ) {
        from.check_transition(to).expect("transition is permitted");
    }

    #[rstest]
    fn create_payload_requires_a_reference_code() {
        let err = NewReservation::from_payload(&ReservationPayload::default())
            .expect_err("missing reference code must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["field"], "referenceCode");
        assert_eq!(details["code"], coerce::CODE_MISSING_FIELD);
    }

    #[rstest]
    fn create_payload_trims_its_fields() {
        let new = NewReservation::from_payload(&ReservationPayload {
            reference_code: Some("  WF-2026-0042  ".to_owned()),
            notes: Some("  two rooms, late arrival  ".to_owned()),
        })
        .expect("valid payload");
        assert_eq!(new.reference_code, "WF-2026-0042");
        assert_eq!(new.notes.as_deref(), Some("two rooms, late arrival"));
    }

    #[rstest]
    fn patch_accepts_a_valid_transition() {
        let changes = ReservationChanges::from_patch(
            &ReservationPatch {
                status: Some("confirmed".to_owned()),
                notes: None,
            },
            ReservationStatus::Draft,
        )
        .expect("valid patch");
        assert_eq!(changes.status, Some(ReservationStatus::Confirmed));
        assert!(changes.notes.is_none());
        assert!(!changes.is_empty());
    }

    #[rstest]
    fn patch_rejects_unknown_status_strings() {
        let err = ReservationChanges::from_patch(
            &ReservationPatch {
                status: Some("archived".to_owned()),
                notes: None,
            },
            ReservationStatus::Draft,
        )
        .expect_err("unknown status must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["field"], "status");
        assert_eq!(details["code"], CODE_INVALID_STATUS);
    }

    #[rstest]
    fn patch_rejects_reopening_a_cancelled_reservation() {
        let err = ReservationChanges::from_patch(
            &ReservationPatch {
                status: Some("draft".to_owned()),
                notes: None,
            },
            ReservationStatus::Cancelled,
        )
        .expect_err("cancelled to draft must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["code"], CODE_FORBIDDEN_TRANSITION);
    }

    #[rstest]
    fn empty_patch_is_detectable() {
        let changes =
            ReservationChanges::from_patch(&ReservationPatch::default(), ReservationStatus::Draft)
                .expect("empty patch is valid");
        assert!(changes.is_empty());
    }
}
