//! Medical assistance bookings.
//!
//! Assistance cover often has no fixed schedule, so both bounds are
//! optional; when both are present they may coincide.

use chrono::{DateTime, Utc};
use mockable::Clock;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::bookings::{
    money_on_create, money_on_update, BookingRecord, BookingResource, MoneyChanges, MoneyPayload,
};
use crate::domain::money::{BookingMoney, Currency};
use crate::domain::policies::date_range::{self, DateRangeRules};
use crate::domain::policies::{coerce, Requirement};
use crate::domain::DomainError;

const DATE_RULES: DateRangeRules = DateRangeRules {
    start_field: "startsAt",
    end_field: "endsAt",
    requirement: Requirement::None,
    allow_equal: true,
    min_hours_before_start: None,
};

/// Medical assistance row as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicalAssist {
    /// Stable identifier.
    pub id: Uuid,
    /// Parent reservation.
    pub reservation_id: Uuid,
    /// Assistance provider.
    pub provider: String,
    /// Cover description, when supplied.
    pub description: Option<String>,
    /// Cover start, when fixed.
    pub starts_at: Option<DateTime<Utc>>,
    /// Cover end, when fixed.
    pub ends_at: Option<DateTime<Utc>>,
    /// Supplier booking reference, when issued.
    pub booking_reference: Option<String>,
    /// Currency the amounts are denominated in.
    #[schema(value_type = String, example = "EUR")]
    pub currency: Currency,
    /// Full price of the cover.
    pub total_price: Decimal,
    /// Amount already paid.
    pub amount_paid: Decimal,
    /// Actor who created the row.
    pub created_by: Uuid,
    /// Actor who last modified the row.
    pub updated_by: Uuid,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

impl MedicalAssist {
    /// Monetary triple carried by this row.
    pub fn money(&self) -> BookingMoney {
        BookingMoney::new(self.currency.clone(), self.total_price, self.amount_paid)
    }
}

impl BookingRecord for MedicalAssist {
    fn id(&self) -> Uuid {
        self.id
    }

    fn reservation_id(&self) -> Uuid {
        self.reservation_id
    }
}

/// Raw medical assistance fields, as supplied by the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicalAssistPayload {
    /// Raw provider name.
    pub provider: Option<String>,
    /// Raw cover description.
    pub description: Option<String>,
    /// Raw cover start.
    pub starts_at: Option<String>,
    /// Raw cover end.
    pub ends_at: Option<String>,
    /// Raw supplier booking reference.
    pub booking_reference: Option<String>,
    /// Raw monetary fields.
    pub money: MoneyPayload,
}

/// Validated insert payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedicalAssist {
    /// Assistance provider.
    pub provider: String,
    /// Cover description, when supplied.
    pub description: Option<String>,
    /// Cover start, when supplied.
    pub starts_at: Option<DateTime<Utc>>,
    /// Cover end, when supplied.
    pub ends_at: Option<DateTime<Utc>>,
    /// Supplier booking reference, when issued.
    pub booking_reference: Option<String>,
    /// Monetary triple.
    pub money: BookingMoney,
}

/// Validated partial-update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicalAssistChanges {
    /// New provider, when supplied.
    pub provider: Option<String>,
    /// New description, when supplied.
    pub description: Option<String>,
    /// New cover start, when supplied.
    pub starts_at: Option<DateTime<Utc>>,
    /// New cover end, when supplied.
    pub ends_at: Option<DateTime<Utc>>,
    /// New supplier booking reference, when supplied.
    pub booking_reference: Option<String>,
    /// Supplied monetary fields.
    pub money: MoneyChanges,
}

impl BookingResource for MedicalAssist {
    const KIND: &'static str = "medical assist";

    type Record = Self;
    type Payload = MedicalAssistPayload;
    type New = NewMedicalAssist;
    type Changes = MedicalAssistChanges;

    fn validate_create(
        payload: &MedicalAssistPayload,
        clock: &dyn Clock,
    ) -> Result<NewMedicalAssist, DomainError> {
        let provider = coerce::required_text("provider", payload.provider.as_deref())?;
        let description = coerce::optional_text("description", payload.description.as_deref())?;
        let dates = date_range::check_create(
            &DATE_RULES,
            payload.starts_at.as_deref(),
            payload.ends_at.as_deref(),
            clock,
        )?;
        let booking_reference =
            coerce::optional_text("bookingReference", payload.booking_reference.as_deref())?;
        let money = money_on_create(&payload.money)?;

        Ok(NewMedicalAssist {
            provider,
            description,
            starts_at: dates.start,
            ends_at: dates.end,
            booking_reference,
            money,
        })
    }

    fn validate_update(
        payload: &MedicalAssistPayload,
        current: &MedicalAssist,
        clock: &dyn Clock,
    ) -> Result<MedicalAssistChanges, DomainError> {
        let provider = coerce::optional_text("provider", payload.provider.as_deref())?;
        let description = coerce::optional_text("description", payload.description.as_deref())?;
        let dates = date_range::check_update(
            &DATE_RULES,
            payload.starts_at.as_deref(),
            payload.ends_at.as_deref(),
            current.starts_at,
            current.ends_at,
            clock,
        )?;
        let booking_reference =
            coerce::optional_text("bookingReference", payload.booking_reference.as_deref())?;
        let money = money_on_update(&payload.money, &current.money())?;

        Ok(MedicalAssistChanges {
            provider,
            description,
            starts_at: dates.start,
            ends_at: dates.end,
            booking_reference,
            money,
        })
    }
}
