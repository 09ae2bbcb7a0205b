//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the deployed database exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.
//! `diesel print-schema` against a live database can regenerate them.

diesel::table! {
    /// Operator accounts.
    ///
    /// Rows are provisioned out of band; the application only reads them to
    /// resolve display names at login.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Human-readable display name.
        display_name -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Reservations, the parent aggregate for every bookable service row.
    ///
    /// `total_price` and `amount_paid` are raw running sums across all child
    /// rows regardless of currency and are only ever adjusted by atomic SQL
    /// increments; `reservation_currency_totals` carries the per-currency
    /// breakdown.
    reservations (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Human-facing reference code, unique across all reservations.
        reference_code -> Varchar,
        /// Operator who owns the reservation.
        owner_id -> Uuid,
        /// Lifecycle state: draft, confirmed, cancelled, or completed.
        status -> Varchar,
        /// Running sum of child totals, across currencies.
        total_price -> Numeric,
        /// Running sum of child payments, across currencies.
        amount_paid -> Numeric,
        /// Free-form operator notes.
        notes -> Nullable<Text>,
        /// Actor who created the row.
        created_by -> Uuid,
        /// Actor who last touched the row or any of its children.
        updated_by -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last touch timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-currency slice of a reservation's aggregate, maintained by upsert
    /// inside the same transaction as the child-row write.
    reservation_currency_totals (reservation_id, currency) {
        /// Parent reservation.
        reservation_id -> Uuid,
        /// Three-letter ISO 4217 code.
        #[max_length = 3]
        currency -> Varchar,
        /// Running total across this currency's child rows.
        total_price -> Numeric,
        /// Running payments across this currency's child rows.
        amount_paid -> Numeric,
    }
}

diesel::table! {
    /// Passengers attached to a reservation.
    pax (id) {
        id -> Uuid,
        reservation_id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        date_of_birth -> Nullable<Date>,
        dni_number -> Nullable<Varchar>,
        dni_expiration -> Nullable<Date>,
        passport_number -> Nullable<Varchar>,
        passport_expiration -> Nullable<Date>,
        created_by -> Uuid,
        updated_by -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Hotel stays.
    hotels (id) {
        id -> Uuid,
        reservation_id -> Uuid,
        hotel_name -> Varchar,
        location -> Varchar,
        check_in -> Timestamptz,
        check_out -> Timestamptz,
        booking_reference -> Nullable<Varchar>,
        #[max_length = 3]
        currency -> Varchar,
        total_price -> Numeric,
        amount_paid -> Numeric,
        created_by -> Uuid,
        updated_by -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Flight segments.
    flights (id) {
        id -> Uuid,
        reservation_id -> Uuid,
        origin -> Varchar,
        destination -> Varchar,
        carrier -> Nullable<Varchar>,
        departs_at -> Timestamptz,
        arrives_at -> Timestamptz,
        booking_reference -> Nullable<Varchar>,
        #[max_length = 3]
        currency -> Varchar,
        total_price -> Numeric,
        amount_paid -> Numeric,
        created_by -> Uuid,
        updated_by -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Cruise legs.
    cruises (id) {
        id -> Uuid,
        reservation_id -> Uuid,
        ship_name -> Varchar,
        departure_port -> Varchar,
        arrival_port -> Varchar,
        departs_at -> Timestamptz,
        arrives_at -> Timestamptz,
        booking_reference -> Nullable<Varchar>,
        #[max_length = 3]
        currency -> Varchar,
        total_price -> Numeric,
        amount_paid -> Numeric,
        created_by -> Uuid,
        updated_by -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ground transfers.
    transfers (id) {
        id -> Uuid,
        reservation_id -> Uuid,
        pickup_location -> Varchar,
        dropoff_location -> Varchar,
        pickup_at -> Timestamptz,
        dropoff_at -> Nullable<Timestamptz>,
        booking_reference -> Nullable<Varchar>,
        #[max_length = 3]
        currency -> Varchar,
        total_price -> Numeric,
        amount_paid -> Numeric,
        created_by -> Uuid,
        updated_by -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Excursions and activities.
    excursions (id) {
        id -> Uuid,
        reservation_id -> Uuid,
        name -> Varchar,
        location -> Nullable<Varchar>,
        starts_at -> Nullable<Timestamptz>,
        ends_at -> Nullable<Timestamptz>,
        booking_reference -> Nullable<Varchar>,
        #[max_length = 3]
        currency -> Varchar,
        total_price -> Numeric,
        amount_paid -> Numeric,
        created_by -> Uuid,
        updated_by -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Medical assistance cover.
    medical_assists (id) {
        id -> Uuid,
        reservation_id -> Uuid,
        provider -> Varchar,
        description -> Nullable<Text>,
        starts_at -> Nullable<Timestamptz>,
        ends_at -> Nullable<Timestamptz>,
        booking_reference -> Nullable<Varchar>,
        #[max_length = 3]
        currency -> Varchar,
        total_price -> Numeric,
        amount_paid -> Numeric,
        created_by -> Uuid,
        updated_by -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Car rentals.
    car_rentals (id) {
        id -> Uuid,
        reservation_id -> Uuid,
        company -> Varchar,
        pickup_location -> Varchar,
        dropoff_location -> Varchar,
        pickup_at -> Timestamptz,
        dropoff_at -> Timestamptz,
        booking_reference -> Nullable<Varchar>,
        #[max_length = 3]
        currency -> Varchar,
        total_price -> Numeric,
        amount_paid -> Numeric,
        created_by -> Uuid,
        updated_by -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(reservations -> users (owner_id));
diesel::joinable!(reservation_currency_totals -> reservations (reservation_id));
diesel::joinable!(pax -> reservations (reservation_id));
diesel::joinable!(hotels -> reservations (reservation_id));
diesel::joinable!(flights -> reservations (reservation_id));
diesel::joinable!(cruises -> reservations (reservation_id));
diesel::joinable!(transfers -> reservations (reservation_id));
diesel::joinable!(excursions -> reservations (reservation_id));
diesel::joinable!(medical_assists -> reservations (reservation_id));
diesel::joinable!(car_rentals -> reservations (reservation_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    reservations,
    reservation_currency_totals,
    pax,
    hotels,
    flights,
    cruises,
    transfers,
    excursions,
    medical_assists,
    car_rentals,
);
