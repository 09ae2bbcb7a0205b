//! Transactional maintenance of a reservation's running aggregates.
//!
//! Every child-row write calls [`touch_reservation`] inside the same
//! transaction as its own statement. The parent row is always stamped with
//! the acting user and time; a non-zero money delta additionally applies
//! atomic SQL increments to the raw sums and upserts the per-currency slice.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_types::Numeric;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::money::AggregateDelta;
use crate::domain::ports::StorageError;

use super::schema::{reservation_currency_totals, reservations};

diesel::define_sql_function! {
    /// PostgreSQL `GREATEST`, used to clamp per-currency totals at zero.
    fn greatest(a: Numeric, b: Numeric) -> Numeric;
}

/// Stamp the parent reservation and fold `delta` into its aggregates.
///
/// Passing `None` (or a zero delta) still updates `updated_by` and
/// `updated_at` so any child mutation is visible on the parent row.
///
/// # Errors
///
/// Returns [`StorageError::NotFound`] when the reservation row does not
/// exist, which rolls back the surrounding transaction.
pub(super) async fn touch_reservation(
    conn: &mut AsyncPgConnection,
    reservation_id: Uuid,
    actor: Uuid,
    delta: Option<&AggregateDelta>,
) -> Result<(), StorageError> {
    let now = Utc::now();
    let increments = delta.filter(|d| !d.is_zero());

    // The parent UPDATE holds the reservation row lock for the rest of the
    // transaction; concurrent adjusters serialize here, so the pre-image
    // read below cannot race another delta.
    let affected = match increments {
        Some(d) => {
            diesel::update(reservations::table.find(reservation_id))
                .set((
                    reservations::total_price.eq(reservations::total_price + d.total),
                    reservations::amount_paid.eq(reservations::amount_paid + d.paid),
                    reservations::updated_by.eq(actor),
                    reservations::updated_at.eq(now),
                ))
                .execute(conn)
                .await?
        }
        None => {
            diesel::update(reservations::table.find(reservation_id))
                .set((
                    reservations::updated_by.eq(actor),
                    reservations::updated_at.eq(now),
                ))
                .execute(conn)
                .await?
        }
    };
    if affected == 0 {
        return Err(StorageError::not_found("reservation"));
    }

    if let Some(d) = increments {
        let code = d.currency.as_ref();
        let pre_image: Option<(Decimal, Decimal)> = reservation_currency_totals::table
            .find((reservation_id, code))
            .select((
                reservation_currency_totals::total_price,
                reservation_currency_totals::amount_paid,
            ))
            .first(conn)
            .await
            .optional()?;
        let (pre_total, pre_paid) = pre_image.unwrap_or((Decimal::ZERO, Decimal::ZERO));
        if pre_total + d.total < Decimal::ZERO || pre_paid + d.paid < Decimal::ZERO {
            tracing::warn!(
                %reservation_id,
                currency = code,
                "currency totals clamped to zero"
            );
        }

        diesel::insert_into(reservation_currency_totals::table)
            .values((
                reservation_currency_totals::reservation_id.eq(reservation_id),
                reservation_currency_totals::currency.eq(code),
                reservation_currency_totals::total_price.eq(greatest(Decimal::ZERO, d.total)),
                reservation_currency_totals::amount_paid.eq(greatest(Decimal::ZERO, d.paid)),
            ))
            .on_conflict((
                reservation_currency_totals::reservation_id,
                reservation_currency_totals::currency,
            ))
            .do_update()
            .set((
                reservation_currency_totals::total_price.eq(greatest(
                    Decimal::ZERO,
                    reservation_currency_totals::total_price + d.total,
                )),
                reservation_currency_totals::amount_paid.eq(greatest(
                    Decimal::ZERO,
                    reservation_currency_totals::amount_paid + d.paid,
                )),
            ))
            .execute(conn)
            .await?;
    }

    Ok(())
}
