//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data`, so they only
//! depend on domain services and stay testable without I/O: tests build the
//! same state over fixture ports instead of wiring persistence.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::bookings::car_rental::CarRental;
use crate::domain::bookings::cruise::Cruise;
use crate::domain::bookings::excursion::Excursion;
use crate::domain::bookings::flight::Flight;
use crate::domain::bookings::hotel::Hotel;
use crate::domain::bookings::medical_assist::MedicalAssist;
use crate::domain::bookings::transfer::Transfer;
use crate::domain::ports::{BookingRepository, LoginService, PaxRepository, ReservationRepository};
use crate::domain::{BookingService, PaxService, ReservationService};

/// Parameter object bundling every port implementation the HTTP surface
/// needs.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Authentication port behind `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Reservation persistence.
    pub reservations: Arc<dyn ReservationRepository>,
    /// Passenger persistence.
    pub pax: Arc<dyn PaxRepository>,
    /// Hotel stay persistence.
    pub hotels: Arc<dyn BookingRepository<Hotel>>,
    /// Flight persistence.
    pub flights: Arc<dyn BookingRepository<Flight>>,
    /// Cruise persistence.
    pub cruises: Arc<dyn BookingRepository<Cruise>>,
    /// Ground transfer persistence.
    pub transfers: Arc<dyn BookingRepository<Transfer>>,
    /// Excursion persistence.
    pub excursions: Arc<dyn BookingRepository<Excursion>>,
    /// Medical assistance persistence.
    pub medical_assists: Arc<dyn BookingRepository<MedicalAssist>>,
    /// Car rental persistence.
    pub car_rentals: Arc<dyn BookingRepository<CarRental>>,
    /// Wall clock injected into the date policies.
    pub clock: Arc<dyn Clock>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Authentication port behind `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Reservation use-cases.
    pub reservations: ReservationService,
    /// Passenger use-cases.
    pub pax: PaxService,
    /// Hotel stay use-cases.
    pub hotels: BookingService<Hotel>,
    /// Flight use-cases.
    pub flights: BookingService<Flight>,
    /// Cruise use-cases.
    pub cruises: BookingService<Cruise>,
    /// Ground transfer use-cases.
    pub transfers: BookingService<Transfer>,
    /// Excursion use-cases.
    pub excursions: BookingService<Excursion>,
    /// Medical assistance use-cases.
    pub medical_assists: BookingService<MedicalAssist>,
    /// Car rental use-cases.
    pub car_rentals: BookingService<CarRental>,
}

impl HttpState {
    /// Construct the handler state by wiring services over `ports`.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            reservations,
            pax,
            hotels,
            flights,
            cruises,
            transfers,
            excursions,
            medical_assists,
            car_rentals,
            clock,
        } = ports;

        Self {
            login,
            reservations: ReservationService::new(Arc::clone(&reservations)),
            pax: PaxService::new(pax, Arc::clone(&reservations)),
            hotels: BookingService::new(hotels, Arc::clone(&reservations), Arc::clone(&clock)),
            flights: BookingService::new(flights, Arc::clone(&reservations), Arc::clone(&clock)),
            cruises: BookingService::new(cruises, Arc::clone(&reservations), Arc::clone(&clock)),
            transfers: BookingService::new(
                transfers,
                Arc::clone(&reservations),
                Arc::clone(&clock),
            ),
            excursions: BookingService::new(
                excursions,
                Arc::clone(&reservations),
                Arc::clone(&clock),
            ),
            medical_assists: BookingService::new(
                medical_assists,
                Arc::clone(&reservations),
                Arc::clone(&clock),
            ),
            car_rentals: BookingService::new(car_rentals, reservations, clock),
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
