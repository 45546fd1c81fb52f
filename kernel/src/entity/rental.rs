mod date_out;
mod date_returned;
mod fee;
mod id;
mod snapshot;

pub use self::{date_out::*, date_returned::*, fee::*, id::*, snapshot::*};
use crate::entity::{Customer, Movie};
use crate::KernelError;
use destructure::Destructure;
use vodca::References;

/// A rental is open until `date_returned` is set. Closing it is a one-way transition that also
/// fixes `rental_fee`.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Rental {
    id: RentalId,
    movie: RentalMovie,
    customer: RentalCustomer,
    date_out: DateOut,
    date_returned: Option<DateReturned>,
    rental_fee: Option<RentalFee>,
}

impl Rental {
    pub fn new(
        id: RentalId,
        movie: RentalMovie,
        customer: RentalCustomer,
        date_out: DateOut,
        date_returned: Option<DateReturned>,
        rental_fee: Option<RentalFee>,
    ) -> Self {
        Self {
            id,
            movie,
            customer,
            date_out,
            date_returned,
            rental_fee,
        }
    }

    /// Opens a rental holding copies of the movie and customer as they are right now.
    pub fn open(id: RentalId, movie: &Movie, customer: &Customer, date_out: DateOut) -> Self {
        Self::new(
            id,
            RentalMovie::from(movie),
            RentalCustomer::from(customer),
            date_out,
            None,
            None,
        )
    }

    pub fn is_open(&self) -> bool {
        self.date_returned.is_none()
    }

    pub fn close(self, date_returned: DateReturned) -> error_stack::Result<Self, KernelError> {
        if !self.is_open() {
            return Err(KernelError::AlreadyReturned.with_message("Return already processed."));
        }
        let fee = RentalFee::calculate(
            &self.date_out,
            &date_returned,
            self.movie.daily_rental_rate(),
        );
        Ok(self.reconstruct(|rental| {
            rental.date_returned = Some(date_returned);
            rental.rental_fee = Some(fee);
        }))
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use crate::entity::{
        Customer, CustomerId, CustomerName, CustomerPhone, DailyRentalRate, DateOut,
        DateReturned, Genre, GenreId, GenreName, IsGold, Movie, MovieId, MovieTitle,
        NumberInStock, Rental, RentalFee, RentalId,
    };
    use crate::KernelError;

    fn movie(rate: i32) -> Movie {
        Movie::new(
            MovieId::new(Uuid::new_v4()),
            MovieTitle::new("Terminator"),
            Genre::new(GenreId::new(Uuid::new_v4()), GenreName::new("Action")),
            NumberInStock::new(3),
            DailyRentalRate::new(rate),
        )
    }

    fn customer() -> Customer {
        Customer::new(
            CustomerId::new(Uuid::new_v4()),
            CustomerName::new("Mosh Hamedani"),
            CustomerPhone::new("12345"),
            IsGold::new(true),
        )
    }

    #[test]
    fn open_copies_movie_and_customer() {
        let movie = movie(2);
        let customer = customer();
        let now = OffsetDateTime::now_utc();
        let rental = Rental::open(
            RentalId::new(Uuid::new_v4()),
            &movie,
            &customer,
            DateOut::new(now),
        );

        assert!(rental.is_open());
        assert_eq!(rental.movie().id(), movie.id());
        assert_eq!(rental.movie().title(), movie.title());
        assert_eq!(rental.movie().daily_rental_rate(), movie.daily_rental_rate());
        assert_eq!(rental.customer().id(), customer.id());
        assert_eq!(rental.customer().name(), customer.name());
        assert_eq!(rental.customer().phone(), customer.phone());
        assert_eq!(rental.customer().is_gold(), customer.is_gold());
        assert!(rental.rental_fee().is_none());
    }

    #[test]
    fn close_charges_elapsed_days() -> error_stack::Result<(), KernelError> {
        let now = OffsetDateTime::now_utc();
        let rental = Rental::open(
            RentalId::new(Uuid::new_v4()),
            &movie(2),
            &customer(),
            DateOut::new(now - Duration::days(3)),
        );

        let rental = rental.close(DateReturned::new(now))?;
        assert!(!rental.is_open());
        assert_eq!(rental.date_returned(), &Some(DateReturned::new(now)));
        assert_eq!(rental.rental_fee(), &Some(RentalFee::new(6)));
        Ok(())
    }

    #[test]
    fn same_day_return_is_free() -> error_stack::Result<(), KernelError> {
        let now = OffsetDateTime::now_utc();
        let rental = Rental::open(
            RentalId::new(Uuid::new_v4()),
            &movie(5),
            &customer(),
            DateOut::new(now - Duration::hours(23)),
        );

        let rental = rental.close(DateReturned::new(now))?;
        assert_eq!(rental.rental_fee(), &Some(RentalFee::new(0)));
        Ok(())
    }

    #[test]
    fn second_close_is_rejected() -> error_stack::Result<(), KernelError> {
        let now = OffsetDateTime::now_utc();
        let rental = Rental::open(
            RentalId::new(Uuid::new_v4()),
            &movie(2),
            &customer(),
            DateOut::new(now - Duration::days(1)),
        )
        .close(DateReturned::new(now))?;

        let report = rental
            .close(DateReturned::new(now + Duration::days(5)))
            .expect_err("rental is already closed");
        assert_eq!(report.current_context(), &KernelError::AlreadyReturned);
        Ok(())
    }
}
