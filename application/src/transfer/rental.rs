use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{
    DestructRental, DestructRentalCustomer, DestructRentalMovie, Rental, RentalCustomer,
    RentalMovie,
};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RentalMovieDto {
    pub id: Uuid,
    pub title: String,
    pub daily_rental_rate: i32,
}

impl From<RentalMovie> for RentalMovieDto {
    fn from(value: RentalMovie) -> Self {
        let DestructRentalMovie {
            id,
            title,
            daily_rental_rate,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            daily_rental_rate: daily_rental_rate.into(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RentalCustomerDto {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub is_gold: bool,
}

impl From<RentalCustomer> for RentalCustomerDto {
    fn from(value: RentalCustomer) -> Self {
        let DestructRentalCustomer {
            id,
            name,
            phone,
            is_gold,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            is_gold: is_gold.into(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RentalDto {
    pub id: Uuid,
    pub movie: RentalMovieDto,
    pub customer: RentalCustomerDto,
    pub date_out: OffsetDateTime,
    pub date_returned: Option<OffsetDateTime>,
    pub rental_fee: Option<i64>,
}

impl From<Rental> for RentalDto {
    fn from(value: Rental) -> Self {
        let DestructRental {
            id,
            movie,
            customer,
            date_out,
            date_returned,
            rental_fee,
        } = value.into_destruct();
        Self {
            id: id.into(),
            movie: RentalMovieDto::from(movie),
            customer: RentalCustomerDto::from(customer),
            date_out: date_out.into(),
            date_returned: date_returned.map(Into::into),
            rental_fee: rental_fee.map(Into::into),
        }
    }
}

#[derive(Debug)]
pub struct GetRentalDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct LookupRentalDto {
    pub customer_id: Uuid,
    pub movie_id: Uuid,
}

#[derive(Debug)]
pub struct CreateRentalDto {
    pub customer_id: Uuid,
    pub movie_id: Uuid,
}

#[derive(Debug)]
pub struct ReturnRentalDto {
    pub customer_id: Uuid,
    pub movie_id: Uuid,
}

#[derive(Debug)]
pub struct ReturnRentalByIdDto {
    pub id: Uuid,
}
