use destructure::Destructure;
use vodca::References;

use crate::entity::{
    Customer, CustomerId, CustomerName, CustomerPhone, DailyRentalRate, IsGold, Movie, MovieId,
    MovieTitle,
};

/// The part of a [`Movie`] a rental keeps. The rate here is the one charged on return.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct RentalMovie {
    id: MovieId,
    title: MovieTitle,
    daily_rental_rate: DailyRentalRate,
}

impl RentalMovie {
    pub fn new(id: MovieId, title: MovieTitle, daily_rental_rate: DailyRentalRate) -> Self {
        Self {
            id,
            title,
            daily_rental_rate,
        }
    }
}

impl From<&Movie> for RentalMovie {
    fn from(movie: &Movie) -> Self {
        Self::new(*movie.id(), movie.title().clone(), *movie.daily_rental_rate())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct RentalCustomer {
    id: CustomerId,
    name: CustomerName,
    phone: CustomerPhone,
    is_gold: IsGold,
}

impl RentalCustomer {
    pub fn new(id: CustomerId, name: CustomerName, phone: CustomerPhone, is_gold: IsGold) -> Self {
        Self {
            id,
            name,
            phone,
            is_gold,
        }
    }
}

impl From<&Customer> for RentalCustomer {
    fn from(customer: &Customer) -> Self {
        Self::new(
            *customer.id(),
            customer.name().clone(),
            customer.phone().clone(),
            *customer.is_gold(),
        )
    }
}
