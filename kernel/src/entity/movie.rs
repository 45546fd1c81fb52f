mod id;
mod rate;
mod stock;
mod title;

pub use self::{id::*, rate::*, stock::*, title::*};
use crate::entity::Genre;
use destructure::{Destructure, Mutation};
use vodca::References;

/// `genre` is a copy taken when the movie was last written, not a live reference.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Movie {
    id: MovieId,
    title: MovieTitle,
    genre: Genre,
    number_in_stock: NumberInStock,
    daily_rental_rate: DailyRentalRate,
}

impl Movie {
    pub fn new(
        id: MovieId,
        title: MovieTitle,
        genre: Genre,
        number_in_stock: NumberInStock,
        daily_rental_rate: DailyRentalRate,
    ) -> Self {
        Self {
            id,
            title,
            genre,
            number_in_stock,
            daily_rental_rate,
        }
    }
}
