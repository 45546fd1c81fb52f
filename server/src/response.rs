pub use self::{customer::*, genre::*, movie::*, rental::*, user::*};

mod customer;
mod genre;
mod movie;
mod rental;
mod user;
