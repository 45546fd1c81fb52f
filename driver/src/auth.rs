mod hasher;
mod jwt;

pub use self::{hasher::*, jwt::*};
