mod gold;
mod id;
mod name;
mod phone;

pub use self::{gold::*, id::*, name::*, phone::*};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Customer {
    id: CustomerId,
    name: CustomerName,
    phone: CustomerPhone,
    is_gold: IsGold,
}

impl Customer {
    pub fn new(id: CustomerId, name: CustomerName, phone: CustomerPhone, is_gold: IsGold) -> Self {
        Self {
            id,
            name,
            phone,
            is_gold,
        }
    }
}
