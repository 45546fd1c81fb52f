use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct NumberInStock(i32);

impl NumberInStock {
    pub const MAX: i32 = 255;

    pub fn new(amount: impl Into<i32>) -> Self {
        Self(amount.into())
    }

    pub fn is_available(&self) -> bool {
        self.0 > 0
    }

    /// One copy leaves the shelf. `None` when nothing is left.
    pub fn take(self) -> Option<Self> {
        self.is_available().then(|| Self(self.0 - 1))
    }

    /// One copy comes back, never beyond [`NumberInStock::MAX`].
    pub fn put_back(self) -> Self {
        Self((self.0 + 1).min(Self::MAX))
    }
}
