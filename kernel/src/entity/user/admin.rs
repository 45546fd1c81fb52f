use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct IsAdmin(bool);

impl IsAdmin {
    pub fn new(value: impl Into<bool>) -> Self {
        Self(value.into())
    }
}
