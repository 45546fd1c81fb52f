use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct GenreName(String);

impl GenreName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
