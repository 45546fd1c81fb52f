use uuid::Uuid;

use kernel::prelude::entity::{DestructGenre, Genre};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GenreDto {
    pub id: Uuid,
    pub name: String,
}

impl From<Genre> for GenreDto {
    fn from(value: Genre) -> Self {
        let DestructGenre { id, name } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug)]
pub struct GetGenreDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct CreateGenreDto {
    pub name: String,
}

#[derive(Debug)]
pub struct UpdateGenreDto {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug)]
pub struct DeleteGenreDto {
    pub id: Uuid,
}
