use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler::{AppModule, Database};

pub use self::{customer::*, genre::*, movie::*, rental::*, user::*};

mod customer;
mod genre;
mod movie;
mod rental;
mod user;


pub fn router<Db: Database>(module: AppModule<Db>) -> Router {
    Router::<AppModule<Db>>::new()
        .route_genre()
        .route_movie()
        .route_customer()
        .route_rental()
        .route_user()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new())
        .with_state(module)
}
