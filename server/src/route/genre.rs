use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;

use application::service::{
    CreateGenreService, DeleteGenreService, GetGenreService, UpdateGenreService,
};

use crate::auth::{Admin, Authenticated};
use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Database};
use crate::request::{
    DeleteGenreRequest, GenreRequest, GenreTransformer, GetGenreRequest, Payload,
};
use crate::response::GenrePresenter;

pub trait GenreRouter {
    fn route_genre(self) -> Self;
}

impl<Db: Database> GenreRouter for Router<AppModule<Db>> {
    fn route_genre(self) -> Self {
        self.route(
            "/genres",
            get(|State(module): State<AppModule<Db>>| async move {
                Controller::new((), GenrePresenter)
                    .bypass(|| async move { module.database().get_all_genres().await })
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule<Db>>,
                 _: Authenticated,
                 Payload(req): Payload<GenreRequest>| async move {
                    Controller::new(GenreTransformer, GenrePresenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.database().create_genre(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/genres/:id",
            get(
                |State(module): State<AppModule<Db>>, Path(id): Path<String>| async move {
                    Controller::new(GenreTransformer, GenrePresenter)
                        .try_intake(GetGenreRequest::new(id))?
                        .handle(|dto| async move { module.database().get_genre(dto).await })
                        .await
                        .map_err(ErrorStatus::from)?
                },
            )
            .put(
                |State(module): State<AppModule<Db>>,
                 _: Authenticated,
                 Path(id): Path<String>,
                 Payload(req): Payload<GenreRequest>| async move {
                    Controller::new(GenreTransformer, GenrePresenter)
                        .try_intake((id, req))?
                        .handle(|dto| async move { module.database().update_genre(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule<Db>>,
                 _: Admin,
                 Path(id): Path<String>| async move {
                    Controller::new(GenreTransformer, GenrePresenter)
                        .try_intake(DeleteGenreRequest::new(id))?
                        .handle(|dto| async move { module.database().delete_genre(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
