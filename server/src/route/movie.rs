use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;

use application::service::{
    CreateMovieService, DeleteMovieService, GetMovieService, UpdateMovieService,
};

use crate::auth::{Admin, Authenticated};
use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Database};
use crate::request::{
    DeleteMovieRequest, MovieRequest, MovieTransformer, GetMovieRequest, Payload,
};
use crate::response::MoviePresenter;

pub trait MovieRouter {
    fn route_movie(self) -> Self;
}

impl<Db: Database> MovieRouter for Router<AppModule<Db>> {
    fn route_movie(self) -> Self {
        self.route(
            "/movies",
            get(|State(module): State<AppModule<Db>>| async move {
                Controller::new((), MoviePresenter)
                    .bypass(|| async move { module.database().get_all_movies().await })
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule<Db>>,
                 _: Authenticated,
                 Payload(req): Payload<MovieRequest>| async move {
                    Controller::new(MovieTransformer, MoviePresenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.database().create_movie(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/movies/:id",
            get(
                |State(module): State<AppModule<Db>>, Path(id): Path<String>| async move {
                    Controller::new(MovieTransformer, MoviePresenter)
                        .try_intake(GetMovieRequest::new(id))?
                        .handle(|dto| async move { module.database().get_movie(dto).await })
                        .await
                        .map_err(ErrorStatus::from)?
                },
            )
            .put(
                |State(module): State<AppModule<Db>>,
                 _: Authenticated,
                 Path(id): Path<String>,
                 Payload(req): Payload<MovieRequest>| async move {
                    Controller::new(MovieTransformer, MoviePresenter)
                        .try_intake((id, req))?
                        .handle(|dto| async move { module.database().update_movie(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule<Db>>,
                 _: Admin,
                 Path(id): Path<String>| async move {
                    Controller::new(MovieTransformer, MoviePresenter)
                        .try_intake(DeleteMovieRequest::new(id))?
                        .handle(|dto| async move { module.database().delete_movie(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
