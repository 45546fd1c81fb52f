use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Router;

use application::service::{CreateRentalService, GetRentalService, ReturnRentalService};

use crate::auth::Authenticated;
use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Database};
use crate::request::{
    GetRentalRequest, LookupRentalRequest, Payload, RentalRequest, RentalTransformer,
    ReturnRentalByIdRequest, ReturnRequest,
};
use crate::response::RentalPresenter;

pub trait RentalRouter {
    fn route_rental(self) -> Self;
}

impl<Db: Database> RentalRouter for Router<AppModule<Db>> {
    fn route_rental(self) -> Self {
        self.route(
            "/rentals",
            get(|State(module): State<AppModule<Db>>| async move {
                Controller::new((), RentalPresenter)
                    .bypass(|| async move { module.database().get_all_rentals().await })
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule<Db>>,
                 _: Authenticated,
                 Payload(req): Payload<RentalRequest>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.database().create_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/rentals/lookup",
            get(
                |State(module): State<AppModule<Db>>,
                 Query(req): Query<LookupRentalRequest>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.database().lookup_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)?
                },
            ),
        )
        .route(
            "/rentals/:id",
            get(
                |State(module): State<AppModule<Db>>, Path(id): Path<String>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .try_intake(GetRentalRequest::new(id))?
                        .handle(|dto| async move { module.database().get_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)?
                },
            ),
        )
        .route(
            "/rentals/:id/return",
            post(
                |State(module): State<AppModule<Db>>,
                 _: Authenticated,
                 Path(id): Path<String>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .try_intake(ReturnRentalByIdRequest::new(id))?
                        .handle(|dto| async move {
                            module.database().return_rental_by_id(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/returns",
            post(
                |State(module): State<AppModule<Db>>,
                 _: Authenticated,
                 Payload(req): Payload<ReturnRequest>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.database().return_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
