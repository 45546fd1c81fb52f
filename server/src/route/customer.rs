use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;

use application::service::{
    CreateCustomerService, DeleteCustomerService, GetCustomerService, UpdateCustomerService,
};

use crate::auth::{Admin, Authenticated};
use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Database};
use crate::request::{
    DeleteCustomerRequest, CustomerRequest, CustomerTransformer, GetCustomerRequest, Payload,
};
use crate::response::CustomerPresenter;

pub trait CustomerRouter {
    fn route_customer(self) -> Self;
}

impl<Db: Database> CustomerRouter for Router<AppModule<Db>> {
    fn route_customer(self) -> Self {
        self.route(
            "/customers",
            get(|State(module): State<AppModule<Db>>| async move {
                Controller::new((), CustomerPresenter)
                    .bypass(|| async move { module.database().get_all_customers().await })
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule<Db>>,
                 _: Authenticated,
                 Payload(req): Payload<CustomerRequest>| async move {
                    Controller::new(CustomerTransformer, CustomerPresenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.database().create_customer(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/customers/:id",
            get(
                |State(module): State<AppModule<Db>>, Path(id): Path<String>| async move {
                    Controller::new(CustomerTransformer, CustomerPresenter)
                        .try_intake(GetCustomerRequest::new(id))?
                        .handle(|dto| async move { module.database().get_customer(dto).await })
                        .await
                        .map_err(ErrorStatus::from)?
                },
            )
            .put(
                |State(module): State<AppModule<Db>>,
                 _: Authenticated,
                 Path(id): Path<String>,
                 Payload(req): Payload<CustomerRequest>| async move {
                    Controller::new(CustomerTransformer, CustomerPresenter)
                        .try_intake((id, req))?
                        .handle(|dto| async move { module.database().update_customer(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule<Db>>,
                 _: Admin,
                 Path(id): Path<String>| async move {
                    Controller::new(CustomerTransformer, CustomerPresenter)
                        .try_intake(DeleteCustomerRequest::new(id))?
                        .handle(|dto| async move { module.database().delete_customer(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
