use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;

use application::service::{GetUserService, LoginService, RegisterUserService};

use crate::auth::Authenticated;
use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Database};
use crate::request::{LoginRequest, Payload, RegisterRequest, UserTransformer};
use crate::response::UserPresenter;

pub trait UserRouter {
    fn route_user(self) -> Self;
}

impl<Db: Database> UserRouter for Router<AppModule<Db>> {
    fn route_user(self) -> Self {
        self.route(
            "/users",
            post(
                |State(module): State<AppModule<Db>>,
                 Payload(req): Payload<RegisterRequest>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .try_intake(req)?
                        .handle(|dto| async move {
                            module
                                .database()
                                .register_user(module.hasher(), module.authenticator(), dto)
                                .await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/me",
            get(
                |State(module): State<AppModule<Db>>,
                 Authenticated(identity): Authenticated| async move {
                    Controller::new((), UserPresenter)
                        .bypass(|| async move { module.database().get_me(&identity).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/auth",
            post(
                |State(module): State<AppModule<Db>>, Payload(req): Payload<LoginRequest>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .try_intake(req)?
                        .handle(|dto| async move {
                            module
                                .database()
                                .login(module.hasher(), module.authenticator(), dto)
                                .await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
