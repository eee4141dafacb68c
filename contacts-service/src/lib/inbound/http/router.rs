use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_contact::create_contact;
use super::handlers::delete_contact::delete_contact;
use super::handlers::edit_contact::edit_contact;
use super::handlers::get_current_user::get_current_user;
use super::handlers::health_check::health_check;
use super::handlers::list_contacts::list_contacts;
use super::handlers::login_user::login_user;
use super::handlers::logout_user::logout_user;
use super::handlers::register_user::register_user;
use super::handlers::update_contact::update_contact;
use super::middleware::authenticate as auth_middleware;
use crate::domain::access_token::ports::AccessTokenRepository;
use crate::domain::access_token::ports::AccessTokenServicePort;
use crate::domain::access_token::service::AccessTokenService;
use crate::domain::contact::ports::ContactRepository;
use crate::domain::contact::ports::ContactsServicePort;
use crate::domain::contact::service::ContactsService;
use crate::domain::user::ports::AuthenticationServicePort;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::service::AuthenticationService;

#[derive(Clone)]
pub struct AppState {
    pub authentication_service: Arc<dyn AuthenticationServicePort>,
    pub access_token_service: Arc<dyn AccessTokenServicePort>,
    pub contacts_service: Arc<dyn ContactsServicePort>,
}

impl AppState {
    /// Wire the domain services on top of one set of repositories.
    pub fn from_repositories<UR, TR, CR>(
        users: Arc<UR>,
        tokens: Arc<TR>,
        contacts: Arc<CR>,
        authenticator: Arc<Authenticator>,
    ) -> Self
    where
        UR: UserRepository,
        TR: AccessTokenRepository,
        CR: ContactRepository,
    {
        let access_token_service = Arc::new(AccessTokenService::new(
            tokens,
            Arc::clone(&users),
            Arc::clone(&authenticator),
        ));

        let authentication_service = Arc::new(AuthenticationService::new(
            users,
            Arc::clone(&access_token_service),
            authenticator,
        ));

        Self {
            authentication_service,
            access_token_service,
            contacts_service: Arc::new(ContactsService::new(contacts)),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/user/register", post(register_user))
        .route("/user/login", post(login_user));

    let protected_routes = Router::new()
        .route("/user", get(get_current_user))
        .route("/user/logout", post(logout_user))
        .route("/contacts", get(list_contacts).post(create_contact))
        .route("/contacts/:id/edit", get(edit_contact))
        .route(
            "/contacts/:id",
            put(update_contact)
                .patch(update_contact)
                .delete(delete_contact),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", public_routes.merge(protected_routes))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
