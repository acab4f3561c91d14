use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use latchkey_adapters::{
    auth_validation::BearerSessionValidator,
    config::AllowedOrigins,
    http::routes::{protected, request_login, verify},
};
use latchkey_application::MagicLinkSettings;
use latchkey_core::{EmailClient, LoginTokenStore, SessionIssuer, SessionValidator};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The magic link authentication service: request a link, redeem it for a
/// session credential, and call a route guarded by that credential.
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Create a new AuthService from its collaborators.
    ///
    /// # Arguments
    /// * `login_token_store` - Store for pending login tokens (must be Clone)
    /// * `email_client` - Client used to deliver magic links (must be Clone)
    /// * `session_signer` - Issues and validates session credentials (must be Clone)
    /// * `magic_link` - Verify URL and login token lifetime
    ///
    /// Each route is given only the state it needs.
    pub fn new<S, E, J>(
        login_token_store: S,
        email_client: E,
        session_signer: J,
        magic_link: MagicLinkSettings,
    ) -> Self
    where
        S: LoginTokenStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
        J: SessionIssuer + SessionValidator + Clone + 'static,
    {
        let router = Router::new()
            // Requesting a link needs the token store, the mailer and the link settings
            .route("/request-login", post(request_login::<S, E>))
            .with_state((login_token_store.clone(), email_client, magic_link))
            // Redeeming needs the token store and the session issuer
            .route("/verify", get(verify::<S, J>))
            .with_state((login_token_store, session_signer.clone()))
            .route(
                "/protected",
                get(protected::<BearerSessionValidator<J>>),
            )
            .with_state(BearerSessionValidator::new(session_signer));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AuthService into a router that can be nested into another application.
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the auth service as a standalone server until the listener fails.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
