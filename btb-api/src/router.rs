use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use axum_login::{
    login_required,
    tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer},
    AuthManagerLayer, AuthManagerLayerBuilder,
};
use time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tower_sessions_moka_store::MokaStore;

use crate::{
    app_state::AppState,
    auth::{self, AuthBackend},
    config::{ApplicationSettings, SeedError, Settings},
    factory::{build_services, Services},
    routes,
};

pub fn create(config: Settings) -> Result<Router<()>, SeedError> {
    let services = build_services(&config)?;
    Ok(with_services(services, &config.application))
}

/// Assembles the app around already-wired services.
fn with_services(services: Services, config: &ApplicationSettings) -> Router<()> {
    let protected = Router::new()
        .nest("/project/draft", routes::draft::router())
        .nest("/project", routes::project::router())
        .nest("/allocation", routes::calculate::router())
        .route_layer(login_required!(AuthBackend));

    let auth_layer = new_auth_layer(AuthBackend::new(services.users), config);
    let app = Router::new()
        .route("/", get(|| async { "Build-To-Build is running" }))
        .merge(protected)
        .merge(auth::router())
        .layer(auth_layer);

    let app_state = AppState::new(services.project_service);

    let app_url = config.app_url.clone();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin.to_str().unwrap_or_default() == app_url
        }));

    app.with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

fn new_auth_layer(
    backend: AuthBackend,
    config: &ApplicationSettings,
) -> AuthManagerLayer<AuthBackend, MokaStore> {
    let session_store = MokaStore::new(Some(2_000));

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(
            config.session_inactivity_days,
        )));

    AuthManagerLayerBuilder::new(backend, session_layer).build()
}
