use dioxus::prelude::*;

use ui::AuthProvider;
use views::{
    Assets, Chat, Customers, DashboardHome, DashboardLayout, Designations, Exams, Invoices,
    ItDashboard, Leaves, Login, Performance, Register, Submit, Tickets, Users,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[layout(DashboardLayout)]
        #[route("/dashboard")]
        DashboardHome {},
        #[route("/dashboard/submit")]
        Submit {},
        #[route("/dashboard/chat")]
        Chat {},
        #[route("/dashboard/customers")]
        Customers {},
        #[route("/dashboard/designations")]
        Designations {},
        #[route("/dashboard/assets")]
        Assets {},
        #[route("/dashboard/tickets")]
        Tickets {},
        #[route("/dashboard/it")]
        ItDashboard {},
        #[route("/dashboard/users")]
        Users {},
        #[route("/dashboard/leaves")]
        Leaves {},
        #[route("/dashboard/performance")]
        Performance {},
        #[route("/dashboard/invoices")]
        Invoices {},
        #[route("/dashboard/exams")]
        Exams {},
}

const FAVICON: Asset = asset!("/assets/favicon.ico");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use axum::routing::get;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use std::time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, SessionManagerLayer};
    use tower_sessions_sqlx_store::PostgresStore;

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Initialize database pool
    let pool = api::db::get_pool()
        .await
        .expect("Failed to connect to database");

    // Run migrations
    sqlx::migrate!("../api/migrations")
        .run(pool)
        .await
        .expect("Failed to run migrations");

    // Create session store
    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .expect("Failed to create session table");

    // Session layer configuration
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false) // Set to true in production with HTTPS
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(
            Duration::from_secs(60 * 60 * 24 * 7).try_into().unwrap(),
        )); // 7 days

    // Build the Dioxus app with custom routes
    let router = axum::Router::new()
        // Uploaded manuscript files are served outside the app shell
        .route("/uploads/{name}", get(serve_upload))
        // Then serve the Dioxus application
        .serve_dioxus_application(ServeConfig::new(), App)
        // Add session layer to all routes
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .await
        .unwrap();
}

/// Serve a stored manuscript file. Names are server-generated UUIDs with an
/// extension; anything else is rejected before touching the filesystem.
#[cfg(feature = "server")]
async fn serve_upload(
    axum::extract::Path(name): axum::extract::Path<String>,
    session: tower_sessions::Session,
) -> axum::response::Response {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    match api::auth::current_user(&session).await {
        Ok(Some(_)) => {}
        _ => return StatusCode::UNAUTHORIZED.into_response(),
    }

    if name.contains('/') || name.contains("..") {
        return StatusCode::BAD_REQUEST.into_response();
    }

    let dir = std::env::var("OPSDECK_UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());
    let path = std::path::Path::new(&dir).join(&name);
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            [(axum::http::header::CONTENT_TYPE, "application/octet-stream")],
            bytes,
        )
            .into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` by auth state: dashboard when signed in, login otherwise.
#[component]
fn Root() -> Element {
    let auth = ui::use_auth();
    let nav = use_navigator();

    if !auth().loading {
        if auth().user.is_some() {
            nav.replace(Route::DashboardHome {});
        } else {
            nav.replace(Route::Login {});
        }
    }
    rsx! {}
}
