#[cfg(feature = "ssr")]
#[derive(clap::Parser, Debug)]
#[command(name = "spolder", about = "SPOLDER website and admin panel server")]
struct Args {
    /// Extra configuration file layered over config/default.toml
    #[arg(short, long, env = "SPOLDER_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Read a password from stdin, print its Argon2 hash for
    /// `admin.password_hash` and exit
    #[arg(long)]
    hash_password: bool,
}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::time::Duration;

    use axum::Router;
    use clap::Parser;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use spolder::app::{shell, App};
    use spolder::config::{SiteConfig, StorageBackend};
    use spolder::state::AppState;
    use spolder::{admin, api, demo_seeder};
    use tower::ServiceBuilder;
    use tower_http::services::ServeDir;
    use tower_http::trace::TraceLayer;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spolder=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();
    if args.hash_password {
        let mut password = String::new();
        std::io::stdin().read_line(&mut password)?;
        let hash = spolder::auth::credentials::hash_password(password.trim_end_matches(['\r', '\n']))?;
        println!("{hash}");
        return Ok(());
    }

    tracing::info!("Starting SPOLDER server...");

    let config = SiteConfig::load(args.config.as_deref())?;

    // Load Leptos options from Cargo.toml metadata
    let conf = get_configuration(None)?;
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.to_string();

    let app_state = match config.storage {
        StorageBackend::Mongo => {
            let mongo_client = mongodb::Client::with_uri_str(&config.mongodb.uri).await?;
            let mongo_db = mongo_client.database(&config.mongodb.database);
            tracing::info!(
                uri = %config.mongodb.uri,
                database = %config.mongodb.database,
                "Connected to MongoDB"
            );
            AppState::with_mongo(&mongo_db, &config, leptos_options.clone())
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; content is lost on restart");
            AppState::in_memory(&config, leptos_options.clone())
        }
    };

    if config.demo_mode {
        match demo_seeder::seed_demo_data(app_state.content_repo.as_ref()).await {
            Ok(seeded) => tracing::info!(seeded, "Demo mode enabled"),
            Err(e) => tracing::error!(error = %e, "Demo data seeding failed"),
        }
    }

    if let Err(e) = admin::board::seed_default_board(app_state.board_repo.as_ref()).await {
        tracing::error!(error = %e, "Default board seeding failed");
    }

    // Drop expired admin sessions once a minute
    let sessions = app_state.sessions.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(60));
        loop {
            ticker.tick().await;
            let purged = sessions.purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "Expired admin sessions removed");
            }
        }
    });

    // Generate the Leptos route list for SSR
    let routes = generate_route_list(App);

    let app = Router::new()
        // JSON API routes
        .merge(api::router())
        // Leptos SSR routes and server functions
        .leptos_routes_with_context(
            &app_state,
            routes,
            {
                let state = app_state.clone();
                move || provide_context(state.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        // Static files
        .fallback_service(ServeDir::new(&site_root))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state);

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

// The hydrate() function in lib.rs handles client-side initialization.
#[cfg(not(feature = "ssr"))]
fn main() {}
