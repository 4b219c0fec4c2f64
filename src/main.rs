//! notegate server binary

use anyhow::Context;
use clap::Parser;
use notegate::auth::authenticator::RequestAuthenticator;
use notegate::auth::policy::AccessControlPolicy;
use notegate::auth::provider::{AccountStore, InMemoryAccountStore, PrincipalProvider};
use notegate::auth::token::TokenCodec;
use notegate::bootstrap;
use notegate::infrastructure::config::AppConfig;
use notegate::infrastructure::logging;
use notegate::server::build_router;
use notegate::server::state::AppState;
use std::path::PathBuf;
use std::sync::Arc;

/// Stateless JWT authentication and role-based authorization gateway
#[derive(Debug, Parser)]
#[command(name = "notegate", version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    let store = Arc::new(InMemoryAccountStore::new());
    if config.seed_users {
        bootstrap::seed_default_accounts(&store).context("seeding default accounts")?;
    }

    let token_codec = Arc::new(
        TokenCodec::new(&config.jwt_secret, config.jwt_expiration_ms)
            .context("building token codec")?,
    );
    let principal_provider = Arc::new(PrincipalProvider::new(
        store.clone() as Arc<dyn AccountStore>,
        config.enforce_account_flags,
    ));
    let authenticator = Arc::new(RequestAuthenticator::new(
        principal_provider.clone(),
        token_codec.clone(),
    ));

    let state = AppState {
        token_codec,
        principal_provider,
        authenticator,
        policy: Arc::new(AccessControlPolicy::default_policy()),
    };

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, "notegate listening");
    axum::serve(listener, app).await.context("serving")?;

    Ok(())
}
