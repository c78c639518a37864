use std::{future::IntoFuture as _, io, sync::OnceLock};

use application::{config, Args, Config, Service};
use secrecy::SecretBox;
use service::{
    command::CreateUserSession,
    domain::user,
    infra::{database, identity},
    Command as _,
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args { config } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        service,
        identity: idp,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let seeds = idp
        .accounts
        .into_iter()
        .map(seed)
        .collect::<Result<Vec<_>, ()>>()?;

    let (service, background) = Service::new(
        service.into(),
        database::InMemory::new(),
        identity::InMemory::new(seeds),
    );

    if let Some(config::Credentials { email, password }) = idp.sign_in {
        let password = identity::Password::new(password).ok_or_else(|| {
            log::error!("startup sign-in password for `{email}` is invalid");
        })?;
        let session = service
            .execute(CreateUserSession::ByCredentials {
                email: email.into(),
                password: SecretBox::new(Box::new(password)),
            })
            .await
            .map_err(|e| log::error!("startup sign-in failed: {e}"))?;

        log::info!(
            "signed in as `{}`, session expires at {}",
            session.user.name,
            session.expires_at.to_rfc3339(),
        );
    }

    log::info!("service started");

    tokio::select! {
        r = tokio::signal::ctrl_c() => {
            r.map_err(|e| {
                log::error!("failed to await shutdown signal: {e}");
            })?;
            log::info!("shutting down");
            Ok(())
        }
        r = background.into_future() => {
            r.map_err(|e| log::error!("background task failed: {e}"))
        }
    }
}

/// Converts a configured [`config::Account`] into an identity directory
/// [`Seed`].
///
/// [`Seed`]: identity::in_memory::Seed
fn seed(account: config::Account) -> Result<identity::in_memory::Seed, ()> {
    let config::Account {
        email,
        password,
        name,
        provider_linked,
    } = account;

    let password = identity::Password::new(password).ok_or_else(|| {
        log::error!("seeded password for `{email}` is not a valid password");
    })?;

    Ok(identity::in_memory::Seed {
        email: email.into(),
        password: SecretBox::new(Box::new(password)),
        name: name.map(user::Name::or_fallback),
        provider_linked,
    })
}
