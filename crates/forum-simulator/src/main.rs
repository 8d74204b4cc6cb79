//! Forum Simulator - synthetic traffic for the forum engine
//!
//! Targets the service at `FORUM_ENGINE_URL`, or an in-process engine when the
//! variable is unset.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forum_client::{ClientOptions, ForumClient};
use forum_engine::{Engine, EngineConfig, EngineHandle};
use forum_simulator::{Activity, CommandSink, RemoteSink, Simulator, SimulatorConfig};

/// Where the simulated traffic goes.
enum Target {
    Local(EngineHandle),
    Remote(RemoteSink),
}

impl Target {
    fn sink(&self) -> Arc<dyn CommandSink> {
        match self {
            Self::Local(handle) => Arc::new(handle.clone()),
            Self::Remote(sink) => Arc::new(sink.clone()),
        }
    }

    async fn report_engine(&self) {
        match self {
            Self::Local(handle) => {
                let metrics = handle.engine().metrics().await;
                tracing::info!(
                    total_posts = metrics.total_posts,
                    total_comments = metrics.total_comments,
                    total_votes = metrics.total_votes,
                    active_users = metrics.active_users,
                    total_messages = metrics.total_messages,
                    "Engine metrics"
                );
            }
            Self::Remote(sink) => match sink.client().metrics().await {
                Ok(metrics) => tracing::info!(
                    total_posts = metrics.total_posts,
                    total_comments = metrics.total_comments,
                    total_votes = metrics.total_votes,
                    active_users = metrics.active_users,
                    total_messages = metrics.total_messages,
                    "Engine metrics"
                ),
                Err(e) => tracing::warn!(error = %e, "Failed to fetch engine metrics"),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,forum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Forum Simulator");

    let config = SimulatorConfig::from_env();

    tracing::info!(
        engine_url = ?config.engine_url,
        num_users = config.num_users,
        time_unit_ms = config.time_unit.as_millis(),
        disconnect_probability = config.disconnect_chance(),
        run_for_secs = ?config.run_for.map(|d| d.as_secs()),
        "Simulator configuration loaded"
    );

    let target = match &config.engine_url {
        Some(url) => {
            let client =
                ForumClient::with_options(url, ClientOptions::with_client_name("forum-simulator"))?;
            let health = client.health().await?;
            tracing::info!(
                service = %health.service,
                version = %health.version,
                "Remote engine reachable"
            );
            Target::Remote(RemoteSink::new(client))
        }
        None => {
            let (handle, _task) = Engine::shared(EngineConfig::from_env()).spawn();
            Target::Local(handle)
        }
    };

    let report_interval = config.report_interval;
    let run_for = config.run_for;
    let simulator = Simulator::start(config, target.sink());

    let mut ticker = tokio::time::interval(report_interval);
    // The first tick fires immediately.
    ticker.tick().await;

    let deadline = async {
        match run_for {
            Some(duration) => tokio::time::sleep(duration).await,
            None => futures::future::pending().await,
        }
    };
    tokio::pin!(deadline);
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let stats = simulator.stats();
                tracing::info!(
                    create_post = stats.dispatched(Activity::CreatePost),
                    register_user = stats.dispatched(Activity::RegisterUser),
                    create_subreddit = stats.dispatched(Activity::CreateSubreddit),
                    create_comment = stats.dispatched(Activity::CreateComment),
                    send_direct_message = stats.dispatched(Activity::SendDirectMessage),
                    disconnects = stats.disconnects,
                    failures = stats.failures,
                    "Simulator report"
                );
                target.report_engine().await;
            }
            () = &mut deadline => {
                tracing::info!("Run duration reached");
                break;
            }
            _ = &mut interrupted => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    let seed = simulator.seed();
    let stats = simulator.shutdown().await;
    tracing::info!(
        seed,
        dispatched = stats.total_dispatched(),
        "Simulator finished"
    );
    target.report_engine().await;

    Ok(())
}
