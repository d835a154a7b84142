//! Helpers for running the API against the in-memory store.

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::{mpsc, Arc};
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::database::MemoryStore;
use crate::middleware::RateLimiter;
use crate::server::{self, AppState};

/// A memory-backed server running on its own thread and runtime, so it
/// outlives the runtime of whichever test started it.
pub struct TestApp {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl TestApp {
    pub fn spawn(config: AppConfig, port: u16) -> anyhow::Result<Self> {
        let (state, store) = AppState::in_memory(&config);
        Self::spawn_with_state(state, store, port)
    }

    pub fn spawn_with_state(state: AppState, store: Arc<MemoryStore>, port: u16) -> anyhow::Result<Self> {
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let rate_limiter = state.rate_limiter.clone();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();

        std::thread::Builder::new()
            .name(format!("test-server-{}", port))
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_multi_thread()
                    .worker_threads(2)
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };

                runtime.block_on(async move {
                    let listener = match TcpListener::bind(addr).await {
                        Ok(listener) => listener,
                        Err(e) => {
                            let _ = ready_tx.send(Err(e.to_string()));
                            return;
                        }
                    };
                    let _ = ready_tx.send(Ok(()));

                    if let Err(e) = server::serve(listener, state).await {
                        tracing::error!("Test server on {} stopped: {}", addr, e);
                    }
                });
            })
            .context("failed to spawn test server thread")?;

        ready_rx
            .recv()
            .context("test server thread exited before binding")?
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("failed to bind {}", addr))?;

        Ok(Self {
            port,
            base_url: format!("http://{}", addr),
            store,
            rate_limiter,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
