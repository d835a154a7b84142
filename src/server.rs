use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

use crate::auth::TokenManager;
use crate::config::AppConfig;
use crate::database::{
    AuthenticationRepository, CommentRepository, MemoryStore, PostgresStore, ReplyRepository,
    ThreadRepository, UserRepository,
};
use crate::handlers::{self, protected, public};
use crate::middleware::{jwt_auth_middleware, rate_limit_middleware, RateLimitConfig, RateLimiter};
use crate::services::{AuthenticationService, CommentService, ReplyService, ThreadService, UserService};

/// Everything the handlers need, cloned into each request.
#[derive(Clone)]
pub struct AppState {
    pub threads: ThreadService,
    pub comments: CommentService,
    pub replies: ReplyService,
    pub users: UserService,
    pub authentications: AuthenticationService,
    pub tokens: Arc<TokenManager>,
    pub rate_limiter: Arc<RateLimiter>,
    /// Present when backed by PostgreSQL; used by the health check.
    pub pool: Option<PgPool>,
}

impl AppState {
    /// Wires the services over one store implementing every repository.
    pub fn new<S>(store: Arc<S>, config: &AppConfig, pool: Option<PgPool>) -> Self
    where
        S: UserRepository
            + AuthenticationRepository
            + ThreadRepository
            + CommentRepository
            + ReplyRepository
            + 'static,
    {
        let tokens = Arc::new(TokenManager::from_config(&config.security));
        let rate_limiter = Arc::new(RateLimiter::new(RateLimitConfig::from_api(&config.api)));

        Self {
            threads: ThreadService::new(store.clone(), store.clone(), store.clone()),
            comments: CommentService::new(store.clone(), store.clone()),
            replies: ReplyService::new(store.clone(), store.clone(), store.clone()),
            users: UserService::new(store.clone(), config.security.bcrypt_cost),
            authentications: AuthenticationService::new(store.clone(), store, tokens.clone()),
            tokens,
            rate_limiter,
            pool,
        }
    }

    pub fn with_postgres(pool: PgPool, config: &AppConfig) -> Self {
        Self::new(Arc::new(PostgresStore::new(pool.clone())), config, Some(pool))
    }

    pub fn in_memory(config: &AppConfig) -> (Self, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (Self::new(store.clone(), config, None), store)
    }

    pub fn with_rate_limiter(mut self, rate_limiter: Arc<RateLimiter>) -> Self {
        self.rate_limiter = rate_limiter;
        self
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(public::health::health))
        .merge(public_routes())
        .merge(thread_routes(&state))
        .fallback(handlers::not_found)
        // Global middleware
        .layer(from_fn_with_state(state.rate_limiter.clone(), rate_limit_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use public::{authentications, users};

    Router::new()
        .route("/users", post(users::post_user))
        .route(
            "/authentications",
            post(authentications::post_authentication)
                .put(authentications::put_authentication)
                .delete(authentications::delete_authentication),
        )
}

fn thread_routes(state: &AppState) -> Router<AppState> {
    use protected::{comments, replies, threads};

    Router::new()
        .route("/threads", post(threads::post_thread))
        .route("/threads/:thread_id", get(threads::get_thread))
        .route("/threads/:thread_id/comments", post(comments::post_comment))
        .route(
            "/threads/:thread_id/comments/:comment_id",
            delete(comments::delete_comment),
        )
        .route(
            "/threads/:thread_id/comments/:comment_id/likes",
            put(comments::put_comment_like),
        )
        .route(
            "/threads/:thread_id/comments/:comment_id/replies",
            post(replies::post_reply),
        )
        .route(
            "/threads/:thread_id/comments/:comment_id/replies/:reply_id",
            delete(replies::delete_reply),
        )
        .route_layer(from_fn_with_state(state.tokens.clone(), jwt_auth_middleware))
}

/// Periodically sweeps idle clients out of the rate limiter.
pub fn spawn_rate_limit_cleanup(limiter: Arc<RateLimiter>) -> tokio::task::JoinHandle<()> {
    let every = Duration::from_millis(limiter.config().cleanup_interval_ms.max(1_000));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let removed = limiter.cleanup(limiter.now_ms());
            if removed > 0 {
                debug!("Rate limit cleanup removed {} clients", removed);
            }
        }
    })
}

/// Serves the app on `listener` until the task is dropped.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if state.rate_limiter.config().enabled {
        spawn_rate_limit_cleanup(state.rate_limiter.clone());
    }

    info!("Forum API listening on http://{}", listener.local_addr()?);
    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::extract::ConnectInfo;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn limited_app() -> Router {
        let mut config = AppConfig::test();
        config.api.enable_rate_limiting = true;
        config.api.rate_limit_requests = 1;
        config.api.rate_limit_min_interval_ms = Some(0);
        let (state, _) = AppState::in_memory(&config);
        app(state)
    }

    async fn json_of(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unknown_route_falls_back_to_not_found() {
        let (state, _) = AppState::in_memory(&AppConfig::test());
        let response = app(state)
            .oneshot(Request::get("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_of(response).await;
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], "route not found");
    }

    #[tokio::test]
    async fn limited_path_without_peer_address_is_denied() {
        let response = limited_app()
            .oneshot(Request::get("/threads/thread-1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn limiter_counts_per_peer() {
        let app = limited_app();
        let request = |ip: [u8; 4]| {
            let mut request = Request::get("/threads/thread-1").body(Body::empty()).unwrap();
            request
                .extensions_mut()
                .insert(ConnectInfo(SocketAddr::from((ip, 40_000))));
            request
        };

        let first = app.clone().oneshot(request([10, 0, 0, 1])).await.unwrap();
        assert_eq!(first.status(), StatusCode::UNAUTHORIZED);

        let second = app.clone().oneshot(request([10, 0, 0, 1])).await.unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

        let other = app.oneshot(request([10, 0, 0, 2])).await.unwrap();
        assert_eq!(other.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn health_reports_memory_backend() {
        let (state, _) = AppState::in_memory(&AppConfig::test());
        let response = app(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
