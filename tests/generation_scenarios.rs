//! End-to-end scenarios for the cache and limiter as request handlers use
//! them: throttle first, then serve from cache or generate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use lesson_guard::{
    cache::{get_or_generate, keys, ContentCaches},
    models::{Checkpoint, CheckpointSet, Summary},
    ratelimit::{RateLimit, RateLimitPolicy, SlidingWindowLimiter},
    AppError, AppState, Config,
};

/// Stand-in for the LLM-backed generator; counts how often it runs.
#[derive(Clone, Default)]
struct StubGenerator {
    calls: Arc<AtomicUsize>,
}

impl StubGenerator {
    async fn checkpoints(&self, video_id: &str, language: &str) -> Result<CheckpointSet, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CheckpointSet {
            video_id: video_id.to_string(),
            language: language.to_string(),
            checkpoints: vec![Checkpoint {
                timestamp: 42,
                question: "What does the borrow checker enforce?".to_string(),
                options: vec!["Aliasing XOR mutation".to_string(), "Nothing".to_string()],
                answer_index: 0,
            }],
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// What a checkpoint route does: per-user throttle, then read-through cache.
async fn fetch_checkpoints(
    state: &AppState,
    generator: &StubGenerator,
    user_id: &str,
    video_id: &str,
    language: &str,
) -> Result<CheckpointSet, AppError> {
    state.user_policy.enforce(&state.limiter, user_id).await?;
    let key = keys::checkpoints_key(video_id, language);
    get_or_generate(&state.caches.checkpoints, &key, || {
        generator.checkpoints(video_id, language)
    })
    .await
}

#[tokio::test]
async fn test_checkpoint_cache_hit_avoids_regeneration() {
    let state = AppState::from_config(&Config::default()).unwrap();
    let generator = StubGenerator::default();

    let first = fetch_checkpoints(&state, &generator, "alice", "vid1", "en")
        .await
        .unwrap();
    assert_eq!(generator.calls(), 1);

    let second = fetch_checkpoints(&state, &generator, "bob", "vid1", "en")
        .await
        .unwrap();
    assert_eq!(generator.calls(), 1);
    assert_eq!(first, second);

    let spanish = fetch_checkpoints(&state, &generator, "alice", "vid1", "es")
        .await
        .unwrap();
    assert_eq!(generator.calls(), 2);
    assert_eq!(spanish.language, "es");
}

#[tokio::test(start_paused = true)]
async fn test_checkpoint_regenerated_after_ttl() {
    let config = Config {
        checkpoint_ttl: 60,
        ..Config::default()
    };
    let state = AppState::from_config(&config).unwrap();
    let generator = StubGenerator::default();

    fetch_checkpoints(&state, &generator, "alice", "vid1", "en")
        .await
        .unwrap();
    tokio::time::advance(Duration::from_secs(59)).await;
    fetch_checkpoints(&state, &generator, "alice", "vid1", "en")
        .await
        .unwrap();
    assert_eq!(generator.calls(), 1);

    tokio::time::advance(Duration::from_secs(2)).await;
    fetch_checkpoints(&state, &generator, "alice", "vid1", "en")
        .await
        .unwrap();
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn test_rate_limited_regeneration_endpoint() {
    let limiter = SlidingWindowLimiter::new().shared();
    let policy = RateLimitPolicy::per_video(RateLimit::per_seconds(5, 3600).unwrap());

    for _ in 0..5 {
        policy.enforce(&limiter, "vid1").await.unwrap();
    }
    let err = policy.enforce(&limiter, "vid1").await.unwrap_err();

    let retry_after_secs = match &err {
        AppError::RateLimited {
            key,
            retry_after_secs,
        } => {
            assert_eq!(key, "video:vid1");
            *retry_after_secs
        }
        other => panic!("unexpected error: {other:?}"),
    };
    assert!((3590..=3601).contains(&retry_after_secs));

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        response.headers().get(header::RETRY_AFTER).unwrap(),
        retry_after_secs.to_string().as_str()
    );

    // Another video is unaffected
    assert!(policy.enforce(&limiter, "vid2").await.is_ok());
}

#[tokio::test]
async fn test_user_throttle_blocks_before_generation() {
    let config = Config {
        user_rate_limit: 2,
        ..Config::default()
    };
    let state = AppState::from_config(&config).unwrap();
    let generator = StubGenerator::default();

    fetch_checkpoints(&state, &generator, "alice", "vid1", "en")
        .await
        .unwrap();
    fetch_checkpoints(&state, &generator, "alice", "vid2", "en")
        .await
        .unwrap();
    let denied = fetch_checkpoints(&state, &generator, "alice", "vid3", "en").await;

    assert!(matches!(denied, Err(AppError::RateLimited { .. })));
    assert_eq!(generator.calls(), 2);

    // A different user still gets through
    fetch_checkpoints(&state, &generator, "bob", "vid3", "en")
        .await
        .unwrap();
    assert_eq!(generator.calls(), 3);
}

#[tokio::test]
async fn test_generation_failure_reaches_caller_uncached() {
    let caches = ContentCaches::new(
        Duration::from_secs(60),
        Duration::from_secs(60),
        Duration::from_secs(60),
    );
    let key = keys::summary_key("vid1", "en");

    let result = get_or_generate(&caches.summary, &key, || async {
        Err::<Summary, _>(AppError::Generation("model timed out".to_string()))
    })
    .await;

    assert!(matches!(result, Err(AppError::Generation(_))));
    assert_eq!(caches.summary.read().await.size(), 0);
}
