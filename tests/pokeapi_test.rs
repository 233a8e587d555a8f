//! PokeApiService against a fake upstream
//!
//! The fake serves a trimmed-down copy of the PokeAPI shape on an ephemeral
//! local port.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use http_body_util::BodyExt;
use pokedex_gateway::api::create_pokeapi_router;
use pokedex_gateway::lookup::pokeapi::FETCH_FAILED;
use pokedex_gateway::lookup::{LookupConfig, PokeApiService, PokemonLookup};
use pokedex_gateway::types::{LookupOutcome, NO_DESCRIPTION};
use pokedex_gateway::upstream::{PoolConfig, UpstreamPool};
use reqwest::Url;
use serde_json::{json, Value};
use tower::ServiceExt; // for oneshot

#[derive(Clone)]
struct Upstream {
    base: Arc<String>,
}

async fn pokemon(State(upstream): State<Upstream>, Path(name): Path<String>) -> Response {
    let (id, kind, sprite) = match name.as_str() {
        "pikachu" => (25, Some("electric"), Some("https://sprites.test/25.png")),
        "bulbasaur" => (1, Some("grass"), None),
        "ditto" => (132, Some("normal"), None),
        "typeless" => (25, None, None),
        "mew" => (151, Some("psychic"), None),
        "nameless" => {
            return Json(json!({
                "id": 25,
                "name": "",
                "types": [{ "slot": 1, "type": { "name": "electric", "url": "" } }],
                "sprites": { "front_default": null },
                "species": { "name": "", "url": format!("{}/pokemon-species/25/", upstream.base) },
            }))
            .into_response()
        }
        "unlinked" => {
            return Json(json!({
                "id": 25,
                "name": "unlinked",
                "types": [{ "slot": 1, "type": { "name": "electric", "url": "" } }],
                "sprites": { "front_default": null },
                "species": { "name": "unlinked", "url": "not a url" },
            }))
            .into_response()
        }
        "broken" => return (StatusCode::OK, "{ not json").into_response(),
        "overloaded" => return StatusCode::SERVICE_UNAVAILABLE.into_response(),
        _ => return (StatusCode::NOT_FOUND, "Not Found").into_response(),
    };

    let types: Vec<Value> = kind
        .into_iter()
        .map(|k| json!({ "slot": 1, "type": { "name": k, "url": "" } }))
        .collect();

    Json(json!({
        "id": id,
        "name": name,
        "base_experience": 112,
        "types": types,
        "sprites": { "front_default": sprite, "back_default": null },
        "species": {
            "name": name,
            "url": format!("{}/pokemon-species/{}/", upstream.base, id),
        },
    }))
    .into_response()
}

async fn species(Path(id): Path<u32>) -> Response {
    match id {
        25 => Json(json!({
            "flavor_text_entries": [
                { "flavor_text": "ピカチュウ", "language": { "name": "ja", "url": "" } },
                {
                    "flavor_text": "When several of\nthese POKéMON gather, their\u{000C}electricity could\nbuild and cause\nlightning storms.",
                    "language": { "name": "en", "url": "" }
                },
                { "flavor_text": "Second entry", "language": { "name": "en", "url": "" } }
            ]
        }))
        .into_response(),
        1 => Json(json!({
            "flavor_text_entries": [
                { "flavor_text": "Une graine", "language": { "name": "fr", "url": "" } }
            ]
        }))
        .into_response(),
        151 => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// Start the fake upstream and return its API root
async fn spawn_upstream() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let base = format!("http://{}/api/v2", addr);

    let router = Router::new()
        .route("/api/v2/pokemon/:name", get(pokemon))
        .route("/api/v2/pokemon-species/:id/", get(species))
        .with_state(Upstream {
            base: Arc::new(base.clone()),
        });

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Url::parse(&base).unwrap()
}

async fn service() -> (Arc<UpstreamPool>, PokeApiService) {
    let base = spawn_upstream().await;
    let pool = Arc::new(UpstreamPool::new(PoolConfig::default()).unwrap());
    let service = PokeApiService::new(pool.clone(), LookupConfig::new(base));
    (pool, service)
}

#[tokio::test]
async fn test_lookup_joins_pokemon_and_species() {
    let (pool, service) = service().await;

    let details = service
        .lookup("pikachu")
        .await
        .into_found()
        .expect("pikachu should be found");

    assert_eq!(details.id, 25);
    assert_eq!(details.name, "pikachu");
    assert_eq!(details.primary_type, "electric");
    assert_eq!(details.sprite.as_deref(), Some("https://sprites.test/25.png"));
    assert_eq!(
        details.description,
        "When several of these POKéMON gather, their electricity could build and cause lightning storms."
    );

    pool.shutdown().await;
}

#[tokio::test]
async fn test_missing_language_uses_fallback() {
    let (pool, service) = service().await;

    let details = service.lookup("bulbasaur").await.into_found().unwrap();
    assert_eq!(details.description, NO_DESCRIPTION);
    assert_eq!(details.sprite, None);

    pool.shutdown().await;
}

#[tokio::test]
async fn test_configured_language_is_used() {
    let base = spawn_upstream().await;
    let pool = Arc::new(UpstreamPool::new(PoolConfig::default()).unwrap());
    let service = PokeApiService::new(pool.clone(), LookupConfig::new(base).with_language("fr"));

    let details = service.lookup("bulbasaur").await.into_found().unwrap();
    assert_eq!(details.description, "Une graine");

    pool.shutdown().await;
}

#[tokio::test]
async fn test_unknown_name_is_not_found() {
    let (pool, service) = service().await;

    assert_eq!(
        service.lookup("nonexistentpokemon12345").await,
        LookupOutcome::NotFound
    );

    pool.shutdown().await;
}

#[tokio::test]
async fn test_failures_collapse_to_upstream_failure() {
    let (pool, service) = service().await;
    let failure = LookupOutcome::UpstreamFailure(FETCH_FAILED.to_string());

    // species call fails
    assert_eq!(service.lookup("ditto").await, failure);
    // primary call non-2xx other than 404
    assert_eq!(service.lookup("overloaded").await, failure);
    // malformed payloads
    assert_eq!(service.lookup("broken").await, failure);
    assert_eq!(service.lookup("typeless").await, failure);
    assert_eq!(service.lookup("nameless").await, failure);
    // species url that does not parse
    assert_eq!(service.lookup("unlinked").await, failure);

    pool.shutdown().await;
    // closed pool
    assert_eq!(service.lookup("pikachu").await, failure);
}

#[tokio::test]
async fn test_missing_species_is_failure_not_absence() {
    let (pool, service) = service().await;

    // Only the pokemon resource can report absence
    assert_eq!(
        service.lookup("mew").await,
        LookupOutcome::UpstreamFailure(FETCH_FAILED.to_string())
    );

    let app = create_pokeapi_router(Arc::new(service));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/pokemon-details/mew")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "Internal server error" }));

    pool.shutdown().await;
}

#[tokio::test]
async fn test_unreachable_upstream_is_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let pool = Arc::new(UpstreamPool::new(PoolConfig::default()).unwrap());
    let base = Url::parse(&format!("http://{}/api/v2", addr)).unwrap();
    let service = PokeApiService::new(pool, LookupConfig::new(base));

    assert!(matches!(
        service.lookup("pikachu").await,
        LookupOutcome::UpstreamFailure(_)
    ));
}

#[tokio::test]
async fn test_router_over_real_service() {
    let (pool, service) = service().await;
    let app = create_pokeapi_router(Arc::new(service));

    for (uri, expected_status, expected_error) in [
        ("/pokemon-details/pikachu", StatusCode::OK, None),
        (
            "/pokemon-details/missingno",
            StatusCode::NOT_FOUND,
            Some("Pokemon not found"),
        ),
        (
            "/pokemon-details/ditto",
            StatusCode::INTERNAL_SERVER_ERROR,
            Some("Internal server error"),
        ),
    ] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), expected_status, "uri: {}", uri);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        match expected_error {
            Some(message) => assert_eq!(body, json!({ "error": message })),
            None => {
                assert_eq!(body["id"], 25);
                assert_eq!(body["type"], "electric");
            }
        }
    }

    pool.shutdown().await;
}
