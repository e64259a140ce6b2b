#![warn(clippy::pedantic)]

mod error;
mod extract;
mod openapi;
mod ratelimit;
mod route;
mod store;
#[cfg(test)]
mod test;
mod token;
mod trace;

use std::{net::SocketAddr, sync::Arc};

use aide::{axum::ApiRouter, openapi::OpenApi};
use argon2::Argon2;
use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_http::{
	compression::CompressionLayer,
	cors::CorsLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};

pub type Store = Arc<dyn store::BoardStore>;
pub type AppState = State;

/// The shared application state.
///
/// This holds the store behind its interface, the password hash
/// configuration, and the bearer token keys.
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub store: Store,
	pub hasher: Argon2<'static>,
	pub keys: token::Keys,
}

fn app(state: State) -> Router {
	aide::gen::extract_schemas(true);

	let mut api = OpenApi::default();

	ApiRouter::new()
		.nest("/api/auth", route::auth::routes())
		.nest("/api/posts", route::post::routes())
		.nest("/docs", route::docs::routes())
		.finish_api_with(&mut api, openapi::docs)
		.layer(Extension(Arc::new(api)))
		.with_state(state)
}

#[tokio::main]
async fn main() {
	dotenvy::dotenv().ok();

	let _guard = trace::init_tracing_subscriber();

	let state = State {
		store: Arc::new(store::MemoryStore::new()),
		hasher: Argon2::default(),
		keys: token::Keys::from_env(),
	};

	let ratelimit = ratelimit::default();
	ratelimit::cleanup_old_limits(&[&ratelimit]);

	let app = app(state).layer(
		ServiceBuilder::new()
			.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
			.layer(TraceLayer::new_for_http())
			.layer(CorsLayer::permissive())
			.layer(CompressionLayer::new())
			.layer(PropagateRequestIdLayer::x_request_id())
			.layer(GovernorLayer { config: ratelimit }),
	);

	let port = std::env::var("PORT").map_or_else(
		|_| 3000,
		|port| port.parse().expect("PORT must be a number"),
	);

	let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
		.await
		.expect("failed to bind to port");

	tracing::info!("listening on port {}", port);

	axum::serve(
		listener,
		app.into_make_service_with_connect_info::<SocketAddr>(),
	)
	.await
	.unwrap();
}
