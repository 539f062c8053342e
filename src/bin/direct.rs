//! Lambda entrypoint for the direct redirect variant.

use std::sync::Arc;

use aws_config::BehaviorVersion;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing_subscriber::EnvFilter;

use s3_redirect::config::DirectConfig;
use s3_redirect::event::ApiRequest;
use s3_redirect::handler::RedirectState;
use s3_redirect::response::ApiResponse;
use s3_redirect::signer::s3::S3UrlSigner;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .without_time()
        .init();

    let config = DirectConfig::from_env()?;
    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let client = aws_sdk_s3::Client::new(&aws_config);
    let signer = Arc::new(S3UrlSigner::new(
        client,
        config.bucket().to_owned(),
        config.url_ttl(),
    ));
    let state = RedirectState::new(signer);

    run(service_fn(|event| handle(event, &state))).await
}

async fn handle(
    event: LambdaEvent<ApiRequest>,
    state: &RedirectState,
) -> Result<ApiResponse, Error> {
    Ok(state.handle(event.payload).await?)
}
