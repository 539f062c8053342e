//! Lambda entrypoint for the edge redirect variant.

use std::sync::Arc;

use aws_config::BehaviorVersion;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing_subscriber::EnvFilter;

use s3_redirect::config::EdgeConfig;
use s3_redirect::credentials::StsCredentialProvider;
use s3_redirect::event::RedirectEvent;
use s3_redirect::handler::{EdgeOutcome, EdgeState};
use s3_redirect::signer::factory::S3SignerFactory;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .without_time()
        .init();

    let config = EdgeConfig::from_env()?;
    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let sts = aws_sdk_sts::Client::new(&aws_config);
    let credentials = Arc::new(StsCredentialProvider::new(sts, config.role_arn().to_owned()));
    let signers = Arc::new(S3SignerFactory::new(
        config.bucket().to_owned(),
        config.url_ttl(),
        config.region().to_owned(),
    ));
    let state = EdgeState::new(credentials, signers, config.stage().to_owned());

    run(service_fn(|event| handle(event, &state))).await
}

async fn handle(
    event: LambdaEvent<RedirectEvent>,
    state: &EdgeState,
) -> Result<EdgeOutcome, Error> {
    let request_id = event.context.request_id.clone();
    Ok(state.handle(event.payload, &request_id).await?)
}
