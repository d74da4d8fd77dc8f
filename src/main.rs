use aws_config::BehaviorVersion;
use handler::session_fn;
use lambda_runtime::{LambdaEvent, service_fn};
use model::Error;
use model::env::LOG_LEVEL;
use serde_json::Value;
use service_appstream::AppStreamSessionService;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Verbosity comes from the environment, missing configuration is fatal
    let log_level: String = std::env::var(LOG_LEVEL)
        .expect(format!("Missing {} environment variable", LOG_LEVEL).as_str());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(log_level.as_str())
                .expect(format!("Invalid {} value {}", LOG_LEVEL, log_level).as_str()),
        )
        .with_ansi(false)
        .init();

    let session_service: AppStreamSessionService =
        AppStreamSessionService::new(aws_sdk_appstream::Client::new(
            &aws_config::load_defaults(BehaviorVersion::latest()).await,
        ));

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        session_fn(&session_service, event)
    }))
    .await
}
