use std::str::FromStr as _;
use tracing_subscriber::{filter::Directive, EnvFilter};

pub fn init_logging() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(Directive::from_str("url_builder=info").unwrap())
                .with_env_var("URL_BUILDER_LOG")
                .from_env_lossy(),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
