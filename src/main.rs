// SPDX-License-Identifier: MPL-2.0
use cifar_lens::app::{self, Flags};

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();

    let lang = args.opt_value_from_str("--lang").unwrap_or_else(|err| {
        tracing::warn!(error = %err, "ignoring invalid --lang argument");
        None
    });
    let server_url = args.opt_value_from_str("--server").unwrap_or_else(|err| {
        tracing::warn!(error = %err, "ignoring invalid --server argument");
        None
    });
    let config_dir = args
        .opt_value_from_str("--config-dir")
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring invalid --config-dir argument");
            None
        });

    let flags = Flags {
        lang,
        server_url,
        config_dir,
        file_path: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
    };

    tracing::info!("cifar_lens starting");
    app::run(flags)
}
