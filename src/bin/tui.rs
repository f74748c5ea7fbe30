use anyhow::Context;
use todomir::client::ApiClient;
use todomir::config::Config;
use todomir::store::TaskStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't fight the terminal UI.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();
    let client = ApiClient::new(&config)
        .with_context(|| format!("cannot reach API at {}", config.api_base_url))?;
    let store = TaskStore::new(client);

    todomir::tui::run(store).await
}
