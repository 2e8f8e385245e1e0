use chrono::Utc;
use tracing_subscriber::EnvFilter;
use zammad_digest::config::Config;
use zammad_digest::run;
use zammad_digest::telegram::notifier::TelegramNotifier;
use zammad_digest::zammad::client::ZammadClient;

const EXIT_RUN_FAILED: i32 = 1;
const EXIT_CONFIG: i32 = 2;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(EXIT_CONFIG);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {e}");
            std::process::exit(EXIT_RUN_FAILED);
        }
    };

    if let Err(e) = rt.block_on(report_once(&config)) {
        eprintln!("Report error: {e}");
        std::process::exit(EXIT_RUN_FAILED);
    }
}

async fn report_once(config: &Config) -> Result<(), zammad_digest::error::ReportError> {
    let counter = ZammadClient::new(
        &config.zammad_url,
        &config.zammad_token,
        config.http_timeout,
    )?;
    let notifier = TelegramNotifier::new(
        &config.telegram_bot_token,
        &config.telegram_chat_id,
        config.telegram_api_url.clone(),
        config.http_timeout,
    )?;

    let now = Utc::now().with_timezone(&config.timezone);
    run::run(config, &counter, &notifier, &now).await
}
