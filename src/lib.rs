pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{LocationProvider, Notifier, Presenter, PresenterOptions, RateProvider};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Convert {
        amount: String,
        from: Option<String>,
        to: Option<String>,
        swap: bool,
    },
    Currencies,
    Detect,
    Interactive {
        from: Option<String>,
        to: Option<String>,
    },
}

fn presenter_options(
    config: &AppConfig,
    from: Option<String>,
    to: Option<String>,
) -> PresenterOptions {
    PresenterOptions {
        from,
        to: to.unwrap_or_else(|| config.default_to.clone()),
        mode: config.conversion_mode,
        clear_result_on_change: config.clear_result_on_change,
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let rates: Arc<dyn RateProvider> = Arc::new(providers::ExchangeRateApiProvider::from_env(
        config.exchange_rate_base_url(),
        config.exchange_rate_api_key(),
        &config.base_currency,
    ));
    let location: Arc<dyn LocationProvider> =
        Arc::new(providers::IpApiProvider::new(config.geolocation_base_url()));
    let notifier: Arc<dyn Notifier> = Arc::new(cli::notify::ConsoleNotifier);

    match command {
        AppCommand::Convert {
            amount,
            from,
            to,
            swap,
        } => {
            let options = presenter_options(&config, from, to);
            let mut presenter = Presenter::new(rates, location, notifier, options);
            cli::convert::run(&mut presenter, &amount, swap).await
        }
        AppCommand::Currencies => cli::currencies::run(rates.as_ref()).await,
        AppCommand::Detect => cli::detect::run(location.as_ref(), notifier.as_ref()).await,
        AppCommand::Interactive { from, to } => {
            let options = presenter_options(&config, from, to);
            let mut presenter = Presenter::new(rates, location, notifier, options);
            cli::interactive::run(&mut presenter).await
        }
    }
}
