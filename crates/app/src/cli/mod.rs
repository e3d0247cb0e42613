use clap::{Parser, Subcommand};
use foodora::{catalog::Catalog, fixtures::load_catalog};
use foodora_app::{
    config::{CheckoutConfig, LoggingConfig},
    observability,
};

mod menu;
mod order;

#[derive(Debug, Parser)]
#[command(name = "foodora-app", about = "Foodora CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(flatten)]
    checkout: CheckoutConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the catalog
    Menu(menu::MenuArgs),

    /// Fill a cart and place an order against the in-memory order store
    Order(order::OrderArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init(&self.logging).map_err(|error| error.to_string())?;

        match self.command {
            Commands::Menu(args) => menu::run(&self.checkout, &args),
            Commands::Order(args) => order::run(&self.checkout, args).await,
        }
    }
}

fn catalog(config: &CheckoutConfig) -> Result<Catalog<'static>, String> {
    let catalog = load_catalog(&config.fixtures, &config.catalog)
        .map_err(|error| format!("failed to load catalog {}: {error}", config.catalog))?;

    let currency = config
        .currency()
        .map_err(|error| format!("invalid currency: {error}"))?;

    if catalog.currency().iso_alpha_code != currency.iso_alpha_code {
        return Err(format!(
            "catalog {} is priced in {}, expected {}",
            config.catalog,
            catalog.currency().iso_alpha_code,
            currency.iso_alpha_code
        ));
    }

    Ok(catalog)
}
