use clap::Args;
use foodora::catalog::CatalogItem;
use foodora_app::config::CheckoutConfig;

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Only list items in this category
    #[arg(long)]
    category: Option<String>,
}

pub(crate) fn run(config: &CheckoutConfig, args: &MenuArgs) -> Result<(), String> {
    let catalog = super::catalog(config)?;

    let items: Vec<&CatalogItem<'_>> = match &args.category {
        Some(category) => catalog.by_category(category).collect(),
        None => catalog.iter().collect(),
    };

    if items.is_empty() {
        println!("no items found");
        return Ok(());
    }

    for item in items {
        println!(
            "{:<16} {:<28} {:>9}  {}",
            item.id().as_str(),
            item.name(),
            item.price().to_string(),
            item.category()
        );
    }

    Ok(())
}
