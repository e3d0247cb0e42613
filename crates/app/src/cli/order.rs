use std::io;

use clap::{Args, ValueEnum};
use foodora::{
    catalog::ItemId,
    checkout::{CheckoutForm, PaymentMethod},
    receipt::Receipt,
};
use foodora_app::{
    checkout::{Acknowledgement, Destination},
    config::CheckoutConfig,
    context::AppContext,
    session::{Principal, Session},
};
use rusty_money::{Money, iso::Currency};

const ESTIMATED_DELIVERY: &str = "30-45 minutes";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Payment {
    /// Cash on delivery
    Cod,

    /// Credit or debit card
    Card,
}

impl From<Payment> for PaymentMethod {
    fn from(value: Payment) -> Self {
        match value {
            Payment::Cod => PaymentMethod::CashOnDelivery,
            Payment::Card => PaymentMethod::Card,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    /// Item to add as `ID` or `ID:QUANTITY`; repeat for more lines
    #[arg(long = "item", required = true, value_parser = parse_item)]
    items: Vec<(ItemId, u32)>,

    /// Delivery street
    #[arg(long, default_value = "")]
    street: String,

    /// Delivery city
    #[arg(long, default_value = "")]
    city: String,

    /// Delivery postal code
    #[arg(long, default_value = "")]
    postal_code: String,

    /// Contact phone
    #[arg(long, default_value = "")]
    phone: String,

    /// Instructions for the courier
    #[arg(long, default_value = "")]
    instructions: String,

    /// Payment method
    #[arg(long, value_enum, default_value_t = Payment::Cod)]
    payment: Payment,

    /// Acknowledgement chosen once the order is accepted
    #[arg(long, value_enum, default_value_t = Acknowledgement::ViewOrder)]
    ack: Acknowledgement,

    /// Principal id placing the order
    #[arg(long, env = "FOODORA_USER", default_value = "guest")]
    user: String,

    /// Print the placed order as JSON
    #[arg(long)]
    json: bool,
}

pub(crate) async fn run(config: &CheckoutConfig, args: OrderArgs) -> Result<(), String> {
    let catalog = super::catalog(config)?;
    let context = AppContext::in_memory(config);
    let mut session = Session::start(Principal::new(args.user), catalog.currency());

    for (id, quantity) in &args.items {
        let item = catalog
            .get(id)
            .ok_or_else(|| format!("unknown item: {id}"))?;

        session
            .add_to_cart(item, *quantity)
            .map_err(|error| format!("failed to add {id}: {error}"))?;
    }

    Receipt::for_cart(session.cart())
        .and_then(|receipt| receipt.write_to(io::stdout()))
        .map_err(|error| format!("failed to render receipt: {error}"))?;

    let form = CheckoutForm {
        street: args.street,
        city: args.city,
        postal_code: args.postal_code,
        phone: args.phone,
        instructions: args.instructions,
        payment_method: args.payment.into(),
    };

    let mut flow = context.checkout();

    let order = flow
        .submit(&session, &form)
        .await
        .map_err(|error| format!("failed to place order: {error}"))?;

    println!();
    println!("your order has been placed");

    let destination = flow
        .acknowledge(&mut session, args.ack)
        .map_err(|error| error.to_string())?;

    if args.json {
        let json = serde_json::to_string_pretty(&order)
            .map_err(|error| format!("failed to serialise order: {error}"))?;

        println!("{json}");
    }

    match destination {
        Destination::OrderConfirmation { order: uuid, total } => {
            println!("order_uuid: {uuid}");
            println!("total: {}", display_amount(total, catalog.currency())?);
            println!("payment: {}", order.payment_method.label());
            println!("estimated_delivery: {ESTIMATED_DELIVERY}");
        }
        Destination::Home => println!("back to home"),
    }

    let history = context
        .orders
        .list_orders(session.principal().id.clone())
        .await
        .map_err(|error| format!("failed to list orders: {error}"))?;

    println!("orders_on_file: {}", history.len());

    session.end();

    Ok(())
}

fn parse_item(value: &str) -> Result<(ItemId, u32), String> {
    let (id, quantity) = match value.split_once(':') {
        Some((id, quantity)) => (
            id,
            quantity
                .parse::<u32>()
                .map_err(|error| format!("invalid quantity {quantity:?}: {error}"))?,
        ),
        None => (value, 1),
    };

    if id.trim().is_empty() {
        return Err("item id cannot be empty".to_string());
    }

    Ok((ItemId::new(id.trim()), quantity))
}

fn display_amount(minor_units: u64, currency: &Currency) -> Result<String, String> {
    let minor_units =
        i64::try_from(minor_units).map_err(|error| format!("invalid amount: {error}"))?;

    Ok(Money::from_minor(minor_units, currency).to_string())
}
