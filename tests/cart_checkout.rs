//! Integration tests for the cart, totals and order draft against the menu fixture

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use foodora::prelude::*;

fn menu() -> Result<Catalog<'static>, FixtureError> {
    load_catalog(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures"), "menu")
}

fn item<'c>(catalog: &'c Catalog<'static>, id: &str) -> Result<&'c CatalogItem<'static>, String> {
    catalog
        .get(&ItemId::new(id))
        .ok_or_else(|| format!("missing fixture item {id}"))
}

fn delivery_form() -> CheckoutForm {
    CheckoutForm {
        street: " 1 Main St ".to_string(),
        city: "Springfield".to_string(),
        postal_code: "12345".to_string(),
        phone: "555-0100".to_string(),
        instructions: "Ring twice".to_string(),
        payment_method: PaymentMethod::CashOnDelivery,
    }
}

#[test]
fn two_line_cart_totals() -> TestResult {
    let catalog = menu()?;
    let mut cart = Cart::new(catalog.currency());

    cart.add(item(&catalog, "margherita")?, 2)?;
    cart.add(item(&catalog, "caesar")?, 1)?;

    let totals = OrderTotals::for_cart(&cart)?;

    assert_eq!(totals.subtotal(), Money::from_minor(2550, USD));
    assert_eq!(totals.delivery_fee(), Money::from_minor(299, USD));
    assert_eq!(totals.grand_total(), Money::from_minor(2849, USD));
    assert_eq!(totals.grand_total().to_string(), "$28.49");

    Ok(())
}

#[test]
fn repeated_adds_merge_into_one_line() -> TestResult {
    let catalog = menu()?;
    let mut cart = Cart::new(catalog.currency());
    let pizza = item(&catalog, "margherita")?;

    cart.add(pizza, 1)?;
    cart.add(pizza, 1)?;
    cart.add(pizza, 3)?;

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.line(pizza.id()).map(CartLine::quantity), Some(5));
    assert_eq!(cart.subtotal()?, Money::from_minor(5000, USD));

    Ok(())
}

#[test]
fn zero_quantity_matches_remove() -> TestResult {
    let catalog = menu()?;
    let pizza = item(&catalog, "margherita")?;
    let fries = item(&catalog, "fries")?;

    let mut via_set = Cart::new(catalog.currency());
    via_set.add(pizza, 2)?;
    via_set.add(fries, 1)?;

    let mut via_remove = via_set.clone();

    assert!(via_set.set_quantity(pizza.id(), 0)?);
    assert!(via_remove.remove(pizza.id()).is_some());

    assert_eq!(via_set, via_remove);
    assert_eq!(via_set.subtotal()?, Money::from_minor(299, USD));

    Ok(())
}

#[test]
fn empty_cart_subtotal_is_zero() -> TestResult {
    let cart = Cart::new(USD);

    assert_eq!(cart.subtotal()?, Money::from_minor(0, USD));
    assert_eq!(
        OrderTotals::for_cart(&cart)?.grand_total(),
        Money::from_minor(DELIVERY_FEE, USD)
    );

    Ok(())
}

#[test]
fn draft_reflects_cart_and_trimmed_delivery() -> TestResult {
    let catalog = menu()?;
    let mut cart = Cart::new(catalog.currency());

    cart.add(item(&catalog, "margherita")?, 2)?;
    cart.add(item(&catalog, "caesar")?, 1)?;

    let draft = OrderDraft::from_cart(&cart, &delivery_form())?;

    assert_eq!(draft.lines().len(), 2);
    assert_eq!(draft.totals().grand_total(), Money::from_minor(2849, USD));
    assert_eq!(draft.delivery().street, "1 Main St");
    assert_eq!(draft.delivery().instructions.as_deref(), Some("Ring twice"));
    assert_eq!(draft.payment_method(), PaymentMethod::CashOnDelivery);

    Ok(())
}

#[test]
fn draft_is_decoupled_from_later_cart_edits() -> TestResult {
    let catalog = menu()?;
    let pizza = item(&catalog, "margherita")?;
    let mut cart = Cart::new(catalog.currency());

    cart.add(pizza, 1)?;

    let draft = OrderDraft::from_cart(&cart, &delivery_form())?;

    cart.set_quantity(pizza.id(), 4)?;

    assert_eq!(draft.lines().first().map(|line| line.quantity), Some(1));
    assert_eq!(draft.totals().subtotal(), Money::from_minor(1000, USD));

    Ok(())
}

#[test]
fn blank_fields_block_the_draft() -> TestResult {
    let catalog = menu()?;
    let mut cart = Cart::new(catalog.currency());

    cart.add(item(&catalog, "margherita")?, 1)?;

    let form = CheckoutForm {
        street: "\t".to_string(),
        phone: String::new(),
        ..delivery_form()
    };

    let result = OrderDraft::from_cart(&cart, &form);

    match result {
        Err(DraftError::Validation(ValidationError::MissingFields(fields))) => {
            assert_eq!(
                fields.as_slice(),
                &[DeliveryField::Street, DeliveryField::Phone]
            );
        }
        other => panic!("expected missing fields, got {other:?}"),
    }

    assert_eq!(cart.len(), 1);

    Ok(())
}

#[test]
fn receipt_lists_lines_and_totals() -> TestResult {
    let catalog = menu()?;
    let mut cart = Cart::new(catalog.currency());

    cart.add(item(&catalog, "margherita")?, 2)?;
    cart.add(item(&catalog, "caesar")?, 1)?;

    let mut out = Vec::new();

    Receipt::for_cart(&cart)?.write_to(&mut out)?;

    let rendered = String::from_utf8(out)?;

    assert!(rendered.contains("Margherita Pizza"));
    assert!(rendered.contains("$20.00"));
    assert!(rendered.contains("$25.50"));
    assert!(rendered.contains("$2.99"));
    assert!(rendered.contains("$28.49"));

    Ok(())
}

#[test]
fn menu_filters_by_category() -> TestResult {
    let catalog = menu()?;

    let pizzas: Vec<&str> = catalog
        .by_category("pizza")
        .map(|item| item.id().as_str())
        .collect();

    assert_eq!(pizzas, ["margherita", "pepperoni"]);

    Ok(())
}
