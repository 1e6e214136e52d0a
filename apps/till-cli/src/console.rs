//! Text rendering for the operator shell.

use std::fmt::Write;

use till_client::{ClientError, Dashboard, PosEventEmitter};
use till_core::{Bill, BillDetail, CartSnapshot, CatalogItem, Category};

/// Prints every session notification to stdout.
pub struct ConsoleEmitter;

impl PosEventEmitter for ConsoleEmitter {
    fn on_cart_changed(&self, snapshot: &CartSnapshot) {
        print!("{}", render_cart(snapshot));
    }

    fn on_catalog_refreshed(&self, categories: &[Category], items: &[CatalogItem]) {
        print!("{}", render_categories(categories));
        print!("{}", render_items(items));
    }

    fn on_submission_result(&self, result: Result<&Bill, &ClientError>) {
        match result {
            Ok(bill) => print!("{}", render_receipt(bill)),
            Err(err) => {
                let notice = err.notice();
                let hint = if notice.retryable { " (try again)" } else { "" };
                println!("!! {}{}", notice.message, hint);
            }
        }
    }
}

pub fn render_categories(categories: &[Category]) -> String {
    let mut out = String::from("Categories: [all]");
    for category in categories {
        let _ = write!(out, " [{}] {}", category.id, category.name);
    }
    out.push('\n');
    out
}

pub fn render_items(items: &[CatalogItem]) -> String {
    if items.is_empty() {
        return "No items\n".to_string();
    }
    let mut out = String::new();
    for item in items {
        let _ = writeln!(out, "{:>5}  {:<28} {:>10}", item.id, item.name, item.price);
    }
    out
}

pub fn render_cart(snapshot: &CartSnapshot) -> String {
    if snapshot.is_empty() {
        return "Cart is empty  Total: $0.00\n".to_string();
    }
    let mut out = String::from("Cart\n");
    for line in &snapshot.lines {
        let _ = writeln!(
            out,
            "{:>5}  {:<20} {:>8} x{:<3} {:>10}",
            line.item_id, line.name, line.unit_price, line.quantity, line.subtotal
        );
    }
    let _ = writeln!(
        out,
        "{} lines, {} units  Total: {}",
        snapshot.item_count, snapshot.total_quantity, snapshot.total
    );
    out
}

pub fn render_receipt(bill: &Bill) -> String {
    format!(
        "Bill {} created  Total: {}  at {}\n",
        bill.bill_number,
        bill.total_amount,
        bill.created_at.format("%Y-%m-%d %H:%M:%S")
    )
}

pub fn render_bill(bill: &BillDetail) -> String {
    let mut out = format!(
        "Bill {} (#{})  {}\n",
        bill.bill_number,
        bill.id,
        bill.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    for line in &bill.items {
        let name = line.item_name.as_deref().unwrap_or("(deleted item)");
        let _ = writeln!(
            out,
            "{:>5}  {:<20} {:>8} x{:<3} {:>10}",
            line.item_id, name, line.unit_price, line.quantity, line.subtotal
        );
    }
    let _ = writeln!(out, "Total: {}", bill.total_amount);
    out
}

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    let revenue = dashboard
        .revenue
        .map(|r| r.total_revenue.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    let _ = writeln!(out, "Total revenue: {revenue}");

    out.push_str("\nBy category\n");
    for row in &dashboard.categories {
        let _ = writeln!(
            out,
            "  {:<20} {:>6} sold {:>12}",
            row.name, row.total_items_sold, row.total_revenue
        );
    }

    out.push_str("\nBy item\n");
    for row in &dashboard.items {
        let _ = writeln!(
            out,
            "  {:<20} {:<12} {:>6} sold {:>12}",
            row.name,
            row.category_name.as_deref().unwrap_or("-"),
            row.total_quantity_sold,
            row.total_revenue
        );
    }

    out.push_str("\nRecent bills\n");
    for bill in &dashboard.recent_bills {
        let _ = writeln!(
            out,
            "  {:<26} {:>10}  {}",
            bill.bill_number,
            bill.total_amount,
            bill.created_at.format("%Y-%m-%d %H:%M")
        );
    }

    for failure in &dashboard.failures {
        let _ = writeln!(out, "!! {:?}: {}", failure.section, failure.notice.message);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::{Cart, CatalogItem, Money};

    #[test]
    fn test_render_cart() {
        let mut cart = Cart::new();
        let tea = CatalogItem::new(1, "Tea", Money::from_cents(250));
        cart.add_item(&tea);
        cart.add_item(&tea);

        let out = render_cart(&cart.snapshot());
        assert!(out.contains("Tea"));
        assert!(out.contains("x2"));
        assert!(out.ends_with("1 lines, 2 units  Total: $5.00\n"));

        assert_eq!(render_cart(&Cart::new().snapshot()), "Cart is empty  Total: $0.00\n");
    }

    #[test]
    fn test_render_categories() {
        let out = render_categories(&[Category::new(1, "Drinks")]);
        assert_eq!(out, "Categories: [all] [1] Drinks\n");
    }
}
