//! Back-office subcommands: item maintenance and bill history edits.

use anyhow::{anyhow, bail, Result};
use clap::{Args, Subcommand};

use till_client::PosSession;
use till_core::{BillLine, CategoryId, ItemDraft, ItemId, Money};

use crate::console;

/// Name, price, category and picture of an item.
#[derive(Debug, Args)]
pub struct ItemFields {
    name: String,
    /// Unit price such as 2.50
    price: Money,
    #[arg(long)]
    category: CategoryId,
    #[arg(long)]
    image: Option<String>,
}

impl ItemFields {
    fn draft(self) -> ItemDraft {
        let draft = ItemDraft::new(self.name, self.price, self.category);
        match self.image {
            Some(image) => draft.with_image(image),
            None => draft,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    /// Create a catalog item
    Add(ItemFields),
    /// Rewrite an existing item
    Update {
        id: ItemId,
        #[command(flatten)]
        fields: ItemFields,
    },
    /// Delete an item that has never been sold
    Delete { id: ItemId },
}

#[derive(Debug, Subcommand)]
pub enum BillCommand {
    /// Show one bill with its lines
    Show { id: i64 },
    /// Replace a bill's lines
    Update {
        id: i64,
        /// ITEM:QTY:PRICE, e.g. 1:2:2.50 (repeatable)
        #[arg(long = "line", value_parser = parse_bill_line, required = true)]
        lines: Vec<BillLine>,
    },
    /// Delete one bill
    Delete { id: i64 },
    /// Delete every bill and reset analytics
    Clear {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run_item(session: &PosSession, command: ItemCommand) -> Result<()> {
    let catalog = session.catalog();
    match command {
        ItemCommand::Add(fields) => {
            let item = catalog.create_item(&fields.draft()).await?;
            print!("{}", console::render_items(&[item]));
        }
        ItemCommand::Update { id, fields } => {
            let item = catalog.update_item(id, &fields.draft()).await?;
            print!("{}", console::render_items(&[item]));
        }
        ItemCommand::Delete { id } => {
            catalog.delete_item(id).await?;
            println!("Item {id} deleted");
        }
    }
    Ok(())
}

pub async fn run_bill(session: &PosSession, command: BillCommand) -> Result<()> {
    let analytics = session.analytics();
    match command {
        BillCommand::Show { id } => match analytics.fetch_bill(id).await? {
            Some(bill) => print!("{}", console::render_bill(&bill)),
            None => println!("Bill {id} not found"),
        },
        BillCommand::Update { id, lines } => {
            let bill = analytics.update_bill(id, &lines).await?;
            print!("{}", console::render_bill(&bill));
        }
        BillCommand::Delete { id } => {
            analytics.delete_bill(id).await?;
            println!("Bill {id} deleted");
        }
        BillCommand::Clear { yes } => {
            if !yes {
                bail!("refusing to delete every bill without --yes");
            }
            analytics.clear_bills().await?;
            println!("All bills and analytics cleared");
        }
    }
    Ok(())
}

/// Parses `ITEM:QTY:PRICE`.
fn parse_bill_line(raw: &str) -> Result<BillLine> {
    let mut parts = raw.split(':');
    let (Some(item), Some(quantity), Some(price), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        bail!("expected ITEM:QTY:PRICE, got '{raw}'");
    };

    Ok(BillLine {
        item_id: item
            .trim()
            .parse()
            .map_err(|_| anyhow!("bad item id '{item}'"))?,
        quantity: quantity
            .trim()
            .parse()
            .map_err(|_| anyhow!("bad quantity '{quantity}'"))?,
        unit_price: price.parse()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bill_line() {
        assert_eq!(
            parse_bill_line("1:2:2.50").unwrap(),
            BillLine {
                item_id: 1,
                quantity: 2,
                unit_price: Money::from_cents(250),
            }
        );
        assert!(parse_bill_line("1:2").is_err());
        assert!(parse_bill_line("1:2:2.50:9").is_err());
        assert!(parse_bill_line("tea:2:2.50").is_err());
        assert!(parse_bill_line("1:2:cheap").is_err());
    }

    #[test]
    fn test_item_fields_build_draft() {
        let fields = ItemFields {
            name: "Flat White".into(),
            price: Money::from_cents(350),
            category: 1,
            image: Some("/img/fw.png".into()),
        };
        let draft = fields.draft();
        assert_eq!(draft.price, Money::from_cents(350));
        assert_eq!(draft.image_url.as_deref(), Some("/img/fw.png"));
    }
}
