//! Interactive register: reads cart commands from stdin, one per line.

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use till_client::PosSession;
use till_core::{CategoryId, ItemId, LineChange};

use crate::console;

pub const HELP: &str = "\
Commands:
  cat <id|all>   show a category (or everything)
  add <id>       add one unit of an item
  inc <id>       one more unit
  dec <id>       one less unit (removes the line at zero)
  rm <id>        remove the line
  clear          empty the cart
  show           print cart and catalog
  pay            create the bill
  help           this text
  quit           leave the register
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterCommand {
    Category(Option<CategoryId>),
    Add(ItemId),
    Increment(ItemId),
    Decrement(ItemId),
    Remove(ItemId),
    Clear,
    Show,
    Pay,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<RegisterCommand>> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if words.next().is_some() {
        bail!("too many arguments for '{verb}'");
    }

    let command = match verb.to_ascii_lowercase().as_str() {
        "cat" | "category" => match arg {
            None | Some("all") => RegisterCommand::Category(None),
            Some(id) => RegisterCommand::Category(Some(parse_id(verb, Some(id))?)),
        },
        "add" => RegisterCommand::Add(parse_id(verb, arg)?),
        "inc" | "+" => RegisterCommand::Increment(parse_id(verb, arg)?),
        "dec" | "-" => RegisterCommand::Decrement(parse_id(verb, arg)?),
        "rm" | "remove" => RegisterCommand::Remove(parse_id(verb, arg)?),
        "clear" => RegisterCommand::Clear,
        "show" | "ls" => RegisterCommand::Show,
        "pay" | "checkout" => RegisterCommand::Pay,
        "help" | "?" => RegisterCommand::Help,
        "quit" | "exit" | "q" => RegisterCommand::Quit,
        other => bail!("unknown command '{other}' (try 'help')"),
    };
    Ok(Some(command))
}

fn parse_id(verb: &str, arg: Option<&str>) -> Result<i64> {
    let raw = arg.with_context(|| format!("'{verb}' needs an id"))?;
    raw.parse()
        .with_context(|| format!("'{raw}' is not a valid id"))
}

/// Runs the register until `quit` or end of input.
pub async fn run(session: &PosSession) -> Result<()> {
    // Initial load failures are shown, not fatal: the operator can retry
    // with `cat all`.
    if let Err(err) = session.start().await {
        println!("!! {}", err.notice().message);
    }
    print!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("!! {err:#}");
                continue;
            }
        };
        debug!(?command, "register command");

        if !execute(session, command).await {
            break;
        }
    }
    Ok(())
}

/// Returns false when the register should stop.
async fn execute(session: &PosSession, command: RegisterCommand) -> bool {
    match command {
        RegisterCommand::Category(filter) => {
            if let Err(err) = session.select_category(filter).await {
                println!("!! {}", err.notice().message);
            }
        }
        RegisterCommand::Add(id) => match session.add_item(id).await {
            LineChange::Unchanged => println!("!! item {id} is not in the current catalog"),
            LineChange::Refused => println!("!! quantity limit reached for item {id}"),
            _ => {}
        },
        RegisterCommand::Increment(id) => {
            if session.adjust_quantity(id, 1).await == LineChange::Refused {
                println!("!! quantity limit reached for item {id}");
            }
        }
        RegisterCommand::Decrement(id) => {
            session.adjust_quantity(id, -1).await;
        }
        RegisterCommand::Remove(id) => {
            session.remove_item(id).await;
        }
        RegisterCommand::Clear => {
            session.clear_cart().await;
        }
        RegisterCommand::Show => {
            print!("{}", console::render_categories(&session.categories().await));
            print!("{}", console::render_items(&session.items().await));
            print!("{}", console::render_cart(&session.snapshot().await));
        }
        RegisterCommand::Pay => match session.complete_transaction().await {
            Ok(None) => println!("!! cart is empty"),
            // Result already printed by the emitter.
            Ok(Some(_)) | Err(_) => {}
        },
        RegisterCommand::Help => print!("{HELP}"),
        RegisterCommand::Quit => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("add 3").unwrap(), Some(RegisterCommand::Add(3)));
        assert_eq!(parse_command("  DEC 7 ").unwrap(), Some(RegisterCommand::Decrement(7)));
        assert_eq!(parse_command("cat all").unwrap(), Some(RegisterCommand::Category(None)));
        assert_eq!(parse_command("cat 2").unwrap(), Some(RegisterCommand::Category(Some(2))));
        assert_eq!(parse_command("pay").unwrap(), Some(RegisterCommand::Pay));
        assert_eq!(parse_command("").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("add").is_err());
        assert!(parse_command("add tea").is_err());
        assert!(parse_command("add 1 2").is_err());
        assert!(parse_command("refund 1").is_err());
    }
}
