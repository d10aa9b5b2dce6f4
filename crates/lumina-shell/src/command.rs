//! Parsing of REPL input into storefront intents.

use lumina_core::{CategoryFilter, SortMode};
use thiserror::Error;

/// Slash commands offered for completion, in help order.
pub const COMMANDS: &[&str] = &[
    "/home",
    "/shop",
    "/category",
    "/sort",
    "/product",
    "/tips",
    "/add",
    "/remove",
    "/qty",
    "/inc",
    "/dec",
    "/cart",
    "/close",
    "/clear",
    "/checkout",
    "/help",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Home,
    Shop,
    Category(CategoryFilter),
    Sort(SortMode),
    Product(String),
    Tips(String),
    Add(String),
    Remove(String),
    Quantity(String, i64),
    Increment(String),
    Decrement(String),
    Cart,
    Close,
    Clear,
    Checkout,
    Chat(String),
    Quit,
}

impl Command {
    /// Whether executing this command waits on the assistant.
    pub fn awaits_assistant(&self) -> bool {
        matches!(self, Self::Chat(_) | Self::Tips(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type /help for a list of commands.")]
    Unknown(String),
    #[error("{command} needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("'{value}' is not a valid {expected}")]
    InvalidArgument {
        value: String,
        expected: &'static str,
    },
}

/// Parses one line of input. Anything that is not a slash command or
/// `quit`/`exit` is a chat message.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line == "quit" || line == "exit" {
        return Ok(Command::Quit);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Chat(line.to_string()));
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    match name {
        "help" => Ok(Command::Help),
        "home" => Ok(Command::Home),
        "shop" => Ok(Command::Shop),
        "category" => {
            let value = required(args, "/category", "a category name or 'all'")?;
            Ok(Command::Category(CategoryFilter::from_label(value)))
        }
        "sort" => {
            let value = required(args, "/sort", "featured, low-high or high-low")?;
            value
                .parse()
                .map(Command::Sort)
                .map_err(|_| CommandError::InvalidArgument {
                    value: value.to_string(),
                    expected: "sort mode",
                })
        }
        "product" => Ok(Command::Product(required(args, "/product", "a product id")?.to_string())),
        "tips" => Ok(Command::Tips(required(args, "/tips", "a product id")?.to_string())),
        "add" => Ok(Command::Add(required(args, "/add", "a product id")?.to_string())),
        "remove" => Ok(Command::Remove(required(args, "/remove", "a product id")?.to_string())),
        "inc" => Ok(Command::Increment(required(args, "/inc", "a product id")?.to_string())),
        "dec" => Ok(Command::Decrement(required(args, "/dec", "a product id")?.to_string())),
        "qty" => {
            let args = required(args, "/qty", "a product id and a quantity")?;
            let Some((id, quantity)) = args.split_once(char::is_whitespace) else {
                return Err(CommandError::MissingArgument {
                    command: "/qty",
                    argument: "a quantity",
                });
            };
            let quantity = quantity.trim();
            let quantity = quantity
                .parse::<i64>()
                .map_err(|_| CommandError::InvalidArgument {
                    value: quantity.to_string(),
                    expected: "whole-number quantity",
                })?;
            Ok(Command::Quantity(id.to_string(), quantity))
        }
        "cart" => Ok(Command::Cart),
        "close" => Ok(Command::Close),
        "clear" => Ok(Command::Clear),
        "checkout" => Ok(Command::Checkout),
        other => Err(CommandError::Unknown(format!("/{other}"))),
    }
}

fn required<'a>(
    args: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    if args.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(args)
    }
}
