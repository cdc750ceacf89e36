//! Command Router
//!
//! Maps raw message text onto the single command table. Parsing is pure:
//! deciding what to reply is left to the pipeline.

use std::fmt;

use vybe_analytics::report::markup::{bold, code, escape_html, italic};

/// Every command the bot understands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Start,
    Help,
    TokenDetail,
    TokenBalances,
    WalletPnl,
    TopHolders,
    PriceChart,
}

/// Static description of a command
#[derive(Debug)]
pub struct CommandSpec {
    pub kind: CommandKind,
    pub name: &'static str,
    /// Argument placeholder; `None` for argument-less commands
    pub argument: Option<&'static str>,
    pub description: &'static str,
    /// Canonical example argument
    pub example: Option<&'static str>,
}

const EXAMPLE_WALLET: &str = "5QuZ7ePLQbMmb6qRMQBH3Af7FNUYcXvNkXWWJCxjvvD8";
const EXAMPLE_TOKEN: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";

/// The command table, in help order
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        kind: CommandKind::Start,
        name: "start",
        argument: None,
        description: "Start interacting with the bot",
        example: None,
    },
    CommandSpec {
        kind: CommandKind::Help,
        name: "help",
        argument: None,
        description: "View all available commands",
        example: None,
    },
    CommandSpec {
        kind: CommandKind::TokenDetail,
        name: "tokendetail",
        argument: Some("tokenaddress"),
        description: "Get token details",
        example: Some(EXAMPLE_TOKEN),
    },
    CommandSpec {
        kind: CommandKind::TokenBalances,
        name: "tokenbalances",
        argument: Some("walletaddress"),
        description: "View wallet token balances",
        example: Some(EXAMPLE_WALLET),
    },
    CommandSpec {
        kind: CommandKind::WalletPnl,
        name: "walletpnl",
        argument: Some("walletaddress"),
        description: "Analyze wallet trading PnL",
        example: Some(EXAMPLE_WALLET),
    },
    CommandSpec {
        kind: CommandKind::TopHolders,
        name: "topholders",
        argument: Some("tokenaddress"),
        description: "Show the largest holders of a token",
        example: Some(EXAMPLE_TOKEN),
    },
    CommandSpec {
        kind: CommandKind::PriceChart,
        name: "pricechart",
        argument: Some("tokenaddress"),
        description: "Price and volume chart with an AI trend verdict",
        example: Some(EXAMPLE_TOKEN),
    },
];

impl CommandKind {
    pub fn spec(self) -> &'static CommandSpec {
        // every kind has exactly one table row
        COMMANDS
            .iter()
            .find(|spec| spec.kind == self)
            .unwrap_or(&COMMANDS[0])
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn requires_argument(self) -> bool {
        self.spec().argument.is_some()
    }

    /// Human noun for the argument, used in usage replies
    fn subject(self) -> &'static str {
        match self.spec().argument {
            Some("walletaddress") => "wallet address",
            _ => "token address",
        }
    }

    /// Reply for a missing argument, carrying the canonical example
    pub fn usage(self) -> String {
        let spec = self.spec();
        format!(
            "Please provide a valid {}.\n{} /{} {}",
            self.subject(),
            bold("Example:"),
            spec.name,
            code(spec.example.unwrap_or_default()),
        )
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of routing one message
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    Command {
        kind: CommandKind,
        argument: Option<String>,
    },
    /// A parametrized command arrived without its argument
    MissingArgument(CommandKind),
    /// Starts with `/` but names no known command; carries the trimmed text
    Unknown(String),
    NotACommand,
}

/// Route raw message text.
///
/// The first whitespace-delimited token is the command, compared literally and
/// case-sensitively after stripping a trailing `@BotName`. The next token, if
/// any, is the argument; anything after it is ignored.
pub fn parse(text: &str) -> RouteOutcome {
    let mut tokens = text.split_whitespace();
    let Some(head) = tokens.next() else {
        return RouteOutcome::NotACommand;
    };
    let Some(name) = head.strip_prefix('/') else {
        return RouteOutcome::NotACommand;
    };
    let name = name.split_once('@').map_or(name, |(name, _)| name);

    let Some(spec) = COMMANDS.iter().find(|spec| spec.name == name) else {
        return RouteOutcome::Unknown(text.trim().to_string());
    };

    if spec.argument.is_none() {
        return RouteOutcome::Command {
            kind: spec.kind,
            argument: None,
        };
    }

    match tokens.next() {
        Some(argument) => RouteOutcome::Command {
            kind: spec.kind,
            argument: Some(argument.to_string()),
        },
        None => RouteOutcome::MissingArgument(spec.kind),
    }
}

/// `/help` body generated from [`COMMANDS`]
pub fn help_text() -> String {
    let mut text = String::from("Here are the available commands:\n\n");

    text.push_str(&format!("{}\n", bold("🔹 Basic Commands:")));
    for spec in COMMANDS.iter().filter(|s| s.argument.is_none()) {
        text.push_str(&format!("/{} - {}\n", spec.name, italic(spec.description)));
    }

    text.push_str(&format!("\n{}\n", bold("🔹 Analytics Commands:")));
    for spec in COMMANDS.iter().filter(|s| s.argument.is_some()) {
        text.push_str(&format!(
            "/{} [{}] - {}\n",
            spec.name,
            spec.argument.unwrap_or_default(),
            italic(spec.description)
        ));
    }

    let example = CommandKind::TokenDetail.spec();
    text.push_str(&format!(
        "\n{}\n/{} {}\n",
        bold("Example:"),
        example.name,
        example.example.unwrap_or_default()
    ));
    text
}

/// `/start` greeting
pub fn greeting(first_name: Option<&str>) -> String {
    let name = first_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map_or_else(|| "there".to_string(), escape_html);
    format!(
        "👋 Hello {}! Welcome to the Vybe Telegram Bot 🤖.\n\nType /help to see available commands.",
        name
    )
}

/// Reply for text starting with `/` that matches no command; echoes the text
pub fn unknown_command(text: &str) -> String {
    format!(
        "⚠️ Unknown command: \"{}\". Type /help to see available commands.",
        escape_html(text)
    )
}

/// Reply for anything that is not a command
pub const UNSUPPORTED_MESSAGE: &str =
    "🤖 I only work with configured commands. Type /help to see available commands.";
