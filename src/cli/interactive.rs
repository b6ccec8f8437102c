//! Line-oriented converter session.
//!
//! Each line is one user action against the presenter; the state is printed
//! again after every action that can change it.

use super::ui;
use crate::core::flag::flag_url;
use crate::core::presenter::Presenter;
use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

const HELP: &str = "\
Commands:
  amount <N>    set the amount (does not convert)
  from <CODE>   set the source currency
  to <CODE>     set the target currency
  swap          exchange source and target
  convert       convert the current amount
  list          show available currencies
  show          print the current state
  help          show this help
  quit          leave the session";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Amount(String),
    From(String),
    To(String),
    Swap,
    Convert,
    List,
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Err("Empty command".to_string());
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(format!("Too many arguments for '{verb}'"));
    }

    let needs_arg = |name: &str| {
        arg.map(str::to_string)
            .ok_or_else(|| format!("'{name}' needs an argument"))
    };

    match verb.to_lowercase().as_str() {
        "amount" | "a" => needs_arg("amount").map(SessionCommand::Amount),
        "from" | "f" => needs_arg("from").map(SessionCommand::From),
        "to" | "t" => needs_arg("to").map(SessionCommand::To),
        "swap" | "s" => Ok(SessionCommand::Swap),
        "convert" | "c" => Ok(SessionCommand::Convert),
        "list" | "l" => Ok(SessionCommand::List),
        "show" => Ok(SessionCommand::Show),
        "help" | "?" => Ok(SessionCommand::Help),
        "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
        other => Err(format!("Unknown command '{other}', try 'help'")),
    }
}

fn list_currencies(presenter: &Presenter) -> String {
    if presenter.currencies().is_empty() {
        return ui::style_text("Loading...", ui::StyleType::Subtle);
    }
    presenter
        .currencies()
        .iter()
        .map(|code| format!("{code}  {}", flag_url(code)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Runs the session until `quit` or end of input.
pub async fn run_session<R, W>(presenter: &mut Presenter, reader: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    presenter.mount().await;
    writeln!(out, "{}", ui::style_text("Currency converter", ui::StyleType::Title))?;
    writeln!(out, "{}", ui::render_view(&presenter.view()))?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{}", ui::style_text(&message, ui::StyleType::Error))?;
                continue;
            }
        };
        debug!(?command, "Session command");

        match command {
            SessionCommand::Amount(input) => presenter.set_amount(&input),
            SessionCommand::From(code) => {
                presenter.set_from(&code).await;
            }
            SessionCommand::To(code) => {
                presenter.set_to(&code).await;
            }
            SessionCommand::Swap => {
                presenter.swap().await;
            }
            SessionCommand::Convert => {
                if !presenter.convert().await {
                    writeln!(
                        out,
                        "{}",
                        ui::style_text(
                            "Enter an amount greater than zero to convert.",
                            ui::StyleType::Subtle
                        )
                    )?;
                }
            }
            SessionCommand::List => {
                writeln!(out, "{}", list_currencies(presenter))?;
                continue;
            }
            SessionCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            SessionCommand::Show => {}
            SessionCommand::Quit => break,
        }

        writeln!(out, "{}", ui::render_view(&presenter.view()))?;
    }

    Ok(())
}

pub async fn run(presenter: &mut Presenter) -> Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_session(presenter, stdin, &mut stdout).await
}
