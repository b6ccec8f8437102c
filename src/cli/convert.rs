use super::ui;
use crate::core::presenter::{Phase, Presenter};
use anyhow::{Result, bail};
use tracing::debug;

/// One-shot conversion: mount, apply the selection, convert, print.
pub async fn run(presenter: &mut Presenter, amount: &str, swap: bool) -> Result<()> {
    let pb = ui::new_spinner("Fetching exchange rates...");
    presenter.mount().await;

    if swap {
        presenter.swap().await;
    }

    presenter.set_amount(amount);
    pb.set_message("Converting...");
    let issued = presenter.convert().await;
    pb.finish_and_clear();

    let view = presenter.view();
    debug!(?view, "Conversion finished");

    if !issued {
        println!(
            "{}",
            ui::style_text(
                "Enter an amount greater than zero to convert.",
                ui::StyleType::Subtle
            )
        );
        return Ok(());
    }

    if view.phase == Phase::Error {
        bail!("Could not convert {} {} to {}", amount.trim(), view.from, view.to);
    }

    if let Some(line) = view.result_line {
        println!("{}", ui::style_text(&line, ui::StyleType::Value));
    }
    Ok(())
}
