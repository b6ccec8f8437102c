use super::ui;
use crate::core::flag::flag_url;
use crate::core::location::{LocationProvider, detect_default_currency};
use crate::core::notify::Notifier;
use anyhow::Result;

pub async fn run(location: &dyn LocationProvider, notifier: &dyn Notifier) -> Result<()> {
    let pb = ui::new_spinner("Detecting location...");
    let code = detect_default_currency(location, notifier).await;
    pb.finish_and_clear();

    println!(
        "{} {}",
        ui::style_text(&code, ui::StyleType::Value),
        ui::style_text(&flag_url(&code), ui::StyleType::Subtle)
    );
    Ok(())
}
