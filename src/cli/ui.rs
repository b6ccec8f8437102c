use crate::core::presenter::{Phase, PresenterView};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Value,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Value => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn rate_cell(rate: f64) -> Cell {
    Cell::new(format!("{rate:.4}")).set_alignment(CellAlignment::Right)
}

/// Spinner shown while a rate or location request is in flight.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Renders the presenter state as plain lines.
pub fn render_view(view: &PresenterView) -> String {
    let from = if view.from.is_empty() {
        "Select currency"
    } else {
        view.from.as_str()
    };
    let to = if view.to.is_empty() {
        "Select currency"
    } else {
        view.to.as_str()
    };
    let amount = if view.amount_input.is_empty() {
        "-"
    } else {
        view.amount_input.as_str()
    };

    let mut output = format!(
        "{} {}  {} {}  {} {}",
        style_text("Amount:", StyleType::Label),
        amount,
        style_text("From:", StyleType::Label),
        from,
        style_text("To:", StyleType::Label),
        to
    );

    if view.loading {
        output.push('\n');
        output.push_str(&style_text("Converting...", StyleType::Subtle));
    }

    if let Some(line) = &view.result_line {
        output.push('\n');
        let line = style_text(line, StyleType::Value);
        if view.phase == Phase::Converted {
            output.push_str(&line);
        } else {
            output.push_str(&format!("{line} {}", style_text("(stale)", StyleType::Subtle)));
        }
    }

    output
}
