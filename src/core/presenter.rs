//! Conversion presenter: the state behind the converter screen.
//!
//! All state lives in [`Presenter`] and only changes through its transition
//! methods. Every conversion takes a [`ConversionTicket`] carrying a
//! generation number; completions for anything but the latest ticket are
//! dropped so a slow response can never overwrite a newer one.

use crate::core::conversion::{
    ConversionMode, ConversionRequest, ConversionResult, Selection, convert, is_valid_amount,
    parse_amount,
};
use crate::core::error::Result;
use crate::core::location::{LocationProvider, detect_default_currency};
use crate::core::notify::Notifier;
use crate::core::rates::{RateProvider, RateTable};
use std::sync::Arc;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Converted,
    Error,
}

#[derive(Debug, Clone)]
pub struct PresenterOptions {
    /// Preset source currency. When `None` it is detected on mount.
    pub from: Option<String>,
    pub to: String,
    pub mode: ConversionMode,
    /// Drop the previous result as soon as a new conversion starts.
    pub clear_result_on_change: bool,
}

impl Default for PresenterOptions {
    fn default() -> Self {
        PresenterOptions {
            from: None,
            to: "USD".to_string(),
            mode: ConversionMode::Direct,
            clear_result_on_change: false,
        }
    }
}

/// Handed out when a conversion starts and handed back with its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionTicket {
    generation: u64,
    request: ConversionRequest,
}

impl ConversionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &ConversionRequest {
        &self.request
    }
}

/// Read-only snapshot for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PresenterView {
    pub phase: Phase,
    pub loading: bool,
    pub amount_input: String,
    pub from: String,
    pub to: String,
    pub currencies: Vec<String>,
    pub converted: Option<String>,
    pub result_line: Option<String>,
}

pub struct Presenter {
    rates: Arc<dyn RateProvider>,
    location: Arc<dyn LocationProvider>,
    notifier: Arc<dyn Notifier>,
    mode: ConversionMode,
    clear_result_on_change: bool,
    amount_input: String,
    amount: Option<f64>,
    selection: Selection,
    currencies: Vec<String>,
    converted: Option<ConversionResult>,
    phase: Phase,
    loading: bool,
    generation: u64,
}

impl Presenter {
    pub fn new(
        rates: Arc<dyn RateProvider>,
        location: Arc<dyn LocationProvider>,
        notifier: Arc<dyn Notifier>,
        options: PresenterOptions,
    ) -> Self {
        let from = options
            .from
            .map(|code| code.trim().to_uppercase())
            .unwrap_or_default();

        Presenter {
            rates,
            location,
            notifier,
            mode: options.mode,
            clear_result_on_change: options.clear_result_on_change,
            amount_input: String::new(),
            amount: None,
            selection: Selection::new(&from, &options.to.trim().to_uppercase()),
            currencies: Vec::new(),
            converted: None,
            phase: Phase::Idle,
            loading: false,
            generation: 0,
        }
    }

    /// Loads the currency list and, unless a source was preset, detects it.
    /// Both calls run concurrently.
    pub async fn mount(&mut self) -> bool {
        let rates = Arc::clone(&self.rates);
        let location = Arc::clone(&self.location);
        let notifier = Arc::clone(&self.notifier);
        let needs_detection = self.selection.from.is_empty();

        let detect = async {
            if needs_detection {
                Some(detect_default_currency(location.as_ref(), notifier.as_ref()).await)
            } else {
                None
            }
        };
        let (table, detected) = futures::future::join(rates.fetch_rates(), detect).await;

        match table {
            Ok(table) => {
                debug!(count = table.len(), "Loaded currency list");
                self.currencies = table.currencies();
            }
            Err(e) => {
                error!(error = %e, "Failed to load exchange rates");
                self.notifier
                    .notify_error("Error getting exchange rates", &e.to_string());
            }
        }

        if let Some(code) = detected {
            self.selection.from = code;
        }

        self.on_selection_changed().await
    }

    /// Stores the raw amount input. Never triggers a conversion by itself.
    pub fn set_amount(&mut self, input: &str) {
        self.amount_input = input.trim().to_string();
        self.amount = parse_amount(input);
        debug!(input = %self.amount_input, amount = ?self.amount, "Amount changed");
    }

    pub async fn set_from(&mut self, code: &str) -> bool {
        self.selection.from = code.trim().to_uppercase();
        self.on_selection_changed().await
    }

    pub async fn set_to(&mut self, code: &str) -> bool {
        self.selection.to = code.trim().to_uppercase();
        self.on_selection_changed().await
    }

    /// Exchanges source and target in a single update.
    pub async fn swap(&mut self) -> bool {
        self.selection.swap();
        debug!(from = %self.selection.from, to = %self.selection.to, "Swapped currencies");
        self.on_selection_changed().await
    }

    /// Explicit convert action. Returns whether a rate fetch was issued.
    pub async fn convert(&mut self) -> bool {
        let Some(ticket) = self.begin_conversion() else {
            return false;
        };
        let outcome = self.rates.fetch_rates().await;
        self.complete_conversion(ticket, outcome);
        true
    }

    async fn on_selection_changed(&mut self) -> bool {
        if self.selection.is_complete() && self.amount.is_some_and(is_valid_amount) {
            self.convert().await
        } else {
            false
        }
    }

    /// Moves to `Loading` and issues a ticket, or returns `None` when the
    /// amount or selection does not allow a conversion.
    pub fn begin_conversion(&mut self) -> Option<ConversionTicket> {
        let amount = self.amount.filter(|a| is_valid_amount(*a))?;
        let request = ConversionRequest::new(amount, &self.selection.from, &self.selection.to);
        if !request.is_actionable() {
            debug!(?request, "Ignoring conversion request");
            return None;
        }

        self.generation += 1;
        self.phase = Phase::Loading;
        self.loading = true;
        if self.clear_result_on_change {
            self.converted = None;
        }

        debug!(generation = self.generation, ?request, "Conversion started");
        Some(ConversionTicket {
            generation: self.generation,
            request,
        })
    }

    /// Applies the outcome of a fetch. Returns `false` when the ticket has
    /// been superseded and the outcome was dropped.
    pub fn complete_conversion(
        &mut self,
        ticket: ConversionTicket,
        outcome: Result<RateTable>,
    ) -> bool {
        if ticket.generation != self.generation {
            warn!(
                stale = ticket.generation,
                latest = self.generation,
                "Dropping stale conversion response"
            );
            return false;
        }

        self.loading = false;
        let converted = outcome.and_then(|table| {
            self.currencies = table.currencies();
            convert(&ticket.request, &table, self.mode)
        });

        match converted {
            Ok(result) => {
                self.converted = Some(result);
                self.phase = Phase::Converted;
            }
            Err(e) => {
                error!(error = %e, "Conversion failed");
                self.notifier
                    .notify_error("Error converting currency", &e.to_string());
                self.phase = Phase::Error;
            }
        }
        true
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn amount(&self) -> Option<f64> {
        self.amount
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn currencies(&self) -> &[String] {
        &self.currencies
    }

    pub fn result(&self) -> Option<&ConversionResult> {
        self.converted.as_ref()
    }

    pub fn view(&self) -> PresenterView {
        PresenterView {
            phase: self.phase,
            loading: self.loading,
            amount_input: self.amount_input.clone(),
            from: self.selection.from.clone(),
            to: self.selection.to.clone(),
            currencies: self.currencies.clone(),
            converted: self.converted.as_ref().map(ConversionResult::formatted),
            result_line: self.converted.as_ref().map(|r| {
                format!("{} {} = {} {}", r.amount, r.from, r.formatted(), r.to)
            }),
        }
    }
}
