use serde::{Deserialize, Serialize};

/// One row of the sector-filtered price overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRow {
    /// Ticker symbol
    pub ticker: String,

    /// One value per target year, `None` where no price was available
    pub prices: Vec<Option<f64>>,

    /// Whole-percent return from the first to the last year
    pub return_pct: i64,

    /// Most recent close reported by the backend, if any
    pub latest: Option<f64>,
}

/// The price overview for one sector: the year headers plus one row per
/// ticker with data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketTable {
    pub years: Vec<i32>,
    pub rows: Vec<MarketRow>,
}

impl MarketTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, ticker: &str) -> Option<&MarketRow> {
        self.rows.iter().find(|r| r.ticker == ticker)
    }
}

/// Identifies one load of a view. Only the most recently issued token may
/// change the view state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestToken {
    pub generation: u64,
    pub sector: String,
}

/// Lifecycle of a sector-filtered view.
///
/// `Idle → Loading → Ready | Error`; selecting a sector always restarts at
/// `Loading`, whatever the previous terminal state was.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ViewState {
    #[default]
    Idle,
    Loading {
        sector: String,
        generation: u64,
    },
    Ready {
        sector: String,
        table: MarketTable,
    },
    Error {
        sector: String,
        message: String,
    },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading { .. })
    }

    /// Rows to display. Empty unless the view is `Ready`: a failed or
    /// in-flight load never shows numbers.
    pub fn rows(&self) -> &[MarketRow] {
        match self {
            ViewState::Ready { table, .. } => table.rows.as_slice(),
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Generation-checked state machine for one view.
///
/// Every `begin` bumps the generation; `complete` applies an outcome only if
/// it carries the latest generation, which gives last-request-wins semantics
/// when loads overlap.
#[derive(Debug, Clone, Default)]
pub struct ViewController {
    generation: u64,
    state: ViewState,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading `sector`, superseding any load still in flight.
    pub fn begin(&mut self, sector: impl Into<String>) -> RequestToken {
        self.generation += 1;
        let sector = sector.into();
        self.state = ViewState::Loading {
            sector: sector.clone(),
            generation: self.generation,
        };
        RequestToken {
            generation: self.generation,
            sector,
        }
    }

    pub fn is_current(&self, token: &RequestToken) -> bool {
        token.generation == self.generation
    }

    /// Apply the outcome of a load. Returns `false` (and leaves the state
    /// untouched) if a newer load has been started since `token` was issued.
    pub fn complete(&mut self, token: RequestToken, outcome: Result<MarketTable, String>) -> bool {
        if !self.is_current(&token) {
            return false;
        }
        self.state = match outcome {
            Ok(table) => ViewState::Ready {
                sector: token.sector,
                table,
            },
            Err(message) => ViewState::Error {
                sector: token.sector,
                message,
            },
        };
        true
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
