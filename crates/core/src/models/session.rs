use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::view::ViewController;

/// The "All" pseudo-sector. Never looked up and never cached.
pub const ALL_SECTORS: &str = "All";

/// Representative cross-sector basket shown for [`ALL_SECTORS`].
pub const ALL_SECTOR_BASKET: [&str; 10] = [
    "RELIANCE",
    "TCS",
    "HDFCBANK",
    "INFY",
    "SBIN",
    "SUNPHARMA",
    "HUL",
    "BAJFINANCE",
    "ADANIPORTS",
    "BHARTIARTL",
];

/// Session-scoped memo of sector → ticker list.
///
/// Entries live for the whole session: there is no expiry and no eviction.
/// A failed lookup is never stored, so the next request retries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectorTickerCache {
    entries: HashMap<String, Vec<String>>,
}

impl SectorTickerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous resolution: the fixed basket for "All", otherwise a cached
    /// list if one exists.
    pub fn lookup(&self, sector: &str) -> Option<Vec<String>> {
        if sector == ALL_SECTORS {
            return Some(all_sector_basket());
        }
        self.entries.get(sector).cloned()
    }

    /// Store a resolved list. "All" is constant and is never stored.
    pub fn insert(&mut self, sector: &str, tickers: Vec<String>) {
        if sector == ALL_SECTORS {
            return;
        }
        self.entries.insert(sector.to_string(), tickers);
    }

    pub fn contains(&self, sector: &str) -> bool {
        self.entries.contains_key(sector)
    }

    /// Number of cached sectors ("All" is never counted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The basket as owned strings.
pub fn all_sector_basket() -> Vec<String> {
    ALL_SECTOR_BASKET.iter().map(|s| s.to_string()).collect()
}

/// Mutable state owned by one client session: the sector cache and the
/// price-overview view machine. Passed explicitly into the services that
/// read or write it.
#[derive(Debug, Default)]
pub struct Session {
    pub sector_cache: SectorTickerCache,
    pub market_view: ViewController,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}
