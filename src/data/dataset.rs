use std::fmt;

use super::error::LoadError;
use super::loader;
use super::model::TimeSeriesTable;
use crate::config::DashboardConfig;

// ---------------------------------------------------------------------------
// Scenario – which of the four tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scenario {
    Historic,
    Baseline,
    StickyInflation,
    Downturn,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Historic,
        Scenario::Baseline,
        Scenario::StickyInflation,
        Scenario::Downturn,
    ];

    /// The three forecast scenarios, in display order.
    pub const FORECASTS: [Scenario; 3] = [
        Scenario::Baseline,
        Scenario::StickyInflation,
        Scenario::Downturn,
    ];

    /// Section heading shown above the scenario's chart.
    pub fn title(self) -> &'static str {
        match self {
            Scenario::Historic => "Economic indicators",
            Scenario::Baseline => "Baseline forecast using RBNZ projections",
            Scenario::StickyInflation => "Scenario 1: Persistent inflation for 6 quarters",
            Scenario::Downturn => {
                "Scenario 2: Higher unemployment and lower GDP growth than expected for 6 quarters"
            }
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Scenario::Historic => "historic",
            Scenario::Baseline => "baseline",
            Scenario::StickyInflation => "sticky inflation",
            Scenario::Downturn => "downturn",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// DashboardData – the four tables, loaded once
// ---------------------------------------------------------------------------

/// Every table the dashboard shows. Built once and never mutated; queries
/// borrow it.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub historic: TimeSeriesTable,
    pub forecast_base: TimeSeriesTable,
    pub forecast_sticky: TimeSeriesTable,
    pub forecast_downturn: TimeSeriesTable,
}

impl DashboardData {
    /// Load all four tables. The first failure aborts the whole load.
    pub fn load(config: &DashboardConfig) -> Result<Self, LoadError> {
        let load = |scenario| loader::load(&config.path_for(scenario));
        Ok(Self {
            historic: load(Scenario::Historic)?,
            forecast_base: load(Scenario::Baseline)?,
            forecast_sticky: load(Scenario::StickyInflation)?,
            forecast_downturn: load(Scenario::Downturn)?,
        })
    }

    pub fn table(&self, scenario: Scenario) -> &TimeSeriesTable {
        match scenario {
            Scenario::Historic => &self.historic,
            Scenario::Baseline => &self.forecast_base,
            Scenario::StickyInflation => &self.forecast_sticky,
            Scenario::Downturn => &self.forecast_downturn,
        }
    }
}
