//! Currency conversion strategy table.
//!
//! Conversion direction is resolved once per (base currency, instrument
//! currency) pair through an explicit table, keyed the same way everywhere a
//! valuation is converted. New pairs are added to the table, never as
//! branches inside the valuation loops.
//!
//! The snapshot rate has a fixed meaning: units of KRW per USD (the `KRW=X`
//! cross). Factors are expressed relative to that quote direction.

use std::collections::HashMap;

use log::warn;
use rust_decimal::Decimal;

/// How an instrument-currency amount becomes a base-currency amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurrencyFactor {
    /// Currencies match (or no conversion is known); amount passes through.
    Identity,
    /// Multiply by the snapshot rate (e.g., USD amount into a KRW portfolio).
    MultiplyBySpot,
    /// Divide by the snapshot rate (e.g., KRW amount into a USD portfolio).
    DivideBySpot,
}

/// Table of conversion strategies keyed by (base currency, instrument currency).
pub struct ConversionTable {
    entries: HashMap<(String, String), CurrencyFactor>,
}

impl ConversionTable {
    /// Table with the KRW/USD pairs this engine trades across.
    pub fn with_default_pairs() -> Self {
        let mut table = Self {
            entries: HashMap::new(),
        };
        table.insert("KRW", "USD", CurrencyFactor::MultiplyBySpot);
        table.insert("USD", "KRW", CurrencyFactor::DivideBySpot);
        table
    }

    pub fn insert(&mut self, base: &str, instrument: &str, factor: CurrencyFactor) {
        self.entries
            .insert((base.to_string(), instrument.to_string()), factor);
    }

    /// Resolve the factor for a pair.
    ///
    /// Same-currency pairs are always `Identity`. Unknown pairs degrade to
    /// `Identity` with a warning rather than failing the valuation.
    pub fn factor(&self, base: &str, instrument: &str) -> CurrencyFactor {
        if base == instrument {
            return CurrencyFactor::Identity;
        }
        match self
            .entries
            .get(&(base.to_string(), instrument.to_string()))
        {
            Some(factor) => *factor,
            None => {
                warn!(
                    "No conversion strategy for {}->{}; treating amount as already in base currency",
                    instrument, base
                );
                CurrencyFactor::Identity
            }
        }
    }

    /// Convert an instrument-currency amount into the base currency using the
    /// given snapshot rate.
    pub fn convert(
        &self,
        amount: Decimal,
        base: &str,
        instrument: &str,
        spot_rate: Decimal,
    ) -> Decimal {
        match self.factor(base, instrument) {
            CurrencyFactor::Identity => amount,
            CurrencyFactor::MultiplyBySpot => amount * spot_rate,
            CurrencyFactor::DivideBySpot => {
                if spot_rate.is_zero() {
                    warn!("Zero FX snapshot rate; leaving amount unconverted");
                    amount
                } else {
                    amount / spot_rate
                }
            }
        }
    }
}

impl Default for ConversionTable {
    fn default() -> Self {
        Self::with_default_pairs()
    }
}
