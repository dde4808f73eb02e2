//! Transaction replay into a holdings timeline.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::portfolio::window::DateWindow;
use crate::transactions::TransactionEvent;

use super::HoldingsTimeline;

/// Fold a transaction log into a [`HoldingsTimeline`] for the window.
///
/// Transactions dated before the window start are folded into the initial
/// quantities; in-window transactions become per-date deltas; transactions
/// after the window end are ignored. Over-sells are accepted as recorded,
/// so replayed quantities can go negative.
pub fn replay_transactions(
    transactions: &[TransactionEvent],
    window: DateWindow,
) -> HoldingsTimeline {
    let mut sorted: Vec<&TransactionEvent> = transactions.iter().collect();
    sorted.sort_by_key(|t| t.date);

    let mut timeline = HoldingsTimeline::default();
    for tx in sorted {
        if tx.date > window.end {
            continue;
        }
        let delta = tx.signed_quantity();
        if tx.date < window.start {
            *timeline
                .initial_quantities
                .entry(tx.symbol.clone())
                .or_insert(Decimal::ZERO) += delta;
        } else {
            *timeline
                .daily_deltas
                .entry(tx.date)
                .or_insert_with(HashMap::new)
                .entry(tx.symbol.clone())
                .or_insert(Decimal::ZERO) += delta;
        }
    }
    timeline
}
