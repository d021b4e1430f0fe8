use crate::types::{TokenPrice, TokenPriceMap};
use std::collections::btree_map::Entry;
use tracing::debug;

/// Reduce raw price records to the latest positive price per currency.
///
/// Records with a non-positive price never take part, not even as a
/// candidate to be replaced. A later record replaces the current one only
/// when its date is strictly greater, so on equal dates the record seen
/// first wins.
pub fn latest_by_currency<I>(records: I) -> TokenPriceMap
where
    I: IntoIterator<Item = TokenPrice>,
{
    let mut map = TokenPriceMap::new();
    let mut dropped = 0usize;
    let mut seen = 0usize;

    for record in records {
        seen += 1;
        if !has_positive_price(&record) {
            dropped += 1;
            continue;
        }

        match map.entries_mut().entry(record.currency.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                if record.date > slot.get().date {
                    slot.insert(record);
                }
            }
        }
    }

    debug!(
        "aggregated {} record(s) into {} currencies ({} dropped for non-positive price)",
        seen,
        map.len(),
        dropped
    );

    map
}

fn has_positive_price(record: &TokenPrice) -> bool {
    record.price.is_finite() && record.price > 0.0
}
