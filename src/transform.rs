//! Transformer stage: even values are squared, odd values are cubed.

use crate::record::{Power, Record, RecordSequence};

/// Transform one record.
pub fn transform(record: Record) -> Power {
    let v = record.value();
    if record.is_even() {
        Power::square(v)
    } else {
        Power::cube(v)
    }
}

/// Transform every record, preserving order and length.
pub fn transform_all(records: &RecordSequence<Record>) -> RecordSequence<Power> {
    records.iter().copied().map(transform).collect()
}
