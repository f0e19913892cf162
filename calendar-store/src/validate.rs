use crate::error::ValidationError;
use crate::store::EventStore;
use crate::structs::Event;

/// Checks that `candidate` can be added to `store`.
///
/// The end time must be after the start time, and on every date the
/// candidate occupies its interval must not overlap any event already on
/// that date.
pub fn validate(candidate: &Event, store: &EventStore) -> Result<(), ValidationError> {
    let interval = candidate.interval();
    if interval.end() <= interval.start() {
        return Err(ValidationError::EndNotAfterStart {
            start: interval.start(),
            end: interval.end(),
        });
    }

    for &date in candidate.dates() {
        if let Some(existing) = store
            .events_on(date)
            .into_iter()
            .find(|existing| existing.interval().overlaps(&interval))
        {
            return Err(ValidationError::Conflict {
                existing: existing.name().to_string(),
                date,
            });
        }
    }

    Ok(())
}
