use crate::model::Trip;
use chrono::NaiveDate;

pub(super) fn overlaps(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    // intervalles fermés ; le simple contact (sortie == entrée) est permis
    a_start < b_end && b_start < a_end
}

pub(super) fn effective_exit(trip: &Trip) -> NaiveDate {
    trip.exit.unwrap_or(NaiveDate::MAX)
}

pub(super) fn find_trip_index(trips: &[Trip], id: &crate::model::TripId) -> Option<usize> {
    trips.iter().position(|t| &t.id == id)
}
