use std::sync::Arc;

use crate::{AppState, Dataset, EnrollmentRecord, RegionFilterPlacement};

/// Create a record in the state conventionally used for `region` in tests.
pub(crate) fn record(
    year: i32,
    region: &str,
    school_unit_name: &str,
    school_unit_type: &str,
    supervisory_office: &str,
    enrollment_count: u64,
) -> EnrollmentRecord {
    let state = match region {
        "North" => "AM",
        "South" => "RS",
        _ => "DF",
    };

    EnrollmentRecord {
        enrollment_year: year,
        region: region.to_owned(),
        state: state.to_owned(),
        school_unit_name: school_unit_name.to_owned(),
        school_unit_type: school_unit_type.to_owned(),
        supervisory_office: supervisory_office.to_owned(),
        enrollment_count,
    }
}

/// Two years by two regions, with a third region only present in 2024.
pub(crate) fn sample_dataset() -> Dataset {
    Dataset::new(vec![
        record(2023, "North", "Escola A", "Estadual", "Sup. Manaus", 120),
        record(2023, "South", "Escola B", "Municipal", "Sup. Porto Alegre", 80),
        record(2024, "North", "Escola A", "Estadual", "Sup. Manaus", 130),
        record(2024, "South", "Escola C", "Federal", "Sup. Porto Alegre", 60),
        record(2023, "North", "Escola D", "Municipal", "Sup. Belém", 40),
        record(2024, "Center", "Escola E", "Estadual", "Sup. Brasília", 90),
    ])
}

pub(crate) fn sample_state(region_filter: RegionFilterPlacement) -> AppState {
    AppState::new(Arc::new(sample_dataset()), region_filter)
}
