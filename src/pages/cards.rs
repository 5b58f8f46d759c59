//! Metric cards summarizing the filtered records.

use maud::{Markup, html};

use crate::{
    aggregation::{distinct_values, total_enrollment},
    enrollment::{EnrollmentRecord, Field},
    html::format_count,
};

/// Renders one card per headline number: total enrollments and how many
/// distinct school units, regions and supervisory offices they cover.
pub(super) fn summary_cards(records: &[&EnrollmentRecord]) -> Markup {
    let distinct_count = |field| distinct_values(records, field).len() as u64;

    let metrics = [
        ("Total Enrollments", total_enrollment(records)),
        ("School Units", distinct_count(Field::SchoolUnitName)),
        ("Regions", distinct_count(Field::Region)),
        ("Supervisory Offices", distinct_count(Field::SupervisoryOffice)),
    ];

    html! {
        section id="summary-cards" class="w-full grid grid-cols-2 xl:grid-cols-4 gap-4 mb-4" {
            @for (label, value) in metrics {
                div class="p-4 rounded-lg shadow bg-white dark:bg-gray-800" {
                    p class="text-sm text-gray-600 dark:text-gray-400" { (label) }
                    p class="metric-value text-2xl font-bold" { (format_count(value)) }
                }
            }
        }
    }
}
