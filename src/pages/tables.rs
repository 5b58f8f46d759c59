//! Table views for page data display.

use maud::{Markup, html};

use crate::{
    aggregation::GroupTotal,
    enrollment::EnrollmentRecord,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_count},
};

/// How many records the data preview shows.
pub(super) const PREVIEW_ROWS: usize = 5;

const TABLE_NUMBER_CELL_STYLE: &str = "text-right whitespace-nowrap font-semibold";

/// Renders grouped totals, one row per group, in the order given.
///
/// `key_headers` names the columns for the group key values. When `ranked`
/// is set the first column shows each row's position.
pub(super) fn group_totals_table(
    title: &str,
    key_headers: &[&str],
    groups: &[GroupTotal<'_>],
    ranked: bool,
) -> Markup {
    html! {
        div class="w-full" {
            h3 class="text-xl font-semibold mb-4" { (title) }

            div class="overflow-x-auto rounded-lg shadow" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            @if ranked {
                                th scope="col" class=(TABLE_CELL_STYLE) { "#" }
                            }
                            @for header in key_headers {
                                th scope="col" class=(TABLE_CELL_STYLE) { (header) }
                            }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Enrollments" }
                        }
                    }
                    tbody {
                        @for (position, group) in groups.iter().enumerate() {
                            tr class=(TABLE_ROW_STYLE) {
                                @if ranked {
                                    td class=(TABLE_CELL_STYLE) { (position + 1) }
                                }
                                @for value in &group.key {
                                    td class=(TABLE_CELL_STYLE) { (value) }
                                }
                                td class={(TABLE_CELL_STYLE) " " (TABLE_NUMBER_CELL_STYLE)} {
                                    (format_count(group.total))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the first [PREVIEW_ROWS] records with every column.
pub(super) fn records_preview_table(records: &[&EnrollmentRecord]) -> Markup {
    html! {
        div class="w-full" {
            h3 class="text-xl font-semibold mb-4" { "Data Preview" }

            div id="data-preview" class="overflow-x-auto rounded-lg shadow" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Year" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Region" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "State" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "School Unit" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Supervisory Office" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Enrollments" }
                        }
                    }
                    tbody {
                        @for record in records.iter().take(PREVIEW_ROWS) {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) { (record.enrollment_year) }
                                td class=(TABLE_CELL_STYLE) { (record.region) }
                                td class=(TABLE_CELL_STYLE) { (record.state) }
                                td class=(TABLE_CELL_STYLE) { (record.school_unit_name) }
                                td class=(TABLE_CELL_STYLE) { (record.school_unit_type) }
                                td class=(TABLE_CELL_STYLE) { (record.supervisory_office) }
                                td class={(TABLE_CELL_STYLE) " " (TABLE_NUMBER_CELL_STYLE)} {
                                    (format_count(record.enrollment_count))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
