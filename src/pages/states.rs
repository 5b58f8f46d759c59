//! The states page: total enrollments per state.

use maud::html;

use crate::{
    aggregation::group_sum,
    enrollment::{EnrollmentRecord, Field},
    filters::FilterQuery,
    pages::{
        PageContent,
        charts::{PageChart, chart_container, totals_bar_chart},
        tables::group_totals_table,
    },
};

pub(super) fn build(records: &[&EnrollmentRecord], _query: &FilterQuery) -> PageContent {
    let mut by_state = group_sum(records, &[Field::State]);
    by_state.sort_by(|a, b| a.key.cmp(&b.key));

    let chart = PageChart::new(
        "states-chart",
        totals_bar_chart(
            "Enrollments by State",
            "Summed over the selected filters",
            "Enrollments",
            by_state.iter().map(|group| group.key[0].to_string()).collect(),
            by_state.iter().map(|group| group.total as f64).collect(),
        ),
    );

    let body = html! {
        section id="charts" class="w-full mx-auto mb-4" {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4" {
                (chart_container(&chart))
                (group_totals_table("Totals by State", &["State"], &by_state, false))
            }
        }
    };

    PageContent {
        charts: vec![chart],
        body,
    }
}
