//! The overview page: headline numbers, totals by region and a data preview.

use maud::html;

use crate::{
    aggregation::group_sum,
    enrollment::{EnrollmentRecord, Field},
    filters::FilterQuery,
    pages::{
        PageContent,
        cards::summary_cards,
        charts::{PageChart, chart_container, totals_bar_chart},
        tables::{group_totals_table, records_preview_table},
    },
};

pub(super) fn build(records: &[&EnrollmentRecord], _query: &FilterQuery) -> PageContent {
    let mut by_region = group_sum(records, &[Field::Region]);
    by_region.sort_by(|a, b| a.key.cmp(&b.key));

    let labels = by_region.iter().map(|group| group.key[0].to_string()).collect();
    let values = by_region.iter().map(|group| group.total as f64).collect();
    let region_chart = PageChart::new(
        "region-chart",
        totals_bar_chart(
            "Enrollments by Region",
            "Summed over the selected filters",
            "Enrollments",
            labels,
            values,
        ),
    );

    let body = html! {
        (summary_cards(records))

        section id="charts" class="w-full mx-auto mb-4" {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4" {
                (chart_container(&region_chart))
                (group_totals_table("Totals by Region", &["Region"], &by_region, false))
            }
        }

        section class="w-full mb-4" {
            (records_preview_table(records))
        }
    };

    PageContent {
        charts: vec![region_chart],
        body,
    }
}
