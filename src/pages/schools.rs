//! The school units page: a ranking of the school units with the most enrollments.

use maud::{Markup, html};

use crate::{
    aggregation::{GroupTotal, distinct_values, group_sum, top_n},
    enrollment::{EnrollmentRecord, Field, FieldValue},
    filters::FilterQuery,
    html::FORM_LABEL_STYLE,
    pages::{
        PageContent,
        charts::{PageChart, chart_container, stacked_bar_chart},
        tables::group_totals_table,
    },
};

/// How many school units are ranked when the query does not say.
pub const DEFAULT_TOP: usize = 10;
/// The smallest ranking the slider allows.
pub const MIN_TOP: usize = 5;
/// The largest ranking the slider allows.
pub const MAX_TOP: usize = 50;

/// The number of school units to rank, clamped to the slider's range.
fn top_count(query: &FilterQuery) -> usize {
    query.top.unwrap_or(DEFAULT_TOP).clamp(MIN_TOP, MAX_TOP)
}

/// The slider that picks how many school units to rank.
pub(super) fn top_slider(query: &FilterQuery) -> Markup {
    let top = top_count(query);

    html! {
        div id="top-control" class="mb-4 p-3 rounded-lg border border-gray-200 dark:border-gray-700" {
            label for="top" class=(FORM_LABEL_STYLE) {
                "School units to show: "
                output id="top-value" for="top" { (top) }
            }
            input
                type="range"
                id="top"
                name="top"
                min=(MIN_TOP)
                max=(MAX_TOP)
                step="1"
                value=(top)
                oninput="document.getElementById('top-value').value = this.value"
                class="w-full";
        }
    }
}

pub(super) fn build(records: &[&EnrollmentRecord], query: &FilterQuery) -> PageContent {
    let top = top_count(query);
    let ranking = top_n(
        group_sum(records, &[Field::SchoolUnitName, Field::SchoolUnitType]),
        top,
    );

    let chart = PageChart::new("schools-chart", ranking_chart(records, &ranking, top));

    let body = html! {
        section id="charts" class="w-full mx-auto mb-4" {
            (chart_container(&chart))
        }

        section class="w-full mb-4" {
            (group_totals_table(
                &format!("Top {top} School Units"),
                &["School Unit", "Type"],
                &ranking,
                true,
            ))
        }
    };

    PageContent {
        charts: vec![chart],
        body,
    }
}

/// One bar per ranked school unit, colored by school unit type.
fn ranking_chart(
    records: &[&EnrollmentRecord],
    ranking: &[GroupTotal<'_>],
    top: usize,
) -> charming::Chart {
    let labels = ranking.iter().map(|group| group.key[0].to_string()).collect();

    let series = distinct_values(records, Field::SchoolUnitType)
        .into_iter()
        .filter(|school_type| ranking.iter().any(|group| group.key[1] == *school_type))
        .map(|school_type| (school_type.to_string(), values_for_type(ranking, school_type)))
        .collect();

    stacked_bar_chart(
        &format!("Top {top} School Units by Enrollment"),
        "Colored by school unit type",
        labels,
        series,
    )
}

fn values_for_type(ranking: &[GroupTotal<'_>], school_type: FieldValue<'_>) -> Vec<Option<f64>> {
    ranking
        .iter()
        .map(|group| (group.key[1] == school_type).then_some(group.total as f64))
        .collect()
}
