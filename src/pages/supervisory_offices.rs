//! The supervisory offices page: enrollments per office, split by region.

use maud::html;

use crate::{
    aggregation::{GroupTotal, distinct_values, group_sum},
    enrollment::{EnrollmentRecord, Field, FieldValue},
    filters::FilterQuery,
    pages::{
        PageContent,
        charts::{PageChart, chart_container, stacked_bar_chart},
        tables::group_totals_table,
    },
};

pub(super) fn build(records: &[&EnrollmentRecord], _query: &FilterQuery) -> PageContent {
    let mut by_office_and_region = group_sum(records, &[Field::SupervisoryOffice, Field::Region]);
    by_office_and_region.sort_by(|a, b| b.total.cmp(&a.total));

    // Offices ordered by their total over every region.
    let mut by_office = group_sum(records, &[Field::SupervisoryOffice]);
    by_office.sort_by(|a, b| b.total.cmp(&a.total));
    let offices: Vec<FieldValue<'_>> = by_office.iter().map(|group| group.key[0]).collect();

    let series = distinct_values(records, Field::Region)
        .into_iter()
        .map(|region| {
            let values = offices
                .iter()
                .map(|office| total_for(&by_office_and_region, *office, region))
                .collect();
            (region.to_string(), values)
        })
        .collect();

    let chart = PageChart::new(
        "supervisory-offices-chart",
        stacked_bar_chart(
            "Enrollments by Supervisory Office",
            "Stacked by region",
            offices.iter().map(ToString::to_string).collect(),
            series,
        ),
    );

    let body = html! {
        section id="charts" class="w-full mx-auto mb-4" {
            (chart_container(&chart))
        }

        section class="w-full mb-4" {
            (group_totals_table(
                "Totals by Supervisory Office and Region",
                &["Supervisory Office", "Region"],
                &by_office_and_region,
                false,
            ))
        }
    };

    PageContent {
        charts: vec![chart],
        body,
    }
}

fn total_for(
    groups: &[GroupTotal<'_>],
    office: FieldValue<'_>,
    region: FieldValue<'_>,
) -> Option<f64> {
    groups
        .iter()
        .find(|group| group.key[0] == office && group.key[1] == region)
        .map(|group| group.total as f64)
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{
        filters::FilterQuery, pages::supervisory_offices::build, test_utils::sample_dataset,
    };

    #[test]
    fn table_is_sorted_by_total_descending() {
        let dataset = sample_dataset();
        let records: Vec<_> = dataset.records().iter().collect();

        let content = build(&records, &FilterQuery::default());
        let html = Html::parse_fragment(&content.body.into_string());

        let rows: Vec<Vec<String>> = html
            .select(&Selector::parse("tbody tr").unwrap())
            .map(|row| {
                row.select(&Selector::parse("td").unwrap())
                    .map(|cell| cell.text().collect())
                    .collect()
            })
            .collect();
        assert_eq!(
            rows,
            vec![
                vec!["Sup. Manaus", "North", "250"],
                vec!["Sup. Porto Alegre", "South", "140"],
                vec!["Sup. Brasília", "Center", "90"],
                vec!["Sup. Belém", "North", "40"],
            ]
        );
    }

    #[test]
    fn chart_stacks_regions() {
        let dataset = sample_dataset();
        let records: Vec<_> = dataset.records().iter().collect();

        let content = build(&records, &FilterQuery::default());

        let chart = &content.charts[0];
        assert_eq!(chart.id, "supervisory-offices-chart");
        for region in ["North", "South", "Center"] {
            assert!(chart.options.contains(&format!("\"{region}\"")));
        }
    }
}
