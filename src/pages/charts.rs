//! Chart generation and rendering for the dashboard pages.
//!
//! Charts are built as ECharts configurations with charming and initialized by
//! an inline script placed after their containers. The script runs both on a
//! full page load and when htmx swaps in new page content.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ColorBy, Emphasis, EmphasisFocus,
        JsFunction, Tooltip, Trigger,
    },
    series::bar,
};
use maud::{Markup, PreEscaped, html};

/// A page chart with its HTML container ID and ECharts configuration.
pub(crate) struct PageChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JavaScript object literal
    pub options: String,
}

impl PageChart {
    pub fn new(id: &'static str, chart: Chart) -> Self {
        Self {
            id,
            options: chart.to_string(),
        }
    }
}

/// Renders the container for a single chart.
pub(super) fn chart_container(chart: &PageChart) -> Markup {
    html!(
        div
            id=(chart.id)
            class="min-h-[380px] w-full rounded dark:bg-gray-100"
        {}
    )
}

/// Generates the inline script that initializes `charts`.
///
/// Each chart follows the browser's dark mode setting and resizes with the
/// window.
pub(super) fn charts_script(charts: &[PageChart]) -> Markup {
    if charts.is_empty() {
        return html!();
    }

    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    if (!chartDom) {{ return; }}
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    html!(
        script { (PreEscaped(script_content)) }
    )
}

/// A bar chart with one bar per label, each label in its own color.
pub(super) fn totals_bar_chart(
    title: &str,
    subtitle: &str,
    series_name: &str,
    labels: Vec<String>,
    values: Vec<f64>,
) -> Chart {
    Chart::new()
        .title(Title::new().text(title).subtext(subtitle))
        .tooltip(count_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(count_formatter())),
        )
        .series(
            bar::Bar::new()
                .name(series_name)
                .color_by(ColorBy::Data)
                .data(values),
        )
}

/// A stacked bar chart with one series per category.
///
/// Each entry in `series` has one value per label, with `None` where the
/// category has no enrollments for that label.
pub(super) fn stacked_bar_chart(
    title: &str,
    subtitle: &str,
    labels: Vec<String>,
    series: Vec<(String, Vec<Option<f64>>)>,
) -> Chart {
    let mut chart = Chart::new()
        .title(
            Title::new()
                .text(title)
                .subtext(subtitle)
                .left(20)
                .top("1%"),
        )
        .tooltip(count_tooltip())
        .legend(Legend::new().left(250).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(90)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(count_formatter())),
        );

    for (name, data) in series {
        chart = chart.series(
            bar::Bar::new()
                .name(name)
                .stack("Enrollments")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(data),
        );
    }

    chart
}

#[inline]
fn count_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const countFormatter = new Intl.NumberFormat('en-US');
            return (number == null) ? \"-\" : countFormatter.format(number);",
    )
}

/// Creates a tooltip configuration for enrollment counts
fn count_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(count_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
