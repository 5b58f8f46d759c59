//! Page HTTP handlers and view rendering.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Query;
use axum_htmx::HxRequest;
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    filters::{FilterQuery, FilteredView},
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    pages::{Page, PageContent, charts::charts_script, filter_form::filter_form},
};

const ECHARTS_SCRIPT: &str = "/static/echarts.6.0.0.min.js";

/// Redirect to the overview page.
pub async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::OVERVIEW_VIEW)
}

/// Display the dashboard page identified by `slug`.
///
/// Requests made by htmx get only the page content, which replaces the
/// content of the current page. Other requests get the full HTML document.
pub async fn get_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let page = Page::from_slug(&slug).ok_or(Error::NotFound)?;

    let content = page_content(page, &state, &query);

    if is_htmx_request {
        return Ok(content.into_response());
    }

    let head_elements = [HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned())];
    let content = html!(
        div id="page-content" { (content) }
    );

    Ok(base(page.title(), &head_elements, &content).into_response())
}

/// Runs the filters for `page` and renders everything inside `#page-content`.
fn page_content(page: Page, state: &AppState, query: &FilterQuery) -> Markup {
    let view = FilteredView::build(
        state.dataset.records(),
        state.region_filter.global_fields(),
        &page.filter_fields(state.region_filter),
        query,
    );

    tracing::debug!(
        "Page {} matched {} of {} records",
        page.slug(),
        view.records.len(),
        state.dataset.len()
    );

    let PageContent { charts, body } = if view.records.is_empty() {
        PageContent {
            charts: Vec::new(),
            body: no_matching_records_view(),
        }
    } else {
        (page.builder())(&view.records, query)
    };

    let nav_bar = NavBar::new(page, &view.global_query_string());

    html!(
        (nav_bar.into_html())

        div class=(PAGE_CONTAINER_STYLE) {
            div class="shrink-0" {
                (filter_form(page, &view.global, &view.page, page.controls(query)))
            }

            main class="flex flex-col w-full min-w-0" {
                h1 class="text-2xl font-bold mb-4" { (page.title()) }

                (body)
            }
        }

        (charts_script(&charts))
    )
}

fn no_matching_records_view() -> Markup {
    html!(
        div
            id="no-data"
            class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold" { "No matching enrollments" }

            p { "No enrollment records match the selected filters. Try selecting more options." }
        }
    )
}
