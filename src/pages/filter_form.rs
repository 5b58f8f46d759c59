//! The filter form shared by every page.
//!
//! A single form holds the global filters in the sidebar and the page filters
//! next to them. Any change re-requests the current page through htmx
//! and swaps in the new page content. Without JavaScript the submit button
//! does the same with a normal GET request.

use maud::{Markup, html};

use crate::{
    enrollment::Field,
    filters::FilterStage,
    html::{FORM_LABEL_STYLE, OPTION_BADGE_STYLE},
    pages::Page,
};

const FIELDSET_STYLE: &str = "mb-4 p-3 rounded-lg border border-gray-200 dark:border-gray-700";

/// Renders the filter form for `page`.
///
/// `controls` is page specific markup placed after the page filters, e.g. the
/// top N slider.
pub(super) fn filter_form(
    page: Page,
    global: &[FilterStage<'_>],
    page_stages: &[FilterStage<'_>],
    controls: Markup,
) -> Markup {
    html! {
        form
            id="filter-form"
            action=(page.endpoint())
            method="get"
            hx-get=(page.endpoint())
            hx-target="#page-content"
            hx-swap="innerHTML"
            hx-trigger="change"
            hx-push-url="true"
            hx-indicator="#indicator"
            class="flex flex-col lg:flex-row gap-6 w-full"
        {
            aside id="global-filters" class="w-full lg:w-64 shrink-0" {
                h2 class="text-lg font-semibold mb-3" { "Filters" }

                @for stage in global {
                    (stage_fieldset(stage))
                }

                button
                    type="submit"
                    class="w-full px-4 py-2 text-sm font-medium text-white bg-blue-600
                        rounded hover:bg-blue-700 dark:bg-blue-500 dark:hover:bg-blue-600"
                {
                    "Apply filters"
                }

                span id="indicator" class="block mt-2 text-sm text-gray-500" {
                    span class="htmx-indicator" { "Loading..." }
                }
            }

            @if !page_stages.is_empty() || !controls.0.is_empty() {
                div id="page-filters" class="w-full lg:w-64 shrink-0" {
                    @for stage in page_stages {
                        (stage_fieldset(stage))
                    }

                    (controls)
                }
            }
        }
    }
}

/// One fieldset of checkboxes, one per option of the stage.
///
/// The empty hidden inputs submit the field even when no checkbox is ticked,
/// which is how an empty selection is told apart from no selection. Every
/// option is also listed as offered, so that options that only show up after
/// an earlier filter is widened start out ticked.
fn stage_fieldset(stage: &FilterStage<'_>) -> Markup {
    let name = stage.field.query_name();
    let offered_name = stage.field.offered_query_name();

    html! {
        fieldset id={"filter-" (name)} class=(FIELDSET_STYLE) {
            legend class=(FORM_LABEL_STYLE) { (stage.field.label()) }

            input type="hidden" name=(name) value="";
            input type="hidden" name=(offered_name) value="";
            @for option in &stage.options {
                input type="hidden" name=(offered_name) value=(option);
            }

            @if stage.options.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400" { "No options" }
            } @else {
                div class="flex flex-wrap gap-2" {
                    @for (index, option) in stage.options.iter().enumerate() {
                        @let id = checkbox_id(stage.field, index);
                        label for=(id) class=(OPTION_BADGE_STYLE) {
                            input
                                type="checkbox"
                                id=(id)
                                name=(name)
                                value=(option)
                                checked[stage.is_selected(option)]
                                class="mr-1";
                            (option)
                        }
                    }
                }
            }
        }
    }
}

fn checkbox_id(field: Field, index: usize) -> String {
    format!("{}-{}", field.query_name().replace('_', "-"), index)
}
