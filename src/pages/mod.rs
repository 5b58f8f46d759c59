//! Dashboard pages
//!
//! Every page runs the same pipeline over the shared dataset: the global
//! filters, then its own page filters, then grouping and summation. The
//! [Page] enum identifies a page and maps it to the function that builds its
//! content.

mod cards;
mod charts;
mod filter_form;
mod handlers;
mod overview;
mod schools;
mod states;
mod supervisory_offices;
mod tables;

use maud::{Markup, html};

pub use handlers::{get_index_page, get_page};

use crate::{
    endpoints,
    enrollment::{EnrollmentRecord, Field},
    filters::{FilterQuery, RegionFilterPlacement},
    pages::charts::PageChart,
};

/// A page of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Summary cards, totals by region and a preview of the data.
    Overview,
    /// The school units with the most enrollments.
    Schools,
    /// Totals by supervisory office and region.
    SupervisoryOffices,
    /// Totals by state.
    States,
}

/// Builds the content of a page from the filtered records.
///
/// Only called with a non-empty set of records.
type PageBuilder = fn(&[&EnrollmentRecord], &FilterQuery) -> PageContent;

/// The rendered content of a page, shown below the page filters.
pub(crate) struct PageContent {
    /// The charts to initialize once the content is on the page.
    pub charts: Vec<PageChart>,
    /// The markup for cards, chart containers and tables.
    pub body: Markup,
}

impl Page {
    /// Every page, in navigation order.
    pub const ALL: [Page; 4] = [
        Page::Overview,
        Page::Schools,
        Page::SupervisoryOffices,
        Page::States,
    ];

    /// The identifier used in the page URL.
    pub fn slug(self) -> &'static str {
        match self {
            Page::Overview => "overview",
            Page::Schools => "schools",
            Page::SupervisoryOffices => "supervisory-offices",
            Page::States => "states",
        }
    }

    /// Find the page identified by `slug`.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.slug() == slug)
    }

    /// The path the page is served from.
    pub fn endpoint(self) -> &'static str {
        match self {
            Page::Overview => endpoints::OVERVIEW_VIEW,
            Page::Schools => endpoints::SCHOOLS_VIEW,
            Page::SupervisoryOffices => endpoints::SUPERVISORY_OFFICES_VIEW,
            Page::States => endpoints::STATES_VIEW,
        }
    }

    /// The title shown in the navigation bar and page header.
    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Schools => "School Units",
            Page::SupervisoryOffices => "Supervisory Offices",
            Page::States => "States",
        }
    }

    /// The fields this page filters on after the global filters, in order.
    pub fn filter_fields(self, region_filter: RegionFilterPlacement) -> Vec<Field> {
        let own_fields: &[Field] = match self {
            Page::Overview | Page::States => &[],
            Page::Schools => &[Field::SchoolUnitType],
            Page::SupervisoryOffices => &[Field::SupervisoryOffice],
        };

        let region = match region_filter {
            RegionFilterPlacement::Global => None,
            RegionFilterPlacement::PerPage => Some(Field::Region),
        };

        region.into_iter().chain(own_fields.iter().copied()).collect()
    }

    /// Controls other than field filters, e.g. the number of schools to rank.
    fn controls(self, query: &FilterQuery) -> Markup {
        match self {
            Page::Schools => schools::top_slider(query),
            Page::Overview | Page::SupervisoryOffices | Page::States => html!(),
        }
    }

    fn builder(self) -> PageBuilder {
        match self {
            Page::Overview => overview::build,
            Page::Schools => schools::build,
            Page::SupervisoryOffices => supervisory_offices::build,
            Page::States => states::build,
        }
    }
}
