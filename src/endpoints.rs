//! The endpoint URIs.

/// The root route which redirects to the overview page.
pub const ROOT: &str = "/";
/// Any dashboard page, identified by its slug.
pub const PAGE: &str = "/{page}";
/// The page with totals by region.
pub const OVERVIEW_VIEW: &str = "/overview";
/// The page ranking school units by enrollment.
pub const SCHOOLS_VIEW: &str = "/schools";
/// The page with totals by supervisory office.
pub const SUPERVISORY_OFFICES_VIEW: &str = "/supervisory-offices";
/// The page with totals by state.
pub const STATES_VIEW: &str = "/states";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";
