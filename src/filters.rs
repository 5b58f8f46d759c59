//! User filter selections and the cascade that applies them.
//!
//! Filters are applied in stages. Each stage offers as options only the values
//! present in the output of the previous stage, so narrowing the years also
//! narrows which regions, school types and offices can be picked further down.

use std::collections::HashSet;

use serde::Deserialize;

use crate::{
    aggregation::{distinct_values, filter_by},
    enrollment::{EnrollmentRecord, Field, FieldValue},
};

/// Where the region filter lives.
///
/// The dashboard has historically shipped both layouts, so the choice is made
/// at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RegionFilterPlacement {
    /// Region is a global filter next to the year and is kept when switching pages.
    #[default]
    Global,
    /// Only the year is global, each page has its own region filter.
    PerPage,
}

impl RegionFilterPlacement {
    /// The fields filtered before any page specific logic.
    pub fn global_fields(self) -> &'static [Field] {
        match self {
            RegionFilterPlacement::Global => &[Field::Year, Field::Region],
            RegionFilterPlacement::PerPage => &[Field::Year],
        }
    }
}

/// The query parameters sent by the filter form and the navigation links.
///
/// Every multi-select field is submitted with an empty sentinel value
/// (e.g. `region=`) so that a field with nothing ticked can be told apart from
/// a field that was not submitted at all. The form also lists the options it
/// offered for each field under `offered_<field>`, again with a sentinel, so
/// options that appear after an earlier filter is widened can be told apart
/// from options the user unticked.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FilterQuery {
    /// Selected enrollment years.
    #[serde(default)]
    pub year: Vec<String>,
    /// Selected regions.
    #[serde(default)]
    pub region: Vec<String>,
    /// Selected school unit types.
    #[serde(default)]
    pub school_unit_type: Vec<String>,
    /// Selected supervisory offices.
    #[serde(default)]
    pub supervisory_office: Vec<String>,
    /// Enrollment years the form offered.
    #[serde(default)]
    pub offered_year: Vec<String>,
    /// Regions the form offered.
    #[serde(default)]
    pub offered_region: Vec<String>,
    /// School unit types the form offered.
    #[serde(default)]
    pub offered_school_unit_type: Vec<String>,
    /// Supervisory offices the form offered.
    #[serde(default)]
    pub offered_supervisory_office: Vec<String>,
    /// How many school units to rank.
    pub top: Option<usize>,
}

impl FilterQuery {
    /// The selection submitted for `field`.
    pub fn selection(&self, field: Field) -> Selection<'_> {
        let (chosen, offered): (&[String], &[String]) = match field {
            Field::Year => (&self.year, &self.offered_year),
            Field::Region => (&self.region, &self.offered_region),
            Field::SchoolUnitType => (&self.school_unit_type, &self.offered_school_unit_type),
            Field::SupervisoryOffice => {
                (&self.supervisory_office, &self.offered_supervisory_office)
            }
            Field::State | Field::SchoolUnitName => (&[], &[]),
        };

        Selection::parse(field, chosen, offered)
    }
}

/// The values chosen for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<'q> {
    /// The field was not submitted, every option is selected.
    Unspecified,
    /// Exactly these values are selected, possibly none.
    ///
    /// This is what a link or a hand written query produces.
    Values(HashSet<FieldValue<'q>>),
    /// The user picked `chosen` out of the `offered` options.
    ///
    /// Options that were not offered, e.g. because an earlier filter has since
    /// been widened, are selected.
    Offered {
        /// The ticked options.
        chosen: HashSet<FieldValue<'q>>,
        /// Every option the form showed, ticked or not.
        offered: HashSet<FieldValue<'q>>,
    },
}

impl<'q> Selection<'q> {
    /// Parse the raw query values for `field`.
    ///
    /// No chosen values at all means the field was not submitted. Empty strings
    /// are the form's sentinel and are dropped, as are years that are not
    /// integers. Without any offered values the chosen values are taken as is.
    pub fn parse(field: Field, chosen: &'q [String], offered: &'q [String]) -> Self {
        if chosen.is_empty() {
            return Selection::Unspecified;
        }

        let parse_values = |raw: &'q [String]| -> HashSet<FieldValue<'q>> {
            raw.iter()
                .filter(|value| !value.is_empty())
                .filter_map(|value| field.parse_value(value))
                .collect()
        };

        if offered.is_empty() {
            Selection::Values(parse_values(chosen))
        } else {
            Selection::Offered {
                chosen: parse_values(chosen),
                offered: parse_values(offered),
            }
        }
    }

    /// Whether `option` is selected.
    pub fn selects(&self, option: &FieldValue<'_>) -> bool {
        match self {
            Selection::Unspecified => true,
            Selection::Values(values) => values.contains(option),
            Selection::Offered { chosen, offered } => {
                chosen.contains(option) || !offered.contains(option)
            }
        }
    }
}

/// One applied filter: the options that were offered and those that were chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterStage<'a> {
    /// The filtered field.
    pub field: Field,
    /// The distinct values of `field` in the input to this stage.
    pub options: Vec<FieldValue<'a>>,
    /// The options that were selected, always a subset of `options`.
    pub selected: HashSet<FieldValue<'a>>,
}

impl FilterStage<'_> {
    /// Whether `option` is selected.
    pub fn is_selected(&self, option: &FieldValue<'_>) -> bool {
        self.selected.contains(option)
    }
}

/// Applies filter stages in order, each to the output of the one before.
#[derive(Debug, Clone)]
pub struct FilterCascade<'a> {
    records: Vec<&'a EnrollmentRecord>,
    stages: Vec<FilterStage<'a>>,
}

impl<'a> FilterCascade<'a> {
    /// Start a cascade over `records`.
    pub fn new(records: &'a [EnrollmentRecord]) -> Self {
        Self {
            records: records.iter().collect(),
            stages: Vec::new(),
        }
    }

    /// Filter the current records on `field`.
    ///
    /// The stage's options are the values of `field` in the current records,
    /// not in the full dataset.
    pub fn stage(mut self, field: Field, selection: &Selection<'_>) -> Self {
        let options = distinct_values(&self.records, field);

        let selected: HashSet<FieldValue<'a>> = options
            .iter()
            .copied()
            .filter(|option| selection.selects(option))
            .collect();

        self.records = filter_by(&self.records, field, &selected);
        self.stages.push(FilterStage {
            field,
            options,
            selected,
        });

        self
    }

    /// Apply a stage for each of `fields` using the selections in `query`.
    pub fn stages(self, fields: &[Field], query: &FilterQuery) -> Self {
        fields.iter().fold(self, |cascade, &field| {
            cascade.stage(field, &query.selection(field))
        })
    }

    /// The records that passed every stage so far.
    pub fn records(&self) -> &[&'a EnrollmentRecord] {
        &self.records
    }

    /// Split the cascade into the applied stages and the remaining records.
    pub fn into_parts(self) -> (Vec<FilterStage<'a>>, Vec<&'a EnrollmentRecord>) {
        (self.stages, self.records)
    }
}

/// The outcome of running the global and page filters for a page.
#[derive(Debug, Clone)]
pub(crate) struct FilteredView<'a> {
    /// Stages shared by every page.
    pub global: Vec<FilterStage<'a>>,
    /// Stages specific to the current page.
    pub page: Vec<FilterStage<'a>>,
    /// The records left after both sets of stages.
    pub records: Vec<&'a EnrollmentRecord>,
}

impl<'a> FilteredView<'a> {
    /// Run the global filters and then the page filters over `records`.
    pub fn build(
        records: &'a [EnrollmentRecord],
        global_fields: &[Field],
        page_fields: &[Field],
        query: &FilterQuery,
    ) -> Self {
        let (mut global, records) = FilterCascade::new(records)
            .stages(global_fields, query)
            .stages(page_fields, query)
            .into_parts();
        let page = global.split_off(global_fields.len());

        Self {
            global,
            page,
            records,
        }
    }

    /// The query string that reproduces the global selections.
    ///
    /// Page selections are left out since they do not carry over to other pages.
    pub fn global_query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();

        for stage in &self.global {
            let name = stage.field.query_name();
            pairs.push((name, String::new()));

            for option in stage.options.iter().filter(|option| stage.is_selected(option)) {
                pairs.push((name, option.to_string()));
            }
        }

        serde_urlencoded::to_string(&pairs).unwrap_or_else(|error| {
            tracing::error!("Could not encode the global filters as a query string: {error}");
            String::new()
        })
    }
}
