//! The enrollment record and the typed fields used to filter and group records.

use std::fmt::Display;

/// The dataset column holding the enrollment count of a row.
pub const ENROLLMENT_COUNT_COLUMN: &str = "Numero_Matriculas";

/// One row of the dataset: the number of enrollments for a school unit in a
/// given year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRecord {
    /// The year of matriculation.
    pub enrollment_year: i32,
    /// The coarse geographic grouping, e.g. "Norte".
    pub region: String,
    /// The state the school unit is in.
    pub state: String,
    /// The name of the school unit.
    pub school_unit_name: String,
    /// The category of the school unit.
    pub school_unit_type: String,
    /// The administrative office ("Superintendência") the school reports to.
    pub supervisory_office: String,
    /// The number of enrollments attributed to this row.
    pub enrollment_count: u64,
}

impl EnrollmentRecord {
    /// Get the value of `field` for this record.
    pub fn value(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Year => FieldValue::Year(self.enrollment_year),
            Field::Region => FieldValue::Text(&self.region),
            Field::State => FieldValue::Text(&self.state),
            Field::SchoolUnitName => FieldValue::Text(&self.school_unit_name),
            Field::SchoolUnitType => FieldValue::Text(&self.school_unit_type),
            Field::SupervisoryOffice => FieldValue::Text(&self.supervisory_office),
        }
    }
}

/// A column of [EnrollmentRecord] that can be filtered or grouped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// [EnrollmentRecord::enrollment_year]
    Year,
    /// [EnrollmentRecord::region]
    Region,
    /// [EnrollmentRecord::state]
    State,
    /// [EnrollmentRecord::school_unit_name]
    SchoolUnitName,
    /// [EnrollmentRecord::school_unit_type]
    SchoolUnitType,
    /// [EnrollmentRecord::supervisory_office]
    SupervisoryOffice,
}

impl Field {
    /// Every field, in dataset column order.
    pub const ALL: [Field; 6] = [
        Field::Year,
        Field::Region,
        Field::State,
        Field::SchoolUnitName,
        Field::SchoolUnitType,
        Field::SupervisoryOffice,
    ];

    /// The name of the field's column in the dataset file.
    pub fn column(self) -> &'static str {
        match self {
            Field::Year => "Ano_Matricula",
            Field::Region => "Regiao",
            Field::State => "Estado",
            Field::SchoolUnitName => "Nome_Unidade_Escolar",
            Field::SchoolUnitType => "Tipo_Unidade_Escolar",
            Field::SupervisoryOffice => "Superintendencia",
        }
    }

    /// The name of the query parameter that carries selections for this field.
    pub fn query_name(self) -> &'static str {
        match self {
            Field::Year => "year",
            Field::Region => "region",
            Field::State => "state",
            Field::SchoolUnitName => "school_unit_name",
            Field::SchoolUnitType => "school_unit_type",
            Field::SupervisoryOffice => "supervisory_office",
        }
    }

    /// The name of the query parameter listing the options the filter form
    /// offered for this field.
    pub fn offered_query_name(self) -> &'static str {
        match self {
            Field::Year => "offered_year",
            Field::Region => "offered_region",
            Field::State => "offered_state",
            Field::SchoolUnitName => "offered_school_unit_name",
            Field::SchoolUnitType => "offered_school_unit_type",
            Field::SupervisoryOffice => "offered_supervisory_office",
        }
    }

    /// The human readable name of the field.
    pub fn label(self) -> &'static str {
        match self {
            Field::Year => "Enrollment Year",
            Field::Region => "Region",
            Field::State => "State",
            Field::SchoolUnitName => "School Unit",
            Field::SchoolUnitType => "School Unit Type",
            Field::SupervisoryOffice => "Supervisory Office",
        }
    }

    /// Parse `raw` as a value of this field.
    ///
    /// Returns `None` for a year that is not an integer.
    pub fn parse_value(self, raw: &str) -> Option<FieldValue<'_>> {
        match self {
            Field::Year => raw.trim().parse().ok().map(FieldValue::Year),
            _ => Some(FieldValue::Text(raw)),
        }
    }
}

/// The value of a [Field] for one record.
///
/// Text values borrow from the record they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldValue<'a> {
    /// An enrollment year.
    Year(i32),
    /// Any of the text columns.
    Text(&'a str),
}

impl Display for FieldValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Year(year) => write!(f, "{year}"),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::enrollment::{EnrollmentRecord, Field, FieldValue};

    fn record() -> EnrollmentRecord {
        EnrollmentRecord {
            enrollment_year: 2023,
            region: "Norte".to_owned(),
            state: "AM".to_owned(),
            school_unit_name: "Escola A".to_owned(),
            school_unit_type: "Estadual".to_owned(),
            supervisory_office: "Sup. Manaus".to_owned(),
            enrollment_count: 120,
        }
    }

    #[test]
    fn value_selects_matching_column() {
        let record = record();

        assert_eq!(record.value(Field::Year), FieldValue::Year(2023));
        assert_eq!(record.value(Field::Region), FieldValue::Text("Norte"));
        assert_eq!(record.value(Field::State), FieldValue::Text("AM"));
        assert_eq!(
            record.value(Field::SupervisoryOffice),
            FieldValue::Text("Sup. Manaus")
        );
    }

    #[test]
    fn parse_value_parses_years_as_integers() {
        assert_eq!(Field::Year.parse_value("2024"), Some(FieldValue::Year(2024)));
        assert_eq!(Field::Year.parse_value("twenty"), None);
        assert_eq!(
            Field::Region.parse_value("2024"),
            Some(FieldValue::Text("2024"))
        );
    }

    #[test]
    fn query_names_are_unique() {
        let mut names: Vec<_> = Field::ALL
            .iter()
            .flat_map(|field| [field.query_name(), field.offered_query_name()])
            .collect();
        names.sort_unstable();
        names.dedup();

        assert_eq!(names.len(), 2 * Field::ALL.len());
    }
}
