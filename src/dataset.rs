//! Loads the enrollment dataset from a delimited file.
//!
//! The schema is checked once against the header row and every row is
//! validated while loading, so the rest of the application only ever sees
//! well-formed [EnrollmentRecord]s.

use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;

use crate::{
    Error,
    enrollment::{ENROLLMENT_COUNT_COLUMN, EnrollmentRecord, Field},
};

/// A row as it appears in the file, before validation.
#[derive(Debug, Deserialize)]
struct DatasetRow {
    #[serde(rename = "Ano_Matricula")]
    enrollment_year: i32,
    #[serde(rename = "Regiao")]
    region: String,
    #[serde(rename = "Estado")]
    state: String,
    #[serde(rename = "Nome_Unidade_Escolar")]
    school_unit_name: String,
    #[serde(rename = "Tipo_Unidade_Escolar")]
    school_unit_type: String,
    #[serde(rename = "Superintendencia")]
    supervisory_office: String,
    /// Kept as text so counts past `i64::MAX` are told apart from non-numbers.
    #[serde(rename = "Numero_Matriculas")]
    enrollment_count: String,
}

impl DatasetRow {
    fn validate(self, line: u64) -> Result<EnrollmentRecord, Error> {
        let text_columns = [
            (Field::Region, &self.region),
            (Field::State, &self.state),
            (Field::SchoolUnitName, &self.school_unit_name),
            (Field::SchoolUnitType, &self.school_unit_type),
            (Field::SupervisoryOffice, &self.supervisory_office),
        ];

        if let Some((field, _)) = text_columns.iter().find(|(_, value)| value.is_empty()) {
            return Err(Error::EmptyField {
                line,
                column: field.column().to_owned(),
            });
        }

        let enrollment_count = parse_enrollment_count(&self.enrollment_count, line)?;

        Ok(EnrollmentRecord {
            enrollment_year: self.enrollment_year,
            region: self.region,
            state: self.state,
            school_unit_name: self.school_unit_name,
            school_unit_type: self.school_unit_type,
            supervisory_office: self.supervisory_office,
            enrollment_count,
        })
    }
}

/// The full set of enrollment records, immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<EnrollmentRecord>,
}

impl Dataset {
    /// Create a dataset from records that have already been validated.
    pub fn new(records: Vec<EnrollmentRecord>) -> Self {
        Self { records }
    }

    /// Load the dataset from the file at `path`.
    ///
    /// # Errors
    /// Returns [Error::DatasetUnreadable] if the file cannot be opened, or any
    /// of the errors documented on [Dataset::from_reader].
    pub fn load(path: &Path, delimiter: u8) -> Result<Self, Error> {
        let file = File::open(path).map_err(|error| {
            Error::DatasetUnreadable(path.display().to_string(), error.to_string())
        })?;

        Self::from_reader(file, delimiter)
    }

    /// Parse a dataset from `reader`.
    ///
    /// The first row must be a header containing every required column.
    /// Extra columns are ignored and surrounding whitespace is trimmed.
    ///
    /// # Errors
    /// - [Error::MissingColumn] if a required column is absent from the header,
    /// - [Error::InvalidRecord] if a row cannot be parsed,
    /// - [Error::EmptyField] if a text column is blank,
    /// - [Error::NegativeEnrollmentCount] if an enrollment count is negative.
    pub fn from_reader(reader: impl Read, delimiter: u8) -> Result<Self, Error> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|error| invalid_record(&error))?
            .clone();
        check_required_columns(&headers)?;

        let mut records = Vec::new();

        for result in reader.records() {
            let row = result.map_err(|error| invalid_record(&error))?;
            let line = row.position().map_or(0, |position| position.line());

            let row: DatasetRow =
                row.deserialize(Some(&headers))
                    .map_err(|error| Error::InvalidRecord {
                        line,
                        reason: error.to_string(),
                    })?;

            records.push(row.validate(line)?);
        }

        Ok(Self { records })
    }

    /// All records in file order.
    pub fn records(&self) -> &[EnrollmentRecord] {
        &self.records
    }

    /// The number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_enrollment_count(raw: &str, line: u64) -> Result<u64, Error> {
    let error = match raw.parse::<u64>() {
        Ok(count) => return Ok(count),
        Err(error) => error,
    };

    match raw.parse::<i128>() {
        Ok(value) if value < 0 => Err(Error::NegativeEnrollmentCount { line, value }),
        Ok(_) => Err(Error::InvalidRecord {
            line,
            reason: format!("enrollment count {raw} exceeds the maximum of {}", u64::MAX),
        }),
        Err(_) => Err(Error::InvalidRecord {
            line,
            reason: format!("enrollment count {raw:?} is not a whole number: {error}"),
        }),
    }
}

fn check_required_columns(headers: &StringRecord) -> Result<(), Error> {
    let required = Field::ALL
        .iter()
        .map(|field| field.column())
        .chain([ENROLLMENT_COUNT_COLUMN]);

    for column in required {
        if !headers.iter().any(|header| header == column) {
            tracing::error!("Dataset header {headers:?} is missing the column {column}");
            return Err(Error::MissingColumn(column.to_owned()));
        }
    }

    Ok(())
}

fn invalid_record(error: &csv::Error) -> Error {
    Error::InvalidRecord {
        line: error.position().map_or(0, |position| position.line()),
        reason: error.to_string(),
    }
}
