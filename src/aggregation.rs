//! Filtering and grouping of enrollment records.
//!
//! These are the building blocks every page is made of: narrow a set of
//! records to the selected values of a field, then sum enrollments per group.
//! All functions take borrowed views and never modify the records.

use std::collections::{HashMap, HashSet};

use crate::enrollment::{EnrollmentRecord, Field, FieldValue};

/// The summed enrollment count for one distinct combination of grouping values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTotal<'a> {
    /// The grouping values, in the same order as the grouping fields.
    pub key: Vec<FieldValue<'a>>,
    /// The sum of [EnrollmentRecord::enrollment_count] over the group.
    pub total: u64,
}

/// Keep the records whose value for `field` is one of `allowed`.
///
/// The order of `records` is preserved. An empty `allowed` set matches
/// nothing.
pub fn filter_by<'a>(
    records: &[&'a EnrollmentRecord],
    field: Field,
    allowed: &HashSet<FieldValue<'_>>,
) -> Vec<&'a EnrollmentRecord> {
    if allowed.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .copied()
        .filter(|record| allowed.contains(&record.value(field)))
        .collect()
}

/// Sum enrollment counts for each distinct combination of `group_fields`.
///
/// The summed metric is always [EnrollmentRecord::enrollment_count].
///
/// Groups are returned in the order their key first appears in `records`.
/// Callers that display the groups should sort them explicitly, e.g. with
/// [top_n].
pub fn group_sum<'a>(records: &[&'a EnrollmentRecord], group_fields: &[Field]) -> Vec<GroupTotal<'a>> {
    let mut groups: Vec<GroupTotal<'a>> = Vec::new();
    let mut group_index: HashMap<Vec<FieldValue<'a>>, usize> = HashMap::new();

    for record in records {
        let key: Vec<_> = group_fields
            .iter()
            .map(|&field| record.value(field))
            .collect();

        match group_index.get(&key) {
            Some(&index) => groups[index].total += record.enrollment_count,
            None => {
                group_index.insert(key.clone(), groups.len());
                groups.push(GroupTotal {
                    key,
                    total: record.enrollment_count,
                });
            }
        }
    }

    groups
}

/// Sort `groups` by total, largest first, and keep the first `n`.
///
/// The sort is stable, so groups with equal totals keep their relative order.
pub fn top_n(mut groups: Vec<GroupTotal<'_>>, n: usize) -> Vec<GroupTotal<'_>> {
    groups.sort_by(|a, b| b.total.cmp(&a.total));
    groups.truncate(n);
    groups
}

/// The distinct values of `field` in `records`, in order of first appearance.
pub fn distinct_values<'a>(records: &[&'a EnrollmentRecord], field: Field) -> Vec<FieldValue<'a>> {
    let mut seen = HashSet::new();

    records
        .iter()
        .map(|record| record.value(field))
        .filter(|value| seen.insert(*value))
        .collect()
}

/// The sum of enrollment counts over `records`.
pub fn total_enrollment(records: &[&EnrollmentRecord]) -> u64 {
    records.iter().map(|record| record.enrollment_count).sum()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::{
        aggregation::{
            GroupTotal, distinct_values, filter_by, group_sum, top_n, total_enrollment,
        },
        enrollment::{EnrollmentRecord, Field, FieldValue},
        test_utils::record,
    };

    fn sample() -> Vec<EnrollmentRecord> {
        vec![
            record(2023, "North", "Escola A", "Estadual", "Sup. 1", 10),
            record(2023, "South", "Escola B", "Municipal", "Sup. 2", 30),
            record(2024, "North", "Escola A", "Estadual", "Sup. 1", 5),
            record(2024, "South", "Escola C", "Estadual", "Sup. 2", 20),
            record(2023, "North", "Escola D", "Federal", "Sup. 3", 7),
        ]
    }

    fn view(records: &[EnrollmentRecord]) -> Vec<&EnrollmentRecord> {
        records.iter().collect()
    }

    #[test]
    fn filter_by_keeps_only_allowed_values_in_order() {
        let records = sample();
        let allowed = HashSet::from([FieldValue::Text("North")]);

        let filtered = filter_by(&view(&records), Field::Region, &allowed);

        let names: Vec<_> = filtered
            .iter()
            .map(|record| record.school_unit_name.as_str())
            .collect();
        assert_eq!(names, vec!["Escola A", "Escola A", "Escola D"]);
        assert!(filtered.len() <= records.len());
        assert!(
            filtered
                .iter()
                .all(|record| allowed.contains(&record.value(Field::Region)))
        );
    }

    #[test]
    fn filter_by_with_empty_selection_matches_nothing() {
        let records = sample();

        let filtered = filter_by(&view(&records), Field::Year, &HashSet::new());

        assert!(filtered.is_empty());
    }

    #[test]
    fn filter_by_unknown_value_matches_nothing() {
        let records = sample();
        let allowed = HashSet::from([FieldValue::Year(1999)]);

        let filtered = filter_by(&view(&records), Field::Year, &allowed);

        assert!(filtered.is_empty());
    }

    #[test]
    fn group_sum_uses_first_occurrence_order() {
        let records = sample();

        let groups = group_sum(&view(&records), &[Field::SchoolUnitName]);

        assert_eq!(
            groups,
            vec![
                GroupTotal {
                    key: vec![FieldValue::Text("Escola A")],
                    total: 15
                },
                GroupTotal {
                    key: vec![FieldValue::Text("Escola B")],
                    total: 30
                },
                GroupTotal {
                    key: vec![FieldValue::Text("Escola C")],
                    total: 20
                },
                GroupTotal {
                    key: vec![FieldValue::Text("Escola D")],
                    total: 7
                },
            ]
        );
    }

    #[test]
    fn group_sum_with_two_fields_groups_by_pair() {
        let records = sample();

        let groups = group_sum(&view(&records), &[Field::SupervisoryOffice, Field::Year]);

        assert_eq!(groups.len(), 5);
        assert_eq!(
            groups[0].key,
            vec![FieldValue::Text("Sup. 1"), FieldValue::Year(2023)]
        );
        assert_eq!(groups[0].total, 10);
    }

    #[test]
    fn group_sum_conserves_total() {
        let records = sample();
        let records = view(&records);

        for fields in [
            vec![Field::Region],
            vec![Field::State],
            vec![Field::SchoolUnitName, Field::SchoolUnitType],
            vec![Field::SupervisoryOffice, Field::Region],
        ] {
            let groups = group_sum(&records, &fields);
            let group_total: u64 = groups.iter().map(|group| group.total).sum();

            assert_eq!(group_total, total_enrollment(&records), "fields {fields:?}");
        }
    }

    #[test]
    fn group_sum_on_empty_input_is_empty() {
        let groups = group_sum(&[], &[Field::Region]);

        assert!(groups.is_empty());
    }

    #[test]
    fn top_n_sorts_descending_and_truncates() {
        let records = vec![
            record(2023, "North", "A", "Estadual", "Sup. 1", 10),
            record(2023, "North", "B", "Estadual", "Sup. 1", 30),
            record(2023, "North", "C", "Estadual", "Sup. 1", 20),
        ];
        let groups = group_sum(&view(&records), &[Field::SchoolUnitName]);

        let top = top_n(groups, 2);

        assert_eq!(
            top,
            vec![
                GroupTotal {
                    key: vec![FieldValue::Text("B")],
                    total: 30
                },
                GroupTotal {
                    key: vec![FieldValue::Text("C")],
                    total: 20
                },
            ]
        );
    }

    #[test]
    fn top_n_keeps_first_occurrence_order_for_ties() {
        let records = vec![
            record(2023, "North", "First", "Estadual", "Sup. 1", 10),
            record(2023, "North", "Second", "Estadual", "Sup. 1", 10),
            record(2023, "North", "Third", "Estadual", "Sup. 1", 10),
        ];
        let groups = group_sum(&view(&records), &[Field::SchoolUnitName]);

        let top = top_n(groups, 3);

        let names: Vec<_> = top.iter().map(|group| group.key[0]).collect();
        assert_eq!(
            names,
            vec![
                FieldValue::Text("First"),
                FieldValue::Text("Second"),
                FieldValue::Text("Third")
            ]
        );
    }

    #[test]
    fn top_n_with_zero_or_large_n() {
        let records = sample();
        let groups = group_sum(&view(&records), &[Field::Region]);

        assert!(top_n(groups.clone(), 0).is_empty());
        assert_eq!(top_n(groups, 100).len(), 2);
    }

    #[test]
    fn distinct_values_in_first_occurrence_order() {
        let records = sample();

        let years = distinct_values(&view(&records), Field::Year);
        let offices = distinct_values(&view(&records), Field::SupervisoryOffice);

        assert_eq!(years, vec![FieldValue::Year(2023), FieldValue::Year(2024)]);
        assert_eq!(
            offices,
            vec![
                FieldValue::Text("Sup. 1"),
                FieldValue::Text("Sup. 2"),
                FieldValue::Text("Sup. 3")
            ]
        );
    }
}
