//! Stable, key-driven ordering of table rows.

mod collation;
mod fields;
mod resolver;
mod spec;
mod value;

pub use collation::compare_ru;
pub use fields::{event_resolver, payment_resolver, position_resolver};
pub use resolver::{FieldAccessor, FieldResolver, FieldTable, ResolverChain};
pub use spec::{normalize_key, SortDirection, SortSpec};
pub use value::SortValue;

use tracing::debug;

/// Order `items` by `spec`, resolving the key through `resolver`.
///
/// The sort is stable. Missing values come first ascending and last
/// descending. A key no stage knows leaves the input order untouched.
pub fn sort_items<T>(items: Vec<T>, spec: &SortSpec, resolver: &ResolverChain<T>) -> Vec<T> {
    let Some(accessor) = resolver.resolve(&spec.key) else {
        debug!(key = %spec.key, "unknown sort key; keeping input order");
        return items;
    };

    let mut keyed: Vec<(SortValue, T)> = items
        .into_iter()
        .map(|item| (accessor(&item), item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| match spec.direction {
        SortDirection::Asc => a.cmp(b),
        SortDirection::Desc => a.cmp(b).reverse(),
    });
    keyed.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        score: Option<i64>,
        label: &'static str,
    }

    fn score(row: &Row) -> SortValue {
        SortValue::number(row.score.map(Decimal::from))
    }

    fn label(row: &Row) -> SortValue {
        SortValue::text(row.label)
    }

    static FIELDS: &[(&str, FieldAccessor<Row>)] = &[("score", score), ("label", label)];

    fn resolver() -> ResolverChain<Row> {
        ResolverChain::new().then(FieldTable::new(FIELDS))
    }

    fn row(id: u32, score: Option<i64>, label: &'static str) -> Row {
        Row { id, score, label }
    }

    fn ids(rows: &[Row]) -> Vec<u32> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn repeated_toggle_reverses_order() {
        // Keys are distinct; with ties the toggle keeps input order instead.
        let rows = vec![row(1, Some(5), "в"), row(2, Some(1), "а"), row(3, Some(9), "б")];
        let spec = SortSpec::ascending("score");
        let first = sort_items(rows.clone(), &spec, &resolver());
        let second = sort_items(rows, &spec.toggle("score"), &resolver());

        assert_eq!(ids(&first), vec![2, 1, 3]);
        let mut reversed = ids(&first);
        reversed.reverse();
        assert_eq!(ids(&second), reversed);
    }

    #[test]
    fn equal_keys_keep_input_order_in_both_directions() {
        let rows = vec![
            row(1, Some(2), "x"),
            row(2, Some(1), "x"),
            row(3, Some(2), "x"),
            row(4, Some(1), "x"),
        ];
        let asc = sort_items(rows.clone(), &SortSpec::ascending("score"), &resolver());
        assert_eq!(ids(&asc), vec![2, 4, 1, 3]);

        let desc = sort_items(rows, &SortSpec::descending("score"), &resolver());
        assert_eq!(ids(&desc), vec![1, 3, 2, 4]);
    }

    #[test]
    fn toggle_keeps_ties_in_input_order() {
        let rows = vec![row(1, Some(4), "x"), row(2, Some(4), "y"), row(3, Some(4), "z")];
        let spec = SortSpec::ascending("score");
        let first = sort_items(rows.clone(), &spec, &resolver());
        let second = sort_items(rows, &spec.toggle("score"), &resolver());

        assert_eq!(ids(&first), vec![1, 2, 3]);
        assert_eq!(ids(&second), ids(&first));
    }

    #[test]
    fn missing_values_first_ascending_last_descending() {
        let rows = vec![row(1, Some(3), "a"), row(2, None, "b"), row(3, Some(-7), "c")];
        let asc = sort_items(rows.clone(), &SortSpec::ascending("score"), &resolver());
        assert_eq!(ids(&asc), vec![2, 3, 1]);

        let desc = sort_items(rows, &SortSpec::descending("score"), &resolver());
        assert_eq!(ids(&desc), vec![1, 3, 2]);
    }

    #[test]
    fn text_fields_use_russian_collation() {
        let rows = vec![row(1, None, "Яндекс"), row(2, None, "ёлка"), row(3, None, "Ашан")];
        let sorted = sort_items(rows, &SortSpec::ascending("label"), &resolver());
        assert_eq!(ids(&sorted), vec![3, 2, 1]);
    }

    #[test]
    fn unknown_key_keeps_everything_in_place() {
        let rows = vec![row(1, Some(3), "a"), row(2, None, "b")];
        let sorted = sort_items(rows.clone(), &SortSpec::descending("bogus"), &resolver());
        assert_eq!(sorted, rows);
    }
}
