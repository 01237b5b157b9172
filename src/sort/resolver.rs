//! Key-to-field resolution for sorting.
//!
//! A [`ResolverChain`] asks its stages in order; the first stage that knows
//! a key supplies the accessor. Tables list derived metrics first and raw
//! fields after, so a derived definition shadows a raw field of the same
//! name.

use super::{normalize_key, SortValue};

/// Extracts a comparable value from an item.
pub type FieldAccessor<T> = fn(&T) -> SortValue;

pub trait FieldResolver<T>: Send + Sync {
    /// Accessor for a normalized key, if this resolver defines it.
    fn accessor(&self, key: &str) -> Option<FieldAccessor<T>>;
}

/// A static list of `(normalized key, accessor)` pairs.
pub struct FieldTable<T: 'static> {
    fields: &'static [(&'static str, FieldAccessor<T>)],
}

impl<T: 'static> FieldTable<T> {
    pub const fn new(fields: &'static [(&'static str, FieldAccessor<T>)]) -> Self {
        Self { fields }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|(name, _)| *name)
    }
}

impl<T: 'static> FieldResolver<T> for FieldTable<T> {
    fn accessor(&self, key: &str) -> Option<FieldAccessor<T>> {
        self.fields
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, accessor)| *accessor)
    }
}

/// Ordered list of resolvers.
pub struct ResolverChain<T> {
    stages: Vec<Box<dyn FieldResolver<T>>>,
}

impl<T> Default for ResolverChain<T> {
    fn default() -> Self {
        Self { stages: Vec::new() }
    }
}

impl<T> ResolverChain<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage consulted after every stage already in the chain.
    pub fn then(mut self, resolver: impl FieldResolver<T> + 'static) -> Self {
        self.stages.push(Box::new(resolver));
        self
    }

    pub fn resolve(&self, key: &str) -> Option<FieldAccessor<T>> {
        let key = normalize_key(key);
        self.stages.iter().find_map(|stage| stage.accessor(&key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    struct Row {
        raw: i64,
    }

    fn scaled_score(row: &Row) -> SortValue {
        SortValue::Number(Decimal::from(row.raw * 10))
    }

    fn raw_score(row: &Row) -> SortValue {
        SortValue::Number(Decimal::from(row.raw))
    }

    static DERIVED: &[(&str, FieldAccessor<Row>)] = &[("score", scaled_score)];
    static RAW: &[(&str, FieldAccessor<Row>)] = &[("score", raw_score), ("raw", raw_score)];

    fn chain() -> ResolverChain<Row> {
        ResolverChain::new()
            .then(FieldTable::new(DERIVED))
            .then(FieldTable::new(RAW))
    }

    #[test]
    fn derived_stage_shadows_raw_stage() {
        let accessor = chain().resolve("score").unwrap();
        assert_eq!(accessor(&Row { raw: 2 }), SortValue::Number(Decimal::from(20)));
    }

    #[test]
    fn falls_back_to_later_stage() {
        let accessor = chain().resolve("RAW").unwrap();
        assert_eq!(accessor(&Row { raw: 2 }), SortValue::Number(Decimal::from(2)));
    }

    #[test]
    fn unknown_key_resolves_to_none() {
        assert!(chain().resolve("nope").is_none());
        assert_eq!(FieldTable::new(RAW).keys().collect::<Vec<_>>(), vec!["score", "raw"]);
    }
}
