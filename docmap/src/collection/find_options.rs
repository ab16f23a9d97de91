use crate::common::SortOrder;

/// Options for controlling find operations on documents.
///
/// `FindOptions` specifies sorting, pagination and offsets for query results
/// and supports method chaining.
///
/// The sort specification is a single field name with an optional direction
/// prefix: `-` for descending, `+` for explicit ascending (ascending is the
/// default when no prefix is given). Only one sort key is supported.
///
/// # Examples
///
/// ```rust,ignore
/// use docmap::collection::FindOptions;
///
/// let options = FindOptions::new()
///     .order_by("-last_name")
///     .skip(10)
///     .limit(20);
///
/// // Or the convenience functions
/// use docmap::collection::{limit_to, order_by, skip_by};
/// let options = order_by("age");
/// let options = skip_by(5);
/// let options = limit_to(100);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FindOptions {
    pub sort_by: Option<(String, SortOrder)>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

/// Creates `FindOptions` sorted by an order specification string.
pub fn order_by(spec: &str) -> FindOptions {
    FindOptions::new().order_by(spec)
}

/// Creates `FindOptions` that skips a number of results.
pub fn skip_by(skip: u64) -> FindOptions {
    FindOptions::new().skip(skip)
}

/// Creates `FindOptions` that limits the number of results.
pub fn limit_to(limit: u64) -> FindOptions {
    FindOptions::new().limit(limit)
}

impl FindOptions {
    /// Creates a new `FindOptions` with default settings: no sorting, no
    /// skip, no limit.
    pub fn new() -> FindOptions {
        FindOptions::default()
    }

    /// Sets the number of documents to skip from the beginning.
    pub fn skip(mut self, skip: u64) -> FindOptions {
        self.skip = Some(skip);
        self
    }

    /// Sets the maximum number of documents to return.
    pub fn limit(mut self, limit: u64) -> FindOptions {
        self.limit = Some(limit);
        self
    }

    /// Sets the sort key from an order specification string
    /// (`"-field"`, `"+field"` or `"field"`).
    pub fn order_by(mut self, spec: &str) -> FindOptions {
        self.sort_by = Some(parse_order_by(spec));
        self
    }

    /// Sets the sort key and direction explicitly.
    pub fn sort(mut self, field: &str, order: SortOrder) -> FindOptions {
        self.sort_by = Some((field.to_string(), order));
        self
    }
}

/// Parses an order specification string into a field name and direction.
///
/// A leading `-` selects descending order, a leading `+` explicit ascending;
/// a bare field name sorts ascending.
pub fn parse_order_by(spec: &str) -> (String, SortOrder) {
    if let Some(field) = spec.strip_prefix('-') {
        (field.to_string(), SortOrder::Descending)
    } else if let Some(field) = spec.strip_prefix('+') {
        (field.to_string(), SortOrder::Ascending)
    } else {
        (spec.to_string(), SortOrder::Ascending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_by() {
        assert_eq!(
            parse_order_by("-last_name"),
            ("last_name".to_string(), SortOrder::Descending)
        );
        assert_eq!(
            parse_order_by("+age"),
            ("age".to_string(), SortOrder::Ascending)
        );
        assert_eq!(
            parse_order_by("age"),
            ("age".to_string(), SortOrder::Ascending)
        );
    }

    #[test]
    fn test_builder_chaining() {
        let options = FindOptions::new().order_by("-age").skip(10).limit(20);
        assert_eq!(
            options.sort_by,
            Some(("age".to_string(), SortOrder::Descending))
        );
        assert_eq!(options.skip, Some(10));
        assert_eq!(options.limit, Some(20));
    }

    #[test]
    fn test_convenience_functions() {
        assert_eq!(skip_by(5).skip, Some(5));
        assert_eq!(limit_to(100).limit, Some(100));
        assert_eq!(
            order_by("name").sort_by,
            Some(("name".to_string(), SortOrder::Ascending))
        );
    }

    #[test]
    fn test_defaults() {
        let options = FindOptions::new();
        assert!(options.sort_by.is_none());
        assert!(options.skip.is_none());
        assert!(options.limit.is_none());
    }
}
