/// Specifies the direction for sorting documents.
///
/// # Purpose
/// Defines whether documents should be sorted in ascending (low to high) or
/// descending (high to low) order. Used in query options to control result
/// ordering; docmap supports a single sort key per query.
///
/// # Usage
/// Used with the `order_by()` helper or `FindOptions::order_by()`:
/// ```text
/// let options = order_by("-age"); // descending
/// let cursor = User::all(doc! {}, options)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortOrder {
    /// Sort in ascending order (smallest to largest, A-Z, oldest to newest)
    Ascending,
    /// Sort in descending order (largest to smallest, Z-A, newest to oldest)
    Descending,
}
