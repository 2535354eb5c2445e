//! Stats grouping modes.

/// Dimension the stats endpoint aggregates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Category,
    Date,
    Week,
    Month,
}

impl GroupBy {
    /// Parse a `group_by` query parameter.
    ///
    /// Unrecognized or absent values silently fall back to [`GroupBy::Category`],
    /// matching the endpoint's documented default.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("date") => GroupBy::Date,
            Some("week") => GroupBy::Week,
            Some("month") => GroupBy::Month,
            _ => GroupBy::Category,
        }
    }
}
