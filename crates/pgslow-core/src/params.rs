//! Request parameter resolution.
//!
//! Turns untrusted pagination, filter and sort parameters into a
//! [`ResolvedQuery`]. Nothing in this module knows about SQL or HTTP.
//!
//! # Paging contract
//!
//! The offset is `page * limit`, where `limit` is the *effective* page size
//! (after defaulting). A caller that changes `page_size` between requests
//! changes what a given `page` number points at.
//!
//! # Validation order
//!
//! `query_type` is checked first and `order_by` second. When both are
//! invalid the `order_by` error is the one returned.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

/// Page size used when the caller does not send one (or sends 0).
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Raw request parameters as they arrive from the query string.
///
/// Every field is optional on the wire; missing values take the defaults
/// below and are interpreted by [`ParamResolver::resolve`]. A numeric field
/// sent with an empty value (`?page=`) counts as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryParams {
    /// Zero-based page number.
    #[serde(deserialize_with = "empty_as_zero")]
    pub page: u32,
    /// Rows per page; 0 means "unset".
    #[serde(deserialize_with = "empty_as_zero")]
    pub page_size: u32,
    /// Leading SQL verb to filter on (case-insensitive), or empty for none.
    pub query_type: String,
    /// Sort direction on total execution time (case-insensitive), or empty.
    pub order_by: String,
}

/// Accepts a number or a numeric string, treating `""` as 0.
fn empty_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct CountVisitor;

    impl Visitor<'_> for CountVisitor {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer or an empty string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::custom(format!("integer out of range: {}", v)))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::custom(format!("integer out of range: {}", v)))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
            if v.is_empty() {
                return Ok(0);
            }
            v.parse()
                .map_err(|_| E::custom(format!("cannot parse integer from {:?}", v)))
        }
    }

    deserializer.deserialize_any(CountVisitor)
}

/// Leading SQL verb used to filter statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Select,
    Insert,
    Update,
    Delete,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "select" => Ok(Self::Select),
            "insert" => Ok(Self::Insert),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            _ => Err(AppError::invalid_argument("query_type", s)),
        }
    }
}

/// Sort direction on total execution time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    #[default]
    Desc,
}

impl OrderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(AppError::invalid_argument("order_by", s)),
        }
    }
}

/// Validated, fully defaulted pagination/filter/sort specification.
///
/// Only [`ParamResolver::resolve`] can build one, so every value in
/// circulation satisfies `limit > 0` and `offset >= 0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedQuery {
    limit: i64,
    offset: i64,
    query_type: Option<QueryType>,
    order: OrderDirection,
}

impl ResolvedQuery {
    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// The statement prefix filter, if any.
    pub fn query_type(&self) -> Option<QueryType> {
        self.query_type
    }

    pub fn order(&self) -> OrderDirection {
        self.order
    }
}

/// Resolves [`QueryParams`] into a [`ResolvedQuery`].
///
/// The default resolver enforces no upper bound on the page size. Use
/// [`ParamResolver::with_max_page_size`] to reject larger pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamResolver {
    max_page_size: Option<u32>,
}

impl ParamResolver {
    /// Creates an unbounded resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver that rejects `page_size` values above `max`.
    ///
    /// A cap of 0 is raised to 1 so a resolved limit is always positive.
    pub fn with_max_page_size(max: u32) -> Self {
        Self {
            max_page_size: Some(max.max(1)),
        }
    }

    pub fn max_page_size(&self) -> Option<u32> {
        self.max_page_size
    }

    /// Validates and normalizes `params`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidArgument`] naming `query_type`, `order_by`,
    /// `page_size` (above the configured cap) or `page` (offset outside the
    /// bigint range).
    pub fn resolve(&self, params: &QueryParams) -> Result<ResolvedQuery, AppError> {
        let page_size = match (params.page_size, self.max_page_size) {
            (0, Some(max)) => DEFAULT_PAGE_SIZE.min(max),
            (0, None) => DEFAULT_PAGE_SIZE,
            (n, Some(max)) if n > max => {
                return Err(AppError::invalid_argument("page_size", n.to_string()));
            }
            (n, _) => n,
        };

        let limit = i64::from(page_size);
        let offset = if params.page > 0 {
            i64::from(params.page)
                .checked_mul(limit)
                .ok_or_else(|| AppError::invalid_argument("page", params.page.to_string()))?
        } else {
            0
        };

        let query_type = parse_query_type(&params.query_type);
        let order = parse_order(&params.order_by)?;
        let query_type = query_type?;

        Ok(ResolvedQuery {
            limit,
            offset,
            query_type,
            order,
        })
    }
}

/// Resolves `params` with an unbounded [`ParamResolver`].
pub fn resolve_params(params: &QueryParams) -> Result<ResolvedQuery, AppError> {
    ParamResolver::new().resolve(params)
}

fn parse_query_type(raw: &str) -> Result<Option<QueryType>, AppError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some)
}

fn parse_order(raw: &str) -> Result<OrderDirection, AppError> {
    if raw.is_empty() {
        return Ok(OrderDirection::default());
    }
    raw.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: u32, page_size: u32, query_type: &str, order_by: &str) -> QueryParams {
        QueryParams {
            page,
            page_size,
            query_type: query_type.to_string(),
            order_by: order_by.to_string(),
        }
    }

    fn invalid_field(err: AppError) -> (&'static str, String) {
        match err {
            AppError::InvalidArgument { field, value } => (field, value),
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let resolved = resolve_params(&QueryParams::default()).unwrap();
        assert_eq!(resolved.limit(), 50);
        assert_eq!(resolved.offset(), 0);
        assert_eq!(resolved.query_type(), None);
        assert_eq!(resolved.order(), OrderDirection::Desc);
    }

    #[test]
    fn test_offset_scales_with_page_size() {
        for (page, size) in [(1, 1), (5, 2), (3, 25), (10, 100)] {
            let resolved = resolve_params(&params(page, size, "", "")).unwrap();
            assert_eq!(resolved.limit(), i64::from(size));
            assert_eq!(resolved.offset(), i64::from(page) * i64::from(size));
        }
    }

    #[test]
    fn test_offset_uses_default_page_size() {
        let resolved = resolve_params(&params(3, 0, "", "")).unwrap();
        assert_eq!(resolved.limit(), 50);
        assert_eq!(resolved.offset(), 150);
    }

    #[test]
    fn test_page_zero_has_no_offset() {
        let resolved = resolve_params(&params(0, 20, "", "")).unwrap();
        assert_eq!(resolved.offset(), 0);
    }

    #[test]
    fn test_query_type_is_case_insensitive() {
        for raw in ["SELECT", "Select", "select"] {
            let resolved = resolve_params(&params(0, 0, raw, "")).unwrap();
            assert_eq!(resolved.query_type(), Some(QueryType::Select));
        }
    }

    #[test]
    fn test_all_query_types_accepted() {
        for (raw, expected) in [
            ("select", QueryType::Select),
            ("insert", QueryType::Insert),
            ("update", QueryType::Update),
            ("delete", QueryType::Delete),
        ] {
            let resolved = resolve_params(&params(0, 0, raw, "")).unwrap();
            assert_eq!(resolved.query_type(), Some(expected));
        }
    }

    #[test]
    fn test_invalid_query_type() {
        let err = resolve_params(&params(0, 0, "bogus", "")).unwrap_err();
        assert_eq!(invalid_field(err), ("query_type", "bogus".to_string()));
    }

    #[test]
    fn test_order_by_defaults_and_normalizes() {
        let resolved = resolve_params(&params(0, 0, "", "")).unwrap();
        assert_eq!(resolved.order(), OrderDirection::Desc);

        let resolved = resolve_params(&params(0, 0, "", "ASC")).unwrap();
        assert_eq!(resolved.order(), OrderDirection::Asc);

        let resolved = resolve_params(&params(0, 0, "", "Desc")).unwrap();
        assert_eq!(resolved.order(), OrderDirection::Desc);
    }

    #[test]
    fn test_invalid_order_by_names_its_own_value() {
        let err = resolve_params(&params(0, 0, "select", "sideways")).unwrap_err();
        assert_eq!(invalid_field(err), ("order_by", "sideways".to_string()));
    }

    #[test]
    fn test_both_invalid_reports_order_by() {
        let err = resolve_params(&params(0, 0, "bogus", "sideways")).unwrap_err();
        assert_eq!(invalid_field(err), ("order_by", "sideways".to_string()));
    }

    #[test]
    fn test_error_keeps_raw_spelling() {
        let err = resolve_params(&params(0, 0, "BoGuS", "")).unwrap_err();
        assert_eq!(invalid_field(err), ("query_type", "BoGuS".to_string()));
    }

    #[test]
    fn test_full_scenario() {
        let resolved = resolve_params(&params(5, 2, "select", "asc")).unwrap();
        assert_eq!(resolved.limit(), 2);
        assert_eq!(resolved.offset(), 10);
        assert_eq!(resolved.query_type(), Some(QueryType::Select));
        assert_eq!(resolved.order(), OrderDirection::Asc);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let input = params(7, 13, "Update", "ASC");
        let first = resolve_params(&input).unwrap();
        let second = resolve_params(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unbounded_by_default() {
        let resolved = resolve_params(&params(0, u32::MAX, "", "")).unwrap();
        assert_eq!(resolved.limit(), i64::from(u32::MAX));
    }

    #[test]
    fn test_max_page_size_cap() {
        let resolver = ParamResolver::with_max_page_size(100);
        assert!(resolver.resolve(&params(0, 100, "", "")).is_ok());
        // The default page size is still accepted when it fits under the cap
        assert_eq!(resolver.resolve(&QueryParams::default()).unwrap().limit(), 50);

        let err = resolver.resolve(&params(0, 101, "", "")).unwrap_err();
        assert_eq!(invalid_field(err), ("page_size", "101".to_string()));
    }

    #[test]
    fn test_default_page_size_shrinks_under_small_cap() {
        let resolver = ParamResolver::with_max_page_size(20);
        let resolved = resolver.resolve(&params(2, 0, "", "")).unwrap();
        assert_eq!(resolved.limit(), 20);
        assert_eq!(resolved.offset(), 40);
    }

    #[test]
    fn test_offset_overflow_is_rejected() {
        let err = resolve_params(&params(u32::MAX, u32::MAX, "", "")).unwrap_err();
        assert_eq!(invalid_field(err).0, "page");
    }

    #[test]
    fn test_query_params_deserialize_defaults() {
        let parsed: QueryParams = serde_json::from_str(r#"{"page": 2}"#).unwrap();
        assert_eq!(parsed.page, 2);
        assert_eq!(parsed.page_size, 0);
        assert!(parsed.query_type.is_empty());
        assert!(parsed.order_by.is_empty());
    }

    #[test]
    fn test_empty_numeric_values_count_as_zero() {
        let parsed: QueryParams =
            serde_json::from_str(r#"{"page": "", "page_size": "", "query_type": "", "order_by": ""}"#)
                .unwrap();
        assert_eq!(parsed, QueryParams::default());

        let resolved = resolve_params(&parsed).unwrap();
        assert_eq!(resolved.limit(), 50);
        assert_eq!(resolved.offset(), 0);
    }

    #[test]
    fn test_numeric_strings_parse() {
        let parsed: QueryParams =
            serde_json::from_str(r#"{"page": "3", "page_size": "20"}"#).unwrap();
        assert_eq!(parsed.page, 3);
        assert_eq!(parsed.page_size, 20);
    }

    #[test]
    fn test_negative_or_garbage_counts_are_rejected() {
        assert!(serde_json::from_str::<QueryParams>(r#"{"page": "-1"}"#).is_err());
        assert!(serde_json::from_str::<QueryParams>(r#"{"page": -1}"#).is_err());
        assert!(serde_json::from_str::<QueryParams>(r#"{"page_size": "ten"}"#).is_err());
    }

    #[test]
    fn test_zero_cap_is_raised_to_one() {
        let resolver = ParamResolver::with_max_page_size(0);
        assert_eq!(resolver.max_page_size(), Some(1));
        assert_eq!(resolver.resolve(&QueryParams::default()).unwrap().limit(), 1);
    }

    #[test]
    fn test_query_type_display() {
        assert_eq!(QueryType::Delete.to_string(), "delete");
        assert_eq!(OrderDirection::Asc.to_string(), "asc");
    }
}
