//! Strongly-typed query parameters.
//!
//! Requests arrive as loose key/value pairs. [`QueryParams::from_pairs`]
//! maps them onto a fixed set of [`QueryOption`]s and rejects anything it
//! does not recognize instead of silently dropping it.

use crate::error::{InvalidQueryError, Result};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Every option a query may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryOption {
    NameContains,
    Category,
    PriceMin,
    PriceMax,
    AbvMin,
    AbvMax,
    Sort,
    Limit,
    Offset,
}

impl QueryOption {
    pub const ALL: [QueryOption; 9] = [
        QueryOption::NameContains,
        QueryOption::Category,
        QueryOption::PriceMin,
        QueryOption::PriceMax,
        QueryOption::AbvMin,
        QueryOption::AbvMax,
        QueryOption::Sort,
        QueryOption::Limit,
        QueryOption::Offset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryOption::NameContains => "name_contains",
            QueryOption::Category => "category",
            QueryOption::PriceMin => "price_min",
            QueryOption::PriceMax => "price_max",
            QueryOption::AbvMin => "abv_min",
            QueryOption::AbvMax => "abv_max",
            QueryOption::Sort => "sort",
            QueryOption::Limit => "limit",
            QueryOption::Offset => "offset",
        }
    }

    /// Exact, case-sensitive key lookup
    pub fn from_key(key: &str) -> Option<QueryOption> {
        Self::ALL.into_iter().find(|option| option.as_str() == key)
    }
}

impl fmt::Display for QueryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field a result set can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Name,
    Price,
    Abv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Explicit ordering request, written `<key>:<asc|desc>` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

impl FromStr for SortSpec {
    type Err = InvalidQueryError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| InvalidQueryError::InvalidSort {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let (key, direction) = s
            .split_once(':')
            .ok_or_else(|| invalid("expected <key>:<asc|desc>"))?;

        let key = match key.trim() {
            "id" => SortKey::Id,
            "name" => SortKey::Name,
            "price" => SortKey::Price,
            "abv" => SortKey::Abv,
            _ => return Err(invalid("key must be one of id, name, price, abv")),
        };
        let direction = match direction.trim() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(invalid("direction must be asc or desc")),
        };

        Ok(SortSpec { key, direction })
    }
}

/// Parsed query. All predicates are ANDed; `offset`/`limit` slice the
/// result after filtering and sorting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    /// Case-insensitive substring of name or brand
    pub name_contains: Option<String>,
    /// Exact case-insensitive category
    pub category: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub abv_min: Option<f64>,
    pub abv_max: Option<f64>,
    pub sort: Option<SortSpec>,
    /// `None` means unbounded
    pub limit: Option<usize>,
    pub offset: usize,
}

impl QueryParams {
    /// Map raw key/value pairs (a parsed query string) onto typed options.
    ///
    /// Fails on unknown or repeated keys, blank values, unparseable or
    /// non-finite numbers, negative `limit`/`offset`, malformed `sort`,
    /// and inverted ranges.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = QueryParams::default();
        let mut seen = HashSet::new();

        for (key, value) in pairs {
            let key = key.as_ref();
            let value = value.as_ref().trim();

            let option = QueryOption::from_key(key).ok_or_else(|| InvalidQueryError::UnknownOption {
                key: key.to_string(),
            })?;
            if !seen.insert(option) {
                return Err(InvalidQueryError::DuplicateOption {
                    key: key.to_string(),
                });
            }
            if value.is_empty() {
                return Err(InvalidQueryError::EmptyValue {
                    key: key.to_string(),
                });
            }

            match option {
                QueryOption::NameContains => params.name_contains = Some(value.to_string()),
                QueryOption::Category => params.category = Some(value.to_string()),
                QueryOption::PriceMin => params.price_min = Some(parse_bound(option, value)?),
                QueryOption::PriceMax => params.price_max = Some(parse_bound(option, value)?),
                QueryOption::AbvMin => params.abv_min = Some(parse_bound(option, value)?),
                QueryOption::AbvMax => params.abv_max = Some(parse_bound(option, value)?),
                QueryOption::Sort => params.sort = Some(value.parse()?),
                QueryOption::Limit => params.limit = Some(parse_count(option, value)?),
                QueryOption::Offset => params.offset = parse_count(option, value)?,
            }
        }

        params.validate()?;
        Ok(params)
    }

    /// Check cross-field constraints.
    ///
    /// [`crate::query`] calls this too, so params built by hand get the
    /// same checks as parsed ones.
    pub fn validate(&self) -> Result<()> {
        let bounds = [
            (QueryOption::PriceMin, self.price_min),
            (QueryOption::PriceMax, self.price_max),
            (QueryOption::AbvMin, self.abv_min),
            (QueryOption::AbvMax, self.abv_max),
        ];
        for (option, bound) in bounds {
            if let Some(value) = bound {
                if !value.is_finite() {
                    return Err(InvalidQueryError::InvalidNumber {
                        key: option.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }

        check_range("price", self.price_min, self.price_max)?;
        check_range("abv", self.abv_min, self.abv_max)?;
        Ok(())
    }

    pub fn with_name_contains(mut self, needle: impl Into<String>) -> Self {
        self.name_contains = Some(needle.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn with_abv_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.abv_min = min;
        self.abv_max = max;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

fn parse_bound(option: QueryOption, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InvalidQueryError::InvalidNumber {
            key: option.to_string(),
            value: value.to_string(),
        })
}

/// Parse a non-negative integer, reporting negatives separately from garbage
fn parse_count(option: QueryOption, value: &str) -> Result<usize> {
    let parsed = value
        .parse::<i64>()
        .map_err(|_| InvalidQueryError::InvalidNumber {
            key: option.to_string(),
            value: value.to_string(),
        })?;
    usize::try_from(parsed).map_err(|_| InvalidQueryError::NegativeValue {
        key: option.to_string(),
        value: value.to_string(),
    })
}

fn check_range(field: &str, min: Option<f64>, max: Option<f64>) -> Result<()> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(InvalidQueryError::InvalidRange {
            field: field.to_string(),
            min,
            max,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(pairs: &[(&str, &str)]) -> Result<QueryParams> {
        QueryParams::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_no_options_is_default() {
        assert_eq!(parse(&[]).unwrap(), QueryParams::default());
    }

    #[test]
    fn test_all_options_parse() {
        let params = parse(&[
            ("name_contains", "reserve"),
            ("category", "whiskey"),
            ("price_min", "10"),
            ("price_max", "50.5"),
            ("abv_min", "40"),
            ("abv_max", "46"),
            ("sort", "price:desc"),
            ("limit", "5"),
            ("offset", "2"),
        ])
        .unwrap();

        assert_eq!(params.name_contains.as_deref(), Some("reserve"));
        assert_eq!(params.category.as_deref(), Some("whiskey"));
        assert_eq!(params.price_min, Some(10.0));
        assert_eq!(params.price_max, Some(50.5));
        assert_eq!(params.abv_min, Some(40.0));
        assert_eq!(params.abv_max, Some(46.0));
        assert_eq!(params.sort, Some(SortSpec::new(SortKey::Price, SortDirection::Desc)));
        assert_eq!(params.limit, Some(5));
        assert_eq!(params.offset, 2);
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = parse(&[("colour", "amber")]).unwrap_err();
        assert_eq!(err, InvalidQueryError::UnknownOption { key: "colour".to_string() });
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        assert!(matches!(
            parse(&[("Category", "rum")]),
            Err(InvalidQueryError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_duplicate_option_rejected() {
        assert!(matches!(
            parse(&[("category", "rum"), ("category", "gin")]),
            Err(InvalidQueryError::DuplicateOption { .. })
        ));
    }

    #[test]
    fn test_negative_pagination_rejected() {
        assert!(matches!(
            parse(&[("limit", "-1")]),
            Err(InvalidQueryError::NegativeValue { .. })
        ));
        assert!(matches!(
            parse(&[("offset", "-3")]),
            Err(InvalidQueryError::NegativeValue { .. })
        ));
    }

    #[test]
    fn test_garbage_numbers_rejected() {
        assert!(matches!(
            parse(&[("limit", "ten")]),
            Err(InvalidQueryError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse(&[("price_min", "inf")]),
            Err(InvalidQueryError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_empty_value_rejected() {
        assert!(matches!(
            parse(&[("category", "  ")]),
            Err(InvalidQueryError::EmptyValue { .. })
        ));
    }

    #[test]
    fn test_inverted_price_range_rejected() {
        let err = parse(&[("price_min", "20"), ("price_max", "10")]).unwrap_err();
        assert_eq!(
            err,
            InvalidQueryError::InvalidRange {
                field: "price".to_string(),
                min: 20.0,
                max: 10.0
            }
        );
    }

    #[test]
    fn test_sort_requires_direction() {
        assert!("price".parse::<SortSpec>().is_err());
        assert!("price:up".parse::<SortSpec>().is_err());
        assert!("colour:asc".parse::<SortSpec>().is_err());
        assert_eq!(
            "name:asc".parse::<SortSpec>().unwrap(),
            SortSpec::new(SortKey::Name, SortDirection::Asc)
        );
    }

    #[test]
    fn test_validate_catches_hand_built_params() {
        let params = QueryParams::default().with_abv_range(Some(50.0), Some(40.0));
        assert!(matches!(
            params.validate(),
            Err(InvalidQueryError::InvalidRange { .. })
        ));

        let params = QueryParams::default().with_price_range(Some(f64::NAN), None);
        assert!(params.validate().is_err());
    }
}
