//! Allow-list driven SQL builders.
//!
//! Repositories describe each listable resource with a constant [`ListSpec`]
//! and each updatable resource with a constant [`UpdateSpec`]. The builders in
//! this module turn caller input into SQL text plus an ordered list of bound
//! values. Caller-supplied names are only ever used to look entries up in the
//! allow-list; the SQL text is assembled exclusively from the `'static`
//! strings of those descriptors, and every caller-supplied value is bound.

use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::pagination::PageRequest;

/// Errors raised while turning caller input into a statement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid value for filter '{param}': {value}")]
    InvalidFilterValue { param: String, value: String },

    #[error("Invalid value for field '{field}'")]
    InvalidFieldValue { field: String },

    #[error("No valid fields to update")]
    NoUpdatableFields,
}

/// SQL type of a filterable or updatable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    /// 32-bit integer; wider values are rejected.
    Integer,
    Bool,
    Float,
}

/// A value bound to a positional parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Integer(Option<i64>),
    Bool(Option<bool>),
    Float(Option<f64>),
}

impl ColumnType {
    /// Converts a raw query-string value.
    fn parse_param(self, raw: &str) -> Option<SqlValue> {
        match self {
            ColumnType::Text => Some(SqlValue::Text(Some(raw.to_string()))),
            ColumnType::Integer => raw
                .trim()
                .parse::<i32>()
                .ok()
                .map(|v| SqlValue::Integer(Some(v.into()))),
            ColumnType::Float => raw.trim().parse().ok().map(|v| SqlValue::Float(Some(v))),
            ColumnType::Bool => parse_bool(raw).map(|v| SqlValue::Bool(Some(v))),
        }
    }

    /// Converts a JSON payload value. `null` maps to a typed NULL.
    fn from_json(self, value: &Value) -> Option<SqlValue> {
        if value.is_null() {
            return Some(self.null());
        }
        match self {
            ColumnType::Text => value.as_str().map(|s| SqlValue::Text(Some(s.to_string()))),
            ColumnType::Integer => match value {
                Value::Number(n) => n
                    .as_i64()
                    .and_then(|v| i32::try_from(v).ok())
                    .map(|v| SqlValue::Integer(Some(v.into()))),
                Value::String(s) => self.parse_param(s),
                _ => None,
            },
            ColumnType::Float => match value {
                Value::Number(n) => n.as_f64().map(|v| SqlValue::Float(Some(v))),
                Value::String(s) => self.parse_param(s),
                _ => None,
            },
            ColumnType::Bool => match value {
                Value::Bool(b) => Some(SqlValue::Bool(Some(*b))),
                Value::Number(n) => match n.as_i64() {
                    Some(0) => Some(SqlValue::Bool(Some(false))),
                    Some(1) => Some(SqlValue::Bool(Some(true))),
                    _ => None,
                },
                Value::String(s) => self.parse_param(s),
                _ => None,
            },
        }
    }

    fn null(self) -> SqlValue {
        match self {
            ColumnType::Text => SqlValue::Text(None),
            ColumnType::Integer => SqlValue::Integer(None),
            ColumnType::Bool => SqlValue::Bool(None),
            ColumnType::Float => SqlValue::Float(None),
        }
    }
}

/// Escapes LIKE wildcards so the input matches literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// Comparison applied by a filter.
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    /// `column = ?`
    Equals { column: &'static str, ty: ColumnType },
    /// `(c1 LIKE ? OR c2 LIKE ? ...)` with the escaped value wrapped in `%`.
    SubstringMatch { columns: &'static [&'static str] },
}

/// One entry of a resource's filter allow-list.
#[derive(Debug, Clone, Copy)]
pub struct FilterField {
    /// Query-string parameter name.
    pub param: &'static str,
    pub predicate: Predicate,
}

impl FilterField {
    pub const fn equals(param: &'static str, ty: ColumnType) -> Self {
        Self {
            param,
            predicate: Predicate::Equals { column: param, ty },
        }
    }

    pub const fn substring(param: &'static str, columns: &'static [&'static str]) -> Self {
        Self {
            param,
            predicate: Predicate::SubstringMatch { columns },
        }
    }
}

/// Static description of a listable resource.
#[derive(Debug, Clone, Copy)]
pub struct ListSpec {
    pub table: &'static str,
    /// Output projection.
    pub columns: &'static str,
    /// Predicate applied to every query of this listing.
    pub scope: Option<&'static str>,
    pub filters: &'static [FilterField],
    pub order_by: &'static str,
    pub default_limit: usize,
}

/// Paired fetch and count statements selecting the same row set.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredQuery {
    pub select_sql: String,
    pub count_sql: String,
    filter_params: Vec<SqlValue>,
    pub page: PageRequest,
}

impl FilteredQuery {
    /// Builds both statements from the supplied query-string parameters.
    ///
    /// `page` and `limit` are read from `input` as well and coerced through
    /// [`PageRequest::parse`].
    pub fn build(spec: &ListSpec, input: &HashMap<String, String>) -> Result<Self, QueryError> {
        let mut predicates: Vec<String> = Vec::new();
        let mut params = Vec::new();

        if let Some(scope) = spec.scope {
            predicates.push(format!("({scope})"));
        }

        for filter in spec.filters {
            let Some(raw) = input.get(filter.param) else {
                continue;
            };
            match filter.predicate {
                Predicate::Equals { column, ty } => {
                    let value =
                        ty.parse_param(raw)
                            .ok_or_else(|| QueryError::InvalidFilterValue {
                                param: filter.param.to_string(),
                                value: raw.clone(),
                            })?;
                    predicates.push(format!("{column} = ?"));
                    params.push(value);
                }
                Predicate::SubstringMatch { columns } => {
                    let pattern = format!("%{}%", escape_like(raw));
                    let clause = columns
                        .iter()
                        .map(|column| format!("{column} LIKE ? ESCAPE '\\'"))
                        .collect::<Vec<_>>()
                        .join(" OR ");
                    predicates.push(format!("({clause})"));
                    params.extend(columns.iter().map(|_| SqlValue::Text(Some(pattern.clone()))));
                }
            }
        }

        let where_clause = if predicates.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", predicates.join(" AND "))
        };

        let page = PageRequest::parse(
            input.get("page").map(String::as_str),
            input.get("limit").map(String::as_str),
            spec.default_limit,
        );

        Ok(Self {
            select_sql: format!(
                "SELECT {} FROM {}{} ORDER BY {} LIMIT ? OFFSET ?",
                spec.columns, spec.table, where_clause, spec.order_by
            ),
            count_sql: format!("SELECT COUNT(*) AS count FROM {}{}", spec.table, where_clause),
            filter_params: params,
            page,
        })
    }

    /// Parameters of the fetch statement: the filter values followed by
    /// limit and offset.
    pub fn select_params(&self) -> Vec<SqlValue> {
        let mut params = self.filter_params.clone();
        params.push(SqlValue::Integer(Some(self.page.sql_limit())));
        params.push(SqlValue::Integer(Some(self.page.offset())));
        params
    }

    /// Parameters of the count statement.
    pub fn count_params(&self) -> &[SqlValue] {
        &self.filter_params
    }
}

/// One entry of a resource's update allow-list.
#[derive(Debug, Clone, Copy)]
pub struct UpdatableField {
    pub name: &'static str,
    pub ty: ColumnType,
}

impl UpdatableField {
    pub const fn new(name: &'static str, ty: ColumnType) -> Self {
        Self { name, ty }
    }
}

/// Static description of an updatable resource.
#[derive(Debug, Clone, Copy)]
pub struct UpdateSpec {
    pub table: &'static str,
    pub key_column: &'static str,
    pub fields: &'static [UpdatableField],
    /// Timestamp column set to `CURRENT_TIMESTAMP` on every update.
    pub touch: Option<&'static str>,
    pub returning: &'static str,
}

/// A partial `UPDATE ... RETURNING` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl UpdateStatement {
    /// Builds the statement from the allow-listed fields present in
    /// `payload`. The key is bound last.
    pub fn build(
        spec: &UpdateSpec,
        payload: &Map<String, Value>,
        key: SqlValue,
    ) -> Result<Self, QueryError> {
        let mut assignments = Vec::new();
        let mut params = Vec::new();

        for field in spec.fields {
            let Some(value) = payload.get(field.name) else {
                continue;
            };
            let value = field
                .ty
                .from_json(value)
                .ok_or_else(|| QueryError::InvalidFieldValue {
                    field: field.name.to_string(),
                })?;
            assignments.push(format!("{} = ?", field.name));
            params.push(value);
        }

        if assignments.is_empty() {
            return Err(QueryError::NoUpdatableFields);
        }

        if let Some(touch) = spec.touch {
            assignments.push(format!("{touch} = CURRENT_TIMESTAMP"));
        }
        params.push(key);

        Ok(Self {
            sql: format!(
                "UPDATE {} SET {} WHERE {} = ? RETURNING {}",
                spec.table,
                assignments.join(", "),
                spec.key_column,
                spec.returning
            ),
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const FILTERS: &[FilterField] = &[
        FilterField::equals("category_id", ColumnType::Integer),
        FilterField::equals("status", ColumnType::Text),
        FilterField::equals("is_popular", ColumnType::Bool),
        FilterField::substring("search", &["title", "short_description"]),
    ];

    const SPEC: ListSpec = ListSpec {
        table: "blogs",
        columns: "id, title",
        scope: None,
        filters: FILTERS,
        order_by: "created_at DESC",
        default_limit: 10,
    };

    const UPDATE: UpdateSpec = UpdateSpec {
        table: "blogs",
        key_column: "id",
        fields: &[
            UpdatableField::new("title", ColumnType::Text),
            UpdatableField::new("reading_time", ColumnType::Integer),
            UpdatableField::new("is_popular", ColumnType::Bool),
        ],
        touch: Some("updated_at"),
        returning: "id, title",
    };

    fn input(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn no_filters_yields_unfiltered_statements() {
        let query = FilteredQuery::build(&SPEC, &HashMap::new()).unwrap();

        assert_eq!(
            query.select_sql,
            "SELECT id, title FROM blogs ORDER BY created_at DESC LIMIT ? OFFSET ?"
        );
        assert_eq!(query.count_sql, "SELECT COUNT(*) AS count FROM blogs");
        assert!(query.count_params().is_empty());
        assert_eq!(
            query.select_params(),
            vec![SqlValue::Integer(Some(10)), SqlValue::Integer(Some(0))]
        );
    }

    #[test]
    fn filters_follow_allow_list_order_regardless_of_input_order() {
        let query = FilteredQuery::build(
            &SPEC,
            &input(&[("status", "published"), ("category_id", "4"), ("page", "2")]),
        )
        .unwrap();

        assert_eq!(
            query.count_sql,
            "SELECT COUNT(*) AS count FROM blogs WHERE category_id = ? AND status = ?"
        );
        assert_eq!(
            query.count_params(),
            &[
                SqlValue::Integer(Some(4)),
                SqlValue::Text(Some("published".to_string()))
            ]
        );
        assert_eq!(
            query.select_params(),
            vec![
                SqlValue::Integer(Some(4)),
                SqlValue::Text(Some("published".to_string())),
                SqlValue::Integer(Some(10)),
                SqlValue::Integer(Some(10)),
            ]
        );
    }

    #[test]
    fn fetch_and_count_share_the_where_clause() {
        let query = FilteredQuery::build(
            &SPEC,
            &input(&[("is_popular", "0"), ("search", "heart")]),
        )
        .unwrap();

        let where_clause = " WHERE is_popular = ? AND (title LIKE ? ESCAPE '\\' OR short_description LIKE ? ESCAPE '\\')";
        assert!(query.count_sql.ends_with(where_clause));
        assert!(
            query
                .select_sql
                .contains(&format!("{where_clause} ORDER BY"))
        );
    }

    #[test]
    fn falsy_values_still_apply_the_filter() {
        let query = FilteredQuery::build(&SPEC, &input(&[("is_popular", "false")])).unwrap();
        assert_eq!(query.count_params(), &[SqlValue::Bool(Some(false))]);

        let query = FilteredQuery::build(&SPEC, &input(&[("status", "")])).unwrap();
        assert_eq!(query.count_params(), &[SqlValue::Text(Some(String::new()))]);
    }

    #[test]
    fn substring_match_binds_one_wrapped_copy_per_column() {
        let query = FilteredQuery::build(&SPEC, &input(&[("search", "foo")])).unwrap();

        let wrapped = SqlValue::Text(Some("%foo%".to_string()));
        assert_eq!(query.count_params(), &[wrapped.clone(), wrapped]);
    }

    #[test]
    fn substring_match_escapes_wildcards() {
        let query = FilteredQuery::build(&SPEC, &input(&[("search", "50%_a\\b")])).unwrap();

        let escaped = SqlValue::Text(Some("%50\\%\\_a\\\\b%".to_string()));
        assert_eq!(query.count_params(), &[escaped.clone(), escaped]);
    }

    #[test]
    fn unknown_parameters_never_reach_the_sql() {
        let query = FilteredQuery::build(
            &SPEC,
            &input(&[("1=1; DROP TABLE blogs; --", "x"), ("author", "me")]),
        )
        .unwrap();

        assert!(!query.select_sql.contains("DROP"));
        assert!(!query.select_sql.contains("author"));
        assert!(query.count_params().is_empty());
    }

    #[test]
    fn values_are_never_interpolated() {
        let query =
            FilteredQuery::build(&SPEC, &input(&[("status", "x' OR '1'='1")])).unwrap();

        assert!(!query.count_sql.contains("OR '1'"));
        assert_eq!(
            query.count_params(),
            &[SqlValue::Text(Some("x' OR '1'='1".to_string()))]
        );
    }

    #[test]
    fn invalid_typed_values_are_rejected() {
        let err = FilteredQuery::build(&SPEC, &input(&[("category_id", "abc")])).unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidFilterValue {
                param: "category_id".to_string(),
                value: "abc".to_string(),
            }
        );

        let err = FilteredQuery::build(&SPEC, &input(&[("is_popular", "maybe")])).unwrap_err();
        assert!(matches!(err, QueryError::InvalidFilterValue { .. }));
    }

    #[test]
    fn scope_is_applied_before_filters() {
        let spec = ListSpec {
            scope: Some("role = 'INSTRUCTOR' OR is_instructor = 1"),
            ..SPEC
        };
        let query = FilteredQuery::build(&spec, &input(&[("status", "ACTIVE")])).unwrap();

        assert_eq!(
            query.count_sql,
            "SELECT COUNT(*) AS count FROM blogs WHERE (role = 'INSTRUCTOR' OR is_instructor = 1) AND status = ?"
        );
    }

    #[test]
    fn update_includes_only_present_fields_and_binds_key_last() {
        let payload = json!({"is_popular": true, "title": "New", "slug": "ignored"});
        let statement =
            UpdateStatement::build(&UPDATE, payload.as_object().unwrap(), SqlValue::Integer(Some(7)))
                .unwrap();

        assert_eq!(
            statement.sql,
            "UPDATE blogs SET title = ?, is_popular = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ? RETURNING id, title"
        );
        assert_eq!(
            statement.params,
            vec![
                SqlValue::Text(Some("New".to_string())),
                SqlValue::Bool(Some(true)),
                SqlValue::Integer(Some(7)),
            ]
        );
    }

    #[test]
    fn update_without_allowed_fields_fails() {
        let payload = json!({"slug": "x", "id": 3});
        let err =
            UpdateStatement::build(&UPDATE, payload.as_object().unwrap(), SqlValue::Integer(Some(1)))
                .unwrap_err();

        assert_eq!(err, QueryError::NoUpdatableFields);
    }

    #[test]
    fn update_null_sets_typed_null() {
        let payload = json!({"reading_time": null});
        let statement =
            UpdateStatement::build(&UPDATE, payload.as_object().unwrap(), SqlValue::Integer(Some(1)))
                .unwrap();

        assert_eq!(statement.params[0], SqlValue::Integer(None));
    }

    #[test]
    fn update_accepts_numeric_strings_and_flags() {
        let payload = json!({"reading_time": "12", "is_popular": 0});
        let statement =
            UpdateStatement::build(&UPDATE, payload.as_object().unwrap(), SqlValue::Integer(Some(1)))
                .unwrap();

        assert_eq!(
            statement.params[..2],
            [SqlValue::Integer(Some(12)), SqlValue::Bool(Some(false))]
        );
    }

    #[test]
    fn integers_outside_i32_are_rejected() {
        let payload = json!({"reading_time": 3_000_000_000_i64});
        let err =
            UpdateStatement::build(&UPDATE, payload.as_object().unwrap(), SqlValue::Integer(Some(1)))
                .unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidFieldValue {
                field: "reading_time".to_string()
            }
        );

        let payload = json!({"reading_time": "3000000000"});
        assert!(
            UpdateStatement::build(&UPDATE, payload.as_object().unwrap(), SqlValue::Integer(Some(1)))
                .is_err()
        );

        let err =
            FilteredQuery::build(&SPEC, &input(&[("category_id", "3000000000")])).unwrap_err();
        assert!(matches!(err, QueryError::InvalidFilterValue { .. }));
    }

    #[test]
    fn update_rejects_mistyped_values() {
        let payload = json!({"title": 42});
        let err =
            UpdateStatement::build(&UPDATE, payload.as_object().unwrap(), SqlValue::Integer(Some(1)))
                .unwrap_err();

        assert_eq!(
            err,
            QueryError::InvalidFieldValue {
                field: "title".to_string()
            }
        );
    }

    #[test]
    fn update_without_touch_column() {
        let spec = UpdateSpec {
            touch: None,
            ..UPDATE
        };
        let payload = json!({"title": "t"});
        let statement =
            UpdateStatement::build(&spec, payload.as_object().unwrap(), SqlValue::Integer(Some(1)))
                .unwrap();

        assert!(!statement.sql.contains("CURRENT_TIMESTAMP"));
    }
}
