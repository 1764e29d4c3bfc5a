//! Parameterized `WHERE` clause builder shared by list queries.
//!
//! Each list endpoint accepts a handful of optional filters. Instead of
//! assembling SQL per repository, repositories push the filters that are
//! present onto a [`FilterBuilder`], render the clause with positional
//! placeholders, and bind the collected values in order.

use mentorhub_core::search::contains_pattern;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;

/// Typed bind value for dynamically-built queries.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    BigInt(i64),
    SmallInt(i16),
    Int(i32),
    Text(String),
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        BindValue::BigInt(v)
    }
}

impl From<i16> for BindValue {
    fn from(v: i16) -> Self {
        BindValue::SmallInt(v)
    }
}

impl From<i32> for BindValue {
    fn from(v: i32) -> Self {
        BindValue::Int(v)
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        BindValue::Text(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        BindValue::Text(v.to_string())
    }
}

/// Accumulates `AND`-joined conditions and their bind values.
#[derive(Debug, Default)]
pub struct FilterBuilder {
    conditions: Vec<String>,
    binds: Vec<BindValue>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The placeholder the next bound value will occupy.
    fn next_placeholder(&self) -> String {
        format!("${}", self.binds.len() + 1)
    }

    /// `column = $n` when `value` is present.
    pub fn eq<V: Into<BindValue>>(&mut self, column: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            let placeholder = self.next_placeholder();
            self.conditions.push(format!("{column} = {placeholder}"));
            self.binds.push(value.into());
        }
        self
    }

    /// Case-insensitive substring match across one or more columns.
    ///
    /// All columns share a single bind: `(a ILIKE $n OR b ILIKE $n)`.
    pub fn search(&mut self, columns: &[&str], term: Option<&str>) -> &mut Self {
        let Some(term) = term else {
            return self;
        };
        if columns.is_empty() {
            return self;
        }
        let placeholder = self.next_placeholder();
        let ors: Vec<String> = columns
            .iter()
            .map(|c| format!("{c} ILIKE {placeholder}"))
            .collect();
        self.conditions.push(format!("({})", ors.join(" OR ")));
        self.binds.push(BindValue::Text(contains_pattern(term)));
        self
    }

    /// A condition template with a single `{}` slot for the bound value.
    ///
    /// Used for join-table filters such as
    /// `EXISTS (SELECT 1 FROM project_tags pt WHERE pt.project_id = p.id AND pt.tag_id = {})`.
    pub fn with_value<V: Into<BindValue>>(&mut self, template: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            let placeholder = self.next_placeholder();
            self.conditions.push(template.replace("{}", &placeholder));
            self.binds.push(value.into());
        }
        self
    }

    /// A fixed predicate with no bound values.
    pub fn raw(&mut self, condition: &str) -> &mut Self {
        self.conditions.push(condition.to_string());
        self
    }

    /// `WHERE ...` or an empty string when no filter is active.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Index of the next positional parameter, for trailing `LIMIT`/`OFFSET`.
    pub fn next_index(&self) -> usize {
        self.binds.len() + 1
    }

    pub fn binds(&self) -> &[BindValue] {
        &self.binds
    }

    /// Bind every collected value onto a `query_as`.
    pub fn bind_to<'q, O>(
        &'q self,
        mut q: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for val in &self.binds {
            q = match val {
                BindValue::BigInt(v) => q.bind(*v),
                BindValue::SmallInt(v) => q.bind(*v),
                BindValue::Int(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
            };
        }
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_renders_no_clause() {
        let f = FilterBuilder::new();
        assert_eq!(f.where_clause(), "");
        assert_eq!(f.next_index(), 1);
    }

    #[test]
    fn absent_values_are_skipped() {
        let mut f = FilterBuilder::new();
        f.eq::<i64>("p.status_id", None)
            .search(&["p.project_name"], None)
            .with_value::<i64>("x = {}", None);
        assert_eq!(f.where_clause(), "");
        assert!(f.binds().is_empty());
    }

    #[test]
    fn placeholders_follow_push_order() {
        let mut f = FilterBuilder::new();
        f.eq("p.status_id", Some(2i16))
            .search(&["p.project_name", "p.project_code"], Some("solar"))
            .with_value(
                "EXISTS (SELECT 1 FROM project_tags pt WHERE pt.project_id = p.id AND pt.tag_id = {})",
                Some(9i64),
            );

        assert_eq!(
            f.where_clause(),
            "WHERE p.status_id = $1 \
             AND (p.project_name ILIKE $2 OR p.project_code ILIKE $2) \
             AND EXISTS (SELECT 1 FROM project_tags pt WHERE pt.project_id = p.id AND pt.tag_id = $3)"
        );
        assert_eq!(
            f.binds(),
            &[
                BindValue::SmallInt(2),
                BindValue::Text("%solar%".into()),
                BindValue::BigInt(9),
            ]
        );
        assert_eq!(f.next_index(), 4);
    }

    #[test]
    fn raw_conditions_take_no_placeholder() {
        let mut f = FilterBuilder::new();
        f.raw("rfp.status = 'approved'").eq("rfp.project_id", Some(3i64));
        assert_eq!(
            f.where_clause(),
            "WHERE rfp.status = 'approved' AND rfp.project_id = $1"
        );
    }
}
