use sea_query::{Alias, Expr, Iden, PostgresQueryBuilder, Query, Value};

use crate::errors::dberrors::RepositoryError;

/* ----------------------------- FLUENT BUILDER WRAPPER ----------------------------- */

// Helper to check if a Value is None (NULL)
fn is_value_none(val: &Value) -> bool {
    matches!(
        val,
        Value::Bool(None)
            | Value::TinyInt(None)
            | Value::SmallInt(None)
            | Value::Int(None)
            | Value::BigInt(None)
            | Value::TinyUnsigned(None)
            | Value::SmallUnsigned(None)
            | Value::Unsigned(None)
            | Value::BigUnsigned(None)
            | Value::Float(None)
            | Value::Double(None)
            | Value::String(None)
            | Value::Char(None)
            | Value::Bytes(None)
    )
}

// Filters must carry a value; a NULL key would otherwise widen the statement
fn checked_filters(
    filters: Vec<(Alias, Value)>,
) -> Result<Vec<(Alias, Value)>, RepositoryError> {
    match filters.iter().find(|(_, val)| is_value_none(val)) {
        Some((col, _)) => Err(RepositoryError::ValidationFailed(format!(
            "filter on {} has no value",
            Iden::to_string(col)
        ))),
        None => Ok(filters),
    }
}

// --- INSERT ---

pub struct FluentInsert {
    table: Alias,
    values: Vec<(Alias, Value)>,
    returning: Vec<Alias>,
}

impl FluentInsert {
    pub fn into<T: Iden>(table: T) -> Self {
        Self {
            table: Alias::new(table.to_string()),
            values: vec![],
            returning: vec![],
        }
    }

    pub fn value<C: Iden, V: Into<Value>>(mut self, col: C, v: V) -> Self {
        let val: Value = v.into();
        if !is_value_none(&val) {
            self.values.push((Alias::new(col.to_string()), val));
        }
        self
    }

    pub fn returning<C: Iden>(mut self, col: C) -> Self {
        self.returning.push(Alias::new(col.to_string()));
        self
    }

    pub fn render(self) -> (String, sea_query::Values) {
        let mut query = Query::insert();
        query.into_table(self.table);

        // Unzip columns and values
        let (cols, vals): (Vec<Alias>, Vec<Value>) = self.values.into_iter().unzip();

        query.columns(cols);
        query.values_panic(vals.into_iter().map(sea_query::SimpleExpr::Value));

        if !self.returning.is_empty() {
            query.returning(Query::returning().columns(self.returning));
        }

        query.build(PostgresQueryBuilder)
    }
}

// --- SELECT ---

pub struct FluentSelect {
    table: Alias,
    columns: Vec<Alias>,
    filters: Vec<(Alias, Value)>,
}

impl FluentSelect {
    pub fn from<T: Iden>(table: T) -> Self {
        Self {
            table: Alias::new(table.to_string()),
            columns: vec![],
            filters: vec![],
        }
    }

    pub fn column<C: Iden>(mut self, col: C) -> Self {
        self.columns.push(Alias::new(col.to_string()));
        self
    }

    pub fn filter<C: Iden, V: Into<Value>>(mut self, col: C, v: V) -> Self {
        self.filters.push((Alias::new(col.to_string()), v.into()));
        self
    }

    pub fn render(self) -> Result<(String, sea_query::Values), RepositoryError> {
        let filters = checked_filters(self.filters)?;

        let mut query = Query::select();
        query.from(self.table);
        query.columns(self.columns);

        for (col, val) in filters {
            query.and_where(Expr::col(col).eq(val));
        }

        Ok(query.build(PostgresQueryBuilder))
    }
}

// --- UPDATE ---

pub struct FluentUpdate {
    table: Alias,
    values: Vec<(Alias, Value)>,
    filters: Vec<(Alias, Value)>,
    returning: Vec<Alias>,
}

impl FluentUpdate {
    pub fn table<T: Iden>(table: T) -> Self {
        Self {
            table: Alias::new(table.to_string()),
            values: vec![],
            filters: vec![],
            returning: vec![],
        }
    }

    pub fn value<C: Iden, V: Into<Value>>(mut self, col: C, v: V) -> Self {
        // Unset columns are left untouched
        let val: Value = v.into();
        if !is_value_none(&val) {
            self.values.push((Alias::new(col.to_string()), val));
        }
        self
    }

    pub fn filter<C: Iden, V: Into<Value>>(mut self, col: C, v: V) -> Self {
        self.filters.push((Alias::new(col.to_string()), v.into()));
        self
    }

    pub fn returning<C: Iden>(mut self, col: C) -> Self {
        self.returning.push(Alias::new(col.to_string()));
        self
    }

    /// Fails unless every row filter carries a value; an update without a
    /// filter is refused outright
    pub fn render(self) -> Result<(String, sea_query::Values), RepositoryError> {
        let filters = checked_filters(self.filters)?;
        if filters.is_empty() {
            return Err(RepositoryError::ValidationFailed(
                "update without a row filter".to_string(),
            ));
        }

        let mut query = Query::update();
        query.table(self.table);

        query.values(
            self.values
                .into_iter()
                .map(|(col, val)| (col, sea_query::SimpleExpr::Value(val))),
        );

        for (col, val) in filters {
            query.and_where(Expr::col(col).eq(val));
        }

        if !self.returning.is_empty() {
            query.returning(Query::returning().columns(self.returning));
        }

        Ok(query.build(PostgresQueryBuilder))
    }
}

// --- DELETE ---

pub struct FluentDelete {
    table: Alias,
    filters: Vec<(Alias, Value)>,
}

impl FluentDelete {
    pub fn from<T: Iden>(table: T) -> Self {
        Self {
            table: Alias::new(table.to_string()),
            filters: vec![],
        }
    }

    pub fn filter<C: Iden, V: Into<Value>>(mut self, col: C, v: V) -> Self {
        self.filters.push((Alias::new(col.to_string()), v.into()));
        self
    }

    /// Same filter rules as `FluentUpdate::render`
    pub fn render(self) -> Result<(String, sea_query::Values), RepositoryError> {
        let filters = checked_filters(self.filters)?;
        if filters.is_empty() {
            return Err(RepositoryError::ValidationFailed(
                "delete without a row filter".to_string(),
            ));
        }

        let mut query = Query::delete();
        query.from_table(self.table);

        for (col, val) in filters {
            query.and_where(Expr::col(col).eq(val));
        }

        Ok(query.build(PostgresQueryBuilder))
    }
}

/* ----------------------------- SQLX BINDING ----------------------------- */

/// Bind rendered sea-query values onto a sqlx Postgres query, in order
#[cfg(feature = "sqlx")]
#[allow(unreachable_patterns)]
pub fn bind_query<'a>(
    mut query: sqlx::query::Query<'a, sqlx::Postgres, sqlx::postgres::PgArguments>,
    values: sea_query::Values,
) -> Result<
    sqlx::query::Query<'a, sqlx::Postgres, sqlx::postgres::PgArguments>,
    RepositoryError,
> {
    for value in values.0 {
        query = match value {
            Value::Bool(v) => query.bind(v),
            Value::TinyInt(v) => query.bind(v.map(i16::from)),
            Value::SmallInt(v) => query.bind(v),
            Value::Int(v) => query.bind(v),
            Value::BigInt(v) => query.bind(v),
            Value::TinyUnsigned(v) => query.bind(v.map(i16::from)),
            Value::SmallUnsigned(v) => query.bind(v.map(i32::from)),
            Value::Unsigned(v) => query.bind(v.map(i64::from)),
            Value::Float(v) => query.bind(v),
            Value::Double(v) => query.bind(v),
            Value::String(v) => query.bind(v.map(|s| *s)),
            Value::Char(v) => query.bind(v.map(|c| c.to_string())),
            Value::Bytes(v) => query.bind(v.map(|b| *b)),
            other => {
                return Err(RepositoryError::Store(format!(
                    "unsupported bind value: {:?}",
                    other
                )));
            }
        };
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datalayer::CRUD::types::Customers;

    #[test]
    fn test_insert_with_returning() {
        let (sql, values) = FluentInsert::into(Customers::Table)
            .value(Customers::Id, "1")
            .value(Customers::Name, "user01")
            .value(Customers::Age, 18i64)
            .returning(Customers::Id)
            .returning(Customers::Name)
            .returning(Customers::Age)
            .render();

        assert_eq!(
            sql,
            r#"INSERT INTO "customers" ("id", "name", "age") VALUES ($1, $2, $3) RETURNING "id", "name", "age""#
        );
        assert_eq!(values.0.len(), 3);
    }

    #[test]
    fn test_insert_skips_none_values() {
        let (sql, values) = FluentInsert::into(Customers::Table)
            .value(Customers::Name, "user01")
            .value(Customers::Id, Option::<String>::None)
            .render();

        assert!(!sql.contains("\"id\""));
        assert_eq!(values.0.len(), 1);
    }

    #[test]
    fn test_select_all_columns() {
        let (sql, values) = FluentSelect::from(Customers::Table)
            .column(Customers::Id)
            .column(Customers::Name)
            .column(Customers::Age)
            .render()
            .unwrap();

        assert_eq!(sql, r#"SELECT "id", "name", "age" FROM "customers""#);
        assert!(values.0.is_empty());
    }

    #[test]
    fn test_select_by_id() {
        let (sql, values) = FluentSelect::from(Customers::Table)
            .column(Customers::Id)
            .filter(Customers::Id, "42")
            .render()
            .unwrap();

        assert_eq!(sql, r#"SELECT "id" FROM "customers" WHERE "id" = $1"#);
        assert_eq!(values.0, vec![Value::from("42")]);
    }

    #[test]
    fn test_update_by_id() {
        let (sql, values) = FluentUpdate::table(Customers::Table)
            .value(Customers::Name, "renamed")
            .value(Customers::Age, 20i64)
            .filter(Customers::Id, "1")
            .returning(Customers::Id)
            .render()
            .unwrap();

        assert_eq!(
            sql,
            r#"UPDATE "customers" SET "name" = $1, "age" = $2 WHERE "id" = $3 RETURNING "id""#
        );
        assert_eq!(values.0.len(), 3);
    }

    #[test]
    fn test_delete_by_id() {
        let (sql, values) = FluentDelete::from(Customers::Table)
            .filter(Customers::Id, "1")
            .render()
            .unwrap();

        assert_eq!(sql, r#"DELETE FROM "customers" WHERE "id" = $1"#);
        assert_eq!(values.0.len(), 1);
    }

    #[test]
    fn test_delete_rejects_null_key() {
        let err = FluentDelete::from(Customers::Table)
            .filter(Customers::Id, Option::<String>::None)
            .render()
            .unwrap_err();

        assert_eq!(
            err,
            RepositoryError::ValidationFailed("filter on id has no value".to_string())
        );
    }

    #[test]
    fn test_delete_without_filter_is_refused() {
        assert!(FluentDelete::from(Customers::Table).render().is_err());
    }

    #[test]
    fn test_update_and_select_reject_null_key() {
        let update = FluentUpdate::table(Customers::Table)
            .value(Customers::Age, 20i64)
            .filter(Customers::Id, Option::<String>::None)
            .render();
        assert!(matches!(update, Err(RepositoryError::ValidationFailed(_))));

        let select = FluentSelect::from(Customers::Table)
            .column(Customers::Id)
            .filter(Customers::Id, Option::<String>::None)
            .render();
        assert!(matches!(select, Err(RepositoryError::ValidationFailed(_))));
    }
}
