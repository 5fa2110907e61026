use sqlx::{Postgres, postgres::PgArguments, query::Query, types::Uuid};

use crate::infrastructure::persistence::schema::{ColumnRef, Table};

/// High-level, composable query builder.
/// Every value ends up as a bound parameter, never inside the SQL text.
#[derive(Debug, Clone)]
pub struct QueryBuilder<'a> {
    from_table: Table<'a>,
    select: Vec<ColumnRef<'a>>,
    where_conditions: Vec<Condition<'a>>,
    order_by: Vec<OrderBy<'a>>,
    joins: Vec<Join<'a>>,
}

/// A where condition, top level conditions are AND'ed together
#[derive(Debug, Clone)]
pub enum Condition<'a> {
    /// field = value
    Equals {
        column: ColumnRef<'a>,
        value: ConditionValue,
    },

    /// field >= value
    GreaterThanOrEqual { column: ColumnRef<'a>, value: i64 },

    /// field <= value
    LessThanOrEqual { column: ColumnRef<'a>, value: i64 },

    /// field ILIKE '%value%', with LIKE wildcards in value escaped
    ContainsIgnoreCase { column: ColumnRef<'a>, value: String },

    /// array field && values
    Overlaps {
        column: ColumnRef<'a>,
        values: Vec<String>,
    },

    /// All conditions hold
    And(Vec<Condition<'a>>),

    /// Any condition holds
    Or(Vec<Condition<'a>>),
}

#[derive(Debug, Clone)]
pub enum ConditionValue {
    Text(String),
    Uuid(Uuid),
}

#[derive(Debug, Clone)]
pub struct OrderBy<'a> {
    pub column: ColumnRef<'a>,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone)]
pub struct Join<'a> {
    pub join_type: JoinType,
    pub target_table: Table<'a>,
    pub main_column: ColumnRef<'a>,
    pub target_column: ColumnRef<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum JoinType {
    Left,
}

impl<'a> From<Table<'a>> for QueryBuilder<'a> {
    fn from(value: Table<'a>) -> Self {
        QueryBuilder {
            from_table: value,
            select: vec![],
            where_conditions: vec![],
            order_by: vec![],
            joins: vec![],
        }
    }
}

impl<'a> QueryBuilder<'a> {
    /// Select specified columns
    pub fn select(mut self, columns: Vec<ColumnRef<'a>>) -> Self {
        self.select = columns;
        self
    }

    /// Add join clause
    pub fn join(mut self, join: Join<'a>) -> Self {
        self.joins.push(join);
        self
    }

    /// Add where condition
    pub fn where_condition(mut self, condition: Condition<'a>) -> Self {
        self.where_conditions.push(condition);
        self
    }

    /// Add order by clause
    pub fn order_by(mut self, column: ColumnRef<'a>, direction: SortDirection) -> Self {
        self.order_by.push(OrderBy { column, direction });
        self
    }

    /// Build the SQL query string
    pub fn build(self) -> (String, Vec<SqlParameter>) {
        let mut sql = String::new();
        let mut params = Vec::new();

        // SELECT clause
        sql.push_str("SELECT ");
        let columns: Vec<String> = self.select.iter().map(|c| c.qualified()).collect();
        sql.push_str(&columns.join(", "));

        // FROM clause
        sql.push_str(&format!("\nFROM {}", self.from_table.qualified()));

        // JOIN clauses
        for join in &self.joins {
            let join_keyword = match join.join_type {
                JoinType::Left => "LEFT JOIN",
            };
            sql.push_str(&format!(
                "\n{} {} ON {} = {}",
                join_keyword,
                join.target_table.qualified(),
                join.main_column.qualified(),
                join.target_column.qualified()
            ));
        }

        // WHERE clause
        if !self.where_conditions.is_empty() {
            sql.push_str("\nWHERE ");
            let where_clause = Condition::join_sql(&self.where_conditions, " AND ", &mut params);
            sql.push_str(&where_clause);
        }

        // ORDER BY clause
        if !self.order_by.is_empty() {
            sql.push_str("\nORDER BY ");
            let order_clauses: Vec<String> = self
                .order_by
                .iter()
                .map(|ob| {
                    let direction = match ob.direction {
                        SortDirection::Ascending => "ASC",
                        SortDirection::Descending => "DESC",
                    };
                    format!("{} {}", ob.column.qualified(), direction)
                })
                .collect();
            sql.push_str(&order_clauses.join(", "));
        }

        (sql, params)
    }
}

impl Condition<'_> {
    /// Renders the condition, pushing its values onto `params`.
    /// Placeholders are numbered after the parameters already collected.
    pub fn to_sql(&self, params: &mut Vec<SqlParameter>) -> String {
        match self {
            Condition::Equals { column, value } => {
                params.push(value.into());
                format!("{} = ${}", column.qualified(), params.len())
            }

            Condition::GreaterThanOrEqual { column, value } => {
                params.push(SqlParameter::Integer(*value));
                format!("{} >= ${}", column.qualified(), params.len())
            }

            Condition::LessThanOrEqual { column, value } => {
                params.push(SqlParameter::Integer(*value));
                format!("{} <= ${}", column.qualified(), params.len())
            }

            Condition::ContainsIgnoreCase { column, value } => {
                params.push(SqlParameter::Text(format!("%{}%", escape_like(value))));
                format!("{} ILIKE ${}", column.qualified(), params.len())
            }

            Condition::Overlaps { column, values } => {
                params.push(SqlParameter::TextArray(values.clone()));
                format!("{} && ${}", column.qualified(), params.len())
            }

            Condition::And(conditions) => {
                format!("({})", Self::join_sql(conditions, " AND ", params))
            }

            Condition::Or(conditions) => {
                format!("({})", Self::join_sql(conditions, " OR ", params))
            }
        }
    }

    fn join_sql(conditions: &[Condition<'_>], separator: &str, params: &mut Vec<SqlParameter>) -> String {
        conditions
            .iter()
            .map(|condition| condition.to_sql(params))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Makes `%`, `_` and `\` match themselves in a LIKE pattern
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl From<&ConditionValue> for SqlParameter {
    fn from(value: &ConditionValue) -> Self {
        match value {
            ConditionValue::Text(s) => SqlParameter::Text(s.clone()),
            ConditionValue::Uuid(u) => SqlParameter::Uuid(*u),
        }
    }
}

// SQL parameter that will be bound to query
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParameter {
    Text(String),
    Integer(i64),
    Uuid(Uuid),
    TextArray(Vec<String>),
}

impl SqlParameter {
    /// Bind to sqlx query
    pub fn bind_to_query<'q>(
        self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        match self {
            SqlParameter::Text(s) => query.bind(s),
            SqlParameter::Integer(i) => query.bind(i),
            SqlParameter::Uuid(u) => query.bind(u),
            SqlParameter::TextArray(values) => query.bind(values),
        }
    }
}
