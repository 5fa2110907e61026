use qanda_common::{
    ANSWERS_TABLE_NAME, API_TOKEN_FIELD_NAME, AUTHOR_ID_FIELD_NAME, BODY_FIELD_NAME,
    CREATED_FIELD_NAME, ID_FIELD_NAME, QUESTION_ID_FIELD_NAME, QUESTIONS_TABLE_NAME,
    STATUS_FIELD_NAME, TAGS_FIELD_NAME, TITLE_FIELD_NAME, UPDATED_FIELD_NAME,
    UPVOTES_FIELD_NAME, USERNAME_FIELD_NAME, USERS_TABLE_NAME,
};

/// Represents table in a database, used for ddl generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub foreign_keys: Vec<ForeignKeyConstraint>,
    pub indexes: Vec<Index>,
}

/// Represents one column in the database table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub column_type: String,
    pub not_null: bool,
    pub unique: bool,
    pub primary_key: bool,
    pub default_value: Option<String>,
}

/// Represents foreign key constraint in the database table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyConstraint {
    pub table_name: String,
    pub column_name: String,
    pub referenced_table_name: String,
    pub referenced_column_name: String,
}

/// Represents an index in the database table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub table_name: String,
    pub columns: Vec<String>,
    pub unique: bool,
    /// Index access method, btree when `None`
    pub method: Option<String>,
}

impl Table {
    pub fn new(
        name: impl Into<String>,
        columns: Vec<Column>,
        foreign_keys: Vec<ForeignKeyConstraint>,
        indexes: Vec<Index>,
    ) -> Self {
        Self {
            name: name.into(),
            columns,
            foreign_keys,
            indexes,
        }
    }
}

impl Column {
    pub fn new<T: Into<String>>(
        name: T,
        column_type: T,
        not_null: bool,
        unique: bool,
        default_value: Option<T>,
    ) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            not_null,
            unique,
            primary_key: false,
            default_value: default_value.map(T::into),
        }
    }

    /// UUID key generated by the database
    pub fn uuid_primary_key<T: Into<String>>(name: T) -> Self {
        Self {
            name: name.into(),
            column_type: "UUID".to_string(),
            not_null: true,
            unique: false,
            primary_key: true,
            default_value: Some("gen_random_uuid()".to_string()),
        }
    }

    fn created_at() -> Self {
        Column::new(CREATED_FIELD_NAME, "TIMESTAMPTZ", true, false, Some("now()"))
    }
}

impl ForeignKeyConstraint {
    pub fn new<T: Into<String>>(
        table_name: T,
        column_name: T,
        referenced_table_name: T,
        referenced_column_name: T,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            column_name: column_name.into(),
            referenced_table_name: referenced_table_name.into(),
            referenced_column_name: referenced_column_name.into(),
        }
    }
}

impl Index {
    pub fn new<T: Into<String>>(table_name: T, columns: Vec<T>, unique: bool) -> Self {
        Self {
            table_name: table_name.into(),
            columns: columns.into_iter().map(T::into).collect(),
            unique,
            method: None,
        }
    }

    pub fn using(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }
}

/// Tables the service works with, referenced tables first.
///
/// Author ids are not constrained: users are provisioned outside the
/// service and content outlives the account that wrote it.
pub fn application_tables() -> Vec<Table> {
    vec![users_table(), questions_table(), answers_table()]
}

fn users_table() -> Table {
    Table::new(
        USERS_TABLE_NAME,
        vec![
            Column::uuid_primary_key(ID_FIELD_NAME),
            Column::new(USERNAME_FIELD_NAME, "TEXT", true, true, None),
            Column::new(API_TOKEN_FIELD_NAME, "TEXT", true, true, None),
            Column::created_at(),
        ],
        Vec::new(),
        Vec::new(),
    )
}

fn questions_table() -> Table {
    Table::new(
        QUESTIONS_TABLE_NAME,
        vec![
            Column::uuid_primary_key(ID_FIELD_NAME),
            Column::new(TITLE_FIELD_NAME, "TEXT", true, false, None),
            Column::new(BODY_FIELD_NAME, "TEXT", true, false, None),
            Column::new(TAGS_FIELD_NAME, "TEXT[]", true, false, None),
            Column::new(STATUS_FIELD_NAME, "TEXT", true, false, Some("'open'")),
            Column::new(UPVOTES_FIELD_NAME, "BIGINT", true, false, Some("0")),
            Column::new(AUTHOR_ID_FIELD_NAME, "UUID", true, false, None),
            Column::created_at(),
            Column::new(UPDATED_FIELD_NAME, "TIMESTAMPTZ", false, false, None),
        ],
        Vec::new(),
        vec![
            Index::new(QUESTIONS_TABLE_NAME, vec![CREATED_FIELD_NAME], false),
            Index::new(QUESTIONS_TABLE_NAME, vec![AUTHOR_ID_FIELD_NAME], false),
            Index::new(QUESTIONS_TABLE_NAME, vec![TAGS_FIELD_NAME], false).using("GIN"),
        ],
    )
}

fn answers_table() -> Table {
    Table::new(
        ANSWERS_TABLE_NAME,
        vec![
            Column::uuid_primary_key(ID_FIELD_NAME),
            Column::new(QUESTION_ID_FIELD_NAME, "UUID", true, false, None),
            Column::new(BODY_FIELD_NAME, "TEXT", true, false, None),
            Column::new(AUTHOR_ID_FIELD_NAME, "UUID", true, false, None),
            Column::created_at(),
        ],
        vec![ForeignKeyConstraint::new(
            ANSWERS_TABLE_NAME,
            QUESTION_ID_FIELD_NAME,
            QUESTIONS_TABLE_NAME,
            ID_FIELD_NAME,
        )],
        vec![Index::new(
            ANSWERS_TABLE_NAME,
            vec![QUESTION_ID_FIELD_NAME, CREATED_FIELD_NAME],
            false,
        )],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referenced_tables_come_first() {
        let names: Vec<_> = application_tables().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["users", "questions", "answers"]);
    }

    #[test]
    fn every_table_has_a_generated_uuid_key() {
        for table in application_tables() {
            let keys: Vec<_> = table.columns.iter().filter(|c| c.primary_key).collect();
            assert_eq!(keys.len(), 1, "{}", table.name);
            assert_eq!(keys[0].name, "id");
            assert_eq!(keys[0].default_value.as_deref(), Some("gen_random_uuid()"));
        }
    }

    #[test]
    fn foreign_keys_point_at_earlier_tables() {
        let tables = application_tables();
        for (position, table) in tables.iter().enumerate() {
            for fk in &table.foreign_keys {
                assert!(
                    tables[..position].iter().any(|t| t.name == fk.referenced_table_name),
                    "{} references {} before it exists",
                    table.name,
                    fk.referenced_table_name
                );
            }
        }
    }
}
