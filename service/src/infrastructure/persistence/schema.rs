use std::borrow::Cow;

use qanda_common::{
    ANSWERS_TABLE_NAME, AUTHOR_ID_FIELD_NAME, BODY_FIELD_NAME, CREATED_FIELD_NAME, ID_FIELD_NAME,
    QUESTION_ID_FIELD_NAME, QUESTIONS_TABLE_NAME, STATUS_FIELD_NAME, TAGS_FIELD_NAME,
    TITLE_FIELD_NAME, UPDATED_FIELD_NAME, UPVOTES_FIELD_NAME, USERNAME_FIELD_NAME,
    USERS_TABLE_NAME,
};

// Represents a table in database
#[derive(Debug, Clone)]
pub struct Table<'a> {
    pub name: &'a str,
    pub alias: &'static str,
}

impl Table<'_> {
    /// Get qualified table name with alias
    pub fn qualified(&self) -> String {
        format!("\"{}\" AS \"{}\"", self.name, self.alias)
    }
}

/// Represents one column in the database table
#[derive(Debug, Clone)]
pub struct Column<'a> {
    pub qualifier: &'static str,
    pub name: &'a str,
}

impl Column<'_> {
    /// Get qualified column name
    pub fn qualified(&self) -> String {
        format!("\"{}\".\"{}\"", self.qualifier, self.name)
    }
}

/// Column reference which can be either borrowed or owned
pub type ColumnRef<'a> = Cow<'a, Column<'a>>;

// Tables

pub const QUESTIONS_TABLE: Table<'static> = Table {
    name: QUESTIONS_TABLE_NAME,
    alias: "q",
};
pub const ANSWERS_TABLE: Table<'static> = Table {
    name: ANSWERS_TABLE_NAME,
    alias: "a",
};
pub const USERS_TABLE: Table<'static> = Table {
    name: USERS_TABLE_NAME,
    alias: "u",
};

// Question columns

pub const QUESTION_ID_COLUMN: Column<'static> = Column {
    qualifier: "q",
    name: ID_FIELD_NAME,
};
pub const QUESTION_TITLE_COLUMN: Column<'static> = Column {
    qualifier: "q",
    name: TITLE_FIELD_NAME,
};
pub const QUESTION_BODY_COLUMN: Column<'static> = Column {
    qualifier: "q",
    name: BODY_FIELD_NAME,
};
pub const QUESTION_TAGS_COLUMN: Column<'static> = Column {
    qualifier: "q",
    name: TAGS_FIELD_NAME,
};
pub const QUESTION_STATUS_COLUMN: Column<'static> = Column {
    qualifier: "q",
    name: STATUS_FIELD_NAME,
};
pub const QUESTION_UPVOTES_COLUMN: Column<'static> = Column {
    qualifier: "q",
    name: UPVOTES_FIELD_NAME,
};
pub const QUESTION_AUTHOR_COLUMN: Column<'static> = Column {
    qualifier: "q",
    name: AUTHOR_ID_FIELD_NAME,
};
pub const QUESTION_CREATED_COLUMN: Column<'static> = Column {
    qualifier: "q",
    name: CREATED_FIELD_NAME,
};
pub const QUESTION_UPDATED_COLUMN: Column<'static> = Column {
    qualifier: "q",
    name: UPDATED_FIELD_NAME,
};

// Answer columns

pub const ANSWER_ID_COLUMN: Column<'static> = Column {
    qualifier: "a",
    name: ID_FIELD_NAME,
};
pub const ANSWER_QUESTION_COLUMN: Column<'static> = Column {
    qualifier: "a",
    name: QUESTION_ID_FIELD_NAME,
};
pub const ANSWER_BODY_COLUMN: Column<'static> = Column {
    qualifier: "a",
    name: BODY_FIELD_NAME,
};
pub const ANSWER_AUTHOR_COLUMN: Column<'static> = Column {
    qualifier: "a",
    name: AUTHOR_ID_FIELD_NAME,
};
pub const ANSWER_CREATED_COLUMN: Column<'static> = Column {
    qualifier: "a",
    name: CREATED_FIELD_NAME,
};

// User columns

pub const USER_ID_COLUMN: Column<'static> = Column {
    qualifier: "u",
    name: ID_FIELD_NAME,
};
pub const USER_NAME_COLUMN: Column<'static> = Column {
    qualifier: "u",
    name: USERNAME_FIELD_NAME,
};
