pub mod database;
pub mod domain;
pub mod test_utils;

// Persisted table names

pub const USERS_TABLE_NAME: &str = "users";
pub const QUESTIONS_TABLE_NAME: &str = "questions";
pub const ANSWERS_TABLE_NAME: &str = "answers";

// Persisted field names

pub const ID_FIELD_NAME: &str = "id";
pub const USERNAME_FIELD_NAME: &str = "username";
pub const API_TOKEN_FIELD_NAME: &str = "api_token";

pub const TITLE_FIELD_NAME: &str = "title";
pub const BODY_FIELD_NAME: &str = "body";
pub const TAGS_FIELD_NAME: &str = "tags";
pub const STATUS_FIELD_NAME: &str = "status";
pub const UPVOTES_FIELD_NAME: &str = "upvotes";
pub const AUTHOR_ID_FIELD_NAME: &str = "author_id";
pub const QUESTION_ID_FIELD_NAME: &str = "question_id";

pub const CREATED_FIELD_NAME: &str = "created_at";
pub const UPDATED_FIELD_NAME: &str = "updated_at";

// expose domain module

pub use domain::*;

// expose database module

pub use database::connect as connect_to_database;
