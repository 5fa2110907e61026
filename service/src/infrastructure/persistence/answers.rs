use std::borrow::Cow;

use chrono::{DateTime, Utc};
use qanda_common::{
    AUTHOR_ID_FIELD_NAME, AnswerBody, AnswerId, BODY_FIELD_NAME, CREATED_FIELD_NAME,
    ID_FIELD_NAME, QUESTION_ID_FIELD_NAME, QuestionId, USERNAME_FIELD_NAME, database::Database,
};
use sqlx::{postgres::PgRow, types::Uuid};

use crate::{
    domain::{
        answer::{Answer, NewAnswer},
        question::Author,
        repository::{AnswerRepository, RepositoryError},
    },
    infrastructure::persistence::{
        database_error,
        query::{Condition, ConditionValue, Join, JoinType, QueryBuilder, SortDirection},
        questions::try_get,
        schema::*,
    },
};

// insert and read back with the author's name in one round trip
const INSERT_SQL: &str = "WITH \"a\" AS (
    INSERT INTO \"answers\" (\"question_id\", \"body\", \"author_id\")
    VALUES ($1, $2, $3)
    RETURNING \"id\", \"question_id\", \"body\", \"author_id\", \"created_at\"
)
SELECT \"a\".\"id\", \"a\".\"question_id\", \"a\".\"body\", \"a\".\"author_id\", \"a\".\"created_at\", \"u\".\"username\"
FROM \"a\"
LEFT JOIN \"users\" AS \"u\" ON \"a\".\"author_id\" = \"u\".\"id\"";

#[derive(Clone, Debug)]
pub struct PostgresAnswerRepository {
    database: &'static Database,
}

impl PostgresAnswerRepository {
    pub fn new(database: &'static Database) -> Self {
        Self { database }
    }
}

impl AnswerRepository for PostgresAnswerRepository {
    async fn insert(&self, answer: NewAnswer) -> Result<Answer, RepositoryError> {
        let row = sqlx::query(INSERT_SQL)
            .bind(Uuid::from(answer.question_id))
            .bind(answer.body.into_inner())
            .bind(Uuid::from(answer.author_id))
            .fetch_one(self.database.database_pool())
            .await
            .map_err(|e| database_error("failed to insert answer", e))?;

        row_to_answer(&row)
    }

    async fn find_by_question(&self, question_id: QuestionId) -> Result<Vec<Answer>, RepositoryError> {
        let (sql, params) = select_for_question(question_id).build();
        tracing::debug!("Generated SQL: {}", sql);

        let mut query_object = sqlx::query(&sql);
        for param in params {
            query_object = param.bind_to_query(query_object);
        }

        let rows = query_object
            .fetch_all(self.database.database_pool())
            .await
            .map_err(|e| database_error("failed to select answers", e))?;

        rows.iter().map(row_to_answer).collect()
    }
}

/// Answers of one question, oldest first, with their author's username
fn select_for_question(question_id: QuestionId) -> QueryBuilder<'static> {
    QueryBuilder::from(ANSWERS_TABLE)
        .select(vec![
            Cow::Borrowed(&ANSWER_ID_COLUMN),
            Cow::Borrowed(&ANSWER_QUESTION_COLUMN),
            Cow::Borrowed(&ANSWER_BODY_COLUMN),
            Cow::Borrowed(&ANSWER_AUTHOR_COLUMN),
            Cow::Borrowed(&ANSWER_CREATED_COLUMN),
            Cow::Borrowed(&USER_NAME_COLUMN),
        ])
        .join(Join {
            join_type: JoinType::Left,
            target_table: USERS_TABLE,
            main_column: Cow::Borrowed(&ANSWER_AUTHOR_COLUMN),
            target_column: Cow::Borrowed(&USER_ID_COLUMN),
        })
        .where_condition(Condition::Equals {
            column: Cow::Borrowed(&ANSWER_QUESTION_COLUMN),
            value: ConditionValue::Uuid(question_id.into()),
        })
        .order_by(Cow::Borrowed(&ANSWER_CREATED_COLUMN), SortDirection::Ascending)
}

fn row_to_answer(row: &PgRow) -> Result<Answer, RepositoryError> {
    let id: Uuid = try_get(row, ID_FIELD_NAME)?;
    let question_id: Uuid = try_get(row, QUESTION_ID_FIELD_NAME)?;
    let body: String = try_get(row, BODY_FIELD_NAME)?;
    let author_id: Uuid = try_get(row, AUTHOR_ID_FIELD_NAME)?;
    let created_at: DateTime<Utc> = try_get(row, CREATED_FIELD_NAME)?;
    let username: Option<String> = try_get(row, USERNAME_FIELD_NAME)?;

    let body = AnswerBody::try_new(body).map_err(|e| {
        RepositoryError::DatabaseError(format!("answer {} has invalid body: {}", id, e))
    })?;

    Ok(Answer {
        id: AnswerId::from(id),
        question_id: QuestionId::from(question_id),
        body,
        author: Author {
            id: author_id.into(),
            username,
        },
        created_at,
    })
}
