use std::borrow::Cow;

use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use qanda_common::{
    AUTHOR_ID_FIELD_NAME, BODY_FIELD_NAME, CREATED_FIELD_NAME, ID_FIELD_NAME, QuestionBody,
    QuestionId, QuestionStatus, QuestionTitle, STATUS_FIELD_NAME, TAGS_FIELD_NAME,
    TITLE_FIELD_NAME, Tag, UPDATED_FIELD_NAME, UPVOTES_FIELD_NAME, USERNAME_FIELD_NAME,
    database::Database,
};
use sqlx::{Row, postgres::PgRow, types::Uuid};

use crate::{
    domain::{
        question::{Author, NewQuestion, Question},
        repository::{
            QuestionRepository, RepositoryError,
            query::{self as domain_query, FilterExpression, QuestionField, QuestionQuery},
        },
    },
    infrastructure::persistence::{
        database_error,
        query::{Condition, ConditionValue, Join, JoinType, QueryBuilder, SortDirection},
        schema::*,
    },
};

#[derive(Clone, Debug)]
pub struct PostgresQuestionRepository {
    database: &'static Database,
}

const INSERT_SQL: &str = "INSERT INTO \"questions\" (\"title\", \"body\", \"tags\", \"status\", \"author_id\")
VALUES ($1, $2, $3, $4, $5)
RETURNING \"id\"";

const UPDATE_SQL: &str = "UPDATE \"questions\"
SET \"title\" = $1, \"body\" = $2, \"tags\" = $3, \"status\" = $4, \"updated_at\" = now()
WHERE \"id\" = $5 AND \"author_id\" = $6";

const DELETE_SQL: &str = "DELETE FROM \"questions\" WHERE \"id\" = $1 AND \"author_id\" = $2";

impl PostgresQuestionRepository {
    pub fn new(database: &'static Database) -> Self {
        Self { database }
    }

    /// Questions joined with their author's username
    fn select() -> QueryBuilder<'static> {
        QueryBuilder::from(QUESTIONS_TABLE)
            .select(vec![
                Cow::Borrowed(&QUESTION_ID_COLUMN),
                Cow::Borrowed(&QUESTION_TITLE_COLUMN),
                Cow::Borrowed(&QUESTION_BODY_COLUMN),
                Cow::Borrowed(&QUESTION_TAGS_COLUMN),
                Cow::Borrowed(&QUESTION_STATUS_COLUMN),
                Cow::Borrowed(&QUESTION_UPVOTES_COLUMN),
                Cow::Borrowed(&QUESTION_AUTHOR_COLUMN),
                Cow::Borrowed(&QUESTION_CREATED_COLUMN),
                Cow::Borrowed(&QUESTION_UPDATED_COLUMN),
                Cow::Borrowed(&USER_NAME_COLUMN),
            ])
            .join(Join {
                join_type: JoinType::Left,
                target_table: USERS_TABLE,
                main_column: Cow::Borrowed(&QUESTION_AUTHOR_COLUMN),
                target_column: Cow::Borrowed(&USER_ID_COLUMN),
            })
    }

    async fn fetch_all(&self, builder: QueryBuilder<'_>) -> Result<Vec<Question>, RepositoryError> {
        let (sql, params) = builder.build();
        tracing::debug!("Generated SQL: {}", sql);

        let mut query_object = sqlx::query(&sql);
        for param in params {
            query_object = param.bind_to_query(query_object);
        }

        let mut rows = query_object.fetch(self.database.database_pool());
        let mut questions = Vec::new();
        while let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| database_error("failed to select questions", e))?
        {
            questions.push(row_to_question(&row)?);
        }
        Ok(questions)
    }
}

impl QuestionRepository for PostgresQuestionRepository {
    async fn insert(&self, question: NewQuestion) -> Result<Question, RepositoryError> {
        let tags: Vec<String> = question.tags.into_iter().map(Tag::into_inner).collect();
        let id: Uuid = sqlx::query_scalar(INSERT_SQL)
            .bind(question.title.into_inner())
            .bind(question.body.into_inner())
            .bind(tags)
            .bind(question.status.as_str())
            .bind(Uuid::from(question.author_id))
            .fetch_one(self.database.database_pool())
            .await
            .map_err(|e| database_error("failed to insert question", e))?;

        self.find_by_id(QuestionId::from(id))
            .await?
            .ok_or_else(|| RepositoryError::DatabaseError(format!("inserted question {} is missing", id)))
    }

    async fn find(&self, query: QuestionQuery) -> Result<Vec<Question>, RepositoryError> {
        let mut builder = Self::select();
        if let Some(condition) = to_condition(&query.filter) {
            builder = builder.where_condition(condition);
        }
        for (field, direction) in query.sort {
            let direction = match direction {
                domain_query::SortDirection::Ascending => SortDirection::Ascending,
                domain_query::SortDirection::Descending => SortDirection::Descending,
            };
            builder = builder.order_by(Cow::Borrowed(column_of(field)), direction);
        }

        self.fetch_all(builder).await
    }

    async fn find_by_id(&self, id: QuestionId) -> Result<Option<Question>, RepositoryError> {
        let builder = Self::select().where_condition(Condition::Equals {
            column: Cow::Borrowed(&QUESTION_ID_COLUMN),
            value: ConditionValue::Uuid(id.into()),
        });

        Ok(self.fetch_all(builder).await?.into_iter().next())
    }

    async fn update(&self, question: &Question) -> Result<Question, RepositoryError> {
        let tags: Vec<String> = question.tags.iter().map(|t| t.to_string()).collect();
        let result = sqlx::query(UPDATE_SQL)
            .bind(question.title.to_string())
            .bind(question.body.to_string())
            .bind(tags)
            .bind(question.status.as_str())
            .bind(Uuid::from(question.id))
            .bind(Uuid::from(question.author.id))
            .execute(self.database.database_pool())
            .await
            .map_err(|e| database_error("failed to update question", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.find_by_id(question.id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, question: &Question) -> Result<(), RepositoryError> {
        let result = sqlx::query(DELETE_SQL)
            .bind(Uuid::from(question.id))
            .bind(Uuid::from(question.author.id))
            .execute(self.database.database_pool())
            .await
            .map_err(|e| database_error("failed to delete question", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

fn column_of(field: QuestionField) -> &'static Column<'static> {
    match field {
        QuestionField::Title => &QUESTION_TITLE_COLUMN,
        QuestionField::Body => &QUESTION_BODY_COLUMN,
        QuestionField::Tags => &QUESTION_TAGS_COLUMN,
        QuestionField::Status => &QUESTION_STATUS_COLUMN,
        QuestionField::Upvotes => &QUESTION_UPVOTES_COLUMN,
        QuestionField::CreatedAt => &QUESTION_CREATED_COLUMN,
    }
}

/// Translates a domain filter into a SQL condition, `None` for "everything"
fn to_condition(filter: &FilterExpression) -> Option<Condition<'static>> {
    let condition = match filter {
        FilterExpression::None => return None,
        FilterExpression::Equals { field, value } => Condition::Equals {
            column: Cow::Borrowed(column_of(*field)),
            value: ConditionValue::Text(value.clone()),
        },
        FilterExpression::AtLeast { field, value } => Condition::GreaterThanOrEqual {
            column: Cow::Borrowed(column_of(*field)),
            value: *value,
        },
        FilterExpression::AtMost { field, value } => Condition::LessThanOrEqual {
            column: Cow::Borrowed(column_of(*field)),
            value: *value,
        },
        FilterExpression::ContainsIgnoreCase { field, value } => Condition::ContainsIgnoreCase {
            column: Cow::Borrowed(column_of(*field)),
            value: value.clone(),
        },
        FilterExpression::Intersects { field, values } => Condition::Overlaps {
            column: Cow::Borrowed(column_of(*field)),
            values: values.clone(),
        },
        FilterExpression::And(filters) => {
            Condition::And(filters.iter().filter_map(to_condition).collect())
        }
        FilterExpression::Or(filters) => {
            let conditions: Vec<_> = filters.iter().filter_map(to_condition).collect();
            // an OR with an unconditional branch matches everything
            if conditions.len() < filters.len() {
                return None;
            }
            Condition::Or(conditions)
        }
    };

    match &condition {
        Condition::And(conditions) | Condition::Or(conditions) if conditions.is_empty() => None,
        _ => Some(condition),
    }
}

fn row_to_question(row: &PgRow) -> Result<Question, RepositoryError> {
    let id: Uuid = try_get(row, ID_FIELD_NAME)?;
    let title: String = try_get(row, TITLE_FIELD_NAME)?;
    let body: String = try_get(row, BODY_FIELD_NAME)?;
    let tags: Vec<String> = try_get(row, TAGS_FIELD_NAME)?;
    let status: String = try_get(row, STATUS_FIELD_NAME)?;
    let upvotes: i64 = try_get(row, UPVOTES_FIELD_NAME)?;
    let author_id: Uuid = try_get(row, AUTHOR_ID_FIELD_NAME)?;
    let created_at: DateTime<Utc> = try_get(row, CREATED_FIELD_NAME)?;
    let updated_at: Option<DateTime<Utc>> = try_get(row, UPDATED_FIELD_NAME)?;
    let username: Option<String> = try_get(row, USERNAME_FIELD_NAME)?;

    let invalid = |field: &str, err: &dyn std::fmt::Display| {
        RepositoryError::DatabaseError(format!("question {} has invalid {}: {}", id, field, err))
    };

    Ok(Question {
        id: QuestionId::from(id),
        title: QuestionTitle::try_new(title).map_err(|e| invalid(TITLE_FIELD_NAME, &e))?,
        body: QuestionBody::try_new(body).map_err(|e| invalid(BODY_FIELD_NAME, &e))?,
        tags: tags
            .into_iter()
            .map(|tag| Tag::try_new(tag))
            .collect::<Result<_, _>>()
            .map_err(|e| invalid(TAGS_FIELD_NAME, &e))?,
        status: status
            .parse::<QuestionStatus>()
            .map_err(|e| invalid(STATUS_FIELD_NAME, &e))?,
        upvotes,
        author: Author {
            id: author_id.into(),
            username,
        },
        created_at,
        updated_at,
    })
}

pub(crate) fn try_get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| database_error(&format!("failed to read column {}", column), e))
}
