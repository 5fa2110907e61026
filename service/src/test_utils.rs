use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use qanda_common::{AnswerId, QuestionId, UserId};

use crate::domain::{
    AppState,
    answer::{Answer, NewAnswer},
    auth::{Authenticator, User},
    question::{Author, NewQuestion, Question},
    repository::{
        AnswerRepository, QuestionRepository, RepositoryError,
        query::{FilterExpression, QuestionField, QuestionQuery, SortDirection},
    },
};

/// Repositories and authenticator kept in memory, shared between clones.
/// Timestamps advance one millisecond per insert so ordering is deterministic.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    clock: i64,
    users: HashMap<String, User>,
    questions: Vec<Question>,
    answers: Vec<Answer>,
}

impl Inner {
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += 1;
        DateTime::<Utc>::UNIX_EPOCH + Duration::days(20_000) + Duration::milliseconds(self.clock)
    }

    fn author(&self, id: UserId) -> Author {
        let username = self
            .users
            .values()
            .find(|user| user.id == id)
            .map(|user| user.username.clone());
        Author { id, username }
    }
}

impl InMemoryStore {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registers a user reachable through `token`
    pub fn add_user(&self, token: &str, id: UserId, username: &str) {
        let user = User {
            id,
            username: username.to_string(),
        };
        self.lock().users.insert(token.to_string(), user);
    }

    pub fn question_count(&self) -> usize {
        self.lock().questions.len()
    }

    /// Overrides the vote counter, which the service itself never changes
    pub fn set_upvotes(&self, id: QuestionId, upvotes: i64) {
        if let Some(question) = self.lock().questions.iter_mut().find(|q| q.id == id) {
            question.upvotes = upvotes;
        }
    }
}

impl AppState for InMemoryStore {
    type Q = InMemoryStore;
    type A = InMemoryStore;
    type U = InMemoryStore;

    fn questions(&self) -> &Self::Q {
        self
    }

    fn answers(&self) -> &Self::A {
        self
    }

    fn authenticator(&self) -> &Self::U {
        self
    }
}

impl QuestionRepository for InMemoryStore {
    async fn insert(&self, question: NewQuestion) -> Result<Question, RepositoryError> {
        let mut inner = self.lock();
        let created_at = inner.tick();
        let question = Question {
            id: QuestionId::new_random(),
            title: question.title,
            body: question.body,
            tags: question.tags,
            status: question.status,
            upvotes: 0,
            author: inner.author(question.author_id),
            created_at,
            updated_at: None,
        };
        inner.questions.push(question.clone());
        Ok(question)
    }

    async fn find(&self, query: QuestionQuery) -> Result<Vec<Question>, RepositoryError> {
        let inner = self.lock();
        let mut found: Vec<Question> = inner
            .questions
            .iter()
            .filter(|q| matches(&query.filter, q))
            .cloned()
            .collect();
        for (field, direction) in query.sort.iter().rev() {
            found.sort_by(|a, b| {
                let ordering = match field {
                    QuestionField::CreatedAt => a.created_at.cmp(&b.created_at),
                    QuestionField::Upvotes => a.upvotes.cmp(&b.upvotes),
                    QuestionField::Title => a.title.as_ref().cmp(b.title.as_ref()),
                    QuestionField::Body => a.body.as_ref().cmp(b.body.as_ref()),
                    QuestionField::Status => a.status.as_str().cmp(b.status.as_str()),
                    QuestionField::Tags => a.tags.cmp(&b.tags),
                };
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        Ok(found)
    }

    async fn find_by_id(&self, id: QuestionId) -> Result<Option<Question>, RepositoryError> {
        Ok(self.lock().questions.iter().find(|q| q.id == id).cloned())
    }

    async fn update(&self, question: &Question) -> Result<Question, RepositoryError> {
        let mut inner = self.lock();
        let updated_at = inner.tick();
        let stored = inner
            .questions
            .iter_mut()
            .find(|q| q.id == question.id && q.author.id == question.author.id)
            .ok_or(RepositoryError::NotFound)?;
        stored.title = question.title.clone();
        stored.body = question.body.clone();
        stored.tags = question.tags.clone();
        stored.status = question.status;
        stored.updated_at = Some(updated_at);
        Ok(stored.clone())
    }

    async fn delete(&self, question: &Question) -> Result<(), RepositoryError> {
        let mut inner = self.lock();
        let before = inner.questions.len();
        inner
            .questions
            .retain(|q| !(q.id == question.id && q.author.id == question.author.id));
        if inner.questions.len() == before {
            return Err(RepositoryError::NotFound);
        }
        inner.answers.retain(|a| a.question_id != question.id);
        Ok(())
    }
}

impl AnswerRepository for InMemoryStore {
    async fn insert(&self, answer: NewAnswer) -> Result<Answer, RepositoryError> {
        let mut inner = self.lock();
        let created_at = inner.tick();
        let answer = Answer {
            id: AnswerId::new_random(),
            question_id: answer.question_id,
            body: answer.body,
            author: inner.author(answer.author_id),
            created_at,
        };
        inner.answers.push(answer.clone());
        Ok(answer)
    }

    async fn find_by_question(&self, question_id: QuestionId) -> Result<Vec<Answer>, RepositoryError> {
        let mut answers: Vec<Answer> = self
            .lock()
            .answers
            .iter()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect();
        answers.sort_by_key(|a| a.created_at);
        Ok(answers)
    }
}

impl Authenticator for InMemoryStore {
    async fn authenticate(&self, token: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock().users.get(token).cloned())
    }
}

/// Evaluates a filter against one question the way the SQL translation does
fn matches(filter: &FilterExpression, question: &Question) -> bool {
    match filter {
        FilterExpression::None => true,
        FilterExpression::Equals { field, value } => text_of(field, question) == *value,
        FilterExpression::AtLeast { field, value } => number_of(field, question) >= *value,
        FilterExpression::AtMost { field, value } => number_of(field, question) <= *value,
        FilterExpression::ContainsIgnoreCase { field, value } => text_of(field, question)
            .to_lowercase()
            .contains(&value.to_lowercase()),
        FilterExpression::Intersects { values, .. } => question
            .tags
            .iter()
            .any(|tag| values.iter().any(|v| v == tag.as_ref())),
        FilterExpression::And(filters) => filters.iter().all(|f| matches(f, question)),
        FilterExpression::Or(filters) => filters.iter().any(|f| matches(f, question)),
    }
}

fn text_of(field: &QuestionField, question: &Question) -> String {
    match field {
        QuestionField::Title => question.title.to_string(),
        QuestionField::Body => question.body.to_string(),
        QuestionField::Status => question.status.to_string(),
        other => panic!("{other:?} is not a text field"),
    }
}

fn number_of(field: &QuestionField, question: &Question) -> i64 {
    match field {
        QuestionField::Upvotes => question.upvotes,
        other => panic!("{other:?} is not a numeric field"),
    }
}
