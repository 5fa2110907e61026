/// Query for finding Questions
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionQuery {
    pub filter: FilterExpression,
    pub sort: Vec<(QuestionField, SortDirection)>,
}

impl QuestionQuery {
    pub fn new() -> Self {
        Self {
            filter: FilterExpression::None,
            sort: Vec::new(),
        }
    }

    /// The only ordering listings use: most recent first
    pub fn newest_first(filter: FilterExpression) -> Self {
        Self::new()
            .with_filter(filter)
            .add_sort(QuestionField::CreatedAt, SortDirection::Descending)
    }

    /// Set the filter expression
    pub fn with_filter(mut self, filter: FilterExpression) -> Self {
        self.filter = filter;
        self
    }

    /// Add sort order: (field, direction)
    pub fn add_sort(mut self, field: QuestionField, direction: SortDirection) -> Self {
        self.sort.push((field, direction));
        self
    }
}

impl Default for QuestionQuery {
    fn default() -> Self {
        Self::new()
    }
}

/// Fields of a question that filters and sorting can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionField {
    Title,
    Body,
    Tags,
    Status,
    Upvotes,
    CreatedAt,
}

/// Filter expressions for querying questions
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    /// No filter - all questions
    None,

    /// Exact match: field = value
    Equals { field: QuestionField, value: String },

    /// field >= value
    AtLeast { field: QuestionField, value: i64 },

    /// field <= value
    AtMost { field: QuestionField, value: i64 },

    /// Case-insensitive substring match, the value is taken literally
    ContainsIgnoreCase { field: QuestionField, value: String },

    /// Set valued field shares at least one element with values
    Intersects {
        field: QuestionField,
        values: Vec<String>,
    },

    /// All of the filters
    And(Vec<FilterExpression>),

    /// Any of the filters
    Or(Vec<FilterExpression>),
}

impl FilterExpression {
    /// AND-combine conditions, collapsing the trivial cases
    pub fn all(mut conditions: Vec<FilterExpression>) -> Self {
        match conditions.len() {
            0 => FilterExpression::None,
            1 => conditions.remove(0),
            _ => FilterExpression::And(conditions),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}
