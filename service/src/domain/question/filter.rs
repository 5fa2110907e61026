use serde::Deserialize;

use crate::domain::repository::query::{FilterExpression, QuestionField};

/// Optional listing parameters as they arrive from the request.
/// Every field is kept as raw text; interpretation happens in [`build_filter`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    /// Comma separated labels
    pub tags: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub min_votes: Option<String>,
    pub max_votes: Option<String>,
}

/// Translates listing parameters into one predicate over questions.
///
/// Present parameters are AND-combined, absent or blank ones add nothing.
/// Conditions are always emitted in the same field order, so the order of
/// parameters in the request never changes the predicate. Vote bounds that
/// do not parse as integers are ignored.
pub fn build_filter(params: &FilterParams) -> FilterExpression {
    let mut conditions = Vec::new();

    if let Some(tags) = params.tags.as_deref().and_then(split_tags) {
        conditions.push(FilterExpression::Intersects {
            field: QuestionField::Tags,
            values: tags,
        });
    }

    if let Some(status) = non_blank(params.status.as_deref()) {
        conditions.push(FilterExpression::Equals {
            field: QuestionField::Status,
            value: status.to_string(),
        });
    }

    if let Some(search) = non_blank(params.search.as_deref()) {
        conditions.push(FilterExpression::Or(vec![
            FilterExpression::ContainsIgnoreCase {
                field: QuestionField::Title,
                value: search.to_string(),
            },
            FilterExpression::ContainsIgnoreCase {
                field: QuestionField::Body,
                value: search.to_string(),
            },
        ]));
    }

    if let Some(min_votes) = parse_bound("minVotes", params.min_votes.as_deref()) {
        conditions.push(FilterExpression::AtLeast {
            field: QuestionField::Upvotes,
            value: min_votes,
        });
    }

    if let Some(max_votes) = parse_bound("maxVotes", params.max_votes.as_deref()) {
        conditions.push(FilterExpression::AtMost {
            field: QuestionField::Upvotes,
            value: max_votes,
        });
    }

    FilterExpression::all(conditions)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Labels are compared the way stored tags are normalized: trimmed, lowercase
fn split_tags(value: &str) -> Option<Vec<String>> {
    let mut tags: Vec<String> = Vec::new();
    for tag in value.split(',').map(|t| t.trim().to_lowercase()) {
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    (!tags.is_empty()).then_some(tags)
}

fn parse_bound(name: &str, value: Option<&str>) -> Option<i64> {
    let value = non_blank(value)?;
    match value.parse::<i64>() {
        Ok(bound) => Some(bound),
        Err(err) => {
            tracing::debug!("ignoring {} = {:?}: {}", name, value, err);
            None
        }
    }
}
