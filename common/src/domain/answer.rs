use nutype::nutype;

pub const ANSWER_BODY_MAX_CHARS: usize = 30_000;

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 30000),
    derive(Clone, Debug, Display, AsRef, PartialEq, Eq, Serialize)
)]
pub struct AnswerBody(String);
