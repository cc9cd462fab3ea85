use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Server-assigned community post identifier.
///
/// Ids have no client-side identity beyond what the server assigned; the
/// newtypes exist so ids from different endpoints cannot be mixed up.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct PostId(pub i64);

/// Server-assigned comment identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct CommentId(pub i64);

/// Server-assigned cart entry identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct CartId(pub i64);

/// Server-assigned scrap identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct ScrapId(pub i64);

/// Server-assigned review identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct ReviewId(pub i64);

/// Server-assigned identifier of a follow-up question set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct QuestionId(pub i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_transparently() {
        let id = PostId(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let parsed: PostId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn ids_display_as_plain_numbers() {
        assert_eq!(CartId(7).to_string(), "7");
        assert_eq!(ReviewId(13).to_string(), "13");
    }

    #[test]
    fn newtypes_prevent_mixing() {
        fn takes_post_id(_: PostId) {}
        fn takes_comment_id(_: CommentId) {}

        takes_post_id(PostId(1));
        takes_comment_id(CommentId(1));
        // takes_post_id(CommentId(1));  // Compile error!
        // takes_comment_id(PostId(1));  // Compile error!
    }
}
