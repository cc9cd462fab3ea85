//! The community board: post lists, search, detail, comments and the
//! like/scrap/report sub-resources.
//!
//! Like and scrap are the screens' optimistic updates; pair the calls here
//! with [`optimistic`](crate::optimistic) so a refused write rolls the local
//! state back.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{CommentId, PostId};
use crate::validate;

/// Board list item, from `GET /community/lists` and the top-liked list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct PostSummary {
    pub post_id: PostId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub like_count: Option<i64>,
}

/// Full post, from `GET /community/lists/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct PostDetail {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub contents: String,
    #[serde(default)]
    pub like_count: Option<i64>,
}

/// New post for `POST /community/posts`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    title: String,
    contents: String,
}

impl NewPost {
    /// Validates that title and body are both written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when either is blank.
    pub fn new(title: &str, contents: &str) -> Result<Self, Error> {
        const MESSAGE: &str = "제목과 본문을 모두 작성해주세요.";
        Ok(Self {
            title: validate::require(title, MESSAGE)?,
            contents: validate::require(contents, MESSAGE)?,
        })
    }
}

/// Comment on a post, with the author's gamification badges.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Comment {
    pub comment_id: CommentId,
    #[serde(default)]
    pub nick_name: String,
    #[serde(default)]
    pub rank: Option<i64>,
    #[serde(default)]
    pub review_count: Option<i64>,
    #[serde(default)]
    pub contents: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// New comment for `POST /community/posts/{id}/comments`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    contents: String,
}

impl NewComment {
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the comment is blank.
    pub fn new(contents: &str) -> Result<Self, Error> {
        Ok(Self {
            contents: validate::require(contents, "댓글 내용을 입력하세요.")?,
        })
    }
}

impl ApiClient {
    /// Every board post. An empty board decodes to an empty list.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn list_posts(&self) -> Result<Vec<PostSummary>, Error> {
        Ok(self.get_json("/community/lists").await?.unwrap_or_default())
    }

    /// The most-liked posts for the board header.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn top_liked_posts(&self) -> Result<Vec<PostSummary>, Error> {
        Ok(self
            .get_json("/community/posts/top-liked")
            .await?
            .unwrap_or_default())
    }

    /// Search posts by keyword. The keyword goes out percent-encoded; a
    /// blank keyword is rejected locally (the screen resets to the full
    /// list instead of searching).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a blank keyword, otherwise standard
    /// authenticated-call failures.
    pub async fn search_posts(&self, keyword: &str) -> Result<Vec<PostSummary>, Error> {
        let keyword = validate::require(keyword, "검색어를 입력하세요.")?;
        Ok(self
            .post_query("/community/search", &[("keyword", keyword.as_str())])
            .await?
            .unwrap_or_default())
    }

    /// Fetch one post. `None` means it no longer exists.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn get_post(&self, post_id: PostId) -> Result<Option<PostDetail>, Error> {
        self.get_json(&format!("/community/lists/{post_id}")).await
    }

    /// Publish a post.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn create_post(&self, post: NewPost) -> Result<(), Error> {
        self.post_json::<_, serde_json::Value>("/community/posts", &post)
            .await?;
        Ok(())
    }

    /// Delete a post. The server enforces ownership; a refusal surfaces as
    /// [`Error::Rejected`].
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn delete_post(&self, post_id: PostId) -> Result<(), Error> {
        self.delete(&format!("/community/posts/{post_id}")).await
    }

    /// Comments under a post, oldest first as the server returns them.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, Error> {
        Ok(self
            .get_json(&format!("/community/posts/{post_id}/comments"))
            .await?
            .unwrap_or_default())
    }

    /// Add a comment; the screen re-fetches the list afterwards.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn add_comment(&self, post_id: PostId, comment: NewComment) -> Result<(), Error> {
        self.post_json::<_, serde_json::Value>(
            &format!("/community/posts/{post_id}/comments"),
            &comment,
        )
        .await?;
        Ok(())
    }

    /// Delete a comment.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn delete_comment(&self, comment_id: CommentId) -> Result<(), Error> {
        self.delete(&format!("/community/comments/{comment_id}"))
            .await
    }

    /// Toggle the like on a post.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures; callers that bumped the count
    /// optimistically roll back on error.
    pub async fn like_post(&self, post_id: PostId) -> Result<(), Error> {
        self.post_unit(&format!("/community/posts/{post_id}/like"))
            .await
    }

    /// Scrap a post into the member's scrap list.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn scrap_post(&self, post_id: PostId) -> Result<(), Error> {
        self.post_unit(&format!("/community/posts/{post_id}/scrap"))
            .await
    }

    /// Report a post to the moderators.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn report_post(&self, post_id: PostId) -> Result<(), Error> {
        self.post_unit(&format!("/community/posts/{post_id}/report"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_summary_tolerates_missing_like_count() {
        let post: PostSummary = serde_json::from_str(
            r#"{"postId": 5, "title": "완독 후기", "author": "달밤"}"#,
        )
        .unwrap();
        assert_eq!(post.post_id, PostId(5));
        assert!(post.like_count.is_none());
    }

    #[test]
    fn comment_carries_author_badges() {
        let comment: Comment = serde_json::from_str(
            r#"{
                "commentId": 9,
                "nickName": "책벌레",
                "rank": 3,
                "reviewCount": 27,
                "contents": "저도 이 책 읽었어요!",
                "date": "2024-05-02T10:30:00"
            }"#,
        )
        .unwrap();
        assert_eq!(comment.comment_id, CommentId(9));
        assert_eq!(comment.rank, Some(3));
        assert_eq!(comment.review_count, Some(27));
    }

    #[test]
    fn new_post_requires_title_and_body() {
        assert!(NewPost::new("제목", "본문").is_ok());
        let err = NewPost::new("제목", "  ").unwrap_err();
        assert_eq!(err.to_string(), "제목과 본문을 모두 작성해주세요.");
    }

    #[test]
    fn blank_comment_is_rejected_locally() {
        assert!(NewComment::new("").is_err());
        assert!(NewComment::new("좋은 글이네요").is_ok());
    }
}
