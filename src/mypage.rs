//! The member's own page: profile, cart, scraps, written reviews and the
//! challenge statistics.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Error;
use crate::review::ReviewRecord;
use crate::types::{CartId, PostId, ReviewId, ScrapId};
use crate::validate;

/// Nickname and rank for the page header, from `GET /mypage/info/simple`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ProfileSummary {
    #[serde(default)]
    pub nick_name: String,
    #[serde(default)]
    pub rank: Option<i64>,
}

/// The editable profile. Fetched with `GET /mypage/info/all`, edited in
/// place and written back with `PATCH /mypage/info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub nick_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub birth: String,
}

/// Cart entry, from `GET /mypage/cart`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct CartItem {
    pub cart_id: CartId,
    #[serde(default)]
    pub book_name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Manual cart addition for `POST /mypage/cart`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    book_name: String,
    author: String,
    url: String,
}

impl NewCartItem {
    /// Validates the add-to-cart form; all three fields are required.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] on the first blank field.
    pub fn new(book_name: &str, author: &str, url: &str) -> Result<Self, Error> {
        const MESSAGE: &str = "모든 항목을 입력해주세요.";
        Ok(Self {
            book_name: validate::require(book_name, MESSAGE)?,
            author: validate::require(author, MESSAGE)?,
            url: validate::require(url, MESSAGE)?,
        })
    }
}

/// Scrap list item, from `GET /mypage/scraps`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ScrapSummary {
    pub scrap_id: ScrapId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub date_time: Option<String>,
}

/// Resolution of a scrap back to its post, from `GET /mypage/scrap/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ScrapDetail {
    pub post_id: PostId,
}

/// Written-review list item, from `GET /mypage/reviews`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ReviewListItem {
    pub review_id: ReviewId,
    #[serde(default)]
    pub book_name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Challenge statistics, from `GET /mypage/statistics`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Statistics {
    /// Completed books; the medal screens derive progress from this.
    #[serde(default)]
    pub book_count: u32,
}

impl ApiClient {
    /// Nickname and rank for the page header.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn profile_summary(&self) -> Result<Option<ProfileSummary>, Error> {
        self.get_json("/mypage/info/simple").await
    }

    /// The full editable profile.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn profile(&self) -> Result<Option<Profile>, Error> {
        self.get_json("/mypage/info/all").await
    }

    /// Write back an edited profile.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn update_profile(&self, profile: &Profile) -> Result<(), Error> {
        self.patch_json::<_, serde_json::Value>("/mypage/info", profile)
            .await?;
        Ok(())
    }

    /// The shopping cart, newest first as the server returns it.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn cart(&self) -> Result<Vec<CartItem>, Error> {
        Ok(self.get_json("/mypage/cart").await?.unwrap_or_default())
    }

    /// Add a book to the cart by hand.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn add_cart_item(&self, item: NewCartItem) -> Result<(), Error> {
        self.post_json::<_, serde_json::Value>("/mypage/cart", &item)
            .await?;
        Ok(())
    }

    /// Remove a cart entry. Screens drop the row optimistically and restore
    /// it if this fails.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn remove_cart_item(&self, cart_id: CartId) -> Result<(), Error> {
        self.delete(&format!("/mypage/cart/{cart_id}")).await
    }

    /// The scrap list.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn scraps(&self) -> Result<Vec<ScrapSummary>, Error> {
        Ok(self.get_json("/mypage/scraps").await?.unwrap_or_default())
    }

    /// Resolve a scrap to the post it points at, for navigation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingData`] when the scrap no longer resolves,
    /// otherwise standard authenticated-call failures.
    pub async fn scrap_detail(&self, scrap_id: ScrapId) -> Result<ScrapDetail, Error> {
        self.get_json(&format!("/mypage/scrap/{scrap_id}"))
            .await?
            .ok_or(Error::MissingData)
    }

    /// Remove a scrap.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn remove_scrap(&self, scrap_id: ScrapId) -> Result<(), Error> {
        self.delete(&format!("/mypage/scrap/{scrap_id}")).await
    }

    /// Every review the member has written.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn my_reviews(&self) -> Result<Vec<ReviewListItem>, Error> {
        Ok(self.get_json("/mypage/reviews").await?.unwrap_or_default())
    }

    /// One stored review with its question/answer pairs and AI analysis.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn review_detail(&self, review_id: ReviewId) -> Result<Option<ReviewRecord>, Error> {
        self.get_json(&format!("/mypage/review/{review_id}")).await
    }

    /// Delete a stored review.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn remove_review(&self, review_id: ReviewId) -> Result<(), Error> {
        self.delete(&format!("/mypage/review/{review_id}")).await
    }

    /// Completed-book count for the challenge screen.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn statistics(&self) -> Result<Option<Statistics>, Error> {
        self.get_json("/mypage/statistics").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_roundtrips_through_the_wire_names() {
        let profile = Profile {
            nick_name: "달밤".into(),
            phone_number: "010-1234-5678".into(),
            genre: "소설".into(),
            job: "학생".into(),
            birth: "2000-01-02".into(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["nickName"], "달밤");
        assert_eq!(json["phoneNumber"], "010-1234-5678");

        let parsed: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, profile);
    }

    #[test]
    fn cart_item_tolerates_missing_url() {
        let item: CartItem = serde_json::from_str(
            r#"{"cartId": 4, "bookName": "아몬드", "author": "손원평"}"#,
        )
        .unwrap();
        assert_eq!(item.cart_id, CartId(4));
        assert!(item.url.is_none());
    }

    #[test]
    fn new_cart_item_requires_every_field() {
        assert!(NewCartItem::new("아몬드", "손원평", "https://example.com").is_ok());
        let err = NewCartItem::new("아몬드", "손원평", "").unwrap_err();
        assert_eq!(err.to_string(), "모든 항목을 입력해주세요.");
    }

    #[test]
    fn scrap_detail_resolves_to_a_post_id() {
        let detail: ScrapDetail = serde_json::from_str(r#"{"postId": 17}"#).unwrap();
        assert_eq!(detail.post_id, PostId(17));
    }

    #[test]
    fn statistics_default_to_zero_books() {
        let stats: Statistics = serde_json::from_str("{}").unwrap();
        assert_eq!(stats.book_count, 0);
    }
}
