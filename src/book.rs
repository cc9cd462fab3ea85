//! The currently-registered book: lookup, registration, completion, give-up.

use serde::{Deserialize, Serialize};

use crate::chatbot::RecommendedBook;
use crate::client::ApiClient;
use crate::error::Error;
use crate::validate;

/// The member's current book, from `GET /book/info`.
///
/// The backend answers with an empty payload when nothing is registered yet;
/// [`is_registered`](Self::is_registered) is what screens branch on to route
/// to registration instead of the book view.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct BookInfo {
    #[serde(default)]
    pub book_name: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub total_page: Option<u32>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub finish_date: Option<String>,
}

impl BookInfo {
    /// Whether a book is actually registered.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.book_name.is_some()
    }
}

/// Registration form for `POST /book`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRegistration {
    book_name: String,
    author: String,
    total_page: u32,
    genre: String,
    start_date: String,
    finish_date: String,
}

impl BookRegistration {
    /// Validates the registration form. `total_page` arrives as free-form
    /// text from the page-count field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] on a blank field, a non-numeric page
    /// count or a date that is not `YYYY-MM-DD`; nothing is sent in that
    /// case.
    pub fn new(
        book_name: &str,
        author: &str,
        total_page: &str,
        genre: &str,
        start_date: &str,
        finish_date: &str,
    ) -> Result<Self, Error> {
        const MESSAGE: &str = "모든 항목을 입력해주세요.";
        Ok(Self {
            book_name: validate::require(book_name, MESSAGE)?,
            author: validate::require(author, MESSAGE)?,
            total_page: validate::parse_page_count(
                total_page,
                "총 페이지 수는 숫자로 입력해주세요.",
            )?,
            genre: validate::require(genre, MESSAGE)?,
            start_date: validate::require_date(start_date, "시작일을 선택해주세요.")?,
            finish_date: validate::require_date(finish_date, "종료일을 선택해주세요.")?,
        })
    }
}

/// Start/finish adjustment for `POST /book/period`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingPeriod {
    start_date: String,
    finish_date: String,
}

impl ReadingPeriod {
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when either date is not `YYYY-MM-DD`.
    pub fn new(start_date: &str, finish_date: &str) -> Result<Self, Error> {
        Ok(Self {
            start_date: validate::require_date(start_date, "시작일을 선택해주세요.")?,
            finish_date: validate::require_date(finish_date, "종료일을 선택해주세요.")?,
        })
    }
}

impl ApiClient {
    /// Fetch the currently registered book.
    ///
    /// `None` means the backend holds no book for this member; screens route
    /// to registration in that case.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures ([`Error::NotLoggedIn`],
    /// [`Error::SessionExpired`], [`Error::Network`], ...).
    pub async fn get_book_info(&self) -> Result<Option<BookInfo>, Error> {
        self.get_json("/book/info").await
    }

    /// Register the book to read next.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures; the server's own refusal (e.g.
    /// a book is already registered) surfaces as [`Error::Rejected`].
    pub async fn register_book(&self, registration: BookRegistration) -> Result<(), Error> {
        self.post_json::<_, serde_json::Value>("/book", &registration)
            .await?;
        Ok(())
    }

    /// Give up on the current book; the registration is deleted server-side.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn give_up_book(&self) -> Result<(), Error> {
        self.patch_empty("/book").await
    }

    /// Mark the current book finished. The server responds with books to
    /// read next; an empty list is valid.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn complete_book(&self) -> Result<Vec<RecommendedBook>, Error> {
        Ok(self.post_empty("/book/complete").await?.unwrap_or_default())
    }

    /// Adjust the reading period of the current book.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn set_reading_period(&self, period: ReadingPeriod) -> Result<(), Error> {
        self.post_json::<_, serde_json::Value>("/book/period", &period)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_means_no_book_registered() {
        let info: BookInfo = serde_json::from_str("{}").unwrap();
        assert!(!info.is_registered());
    }

    #[test]
    fn full_payload_deserializes() {
        let info: BookInfo = serde_json::from_str(
            r#"{
                "bookName": "달러구트 꿈 백화점",
                "author": "이미예",
                "genre": "소설",
                "totalPage": 300,
                "startDate": "2024-05-01",
                "finishDate": "2024-05-31"
            }"#,
        )
        .unwrap();
        assert!(info.is_registered());
        assert_eq!(info.total_page, Some(300));
        assert_eq!(info.start_date.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn registration_serializes_with_wire_names() {
        let registration = BookRegistration::new(
            "달러구트 꿈 백화점",
            "이미예",
            "300",
            "소설",
            "2024-05-01",
            "2024-05-31",
        )
        .unwrap();
        let json = serde_json::to_value(&registration).unwrap();
        assert_eq!(json["bookName"], "달러구트 꿈 백화점");
        assert_eq!(json["totalPage"], 300);
        assert_eq!(json["startDate"], "2024-05-01");
    }

    #[test]
    fn registration_rejects_bad_input() {
        assert!(BookRegistration::new("", "a", "300", "g", "2024-05-01", "2024-05-31").is_err());
        assert!(
            BookRegistration::new("b", "a", "many", "g", "2024-05-01", "2024-05-31").is_err()
        );
        assert!(BookRegistration::new("b", "a", "300", "g", "05/01", "2024-05-31").is_err());
    }

    #[test]
    fn period_requires_date_shaped_fields() {
        assert!(ReadingPeriod::new("2024-05-01", "2024-06-01").is_ok());
        assert!(ReadingPeriod::new("soon", "2024-06-01").is_err());
    }
}
