//! The AI librarian: chat, book recommendations and the one-tap cart add.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Error;
use crate::validate;

/// A recommended book, from `GET /chatbot/recommend` and `POST /book/complete`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct RecommendedBook {
    #[serde(default)]
    pub book_name: String,
    #[serde(default)]
    pub author: String,
    /// Bookstore link; absent when the store does not carry the title.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    chat_message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartAdd<'a> {
    book_name: &'a str,
    author: &'a str,
    url: &'a str,
}

impl ApiClient {
    /// Books the AI currently recommends for this member.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn recommendations(&self) -> Result<Vec<RecommendedBook>, Error> {
        Ok(self
            .get_json("/chatbot/recommend")
            .await?
            .unwrap_or_default())
    }

    /// Send a chat message to the AI librarian; returns its reply text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a blank message, otherwise standard
    /// authenticated-call failures.
    pub async fn chat(&self, message: &str) -> Result<String, Error> {
        let request = ChatRequest {
            chat_message: validate::require(message, "메시지를 입력하세요.")?,
        };
        Ok(self
            .post_json("/chatbot/chat", &request)
            .await?
            .unwrap_or_default())
    }

    /// Put a recommended book into the shopping cart. A book the store does
    /// not carry goes in with an empty link, matching the recommendation
    /// cards.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn add_recommendation_to_cart(
        &self,
        book: &RecommendedBook,
    ) -> Result<(), Error> {
        let request = CartAdd {
            book_name: &book.book_name,
            author: &book.author,
            url: book.url.as_deref().unwrap_or(""),
        };
        self.post_json::<_, serde_json::Value>("/book/cart", &request)
            .await?;
        Ok(())
    }
}
