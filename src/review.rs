//! Daily reading reviews: the write flow (entry → follow-up questions →
//! summary) and the calendar/main-page reads.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::QuestionId;
use crate::validate;

/// Today's entry for `POST /review/write`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    pages: u32,
    contents: String,
}

impl ReviewEntry {
    /// Validates the entry before anything goes on the wire. `pages` arrives
    /// as free-form text from a numeric keyboard field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when either field is blank or the page
    /// count is not a number; no request is issued in that case.
    pub fn new(pages: &str, contents: &str) -> Result<Self, Error> {
        const MESSAGE: &str = "페이지 수와 독후감을 모두 입력해주세요.";
        if pages.trim().is_empty() || contents.trim().is_empty() {
            return Err(Error::Validation(MESSAGE.into()));
        }
        Ok(Self {
            pages: validate::parse_page_count(pages, "페이지 수는 숫자로 입력해주세요.")?,
            contents: contents.trim().to_owned(),
        })
    }
}

/// Progress stats attached to a submitted entry and to the question summary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ReadingSummary {
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub current_pages: u32,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub finish_date: Option<String>,
    /// Days left until the planned finish date (the screen's D-day).
    #[serde(default)]
    pub remain_date: i64,
    #[serde(default)]
    pub average_message: Option<String>,
    #[serde(default)]
    pub ai_message: Option<String>,
}

/// Response to a submitted entry: the AI librarian's three follow-up
/// questions plus progress stats.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ReviewFeedback {
    pub question_id: QuestionId,
    #[serde(default)]
    pub question1: String,
    #[serde(default)]
    pub question2: String,
    #[serde(default)]
    pub question3: String,
    #[serde(flatten)]
    pub summary: ReadingSummary,
}

/// Answers to the follow-up questions, for `POST /question/write`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswers {
    question_id: QuestionId,
    answer1: String,
    answer2: String,
    answer3: String,
    feedback1: i32,
    feedback2: i32,
    feedback3: i32,
}

impl QuestionAnswers {
    /// Validates that all three answers are filled in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when any answer is blank.
    pub fn new(
        question_id: QuestionId,
        answer1: &str,
        answer2: &str,
        answer3: &str,
    ) -> Result<Self, Error> {
        const MESSAGE: &str = "모든 질문에 답변해주세요!";
        Ok(Self {
            question_id,
            answer1: validate::require(answer1, MESSAGE)?,
            answer2: validate::require(answer2, MESSAGE)?,
            answer3: validate::require(answer3, MESSAGE)?,
            feedback1: 0,
            feedback2: 0,
            feedback3: 0,
        })
    }

    /// Attach per-question feedback scores (default 0).
    #[must_use]
    pub fn with_feedback(mut self, feedback1: i32, feedback2: i32, feedback3: i32) -> Self {
        self.feedback1 = feedback1;
        self.feedback2 = feedback2;
        self.feedback3 = feedback3;
        self
    }
}

/// A stored review: the entry text, the question/answer pairs and the AI
/// analysis. Returned by the by-date lookup and the mypage detail view.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ReviewRecord {
    #[serde(default)]
    pub contents: String,
    #[serde(default)]
    pub question1: Option<String>,
    #[serde(default)]
    pub question2: Option<String>,
    #[serde(default)]
    pub question3: Option<String>,
    #[serde(default)]
    pub answer1: Option<String>,
    #[serde(default)]
    pub answer2: Option<String>,
    #[serde(default)]
    pub answer3: Option<String>,
    #[serde(default)]
    pub ai_response: Option<String>,
}

/// Progress and D-day for the main screen.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct MainPageSummary {
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub remain_date: i64,
}

impl ApiClient {
    /// Submit today's reading log. The server answers with the follow-up
    /// questions and current progress.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures; a duplicate entry for today
    /// surfaces as [`Error::Rejected`] with the server's message.
    pub async fn write_review(&self, entry: ReviewEntry) -> Result<ReviewFeedback, Error> {
        self.post_json("/review/write", &entry)
            .await?
            .ok_or(Error::MissingData)
    }

    /// Answer the follow-up questions for today's entry.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn answer_questions(
        &self,
        answers: QuestionAnswers,
    ) -> Result<ReadingSummary, Error> {
        self.post_json("/question/write", &answers)
            .await?
            .ok_or(Error::MissingData)
    }

    /// Fetch the entry written on `date` (`YYYY-MM-DD`). `None` means
    /// nothing was written that day.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a malformed date, otherwise
    /// standard authenticated-call failures.
    pub async fn review_by_date(&self, date: &str) -> Result<Option<ReviewRecord>, Error> {
        let date = validate::require_date(date, "조회할 날짜 정보가 없습니다.")?;
        self.get_query("/review/date", &[("date", date.as_str())])
            .await
    }

    /// Dates that have an entry, for the calendar markers.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn review_calendar(&self) -> Result<Vec<String>, Error> {
        Ok(self.get_json("/review/calendar").await?.unwrap_or_default())
    }

    /// Progress and D-day for the main screen. `None` until the first entry
    /// exists.
    ///
    /// # Errors
    ///
    /// Standard authenticated-call failures.
    pub async fn main_page(&self) -> Result<Option<MainPageSummary>, Error> {
        self.get_json("/review/mainpage").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_rejects_blank_fields_before_any_network_call() {
        let err = ReviewEntry::new("", "재밌었다").unwrap_err();
        assert_eq!(err.to_string(), "페이지 수와 독후감을 모두 입력해주세요.");
        assert!(ReviewEntry::new("30", "   ").is_err());
    }

    #[test]
    fn entry_rejects_non_numeric_pages() {
        let err = ReviewEntry::new("서른", "재밌었다").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn entry_serializes_pages_as_a_number() {
        let entry = ReviewEntry::new(" 30 ", "오늘은 주인공이 꿈을 샀다.").unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["pages"], 30);
        assert_eq!(json["contents"], "오늘은 주인공이 꿈을 샀다.");
    }

    #[test]
    fn feedback_flattens_the_summary_fields() {
        let feedback: ReviewFeedback = serde_json::from_str(
            r#"{
                "questionId": 12,
                "question1": "가장 인상 깊은 장면은?",
                "question2": "주인공의 선택에 동의하나요?",
                "question3": "내일은 어디까지 읽을 계획인가요?",
                "totalPages": 300,
                "currentPages": 120,
                "progress": 40.0,
                "remainDate": 11,
                "aiMessage": "좋은 속도예요!"
            }"#,
        )
        .unwrap();
        assert_eq!(feedback.question_id, QuestionId(12));
        assert_eq!(feedback.summary.current_pages, 120);
        assert_eq!(feedback.summary.remain_date, 11);
        assert_eq!(feedback.summary.ai_message.as_deref(), Some("좋은 속도예요!"));
    }

    #[test]
    fn answers_require_all_three() {
        assert!(QuestionAnswers::new(QuestionId(1), "a", "b", "c").is_ok());
        let err = QuestionAnswers::new(QuestionId(1), "a", "", "c").unwrap_err();
        assert_eq!(err.to_string(), "모든 질문에 답변해주세요!");
    }

    #[test]
    fn answers_carry_zero_feedback_by_default() {
        let answers = QuestionAnswers::new(QuestionId(3), "a", "b", "c").unwrap();
        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json["questionId"], 3);
        assert_eq!(json["feedback1"], 0);

        let scored = QuestionAnswers::new(QuestionId(3), "a", "b", "c")
            .unwrap()
            .with_feedback(1, 0, 2);
        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["feedback3"], 2);
    }

    #[test]
    fn record_tolerates_partial_payloads() {
        let record: ReviewRecord =
            serde_json::from_str(r#"{"contents":"짧은 감상"}"#).unwrap();
        assert_eq!(record.contents, "짧은 감상");
        assert!(record.ai_response.is_none());
    }
}
