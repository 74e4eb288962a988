//! Test helper utilities and mock implementations for the trel commands.
//!
//! Provides a stub environment, a call-counting mock of the Trello API
//! client, and builders for realistic payloads. The call counter is what the
//! credential tests use to verify that no network call is ever attempted
//! before resolution completes.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use trel_runtime::api_client::TrelloApi;
use trel_runtime::config::{API_KEY_ENV_VAR, TOKEN_ENV_VAR};
use trel_runtime::credentials::Credentials;
use trel_runtime::deps::Environment;
use trel_runtime::error::TrelloError;
use trel_runtime::types::{
    Board, BoardList, Card, CommentAction, CommentData, CreateCardRequest, Member,
};

/// Environment stub backed by a map; never touches process state.
pub struct StubEnvironment {
    vars: HashMap<String, String>,
}

impl StubEnvironment {
    /// Build from name/value pairs.
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            vars: pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// No variables at all: resolution fails with `MissingApiKey`.
    pub fn empty() -> Self {
        Self::new(&[])
    }

    /// Key but no token: resolution yields `Pending`.
    pub fn key_only() -> Self {
        Self::new(&[(API_KEY_ENV_VAR, "test-key")])
    }

    /// Fully configured credentials.
    pub fn with_credentials() -> Self {
        Self::new(&[(API_KEY_ENV_VAR, "test-key"), (TOKEN_ENV_VAR, "test-token")])
    }
}

impl Environment for StubEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).filter(|v| !v.is_empty()).cloned()
    }
}

type GetCardFn = Box<dyn Fn(&str, u32) -> Result<Card, TrelloError> + Send + Sync>;
type GetBoardFn = Box<dyn Fn(&str) -> Result<Board, TrelloError> + Send + Sync>;
type GetBoardListsFn = Box<dyn Fn(&str) -> Result<Vec<BoardList>, TrelloError> + Send + Sync>;
type CreateCardFn = Box<dyn Fn(&CreateCardRequest) -> Result<Card, TrelloError> + Send + Sync>;
type AddCommentFn = Box<dyn Fn(&str, &str) -> Result<(), TrelloError> + Send + Sync>;
type UploadAttachmentFn = Box<dyn Fn(&str, &str) -> Result<(), TrelloError> + Send + Sync>;
type SetDueCompleteFn = Box<dyn Fn(&str, bool) -> Result<(), TrelloError> + Send + Sync>;

/// Call-counting mock of the Trello API client.
///
/// Query methods fail when no expectation is set; mutation methods default
/// to success. Every invocation is recorded by method name so tests can
/// assert on exactly which calls (if any) were made.
#[derive(Default)]
pub struct MockTrelloApi {
    get_card: Mutex<Option<GetCardFn>>,
    get_board: Mutex<Option<GetBoardFn>>,
    get_board_lists: Mutex<Option<GetBoardListsFn>>,
    create_card: Mutex<Option<CreateCardFn>>,
    add_comment: Mutex<Option<AddCommentFn>>,
    upload_attachment: Mutex<Option<UploadAttachmentFn>>,
    set_due_complete: Mutex<Option<SetDueCompleteFn>>,
    calls: Mutex<Vec<String>>,
}

impl MockTrelloApi {
    /// Create a mock with no expectations set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of API calls made through this mock.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Method names of every call made, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Set the `get_card` expectation.
    pub fn expect_get_card<F>(&mut self, f: F)
    where
        F: Fn(&str, u32) -> Result<Card, TrelloError> + Send + Sync + 'static,
    {
        *self.get_card.lock().unwrap() = Some(Box::new(f));
    }

    /// Set the `get_board` expectation.
    pub fn expect_get_board<F>(&mut self, f: F)
    where
        F: Fn(&str) -> Result<Board, TrelloError> + Send + Sync + 'static,
    {
        *self.get_board.lock().unwrap() = Some(Box::new(f));
    }

    /// Set the `get_board_lists` expectation.
    pub fn expect_get_board_lists<F>(&mut self, f: F)
    where
        F: Fn(&str) -> Result<Vec<BoardList>, TrelloError> + Send + Sync + 'static,
    {
        *self.get_board_lists.lock().unwrap() = Some(Box::new(f));
    }

    /// Set the `create_card` expectation.
    pub fn expect_create_card<F>(&mut self, f: F)
    where
        F: Fn(&CreateCardRequest) -> Result<Card, TrelloError> + Send + Sync + 'static,
    {
        *self.create_card.lock().unwrap() = Some(Box::new(f));
    }

    /// Set the `add_comment` expectation.
    pub fn expect_add_comment<F>(&mut self, f: F)
    where
        F: Fn(&str, &str) -> Result<(), TrelloError> + Send + Sync + 'static,
    {
        *self.add_comment.lock().unwrap() = Some(Box::new(f));
    }

    /// Set the `upload_attachment` expectation (card id, file name).
    pub fn expect_upload_attachment<F>(&mut self, f: F)
    where
        F: Fn(&str, &str) -> Result<(), TrelloError> + Send + Sync + 'static,
    {
        *self.upload_attachment.lock().unwrap() = Some(Box::new(f));
    }

    /// Set the `set_due_complete` expectation.
    pub fn expect_set_due_complete<F>(&mut self, f: F)
    where
        F: Fn(&str, bool) -> Result<(), TrelloError> + Send + Sync + 'static,
    {
        *self.set_due_complete.lock().unwrap() = Some(Box::new(f));
    }

    fn record(&self, method: &str) {
        self.calls.lock().unwrap().push(method.to_string());
    }
}

#[async_trait]
impl TrelloApi for MockTrelloApi {
    async fn get_card(
        &self,
        _creds: &Credentials,
        card_id: &str,
        actions_limit: u32,
    ) -> Result<Card, TrelloError> {
        self.record("get_card");
        match &*self.get_card.lock().unwrap() {
            Some(f) => f(card_id, actions_limit),
            None => Err(TrelloError::Network("get_card not mocked".to_string())),
        }
    }

    async fn get_board(&self, _creds: &Credentials, board_id: &str) -> Result<Board, TrelloError> {
        self.record("get_board");
        match &*self.get_board.lock().unwrap() {
            Some(f) => f(board_id),
            None => Err(TrelloError::Network("get_board not mocked".to_string())),
        }
    }

    async fn get_board_lists(
        &self,
        _creds: &Credentials,
        board_id: &str,
    ) -> Result<Vec<BoardList>, TrelloError> {
        self.record("get_board_lists");
        match &*self.get_board_lists.lock().unwrap() {
            Some(f) => f(board_id),
            None => Err(TrelloError::Network("get_board_lists not mocked".to_string())),
        }
    }

    async fn create_card(
        &self,
        _creds: &Credentials,
        request: &CreateCardRequest,
    ) -> Result<Card, TrelloError> {
        self.record("create_card");
        match &*self.create_card.lock().unwrap() {
            Some(f) => f(request),
            None => Err(TrelloError::Network("create_card not mocked".to_string())),
        }
    }

    async fn add_comment(
        &self,
        _creds: &Credentials,
        card_id: &str,
        text: &str,
    ) -> Result<(), TrelloError> {
        self.record("add_comment");
        match &*self.add_comment.lock().unwrap() {
            Some(f) => f(card_id, text),
            None => Ok(()),
        }
    }

    async fn upload_attachment(
        &self,
        _creds: &Credentials,
        card_id: &str,
        file_name: &str,
        _contents: Vec<u8>,
    ) -> Result<(), TrelloError> {
        self.record("upload_attachment");
        match &*self.upload_attachment.lock().unwrap() {
            Some(f) => f(card_id, file_name),
            None => Ok(()),
        }
    }

    async fn set_due_complete(
        &self,
        _creds: &Credentials,
        card_id: &str,
        complete: bool,
    ) -> Result<(), TrelloError> {
        self.record("set_due_complete");
        match &*self.set_due_complete.lock().unwrap() {
            Some(f) => f(card_id, complete),
            None => Ok(()),
        }
    }
}

/// A card with one attachment and no comments.
pub fn sample_card() -> Card {
    serde_json::from_value(serde_json::json!({
        "id": "5f0000000000000000000001",
        "name": "Ship the release",
        "desc": "Cut the tag and publish.",
        "due": "2026-08-20T12:00:00.000Z",
        "shortLink": "abc123",
        "shortUrl": "https://trello.com/c/abc123",
        "dateLastActivity": "2026-08-01T09:30:00.000Z",
        "labels": [{"id": "lab1", "name": "release", "color": "green"}],
        "members": [{"id": "mem1", "fullName": "Dana Author", "username": "dana"}],
        "attachments": [
            {"name": "notes.txt", "url": "https://example.com/notes.txt",
             "bytes": 2048, "mimeType": "text/plain", "isUpload": true}
        ],
        "actions": []
    }))
    .expect("sample card payload is valid")
}

/// Build a `commentCard` action.
pub fn comment(id: &str, date: &str, author: &str, text: &str) -> CommentAction {
    CommentAction {
        id: id.to_string(),
        date: Some(date.to_string()),
        member_creator: Some(Member {
            id: format!("id-{author}"),
            full_name: Some(author.to_string()),
            username: None,
        }),
        data: CommentData {
            text: Some(text.to_string()),
        },
    }
}

/// Build a board list.
pub fn board_list(id: &str, name: &str) -> BoardList {
    BoardList {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Build a board.
pub fn sample_board(id: &str, name: &str) -> Board {
    Board {
        id: id.to_string(),
        name: name.to_string(),
        short_link: Some("brd123".to_string()),
    }
}
