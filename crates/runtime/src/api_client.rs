//! Trello REST API client
//!
//! The [`TrelloApi`] trait is the seam the command layer depends on; the
//! [`TrelloHttpClient`] is the production implementation. Authentication is
//! query-string based (`key`, `token`) on every request, per Trello's wire
//! contract. Nothing here retries: every failure maps to a [`TrelloError`]
//! variant and is surfaced to the caller verbatim.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::DEFAULT_API_TIMEOUT_SECS;
use crate::credentials::Credentials;
use crate::error::TrelloError;
use crate::types::{Board, BoardList, Card, CreateCardRequest};

/// Card fields requested on fetch
const CARD_FIELDS: &str =
    "name,desc,due,dueComplete,shortUrl,shortLink,dateLastActivity,badges,idBoard,idList";
/// Attachment metadata fields requested on fetch
const ATTACHMENT_FIELDS: &str = "name,url,downloadUrl,bytes,date,mimeType,isUpload";
/// Action fields requested on fetch
const ACTION_FIELDS: &str = "id,date,memberCreator,data";
/// Label fields requested on fetch
const LABEL_FIELDS: &str = "name,color";
/// Member fields requested on fetch
const MEMBER_FIELDS: &str = "fullName,username";

/// Trello API operations the command layer depends on.
#[async_trait]
pub trait TrelloApi: Send + Sync {
    /// Fetch a card with its comments, attachments, labels and members.
    async fn get_card(
        &self,
        creds: &Credentials,
        card_id: &str,
        actions_limit: u32,
    ) -> Result<Card, TrelloError>;

    /// Fetch a board's id, name and short link.
    async fn get_board(&self, creds: &Credentials, board_id: &str) -> Result<Board, TrelloError>;

    /// Fetch the open lists on a board.
    async fn get_board_lists(
        &self,
        creds: &Credentials,
        board_id: &str,
    ) -> Result<Vec<BoardList>, TrelloError>;

    /// Create a card; returns the created payload including id and short link.
    async fn create_card(
        &self,
        creds: &Credentials,
        request: &CreateCardRequest,
    ) -> Result<Card, TrelloError>;

    /// Leave a comment on a card.
    async fn add_comment(
        &self,
        creds: &Credentials,
        card_id: &str,
        text: &str,
    ) -> Result<(), TrelloError>;

    /// Upload a file attachment to a card.
    async fn upload_attachment(
        &self,
        creds: &Credentials,
        card_id: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<(), TrelloError>;

    /// Set or clear the card's due-complete flag.
    async fn set_due_complete(
        &self,
        creds: &Credentials,
        card_id: &str,
        complete: bool,
    ) -> Result<(), TrelloError>;
}

/// Production client over the Trello REST API.
pub struct TrelloHttpClient {
    http: reqwest::Client,
}

impl TrelloHttpClient {
    /// Build a client with the standard request timeout.
    pub fn new() -> Result<Self, TrelloError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_API_TIMEOUT_SECS))
            .build()
            .map_err(|e| TrelloError::Network(e.to_string()))?;
        Ok(Self { http })
    }

    fn endpoint(creds: &Credentials, path: &str) -> String {
        format!("{}{}", creds.api_base_url, path)
    }

    fn auth_query(creds: &Credentials) -> [(&'static str, String); 2] {
        [
            ("key", creds.api_key.clone()),
            ("token", creds.token.clone()),
        ]
    }
}

fn transport_error(e: reqwest::Error) -> TrelloError {
    TrelloError::Network(e.to_string())
}

/// Map a non-success response to the error taxonomy. `not_found` supplies the
/// identifier-specific 404 error when the endpoint has one.
async fn check_status(
    response: Response,
    path: &str,
    not_found: Option<TrelloError>,
) -> Result<Response, TrelloError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        if let Some(err) = not_found {
            return Err(err);
        }
    }
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return Err(TrelloError::AuthRejected {
            status: status.as_u16(),
        });
    }
    let body = response.text().await.unwrap_or_default();
    Err(TrelloError::Api {
        status: status.as_u16(),
        path: path.to_string(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(
    response: Response,
    path: &str,
    not_found: Option<TrelloError>,
) -> Result<T, TrelloError> {
    let response = check_status(response, path, not_found).await?;
    response.json::<T>().await.map_err(|e| TrelloError::Decode {
        path: path.to_string(),
        detail: e.to_string(),
    })
}

#[async_trait]
impl TrelloApi for TrelloHttpClient {
    async fn get_card(
        &self,
        creds: &Credentials,
        card_id: &str,
        actions_limit: u32,
    ) -> Result<Card, TrelloError> {
        let path = format!("/cards/{card_id}");
        let query = [
            ("fields", CARD_FIELDS.to_string()),
            ("attachments", "true".to_string()),
            ("attachment_fields", ATTACHMENT_FIELDS.to_string()),
            ("labels", "true".to_string()),
            ("label_fields", LABEL_FIELDS.to_string()),
            ("members", "true".to_string()),
            ("member_fields", MEMBER_FIELDS.to_string()),
            ("actions", "commentCard".to_string()),
            ("actions_limit", actions_limit.to_string()),
            ("actions_fields", ACTION_FIELDS.to_string()),
        ];
        debug!(%path, actions_limit, "fetching card");
        let response = self
            .http
            .get(Self::endpoint(creds, &path))
            .query(&Self::auth_query(creds))
            .query(&query)
            .send()
            .await
            .map_err(transport_error)?;
        decode(
            response,
            &path,
            Some(TrelloError::CardNotFound(card_id.to_string())),
        )
        .await
    }

    async fn get_board(&self, creds: &Credentials, board_id: &str) -> Result<Board, TrelloError> {
        let path = format!("/boards/{board_id}");
        debug!(%path, "fetching board");
        let response = self
            .http
            .get(Self::endpoint(creds, &path))
            .query(&Self::auth_query(creds))
            .query(&[("fields", "id,name,shortLink")])
            .send()
            .await
            .map_err(transport_error)?;
        decode(
            response,
            &path,
            Some(TrelloError::BoardNotFound(board_id.to_string())),
        )
        .await
    }

    async fn get_board_lists(
        &self,
        creds: &Credentials,
        board_id: &str,
    ) -> Result<Vec<BoardList>, TrelloError> {
        let path = format!("/boards/{board_id}/lists");
        debug!(%path, "fetching board lists");
        let response = self
            .http
            .get(Self::endpoint(creds, &path))
            .query(&Self::auth_query(creds))
            .query(&[("fields", "id,name"), ("filter", "open")])
            .send()
            .await
            .map_err(transport_error)?;
        decode(
            response,
            &path,
            Some(TrelloError::BoardNotFound(board_id.to_string())),
        )
        .await
    }

    async fn create_card(
        &self,
        creds: &Credentials,
        request: &CreateCardRequest,
    ) -> Result<Card, TrelloError> {
        let path = "/cards";
        debug!(list = %request.id_list, "creating card");
        let response = self
            .http
            .post(Self::endpoint(creds, path))
            .query(&Self::auth_query(creds))
            .form(request)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response, path, None).await
    }

    async fn add_comment(
        &self,
        creds: &Credentials,
        card_id: &str,
        text: &str,
    ) -> Result<(), TrelloError> {
        let path = format!("/cards/{card_id}/actions/comments");
        debug!(%path, "adding comment");
        let response = self
            .http
            .post(Self::endpoint(creds, &path))
            .query(&Self::auth_query(creds))
            .form(&[("text", text)])
            .send()
            .await
            .map_err(transport_error)?;
        check_status(
            response,
            &path,
            Some(TrelloError::CardNotFound(card_id.to_string())),
        )
        .await?;
        Ok(())
    }

    async fn upload_attachment(
        &self,
        creds: &Credentials,
        card_id: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<(), TrelloError> {
        let path = format!("/cards/{card_id}/attachments");
        debug!(%path, file_name, "uploading attachment");
        let form = Form::new().text("name", file_name.to_string()).part(
            "file",
            Part::bytes(contents).file_name(file_name.to_string()),
        );
        let response = self
            .http
            .post(Self::endpoint(creds, &path))
            .query(&Self::auth_query(creds))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        check_status(
            response,
            &path,
            Some(TrelloError::CardNotFound(card_id.to_string())),
        )
        .await?;
        Ok(())
    }

    async fn set_due_complete(
        &self,
        creds: &Credentials,
        card_id: &str,
        complete: bool,
    ) -> Result<(), TrelloError> {
        let path = format!("/cards/{card_id}");
        debug!(%path, complete, "updating dueComplete");
        let response = self
            .http
            .put(Self::endpoint(creds, &path))
            .query(&Self::auth_query(creds))
            .form(&[("dueComplete", complete.to_string())])
            .send()
            .await
            .map_err(transport_error)?;
        check_status(
            response,
            &path,
            Some(TrelloError::CardNotFound(card_id.to_string())),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_credentials(base_url: &str) -> Credentials {
        Credentials {
            api_key: "test-key".to_string(),
            token: "test-token".to_string(),
            auth_scope: "read,write".to_string(),
            api_base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[tokio::test]
    async fn get_card_sends_fixed_query_and_decodes_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cards/abc123"))
            .and(query_param("key", "test-key"))
            .and(query_param("token", "test-token"))
            .and(query_param("actions", "commentCard"))
            .and(query_param("actions_limit", "2"))
            .and(query_param("attachments", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "5f0000000000000000000001",
                "name": "Ship the release",
                "desc": "Notes",
                "shortLink": "abc123",
                "attachments": [{"name": "log.txt", "bytes": 2048, "isUpload": true}],
                "actions": []
            })))
            .mount(&server)
            .await;

        let client = TrelloHttpClient::new().unwrap();
        let card = client
            .get_card(&test_credentials(&server.uri()), "abc123", 2)
            .await
            .unwrap();
        assert_eq!(card.name, "Ship the release");
        assert_eq!(card.attachments.len(), 1);
        assert_eq!(card.attachments[0].bytes, Some(2048));
    }

    #[tokio::test]
    async fn get_card_maps_404_to_card_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cards/nope"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let client = TrelloHttpClient::new().unwrap();
        let err = client
            .get_card(&test_credentials(&server.uri()), "nope", 100)
            .await
            .unwrap_err();
        assert!(matches!(err, TrelloError::CardNotFound(ref id) if id == "nope"));
        assert!(err.to_string().contains("nope"));
    }

    #[tokio::test]
    async fn get_card_maps_401_to_auth_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cards/abc123"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
            .mount(&server)
            .await;

        let client = TrelloHttpClient::new().unwrap();
        let err = client
            .get_card(&test_credentials(&server.uri()), "abc123", 100)
            .await
            .unwrap_err();
        assert!(matches!(err, TrelloError::AuthRejected { status: 401 }));
        assert!(err.to_string().contains("trel auth url"));
    }

    #[tokio::test]
    async fn get_board_lists_maps_404_to_board_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/boards/missing/lists"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let client = TrelloHttpClient::new().unwrap();
        let err = client
            .get_board_lists(&test_credentials(&server.uri()), "missing")
            .await
            .unwrap_err();
        assert!(matches!(err, TrelloError::BoardNotFound(ref id) if id == "missing"));
    }

    #[tokio::test]
    async fn create_card_posts_form_body_with_resolved_list_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cards"))
            .and(query_param("key", "test-key"))
            .and(body_string_contains("idList=list-42"))
            .and(body_string_contains("name=New+card"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "5f0000000000000000000002",
                "name": "New card",
                "shortUrl": "https://trello.com/c/xyz789"
            })))
            .mount(&server)
            .await;

        let client = TrelloHttpClient::new().unwrap();
        let request = CreateCardRequest {
            name: "New card".to_string(),
            id_list: "list-42".to_string(),
            desc: None,
            pos: None,
            due: None,
            id_labels: None,
            id_members: None,
            url_source: None,
        };
        let card = client
            .create_card(&test_credentials(&server.uri()), &request)
            .await
            .unwrap();
        assert_eq!(card.id, "5f0000000000000000000002");
        assert_eq!(card.short_url.as_deref(), Some("https://trello.com/c/xyz789"));
    }

    #[tokio::test]
    async fn unexpected_status_surfaces_body_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cards/abc123"))
            .respond_with(ResponseTemplate::new(500).set_body_string("server exploded"))
            .mount(&server)
            .await;

        let client = TrelloHttpClient::new().unwrap();
        let err = client
            .get_card(&test_credentials(&server.uri()), "abc123", 100)
            .await
            .unwrap_err();
        match err {
            TrelloError::Api { status, body, .. } => {
                assert_eq!(status, 500);
                assert_eq!(body, "server exploded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_failure_maps_to_network_error() {
        // Nothing listens on this port.
        let client = TrelloHttpClient::new().unwrap();
        let err = client
            .get_board(&test_credentials("http://127.0.0.1:1"), "b1")
            .await
            .unwrap_err();
        assert!(matches!(err, TrelloError::Network(_)));
    }

    #[tokio::test]
    async fn set_due_complete_puts_flag() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/cards/abc123"))
            .and(body_string_contains("dueComplete=true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "abc123"})))
            .mount(&server)
            .await;

        let client = TrelloHttpClient::new().unwrap();
        client
            .set_due_complete(&test_credentials(&server.uri()), "abc123", true)
            .await
            .unwrap();
    }
}
