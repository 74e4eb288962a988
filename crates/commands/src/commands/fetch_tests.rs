//! Unit tests for the fetch command

use std::sync::Arc;

use crate::commands::CommandStatus;
use crate::commands::fetch::*;
use crate::test_helpers::{MockTrelloApi, StubEnvironment, comment, sample_card};
use trel_common::ui::TestUserInterface;
use trel_runtime::api_client::TrelloApi;
use trel_runtime::deps::{Environment, UserInterface};
use trel_runtime::error::TrelloError;

struct TestFixture {
    ui: Arc<TestUserInterface>,
    env: Arc<StubEnvironment>,
    api: Arc<MockTrelloApi>,
}

impl TestFixture {
    fn new() -> Self {
        Self {
            ui: Arc::new(TestUserInterface::new()),
            env: Arc::new(StubEnvironment::with_credentials()),
            api: Arc::new(MockTrelloApi::new()),
        }
    }

    #[allow(clippy::wrong_self_convention)]
    fn to_deps(self) -> Arc<FetchDependencies> {
        Arc::new(FetchDependencies {
            ui: self.ui as Arc<dyn UserInterface>,
            env: self.env as Arc<dyn Environment>,
            api: self.api as Arc<dyn TrelloApi>,
        })
    }
}

fn fetch_args(card: &str, format: FetchFormat, actions_limit: u32) -> FetchArgs {
    FetchArgs {
        card: card.to_string(),
        format,
        actions_limit,
    }
}

#[tokio::test]
async fn missing_api_key_fails_before_any_network_call() {
    let mut fixture = TestFixture::new();
    fixture.env = Arc::new(StubEnvironment::empty());
    let api = fixture.api.clone();
    let deps = fixture.to_deps();

    let result = execute_with_deps(fetch_args("abc123", FetchFormat::Markdown, 100), &deps).await;

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TrelloError>(),
        Some(TrelloError::MissingApiKey)
    ));
    assert_eq!(api.total_calls(), 0);
}

#[tokio::test]
async fn missing_token_prints_auth_url_and_makes_no_network_call() {
    let mut fixture = TestFixture::new();
    fixture.env = Arc::new(StubEnvironment::key_only());
    let ui = fixture.ui.clone();
    let api = fixture.api.clone();
    let deps = fixture.to_deps();

    let status = execute_with_deps(fetch_args("abc123", FetchFormat::Markdown, 100), &deps)
        .await
        .unwrap();

    assert_eq!(status, CommandStatus::AuthPending);
    assert_eq!(api.total_calls(), 0);
    let output = ui.get_output().join("\n");
    assert!(output.contains("key=test-key"));
    assert!(output.contains("scope=read%2Cwrite"));
    assert!(output.contains("TRELLO_TOKEN"));
}

#[tokio::test]
async fn markdown_output_shows_most_recent_comments_up_to_limit() {
    let mut fixture = TestFixture::new();
    let mut api = MockTrelloApi::new();
    api.expect_get_card(|card_id, actions_limit| {
        assert_eq!(card_id, "abc123");
        assert_eq!(actions_limit, 2);
        let mut card = sample_card();
        card.actions = vec![
            comment("a1", "2026-07-01T10:00:00.000Z", "Ana", "comment one"),
            comment("a2", "2026-07-02T10:00:00.000Z", "Ben", "comment two"),
            comment("a3", "2026-07-03T10:00:00.000Z", "Cam", "comment three"),
            comment("a4", "2026-07-04T10:00:00.000Z", "Dee", "comment four"),
            comment("a5", "2026-07-05T10:00:00.000Z", "Eli", "comment five"),
        ];
        Ok(card)
    });
    fixture.api = Arc::new(api);
    let ui = fixture.ui.clone();
    let deps = fixture.to_deps();

    let status = execute_with_deps(fetch_args("abc123", FetchFormat::Markdown, 2), &deps)
        .await
        .unwrap();

    assert_eq!(status, CommandStatus::Completed);
    let output = ui.get_output().join("\n");
    assert!(output.contains("comment five"));
    assert!(output.contains("comment four"));
    assert!(!output.contains("comment three"));
    assert!(!output.contains("comment one"));
    // Most recent first
    let five = output.find("comment five").unwrap();
    let four = output.find("comment four").unwrap();
    assert!(five < four);
}

#[tokio::test]
async fn json_output_is_structured_payload() {
    let mut fixture = TestFixture::new();
    let mut api = MockTrelloApi::new();
    api.expect_get_card(|_, _| Ok(sample_card()));
    fixture.api = Arc::new(api);
    let ui = fixture.ui.clone();
    let deps = fixture.to_deps();

    execute_with_deps(fetch_args("abc123", FetchFormat::Json, 100), &deps)
        .await
        .unwrap();

    let output = ui.get_output().join("\n");
    assert!(output.contains("\"name\": \"Ship the release\""));
    assert!(output.contains("\"shortLink\": \"abc123\""));
}

#[tokio::test]
async fn card_not_found_surfaces_the_identifier() {
    let mut fixture = TestFixture::new();
    let mut api = MockTrelloApi::new();
    api.expect_get_card(|card_id, _| Err(TrelloError::CardNotFound(card_id.to_string())));
    fixture.api = Arc::new(api);
    let deps = fixture.to_deps();

    let err = execute_with_deps(fetch_args("gone99", FetchFormat::Markdown, 100), &deps)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("gone99"));
}

#[tokio::test]
async fn auth_rejection_carries_reauthorization_hint() {
    let mut fixture = TestFixture::new();
    let mut api = MockTrelloApi::new();
    api.expect_get_card(|_, _| Err(TrelloError::AuthRejected { status: 401 }));
    fixture.api = Arc::new(api);
    let deps = fixture.to_deps();

    let err = execute_with_deps(fetch_args("abc123", FetchFormat::Markdown, 100), &deps)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("trel auth url"));
}
