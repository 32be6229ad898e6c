mod support;

use std::time::Duration;

use points_board::api::ApiClient;
use points_board::models::TimeWindow;

use support::{ranked_entries, MockApi, MockState};

const TIMEOUT: Duration = Duration::from_millis(2_000);

fn client_for(api: &MockApi) -> ApiClient {
    ApiClient::new(api.base_url().to_string(), TIMEOUT).expect("api client")
}

#[tokio::test]
async fn fetch_page_returns_rows_and_pagination() {
    let api = MockApi::spawn(MockState {
        entries: ranked_entries(25),
        ..MockState::default()
    })
    .await;
    let client = client_for(&api);

    let page = client
        .fetch_page(2, TimeWindow::All)
        .await
        .expect("page 2 should load");
    assert_eq!(page.data.len(), 10);
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.pagination.total, 25);
    assert_eq!(page.pagination.total_pages, 3);

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("/leaderboard/?"));
    assert!(requests[0].contains("page=2"));
    assert!(requests[0].contains("limit=10"));
    assert!(requests[0].contains("period=all"));
}

#[tokio::test]
async fn empty_result_set_is_a_success_not_a_failure() {
    let api = MockApi::spawn(MockState::default()).await;
    let client = client_for(&api);

    let page = client
        .fetch_page(1, TimeWindow::Today)
        .await
        .expect("an empty set is still a successful fetch");
    assert!(page.data.is_empty());
    assert_eq!(page.pagination.total, 0);
}

#[tokio::test]
async fn server_error_collapses_to_none() {
    let api = MockApi::spawn(MockState {
        entries: ranked_entries(5),
        fail_leaderboard: true,
        ..MockState::default()
    })
    .await;
    let client = client_for(&api);

    assert!(client.fetch_page(1, TimeWindow::All).await.is_none());
}

#[tokio::test]
async fn malformed_body_collapses_to_none() {
    let api = MockApi::spawn(MockState {
        malformed_leaderboard: true,
        ..MockState::default()
    })
    .await;
    let client = client_for(&api);

    assert!(client.fetch_page(1, TimeWindow::All).await.is_none());
}

#[tokio::test]
async fn unreachable_server_collapses_to_none() {
    let client =
        ApiClient::new("http://127.0.0.1:1".to_string(), TIMEOUT).expect("api client");
    assert!(client.fetch_page(1, TimeWindow::All).await.is_none());
    assert!(client.fetch_statistics(TimeWindow::All).await.is_none());
}

#[tokio::test]
async fn fetch_statistics_carries_the_requested_period() {
    let api = MockApi::spawn(MockState {
        total_users: 4_200,
        total_supplied: 1_250_000.0,
        total_borrowed: 850_000.0,
        total_assets: 12,
        ..MockState::default()
    })
    .await;
    let client = client_for(&api);

    let statistics = client
        .fetch_statistics(TimeWindow::Week)
        .await
        .expect("statistics should load");
    assert_eq!(statistics.period, "week");
    assert_eq!(statistics.total_users, 4_200);

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("/leaderboard/statistics?"));
    assert!(requests[0].contains("period=week"));
}

#[tokio::test]
async fn statistics_failure_collapses_to_none() {
    let api = MockApi::spawn(MockState {
        fail_statistics: true,
        ..MockState::default()
    })
    .await;
    let client = client_for(&api);

    assert!(client.fetch_statistics(TimeWindow::Month).await.is_none());
}
