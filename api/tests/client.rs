use chrono::Utc;
use nfl_api::client::{ApiError, NflApi};
use nfl_api::schedule::group_by_weekday;
use nfl_api::GameStatus;

const SCOREBOARD: &str = include_str!("fixtures/scoreboard.json");
const NEWS: &str = include_str!("fixtures/news.json");
const COMPETITION_LEADERS: &str = include_str!("fixtures/scoreboard_competition_leaders.json");

async fn json_mock(server: &mut mockito::ServerGuard, path: &str, body: &str) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn fetch_scoreboard_maps_all_events() {
    let mut server = mockito::Server::new_async().await;
    let mock = json_mock(&mut server, "/scoreboard", SCOREBOARD).await;

    let api = NflApi::new().with_base_url(server.url());
    let board = api.fetch_scoreboard().await.expect("scoreboard should load");

    mock.assert_async().await;
    assert_eq!(board.league, "NFL");
    assert_eq!(board.week, Some(1));
    assert_eq!(board.events.len(), 4);

    let live = board.events.iter().find(|e| e.short_name == "WSH @ TB").unwrap();
    assert_eq!(live.status.kind, GameStatus::InProgress);
    assert_eq!(live.status.clock.as_deref(), Some("7:11"));
    assert_eq!(live.final_score(), None);
}

#[tokio::test]
async fn fetched_events_group_into_weekday_sections() {
    let mut server = mockito::Server::new_async().await;
    let _mock = json_mock(&mut server, "/scoreboard", SCOREBOARD).await;

    let board = NflApi::new()
        .with_base_url(server.url())
        .fetch_scoreboard()
        .await
        .unwrap();
    let sections = group_by_weekday(board.events, &Utc);

    let labels: Vec<&str> = sections.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Friday", "Sunday", "Monday"]);

    let sunday: Vec<&str> = sections[1].events.iter().map(|e| e.short_name.as_str()).collect();
    assert_eq!(sunday, vec!["PIT @ ATL", "WSH @ TB"]);
}

#[tokio::test]
async fn competition_leaders_keep_their_team() {
    let mut server = mockito::Server::new_async().await;
    let _mock = json_mock(&mut server, "/scoreboard", COMPETITION_LEADERS).await;

    let board = NflApi::new()
        .with_base_url(server.url())
        .fetch_scoreboard()
        .await
        .expect("scoreboard should load");

    let competition = board.events[0].competition().expect("one competition");
    assert!(competition.competitors.iter().all(|c| c.leaders.is_empty()));
    let passing = &competition.leaders[0];
    assert_eq!(passing.display_name, "Passing Leader");
    let teams: Vec<Option<&str>> = passing.leaders.iter().map(|l| l.team_id.as_deref()).collect();
    assert_eq!(teams, [Some("23"), Some("1")]);
    assert_eq!(competition.leaders[1].leaders[1].team_id, None);
}

#[tokio::test]
async fn client_error_yields_empty_scoreboard() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server.mock("GET", "/scoreboard").with_status(404).create_async().await;

    let board = NflApi::new()
        .with_base_url(server.url())
        .fetch_scoreboard()
        .await
        .expect("4xx is treated as an empty document");
    assert!(board.events.is_empty());
}

#[tokio::test]
async fn server_error_is_an_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server.mock("GET", "/scoreboard").with_status(503).create_async().await;

    let err = NflApi::new()
        .with_base_url(server.url())
        .fetch_scoreboard()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Api(_, _)), "got {err}");
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = json_mock(&mut server, "/scoreboard", "{\"events\": 42}").await;

    let err = NflApi::new()
        .with_base_url(server.url())
        .fetch_scoreboard()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Parsing(_, _)), "got {err}");
}

#[tokio::test]
async fn fetch_news_maps_articles() {
    let mut server = mockito::Server::new_async().await;
    let mock = json_mock(&mut server, "/news", NEWS).await;

    let articles = NflApi::new()
        .with_base_url(format!("{}/", server.url()))
        .fetch_news()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].id, "41200385");
    assert_eq!(articles[1].id, "9af1b6b7a8d03");
    assert_eq!(articles[1].image, None);
    assert!(articles[1].url.as_deref().unwrap().contains("41150011"));
}

#[tokio::test]
async fn snapshot_file_bypasses_network() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/scoreboard.json");
    let board = NflApi::new()
        .with_base_url("http://127.0.0.1:9")
        .with_snapshot(path)
        .fetch_scoreboard()
        .await
        .unwrap();
    assert_eq!(board.events.len(), 4);
}

#[tokio::test]
async fn missing_snapshot_is_a_snapshot_error() {
    let err = NflApi::new()
        .with_snapshot("/definitely/not/here.json")
        .fetch_scoreboard()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Snapshot(_)));
}
