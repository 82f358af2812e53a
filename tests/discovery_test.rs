// Endpoint discovery against a mocked root page.

use std::time::Duration;

use bounty_rs_scanner::core::discovery::EndpointDiscovery;
use bounty_rs_scanner::core::http::HttpClient;
use bounty_rs_scanner::core::target::Target;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn discovery() -> EndpointDiscovery {
    EndpointDiscovery::new(HttpClient::new("BountyHunter/1.0", Duration::from_secs(5)).unwrap())
}

#[tokio::test]
async fn root_forms_and_links_become_endpoints() {
    let server = MockServer::start().await;
    let html = r#"
        <html><body>
            <form action="/login" method="post"><input name="user"></form>
            <a href="/about">About</a>
            <a href="/about#team">Team</a>
            <a href="https://elsewhere.test/">Partner</a>
        </body></html>
    "#;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;

    let target = Target::parse(&server.uri()).unwrap();
    let endpoints = discovery().discover(&target).await;

    let root = format!("{}/", server.uri());
    assert_eq!(
        endpoints,
        vec![root.clone(), format!("{}login", root), format!("{}about", root)]
    );
}

#[tokio::test]
async fn form_without_action_posts_to_the_root() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<form><input name="q"></form>"#))
        .mount(&server)
        .await;

    let target = Target::parse(&server.uri()).unwrap();
    let endpoints = discovery().discover(&target).await;
    assert_eq!(endpoints, vec![format!("{}/", server.uri())]);
}

#[tokio::test]
async fn unreachable_root_yields_target_only() {
    let target = Target::parse("http://127.0.0.1:9").unwrap();
    let endpoints = discovery().discover(&target).await;
    assert_eq!(endpoints, vec!["http://127.0.0.1:9/".to_string()]);
}
