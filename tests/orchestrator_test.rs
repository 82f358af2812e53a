// End-to-end scans against a mocked site with scripted recon backends.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bounty_rs_scanner::core::error::{LookupError, PortScanError, ProbeError, ScanError};
use bounty_rs_scanner::core::http::HttpClient;
use bounty_rs_scanner::core::models::{PortStatus, VulnerabilityClass};
use bounty_rs_scanner::core::recon::Recon;
use bounty_rs_scanner::core::recon::port_scanner::{PortReport, PortScanner};
use bounty_rs_scanner::core::recon::resolver::NameResolver;
use bounty_rs_scanner::core::scanner::external::ExternalScanner;
use bounty_rs_scanner::{ScanConfig, ScanOrchestrator, report};
use hickory_resolver::proto::rr::RecordType;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct NoDns;

#[async_trait]
impl NameResolver for NoDns {
    async fn resolve(&self, _host: &str, _record_type: RecordType) -> Result<Vec<String>, LookupError> {
        Err(LookupError::NotFound)
    }
}

struct WebPorts;

#[async_trait]
impl PortScanner for WebPorts {
    async fn scan(&self, host: &str, _ports: RangeInclusive<u16>) -> Result<Vec<PortReport>, PortScanError> {
        Ok(vec![PortReport::open(host, "tcp", 80), PortReport::open(host, "tcp", 443)])
    }
}

/// Port scan that outlives any short deadline.
struct SlowPorts;

#[async_trait]
impl PortScanner for SlowPorts {
    async fn scan(&self, host: &str, _ports: RangeInclusive<u16>) -> Result<Vec<PortReport>, PortScanError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(vec![PortReport::open(host, "tcp", 80)])
    }
}

struct NotInjectable;

#[async_trait]
impl ExternalScanner for NotInjectable {
    fn name(&self) -> &str {
        "sqlmap"
    }

    async fn run(&self, _url: &str, _timeout: Duration) -> Result<String, ProbeError> {
        Ok("all tested parameters do not appear to be injectable".to_string())
    }
}

fn orchestrator(config: ScanConfig) -> ScanOrchestrator {
    orchestrator_with_ports(config, Arc::new(WebPorts))
}

fn orchestrator_with_ports(config: ScanConfig, ports: Arc<dyn PortScanner>) -> ScanOrchestrator {
    let recon = Recon::new(Arc::new(NoDns), ports, config.subdomain_wordlist.clone());
    let http = HttpClient::new(&config.user_agent, config.probe_timeout()).unwrap();
    ScanOrchestrator::with_components(config, recon, http, Arc::new(NotInjectable))
}

const LANDING_PAGE: &str = r#"
    <html><body>
        <form action="/login" method="post"><input name="user"><input type="password" name="pass"></form>
        <a href="/about">About us</a>
        <a href="https://partner.test/">Partner</a>
    </body></html>
"#;

#[tokio::test]
async fn full_scan_reports_recon_endpoints_and_findings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LANDING_PAGE))
        .mount(&server)
        .await;

    let result = orchestrator(ScanConfig::default()).run(&server.uri()).await.unwrap();
    let root = format!("{}/", server.uri());

    assert!(!result.timed_out);
    assert!(result.subdomains.is_empty());
    assert_eq!(result.ports.get(&80), Some(&PortStatus::Open));
    assert_eq!(result.ports.get(&443), Some(&PortStatus::Open));
    assert_eq!(result.endpoints, vec![root.clone(), format!("{root}login"), format!("{root}about")]);

    assert_eq!(result.findings.len(), 1, "unexpected findings: {:?}", result.findings);
    let csrf = &result.findings[0];
    assert_eq!(csrf.class, VulnerabilityClass::Csrf);
    assert_eq!(csrf.url, root);

    let json: serde_json::Value = serde_json::from_str(&report::to_json(&result).unwrap()).unwrap();
    assert_eq!(json["count"], result.findings.len());
}

#[tokio::test]
async fn only_enabled_checks_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LANDING_PAGE))
        .mount(&server)
        .await;

    let config = ScanConfig {
        enabled_checks: vec![VulnerabilityClass::Xss, VulnerabilityClass::Misconfig],
        ..ScanConfig::default()
    };
    let result = orchestrator(config).run(&server.uri()).await.unwrap();

    assert_eq!(result.endpoints.len(), 3);
    assert!(result.findings_of(VulnerabilityClass::Csrf).next().is_none());
}

#[tokio::test]
async fn malformed_target_is_rejected() {
    let err = orchestrator(ScanConfig::default()).run("ftp://example.com").await.unwrap_err();
    assert!(matches!(err, ScanError::InvalidTarget { .. }));

    let err = orchestrator(ScanConfig::default()).run("   ").await.unwrap_err();
    assert!(matches!(err, ScanError::InvalidTarget { .. }));
}

#[tokio::test]
async fn out_of_scope_target_is_rejected() {
    let config = ScanConfig {
        allowed_domains: vec!["example.com".to_string()],
        ..ScanConfig::default()
    };
    let err = orchestrator(config).run("https://shop.other.test").await.unwrap_err();
    assert!(matches!(err, ScanError::OutOfScope { host } if host == "shop.other.test"));
}

#[tokio::test]
async fn deadline_returns_partial_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(LANDING_PAGE)
                .set_delay(Duration::from_secs(4)),
        )
        .mount(&server)
        .await;

    let config = ScanConfig {
        scan_timeout_secs: 1,
        probe_timeout_secs: 10,
        ..ScanConfig::default()
    };
    let started = std::time::Instant::now();
    let result = orchestrator(config).run(&server.uri()).await.unwrap();

    assert!(result.timed_out);
    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(result.endpoints, vec![format!("{}/", server.uri())]);
    assert!(result.findings.is_empty());
}

#[tokio::test]
async fn scan_runs_on_a_spawned_task() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LANDING_PAGE))
        .mount(&server)
        .await;

    let scanner = orchestrator(ScanConfig::default());
    let target = server.uri();
    let handle = tokio::spawn(async move { scanner.run(&target).await });

    let result = handle.await.unwrap().unwrap();
    assert_eq!(result.endpoints.len(), 3);
    assert_eq!(result.findings_of(VulnerabilityClass::Csrf).count(), 1);
}

#[tokio::test]
async fn oversized_deadline_does_not_overflow_the_clock() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>ok</body></html>"))
        .mount(&server)
        .await;

    let config = ScanConfig {
        scan_timeout_secs: u64::MAX,
        ..ScanConfig::default()
    };
    let result = orchestrator(config).run(&server.uri()).await.unwrap();

    assert!(!result.timed_out);
    assert_eq!(result.endpoints, vec![format!("{}/", server.uri())]);
}

#[tokio::test]
async fn deadline_keeps_finished_work_and_drops_unfinished_recon() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LANDING_PAGE))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;

    let config = ScanConfig {
        scan_timeout_secs: 2,
        probe_timeout_secs: 60,
        ..ScanConfig::default()
    };
    let started = std::time::Instant::now();
    let result = orchestrator_with_ports(config, Arc::new(SlowPorts))
        .run(&server.uri())
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert!(result.timed_out);
    assert!(elapsed >= Duration::from_secs(2), "returned early after {elapsed:?}");
    assert!(elapsed < Duration::from_secs(5), "deadline overrun: {elapsed:?}");
    assert!(result.ports.is_empty());
    assert_eq!(result.endpoints.len(), 3);

    let csrf: Vec<_> = result.findings_of(VulnerabilityClass::Csrf).collect();
    assert_eq!(csrf.len(), 1);
    assert_eq!(csrf[0].url, format!("{}/", server.uri()));
}
