//! End-to-end pipeline tests: mask, render, walk.

use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prosemark_core::{Document, IgnoreRules, PlaceholderTemplate, html, mask};
use prosemark_render::{RendererGateway, STARTUP_DEADLINE, wait_until_reachable};

fn templates() -> (PlaceholderTemplate, PlaceholderTemplate) {
    let block = PlaceholderTemplate::new("\n```\n{}\n```\n").expect("valid block template");
    let inline = PlaceholderTemplate::new("`{}`").expect("valid inline template");
    (block, inline)
}

fn math_rules() -> IgnoreRules {
    let mut rules = IgnoreRules {
        source: ".prosemark.ini".into(),
        ..IgnoreRules::default()
    };
    rules
        .token
        .insert("*.md".to_string(), vec![r"\$(.+?)\$".to_string()]);
    rules
}

#[tokio::test]
async fn service_mode_pipeline_reports_segments_with_outline() {
    let doc = Document::new(
        "guide.md",
        "---\ntitle: Guide\n---\n# Install\n\nRun $pip$ to install.\n",
    );
    let (block, inline) = templates();
    let masked = mask(&doc, &block, &inline, &math_rules()).expect("masking succeeds");
    assert!(masked.contains("`pip`"));

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("`pip`"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<h1>Install</h1>\n<p>Run <code>pip</code> to install.</p>\n"),
        )
        .mount(&server)
        .await;

    let gateway = RendererGateway::service(server.uri());
    let rendered = gateway.render(&doc, &masked).await.expect("render succeeds");

    let text = html::decode(&rendered);
    let segments: Vec<_> = html::ProseWalker::new(&doc, &text, 0).collect();

    let texts: Vec<_> = segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["Install", "Run ", " to install."]);
    assert!(segments.iter().all(|s| s.heading_depth == Some(1)));
}

#[tokio::test]
async fn local_mode_pipeline_keeps_masked_tokens_out_of_prose() {
    let doc = Document::new("notes.md", "Choose $alpha$ over $beta$ here.\n");
    let (block, inline) = templates();
    let masked = mask(&doc, &block, &inline, &math_rules()).expect("masking succeeds");

    let gateway = RendererGateway::local();
    let rendered = gateway.render(&doc, &masked).await.expect("render succeeds");

    let text = html::decode(&rendered);
    let prose: String = html::ProseWalker::new(&doc, &text, 0)
        .map(|s| s.text)
        .collect();

    assert!(prose.contains("Choose"));
    assert!(prose.contains("here."));
    assert!(!prose.contains("alpha"), "masked token leaked: {prose:?}");
    assert!(!prose.contains("beta"), "masked token leaked: {prose:?}");
}

#[tokio::test]
async fn probe_gates_the_first_service_render() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>ok</p>"))
        .mount(&server)
        .await;

    let address = server
        .uri()
        .trim_start_matches("http://")
        .to_string();
    wait_until_reachable(&address, STARTUP_DEADLINE)
        .await
        .expect("renderer is reachable");

    let doc = Document::new("guide.md", "ok\n");
    let gateway = RendererGateway::service(server.uri());
    let rendered = gateway.render(&doc, "ok\n").await.expect("render succeeds");
    assert_eq!(rendered, b"<p>ok</p>");
}

#[tokio::test]
async fn extracted_docstrings_flow_through_the_markup_pipeline() {
    use prosemark_code::{Language, ProfileRegistry};

    let registry = ProfileRegistry::new().expect("profiles compile");
    let profile = registry.lookup(Language::Python).expect("python profile");

    let source = "def greet():\n    \"\"\"Says *hello* politely.\"\"\"\n    pass\n";
    let spans = profile.extract(source).expect("extraction succeeds");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].text, "Says *hello* politely.");

    let fragment = Document::new("greet.py", spans[0].text.clone());
    let gateway = RendererGateway::local();
    let rendered = gateway
        .render(&fragment, &fragment.content)
        .await
        .expect("render succeeds");

    let text = html::decode(&rendered);
    let prose: String = html::ProseWalker::new(&fragment, &text, spans[0].start)
        .map(|s| s.text)
        .collect();
    assert!(prose.contains("Says"));
    assert!(prose.contains("hello"));
}
