use muse_quotes::{QuoteClient, QuoteError, QuoteSource, ResponseShape, TextField};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source_for(server: &MockServer, route: &str, shape: ResponseShape, limit: Option<usize>) -> QuoteSource {
    let url = Url::parse(&format!("{}{route}", server.uri())).unwrap();
    QuoteSource::new("test", url, shape, limit)
}

#[tokio::test]
async fn plain_text_body_becomes_one_labelled_quote() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/zen"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Design for failure.\n"))
        .mount(&server)
        .await;

    let source = source_for(
        &server,
        "/zen",
        ResponseShape::PlainText {
            author: "GitHub Zen".into(),
        },
        None,
    );
    let quotes = QuoteClient::new(source).unwrap().fetch().await.unwrap();

    assert_eq!(quotes.len(), 1);
    assert_eq!(
        quotes[0].display_line(),
        "\"Design for failure.\" - GitHub Zen"
    );
}

#[tokio::test]
async fn content_array_preserves_order_and_count() {
    let server = MockServer::start().await;
    let body = serde_json::json!([
        {"content": "First.", "author": "A"},
        {"content": "Second.", "author": "B"},
        {"content": "Third.", "author": "C"},
    ]);
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let source = source_for(
        &server,
        "/quotes",
        ResponseShape::JsonArray {
            field: TextField::Content,
        },
        None,
    );
    let quotes = QuoteClient::new(source).unwrap().fetch().await.unwrap();

    assert_eq!(quotes.len(), 3);
    assert_eq!(quotes[0].display_line(), "\"First.\" - A");
    assert_eq!(quotes[2].display_line(), "\"Third.\" - C");
}

#[tokio::test]
async fn wrapped_array_is_unwrapped_and_truncated() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "quotes": [
            {"quote": "One.", "author": "A"},
            {"quote": "Two.", "author": "B"},
            {"quote": "Three.", "author": "C"},
            {"quote": "Four.", "author": "D"},
        ],
        "total": 4
    });
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let source = source_for(
        &server,
        "/quotes",
        ResponseShape::WrappedArray {
            key: "quotes".into(),
            field: TextField::Quote,
        },
        Some(3),
    );
    let quotes = QuoteClient::new(source).unwrap().fetch().await.unwrap();

    assert_eq!(quotes.len(), 3);
    assert_eq!(quotes[1].display_line(), "\"Two.\" - B");
}

#[tokio::test]
async fn non_success_status_aborts_rendering() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&server)
        .await;

    let source = source_for(
        &server,
        "/quotes",
        ResponseShape::JsonArray {
            field: TextField::Content,
        },
        None,
    );
    let err = QuoteClient::new(source).unwrap().fetch().await.unwrap_err();
    assert!(matches!(err, QuoteError::Http(_)));
}

#[tokio::test]
async fn body_missing_wrapper_key_is_a_parse_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .mount(&server)
        .await;

    let source = source_for(
        &server,
        "/quotes",
        ResponseShape::WrappedArray {
            key: "quotes".into(),
            field: TextField::Quote,
        },
        None,
    );
    let err = QuoteClient::new(source).unwrap().fetch().await.unwrap_err();
    match err {
        QuoteError::Parse(msg) => assert!(msg.contains("quotes")),
        other => panic!("expected Parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn array_with_alternate_field_name_parses() {
    let server = MockServer::start().await;
    let body = serde_json::json!([
        {"quote": "Ship it.", "author": "R"},
    ]);
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let source = source_for(
        &server,
        "/quotes",
        ResponseShape::JsonArray {
            field: TextField::Quote,
        },
        None,
    );
    let quotes = QuoteClient::new(source).unwrap().fetch().await.unwrap();
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].author, "R");
}
