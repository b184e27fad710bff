use muse_actors::actor::spawn_actor;
use muse_actors::{FetchCmd, QuoteFetchActor};
use muse_quotes::{QuoteClient, QuoteSource, ResponseShape, TextField};
use tokio::sync::oneshot;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, shape: ResponseShape) -> QuoteClient {
    let url = Url::parse(&format!("{}/quotes", server.uri())).unwrap();
    QuoteClient::new(QuoteSource::new("test", url, shape, None)).unwrap()
}

#[tokio::test]
async fn fetch_command_replies_with_quotes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"content": "Less is more.", "author": "M"},
        ])))
        .mount(&server)
        .await;

    let actor = QuoteFetchActor::new(client_for(
        &server,
        ResponseShape::JsonArray {
            field: TextField::Content,
        },
    ));
    let handle = spawn_actor(actor, 8);

    let (tx, rx) = oneshot::channel();
    handle.addr.send(FetchCmd { reply: tx }).await.ok().unwrap();
    let quotes = rx.await.unwrap().unwrap();
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].display_line(), "\"Less is more.\" - M");

    drop(handle.addr);
    handle.task.await.unwrap().unwrap();
}

#[tokio::test]
async fn fetch_failure_travels_through_the_reply_and_actor_survives() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(2)
        .mount(&server)
        .await;

    let actor = QuoteFetchActor::new(client_for(
        &server,
        ResponseShape::JsonArray {
            field: TextField::Content,
        },
    ));
    let handle = spawn_actor(actor, 8);

    // First command fails...
    let (tx, rx) = oneshot::channel();
    handle.addr.send(FetchCmd { reply: tx }).await.ok().unwrap();
    assert!(rx.await.unwrap().is_err());

    // ...and the actor still answers the next one.
    let (tx, rx) = oneshot::channel();
    handle.addr.send(FetchCmd { reply: tx }).await.ok().unwrap();
    assert!(rx.await.unwrap().is_err());

    drop(handle.addr);
    handle.task.await.unwrap().unwrap();
}
