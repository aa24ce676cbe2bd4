use std::env;

use anyhow::bail;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::notify::notifier::AlertTransport;

const ENV_ACCESS_KEY_ID: &str = "QUORUMCHECK_ACCESS_KEY_ID";
const ENV_SECRET_ACCESS_KEY: &str = "QUORUMCHECK_SECRET_ACCESS_KEY";

/// Configuration for the topic the alerts are published to. When both static credentials are
///  set they are used as-is; otherwise credentials are resolved from the environment
///  (`QUORUMCHECK_ACCESS_KEY_ID` / `QUORUMCHECK_SECRET_ACCESS_KEY`), and the request goes out
///  unauthenticated if neither source provides them.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TopicConfig {
    /// base URL of the pub/sub service
    pub endpoint: String,

    /// topic the alerts are published to
    pub topic: String,

    #[serde(default)]
    pub access_key_id: Option<String>,

    #[serde(default)]
    pub secret_access_key: Option<String>,
}

/// [AlertTransport] publishing each alert as one `POST {endpoint}/topics/{topic}/publish`
///  request with a JSON `{subject, message}` body.
pub struct TopicPublisher {
    config: TopicConfig,
    client: reqwest::Client,
}

impl TopicPublisher {
    pub fn new(config: TopicConfig) -> TopicPublisher {
        TopicPublisher {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn credentials(&self) -> Option<(String, String)> {
        if let (Some(key), Some(secret)) = (&self.config.access_key_id, &self.config.secret_access_key) {
            return Some((key.clone(), secret.clone()));
        }
        match (env::var(ENV_ACCESS_KEY_ID), env::var(ENV_SECRET_ACCESS_KEY)) {
            (Ok(key), Ok(secret)) => Some((key, secret)),
            _ => None,
        }
    }
}

#[async_trait]
impl AlertTransport for TopicPublisher {
    async fn publish(&self, subject: &str, body: &str) -> anyhow::Result<()> {
        let url = format!("{}/topics/{}/publish", self.config.endpoint, self.config.topic);
        debug!("publishing alert {:?} to {}", subject, url);

        let mut request = self.client.post(&url)
            .json(&json!({
                "subject": subject,
                "message": body,
            }));
        if let Some((key, secret)) = self.credentials() {
            request = request.basic_auth(key, Some(secret));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            bail!("publishing alert to topic {:?} failed: {}", self.config.topic, response.status());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use http_body_util::{BodyExt, Full};
    use hyper::body::{Bytes, Incoming};
    use hyper::service::service_fn;
    use hyper::{Request, Response, StatusCode};
    use hyper_util::rt::TokioIo;
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    use super::*;

    struct CapturedRequest {
        uri: String,
        authorization: Option<String>,
        body: Bytes,
    }

    /// serves exactly one request with the given status, handing the request back for assertions
    async fn serve_once(status: StatusCode) -> (String, oneshot::Receiver<CapturedRequest>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let tx = std::sync::Arc::new(std::sync::Mutex::new(Some(tx)));
            let service = service_fn(move |req: Request<Incoming>| {
                let tx = tx.clone();
                async move {
                    let tx = tx.lock().unwrap().take();
                    let uri = req.uri().path().to_string();
                    let authorization = req.headers()
                        .get("authorization")
                        .map(|v| v.to_str().unwrap().to_string());
                    let body = req.into_body().collect().await.unwrap().to_bytes();
                    if let Some(tx) = tx {
                        tx.send(CapturedRequest { uri, authorization, body }).ok();
                    }
                    Ok::<_, Infallible>(
                        Response::builder()
                            .status(status)
                            .body(Full::new(Bytes::new()))
                            .unwrap(),
                    )
                }
            });
            hyper::server::conn::http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
                .ok();
        });

        (format!("http://{}", addr), rx)
    }

    fn topic_config(endpoint: String) -> TopicConfig {
        TopicConfig {
            endpoint,
            topic: "zk-alerts".to_string(),
            access_key_id: None,
            secret_access_key: None,
        }
    }

    #[tokio::test]
    async fn test_publish_sends_subject_and_message() {
        let (endpoint, rx) = serve_once(StatusCode::OK).await;
        let publisher = TopicPublisher::new(topic_config(endpoint));

        publisher.publish("[quorumcheck] zk down", "== zk - down\n").await.unwrap();

        let request = rx.await.unwrap();
        assert_eq!(request.uri, "/topics/zk-alerts/publish");

        let payload: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(payload["subject"], "[quorumcheck] zk down");
        assert_eq!(payload["message"], "== zk - down\n");
    }

    #[tokio::test]
    async fn test_static_credentials_sent_as_basic_auth() {
        let (endpoint, rx) = serve_once(StatusCode::OK).await;
        let mut config = topic_config(endpoint);
        config.access_key_id = Some("AKID".to_string());
        config.secret_access_key = Some("sekrit".to_string());

        TopicPublisher::new(config).publish("subject", "body").await.unwrap();

        let request = rx.await.unwrap();
        let authorization = request.authorization.expect("no authorization header sent");
        assert!(authorization.starts_with("Basic "));
    }

    #[tokio::test]
    async fn test_failed_publish_is_a_hard_error() {
        let (endpoint, _rx) = serve_once(StatusCode::INTERNAL_SERVER_ERROR).await;
        let publisher = TopicPublisher::new(topic_config(endpoint));

        let result = publisher.publish("subject", "body").await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("zk-alerts"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_hard_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let publisher = TopicPublisher::new(topic_config(endpoint));
        assert!(publisher.publish("subject", "body").await.is_err());
    }
}
