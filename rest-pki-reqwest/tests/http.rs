use rest_pki::{
    cades::{CadesSignatureExplorer, OPEN_PATH, REQUIRED_HASHES_PATH},
    client::RestClient,
};
use rest_pki_reqwest::{ClientConfig, RestError, RestPkiClient};
use serde_json::{json, Value};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
};

#[derive(Debug)]
struct ReceivedRequest {
    request_line: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ReceivedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Serve one canned response per entry, in order, recording what arrives
async fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<ReceivedRequest>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut received = Vec::new();

        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut buffer = Vec::new();
            let header_end = loop {
                let mut chunk = [0u8; 4096];
                let read = socket.read(&mut chunk).await.unwrap();
                assert!(read > 0, "connection closed before the request was complete");
                buffer.extend_from_slice(&chunk[..read]);
                if let Some(position) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
                    break position + 4;
                }
            };

            let head = String::from_utf8(buffer[..header_end].to_vec()).unwrap();
            let mut lines = head.split("\r\n");
            let request_line = lines.next().unwrap().to_string();
            let headers: Vec<(String, String)> = lines
                .filter_map(|line| line.split_once(": "))
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();

            let content_length = headers
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .map(|(_, value)| value.parse::<usize>().unwrap())
                .unwrap_or(0);
            while buffer.len() < header_end + content_length {
                let mut chunk = [0u8; 4096];
                let read = socket.read(&mut chunk).await.unwrap();
                assert!(read > 0, "connection closed before the body was complete");
                buffer.extend_from_slice(&chunk[..read]);
            }

            received.push(ReceivedRequest {
                request_line,
                headers,
                body: buffer[header_end..header_end + content_length].to_vec(),
            });

            let response = format!(
                "HTTP/1.1 {status} Whatever\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        }

        received
    });

    (format!("http://{address}/restpki"), handle)
}

fn client_for(endpoint: &str) -> RestPkiClient {
    RestPkiClient::new(ClientConfig::new(endpoint, "secret-token").unwrap()).unwrap()
}

#[tokio::test]
async fn it_posts_json_with_bearer_auth() {
    let (endpoint, server) = serve(vec![(200, r#"["SHA256"]"#)]).await;
    let client = client_for(&endpoint);

    let response = client
        .post(REQUIRED_HASHES_PATH, &json!({ "content": "c2lnbmF0dXJl" }))
        .await
        .unwrap();

    let received = server.await.unwrap();
    assert_eq!(response, json!(["SHA256"]));
    assert_eq!(
        received[0].request_line,
        "POST /restpki/Api/CadesSignatures/RequiredHashes HTTP/1.1"
    );
    assert_eq!(received[0].header("authorization"), Some("Bearer secret-token"));
    assert_eq!(received[0].json(), json!({ "content": "c2lnbmF0dXJl" }));
}

#[tokio::test]
async fn it_uploads_raw_bytes_and_returns_the_blob_token() {
    let (endpoint, server) = serve(vec![(200, r#"{"blobToken":"abc123"}"#)]).await;
    let client = client_for(&endpoint);

    let blob_token = client.upload(b"large signature").await.unwrap();

    let received = server.await.unwrap();
    assert_eq!(blob_token, "abc123");
    assert_eq!(received[0].request_line, "POST /restpki/Api/Uploads HTTP/1.1");
    assert_eq!(
        received[0].header("content-type"),
        Some("application/octet-stream")
    );
    assert_eq!(received[0].body, b"large signature");
}

#[tokio::test]
async fn it_surfaces_service_errors_with_their_status() {
    let (endpoint, server) = serve(vec![(
        422,
        r#"{"code":"ValidationError","message":"Malformed signature"}"#,
    )])
    .await;
    let client = client_for(&endpoint);

    let error = client
        .post(OPEN_PATH, &json!({}))
        .await
        .unwrap_err();
    server.await.unwrap();

    let rest_error = error.downcast_ref::<RestError>().unwrap();
    assert_eq!(rest_error.status().map(|status| status.as_u16()), Some(422));
    assert!(error.to_string().contains("Malformed signature"));
}

#[tokio::test]
async fn it_reports_unreachable_services() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{address}/"));
    let error = client.download("Api/Blobs/token").await.unwrap_err();

    assert!(matches!(
        error.downcast_ref::<RestError>(),
        Some(RestError::Unreachable { .. })
    ));
}

#[tokio::test]
async fn it_opens_a_detached_signature_end_to_end() {
    let (endpoint, server) = serve(vec![
        (200, r#"["SHA256"]"#),
        (
            200,
            r#"{
                "encapsulatedContentType": "Data",
                "hasEncapsulatedContent": false,
                "signers": [{
                    "messageDigest": { "algorithm": "SHA256", "value": "16j7swfXgJRpypq8sAguT41WUeRtPNt2LQLQvzfJ5ZI=" },
                    "signingTime": "2017-03-21T14:07:45-03:00",
                    "certificate": { "pkiBrazil": { "cpf": "47363361886" } },
                    "validationResults": { "passedChecks": [], "errors": [], "warnings": [] }
                }]
            }"#,
        ),
    ])
    .await;
    let client = client_for(&endpoint);

    let mut explorer = CadesSignatureExplorer::new(&client);
    explorer
        .explorer_mut()
        .set_signature_file_from_content_raw(b"signature".to_vec());
    explorer.set_data_file_from_content_raw(b"The quick brown fox jumps over the lazy dog".to_vec());

    let signature = explorer.open().await.unwrap();
    let received = server.await.unwrap();

    assert_eq!(
        received[1].json()["dataHashes"],
        json!([{ "algorithm": "SHA256", "value": "16j7swfXgJRpypq8sAguT41WUeRtPNt2LQLQvzfJ5ZI=" }])
    );
    assert_eq!(
        signature.signers[0].signing_time.as_deref(),
        Some("21/03/2017 14:07:45 -03:00")
    );
    assert_eq!(
        signature.signers[0]
            .certificate
            .as_ref()
            .and_then(|certificate| certificate.pki_brazil.as_ref())
            .map(|pki_brazil| pki_brazil.cpf_formatted.as_str()),
        Some("473.633.618-86")
    );
}
