//! Wire-level contract of the HTTP client, verified against a mock server

use serde_json::json;
use wiremock::matchers::{basic_auth, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sumo_export::api::{JobState, SearchJobApi, SearchJobRequest};
use sumo_export::{Credentials, HttpSearchApi};

fn credentials() -> Credentials {
    Credentials {
        email: "user@example.com".to_string(),
        password: "secret".to_string(),
    }
}

fn request() -> SearchJobRequest {
    SearchJobRequest {
        query: "*".to_string(),
        from: "2023-01-01T00:00:00".to_string(),
        to: "2023-01-02T00:00:00".to_string(),
        time_zone: "UTC".to_string(),
    }
}

#[tokio::test]
async fn test_submit_posts_payload_and_builds_job_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search/jobs"))
        .and(basic_auth("user@example.com", "secret"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"id": "SEARCHJOB123"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpSearchApi::new(server.uri(), credentials()).unwrap();
    let job = api.submit_job(&request()).await.unwrap();

    assert_eq!(job.url, format!("{}/search/jobs/SEARCHJOB123", server.uri()));
    assert_eq!(job.state, JobState::Created);
}

#[tokio::test]
async fn test_session_cookie_is_echoed_on_subsequent_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search/jobs"))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("set-cookie", "AWSALB=node-7; Path=/; HttpOnly")
                .set_body_json(json!({"id": "JOB1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    // the status request must carry the cookie handed out at submission
    Mock::given(method("GET"))
        .and(path("/search/jobs/JOB1"))
        .and(header("cookie", "AWSALB=node-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "DONE GATHERING RESULTS",
            "messageCount": 2,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpSearchApi::new(server.uri(), credentials()).unwrap();
    let job = api.submit_job(&request()).await.unwrap();
    let status = api.job_status(&job).await.unwrap();

    assert_eq!(status.state, "DONE GATHERING RESULTS");
    assert_eq!(status.message_count, 2);
}

#[tokio::test]
async fn test_messages_request_paginates_and_unwraps_envelopes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search/jobs"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"id": "JOB2"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/jobs/JOB2/messages"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [
                {"map": {"_raw": "line one", "_sourcehost": "web-1"}},
                {"map": {"_raw": "line two", "_sourcehost": "web-2"}},
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpSearchApi::new(server.uri(), credentials()).unwrap();
    let job = api.submit_job(&request()).await.unwrap();
    let page = api.job_messages(&job, 2, 4).await.unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["_raw"], "line one");
    assert_eq!(page[1]["_sourcehost"], "web-2");
}

#[tokio::test]
async fn test_unexpected_status_is_an_error_not_a_panic() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search/jobs"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let api = HttpSearchApi::new(server.uri(), credentials()).unwrap();
    let error = api.submit_job(&request()).await.unwrap_err();
    assert!(error.to_string().contains("503"));
}

#[tokio::test]
async fn test_rotated_cookie_replaces_the_old_value() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search/jobs"))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("set-cookie", "AWSALB=first; Path=/")
                .set_body_json(json!({"id": "JOB3"})),
        )
        .mount(&server)
        .await;

    // first poll rotates the cookie, second poll must present the new one
    Mock::given(method("GET"))
        .and(path("/search/jobs/JOB3"))
        .and(header("cookie", "AWSALB=first"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "AWSALB=second; Path=/")
                .set_body_json(json!({"state": "GATHERING RESULTS", "messageCount": 0})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/jobs/JOB3"))
        .and(header("cookie", "AWSALB=second"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "DONE GATHERING RESULTS",
            "messageCount": 0,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpSearchApi::new(server.uri(), credentials()).unwrap();
    let job = api.submit_job(&request()).await.unwrap();

    let first = api.job_status(&job).await.unwrap();
    assert_eq!(first.state, "GATHERING RESULTS");

    let second = api.job_status(&job).await.unwrap();
    assert_eq!(second.state, "DONE GATHERING RESULTS");
}
