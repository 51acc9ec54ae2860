//! Integration tests for the RecSec REST client.
//!
//! Each test spins up an Axum server on a random port that plays the
//! backend, then drives the real `ApiClient` against it and checks the
//! requests it recorded.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;

use recsec_client::api::{Anonymous, ApiClient, DialogSubject, RecSecBackend, StaticCredentials};
use recsec_client::error::{ApiError, DialogError, Error};
use recsec_client::form::{ProjectCreationForm, ProjectFieldUpdate};
use recsec_client::model::{
    ApplicationType, Message, PropertyKey, RecommendationRequest, UserBaseSize,
};
use recsec_client::model::SecurityRequirementCreationRequest;
use recsec_client::projects::ProjectDirectory;
use recsec_client::recommender::{ExplanationCache, RecommenderSession, SessionStep};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// A request as the stub backend saw it.
#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: Option<String>,
    authorization: Option<String>,
    body: Value,
}

#[derive(Default)]
struct Backend {
    requests: Mutex<Vec<Recorded>>,
}

impl Backend {
    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn find(&self, method: Method, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

fn dialog() -> Value {
    json!({
        "preferenceElicitationDialog": {
            "entryPoint": "Q1",
            "Q1": {
                "displayText": "Do your users have smartphones?",
                "answers": [
                    { "answerKey": "yes", "displayText": "Yes", "nextQuestion": "Q2" },
                    { "answerKey": "no", "displayText": "No", "nextQuestion": "end" }
                ]
            },
            "Q2": {
                "displayText": "Is a hardware token acceptable?",
                "answers": [
                    { "answerKey": "yes", "displayText": "Yes", "nextQuestion": "end" },
                    { "answerKey": "no", "displayText": "No", "nextQuestion": "end" }
                ]
            }
        }
    })
}

fn dangling_dialog() -> Value {
    json!({
        "entryPoint": "Q1",
        "Q1": {
            "displayText": "Broken",
            "answers": [{ "answerKey": "a", "displayText": "A", "nextQuestion": "Q9" }]
        }
    })
}

fn recommendations() -> Value {
    json!([
        {
            "securityPattern": {
                "id": 3,
                "name": "One-Time Password",
                "description": { "intent": "Second factor" },
                "properties": { "usability": 3 },
                "securityControl": { "id": 1, "type": "Authentication" }
            },
            "score": 0.87,
            "explanations": [{
                "constraintName": "Smartphone available",
                "constraintDescription": "Users own a smartphone",
                "isHard": false,
                "applicable": true,
                "satisfied": true,
                "rationale": "Answered yes"
            }, {
                "constraintName": "Offline use",
                "constraintDescription": null,
                "isHard": false,
                "applicable": true,
                "satisfied": false,
                "rationale": null
            }]
        }
    ])
}

fn security_pattern() -> Value {
    recommendations()[0]["securityPattern"].clone()
}

async fn handle(
    State(backend): State<Arc<Backend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let recorded = Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    backend.requests.lock().unwrap().push(recorded.clone());

    match (method, recorded.path.as_str()) {
        (Method::GET, "/recommendations/preference-elicitation-dialogs") => {
            match recorded.query.as_deref() {
                Some("securityControlId=1") => axum::Json(dialog()).into_response(),
                Some("securityPatternId=3") => axum::Json(dialog()).into_response(),
                Some("securityControlId=2") => axum::Json(dangling_dialog()).into_response(),
                _ => (StatusCode::BAD_REQUEST, "exactly one id required").into_response(),
            }
        }
        (Method::POST, "/recommendations/security-patterns") => {
            axum::Json(recommendations()).into_response()
        }
        (Method::POST, "/ai/chat-completion") => "Hardware tokens are small devices.".into_response(),
        (Method::POST, "/ai/natural-language-explanation") => {
            "One-Time Password fits well.".into_response()
        }
        (Method::POST, "/projects") => StatusCode::CREATED.into_response(),
        (Method::GET, "/projects") => axum::Json(json!([{
            "id": 7,
            "name": "Webshop",
            "createdAt": "2025-03-01T10:00:00Z",
            "updatedAt": "2025-03-02T10:00:00Z"
        }]))
        .into_response(),
        (Method::PUT, "/projects/7/security-requirements/70") => StatusCode::OK.into_response(),
        (Method::DELETE, "/projects/7") => StatusCode::NO_CONTENT.into_response(),
        (Method::GET, "/projects/7") => axum::Json(json!({
            "id": 7,
            "name": "Webshop",
            "properties": {
                "applicationType": ["WEB_APP", "API_MICROSERVICES"],
                "userBaseSize": "LARGE",
                "typeOfData": [],
                "complianceRequirements": null
            },
            "createdAt": "2025-03-01T10:00:00Z",
            "updatedAt": "2025-03-02T10:00:00Z",
            "securityRequirements": [{ "id": 70, "title": "MFA", "description": null }]
        }))
        .into_response(),
        (Method::POST, "/projects/7/security-requirements") => StatusCode::CREATED.into_response(),
        (Method::DELETE, "/projects/7/security-requirements/70") => {
            StatusCode::NO_CONTENT.into_response()
        }
        (Method::GET, "/security-patterns") => axum::Json(json!([security_pattern()])).into_response(),
        (Method::GET, "/security-patterns/3") => axum::Json(security_pattern()).into_response(),
        (Method::GET, "/security-patterns/99") => "<html>maintenance</html>".into_response(),
        _ => (StatusCode::NOT_FOUND, "no such resource").into_response(),
    }
}

/// Start an Axum server on a random port, return (base url, recorder).
async fn start_server() -> (String, Arc<Backend>) {
    let backend = Arc::new(Backend::default());
    let app = Router::new()
        .fallback(handle)
        .with_state(Arc::clone(&backend));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (format!("http://127.0.0.1:{port}"), backend)
}

fn client(base_url: &str) -> ApiClient {
    let creds = StaticCredentials::new(SecretString::from("test-token"));
    ApiClient::new(base_url, Arc::new(creds)).unwrap()
}

#[tokio::test]
async fn attaches_bearer_token() {
    timeout(TEST_TIMEOUT, async {
        let (url, backend) = start_server().await;
        let projects = client(&url).list_projects().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Webshop");

        let seen = backend.requests();
        assert_eq!(seen[0].authorization.as_deref(), Some("Bearer test-token"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn anonymous_client_sends_no_authorization() {
    timeout(TEST_TIMEOUT, async {
        let (url, backend) = start_server().await;
        let api = ApiClient::new(&url, Arc::new(Anonymous)).unwrap();
        api.list_projects().await.unwrap();
        assert!(backend.requests()[0].authorization.is_none());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn fetches_and_validates_dialog() {
    timeout(TEST_TIMEOUT, async {
        let (url, backend) = start_server().await;
        let api = client(&url);

        let graph = api
            .preference_elicitation_dialog(DialogSubject::SecurityControl(1))
            .await
            .unwrap();
        assert_eq!(graph.entry_point(), "Q1");
        assert_eq!(graph.len(), 2);

        let by_pattern = api
            .preference_elicitation_dialog(DialogSubject::SecurityPattern(3))
            .await
            .unwrap();
        assert_eq!(by_pattern.len(), 2);

        let queries: Vec<_> = backend
            .find(Method::GET, "/recommendations/preference-elicitation-dialogs")
            .into_iter()
            .filter_map(|r| r.query)
            .collect();
        assert_eq!(queries, vec!["securityControlId=1", "securityPatternId=3"]);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn rejects_dialog_with_dangling_answer() {
    timeout(TEST_TIMEOUT, async {
        let (url, _backend) = start_server().await;
        let err = client(&url)
            .preference_elicitation_dialog(DialogSubject::SecurityControl(2))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Dialog(DialogError::DanglingAnswer { ref target, .. }) if target == "Q9"
        ));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    timeout(TEST_TIMEOUT, async {
        let (url, _backend) = start_server().await;
        let err = client(&url).get_project(404).await.unwrap_err();
        match err {
            ApiError::Status { status, body, .. } => {
                assert_eq!(status, 404);
                assert_eq!(body, "no such resource");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    timeout(TEST_TIMEOUT, async {
        // Bind and drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let err = client(&format!("http://127.0.0.1:{port}"))
            .list_projects()
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn posts_recommendation_request_in_camel_case() {
    timeout(TEST_TIMEOUT, async {
        let (url, backend) = start_server().await;
        let request = RecommendationRequest {
            security_control_id: 1,
            project_id: 7,
            user_preferences: [("Q1".to_string(), "yes".to_string())].into_iter().collect(),
        };
        let recs = client(&url).recommend_security_patterns(&request).await.unwrap();
        assert_eq!(recs[0].security_pattern.name, "One-Time Password");
        assert_eq!(recs[0].satisfied().count(), 1);
        let offline = recs[0].violated().next().unwrap();
        assert_eq!(offline.constraint_name, "Offline use");
        assert!(offline.constraint_description.is_empty());
        assert!(offline.rationale.is_empty());

        let sent = backend.find(Method::POST, "/recommendations/security-patterns");
        assert_eq!(
            sent[0].body,
            json!({ "securityControlId": 1, "projectId": 7, "userPreferences": { "Q1": "yes" } })
        );
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn chat_completion_enriches_questions() {
    timeout(TEST_TIMEOUT, async {
        let (url, backend) = start_server().await;
        let graph = client(&url)
            .preference_elicitation_dialog(DialogSubject::SecurityControl(1))
            .await
            .unwrap();
        let question = graph.question("Q1").unwrap();
        let transcript = vec![
            Message::question(question.display_text.clone(), question.answers.clone()),
            Message::user("What is a hardware token?"),
        ];

        let reply = client(&url).chat_completion(7, &transcript).await.unwrap();
        assert_eq!(reply, "Hardware tokens are small devices.");

        let sent = &backend.find(Method::POST, "/ai/chat-completion")[0].body;
        assert_eq!(sent["projectId"], 7);
        assert_eq!(sent["messages"][0]["type"], "ASSISTANT");
        assert_eq!(
            sent["messages"][0]["content"],
            "Do your users have smartphones? (the user has the following answer possibilities: Yes, No)"
        );
        assert_eq!(sent["messages"][1]["type"], "USER");
        assert_eq!(sent["messages"][1]["content"], "What is a hardware token?");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn project_form_submits_name_and_properties() {
    timeout(TEST_TIMEOUT, async {
        let (url, backend) = start_server().await;
        let api = client(&url);

        let mut form = ProjectCreationForm::new();
        form.update(ProjectFieldUpdate::Name("Webshop".to_string()));
        form.update(ProjectFieldUpdate::ApplicationType(Some(vec![ApplicationType::WebApp])));
        form.select_option(PropertyKey::UserBaseSize, "MEDIUM").unwrap();
        form.submit(&api).await.unwrap();

        let body = &backend.find(Method::POST, "/projects")[0].body;
        assert_eq!(body["name"], "Webshop");
        assert_eq!(body["properties"]["applicationType"], json!(["WEB_APP"]));
        assert_eq!(body["properties"]["userBaseSize"], "MEDIUM");
        assert_eq!(body["properties"]["complianceRequirements"], Value::Null);

        // Successful submission starts a fresh form.
        assert_eq!(form.data().name, "");
        assert_eq!(form.step_index(), 0);
        assert_eq!(UserBaseSize::Medium.key(), "MEDIUM");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn updates_security_requirement_with_put() {
    timeout(TEST_TIMEOUT, async {
        let (url, backend) = start_server().await;
        let request = SecurityRequirementCreationRequest {
            title: "MFA".to_string(),
            description: "Second factor for admins".to_string(),
        };
        client(&url)
            .update_security_requirement(7, 70, &request)
            .await
            .unwrap();

        let sent = backend.find(Method::PUT, "/projects/7/security-requirements/70");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body["title"], "MFA");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn session_over_http_posts_one_recommendation_request() {
    timeout(TEST_TIMEOUT, async {
        let (url, backend) = start_server().await;
        let api: Arc<dyn RecSecBackend> = Arc::new(client(&url));

        let mut session = RecommenderSession::load(Arc::clone(&api), 7, 1).await.unwrap();
        assert_eq!(
            session.current_question().unwrap().display_text,
            "Do your users have smartphones?"
        );

        match session.select_answer("yes").await.unwrap() {
            SessionStep::Question(q) => assert_eq!(q.display_text, "Is a hardware token acceptable?"),
            other => panic!("expected a question, got {other:?}"),
        }
        match session.select_answer("no").await.unwrap() {
            SessionStep::Recommendations(recs) => assert_eq!(recs.len(), 1),
            other => panic!("expected recommendations, got {other:?}"),
        }

        // The finished walker accepts no more answers and nothing is re-sent.
        assert!(matches!(
            session.select_answer("no").await,
            Err(Error::Walker(_))
        ));

        let posts = backend.find(Method::POST, "/recommendations/security-patterns");
        assert_eq!(posts.len(), 1);
        assert_eq!(
            posts[0].body["userPreferences"],
            json!({ "Q1": "yes", "Q2": "no" })
        );
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn deletes_projects_and_manages_requirements() {
    timeout(TEST_TIMEOUT, async {
        let (url, backend) = start_server().await;
        let api = client(&url);
        let request = SecurityRequirementCreationRequest {
            title: "Session timeout".to_string(),
            description: "Log out idle users".to_string(),
        };

        api.create_security_requirement(7, &request).await.unwrap();
        api.delete_security_requirement(7, 70).await.unwrap();
        api.delete_project(7).await.unwrap();

        let created = backend.find(Method::POST, "/projects/7/security-requirements");
        assert_eq!(
            created[0].body,
            json!({ "title": "Session timeout", "description": "Log out idle users" })
        );
        assert_eq!(
            backend.find(Method::DELETE, "/projects/7/security-requirements/70").len(),
            1
        );
        assert_eq!(backend.find(Method::DELETE, "/projects/7").len(), 1);

        let err = api.delete_project(8).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn lists_and_fetches_security_patterns() {
    timeout(TEST_TIMEOUT, async {
        let (url, _backend) = start_server().await;
        let api = client(&url);

        let patterns = api.list_security_patterns().await.unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].name, "One-Time Password");

        let pattern = api.get_security_pattern(3).await.unwrap();
        assert_eq!(pattern.description.intent, "Second factor");
        assert_eq!(pattern.properties["usability"], 3);
        assert_eq!(pattern.security_control.control_type, "Authentication");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn undecodable_body_is_an_invalid_response() {
    timeout(TEST_TIMEOUT, async {
        let (url, _backend) = start_server().await;
        let err = client(&url).get_security_pattern(99).await.unwrap_err();
        match err {
            ApiError::InvalidResponse { operation, .. } => {
                assert_eq!(operation, "GET security pattern 99");
            }
            other => panic!("expected invalid response, got {other:?}"),
        }
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn silent_backend_times_out() {
    timeout(TEST_TIMEOUT, async {
        // Accepts connections and never answers.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let api = client(&format!("http://127.0.0.1:{port}"))
            .with_request_timeout(Duration::from_millis(200));
        let err = api.list_projects().await.unwrap_err();
        match err {
            ApiError::Timeout { operation, timeout } => {
                assert_eq!(operation, "GET projects");
                assert_eq!(timeout, Duration::from_millis(200));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn explanations_are_fetched_once_per_pattern() {
    timeout(TEST_TIMEOUT, async {
        let (url, backend) = start_server().await;
        let api = client(&url);
        let request = RecommendationRequest {
            security_control_id: 1,
            project_id: 7,
            user_preferences: Default::default(),
        };
        let recs = api.recommend_security_patterns(&request).await.unwrap();

        let cache = ExplanationCache::new();
        let first = cache.explain(&api, &recs[0]).await.unwrap();
        let second = cache.explain(&api, &recs[0]).await.unwrap();
        assert_eq!(first, "One-Time Password fits well.");
        assert_eq!(second, first);

        let sent = backend.find(Method::POST, "/ai/natural-language-explanation");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body["securityPattern"]["name"], "One-Time Password");
        assert_eq!(sent[0].body["explanations"].as_array().unwrap().len(), 2);
        assert_eq!(
            sent[0].body["explanations"][0]["constraintName"],
            "Smartphone available"
        );
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn directory_selects_project_and_describes_properties() {
    timeout(TEST_TIMEOUT, async {
        let (url, _backend) = start_server().await;
        let api = client(&url);

        let mut directory = ProjectDirectory::new();
        directory.refresh(&api).await.unwrap();
        let project = directory.select_project(&api, 7).await.unwrap();

        assert_eq!(
            project.properties.describe(),
            vec![
                ("Application Type", vec!["Web application", "API or microservices"]),
                ("Userbase Size", vec!["Large (10.000 - 100.000)"]),
            ]
        );
        assert!(project.security_requirements[0].description.is_empty());
        assert_eq!(directory.select_security_requirement(70).unwrap().title, "MFA");
    })
    .await
    .expect("test timed out");
}
