//! End-to-end tests against an in-process mock of the management API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use sysvm::api::{self, ApiError};
use sysvm::models::{AppState, Confirmation, JobPollSettings, SystemVmAction, VmState};
use sysvm::services::{self, ActionOutcome};

#[derive(Default)]
struct MockApi {
    vms: Vec<Value>,
    /// Commands seen, in order.
    commands: Vec<String>,
    /// Pending answers to give before a job completes.
    pending_polls: u32,
    fail_jobs: bool,
    /// (vm id, state once the job completes)
    job: Option<(String, String)>,
}

impl MockApi {
    fn with_default_vms() -> Self {
        Self {
            vms: vec![
                json!({
                    "id": 1, "name": "s-1-VM", "state": "Running",
                    "systemvmtype": "secondarystoragevm", "publicip": "192.168.56.11",
                    "zoneid": 1, "zonename": "zone1"
                }),
                json!({
                    "id": 2, "name": "v-2-VM", "state": "Stopped",
                    "systemvmtype": "consoleproxy", "publicip": "192.168.56.12",
                    "zoneid": 1, "zonename": "zone1", "activeviewersessions": 0
                }),
            ],
            ..Default::default()
        }
    }
}

type Shared = Arc<Mutex<MockApi>>;

fn find_vm<'a>(vms: &'a mut [Value], id: &str) -> Option<&'a mut Value> {
    vms.iter_mut()
        .find(|vm| sysvm::utils::value_to_short_string(&vm["id"]) == id)
}

async fn mock_api(State(mock): State<Shared>, Query(q): Query<HashMap<String, String>>) -> Response {
    let mut mock = mock.lock().unwrap();
    let command = q.get("command").cloned().unwrap_or_default();
    mock.commands.push(command.clone());
    assert_eq!(q.get("response").map(String::as_str), Some("json"));

    match command.as_str() {
        "listSystemVms" => {
            let list: Vec<Value> = match q.get("id") {
                Some(id) => find_vm(&mut mock.vms, id).map(|vm| vec![vm.clone()]).unwrap_or_default(),
                None => mock.vms.clone(),
            };
            if list.is_empty() {
                Json(json!({"listsystemvmsresponse": {}})).into_response()
            } else {
                Json(json!({"listsystemvmsresponse": {"count": list.len(), "systemvm": list}})).into_response()
            }
        }
        "startSystemVm" | "stopSystemVm" | "rebootSystemVm" => {
            let key = format!("{}response", command.to_lowercase());
            let id = q.get("id").cloned().unwrap_or_default();
            if find_vm(&mut mock.vms, &id).is_none() {
                let status = StatusCode::from_u16(431).unwrap();
                return (status, Json(json!({ key: {"errorcode": 431, "errortext": "Unable to find system vm"} })))
                    .into_response();
            }
            let next_state = if command == "stopSystemVm" { "Stopped" } else { "Running" };
            mock.job = Some((id, next_state.to_string()));
            Json(json!({ key: {"jobid": 100} })).into_response()
        }
        "queryAsyncJobResult" => {
            assert_eq!(q.get("jobid").map(String::as_str), Some("100"));
            if mock.pending_polls > 0 {
                mock.pending_polls -= 1;
                return Json(json!({"queryasyncjobresultresponse": {"jobid": 100, "jobstatus": 0}})).into_response();
            }
            if mock.fail_jobs {
                return Json(json!({"queryasyncjobresultresponse": {
                    "jobid": 100, "jobstatus": 2, "jobresultcode": 530,
                    "jobresult": {"errorcode": 530, "errortext": "Host unavailable"}
                }}))
                .into_response();
            }
            let (id, next_state) = mock.job.clone().expect("a job was submitted");
            let vm = find_vm(&mut mock.vms, &id).expect("job vm exists");
            vm["state"] = json!(next_state);
            let record = vm.clone();
            Json(json!({"queryasyncjobresultresponse": {
                "jobid": 100, "jobstatus": 1, "jobresultcode": 0,
                "jobresult": {"systemvm": record}
            }}))
            .into_response()
        }
        other => panic!("unexpected command {other}"),
    }
}

async fn spawn_mock(mock: Shared) -> String {
    let app = Router::new().route("/client/api", get(mock_api)).with_state(mock);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/client/api", addr)
}

async fn setup(mock: MockApi, max_polls: u32) -> (AppState, Shared) {
    api::set_silent(true);
    let shared = Arc::new(Mutex::new(mock));
    let base = spawn_mock(shared.clone()).await;
    let state = AppState::new(
        base,
        String::new(),
        None,
        JobPollSettings { interval: Duration::from_millis(5), max_polls },
    )
    .unwrap();
    (state, shared)
}

fn lifecycle_commands(mock: &Shared) -> Vec<String> {
    mock.lock()
        .unwrap()
        .commands
        .iter()
        .filter(|c| c.ends_with("SystemVm"))
        .cloned()
        .collect()
}

#[tokio::test]
async fn start_refreshes_row_and_details_from_job_result() {
    let mock = MockApi { pending_polls: 2, ..MockApi::with_default_vms() };
    let (state, shared) = setup(mock, 10).await;

    let mut panel = services::load_panel(&state, "2").await.unwrap();
    assert_eq!(panel.row.state_badge.label, "Stopped");
    assert_eq!(panel.details.action_labels(), vec!["Start System VM"]);

    let mut polls = Vec::new();
    let outcome = services::run_action(&state, SystemVmAction::Start, &mut panel, Confirmation::Confirm, |n| polls.push(n))
        .await
        .unwrap();

    assert_eq!(outcome, ActionOutcome::Completed);
    assert_eq!(polls, vec![1, 2, 3]);
    assert_eq!(panel.record.state, VmState::Running);
    assert_eq!(panel.row.state_badge.label, "Running");
    assert_eq!(panel.details.state_badge.label, "Running");
    assert_eq!(panel.details.action_labels(), vec!["Stop System VM", "Reboot System VM"]);
    assert_eq!(lifecycle_commands(&shared), vec!["startSystemVm"]);
}

#[tokio::test]
async fn cancel_issues_no_command() {
    let (state, shared) = setup(MockApi::with_default_vms(), 10).await;
    let mut panel = services::load_panel(&state, "2").await.unwrap();
    let outcome = services::run_action(&state, SystemVmAction::Start, &mut panel, Confirmation::Cancel, |_| {})
        .await
        .unwrap();
    assert_eq!(outcome, ActionOutcome::Cancelled);
    assert!(lifecycle_commands(&shared).is_empty());
    assert_eq!(panel.record.state, VmState::Stopped);
}

#[tokio::test]
async fn failed_job_is_reported_and_panel_kept() {
    let mock = MockApi { fail_jobs: true, ..MockApi::with_default_vms() };
    let (state, _shared) = setup(mock, 10).await;
    let mut panel = services::load_panel(&state, "1").await.unwrap();

    let err = services::run_action(&state, SystemVmAction::Reboot, &mut panel, Confirmation::Confirm, |_| {})
        .await
        .unwrap_err();
    match err {
        ApiError::JobFailed { job_id, code, text } => {
            assert_eq!(job_id, "100");
            assert_eq!(code, 530);
            assert_eq!(text, "Host unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(panel.record.state, VmState::Running);
}

#[tokio::test]
async fn job_still_pending_after_budget_times_out() {
    let mock = MockApi { pending_polls: 50, ..MockApi::with_default_vms() };
    let (state, _shared) = setup(mock, 3).await;
    let err = services::dispatch_action(&state, SystemVmAction::Stop, "1", |_| {}).await.unwrap_err();
    assert!(matches!(err, ApiError::JobTimedOut { polls: 3, .. }), "got {err:?}");
}

#[tokio::test]
async fn error_envelope_becomes_remote_error() {
    let (state, _shared) = setup(MockApi::with_default_vms(), 10).await;
    let err = services::dispatch_action(&state, SystemVmAction::Start, "404", |_| {}).await.unwrap_err();
    match err {
        ApiError::Remote { code, text } => {
            assert_eq!(code, 431);
            assert_eq!(text, "Unable to find system vm");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let (state, _shared) = setup(MockApi::with_default_vms(), 10).await;
    let err = services::load_panel(&state, "77").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(ref id) if id == "77"));
}

async fn body_string(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_decision(uri: &str, decision: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(format!("decision={decision}")))
        .unwrap()
}

#[tokio::test]
async fn web_list_renders_rows() {
    let (state, _shared) = setup(MockApi::with_default_vms(), 10).await;
    let app = sysvm::app::build_app(state);

    let resp = app.oneshot(get_request("/systemvms")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("id=\"systemvm-row-1\""));
    assert!(body.contains("id=\"systemvm-row-2\""));
    assert!(body.contains("s-1-VM"));
    assert!(body.contains("v-2-VM"));
    assert!(body.contains("Select a system VM"));
}

#[tokio::test]
async fn web_details_show_viewer_sessions_for_console_proxy() {
    let (state, _shared) = setup(MockApi::with_default_vms(), 10).await;
    let app = sysvm::app::build_app(state);

    let body = body_string(app.clone().oneshot(get_request("/systemvms/2")).await.unwrap()).await;
    assert!(body.contains("<tr id=\"activeviewersessions_container\">"));
    assert!(body.contains("Start System VM"));
    assert!(!body.contains("Stop System VM"));

    let body = body_string(app.oneshot(get_request("/systemvms/1")).await.unwrap()).await;
    assert!(body.contains("<tr id=\"activeviewersessions_container\" hidden>"));
    assert!(body.contains("Stop System VM"));
    assert!(body.contains("Reboot System VM"));
    assert!(!body.contains("Start System VM"));
}

#[tokio::test]
async fn web_confirm_page_and_unknown_action() {
    let (state, _shared) = setup(MockApi::with_default_vms(), 10).await;
    let app = sysvm::app::build_app(state);

    let resp = app.clone().oneshot(get_request("/systemvms/2/confirm/start")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("Please confirm you want to start the system VM."));
    assert!(body.contains("Starting System VM...."));
    assert!(body.contains("event.submitter.value==='confirm'"));

    let body = body_string(app.clone().oneshot(get_request("/systemvms/2/confirm/stop")).await.unwrap()).await;
    assert!(body.contains("is not available while the system VM is Stopped."));

    let resp = app.oneshot(get_request("/systemvms/2/confirm/destroy")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn web_confirmed_start_renders_job_result() {
    let mock = MockApi { pending_polls: 1, ..MockApi::with_default_vms() };
    let (state, shared) = setup(mock, 10).await;
    let app = sysvm::app::build_app(state);

    let before = body_string(app.clone().oneshot(get_request("/systemvms/2")).await.unwrap()).await;
    assert_eq!(before.matches("status-green").count(), 1);

    let resp = app.oneshot(post_decision("/systemvms/2/start", "confirm")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("System VM started."));
    // Row 1, row 2 and the details badge.
    assert_eq!(body.matches("status-green").count(), 3);
    assert!(body.contains("Stop System VM"));
    assert_eq!(lifecycle_commands(&shared), vec!["startSystemVm"]);
}

#[tokio::test]
async fn web_cancel_redirects_without_command() {
    let (state, shared) = setup(MockApi::with_default_vms(), 10).await;
    let app = sysvm::app::build_app(state);

    let resp = app.oneshot(post_decision("/systemvms/2/start", "cancel")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(lifecycle_commands(&shared).is_empty());
}
