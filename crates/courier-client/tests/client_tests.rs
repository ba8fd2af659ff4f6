// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client and poller tests against a wiremock gateway.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use courier_client::{CourierClient, TaskWorker, listen_tasks, poll_once};
use courier_core::{
    CourierError, Message, NoteCommand, Task, TaskPayload, TaskStatus, TaskType,
};

const SECRET: &str = "poller-secret";

fn client(server: &MockServer) -> CourierClient {
    CourierClient::new(&server.uri(), Some(SECRET), Duration::from_secs(2)).unwrap()
}

fn no_tasks() -> Value {
    json!({
        "data": {"id": 0, "dialogId": 0, "status": 0, "type": 0, "taskData": null},
        "status": "no tasks",
        "error": ""
    })
}

fn note_task(id: i64) -> Value {
    json!({
        "data": {
            "id": id,
            "dialogId": 3,
            "status": 3,
            "type": 4,
            "taskData": {"tn": {"command": "pull", "addText": ""}}
        },
        "status": "OK",
        "error": ""
    })
}

fn ok() -> Value {
    json!({"status": "OK", "error": ""})
}

struct EchoWorker {
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl TaskWorker for EchoWorker {
    async fn do_task(&self, task: &Task) -> Result<String, CourierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CourierError::Internal("git push rejected".into()));
        }
        match &task.payload {
            TaskPayload::Note(op) if op.command == NoteCommand::Pull => Ok("pulled".into()),
            other => Ok(format!("unexpected {other:?}")),
        }
    }
}

#[tokio::test]
async fn claim_sends_secret_and_parses_the_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-task/"))
        .and(header("secret", SECRET))
        .and(body_json(json!({"taskType": 4})))
        .respond_with(ResponseTemplate::new(200).set_body_json(no_tasks()))
        .expect(1)
        .mount(&server)
        .await;

    let task = client(&server).claim_task(TaskType::Note).await.unwrap();
    assert!(task.is_none());
}

#[tokio::test]
async fn claim_returns_the_typed_task() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-task/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(note_task(9)))
        .mount(&server)
        .await;

    let task = client(&server)
        .claim_task(TaskType::Note)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(task.id, 9);
    assert_eq!(task.dialog_id, 3);
    assert_eq!(task.status, TaskStatus::Sended);
    assert_eq!(task.task_type(), TaskType::Note);
}

#[tokio::test]
async fn error_responses_become_transport_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/report-task/"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "status": "error",
            "error": "reportTask err: task 5 cannot move from status 4 to 2"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .report_task(5, TaskStatus::Error, "")
        .await
        .unwrap_err();
    assert!(matches!(err, CourierError::Transport { .. }));
    assert!(err.to_string().contains("cannot move from status 4 to 2"));
}

#[tokio::test]
async fn add_message_returns_the_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/add-msg/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "taskMsg": {"text": "Pong", "chatId": 42, "replyMessageId": 7},
            "status": "OK",
            "error": ""
        })))
        .mount(&server)
        .await;

    let message = Message {
        user_name: "alice".into(),
        chat_id: 42,
        message_id: 7,
        text: "ping".into(),
        ..Default::default()
    };
    let reply = client(&server).add_message(&message).await.unwrap();
    assert_eq!(reply.task_msg.text, "Pong");
    assert_eq!(reply.task_msg.reply_message_id, 7);
}

#[tokio::test]
async fn delete_all_reports_counts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/delete-all/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK", "error": "", "tasks": 4, "dialogs": 2
        })))
        .mount(&server)
        .await;

    let counts = client(&server).delete_all().await.unwrap();
    assert_eq!((counts.tasks, counts.dialogs), (4, 2));
}

#[tokio::test]
async fn poll_once_reports_done_with_worker_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-task/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(note_task(11)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/report-task/"))
        .and(body_json(json!({"taskId": 11, "status": 4, "textMsg": "pulled"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok()))
        .expect(1)
        .mount(&server)
        .await;

    let worker = EchoWorker {
        calls: AtomicUsize::new(0),
        fail: false,
    };
    let handled = poll_once(&client(&server), TaskType::Note, &worker)
        .await
        .unwrap();
    assert_eq!(handled, Some(11));
}

#[tokio::test]
async fn poll_once_reports_worker_failures_as_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-task/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(note_task(12)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/report-task/"))
        .and(body_json(json!({
            "taskId": 12,
            "status": 2,
            "textMsg": "listeningTask: internal error: git push rejected"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok()))
        .expect(1)
        .mount(&server)
        .await;

    let worker = EchoWorker {
        calls: AtomicUsize::new(0),
        fail: true,
    };
    poll_once(&client(&server), TaskType::Note, &worker)
        .await
        .unwrap();
}

#[tokio::test]
async fn listen_tasks_skips_idle_rounds_and_stops_on_cancel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-task/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(note_task(21)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/get-task/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(no_tasks()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/report-task/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok()))
        .expect(1)
        .mount(&server)
        .await;

    let worker = Arc::new(EchoWorker {
        calls: AtomicUsize::new(0),
        fail: false,
    });
    let cancel = CancellationToken::new();
    let client = client(&server);

    let handle = {
        let worker = worker.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            listen_tasks(
                &client,
                TaskType::Note,
                worker.as_ref(),
                Duration::from_millis(10),
                cancel,
            )
            .await;
        })
    };

    tokio::time::sleep(Duration::from_millis(200)).await;
    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("listener should stop after cancel")
        .unwrap();

    assert_eq!(worker.calls.load(Ordering::SeqCst), 1);
    let claims = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/get-task/")
        .count();
    assert!(claims > 1, "idle rounds should keep polling");
}

#[tokio::test]
async fn listen_tasks_survives_gateway_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-task/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let worker = EchoWorker {
        calls: AtomicUsize::new(0),
        fail: false,
    };
    let cancel = CancellationToken::new();
    let stopper = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        stopper.cancel();
    });

    listen_tasks(
        &client(&server),
        TaskType::Note,
        &worker,
        Duration::from_millis(10),
        cancel,
    )
    .await;
    assert_eq!(worker.calls.load(Ordering::SeqCst), 0);
    assert!(server.received_requests().await.unwrap().len() > 1);
}

struct SlowWorker {
    delay: Duration,
}

#[async_trait]
impl TaskWorker for SlowWorker {
    async fn do_task(&self, _task: &Task) -> Result<String, CourierError> {
        tokio::time::sleep(self.delay).await;
        Ok("slow pull".into())
    }
}

#[tokio::test]
async fn cancel_mid_task_still_reports_the_claimed_task() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-task/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(note_task(31)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/get-task/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(no_tasks()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/report-task/"))
        .and(body_json(json!({"taskId": 31, "status": 4, "textMsg": "slow pull"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok()))
        .expect(1)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let stopper = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        stopper.cancel();
    });

    let worker = SlowWorker {
        delay: Duration::from_millis(500),
    };
    tokio::time::timeout(
        Duration::from_secs(3),
        listen_tasks(
            &client(&server),
            TaskType::Note,
            &worker,
            Duration::from_millis(10),
            cancel,
        ),
    )
    .await
    .expect("listener should stop once the task is reported");

    let requests = server.received_requests().await.unwrap();
    let reports = requests
        .iter()
        .filter(|r| r.url.path() == "/report-task/")
        .count();
    let claims = requests
        .iter()
        .filter(|r| r.url.path() == "/get-task/")
        .count();
    assert_eq!(reports, 1);
    assert_eq!(claims, 1, "no new claim after cancel");
}
