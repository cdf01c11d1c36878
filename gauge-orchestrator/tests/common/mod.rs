#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use gauge_core::command::CommandLine;
use gauge_orchestrator::api::{AppState, create_router};
use gauge_orchestrator::channel::{ChannelError, ExecChannel, ExecOutput};
use gauge_orchestrator::config::Settings;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Stand-in for the worker container: a crontab, a process flag and
/// reachability.
#[derive(Default)]
pub struct StubChannel {
    pub unreachable: bool,
    pub worker_running: bool,
    pub crontab: Mutex<Option<String>>,
    pub spawned: Mutex<Vec<CommandLine>>,
}

impl StubChannel {
    fn output(code: i32, stdout: &str) -> ExecOutput {
        ExecOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: code,
        }
    }
}

#[async_trait]
impl ExecChannel for StubChannel {
    async fn run(&self, cmd: &CommandLine) -> Result<ExecOutput, ChannelError> {
        if self.unreachable {
            return Err(ChannelError::Unavailable("no such container".to_string()));
        }
        let output = match cmd.program() {
            Some("true") => Self::output(0, ""),
            Some("pidof") => Self::output(if self.worker_running { 0 } else { 1 }, ""),
            Some("crontab") => match self.crontab.lock().unwrap().as_ref() {
                Some(table) => Self::output(0, table),
                None => Self::output(1, ""),
            },
            _ => Self::output(127, ""),
        };
        Ok(output)
    }

    async fn run_with_input(
        &self,
        _cmd: &CommandLine,
        input: &str,
    ) -> Result<ExecOutput, ChannelError> {
        if self.unreachable {
            return Err(ChannelError::Unavailable("no such container".to_string()));
        }
        *self.crontab.lock().unwrap() = Some(input.to_string());
        Ok(Self::output(0, ""))
    }

    fn spawn_detached(&self, cmd: &CommandLine, mut log: std::fs::File) -> Result<(), ChannelError> {
        writeln!(log, "worker: {}", cmd)?;
        self.spawned.lock().unwrap().push(cmd.clone());
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub channel: Arc<StubChannel>,
    pub settings: Settings,
    _dir: tempfile::TempDir,
}

pub fn build_test_app(channel: StubChannel) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        data_dir: dir.path().join("data"),
        config_dir: dir.path().join("config"),
        ..Default::default()
    };
    let channel = Arc::new(channel);
    let router = create_router(AppState::new(settings.clone(), channel.clone()));

    TestApp {
        router,
        channel,
        settings,
        _dir: dir,
    }
}

pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &TestApp, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn post_file(app: &TestApp, uri: &str, filename: &str, contents: &str) -> Response<Body> {
    let boundary = "gauge-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         {contents}\r\n\
         --{boundary}--\r\n"
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
