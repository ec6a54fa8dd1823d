//! Fakes shared by the integration tests: a scripted transport, a
//! recording view, and a ureq transport bound to a live mock server.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use wardrobe_core::{
    ApiError, Control, ControlState, HttpMethod, HttpRequest, HttpResponse, ItemForm, ItemId,
    Notification, Route, Severity, Transport, View,
};

/// Replays canned responses in order and records every request.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: VecDeque<Result<HttpResponse, ApiError>>,
    pub requests: Vec<HttpRequest>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, status: u16, body: &str) -> Self {
        self.responses.push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(mut self, message: &str) -> Self {
        self.responses
            .push_back(Err(ApiError::Transport(message.to_string())));
        self
    }
}

impl Transport for ScriptedTransport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.push(request);
        self.responses
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response for request #{}", self.requests.len()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Show(String),
    Confirm(String),
    SetControl(Control, ControlState),
    RemoveItem(ItemId),
    FillForm(ItemForm),
    Notify(Notification),
    Navigate(Route, Duration),
}

/// Records every side effect; answers confirmations with `confirm_answer`.
#[derive(Debug)]
pub struct RecordingView {
    pub events: Vec<ViewEvent>,
    pub confirm_answer: bool,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            confirm_answer: true,
        }
    }
}

impl RecordingView {
    pub fn declining() -> Self {
        Self {
            confirm_answer: false,
            ..Self::default()
        }
    }

    pub fn last_shown(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            ViewEvent::Show(markup) => Some(markup.as_str()),
            _ => None,
        })
    }

    pub fn notifications(&self) -> Vec<&Notification> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Notify(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn last_notification(&self, severity: Severity) -> Option<&Notification> {
        self.notifications()
            .into_iter()
            .rev()
            .find(|n| n.severity == severity)
    }

    pub fn control_states(&self, control: &Control) -> Vec<&ControlState> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::SetControl(c, state) if c == control => Some(state),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<(&Route, Duration)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Navigate(route, delay) => Some((route, *delay)),
                _ => None,
            })
            .collect()
    }
}

impl View for RecordingView {
    fn show(&mut self, markup: String) {
        self.events.push(ViewEvent::Show(markup));
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.events.push(ViewEvent::Confirm(prompt.to_string()));
        self.confirm_answer
    }

    fn set_control(&mut self, control: &Control, state: ControlState) {
        self.events.push(ViewEvent::SetControl(control.clone(), state));
    }

    fn remove_item(&mut self, id: &ItemId) {
        self.events.push(ViewEvent::RemoveItem(id.clone()));
    }

    fn fill_form(&mut self, form: &ItemForm) {
        self.events.push(ViewEvent::FillForm(form.clone()));
    }

    fn notify(&mut self, notification: Notification) {
        self.events.push(ViewEvent::Notify(notification));
    }

    fn navigate(&mut self, route: Route, delay: Duration) {
        self.events.push(ViewEvent::Navigate(route, delay));
    }
}

/// Executes requests over real HTTP with ureq.
///
/// Disables ureq's status-code-as-error behavior so 4xx/5xx responses come
/// back as data and the core decides what they mean.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => self.agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers: Vec::new(),
            body,
        })
    }
}

/// Start the mock server on a random port and return its base URL.
pub fn spawn_mock_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}
