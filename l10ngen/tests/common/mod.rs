#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use l10ngen::{
    Error, Transport,
    importer::HttpResponse,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Get {
        url: String,
        bearer: Option<String>,
    },
    PostForm {
        url: String,
        form: Vec<(String, String)>,
    },
}

impl Request {
    pub fn url(&self) -> &str {
        match self {
            Request::Get { url, .. } | Request::PostForm { url, .. } => url,
        }
    }

    pub fn form_value(&self, name: &str) -> Option<&str> {
        match self {
            Request::PostForm { form, .. } => form
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            Request::Get { .. } => None,
        }
    }
}

#[derive(Default)]
struct State {
    responses: VecDeque<HttpResponse>,
    requests: Vec<Request>,
}

/// Answers requests from a script, in order, and records what was asked.
#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Rc<RefCell<State>>,
}

impl FakeTransport {
    pub fn new(responses: Vec<HttpResponse>) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                responses: responses.into(),
                requests: Vec::new(),
            })),
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.state.borrow().requests.clone()
    }

    fn answer(&self, request: Request) -> Result<HttpResponse, Error> {
        let mut state = self.state.borrow_mut();
        state.requests.push(request);
        state
            .responses
            .pop_front()
            .ok_or_else(|| Error::source_unavailable("no scripted response left", None))
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str, bearer: Option<&str>) -> Result<HttpResponse, Error> {
        self.answer(Request::Get {
            url: url.to_string(),
            bearer: bearer.map(str::to_string),
        })
    }

    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpResponse, Error> {
        self.answer(Request::PostForm {
            url: url.to_string(),
            form: form
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
    }
}

pub fn ok(body: &str) -> HttpResponse {
    HttpResponse::new(200, body)
}

pub fn metadata_with_sheets(sheets: &[(i64, &str)]) -> HttpResponse {
    let sheets: Vec<serde_json::Value> = sheets
        .iter()
        .map(|(id, title)| {
            serde_json::json!({
                "properties": {
                    "sheetId": id,
                    "title": title,
                    "gridProperties": {"rowCount": 1000, "columnCount": 26}
                }
            })
        })
        .collect();
    ok(&serde_json::json!({
        "properties": {"title": "App strings"},
        "sheets": sheets
    })
    .to_string())
}

pub fn values(rows: &[&[&str]]) -> HttpResponse {
    ok(&serde_json::json!({
        "range": "Main!A1:Z1000",
        "majorDimension": "ROWS",
        "values": rows
    })
    .to_string())
}

pub fn sample_values() -> HttpResponse {
    values(&[
        &["key", "description", "ja", "en"],
        &["hello", "Greeting", "こんにちは", "Hello"],
    ])
}

pub fn token(access_token: &str) -> HttpResponse {
    ok(&serde_json::json!({
        "access_token": access_token,
        "expires_in": 3599,
        "token_type": "Bearer"
    })
    .to_string())
}
