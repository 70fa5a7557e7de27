//! Google Sheets source support.
//!
//! Every strategy does the same two-phase fetch: read the spreadsheet
//! metadata to find the sheet title, then read that sheet's values. The
//! strategies differ only in how requests are authorized and whether a `gid`
//! in the document URL is honored.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, de::DeserializeOwned};
use url::Url;

use crate::{
    error::Error,
    importer::{
        auth::{self, ApiAuth, provider_error},
        transport::Transport,
    },
    source::{Credential, OAuth2Credentials, Secret, ServiceAccount},
    types::{Row, Table},
};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
/// Range read when the metadata lists no sheets.
pub const FALLBACK_SHEET_NAME: &str = "Sheet1";

lazy_static! {
    static ref SPREADSHEET_URL_RE: Regex =
        Regex::new(r"/spreadsheets/d/([a-zA-Z0-9_-]+)").unwrap();
    static ref GID_RE: Regex = Regex::new(r"[#&?]gid=(\d+)").unwrap();
    static ref BARE_ID_RE: Regex = Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// A spreadsheet id plus the optional `gid` of one of its sheets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetRef {
    pub id: String,
    pub gid: Option<String>,
}

/// Parses a bare spreadsheet id or a full spreadsheet URL.
pub fn parse_document(document: &str) -> Result<SpreadsheetRef, Error> {
    let document = document.trim();
    if let Some(captures) = SPREADSHEET_URL_RE.captures(document) {
        return Ok(SpreadsheetRef {
            id: captures[1].to_string(),
            gid: GID_RE.captures(document).map(|c| c[1].to_string()),
        });
    }
    if BARE_ID_RE.is_match(document) {
        return Ok(SpreadsheetRef {
            id: document.to_string(),
            gid: None,
        });
    }
    Err(Error::InvalidSource(format!(
        "`{}` is neither a spreadsheet id nor a spreadsheet URL",
        document
    )))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpreadsheetMetadata {
    #[serde(default)]
    pub properties: Option<SpreadsheetProperties>,
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpreadsheetProperties {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetEntry {
    #[serde(default)]
    pub properties: Option<SheetProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: Option<i64>,
    pub title: Option<String>,
    pub grid_properties: Option<GridProperties>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProperties {
    pub row_count: Option<u64>,
    pub column_count: Option<u64>,
}

impl SpreadsheetMetadata {
    pub fn title(&self) -> Option<&str> {
        self.properties.as_ref()?.title.as_deref()
    }

    pub fn first_sheet(&self) -> Option<&SheetProperties> {
        self.sheets.first()?.properties.as_ref()
    }

    /// Picks the sheet whose `sheetId` equals `gid`, else the first sheet,
    /// else [`FALLBACK_SHEET_NAME`].
    pub fn resolve_sheet_title(&self, gid: Option<&str>) -> String {
        let by_gid = gid.and_then(|gid| {
            self.sheets
                .iter()
                .filter_map(|s| s.properties.as_ref())
                .find(|p| p.sheet_id.map(|id| id.to_string()).as_deref() == Some(gid))
        });
        if gid.is_some() && by_gid.is_none() {
            tracing::warn!(event = "gid_not_found", gid = ?gid);
        }
        by_gid
            .or_else(|| self.first_sheet())
            .and_then(|p| p.title.clone())
            .unwrap_or_else(|| FALLBACK_SHEET_NAME.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Thin client for the two Sheets API reads the importer needs.
pub struct SheetsClient<'a> {
    transport: &'a dyn Transport,
    auth: ApiAuth,
}

impl<'a> SheetsClient<'a> {
    pub fn new(transport: &'a dyn Transport, auth: ApiAuth) -> Self {
        Self { transport, auth }
    }

    /// Reads spreadsheet metadata (title and sheet list).
    pub fn metadata(&self, spreadsheet_id: &str) -> Result<SpreadsheetMetadata, Error> {
        tracing::debug!(event = "fetch_metadata", spreadsheet_id = %spreadsheet_id);
        let url = self.endpoint(&[spreadsheet_id])?;
        self.get_json(url, "spreadsheet metadata")
    }

    /// Reads every value of `range` (usually a sheet title) as rows of text.
    pub fn values(&self, spreadsheet_id: &str, range: &str) -> Result<Table, Error> {
        tracing::debug!(event = "fetch_values", spreadsheet_id = %spreadsheet_id, range = %range);
        let url = self.endpoint(&[spreadsheet_id, "values", range])?;
        let value_range: ValueRange = self.get_json(url, "spreadsheet values")?;
        let rows: Vec<Row> = value_range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect();
        tracing::info!(event = "sheet_imported", spreadsheet_id = %spreadsheet_id, range = %range, rows = rows.len());
        Ok(Table::new(rows))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = Url::parse(SHEETS_API_BASE)
            .map_err(|e| Error::InvalidSource(format!("bad API base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidSource("bad API base URL".to_string()))?
            .extend(segments);
        if let ApiAuth::ApiKey(key) = &self.auth {
            url.query_pairs_mut().append_pair("key", key.expose());
        }
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, Error> {
        let bearer = match &self.auth {
            ApiAuth::Bearer(token) => Some(token.expose()),
            _ => None,
        };
        let response = self.transport.get(url.as_str(), bearer)?;
        if !response.is_success() {
            return Err(provider_error(context, &response));
        }
        serde_json::from_str(&response.body).map_err(|e| {
            Error::source_unavailable(format!("unexpected {} response", context), Some(Box::new(e)))
        })
    }
}

fn two_phase_fetch(
    transport: &dyn Transport,
    document: &str,
    auth: ApiAuth,
    honor_gid: bool,
) -> Result<Table, Error> {
    let reference = parse_document(document)?;
    let client = SheetsClient::new(transport, auth);
    let metadata = client.metadata(&reference.id)?;
    let gid = if honor_gid { reference.gid.as_deref() } else { None };
    let sheet = metadata.resolve_sheet_title(gid);
    client.values(&reference.id, &sheet)
}

/// Reads a publicly shared spreadsheet without credentials.
pub fn import_public(transport: &dyn Transport, document: &str) -> Result<Table, Error> {
    two_phase_fetch(transport, document, ApiAuth::Anonymous, false)
}

/// Reads a spreadsheet with an API key passed as the `key` query parameter.
pub fn import_with_api_key(
    transport: &dyn Transport,
    document: &str,
    api_key: &Secret,
) -> Result<Table, Error> {
    let auth = auth::authorize(transport, &Credential::ApiKey(api_key.clone()))?;
    two_phase_fetch(transport, document, auth, false)
}

/// Reads a spreadsheet on behalf of a user through OAuth2.
pub fn import_with_oauth2(
    transport: &dyn Transport,
    document: &str,
    creds: &OAuth2Credentials,
) -> Result<Table, Error> {
    let token = auth::oauth2_access_token(transport, creds)?;
    two_phase_fetch(transport, document, ApiAuth::Bearer(token), true)
}

/// Reads a spreadsheet as a service account.
pub fn import_with_service_account(
    transport: &dyn Transport,
    document: &str,
    account: &ServiceAccount,
) -> Result<Table, Error> {
    let token = auth::service_account_access_token(transport, account)?;
    two_phase_fetch(transport, document, ApiAuth::Bearer(token), true)
}
