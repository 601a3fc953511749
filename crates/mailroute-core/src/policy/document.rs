//! Policy document schema and defaulting merge.
//!
//! A stored document may be partial, written by an older schema, or hand
//! edited. `merge_defaults` rebuilds every field with a type guard per
//! field, so evaluation always sees a complete document. Array contents
//! (list entries, filter rules) are kept as stored and only interpreted at
//! evaluation time. Nothing is shared between calls: each result owns fresh
//! containers.

use std::sync::OnceLock;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{MailRouteError, Result};

pub const DEFAULT_ENABLED: bool = true;
pub const DEFAULT_LOG_SENDER_DOMAIN: bool = true;
pub const DEFAULT_LOG_SUBJECT: bool = true;
pub const DEFAULT_LOG_BODY: bool = false;

/// Complete, defaulted routing policy for one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDocument {
    pub name: String,
    pub created: String,
    pub enabled: bool,
    pub site_origin: String,
    pub forward_to: ForwardTo,
    pub allow: ListRules,
    pub deny: ListRules,
    pub filtering: Vec<FilterRule>,
    pub junk: bool,
    pub mailing_list: bool,
    pub logging: LoggingFlags,
}

impl PolicyDocument {
    /// Canonical defaults, stamped with the given creation time.
    pub fn defaults_at(created: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            created: created.into(),
            enabled: DEFAULT_ENABLED,
            site_origin: String::new(),
            forward_to: ForwardTo::default(),
            allow: ListRules::default(),
            deny: ListRules::default(),
            filtering: Vec::new(),
            junk: false,
            mailing_list: false,
            logging: LoggingFlags::default(),
        }
    }

    /// Parse a stored JSON string and fill in defaults.
    ///
    /// Only invalid JSON, or JSON whose top level is not an object, fails;
    /// any object yields a complete document. A top-level array, string,
    /// number or `null` is refused here rather than silently replaced by
    /// the defaults, so a corrupted entry shows up as "Invalid routing
    /// config" instead of routing as an empty policy. `merge_defaults`
    /// itself still accepts any value.
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| MailRouteError::MalformedDocument(format!("invalid json: {e}")))?;
        if !value.is_object() {
            return Err(MailRouteError::MalformedDocument(
                "document must be a json object".into(),
            ));
        }
        Ok(merge_defaults(&value))
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Forwarding destinations as stored: a single address or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ForwardTo {
    One(String),
    Many(Vec<Value>),
}

impl Default for ForwardTo {
    fn default() -> Self {
        ForwardTo::Many(Vec::new())
    }
}

impl ForwardTo {
    /// Canonical ordered sequence. An empty single address counts as none;
    /// non-string list entries are kept as stored but never forwarded to.
    pub fn addresses(&self) -> Vec<String> {
        match self {
            ForwardTo::One(addr) if addr.is_empty() => Vec::new(),
            ForwardTo::One(addr) => vec![addr.clone()],
            ForwardTo::Many(list) => string_entries(list).map(str::to_string).collect(),
        }
    }
}

/// Allow or deny list, entries kept as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRules {
    pub domains: Vec<Value>,
    pub emails: Vec<Value>,
}

impl ListRules {
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty() && self.emails.is_empty()
    }

    /// String entries of `domains`; anything else never matches.
    pub fn domain_names(&self) -> impl Iterator<Item = &str> {
        string_entries(&self.domains)
    }

    pub fn email_names(&self) -> impl Iterator<Item = &str> {
        string_entries(&self.emails)
    }
}

fn string_entries(items: &[Value]) -> impl Iterator<Item = &str> {
    items.iter().filter_map(Value::as_str)
}

/// What a matching subject filter does.
///
/// Only `reject` has an effect today. Any other stored action reads as
/// `Reserved` and evaluates as a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    Reject,
    Reserved(String),
}

impl FilterAction {
    pub fn parse(s: &str) -> Self {
        match s {
            "reject" => FilterAction::Reject,
            other => FilterAction::Reserved(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilterAction::Reject => "reject",
            FilterAction::Reserved(s) => s,
        }
    }
}

/// Subject filter entry, kept exactly as stored (extra keys included).
///
/// `pattern` and `action` are only read at evaluation time; an entry
/// without a string `pattern` never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterRule(Value);

impl FilterRule {
    pub fn new(pattern: impl Into<String>, action: FilterAction) -> Self {
        FilterRule(serde_json::json!({
            "pattern": pattern.into(),
            "action": action.as_str(),
        }))
    }

    pub fn from_value(raw: Value) -> Self {
        FilterRule(raw)
    }

    pub fn pattern(&self) -> Option<&str> {
        self.0.get("pattern").and_then(Value::as_str)
    }

    pub fn action(&self) -> Option<FilterAction> {
        self.0.get("action").and_then(Value::as_str).map(FilterAction::parse)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }
}

/// External logging switches. No effect on the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingFlags {
    pub log_sender_domain: bool,
    pub log_subject: bool,
    pub log_body: bool,
}

impl Default for LoggingFlags {
    fn default() -> Self {
        Self {
            log_sender_domain: DEFAULT_LOG_SENDER_DOMAIN,
            log_subject: DEFAULT_LOG_SUBJECT,
            log_body: DEFAULT_LOG_BODY,
        }
    }
}

/// Current UTC time in the `created` field format (RFC 3339, millis, `Z`).
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `created` default: fixed once per process, so repeated merges of the
/// same partial document agree.
pub fn default_created() -> &'static str {
    static CREATED: OnceLock<String> = OnceLock::new();
    CREATED.get_or_init(now_timestamp)
}

/// Fill every missing or wrong-typed field of `raw` with its default.
///
/// Total: never fails. A non-object `raw` yields the plain defaults.
pub fn merge_defaults(raw: &Value) -> PolicyDocument {
    merge_defaults_at(raw, default_created())
}

/// `merge_defaults` with an explicit fallback for `created`.
pub fn merge_defaults_at(raw: &Value, created: impl Into<String>) -> PolicyDocument {
    let mut doc = PolicyDocument::defaults_at(created);
    let Some(obj) = raw.as_object() else {
        return doc;
    };

    if let Some(s) = str_field(obj, "name") {
        doc.name = s;
    }
    if let Some(s) = str_field(obj, "created") {
        doc.created = s;
    }
    if let Some(b) = bool_field(obj, "enabled") {
        doc.enabled = b;
    }
    if let Some(s) = str_field(obj, "site_origin") {
        doc.site_origin = s;
    }
    if let Some(b) = bool_field(obj, "junk") {
        doc.junk = b;
    }
    if let Some(b) = bool_field(obj, "mailing_list") {
        doc.mailing_list = b;
    }

    doc.forward_to = match obj.get("forward_to") {
        Some(Value::Array(items)) => ForwardTo::Many(items.clone()),
        Some(Value::String(s)) => ForwardTo::One(s.clone()),
        _ => ForwardTo::default(),
    };

    doc.allow = list_rules(obj.get("allow"));
    doc.deny = list_rules(obj.get("deny"));

    if let Some(Value::Array(items)) = obj.get("filtering") {
        doc.filtering = items.iter().cloned().map(FilterRule::from_value).collect();
    }

    if let Some(Value::Object(logging)) = obj.get("logging") {
        if let Some(b) = bool_field(logging, "log_sender_domain") {
            doc.logging.log_sender_domain = b;
        }
        if let Some(b) = bool_field(logging, "log_subject") {
            doc.logging.log_subject = b;
        }
        if let Some(b) = bool_field(logging, "log_body") {
            doc.logging.log_body = b;
        }
    }

    doc
}

fn str_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> Option<bool> {
    obj.get(key).and_then(Value::as_bool)
}

fn list_rules(v: Option<&Value>) -> ListRules {
    let Some(Value::Object(obj)) = v else {
        return ListRules::default();
    };
    let list = |key: &str| match obj.get(key) {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    };
    ListRules {
        domains: list("domains"),
        emails: list("emails"),
    }
}
