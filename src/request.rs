use reqwest::{header::HeaderMap, Method, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use url::Url;

use crate::{NovuError, Result};

/// One logical API call: verb, path below the backend URL, query and body.
///
/// Built fresh for every call and consumed by [`NovuClient::send`](crate::NovuClient::send).
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Creates a request for `segments`, joined below the backend URL.
    ///
    /// Each segment is percent-encoded on its own, so identifiers containing
    /// `/` or `?` stay inside their segment.
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, segments)
    }

    pub fn put<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::PUT, segments)
    }

    pub fn patch<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::PATCH, segments)
    }

    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::DELETE, segments)
    }

    /// Appends a query pair. Repeated keys are kept in order.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Appends a query pair only when `value` is present.
    #[must_use]
    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Serializes `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body).map_err(NovuError::Encode)?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Resolves the request against the backend URL.
    pub(crate) fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| NovuError::InvalidUrl(format!("{base} cannot be a base url")))?
            .pop_if_empty()
            .extend(&self.segments);
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

/// Decoded response plus the raw status and headers it arrived with.
#[derive(Clone, Debug)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn into_data(self) -> T {
        self.data
    }

    /// Whether the server answered `201 Created`.
    pub fn is_created(&self) -> bool {
        self.status == StatusCode::CREATED
    }

    /// Fails with [`NovuError::UnexpectedStatus`] unless the status matches.
    pub fn require_status(self, expected: StatusCode) -> Result<Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(NovuError::UnexpectedStatus {
                expected: expected.as_u16(),
                actual: self.status.as_u16(),
            })
        }
    }
}

/// Serializes `payload` to a JSON object and sets `key` to `value` on it.
///
/// `value` wins over an existing field of the same name. A payload that
/// serializes to `null` is treated as an empty object; any other non-object
/// is rejected.
pub fn merge_field<P>(payload: &P, key: &str, value: impl Into<JsonValue>) -> Result<Map<String, JsonValue>>
where
    P: Serialize + ?Sized,
{
    let mut object = match serde_json::to_value(payload).map_err(NovuError::Encode)? {
        JsonValue::Object(object) => object,
        JsonValue::Null => Map::new(),
        other => {
            return Err(NovuError::InvalidPayload(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            )))
        }
    };
    object.insert(key.to_owned(), value.into());
    Ok(object)
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
