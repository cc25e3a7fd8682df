use serde::{Deserialize, Serialize};

/// Untyped response body for endpoints without a stable schema.
pub type JsonResponse = serde_json::Value;

/// The `{ "data": ... }` envelope most endpoints wrap their payload in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    #[serde(default)]
    pub data: T,
}

/// Page of results returned by list endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Page<T> {
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub has_more: Option<bool>,
    pub data: Vec<T>,
}

/// Delivery channel of an integration, step or message.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    Email,
    Sms,
    InApp,
    Chat,
    Push,
}

impl ChannelType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::InApp => "in_app",
            Self::Chat => "chat",
            Self::Push => "push",
        }
    }
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ChannelType, DataResponse, Page};

    #[test]
    fn channel_type_uses_api_spelling() {
        assert_eq!(serde_json::to_value(ChannelType::InApp).unwrap(), json!("in_app"));
        assert_eq!(ChannelType::InApp.to_string(), "in_app");
    }

    #[test]
    fn page_tolerates_missing_fields() {
        let page: Page<String> =
            serde_json::from_value(json!({"data": ["a"], "pageSize": 10})).unwrap();
        assert_eq!(page.page, 0);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.data, vec!["a".to_owned()]);
    }

    #[test]
    fn envelope_defaults_missing_data() {
        let envelope: DataResponse<Vec<u32>> = serde_json::from_value(json!({})).unwrap();
        assert!(envelope.data.is_empty());
    }
}
