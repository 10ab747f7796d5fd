//! Request DTOs for the admin API

use serde::Deserialize;

/// Request body for PUT /cache/*key
#[derive(Debug, Clone, Deserialize)]
pub struct PutRequest {
    /// The value to cache
    pub value: String,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_request_deserialize() {
        let req: PutRequest = serde_json::from_str(r#"{"value": "<html/>"}"#).unwrap();
        assert_eq!(req.value, "<html/>");
        assert!(req.ttl.is_none());
    }

    #[test]
    fn test_put_request_with_ttl() {
        let req: PutRequest = serde_json::from_str(r#"{"value": "v", "ttl": 60}"#).unwrap();
        assert_eq!(req.ttl, Some(60));
    }
}
