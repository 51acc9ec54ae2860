//! `/security-patterns` endpoints.

use reqwest::Method;

use crate::error::ApiError;
use crate::model::SecurityPattern;

use super::ApiClient;

impl ApiClient {
    /// `GET /security-patterns`: the whole catalog.
    pub async fn list_security_patterns(&self) -> Result<Vec<SecurityPattern>, ApiError> {
        let builder = self.request(Method::GET, "/security-patterns");
        self.send_json("GET security patterns", builder).await
    }

    /// `GET /security-patterns/{id}`.
    pub async fn get_security_pattern(&self, pattern_id: i64) -> Result<SecurityPattern, ApiError> {
        let operation = format!("GET security pattern {pattern_id}");
        let builder = self.request(Method::GET, &format!("/security-patterns/{pattern_id}"));
        self.send_json(&operation, builder).await
    }
}
