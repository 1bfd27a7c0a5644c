//! Mandatory request parameter checks.

use async_trait::async_trait;

use super::pipeline::{Filter, RequestContext};
use crate::error::AppError;

/// Rejects requests lacking any of the listed parameters.
///
/// A parameter present with an empty value counts as missing. The first
/// missing name, in declaration order, is reported.
pub struct RequireParams {
    names: Vec<&'static str>,
}

impl RequireParams {
    pub fn new<I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        Self {
            names: names.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Filter for RequireParams {
    fn name(&self) -> &'static str {
        "require_params"
    }

    async fn before(&self, ctx: &RequestContext) -> Result<(), AppError> {
        for name in &self.names {
            ctx.require(name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn ctx(params: &[(&str, &str)]) -> RequestContext {
        let params: HashMap<String, String> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RequestContext::new("10.0.0.1", "/customshorten", params)
    }

    #[tokio::test]
    async fn test_all_present() {
        let filter = RequireParams::new(["longurl", "customurl"]);

        let result = filter
            .before(&ctx(&[("longurl", "https://example.com"), ("customurl", "promo")]))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_reports_first_missing() {
        let filter = RequireParams::new(["longurl", "customurl"]);

        let err = filter.before(&ctx(&[])).await.unwrap_err();

        assert_eq!(err.to_string(), "Expected parameter longurl not found");
    }

    #[tokio::test]
    async fn test_empty_value_is_missing() {
        let filter = RequireParams::new(["longurl", "customurl"]);

        let err = filter
            .before(&ctx(&[("longurl", "https://example.com"), ("customurl", "")]))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MissingParameter(name) if name == "customurl"));
    }
}
