// src/lambda.rs

//! AWS Lambda handler for the headline fetch proxy.
//!
//! Maps an API-Gateway-style event onto a [`ProxyService`] call and the
//! resulting [`ProxyResponse`] back onto a `{statusCode, headers, body}`
//! value. The handler itself never returns an error: every failure,
//! including configuration failures, becomes the uniform 500 envelope.

use lambda_runtime::{Error as LambdaError, LambdaEvent};
use serde_json::{json, Value};
use tracing::{error, info, instrument, warn};

use crate::config;
use crate::error::Result;
use crate::models::{Category, Config, QueryParams};
use crate::services::{ProxyResponse, ProxyService};

/// Main Lambda handler function.
#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Value>) -> std::result::Result<Value, LambdaError> {
    info!(
        "Handling headlines request: {:?}",
        event.payload.get("queryStringParameters")
    );

    let response = match proxy_request(&event.payload).await {
        Ok(response) => response,
        Err(err) => {
            error!("Headline proxy setup failed: {err}");
            ProxyResponse::error(&err)
        }
    };

    Ok(to_lambda_response(&response))
}

/// Resolve configuration, parse the query, and run the proxy.
async fn proxy_request(payload: &Value) -> Result<ProxyResponse> {
    let (config, api_key) = config::load_from_env()?;
    let params = parse_params(payload, &config);
    let service = ProxyService::new(config, api_key)?;
    Ok(service.handle(&params).await)
}

/// Extract query parameters from the event, applying configured defaults.
///
/// An unrecognized category falls back to the default rather than failing
/// the request.
fn parse_params(payload: &Value, config: &Config) -> QueryParams {
    let mut params = QueryParams {
        country: config.upstream.country.clone(),
        max_results: config.upstream.max_results,
        ..QueryParams::default()
    };

    let Some(query) = payload.get("queryStringParameters").and_then(Value::as_object) else {
        return params;
    };

    if let Some(category) = query.get("category").and_then(Value::as_str) {
        match category.parse::<Category>() {
            Ok(parsed) => params.category = parsed,
            Err(_) => warn!("Unknown category {category:?}, using {}", params.category),
        }
    }
    if let Some(country) = query.get("country").and_then(Value::as_str) {
        params.country = country.to_string();
    }
    if let Some(max) = query
        .get("max")
        .and_then(Value::as_str)
        .and_then(|m| m.parse().ok())
    {
        params.max_results = max;
    }
    params.cache_bust = query.get("t").and_then(Value::as_str).map(String::from);

    params
}

/// Build the API-Gateway-style response value.
fn to_lambda_response(response: &ProxyResponse) -> Value {
    json!({
        "statusCode": response.status,
        "headers": response_headers(response.status == 200),
        "body": response.body,
    })
}

/// Response headers: permissive CORS and JSON always, cache disabling on
/// success responses.
fn response_headers(ok: bool) -> Value {
    if ok {
        json!({
            "Access-Control-Allow-Origin": "*",
            "Content-Type": "application/json",
            "Cache-Control": "no-cache, no-store, must-revalidate",
            "Pragma": "no-cache",
            "Expires": "0",
        })
    } else {
        json!({
            "Access-Control-Allow-Origin": "*",
            "Content-Type": "application/json",
        })
    }
}
