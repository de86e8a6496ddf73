//! AWS Lambda handler for project evaluations
//!
//! Accepts a JSON `EvaluationRequest`, or a `ComparisonRequest` when the body
//! carries `project_b`. Function URL events wrapping the payload in a string
//! `body` are unwrapped first. Malformed JSON, validation and engine failures
//! all come back as `{ "error": "..." }` rather than a Lambda invocation error.

use capital_budgeting::{
    ComparisonReport, ComparisonRequest, EngineConfig, EvaluationReport, EvaluationRequest,
    Evaluator, ProjectInput,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Parsed payload
#[derive(Debug)]
pub enum LambdaRequest {
    Compare(ComparisonRequest),
    Evaluate(EvaluationRequest),
}

/// Outgoing payload
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LambdaResponse {
    Evaluation(EvaluationReport),
    Comparison(ComparisonReport),
    Failure { error: String },
}

/// Required field, reported by its full path when missing or mistyped
fn required<T: DeserializeOwned>(obj: &Value, path: &str, name: &str) -> Result<T, String> {
    match obj.get(name) {
        None | Some(Value::Null) => Err(format!("Invalid JSON: missing field `{}{}`", path, name)),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| format!("Invalid JSON: field `{}{}`: {}", path, name, e)),
    }
}

/// Optional field; absent or null reads as `None`
fn optional<T: DeserializeOwned>(obj: &Value, path: &str, name: &str) -> Result<Option<T>, String> {
    match obj.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| format!("Invalid JSON: field `{}{}`: {}", path, name, e)),
    }
}

fn parse_project(obj: &Value, path: &str) -> Result<ProjectInput, String> {
    if !obj.is_object() {
        return Err(format!("Invalid JSON: `{}` must be an object", path.trim_end_matches('.')));
    }
    Ok(ProjectInput {
        label: optional(obj, path, "label")?,
        initial_cost: required(obj, path, "initial_cost")?,
        cashflows: required(obj, path, "cashflows")?,
        holding_period_years: optional(obj, path, "holding_period_years")?,
    })
}

/// Pick the request kind by the presence of `project_b` and parse it field by field
pub fn parse_request(payload: &Value) -> Result<LambdaRequest, String> {
    let unwrapped;
    let payload = match payload.get("body") {
        Some(Value::String(body)) => {
            unwrapped = serde_json::from_str::<Value>(body)
                .map_err(|e| format!("Invalid JSON: {}", e))?;
            &unwrapped
        }
        _ => payload,
    };

    if !payload.is_object() {
        return Err("Invalid JSON: request body must be an object".to_string());
    }

    if payload.get("project_b").is_some() {
        let project_a = payload.get("project_a").unwrap_or(&Value::Null);
        let project_b = payload.get("project_b").unwrap_or(&Value::Null);
        Ok(LambdaRequest::Compare(ComparisonRequest {
            project_a: parse_project(project_a, "project_a.")?,
            project_b: parse_project(project_b, "project_b.")?,
            target_rate: required(payload, "", "target_rate")?,
        }))
    } else {
        Ok(LambdaRequest::Evaluate(EvaluationRequest {
            initial_cost: required(payload, "", "initial_cost")?,
            cashflows: required(payload, "", "cashflows")?,
            target_rate: required(payload, "", "target_rate")?,
            holding_period_years: optional(payload, "", "holding_period_years")?,
        }))
    }
}

fn handle(evaluator: &Evaluator, payload: &Value) -> LambdaResponse {
    let request = match parse_request(payload) {
        Ok(request) => request,
        Err(error) => {
            log::warn!("request rejected: {}", error);
            return LambdaResponse::Failure { error };
        }
    };

    let result = match &request {
        LambdaRequest::Evaluate(req) => evaluator.evaluate(req).map(LambdaResponse::Evaluation),
        LambdaRequest::Compare(req) => evaluator.compare(req).map(LambdaResponse::Comparison),
    };

    result.unwrap_or_else(|e| {
        log::warn!("evaluation rejected: {}", e);
        LambdaResponse::Failure { error: e.to_string() }
    })
}

async fn function_handler(
    evaluator: &Evaluator,
    event: LambdaEvent<Value>,
) -> Result<LambdaResponse, Error> {
    let (payload, context) = event.into_parts();
    log::debug!("request {}: {}", context.request_id, payload);
    Ok(handle(evaluator, &payload))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let evaluator = Evaluator::with_config(EngineConfig::from_env());
    let evaluator = &evaluator;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(evaluator, event).await
    }))
    .await
}
