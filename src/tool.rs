//! JSON adapter for the agent tool that drives a [`Retriever`].
//!
//! Requests are tagged by `"operation"`:
//!
//! ```json
//! {"operation": "initialize", "documents": ["...", "..."]}
//! {"operation": "append", "documents": ["..."]}
//! {"operation": "search", "query": "vector database", "top_k": 3}
//! ```
//!
//! `documents` entries are validated before anything is indexed, so a batch
//! with a null or non-string entry leaves the corpus untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::retriever::Retriever;

/// Tool call, tagged by its `operation` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum ToolRequest {
    Initialize { documents: Vec<Value> },
    Append { documents: Vec<Value> },
    Search { query: String, top_k: Option<usize> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolHit {
    pub text: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ToolBody {
    Indexed { documents_indexed: usize, corpus_size: usize },
    Results { results: Vec<ToolHit> },
    Failed { kind: ErrorKind, message: String },
}

/// Reply body: `status` plus the operation's payload.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResponse {
    pub status: ToolStatus,
    #[serde(flatten)]
    pub body: ToolBody,
}

impl ToolResponse {
    fn ok(body: ToolBody) -> Self {
        ToolResponse { status: ToolStatus::Ok, body }
    }

    fn failed(err: &Error) -> Self {
        ToolResponse {
            status: ToolStatus::Error,
            body: ToolBody::Failed {
                kind: err.kind,
                message: err.context.clone(),
            },
        }
    }
}

/// JSON front end for a `Retriever`.
pub struct SearchTool {
    retriever: Retriever,
}

impl SearchTool {
    pub fn new(retriever: Retriever) -> Self {
        SearchTool { retriever }
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    pub fn handle(&self, request: ToolRequest) -> Result<ToolResponse> {
        match request {
            ToolRequest::Initialize { documents } => {
                let texts = validate_documents(documents)?;
                let documents_indexed = self.retriever.initialize(texts);
                Ok(ToolResponse::ok(ToolBody::Indexed {
                    documents_indexed,
                    corpus_size: self.retriever.len(),
                }))
            }
            ToolRequest::Append { documents } => {
                let texts = validate_documents(documents)?;
                let documents_indexed = self.retriever.append(texts);
                Ok(ToolResponse::ok(ToolBody::Indexed {
                    documents_indexed,
                    corpus_size: self.retriever.len(),
                }))
            }
            ToolRequest::Search { query, top_k } => {
                let top_k = top_k.unwrap_or(self.retriever.config().default_top_k);
                let results = self.retriever
                    .search(&query, top_k)?
                    .into_iter()
                    .map(|hit| ToolHit { text: hit.text, score: hit.score })
                    .collect();
                Ok(ToolResponse::ok(ToolBody::Results { results }))
            }
        }
    }

    /// Full JSON round trip. Failures are reported in the response body.
    pub fn handle_json(&self, payload: &str) -> String {
        let response = serde_json::from_str::<ToolRequest>(payload)
            .map_err(Error::from)
            .and_then(|request| self.handle(request))
            .unwrap_or_else(|err| {
                warn!(kind = ?err.kind, error = %err.context, "tool request rejected");
                ToolResponse::failed(&err)
            });

        serde_json::to_string(&response).unwrap_or_else(|err| {
            serde_json::json!({ "status": "error", "kind": "parse", "message": err.to_string() }).to_string()
        })
    }
}

fn validate_documents(documents: Vec<Value>) -> Result<Vec<String>> {
    documents
        .into_iter()
        .enumerate()
        .map(|(i, value)| match value {
            Value::String(text) => Ok(text),
            Value::Null => Err(Error::malformed_input(format!("documents[{}] is null", i))),
            other => Err(Error::malformed_input(format!(
                "documents[{}] must be a string, got {}",
                i,
                json_type_name(&other)
            ))),
        })
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool() -> SearchTool {
        SearchTool::new(Retriever::default())
    }

    fn parse(response: &str) -> Value {
        serde_json::from_str(response).unwrap()
    }

    #[test]
    fn test_initialize_then_search() {
        let tool = tool();
        let indexed = parse(&tool.handle_json(
            r#"{"operation":"initialize","documents":["Pinecone is a vector database.","React is a UI library."]}"#,
        ));
        assert_eq!(indexed["status"], "ok");
        assert_eq!(indexed["documents_indexed"], 2);
        assert_eq!(indexed["corpus_size"], 2);

        let found = parse(&tool.handle_json(r#"{"operation":"search","query":"vector database"}"#));
        assert_eq!(found["status"], "ok");
        let results = found["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["text"], "Pinecone is a vector database.");
        assert!(results[0]["score"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_null_entry_fails_whole_batch() {
        let tool = tool();
        tool.handle_json(r#"{"operation":"initialize","documents":["kept"]}"#);

        let response = parse(&tool.handle_json(r#"{"operation":"append","documents":["new", null]}"#));
        assert_eq!(response["status"], "error");
        assert_eq!(response["kind"], "malformed_input");
        assert_eq!(tool.retriever().len(), 1);
    }

    #[test]
    fn test_non_string_entry_is_malformed() {
        let tool = tool();
        let request = ToolRequest::Initialize { documents: vec![json!("ok"), json!(42)] };
        let err = tool.handle(request).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedInput);
        assert!(err.context.contains("documents[1]"));
        assert!(tool.retriever().is_empty());
    }

    #[test]
    fn test_default_top_k_is_five() {
        let tool = tool();
        let docs: Vec<String> = (0..8).map(|i| format!("shared term {i}")).collect();
        tool.retriever().initialize(docs);

        let response = tool.handle(ToolRequest::Search { query: "shared".into(), top_k: None }).unwrap();
        match response.body {
            ToolBody::Results { results } => assert_eq!(results.len(), 5),
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[test]
    fn test_zero_top_k_is_reported() {
        let tool = tool();
        let response = parse(&tool.handle_json(r#"{"operation":"search","query":"x","top_k":0}"#));
        assert_eq!(response["status"], "error");
        assert_eq!(response["kind"], "invalid_argument");
    }

    #[test]
    fn test_unknown_operation_is_parse_error() {
        let tool = tool();
        let response = parse(&tool.handle_json(r#"{"operation":"delete","id":3}"#));
        assert_eq!(response["status"], "error");
        assert_eq!(response["kind"], "parse");

        let response = parse(&tool.handle_json("not json at all"));
        assert_eq!(response["kind"], "parse");
    }

    #[test]
    fn test_search_uninitialized_returns_empty_results() {
        let tool = tool();
        let response = parse(&tool.handle_json(r#"{"operation":"search","query":"anything","top_k":3}"#));
        assert_eq!(response["status"], "ok");
        assert_eq!(response["results"], json!([]));
    }
}
