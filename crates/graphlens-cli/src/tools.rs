//! Tool dispatch over a graph store.
//!
//! Each tool takes a JSON argument object and returns a JSON payload with
//! `success: true`. Failures are reported by [`ToolServer::handle`] as
//! `{"success": false, "error": message}`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use graphlens_core::{LensConfig, VisualizationType};
use graphlens_store::records::graph_from_value;
use graphlens_store::{GraphQuery, GraphStore, GraphUpdate, QueryStats, StoreError};

pub const CREATE_GRAPH_VISUALIZATION: &str = "create_graph_visualization";
pub const GET_GRAPH: &str = "get_graph";
pub const UPDATE_GRAPH: &str = "update_graph";
pub const QUERY_GRAPH: &str = "query_graph";
pub const LIST_GRAPHS: &str = "list_graphs";
pub const DELETE_GRAPH: &str = "delete_graph";
pub const LIST_VISUALIZATION_TYPES: &str = "list_visualization_types";

/// Every tool name the server answers to.
pub const TOOL_NAMES: [&str; 7] = [
    CREATE_GRAPH_VISUALIZATION,
    GET_GRAPH,
    UPDATE_GRAPH,
    QUERY_GRAPH,
    LIST_GRAPHS,
    DELETE_GRAPH,
    LIST_VISUALIZATION_TYPES,
];

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// One line of the stdio protocol.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolRequest {
    pub tool: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateArgs {
    graph: Value,
    visualization_type: Option<VisualizationType>,
    title: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphIdArgs {
    graph_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateArgs {
    graph_id: String,
    graph: Option<Value>,
    visualization_type: Option<VisualizationType>,
    title: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryArgs {
    graph_id: String,
    #[serde(flatten)]
    query: GraphQuery,
}

/// Decode tool arguments; a missing argument object reads as `{}`.
fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    let arguments = if arguments.is_null() { json!({}) } else { arguments };
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

pub struct ToolServer<S> {
    store: S,
    config: LensConfig,
}

impl<S: GraphStore> ToolServer<S> {
    pub fn new(store: S, config: LensConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run a tool, folding any failure into an error payload.
    pub fn handle(&self, tool: &str, arguments: Value) -> Value {
        match self.dispatch(tool, arguments) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(tool, error = %err, "Tool call failed");
                json!({ "success": false, "error": err.to_string() })
            }
        }
    }

    pub fn dispatch(&self, tool: &str, arguments: Value) -> Result<Value, ToolError> {
        tracing::debug!(tool, "Dispatching tool call");
        match tool {
            CREATE_GRAPH_VISUALIZATION => self.create(parse_args(arguments)?),
            GET_GRAPH => self.get(parse_args(arguments)?),
            UPDATE_GRAPH => self.update(parse_args(arguments)?),
            QUERY_GRAPH => self.query(parse_args(arguments)?),
            LIST_GRAPHS => self.list(),
            DELETE_GRAPH => self.delete(parse_args(arguments)?),
            LIST_VISUALIZATION_TYPES => Ok(json!({
                "visualizations": VisualizationType::catalogue(),
            })),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    fn create(&self, args: CreateArgs) -> Result<Value, ToolError> {
        let graph = graph_from_value(args.graph)?;
        let visualization_type = args
            .visualization_type
            .unwrap_or(self.config.default_visualization);
        let title = args
            .title
            .unwrap_or_else(|| self.config.default_title.clone());

        let (graph_id, stored) = self.store.create(graph, visualization_type, title)?;

        Ok(json!({
            "success": true,
            "graphId": graph_id,
            "url": self.config.view_url(&graph_id, stored.visualization_type),
            "visualizationType": stored.visualization_type,
            "title": stored.title,
            "metadata": stored.metadata,
        }))
    }

    fn get(&self, args: GraphIdArgs) -> Result<Value, ToolError> {
        let stored = self.store.get(&args.graph_id)?;

        let mut payload = json!({ "success": true, "graphId": args.graph_id });
        if let (Value::Object(out), Value::Object(fields)) =
            (&mut payload, serde_json::to_value(&stored)?)
        {
            out.extend(fields);
        }
        Ok(payload)
    }

    fn update(&self, args: UpdateArgs) -> Result<Value, ToolError> {
        let graph = args.graph.map(graph_from_value).transpose()?;
        let stored = self.store.update(
            &args.graph_id,
            GraphUpdate {
                graph,
                visualization_type: args.visualization_type,
                title: args.title,
            },
        )?;

        Ok(json!({
            "success": true,
            "graphId": args.graph_id,
            "url": self.config.view_url(&args.graph_id, stored.visualization_type),
            "message": "Graph updated successfully",
            "metadata": stored.metadata,
        }))
    }

    fn query(&self, args: QueryArgs) -> Result<Value, ToolError> {
        let result = self.store.query(&args.graph_id, &args.query)?;

        Ok(json!({
            "success": true,
            "graphId": args.graph_id,
            "query": args.query,
            "resultStats": QueryStats::of(&result),
            "result": result,
        }))
    }

    fn list(&self) -> Result<Value, ToolError> {
        let graphs = self.store.list()?;
        Ok(json!({
            "success": true,
            "count": graphs.len(),
            "graphs": graphs,
        }))
    }

    fn delete(&self, args: GraphIdArgs) -> Result<Value, ToolError> {
        self.store.delete(&args.graph_id)?;
        Ok(json!({
            "success": true,
            "message": format!("Graph {} deleted successfully", args.graph_id),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphlens_store::MemoryGraphStore;

    fn server() -> ToolServer<MemoryGraphStore> {
        ToolServer::new(MemoryGraphStore::new(), LensConfig::default())
    }

    #[test]
    fn test_parse_args_treats_null_as_empty() {
        #[derive(Deserialize)]
        struct Empty {
            #[serde(default)]
            title: Option<String>,
        }
        let parsed: Empty = parse_args(Value::Null).unwrap();
        assert!(parsed.title.is_none());
    }

    #[test]
    fn test_missing_graph_id_is_invalid_arguments() {
        let err = server().dispatch(GET_GRAPH, json!({})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(msg) if msg.contains("graphId")));
    }

    #[test]
    fn test_bad_visualization_type_is_rejected() {
        let err = server()
            .dispatch(
                CREATE_GRAPH_VISUALIZATION,
                json!({
                    "graph": {"entities": [], "relationships": []},
                    "visualizationType": "pie"
                }),
            )
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_store_errors_keep_their_message() {
        let err = server()
            .dispatch(DELETE_GRAPH, json!({"graphId": "graph_3"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "Graph not found: graph_3");
    }

    #[test]
    fn test_query_args_flatten() {
        let args: QueryArgs =
            parse_args(json!({"graphId": "graph_1", "relationshipType": "HAS_TEAM"})).unwrap();
        assert_eq!(args.graph_id, "graph_1");
        assert_eq!(args.query.relationship_type.as_deref(), Some("HAS_TEAM"));
        assert!(args.query.entity_id.is_none());
    }
}
