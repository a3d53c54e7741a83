//! Tool server behaviour, both through direct dispatch and over the stdio loop.

use graphlens_cli::tools::{
    CREATE_GRAPH_VISUALIZATION, DELETE_GRAPH, GET_GRAPH, LIST_GRAPHS, LIST_VISUALIZATION_TYPES,
    QUERY_GRAPH, TOOL_NAMES, UPDATE_GRAPH,
};
use graphlens_cli::{serve, ToolError, ToolServer};
use graphlens_core::LensConfig;
use graphlens_store::MemoryGraphStore;
use serde_json::{json, Value};

fn org_graph() -> Value {
    json!({
        "entities": [
            {"id": "acme", "type": "Company", "name": "Acme"},
            {"id": "eng", "type": "Team", "name": "Engineering", "properties": {"size": 12}},
            {"id": "deploy", "type": "Process", "name": "Deploy"}
        ],
        "relationships": [
            {"source": "acme", "target": "eng", "type": "HAS_TEAM"},
            {"source": "eng", "target": "deploy", "type": "PERFORMS_PROCESS"}
        ]
    })
}

fn server() -> ToolServer<MemoryGraphStore> {
    let config = LensConfig {
        base_url: "https://lens.example/".to_string(),
        ..LensConfig::default()
    };
    ToolServer::new(MemoryGraphStore::new(), config)
}

#[test]
fn test_create_uses_defaults() {
    let server = server();
    let created = server
        .dispatch(CREATE_GRAPH_VISUALIZATION, json!({"graph": org_graph()}))
        .unwrap();

    assert_eq!(created["success"], true);
    assert_eq!(created["graphId"], "graph_1");
    assert_eq!(created["visualizationType"], "force-directed");
    assert_eq!(created["title"], "Graph Visualization");
    assert_eq!(
        created["url"],
        "https://lens.example/view?id=graph_1&type=force-directed"
    );
    assert_eq!(created["metadata"]["entityCount"], 3);
    assert_eq!(
        created["metadata"]["entityTypes"],
        json!(["Company", "Team", "Process"])
    );
}

#[test]
fn test_create_rejects_malformed_graph() {
    let server = server();
    let err = server
        .dispatch(
            CREATE_GRAPH_VISUALIZATION,
            json!({"graph": {"entities": []}}),
        )
        .unwrap_err();
    assert!(matches!(err, ToolError::Store(_)));
    assert_eq!(
        err.to_string(),
        "Invalid graph format: missing relationships array"
    );
    assert!(server.store().is_empty());
}

#[test]
fn test_get_returns_stored_fields() {
    let server = server();
    server
        .dispatch(
            CREATE_GRAPH_VISUALIZATION,
            json!({"graph": org_graph(), "visualizationType": "tree", "title": "Org"}),
        )
        .unwrap();

    let fetched = server.dispatch(GET_GRAPH, json!({"graphId": "graph_1"})).unwrap();
    assert_eq!(fetched["success"], true);
    assert_eq!(fetched["graphId"], "graph_1");
    assert_eq!(fetched["title"], "Org");
    assert_eq!(fetched["visualizationType"], "tree");
    assert_eq!(fetched["graph"]["entities"][1]["properties"]["size"], 12);
    assert!(fetched["timestamp"].is_i64());
}

#[test]
fn test_update_then_list() {
    let server = server();
    server
        .dispatch(CREATE_GRAPH_VISUALIZATION, json!({"graph": org_graph(), "title": "Org"}))
        .unwrap();

    let updated = server
        .dispatch(
            UPDATE_GRAPH,
            json!({"graphId": "graph_1", "visualizationType": "sankey"}),
        )
        .unwrap();
    assert_eq!(updated["message"], "Graph updated successfully");
    assert_eq!(
        updated["url"],
        "https://lens.example/view?id=graph_1&type=sankey"
    );
    assert_eq!(updated["metadata"]["relationshipCount"], 2);

    let listed = server.dispatch(LIST_GRAPHS, Value::Null).unwrap();
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["graphs"][0]["title"], "Org");
    assert_eq!(listed["graphs"][0]["visualizationType"], "sankey");
    assert!(listed["graphs"][0].get("graph").is_none());
}

#[test]
fn test_update_validates_new_graph() {
    let server = server();
    server
        .dispatch(CREATE_GRAPH_VISUALIZATION, json!({"graph": org_graph()}))
        .unwrap();

    let err = server
        .dispatch(UPDATE_GRAPH, json!({"graphId": "graph_1", "graph": {"relationships": []}}))
        .unwrap_err();
    assert!(err.to_string().contains("entities"));

    let fetched = server.dispatch(GET_GRAPH, json!({"graphId": "graph_1"})).unwrap();
    assert_eq!(fetched["metadata"]["entityCount"], 3);
}

#[test]
fn test_query_graph_payload() {
    let server = server();
    server
        .dispatch(CREATE_GRAPH_VISUALIZATION, json!({"graph": org_graph()}))
        .unwrap();

    let queried = server
        .dispatch(QUERY_GRAPH, json!({"graphId": "graph_1", "entityId": "eng"}))
        .unwrap();
    assert_eq!(queried["query"]["entityId"], "eng");
    assert_eq!(queried["resultStats"]["entitiesFound"], 1);
    assert_eq!(queried["resultStats"]["relationshipsFound"], 2);

    let queried = server
        .dispatch(
            QUERY_GRAPH,
            json!({"graphId": "graph_1", "nodeIds": ["acme", "eng"]}),
        )
        .unwrap();
    assert_eq!(queried["resultStats"]["entitiesFound"], 2);
    assert_eq!(queried["result"]["relationships"][0]["type"], "HAS_TEAM");
}

#[test]
fn test_delete_graph() {
    let server = server();
    server
        .dispatch(CREATE_GRAPH_VISUALIZATION, json!({"graph": org_graph()}))
        .unwrap();

    let deleted = server
        .dispatch(DELETE_GRAPH, json!({"graphId": "graph_1"}))
        .unwrap();
    assert_eq!(deleted["message"], "Graph graph_1 deleted successfully");

    let missing = server.handle(GET_GRAPH, json!({"graphId": "graph_1"}));
    assert_eq!(missing, json!({"success": false, "error": "Graph not found: graph_1"}));
}

#[test]
fn test_visualization_catalogue() {
    let listed = server().dispatch(LIST_VISUALIZATION_TYPES, json!({})).unwrap();
    let types: Vec<&str> = listed["visualizations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["type"].as_str().unwrap())
        .collect();
    assert_eq!(
        types,
        vec!["force-directed", "chord", "heatmap", "tree", "swimlane", "sankey"]
    );
}

#[test]
fn test_every_listed_tool_is_dispatched() {
    let server = server();
    for tool in TOOL_NAMES {
        let result = server.dispatch(tool, json!({}));
        assert!(
            !matches!(result, Err(ToolError::UnknownTool(_))),
            "{tool} is listed but not dispatched"
        );
    }
}

#[test]
fn test_unknown_tool() {
    let response = server().handle("render_graph", json!({}));
    assert_eq!(response["success"], false);
    assert_eq!(response["error"], "Unknown tool: render_graph");
}

#[tokio::test]
async fn test_serve_answers_each_line() {
    let server = server();
    let input = format!(
        "{}\n\n{}\nnot json\n{}\n",
        json!({"tool": CREATE_GRAPH_VISUALIZATION, "arguments": {"graph": org_graph()}}),
        json!({"tool": LIST_GRAPHS}),
        json!({"tool": DELETE_GRAPH, "arguments": {"graphId": "graph_7"}}),
    );
    let mut output = Vec::new();

    let answered = serve(&server, input.as_bytes(), &mut output).await.unwrap();
    assert_eq!(answered, 4);

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 4);
    assert_eq!(responses[0]["graphId"], "graph_1");
    assert_eq!(responses[1]["count"], 1);
    assert_eq!(responses[2]["success"], false);
    assert!(responses[2]["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request"));
    assert_eq!(responses[3]["error"], "Graph not found: graph_7");
}
