use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use pretty_assertions::assert_eq;

use reqgraph_extract::{
    graph_from_response, graph_from_yaml, validate_graph, DecodeStrategy, ErrorKind,
    ExtractError, Extractor, Graph, Link, ModelUnavailable, NodeKind, TextGenerator,
};

mock! {
    pub Generator {}

    #[async_trait]
    impl TextGenerator for Generator {
        async fn generate(&self, prompt: &str) -> Result<String, ModelUnavailable>;
    }
}

const INPUT: &str = "Requirement: respond within 1s. Constraint: must use existing auth system.";

const JSON_RESPONSE: &str = r#"{
  "nodes": [
    {"id": "R1", "type": "requirement", "text": "Respond within 1s"},
    {"id": "C1", "type": "constraint", "text": "Use existing auth"}
  ],
  "links": [{"source": "C1", "target": "R1", "label": "constrains"}]
}"#;

const YAML_RESPONSE: &str = r#"Here is the structured analysis.

```yaml
requirements:
  - id: R1
    text: Respond within 1s
    description: Every request answers within one second
    related_to:
      - id: C1
        relation: constrained_by
constraints:
  - id: C1
    text: Use existing auth
implicit_knowledge:
  - id: I1
    text: Auth service latency counts towards the budget
    related_to:
      - id: R1
        relation: affects
```

Let me know if you need anything else."#;

// Helper to build an extractor whose model answers every prompt with `response`
fn extractor_returning(response: impl Into<String>) -> Extractor {
    let response = response.into();
    let mut generator = MockGenerator::new();
    generator
        .expect_generate()
        .times(1)
        .returning(move |_| Ok(response.clone()));
    Extractor::new(Arc::new(generator))
}

fn assert_structurally_valid(graph: &Graph) {
    let ids: HashSet<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), graph.nodes.len(), "node ids must be pairwise distinct");
    for link in &graph.links {
        assert!(ids.contains(link.source.as_str()), "dangling source in {}", link);
        assert!(ids.contains(link.target.as_str()), "dangling target in {}", link);
    }
}

#[tokio::test]
async fn test_extract_two_nodes_one_link() {
    let mut generator = MockGenerator::new();
    generator
        .expect_generate()
        .withf(|prompt: &str| prompt.contains(INPUT) && prompt.contains("\"nodes\""))
        .times(1)
        .returning(|_| Ok(JSON_RESPONSE.to_string()));
    let extractor = Extractor::new(Arc::new(generator));

    let graph = extractor.extract(INPUT).await.unwrap();

    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.links.len(), 1);
    assert_eq!(graph.nodes[0].kind, NodeKind::Requirement);
    assert_eq!(graph.nodes[1].kind, NodeKind::Constraint);
    assert_eq!(graph.links[0], Link::new("C1", "R1", "constrains"));
    assert_structurally_valid(&graph);
}

#[tokio::test]
async fn test_extract_from_chatty_fenced_response() {
    let response = format!(
        "Of course!\n```json\n{}\n```\nThe {{R1}} node is central.",
        JSON_RESPONSE
    );

    let graph = extractor_returning(response).extract(INPUT).await.unwrap();
    assert_eq!(graph.nodes.len(), 2);
}

#[tokio::test]
async fn test_prose_only_response_is_no_structured_block() {
    let prose = "I could not identify any requirements in this text, sorry.";

    let err = extractor_returning(prose).extract(INPUT).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoStructuredBlock);

    let err = extractor_returning(prose).extract_with_yaml(INPUT).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoStructuredBlock);
}

#[tokio::test]
async fn test_missing_links_key_is_decode_error() {
    let response = r#"{"nodes":[{"id":"R1","type":"requirement","text":"Respond within 1s"}]}"#;

    let err = extractor_returning(response).extract(INPUT).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(err.to_string().contains("'links'"), "unexpected message: {}", err);
}

#[tokio::test]
async fn test_dangling_link_is_validation_error() {
    let response = r#"{
        "nodes": [{"id": "R1", "type": "requirement", "text": "Respond within 1s"}],
        "links": [{"source": "C1", "target": "R1", "label": "constrains"}]
    }"#;

    let err = extractor_returning(response).extract(INPUT).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("C1 -[constrains]-> R1"), "unexpected message: {}", err);
}

#[tokio::test]
async fn test_model_unavailable_is_not_retried() {
    let mut generator = MockGenerator::new();
    generator
        .expect_generate()
        .times(1)
        .returning(|_| Err(ModelUnavailable::new("503 from upstream")));
    let extractor = Extractor::new(Arc::new(generator));

    let err = extractor.extract(INPUT).await.unwrap_err();
    assert!(matches!(
        err,
        ExtractError::ModelUnavailable(ref reason) if reason == "503 from upstream"
    ));
}

#[tokio::test]
async fn test_extract_with_yaml_returns_intermediate_and_graph() {
    let mut generator = MockGenerator::new();
    generator
        .expect_generate()
        .withf(|prompt: &str| prompt.contains(INPUT) && prompt.contains("implicit_knowledge"))
        .times(1)
        .returning(|_| Ok(YAML_RESPONSE.to_string()));
    let extractor = Extractor::new(Arc::new(generator));

    let extraction = extractor.extract_with_yaml(INPUT).await.unwrap();

    assert!(extraction.yaml.starts_with("requirements:"));
    assert!(!extraction.yaml.contains("```"));
    assert_eq!(
        extraction.graph.nodes.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(),
        vec!["R1", "C1", "I1"]
    );
    assert_eq!(
        extraction.graph.links,
        vec![
            Link::new("R1", "C1", "constrained_by"),
            Link::new("I1", "R1", "affects"),
        ]
    );
    assert_eq!(
        extraction.graph.nodes[0].description.as_deref(),
        Some("Every request answers within one second")
    );
    assert_eq!(
        extraction.graph.nodes[1].description.as_deref(),
        Some("Use existing auth")
    );
    assert_structurally_valid(&extraction.graph);

    // The intermediate can be resubmitted on its own
    assert_eq!(graph_from_yaml(&extraction.yaml).unwrap(), extraction.graph);
}

#[tokio::test]
async fn test_extract_yaml_intermediate_only() {
    let yaml = extractor_returning(YAML_RESPONSE)
        .extract_yaml_intermediate(INPUT)
        .await
        .unwrap();

    assert!(yaml.starts_with("requirements:"));
    assert!(yaml.trim_end().ends_with("relation: affects"));
}

#[test]
fn test_yaml_without_relations_has_no_links() {
    let yaml = r#"
requirements:
  - id: R1
    text: Respond within 1s
  - id: R2
    text: Audit every login
constraints:
  - id: C1
    text: Use existing auth
implicit_knowledge:
  - id: I1
    text: Users are mostly on mobile
"#;

    let graph = graph_from_yaml(yaml).unwrap();
    assert_eq!(graph.nodes.len(), 4);
    assert!(graph.links.is_empty());
}

#[test]
fn test_yaml_relation_to_undeclared_entry() {
    let yaml = r#"
requirements:
  - {id: R1, text: "x", related_to: [{id: C9, relation: "constrained_by"}]}
"#;

    let err = graph_from_yaml(yaml).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("'C9'"), "unexpected message: {}", err);
}

#[test]
fn test_yaml_without_categories_is_decode_error() {
    let err = graph_from_yaml("summary: nothing to extract").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn test_validation_is_idempotent() {
    let graph = graph_from_response(JSON_RESPONSE, DecodeStrategy::Json).unwrap();
    let again = validate_graph(graph.clone()).unwrap();
    assert_eq!(again, graph);
}
