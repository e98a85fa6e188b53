//! Prompt templates sent to the model.
//!
//! The templates ask for one structured block and nothing else, but the
//! scanner does not rely on the model complying.

/// Prompt asking for the flat `{nodes, links}` JSON graph
pub fn json_graph_prompt(text: &str) -> String {
    format!(
        r#"You are an expert in requirements analysis.
Extract the requirements (R), constraints (C) and implicit knowledge or assumptions (I)
from the text below, and analyse how they relate to each other.

Keep each node's text short and to the point; put any detail in its description.
Connect R, C and I nodes with links wherever a relation exists,
so that no node is left without a link.

Output only JSON in the following format.
Do not add any explanation.

{{
    "nodes": [
        {{"id": "R1", "type": "requirement", "text": "extracted requirement",
          "description": "details of the requirement"}},
        {{"id": "C1", "type": "constraint", "text": "extracted constraint",
          "description": "details of the constraint"}},
        {{"id": "I1", "type": "implicit", "text": "extracted implicit knowledge",
          "description": "details of the implicit knowledge"}}
    ],
    "links": [
        {{"source": "C1", "target": "R1", "label": "constraint"}},
        {{"source": "I1", "target": "R1", "label": "insight"}}
    ]
}}

Input text:
{text}"#
    )
}

/// Prompt asking for the categorized YAML document
pub fn yaml_document_prompt(text: &str) -> String {
    format!(
        r#"You are an expert in requirements analysis.
Extract the requirements, constraints and implicit knowledge or assumptions
from the text below, and record how each entry relates to the others.

Keep each entry's text short and to the point; put any detail in its description.
Use ids R1, R2, ... for requirements, C1, C2, ... for constraints
and I1, I2, ... for implicit knowledge.
Every id listed under related_to must be defined in one of the three sections.

Output only a YAML document in the following format, inside a ```yaml code block.
Do not add any explanation.

```yaml
requirements:
  - id: R1
    text: extracted requirement
    description: details of the requirement
    related_to:
      - id: C1
        relation: constrained_by
constraints:
  - id: C1
    text: extracted constraint
    description: details of the constraint
implicit_knowledge:
  - id: I1
    text: extracted implicit knowledge
    description: details of the implicit knowledge
    related_to:
      - id: R1
        relation: assumed_by
```

Input text:
{text}"#
    )
}
