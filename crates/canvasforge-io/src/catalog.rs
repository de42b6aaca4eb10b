//! Operation catalog returned by `tools`.

use serde::Serialize;

/// One operation exposed by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolInfo {
    pub name: &'static str,
    pub description: &'static str,
}

static TOOLS: &[ToolInfo] = &[
    ToolInfo {
        name: "generate_shapes",
        description: "Generate canvas shapes from a natural language request",
    },
    ToolInfo {
        name: "list_shapes",
        description: "List all shapes on the canvas",
    },
    ToolInfo {
        name: "modify_shape",
        description: "Modify a specific shape by index",
    },
    ToolInfo {
        name: "delete_shape",
        description: "Delete a shape from the canvas by index",
    },
    ToolInfo {
        name: "arrange_shapes",
        description: "Arrange shapes in a horizontal, vertical, grid or circle layout",
    },
    ToolInfo {
        name: "generate_palette",
        description: "Look up a named color palette",
    },
    ToolInfo {
        name: "apply_style",
        description: "Apply a visual style preset to shapes",
    },
    ToolInfo {
        name: "batch_modify",
        description: "Modify every shape matching a filter",
    },
    ToolInfo {
        name: "generate_pattern",
        description: "Generate a checkerboard, dots or wave pattern",
    },
    ToolInfo {
        name: "visualize",
        description: "Build a table, bar chart or pie chart from data",
    },
    ToolInfo {
        name: "analyze_canvas",
        description: "Summarize shape counts, colors and extent",
    },
    ToolInfo {
        name: "generate_icon",
        description: "Generate an icon from the icon library",
    },
    ToolInfo {
        name: "group_edit",
        description: "Modify a group of shapes or generate content for it",
    },
];

pub fn tools() -> &'static [ToolInfo] {
    TOOLS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Request;

    #[test]
    fn test_every_tool_is_a_request_operation() {
        for tool in tools() {
            let err = Request::from_json(&format!(r#"{{"operation": "{}"}}"#, tool.name))
                .err()
                .map(|e| e.to_string())
                .unwrap_or_default();
            assert!(
                !err.contains("unknown variant"),
                "{} is not dispatchable: {}",
                tool.name,
                err
            );
        }
    }
}
