//! Read-only views derived from argument details.

mod graph;
mod grouping;

pub use graph::{build_graph, Graph, GraphEdge, GraphNode, LegendEntry, DEFAULT_NODE_COLOR};
pub use grouping::{
    group_arguments, GroupMode, GroupedArgument, GroupedLink, GroupedView, InnerGroup, OuterGroup,
    NO_MACROARGUMENT,
};
