//! Graphviz DOT rendering.
//!
//! [`Dot`] wraps a graph reference and renders it through `Display` (weights
//! formatted with `Display`) or `Debug` (weights formatted with `Debug`).
//! Nodes are named by their dense [`NodeIndexable::to_index`] position, so
//! the output of a [`crate::StableGraph`] with holes stays valid DOT.
//!
//! # Examples
//!
//! ```rust
//! use lindgraph::dot::{Config, Dot};
//! use lindgraph::DiGraph;
//!
//! let mut g = DiGraph::<&str, &str>::new();
//! let a = g.add_node("A");
//! let b = g.add_node("B");
//! g.add_edge(a, b, "w");
//!
//! assert_eq!(
//!     Dot::new(&g).to_string(),
//!     "digraph {\n    0 [ label = \"A\" ]\n    1 [ label = \"B\" ]\n    0 -> 1 [ label = \"w\" ]\n}\n"
//! );
//! assert_eq!(
//!     Dot::with_config(&g, &[Config::EDGE_NO_LABEL, Config::GRAPH_CONTENT_ONLY]).to_string(),
//!     "    0 [ label = \"A\" ]\n    1 [ label = \"B\" ]\n    0 -> 1 [ ]\n"
//! );
//! ```

use std::fmt::{self, Display};

use bitflags::bitflags;

use crate::{
    utils::escape_dot,
    visit::{
        Data, EdgeRefOf, GraphBase, GraphProp, IntoEdgeReferences, IntoNodeReferences,
        NodeIndexable,
    },
};

const INDENT: &str = "    ";

bitflags! {
    /// Rendering options for [`Dot`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Config: u8 {
        /// Label nodes with their index instead of their weight.
        const NODE_INDEX_LABEL = 0x01;
        /// Label edges with their position in `edge_references` order.
        const EDGE_INDEX_LABEL = 0x02;
        /// Omit edge labels.
        const EDGE_NO_LABEL = 0x04;
        /// Omit node labels.
        const NODE_NO_LABEL = 0x08;
        /// Render only the statements, without the enclosing `digraph { }`.
        const GRAPH_CONTENT_ONLY = 0x10;
    }
}

/// Extra attributes for an edge, written verbatim after its label.
pub type EdgeAttrs<'a, G> = &'a dyn Fn(&G, EdgeRefOf<'_, G>) -> String;

/// Extra attributes for a node, written verbatim after its label.
pub type NodeAttrs<'a, G> =
    &'a dyn Fn(&G, (<G as GraphBase>::NodeId, &<G as Data>::NodeWeight)) -> String;

/// A graph prepared for DOT output.
pub struct Dot<'a, G>
where
    G: IntoEdgeReferences + IntoNodeReferences,
{
    graph: G,
    config: Config,
    get_edge_attributes: EdgeAttrs<'a, G>,
    get_node_attributes: NodeAttrs<'a, G>,
}

impl<'a, G> Dot<'a, G>
where
    G: GraphProp + NodeIndexable + IntoEdgeReferences + IntoNodeReferences,
{
    /// Renders `graph` with default options.
    pub fn new(graph: G) -> Self {
        Self::with_config(graph, &[])
    }

    /// Renders `graph` with the given options.
    pub fn with_config(graph: G, config: &[Config]) -> Self {
        Self::with_attr_getters(graph, config, &|_, _| String::new(), &|_, _| String::new())
    }

    /// Renders `graph` with the given options, appending the attributes the
    /// getters return to every edge and node statement.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lindgraph::dot::Dot;
    /// use lindgraph::UnGraph;
    ///
    /// let g = UnGraph::<i32, i32>::from_edges([(0, 1, 5)]);
    /// let dot = Dot::with_attr_getters(
    ///     &g,
    ///     &[],
    ///     &|_, e| if *e.weight() > 3 { "color = red".into() } else { String::new() },
    ///     &|_, _| String::new(),
    /// );
    /// assert!(dot.to_string().contains("0 -- 1 [ label = \"5\" color = red ]"));
    /// ```
    pub fn with_attr_getters(
        graph: G,
        config: &[Config],
        get_edge_attributes: EdgeAttrs<'a, G>,
        get_node_attributes: NodeAttrs<'a, G>,
    ) -> Self {
        let config = config.iter().fold(Config::empty(), |acc, &flag| acc | flag);
        Dot {
            graph,
            config,
            get_edge_attributes,
            get_node_attributes,
        }
    }

    fn graph_fmt<NF, EF>(
        &self,
        f: &mut fmt::Formatter<'_>,
        node_fmt: NF,
        edge_fmt: EF,
    ) -> fmt::Result
    where
        NF: Fn(&G::NodeWeight) -> String,
        EF: Fn(&G::EdgeWeight) -> String,
    {
        let g = &self.graph;
        let content_only = self.config.contains(Config::GRAPH_CONTENT_ONLY);
        let (keyword, edge_op) = if g.is_directed() {
            ("digraph", "->")
        } else {
            ("graph", "--")
        };

        if !content_only {
            writeln!(f, "{keyword} {{")?;
        }

        for (id, weight) in g.node_references() {
            let label = if self.config.contains(Config::NODE_NO_LABEL) {
                None
            } else if self.config.contains(Config::NODE_INDEX_LABEL) {
                Some(g.to_index(id).to_string())
            } else {
                Some(node_fmt(weight))
            };
            let attrs = (self.get_node_attributes)(g, (id, weight));
            write!(f, "{INDENT}{} ", g.to_index(id))?;
            write_attr_list(f, label.as_deref(), &attrs)?;
        }

        for (i, edge) in g.edge_references().enumerate() {
            let label = if self.config.contains(Config::EDGE_NO_LABEL) {
                None
            } else if self.config.contains(Config::EDGE_INDEX_LABEL) {
                Some(i.to_string())
            } else {
                Some(edge_fmt(edge.weight()))
            };
            let attrs = (self.get_edge_attributes)(g, edge);
            write!(
                f,
                "{INDENT}{} {edge_op} {} ",
                g.to_index(edge.source()),
                g.to_index(edge.target())
            )?;
            write_attr_list(f, label.as_deref(), &attrs)?;
        }

        if !content_only {
            writeln!(f, "}}")?;
        }
        Ok(())
    }
}

fn write_attr_list(f: &mut fmt::Formatter<'_>, label: Option<&str>, attrs: &str) -> fmt::Result {
    write!(f, "[ ")?;
    if let Some(label) = label {
        write!(f, "label = \"{}\" ", escape_dot(label))?;
    }
    if !attrs.is_empty() {
        write!(f, "{attrs} ")?;
    }
    writeln!(f, "]")
}

impl<G> Display for Dot<'_, G>
where
    G: GraphProp + NodeIndexable + IntoEdgeReferences + IntoNodeReferences,
    G::NodeWeight: Display,
    G::EdgeWeight: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.graph_fmt(f, ToString::to_string, ToString::to_string)
    }
}

impl<G> fmt::Debug for Dot<'_, G>
where
    G: GraphProp + NodeIndexable + IntoEdgeReferences + IntoNodeReferences,
    G::NodeWeight: fmt::Debug,
    G::EdgeWeight: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.graph_fmt(f, |w| format!("{w:?}"), |w| format!("{w:?}"))
    }
}
