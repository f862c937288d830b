//! Per-line segment multigraph and its topology.
//!
//! Every line id gets its own undirected multigraph whose vertices are coordinates
//! and whose edges are the reported segments. Segments are never merged: a segment
//! reported twice adds a parallel edge and raises the degree of both ends, which is
//! what makes duplicated stretches show up as malformed topology.
//!
//! Vertex identity is the exact bit pattern of `lat`/`lon`. Coordinates that differ
//! by a rounding error are distinct vertices.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Bfs;

use crate::error::OdreResult;
use crate::rows::{RowSet, SegmentRow};
use crate::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VertexKey(u64, u64);

impl From<&Coordinate> for VertexKey {
    fn from(c: &Coordinate) -> Self {
        VertexKey(c.lat.to_bits(), c.lon.to_bits())
    }
}

/// Vertices of one connected component, in discovery order.
#[derive(Debug, Clone)]
pub struct Component {
    members: Vec<NodeIndex>,
}

impl Component {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Topological classification of a component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentShape {
    /// Exactly two degree-1 vertices
    Chain { from: Coordinate, to: Coordinate },
    /// Any other endpoint count: 0 is a loop, 3 or more a junction
    Malformed { endpoints: usize },
}

/// Undirected multigraph of the segments of one line.
#[derive(Debug, Clone, Default)]
pub struct LineGraph {
    graph: UnGraph<Coordinate, ()>,
    index: HashMap<VertexKey, NodeIndex>,
}

impl LineGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex unless an identical coordinate is already present.
    pub fn add_vertex(&mut self, coordinate: Coordinate) -> NodeIndex {
        let graph = &mut self.graph;
        *self
            .index
            .entry(VertexKey::from(&coordinate))
            .or_insert_with(|| graph.add_node(coordinate))
    }

    /// Add one edge between `a` and `b`, even if they are already connected.
    pub fn add_segment(&mut self, a: Coordinate, b: Coordinate) {
        let a = self.add_vertex(a);
        let b = self.add_vertex(b);
        self.graph.add_edge(a, b, ());
    }

    /// Add consecutive pairs of `coordinates` as segments.
    pub fn add_polyline<I>(&mut self, coordinates: I)
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut previous: Option<Coordinate> = None;
        for coordinate in coordinates {
            match previous {
                Some(prev) => self.add_segment(prev, coordinate),
                None => {
                    self.add_vertex(coordinate);
                }
            }
            previous = Some(coordinate);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of incident edges, parallel edges included. A self-loop counts once.
    pub fn degree(&self, coordinate: &Coordinate) -> Option<usize> {
        let node = self.index.get(&VertexKey::from(coordinate))?;
        Some(self.node_degree(*node))
    }

    fn node_degree(&self, node: NodeIndex) -> usize {
        self.graph.edges(node).count()
    }

    /// Connected components, ignoring edge multiplicity.
    ///
    /// Components come out in order of their first inserted vertex.
    pub fn components(&self) -> Vec<Component> {
        let mut visited = HashSet::new();
        let mut components = Vec::new();
        for start in self.graph.node_indices() {
            if visited.contains(&start) {
                continue;
            }
            let mut queue = VecDeque::new();
            queue.push_back(start);
            let mut members = Vec::new();
            while let Some(node) = queue.pop_front() {
                if !visited.insert(node) {
                    continue;
                }
                members.push(node);
                for neighbor in self.graph.neighbors(node) {
                    if !visited.contains(&neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }
            if !members.is_empty() {
                components.push(Component { members });
            }
        }
        components
    }

    /// Degree-1 vertices of `component`, in discovery order.
    pub fn endpoints(&self, component: &Component) -> Vec<Coordinate> {
        component
            .members
            .iter()
            .filter(|node| self.node_degree(**node) == 1)
            .map(|node| self.graph[*node])
            .collect()
    }

    pub fn shape(&self, component: &Component) -> ComponentShape {
        match self.endpoints(component).as_slice() {
            [from, to] => ComponentShape::Chain {
                from: *from,
                to: *to,
            },
            other => ComponentShape::Malformed {
                endpoints: other.len(),
            },
        }
    }

    /// Breadth-first visit order of the component containing `start`.
    ///
    /// On a simple chain this is the polyline order from `start` to the other end.
    /// Nothing checks that the component really is a chain: a cycle or branch that
    /// leaves exactly two degree-1 vertices yields an order that is not a path.
    pub fn traverse_from(&self, start: &Coordinate) -> Vec<Coordinate> {
        let Some(&node) = self.index.get(&VertexKey::from(start)) else {
            return Vec::new();
        };
        let mut order = Vec::new();
        let mut bfs = Bfs::new(&self.graph, node);
        while let Some(next) = bfs.next(&self.graph) {
            order.push(self.graph[next]);
        }
        order
    }

    /// Ordered coordinates of a two-endpoint component, `None` otherwise.
    pub fn linearize(&self, component: &Component) -> Option<Vec<Coordinate>> {
        match self.shape(component) {
            ComponentShape::Chain { from, .. } => Some(self.traverse_from(&from)),
            ComponentShape::Malformed { .. } => None,
        }
    }
}

/// Add every segment of `rows` to the graph of each line id it names.
///
/// Called once per sub-dataset against the same map, so one line may mix aerial and
/// underground segments. Returns the number of segments read.
pub fn add_segments(graphs: &mut BTreeMap<String, LineGraph>, rows: &RowSet) -> OdreResult<usize> {
    let mut segments = 0;
    for (i, row) in rows.iter().enumerate() {
        let Some(segment) = SegmentRow::from_row(&row, i + 1)? else {
            continue;
        };
        for line_id in segment.line_ids {
            graphs
                .entry(line_id)
                .or_default()
                .add_segment(segment.start, segment.end);
        }
        segments += 1;
    }
    Ok(segments)
}
