use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use std::collections::HashMap;

/// Node locations gathered during the node phase of the pass.
///
/// PBF files emit nodes before ways and ways before relations, so by the
/// time a way or relation is visited every node it can reference has either
/// been seen or lies outside the extract. The cache relies on that ordering
/// but does not enforce it.
#[derive(Debug, Default)]
pub struct NodeLocations {
    locations: HashMap<i64, Coord<f64>>,
}

impl NodeLocations {
    pub fn new() -> Self {
        NodeLocations {
            locations: HashMap::new(),
        }
    }

    pub fn insert(&mut self, id: i64, lon: f64, lat: f64) {
        self.locations.insert(id, Coord { x: lon, y: lat });
    }

    pub fn get(&self, id: i64) -> Option<Coord<f64>> {
        self.locations.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Node-ref lists of ways seen so far, keyed by way id.
///
/// Needed to assemble multipolygon relations, whose members reference ways
/// that were streamed earlier in the pass.
#[derive(Debug, Default)]
pub struct WayRefs {
    refs: HashMap<i64, Vec<i64>>,
}

impl WayRefs {
    pub fn new() -> Self {
        WayRefs {
            refs: HashMap::new(),
        }
    }

    pub fn insert(&mut self, id: i64, node_refs: Vec<i64>) {
        self.refs.insert(id, node_refs);
    }

    pub fn get(&self, id: i64) -> Option<&[i64]> {
        self.refs.get(&id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

/// Resolve a way's node refs into a line.
///
/// Returns `None` when the way has fewer than two nodes or references a node
/// missing from the extract. Clipped country extracts routinely truncate
/// ways at the border, so callers treat `None` as skip, not as failure.
pub fn way_line(node_refs: &[i64], nodes: &NodeLocations) -> Option<LineString<f64>> {
    if node_refs.len() < 2 {
        return None;
    }
    let coords: Option<Vec<Coord<f64>>> = node_refs.iter().map(|&id| nodes.get(id)).collect();
    coords.map(LineString::from)
}

/// Turn a closed line into a polygon.
///
/// A way whose first and last node coincide is an area in OSM. Returns
/// `None` for open lines or degenerate rings (fewer than four points
/// including the closing one).
pub fn closed_ring(line: &LineString<f64>) -> Option<Polygon<f64>> {
    if line.0.len() < 4 || line.0.first() != line.0.last() {
        return None;
    }
    Some(Polygon::new(line.clone(), vec![]))
}

/// Assemble the outer rings of a multipolygon relation.
///
/// Member ways arrive as unordered fragments; they are chained end-to-end
/// (reversing where needed) until each chain closes into a ring. Returns
/// `None` when a member way is unknown, a node is missing, or the fragments
/// do not close. Inner rings (holes) are ignored; only outer boundaries
/// matter for the land-use overlay.
pub fn assemble_outer_rings(
    member_way_ids: &[i64],
    ways: &WayRefs,
    nodes: &NodeLocations,
) -> Option<MultiPolygon<f64>> {
    if member_way_ids.is_empty() {
        return None;
    }

    let mut fragments: Vec<Vec<i64>> = Vec::with_capacity(member_way_ids.len());
    for &way_id in member_way_ids {
        let refs = ways.get(way_id)?;
        if refs.len() < 2 {
            return None;
        }
        fragments.push(refs.to_vec());
    }

    let mut rings: Vec<Vec<i64>> = Vec::new();
    while let Some(mut ring) = fragments.pop() {
        // Grow the ring until it closes or no fragment continues it.
        while ring.first() != ring.last() {
            let tail = *ring.last()?;
            let position = fragments.iter().position(|fragment| {
                fragment.first() == Some(&tail) || fragment.last() == Some(&tail)
            })?;
            let mut fragment = fragments.swap_remove(position);
            if fragment.last() == Some(&tail) {
                fragment.reverse();
            }
            ring.extend_from_slice(&fragment[1..]);
        }
        if ring.len() < 4 {
            return None;
        }
        rings.push(ring);
    }

    let mut polygons = Vec::with_capacity(rings.len());
    for ring in rings {
        let line = way_line(&ring, nodes)?;
        polygons.push(Polygon::new(line, vec![]));
    }
    Some(MultiPolygon(polygons))
}
