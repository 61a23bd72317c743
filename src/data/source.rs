use super::geometry::{assemble_outer_rings, closed_ring, way_line, NodeLocations, WayRefs};
use super::types::{ElementKind, MapElement};
use crate::error::ExtractError;
use geo_types::Geometry;
use osmpbf::{Element, ElementReader, RelMemberType};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A finite, single-pass stream of map elements in file order.
///
/// Implementations yield nodes before ways and ways before relations, as the
/// PBF format guarantees. The stream is not restartable; a second pass needs
/// a fresh source.
pub trait ElementSource {
    fn for_each<F>(self, f: F) -> Result<(), ExtractError>
    where
        F: FnMut(MapElement);
}

/// Element stream backed by an `osmpbf::ElementReader`.
///
/// Performs exactly one sequential pass over the file. Node locations and
/// way node-refs are cached along the way so that way and relation
/// geometries can be resolved when those elements arrive later in the
/// stream. Tagged elements whose geometry cannot be resolved (a way or
/// relation member falling outside the extract) are skipped silently.
pub struct PbfSource<R: Read + Send> {
    reader: ElementReader<R>,
}

impl PbfSource<BufReader<File>> {
    /// Open a PBF extract at the given path.
    ///
    /// Fails with an I/O error when the file is missing or unreadable;
    /// decode errors surface later, during the pass.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let file = File::open(path)?;
        Ok(PbfSource {
            reader: ElementReader::new(BufReader::new(file)),
        })
    }
}

impl<R: Read + Send> PbfSource<R> {
    pub fn new(read: R) -> Self {
        PbfSource {
            reader: ElementReader::new(read),
        }
    }
}

fn collect_tags<'a, I>(tags: I) -> HashMap<String, String>
where
    I: Iterator<Item = (&'a str, &'a str)>,
{
    tags.map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// Outer-member way ids of a multipolygon relation.
///
/// An empty role counts as outer; old data often omits it.
fn outer_way_members(relation: &osmpbf::Relation) -> Vec<i64> {
    relation
        .members()
        .filter(|member| matches!(member.member_type, RelMemberType::Way))
        .filter(|member| matches!(member.role(), Ok("outer") | Ok("")))
        .map(|member| member.member_id)
        .collect()
}

impl<R: Read + Send> ElementSource for PbfSource<R> {
    fn for_each<F>(self, mut f: F) -> Result<(), ExtractError>
    where
        F: FnMut(MapElement),
    {
        let mut nodes = NodeLocations::new();
        let mut ways = WayRefs::new();
        let mut seen = 0u64;
        let mut skipped_geometry = 0u64;

        self.reader.for_each(|element| {
            seen += 1;
            if seen % 1_000_000 == 0 {
                log::info!("Streamed {} elements...", seen);
            }

            match element {
                Element::Node(node) => {
                    nodes.insert(node.id(), node.lon(), node.lat());
                    let tags = collect_tags(node.tags());
                    if !tags.is_empty() {
                        let point = geo_types::Point::new(node.lon(), node.lat());
                        f(MapElement::new(
                            ElementKind::Node,
                            node.id(),
                            tags,
                            Geometry::Point(point),
                        ));
                    }
                }
                Element::DenseNode(node) => {
                    nodes.insert(node.id, node.lon(), node.lat());
                    let tags = collect_tags(node.tags());
                    if !tags.is_empty() {
                        let point = geo_types::Point::new(node.lon(), node.lat());
                        f(MapElement::new(
                            ElementKind::Node,
                            node.id,
                            tags,
                            Geometry::Point(point),
                        ));
                    }
                }
                Element::Way(way) => {
                    let refs: Vec<i64> = way.refs().collect();
                    let tags = collect_tags(way.tags());
                    if !tags.is_empty() {
                        match way_line(&refs, &nodes) {
                            Some(line) => {
                                // Closed ways are areas in OSM.
                                let geometry = match closed_ring(&line) {
                                    Some(polygon) => Geometry::Polygon(polygon),
                                    None => Geometry::LineString(line),
                                };
                                f(MapElement::new(ElementKind::Way, way.id(), tags, geometry));
                            }
                            None => {
                                skipped_geometry += 1;
                                log::debug!("Skipping way {}: unresolved node refs", way.id());
                            }
                        }
                    }
                    ways.insert(way.id(), refs);
                }
                Element::Relation(relation) => {
                    let tags = collect_tags(relation.tags());
                    if tags.is_empty() {
                        return;
                    }
                    let polygonal = matches!(
                        tags.get("type").map(String::as_str),
                        Some("multipolygon") | Some("boundary")
                    );
                    if !polygonal {
                        return;
                    }
                    let members = outer_way_members(&relation);
                    match assemble_outer_rings(&members, &ways, &nodes) {
                        Some(multi) => f(MapElement::new(
                            ElementKind::Relation,
                            relation.id(),
                            tags,
                            Geometry::MultiPolygon(multi),
                        )),
                        None => {
                            skipped_geometry += 1;
                            log::debug!(
                                "Skipping relation {}: outer ring assembly failed",
                                relation.id()
                            );
                        }
                    }
                }
            }
        })?;

        log::info!(
            "Pass complete: {} elements streamed, {} cached node locations, {} skipped for geometry",
            seen,
            nodes.len(),
            skipped_geometry
        );
        Ok(())
    }
}

/// In-memory element source for exercising consumers without a PBF file.
#[derive(Debug, Default)]
pub struct VecSource {
    elements: Vec<MapElement>,
}

impl VecSource {
    pub fn new(elements: Vec<MapElement>) -> Self {
        VecSource { elements }
    }
}

impl ElementSource for VecSource {
    fn for_each<F>(self, mut f: F) -> Result<(), ExtractError>
    where
        F: FnMut(MapElement),
    {
        for element in self.elements {
            f(element);
        }
        Ok(())
    }
}
