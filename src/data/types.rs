use geo_types::Geometry;
use std::collections::HashMap;
use std::fmt;

/// The OSM element type a record was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Node => write!(f, "node"),
            ElementKind::Way => write!(f, "way"),
            ElementKind::Relation => write!(f, "relation"),
        }
    }
}

/// An owned snapshot of one streamed OSM element with its geometry resolved.
///
/// Ids come from the `osmpbf` library as `i64`; negative ids mark elements
/// that were never uploaded to a server. Ids are unique within a kind only.
#[derive(Debug, Clone)]
pub struct MapElement {
    pub kind: ElementKind,
    pub id: i64,
    pub tags: HashMap<String, String>,
    pub geometry: Geometry<f64>,
}

impl MapElement {
    pub fn new(
        kind: ElementKind,
        id: i64,
        tags: HashMap<String, String>,
        geometry: Geometry<f64>,
    ) -> Self {
        MapElement {
            kind,
            id,
            tags,
            geometry,
        }
    }
}

/// Infrastructure taxonomy of interest to the land-use study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    WindGenerator,
    SolarPlant,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::WindGenerator => write!(f, "wind_generator"),
            Category::SolarPlant => write!(f, "solar_plant"),
        }
    }
}

/// One matched renewable-energy infrastructure object.
///
/// The full original tag mapping is retained so downstream accuracy and
/// completeness audits see exactly what the mapper wrote, including the
/// key-value pair that caused the classification. Records are never
/// reclassified or mutated after creation.
#[derive(Debug, Clone)]
pub struct InfrastructureRecord {
    pub source_id: i64,
    pub source_kind: ElementKind,
    pub category: Category,
    pub geometry: Geometry<f64>,
    pub tags: HashMap<String, String>,
}

impl InfrastructureRecord {
    pub fn from_element(element: MapElement, category: Category) -> Self {
        InfrastructureRecord {
            source_id: element.id,
            source_kind: element.kind,
            category,
            geometry: element.geometry,
            tags: element.tags,
        }
    }

    /// `generator:method` or `plant:method`, whichever is present.
    pub fn method(&self) -> Option<&str> {
        self.aux_tag("generator:method", "plant:method")
    }

    /// `generator:source` or `plant:source`, whichever is present.
    pub fn source_tag(&self) -> Option<&str> {
        self.aux_tag("generator:source", "plant:source")
    }

    /// `generator:type` or `plant:type`, whichever is present.
    pub fn type_tag(&self) -> Option<&str> {
        self.aux_tag("generator:type", "plant:type")
    }

    pub fn name(&self) -> Option<&str> {
        self.tags.get("name").map(String::as_str)
    }

    fn aux_tag(&self, generator_key: &str, plant_key: &str) -> Option<&str> {
        self.tags
            .get(generator_key)
            .or_else(|| self.tags.get(plant_key))
            .map(String::as_str)
    }
}
