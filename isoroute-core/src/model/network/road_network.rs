use geo::{Euclidean, Length, Point};
use hashbrown::HashMap;
use log::{debug, info};
use serde::Serialize;

use super::components::{Segment, SegmentRecord, Vertex};
use super::mode_graph::ModeGraph;
use crate::loading::IsochroneConfig;
use crate::model::{Projection, ProjectionParams, SpatialIndex};
use crate::{Error, Mode, SegmentId, VertexId};

/// Settings fixed for the lifetime of a network
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkMeta {
    pub projection: ProjectionParams,
    /// Meters between a query point and its snapped position
    pub max_snap_distance: f64,
    pub isochrone: IsochroneConfig,
}

impl Default for NetworkMeta {
    fn default() -> Self {
        Self {
            projection: ProjectionParams::default(),
            max_snap_distance: 2000.0,
            isochrone: IsochroneConfig::default(),
        }
    }
}

/// Immutable road network: segments, vertices, one graph per mode and
/// the spatial index. Built once at startup and shared by reference.
#[derive(Debug)]
pub struct RoadNetwork {
    segments: Vec<Segment>,
    segment_lookup: HashMap<SegmentId, usize>,
    vertices: HashMap<VertexId, Vertex>,
    graphs: [ModeGraph; 3],
    spatial: SpatialIndex,
    projection: Projection,
    pub meta: NetworkMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModeSummary {
    pub mode: Mode,
    pub vertices: usize,
    pub edges: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkSummary {
    pub segments: usize,
    pub vertices: usize,
    pub modes: Vec<ModeSummary>,
}

impl RoadNetwork {
    /// Validates the records and builds graphs and spatial index.
    ///
    /// # Errors
    ///
    /// `InvalidModeCost` for a non-positive or non-finite cost, `InvalidData`
    /// for duplicate identifiers, degenerate geometry or an empty snapshot.
    pub fn new<I>(records: I, meta: NetworkMeta) -> Result<Self, Error>
    where
        I: IntoIterator<Item = SegmentRecord>,
    {
        if !(meta.max_snap_distance.is_finite() && meta.max_snap_distance > 0.0) {
            return Err(Error::InvalidData(format!(
                "max snap distance must be positive, got {}",
                meta.max_snap_distance
            )));
        }

        let projection = Projection::new(meta.projection);
        let mut segments: Vec<Segment> = Vec::new();
        let mut segment_lookup: HashMap<SegmentId, usize> = HashMap::new();
        let mut vertices: HashMap<VertexId, Vertex> = HashMap::new();

        for record in records {
            let segment = validate_record(record, &projection)?;

            if segment_lookup.insert(segment.id, segments.len()).is_some() {
                return Err(Error::InvalidData(format!(
                    "duplicate segment id {}",
                    segment.id
                )));
            }

            for (vertex, coord) in [
                (segment.source, segment.geographic.0.first()),
                (segment.target, segment.geographic.0.last()),
            ] {
                if let Some(coord) = coord {
                    vertices.entry(vertex).or_insert_with(|| Vertex {
                        id: vertex,
                        geometry: Point::from(*coord),
                    });
                }
            }

            segments.push(segment);
        }

        if segments.is_empty() {
            return Err(Error::InvalidData(
                "network snapshot contains no segments".to_string(),
            ));
        }

        let graphs = Mode::ALL.map(|mode| ModeGraph::build(mode, &segments));
        let spatial = SpatialIndex::build(&segments);

        let network = Self {
            segments,
            segment_lookup,
            vertices,
            graphs,
            spatial,
            projection,
            meta,
        };

        let summary = network.summary();
        info!(
            "Road network built: {} segments, {} vertices",
            summary.segments, summary.vertices
        );
        for mode in &summary.modes {
            info!(
                "{} graph: {} vertices, {} edges",
                mode.mode, mode.vertices, mode.edges
            );
        }

        Ok(network)
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segment_lookup.get(&id).map(|&idx| &self.segments[idx])
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    pub fn graph(&self, mode: Mode) -> &ModeGraph {
        &self.graphs[mode.index()]
    }

    pub fn spatial(&self) -> &SpatialIndex {
        &self.spatial
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn summary(&self) -> NetworkSummary {
        NetworkSummary {
            segments: self.segments.len(),
            vertices: self.vertices.len(),
            modes: self
                .graphs
                .iter()
                .map(|graph| ModeSummary {
                    mode: graph.mode(),
                    vertices: graph.vertex_count(),
                    edges: graph.edge_count(),
                })
                .collect(),
        }
    }
}

fn validate_record(record: SegmentRecord, projection: &Projection) -> Result<Segment, Error> {
    if record.geometry.0.len() < 2 {
        return Err(Error::InvalidData(format!(
            "segment {} has fewer than two coordinates",
            record.id
        )));
    }
    if record
        .geometry
        .coords()
        .any(|c| !(c.x.is_finite() && c.y.is_finite()))
    {
        return Err(Error::InvalidData(format!(
            "segment {} has non-finite coordinates",
            record.id
        )));
    }

    record.costs.validate(record.id)?;

    let length_km = match record.length_km {
        Some(km) if km.is_finite() && km >= 0.0 => km,
        Some(km) => {
            return Err(Error::InvalidData(format!(
                "segment {} has invalid length {km}",
                record.id
            )));
        }
        None => {
            let km = Euclidean.length(&record.geometry) / 1000.0;
            debug!("Segment {} has no length, computed {km:.4} km", record.id);
            km
        }
    };

    let geographic = projection.line_to_geographic(&record.geometry);

    Ok(Segment {
        id: record.id,
        source: record.source,
        target: record.target,
        geometry: record.geometry,
        geographic,
        length_km,
        costs: record.costs,
        name: record.name,
    })
}
