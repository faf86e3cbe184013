use geo::{Geometry, LineString};
use serde::Deserialize;

use crate::model::{ModeCosts, SegmentRecord};
use crate::{Error, SegmentId, VertexId};

/// Segment attributes as found in GeoJSON feature properties or CSV rows.
/// Absent or empty costs mean the mode is not allowed.
///
/// Exports of the street table carry the key in `id_0` next to a nullable
/// `id`; other snapshots only have `id`.
#[derive(Debug, Deserialize)]
pub struct RawSegment {
    #[serde(default)]
    pub id_0: Option<SegmentId>,
    #[serde(default)]
    pub id: Option<SegmentId>,
    pub source: VertexId,
    pub target: VertexId,
    #[serde(default)]
    pub km: Option<f64>,
    #[serde(default)]
    pub cost_walk: Option<f64>,
    #[serde(default)]
    pub cost_bike: Option<f64>,
    #[serde(default, alias = "cost")]
    pub cost_car: Option<f64>,
    #[serde(default, alias = "osm_name")]
    pub name: Option<String>,
    /// WKT geometry, CSV snapshots only
    #[serde(default)]
    pub geom: Option<String>,
}

impl RawSegment {
    /// `id_0` when present, `id` otherwise
    pub(crate) fn segment_id(&self) -> Result<SegmentId, Error> {
        self.id_0.or(self.id).ok_or_else(|| {
            Error::InvalidData(format!(
                "segment {} -> {} has neither id_0 nor id",
                self.source, self.target
            ))
        })
    }

    pub(crate) fn into_record(self, geometry: LineString<f64>) -> Result<SegmentRecord, Error> {
        Ok(SegmentRecord {
            id: self.segment_id()?,
            source: self.source,
            target: self.target,
            geometry,
            length_km: self.km,
            costs: ModeCosts::new(self.cost_walk, self.cost_bike, self.cost_car),
            name: self.name.filter(|name| !name.is_empty()),
        })
    }
}

/// Accepts a line string or a single-part multi line string
pub(crate) fn segment_line(id: SegmentId, geometry: Geometry<f64>) -> Result<LineString<f64>, Error> {
    match geometry {
        Geometry::LineString(line) => Ok(line),
        Geometry::MultiLineString(multi) if multi.0.len() == 1 => multi
            .0
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidData(format!("segment {id}: empty geometry"))),
        _ => Err(Error::InvalidData(format!(
            "segment {id}: expected a single line geometry"
        ))),
    }
}
