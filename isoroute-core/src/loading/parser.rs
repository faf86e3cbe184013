use std::fs::File;
use std::io::Read;
use std::path::Path;

use geojson::GeoJson;
use wkt::TryFromWkt;

use super::raw_types::{RawSegment, segment_line};
use crate::model::SegmentRecord;
use crate::Error;

fn open(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|e| {
        Error::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        ))
    })
}

/// Reads segment records from a GeoJSON FeatureCollection file
pub fn read_geojson_segments(path: &Path) -> Result<Vec<SegmentRecord>, Error> {
    let mut text = String::new();
    open(path)?.read_to_string(&mut text)?;
    parse_geojson_segments(&text)
}

/// Reads segment records from a CSV file with a WKT `geom` column
pub fn read_csv_segments(path: &Path) -> Result<Vec<SegmentRecord>, Error> {
    parse_csv_segments(open(path)?)
}

pub fn parse_geojson_segments(text: &str) -> Result<Vec<SegmentRecord>, Error> {
    let geojson: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| Error::GeoJsonError(e.to_string()))?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(Error::GeoJsonError(
            "network snapshot must be a FeatureCollection".to_string(),
        ));
    };

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(idx, feature)| {
            let properties = feature.properties.ok_or_else(|| {
                Error::InvalidData(format!("feature {idx} has no properties"))
            })?;
            let raw: RawSegment = serde_json::from_value(serde_json::Value::Object(properties))
                .map_err(|e| Error::InvalidData(format!("feature {idx}: {e}")))?;
            let id = raw.segment_id()?;

            let geometry = feature
                .geometry
                .ok_or_else(|| Error::InvalidData(format!("segment {id} has no geometry")))?;
            let geometry = geo::Geometry::<f64>::try_from(geometry)
                .map_err(|e| Error::GeoJsonError(format!("segment {id}: {e}")))?;
            let line = segment_line(id, geometry)?;

            raw.into_record(line)
        })
        .collect()
}

pub fn parse_csv_segments<R: Read>(reader: R) -> Result<Vec<SegmentRecord>, Error> {
    csv::Reader::from_reader(reader)
        .deserialize::<RawSegment>()
        .map(|row| {
            let mut raw = row?;
            let id = raw.segment_id()?;
            let wkt = raw
                .geom
                .take()
                .ok_or_else(|| Error::InvalidData(format!("segment {id} has no geom column")))?;
            let geometry = geo::Geometry::<f64>::try_from_wkt_str(&wkt)
                .map_err(|e| Error::InvalidData(format!("segment {id}: {e}")))?;
            let line = segment_line(id, geometry)?;

            raw.into_record(line)
        })
        .collect()
}
