use geo::{LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value as GeoJsonValue};
use serde_json::json;

use crate::routing::route::{Connector, PathResult};
use crate::{Error, RoadNetwork};

impl PathResult {
    /// Converts the route to a `GeoJSON` `FeatureCollection`.
    ///
    /// Features are the origin connector, one feature per traversed segment
    /// and the destination connector. Trip totals are written to a top-level
    /// `properties` member.
    ///
    /// # Errors
    ///
    /// Returns an error if a traversed segment is missing from `network`
    pub fn to_geojson(&self, network: &RoadNetwork) -> Result<FeatureCollection, Error> {
        let mut features = Vec::with_capacity(self.steps.len() + 2);

        features.push(connector_feature(&self.connectors[0])?);

        for (step, geometry) in self.steps.iter().zip(self.oriented_geometries(network)) {
            let name = network
                .segment(step.segment)
                .and_then(|segment| segment.name.clone());
            let value = json!({
                "type": "Feature",
                "geometry": Geometry::new(GeoJsonValue::from(&geometry)),
                "properties": {
                    "seq": step.seq,
                    "node": step.node,
                    "edge": step.segment,
                    "cost": step.cost,
                    "name": name,
                    "distance_km": step.length_km,
                }
            });
            features.push(
                Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))?,
            );
        }

        if features.len() != self.steps.len() + 1 {
            return Err(Error::InvalidData(
                "route references segments missing from the network".to_string(),
            ));
        }

        features.push(connector_feature(&self.connectors[1])?);

        let mut foreign_members = JsonObject::new();
        foreign_members.insert(
            "properties".to_string(),
            json!({
                "mode": self.mode,
                "distance": round_to(self.distance_km, 2),
                "duration": round_to(self.duration_minutes, 1),
                "origin": lat_lng(self.origin.query),
                "destination": lat_lng(self.destination.query),
            }),
        );

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: Some(foreign_members),
        })
    }

    pub fn to_geojson_string(&self, network: &RoadNetwork) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson(network)?)
            .map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn connector_feature(connector: &Connector) -> Result<Feature, Error> {
    let geometry: &LineString<f64> = &connector.geometry;
    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(geometry)),
        "properties": {
            "leg_type": "connector",
            "role": connector.role.as_str(),
            "cost": 0.0,
        }
    });

    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn lat_lng(point: Point<f64>) -> serde_json::Value {
    json!({ "lat": point.y(), "lng": point.x() })
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
