//! Conversion between geographic coordinates and the network's metric CRS.
//!
//! Segment geometry is stored in a Transverse Mercator projection (by default
//! ETRS89 / PT-TM06, EPSG:3763), while every coordinate crossing the engine
//! boundary is longitude/latitude. Forward and inverse transforms use the
//! ellipsoidal series from Snyder, "Map Projections: A Working Manual".

use geo::{Coord, LineString, MapCoords, Point};
use serde::{Deserialize, Serialize};

/// Parameters of an ellipsoidal Transverse Mercator projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionParams {
    pub semi_major_axis: f64,
    pub inverse_flattening: f64,
    /// Degrees
    pub latitude_of_origin: f64,
    /// Degrees
    pub central_meridian: f64,
    pub scale_factor: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

impl Default for ProjectionParams {
    /// ETRS89 / Portugal TM06 on the GRS80 ellipsoid
    fn default() -> Self {
        Self {
            semi_major_axis: 6_378_137.0,
            inverse_flattening: 298.257_222_101,
            latitude_of_origin: 39.668_258_333_333_3,
            central_meridian: -8.133_108_333_333_3,
            scale_factor: 1.0,
            false_easting: 0.0,
            false_northing: 0.0,
        }
    }
}

/// Precomputed Transverse Mercator transform
#[derive(Debug, Clone)]
pub struct Projection {
    params: ProjectionParams,
    e2: f64,
    ep2: f64,
    lon0: f64,
    m0: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(ProjectionParams::default())
    }
}

impl Projection {
    pub fn new(params: ProjectionParams) -> Self {
        let f = 1.0 / params.inverse_flattening;
        let e2 = f * (2.0 - f);
        let ep2 = e2 / (1.0 - e2);
        let lat0 = params.latitude_of_origin.to_radians();
        let lon0 = params.central_meridian.to_radians();

        let mut projection = Self {
            params,
            e2,
            ep2,
            lon0,
            m0: 0.0,
        };
        projection.m0 = projection.meridian_arc(lat0);
        projection
    }

    pub fn params(&self) -> &ProjectionParams {
        &self.params
    }

    /// Longitude/latitude point to metric easting/northing
    pub fn to_metric(&self, point: Point<f64>) -> Point<f64> {
        self.forward(point.0).into()
    }

    /// Metric easting/northing point to longitude/latitude
    pub fn to_geographic(&self, point: Point<f64>) -> Point<f64> {
        self.inverse(point.0).into()
    }

    pub fn line_to_metric(&self, line: &LineString<f64>) -> LineString<f64> {
        line.map_coords(|c| self.forward(c))
    }

    pub fn line_to_geographic(&self, line: &LineString<f64>) -> LineString<f64> {
        line.map_coords(|c| self.inverse(c))
    }

    pub(crate) fn forward(&self, coord: Coord<f64>) -> Coord<f64> {
        let a = self.params.semi_major_axis;
        let k0 = self.params.scale_factor;
        let lat = coord.y.to_radians();
        let lon = coord.x.to_radians();

        let (sin_lat, cos_lat) = lat.sin_cos();
        let tan_lat = lat.tan();
        let n = a / (1.0 - self.e2 * sin_lat * sin_lat).sqrt();
        let t = tan_lat * tan_lat;
        let c = self.ep2 * cos_lat * cos_lat;
        let big_a = (lon - self.lon0) * cos_lat;
        let m = self.meridian_arc(lat);

        let a2 = big_a * big_a;
        let a3 = a2 * big_a;
        let a4 = a3 * big_a;
        let a5 = a4 * big_a;
        let a6 = a5 * big_a;

        let x = self.params.false_easting
            + k0 * n
                * (big_a
                    + (1.0 - t + c) * a3 / 6.0
                    + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * self.ep2) * a5 / 120.0);
        let y = self.params.false_northing
            + k0 * (m - self.m0
                + n * tan_lat
                    * (a2 / 2.0
                        + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                        + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * self.ep2) * a6
                            / 720.0));

        Coord { x, y }
    }

    pub(crate) fn inverse(&self, coord: Coord<f64>) -> Coord<f64> {
        let a = self.params.semi_major_axis;
        let k0 = self.params.scale_factor;
        let e2 = self.e2;
        let e4 = e2 * e2;
        let e6 = e4 * e2;

        let m = self.m0 + (coord.y - self.params.false_northing) / k0;
        let mu = m / (a * (1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));
        let sqrt_1_e2 = (1.0 - e2).sqrt();
        let e1 = (1.0 - sqrt_1_e2) / (1.0 + sqrt_1_e2);
        let e1_2 = e1 * e1;
        let e1_3 = e1_2 * e1;
        let e1_4 = e1_3 * e1;

        let lat1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1_3 / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1_2 / 16.0 - 55.0 * e1_4 / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1_3 / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1_4 / 512.0) * (8.0 * mu).sin();

        let (sin_lat1, cos_lat1) = lat1.sin_cos();
        let tan_lat1 = lat1.tan();
        let c1 = self.ep2 * cos_lat1 * cos_lat1;
        let t1 = tan_lat1 * tan_lat1;
        let denom = 1.0 - e2 * sin_lat1 * sin_lat1;
        let n1 = a / denom.sqrt();
        let r1 = a * (1.0 - e2) / denom.powf(1.5);
        let d = (coord.x - self.params.false_easting) / (n1 * k0);

        let d2 = d * d;
        let d3 = d2 * d;
        let d4 = d3 * d;
        let d5 = d4 * d;
        let d6 = d5 * d;

        let lat = lat1
            - (n1 * tan_lat1 / r1)
                * (d2 / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * self.ep2) * d4 / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                        - 252.0 * self.ep2
                        - 3.0 * c1 * c1)
                        * d6
                        / 720.0);
        let lon = self.lon0
            + (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
                + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * self.ep2 + 24.0 * t1 * t1)
                    * d5
                    / 120.0)
                / cos_lat1;

        Coord {
            x: lon.to_degrees(),
            y: lat.to_degrees(),
        }
    }

    /// Distance along the meridian from the equator to `lat` (radians)
    fn meridian_arc(&self, lat: f64) -> f64 {
        let a = self.params.semi_major_axis;
        let e2 = self.e2;
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        a * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * lat
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * lat).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * lat).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * lat).sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_false_origin() {
        let projection = Projection::default();
        let params = projection.params();
        let metric = projection.to_metric(Point::new(params.central_meridian, params.latitude_of_origin));
        assert!(metric.x().abs() < 1e-6);
        assert!(metric.y().abs() < 1e-6);
    }

    #[test]
    fn round_trip_is_stable_around_aveiro() {
        let projection = Projection::default();
        for (lon, lat) in [(-8.654, 40.6412), (-8.6578, 40.6301), (-8.60, 40.70), (-8.75, 40.55)] {
            let back = projection.to_geographic(projection.to_metric(Point::new(lon, lat)));
            assert!((back.x() - lon).abs() < 1e-7, "lon {lon} -> {}", back.x());
            assert!((back.y() - lat).abs() < 1e-7, "lat {lat} -> {}", back.y());
        }
    }

    #[test]
    fn metric_distances_are_plausible() {
        // 0.01 degrees of latitude is about 1.11 km
        let projection = Projection::default();
        let a = projection.to_metric(Point::new(-8.65, 40.64));
        let b = projection.to_metric(Point::new(-8.65, 40.65));
        let dy = b.y() - a.y();
        assert!((dy - 1110.0).abs() < 5.0, "dy = {dy}");
        // Aveiro sits west of the central meridian and north of the origin
        assert!(a.x() < 0.0);
        assert!(a.y() > 0.0);
    }
}
