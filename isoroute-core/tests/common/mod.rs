#![allow(dead_code)]

use geo::{Euclidean, Length, LineString, Point};
use isoroute_core::model::{ModeCosts, NetworkMeta};
use isoroute_core::{Mode, Projection, RoadNetwork, SegmentId, SegmentRecord, VertexId};

pub const ROWS: usize = 9;
pub const COLS: usize = 7;
pub const LAT0: f64 = 40.628;
pub const LON0: f64 = -8.660;
pub const STEP: f64 = 0.002;

/// Separate two-segment street north of the grid, not connected to it
pub const ISLAND_LAT: f64 = 40.660;

pub fn vertex_id(row: usize, col: usize) -> VertexId {
    (row * 100 + col + 1) as VertexId
}

pub fn vertex_lonlat(row: usize, col: usize) -> Point<f64> {
    Point::new(LON0 + col as f64 * STEP, LAT0 + row as f64 * STEP)
}

fn costs_for(length_km: f64) -> ModeCosts {
    ModeCosts::new(
        Some(length_km / Mode::Walk.speed_kmh() * 60.0),
        Some(length_km / Mode::Bike.speed_kmh() * 60.0),
        Some(length_km / Mode::Car.speed_kmh() * 60.0),
    )
}

fn record(
    projection: &Projection,
    id: SegmentId,
    source: VertexId,
    target: VertexId,
    from: Point<f64>,
    to: Point<f64>,
) -> SegmentRecord {
    let geometry = LineString::from(vec![projection.to_metric(from).0, projection.to_metric(to).0]);
    let length_km = Euclidean.length(&geometry) / 1000.0;
    SegmentRecord {
        id,
        source,
        target,
        geometry,
        length_km: Some(length_km),
        costs: costs_for(length_km),
        name: Some(format!("Rua {id}")),
    }
}

/// Street grid over central Aveiro, horizontal segments digitized west to
/// east and vertical ones south to north, plus a disconnected island
pub fn aveiro_records() -> Vec<SegmentRecord> {
    let projection = Projection::default();
    let mut records = Vec::new();
    let mut next_id: SegmentId = 1;

    for row in 0..ROWS {
        for col in 0..COLS {
            if col + 1 < COLS {
                records.push(record(
                    &projection,
                    next_id,
                    vertex_id(row, col),
                    vertex_id(row, col + 1),
                    vertex_lonlat(row, col),
                    vertex_lonlat(row, col + 1),
                ));
                next_id += 1;
            }
            if row + 1 < ROWS {
                records.push(record(
                    &projection,
                    next_id,
                    vertex_id(row, col),
                    vertex_id(row + 1, col),
                    vertex_lonlat(row, col),
                    vertex_lonlat(row + 1, col),
                ));
                next_id += 1;
            }
        }
    }

    let island = [
        Point::new(-8.656, ISLAND_LAT),
        Point::new(-8.654, ISLAND_LAT),
        Point::new(-8.652, ISLAND_LAT),
    ];
    records.push(record(&projection, 9001, 9001, 9002, island[0], island[1]));
    records.push(record(&projection, 9002, 9002, 9003, island[1], island[2]));

    records
}

pub fn aveiro_network() -> RoadNetwork {
    RoadNetwork::new(aveiro_records(), NetworkMeta::default()).expect("synthetic network is valid")
}

/// lon/lat point from a `lat, lon` pair
pub fn lat_lon(lat: f64, lon: f64) -> Point<f64> {
    Point::new(lon, lat)
}
