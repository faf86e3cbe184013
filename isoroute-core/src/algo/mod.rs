pub mod isochrone;
pub mod reachability;
