pub mod regular_dijkstra;
mod state;
pub mod traced_dijkstra;

pub use regular_dijkstra::dijkstra_path_weights;
pub(crate) use traced_dijkstra::shortest_path;
pub use traced_dijkstra::TracedPath;
