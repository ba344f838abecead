pub mod marker_layer;
pub mod world_map;
