//! Platform-independent core of the world map widget: viewport geometry,
//! zoom targeting, tweening, selection state and the controller that ties
//! them to a rendering surface.

pub mod controller;
pub mod geometry;
pub mod regions;
pub mod selection;
pub mod tween;
pub mod zoom;
