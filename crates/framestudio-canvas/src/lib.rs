//! FrameStudio Canvas - Drawing surfaces and their registry
//!
//! Provides:
//! - The contract every graphics backend implements (`SurfaceFactory`,
//!   `GraphicsSurface`, `EditingSurface`)
//! - Stable per-frame container ids
//! - The registry that owns one live surface per frame
//! - An in-memory raster backend

pub mod container;
pub mod raster;
pub mod registry;
pub mod surface;

pub use container::ContainerId;
pub use raster::{FactoryStats, RasterFactory, RasterSurface, Shape};
pub use registry::{CanvasEntry, CanvasRegistry};
pub use surface::{EditMode, EditingSurface, GraphicsSurface, SurfaceFactory, SurfaceOptions};
