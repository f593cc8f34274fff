pub mod model;
pub mod theme;
pub mod scene;
pub mod journey;
pub mod viewport;
