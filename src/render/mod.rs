pub mod backend;
pub mod composite;
pub mod cpu;
pub mod pipeline;
pub mod svg;
pub mod theme;
pub mod viewport;
