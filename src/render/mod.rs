pub mod backend;
pub mod cpu;
pub mod scene;
pub mod text;
