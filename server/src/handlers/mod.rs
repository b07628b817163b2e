mod app;
mod relay;

pub use app::app;
