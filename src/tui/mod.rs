pub mod app;
pub mod button;
pub mod event;
pub mod legend;
pub mod status;
pub mod theme;
