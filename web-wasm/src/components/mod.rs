pub mod controls;
pub mod header;
pub mod image_grid;
pub mod progress_bar;
pub mod settings_panel;
pub mod upload_area;
