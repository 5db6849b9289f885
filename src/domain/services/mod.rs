pub mod action_router;
pub mod card_renderer;
pub mod card_update_publisher;
pub mod click_tracker;
pub mod color_table;
