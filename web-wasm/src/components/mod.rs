pub mod nav_bar;
pub mod search_bar;
pub mod filter_dropdown;
pub mod toggle;
pub mod location_chip;
pub mod opportunity_table;
pub mod opportunity_modal;
pub mod location_modal;
pub mod error_banner;
