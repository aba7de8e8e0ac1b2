pub mod advertisement;
pub mod booking;
pub mod common;
pub mod data_table;
pub mod hotel;
pub mod nav_item;
pub mod news;
pub mod query;
pub mod temple;
