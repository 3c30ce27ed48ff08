pub mod config;
pub mod data;
pub mod db;
pub mod group;
pub mod provider;
pub mod render;
pub mod view;
