//! maritime-lte - Check maritime LTE coverage by distance from the coastline

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod geojson;
pub mod geometry;
pub mod logging;
pub mod reception;
pub mod service;
