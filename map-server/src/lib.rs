//! Station map server.
//!
//! A web application that proxies a station-list API and a geocoding API,
//! normalizes the loosely-structured station records the upstream returns,
//! and renders them as filterable colored markers on an interactive map.

pub mod domain;
pub mod geocode;
pub mod proxy;
pub mod render;
pub mod search;
pub mod session;
pub mod stations;
pub mod web;
