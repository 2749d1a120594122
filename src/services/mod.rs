// Core services: upload persistence, server lifecycle, LAN discovery

pub mod file_storage;
pub mod lifecycle;
pub mod net_discovery;
