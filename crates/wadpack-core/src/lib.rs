pub mod config;
pub mod logging;
pub mod paths;

pub mod batch;
pub mod desktop_entry;
pub mod icon;
pub mod manifest;
pub mod naming;
pub mod packager;
pub mod runtime;
pub mod storage;
