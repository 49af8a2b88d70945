pub mod abstract_trait;
pub mod clock;
pub mod config;
pub mod di;
pub mod domain;
pub mod handler;
pub mod model;
pub mod reporting;
pub mod repository;
pub mod service;
pub mod state;
