pub mod csv_repository;
pub mod generator;
pub mod service;
