pub mod u510_generate_dataset;
