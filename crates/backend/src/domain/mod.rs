pub mod a030_retail_transaction;
