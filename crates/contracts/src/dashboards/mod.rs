pub mod d402_retail_sales;
