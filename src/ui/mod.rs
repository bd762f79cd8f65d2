pub mod kpi;
pub mod market;
pub mod panels;
pub mod seasonal;
pub mod table;
