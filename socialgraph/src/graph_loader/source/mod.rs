pub mod csv_loader;
pub mod edge_list_loader;
pub mod json_loader;
