pub mod route_file;
