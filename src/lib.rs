pub mod graph;
pub mod cust_error;
pub mod edge_parser;
pub mod cnf;
pub mod encoder;
pub mod oracle;
pub mod minimize;
pub mod session;
