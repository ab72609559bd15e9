/// Graph create/read/delete orchestration
pub mod graph_service;
