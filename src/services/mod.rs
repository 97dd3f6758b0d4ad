pub mod acquisition;
pub mod admin;
pub mod catalog;
pub mod kv_store;
pub mod request_store;
pub mod search_session;
