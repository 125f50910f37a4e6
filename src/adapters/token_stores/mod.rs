pub mod file_token_store;
