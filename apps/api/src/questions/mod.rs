// Question Bank
// In-memory store of interview questions with admin CRUD.

pub mod handlers;
pub mod models;
pub mod store;
