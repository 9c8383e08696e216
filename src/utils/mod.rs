//! Utilidades del sistema
//! 
//! Este módulo contiene el manejo de errores compartido por controladores,
//! repositorios y servicios.

pub mod errors;

pub use errors::{AppError, AppResult};
