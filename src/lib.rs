//! Planificador de rutas para la recogida de árboles
//!
//! Servicio HTTP que ordena los stops de cada territorio (OSRM trip o
//! vecino más cercano + 2-opt) y guarda la geometría de la ruta.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
