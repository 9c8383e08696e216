//! Modelo de tarea del checklist de organización

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Tareas con las que arranca cada campaña
pub const DEFAULT_CHECKLIST: [&str; 13] = [
    "Termin Festlegen (Samstag nach Hl 3 Könige)",
    "Flyer erstellen",
    "Google Forms Umfrage erstellen und an GLs verteilen",
    "Website Beitrag schreiben",
    "Flyer und Plakate bestellen (Wir machen Druck Neon Grün)",
    "Pfarrbrief schreiben",
    "Plakate an Christbaumständen und Stadtgebiet verteilen",
    "Fahrzeuge Organisieren",
    "Winkler LKW + Fahrer",
    "Bauhof anfragen zum Abladen",
    "Zentrale anfragen (Dultplatzhäuschen oder JUZ)",
    "Gruppenleiter und Fahrer abfragen",
    "Pils und Essen Organisiern",
];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ChecklistItem {
    pub id: i64,
    pub text: String,
    /// Fecha libre tal como la escribe el equipo
    pub target_date: Option<String>,
    pub responsible: Option<String>,
    pub is_completed: bool,
}
